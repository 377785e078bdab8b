//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat, TargetArgs};
use crate::config::{ProviderConfig, ProviderContext};
use crate::error::{Error, Result};
use crate::resource::{ReadResult, Resource, ResourceRegistry, ResourceState};
use crate::types::JsonValue;
use serde_json::json;
use std::fs;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
    registry: ResourceRegistry,
}

impl Runner {
    /// Create a new runner over the built-in resource types
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            registry: ResourceRegistry::builtin(),
        }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Resources => self.resources(),
            Commands::Schema { resource_type } => self.schema(resource_type),
            Commands::Version => self.version().await,
            Commands::Create { target, desired } => {
                let resource = self.registry.get(&target.resource_type)?;
                let desired = parse_document(desired)?;
                let ctx = self.context().await?;

                let state = resource.create(&ctx, &desired).await?;
                info!("Created {} '{}'", resource.type_name(), state.id);
                self.output_state(&state);
                Ok(())
            }
            Commands::Read { target, prior } => {
                let (resource, ctx) = self.target(target).await?;
                let prior = parse_optional_document(prior.as_deref())?;

                match resource.read(&ctx, &target.id, &prior).await? {
                    ReadResult::Present(state) => self.output_state(&state),
                    ReadResult::Absent => {
                        info!("{} '{}' no longer exists", resource.type_name(), target.id);
                        self.output_message(&json!({ "id": null }));
                    }
                }
                Ok(())
            }
            Commands::Update {
                target,
                prior,
                desired,
            } => {
                let (resource, ctx) = self.target(target).await?;
                let prior = parse_document(prior)?;
                let desired = parse_document(desired)?;

                let state = resource.update(&ctx, &target.id, &prior, &desired).await?;
                info!("Updated {} '{}'", resource.type_name(), state.id);
                self.output_state(&state);
                Ok(())
            }
            Commands::Delete { target, prior } => {
                let (resource, ctx) = self.target(target).await?;
                let prior = parse_optional_document(prior.as_deref())?;

                resource.delete(&ctx, &target.id, &prior).await?;
                info!("Deleted {} '{}'", resource.type_name(), target.id);
                self.output_message(&json!({ "id": target.id, "deleted": true }));
                Ok(())
            }
            Commands::Import { target } => {
                let (resource, ctx) = self.target(target).await?;

                let state = resource.import(&ctx, &target.id).await?;
                info!("Imported {} '{}'", resource.type_name(), state.id);
                self.output_state(&state);
                Ok(())
            }
        }
    }

    /// Load the provider configuration; environment variables win over the file
    fn load_config(&self) -> Result<ProviderConfig> {
        let config = match &self.cli.config {
            Some(path) => {
                debug!("Loading provider configuration from {}", path.display());
                ProviderConfig::from_file(path)?
            }
            None => ProviderConfig::default(),
        };
        Ok(config.with_env_overrides())
    }

    async fn context(&self) -> Result<ProviderContext> {
        ProviderContext::connect(self.load_config()?).await
    }

    async fn target(&self, target: &TargetArgs) -> Result<(Box<dyn Resource>, ProviderContext)> {
        let resource = self.registry.get(&target.resource_type)?;
        let ctx = self.context().await?;
        Ok((resource, ctx))
    }

    /// List resource types
    fn resources(&self) -> Result<()> {
        let resources: Vec<JsonValue> = self
            .registry
            .type_names()
            .into_iter()
            .map(|name| -> Result<JsonValue> {
                let resource = self.registry.get(name)?;
                Ok(json!({
                    "name": name,
                    "description": resource.schema().description,
                    "importable": resource.importable(),
                }))
            })
            .collect::<Result<_>>()?;

        self.output_message(&json!({ "resources": resources }));
        Ok(())
    }

    /// Show one schema
    fn schema(&self, resource_type: &str) -> Result<()> {
        let resource = self.registry.get(resource_type)?;
        self.output_message(&serde_json::to_value(resource.schema())?);
        Ok(())
    }

    /// Show the remote version
    async fn version(&self) -> Result<()> {
        let ctx = self.context().await?;
        let info = ctx.client().version_info().await?;
        info!("Connected to GitLab {}", info.version);
        self.output_message(&serde_json::to_value(&info)?);
        Ok(())
    }

    fn output_state(&self, state: &ResourceState) {
        self.output_message(&json!({
            "id": state.id,
            "attributes": state.attributes,
        }));
    }

    /// Output a message based on format
    fn output_message(&self, msg: &JsonValue) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Parse a JSON document given inline or as `@path`
pub fn parse_document(arg: &str) -> Result<JsonValue> {
    let content = match arg.strip_prefix('@') {
        Some(path) => {
            fs::read_to_string(path).map_err(|source| Error::LocalResourceUnavailable {
                path: path.to_string(),
                source,
            })?
        }
        None => arg.to_string(),
    };

    serde_json::from_str(&content).map_err(|e| Error::config(format!("Invalid state JSON: {e}")))
}

fn parse_optional_document(arg: Option<&str>) -> Result<JsonValue> {
    arg.map_or(Ok(JsonValue::Null), parse_document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_inline_document() {
        let value = parse_document(r#"{"name": "topic-a"}"#).unwrap();
        assert_eq!(value, json!({"name": "topic-a"}));
    }

    #[test]
    fn test_parse_document_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"project_id": "5", "user_id": 7}}"#).unwrap();

        let arg = format!("@{}", file.path().display());
        let value = parse_document(&arg).unwrap();
        assert_eq!(value, json!({"project_id": "5", "user_id": 7}));
    }

    #[test]
    fn test_parse_document_errors() {
        assert!(matches!(
            parse_document("@/no/such/state.json"),
            Err(Error::LocalResourceUnavailable { .. })
        ));
        assert!(matches!(parse_document("{not json"), Err(Error::Config { .. })));
    }

    #[test]
    fn test_missing_prior_is_null() {
        assert_eq!(parse_optional_document(None).unwrap(), JsonValue::Null);
    }
}
