//! CLI commands and argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Reconcile GitLab resources from the command line
#[derive(Parser, Debug)]
#[command(name = "gitlab-provider")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Provider configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the supported resource types
    Resources,

    /// Show the attribute schema of a resource type
    Schema {
        /// Resource type, e.g. gitlab_topic
        resource_type: String,
    },

    /// Show the version of the remote GitLab instance
    Version,

    /// Create a resource from its desired state
    Create {
        #[command(flatten)]
        target: TypeArg,

        /// Desired state JSON, or @file
        #[arg(long)]
        desired: String,
    },

    /// Read a resource by identity
    Read {
        #[command(flatten)]
        target: TargetArgs,

        /// Prior state JSON, or @file
        #[arg(long)]
        prior: Option<String>,
    },

    /// Update a resource from its prior and desired state
    Update {
        #[command(flatten)]
        target: TargetArgs,

        /// Prior state JSON, or @file
        #[arg(long)]
        prior: String,

        /// Desired state JSON, or @file
        #[arg(long)]
        desired: String,
    },

    /// Delete a resource
    Delete {
        #[command(flatten)]
        target: TargetArgs,

        /// Last known state JSON, or @file
        #[arg(long)]
        prior: Option<String>,
    },

    /// Import an existing resource by identity
    Import {
        #[command(flatten)]
        target: TargetArgs,
    },
}

/// Resource type selector
#[derive(Args, Debug, Clone)]
pub struct TypeArg {
    /// Resource type, e.g. gitlab_topic
    #[arg(short = 't', long = "type")]
    pub resource_type: String,
}

/// Resource type and identity
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// Resource type, e.g. gitlab_topic
    #[arg(short = 't', long = "type")]
    pub resource_type: String,

    /// Resource identity
    #[arg(long)]
    pub id: String,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON, one document per line
    Json,
    /// Indented JSON
    Pretty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create() {
        let cli = Cli::try_parse_from([
            "gitlab-provider",
            "create",
            "--type",
            "gitlab_topic",
            "--desired",
            r#"{"name":"a"}"#,
        ])
        .unwrap();

        match cli.command {
            Commands::Create { target, desired } => {
                assert_eq!(target.resource_type, "gitlab_topic");
                assert_eq!(desired, r#"{"name":"a"}"#);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "gitlab-provider",
            "read",
            "-t",
            "gitlab_project_membership",
            "--id",
            "group/project:7",
            "--config",
            "provider.yaml",
            "--verbose",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("provider.yaml")));
        assert!(matches!(
            cli.command,
            Commands::Read { ref target, prior: None } if target.id == "group/project:7"
        ));
    }

    #[test]
    fn test_update_requires_prior() {
        let result = Cli::try_parse_from([
            "gitlab-provider",
            "update",
            "--type",
            "gitlab_topic",
            "--id",
            "1",
            "--desired",
            "{}",
        ]);
        assert!(result.is_err());
    }
}
