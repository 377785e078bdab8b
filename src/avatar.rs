//! Avatar attachments read from the local file system
//!
//! Topics (and other GitLab objects) accept an avatar image uploaded as
//! multipart form data. The desired state names a local path; the image is
//! re-uploaded whenever the path or its `avatar_hash` changes, or when no
//! hash is known yet.

use crate::error::{Error, Result};
use crate::http::MultipartBody;
use crate::mapper::ChangeSet;
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::debug;

/// An avatar image loaded into memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar {
    /// File name reported to GitLab (the last path component)
    pub filename: String,
    /// Image bytes
    pub bytes: Vec<u8>,
}

impl Avatar {
    /// Read an avatar from a local path
    pub async fn read(path: &str) -> Result<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| Error::LocalResourceUnavailable {
                path: path.to_string(),
                source,
            })?;

        let filename = Path::new(path)
            .file_name()
            .map_or_else(|| path.to_string(), |n| n.to_string_lossy().into_owned());

        debug!("Read avatar {} ({} bytes)", path, bytes.len());
        Ok(Self { filename, bytes })
    }

    /// Hex-encoded SHA-256 of the image
    pub fn sha256(&self) -> String {
        hex::encode(Sha256::digest(&self.bytes))
    }

    /// Attach this image to a multipart body under the `avatar` field
    pub fn attach(&self, body: MultipartBody) -> MultipartBody {
        body.file("avatar", self.filename.clone(), self.bytes.clone())
    }
}

/// What an update has to do with the remote avatar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarChange {
    /// Leave the remote avatar alone
    Unchanged,
    /// Upload a new image
    Upload(Avatar),
    /// Remove the remote avatar
    Remove,
}

/// Load the avatar to upload on creation, if one is configured
pub async fn avatar_for_create(path: Option<&str>) -> Result<Option<Avatar>> {
    match path.filter(|p| !p.is_empty()) {
        Some(path) => Ok(Some(Avatar::read(path).await?)),
        None => Ok(None),
    }
}

/// Decide what an update does with the avatar
pub async fn avatar_for_update(
    path: Option<&str>,
    hash: Option<&str>,
    changes: &ChangeSet,
) -> Result<AvatarChange> {
    let hash_missing = hash.map_or(true, str::is_empty);
    if !changes.contains_any(&["avatar", "avatar_hash"]) && !hash_missing {
        return Ok(AvatarChange::Unchanged);
    }

    match path.filter(|p| !p.is_empty()) {
        Some(path) => Ok(AvatarChange::Upload(Avatar::read(path).await?)),
        // Without a path only an explicit removal touches the remote
        None if changes.contains("avatar") => Ok(AvatarChange::Remove),
        None => Ok(AvatarChange::Unchanged),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_avatar(contents: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(contents).unwrap();
        file
    }

    #[tokio::test]
    async fn test_read_avatar() {
        let file = temp_avatar(b"image-bytes");
        let path = file.path().to_str().unwrap();

        let avatar = Avatar::read(path).await.unwrap();

        assert_eq!(avatar.bytes, b"image-bytes");
        assert!(avatar.filename.ends_with(".png"));
        assert!(!avatar.filename.contains('/'));
    }

    #[tokio::test]
    async fn test_read_missing_avatar() {
        let err = Avatar::read("/definitely/not/here.png").await.unwrap_err();
        assert!(matches!(
            err,
            Error::LocalResourceUnavailable { ref path, .. } if path == "/definitely/not/here.png"
        ));
    }

    #[test]
    fn test_sha256() {
        let avatar = Avatar {
            filename: "a.png".to_string(),
            bytes: b"abc".to_vec(),
        };
        assert_eq!(
            avatar.sha256(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[tokio::test]
    async fn test_avatar_for_create() {
        assert_eq!(avatar_for_create(None).await.unwrap(), None);
        assert_eq!(avatar_for_create(Some("")).await.unwrap(), None);

        let file = temp_avatar(b"x");
        let avatar = avatar_for_create(file.path().to_str()).await.unwrap();
        assert!(avatar.is_some());
    }

    #[tokio::test]
    async fn test_avatar_for_update_unchanged_with_hash() {
        let change = avatar_for_update(Some("/unused.png"), Some("abc"), &ChangeSet::new())
            .await
            .unwrap();
        assert_eq!(change, AvatarChange::Unchanged);
    }

    #[tokio::test]
    async fn test_avatar_for_update_uploads_when_hash_missing() {
        let file = temp_avatar(b"x");
        let change = avatar_for_update(file.path().to_str(), None, &ChangeSet::new())
            .await
            .unwrap();
        assert!(matches!(change, AvatarChange::Upload(_)));
    }

    #[tokio::test]
    async fn test_avatar_for_update_removal() {
        let changes = ChangeSet::from_names(["avatar"]);
        let change = avatar_for_update(None, None, &changes).await.unwrap();
        assert_eq!(change, AvatarChange::Remove);

        let change = avatar_for_update(None, None, &ChangeSet::new())
            .await
            .unwrap();
        assert_eq!(change, AvatarChange::Unchanged);
    }
}
