//! `BlobStore` backed by the `object_store` crate.
//!
//! Production uses an S3-compatible bucket (`AmazonS3Builder`); tests use
//! `object_store::memory::InMemory`. Keys are `{prefix}/{uuid}.{ext}` and the
//! returned URL comes from [`StorageConfig::public_url`].

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use lnf_config::StorageConfig;
use lnf_core::errors::BlobError;
use lnf_core::ports::BlobStore;
use object_store::aws::AmazonS3Builder;
use object_store::path::Path;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};
use tracing::info;
use uuid::Uuid;

/// MIME type for an upload, by file extension.
#[must_use]
pub fn content_type_for(filename: &str) -> &'static str {
    match extension(filename).as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

/// Lowercased extension of `filename`, if it is plain ASCII alphanumeric.
fn extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.trim().to_ascii_lowercase())
        .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
}

pub struct ObjectBlobStore {
    store: Arc<dyn ObjectStore>,
    config: StorageConfig,
}

impl ObjectBlobStore {
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>, config: StorageConfig) -> Self {
        Self { store, config }
    }

    /// Build an S3-backed store from configuration.
    ///
    /// # Errors
    ///
    /// `BlobError::NotConfigured` if bucket or credentials are missing;
    /// `BlobError::Upload` if the client cannot be built.
    pub fn from_config(config: &StorageConfig) -> Result<Self, BlobError> {
        if !config.is_configured() {
            return Err(BlobError::NotConfigured);
        }
        let mut builder = AmazonS3Builder::new()
            .with_bucket_name(&config.bucket)
            .with_region(&config.region)
            .with_access_key_id(&config.access_key_id)
            .with_secret_access_key(&config.secret_access_key);
        if !config.endpoint.is_empty() {
            builder = builder.with_endpoint(&config.endpoint);
        }
        let s3 = builder
            .build()
            .map_err(|e| BlobError::Upload(format!("S3 client: {e}")))?;
        Ok(Self::new(Arc::new(s3), config.clone()))
    }

    /// A fresh object key for `filename`.
    #[must_use]
    pub fn object_key(&self, filename: &str) -> String {
        let prefix = self.config.key_prefix.trim_matches('/');
        let name = match extension(filename) {
            Some(ext) => format!("{}.{ext}", Uuid::new_v4()),
            None => Uuid::new_v4().to_string(),
        };
        if prefix.is_empty() {
            name
        } else {
            format!("{prefix}/{name}")
        }
    }
}

#[async_trait]
impl BlobStore for ObjectBlobStore {
    async fn store(&self, bytes: Vec<u8>, filename: &str) -> Result<String, BlobError> {
        let key = self.object_key(filename);
        let size = bytes.len();

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type_for(filename).into());
        let opts = PutOptions {
            attributes,
            ..PutOptions::default()
        };

        self.store
            .put_opts(&Path::from(key.as_str()), PutPayload::from(Bytes::from(bytes)), opts)
            .await
            .map_err(|e| BlobError::Upload(e.to_string()))?;

        info!(%key, size, "image stored");
        Ok(self.config.public_url(&key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::memory::InMemory;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn config() -> StorageConfig {
        StorageConfig {
            bucket: "campus-lnf".into(),
            ..StorageConfig::default()
        }
    }

    #[rstest]
    #[case("photo.JPG", "image/jpeg")]
    #[case("photo.jpeg", "image/jpeg")]
    #[case("scan.png", "image/png")]
    #[case("pic.webp", "image/webp")]
    #[case("anim.gif", "image/gif")]
    #[case("notes.txt", "application/octet-stream")]
    #[case("noext", "application/octet-stream")]
    fn content_type_by_extension(#[case] filename: &str, #[case] expected: &str) {
        assert_eq!(content_type_for(filename), expected);
    }

    #[test]
    fn key_keeps_prefix_and_extension() {
        let blobs = ObjectBlobStore::new(Arc::new(InMemory::new()), config());
        let key = blobs.object_key("Wallet.PNG");
        assert!(key.starts_with("items/"), "{key}");
        assert!(key.ends_with(".png"), "{key}");
    }

    #[rstest]
    #[case("a.b/c")]
    #[case("shot.png/../../etc")]
    #[case("weird.p g")]
    #[case("trailing.")]
    fn key_drops_unsafe_extensions(#[case] filename: &str) {
        let blobs = ObjectBlobStore::new(Arc::new(InMemory::new()), config());
        let key = blobs.object_key(filename);
        let name = key.strip_prefix("items/").unwrap();
        assert!(!name.contains('/'), "{key}");
        assert!(!name.contains('.'), "{key}");
        assert_eq!(content_type_for(filename), "application/octet-stream");
    }

    #[tokio::test]
    async fn store_writes_bytes_and_returns_public_url() {
        let backend = Arc::new(InMemory::new());
        let blobs = ObjectBlobStore::new(backend.clone(), config());

        let url = blobs.store(b"jpegdata".to_vec(), "a.jpg").await.unwrap();
        let prefix = "https://campus-lnf.s3.ap-southeast-1.amazonaws.com/";
        assert!(url.starts_with(prefix), "{url}");

        let key = url.trim_start_matches(prefix);
        let stored = backend
            .get(&Path::from(key))
            .await
            .unwrap()
            .bytes()
            .await
            .unwrap();
        assert_eq!(stored.as_ref(), b"jpegdata");
    }

    #[test]
    fn from_config_requires_credentials() {
        assert!(matches!(
            ObjectBlobStore::from_config(&config()),
            Err(BlobError::NotConfigured)
        ));
    }
}
