//! S3-compatible image storage configuration.

use serde::{Deserialize, Serialize};

fn default_region() -> String {
    String::from("ap-southeast-1")
}

fn default_key_prefix() -> String {
    String::from("items")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Bucket that receives uploaded item images.
    #[serde(default)]
    pub bucket: String,

    #[serde(default = "default_region")]
    pub region: String,

    #[serde(default)]
    pub access_key_id: String,

    #[serde(default)]
    pub secret_access_key: String,

    /// Custom endpoint URL (R2, MinIO). Empty means AWS.
    #[serde(default)]
    pub endpoint: String,

    /// Base URL images are served from. Empty means the bucket's AWS URL.
    #[serde(default)]
    pub public_base_url: String,

    /// Key prefix for uploaded objects.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: String::new(),
            region: default_region(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            endpoint: String::new(),
            public_base_url: String::new(),
            key_prefix: default_key_prefix(),
        }
    }
}

impl StorageConfig {
    /// Check if the storage config has the minimum required fields.
    pub fn is_configured(&self) -> bool {
        !self.bucket.is_empty()
            && !self.access_key_id.is_empty()
            && !self.secret_access_key.is_empty()
    }

    /// Public URL of an uploaded object.
    pub fn public_url(&self, key: &str) -> String {
        if self.public_base_url.is_empty() {
            format!(
                "https://{}.s3.{}.amazonaws.com/{key}",
                self.bucket, self.region
            )
        } else {
            format!("{}/{key}", self.public_base_url.trim_end_matches('/'))
        }
    }
}
