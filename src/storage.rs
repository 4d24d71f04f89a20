//! S3 object-storage adapter.
//!
//! All objects live under a fixed prefix inside one bucket. Photo rows for
//! kegiatan and pengurus store the object name (relative to the prefix);
//! foto_resep rows store the full public URL, which [`Storage::key_from_url`]
//! maps back to a key for deletion.

use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::Client;
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use thiserror::Error;

use crate::config::Config;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("S3 request failed: {code}: {message}")]
    Sdk { code: String, message: String },

    #[error("{0}")]
    Unexpected(String),
}

fn sdk_error<E, R>(err: SdkError<E, R>) -> StorageError
where
    E: ProvideErrorMetadata + std::fmt::Debug,
    R: std::fmt::Debug,
{
    match err.code() {
        Some(code) => StorageError::Sdk {
            code: code.to_string(),
            message: err.message().unwrap_or_default().to_string(),
        },
        None => StorageError::Unexpected(format!("{err:?}")),
    }
}

#[derive(Clone)]
pub struct Storage {
    client: Client,
    bucket: String,
    prefix: String,
    region: String,
}

impl Storage {
    pub async fn from_config(config: &Config) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.aws_region.clone()))
            .load()
            .await;

        Self {
            client: Client::new(&sdk_config),
            bucket: config.aws_bucket.clone(),
            prefix: config.aws_prefix.clone(),
            region: config.aws_region.clone(),
        }
    }

    /// Full S3 key for an object name, normalized and prefixed.
    fn object_key(&self, name: &str) -> String {
        let name = name.replace('\\', "/");
        let name = name.trim_start_matches('/');
        format!("{}/{}", self.prefix, name)
    }

    /// Public URL for an object name.
    pub fn public_url(&self, name: &str) -> String {
        format!(
            "https://s3.{}.amazonaws.com/{}/{}",
            self.region,
            self.bucket,
            self.object_key(name)
        )
    }

    /// Recover the S3 key from a public URL, i.e. everything after the
    /// bucket path segment. Returns `None` for URLs that do not reference
    /// this bucket.
    pub fn key_from_url(&self, url: &str) -> Option<String> {
        let parts: Vec<&str> = url.split('/').collect();
        let bucket_index = parts.iter().position(|part| *part == self.bucket)?;
        let key = parts[bucket_index + 1..].join("/");
        if key.is_empty() { None } else { Some(key) }
    }

    /// Upload bytes under the prefixed key and return the public URL.
    pub async fn upload(
        &self,
        name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, StorageError> {
        let key = self.object_key(name);
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(bytes))
            .content_type(content_type)
            .send()
            .await
            .map_err(sdk_error)?;

        Ok(self.public_url(name))
    }

    pub async fn exists(&self, name: &str) -> bool {
        self.client
            .head_object()
            .bucket(&self.bucket)
            .key(self.object_key(name))
            .send()
            .await
            .is_ok()
    }

    /// Delete the object for the given name (prefixed key).
    pub async fn delete(&self, name: &str) -> Result<(), StorageError> {
        self.delete_key(&self.object_key(name)).await
    }

    /// Delete the object for an already-complete key, e.g. one recovered
    /// from a stored URL by [`Storage::key_from_url`].
    pub async fn delete_key(&self, key: &str) -> Result<(), StorageError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(sdk_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_storage() -> Storage {
        let config = Config {
            database_url: String::new(),
            rust_log: String::new(),
            aws_region: "ap-southeast-1".into(),
            aws_bucket: "cdn.example.org".into(),
            aws_prefix: "dhaharan.example.org".into(),
        };
        Storage::from_config(&config).await
    }

    #[tokio::test]
    async fn object_key_is_prefixed_and_normalized() {
        let storage = test_storage().await;
        assert_eq!(
            storage.object_key("kegiatan/foo.png"),
            "dhaharan.example.org/kegiatan/foo.png"
        );
        assert_eq!(
            storage.object_key("/kegiatan\\foo.png"),
            "dhaharan.example.org/kegiatan/foo.png"
        );
    }

    #[tokio::test]
    async fn public_url_embeds_region_bucket_and_key() {
        let storage = test_storage().await;
        assert_eq!(
            storage.public_url("kegiatan/foo.png"),
            "https://s3.ap-southeast-1.amazonaws.com/cdn.example.org/dhaharan.example.org/kegiatan/foo.png"
        );
    }

    #[tokio::test]
    async fn key_round_trips_through_public_url() {
        let storage = test_storage().await;
        let url = storage.public_url("resep/bar.jpg");
        assert_eq!(
            storage.key_from_url(&url),
            Some("dhaharan.example.org/resep/bar.jpg".to_string())
        );
    }

    #[tokio::test]
    async fn key_from_foreign_url_is_none() {
        let storage = test_storage().await;
        assert_eq!(
            storage.key_from_url("https://example.com/other/bucket/file.jpg"),
            None
        );
    }
}
