//! Blob storage collaborator - product photo objects.
//!
//! Photo references stored on products are either storage-relative paths in
//! the photo bucket or external absolute URLs. Deleting a product must also
//! delete its photo object, but only when the reference unambiguously names
//! an object in our bucket; anything ambiguous fails closed before any
//! mutation happens.

use crate::config::PlatformConfig;
use crate::errors::{Error, Result};
use async_trait::async_trait;
use url::Url;

/// Bucket holding all product photos.
pub const PHOTO_BUCKET: &str = "product-photos";

/// Outcome of resolving a raw photo reference.
///
/// Exactly four outcomes, never ambiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoPath {
    /// No reference stored; nothing to delete.
    None,
    /// External URL; not ours to touch.
    External,
    /// Reference points at storage but not at a usable object in our
    /// bucket; the caller must refuse to proceed.
    Invalid,
    /// Object key inside the photo bucket.
    Object(String),
}

/// Resolves a raw photo reference to a deletable object key.
///
/// Absolute URLs are walked for an `object` path segment followed by
/// `{mode}/{bucket}`; a different bucket or an empty key is invalid, and a
/// URL without an `object` segment is external. Bare references are taken
/// as bucket-relative paths with an optional `product-photos/` prefix.
#[must_use]
pub fn resolve_photo_path(raw: &str) -> PhotoPath {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return PhotoPath::None;
    }

    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        let Ok(url) = Url::parse(trimmed) else {
            return PhotoPath::External;
        };
        let segments: Vec<&str> = url
            .path()
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();
        let Some(object_index) = segments.iter().position(|segment| *segment == "object") else {
            return PhotoPath::External;
        };
        match segments.get(object_index + 2) {
            Some(bucket) if *bucket == PHOTO_BUCKET => {}
            _ => return PhotoPath::Invalid,
        }
        let key = segments[object_index + 3..].join("/");
        if key.is_empty() {
            return PhotoPath::Invalid;
        }
        return PhotoPath::Object(key);
    }

    let mut normalized = trimmed;
    if let Some(rest) = normalized.strip_prefix("product-photos/") {
        normalized = rest;
    }
    let normalized = normalized.trim_start_matches('/');
    if normalized.is_empty() {
        return PhotoPath::None;
    }
    PhotoPath::Object(normalized.to_string())
}

/// Object storage operations needed by the product lifecycle.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Removes objects from the photo bucket.
    ///
    /// # Errors
    /// Returns an error if the storage call fails; the caller treats this
    /// as blocking and does not continue with the product delete.
    async fn remove(&self, paths: &[String]) -> Result<()>;

    /// Public URL for an object key, for rendering.
    fn public_url(&self, path: &str) -> String;
}

/// HTTP-backed [`BlobStore`] for the hosted platform.
pub struct PlatformStorage {
    base_url: String,
    service_role_key: String,
    http: reqwest::Client,
}

impl PlatformStorage {
    /// Builds a store from the platform connection settings.
    #[must_use]
    pub fn new(config: &PlatformConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            service_role_key: config.service_role_key.clone(),
            http: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl BlobStore for PlatformStorage {
    async fn remove(&self, paths: &[String]) -> Result<()> {
        let response = self
            .http
            .delete(format!(
                "{}/storage/v1/object/{PHOTO_BUCKET}",
                self.base_url
            ))
            .bearer_auth(&self.service_role_key)
            .header("apikey", &self.service_role_key)
            .json(&serde_json::json!({ "prefixes": paths }))
            .send()
            .await
            .map_err(|e| Error::Storage {
                message: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(Error::Storage {
                message: format!("remove returned {}", response.status()),
            });
        }
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{PHOTO_BUCKET}/{path}",
            self.base_url
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_empty_is_noop() {
        assert_eq!(resolve_photo_path(""), PhotoPath::None);
        assert_eq!(resolve_photo_path("   "), PhotoPath::None);
    }

    #[test]
    fn test_resolve_bucket_url() {
        assert_eq!(
            resolve_photo_path("https://cdn/x/object/public/product-photos/a/b.jpg"),
            PhotoPath::Object("a/b.jpg".to_string())
        );
        assert_eq!(
            resolve_photo_path(
                "https://proj.example.co/storage/v1/object/public/product-photos/17/photo.webp"
            ),
            PhotoPath::Object("17/photo.webp".to_string())
        );
    }

    #[test]
    fn test_resolve_wrong_bucket_is_invalid() {
        assert_eq!(
            resolve_photo_path("https://cdn/x/object/public/OTHER-bucket/a.jpg"),
            PhotoPath::Invalid
        );
    }

    #[test]
    fn test_resolve_url_with_empty_key_is_invalid() {
        assert_eq!(
            resolve_photo_path("https://cdn/x/object/public/product-photos"),
            PhotoPath::Invalid
        );
        assert_eq!(
            resolve_photo_path("https://cdn/x/object/public/product-photos/"),
            PhotoPath::Invalid
        );
    }

    #[test]
    fn test_resolve_external_url_untouched() {
        assert_eq!(
            resolve_photo_path("https://example.com/images/a.jpg"),
            PhotoPath::External
        );
        assert_eq!(
            resolve_photo_path("http://cdn/photos/b.png"),
            PhotoPath::External
        );
    }

    #[test]
    fn test_resolve_relative_paths() {
        assert_eq!(
            resolve_photo_path("product-photos/a/b.jpg"),
            PhotoPath::Object("a/b.jpg".to_string())
        );
        assert_eq!(
            resolve_photo_path("a/b.jpg"),
            PhotoPath::Object("a/b.jpg".to_string())
        );
        assert_eq!(
            resolve_photo_path("/a/b.jpg"),
            PhotoPath::Object("a/b.jpg".to_string())
        );
    }

    #[test]
    fn test_resolve_bare_slashes_is_noop() {
        assert_eq!(resolve_photo_path("product-photos/"), PhotoPath::None);
        assert_eq!(resolve_photo_path("///"), PhotoPath::None);
    }
}
