//! Object storage abstraction for redirect records
//! Uses Apache Arrow object_store crate

use std::borrow::Cow;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use object_store::{
    Attribute, AttributeValue, Attributes, GetOptions, ObjectStore, PutMode, PutOptions,
    PutPayload, path::Path as StoragePath,
};
use thiserror::Error;

use crate::config::{StorageConfig, StorageProvider};

/// Attribute key holding the redirect target, mirroring the S3 header
/// `x-amz-website-redirect-location`.
const REDIRECT_TARGET_ATTR: &str = "website-redirect-location";
/// Attribute key holding the record's visibility marker.
const ACL_ATTR: &str = "acl";
/// Records are served by the bucket's website endpoint, so they must be
/// world-readable.
pub const ACL_PUBLIC_READ: &str = "public-read";

/// Key probed by health checks. Never written; `NotFound` counts as healthy.
const HEALTH_PROBE_KEY: &str = ".linkbox-health";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("record '{0}' is missing its redirect target attribute")]
    MalformedRecord(String),

    #[error("unsupported storage configuration: {0}")]
    InvalidConfig(String),

    #[error("object store error: {0}")]
    ObjectStoreError(#[from] object_store::Error),
}

/// Storage result type
pub type Result<T> = std::result::Result<T, StorageError>;

/// Outcome of a conditional create. "Already taken" is an expected result of
/// code allocation, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    AlreadyExists,
}

/// A redirect record read back from the store.
#[derive(Debug, Clone)]
pub struct RedirectRecord {
    pub target: String,
    pub acl: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Storage client wrapping object_store
#[derive(Clone)]
pub struct StorageClient {
    store: Arc<dyn ObjectStore>,
    pub bucket: String,
}

impl StorageClient {
    /// Create new storage client with any object_store backend
    pub fn new(store: Arc<dyn ObjectStore>, bucket: String) -> Self {
        Self { store, bucket }
    }

    /// Create in-memory storage for testing/development
    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(object_store::memory::InMemory::new()),
            bucket: "linkbox-local".to_string(),
        }
    }

    /// Build a client from configuration.
    pub fn from_config(config: &StorageConfig) -> Result<Self> {
        match config.provider {
            StorageProvider::Memory => Ok(Self::new(
                Arc::new(object_store::memory::InMemory::new()),
                config.bucket.clone(),
            )),
            StorageProvider::S3 => {
                let mut builder = object_store::aws::AmazonS3Builder::from_env()
                    .with_bucket_name(config.bucket.as_str());

                if let Some(region) = &config.region {
                    builder = builder.with_region(region.as_str());
                }
                if let Some(endpoint) = &config.endpoint {
                    // Local S3 stand-ins (minio et al.) speak plain HTTP
                    builder = builder
                        .with_endpoint(endpoint.as_str())
                        .with_allow_http(endpoint.starts_with("http://"));
                }
                if let Some(access_key) = &config.access_key {
                    builder = builder.with_access_key_id(access_key.as_str());
                }
                if let Some(secret_key) = &config.secret_key {
                    builder = builder.with_secret_access_key(secret_key.as_str());
                }

                let store = builder
                    .build()
                    .map_err(|e| StorageError::InvalidConfig(e.to_string()))?;

                Ok(Self::new(Arc::new(store), config.bucket.clone()))
            }
        }
    }

    /// Conditionally create a redirect record under `code`.
    ///
    /// The existence check and the write are a single atomic `PutMode::Create`
    /// call, so two concurrent requests racing on the same code cannot
    /// overwrite each other: exactly one observes `Created`, the other
    /// `AlreadyExists`. The record body is empty; the target URL and the
    /// public-read marker travel as attributes.
    pub async fn create_redirect(&self, code: &str, target: &str) -> Result<CreateOutcome> {
        let path = StoragePath::from(code);

        let mut attributes = Attributes::new();
        attributes.insert(
            Attribute::Metadata(Cow::Borrowed(REDIRECT_TARGET_ATTR)),
            AttributeValue::from(target.to_string()),
        );
        attributes.insert(
            Attribute::Metadata(Cow::Borrowed(ACL_ATTR)),
            AttributeValue::from(ACL_PUBLIC_READ),
        );

        let opts = PutOptions {
            mode: PutMode::Create,
            attributes,
            ..Default::default()
        };

        match self.store.put_opts(&path, PutPayload::default(), opts).await {
            Ok(_) => {
                tracing::debug!(code, "Redirect record created");
                Ok(CreateOutcome::Created)
            }
            Err(object_store::Error::AlreadyExists { .. }) => Ok(CreateOutcome::AlreadyExists),
            Err(e) => Err(e.into()),
        }
    }

    /// Read back the record under `code`, if any.
    ///
    /// A metadata-only read: the object body is never fetched. Returns
    /// `Ok(None)` for an unoccupied code.
    pub async fn fetch_redirect(&self, code: &str) -> Result<Option<RedirectRecord>> {
        let path = StoragePath::from(code);

        let opts = GetOptions {
            head: true,
            ..Default::default()
        };

        let result = match self.store.get_opts(&path, opts).await {
            Ok(result) => result,
            Err(object_store::Error::NotFound { .. }) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let target = result
            .attributes
            .get(&Attribute::Metadata(Cow::Borrowed(REDIRECT_TARGET_ATTR)))
            .map(|value| value.to_string())
            .ok_or_else(|| StorageError::MalformedRecord(code.to_string()))?;

        let acl = result
            .attributes
            .get(&Attribute::Metadata(Cow::Borrowed(ACL_ATTR)))
            .map(|value| value.to_string());

        Ok(Some(RedirectRecord {
            target,
            acl,
            created_at: result.meta.last_modified,
        }))
    }

    /// Cheap reachability probe for health checks.
    pub async fn probe(&self) -> Result<()> {
        match self.store.head(&StoragePath::from(HEALTH_PROBE_KEY)).await {
            Ok(_) => Ok(()),
            Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
