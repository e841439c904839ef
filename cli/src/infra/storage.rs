//! Cloud Storage JSON API adapter implementing `ObjectStorage`.

use std::path::Path;

use anyhow::{Context, Result};
use gcf_common::{Bucket, BucketInsert, StoredObject};

use crate::application::ports::{AccessTokenSource, ObjectStorage};
use crate::infra::http::ApiTransport;

/// Content type of uploaded source archives.
const ARCHIVE_CONTENT_TYPE: &str = "application/zip";

/// Cloud Storage client bound to one project.
pub struct GcsClient<T> {
    transport: ApiTransport<T>,
    base_url: String,
    project_id: String,
}

impl<T: AccessTokenSource> GcsClient<T> {
    #[must_use]
    pub fn new(transport: ApiTransport<T>, base_url: &str, project_id: &str) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            project_id: project_id.to_string(),
        }
    }
}

impl<T: AccessTokenSource> ObjectStorage for GcsClient<T> {
    async fn create_bucket(&self, bucket: &BucketInsert) -> Result<Bucket> {
        let url = format!("{}/storage/v1/b", self.base_url);
        tracing::info!(bucket = %bucket.name, location = %bucket.location, "creating bucket");
        let request = self
            .transport
            .http()
            .post(&url)
            .query(&[("project", self.project_id.as_str())])
            .json(bucket);
        self.transport.execute("buckets.insert", request).await
    }

    async fn upload_object(&self, bucket: &str, object: &str, file: &Path) -> Result<StoredObject> {
        let data = tokio::fs::read(file)
            .await
            .with_context(|| format!("reading {}", file.display()))?;
        let url = format!("{}/upload/storage/v1/b/{bucket}/o", self.base_url);
        tracing::info!(bucket, object, bytes = data.len(), "uploading object");
        let request = self
            .transport
            .http()
            .post(&url)
            .query(&[("uploadType", "media"), ("name", object)])
            .header(reqwest::header::CONTENT_TYPE, ARCHIVE_CONTENT_TYPE)
            .body(data);
        self.transport.execute("objects.insert", request).await
    }
}
