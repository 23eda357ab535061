use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use super::{BackendConnection, BaseBlobStore};

/// Object storage client for the hosted backend
pub struct StorageClient {
    connection: BackendConnection,
}

impl StorageClient {
    pub fn new(connection: BackendConnection) -> Self {
        Self { connection }
    }

    /// Publicly resolvable URL of an object in a public bucket
    pub fn public_url(&self, bucket: &str, path: &str) -> Result<String> {
        Ok(self
            .connection
            .endpoint(&format!("storage/v1/object/public/{}/{}", bucket, path))?
            .to_string())
    }
}

#[async_trait]
impl BaseBlobStore for StorageClient {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String> {
        let url = self
            .connection
            .endpoint(&format!("storage/v1/object/{}/{}", bucket, path))?;

        let response = self
            .connection
            .client()
            .post(url)
            .headers(self.connection.service_headers()?)
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .with_context(|| format!("Failed to upload {} to {}", path, bucket))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Storage upload failed with {}: {}", status, body);
        }

        self.public_url(bucket, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_url_points_at_public_object_path() {
        let connection =
            BackendConnection::new("https://db.example.com/", "key".to_string()).unwrap();
        let storage = StorageClient::new(connection);
        assert_eq!(
            storage.public_url("avatars", "abc_1.png").unwrap(),
            "https://db.example.com/storage/v1/object/public/avatars/abc_1.png"
        );
    }
}
