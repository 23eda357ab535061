use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::{Map, Value};
use url::Url;

use super::{BaseDataStore, EntityKind};

/// Connection details shared by the hosted backend clients
#[derive(Clone)]
pub struct BackendConnection {
    base_url: Url,
    api_key: String,
    client: reqwest::Client,
}

impl BackendConnection {
    pub fn new(base_url: &str, api_key: String) -> Result<Self> {
        // Url::join drops the last path segment unless the base ends with '/'
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)
        } else {
            Url::parse(&format!("{}/", base_url))
        }
        .context("BACKEND_URL is not a valid URL")?;
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Resolve a path below the backend base URL
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("Invalid backend path: {}", path))
    }

    /// Headers authenticating as the service itself
    pub fn service_headers(&self) -> Result<HeaderMap> {
        self.headers_for(&self.api_key)
    }

    /// Headers authenticating as the holder of `bearer`
    pub fn headers_for(&self, bearer: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "apikey",
            HeaderValue::from_str(&self.api_key).context("API key is not a valid header")?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", bearer))
                .context("Bearer token is not a valid header")?,
        );
        Ok(headers)
    }
}

/// REST client for the relational collections (PostgREST dialect)
pub struct BackendClient {
    connection: BackendConnection,
}

impl BackendClient {
    pub fn new(connection: BackendConnection) -> Self {
        Self { connection }
    }

    fn table_url(&self, kind: EntityKind) -> Result<Url> {
        self.connection
            .endpoint(&format!("rest/v1/{}", kind.table()))
    }

    fn row_url(&self, kind: EntityKind, id: &str) -> Result<Url> {
        let mut url = self.table_url(kind)?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{}", id));
        Ok(url)
    }
}

/// Fail with the response body when the backend did not return 2xx
async fn ensure_success(response: reqwest::Response, action: &str) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    anyhow::bail!("Backend {} failed with {}: {}", action, status, body);
}

/// Pull the assigned identifier out of an insert representation
fn assigned_id(rows: &Value) -> Option<String> {
    let row = match rows {
        Value::Array(rows) => rows.first()?,
        other => other,
    };
    match row.get("id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

#[async_trait]
impl BaseDataStore for BackendClient {
    async fn fetch_all(&self, kind: EntityKind) -> Result<Vec<Value>> {
        let mut url = self.table_url(kind)?;
        url.query_pairs_mut().append_pair("select", "*");

        let response = self
            .connection
            .client()
            .get(url)
            .headers(self.connection.service_headers()?)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {}", kind))?;

        let rows: Vec<Value> = ensure_success(response, "select")
            .await?
            .json()
            .await
            .with_context(|| format!("Failed to parse {} rows", kind))?;

        Ok(rows)
    }

    async fn insert(&self, kind: EntityKind, record: Value) -> Result<String> {
        let response = self
            .connection
            .client()
            .post(self.table_url(kind)?)
            .headers(self.connection.service_headers()?)
            .header("Prefer", "return=representation")
            .json(&Value::Array(vec![record]))
            .send()
            .await
            .with_context(|| format!("Failed to insert into {}", kind))?;

        let rows: Value = ensure_success(response, "insert")
            .await?
            .json()
            .await
            .context("Failed to parse insert response")?;

        assigned_id(&rows).context("Insert response did not include an id")
    }

    async fn update(&self, kind: EntityKind, id: &str, fields: Map<String, Value>) -> Result<()> {
        let response = self
            .connection
            .client()
            .patch(self.row_url(kind, id)?)
            .headers(self.connection.service_headers()?)
            .json(&Value::Object(fields))
            .send()
            .await
            .with_context(|| format!("Failed to update {} {}", kind, id))?;

        ensure_success(response, "update").await?;
        Ok(())
    }

    async fn delete(&self, kind: EntityKind, id: &str) -> Result<()> {
        let response = self
            .connection
            .client()
            .delete(self.row_url(kind, id)?)
            .headers(self.connection.service_headers()?)
            .send()
            .await
            .with_context(|| format!("Failed to delete {} {}", kind, id))?;

        ensure_success(response, "delete").await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn assigned_id_reads_numeric_and_text_ids() {
        assert_eq!(assigned_id(&json!([{ "id": 42 }])), Some("42".to_string()));
        assert_eq!(assigned_id(&json!({ "id": "abc" })), Some("abc".to_string()));
        assert_eq!(assigned_id(&json!([])), None);
    }

    #[test]
    fn row_url_filters_by_id() {
        let connection =
            BackendConnection::new("https://db.example.com/", "key".to_string()).unwrap();
        let client = BackendClient::new(connection);
        let url = client.row_url(EntityKind::Resources, "42").unwrap();
        assert_eq!(
            url.as_str(),
            "https://db.example.com/rest/v1/resources?id=eq.42"
        );
    }
}
