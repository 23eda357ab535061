use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use super::{BackendConnection, BaseIdentityProvider};
use crate::common::Identity;

/// Session lookup against the hosted backend's auth service
pub struct IdentityClient {
    connection: BackendConnection,
}

/// User payload returned by the auth service
#[derive(Debug, Deserialize)]
struct AuthUserResponse {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl IdentityClient {
    pub fn new(connection: BackendConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl BaseIdentityProvider for IdentityClient {
    async fn current_user(&self, access_token: &str) -> Result<Option<Identity>> {
        let response = self
            .connection
            .client()
            .get(self.connection.endpoint("auth/v1/user")?)
            .headers(self.connection.headers_for(access_token)?)
            .send()
            .await
            .context("Failed to reach auth service")?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => return Ok(None),
            status if !status.is_success() => {
                let body = response.text().await.unwrap_or_default();
                anyhow::bail!("Auth service error {}: {}", status, body);
            }
            _ => {}
        }

        let user: AuthUserResponse = response
            .json()
            .await
            .context("Failed to parse auth user")?;

        Ok(Some(Identity {
            user_id: user.id,
            email: user.email,
        }))
    }
}
