//! Course-progress API client.

use classwatch_core::Member;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use url::Url;

use crate::error::ClientError;
use crate::http::HttpClient;
use crate::parser;

// ============================================================================
// Constants
// ============================================================================

/// Token login endpoint.
const AUTH_ENDPOINT: &str = "api/v1/auth/token";

/// Member graph endpoint. The whole member/class graph comes back in one
/// call; cardinality is small and the backend does not page it.
const MEMBERS_ENDPOINT: &str = "api/v1/members?expand=classes";

// ============================================================================
// API Types
// ============================================================================

#[derive(Debug, Serialize)]
struct TokenRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

// ============================================================================
// API Client
// ============================================================================

/// Low-level client for one course-progress instance.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: HttpClient,
    base: Url,
}

impl ApiClient {
    /// Creates a client for the given instance base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidInstance`] if the URL does not parse
    /// as an HTTP base URL.
    pub fn new(instance: &str) -> Result<Self, ClientError> {
        let mut base = Url::parse(instance)
            .map_err(|e| ClientError::InvalidInstance(format!("{instance}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidInstance(instance.to_string()));
        }
        // Url::join treats a path without a trailing slash as a file
        if !base.path().ends_with('/') {
            base.set_path(&format!("{}/", base.path()));
        }
        Ok(Self {
            http: HttpClient::new()?,
            base,
        })
    }

    /// Replaces the HTTP transport, mainly to tune retry behavior.
    pub fn with_http(mut self, http: HttpClient) -> Self {
        self.http = http;
        self
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base
            .join(path)
            .map_err(|e| ClientError::InvalidInstance(e.to_string()))
    }

    /// Exchanges credentials for an access token.
    ///
    /// # Errors
    ///
    /// - [`ClientError::AuthenticationFailed`] on 401/403 (bad credentials)
    /// - [`ClientError::Http`] with status 404 when the URL is not a
    ///   course-progress instance
    /// - [`ClientError::Connect`] when the instance is unreachable
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ClientError> {
        debug!("Requesting access token");

        let url = self.endpoint(AUTH_ENDPOINT)?;
        let request = TokenRequest { username, password };
        let response = self.http.post_json(url.as_str(), &request).await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ClientError::AuthenticationFailed(
                "username or password rejected".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
            });
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("token response: {e}")))?;

        Ok(token.access_token)
    }

    /// Fetches the full member/class graph.
    ///
    /// # Errors
    ///
    /// - [`ClientError::AuthenticationFailed`] on 401/403 (expired token)
    /// - [`ClientError::Http`] on any other error status
    /// - [`ClientError::Connect`] when the instance is unreachable
    #[instrument(skip(self, token))]
    pub async fn fetch_members(&self, token: &str) -> Result<Vec<Member>, ClientError> {
        debug!("Fetching member graph");

        let url = self.endpoint(MEMBERS_ENDPOINT)?;
        let response = self.http.get_with_auth(url.as_str(), token).await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ClientError::AuthenticationFailed(
                "access token rejected".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        parser::parse_members(&body)
    }
}
