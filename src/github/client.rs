use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};

use crate::github::error::FetchError;
use crate::github::query::GraphQlRequest;

pub const GITHUB_GRAPHQL_ENDPOINT: &str = "https://api.github.com/graphql";

/// Raw HTTP outcome of one GraphQL POST; interpretation is left to the fetcher
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Seam between the fetcher and the network.
///
/// Shared across every organization's task, so implementations must be
/// `Send + Sync`.
#[async_trait]
pub trait GraphQlTransport: Send + Sync {
    async fn post(&self, request: &GraphQlRequest) -> Result<TransportResponse, FetchError>;
}

/// GraphQL transport over reqwest with a static token
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Install the ring rustls provider once per process (required for rustls 0.23+)
fn install_crypto_provider() {
    // Err means a provider is already in place, which is all we need
    let _ = rustls::crypto::ring::default_provider().install_default();
}

/// Create an authenticated GraphQL transport using a personal access token
pub fn create_client(token: &str, endpoint: &str) -> Result<HttpTransport> {
    install_crypto_provider();

    let mut headers = HeaderMap::new();
    let auth = HeaderValue::from_str(&format!("token {}", token))
        .context("GitHub token contains characters not allowed in a header")?;
    headers.insert(AUTHORIZATION, auth);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, HeaderValue::from_static("find-org-pulls"));

    let client = reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .context("Failed to create GitHub client")?;

    Ok(HttpTransport {
        client,
        endpoint: endpoint.to_string(),
    })
}

#[async_trait]
impl GraphQlTransport for HttpTransport {
    async fn post(&self, request: &GraphQlRequest) -> Result<TransportResponse, FetchError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Body(e.to_string()))?;

        Ok(TransportResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_post_sends_token_and_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(header("authorization", "token secret-token"))
            .and(header("content-type", "application/json"))
            .and(body_partial_json(serde_json::json!({
                "variables": {"orgName": "acme", "after": null, "pageSize": 100}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"data":{}}"#))
            .expect(1)
            .mount(&server)
            .await;

        let transport =
            create_client("secret-token", &format!("{}/graphql", server.uri())).unwrap();
        let response = transport
            .post(&GraphQlRequest::first_page("acme"))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, br#"{"data":{}}"#.to_vec());
    }

    #[tokio::test]
    async fn test_post_passes_through_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let transport = create_client("t", &server.uri()).unwrap();
        let response = transport
            .post(&GraphQlRequest::first_page("acme"))
            .await
            .unwrap();

        assert_eq!(response.status, 502);
    }

    #[tokio::test]
    async fn test_post_unreachable_endpoint_is_transport_error() {
        // Nothing listens on port 9 (discard) in the test environment
        let transport = create_client("t", "http://127.0.0.1:9/graphql").unwrap();
        let result = transport.post(&GraphQlRequest::first_page("acme")).await;
        assert!(matches!(result, Err(FetchError::Transport(_))));
    }

    #[test]
    fn test_token_with_newline_is_rejected() {
        assert!(create_client("bad\ntoken", GITHUB_GRAPHQL_ENDPOINT).is_err());
    }
}
