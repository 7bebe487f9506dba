use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Shared HTTP plumbing: base URL, bearer token, status mapping.
#[derive(Debug, Clone)]
pub(crate) struct HttpApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpApi {
    pub(crate) fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub(crate) fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub(crate) fn request(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, format!("{}{path}", self.base_url));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and turn non-2xx responses into typed errors.
    pub(crate) async fn send(&self, builder: RequestBuilder, subject: &str) -> ClientResult<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| error_message(&body))
            .unwrap_or_else(|| status.to_string());

        Err(match status {
            StatusCode::NOT_FOUND => ClientError::NotFound(subject.to_string()),
            StatusCode::CONFLICT => ClientError::Conflict(subject.to_string()),
            _ => ClientError::Status {
                status: status.as_u16(),
                message,
            },
        })
    }
}

fn error_message(body: &Value) -> Option<String> {
    body.get("error")?.as_str().map(str::to_string)
}
