//! HTTP client for the generation proxy.

use serde::Deserialize;

use crate::error::{GenError, GenResult};
use crate::request::GenerationRequest;

/// Wire shape of a proxy reply.
#[derive(Debug, Deserialize)]
struct ProxyResponse {
    success: bool,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// A source of generated card text.
///
/// The production implementation is [`HttpGenerator`]; tests substitute
/// fixed or failing fakes.
pub trait TextGenerator {
    /// Produce raw card text for one request.
    fn generate(&self, request: &GenerationRequest) -> GenResult<String>;
}

/// Talks to the generation proxy over HTTP.
#[derive(Debug)]
pub struct HttpGenerator {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpGenerator {
    /// Create a generator posting to the given proxy endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::blocking::Client::new(),
        }
    }

    fn post(&self, request: &GenerationRequest) -> GenResult<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .map_err(GenError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .unwrap_or_default()
                .chars()
                .take(200)
                .collect();
            return Err(GenError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: ProxyResponse = response.json().map_err(GenError::Transport)?;
        if !body.success {
            return Err(GenError::Api {
                status: status.as_u16(),
                message: body.error.unwrap_or_else(|| "unknown error".to_string()),
            });
        }
        match body.text {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(GenError::EmptyResponse),
        }
    }
}

impl TextGenerator for HttpGenerator {
    fn generate(&self, request: &GenerationRequest) -> GenResult<String> {
        match self.post(request) {
            Err(GenError::Transport(e)) => {
                // One retry on transport faults only; API-level failures are
                // final.
                tracing::warn!(error = %e, "generation request failed, retrying once");
                self.post(request)
            }
            other => other,
        }
    }
}
