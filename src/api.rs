//! Contact endpoint client
//!
//! `POST {base}/api/contact` with a JSON body. The session never sees
//! transport errors directly: [`ContactSubmitter::submit`] folds every
//! failure into a [`SubmitOutcome`].

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::contact::SOURCE_TAG;
use crate::types::SubmitOutcome;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discord: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub source: String,
}

fn non_empty(s: String) -> Option<String> {
    (!s.is_empty()).then_some(s)
}

impl ContactRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            name: None,
            email: None,
            discord: None,
            phone: None,
            source: SOURCE_TAG.to_string(),
        }
    }

    pub fn name(mut self, v: impl Into<String>) -> Self {
        self.name = non_empty(v.into());
        self
    }

    pub fn email(mut self, v: impl Into<String>) -> Self {
        self.email = non_empty(v.into());
        self
    }

    pub fn discord(mut self, v: impl Into<String>) -> Self {
        self.discord = non_empty(v.into());
        self
    }

    pub fn phone(mut self, v: impl Into<String>) -> Self {
        self.phone = non_empty(v.into());
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Asynchronous request/response seam the session driver submits through.
#[async_trait]
pub trait ContactSubmitter: Send + Sync {
    async fn submit(&self, request: ContactRequest) -> SubmitOutcome;
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    timeout: Duration,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .tcp_nodelay(true)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            http,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/contact", self.base_url)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send one submission. Any HTTP status >= 400 is an error even when the
    /// body parsed fine.
    pub async fn submit_contact(&self, request: &ContactRequest) -> Result<ContactResponse> {
        let response = self
            .http
            .post(self.endpoint())
            .json(request)
            .send()
            .await
            .map_err(|e| anyhow!("failed to send request: {}", e))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| anyhow!("failed to read response: {}", e))?;
        let parsed = serde_json::from_slice::<ContactResponse>(&bytes);

        if status.as_u16() >= 400 {
            return match parsed {
                Ok(ContactResponse { error: Some(err), .. }) if !err.is_empty() => {
                    Err(anyhow!("API error: {}", err))
                }
                _ => Err(anyhow!("API error: status {}", status.as_u16())),
            };
        }

        parsed.map_err(|e| anyhow!("failed to decode response: {}", e))
    }
}

#[async_trait]
impl ContactSubmitter for ApiClient {
    async fn submit(&self, request: ContactRequest) -> SubmitOutcome {
        match self.submit_contact(&request).await {
            Ok(resp) if resp.success => {
                log::info!("[api] contact submission accepted");
                SubmitOutcome::ok(resp.message)
            }
            Ok(resp) => {
                let msg = resp
                    .error
                    .filter(|e| !e.is_empty())
                    .unwrap_or(resp.message);
                log::warn!("[api] contact submission rejected: {}", msg);
                SubmitOutcome::failed(msg)
            }
            Err(e) => {
                log::warn!("[api] contact submission failed: {:#}", e);
                SubmitOutcome::failed(e.to_string())
            }
        }
    }
}
