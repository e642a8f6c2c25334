//! HTTP OTP backend
//!
//! Calls the role-scoped send/verify/resend endpoints with a JSON body and
//! reads the `{success, message?}` reply. That reply counts even when it
//! comes with an error status; any other error body becomes a transport
//! failure, keeping its `message` when it has one.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

use kyc_core::{OtpBackend, OtpEndpoints, Role, TransportError};
use kyc_shared::config::{BackendConfig, EndpointPaths};
use kyc_shared::types::ChannelResponse;

use crate::InfrastructureError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendOtpRequest<'a> {
    wallet_address: &'a str,
    phone: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyOtpRequest<'a> {
    wallet_address: &'a str,
    otp: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResendOtpRequest<'a> {
    wallet_address: &'a str,
}

/// One role's endpoint triple over HTTP
#[derive(Debug, Clone)]
pub struct HttpOtpEndpoints {
    http: Client,
    base_url: String,
    paths: EndpointPaths,
}

impl HttpOtpEndpoints {
    pub fn new(http: Client, base_url: impl Into<String>, paths: EndpointPaths) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            paths,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ChannelResponse, TransportError> {
        let url = self.url(path);
        debug!(url = %url, event = "otp_http_request", "Calling OTP backend");

        let response = self
            .http
            .post(&url)
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError::new(format!("Failed to reach {}: {}", url, e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportError::new(format!("Failed to read response from {}: {}", url, e)))?;

        if !status.is_success() {
            // Rejections often arrive as 4xx with the regular reply body
            if let Ok(reply) = serde_json::from_str::<ChannelResponse>(&text) {
                if !reply.success {
                    debug!(url = %url, status = status.as_u16(), event = "otp_http_rejected", "OTP backend rejected the request");
                    return Ok(reply);
                }
            }

            let detail = format!(
                "OTP backend error {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            );
            warn!(url = %url, status = status.as_u16(), event = "otp_http_error_status", "OTP backend returned an error status");

            let error = TransportError::new(detail);
            return Err(match error_message(&text) {
                Some(message) => error.with_message(message),
                None => error,
            });
        }

        serde_json::from_str::<ChannelResponse>(&text).map_err(|e| {
            TransportError::new(format!("Failed to parse response from {}: {}", url, e))
        })
    }
}

/// Extract a user-facing `message` from an error body
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(|m| m.as_str())
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl OtpEndpoints for HttpOtpEndpoints {
    async fn send(&self, identity: &str, phone: &str) -> Result<ChannelResponse, TransportError> {
        let body = SendOtpRequest {
            wallet_address: identity,
            phone,
        };
        self.post(&self.paths.send, &body).await
    }

    async fn verify(&self, identity: &str, code: &str) -> Result<ChannelResponse, TransportError> {
        let body = VerifyOtpRequest {
            wallet_address: identity,
            otp: code,
        };
        self.post(&self.paths.verify, &body).await
    }

    async fn resend(&self, identity: &str) -> Result<ChannelResponse, TransportError> {
        let body = ResendOtpRequest {
            wallet_address: identity,
        };
        self.post(&self.paths.resend, &body).await
    }
}

/// HTTP backend with customer and agent endpoint triples sharing one client
#[derive(Debug, Clone)]
pub struct HttpOtpBackend {
    customer: Arc<HttpOtpEndpoints>,
    agent: Arc<HttpOtpEndpoints>,
}

impl HttpOtpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, InfrastructureError> {
        if config.base_url.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "backend.base_url is required for the http provider".to_string(),
            ));
        }
        let http = Client::builder().timeout(config.request_timeout()).build()?;

        Ok(Self {
            customer: Arc::new(HttpOtpEndpoints::new(
                http.clone(),
                config.base_url.as_str(),
                config.customer.clone(),
            )),
            agent: Arc::new(HttpOtpEndpoints::new(
                http,
                config.base_url.as_str(),
                config.agent.clone(),
            )),
        })
    }
}

impl OtpBackend for HttpOtpBackend {
    fn endpoints(&self, role: Role) -> Arc<dyn OtpEndpoints> {
        match role {
            Role::Customer => self.customer.clone(),
            Role::Agent => self.agent.clone(),
        }
    }
}
