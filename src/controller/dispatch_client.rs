use std::time::Duration;

use anyhow::Context;
use reqwest::StatusCode;

use crate::{
    domain::SubmissionForm,
    util::{endpoint_url, error_chain_fmt},
};

/// Posts contact forms to the mail dispatch endpoint (`POST /api/send`).
pub struct DispatchClient {
    client: reqwest::Client,
    endpoint: reqwest::Url,
}

/// Body of a successful dispatch.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct DispatchReceipt {
    pub success: bool,
    #[serde(default)]
    pub data: serde_json::Value,
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(thiserror::Error)]
pub enum DispatchError {
    #[error("the contact endpoint could not be reached.")]
    Network(#[source] reqwest::Error),
    #[error("the contact endpoint answered {status}: {message}")]
    Rejected { status: StatusCode, message: String },
    #[error("the contact endpoint sent an unreadable response.")]
    MalformedResponse(#[source] anyhow::Error),
}

impl std::fmt::Debug for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl DispatchClient {
    /// `base_url` is where the site is served, e.g. `https://portfolio.dev/kim`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, anyhow::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let endpoint = endpoint_url(base_url, "api/send")?;

        Ok(Self { client, endpoint })
    }

    #[tracing::instrument(name = "submitting contact form", skip_all, fields(endpoint = %self.endpoint))]
    pub async fn dispatch(&self, form: &SubmissionForm) -> Result<DispatchReceipt, DispatchError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(form)
            .send()
            .await
            .map_err(DispatchError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.error,
                Err(_) => "no error message".into(),
            };
            return Err(DispatchError::Rejected { status, message });
        }

        let receipt = response
            .json::<DispatchReceipt>()
            .await
            .context("failed to decode dispatch response.")
            .map_err(DispatchError::MalformedResponse)?;
        if !receipt.success {
            return Err(DispatchError::MalformedResponse(anyhow::anyhow!(
                "dispatch response did not report success."
            )));
        }

        Ok(receipt)
    }
}
