use secrecy::{ExposeSecret, SecretString};

use crate::{
    config::EmailClientConfig,
    domain::NotificationEmail,
    util::{endpoint_url, error_chain_fmt},
};

/// Client for a Resend-compatible transactional email API.
pub struct EmailClient {
    client: reqwest::Client,
    send_url: reqwest::Url,
    api_key: Option<SecretString>,
}

/// Whatever the provider answered on success, passed through verbatim.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ProviderResponse(pub serde_json::Value);

impl ProviderResponse {
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(|id| id.as_str())
    }
}

#[derive(thiserror::Error)]
pub enum ProviderError {
    #[error("no API key configured for the email provider.")]
    MissingCredential,
    #[error("failed to call the email provider.")]
    Request(#[from] reqwest::Error),
}

impl std::fmt::Debug for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl EmailClient {
    pub fn new(
        base_url: &str,
        timeout: std::time::Duration,
        api_key: Option<SecretString>,
    ) -> Result<Self, anyhow::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let send_url = endpoint_url(base_url, "emails")?;

        Ok(Self {
            client,
            send_url,
            api_key,
        })
    }

    pub fn from_config(config: &EmailClientConfig) -> Result<Self, anyhow::Error> {
        if config.api_key.is_none() {
            tracing::warn!("email provider API key is not set, contact messages cannot be delivered.");
        }
        Self::new(&config.base_url, config.timeout(), config.api_key.clone())
    }

    #[tracing::instrument(
        name = "sending notification email",
        skip_all,
        fields(to = %email.to, reply_to = %email.reply_to)
    )]
    pub async fn send(&self, email: &NotificationEmail) -> Result<ProviderResponse, ProviderError> {
        let api_key = self.api_key.as_ref().ok_or(ProviderError::MissingCredential)?;
        let body = SendEmailRequest {
            from: &email.from,
            to: [email.to.as_ref()],
            subject: &email.subject,
            html: &email.html_body,
            text: &email.text_body,
            reply_to: &email.reply_to,
        };

        let response = self
            .client
            .post(self.send_url.clone())
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<ProviderResponse>()
            .await?;
        tracing::info!(provider_id = response.id(), "provider accepted the email.");

        Ok(response)
    }
}

#[derive(serde::Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
    reply_to: &'a str,
}
