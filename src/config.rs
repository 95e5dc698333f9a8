use std::time::Duration;

use secrecy::SecretString;
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::domain::EmailAddress;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Config {
    pub web: WebConfig,
    pub email_client: EmailClientConfig,
    pub mail: MailSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct WebConfig {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

impl WebConfig {
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct EmailClientConfig {
    pub base_url: String,
    pub timeout_milliseconds: u64,
    /// Absent until the provider credential is configured; only sending fails without it.
    #[serde(default)]
    pub api_key: Option<SecretString>,
}

impl EmailClientConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

/// Fixed envelope of every notification email.
#[derive(serde::Deserialize, Clone, Debug)]
pub struct MailSettings {
    pub sender_name: String,
    pub sender: EmailAddress,
    pub recipient: EmailAddress,
    pub subject_tag: String,
    pub site_owner: String,
}

impl MailSettings {
    /// `Display Name <address>` form used for the `from` field.
    pub fn sender_mailbox(&self) -> String {
        format!("{} <{}>", self.sender_name, self.sender)
    }
}

/// `config.yaml`, then `APP_` prefixed environment variables
/// (e.g. `APP_WEB__PORT`), then `RESEND_API_KEY`.
pub fn config() -> Result<Config, config::ConfigError> {
    config::Config::builder()
        .add_source(config::File::new("config.yaml", config::FileFormat::Yaml))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .set_override_option("email_client.api_key", std::env::var("RESEND_API_KEY").ok())?
        .build()?
        .try_deserialize::<Config>()
}
