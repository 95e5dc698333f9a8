use std::fmt::Debug;

use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse, ResponseError};
use anyhow::Context;

use crate::{
    config::MailSettings,
    domain::{MissingField, NotificationEmail, SubmissionForm},
    email_client::{EmailClient, ProviderResponse},
    util::error_chain_fmt,
};

#[derive(serde::Serialize)]
pub struct SendResponse {
    success: bool,
    data: ProviderResponse,
}

#[tracing::instrument(
    name = "dispatching contact message",
    skip(form, email_client, mail),
    fields(
        sender_name = %form.name,
        sender_email = %form.email,
    )
)]
pub async fn send(
    form: web::Json<SubmissionForm>,
    email_client: web::Data<EmailClient>,
    mail: web::Data<MailSettings>,
) -> Result<HttpResponse, SendError> {
    let form = form.into_inner();
    if let Err(e) = form.validate() {
        let missing: Vec<&str> = e.0.iter().map(|f| f.as_str()).collect();
        tracing::info!(?missing, "rejected incomplete contact message.");
        return Err(e.into());
    }

    let data = deliver(&form, &email_client, &mail)
        .await
        .map_err(|e| {
            tracing::error!(
                error.cause_chain = ?e,
                error.message = %e,
                "failed to deliver contact message."
            );
            SendError::DeliveryError(e)
        })?;

    Ok(HttpResponse::Ok().json(SendResponse {
        success: true,
        data,
    }))
}

async fn deliver(
    form: &SubmissionForm,
    email_client: &EmailClient,
    mail: &MailSettings,
) -> Result<ProviderResponse, anyhow::Error> {
    let email = NotificationEmail::compose(form, mail)?;
    let data = email_client
        .send(&email)
        .await
        .context("email provider rejected the notification.")?;

    Ok(data)
}

/// A body that cannot be read as a contact form is treated like any other
/// unexpected failure: logged, then answered with the generic 500.
pub fn json_error_handler(err: actix_web::error::JsonPayloadError, _: &HttpRequest) -> actix_web::Error {
    let e = anyhow::anyhow!(err.to_string()).context("failed to parse contact message body.");
    tracing::error!(
        error.cause_chain = ?e,
        error.message = %e,
        "failed to read contact message."
    );
    SendError::DeliveryError(e).into()
}

#[derive(thiserror::Error)]
pub enum SendError {
    #[error("all fields required")]
    ValidationError(#[from] MissingField),
    #[error("delivery failed, please retry")]
    DeliveryError(#[source] anyhow::Error),
}

impl Debug for SendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SendError {
    fn status_code(&self) -> StatusCode {
        match self {
            SendError::ValidationError(_) => StatusCode::BAD_REQUEST,
            SendError::DeliveryError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": self.to_string() }))
    }
}
