use std::net::TcpListener;

use actix_web::web;
use portfolio_contact::{email_client::EmailClient, telemetry};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = telemetry::get_subscriber("portfolio_contact", "info", std::io::stdout);
    telemetry::init_subscriber(subscriber);

    let config = portfolio_contact::config::config()?;
    let listener = TcpListener::bind(config.web.server_address())?;
    tracing::info!(address = %config.web.server_address(), "listening.");

    let email_client = web::Data::new(EmailClient::from_config(&config.email_client)?);
    let mail = web::Data::new(config.mail);

    portfolio_contact::run(listener, email_client, mail)?.await?;

    Ok(())
}
