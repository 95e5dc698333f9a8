use std::net::TcpListener;

use actix_web::{dev::Server, web, App, HttpServer};
use tracing_actix_web::TracingLogger;

use crate::{config::MailSettings, email_client::EmailClient, routes};

pub fn run(
    listener: TcpListener,
    email_client: web::Data<EmailClient>,
    mail: web::Data<MailSettings>,
) -> std::io::Result<Server> {
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(
                web::JsonConfig::default()
                    .content_type(|_| true)
                    .content_type_required(false)
                    .error_handler(routes::json_error_handler),
            )
            .app_data(email_client.clone())
            .app_data(mail.clone())
            .route("/health_check", web::get().to(routes::health_check))
            .route("/api/send", web::post().to(routes::send))
    })
    .listen(listener)?
    .run();

    Ok(server)
}
