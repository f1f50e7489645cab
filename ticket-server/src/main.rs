// ticket-server/src/main.rs
mod api;
mod bootstrap;
mod error;
mod static_files;
mod wecom;

use actix_web::{web, App, HttpServer};
use common::{setup_tracing, Config};
use std::io;

use crate::wecom::WecomClient;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Setup tracing
    setup_tracing().map_err(io::Error::other)?;

    // Load configuration
    let config = Config::from_env();
    tracing::debug!("Effective configuration: {:?}", config);

    let server_addr = config.server_addr.clone();
    let static_config = config.static_files.clone();

    let client = WecomClient::new(&config.wecom).map_err(io::Error::other)?;

    // The token is written once here, before any worker can read it
    let access_token = bootstrap::bootstrap_access_token(
        &client,
        &config.wecom.credentials(),
        config.wecom.fail_fast_bootstrap,
    )
    .await
    .map_err(io::Error::other)?;

    tracing::info!("Starting ticket server on {}", server_addr);

    let client_data = web::Data::new(client);
    let token_data = web::Data::new(access_token);

    HttpServer::new(move || {
        App::new()
            .app_data(client_data.clone())
            .app_data(token_data.clone())
            // API routes first; static serving is the catch-all
            .configure(api::configure)
            .configure(|cfg| static_files::configure(cfg, static_config.clone()))
    })
    .bind(&server_addr)?
    .run()
    .await
}
