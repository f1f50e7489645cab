// ticket-server/src/api/ticket.rs
use actix_web::{get, web, HttpResponse};
use common::AccessToken;

use crate::error::WecomError;
use crate::wecom::WecomClient;

/// Relay a JS-API ticket from WeCom using the bootstrapped access token
#[get("/getJsTicket")]
pub async fn get_js_ticket(
    client: web::Data<WecomClient>,
    access_token: web::Data<AccessToken>,
) -> Result<HttpResponse, WecomError> {
    let body = client
        .fetch_jsapi_ticket(access_token.token())
        .await
        .map_err(|e| {
            tracing::error!("Error fetching JS-API ticket: {}", e);
            e
        })?;

    tracing::debug!("Relaying JS-API ticket response ({} bytes)", body.len());

    Ok(HttpResponse::Ok()
        .content_type(mime::APPLICATION_JSON)
        .body(body))
}
