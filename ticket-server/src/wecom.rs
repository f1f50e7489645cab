// ticket-server/src/wecom.rs
use std::time::Duration;

use actix_web::web::Bytes;
use common::{AccessToken, Credentials, TokenResponse, WecomConfig};
use reqwest::Client;
use serde_json::{Map, Value};
use url::Url;

use crate::error::WecomError;

const TOKEN_PATH: &str = "cgi-bin/gettoken";
const JSAPI_TICKET_PATH: &str = "cgi-bin/get_jsapi_ticket";

/// HTTP client for the WeCom API
#[derive(Clone, Debug)]
pub struct WecomClient {
    client: Client,
    api_base: Url,
}

impl WecomClient {
    pub fn new(config: &WecomConfig) -> Result<Self, WecomError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(WecomError::Client)?;

        // `Url::join` drops the last segment unless the base ends in a slash
        let api_base = Url::parse(&format!("{}/", config.api_base.trim_end_matches('/')))?;

        Ok(Self { client, api_base })
    }

    /// Exchange credentials for an access token
    pub async fn fetch_access_token(&self, credentials: &Credentials) -> Result<AccessToken, WecomError> {
        if !credentials.is_complete() {
            return Err(WecomError::MissingCredentials);
        }

        let body = self.get(TOKEN_PATH, &[
            ("corpid", credentials.corp_id.as_str()),
            ("corpsecret", credentials.corp_secret.as_str()),
        ]).await?;

        let response: TokenResponse = serde_json::from_slice(&body)?;
        if !response.is_success() {
            return Err(WecomError::UpstreamRejected {
                code: response.error_code,
                message: response.error_message,
            });
        }

        Ok(AccessToken::from(response))
    }

    /// Fetch a JS-API ticket and return the upstream body untouched.
    ///
    /// The body must be a JSON object; the upstream `errcode` is not inspected.
    pub async fn fetch_jsapi_ticket(&self, access_token: &str) -> Result<Bytes, WecomError> {
        let body = self.get(JSAPI_TICKET_PATH, &[("access_token", access_token)]).await?;
        serde_json::from_slice::<Map<String, Value>>(&body)?;
        Ok(body)
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<Bytes, WecomError> {
        let url = self.api_base.join(path)?;

        // Errors carry the URL by default, which would leak the secret or token
        let request = self.client
            .get(url)
            .query(query)
            .build()
            .map_err(|e| WecomError::Request(e.without_url()))?;

        let response = self.client
            .execute(request)
            .await
            .map_err(|e| WecomError::Transport(e.without_url()))?;

        tracing::debug!("{} answered with status {}", path, response.status());

        response
            .bytes()
            .await
            .map_err(|e| WecomError::BodyRead(e.without_url()))
    }
}
