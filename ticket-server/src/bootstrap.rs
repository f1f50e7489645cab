// ticket-server/src/bootstrap.rs
use common::{AccessToken, Credentials};

use crate::error::WecomError;
use crate::wecom::WecomClient;

/// Obtain the process-wide access token before the listener starts.
///
/// Unless `fail_fast` is set, a failure is logged and the empty token is
/// returned so the server still comes up; ticket requests then carry an empty
/// `access_token` and relay whatever the upstream answers.
pub async fn bootstrap_access_token(
    client: &WecomClient,
    credentials: &Credentials,
    fail_fast: bool,
) -> Result<AccessToken, WecomError> {
    match client.fetch_access_token(credentials).await {
        Ok(token) => {
            tracing::info!(
                "Access token acquired for corp {}, expires in {}s",
                credentials.corp_id,
                token.expires_in
            );
            Ok(token)
        },
        Err(e) if fail_fast => {
            tracing::error!("Failed to obtain access token: {}", e);
            Err(e)
        },
        Err(e) => {
            tracing::error!("Failed to obtain access token, continuing without one: {}", e);
            Ok(AccessToken::default())
        }
    }
}
