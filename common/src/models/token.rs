// common/src/models/token.rs
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Application credentials exchanged for an access token
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub corp_id: String,
    pub corp_secret: String,
}

impl Credentials {
    pub fn new(corp_id: impl Into<String>, corp_secret: impl Into<String>) -> Self {
        Self {
            corp_id: corp_id.into(),
            corp_secret: corp_secret.into(),
        }
    }

    /// Both values must be present before a token can be requested
    pub fn is_complete(&self) -> bool {
        !self.corp_id.is_empty() && !self.corp_secret.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("corp_id", &self.corp_id)
            .field("corp_secret", &"<redacted>")
            .finish()
    }
}

/// Raw body of the `gettoken` endpoint.
///
/// Error replies omit `access_token` and `expires_in`, so every field defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenResponse {
    #[serde(rename = "errcode")]
    pub error_code: i64,
    #[serde(rename = "errmsg")]
    pub error_message: String,
    pub access_token: String,
    pub expires_in: i64,
}

impl TokenResponse {
    pub fn is_success(&self) -> bool {
        self.error_code == 0
    }
}

/// Bearer token held for the lifetime of the process.
///
/// The default value is the empty token used when bootstrap fails.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AccessToken {
    pub token: String,
    /// Lifetime in seconds as reported upstream; never acted on
    pub expires_in: i64,
    pub error_code: i64,
    pub error_message: String,
    pub issued_at: Option<DateTime<Utc>>,
}

impl AccessToken {
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn is_empty(&self) -> bool {
        self.token.is_empty()
    }

    /// Point in time the upstream considers the token stale
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.issued_at
            .map(|issued| issued + Duration::seconds(self.expires_in))
    }
}

impl From<TokenResponse> for AccessToken {
    fn from(response: TokenResponse) -> Self {
        Self {
            token: response.access_token,
            expires_in: response.expires_in,
            error_code: response.error_code,
            error_message: response.error_message,
            issued_at: Some(Utc::now()),
        }
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &if self.is_empty() { "<empty>" } else { "<redacted>" })
            .field("expires_in", &self.expires_in)
            .field("error_code", &self.error_code)
            .field("error_message", &self.error_message)
            .field("issued_at", &self.issued_at)
            .finish()
    }
}
