use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";
pub const PROVIDER: &str = "google";
const TIMEOUT_SECS: u64 = 5;

#[derive(Debug, thiserror::Error)]
pub enum GoogleError {
    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
    #[error("Google rejected the access token")]
    Rejected,
}

/// The parts of the OpenID userinfo document the board uses.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GoogleIdentity {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Resolves a client-supplied access token into the Google account behind it.
#[derive(Clone)]
pub struct GoogleClient {
    http: reqwest::Client,
    userinfo_url: String,
}

impl GoogleClient {
    pub fn new(userinfo_url: impl Into<String>) -> Result<Self, GoogleError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            http,
            userinfo_url: userinfo_url.into(),
        })
    }

    pub async fn fetch_identity(&self, access_token: &str) -> Result<GoogleIdentity, GoogleError> {
        let response = self
            .http
            .get(&self.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            tracing::debug!(%status, "Userinfo request rejected");
            return Err(GoogleError::Rejected);
        }

        let identity = response.error_for_status()?.json::<GoogleIdentity>().await?;
        Ok(identity)
    }
}
