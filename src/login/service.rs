use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;

use crate::Raw;
use crate::integration::upstream;

use super::model::{Credentials, DEFAULT_LANDING, Landing};

#[async_trait]
pub trait PasswordService {
    async fn verify(&self, credentials: &Credentials) -> super::Result<Landing>;
}

/// Bridges the password form to the external credential service. Verifying
/// the password itself is that service's job; this side only relays the
/// fields and interprets the reply.
#[derive(Clone)]
pub struct PasswordBridge {
    cfg: Arc<upstream::Config>,
    http: Arc<reqwest::Client>,
}

impl PasswordBridge {
    pub fn new(cfg: &upstream::Config, http: reqwest::Client) -> Self {
        Self {
            cfg: Arc::new(cfg.to_owned()),
            http: Arc::new(http),
        }
    }
}

#[async_trait]
impl PasswordService for PasswordBridge {
    async fn verify(&self, credentials: &Credentials) -> super::Result<Landing> {
        debug!("Relaying password credentials for '{}'", credentials.username);

        let response = self
            .http
            .post(self.cfg.password_url())
            .form(&[
                ("username", credentials.username.raw()),
                ("password", credentials.password.raw()),
                ("next", credentials.next.as_deref().unwrap_or(DEFAULT_LANDING)),
                ("_charset_", credentials.charset.as_deref().unwrap_or("utf-8")),
            ])
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            let accepted = response.json::<Accepted>().await?;
            let target = accepted.next.unwrap_or_else(|| DEFAULT_LANDING.into());
            return Ok(Landing::new(target));
        }

        if status.is_client_error() {
            let refusal = response
                .json::<Refusal>()
                .await
                .map_err(|e| super::Error::Unexpected(e.to_string()))?;

            warn!(
                "Credential service rejected '{}': {}",
                credentials.username, refusal.error_message
            );
            return Err(super::Error::Rejected(refusal.error_message));
        }

        Err(super::Error::Unexpected(format!("status {status}")))
    }
}

#[derive(Deserialize)]
struct Accepted {
    #[serde(default)]
    next: Option<String>,
}

#[derive(Deserialize)]
struct Refusal {
    #[serde(rename = "errorMessage")]
    error_message: String,
}
