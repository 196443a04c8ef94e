use serde::Deserialize;
use url::Url;

use super::{Identifier, Secret};

pub const DEFAULT_LANDING: &str = "/";

/// The password form payload. `next` and the charset marker ride along as
/// hidden fields and are forwarded to the credential service unchanged.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: Identifier,
    pub password: Secret,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default, rename = "_charset_")]
    pub charset: Option<String>,
}

/// Where the credential service wants the browser to go after a successful
/// sign-in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Landing(String);

impl Landing {
    pub fn new(target: impl Into<String>) -> Self {
        Self(target.into())
    }

    pub fn target(&self) -> &str {
        &self.0
    }
}

/// The two headline prompts, overridable through configuration.
#[derive(Clone, Debug)]
pub struct Prompts {
    pub providers: String,
    pub password: String,
}

impl Default for Prompts {
    fn default() -> Self {
        Self {
            providers: "Sign in with one of these services".into(),
            password: "Or sign in with a password".into(),
        }
    }
}

impl Prompts {
    pub fn new(providers: Option<String>, password: Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            providers: providers.unwrap_or(defaults.providers),
            password: password.unwrap_or(defaults.password),
        }
    }
}

/// Keeps redirects on this site: relative paths pass through, absolute URLs
/// only when they point at the serving host. Anything else lands on the
/// default target.
pub fn sanitize_next(next: Option<&str>, host: &str) -> String {
    let Some(next) = next.filter(|n| !n.is_empty()) else {
        return DEFAULT_LANDING.into();
    };

    if next.starts_with('/') && !next.starts_with("//") {
        return next.to_string();
    }

    let bare_host = host.split(':').next().unwrap_or(host);
    match Url::parse(next) {
        Ok(url)
            if matches!(url.scheme(), "http" | "https")
                && url.host_str() == Some(bare_host) =>
        {
            next.to_string()
        }
        _ => DEFAULT_LANDING.into(),
    }
}
