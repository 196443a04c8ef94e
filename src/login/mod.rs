use std::fmt;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use serde::Deserialize;

use crate::state::AppState;
use crate::{Raw, Redact};

pub mod handler;
pub mod markup;
pub mod model;
pub mod service;

type Result<T> = std::result::Result<T, Error>;
pub type Service = Arc<dyn service::PasswordService + Send + Sync>;

pub fn pages<S>(s: AppState) -> Router<S> {
    Router::new()
        .route("/login", get(handler::pages::login))
        .with_state(s)
}

pub fn api<S>(s: AppState) -> Router<S> {
    Router::new()
        .route("/login/password", post(handler::api::password))
        .with_state(s)
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl Raw for Identifier {
    fn raw(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Deserialize)]
pub struct Secret(String);

impl Secret {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

impl Raw for Secret {
    fn raw(&self) -> &str {
        &self.0
    }
}

impl Redact for Secret {}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Secret({})", self.redact())
    }
}

#[derive(thiserror::Error, Debug)]
#[error(transparent)]
pub enum Error {
    #[error("{0}")]
    Rejected(String),
    #[error("unexpected reply from the credential service: {0}")]
    Unexpected(String),

    _Reqwest(#[from] reqwest::Error),
}

impl Error {
    /// Text shown in the password panel's error region.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Rejected(message) => message,
            Self::Unexpected(_) | Self::_Reqwest(_) => {
                "Sign-in is temporarily unavailable. Please try again."
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn should_redact_secret_in_debug_output() {
        let secret = Secret::new("hunter2");

        assert_eq!(format!("{secret:?}"), "Secret(********)");
        assert_eq!(secret.raw(), "hunter2");
    }

    #[test]
    fn should_keep_rejection_message_for_the_user() {
        let rejected = Error::Rejected("Incorrect password".into());
        let unexpected = Error::Unexpected("status 500".into());

        assert_eq!(rejected.user_message(), "Incorrect password");
        assert_eq!(
            unexpected.user_message(),
            "Sign-in is temporarily unavailable. Please try again."
        );
    }
}
