use std::collections::HashMap;

use axum_extra::extract::CookieJar;
use serde::Deserialize;

use super::{Id, Result};

#[derive(Clone, Debug, Deserialize)]
pub struct Provider {
    pub id: Id,
    pub title: String,
    pub icon_ref: String,
    #[serde(default)]
    pub form: Option<InlineForm>,
}

/// A login method completed without leaving the page: activating the
/// provider button reveals this form instead of navigating away.
#[derive(Clone, Debug, Deserialize)]
pub struct InlineForm {
    pub field: String,
    pub label: String,
}

#[derive(Clone, Debug)]
pub struct Catalog {
    initiation_url: String,
    entries: Vec<Provider>,
}

impl Catalog {
    /// Providers ranked at this position or later start hidden behind the
    /// "more options" affordance.
    pub const PRIMARY: usize = 2;

    pub fn new(initiation_url: impl Into<String>, entries: Vec<Provider>) -> Self {
        Self {
            initiation_url: initiation_url.into(),
            entries,
        }
    }

    pub fn from_json(initiation_url: impl Into<String>, json: &str) -> Result<Self> {
        let entries = serde_json::from_str::<Vec<Provider>>(json)?;
        Ok(Self::new(initiation_url, entries))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Provider> {
        self.entries.iter()
    }

    pub fn get(&self, id: &Id) -> Option<&Provider> {
        self.entries.iter().find(|p| p.id.eq(id))
    }

    pub fn is_secondary(&self, id: &Id) -> bool {
        self.entries
            .iter()
            .position(|p| p.id.eq(id))
            .is_some_and(|pos| pos >= Self::PRIMARY)
    }

    pub fn has_secondary(&self) -> bool {
        self.entries.len() > Self::PRIMARY
    }

    pub fn initiation_link(&self, id: &Id, next: &str) -> String {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .append_pair("service", &id.0)
            .append_pair("next", next)
            .finish();

        format!("{}?{query}", self.initiation_url)
    }

    pub fn initiation_url(&self) -> &str {
        &self.initiation_url
    }
}

/// The method this browser last signed in with. Set by the external session
/// layer after a successful login; this service only ever reads it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LastUsed {
    Password,
    Provider(Id),
}

impl LastUsed {
    pub const COOKIE: &str = "last_login";
    pub const PASSWORD: &str = "password";

    pub fn parse(raw: &str) -> Self {
        if raw == Self::PASSWORD {
            Self::Password
        } else {
            Self::Provider(Id(raw.to_string()))
        }
    }

    pub fn from_jar(jar: &CookieJar) -> Option<Self> {
        jar.get(Self::COOKIE).map(|c| Self::parse(c.value()))
    }

    pub fn matches(&self, id: &Id) -> bool {
        match self {
            Self::Password => false,
            Self::Provider(last) => last.eq(id),
        }
    }

    pub fn is_password(&self) -> bool {
        matches!(self, Self::Password)
    }
}

/// Inline error strings carried back from a failed in-page attempt, keyed by
/// the service name the callback reported.
#[derive(Clone, Debug, Default)]
pub struct FormErrors(HashMap<String, String>);

impl FormErrors {
    pub fn from_query(service: Option<&str>, error: Option<&str>) -> Self {
        let mut errors = HashMap::new();
        if let (Some(service), Some(error)) = (service, error) {
            errors.insert(service.to_string(), error.to_string());
        }
        Self(errors)
    }

    pub fn get(&self, id: &Id) -> Option<&str> {
        self.0.get(&id.0).map(String::as_str)
    }

    pub fn password(&self) -> Option<&str> {
        self.0.get(LastUsed::PASSWORD).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
