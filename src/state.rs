use std::sync::Arc;

use axum::extract::FromRef;

use crate::integration;
use crate::login;
use crate::login::model::Prompts;
use crate::login::service::PasswordBridge;
use crate::provider;
use crate::provider::model::Catalog;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub prompts: Arc<Prompts>,
    pub password_service: login::Service,
}

impl AppState {
    pub fn init(cfg: &integration::Config) -> Result<Self, provider::Error> {
        let catalog = Catalog::from_json(cfg.initiation_url.clone(), &cfg.providers)?;
        let bridge = PasswordBridge::new(&cfg.upstream, integration::init_http_client());

        Ok(Self {
            catalog: Arc::new(catalog),
            prompts: Arc::new(cfg.prompts.clone()),
            password_service: Arc::new(bridge),
        })
    }
}

impl FromRef<AppState> for Arc<Catalog> {
    fn from_ref(s: &AppState) -> Self {
        s.catalog.clone()
    }
}

impl FromRef<AppState> for Arc<Prompts> {
    fn from_ref(s: &AppState) -> Self {
        s.prompts.clone()
    }
}

impl FromRef<AppState> for login::Service {
    fn from_ref(s: &AppState) -> Self {
        s.password_service.clone()
    }
}
