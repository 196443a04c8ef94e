use axum::{Router, middleware};

use crate::state::AppState;

pub mod disclosure;
pub mod integration;
pub mod login;
pub mod markup;
pub mod provider;
pub mod state;

/// Assembles the routable application from its state. `main` serves this;
/// tests drive it directly with `tower::ServiceExt::oneshot`.
pub fn app(s: AppState) -> Router {
    Router::new()
        .merge(login::pages(s.clone()))
        .merge(login::api(s))
        .layer(middleware::map_response(markup::wrap_in_base))
        .layer(middleware::map_response(markup::cache_headers))
}

pub trait Raw {
    fn raw(&self) -> &str;
}

/// Masks a sensitive value in Debug and log output.
pub trait Redact {
    fn redact(&self) -> &'static str {
        "********"
    }
}
