use axum::http::StatusCode;

impl From<&super::Error> for StatusCode {
    fn from(e: &super::Error) -> Self {
        match e {
            super::Error::Rejected(_) => Self::UNAUTHORIZED,
            super::Error::Unexpected(_) | super::Error::_Reqwest(_) => Self::BAD_GATEWAY,
        }
    }
}

pub(super) mod pages {
    use std::sync::Arc;

    use axum::extract::State;
    use axum_extra::extract::{CookieJar, Host, Query};
    use log::debug;
    use serde::Deserialize;

    use crate::disclosure::Event;
    use crate::disclosure::controller::Controller;
    use crate::disclosure::model::VisibilityState;
    use crate::login::markup::LoginPage;
    use crate::login::model::{Prompts, sanitize_next};
    use crate::markup::Wrappable;
    use crate::provider::Id;
    use crate::provider::model::{Catalog, FormErrors, LastUsed};

    #[derive(Deserialize)]
    pub struct Params {
        next: Option<String>,
        show: Option<String>,
        form: Option<String>,
        method: Option<String>,
        service: Option<String>,
        error: Option<String>,
    }

    pub async fn login(
        Query(params): Query<Params>,
        State(catalog): State<Arc<Catalog>>,
        State(prompts): State<Arc<Prompts>>,
        Host(host): Host,
        jar: CookieJar,
    ) -> Wrappable {
        let last_used = LastUsed::from_jar(&jar);
        let errors = FormErrors::from_query(params.service.as_deref(), params.error.as_deref());
        let next = sanitize_next(params.next.as_deref(), &host);

        debug!("Rendering login screen, last used method: {last_used:?}");

        let state = VisibilityState::initial(&catalog, last_used.as_ref(), &errors);
        let mut controller = Controller::new(&catalog, state, ());

        // The no-script fallback: affordances link back here and replay
        // their transition through the same state machine.
        if params.show.as_deref() == Some("all") {
            controller.apply(Event::ShowMore);
        }
        if let Some(form) = params.form {
            controller.apply(Event::ToggleForm(Id(form)));
        }
        if params.method.as_deref() == Some(LastUsed::PASSWORD) {
            controller.apply(Event::ExpandPassword);
        }

        Wrappable::new(LoginPage {
            catalog: &catalog,
            state: controller.into_state(),
            last_used: last_used.as_ref(),
            prompts: &prompts,
            form_errors: &errors,
            next: &next,
            identifier: None,
            password_error: errors.password(),
        })
    }
}

pub(super) mod api {
    use std::sync::Arc;

    use axum::Form;
    use axum::extract::State;
    use axum::http::{HeaderMap, HeaderName, StatusCode};
    use axum::response::{IntoResponse, Redirect, Response};
    use axum_extra::extract::{CookieJar, Host};
    use log::{debug, warn};

    use crate::disclosure::Event;
    use crate::disclosure::controller::Controller;
    use crate::disclosure::model::VisibilityState;
    use crate::login::markup::{self, LoginPage};
    use crate::login::model::{Credentials, Prompts, sanitize_next};
    use crate::markup::Wrappable;
    use crate::provider::model::{Catalog, FormErrors, LastUsed};
    use crate::{Raw, login};

    const HX_REQUEST: &str = "hx-request";
    const HX_REDIRECT: &str = "hx-redirect";

    pub async fn password(
        State(service): State<login::Service>,
        State(catalog): State<Arc<Catalog>>,
        State(prompts): State<Arc<Prompts>>,
        Host(host): Host,
        headers: HeaderMap,
        jar: CookieJar,
        Form(credentials): Form<Credentials>,
    ) -> Response {
        let htmx = headers.contains_key(HX_REQUEST);
        let next = sanitize_next(credentials.next.as_deref(), &host);

        match service.verify(&credentials).await {
            Ok(landing) => {
                let to = sanitize_next(Some(landing.target()), &host);
                debug!("Password sign-in accepted, landing on {to}");

                if htmx {
                    (StatusCode::OK, [(HeaderName::from_static(HX_REDIRECT), to)]).into_response()
                } else {
                    Redirect::to(&to).into_response()
                }
            }
            Err(e) => {
                warn!("Password sign-in failed for '{}': {e}", credentials.username);

                if htmx {
                    return (StatusCode::from(&e), markup::failure_notice(&e)).into_response();
                }

                let last_used = LastUsed::from_jar(&jar);
                let errors = FormErrors::default();
                let state = VisibilityState::initial(&catalog, last_used.as_ref(), &errors);
                let mut controller = Controller::new(&catalog, state, ());
                controller.apply(Event::ExpandPassword);

                Wrappable::new(LoginPage {
                    catalog: &catalog,
                    state: controller.into_state(),
                    last_used: last_used.as_ref(),
                    prompts: &prompts,
                    form_errors: &errors,
                    next: &next,
                    identifier: Some(credentials.username.raw()),
                    password_error: Some(e.user_message()),
                })
                .into_response()
            }
        }
    }
}
