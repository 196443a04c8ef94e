use std::convert::Infallible;

use axum::{
    body::Body,
    http::HeaderValue,
    response::{IntoResponse, IntoResponseParts, Response, ResponseParts},
};
use maud::{DOCTYPE, Markup, Render, html};
use reqwest::header::{CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE, EXPIRES};

pub trait IdExt {
    fn attr(&self) -> String;
    fn target(&self) -> String;
}

/// Link back to the login page itself, preserving the redirect target and an
/// already-expanded provider list across the no-script round trip.
pub fn page_link(next: &str, carry_show: bool, extra: Option<(&str, &str)>) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    query.append_pair("next", next);
    if carry_show {
        query.append_pair("show", "all");
    }
    if let Some((key, value)) = extra {
        query.append_pair(key, value);
    }

    format!("/login?{}", query.finish())
}

struct Head<'a>(&'a str);

impl Render for Head<'_> {
    fn render(&self) -> Markup {
        html! {
            head {
                meta charset="utf-8" {}
                title { (self.0) }
                script src="https://unpkg.com/htmx.org@2.0.4" {}
                script src="https://unpkg.com/hyperscript.org@0.9.13" {}

                script src="https://unpkg.com/@tailwindcss/browser@4" {}
                link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.6.0/css/all.min.css" {}

                // htmx swaps error fragments from non-2xx replies too.
                meta name="htmx-config" content=r#"{"responseHandling": [{"code":".*", "swap": true}]}"# {}
            }
        }
    }
}

struct Screen<'a>(&'a Markup);

impl Render for Screen<'_> {
    fn render(&self) -> Markup {
        html! {
            #screen
                ."w-full max-w-md"
                ."bg-white rounded-2xl shadow-lg"
                ."overflow-hidden"
            {
                (self.0)
            }
        }
    }
}

fn base(w: &Wrappable) -> Markup {
    html! {
        (DOCTYPE)
        html {
            (Head("Sign in"))

            body ."min-h-screen bg-gray-100 flex items-center justify-center" {
                (Screen(&w.content))
            }
        }
    }
}

#[derive(Clone)]
pub struct Wrappable {
    content: Markup,
}

impl Wrappable {
    pub fn new(content: impl Render) -> Self {
        Self {
            content: content.render(),
        }
    }
}

impl IntoResponseParts for Wrappable {
    type Error = Infallible;

    fn into_response_parts(
        self,
        mut res: ResponseParts,
    ) -> core::result::Result<ResponseParts, Self::Error> {
        res.extensions_mut().insert(self);
        Ok(res)
    }
}

impl IntoResponse for Wrappable {
    fn into_response(self) -> axum::response::Response {
        (self, ()).into_response()
    }
}

pub async fn wrap_in_base(mut resp: Response) -> Response {
    if let Some(w) = resp.extensions_mut().remove::<Wrappable>() {
        resp.headers_mut().remove(CONTENT_LENGTH);
        resp.headers_mut().insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        );
        *resp.body_mut() = Body::new(base(&w).into_string());
    }

    resp
}

/// Credential pages must not end up in shared caches.
pub async fn cache_headers(mut resp: Response) -> Response {
    let headers = resp.headers_mut();

    if !headers.contains_key(EXPIRES) {
        headers.insert(
            EXPIRES,
            HeaderValue::from_static("Fri, 01 Jan 1990 00:00:00 GMT"),
        );
    }

    let cache_control = headers
        .get(CACHE_CONTROL)
        .and_then(|cc| cc.to_str().ok())
        .map(str::to_owned);

    match cache_control {
        None => {
            headers.insert(CACHE_CONTROL, HeaderValue::from_static("private, no-store"));
        }
        Some(cc) if !cc.contains("private") => {
            if let Ok(value) = HeaderValue::from_str(&format!("private, {cc}")) {
                headers.insert(CACHE_CONTROL, value);
            }
        }
        Some(_) => {}
    }

    resp
}
