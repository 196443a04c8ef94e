#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, Response, StatusCode, header};
    use tower::ServiceExt;

    use signin_service::login::model::{Credentials, Landing, Prompts};
    use signin_service::login::service::PasswordService;
    use signin_service::login::{self, Error};
    use signin_service::provider::Id;
    use signin_service::provider::model::{Catalog, InlineForm, Provider};
    use signin_service::state::AppState;

    enum StubVerdict {
        Accept(&'static str),
        Reject(&'static str),
        Outage,
    }

    struct StubPassword(StubVerdict);

    #[async_trait]
    impl PasswordService for StubPassword {
        async fn verify(&self, _credentials: &Credentials) -> Result<Landing, Error> {
            match &self.0 {
                StubVerdict::Accept(target) => Ok(Landing::new(*target)),
                StubVerdict::Reject(message) => Err(Error::Rejected((*message).into())),
                StubVerdict::Outage => Err(Error::Unexpected("status 500".into())),
            }
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(
            "/auth/login",
            vec![
                provider("github", "GitHub", None),
                provider("google", "Google", None),
                provider(
                    "openid",
                    "OpenID",
                    Some(InlineForm {
                        field: "openid".into(),
                        label: "OpenID URL".into(),
                    }),
                ),
                provider("twitter", "Twitter", None),
            ],
        )
    }

    fn provider(id: &str, title: &str, form: Option<InlineForm>) -> Provider {
        Provider {
            id: Id(id.into()),
            title: title.into(),
            icon_ref: format!("fa-brands fa-{id}"),
            form,
        }
    }

    fn app(verdict: StubVerdict) -> Router {
        let service: login::Service = Arc::new(StubPassword(verdict));
        signin_service::app(AppState {
            catalog: Arc::new(catalog()),
            prompts: Arc::new(Prompts::default()),
            password_service: service,
        })
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri(uri).header(header::HOST, "localhost");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn submit(htmx: bool) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri("/login/password")
            .header(header::HOST, "localhost")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if htmx {
            builder = builder.header("hx-request", "true");
        }
        builder
            .body(Body::from(
                "username=jora&password=hunter2&next=%2Fapp&_charset_=UTF-8",
            ))
            .unwrap()
    }

    async fn body_string(resp: Response<Body>) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn should_render_primary_and_remembered_providers_only() {
        let resp = app(StubVerdict::Accept("/"))
            .oneshot(get("/login?next=/app", Some("last_login=twitter")))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_string(resp).await;

        assert!(html.contains(r#"id="provider-github""#));
        assert!(html.contains(r#"id="provider-google""#));
        // twitter is remembered and shown, openid stays behind the affordance
        assert_eq!(
            html.matches(r#"<li class="provider provider-secondary">"#).count(),
            1
        );
        assert_eq!(
            html.matches(r#"<li class="provider provider-secondary hidden">"#).count(),
            1
        );
        assert_eq!(html.matches("Last used").count(), 1);
        assert!(html.contains(r#"id="show-more""#));
    }

    #[tokio::test]
    async fn should_reveal_all_providers_through_the_fallback_link() {
        let resp = app(StubVerdict::Accept("/"))
            .oneshot(get("/login?next=/app&show=all", None))
            .await
            .unwrap();

        let html = body_string(resp).await;

        assert_eq!(
            html.matches(r#"<li class="provider provider-secondary hidden">"#).count(),
            0
        );
        assert!(!html.contains(r#"id="show-more""#));
    }

    #[tokio::test]
    async fn should_reveal_inline_form_through_the_fallback_link() {
        let resp = app(StubVerdict::Accept("/"))
            .oneshot(get("/login?show=all&form=openid", None))
            .await
            .unwrap();

        let html = body_string(resp).await;

        assert!(html.contains(r#"<form class="mt-2 ml-1 p-3 border-l-2 border-gray-200" id="form-openid""#));
        assert!(html.contains("autofocus"));
    }

    #[tokio::test]
    async fn should_expand_password_panel_for_remembered_password_login() {
        let resp = app(StubVerdict::Accept("/"))
            .oneshot(get("/login", Some("last_login=password")))
            .await
            .unwrap();

        let html = body_string(resp).await;

        assert!(html.contains(r#"<div class="mt-2" id="password-panel">"#));
        assert!(html.contains(r#"id="show-more""#));
    }

    #[tokio::test]
    async fn should_keep_login_pages_out_of_shared_caches() {
        let resp = app(StubVerdict::Accept("/"))
            .oneshot(get("/login", None))
            .await
            .unwrap();

        assert_eq!(
            resp.headers().get(header::CACHE_CONTROL).unwrap(),
            "private, no-store"
        );
        assert_eq!(
            resp.headers().get(header::EXPIRES).unwrap(),
            "Fri, 01 Jan 1990 00:00:00 GMT"
        );
    }

    #[tokio::test]
    async fn should_redirect_htmx_submit_through_response_header() {
        let resp = app(StubVerdict::Accept("/app"))
            .oneshot(submit(true))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("hx-redirect").unwrap(), "/app");
        assert!(body_string(resp).await.is_empty());
    }

    #[tokio::test]
    async fn should_redirect_plain_submit_with_see_other() {
        let resp = app(StubVerdict::Accept("/app"))
            .oneshot(submit(false))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/app");
    }

    #[tokio::test]
    async fn should_fall_back_to_default_landing_for_offsite_redirect() {
        let resp = app(StubVerdict::Accept("https://evil.test/"))
            .oneshot(submit(true))
            .await
            .unwrap();

        assert_eq!(resp.headers().get("hx-redirect").unwrap(), "/");
    }

    #[tokio::test]
    async fn should_swap_error_fragment_on_htmx_failure() {
        let resp = app(StubVerdict::Reject("Incorrect password"))
            .oneshot(submit(true))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_string(resp).await,
            r#"<p class="text-sm text-red-600" role="alert">Incorrect password</p>"#
        );
    }

    #[tokio::test]
    async fn should_rerender_page_with_preserved_identifier_on_plain_failure() {
        let resp = app(StubVerdict::Reject("Incorrect password"))
            .oneshot(submit(false))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        let html = body_string(resp).await;

        assert!(html.contains(r#"<div class="mt-2" id="password-panel">"#));
        assert!(html.contains(r#"value="jora""#));
        assert!(html.contains("Incorrect password"));
        assert!(!html.contains("hunter2"));
    }

    #[tokio::test]
    async fn should_report_upstream_outage_without_leaking_details() {
        let resp = app(StubVerdict::Outage).oneshot(submit(true)).await.unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let html = body_string(resp).await;
        assert!(html.contains("temporarily unavailable"));
        assert!(!html.contains("status 500"));
    }
}
