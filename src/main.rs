use log::info;
use tower_http::trace::TraceLayer;

use signin_service::integration::Config;
use signin_service::state::AppState;

#[tokio::main]
async fn main() {
    let cfg = Config::default();
    let state = AppState::init(&cfg).expect("PROVIDERS must be a valid catalog");

    let app = signin_service::app(state).layer(TraceLayer::new_for_http());

    let addr = cfg.env.addr();
    info!("Serving the login screen on {addr}");

    match cfg.env.ssl_config() {
        Some(ssl) => {
            axum_server::bind_openssl(addr, ssl)
                .serve(app.into_make_service())
                .await
        }
        None => {
            axum_server::bind(addr)
                .serve(app.into_make_service())
                .await
        }
    }
    .expect("server stopped");
}
