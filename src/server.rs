use std::sync::Arc;

use axum::{Router, routing::get};
use tokio::sync::Mutex;

use crate::{
    Res,
    api::{self, AppState, CallbackState},
    config::Config,
    types::PkceToken,
};

/// Routes of the web app.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::index))
        .route("/callback", get(api::callback))
        .route("/logout", get(api::logout))
        .route("/playlists", get(api::playlists))
        .route(
            "/playlist/{id}",
            get(api::view_playlist).post(api::submit_playlist),
        )
        .route("/health", get(api::health))
        .with_state(state)
}

/// Serves the web app on the configured address until the process ends.
pub async fn serve(state: AppState) -> Res<()> {
    let addr = state.config.server_address;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("listening on {}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Serves only the OAuth callback, for `plshuffle auth`.
pub async fn start_callback_server(
    config: Arc<Config>,
    pkce: Arc<Mutex<Option<PkceToken>>>,
) -> Res<()> {
    let addr = config.server_address;
    let app = Router::new()
        .route("/callback", get(api::cli_callback))
        .with_state(CallbackState { config, pkce });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
