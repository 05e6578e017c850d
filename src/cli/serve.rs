use std::time::Duration;

use crate::{api::AppState, config::Config, error, info, server, warning};

/// Runs the web app; with `open` the browser is pointed at it once the
/// listener is up.
pub async fn serve(config: Config, open: bool) {
    let url = config.server_url();
    if !config.redirect_uri.starts_with(&url) {
        warning!(
            "Redirect URI {} does not point at {}; logins will not come back here.",
            config.redirect_uri,
            url
        );
    }

    let state = AppState::new(config);
    info!("Serving on {}", url);

    if open {
        let url = url.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(300)).await;
            if webbrowser::open(&url).is_err() {
                warning!("Failed to open browser. Please navigate to {}", url);
            }
        });
    }

    if let Err(e) = server::serve(state).await {
        error!("Server stopped: {}", e);
    }
}
