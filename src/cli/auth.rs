use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    config::Config, error, info, management::TokenManager, spotify, success, warning,
};

/// Runs the browser login and caches the token for later commands.
pub async fn auth(config: Arc<Config>) {
    let shared_state = Arc::new(Mutex::new(None));
    info!("Waiting for authorization in the browser...");

    match spotify::auth::authorize_interactive(config, shared_state).await {
        Ok(Some(token)) => {
            let token_manager = TokenManager::new(token);
            if let Err(e) = token_manager.persist().await {
                error!("Failed to save token to cache: {}", e);
            }
            success!("Authentication successful!");
        }
        Ok(None) => error!("Authentication failed or timed out."),
        Err(e) => error!("Authentication failed: {}", e),
    }
}

/// Loads the cached token, refreshing and re-caching it when it expired.
pub(crate) async fn access_token(config: &Config) -> String {
    let mut token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => error!(
            "Failed to load token. Please run plshuffle auth\n Error: {}",
            e
        ),
    };

    match token_mgr.get_valid_token(config).await {
        Ok((token, refreshed)) => {
            if refreshed {
                if let Err(e) = token_mgr.persist().await {
                    warning!("Failed to update token cache: {}", e);
                }
            }
            token
        }
        Err(e) => error!(
            "Failed to refresh token. Please run plshuffle auth\n Error: {}",
            e
        ),
    }
}
