use crate::{config::Config, types::User};

use super::{SpotifyError, get_api};

/// Profile of the user the token belongs to.
pub async fn current_user(config: &Config, token: &str) -> Result<User, SpotifyError> {
    get_api(config, "me", token).await
}
