//! # CLI Module
//!
//! Command-line entry points. Each command reports progress with the crate's
//! status macros and exits through `error!` when it cannot continue.
//!
//! - [`auth`] - authorize once and cache the token
//! - [`list_playlists`] - show the user's playlists
//! - [`shuffle`] - write a shuffled copy of a playlist
//! - [`serve`] - run the web app
//!
//! ```bash
//! plshuffle auth
//! plshuffle playlists --search road
//! plshuffle shuffle 37i9dQZF1DXcBWIGoYBM5M --name "Road trip (shuffled)"
//! plshuffle serve --open
//! ```

mod auth;
mod playlists;
mod serve;
mod shuffle;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub use auth::auth;
pub use playlists::list_playlists;
pub use serve::serve;
pub use shuffle::shuffle;

pub(crate) fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
