//! Playlist shuffler for Spotify
//!
//! Copies a Spotify playlist into a new playlist whose tracks are in a
//! uniformly random order, so it can be played front to back without
//! Spotify's own shuffle.
//!
//! # Modules
//!
//! - `api` - HTTP handlers of the web app and the CLI callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration from environment variables and `.env` files
//! - `management` - Token handling, sessions and the per-workflow cache
//! - `server` - Routers and listeners
//! - `shuffle` - Permutations, filtering and batching
//! - `spotify` - Spotify Web API client
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers

pub mod api;
pub mod cli;
pub mod config;
pub mod management;
pub mod server;
pub mod shuffle;
pub mod spotify;
pub mod types;
pub mod utils;

/// Result alias for top-level flows that only report errors.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints a status line with a blue "o" marker to stdout.
///
/// ```ignore
/// info!("Fetched {} tracks", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a status line with a green checkmark to stdout.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red "!" line to stderr and exits with status 1.
///
/// Only for conditions the command line cannot continue from. Library code
/// that runs inside the web server returns errors instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a yellow "!" line to stderr.
///
/// ```ignore
/// warning!("{} tracks are unavailable and will be skipped", skipped);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
