//! Playlist sorting for Spotify libraries.
//!
//! playsort classifies tracks with two heuristic, table-driven classifiers
//! and writes the results back as playlists:
//!
//! - **vibe** scores a playlist's tracks as instrumental or lyrical from
//!   keywords, regular expressions, audio features, artist genres and duration
//! - **cultura** sorts the liked songs into Indian and international ones from
//!   known artists, language and film keywords, album names and genres
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local OAuth callback server
//! - `classify` - The two classifiers and their rule tables, free of I/O
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - Token and rules file persistence
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use playsort::classify::{Rules, VibeClassifier};
//! use playsort::types::Track;
//!
//! let classifier = VibeClassifier::new(&Rules::default().vibe).unwrap();
//! let track = Track {
//!     name: "Moonlight Sonata (Piano Solo)".to_string(),
//!     ..Default::default()
//! };
//! assert!(classifier.score(&track, None, &[]).is_instrumental());
//! ```

pub mod api;
pub mod classify;
pub mod cli;
pub mod config;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// Prints a progress or status line prefixed with a blue `o`.
///
/// ```
/// info!("Fetching tracks from '{}'...", playlist);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a line prefixed with a green checkmark once a step has finished.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red `!` line and exits with status 1.
///
/// The expansion diverges, so it can stand in for a value in a `match` arm:
///
/// ```
/// let user = match spotify::user::current_user(&mut token_mgr).await {
///     Ok(user) => user,
///     Err(e) => error!("Failed to authenticate with Spotify: {}", e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a yellow `!` line for a recoverable problem, such as a failed
/// enrichment batch or write chunk. Execution continues.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
