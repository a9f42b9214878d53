//! # CLI Module
//!
//! User-facing commands of playsort. Each command loads what it needs (rule
//! tables, the cached token), talks to Spotify through [`crate::spotify`],
//! runs one of the classifiers from [`crate::classify`] and reports back with
//! the colored output macros, spinners and tables.
//!
//! ## Commands
//!
//! - [`auth`] - Runs the OAuth 2.0 PKCE flow and caches the token
//! - [`vibe`] - Splits a playlist into lyrical and instrumental playlists
//! - [`cultura`] - Sorts liked songs into Indian and international playlists
//! - [`rules`] - Shows the active rule tables or exports the built-in ones
//!
//! ## Layers
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Classification (pure scoring, no I/O)
//!     ↓
//! Management Layer (token and rules files)
//!     ↓
//! Spotify Layer (HTTP, retries, batching)
//! ```
//!
//! Fatal problems (no token, unknown playlist, invalid rules file) end the
//! command through [`crate::error!`]. Failures of single enrichment batches
//! or write chunks are reported as warnings and the run continues.
//!
//! ## Usage
//!
//! ```bash
//! playsort auth
//! playsort vibe --playlist "Road Trip" --dry-run
//! playsort vibe --playlist "Road Trip" --clear
//! playsort cultura --keep
//! playsort rules --export
//! ```

mod auth;
mod cultura;
mod rules;
mod sync;
mod vibe;

pub use auth::auth;
pub use cultura::{CulturaOptions, INDIAN_PLAYLIST, INTERNATIONAL_PLAYLIST, cultura};
pub use rules::{rule_rows, rules};
pub use sync::{ClearMode, Target};
pub use vibe::{VibeOptions, vibe};

use crate::{
    error,
    management::{RulesManager, TokenManager},
};

/// Loads the user rules file or the built-in tables; an unreadable file is fatal.
pub async fn load_rules() -> RulesManager {
    match RulesManager::load().await {
        Ok(manager) => manager,
        Err(e) => error!("{}", e),
    }
}

pub async fn load_token_manager() -> TokenManager {
    match TokenManager::load().await {
        Ok(mgr) => mgr,
        Err(e) => error!(
            "Failed to load token. Please run `playsort auth` first. Err: {}",
            e
        ),
    }
}
