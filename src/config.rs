//! Configuration management for playsort.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify API credentials, server settings, and the
//! location of the user rules file.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (Spotify endpoints and scope)

use std::{env, path::PathBuf};

use crate::error;

pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SPOTIFY_SCOPE: &str =
    "user-library-read playlist-read-private playlist-modify-public playlist-modify-private";

/// Returns the application directory inside the platform local data directory.
///
/// - Linux: `~/.local/share/playsort`
/// - macOS: `~/Library/Application Support/playsort`
/// - Windows: `%LOCALAPPDATA%/playsort`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("playsort");
    path
}

/// Loads environment variables from the `.env` file in the local data directory.
///
/// Creates the directory if needed. A missing `.env` file is not an error, the
/// values may come from the process environment instead.
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or an existing
/// `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let dir = data_dir();
    async_fs::create_dir_all(&dir)
        .await
        .map_err(|e| e.to_string())?;

    let path = dir.join(".env");
    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Returns the bind address for the local OAuth callback server.
///
/// Terminates the program if `SERVER_ADDRESS` is not set.
pub fn server_addr() -> String {
    required("SERVER_ADDRESS")
}

/// Returns the Spotify application client ID.
///
/// Terminates the program if `SPOTIFY_API_AUTH_CLIENT_ID` is not set.
pub fn spotify_client_id() -> String {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Returns the OAuth redirect URI. It must match the URI registered with Spotify.
pub fn spotify_redirect_uri() -> String {
    required("SPOTIFY_API_REDIRECT_URI")
}

pub fn spotify_scope() -> String {
    optional("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SPOTIFY_SCOPE)
}

pub fn spotify_apiauth_url() -> String {
    optional("SPOTIFY_API_AUTH_URL", DEFAULT_SPOTIFY_AUTH_URL)
}

pub fn spotify_apiurl() -> String {
    optional("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)
}

pub fn spotify_apitoken_url() -> String {
    optional("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL)
}

fn required(key: &str) -> String {
    match env::var(key) {
        Ok(value) => value,
        Err(_) => error!(
            "{} must be set. Add it to {}",
            key,
            data_dir().join(".env").display()
        ),
    }
}

fn optional(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}
