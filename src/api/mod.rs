//! # API Module
//!
//! HTTP endpoints served by the short-lived local server that completes the
//! OAuth 2.0 PKCE flow started by `playsort auth`.
//!
//! - [`callback`] - receives the authorization code from Spotify's
//!   authorization server and exchanges it, together with the stored code
//!   verifier, for an access token.
//! - [`health`] - reports status, name and version; useful to check that the
//!   configured `SERVER_ADDRESS` is reachable before authorizing.
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use playsort::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
