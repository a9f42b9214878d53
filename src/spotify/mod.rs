//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API used by playsort:
//! authentication, library and playlist retrieval, enrichment lookups and
//! playlist writes. It is the only layer that talks HTTP; the classifiers in
//! [`crate::classify`] never see a network type.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 PKCE)
//!     ├── Tracks (playlist items, liked songs)
//!     ├── Enrichment (audio features, artist genres)
//!     └── Playlist Operations (find, create, clear, add)
//!          ↓
//! Request helper (retry on 429/502, token refresh)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Rate Limiting
//!
//! Every call goes through [`request::send`]. A `429 Too Many Requests`
//! response is retried after the `Retry-After` delay plus one second, a
//! `502 Bad Gateway` after ten seconds, for at most five attempts in total.
//! A `401 Unauthorized` is surfaced immediately so the user can re-run
//! `playsort auth`.
//!
//! ## Batching
//!
//! Enrichment lookups are batched to the API maxima (100 track ids for audio
//! features, 50 artist ids) and degrade to warnings when a batch fails.
//! Playlist writes are chunked to 100 items per request.

pub mod artists;
pub mod auth;
pub mod features;
pub mod playlist;
pub mod request;
pub mod tracks;
pub mod user;

pub use request::SpotifyError;
