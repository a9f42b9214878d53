//! # Classification Module
//!
//! Pure, network-free track classification. Two classifiers are provided:
//!
//! - [`VibeClassifier`] - weighted instrumental/lyrical scoring over keywords,
//!   regular expressions, album and artist names, duration, and optional
//!   audio features and artist genres.
//! - [`CulturaClassifier`] - Indian/international classification as a
//!   boolean OR of independent keyword checks.
//!
//! Both are driven by the data in [`rules`]; neither holds mutable state, so
//! tracks can be classified in any order.
//!
//! ```rust,ignore
//! use playsort::classify::{Rules, VibeClassifier};
//!
//! let classifier = VibeClassifier::new(&Rules::default().vibe)?;
//! let result = classifier.score(&track, features.as_ref(), &artists);
//! println!("{} ({:.1})", result.label, result.score);
//! ```

pub mod cultura;
pub mod rules;
pub mod vibe;

pub use cultura::{CulturaClassifier, Origin, OriginResult, Signal};
pub use rules::{
    AudioRules, Bracket, CulturaRules, GenreSet, KeywordSet, PatternSet, Rules, VibeRules,
    Weights,
};
pub use vibe::{Method, REASON_DISPLAY_LIMIT, ScoreResult, VibeClassifier, Vocality};
