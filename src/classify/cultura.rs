//! Indian vs. international classification.
//!
//! Unlike the vibe scorer there are no weights here: five independent checks
//! are evaluated and any hit puts the track into the Indian collection.

use std::fmt;

use super::rules::CulturaRules;
use crate::types::Track;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    Indian,
    International,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Indian => write!(f, "indian"),
            Origin::International => write!(f, "international"),
        }
    }
}

/// A check that fired, carrying the entry that matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    KnownArtist(String),
    Language(String),
    SongKeyword(String),
    Genre(String),
    Album(String),
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::KnownArtist(a) => write!(f, "artist: {}", a),
            Signal::Language(l) => write!(f, "language: {}", l),
            Signal::SongKeyword(k) => write!(f, "keyword: {}", k),
            Signal::Genre(g) => write!(f, "genre: {}", g),
            Signal::Album(k) => write!(f, "album: {}", k),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginResult {
    pub label: Origin,
    pub signals: Vec<Signal>,
    /// International result whose name still hints at an Indian release.
    pub uncertain: bool,
}

impl OriginResult {
    pub fn is_indian(&self) -> bool {
        self.label == Origin::Indian
    }
}

#[derive(Debug, Clone)]
pub struct CulturaClassifier {
    rules: CulturaRules,
}

impl CulturaClassifier {
    pub fn new(rules: &CulturaRules) -> Self {
        Self {
            rules: rules.normalized(),
        }
    }

    pub fn rules(&self) -> &CulturaRules {
        &self.rules
    }

    /// Classifies one track. `primary_genres` are the genre tags of the
    /// track's first artist, `None` when the lookup was not possible.
    pub fn classify(&self, track: &Track, primary_genres: Option<&[String]>) -> OriginResult {
        let rules = &self.rules;
        let name = track.name.to_lowercase();
        let mut signals = Vec::new();

        let artist_match = track.artists.iter().find_map(|artist| {
            let artist_name = artist.name.to_lowercase();
            first_contained(&rules.known_artists, &artist_name)
        });
        if let Some(known) = artist_match {
            signals.push(Signal::KnownArtist(known.to_string()));
        }

        if let Some(lang) = first_contained(&rules.language_keywords, &name) {
            signals.push(Signal::Language(lang.to_string()));
        }

        if let Some(keyword) = first_contained(&rules.song_keywords, &name) {
            signals.push(Signal::SongKeyword(keyword.to_string()));
        }

        let genre_match = primary_genres.unwrap_or_default().iter().find_map(|genre| {
            let genre = genre.to_lowercase();
            first_contained(&rules.genre_keywords, &genre).map(|_| genre)
        });
        if let Some(genre) = genre_match {
            signals.push(Signal::Genre(genre));
        }

        if let Some(album) = &track.album {
            let album_name = album.name.to_lowercase();
            let hit = first_contained(&rules.language_keywords, &album_name)
                .or_else(|| first_contained(&rules.song_keywords, &album_name));
            if let Some(keyword) = hit {
                signals.push(Signal::Album(keyword.to_string()));
            }
        }

        let label = if signals.is_empty() {
            Origin::International
        } else {
            Origin::Indian
        };
        let uncertain = label == Origin::International
            && first_contained(&rules.uncertain_hints, &name).is_some();

        OriginResult {
            label,
            signals,
            uncertain,
        }
    }
}

fn first_contained<'a>(needles: &'a [String], haystack: &str) -> Option<&'a str> {
    needles
        .iter()
        .map(String::as_str)
        .find(|needle| haystack.contains(needle))
}
