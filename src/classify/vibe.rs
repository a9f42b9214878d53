//! Instrumental vs. lyrical scoring.
//!
//! The scorer is a sum of independent, table-driven checks over a track's
//! name, album, artists and duration, optionally extended with audio
//! features and artist genres. Positive totals lean instrumental, negative
//! totals lean lyrical. The label is decided by a strict threshold on the
//! total; confidence and the low-confidence flag are derived afterwards and
//! never feed back into the label.

use std::fmt;

use super::rules::{AudioRules, CompiledPatterns, GenreSet, VibeRules};
use crate::types::{Artist, AudioFeatures, Track};

/// Number of reasons shown per track in reports.
pub const REASON_DISPLAY_LIMIT: usize = 3;

const KEYWORDS_SHOWN: usize = 2;
const GENRES_SHOWN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vocality {
    Instrumental,
    Lyrical,
}

impl fmt::Display for Vocality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vocality::Instrumental => write!(f, "instrumental"),
            Vocality::Lyrical => write!(f, "lyrical"),
        }
    }
}

/// Independent evidence categories. Each counts once towards the method boost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Method {
    Keyword,
    Pattern,
    Audio,
    Genre,
    Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreResult {
    pub score: f64,
    pub label: Vocality,
    /// Human readable reasons in evaluation order.
    pub reasons: Vec<String>,
    /// Categories that contributed at least one reason, in first-seen order.
    pub methods: Vec<Method>,
    pub confidence: f64,
    pub low_confidence: bool,
}

impl ScoreResult {
    pub fn is_instrumental(&self) -> bool {
        self.label == Vocality::Instrumental
    }

    pub fn top_reasons(&self, limit: usize) -> &[String] {
        &self.reasons[..limit.min(self.reasons.len())]
    }
}

/// Label decision: strictly above the threshold is instrumental.
pub fn decide(score: f64, threshold: f64) -> Vocality {
    if score > threshold {
        Vocality::Instrumental
    } else {
        Vocality::Lyrical
    }
}

#[derive(Default)]
struct Tally {
    score: f64,
    reasons: Vec<String>,
    methods: Vec<Method>,
}

impl Tally {
    fn add(&mut self, method: Method, delta: f64, reason: String) {
        self.score += delta;
        self.reasons.push(reason);
        if !self.methods.contains(&method) {
            self.methods.push(method);
        }
    }

    fn merge(&mut self, method: Method, (delta, reasons): (f64, Vec<String>)) {
        if reasons.is_empty() {
            return;
        }
        self.score += delta;
        self.reasons.extend(reasons);
        if !self.methods.contains(&method) {
            self.methods.push(method);
        }
    }
}

/// Instrumental/lyrical classifier with its pattern tables compiled once.
#[derive(Debug, Clone)]
pub struct VibeClassifier {
    rules: VibeRules,
    instrumental_patterns: CompiledPatterns,
    vocal_patterns: CompiledPatterns,
}

impl VibeClassifier {
    pub fn new(rules: &VibeRules) -> Result<Self, regex::Error> {
        let rules = rules.normalized();
        let instrumental_patterns = rules.instrumental_patterns.compile()?;
        let vocal_patterns = rules.vocal_patterns.compile()?;

        Ok(Self {
            rules,
            instrumental_patterns,
            vocal_patterns,
        })
    }

    pub fn rules(&self) -> &VibeRules {
        &self.rules
    }

    /// Scores one track.
    ///
    /// `artists` holds the looked-up artist objects in track-artist order, with
    /// `None` for lookups that failed. Missing features or artists contribute
    /// nothing; this function never fails.
    pub fn score(
        &self,
        track: &Track,
        features: Option<&AudioFeatures>,
        artists: &[Option<Artist>],
    ) -> ScoreResult {
        let rules = &self.rules;
        let weights = &rules.weights;
        let name = track.name.to_lowercase();
        let album = track
            .album
            .as_ref()
            .map(|a| a.name.to_lowercase())
            .unwrap_or_default();

        let mut tally = Tally::default();

        let strong = rules.strong_instrumental.matches(&name);
        if !strong.is_empty() {
            tally.add(
                Method::Keyword,
                rules.strong_instrumental.weight,
                format!(
                    "Strong instrumental keywords: {}",
                    shown(&strong, KEYWORDS_SHOWN)
                ),
            );
        }

        let medium = rules.medium_instrumental.matches(&name);
        if !medium.is_empty() {
            tally.add(
                Method::Keyword,
                rules.medium_instrumental.weight,
                format!(
                    "Medium instrumental keywords: {}",
                    shown(&medium, KEYWORDS_SHOWN)
                ),
            );
        }

        let vocal = rules.strong_vocal.matches(&name);
        let strong_vocal_found = !vocal.is_empty();
        if strong_vocal_found {
            tally.add(
                Method::Keyword,
                rules.strong_vocal.weight,
                format!("Strong vocal keywords: {}", shown(&vocal, KEYWORDS_SHOWN)),
            );
        }

        self.score_patterns(&mut tally, &self.instrumental_patterns, &name, "instrumental");
        self.score_patterns(&mut tally, &self.vocal_patterns, &name, "vocal");

        if rules.strong_instrumental.any_in(&album) {
            tally.add(
                Method::Keyword,
                weights.album_bonus,
                "Album name suggests instrumental".to_string(),
            );
        }

        for artist in &track.artists {
            let artist_name = artist.name.to_lowercase();
            if rules.instrumental_artist_types.any_in(&artist_name) {
                tally.add(
                    Method::Keyword,
                    rules.instrumental_artist_types.weight,
                    format!("Artist type suggests instrumental: {}", artist_name),
                );
            }
        }

        if let Some(features) = features {
            tally.merge(Method::Audio, audio_feature_score(features, &rules.audio));
        }

        tally.merge(
            Method::Genre,
            genre_score(artists, &rules.instrumental_genres, &rules.vocal_genres),
        );

        let minutes = track.duration_ms as f64 / 60_000.0;
        if track.duration_ms < weights.short_track_ms {
            tally.add(
                Method::Duration,
                weights.short_track_bonus,
                format!("Very short duration ({:.1}min) - likely intro/outro", minutes),
            );
        } else if track.duration_ms > weights.long_track_ms && !strong_vocal_found {
            tally.add(
                Method::Duration,
                weights.long_track_bonus,
                format!("Long duration ({:.1}min) without vocal indicators", minutes),
            );
        }

        let opening = weights.opening_keyword.as_str();
        if track.track_number == Some(1) && !opening.is_empty() && name.contains(opening) {
            tally.add(
                Method::Keyword,
                weights.opening_intro_bonus,
                format!("First track with '{}' in name", opening),
            );
        }

        let mut confidence = tally.score.abs();
        if tally.methods.len() >= weights.method_boost_min {
            confidence += weights.method_boost;
        }

        ScoreResult {
            score: tally.score,
            label: decide(tally.score, weights.instrumental_threshold),
            low_confidence: tally.score.abs() < weights.low_confidence_below,
            confidence,
            reasons: tally.reasons,
            methods: tally.methods,
        }
    }

    fn score_patterns(&self, tally: &mut Tally, patterns: &CompiledPatterns, name: &str, kind: &str) {
        if self.rules.exhaustive_patterns {
            let hits = patterns.count_matches(name);
            if hits > 0 {
                tally.add(
                    Method::Pattern,
                    patterns.weight * hits as f64,
                    format!("Matches {} {} patterns", hits, kind),
                );
            }
        } else if patterns.first_match(name).is_some() {
            tally.add(Method::Pattern, patterns.weight, format!("Matches {} pattern", kind));
        }
    }
}

/// Sub-score from audio analysis descriptors.
pub fn audio_feature_score(features: &AudioFeatures, rules: &AudioRules) -> (f64, Vec<String>) {
    let mut score = 0.0;
    let mut reasons = Vec::new();

    let speechiness = features.speechiness;
    if speechiness < rules.speechiness_very_low.threshold {
        score += rules.speechiness_very_low.delta;
        reasons.push(format!(
            "Very low speechiness ({:.3}) - likely instrumental",
            speechiness
        ));
    } else if speechiness < rules.speechiness_low.threshold {
        score += rules.speechiness_low.delta;
        reasons.push(format!(
            "Low speechiness ({:.3}) - possibly instrumental",
            speechiness
        ));
    } else if speechiness > rules.speechiness_high.threshold {
        score += rules.speechiness_high.delta;
        reasons.push(format!(
            "High speechiness ({:.3}) - likely has vocals",
            speechiness
        ));
    } else if speechiness > rules.speechiness_medium.threshold {
        score += rules.speechiness_medium.delta;
        reasons.push(format!(
            "Medium speechiness ({:.3}) - possibly has vocals",
            speechiness
        ));
    }

    let instrumentalness = features.instrumentalness;
    if instrumentalness > rules.instrumentalness_high.threshold {
        score += rules.instrumentalness_high.delta;
        reasons.push(format!(
            "High instrumentalness ({:.3}) - strong instrumental indicator",
            instrumentalness
        ));
    } else if instrumentalness > rules.instrumentalness_medium.threshold {
        score += rules.instrumentalness_medium.delta;
        reasons.push(format!(
            "Medium instrumentalness ({:.3}) - likely instrumental",
            instrumentalness
        ));
    } else if instrumentalness < rules.instrumentalness_low.threshold {
        score += rules.instrumentalness_low.delta;
        reasons.push(format!(
            "Low instrumentalness ({:.3}) - likely has vocals",
            instrumentalness
        ));
    }

    let energy = features.energy;
    if energy < rules.low_energy.threshold {
        score += rules.low_energy.delta;
        reasons.push(format!(
            "Low energy ({:.2}) - classical/ambient pattern",
            energy
        ));
    }

    if features.danceability < rules.calm_danceability_below && energy < rules.calm_energy_below {
        score += rules.calm_bonus;
        reasons.push("Low danceability + energy - classical/meditative pattern".to_string());
    }

    (score, reasons)
}

/// Sub-score from the genre tags of all looked-up artists.
///
/// Every tag is weighed on its own, so a tag can count as both instrumental
/// and vocal, and a genre shared by two artists counts twice.
pub fn genre_score(
    artists: &[Option<Artist>],
    instrumental: &GenreSet,
    vocal: &GenreSet,
) -> (f64, Vec<String>) {
    let genres: Vec<String> = artists
        .iter()
        .flatten()
        .flat_map(|a| a.genres.iter().map(|g| g.to_lowercase()))
        .collect();

    let mut score = 0.0;
    let mut reasons = Vec::new();

    let instrumental_matches: Vec<&str> = genres
        .iter()
        .map(String::as_str)
        .filter(|g| instrumental.any_in(g))
        .collect();
    if !instrumental_matches.is_empty() {
        score += instrumental_matches.len() as f64 * instrumental.weight;
        reasons.push(format!(
            "Instrumental genres found: {}...",
            shown(&instrumental_matches, GENRES_SHOWN)
        ));
    }

    let vocal_matches: Vec<&str> = genres
        .iter()
        .map(String::as_str)
        .filter(|g| vocal.any_in(g))
        .collect();
    if !vocal_matches.is_empty() {
        score += vocal_matches.len() as f64 * vocal.weight;
        reasons.push(format!(
            "Vocal genres found: {}...",
            shown(&vocal_matches, GENRES_SHOWN)
        ));
    }

    (score, reasons)
}

fn shown(items: &[&str], limit: usize) -> String {
    items
        .iter()
        .take(limit)
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
}
