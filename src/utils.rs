use std::{
    cmp::Ordering,
    collections::HashMap,
    io::{self, BufRead, Write},
    time::Duration,
};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{Artist, CulturaEntry, Track, VibeEntry};

/// Scores above this magnitude count as high confidence in the run summary.
pub const HIGH_CONFIDENCE_ABOVE: f64 = 2.0;

const LOCAL_TRACK_PREFIX: &str = "spotify:local:";

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

pub fn progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_message(message.to_string());
    pb.set_style(
        ProgressStyle::with_template("{msg} [{bar:30.blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> "),
    );
    pb
}

/// Asks a yes/no question on stdin; anything but an answer starting with `y` is a no.
pub fn confirm(prompt: &str) -> bool {
    print!("{} (y/N): ", prompt);
    let _ = io::stdout().flush();

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    is_yes(&answer)
}

pub fn is_yes(answer: &str) -> bool {
    answer.trim().to_lowercase().starts_with('y')
}

/// Playlist names for the lyrical and instrumental halves of `source`.
pub fn vibe_playlist_names(source: &str) -> (String, String) {
    (
        format!("{} - 🎤 Lyrical", source),
        format!("{} - 🎵 Instrumental", source),
    )
}

/// Looks up the artists of `track` in track-artist order; failed lookups stay `None`.
pub fn artists_for_track(track: &Track, artists: &HashMap<String, Artist>) -> Vec<Option<Artist>> {
    track
        .artists
        .iter()
        .map(|a| a.id.as_ref().and_then(|id| artists.get(id)).cloned())
        .collect()
}

pub fn track_ids(tracks: &[Track]) -> Vec<String> {
    tracks.iter().filter_map(|t| t.id.clone()).collect()
}

pub fn artist_ids(tracks: &[Track]) -> Vec<String> {
    tracks
        .iter()
        .flat_map(|t| t.artists.iter().filter_map(|a| a.id.clone()))
        .collect()
}

pub fn primary_artist_ids(tracks: &[Track]) -> Vec<String> {
    tracks
        .iter()
        .filter_map(|t| t.primary_artist_id().map(str::to_string))
        .collect()
}

/// Uris that can be written to a playlist; local files cannot.
pub fn writable_uris<'a>(tracks: impl IntoIterator<Item = &'a Track>) -> Vec<String> {
    tracks
        .into_iter()
        .map(|t| t.uri.as_str())
        .filter(|uri| !uri.is_empty() && !uri.starts_with(LOCAL_TRACK_PREFIX))
        .map(str::to_string)
        .collect()
}

/// Highest scoring instrumental entries first.
pub fn top_instrumental(entries: &[VibeEntry], limit: usize) -> Vec<&VibeEntry> {
    let mut picked: Vec<&VibeEntry> = entries.iter().filter(|e| e.result.is_instrumental()).collect();
    picked.sort_by(|a, b| {
        b.result
            .score
            .partial_cmp(&a.result.score)
            .unwrap_or(Ordering::Equal)
    });
    picked.truncate(limit);
    picked
}

/// Lowest scoring lyrical entries below -1 first.
pub fn top_lyrical(entries: &[VibeEntry], limit: usize) -> Vec<&VibeEntry> {
    let mut picked: Vec<&VibeEntry> = entries
        .iter()
        .filter(|e| !e.result.is_instrumental() && e.result.score < -1.0)
        .collect();
    picked.sort_by(|a, b| {
        a.result
            .score
            .partial_cmp(&b.result.score)
            .unwrap_or(Ordering::Equal)
    });
    picked.truncate(limit);
    picked
}

pub fn low_confidence(entries: &[VibeEntry]) -> Vec<&VibeEntry> {
    entries.iter().filter(|e| e.result.low_confidence).collect()
}

/// Percentage of entries whose score magnitude exceeds [`HIGH_CONFIDENCE_ABOVE`].
pub fn high_confidence_share(entries: &[VibeEntry]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }

    let high = entries
        .iter()
        .filter(|e| e.result.score.abs() > HIGH_CONFIDENCE_ABOVE)
        .count();
    Some(high as f64 / entries.len() as f64 * 100.0)
}

pub fn uncertain_origins(entries: &[CulturaEntry]) -> Vec<&CulturaEntry> {
    entries.iter().filter(|e| e.result.uncertain).collect()
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut)
}

/// Number of requests needed to write `len` items in chunks of `size`.
pub fn chunk_count(len: usize, size: usize) -> usize {
    if size == 0 { 0 } else { len.div_ceil(size) }
}
