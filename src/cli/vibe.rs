use std::collections::HashMap;

use tabled::Table;

use super::{
    load_rules, load_token_manager,
    sync::{self, ClearMode, Target},
};
use crate::{
    classify::{REASON_DISPLAY_LIMIT, VibeClassifier},
    error, info, spotify, success,
    types::{Artist, AudioFeatures, Track, VibeEntry, VibeTableRow},
    utils, warning,
};

const SAMPLE_SIZE: usize = 3;
const LOW_CONFIDENCE_SHOWN: usize = 5;

pub struct VibeOptions {
    pub playlist: String,
    pub clear: ClearMode,
    pub dry_run: bool,
    pub enrich: bool,
}

/// Splits a playlist into lyrical and instrumental playlists.
///
/// Fetches the source playlist, enriches its tracks with audio features and
/// artist genres (unless disabled), scores every track, prints a summary and
/// writes both halves back to `<source> - 🎤 Lyrical` and
/// `<source> - 🎵 Instrumental`. With `dry_run` nothing is written.
pub async fn vibe(opts: VibeOptions) {
    let rules = load_rules().await;
    let classifier = match rules.vibe_classifier() {
        Ok(c) => c,
        Err(e) => error!("{}", e),
    };

    let mut token_mgr = load_token_manager().await;
    let user = match spotify::user::current_user(&mut token_mgr).await {
        Ok(user) => user,
        Err(e) => error!("Failed to authenticate with Spotify: {}", e),
    };
    info!(
        "Hello {}!",
        user.display_name.as_deref().unwrap_or(user.id.as_str())
    );

    info!("Fetching tracks from '{}'...", opts.playlist);
    let source = match spotify::playlist::find_by_name(&mut token_mgr, &opts.playlist).await {
        Ok(Some(p)) => p,
        Ok(None) => error!("Playlist '{}' not found!", opts.playlist),
        Err(e) => error!("Error fetching playlists: {}", e),
    };

    let pb = utils::spinner("Fetching playlist tracks...");
    let tracks = match spotify::tracks::playlist_tracks(&mut token_mgr, &source.id, |n| {
        pb.set_message(format!("Fetched {} tracks so far...", n))
    })
    .await
    {
        Ok(tracks) => tracks,
        Err(e) => {
            pb.finish_and_clear();
            error!("Error fetching playlist tracks: {}", e)
        }
    };
    pb.finish_and_clear();

    if tracks.is_empty() {
        error!("No tracks found in '{}'!", opts.playlist);
    }
    success!("Total tracks in playlist: {}", tracks.len());

    let (features, artists) = if opts.enrich {
        let pb = utils::spinner("Fetching audio features...");
        let features =
            spotify::features::audio_features(&mut token_mgr, &utils::track_ids(&tracks)).await;
        pb.set_message("Fetching artist information...");
        let artists =
            spotify::artists::several_artists(&mut token_mgr, &utils::artist_ids(&tracks)).await;
        pb.finish_and_clear();
        success!("Got audio features for {} tracks", features.len());
        success!("Got artist info for {} artists", artists.len());
        (features, artists)
    } else {
        (HashMap::new(), HashMap::new())
    };

    let entries = classify_all(&classifier, tracks, &features, &artists);
    report(&entries);

    if opts.dry_run {
        info!("Dry run, no playlists were changed.");
        return;
    }

    let (lyrical_name, instrumental_name) = utils::vibe_playlist_names(&opts.playlist);
    let (instrumental, lyrical): (Vec<&VibeEntry>, Vec<&VibeEntry>) =
        entries.iter().partition(|e| e.result.is_instrumental());

    let targets = [
        Target {
            name: &lyrical_name,
            description: format!("Lyrical songs from {} (auto-classified)", opts.playlist),
            uris: utils::writable_uris(lyrical.iter().map(|e| &e.track)),
        },
        Target {
            name: &instrumental_name,
            description: format!("Instrumental songs from {} (auto-classified)", opts.playlist),
            uris: utils::writable_uris(instrumental.iter().map(|e| &e.track)),
        },
    ];

    if let Err(e) = sync::write_targets(&mut token_mgr, &user.id, &targets, opts.clear).await {
        error!("Error setting up playlists: {}", e);
    }

    success!("Separation complete! Check your Spotify playlists:");
    info!("🎤 {}: {} songs", lyrical_name, lyrical.len());
    info!("🎵 {}: {} songs", instrumental_name, instrumental.len());

    let uncertain = utils::low_confidence(&entries).len();
    if uncertain > 0 {
        warning!(
            "{} tracks had low confidence scores. Consider reviewing these manually.",
            uncertain
        );
    }
}

fn classify_all(
    classifier: &VibeClassifier,
    tracks: Vec<Track>,
    features: &HashMap<String, AudioFeatures>,
    artists: &HashMap<String, Artist>,
) -> Vec<VibeEntry> {
    let pb = utils::progress_bar(tracks.len() as u64, "Classifying");
    let entries = tracks
        .into_iter()
        .map(|track| {
            let track_features = track.id.as_ref().and_then(|id| features.get(id));
            let track_artists = utils::artists_for_track(&track, artists);
            let result = classifier.score(&track, track_features, &track_artists);
            pb.inc(1);
            VibeEntry { track, result }
        })
        .collect();
    pb.finish_and_clear();
    entries
}

fn report(entries: &[VibeEntry]) {
    let instrumental = entries.iter().filter(|e| e.result.is_instrumental()).count();
    let uncertain = utils::low_confidence(entries);

    info!("Classification results:");
    info!("🎤 Lyrical tracks: {}", entries.len() - instrumental);
    info!("🎵 Instrumental tracks: {}", instrumental);
    info!("❓ Low confidence classifications: {}", uncertain.len());

    let samples = utils::top_instrumental(entries, SAMPLE_SIZE);
    if !samples.is_empty() {
        println!("\nSample instrumental classifications:\n{}", table(&samples));
    }

    let samples = utils::top_lyrical(entries, SAMPLE_SIZE);
    if !samples.is_empty() {
        println!("\nSample lyrical classifications:\n{}", table(&samples));
    }

    if !uncertain.is_empty() {
        let shown: Vec<&VibeEntry> = uncertain.into_iter().take(LOW_CONFIDENCE_SHOWN).collect();
        println!(
            "\nLow confidence classifications (please review manually):\n{}",
            table(&shown)
        );
    }

    if let Some(share) = utils::high_confidence_share(entries) {
        info!(
            "Estimated accuracy: {:.1}% of classifications are high confidence",
            share
        );
    }
}

fn table(entries: &[&VibeEntry]) -> Table {
    let rows: Vec<VibeTableRow> = entries
        .iter()
        .map(|e| VibeTableRow {
            name: utils::truncate(&e.track.name, 40),
            artists: utils::truncate(&e.track.artist_names(), 30),
            score: format!("{:.1}", e.result.score),
            reasons: e.result.top_reasons(REASON_DISPLAY_LIMIT).join("\n"),
        })
        .collect();
    Table::new(rows)
}
