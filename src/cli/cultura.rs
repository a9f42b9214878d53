use std::collections::HashMap;

use tabled::Table;

use super::{
    load_rules, load_token_manager,
    sync::{self, ClearMode, Target},
};
use crate::{
    classify::CulturaClassifier,
    error, info, spotify, success,
    types::{Artist, CulturaEntry, CulturaTableRow, Track},
    utils, warning,
};

pub const INDIAN_PLAYLIST: &str = "🌏 Indian Songs";
pub const INTERNATIONAL_PLAYLIST: &str = "🌍 International Songs";

const UNCERTAIN_SHOWN: usize = 10;

pub struct CulturaOptions {
    pub clear: ClearMode,
    pub dry_run: bool,
}

/// Sorts the liked songs into Indian and international playlists.
pub async fn cultura(opts: CulturaOptions) {
    let rules = load_rules().await;
    let classifier = rules.cultura_classifier();

    let mut token_mgr = load_token_manager().await;
    let user = match spotify::user::current_user(&mut token_mgr).await {
        Ok(user) => user,
        Err(e) => error!("Failed to authenticate with Spotify: {}", e),
    };
    info!(
        "Hello {}!",
        user.display_name.as_deref().unwrap_or(user.id.as_str())
    );

    let pb = utils::spinner("Fetching your liked songs...");
    let tracks = match spotify::tracks::saved_tracks(&mut token_mgr, |n| {
        pb.set_message(format!("Fetched {} liked songs so far...", n))
    })
    .await
    {
        Ok(tracks) => tracks,
        Err(e) => {
            pb.finish_and_clear();
            error!("Error fetching liked songs: {}", e)
        }
    };
    pb.finish_and_clear();

    if tracks.is_empty() {
        error!("No liked songs found!");
    }
    success!("Total liked songs: {}", tracks.len());

    let pb = utils::spinner("Fetching artist genres...");
    let artists =
        spotify::artists::several_artists(&mut token_mgr, &utils::primary_artist_ids(&tracks))
            .await;
    pb.finish_and_clear();

    let entries = classify_all(&classifier, tracks, &artists);
    report(&entries);

    if opts.dry_run {
        info!("Dry run, no playlists were changed.");
        return;
    }

    let (indian, international): (Vec<&CulturaEntry>, Vec<&CulturaEntry>) =
        entries.iter().partition(|e| e.result.is_indian());

    let targets = [
        Target {
            name: INDIAN_PLAYLIST,
            description: "Auto-generated playlist containing Indian songs from your liked music"
                .to_string(),
            uris: utils::writable_uris(indian.iter().map(|e| &e.track)),
        },
        Target {
            name: INTERNATIONAL_PLAYLIST,
            description:
                "Auto-generated playlist containing International songs from your liked music"
                    .to_string(),
            uris: utils::writable_uris(international.iter().map(|e| &e.track)),
        },
    ];

    if let Err(e) = sync::write_targets(&mut token_mgr, &user.id, &targets, opts.clear).await {
        error!("Error setting up playlists: {}", e);
    }

    success!("Sorting complete! Check your Spotify playlists:");
    info!("{}: {} songs", INDIAN_PLAYLIST, indian.len());
    info!("{}: {} songs", INTERNATIONAL_PLAYLIST, international.len());
}

fn classify_all(
    classifier: &CulturaClassifier,
    tracks: Vec<Track>,
    artists: &HashMap<String, Artist>,
) -> Vec<CulturaEntry> {
    let pb = utils::progress_bar(tracks.len() as u64, "Classifying");
    let entries = tracks
        .into_iter()
        .map(|track| {
            let genres = track
                .primary_artist_id()
                .and_then(|id| artists.get(id))
                .map(|a| a.genres.as_slice());
            let result = classifier.classify(&track, genres);
            pb.inc(1);
            CulturaEntry { track, result }
        })
        .collect();
    pb.finish_and_clear();
    entries
}

fn report(entries: &[CulturaEntry]) {
    let indian = entries.iter().filter(|e| e.result.is_indian()).count();

    info!("Classification results:");
    info!("🌏 Indian songs: {}", indian);
    info!("🌍 International songs: {}", entries.len() - indian);

    let samples: Vec<&CulturaEntry> = entries
        .iter()
        .filter(|e| e.result.is_indian())
        .take(3)
        .collect();
    if !samples.is_empty() {
        println!("\nSample Indian classifications:\n{}", table(&samples));
    }

    let uncertain = utils::uncertain_origins(entries);
    if !uncertain.is_empty() {
        warning!(
            "{} international songs mention India in their name, please review them manually.",
            uncertain.len()
        );
        let shown: Vec<&CulturaEntry> = uncertain.into_iter().take(UNCERTAIN_SHOWN).collect();
        println!("{}", table(&shown));
    }
}

fn table(entries: &[&CulturaEntry]) -> Table {
    let rows: Vec<CulturaTableRow> = entries
        .iter()
        .map(|e| CulturaTableRow {
            name: utils::truncate(&e.track.name, 40),
            artists: utils::truncate(&e.track.artist_names(), 30),
            signals: e
                .result
                .signals
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join("\n"),
        })
        .collect();
    Table::new(rows)
}
