use std::collections::HashMap;

use playsort::cli::ClearMode;
use playsort::classify::{Origin, OriginResult, ScoreResult, Signal, Vocality};
use playsort::spotify::artists::unique_in_order;
use playsort::spotify::tracks::valid_tracks;
use playsort::types::{Artist, CulturaEntry, Track, TrackArtist, TrackItem, VibeEntry};
use playsort::utils::*;

// Helper function to create a test track
fn create_test_track(id: &str, name: &str, artist_ids: &[&str]) -> Track {
    Track {
        id: Some(id.to_string()),
        name: name.to_string(),
        uri: format!("spotify:track:{}", id),
        artists: artist_ids
            .iter()
            .map(|a| TrackArtist {
                id: Some(a.to_string()),
                name: format!("Artist {}", a),
            })
            .collect(),
        album: None,
        duration_ms: 180_000,
        track_number: None,
    }
}

// Helper function to create a scored entry
fn create_test_entry(id: &str, score: f64, low_confidence: bool) -> VibeEntry {
    let label = if score > 1.5 {
        Vocality::Instrumental
    } else {
        Vocality::Lyrical
    };
    VibeEntry {
        track: create_test_track(id, &format!("Track {}", id), &[]),
        result: ScoreResult {
            score,
            label,
            reasons: Vec::new(),
            methods: Vec::new(),
            confidence: score.abs(),
            low_confidence,
        },
    }
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // SHA-256 digest is 32 bytes, 43 characters unpadded
    assert_eq!(challenge.len(), 43);

    // Should be deterministic - same input produces same output
    assert_eq!(challenge, generate_code_challenge(verifier));
    assert_ne!(challenge, generate_code_challenge("different_verifier"));

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_is_yes() {
    assert!(is_yes("y"));
    assert!(is_yes("Yes\n"));
    assert!(is_yes("  YEP "));
    assert!(!is_yes("n"));
    assert!(!is_yes(""));
    assert!(!is_yes("maybe"));
}

#[test]
fn test_clear_mode_from_flags() {
    assert_eq!(ClearMode::from_flags(true, false), ClearMode::Clear);
    assert_eq!(ClearMode::from_flags(false, true), ClearMode::Keep);
    assert_eq!(ClearMode::from_flags(false, false), ClearMode::Ask);
}

#[test]
fn test_vibe_playlist_names() {
    let (lyrical, instrumental) = vibe_playlist_names("Road Trip");

    assert_eq!(lyrical, "Road Trip - 🎤 Lyrical");
    assert_eq!(instrumental, "Road Trip - 🎵 Instrumental");
}

#[test]
fn test_artists_for_track_keeps_order_and_gaps() {
    let track = create_test_track("t1", "Song", &["a2", "missing", "a1"]);
    let mut artists = HashMap::new();
    for id in ["a1", "a2"] {
        artists.insert(
            id.to_string(),
            Artist {
                id: id.to_string(),
                name: id.to_string(),
                genres: vec!["ambient".to_string()],
            },
        );
    }

    let looked_up = artists_for_track(&track, &artists);

    assert_eq!(looked_up.len(), 3);
    assert_eq!(looked_up[0].as_ref().map(|a| a.id.as_str()), Some("a2"));
    assert!(looked_up[1].is_none());
    assert_eq!(looked_up[2].as_ref().map(|a| a.id.as_str()), Some("a1"));
}

#[test]
fn test_id_collection() {
    let mut local = create_test_track("local", "Local File", &[]);
    local.id = None;
    local.artists.push(TrackArtist {
        id: None,
        name: "Me".to_string(),
    });
    let tracks = vec![
        create_test_track("t1", "One", &["a1", "a2"]),
        local,
        create_test_track("t2", "Two", &["a2"]),
    ];

    assert_eq!(track_ids(&tracks), vec!["t1", "t2"]);
    assert_eq!(artist_ids(&tracks), vec!["a1", "a2", "a2"]);
    assert_eq!(primary_artist_ids(&tracks), vec!["a1", "a2"]);
}

#[test]
fn test_writable_uris_skip_local_files() {
    let mut local = create_test_track("x", "Local", &[]);
    local.uri = "spotify:local:Me:Album:Song:200".to_string();
    let mut empty = create_test_track("y", "Empty", &[]);
    empty.uri = String::new();
    let tracks = vec![create_test_track("t1", "One", &[]), local, empty];

    assert_eq!(writable_uris(&tracks), vec!["spotify:track:t1"]);
}

#[test]
fn test_removable_uris_from_playlist_page() {
    let json = r#"{
        "items": [
            { "track": {
                "id": "4iV5W9uYEdYUVa79Axb7Rh",
                "name": "Tum Hi Ho",
                "uri": "spotify:track:4iV5W9uYEdYUVa79Axb7Rh",
                "artists": [{ "id": "4YRxDV8wJFPHPTeXepOstw", "name": "Arijit Singh" }]
            } },
            { "track": {
                "id": null,
                "name": "Home Recording",
                "uri": "spotify:local:Me:Demos:Home+Recording:183",
                "artists": [{ "id": null, "name": "Me" }]
            } },
            { "track": null },
            { "track": {
                "id": "0VjIjW4GlUZAMYd2vXMi3b",
                "name": "Blinding Lights",
                "uri": "spotify:track:0VjIjW4GlUZAMYd2vXMi3b",
                "artists": [{ "id": "1Xyo4u8uXC1ZmMpatF05PJ", "name": "The Weeknd" }]
            } }
        ],
        "next": null,
        "total": 4
    }"#;

    let page: playsort::types::Paging<TrackItem> = serde_json::from_str(json).unwrap();
    let tracks = valid_tracks(page.items);

    assert_eq!(tracks.len(), 3);
    assert_eq!(
        writable_uris(&tracks),
        vec![
            "spotify:track:4iV5W9uYEdYUVa79Axb7Rh",
            "spotify:track:0VjIjW4GlUZAMYd2vXMi3b",
        ]
    );
}

#[test]
fn test_top_instrumental_and_lyrical() {
    let entries = vec![
        create_test_entry("a", 4.0, false),
        create_test_entry("b", -6.0, false),
        create_test_entry("c", 9.0, false),
        create_test_entry("d", -0.5, true),
        create_test_entry("e", -2.0, false),
        create_test_entry("f", 2.0, false),
    ];

    let top: Vec<&str> = top_instrumental(&entries, 2)
        .iter()
        .map(|e| e.track.name.as_str())
        .collect();
    assert_eq!(top, vec!["Track c", "Track a"]);

    // Only scores below -1 are shown as lyrical samples
    let lyrical: Vec<&str> = top_lyrical(&entries, 5)
        .iter()
        .map(|e| e.track.name.as_str())
        .collect();
    assert_eq!(lyrical, vec!["Track b", "Track e"]);
}

#[test]
fn test_low_confidence_and_share() {
    let entries = vec![
        create_test_entry("a", 4.0, false),
        create_test_entry("b", -0.5, true),
        create_test_entry("c", 2.0, false),
        create_test_entry("d", -3.0, false),
    ];

    assert_eq!(low_confidence(&entries).len(), 1);
    // 2.0 is not above the high confidence mark
    assert_eq!(high_confidence_share(&entries), Some(50.0));
    assert_eq!(high_confidence_share(&[]), None);
}

#[test]
fn test_uncertain_origins() {
    let entry = |name: &str, uncertain: bool| CulturaEntry {
        track: create_test_track(name, name, &[]),
        result: OriginResult {
            label: Origin::International,
            signals: Vec::new(),
            uncertain,
        },
    };
    let indian = CulturaEntry {
        track: create_test_track("i", "Tum Hi Ho", &[]),
        result: OriginResult {
            label: Origin::Indian,
            signals: vec![Signal::KnownArtist("arijit singh".to_string())],
            uncertain: false,
        },
    };
    let entries = vec![entry("Desi Girl", true), indian, entry("Yellow", false)];

    let uncertain = uncertain_origins(&entries);

    assert_eq!(uncertain.len(), 1);
    assert_eq!(uncertain[0].track.name, "Desi Girl");
}

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("exactly10!", 10), "exactly10!");
    assert_eq!(truncate("a very long track name", 10), "a very lo…");
    assert_eq!(truncate("ñandú ñandú", 6), "ñandú…");
}

#[test]
fn test_chunk_count() {
    assert_eq!(chunk_count(0, 100), 0);
    assert_eq!(chunk_count(100, 100), 1);
    assert_eq!(chunk_count(101, 100), 2);
    assert_eq!(chunk_count(250, 50), 5);
    assert_eq!(chunk_count(10, 0), 0);
}

#[test]
fn test_unique_in_order() {
    let ids: Vec<String> = ["a", "b", "a", "c", "b"]
        .iter()
        .map(|s| s.to_string())
        .collect();

    assert_eq!(unique_in_order(&ids), vec!["a", "b", "c"]);
}

#[test]
fn test_valid_tracks_drop_removed_items() {
    let items = vec![
        TrackItem {
            track: Some(create_test_track("t1", "One", &[])),
        },
        TrackItem { track: None },
        TrackItem {
            track: Some(create_test_track("t2", "Two", &[])),
        },
    ];

    let tracks = valid_tracks(items);

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[1].name, "Two");
}

#[test]
fn test_playlist_items_deserialize() {
    let json = r#"{
        "items": [
            { "track": null },
            { "track": {
                "id": "4iV5W9uYEdYUVa79Axb7Rh",
                "name": "Tum Hi Ho",
                "uri": "spotify:track:4iV5W9uYEdYUVa79Axb7Rh",
                "duration_ms": 261000,
                "track_number": 3,
                "album": { "name": "Aashiqui 2" },
                "artists": [{ "id": "4YRxDV8wJFPHPTeXepOstw", "name": "Arijit Singh" }]
            } }
        ],
        "next": null,
        "total": 2
    }"#;

    let page: playsort::types::Paging<TrackItem> = serde_json::from_str(json).unwrap();
    let tracks = valid_tracks(page.items);

    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].artist_names(), "Arijit Singh");
    assert_eq!(tracks[0].primary_artist_id(), Some("4YRxDV8wJFPHPTeXepOstw"));
    assert!(page.next.is_none());
}
