use playsort::classify::{KeywordSet, PatternSet, Rules, VibeClassifier, VibeRules, Vocality};
use playsort::cli::rule_rows;
use playsort::management::{RulesError, RulesManager, RulesSource};
use playsort::types::Track;
use tempfile::tempdir;

#[test]
fn test_default_weights() {
    let rules = Rules::default();
    let vibe = &rules.vibe;

    assert_eq!(vibe.strong_instrumental.weight, 5.0);
    assert_eq!(vibe.medium_instrumental.weight, 2.0);
    assert_eq!(vibe.strong_vocal.weight, -4.0);
    assert_eq!(vibe.instrumental_patterns.weight, 3.0);
    assert_eq!(vibe.vocal_patterns.weight, -3.0);
    assert_eq!(vibe.weights.short_track_ms, 30_000);
    assert_eq!(vibe.weights.long_track_ms, 480_000);
    assert_eq!(vibe.weights.instrumental_threshold, 1.5);
    assert!(!vibe.exhaustive_patterns);

    assert!(
        rules
            .cultura
            .known_artists
            .contains(&"arijit singh".to_string())
    );
    assert_eq!(rules.cultura.uncertain_hints, vec!["india", "desi", "bollywood"]);
}

#[test]
fn test_default_patterns_compile() {
    let vibe = VibeRules::default();

    let instrumental = vibe.instrumental_patterns.compile().unwrap();
    let vocal = vibe.vocal_patterns.compile().unwrap();

    assert_eq!(instrumental.len(), 12);
    assert_eq!(vocal.len(), 6);
}

#[test]
fn test_patterns_ignore_case() {
    let set = PatternSet::new("test", 1.0, &[r"\bpiano\s+solo\b"]);
    let compiled = set.compile().unwrap();

    assert!(compiled.first_match("PIANO SOLO in C").is_some());
    assert_eq!(compiled.count_matches("nothing here"), 0);
}

#[test]
fn test_keyword_matches_in_table_order() {
    let set = KeywordSet::new("test", 1.0, &["solo", "piano", "drum"]);

    assert_eq!(set.matches("piano solo"), vec!["solo", "piano"]);
    assert!(set.any_in("drum and bass"));
    assert!(!set.any_in("vocal"));
}

#[test]
fn test_partial_rules_file_keeps_defaults() {
    let json = r#"{
        "vibe": {
            "weights": { "instrumental_threshold": 3.0 },
            "exhaustive_patterns": true
        }
    }"#;

    let rules: Rules = serde_json::from_str(json).unwrap();
    let defaults = Rules::default();

    assert_eq!(rules.vibe.weights.instrumental_threshold, 3.0);
    assert_eq!(
        rules.vibe.weights.short_track_ms,
        defaults.vibe.weights.short_track_ms
    );
    assert!(rules.vibe.exhaustive_patterns);
    assert_eq!(rules.vibe.strong_vocal, defaults.vibe.strong_vocal);
    assert_eq!(rules.cultura, defaults.cultura);
}

#[test]
fn test_partial_table_keeps_builtin_weight_and_category() {
    let json = r#"{ "vibe": { "strong_instrumental": { "keywords": ["tabla solo"] } } }"#;

    let rules: Rules = serde_json::from_str(json).unwrap();
    let defaults = VibeRules::default();

    assert_eq!(rules.vibe.strong_instrumental.keywords, vec!["tabla solo"]);
    assert_eq!(rules.vibe.strong_instrumental.weight, 5.0);
    assert_eq!(rules.vibe.strong_instrumental.category, "strong-instrumental");
    assert_eq!(rules.vibe.medium_instrumental, defaults.medium_instrumental);

    let classifier = VibeClassifier::new(&rules.vibe).unwrap();
    let track = Track {
        name: "Evening Tabla Solo".to_string(),
        duration_ms: 200_000,
        ..Default::default()
    };
    let result = classifier.score(&track, None, &[]);

    assert_eq!(result.score, 5.0);
    assert_eq!(result.label, Vocality::Instrumental);
}

#[test]
fn test_partial_pattern_table_and_weights() {
    let json = r#"{
        "vibe": {
            "vocal_patterns": { "weight": -5.0 },
            "weights": { "opening_keyword": "prelude" }
        }
    }"#;

    let rules: Rules = serde_json::from_str(json).unwrap();
    let defaults = VibeRules::default();

    assert_eq!(rules.vibe.vocal_patterns.weight, -5.0);
    assert_eq!(rules.vibe.vocal_patterns.category, "vocal-pattern");
    assert_eq!(rules.vibe.vocal_patterns.patterns, defaults.vocal_patterns.patterns);
    assert_eq!(rules.vibe.weights.opening_keyword, "prelude");
    assert_eq!(rules.vibe.weights.opening_intro_bonus, 1.0);
}

#[test]
fn test_blank_patterns_are_skipped() {
    let set = PatternSet::new("test", 1.0, &["", "   ", r"solo"]);
    let compiled = set.compile().unwrap();

    assert_eq!(compiled.len(), 1);
    assert!(compiled.first_match("untitled").is_none());
    assert!(compiled.first_match("drum solo").is_some());
}

#[test]
fn test_invalid_pattern_is_reported() {
    let mut rules = Rules::default();
    rules.vibe.vocal_patterns = PatternSet::new("vocal-pattern", -3.0, &["(unclosed"]);

    let manager = RulesManager::new(rules);

    assert!(matches!(
        manager.vibe_classifier(),
        Err(RulesError::Pattern(_))
    ));
}

#[tokio::test]
async fn test_missing_file_falls_back_to_builtin() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rules.json");

    let manager = RulesManager::load_from(&path).await.unwrap();

    assert_eq!(manager.source(), &RulesSource::BuiltIn);
    assert_eq!(manager.rules(), &Rules::default());
}

#[tokio::test]
async fn test_persist_and_load() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("rules.json");

    let mut rules = Rules::default();
    rules.vibe.weights.instrumental_threshold = 2.0;
    rules.cultura.known_artists.push("nucleya".to_string());
    let manager = RulesManager::new(rules.clone());

    let written = manager.persist_to(&path, false).await.unwrap();
    assert_eq!(written, path);

    let loaded = RulesManager::load_from(&path).await.unwrap();
    assert_eq!(loaded.rules(), &rules);
    assert_eq!(loaded.source(), &RulesSource::File(path.clone()));
}

#[tokio::test]
async fn test_persist_refuses_to_overwrite() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rules.json");
    let manager = RulesManager::new(Rules::default());

    manager.persist_to(&path, false).await.unwrap();

    assert!(matches!(
        manager.persist_to(&path, false).await,
        Err(RulesError::AlreadyExists(_))
    ));
    assert!(manager.persist_to(&path, true).await.is_ok());
}

#[tokio::test]
async fn test_malformed_file_is_a_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("rules.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(
        RulesManager::load_from(&path).await,
        Err(RulesError::Parse { .. })
    ));
}

#[test]
fn test_rule_rows_cover_every_table() {
    let rows = rule_rows(&Rules::default());

    assert_eq!(rows.len(), 13);
    assert_eq!(rows[0].table, "strong-instrumental");
    assert_eq!(rows[0].weight, "+5");
    assert_eq!(rows[2].weight, "-4");
    assert!(rows[0].entries.ends_with("total)"));
    assert_eq!(rows[12].table, "uncertain_hints");
    assert_eq!(rows[12].entries, "india, desi, bollywood");
}
