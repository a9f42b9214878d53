use tabled::Table;

use super::load_rules;
use crate::{
    classify::{KeywordSet, PatternSet, Rules},
    error, info,
    management::{RulesManager, RulesSource},
    success,
    types::RuleTableRow,
};

const ENTRIES_SHOWN: usize = 4;

/// Shows the active rule tables, or writes the built-in ones to the rules file.
pub async fn rules(export: bool, force: bool) {
    if export {
        let manager = RulesManager::new(Rules::default());
        match manager.persist(force).await {
            Ok(path) => success!("Built-in rules written to {}", path.display()),
            Err(e) => error!("{}", e),
        }
        return;
    }

    let manager = load_rules().await;
    match manager.source() {
        RulesSource::BuiltIn => info!(
            "Using built-in rules ({} not found)",
            RulesManager::rules_path().display()
        ),
        RulesSource::File(path) => info!("Using rules from {}", path.display()),
    }

    if let Err(e) = manager.vibe_classifier() {
        error!("{}", e);
    }

    println!("{}", Table::new(rule_rows(manager.rules())));

    let weights = &manager.rules().vibe.weights;
    info!(
        "Instrumental when score > {}, low confidence when |score| < {}",
        weights.instrumental_threshold, weights.low_confidence_below
    );
}

/// One row per rule table, in the order the scorers evaluate them.
pub fn rule_rows(rules: &Rules) -> Vec<RuleTableRow> {
    let vibe = &rules.vibe;
    let cultura = &rules.cultura;

    vec![
        keyword_row(&vibe.strong_instrumental),
        keyword_row(&vibe.medium_instrumental),
        keyword_row(&vibe.strong_vocal),
        pattern_row(&vibe.instrumental_patterns),
        pattern_row(&vibe.vocal_patterns),
        keyword_row(&vibe.instrumental_artist_types),
        keyword_row(&vibe.instrumental_genres),
        keyword_row(&vibe.vocal_genres),
        list_row("known_artists", &cultura.known_artists),
        list_row("language_keywords", &cultura.language_keywords),
        list_row("song_keywords", &cultura.song_keywords),
        list_row("genre_keywords", &cultura.genre_keywords),
        list_row("uncertain_hints", &cultura.uncertain_hints),
    ]
}

fn keyword_row(set: &KeywordSet) -> RuleTableRow {
    RuleTableRow {
        table: set.category.clone(),
        weight: format!("{:+}", set.weight),
        entries: preview(&set.keywords),
    }
}

fn pattern_row(set: &PatternSet) -> RuleTableRow {
    RuleTableRow {
        table: set.category.clone(),
        weight: format!("{:+}", set.weight),
        entries: preview(&set.patterns),
    }
}

fn list_row(table: &str, entries: &[String]) -> RuleTableRow {
    RuleTableRow {
        table: table.to_string(),
        weight: "-".to_string(),
        entries: preview(entries),
    }
}

fn preview(entries: &[String]) -> String {
    let shown: Vec<&str> = entries
        .iter()
        .take(ENTRIES_SHOWN)
        .map(String::as_str)
        .collect();
    if entries.len() > ENTRIES_SHOWN {
        format!("{}, … ({} total)", shown.join(", "), entries.len())
    } else {
        shown.join(", ")
    }
}
