//! Rule tables driving both classifiers.
//!
//! Everything the scorers match against lives here as plain data: keyword
//! sets, regular expression sets, genre sets and the numeric weights. The
//! tables are serde-(de)serializable so a user can override them with a
//! `rules.json` file (see [`crate::management::RulesManager`]) without
//! touching the scoring code. A rules file only needs to name what it changes:
//! missing tables, and missing fields inside a table, keep their built-in
//! values. Blank entries are dropped when the tables are normalized.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// All rule tables known to the application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub vibe: VibeRules,
    pub cultura: CulturaRules,
}

/// A named list of lowercase substrings with the score delta applied on a match.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordSet {
    pub category: String,
    pub weight: f64,
    pub keywords: Vec<String>,
}

impl KeywordSet {
    pub fn new(category: &str, weight: f64, keywords: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            weight,
            keywords: to_strings(keywords),
        }
    }

    /// Keywords contained in `haystack`, in table order. Both sides are expected lowercase.
    pub fn matches<'a>(&'a self, haystack: &str) -> Vec<&'a str> {
        self.keywords
            .iter()
            .map(String::as_str)
            .filter(|kw| haystack.contains(kw))
            .collect()
    }

    pub fn any_in(&self, haystack: &str) -> bool {
        self.keywords.iter().any(|kw| haystack.contains(kw.as_str()))
    }

    fn lowercased(&self) -> Self {
        Self {
            category: self.category.clone(),
            weight: self.weight,
            keywords: lowercase_entries(&self.keywords),
        }
    }
}

/// Genre substrings share the keyword representation; the weight is applied per matching tag.
pub type GenreSet = KeywordSet;

/// A named list of regular expressions, matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatternSet {
    pub category: String,
    pub weight: f64,
    pub patterns: Vec<String>,
}

impl PatternSet {
    pub fn new(category: &str, weight: f64, patterns: &[&str]) -> Self {
        Self {
            category: category.to_string(),
            weight,
            patterns: to_strings(patterns),
        }
    }

    /// Compiles every non-blank pattern. A blank pattern would match any text.
    pub fn compile(&self) -> Result<CompiledPatterns, regex::Error> {
        let regexes = self
            .patterns
            .iter()
            .filter(|p| !p.trim().is_empty())
            .map(|p| RegexBuilder::new(p).case_insensitive(true).build())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CompiledPatterns {
            category: self.category.clone(),
            weight: self.weight,
            regexes,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CompiledPatterns {
    pub category: String,
    pub weight: f64,
    regexes: Vec<Regex>,
}

impl CompiledPatterns {
    pub fn first_match(&self, text: &str) -> Option<&Regex> {
        self.regexes.iter().find(|re| re.is_match(text))
    }

    pub fn count_matches(&self, text: &str) -> usize {
        self.regexes.iter().filter(|re| re.is_match(text)).count()
    }

    pub fn len(&self) -> usize {
        self.regexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regexes.is_empty()
    }
}

/// A single `value <op> threshold => delta` rule of the audio-feature scorer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bracket {
    pub threshold: f64,
    pub delta: f64,
}

impl Bracket {
    pub const fn new(threshold: f64, delta: f64) -> Self {
        Self { threshold, delta }
    }
}

/// Audio feature brackets. Within speechiness and within instrumentalness the
/// brackets are tried in declaration order and the first hit wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioRules {
    pub speechiness_very_low: Bracket,
    pub speechiness_low: Bracket,
    pub speechiness_high: Bracket,
    pub speechiness_medium: Bracket,
    pub instrumentalness_high: Bracket,
    pub instrumentalness_medium: Bracket,
    pub instrumentalness_low: Bracket,
    pub low_energy: Bracket,
    pub calm_danceability_below: f64,
    pub calm_energy_below: f64,
    pub calm_bonus: f64,
}

impl Default for AudioRules {
    fn default() -> Self {
        Self {
            speechiness_very_low: Bracket::new(0.05, 3.0),
            speechiness_low: Bracket::new(0.10, 2.0),
            speechiness_high: Bracket::new(0.30, -3.0),
            speechiness_medium: Bracket::new(0.15, -1.0),
            instrumentalness_high: Bracket::new(0.7, 4.0),
            instrumentalness_medium: Bracket::new(0.5, 2.0),
            instrumentalness_low: Bracket::new(0.1, -1.0),
            low_energy: Bracket::new(0.3, 0.5),
            calm_danceability_below: 0.3,
            calm_energy_below: 0.4,
            calm_bonus: 1.0,
        }
    }
}

/// Structural bonuses and decision thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Weights {
    pub album_bonus: f64,
    pub short_track_ms: u64,
    pub short_track_bonus: f64,
    pub long_track_ms: u64,
    pub long_track_bonus: f64,
    pub opening_intro_bonus: f64,
    /// Name keyword that earns the opening bonus on track 1. Empty disables it.
    pub opening_keyword: String,
    pub instrumental_threshold: f64,
    pub low_confidence_below: f64,
    pub method_boost: f64,
    pub method_boost_min: usize,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            album_bonus: 1.0,
            short_track_ms: 30_000,
            short_track_bonus: 2.0,
            long_track_ms: 8 * 60_000,
            long_track_bonus: 1.0,
            opening_intro_bonus: 1.0,
            opening_keyword: "intro".to_string(),
            instrumental_threshold: 1.5,
            low_confidence_below: 2.0,
            method_boost: 0.5,
            method_boost_min: 3,
        }
    }
}

/// Tables for the instrumental/lyrical classifier.
///
/// Deserialization starts from [`VibeRules::default`] and only replaces what
/// the input names, down to single fields of a keyword or pattern table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "VibeRulesFile")]
pub struct VibeRules {
    pub strong_instrumental: KeywordSet,
    pub medium_instrumental: KeywordSet,
    pub strong_vocal: KeywordSet,
    pub instrumental_patterns: PatternSet,
    pub vocal_patterns: PatternSet,
    pub instrumental_artist_types: KeywordSet,
    pub instrumental_genres: GenreSet,
    pub vocal_genres: GenreSet,
    pub audio: AudioRules,
    pub weights: Weights,
    /// Count every matching pattern instead of stopping at the first one.
    pub exhaustive_patterns: bool,
}

impl VibeRules {
    /// Copy with every keyword and genre table lowercased and blank entries dropped.
    pub fn normalized(&self) -> Self {
        Self {
            strong_instrumental: self.strong_instrumental.lowercased(),
            medium_instrumental: self.medium_instrumental.lowercased(),
            strong_vocal: self.strong_vocal.lowercased(),
            instrumental_artist_types: self.instrumental_artist_types.lowercased(),
            instrumental_genres: self.instrumental_genres.lowercased(),
            vocal_genres: self.vocal_genres.lowercased(),
            weights: Weights {
                opening_keyword: self.weights.opening_keyword.trim().to_lowercase(),
                ..self.weights.clone()
            },
            ..self.clone()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct KeywordSetPatch {
    category: Option<String>,
    weight: Option<f64>,
    keywords: Option<Vec<String>>,
}

impl KeywordSetPatch {
    fn apply(self, base: KeywordSet) -> KeywordSet {
        KeywordSet {
            category: self.category.unwrap_or(base.category),
            weight: self.weight.unwrap_or(base.weight),
            keywords: self.keywords.unwrap_or(base.keywords),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PatternSetPatch {
    category: Option<String>,
    weight: Option<f64>,
    patterns: Option<Vec<String>>,
}

impl PatternSetPatch {
    fn apply(self, base: PatternSet) -> PatternSet {
        PatternSet {
            category: self.category.unwrap_or(base.category),
            weight: self.weight.unwrap_or(base.weight),
            patterns: self.patterns.unwrap_or(base.patterns),
        }
    }
}

/// On-disk shape of [`VibeRules`]: every table and field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct VibeRulesFile {
    strong_instrumental: Option<KeywordSetPatch>,
    medium_instrumental: Option<KeywordSetPatch>,
    strong_vocal: Option<KeywordSetPatch>,
    instrumental_patterns: Option<PatternSetPatch>,
    vocal_patterns: Option<PatternSetPatch>,
    instrumental_artist_types: Option<KeywordSetPatch>,
    instrumental_genres: Option<KeywordSetPatch>,
    vocal_genres: Option<KeywordSetPatch>,
    audio: Option<AudioRules>,
    weights: Option<Weights>,
    exhaustive_patterns: Option<bool>,
}

fn merge_keywords(patch: Option<KeywordSetPatch>, base: KeywordSet) -> KeywordSet {
    match patch {
        Some(patch) => patch.apply(base),
        None => base,
    }
}

fn merge_patterns(patch: Option<PatternSetPatch>, base: PatternSet) -> PatternSet {
    match patch {
        Some(patch) => patch.apply(base),
        None => base,
    }
}

impl From<VibeRulesFile> for VibeRules {
    fn from(file: VibeRulesFile) -> Self {
        let base = VibeRules::default();
        Self {
            strong_instrumental: merge_keywords(file.strong_instrumental, base.strong_instrumental),
            medium_instrumental: merge_keywords(file.medium_instrumental, base.medium_instrumental),
            strong_vocal: merge_keywords(file.strong_vocal, base.strong_vocal),
            instrumental_patterns: merge_patterns(
                file.instrumental_patterns,
                base.instrumental_patterns,
            ),
            vocal_patterns: merge_patterns(file.vocal_patterns, base.vocal_patterns),
            instrumental_artist_types: merge_keywords(
                file.instrumental_artist_types,
                base.instrumental_artist_types,
            ),
            instrumental_genres: merge_keywords(file.instrumental_genres, base.instrumental_genres),
            vocal_genres: merge_keywords(file.vocal_genres, base.vocal_genres),
            audio: file.audio.unwrap_or(base.audio),
            weights: file.weights.unwrap_or(base.weights),
            exhaustive_patterns: file.exhaustive_patterns.unwrap_or(base.exhaustive_patterns),
        }
    }
}

impl Default for VibeRules {
    fn default() -> Self {
        Self {
            strong_instrumental: KeywordSet::new(
                "strong-instrumental",
                5.0,
                &[
                    "instrumental",
                    "karaoke",
                    "backing track",
                    "playback",
                    "music box",
                    "orchestral",
                    "symphony",
                    "concerto",
                    "sonata",
                    "prelude",
                    "etude",
                    "interlude",
                    "intro",
                    "outro",
                    "overture",
                    "finale",
                    "movement",
                    "ambient",
                    "cinematic",
                    "soundtrack",
                    "film score",
                    "movie theme",
                    "piano solo",
                    "guitar solo",
                    "violin solo",
                    "saxophone solo",
                    "drum solo",
                    "acoustic guitar",
                    "classical guitar",
                    "jazz instrumental",
                    "without vocals",
                    "no vocals",
                    "vocals removed",
                    "minus one",
                    "meditation music",
                    "background music",
                    "study music",
                    "relaxing music",
                    "lofi instrumental",
                    "chillhop instrumental",
                    "beats to study",
                    "ost",
                    "original soundtrack",
                ],
            ),
            medium_instrumental: KeywordSet::new(
                "medium-instrumental",
                2.0,
                &[
                    "theme",
                    "score",
                    "suite",
                    "variations",
                    "improvisation",
                    "jam",
                    "acoustic",
                    "unplugged version",
                    "demo version",
                    "rehearsal",
                    "live recording",
                    "studio session",
                    "soundscape",
                    "atmosphere",
                ],
            ),
            strong_vocal: KeywordSet::new(
                "strong-vocal",
                -4.0,
                &[
                    "vocals",
                    "singer",
                    "sung by",
                    "featuring",
                    "ft.",
                    "feat.",
                    "duet",
                    "chorus",
                    "verse",
                    "lyrics",
                    "ballad",
                    "anthem",
                    "acoustic version",
                    "live version",
                    "cover version",
                    "remix",
                    "radio edit",
                    "single version",
                    "album version",
                    "extended version",
                ],
            ),
            instrumental_patterns: PatternSet::new(
                "instrumental-pattern",
                3.0,
                &[
                    r"\b(instrumental|karaoke|backing|playback)\b",
                    r"\b(without|minus|no)\s+(vocals?|voice|singing)\b",
                    r"\b(piano|guitar|violin|saxophone|drums?|bass)\s+(solo|version|instrumental)\b",
                    r"\b(theme|score|soundtrack|ost)\b",
                    r"\b(movement|part)\s+\d+\b",
                    r"\b(prelude|interlude|outro|intro)\b",
                    r"\b(ambient|cinematic|atmospheric)\b",
                    r"\b(study|focus|concentration|meditation)\s+(music|beats)\b",
                    r"\b(lofi|lo-fi|chill)\s+(beats|hip hop|instrumental)\b",
                    r"\(instrumental\)|\[instrumental\]",
                    r"\(no vocals?\)|\[no vocals?\]",
                    r"\(acoustic\)|\[acoustic\]",
                ],
            ),
            vocal_patterns: PatternSet::new(
                "vocal-pattern",
                -3.0,
                &[
                    r"\b(vocals?|singer|sung)\b",
                    r"\b(feat\.?|featuring|ft\.?|with)\s+[\w\s]+\b",
                    r"\b(cover|version)\s+by\b",
                    r"\b(radio|single|album|extended)\s+(edit|version|mix)\b",
                    r"\(.*vocals?\)",
                    r"\[.*vocals?\]",
                ],
            ),
            instrumental_artist_types: KeywordSet::new(
                "instrumental-artist-type",
                2.0,
                &[
                    "orchestra",
                    "symphony",
                    "philharmonic",
                    "ensemble",
                    "quartet",
                    "trio",
                    "band",
                    "collective",
                    "project",
                    "soundsystem",
                    "beats",
                    "productions",
                ],
            ),
            instrumental_genres: GenreSet::new(
                "instrumental-genre",
                2.0,
                &[
                    "ambient",
                    "classical",
                    "instrumental",
                    "soundtrack",
                    "score",
                    "new age",
                    "meditation",
                    "nature sounds",
                    "white noise",
                    "jazz fusion",
                    "smooth jazz instrumental",
                    "classical crossover",
                    "post-rock",
                    "math rock",
                    "experimental",
                    "drone",
                    "minimal techno",
                    "deep house instrumental",
                    "trance instrumental",
                    "lo-fi beats",
                    "chillhop",
                    "downtempo",
                    "trip-hop instrumental",
                ],
            ),
            vocal_genres: GenreSet::new(
                "vocal-genre",
                -1.0,
                &[
                    "pop",
                    "rock",
                    "hip hop",
                    "rap",
                    "r&b",
                    "soul",
                    "funk",
                    "disco",
                    "country",
                    "folk",
                    "indie pop",
                    "indie rock",
                    "alternative",
                    "punk",
                    "metal",
                    "blues",
                    "reggae",
                    "ska",
                    "gospel",
                    "singer-songwriter",
                    "acoustic pop",
                    "vocal jazz",
                    "cabaret",
                ],
            ),
            audio: AudioRules::default(),
            weights: Weights::default(),
            exhaustive_patterns: false,
        }
    }
}

/// Tables for the Indian/international classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CulturaRules {
    pub known_artists: Vec<String>,
    pub language_keywords: Vec<String>,
    pub song_keywords: Vec<String>,
    pub genre_keywords: Vec<String>,
    /// Words that mark an international result as worth a second look.
    pub uncertain_hints: Vec<String>,
}

impl CulturaRules {
    pub fn normalized(&self) -> Self {
        Self {
            known_artists: lowercase_entries(&self.known_artists),
            language_keywords: lowercase_entries(&self.language_keywords),
            song_keywords: lowercase_entries(&self.song_keywords),
            genre_keywords: lowercase_entries(&self.genre_keywords),
            uncertain_hints: lowercase_entries(&self.uncertain_hints),
        }
    }
}

impl Default for CulturaRules {
    fn default() -> Self {
        Self {
            known_artists: to_strings(&[
                "a.r. rahman",
                "ilaiyaraaja",
                "shankar mahadevan",
                "udit narayan",
                "lata mangeshkar",
                "kishore kumar",
                "anirudh ravichander",
                "yuvan shankar raja",
                "harris jayaraj",
                "vishal-shekhar",
                "shankar-ehsaan-loy",
                "amit trivedi",
                "arijit singh",
                "shreya ghoshal",
                "k.j. yesudas",
                "s.p. balasubrahmanyam",
                "devi sri prasad",
                "thaman s",
                "ghibran",
                "santhosh narayanan",
                "ravi basrur",
                "ajaneesh loknath",
                "b. ajaneesh loknath",
                "vijay prakash",
                "sonu nigam",
                "m.m keeravaani",
                "v. harikrishna",
                "anup bhandari",
                "rajesh krishnan",
                "ananya bhat",
                "kala bhairava",
                "ankit tiwari",
                "raghu dixit",
                "dr. rajkumar",
                "rajkumar",
                "rahat fateh ali khan",
                "nusrat fateh ali khan",
                "mohammed rafi",
                "mukesh",
                "hemant kumar",
                "manna dey",
                "jagjit singh",
                "ghulam ali",
                "hariharan",
                "unni menon",
                "kailash kher",
                "sukhwinder singh",
            ]),
            language_keywords: to_strings(&[
                "hindi",
                "kannada",
                "telugu",
                "tamil",
                "malayalam",
                "bengali",
                "assamese",
                "sanskrit",
                "punjabi",
                "gujarati",
                "marathi",
                "odia",
                "bhojpuri",
                "urdu",
            ]),
            song_keywords: to_strings(&[
                "bollywood",
                "item number",
                "playback",
                "duet",
                "sad version",
                "unplugged",
                "qawwali",
                "thumri",
                "bhajan",
                "aarti",
                "shloka",
            ]),
            genre_keywords: to_strings(&[
                "sandalwood",
                "bollywood",
                "tollywood",
                "kollywood",
                "mollywood",
                "devotional",
                "bhajan",
                "qawwali",
                "classical indian",
                "carnatic",
                "hindustani",
                "raga",
                "ghazal",
                "kirtan",
                "mantra",
                "fusion indian",
                "indipop",
                "filmi",
                "sufi",
                "indian classical",
                "indian folk",
                "indian pop",
            ]),
            uncertain_hints: to_strings(&["india", "desi", "bollywood"]),
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Lowercases entries and drops blank ones; `str::contains("")` is always true.
fn lowercase_entries(entries: &[String]) -> Vec<String> {
    entries
        .iter()
        .filter(|e| !e.trim().is_empty())
        .map(|e| e.to_lowercase())
        .collect()
}
