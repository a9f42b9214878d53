use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::{
    classify::{CulturaClassifier, Rules, VibeClassifier},
    config,
};

#[derive(Debug, Error)]
pub enum RulesError {
    #[error("Cannot access rules file '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid rules file '{path}': {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid pattern in rules: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Rules file '{0}' already exists, use --force to overwrite")]
    AlreadyExists(PathBuf),
}

/// Where the active rule tables came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RulesSource {
    BuiltIn,
    File(PathBuf),
}

/// Loads and persists the classifier rule tables as JSON.
pub struct RulesManager {
    rules: Rules,
    source: RulesSource,
}

impl RulesManager {
    pub fn new(rules: Rules) -> Self {
        Self {
            rules,
            source: RulesSource::BuiltIn,
        }
    }

    /// Loads the user rules file, falling back to the built-in tables when it does not exist.
    pub async fn load() -> Result<Self, RulesError> {
        Self::load_from(&Self::rules_path()).await
    }

    pub async fn load_from(path: &Path) -> Result<Self, RulesError> {
        if !path.is_file() {
            return Ok(Self::new(Rules::default()));
        }

        let content = async_fs::read_to_string(path)
            .await
            .map_err(|source| RulesError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let rules: Rules = serde_json::from_str(&content).map_err(|source| RulesError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            rules,
            source: RulesSource::File(path.to_path_buf()),
        })
    }

    pub async fn persist(&self, force: bool) -> Result<PathBuf, RulesError> {
        self.persist_to(&Self::rules_path(), force).await
    }

    pub async fn persist_to(&self, path: &Path, force: bool) -> Result<PathBuf, RulesError> {
        if path.exists() && !force {
            return Err(RulesError::AlreadyExists(path.to_path_buf()));
        }

        let io_err = |source| RulesError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(&self.rules).map_err(|source| RulesError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        async_fs::write(path, json).await.map_err(io_err)?;

        Ok(path.to_path_buf())
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn source(&self) -> &RulesSource {
        &self.source
    }

    /// Compiles the vibe tables; fails on an invalid regular expression.
    pub fn vibe_classifier(&self) -> Result<VibeClassifier, RulesError> {
        Ok(VibeClassifier::new(&self.rules.vibe)?)
    }

    pub fn cultura_classifier(&self) -> CulturaClassifier {
        CulturaClassifier::new(&self.rules.cultura)
    }

    pub fn rules_path() -> PathBuf {
        config::data_dir().join("rules.json")
    }
}
