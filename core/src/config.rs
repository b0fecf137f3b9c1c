use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::separation::SeparationStrategy;

/// Session settings, read from TOML. Missing keys take their defaults.
///
/// ```toml
/// center = "Kevin Bacon"
/// separation = "level_order"   # or "recursive"
/// rank_limit = 100
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UniverseSettings {
    /// Initial center of the universe.
    pub center: String,
    pub separation: SeparationStrategy,
    /// Largest ranking a session will compute; bigger requests are clamped.
    pub rank_limit: usize,
}

impl Default for UniverseSettings {
    fn default() -> Self {
        Self {
            center: "Kevin Bacon".to_string(),
            separation: SeparationStrategy::default(),
            rank_limit: 100,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read settings from {path}: {source}")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

impl UniverseSettings {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            source,
            path: path.to_path_buf(),
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = UniverseSettings::default();
        assert_eq!(s.center, "Kevin Bacon");
        assert_eq!(s.separation, SeparationStrategy::LevelOrder);
        assert_eq!(s.rank_limit, 100);
    }

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(
            UniverseSettings::from_toml_str("").unwrap(),
            UniverseSettings::default()
        );
    }

    #[test]
    fn test_full_document() {
        let s = UniverseSettings::from_toml_str(
            "center = \"Meryl Streep\"\nseparation = \"recursive\"\nrank_limit = 5\n",
        )
        .unwrap();
        assert_eq!(s.center, "Meryl Streep");
        assert_eq!(s.separation, SeparationStrategy::Recursive);
        assert_eq!(s.rank_limit, 5);
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let err = UniverseSettings::from_toml_str("separation = \"dfs\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(UniverseSettings::from_toml_str("centre = \"x\"").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = UniverseSettings::load(Path::new("/nonexistent/costar.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
