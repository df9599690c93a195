use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::board::{Color, Layout, DEFAULT_PALETTE};
use crate::completion::CompletionRule;
use crate::engine::DEFAULT_REWARD;
use crate::error::ConfigError;
use crate::session::ThresholdPolicy;

/// Largest grid side length a config may ask for.
pub const MAX_GRID_SIZE: usize = 64;

/// Game configuration, loadable from TOML. Missing keys fall back to the defaults.
///
/// ```toml
/// palette = ["red", "green", "blue", "yellow", "orange"]
/// reward = 10
/// completion = "allow_odd_leftover"
/// seed = 514514
///
/// [layout]
/// cell_size = 80.0
/// marker_size = 40.0
///
/// [grid]
/// base_size = 3
/// large_size = 4
/// large_from_level = 5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Colors in the order the board generator consumes them.
    pub palette: Vec<Color>,
    pub layout: Layout,
    /// Points per committed connection.
    pub reward: u32,
    pub grid: ThresholdPolicy,
    pub completion: CompletionRule,
    /// Seed for the session RNG; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            palette: DEFAULT_PALETTE.to_vec(),
            layout: Layout::default(),
            reward: DEFAULT_REWARD,
            grid: ThresholdPolicy::default(),
            completion: CompletionRule::default(),
            seed: None,
        }
    }
}

impl GameConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: GameConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.is_empty() {
            return Err(ConfigError::Validation("palette must not be empty".into()));
        }
        let mut seen = HashSet::new();
        if let Some(duplicate) = self.palette.iter().find(|&&color| !seen.insert(color)) {
            return Err(ConfigError::Validation(format!(
                "palette lists {} more than once",
                duplicate
            )));
        }
        if !self.layout.cell_size.is_finite() || !self.layout.marker_size.is_finite() {
            return Err(ConfigError::Validation(
                "layout sizes must be finite numbers".into(),
            ));
        }
        if self.layout.cell_size <= 0.0 || self.layout.marker_size <= 0.0 {
            return Err(ConfigError::Validation(
                "layout sizes must be > 0".into(),
            ));
        }
        if self.layout.marker_size > self.layout.cell_size {
            return Err(ConfigError::Validation(
                "layout.marker_size must not exceed layout.cell_size".into(),
            ));
        }
        if self.grid.base_size < 2 || self.grid.large_size < 2 {
            return Err(ConfigError::Validation(
                "grid sizes must be at least 2".into(),
            ));
        }
        if self.grid.base_size > MAX_GRID_SIZE || self.grid.large_size > MAX_GRID_SIZE {
            return Err(ConfigError::Validation(format!(
                "grid sizes must be at most {}",
                MAX_GRID_SIZE
            )));
        }
        if self.grid.large_from_level < 1 {
            return Err(ConfigError::Validation(
                "grid.large_from_level must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.palette.len(), 5);
        assert_eq!(config.reward, 10);
        assert_eq!(config.completion, CompletionRule::AllowOddLeftover);
    }

    #[test]
    fn test_parse_partial_toml() {
        let config: GameConfig = toml::from_str(
            r#"
            palette = ["cyan", "pink", "purple"]
            completion = "strict"

            [grid]
            large_from_level = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.palette, vec![Color::Cyan, Color::Pink, Color::Purple]);
        assert_eq!(config.completion, CompletionRule::Strict);
        assert_eq!(config.grid.large_from_level, 3);
        assert_eq!(config.grid.base_size, 3);
        assert_eq!(config.layout, Layout::default());
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_unknown_color_is_a_parse_error() {
        let result: Result<GameConfig, _> = toml::from_str(r#"palette = ["magenta"]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_errors() {
        let cases = [
            GameConfig {
                palette: Vec::new(),
                ..GameConfig::default()
            },
            GameConfig {
                palette: vec![Color::Red, Color::Blue, Color::Red],
                ..GameConfig::default()
            },
            GameConfig {
                layout: Layout {
                    cell_size: 30.0,
                    marker_size: 40.0,
                },
                ..GameConfig::default()
            },
            GameConfig {
                layout: Layout {
                    cell_size: 30.0,
                    marker_size: 0.0,
                },
                ..GameConfig::default()
            },
            GameConfig {
                layout: Layout {
                    cell_size: f32::NAN,
                    marker_size: 40.0,
                },
                ..GameConfig::default()
            },
            GameConfig {
                layout: Layout {
                    cell_size: f32::INFINITY,
                    marker_size: 40.0,
                },
                ..GameConfig::default()
            },
            GameConfig {
                layout: Layout {
                    cell_size: 80.0,
                    marker_size: f32::NAN,
                },
                ..GameConfig::default()
            },
            GameConfig {
                grid: ThresholdPolicy {
                    large_size: MAX_GRID_SIZE + 1,
                    ..ThresholdPolicy::default()
                },
                ..GameConfig::default()
            },
            GameConfig {
                grid: ThresholdPolicy {
                    base_size: 1,
                    ..ThresholdPolicy::default()
                },
                ..GameConfig::default()
            },
            GameConfig {
                grid: ThresholdPolicy {
                    large_from_level: 0,
                    ..ThresholdPolicy::default()
                },
                ..GameConfig::default()
            },
        ];
        for config in cases {
            assert!(
                matches!(config.validate(), Err(ConfigError::Validation(_))),
                "{:?}",
                config
            );
        }
    }

    #[test]
    fn test_nan_cell_size_from_toml_is_rejected() {
        let config: GameConfig = toml::from_str("[layout]\ncell_size = nan").unwrap();
        assert!(config.layout.cell_size.is_nan());
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_large_reward_is_accepted() {
        let config = GameConfig {
            reward: u32::MAX,
            ..GameConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_falls_back_to_defaults() {
        let path = Path::new("definitely/not/a/real/connect_dots.toml");
        assert!(matches!(
            GameConfig::load(path),
            Err(ConfigError::FileRead { .. })
        ));
        assert_eq!(GameConfig::load_or_default(path).unwrap(), GameConfig::default());
    }
}
