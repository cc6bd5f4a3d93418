//! Map and timer tuning
//!
//! Numeric knobs the engine layer would normally feed in from serialized
//! assets. Loaded from a JSON file when one is given; anything missing or
//! unreadable falls back to defaults with a warning rather than failing the
//! session.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::PlatformSide;

/// Shrink timer tuning
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimerConfig {
    /// Total round length in seconds
    pub game_duration_secs: f32,
    /// Fraction of the duration at which the first drop fires
    pub shrink_interval_multiplier: f32,
    /// Multiplicative cutoff decay per fire, in (0, 1)
    pub cutoff_decay_ratio: f32,
    /// Subtractive fallback step once the ratio step gets too small (seconds)
    pub cutoff_min_step: f32,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            game_duration_secs: GAME_DURATION_SECS,
            shrink_interval_multiplier: SHRINK_INTERVAL_MULTIPLIER,
            cutoff_decay_ratio: CUTOFF_DECAY_RATIO,
            cutoff_min_step: CUTOFF_MIN_STEP,
        }
    }
}

/// One platform of a multi-platform map
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlatformConfig {
    pub rows: usize,
    pub cols: usize,
    pub side: PlatformSide,
    /// Rows left standing once this platform stops shrinking
    pub min_remaining: usize,
}

/// Floor layout: one big grid, or several independent platforms
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LayoutConfig {
    /// Single rectangular arena shrinking ring by ring
    Single {
        rows: usize,
        cols: usize,
        min_remaining: usize,
    },
    /// Independent platforms, each peeling rows from its outer edge
    Platforms(Vec<PlatformConfig>),
}

/// Map geometry tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Tile edge length in world units
    pub tile_size: f32,
    pub layout: LayoutConfig,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            layout: LayoutConfig::Single {
                rows: GRID_ROWS,
                cols: GRID_COLS,
                min_remaining: MIN_REMAINING_SIDE,
            },
        }
    }
}

/// Full tuning set for one arena round
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub map: MapConfig,
    pub timer: TimerConfig,
}

impl Config {
    /// Load from a JSON file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match Self::try_load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Using default config ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Write the current tuning back out as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Config saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_through_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.timer.game_duration_secs, config.timer.game_duration_secs);
        match back.map.layout {
            LayoutConfig::Single { rows, cols, .. } => {
                assert_eq!(rows, GRID_ROWS);
                assert_eq!(cols, GRID_COLS);
            }
            LayoutConfig::Platforms(_) => panic!("default layout should be Single"),
        }
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = Config::load(Path::new("/nonexistent/ringfall.json"));
        assert_eq!(config.timer.game_duration_secs, GAME_DURATION_SECS);
    }
}
