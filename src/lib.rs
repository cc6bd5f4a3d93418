//! Ringfall - shrinking-floor core for a top-down arena game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ring selection, shrink timer, tile drops)
//! - `config`: Data-driven map and timer tuning

pub mod config;
pub mod sim;

pub use config::{Config, MapConfig, TimerConfig};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz; falling tiles don't need more)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default single-arena grid dimensions
    pub const GRID_ROWS: usize = 10;
    pub const GRID_COLS: usize = 10;
    /// Stop shrinking once the remaining side is at or below this
    pub const MIN_REMAINING_SIDE: usize = 2;

    /// Tile edge length in world units
    pub const TILE_SIZE: f32 = 2.0;

    /// Round duration and shrink pacing defaults
    pub const GAME_DURATION_SECS: f32 = 180.0;
    /// First drop fires when remaining time crosses duration * this fraction
    pub const SHRINK_INTERVAL_MULTIPLIER: f32 = 0.8;
    /// Decay ratio applied to the drop cutoff after each fire
    pub const CUTOFF_DECAY_RATIO: f32 = 0.8;
    /// Minimum absolute cutoff decrease per fire (seconds)
    pub const CUTOFF_MIN_STEP: f32 = 5.0;

    /// Gravity applied to released tiles (world units / s²)
    pub const TILE_GRAVITY: f32 = 30.0;
    /// Height below which a falling tile counts as gone
    pub const KILL_PLANE_Y: f32 = -40.0;
}

/// Row-major tile index for (row, col) on a grid `cols` wide
#[inline]
pub fn tile_index(row: usize, col: usize, cols: usize) -> usize {
    row * cols + col
}

/// Inverse of [`tile_index`]: (row, col) for a row-major index
#[inline]
pub fn tile_coords(index: usize, cols: usize) -> (usize, usize) {
    (index / cols, index % cols)
}
