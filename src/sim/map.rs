//! Map controller
//!
//! Owns the logical floor layout and the drop round, decides which tile
//! indices go in each shrink event, and keeps the dropped-so-far bookkeeping
//! the HUD reads. On platform maps it also relocates the teleporter to a
//! random still-standing tile after every shrink.

use rand::Rng;
use rand_pcg::Pcg32;

use crate::config::{LayoutConfig, MapConfig};
use super::ring::{GridPlan, Platform, TileIndex};

/// Floor layout variants
#[derive(Debug, Clone)]
pub enum MapLayout {
    /// One rectangular arena shrinking ring by ring
    Single(GridPlan),
    /// Independent platforms peeling rows from their outer edges
    Platforms(Vec<Platform>),
}

impl MapLayout {
    /// Build the layout from config. Platform index blocks are assigned
    /// contiguously in declaration order.
    pub fn from_config(config: &MapConfig) -> Self {
        match &config.layout {
            LayoutConfig::Single {
                rows,
                cols,
                min_remaining,
            } => Self::Single(GridPlan::new(*rows, *cols, *min_remaining)),
            LayoutConfig::Platforms(specs) => {
                let mut first_index = 0;
                let platforms = specs
                    .iter()
                    .map(|spec| {
                        let plat = Platform::new(
                            first_index,
                            spec.rows,
                            spec.cols,
                            spec.side,
                            spec.min_remaining,
                        );
                        first_index += plat.tile_count();
                        plat
                    })
                    .collect();
                Self::Platforms(platforms)
            }
        }
    }

    /// Total tiles across the whole map
    pub fn tile_count(&self) -> usize {
        match self {
            Self::Single(plan) => plan.tile_count(),
            Self::Platforms(platforms) => platforms.iter().map(Platform::tile_count).sum(),
        }
    }

    fn band_indices(&self, drop_round: usize) -> Vec<TileIndex> {
        match self {
            Self::Single(plan) => plan.ring_indices(drop_round),
            Self::Platforms(platforms) => platforms
                .iter()
                .flat_map(|p| p.edge_row_indices(drop_round))
                .collect(),
        }
    }
}

/// Owner of the shrink progression for one arena round
#[derive(Debug)]
pub struct MapController {
    layout: MapLayout,
    drop_round: usize,
    exhausted: bool,
    /// Every index dropped so far, in drop order (diagnostics/HUD)
    dropped: Vec<TileIndex>,
    /// Current teleporter tile on platform maps
    teleporter_index: Option<TileIndex>,
}

impl MapController {
    pub fn new(layout: MapLayout) -> Self {
        Self {
            layout,
            drop_round: 0,
            exhausted: false,
            dropped: Vec::new(),
            teleporter_index: None,
        }
    }

    #[inline]
    pub fn layout(&self) -> &MapLayout {
        &self.layout
    }

    #[inline]
    pub fn tile_count(&self) -> usize {
        self.layout.tile_count()
    }

    /// Shrink events executed so far
    #[inline]
    pub fn drop_round(&self) -> usize {
        self.drop_round
    }

    /// True once no further shrink can produce tiles
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Indices dropped so far, in drop order
    #[inline]
    pub fn dropped_indices(&self) -> &[TileIndex] {
        &self.dropped
    }

    #[inline]
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }

    #[inline]
    pub fn teleporter_index(&self) -> Option<TileIndex> {
        self.teleporter_index
    }

    /// Indices still standing, ascending
    pub fn standing_indices(&self) -> Vec<TileIndex> {
        let mut dropped = vec![false; self.tile_count()];
        for &i in &self.dropped {
            dropped[i] = true;
        }
        (0..self.tile_count()).filter(|&i| !dropped[i]).collect()
    }

    /// Compute the next band of tiles to drop and advance the round.
    ///
    /// Returns the payload for the drop event, or an empty vec once the map
    /// is exhausted. An exhausted call is a pure no-op: the round does not
    /// advance and no state changes.
    pub fn shrink_map(&mut self, rng: &mut Pcg32) -> Vec<TileIndex> {
        if self.exhausted {
            return Vec::new();
        }

        let indices = self.layout.band_indices(self.drop_round);
        if indices.is_empty() {
            self.exhausted = true;
            log::info!(
                "Map exhausted after {} rounds ({} tiles dropped)",
                self.drop_round,
                self.dropped.len()
            );
            return Vec::new();
        }

        self.drop_round += 1;
        self.dropped.extend_from_slice(&indices);
        log::debug!(
            "Shrink round {}: dropping {} tiles",
            self.drop_round,
            indices.len()
        );

        if matches!(self.layout, MapLayout::Platforms(_)) {
            self.relocate_teleporter(rng);
        }

        indices
    }

    /// Move the teleporter to a random tile that is still standing
    fn relocate_teleporter(&mut self, rng: &mut Pcg32) {
        let standing = self.standing_indices();
        self.teleporter_index = if standing.is_empty() {
            None
        } else {
            Some(standing[rng.random_range(0..standing.len())])
        };
    }
}
