//! Arena state
//!
//! Wires the round together: the shrink timer, the map controller, the drop
//! bus and the tiles. Everything is single-threaded and tick-driven; tiles
//! are `Rc<RefCell<...>>` so they can be both owned here and registered on
//! the bus.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::tile_coords;
use super::events::EventBus;
use super::map::{MapController, MapLayout};
use super::ring::TileIndex;
use super::tile::Tile;
use super::timer::ShrinkTimer;

/// Phase of the arena round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArenaPhase {
    /// Built but not started
    Setup,
    /// Round in progress
    Running,
    /// Timer expired and every released tile has fallen
    Finished,
}

/// Complete state for one arena round
#[derive(Debug)]
pub struct ArenaState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: ArenaPhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub timer: ShrinkTimer,
    pub map: MapController,
    pub bus: EventBus,
    /// All tiles, sorted by index for deterministic iteration
    pub tiles: Vec<Rc<RefCell<Tile>>>,
}

impl ArenaState {
    /// Build the arena from config and register every tile on the drop bus
    pub fn new(seed: u64, config: &Config) -> Self {
        let layout = MapLayout::from_config(&config.map);
        let bus = EventBus::new();

        let tiles: Vec<_> = tile_positions(&layout, config.map.tile_size)
            .into_iter()
            .enumerate()
            .map(|(index, pos)| Rc::new(RefCell::new(Tile::new(index, pos))))
            .collect();
        for tile in &tiles {
            bus.register(tile.clone());
        }

        log::info!("Arena built: {} tiles, seed {}", tiles.len(), seed);

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: ArenaPhase::Setup,
            time_ticks: 0,
            timer: ShrinkTimer::new(&config.timer),
            map: MapController::new(layout),
            bus,
            tiles,
        }
    }

    /// Start the round countdown
    pub fn start(&mut self) {
        if self.phase == ArenaPhase::Setup {
            self.timer.start();
            self.phase = ArenaPhase::Running;
        }
    }

    /// Tiles that have fallen past the kill plane
    pub fn fallen_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.borrow().fallen).count()
    }

    /// Diagnostic view for the HUD/UI layer
    pub fn snapshot(&self) -> ArenaSnapshot {
        ArenaSnapshot {
            phase: self.phase,
            time_ticks: self.time_ticks,
            time_remaining: self.timer.time_remaining,
            drop_round: self.map.drop_round(),
            dropped_count: self.map.dropped_count(),
            fallen_count: self.fallen_count(),
            standing_count: self.map.tile_count() - self.map.dropped_count(),
            teleporter_index: self.map.teleporter_index(),
        }
    }
}

/// Serializable diagnostics snapshot exposed to the UI layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    pub phase: ArenaPhase,
    pub time_ticks: u64,
    pub time_remaining: f32,
    pub drop_round: usize,
    pub dropped_count: usize,
    pub fallen_count: usize,
    pub standing_count: usize,
    pub teleporter_index: Option<TileIndex>,
}

/// Planar centre position for every tile index of a layout.
///
/// The single arena is centred on the origin. Platforms keep their own
/// row-major layout and are stacked along y with a one-tile gap, in
/// declaration order.
fn tile_positions(layout: &MapLayout, tile_size: f32) -> Vec<Vec2> {
    match layout {
        MapLayout::Single(plan) => {
            let x0 = -(plan.cols as f32 - 1.0) / 2.0 * tile_size;
            let y0 = -(plan.rows as f32 - 1.0) / 2.0 * tile_size;
            (0..plan.tile_count())
                .map(|index| {
                    let (row, col) = tile_coords(index, plan.cols);
                    Vec2::new(x0 + col as f32 * tile_size, y0 + row as f32 * tile_size)
                })
                .collect()
        }
        MapLayout::Platforms(platforms) => {
            let mut positions = Vec::new();
            let mut y_origin = 0.0;
            for plat in platforms {
                let x0 = -(plat.cols as f32 - 1.0) / 2.0 * tile_size;
                for index in 0..plat.tile_count() {
                    let (row, col) = tile_coords(index, plat.cols);
                    positions.push(Vec2::new(
                        x0 + col as f32 * tile_size,
                        y_origin + row as f32 * tile_size,
                    ));
                }
                // One-tile gap between platforms
                y_origin += (plat.rows + 1) as f32 * tile_size;
            }
            positions
        }
    }
}
