//! Floor tiles
//!
//! A tile sits frozen at floor height until a shrink event names its index,
//! at which point its vertical constraint is released and it falls under
//! gravity until it crosses the kill plane.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{KILL_PLANE_Y, TILE_GRAVITY};
use super::events::{DropListener, DropPayload, EventBus};
use super::ring::TileIndex;

/// One floor tile of the arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    /// Fixed grid index, assigned at map setup
    pub index: TileIndex,
    /// Planar centre position (world units)
    pub pos: Vec2,
    /// Vertical position; 0 is floor level
    pub height: f32,
    /// Downward speed once released
    pub fall_vel: f32,
    released: bool,
    /// Set once the tile has fallen past the kill plane
    pub fallen: bool,
}

impl Tile {
    pub fn new(index: TileIndex, pos: Vec2) -> Self {
        Self {
            index,
            pos,
            height: 0.0,
            fall_vel: 0.0,
            released: false,
            fallen: false,
        }
    }

    /// Whether the vertical constraint has been released
    #[inline]
    pub fn released(&self) -> bool {
        self.released
    }

    /// Release the vertical constraint so the tile can fall.
    ///
    /// Idempotent: releasing an already-released tile changes nothing, so a
    /// duplicate index in a later payload is harmless.
    pub fn release_constraint(&mut self) {
        self.released = true;
    }

    /// Gravity integration for one tick. Frozen tiles don't move.
    pub fn integrate(&mut self, dt: f32) {
        if !self.released || self.fallen {
            return;
        }
        self.fall_vel += TILE_GRAVITY * dt;
        self.height -= self.fall_vel * dt;
        if self.height < KILL_PLANE_Y {
            self.fallen = true;
        }
    }
}

impl DropListener for Tile {
    fn on_event_raised(&mut self, _bus: &EventBus, payload: &DropPayload) {
        if payload.contains(&self.index) {
            self.release_constraint();
        }
    }
}
