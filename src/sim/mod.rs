//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by tile index)
//! - No rendering or platform dependencies

pub mod events;
pub mod map;
pub mod ring;
pub mod state;
pub mod tick;
pub mod tile;
pub mod timer;

pub use events::{DropPayload, DropListener, EventBus, ListenerId};
pub use map::{MapController, MapLayout};
pub use ring::{GridPlan, Platform, PlatformSide, TileIndex};
pub use state::{ArenaPhase, ArenaSnapshot, ArenaState};
pub use tick::tick;
pub use tile::Tile;
pub use timer::{ShrinkTimer, TimerPhase};
