//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (roster and spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod combat;
pub mod entities;
pub mod geometry;
pub mod state;
pub mod tick;

pub use autopilot::Autopilot;
pub use combat::{AttackOutcome, Impact, enemy_try_fire, player_attack, resolve_bullet_impact};
pub use entities::{Bullet, Enemy, Hostage, MoveIntent, Player, Weapon, try_move};
pub use geometry::{Rect, has_line_of_sight, hits_any_wall, rects_overlap};
pub use state::{
    ARENA_WALLS, ENEMY_SPAWNS, GamePhase, GameState, HOSTAGE_SPAWNS, MissionState, arena_walls,
};
pub use tick::{TickInput, tick};
