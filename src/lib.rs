//! Hero's Mission - a hostage-rescue arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collision, combat, game phases)
//! - `view`: Projection of the simulation onto a 2D screen (draw list, HUD, captions)
//! - `settings`: Presentation preferences

pub mod settings;
pub mod sim;
pub mod view;

pub use settings::{CameraMode, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation rate. Every cooldown and timer below counts ticks at this rate.
    pub const TICK_RATE: u32 = 60;

    /// Screen dimensions (also the nominal arena extent)
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;
    /// Bullets expire this far beyond any screen edge
    pub const OFF_MAP_MARGIN: f32 = 100.0;

    /// Player defaults
    pub const PLAYER_START: (f32, f32) = (100.0, 300.0);
    pub const PLAYER_SPEED: f32 = 4.0;
    pub const PLAYER_MAX_HEALTH: u32 = 100;
    /// Radians of turn per pixel of horizontal pointer travel
    pub const MOUSE_SENSITIVITY: f32 = 0.003;
    /// Side of the square body box used for wall collision (player and enemies)
    pub const BODY_SIZE: f32 = 30.0;

    /// Ranged weapon
    pub const MUZZLE_OFFSET: f32 = 25.0;
    pub const GUN_COOLDOWN: u32 = 15;
    pub const BULLET_SPEED: f32 = 12.0;
    pub const BULLET_PROBE_SIZE: f32 = 6.0;
    pub const BULLET_HIT_RADIUS: f32 = 20.0;
    pub const FRIENDLY_BULLET_DAMAGE: u32 = 30;
    pub const HOSTILE_BULLET_DAMAGE: u32 = 15;

    /// Melee weapon
    pub const MELEE_RANGE: f32 = 60.0;
    pub const MELEE_ARC: f32 = 0.5;
    pub const MELEE_DAMAGE: u32 = 50;
    pub const MELEE_COOLDOWN: u32 = 30;

    /// Ticks between weapon toggles while the switch input is held
    pub const WEAPON_SWITCH_COOLDOWN: u32 = 20;

    /// Enemy defaults
    pub const ENEMY_MAX_HEALTH: u32 = 60;
    pub const ENEMY_SPEED: f32 = 1.2;
    pub const ENEMY_SHOOT_COOLDOWN: u32 = 90;
    /// Enemies closer than this hold position instead of advancing
    pub const STANDOFF_RADIUS: f32 = 200.0;
    /// Uniform aim error applied to enemy shots (± radians)
    pub const ENEMY_AIM_JITTER: f32 = 0.15;

    /// Line of sight sampling. Coarser sampling misses thin wall corners.
    pub const LOS_SAMPLES: u32 = 20;
    pub const LOS_PROBE_SIZE: f32 = 4.0;

    /// Hostages
    pub const RESCUE_RADIUS: f32 = 50.0;

    /// Slow motion is armed by a gunshot. Presentation only, never scales the timestep.
    pub const SLOW_MOTION_TICKS: u32 = 20;

    /// Timeskip phase length before the ending starts
    pub const TIMESKIP_TICKS: u32 = 200;
}

/// Wrap an angle into (-π, π]
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    let wrapped = PI - (PI - angle).rem_euclid(TAU);
    // rem_euclid may round up to TAU itself
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

/// Absolute angular distance between two headings, in [0, π]
#[inline]
pub fn angle_between(a: f32, b: f32) -> f32 {
    wrap_angle(a - b).abs()
}

/// Rotate a point about the origin by `angle` radians
#[inline]
pub fn rotate_point(p: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    Vec2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos)
}

/// Unit vector pointing along `angle`
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
