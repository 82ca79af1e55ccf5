//! Entity records and their per-tick update rules
//!
//! Each entity owns its own mutable timers (cooldowns, shoot timers). The
//! mission state owns the collections and decides when entities die.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, hits_any_wall};
use crate::consts::*;
use crate::heading;

/// Equipped weapon. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Weapon {
    #[default]
    Ranged,
    Melee,
}

impl Weapon {
    pub fn toggled(self) -> Self {
        match self {
            Weapon::Ranged => Weapon::Melee,
            Weapon::Melee => Weapon::Ranged,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Weapon::Ranged => "GUN",
            Weapon::Melee => "KNIFE",
        }
    }
}

/// Axis-aligned movement intent for one tick (screen axes, not facing-relative)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    pub const FORWARD: Self = Self::single(true, false, false, false);
    pub const BACK: Self = Self::single(false, true, false, false);
    pub const LEFT: Self = Self::single(false, false, true, false);
    pub const RIGHT: Self = Self::single(false, false, false, true);

    const fn single(forward: bool, back: bool, left: bool, right: bool) -> Self {
        Self {
            forward,
            back,
            left,
            right,
        }
    }

    /// Displacement for this intent at `speed`. Forward is screen-up (-y).
    pub fn delta(&self, speed: f32) -> Vec2 {
        let mut d = Vec2::ZERO;
        if self.forward {
            d.y -= speed;
        }
        if self.back {
            d.y += speed;
        }
        if self.left {
            d.x -= speed;
        }
        if self.right {
            d.x += speed;
        }
        d
    }
}

/// Apply `delta` to `pos` unless the body box at the destination touches a wall.
/// Returns true if the move was accepted. A rejected move leaves `pos` untouched.
pub fn try_move(pos: &mut Vec2, delta: Vec2, walls: &[Rect]) -> bool {
    let target = *pos + delta;
    if hits_any_wall(&Rect::centered(target, BODY_SIZE), walls) {
        return false;
    }
    *pos = target;
    true
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Facing angle in radians. Left unwrapped; compare through `angle_between`.
    pub angle: f32,
    pub speed: f32,
    pub health: u32,
    pub max_health: u32,
    pub weapon: Weapon,
    /// Ticks until the next shot or swing is allowed
    pub shoot_cooldown: u32,
    /// Ticks until the weapon can be toggled again
    pub weapon_switch_cooldown: u32,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            angle: 0.0,
            speed: PLAYER_SPEED,
            health: PLAYER_MAX_HEALTH,
            max_health: PLAYER_MAX_HEALTH,
            weapon: Weapon::Ranged,
            shoot_cooldown: 0,
            weapon_switch_cooldown: 0,
        }
    }

    /// Move along both axes at once, rolling the whole step back on wall contact.
    /// Also ticks down the attack cooldown.
    pub fn move_by(&mut self, intent: MoveIntent, walls: &[Rect]) {
        let delta = intent.delta(self.speed);
        if delta != Vec2::ZERO {
            try_move(&mut self.pos, delta, walls);
        }
        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
    }

    pub fn rotate(&mut self, mouse_dx: f32) {
        self.angle += mouse_dx * MOUSE_SENSITIVITY;
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    pub fn can_attack(&self) -> bool {
        self.shoot_cooldown == 0
    }

    /// Toggle weapons if the switch is requested and off cooldown, then tick the
    /// switch cooldown down. Returns true if the weapon changed.
    pub fn update_weapon_switch(&mut self, requested: bool) -> bool {
        let switched = requested && self.weapon_switch_cooldown == 0;
        if switched {
            self.weapon = self.weapon.toggled();
            self.weapon_switch_cooldown = WEAPON_SWITCH_COOLDOWN;
        }
        self.weapon_switch_cooldown = self.weapon_switch_cooldown.saturating_sub(1);
        switched
    }

    /// Muzzle point in front of the player along the facing angle
    pub fn muzzle(&self) -> Vec2 {
        self.pos + heading(self.angle) * MUZZLE_OFFSET
    }
}

/// A hostile soldier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub pos: Vec2,
    pub health: u32,
    pub max_health: u32,
    pub speed: f32,
    /// Ticks since the last shot
    pub shoot_timer: u32,
    /// The enemy may fire once `shoot_timer` exceeds this
    pub shoot_cooldown: u32,
}

impl Enemy {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            health: ENEMY_MAX_HEALTH,
            max_health: ENEMY_MAX_HEALTH,
            speed: ENEMY_SPEED,
            shoot_timer: 0,
            shoot_cooldown: ENEMY_SHOOT_COOLDOWN,
        }
    }

    /// Close in on the player until inside the standoff radius
    pub fn update(&mut self, player_pos: Vec2, walls: &[Rect]) {
        let to_player = player_pos - self.pos;
        let dist = to_player.length();
        if dist > STANDOFF_RADIUS {
            try_move(&mut self.pos, to_player / dist * self.speed, walls);
        }
        self.shoot_timer += 1;
    }

    pub fn ready_to_fire(&self) -> bool {
        self.shoot_timer > self.shoot_cooldown
    }

    pub fn angle_to(&self, target: Vec2) -> f32 {
        let d = target - self.pos;
        d.y.atan2(d.x)
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    pub fn health_fraction(&self) -> f32 {
        self.health as f32 / self.max_health as f32
    }
}

/// A captive waiting to be escorted out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostage {
    pub pos: Vec2,
    /// Flips once from false to true
    pub saved: bool,
}

impl Hostage {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, saved: false }
    }
}

/// A projectile in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    pub pos: Vec2,
    pub angle: f32,
    pub speed: f32,
    /// Fired by the player (true) or by an enemy (false)
    pub friendly: bool,
    pub active: bool,
}

impl Bullet {
    pub fn new(pos: Vec2, angle: f32, friendly: bool) -> Self {
        Self {
            pos,
            angle,
            speed: BULLET_SPEED,
            friendly,
            active: true,
        }
    }

    /// Advance one tick. Touching a wall deactivates the bullet.
    pub fn update(&mut self, walls: &[Rect]) {
        self.pos += heading(self.angle) * self.speed;
        if hits_any_wall(&Rect::centered(self.pos, BULLET_PROBE_SIZE), walls) {
            self.active = false;
        }
    }

    pub fn is_off_map(&self) -> bool {
        self.pos.x < -OFF_MAP_MARGIN
            || self.pos.x > SCREEN_WIDTH + OFF_MAP_MARGIN
            || self.pos.y < -OFF_MAP_MARGIN
            || self.pos.y > SCREEN_HEIGHT + OFF_MAP_MARGIN
    }
}
