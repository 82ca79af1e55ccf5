//! Combat resolution: gunfire, knife swings, and bullet impacts
//!
//! Dead enemies are removed from the roster in the same call that lands the
//! killing blow, so later bullets in the same pass never see them.

use glam::Vec2;
use rand::Rng;

use super::entities::{Bullet, Enemy, Player, Weapon};
use super::geometry::{Rect, has_line_of_sight};
use crate::angle_between;
use crate::consts::*;

/// What a fire command produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    /// Weapon still cooling down
    NotReady,
    /// A friendly bullet left the muzzle
    Shot,
    /// Knife swing; `hit` if an enemy was in the arc, `killed` if it died
    Swing { hit: bool, killed: bool },
}

/// Result of testing one bullet against its targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    Miss,
    Enemy { killed: bool },
    Player,
}

/// Execute a fire command with whichever weapon is equipped
pub fn player_attack(
    player: &mut Player,
    enemies: &mut Vec<Enemy>,
    bullets: &mut Vec<Bullet>,
) -> AttackOutcome {
    if !player.can_attack() {
        return AttackOutcome::NotReady;
    }
    match player.weapon {
        Weapon::Ranged => {
            bullets.push(Bullet::new(player.muzzle(), player.angle, true));
            player.shoot_cooldown = GUN_COOLDOWN;
            AttackOutcome::Shot
        }
        Weapon::Melee => {
            let (hit, killed) = match melee_target(player, enemies) {
                Some(idx) => (true, strike_enemy(enemies, idx, MELEE_DAMAGE)),
                None => (false, false),
            };
            player.shoot_cooldown = MELEE_COOLDOWN;
            AttackOutcome::Swing { hit, killed }
        }
    }
}

/// First enemy (roster order) inside the knife's reach and facing arc
pub fn melee_target(player: &Player, enemies: &[Enemy]) -> Option<usize> {
    enemies.iter().position(|enemy| {
        let d = enemy.pos - player.pos;
        let angle_to_enemy = d.y.atan2(d.x);
        d.length() < MELEE_RANGE && angle_between(angle_to_enemy, player.angle) < MELEE_ARC
    })
}

/// Damage the enemy at `idx`, dropping it from the roster if that kills it.
/// Returns true on a kill.
pub fn strike_enemy(enemies: &mut Vec<Enemy>, idx: usize, damage: u32) -> bool {
    let enemy = &mut enemies[idx];
    enemy.take_damage(damage);
    if enemy.is_dead() {
        enemies.remove(idx);
        log::debug!("Enemy down, {} remaining", enemies.len());
        true
    } else {
        false
    }
}

/// Let an enemy shoot at the player if it has waited long enough and can see
/// them. Aim is perturbed by a uniform jitter.
pub fn enemy_try_fire<R: Rng>(
    enemy: &mut Enemy,
    player_pos: Vec2,
    walls: &[Rect],
    rng: &mut R,
) -> Option<Bullet> {
    if !enemy.ready_to_fire() || !has_line_of_sight(enemy.pos, player_pos, walls) {
        return None;
    }
    let jitter = rng.random_range(-ENEMY_AIM_JITTER..=ENEMY_AIM_JITTER);
    let angle = enemy.angle_to(player_pos) + jitter;
    enemy.shoot_timer = 0;
    Some(Bullet::new(enemy.pos, angle, false))
}

/// Test an active bullet against the side it can hurt. A hit deactivates the
/// bullet; friendly bullets hurt at most one enemy.
pub fn resolve_bullet_impact(
    bullet: &mut Bullet,
    player: &mut Player,
    enemies: &mut Vec<Enemy>,
) -> Impact {
    if bullet.friendly {
        let Some(idx) = enemies
            .iter()
            .position(|e| e.pos.distance(bullet.pos) < BULLET_HIT_RADIUS)
        else {
            return Impact::Miss;
        };
        bullet.active = false;
        let killed = strike_enemy(enemies, idx, FRIENDLY_BULLET_DAMAGE);
        Impact::Enemy { killed }
    } else if player.pos.distance(bullet.pos) < BULLET_HIT_RADIUS {
        bullet.active = false;
        player.take_damage(HOSTILE_BULLET_DAMAGE);
        Impact::Player
    } else {
        Impact::Miss
    }
}
