//! Fixed timestep simulation tick
//!
//! One call advances the game by one frame at `TICK_RATE`. The mission steps
//! run in a fixed order; changing it changes outcomes.

use super::combat::{AttackOutcome, Impact, enemy_try_fire, player_attack, resolve_bullet_impact};
use super::entities::MoveIntent;
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    /// Horizontal pointer travel since the last tick, in pixels
    pub mouse_dx: f32,
    /// Fire/swing. True only on the tick the trigger was pressed.
    pub fire: bool,
    /// Weapon toggle, held. Rate-limited by the player's switch cooldown.
    pub switch_weapon: bool,
    /// Only honoured in the Death phase
    pub restart: bool,
    /// Quit request; handled by the driver loop at a tick boundary
    pub quit: bool,
}

impl TickInput {
    pub fn move_intent(&self) -> MoveIntent {
        MoveIntent {
            forward: self.forward,
            back: self.back,
            left: self.left,
            right: self.right,
        }
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.time_ticks += 1;

    match state.phase {
        GamePhase::Mission => mission_tick(state, input),
        GamePhase::Death => {
            if input.restart {
                state.restart();
            } else {
                state.death_ticks = state.death_ticks.saturating_add(1);
            }
        }
        GamePhase::Timeskip => {
            state.timeskip_ticks += 1;
            if state.timeskip_ticks >= TIMESKIP_TICKS {
                state.enter(GamePhase::Ending);
            }
        }
        GamePhase::Ending => {
            state.ending_ticks = state.ending_ticks.saturating_add(1);
        }
    }
}

fn mission_tick(state: &mut GameState, input: &TickInput) {
    let GameState { mission, rng, .. } = &mut *state;

    // 1. Movement and aim
    mission.player.move_by(input.move_intent(), &mission.walls);
    mission.player.rotate(input.mouse_dx);

    // 2. Death from last tick's damage
    if mission.player.is_dead() {
        state.enter(GamePhase::Death);
        return;
    }

    // 3. Weapon toggle
    if mission.player.update_weapon_switch(input.switch_weapon) {
        log::debug!("Switched to {}", mission.player.weapon.as_str());
    }

    // 4. Fire or swing
    if input.fire {
        match player_attack(&mut mission.player, &mut mission.enemies, &mut mission.bullets) {
            AttackOutcome::Shot => {
                mission.slow_motion = true;
                mission.slow_motion_ticks = SLOW_MOTION_TICKS;
            }
            AttackOutcome::Swing { hit: true, killed } => {
                log::debug!("Knife hit (killed: {killed})");
            }
            AttackOutcome::Swing { hit: false, .. } | AttackOutcome::NotReady => {}
        }
    }

    // 5. Slow motion countdown
    if mission.slow_motion {
        mission.slow_motion_ticks = mission.slow_motion_ticks.saturating_sub(1);
        if mission.slow_motion_ticks == 0 {
            mission.slow_motion = false;
        }
    }

    // 6. Bullets: advance, cull, then impacts. Walls stop a bullet without
    // counting as a hit.
    let walls = &mission.walls;
    let player = &mut mission.player;
    let enemies = &mut mission.enemies;
    mission.bullets.retain_mut(|bullet| {
        if !bullet.active {
            return false;
        }
        bullet.update(walls);
        if !bullet.active || bullet.is_off_map() {
            return false;
        }
        match resolve_bullet_impact(bullet, player, enemies) {
            Impact::Miss => true,
            Impact::Enemy { .. } | Impact::Player => false,
        }
    });

    mission.check_bullets();

    // 7. Enemies advance and shoot. New bullets fly from next tick.
    let player_pos = mission.player.pos;
    for enemy in mission.enemies.iter_mut() {
        enemy.update(player_pos, &mission.walls);
        if let Some(bullet) = enemy_try_fire(enemy, player_pos, &mission.walls, rng) {
            mission.bullets.push(bullet);
        }
    }

    // 8. Rescue, only once the area is clear
    if mission.enemies.is_empty() {
        let total = mission.hostages.len();
        for hostage in mission.hostages.iter_mut().filter(|h| !h.saved) {
            if hostage.pos.distance(player_pos) < RESCUE_RADIUS {
                hostage.saved = true;
                mission.hostages_saved += 1;
                log::debug!("Hostage rescued ({}/{total})", mission.hostages_saved);
            }
        }
    }

    mission.check_invariants();

    // 9. Win
    if mission.all_hostages_saved() {
        state.enter(GamePhase::Timeskip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::{Bullet, Enemy, Hostage, Weapon};
    use glam::Vec2;

    fn fire() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    /// Mission with no enemies or hostages
    fn empty_state() -> GameState {
        let mut state = GameState::new(12345);
        state.mission.enemies.clear();
        state.mission.hostages.clear();
        state
    }

    #[test]
    fn test_idle_tick_keeps_mission() {
        let mut state = GameState::new(12345);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Mission);
        assert_eq!(state.time_ticks, 1);
        assert!(state.mission.enemies.iter().all(|e| e.shoot_timer == 1));
    }

    #[test]
    fn test_gunshot_arms_slow_motion() {
        let mut state = GameState::new(12345);
        tick(&mut state, &fire());
        assert!(state.mission.slow_motion);
        assert_eq!(state.mission.slow_motion_ticks, SLOW_MOTION_TICKS - 1);
        assert_eq!(state.mission.bullets.len(), 1);

        for _ in 0..SLOW_MOTION_TICKS {
            tick(&mut state, &TickInput::default());
        }
        assert!(!state.mission.slow_motion);
    }

    #[test]
    fn test_knife_swing_does_not_arm_slow_motion() {
        let mut state = GameState::new(12345);
        state.mission.player.weapon = Weapon::Melee;
        tick(&mut state, &fire());
        assert!(!state.mission.slow_motion);
        assert!(state.mission.bullets.is_empty());
    }

    #[test]
    fn test_bullet_hits_enemy_fifteen_units_out() {
        let mut state = empty_state();
        // Muzzle at x=125; after its first step the bullet sits at x=137, 15 short of the enemy
        state.mission.enemies.push(Enemy::new(Vec2::new(152.0, 300.0)));
        state.mission.hostages.push(Hostage::new(Vec2::new(700.0, 100.0)));

        tick(&mut state, &fire());

        assert!(state.mission.bullets.is_empty());
        assert_eq!(
            state.mission.enemies[0].health,
            ENEMY_MAX_HEALTH - FRIENDLY_BULLET_DAMAGE
        );
    }

    #[test]
    fn test_off_map_bullet_is_culled() {
        let mut state = empty_state();
        state.mission.hostages.push(Hostage::new(Vec2::new(700.0, 100.0)));
        state
            .mission
            .bullets
            .push(Bullet::new(Vec2::new(-150.0, 300.0), 0.0, true));
        tick(&mut state, &TickInput::default());
        assert!(state.mission.bullets.is_empty());
    }

    #[test]
    fn test_wall_stops_bullet_without_damage() {
        let mut state = empty_state();
        state.mission.hostages.push(Hostage::new(Vec2::new(700.0, 100.0)));
        // Enemy sits just behind the wall face the bullet strikes
        state.mission.enemies.push(Enemy::new(Vec2::new(255.0, 300.0)));
        state
            .mission
            .bullets
            .push(Bullet::new(Vec2::new(238.0, 300.0), 0.0, true));
        tick(&mut state, &TickInput::default());
        assert!(state.mission.bullets.is_empty());
        assert_eq!(state.mission.enemies[0].health, ENEMY_MAX_HEALTH);
    }

    #[test]
    fn test_two_bullets_can_kill_and_miss_in_one_pass() {
        let mut state = empty_state();
        state.mission.hostages.push(Hostage::new(Vec2::new(700.0, 100.0)));
        let mut enemy = Enemy::new(Vec2::new(700.0, 560.0));
        enemy.health = 20;
        state.mission.enemies.push(enemy);
        // Both bullets converge on the same enemy; the first kills it
        state
            .mission
            .bullets
            .push(Bullet::new(Vec2::new(688.0, 560.0), 0.0, true));
        state
            .mission
            .bullets
            .push(Bullet::new(Vec2::new(712.0, 560.0), std::f32::consts::PI, true));

        tick(&mut state, &TickInput::default());
        assert!(state.mission.enemies.is_empty());
        // The second bullet found nothing to hit and keeps flying
        assert_eq!(state.mission.bullets.len(), 1);
    }

    #[test]
    fn test_hostile_bullet_damage_leads_to_death_next_tick() {
        let mut state = empty_state();
        state.mission.hostages.push(Hostage::new(Vec2::new(700.0, 100.0)));
        state.mission.player.health = HOSTILE_BULLET_DAMAGE;
        state
            .mission
            .bullets
            .push(Bullet::new(Vec2::new(88.0, 300.0), 0.0, false));

        tick(&mut state, &TickInput::default());
        assert_eq!(state.mission.player.health, 0);
        assert_eq!(state.phase, GamePhase::Mission);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Death);
    }

    #[test]
    fn test_rescue_requires_empty_roster() {
        let mut state = GameState::new(12345);
        let mission = &mut state.mission;
        mission.enemies.truncate(1);
        mission.enemies[0].pos = Vec2::new(700.0, 560.0);
        mission.hostages = vec![Hostage::new(Vec2::new(110.0, 300.0))];

        tick(&mut state, &TickInput::default());
        assert_eq!(state.mission.hostages_saved, 0);
        assert!(!state.mission.hostages[0].saved);

        state.mission.enemies.clear();
        tick(&mut state, &TickInput::default());
        assert_eq!(state.mission.hostages_saved, 1);
        assert_eq!(state.phase, GamePhase::Timeskip);
    }

    #[test]
    fn test_rescue_counts_each_hostage_once() {
        let mut state = empty_state();
        state.mission.hostages = vec![
            Hostage::new(Vec2::new(110.0, 300.0)),
            Hostage::new(Vec2::new(700.0, 100.0)),
        ];
        for _ in 0..5 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.mission.hostages_saved, 1);
        assert_eq!(state.phase, GamePhase::Mission);
    }

    #[test]
    fn test_win_transitions_on_exact_tick() {
        let mut state = empty_state();
        state.mission.hostages = vec![
            Hostage::new(Vec2::new(100.0, 300.0)),
            Hostage::new(Vec2::new(100.0, 350.0)),
        ];
        // First tick saves only the hostage already in reach
        tick(&mut state, &TickInput::default());
        assert_eq!(state.mission.hostages_saved, 1);
        assert_eq!(state.phase, GamePhase::Mission);

        let down = TickInput {
            back: true,
            ..Default::default()
        };
        // 4 px per tick: distance drops below 50 once y > 300
        tick(&mut state, &down);
        assert_eq!(state.mission.hostages_saved, 2);
        assert_eq!(state.phase, GamePhase::Timeskip);
    }

    #[test]
    fn test_timeskip_then_ending() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Timeskip;
        for _ in 0..TIMESKIP_TICKS - 1 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.phase, GamePhase::Timeskip);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Ending);

        // Ending is terminal, even with a restart request
        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart);
        assert_eq!(state.phase, GamePhase::Ending);
        assert_eq!(state.ending_ticks, 1);
    }

    #[test]
    fn test_death_waits_for_restart() {
        let mut state = GameState::new(1);
        state.mission.player.health = 0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Death);

        for _ in 0..10 {
            tick(&mut state, &fire());
        }
        assert_eq!(state.phase, GamePhase::Death);
        assert_eq!(state.death_ticks, 10);

        let restart = TickInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &restart);
        assert_eq!(state.phase, GamePhase::Mission);
        assert_eq!(state.mission.player.health, PLAYER_MAX_HEALTH);
        assert_eq!(state.mission.enemies.len(), 5);
        assert_eq!(state.death_ticks, 0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            TickInput {
                mouse_dx: 40.0,
                right: true,
                ..Default::default()
            },
            fire(),
            TickInput {
                back: true,
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..100 {
            for input in &inputs {
                tick(&mut state1, input);
                tick(&mut state2, input);
            }
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(state1.mission.bullets.len(), state2.mission.bullets.len());
        assert_eq!(state1.mission.player.health, state2.mission.player.health);
        for (a, b) in state1.mission.bullets.iter().zip(&state2.mission.bullets) {
            assert_eq!(a.pos, b.pos);
        }
    }

    #[test]
    fn test_walking_off_screen_keeps_running() {
        let mut state = GameState::new(1);
        let up = TickInput {
            forward: true,
            ..Default::default()
        };
        let east = TickInput {
            right: true,
            ..Default::default()
        };
        for _ in 0..50 {
            tick(&mut state, &up);
        }
        for _ in 0..400 {
            tick(&mut state, &east);
        }
        assert!(
            state.phase == GamePhase::Death
                || state.mission.player.pos.x > SCREEN_WIDTH + OFF_MAP_MARGIN
        );
    }

    #[test]
    fn test_off_map_enemy_shot_culled_next_pass() {
        let mut state = GameState::new(1);
        state.mission.player.pos = Vec2::new(1500.0, 300.0);
        let mut enemy = Enemy::new(Vec2::new(1000.0, 300.0));
        enemy.shoot_timer = ENEMY_SHOOT_COOLDOWN;
        state.mission.enemies = vec![enemy];

        tick(&mut state, &TickInput::default());
        assert_eq!(state.mission.bullets.len(), 1);
        assert!(state.mission.bullets[0].is_off_map());

        tick(&mut state, &TickInput::default());
        assert!(state.mission.bullets.is_empty());
        assert_eq!(state.phase, GamePhase::Mission);
    }
}
