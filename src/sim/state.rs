//! Game state and the fixed arena
//!
//! The arena, enemy roster, and hostage roster are compiled in. A restart
//! rebuilds everything from these tables.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{Bullet, Enemy, Hostage, Player};
use super::geometry::Rect;
use crate::consts::*;

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Mission,
    /// Player died; waits for a restart
    Death,
    /// Mission complete, "months later" interlude
    Timeskip,
    /// Closing celebration. Terminal.
    Ending,
}

/// Interior walls of the arena
pub const ARENA_WALLS: [Rect; 4] = [
    Rect::new(250.0, 150.0, 20.0, 300.0),
    Rect::new(400.0, 200.0, 150.0, 20.0),
    Rect::new(550.0, 350.0, 20.0, 150.0),
    Rect::new(200.0, 450.0, 200.0, 20.0),
];

/// Enemy spawn points, in roster order
pub const ENEMY_SPAWNS: [(f32, f32); 5] = [
    (600.0, 200.0),
    (700.0, 400.0),
    (650.0, 150.0),
    (500.0, 480.0),
    (550.0, 300.0),
];

pub const HOSTAGE_SPAWNS: [(f32, f32); 3] = [(680.0, 300.0), (720.0, 320.0), (650.0, 280.0)];

pub fn arena_walls() -> Vec<Rect> {
    ARENA_WALLS.to_vec()
}

/// Everything that lives and dies during one mission attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissionState {
    pub player: Player,
    /// Live enemies in roster order. Only shrinks.
    pub enemies: Vec<Enemy>,
    pub hostages: Vec<Hostage>,
    /// Active bullets in spawn order
    pub bullets: Vec<Bullet>,
    pub walls: Vec<Rect>,
    pub hostages_saved: usize,
    /// Set by a gunshot; drives presentation only
    pub slow_motion: bool,
    pub slow_motion_ticks: u32,
}

impl MissionState {
    /// Fresh mission with the compiled-in roster
    pub fn new() -> Self {
        Self {
            player: Player::new(Vec2::from(PLAYER_START)),
            enemies: ENEMY_SPAWNS
                .iter()
                .map(|&p| Enemy::new(Vec2::from(p)))
                .collect(),
            hostages: HOSTAGE_SPAWNS
                .iter()
                .map(|&p| Hostage::new(Vec2::from(p)))
                .collect(),
            bullets: Vec::new(),
            walls: arena_walls(),
            hostages_saved: 0,
            slow_motion: false,
            slow_motion_ticks: 0,
        }
    }

    pub fn total_hostages(&self) -> usize {
        self.hostages.len()
    }

    pub fn all_hostages_saved(&self) -> bool {
        self.hostages_saved >= self.hostages.len()
    }

    /// Every bullet left after a bullet pass is live and on the map. Enemy
    /// shots spawned later in the tick are culled on the next pass.
    pub fn check_bullets(&self) {
        assert!(
            self.bullets.iter().all(|b| b.active && !b.is_off_map()),
            "spent bullet survived the bullet pass"
        );
    }

    /// Fail fast on states the update rules should never produce
    pub fn check_invariants(&self) {
        assert!(
            self.hostages_saved <= self.hostages.len(),
            "saved {} of {} hostages",
            self.hostages_saved,
            self.hostages.len()
        );
        assert_eq!(
            self.hostages_saved,
            self.hostages.iter().filter(|h| h.saved).count(),
            "hostage counter out of sync"
        );
        assert!(self.player.health <= self.player.max_health);
        assert!(self.enemies.iter().all(|e| !e.is_dead()), "dead enemy in roster");
    }
}

impl Default for MissionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete game state: phase machine, per-phase timers, mission, and RNG
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub mission: MissionState,
    /// Ticks spent in each non-mission phase (presentation timers)
    pub death_ticks: u32,
    pub timeskip_ticks: u32,
    pub ending_ticks: u32,
    /// Simulation tick counter across the whole session
    pub time_ticks: u64,
    /// Source of enemy aim jitter
    pub rng: Pcg32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        log::info!("Mission start (seed {seed})");
        Self {
            seed,
            phase: GamePhase::Mission,
            mission: MissionState::new(),
            death_ticks: 0,
            timeskip_ticks: 0,
            ending_ticks: 0,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Full re-initialization after a death. The RNG keeps its stream so a
    /// retry does not replay identical enemy aim.
    pub fn restart(&mut self) {
        log::info!("Restarting mission");
        self.phase = GamePhase::Mission;
        self.mission = MissionState::new();
        self.death_ticks = 0;
        self.timeskip_ticks = 0;
        self.ending_ticks = 0;
    }

    /// Move to `phase`, logging the transition
    pub fn enter(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_roster() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Mission);
        assert_eq!(state.mission.enemies.len(), 5);
        assert_eq!(state.mission.hostages.len(), 3);
        assert_eq!(state.mission.walls.len(), 4);
        assert_eq!(state.mission.player.pos, Vec2::new(100.0, 300.0));
        assert!(state.mission.bullets.is_empty());
        state.mission.check_invariants();
    }

    #[test]
    fn test_restart_rebuilds_mission() {
        let mut state = GameState::new(1);
        state.mission.enemies.clear();
        state.mission.player.take_damage(500);
        state.phase = GamePhase::Death;
        state.death_ticks = 42;

        state.restart();
        assert_eq!(state.seed, 1);
        assert_eq!(state.phase, GamePhase::Mission);
        assert_eq!(state.death_ticks, 0);
        assert_eq!(state.mission.enemies.len(), 5);
        assert_eq!(state.mission.player.health, PLAYER_MAX_HEALTH);
    }

    #[test]
    #[should_panic(expected = "hostage counter out of sync")]
    fn test_invariant_check_catches_counter_drift() {
        let mut mission = MissionState::new();
        mission.hostages_saved = 1;
        mission.check_invariants();
    }
}
