//! Heads-up display snapshot

use glam::Vec2;
use serde::Serialize;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::{MissionState, Weapon};

/// Everything the HUD shows for one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hud {
    pub health: u32,
    pub max_health: u32,
    pub hostages_saved: usize,
    pub hostages_total: usize,
    pub enemies_remaining: usize,
    pub weapon: Weapon,
    /// Show the slow-motion banner and tint
    pub slow_motion: bool,
    pub crosshair: Vec2,
}

impl Hud {
    pub fn from_mission(mission: &MissionState) -> Self {
        Self {
            health: mission.player.health,
            max_health: mission.player.max_health,
            hostages_saved: mission.hostages_saved,
            hostages_total: mission.total_hostages(),
            enemies_remaining: mission.enemies.len(),
            weapon: mission.player.weapon,
            slow_motion: mission.slow_motion,
            crosshair: Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0),
        }
    }

    /// Health bar fill, 0-1
    pub fn health_fraction(&self) -> f32 {
        self.health as f32 / self.max_health as f32
    }

    pub fn health_label(&self) -> String {
        format!("HP: {}/{}", self.health, self.max_health)
    }

    pub fn hostage_label(&self) -> String {
        format!("Hostages: {}/{}", self.hostages_saved, self.hostages_total)
    }
}
