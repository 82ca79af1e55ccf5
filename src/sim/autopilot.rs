//! Scripted player input for headless runs and demos
//!
//! Hunts the nearest enemy (preferring ones in sight), then walks to each
//! remaining hostage. Walls are handled by sliding along one axis and, when
//! fully blocked, committing to a perpendicular detour until the direct path
//! opens up.

use glam::Vec2;

use super::entities::{MoveIntent, Player, Weapon, try_move};
use super::geometry::{Rect, has_line_of_sight};
use super::state::{GamePhase, GameState, MissionState};
use super::tick::TickInput;
use crate::consts::MOUSE_SENSITIVITY;
use crate::wrap_angle;

/// Largest pointer travel the autopilot emits per tick
const MAX_TURN_PX: f32 = 150.0;
/// Fire once the remaining turn is smaller than this (radians)
const AIM_TOLERANCE: f32 = 0.05;
/// Stop advancing on a visible enemy inside this range
const ENGAGE_RANGE: f32 = 250.0;
/// Ignore axis offsets smaller than this when steering
const DEADZONE: f32 = 2.0;

#[derive(Debug, Clone, Copy)]
struct Target {
    pos: Vec2,
    hostile: bool,
    visible: bool,
}

/// Stateful input generator
#[derive(Debug, Clone, Default)]
pub struct Autopilot {
    detour: Option<MoveIntent>,
}

impl Autopilot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input for the next tick of `state`
    pub fn next_input(&mut self, state: &GameState) -> TickInput {
        match state.phase {
            GamePhase::Mission => self.mission_input(&state.mission),
            GamePhase::Death => TickInput {
                restart: true,
                ..Default::default()
            },
            GamePhase::Timeskip | GamePhase::Ending => TickInput::default(),
        }
    }

    fn mission_input(&mut self, mission: &MissionState) -> TickInput {
        let player = &mission.player;
        let mut input = TickInput {
            switch_weapon: player.weapon != Weapon::Ranged,
            ..Default::default()
        };

        let Some(target) = pick_target(mission) else {
            return input;
        };

        let to_target = target.pos - player.pos;
        let turn = wrap_angle(to_target.y.atan2(to_target.x) - player.angle);
        input.mouse_dx = (turn / MOUSE_SENSITIVITY).clamp(-MAX_TURN_PX, MAX_TURN_PX);
        input.fire = target.hostile
            && target.visible
            && turn.abs() < AIM_TOLERANCE
            && player.weapon == Weapon::Ranged
            && player.can_attack();

        let hold = target.hostile && target.visible && to_target.length() <= ENGAGE_RANGE;
        if !hold {
            let intent = self.steer(player, to_target, &mission.walls);
            input.forward = intent.forward;
            input.back = intent.back;
            input.left = intent.left;
            input.right = intent.right;
        }
        input
    }

    fn steer(&mut self, player: &Player, to_target: Vec2, walls: &[Rect]) -> MoveIntent {
        let direct = MoveIntent {
            forward: to_target.y < -DEADZONE,
            back: to_target.y > DEADZONE,
            left: to_target.x < -DEADZONE,
            right: to_target.x > DEADZONE,
        };
        if is_clear(player, direct, walls) {
            self.detour = None;
            return direct;
        }
        if let Some(detour) = self.detour.filter(|d| is_clear(player, *d, walls)) {
            return detour;
        }

        let horizontal = MoveIntent {
            left: direct.left,
            right: direct.right,
            ..Default::default()
        };
        let vertical = MoveIntent {
            forward: direct.forward,
            back: direct.back,
            ..Default::default()
        };
        for slide in [horizontal, vertical] {
            if slide != MoveIntent::default() && is_clear(player, slide, walls) {
                return slide;
            }
        }

        // Fully blocked: go around perpendicular to the blocked axis
        let detour = if direct.left || direct.right {
            if to_target.y <= 0.0 {
                MoveIntent::FORWARD
            } else {
                MoveIntent::BACK
            }
        } else if to_target.x <= 0.0 {
            MoveIntent::LEFT
        } else {
            MoveIntent::RIGHT
        };
        let detour = if is_clear(player, detour, walls) {
            detour
        } else {
            flipped(detour)
        };
        self.detour = Some(detour);
        detour
    }
}

fn is_clear(player: &Player, intent: MoveIntent, walls: &[Rect]) -> bool {
    let delta = intent.delta(player.speed);
    let mut pos = player.pos;
    delta != Vec2::ZERO && try_move(&mut pos, delta, walls)
}

fn flipped(intent: MoveIntent) -> MoveIntent {
    MoveIntent {
        forward: intent.back,
        back: intent.forward,
        left: intent.right,
        right: intent.left,
    }
}

/// Nearest enemy in sight, else nearest enemy, else nearest waiting hostage
fn pick_target(mission: &MissionState) -> Option<Target> {
    let origin = mission.player.pos;
    let nearest = |a: &Target, b: &Target| {
        a.pos
            .distance_squared(origin)
            .total_cmp(&b.pos.distance_squared(origin))
    };

    let enemies: Vec<Target> = mission
        .enemies
        .iter()
        .map(|e| Target {
            pos: e.pos,
            hostile: true,
            visible: has_line_of_sight(origin, e.pos, &mission.walls),
        })
        .collect();

    enemies
        .iter()
        .filter(|t| t.visible)
        .min_by(|a, b| nearest(*a, *b))
        .or_else(|| enemies.iter().min_by(|a, b| nearest(*a, *b)))
        .copied()
        .or_else(|| {
            mission
                .hostages
                .iter()
                .filter(|h| !h.saved)
                .map(|h| Target {
                    pos: h.pos,
                    hostile: false,
                    visible: true,
                })
                .min_by(nearest)
        })
}
