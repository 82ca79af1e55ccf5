//! World-to-screen projection for the two camera models
//!
//! Both cameras translate a world point into player-relative space, rotate it
//! into the camera frame, then scale by a distance-dependent factor. They
//! differ in rotation, scale formula, and culling.

use glam::Vec2;
use std::f32::consts::PI;

use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::rotate_point;
use crate::settings::CameraMode;
use crate::sim::Player;

/// First-person focal length: screen scale is `FOCAL / depth`
pub const FPS_FOCAL: f32 = 300.0;
/// Third-person perspective is `PERSPECTIVE / (distance + PERSPECTIVE_BIAS)`
pub const TPS_PERSPECTIVE: f32 = 200.0;
pub const TPS_PERSPECTIVE_BIAS: f32 = 50.0;
/// Ground-plane flattening applied to third-person screen y
pub const TPS_VERTICAL_SQUASH: f32 = 0.5;
/// Third-person draw distance
pub const TPS_MAX_DISTANCE: f32 = 500.0;
/// Entities may hang this far off either side of the screen before culling
pub const SCREEN_CULL_MARGIN: f32 = 100.0;

/// A point placed on screen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    pub screen: Vec2,
    /// Size multiplier at this depth
    pub scale: f32,
    /// Camera-frame rotation used, for orienting trails
    pub view_angle: f32,
}

/// A camera anchored on the player for one frame
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub mode: CameraMode,
    pub eye: Vec2,
    pub angle: f32,
}

impl Camera {
    pub fn new(mode: CameraMode, player: &Player) -> Self {
        Self {
            mode,
            eye: player.pos,
            angle: player.angle,
        }
    }

    /// Rotation applied to player-relative points
    pub fn view_angle(&self) -> f32 {
        match self.mode {
            CameraMode::FirstPerson => self.angle,
            // The trailing camera looks back through the player
            CameraMode::ThirdPerson => self.angle + PI,
        }
    }

    /// Place `world` on screen, or `None` if this camera cannot see it
    pub fn project(&self, world: Vec2) -> Option<Projected> {
        let rel = world - self.eye;
        let view_angle = self.view_angle();
        let rotated = rotate_point(rel, -view_angle);
        let center = Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0);

        let (screen, scale) = match self.mode {
            CameraMode::FirstPerson => {
                if rotated.y <= 0.0 {
                    return None;
                }
                let scale = FPS_FOCAL / rotated.y.max(1.0);
                (Vec2::new(center.x + rotated.x * scale, center.y), scale)
            }
            CameraMode::ThirdPerson => {
                let distance = rel.length();
                if distance <= 0.0 || distance >= TPS_MAX_DISTANCE {
                    return None;
                }
                let perspective = TPS_PERSPECTIVE / (distance + TPS_PERSPECTIVE_BIAS);
                let screen = Vec2::new(
                    center.x + rotated.x * perspective,
                    center.y + rotated.y * perspective * TPS_VERTICAL_SQUASH,
                );
                (screen, perspective)
            }
        };

        if !within_cull_band(screen.x) {
            return None;
        }
        Some(Projected {
            screen,
            scale,
            view_angle,
        })
    }
}

/// Horizontal screen band shared by both cameras. The third-person factor
/// keeps offsets under `TPS_PERSPECTIVE`, so only first person reaches the edges.
pub fn within_cull_band(x: f32) -> bool {
    x > -SCREEN_CULL_MARGIN && x < SCREEN_WIDTH + SCREEN_CULL_MARGIN
}

/// True if `p` lies strictly inside the screen rectangle
pub fn on_screen(p: Vec2) -> bool {
    p.x > 0.0 && p.x < SCREEN_WIDTH && p.y > 0.0 && p.y < SCREEN_HEIGHT
}
