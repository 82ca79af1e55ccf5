//! Depth-sorted draw list for the mission view
//!
//! Every visible entity becomes one `Drawable` tagged with its distance from
//! the player. The list is sorted furthest-first so a consumer that paints in
//! order gets correct occlusion without a depth buffer.

use glam::Vec2;
use serde::Serialize;

use super::projection::{Camera, Projected, on_screen};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::heading;
use crate::settings::CameraMode;
use crate::sim::{Bullet, Enemy, Hostage, MissionState, Rect, Weapon};

/// Player figure placement in the trailing camera
pub const PLAYER_SCREEN_OFFSET_Y: f32 = 50.0;
pub const PLAYER_SCALE: f32 = 1.5;
/// Human figures appear this much larger than the raw perspective factor
pub const FIGURE_SCALE: f32 = 1.2;
/// Wall heights in world units at scale 1
pub const FPS_WALL_HEIGHT: f32 = 150.0;
pub const TPS_WALL_HEIGHT: f32 = 80.0;
/// Bullet radius at scale 1
pub const BULLET_RADIUS: f32 = 8.0;

/// What to draw, with per-kind extents in screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum DrawKind {
    Wall {
        width: f32,
        height: f32,
    },
    Player {
        weapon: Weapon,
    },
    Bullet {
        radius: f32,
        /// Tail end of the motion streak while slow motion is active
        trail_end: Option<Vec2>,
    },
    Enemy {
        health_fraction: f32,
    },
    Hostage,
    /// Generic human figure (ending scene)
    Figure {
        /// Head turn in degrees
        head_turn: f32,
    },
}

/// Palette key; the consumer owns actual colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Style {
    /// Brightness boost 0-100 on top of the base wall tone
    Wall { light: u8 },
    Player,
    FriendlyBullet,
    HostileBullet,
    Enemy,
    Hostage,
    /// Crowd member; index selects a color variant
    Crowd { index: u8 },
}

/// One draw command
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Drawable {
    pub kind: DrawKind,
    pub style: Style,
    /// Distance from the player; larger draws first
    pub depth: f32,
    /// Anchor point on screen
    pub screen: Vec2,
    pub scale: f32,
}

/// Build the furthest-first draw list for the current mission state
pub fn build_draw_list(mission: &MissionState, mode: CameraMode, trails: bool) -> Vec<Drawable> {
    let camera = Camera::new(mode, &mission.player);
    let eye = mission.player.pos;
    let trails = trails && mission.slow_motion;
    let mut list = Vec::with_capacity(
        mission.walls.len()
            + 1
            + mission.bullets.len()
            + mission.enemies.len()
            + mission.hostages.len(),
    );

    list.extend(mission.walls.iter().filter_map(|w| wall(&camera, w, eye)));

    if mode == CameraMode::ThirdPerson {
        list.push(Drawable {
            kind: DrawKind::Player {
                weapon: mission.player.weapon,
            },
            style: Style::Player,
            depth: 0.0,
            screen: Vec2::new(
                SCREEN_WIDTH / 2.0,
                SCREEN_HEIGHT / 2.0 + PLAYER_SCREEN_OFFSET_Y,
            ),
            scale: PLAYER_SCALE,
        });
    }

    list.extend(
        mission
            .bullets
            .iter()
            .filter_map(|b| bullet(&camera, b, eye, trails)),
    );
    list.extend(mission.enemies.iter().filter_map(|e| enemy(&camera, e, eye)));
    list.extend(
        mission
            .hostages
            .iter()
            .filter(|h| !h.saved)
            .filter_map(|h| hostage(&camera, h, eye)),
    );

    sort_far_to_near(&mut list);
    list
}

/// Painter's order. Stable, so equal depths keep collection order.
pub fn sort_far_to_near(list: &mut [Drawable]) {
    list.sort_by(|a, b| b.depth.total_cmp(&a.depth));
}

fn wall(camera: &Camera, wall: &Rect, eye: Vec2) -> Option<Drawable> {
    // Anchored at the wall's corner, ordered by its center
    let Projected { screen, scale, .. } = camera.project(wall.origin())?;
    let depth = wall.center().distance(eye);
    let (height, light) = match camera.mode {
        CameraMode::FirstPerson => (FPS_WALL_HEIGHT, 0),
        CameraMode::ThirdPerson => {
            let corner_distance = wall.origin().distance(eye);
            (TPS_WALL_HEIGHT, (100.0 - (corner_distance / 3.0).floor()).max(0.0) as u8)
        }
    };
    Some(Drawable {
        kind: DrawKind::Wall {
            width: wall.width * scale,
            height: height * scale,
        },
        style: Style::Wall { light },
        depth,
        screen,
        scale,
    })
}

fn bullet(camera: &Camera, bullet: &Bullet, eye: Vec2, trails: bool) -> Option<Drawable> {
    let projected = camera.project(bullet.pos)?;
    let (radius, trail) = match camera.mode {
        CameraMode::FirstPerson => (
            (BULLET_RADIUS * projected.scale).max(2.0),
            heading(bullet.angle) * 15.0,
        ),
        CameraMode::ThirdPerson => {
            if !on_screen(projected.screen) {
                return None;
            }
            let streak = heading(bullet.angle - projected.view_angle) * 20.0;
            (
                (BULLET_RADIUS * projected.scale).max(3.0),
                Vec2::new(streak.x, streak.y * 0.5),
            )
        }
    };
    Some(Drawable {
        kind: DrawKind::Bullet {
            radius,
            trail_end: trails.then(|| projected.screen - trail),
        },
        style: if bullet.friendly {
            Style::FriendlyBullet
        } else {
            Style::HostileBullet
        },
        depth: bullet.pos.distance(eye),
        screen: projected.screen,
        scale: projected.scale,
    })
}

fn figure_scale(camera: &Camera, p: &Projected) -> f32 {
    match camera.mode {
        CameraMode::FirstPerson => p.scale,
        CameraMode::ThirdPerson => p.scale * FIGURE_SCALE,
    }
}

fn enemy(camera: &Camera, enemy: &Enemy, eye: Vec2) -> Option<Drawable> {
    let p = camera.project(enemy.pos)?;
    Some(Drawable {
        kind: DrawKind::Enemy {
            health_fraction: enemy.health_fraction(),
        },
        style: Style::Enemy,
        depth: enemy.pos.distance(eye),
        screen: p.screen,
        scale: figure_scale(camera, &p),
    })
}

fn hostage(camera: &Camera, hostage: &Hostage, eye: Vec2) -> Option<Drawable> {
    let p = camera.project(hostage.pos)?;
    Some(Drawable {
        kind: DrawKind::Hostage,
        style: Style::Hostage,
        depth: hostage.pos.distance(eye),
        screen: p.screen,
        scale: figure_scale(camera, &p),
    })
}
