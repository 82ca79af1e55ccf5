//! Presentation layer
//!
//! Turns a `GameState` into a backend-agnostic `Frame`: a backdrop, a
//! painter-ordered draw list, the HUD, and overlay captions. Nothing here
//! mutates the simulation; phase timers are read, never advanced.

pub mod draw;
pub mod hud;
pub mod projection;
pub mod script;

pub use draw::{DrawKind, Drawable, Style, build_draw_list, sort_far_to_near};
pub use hud::Hud;
pub use projection::{Camera, Projected, on_screen, within_cull_band};
pub use script::{Caption, TextSize, Tone, head_turn};

use serde::Serialize;

use crate::settings::Settings;
use crate::sim::{GamePhase, GameState};

/// Screen clear behind everything else
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Backdrop {
    /// Sky and floor halves of the arena; tinted while slow motion is active
    Mission { slow_motion: bool },
    Black,
    /// Ending sky
    Daylight,
}

/// Everything needed to paint one tick
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub backdrop: Backdrop,
    /// Paint in order
    pub drawables: Vec<Drawable>,
    /// Mission phase only
    pub hud: Option<Hud>,
    pub captions: Vec<Caption>,
}

pub fn render_frame(state: &GameState, settings: &Settings) -> Frame {
    match state.phase {
        GamePhase::Mission => {
            let mission = &state.mission;
            Frame {
                backdrop: Backdrop::Mission {
                    slow_motion: mission.slow_motion,
                },
                drawables: build_draw_list(mission, settings.camera, settings.slow_motion_trails),
                hud: Some(Hud::from_mission(mission)),
                captions: script::mission_captions(),
            }
        }
        GamePhase::Death => Frame {
            backdrop: Backdrop::Black,
            drawables: Vec::new(),
            hud: None,
            captions: script::death_captions(state.death_ticks),
        },
        GamePhase::Timeskip => Frame {
            backdrop: Backdrop::Black,
            drawables: Vec::new(),
            hud: None,
            captions: script::timeskip_captions(state.timeskip_ticks),
        },
        GamePhase::Ending => Frame {
            backdrop: Backdrop::Daylight,
            drawables: script::ending_figures(state.ending_ticks),
            hud: None,
            captions: script::ending_captions(state.ending_ticks),
        },
    }
}
