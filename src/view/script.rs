//! Staged text reveals and the ending scene
//!
//! Each non-mission phase has its own tick counter on `GameState`. Everything
//! here is a pure function of that counter.

use glam::Vec2;
use serde::Serialize;

use super::draw::{DrawKind, Drawable, Style};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Death screen reveals
pub const DEATH_TITLE_AFTER: u32 = 60;
pub const DEATH_PROMPT_AFTER: u32 = 120;
/// Title fade-in rate, alpha per tick
pub const DEATH_FADE_RATE: u32 = 3;

/// Timeskip card is swapped at this tick
pub const TIMESKIP_CARD_SWAP: u32 = 120;

/// Ending banners hold until this tick
pub const ENDING_BANNER_TICKS: u32 = 120;
/// Hero starts turning their head after this tick
pub const HEAD_TURN_AFTER: u32 = 180;
pub const HEAD_TURN_RATE: f32 = 1.5;
pub const HEAD_TURN_MAX: f32 = 90.0;
/// Cliffhanger shows once the head is turned past this
pub const CLIFFHANGER_TURN: f32 = 70.0;

pub const CROWD_SIZE: usize = 20;
pub const CROWD_SPACING: f32 = 40.0;
pub const CROWD_ORIGIN: Vec2 = Vec2::new(30.0, 480.0);
pub const CROWD_SCALE: f32 = 0.8;
pub const HERO_POS: Vec2 = Vec2::new(SCREEN_WIDTH / 2.0, 320.0);
pub const HERO_SCALE: f32 = 2.5;

/// Palette key for caption text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tone {
    Alert,
    Success,
    Gold,
    Light,
    Dark,
}

/// Relative type size; the consumer maps these to fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TextSize {
    Small,
    Medium,
    Large,
    Huge,
}

/// One line of overlay text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Caption {
    pub text: &'static str,
    /// Top-left corner on screen
    pub pos: Vec2,
    pub size: TextSize,
    pub tone: Tone,
    pub alpha: u8,
}

impl Caption {
    fn new(text: &'static str, pos: Vec2, size: TextSize, tone: Tone) -> Self {
        Self {
            text,
            pos,
            size,
            tone,
            alpha: u8::MAX,
        }
    }
}

pub fn mission_captions() -> Vec<Caption> {
    vec![Caption::new(
        "WASD: Move | Mouse: Aim | Click: Shoot | Q: Switch Weapon",
        Vec2::new(SCREEN_WIDTH - 470.0, SCREEN_HEIGHT - 25.0),
        TextSize::Small,
        Tone::Light,
    )]
}

pub fn death_captions(t: u32) -> Vec<Caption> {
    let mut captions = Vec::new();
    if t > DEATH_TITLE_AFTER {
        let alpha = (t.saturating_mul(DEATH_FADE_RATE)).min(255) as u8;
        captions.push(Caption {
            alpha,
            ..Caption::new(
                "YOU DIED",
                Vec2::new(SCREEN_WIDTH / 2.0 - 180.0, SCREEN_HEIGHT / 2.0 - 50.0),
                TextSize::Huge,
                Tone::Alert,
            )
        });
    }
    if t > DEATH_PROMPT_AFTER {
        captions.push(Caption::new(
            "Press R to Restart",
            Vec2::new(SCREEN_WIDTH / 2.0 - 140.0, SCREEN_HEIGHT / 2.0 + 50.0),
            TextSize::Medium,
            Tone::Light,
        ));
    }
    captions
}

pub fn timeskip_captions(t: u32) -> Vec<Caption> {
    if t < TIMESKIP_CARD_SWAP {
        vec![Caption::new(
            "MISSION COMPLETE",
            Vec2::new(SCREEN_WIDTH / 2.0 - 280.0, SCREEN_HEIGHT / 2.0 - 50.0),
            TextSize::Large,
            Tone::Success,
        )]
    } else {
        vec![Caption::new(
            "3 MONTHS LATER...",
            Vec2::new(SCREEN_WIDTH / 2.0 - 200.0, SCREEN_HEIGHT / 2.0),
            TextSize::Medium,
            Tone::Light,
        )]
    }
}

/// Hero head turn in degrees at ending tick `t`
pub fn head_turn(t: u32) -> f32 {
    if t <= HEAD_TURN_AFTER {
        return 0.0;
    }
    ((t - HEAD_TURN_AFTER) as f32 * HEAD_TURN_RATE).min(HEAD_TURN_MAX)
}

pub fn ending_captions(t: u32) -> Vec<Caption> {
    let mut captions = Vec::new();
    if t < ENDING_BANNER_TICKS {
        captions.push(Caption::new(
            "HERO!",
            Vec2::new(SCREEN_WIDTH / 2.0 - 100.0, 50.0),
            TextSize::Huge,
            Tone::Gold,
        ));
        captions.push(Caption::new(
            "The city celebrates you!",
            Vec2::new(SCREEN_WIDTH / 2.0 - 220.0, 140.0),
            TextSize::Large,
            Tone::Dark,
        ));
    }
    if head_turn(t) > CLIFFHANGER_TURN {
        captions.push(Caption::new(
            "TO BE CONTINUED...",
            Vec2::new(SCREEN_WIDTH / 2.0 - 320.0, SCREEN_HEIGHT - 80.0),
            TextSize::Huge,
            Tone::Alert,
        ));
    }
    captions
}

/// Crowd then hero. Flat scene, so paint order is list order.
pub fn ending_figures(t: u32) -> Vec<Drawable> {
    let crowd = (0..CROWD_SIZE).map(|i| Drawable {
        kind: DrawKind::Figure { head_turn: 0.0 },
        style: Style::Crowd { index: i as u8 },
        depth: 1.0,
        screen: CROWD_ORIGIN + Vec2::new(i as f32 * CROWD_SPACING, 0.0),
        scale: CROWD_SCALE,
    });
    let hero = Drawable {
        kind: DrawKind::Figure {
            head_turn: head_turn(t),
        },
        style: Style::Player,
        depth: 0.0,
        screen: HERO_POS,
        scale: HERO_SCALE,
    };
    crowd.chain(std::iter::once(hero)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(captions: &[Caption]) -> Vec<&'static str> {
        captions.iter().map(|c| c.text).collect()
    }

    #[test]
    fn test_death_reveals() {
        assert!(death_captions(60).is_empty());
        let shown = death_captions(61);
        assert_eq!(texts(&shown), vec!["YOU DIED"]);
        assert_eq!(shown[0].alpha, 183);
        assert_eq!(death_captions(100)[0].alpha, 255);
        assert_eq!(
            texts(&death_captions(121)),
            vec!["YOU DIED", "Press R to Restart"]
        );
    }

    #[test]
    fn test_timeskip_cards() {
        assert_eq!(texts(&timeskip_captions(1)), vec!["MISSION COMPLETE"]);
        assert_eq!(texts(&timeskip_captions(119)), vec!["MISSION COMPLETE"]);
        assert_eq!(texts(&timeskip_captions(120)), vec!["3 MONTHS LATER..."]);
    }

    #[test]
    fn test_head_turn_ramp() {
        assert_eq!(head_turn(180), 0.0);
        assert_eq!(head_turn(181), 1.5);
        assert_eq!(head_turn(200), 30.0);
        assert_eq!(head_turn(240), 90.0);
        assert_eq!(head_turn(10_000), 90.0);
    }

    #[test]
    fn test_ending_sequence() {
        assert_eq!(
            texts(&ending_captions(1)),
            vec!["HERO!", "The city celebrates you!"]
        );
        assert!(ending_captions(150).is_empty());
        // 70° is reached at tick 180 + 46.67
        assert!(ending_captions(226).is_empty());
        assert_eq!(texts(&ending_captions(227)), vec!["TO BE CONTINUED..."]);
    }

    #[test]
    fn test_ending_figures() {
        let figures = ending_figures(300);
        assert_eq!(figures.len(), CROWD_SIZE + 1);
        assert_eq!(figures[0].screen, Vec2::new(30.0, 480.0));
        assert_eq!(figures[19].screen, Vec2::new(790.0, 480.0));
        let hero = figures.last().unwrap();
        assert_eq!(hero.screen, Vec2::new(400.0, 320.0));
        assert_eq!(hero.kind, DrawKind::Figure { head_turn: 90.0 });
    }
}
