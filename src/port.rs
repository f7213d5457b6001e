/// The boundary between the game core and whatever draws, plays sound and
/// reads input.  The core only ever talks to a `Port`; the terminal backend
/// in the binary is one implementation, the scripted port in the tests is
/// another.
use std::time::Duration;

use crate::entities::{AlienKind, Rect};
use crate::error::PortError;

// ── Vocabulary ────────────────────────────────────────────────────────────────

/// Images the core can ask for.  A backend scales each one into the
/// rectangle it is drawn at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sprite {
    Background,
    Logo,
    GameOverLogo,
    Ship,
    Alien(AlienKind),
    Bullet,
    /// Explosion animation frame, 1-based.
    Explosion(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sound {
    Laser,
    Explosion,
    Background,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Space,
    Left,
    Right,
    Other,
}

/// The two clocks the Playing scene runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerId {
    Spawn,
    Animation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    /// Generic "proceed" trigger: pointer release, Enter.
    Confirm,
    KeyDown(Key),
    TimerFired(TimerId),
}

/// Continuous key state, sampled once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
}

// ── The port itself ───────────────────────────────────────────────────────────

pub trait Port {
    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) -> Result<(), PortError>;

    fn draw_rect(&mut self, color: Rgb, rect: Rect) -> Result<(), PortError>;

    /// Draw `text` centred on (`center_x`, `center_y`); `size` is a font size
    /// hint in world units.
    fn draw_text(
        &mut self,
        text: &str,
        center_x: i32,
        center_y: i32,
        size: u16,
    ) -> Result<(), PortError>;

    fn play_sound(&mut self, sound: Sound) -> Result<(), PortError>;

    fn play_music_loop(&mut self, sound: Sound) -> Result<(), PortError>;

    fn stop_music(&mut self) -> Result<(), PortError>;

    /// Drain every device event that arrived since the last call.
    fn poll_events(&mut self) -> Result<Vec<InputEvent>, PortError>;

    fn held_keys(&self) -> HeldKeys;

    /// Show the frame composed since the previous `present`.
    fn present(&mut self) -> Result<(), PortError>;

    /// Block until the next frame boundary at `target_rate` ticks per second
    /// and report how much time passed since the previous call.
    fn tick(&mut self, target_rate: u32) -> Result<Duration, PortError>;

    /// Release audio/video resources.  Called once, on quit.
    fn shutdown(&mut self) -> Result<(), PortError>;
}
