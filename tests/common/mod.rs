#![allow(dead_code)]

use std::collections::VecDeque;
use std::time::Duration;

use space_raid::entities::Rect;
use space_raid::error::PortError;
use space_raid::port::{HeldKeys, InputEvent, Port, Rgb, Sound, Sprite};

/// Everything the core asked the port to do, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    Sprite(Sprite, Rect),
    Rect(Rgb, Rect),
    Text(String, i32, i32),
    Sound(Sound),
    Music(Sound),
    StopMusic,
    Present,
    Tick(u32),
    Shutdown,
}

/// Input delivered for one tick.
#[derive(Clone, Debug, Default)]
pub struct Frame {
    pub events: Vec<InputEvent>,
    pub held: HeldKeys,
}

impl Frame {
    pub fn events(events: &[InputEvent]) -> Self {
        Frame { events: events.to_vec(), held: HeldKeys::default() }
    }

    pub fn holding(held: HeldKeys) -> Self {
        Frame { events: Vec::new(), held }
    }
}

/// In-memory port: replays prepared frames, records every call, and reports
/// a fixed elapsed time per tick.  Once the script runs out it sends Quit.
pub struct ScriptedPort {
    script: VecDeque<Frame>,
    held: HeldKeys,
    dt: Duration,
    pub calls: Vec<Call>,
    pub fail_present: bool,
}

impl ScriptedPort {
    pub fn new(frames: Vec<Frame>) -> Self {
        ScriptedPort {
            script: frames.into(),
            held: HeldKeys::default(),
            dt: Duration::from_millis(8),
            calls: Vec::new(),
            fail_present: false,
        }
    }

    pub fn with_dt(mut self, dt: Duration) -> Self {
        self.dt = dt;
        self
    }

    pub fn sprites(&self) -> Vec<(Sprite, Rect)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Call::Sprite(s, r) => Some((*s, *r)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }
}

/// `n` frames with no input.
pub fn idle(n: usize) -> Vec<Frame> {
    vec![Frame::default(); n]
}

impl Port for ScriptedPort {
    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) -> Result<(), PortError> {
        self.calls.push(Call::Sprite(sprite, rect));
        Ok(())
    }

    fn draw_rect(&mut self, color: Rgb, rect: Rect) -> Result<(), PortError> {
        self.calls.push(Call::Rect(color, rect));
        Ok(())
    }

    fn draw_text(&mut self, text: &str, center_x: i32, center_y: i32, _size: u16) -> Result<(), PortError> {
        self.calls.push(Call::Text(text.to_string(), center_x, center_y));
        Ok(())
    }

    fn play_sound(&mut self, sound: Sound) -> Result<(), PortError> {
        self.calls.push(Call::Sound(sound));
        Ok(())
    }

    fn play_music_loop(&mut self, sound: Sound) -> Result<(), PortError> {
        self.calls.push(Call::Music(sound));
        Ok(())
    }

    fn stop_music(&mut self) -> Result<(), PortError> {
        self.calls.push(Call::StopMusic);
        Ok(())
    }

    fn poll_events(&mut self) -> Result<Vec<InputEvent>, PortError> {
        match self.script.pop_front() {
            Some(frame) => {
                self.held = frame.held;
                Ok(frame.events)
            }
            None => Ok(vec![InputEvent::Quit]),
        }
    }

    fn held_keys(&self) -> HeldKeys {
        self.held
    }

    fn present(&mut self) -> Result<(), PortError> {
        if self.fail_present {
            return Err(PortError::MissingAsset("images/bg.jpg".into()));
        }
        self.calls.push(Call::Present);
        Ok(())
    }

    fn tick(&mut self, target_rate: u32) -> Result<Duration, PortError> {
        self.calls.push(Call::Tick(target_rate));
        Ok(self.dt)
    }

    fn shutdown(&mut self) -> Result<(), PortError> {
        self.calls.push(Call::Shutdown);
        Ok(())
    }
}
