/// Terminal input: a reader thread plus the held-key bookkeeping.
///
/// Terminals differ in what they report.  Keyboard-enhancement capable ones
/// (kitty protocol) send `Press` / `Repeat` / `Release`; classic ones only
/// send `Press`, with OS key-repeat showing up as more presses.  A key is
/// therefore "held" if a release hasn't cleared it and its last press or
/// repeat is younger than `HOLD_WINDOW`.

use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use log::warn;

use space_raid::port::{HeldKeys, InputEvent, Key};

/// OS key-repeat runs at ≥ 15 Hz, so this window is refreshed before expiry
/// while a key is physically down.
const HOLD_WINDOW: Duration = Duration::from_millis(150);

/// Dedicate a thread to blocking event reads so the game loop never blocks
/// on I/O.  The thread ends once the receiver is dropped.
pub fn spawn_reader() -> mpsc::Receiver<Event> {
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(e) => {
                warn!("terminal event read failed: {e}");
                break;
            }
        }
    });
    rx
}

#[derive(Default)]
pub struct KeyTracker {
    last_seen: HashMap<KeyCode, Instant>,
}

impl KeyTracker {
    /// Translate one terminal event, updating held-key state on the way.
    pub fn translate(&mut self, ev: Event, now: Instant) -> Option<InputEvent> {
        match ev {
            Event::Key(KeyEvent { code, kind, modifiers, .. }) => match kind {
                KeyEventKind::Press => {
                    self.last_seen.insert(code.clone(), now);
                    press_event(code, modifiers)
                }
                KeyEventKind::Repeat => {
                    self.last_seen.insert(code.clone(), now);
                    None
                }
                KeyEventKind::Release => {
                    self.last_seen.remove(&code);
                    None
                }
            },
            Event::Mouse(MouseEvent { kind: MouseEventKind::Up(_), .. }) => {
                Some(InputEvent::Confirm)
            }
            _ => None,
        }
    }

    pub fn held(&self, now: Instant) -> HeldKeys {
        let any = |codes: &[KeyCode]| codes.iter().any(|c| self.is_held(c, now));
        HeldKeys {
            left: any(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')]),
            right: any(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')]),
        }
    }

    fn is_held(&self, key: &KeyCode, now: Instant) -> bool {
        self.last_seen
            .get(key)
            .map(|&last| now.saturating_duration_since(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }
}

fn press_event(code: KeyCode, modifiers: KeyModifiers) -> Option<InputEvent> {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(InputEvent::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(InputEvent::Quit),
        KeyCode::Enter => Some(InputEvent::Confirm),
        KeyCode::Char(' ') => Some(InputEvent::KeyDown(Key::Space)),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(InputEvent::KeyDown(Key::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(InputEvent::KeyDown(Key::Right))
        }
        _ => Some(InputEvent::KeyDown(Key::Other)),
    }
}
