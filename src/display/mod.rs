/// Terminal backend for the game `Port`.
///
/// World coordinates (800×700 by default) are scaled onto the terminal's
/// cell grid.  Draw calls compose into an in-memory cell buffer; `present`
/// writes it out in one go.  No game logic lives here.

mod input;

pub use input::spawn_reader;

use std::io::Write;
use std::sync::mpsc::{self, TryRecvError};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::Event,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use log::debug;

use space_raid::entities::Rect;
use space_raid::error::PortError;
use space_raid::port::{HeldKeys, InputEvent, Port, Rgb, Sound, Sprite};

use input::KeyTracker;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_STAR: Color = Color::DarkGrey;
const C_LOGO: Color = Color::Cyan;
const C_GAME_OVER: Color = Color::Red;
const C_SHIP: Color = Color::White;
const C_BULLET: Color = Color::Cyan;
const C_TEXT: Color = Color::White;

/// Glyph and colour per alien variant (1-based).
const ALIENS: [(char, Color); 6] = [
    ('▓', Color::Green),
    ('▒', Color::Red),
    ('◆', Color::Magenta),
    ('●', Color::Yellow),
    ('▼', Color::Cyan),
    ('■', Color::Blue),
];

/// Explosion animation, one glyph per visible frame.
const EXPLOSION: [char; 9] = ['·', '∙', '*', '✶', '✹', '✺', '✸', '+', '·'];

#[derive(Clone, Copy, PartialEq)]
struct Cell {
    ch: char,
    fg: Color,
}

const BLANK: Cell = Cell { ch: ' ', fg: Color::Reset };

pub struct TerminalPort<W: Write> {
    out: W,
    rx: mpsc::Receiver<Event>,
    keys: KeyTracker,
    world_w: i32,
    world_h: i32,
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
    last_tick: Instant,
    /// Ring the terminal bell on explosions.
    bell: bool,
    music: Option<Sound>,
}

impl<W: Write> TerminalPort<W> {
    pub fn new(out: W, rx: mpsc::Receiver<Event>, world_w: i32, world_h: i32, bell: bool) -> std::io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(TerminalPort {
            out,
            rx,
            keys: KeyTracker::default(),
            world_w,
            world_h,
            cols,
            rows,
            cells: vec![BLANK; cols as usize * rows as usize],
            last_tick: Instant::now(),
            bell,
            music: None,
        })
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        debug!("terminal resized to {cols}x{rows}");
        self.cols = cols;
        self.rows = rows;
        self.cells = vec![BLANK; cols as usize * rows as usize];
    }

    // ── World → cell mapping ─────────────────────────────────────────────────

    fn col(&self, x: i32) -> i64 {
        x as i64 * self.cols as i64 / self.world_w as i64
    }

    fn row(&self, y: i32) -> i64 {
        y as i64 * self.rows as i64 / self.world_h as i64
    }

    /// Cell span covered by `rect`, clipped to the grid.  Every on-screen
    /// rectangle covers at least one cell.
    fn span(&self, rect: Rect) -> Option<(u16, u16, u16, u16)> {
        let c0 = self.col(rect.x);
        let r0 = self.row(rect.y);
        let c1 = self.col(rect.right()).max(c0 + 1);
        let r1 = self.row(rect.bottom()).max(r0 + 1);
        let (cols, rows) = (self.cols as i64, self.rows as i64);
        if c1 <= 0 || r1 <= 0 || c0 >= cols || r0 >= rows {
            return None;
        }
        Some((
            c0.max(0) as u16,
            r0.max(0) as u16,
            c1.min(cols) as u16,
            r1.min(rows) as u16,
        ))
    }

    fn put(&mut self, col: u16, row: u16, cell: Cell) {
        if col < self.cols && row < self.rows {
            let i = row as usize * self.cols as usize + col as usize;
            self.cells[i] = cell;
        }
    }

    fn fill(&mut self, rect: Rect, cell: Cell) {
        if let Some((c0, r0, c1, r1)) = self.span(rect) {
            for row in r0..r1 {
                for col in c0..c1 {
                    self.put(col, row, cell);
                }
            }
        }
    }

    fn write_centered(&mut self, text: &str, col: i64, row: i64, fg: Color) {
        if row < 0 || row >= self.rows as i64 {
            return;
        }
        let start = col - text.chars().count() as i64 / 2;
        for (i, ch) in text.chars().enumerate() {
            let c = start + i as i64;
            if c >= 0 {
                self.put(c as u16, row as u16, Cell { ch, fg });
            }
        }
    }

    // ── Sprites ──────────────────────────────────────────────────────────────

    /// Sparse starfield anchored to the tile, so it scrolls with it.
    fn draw_stars(&mut self, rect: Rect) {
        let Some((c0, r0, c1, r1)) = self.span(rect) else { return };
        let cell_h = (self.world_h / self.rows.max(1) as i32).max(1) as i64;
        for row in r0..r1 {
            let world_y = row as i64 * self.world_h as i64 / self.rows as i64;
            let band = (world_y - rect.y as i64).div_euclid(cell_h);
            for col in c0..c1 {
                if (col as i64 * 7919 + band * 104_729) % 37 == 0 {
                    self.put(col, row, Cell { ch: '.', fg: C_STAR });
                }
            }
        }
    }

    fn draw_banner(&mut self, rect: Rect, lines: &[&str], fg: Color) {
        let Some((c0, r0, c1, r1)) = self.span(rect) else { return };
        let cx = (c0 as i64 + c1 as i64) / 2;
        let top = (r0 as i64 + r1 as i64) / 2 - lines.len() as i64 / 2;
        for (i, line) in lines.iter().enumerate() {
            self.write_centered(line, cx, top + i as i64, fg);
        }
    }

    fn draw_ship(&mut self, rect: Rect) {
        let Some((c0, r0, c1, r1)) = self.span(rect) else { return };
        let mid = (c0 + c1 - 1) / 2;
        self.put(mid, r0, Cell { ch: '▲', fg: C_SHIP });
        for row in r0 + 1..r1 {
            for col in c0..c1 {
                let ch = if c1 - c0 > 2 && col == c0 {
                    '/'
                } else if c1 - c0 > 2 && col == c1 - 1 {
                    '\\'
                } else {
                    '█'
                };
                self.put(col, row, Cell { ch, fg: C_SHIP });
            }
        }
    }
}

impl<W: Write> Port for TerminalPort<W> {
    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect) -> Result<(), PortError> {
        match sprite {
            Sprite::Background => self.draw_stars(rect),
            Sprite::Logo => self.draw_banner(rect, &["S P A C E   R A I D", "", "◆  ▼  ●  ▓"], C_LOGO),
            Sprite::GameOverLogo => self.draw_banner(rect, &["G A M E   O V E R"], C_GAME_OVER),
            Sprite::Ship => self.draw_ship(rect),
            Sprite::Alien(kind) => {
                let (ch, fg) = ALIENS
                    .get(kind.number() as usize - 1)
                    .copied()
                    .ok_or_else(|| PortError::MissingAsset(format!("alien{}", kind.number())))?;
                self.fill(rect, Cell { ch, fg });
            }
            Sprite::Bullet => {
                let col = self.col(rect.center_x());
                let row = self.row(rect.center_y());
                self.write_centered("║", col, row, C_BULLET);
            }
            Sprite::Explosion(frame) => {
                let ch = *EXPLOSION
                    .get((frame as usize).wrapping_sub(1))
                    .ok_or_else(|| PortError::MissingAsset(format!("exp{frame}")))?;
                let fg = if frame % 2 == 0 { Color::Red } else { Color::Yellow };
                self.fill(rect, Cell { ch, fg });
            }
        }
        Ok(())
    }

    fn draw_rect(&mut self, color: Rgb, rect: Rect) -> Result<(), PortError> {
        let Rgb(r, g, b) = color;
        self.fill(rect, Cell { ch: '█', fg: Color::Rgb { r, g, b } });
        Ok(())
    }

    fn draw_text(&mut self, text: &str, center_x: i32, center_y: i32, _size: u16) -> Result<(), PortError> {
        let col = self.col(center_x);
        let row = self.row(center_y);
        self.write_centered(text, col, row, C_TEXT);
        Ok(())
    }

    fn play_sound(&mut self, sound: Sound) -> Result<(), PortError> {
        debug!("sound {:?}", sound);
        if self.bell && sound == Sound::Explosion {
            self.out.queue(Print('\u{7}'))?;
        }
        Ok(())
    }

    fn play_music_loop(&mut self, sound: Sound) -> Result<(), PortError> {
        debug!("music loop {:?}", sound);
        self.music = Some(sound);
        Ok(())
    }

    fn stop_music(&mut self) -> Result<(), PortError> {
        if let Some(sound) = self.music.take() {
            debug!("music stopped {:?}", sound);
        }
        Ok(())
    }

    fn poll_events(&mut self) -> Result<Vec<InputEvent>, PortError> {
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(Event::Resize(cols, rows)) => self.resize(cols, rows),
                Ok(ev) => events.extend(self.keys.translate(ev, Instant::now())),
                Err(TryRecvError::Empty) => return Ok(events),
                Err(TryRecvError::Disconnected) => return Err(PortError::Disconnected),
            }
        }
    }

    fn held_keys(&self) -> HeldKeys {
        self.keys.held(Instant::now())
    }

    fn present(&mut self) -> Result<(), PortError> {
        let mut fg = Color::Reset;
        self.out.queue(style::SetForegroundColor(fg))?;
        for row in 0..self.rows {
            self.out.queue(cursor::MoveTo(0, row))?;
            let start = row as usize * self.cols as usize;
            // Writing the bottom-right cell scrolls some terminals.
            let width = if row + 1 == self.rows {
                self.cols.saturating_sub(1)
            } else {
                self.cols
            } as usize;
            let mut line = String::with_capacity(width);
            for cell in &self.cells[start..start + width] {
                if cell.fg != fg && cell.ch != ' ' {
                    self.out.queue(Print(std::mem::take(&mut line)))?;
                    fg = cell.fg;
                    self.out.queue(style::SetForegroundColor(fg))?;
                }
                line.push(cell.ch);
            }
            self.out.queue(Print(line))?;
        }
        self.out.queue(style::ResetColor)?;
        self.out.flush()?;
        self.cells.fill(BLANK);
        Ok(())
    }

    fn tick(&mut self, target_rate: u32) -> Result<Duration, PortError> {
        let frame = Duration::from_secs_f64(1.0 / target_rate.max(1) as f64);
        let elapsed = self.last_tick.elapsed();
        if elapsed < frame {
            std::thread::sleep(frame - elapsed);
        }
        let now = Instant::now();
        let dt = now - self.last_tick;
        self.last_tick = now;
        Ok(dt)
    }

    fn shutdown(&mut self) -> Result<(), PortError> {
        self.stop_music()?;
        self.out.queue(style::ResetColor)?;
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        self.out.flush()?;
        Ok(())
    }
}
