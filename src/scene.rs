/// Menu → Playing → GameOver state machine and the tick loop that drives it.
///
/// Each call to `Game::step` runs one tick of the active scene:
/// poll input (plus any timer firings from the previous tick), update,
/// draw, present, then pace.  A quit event unwinds before anything else is
/// drawn.

use log::{info, trace};
use rand::Rng;

use crate::background::Background;
use crate::compute::{self, Impact, TickInput};
use crate::config::GameConfig;
use crate::entities::{GameStatus, PlayState};
use crate::error::PortError;
use crate::port::{InputEvent, Key, Port, Sound, TimerId};
use crate::render;
use crate::spawn;
use crate::timer::IntervalTimer;

/// What one Playing session carries besides the entities.
#[derive(Clone, Debug)]
pub struct Session {
    pub state: PlayState,
    spawn_timer: IntervalTimer,
    animation_timer: IntervalTimer,
    /// Timer firings collected after the last pacing step, delivered with
    /// the next poll.
    pending: Vec<InputEvent>,
}

impl Session {
    fn new(config: &GameConfig) -> Self {
        Session {
            state: compute::init_state(config.screen.width, config.screen.height),
            spawn_timer: IntervalTimer::new(config.timers.spawn_interval()),
            animation_timer: IntervalTimer::new(config.timers.explosion_frame()),
            pending: Vec::new(),
        }
    }

    fn collect_timers(&mut self, dt: std::time::Duration) {
        for _ in 0..self.spawn_timer.advance(dt) {
            self.pending.push(InputEvent::TimerFired(TimerId::Spawn));
        }
        for _ in 0..self.animation_timer.advance(dt) {
            self.pending.push(InputEvent::TimerFired(TimerId::Animation));
        }
    }
}

#[derive(Clone, Debug)]
pub enum Scene {
    Menu,
    Playing(Session),
    GameOver { score: u32, high_score: u32 },
}

impl Scene {
    pub fn name(&self) -> &'static str {
        match self {
            Scene::Menu => "menu",
            Scene::Playing(_) => "playing",
            Scene::GameOver { .. } => "game over",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Game<P: Port, R: Rng> {
    config: GameConfig,
    port: P,
    rng: R,
    scene: Scene,
    background: Background,
    high_score: u32,
}

impl<P: Port, R: Rng> Game<P, R> {
    pub fn new(config: GameConfig, port: P, rng: R) -> Self {
        let background = Background::new(config.screen.height);
        Game {
            config,
            port,
            rng,
            scene: Scene::Menu,
            background,
            high_score: 0,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The running session, if the Playing scene is active.
    pub fn session(&self) -> Option<&Session> {
        match &self.scene {
            Scene::Playing(session) => Some(session),
            _ => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut Session> {
        match &mut self.scene {
            Scene::Playing(session) => Some(session),
            _ => None,
        }
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    /// Drive scenes until quit.  Port failures abort immediately.
    pub fn run(&mut self) -> Result<(), PortError> {
        info!("starting in {}", self.scene.name());
        while self.step()? == Flow::Continue {}
        info!("quit requested; shutting down");
        self.port.shutdown()
    }

    /// Run one tick of the active scene.
    pub fn step(&mut self) -> Result<Flow, PortError> {
        match self.scene {
            Scene::Menu => self.step_menu(),
            Scene::Playing(_) => self.step_playing(),
            Scene::GameOver { score, high_score } => self.step_game_over(score, high_score),
        }
    }

    // ── Transitions ──────────────────────────────────────────────────────────

    fn enter(&mut self, scene: Scene) {
        info!("scene {} -> {}", self.scene.name(), scene.name());
        self.scene = scene;
        self.background = Background::new(self.config.screen.height);
    }

    fn start_session(&mut self) -> Result<(), PortError> {
        self.port.play_music_loop(Sound::Background)?;
        let session = Session::new(&self.config);
        self.enter(Scene::Playing(session));
        Ok(())
    }

    fn finish_session(&mut self, score: u32) -> Result<(), PortError> {
        self.port.stop_music()?;
        if score > self.high_score {
            info!("new high score {} (was {})", score, self.high_score);
            self.high_score = score;
        }
        let high_score = self.high_score;
        self.enter(Scene::GameOver { score, high_score });
        Ok(())
    }

    // ── Menu / GameOver ──────────────────────────────────────────────────────

    /// `None` on quit, otherwise whether a confirm arrived this tick.
    fn poll_confirm(&mut self) -> Result<Option<bool>, PortError> {
        let mut confirmed = false;
        for event in self.port.poll_events()? {
            match event {
                InputEvent::Quit => return Ok(None),
                InputEvent::Confirm => confirmed = true,
                _ => {}
            }
        }
        Ok(Some(confirmed))
    }

    fn step_menu(&mut self) -> Result<Flow, PortError> {
        let Some(confirmed) = self.poll_confirm()? else {
            return Ok(Flow::Quit);
        };
        if confirmed {
            self.start_session()?;
            return Ok(Flow::Continue);
        }

        let (w, h) = (self.config.screen.width, self.config.screen.height);
        self.background.scroll();
        render::draw_background(&mut self.port, &self.background, w, h)?;
        render::draw_menu(&mut self.port, w)?;
        self.port.present()?;
        self.port.tick(self.config.pacing.menu_tick_rate)?;
        Ok(Flow::Continue)
    }

    fn step_game_over(&mut self, score: u32, high_score: u32) -> Result<Flow, PortError> {
        let Some(confirmed) = self.poll_confirm()? else {
            return Ok(Flow::Quit);
        };
        if confirmed {
            self.start_session()?;
            return Ok(Flow::Continue);
        }

        let (w, h) = (self.config.screen.width, self.config.screen.height);
        self.background.scroll();
        render::draw_background(&mut self.port, &self.background, w, h)?;
        render::draw_game_over(&mut self.port, w, score, high_score)?;
        self.port.present()?;
        self.port.tick(self.config.pacing.menu_tick_rate)?;
        Ok(Flow::Continue)
    }

    // ── Playing ──────────────────────────────────────────────────────────────

    fn step_playing(&mut self) -> Result<Flow, PortError> {
        let Scene::Playing(session) = &mut self.scene else {
            return Ok(Flow::Continue);
        };

        let mut events = std::mem::take(&mut session.pending);
        events.extend(self.port.poll_events()?);

        let mut state = session.state.clone();
        let mut animation_frames = 0;
        for event in events {
            match event {
                InputEvent::Quit => return Ok(Flow::Quit),
                InputEvent::KeyDown(Key::Space) => {
                    state = compute::fire_bullet(&state);
                    self.port.play_sound(Sound::Laser)?;
                }
                InputEvent::TimerFired(TimerId::Spawn) => {
                    state = spawn::on_spawn_timer(&state, self.config.enemies.cap, &mut self.rng);
                }
                InputEvent::TimerFired(TimerId::Animation) => animation_frames += 1,
                InputEvent::Confirm | InputEvent::KeyDown(_) => {}
            }
        }

        let input = TickInput {
            held: self.port.held_keys(),
            animation_frames,
        };
        let outcome = compute::tick(&state, input, &mut self.rng);
        for impact in &outcome.impacts {
            trace!("impact {:?}", impact);
            match impact {
                Impact::EnemyShot { .. } | Impact::ShipStruck { .. } => {
                    self.port.play_sound(Sound::Explosion)?
                }
            }
        }
        session.state = outcome.state;

        let (w, h) = (self.config.screen.width, self.config.screen.height);
        self.background.scroll();
        render::draw_background(&mut self.port, &self.background, w, h)?;
        render::draw_hud(&mut self.port, &session.state)?;
        render::draw_entities(&mut self.port, &session.state)?;
        self.port.present()?;
        let dt = self.port.tick(self.config.pacing.play_tick_rate)?;

        if session.state.status == GameStatus::GameOver {
            let score = session.state.ship.score;
            self.finish_session(score)?;
        } else {
            session.collect_timers(dt);
        }
        Ok(Flow::Continue)
    }
}
