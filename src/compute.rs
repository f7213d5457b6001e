/// Pure game-logic functions for the Playing scene.
///
/// Every public function takes an immutable reference to the current
/// `PlayState` (and, where needed, an RNG handle) and returns a brand-new
/// `PlayState`.  Side effects are limited to the injected RNG; anything the
/// caller should react to (sounds) is reported back as `Impact`s.
///
/// Collision detection is a nested bullets × enemies scan.  With at most a
/// handful of enemies on screen no spatial index is needed.

use log::debug;
use rand::Rng;

use crate::entities::{
    Bullet, Enemy, Explosion, GameStatus, PlayState, Rect, Ship, EXPLOSION_FRAMES,
};
use crate::port::HeldKeys;
use crate::spawn::random_spawn_x;

/// Horizontal ship step per tick while a direction is held.
pub const SHIP_STEP: i32 = 3;
/// Upward bullet step per tick.
pub const BULLET_STEP: i32 = 5;
/// Centre height enemies are placed at when spawned or recycled.
pub const ENEMY_ENTRY_Y: i32 = -50;

/// Something that happened during a tick which the scene turns into sound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Impact {
    /// A bullet destroyed the enemy that occupied `at`.
    EnemyShot { at: Rect },
    /// An enemy rammed the ship.
    ShipStruck { at: Rect },
}

/// Per-tick input sampled by the scene.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickInput {
    pub held: HeldKeys,
    /// How many times the animation timer fired since the last tick.
    pub animation_frames: u32,
}

#[derive(Clone, Debug)]
pub struct TickOutcome {
    pub state: PlayState,
    pub impacts: Vec<Impact>,
}

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the state for a fresh session on a `width` × `height` screen.
pub fn init_state(width: i32, height: i32) -> PlayState {
    PlayState {
        ship: Ship::spawn(width, height),
        enemies: Vec::new(),
        bullets: Vec::new(),
        explosion: None,
        status: GameStatus::Playing,
        frame: 0,
        width,
        height,
    }
}

// ── Input-driven state transitions (pure) ───────────────────────────────────

/// Apply held direction keys.  Left and right are independent checks, so
/// holding both cancels out.
pub fn move_ship(state: &PlayState, held: HeldKeys) -> PlayState {
    let max_x = state.width - state.ship.rect.w;
    let mut rect = state.ship.rect;
    if held.left && rect.x > 0 {
        rect.x = (rect.x - SHIP_STEP).max(0);
    }
    if held.right && rect.x < max_x {
        rect.x = (rect.x + SHIP_STEP).min(max_x);
    }
    PlayState {
        ship: Ship { rect, ..state.ship.clone() },
        ..state.clone()
    }
}

/// Fire a bullet from the ship's centre.
pub fn fire_bullet(state: &PlayState) -> PlayState {
    let mut bullets = state.bullets.clone();
    bullets.push(Bullet::fired_from(&state.ship));
    PlayState {
        bullets,
        ..state.clone()
    }
}

/// Step the active explosion by `frames` animation frames, clearing it once
/// it reaches the terminal frame.
pub fn advance_explosion(state: &PlayState, frames: u32) -> PlayState {
    let explosion = state.explosion.as_ref().and_then(|exp| {
        let frame = (exp.frame as u32 + frames).min(EXPLOSION_FRAMES as u32) as u8;
        if frame >= EXPLOSION_FRAMES {
            None
        } else {
            Some(Explosion { frame, ..exp.clone() })
        }
    });
    PlayState {
        explosion,
        ..state.clone()
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the session by one tick.  All randomness (enemy recycling) comes
/// through `rng` so callers control determinism.
pub fn tick(state: &PlayState, input: TickInput, rng: &mut impl Rng) -> TickOutcome {
    let mut impacts = Vec::new();

    // ── 1. Ship motion ───────────────────────────────────────────────────────
    let moved = move_ship(state, input.held);
    let mut ship = moved.ship;

    // ── 2. Enemy motion; enemies below the screen are recycled to the top ────
    let mut enemies: Vec<Enemy> = state
        .enemies
        .iter()
        .map(|e| {
            let mut e = e.clone();
            if e.rect.y < state.height {
                e.rect.y += e.speed;
            } else {
                let x = random_spawn_x(state.width, rng);
                e.rect.set_center(x, ENEMY_ENTRY_Y);
                debug!("recycled {:?} to x={}", e.kind, x);
            }
            e
        })
        .collect();

    // ── 3. Bullet motion; bullets above the top edge are gone ────────────────
    let bullets: Vec<Bullet> = state
        .bullets
        .iter()
        .filter_map(|b| {
            let y = b.rect.y - BULLET_STEP;
            if y < 0 {
                None
            } else {
                Some(Bullet { rect: Rect { y, ..b.rect } })
            }
        })
        .collect();

    // ── 4. Explosion animation ───────────────────────────────────────────────
    // Only the explosion that was already running advances; one started by a
    // collision below shows frame 1 first.
    let mut explosion = advance_explosion(state, input.animation_frames).explosion;

    // ── 5. Collision: bullets ↔ enemies ──────────────────────────────────────
    // Each bullet takes out at most the first enemy it overlaps.  Every hit
    // scores, but only the first one starts an explosion when none is active.
    let mut surviving_bullets = Vec::with_capacity(bullets.len());
    for bullet in bullets {
        match enemies.iter().position(|e| bullet.rect.overlaps(&e.rect)) {
            Some(ei) => {
                let enemy = enemies.remove(ei);
                ship.score += 1;
                debug!("bullet hit {:?} at {:?}; score {}", enemy.kind, enemy.rect, ship.score);
                if explosion.is_none() {
                    explosion = Some(Explosion::at(enemy.rect));
                }
                impacts.push(Impact::EnemyShot { at: enemy.rect });
            }
            None => surviving_bullets.push(bullet),
        }
    }

    // ── 6. Collision: ship ↔ enemies ─────────────────────────────────────────
    let mut status = state.status;
    let mut surviving_enemies = Vec::with_capacity(enemies.len());
    for enemy in enemies {
        if status != GameStatus::Playing || !ship.rect.overlaps(&enemy.rect) {
            surviving_enemies.push(enemy);
            continue;
        }
        ship.health = ship.health.saturating_sub(1);
        debug!("ship struck by {:?}; health {}", enemy.kind, ship.health);
        if ship.health == 0 {
            status = GameStatus::GameOver;
            explosion = Some(Explosion::at(state.screen_rect()));
        } else if explosion.is_none() {
            explosion = Some(Explosion::at(enemy.rect));
        }
        impacts.push(Impact::ShipStruck { at: enemy.rect });
    }

    let next = PlayState {
        ship,
        enemies: surviving_enemies,
        bullets: surviving_bullets,
        explosion,
        status,
        frame: state.frame + 1,
        ..state.clone()
    };

    TickOutcome { state: next, impacts }
}
