/// Timer-driven enemy creation.
use log::debug;
use rand::Rng;

use crate::compute::ENEMY_ENTRY_Y;
use crate::config::SPAWN_MARGIN;
use crate::entities::{AlienKind, Enemy, PlayState, Rect, ALIEN_KINDS};

pub const MIN_ENEMY_SIZE: i32 = 40;
pub const MAX_ENEMY_SIZE: i32 = 100;
pub const MIN_ENEMY_SPEED: i32 = 1;
pub const MAX_ENEMY_SPEED: i32 = 3;

/// Uniform centre x in [SPAWN_MARGIN, width − SPAWN_MARGIN].
pub fn random_spawn_x(width: i32, rng: &mut impl Rng) -> i32 {
    rng.gen_range(SPAWN_MARGIN..=width - SPAWN_MARGIN)
}

/// A new square enemy centred just above the top edge, with random size,
/// speed and sprite.
pub fn random_enemy(width: i32, rng: &mut impl Rng) -> Enemy {
    let x = random_spawn_x(width, rng);
    let size = rng.gen_range(MIN_ENEMY_SIZE..=MAX_ENEMY_SIZE);
    let speed = rng.gen_range(MIN_ENEMY_SPEED..=MAX_ENEMY_SPEED);
    let kind = AlienKind::new(rng.gen_range(1..=ALIEN_KINDS));
    Enemy {
        rect: Rect::from_center(x, ENEMY_ENTRY_Y, size, size),
        speed,
        kind,
    }
}

/// Handle one spawn-timer event: add an enemy unless `cap` are already live.
/// A skipped opportunity is not queued.
pub fn on_spawn_timer(state: &PlayState, cap: usize, rng: &mut impl Rng) -> PlayState {
    if state.enemies.len() >= cap {
        return state.clone();
    }
    let enemy = random_enemy(state.width, rng);
    debug!(
        "spawned {:?} size {} speed {} at x={}",
        enemy.kind,
        enemy.rect.w,
        enemy.speed,
        enemy.rect.center_x()
    );
    let mut enemies = state.enemies.clone();
    enemies.push(enemy);
    PlayState {
        enemies,
        ..state.clone()
    }
}
