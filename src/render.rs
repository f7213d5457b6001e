/// Translates state into Port draw calls.  No game logic lives here and
/// nothing is mutated; each function reads a view of the state and emits
/// the primitives for one layer of the frame.

use crate::background::Background;
use crate::entities::{PlayState, Rect, MAX_HEALTH};
use crate::error::PortError;
use crate::port::{Port, Rgb, Sprite};

const TITLE_TEXT_SIZE: u16 = 30;
const HUD_TEXT_SIZE: u16 = 20;
/// Health bar width per point of health.
const HEALTH_SEGMENT: i32 = 20;

// ── Shared ────────────────────────────────────────────────────────────────────

pub fn draw_background<P: Port>(
    port: &mut P,
    background: &Background,
    width: i32,
    height: i32,
) -> Result<(), PortError> {
    for y in background.tile_positions() {
        port.draw_sprite(Sprite::Background, Rect::new(0, y, width, height))?;
    }
    Ok(())
}

// ── Menu & game over ─────────────────────────────────────────────────────────

pub fn draw_menu<P: Port>(port: &mut P, width: i32) -> Result<(), PortError> {
    port.draw_sprite(Sprite::Logo, Rect::new(150, 50, 500, 200))?;
    port.draw_text("Click Anywhere To Play", width / 2, 500, TITLE_TEXT_SIZE)
}

pub fn draw_game_over<P: Port>(
    port: &mut P,
    width: i32,
    score: u32,
    high_score: u32,
) -> Result<(), PortError> {
    let cx = width / 2;
    port.draw_sprite(Sprite::GameOverLogo, Rect::new(150, 50, 500, 400))?;
    port.draw_text(&format!("High Score : {high_score}"), cx, 500, TITLE_TEXT_SIZE)?;
    port.draw_text(&format!("Score : {score}"), cx, 550, TITLE_TEXT_SIZE)?;
    port.draw_text("Click Anywhere To Play Again", cx, 650, TITLE_TEXT_SIZE)
}

// ── Playing ──────────────────────────────────────────────────────────────────

/// Health frame, health bar and score readout.
pub fn draw_hud<P: Port>(port: &mut P, state: &PlayState) -> Result<(), PortError> {
    let frame_right = 10 + HEALTH_SEGMENT * MAX_HEALTH as i32;
    port.draw_rect(Rgb::WHITE, Rect::new(5, 5, frame_right, 5))?;
    port.draw_rect(Rgb::WHITE, Rect::new(5, 30, frame_right, 5))?;
    port.draw_rect(Rgb::WHITE, Rect::new(5, 10, 5, 20))?;
    port.draw_rect(Rgb::WHITE, Rect::new(frame_right, 10, 5, 20))?;
    if state.ship.health > 0 {
        let bar = HEALTH_SEGMENT * state.ship.health as i32;
        port.draw_rect(Rgb::GREEN, Rect::new(10, 10, bar, 20))?;
    }
    port.draw_text(
        &format!("Score : {}", state.ship.score),
        state.width - 50,
        20,
        HUD_TEXT_SIZE,
    )
}

/// Ship, enemies, bullets and the active explosion frame, in that order.
pub fn draw_entities<P: Port>(port: &mut P, state: &PlayState) -> Result<(), PortError> {
    port.draw_sprite(Sprite::Ship, state.ship.rect)?;
    for enemy in &state.enemies {
        port.draw_sprite(Sprite::Alien(enemy.kind), enemy.rect)?;
    }
    for bullet in &state.bullets {
        port.draw_sprite(Sprite::Bullet, bullet.rect)?;
    }
    if let Some(exp) = &state.explosion {
        port.draw_sprite(Sprite::Explosion(exp.frame), exp.rect)?;
    }
    Ok(())
}
