mod common;

use std::time::Duration;

use common::{idle, Call, Frame, ScriptedPort};
use rand::rngs::StdRng;
use rand::SeedableRng;

use space_raid::config::GameConfig;
use space_raid::entities::*;
use space_raid::port::{HeldKeys, InputEvent, Key, Sound, Sprite};
use space_raid::scene::{Flow, Game, Scene};

type TestGame = Game<ScriptedPort, StdRng>;

fn game(frames: Vec<Frame>) -> TestGame {
    Game::new(GameConfig::default(), ScriptedPort::new(frames), StdRng::seed_from_u64(42))
}

fn confirm() -> Frame {
    Frame::events(&[InputEvent::Confirm])
}

/// Arrange for the next Playing tick to end the session with `score`.
fn doom(game: &mut TestGame, score: u32) {
    let session = game.session_mut().expect("playing");
    session.state.ship.health = 1;
    session.state.ship.score = score;
    session.state.enemies.push(Enemy {
        rect: Rect::new(380, 560, 40, 40),
        speed: 1,
        kind: AlienKind::new(2),
    });
}

// ── Menu ──────────────────────────────────────────────────────────────────────

#[test]
fn starts_in_menu() {
    let g = game(vec![]);
    assert!(matches!(g.scene(), Scene::Menu));
    assert_eq!(g.high_score(), 0);
}

#[test]
fn menu_draws_and_paces_at_menu_rate() {
    let mut g = game(idle(1));
    assert_eq!(g.step().unwrap(), Flow::Continue);
    let calls = &g.port().calls;
    assert!(calls.contains(&Call::Text("Click Anywhere To Play".into(), 400, 500)));
    assert_eq!(calls[calls.len() - 2..], [Call::Present, Call::Tick(15)]);
}

#[test]
fn confirm_in_menu_starts_fresh_session() {
    let mut g = game(vec![confirm()]);
    assert_eq!(g.step().unwrap(), Flow::Continue);
    let session = g.session().expect("playing");
    assert_eq!(session.state.ship.health, 5);
    assert_eq!(session.state.ship.score, 0);
    assert!(session.state.enemies.is_empty());
    assert!(session.state.bullets.is_empty());
    assert!(g.port().calls.contains(&Call::Music(Sound::Background)));
}

#[test]
fn quit_from_menu_draws_nothing() {
    let mut g = game(vec![Frame::events(&[InputEvent::Quit])]);
    g.run().unwrap();
    assert_eq!(g.port().calls, vec![Call::Shutdown]);
}

// ── Playing ───────────────────────────────────────────────────────────────────

#[test]
fn playing_paces_at_play_rate_and_draws_hud() {
    let mut g = game(vec![confirm(), Frame::default()]);
    g.step().unwrap();
    g.step().unwrap();
    let calls = &g.port().calls;
    assert_eq!(calls.last(), Some(&Call::Tick(120)));
    assert!(calls.contains(&Call::Text("Score : 0".into(), 750, 20)));
    assert!(calls.contains(&Call::Sprite(Sprite::Ship, Rect::new(375, 550, 50, 100))));
}

#[test]
fn space_fires_bullet_with_laser_sound() {
    let mut g = game(vec![confirm(), Frame::events(&[InputEvent::KeyDown(Key::Space)])]);
    g.step().unwrap();
    g.step().unwrap();
    let session = g.session().unwrap();
    assert_eq!(session.state.bullets.len(), 1);
    assert_eq!(session.state.bullets[0].rect, Rect::new(390, 585, 20, 20));
    assert_eq!(g.port().count(&Call::Sound(Sound::Laser)), 1);
}

#[test]
fn held_keys_move_ship() {
    let held = HeldKeys { left: true, right: false };
    let mut g = game(vec![confirm(), Frame::holding(held), Frame::holding(held)]);
    for _ in 0..3 {
        g.step().unwrap();
    }
    assert_eq!(g.session().unwrap().state.ship.rect.x, 369);
}

#[test]
fn kill_plays_explosion_sound() {
    let mut g = game(vec![confirm(), Frame::default()]);
    g.step().unwrap();
    let session = g.session_mut().unwrap();
    session.state.enemies.push(Enemy {
        rect: Rect::new(200, 98, 20, 20),
        speed: 2,
        kind: AlienKind::new(1),
    });
    session.state.bullets.push(Bullet { rect: Rect::new(200, 105, 20, 20) });
    g.step().unwrap();
    assert_eq!(g.session().unwrap().state.ship.score, 1);
    assert_eq!(g.port().count(&Call::Sound(Sound::Explosion)), 1);
    assert!(g
        .port()
        .calls
        .contains(&Call::Sprite(Sprite::Explosion(1), Rect::new(200, 100, 20, 20))));
}

#[test]
fn last_explosion_frame_is_drawn() {
    let mut state = space_raid::compute::init_state(800, 700);
    state.explosion = Some(Explosion { rect: Rect::new(10, 10, 40, 40), frame: 9 });
    let mut port = ScriptedPort::new(Vec::new());
    space_raid::render::draw_entities(&mut port, &state).unwrap();
    assert!(port.calls.contains(&Call::Sprite(Sprite::Explosion(9), Rect::new(10, 10, 40, 40))));
}

#[test]
fn spawn_cadence_follows_elapsed_time() {
    // 500 ms per tick: the 2 s spawn timer fires after the 4th tick and the
    // enemy appears while handling the 5th.
    let port = ScriptedPort::new([vec![confirm()], idle(5)].concat())
        .with_dt(Duration::from_millis(500));
    let mut g = Game::new(GameConfig::default(), port, StdRng::seed_from_u64(1));
    for _ in 0..5 {
        g.step().unwrap();
    }
    assert!(g.session().unwrap().state.enemies.is_empty());
    g.step().unwrap();
    assert_eq!(g.session().unwrap().state.enemies.len(), 1);
}

#[test]
fn faster_ticks_need_more_of_them() {
    let port = ScriptedPort::new([vec![confirm()], idle(9)].concat())
        .with_dt(Duration::from_millis(250));
    let mut g = Game::new(GameConfig::default(), port, StdRng::seed_from_u64(1));
    for _ in 0..9 {
        g.step().unwrap();
    }
    assert!(g.session().unwrap().state.enemies.is_empty());
    g.step().unwrap();
    assert_eq!(g.session().unwrap().state.enemies.len(), 1);
}

#[test]
fn enemy_count_never_exceeds_cap() {
    // Every tick spans a whole spawn interval.
    let port = ScriptedPort::new([vec![confirm()], idle(30)].concat())
        .with_dt(Duration::from_millis(2000));
    let mut g = Game::new(GameConfig::default(), port, StdRng::seed_from_u64(3));
    g.step().unwrap();
    for _ in 0..30 {
        g.step().unwrap();
        match g.session() {
            Some(s) => assert!(s.state.enemies.len() <= 5),
            None => break,
        }
    }
}

#[test]
fn quit_while_playing_stops_before_drawing() {
    let mut g = game(vec![confirm(), Frame::default(), Frame::events(&[InputEvent::Quit])]);
    g.run().unwrap();
    let calls = &g.port().calls;
    assert_eq!(calls[calls.len() - 2..], [Call::Tick(120), Call::Shutdown]);
}

// ── Game over ─────────────────────────────────────────────────────────────────

#[test]
fn last_hit_moves_to_game_over_with_fullscreen_explosion() {
    let mut g = game(vec![confirm(), Frame::default()]);
    g.step().unwrap();
    doom(&mut g, 0);
    g.step().unwrap();
    assert!(matches!(g.scene(), Scene::GameOver { score: 0, high_score: 0 }));
    let calls = &g.port().calls;
    assert!(calls.contains(&Call::Sprite(Sprite::Explosion(1), Rect::new(0, 0, 800, 700))));
    assert!(calls.contains(&Call::StopMusic));
}

#[test]
fn game_over_screen_shows_scores() {
    let mut g = game(vec![confirm(), Frame::default(), Frame::default()]);
    g.step().unwrap();
    doom(&mut g, 4);
    g.step().unwrap();
    g.step().unwrap();
    let calls = &g.port().calls;
    assert!(calls.contains(&Call::Text("High Score : 4".into(), 400, 500)));
    assert!(calls.contains(&Call::Text("Score : 4".into(), 400, 550)));
    assert!(calls.contains(&Call::Text("Click Anywhere To Play Again".into(), 400, 650)));
    assert_eq!(calls.last(), Some(&Call::Tick(15)));
}

#[test]
fn high_score_carries_across_sessions() {
    let mut g = game(vec![
        confirm(),
        Frame::default(),
        confirm(),
        Frame::default(),
        confirm(),
        Frame::default(),
    ]);

    g.step().unwrap();
    doom(&mut g, 7);
    g.step().unwrap();
    assert!(matches!(g.scene(), Scene::GameOver { score: 7, high_score: 7 }));

    g.step().unwrap(); // play again
    let session = g.session().expect("playing again");
    assert_eq!(session.state.ship.score, 0);
    assert_eq!(session.state.ship.health, 5);
    doom(&mut g, 3);
    g.step().unwrap();
    assert!(matches!(g.scene(), Scene::GameOver { score: 3, high_score: 7 }));

    g.step().unwrap();
    doom(&mut g, 9);
    g.step().unwrap();
    assert!(matches!(g.scene(), Scene::GameOver { score: 9, high_score: 9 }));
    assert_eq!(g.high_score(), 9);
}

#[test]
fn quit_from_game_over() {
    let mut g = game(vec![confirm(), Frame::default(), Frame::events(&[InputEvent::Quit])]);
    g.step().unwrap();
    doom(&mut g, 1);
    assert_eq!(g.step().unwrap(), Flow::Continue);
    assert_eq!(g.step().unwrap(), Flow::Quit);
}

// ── Background & failures ─────────────────────────────────────────────────────

#[test]
fn background_wraps_after_one_screen() {
    let mut g = game(idle(700));
    for _ in 0..699 {
        g.step().unwrap();
        let offset = g.background().offset();
        assert!(offset > -700 && offset <= 0);
    }
    assert_eq!(g.background().offset(), -699);
    g.step().unwrap();
    assert_eq!(g.background().offset(), 0);
}

#[test]
fn background_tiles_drawn_a_screen_apart() {
    let mut g = game(idle(1));
    g.step().unwrap();
    let tiles: Vec<_> = g
        .port()
        .sprites()
        .into_iter()
        .filter(|(s, _)| *s == Sprite::Background)
        .map(|(_, r)| r)
        .collect();
    assert_eq!(tiles, vec![Rect::new(0, -1, 800, 700), Rect::new(0, 699, 800, 700)]);
}

#[test]
fn scene_change_resets_background() {
    let mut g = game([idle(10), vec![confirm()]].concat());
    for _ in 0..11 {
        g.step().unwrap();
    }
    assert_eq!(g.background().offset(), 0);
}

#[test]
fn port_failure_aborts_run() {
    let mut g = game(idle(3));
    g.port_mut().fail_present = true;
    assert!(g.run().is_err());
    assert!(!g.port().calls.contains(&Call::Shutdown));
}
