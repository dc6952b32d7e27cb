mod common;

use common::{ManualClock, engine_with_surface, seeded_settings, start_game, tap};
use tomo::consts::*;
use tomo::sim::{BulletOwner, create_bullet};
use tomo::{Engine, Screen, TickStatus};

fn player_shots(engine: &Engine) -> usize {
    engine
        .world()
        .bullets
        .iter()
        .filter(|b| b.is_player_shot())
        .count()
}

#[test]
fn tutorial_cleared_with_24_single_shots() {
    let (mut engine, _clock, surface) = engine_with_surface();
    start_game(&mut engine);
    assert_eq!(engine.screen(), Screen::Playing);
    assert!(engine.world().theme.is_tutorial());

    // Freeze the swarm so every shot can be aimed
    for enemy in &mut engine.world_mut().enemies {
        enemy.speed = 0.0;
    }

    for hit in 1..=24 {
        let world = engine.world_mut();
        let target = world
            .enemies
            .iter()
            .max_by(|a, b| a.y.total_cmp(&b.y))
            .map(|e| e.x + e.width / 2.0)
            .expect("enemies left");
        world.player.x = target - world.player.width / 2.0;

        engine.on_key_down(" ");
        engine.step();
        engine.on_key_up(" ");

        let mut frames = 0;
        while engine.world().score < hit * ENEMY_HIT_SCORE {
            assert!(player_shots(&engine) <= 1);
            engine.step();
            frames += 1;
            assert!(frames < 100, "shot {hit} never landed");
        }
        assert_eq!(engine.screen(), Screen::Playing);
    }

    assert_eq!(engine.world().score, 240);
    assert!(engine.world().enemies.is_empty());

    // The clear is reported on the next frame
    engine.step();
    assert!(matches!(engine.screen(), Screen::LevelTransition { remaining } if remaining > 0));
    let world = engine.world();
    assert_eq!(world.level, 2);
    assert_eq!(world.score, 240);
    assert_eq!(world.enemies.len(), 24);
    assert!(!world.theme.is_tutorial());
    assert!(surface.borrow().contains_text("Level 2"));
}

#[test]
fn boss_defeat_advances_level() {
    let (mut engine, _clock, _surface) = engine_with_surface();
    start_game(&mut engine);
    engine.world_mut().level = DEFAULT_BOSS_FREQUENCY;
    engine.step();
    assert!(engine.world().boss.is_some());
    assert!(engine.world().enemies.is_empty());

    let world = engine.world_mut();
    let boss = world.boss.as_mut().expect("boss spawned");
    boss.health = 1;
    boss.speed = 0.0;
    let (cx, cy) = (boss.x + boss.width / 2.0, boss.y + boss.height / 2.0);
    world
        .bullets
        .push(create_bullet(cx, cy, PLAYER_BULLET_DY, BulletOwner::Player));

    engine.step();
    assert_eq!(engine.world().boss.as_ref().map(|b| b.health), Some(0));

    engine.step();
    let world = engine.world();
    assert!(world.boss.is_none());
    assert_eq!(world.level, DEFAULT_BOSS_FREQUENCY + 1);
    assert_eq!(world.enemies.len(), 24);
    assert!(matches!(engine.screen(), Screen::LevelTransition { remaining } if remaining > 0));
}

#[test]
fn game_over_latches_until_restart() {
    let (mut engine, _clock, surface) = engine_with_surface();
    start_game(&mut engine);
    {
        let world = engine.world_mut();
        world.score = 90;
        world.level = 4;
        world.enemies[5].y = PLAYER_HEIGHT - ENEMY_HEIGHT;
    }
    engine.step();
    assert_eq!(engine.screen(), Screen::GameOver);
    assert!(engine.world().game_over);

    for _ in 0..10 {
        engine.step();
        assert_eq!(engine.screen(), Screen::GameOver);
        assert!(engine.world().game_over);
    }
    assert!(surface.borrow().contains_text("Final Score: 90"));

    tap(&mut engine, " ");
    assert_eq!(engine.screen(), Screen::Playing);
    let world = engine.world();
    assert!(!world.game_over);
    assert_eq!(world.score, 0);
    assert_eq!(world.level, 1);
    assert!(world.theme.is_tutorial());
}

#[test]
fn throttle_caps_frame_rate() {
    let (mut engine, clock, _surface) = engine_with_surface();

    // 100 calls 5 ms apart cover half a second: about 30 frames at 60 fps
    for _ in 0..100 {
        clock.advance(5.0);
        assert_eq!(engine.tick(), TickStatus::Running);
    }
    let frames = engine.frame_count();
    assert!((25..=31).contains(&frames), "{frames} frames");

    // A long stall is not caught up
    clock.advance(10_000.0);
    engine.tick();
    assert_eq!(engine.frame_count(), frames + 1);
}

#[test]
fn ticks_without_surface_do_nothing() {
    let clock = ManualClock::default();
    let mut engine = Engine::with_clock(seeded_settings(), Box::new(clock.clone())).unwrap();
    engine.start();
    for step in 1..50 {
        clock.set(step as f64 * 20.0);
        assert_eq!(engine.tick(), TickStatus::Running);
    }
    assert_eq!(engine.frame_count(), 0);
    assert_eq!(engine.screen(), Screen::Menu { selected: 0 });
}

#[test]
fn quit_from_menu_stops_the_loop() {
    let (mut engine, clock, _surface) = engine_with_surface();
    tap(&mut engine, "ArrowUp");
    engine.on_key_down("Enter");
    clock.advance(20.0);
    assert_eq!(engine.tick(), TickStatus::Stopped);
    clock.advance(20.0);
    assert_eq!(engine.tick(), TickStatus::Stopped);
}

#[test]
fn non_game_keys_pass_through() {
    let (mut engine, _clock, _surface) = engine_with_surface();
    assert!(engine.on_key_down("ArrowLeft"));
    assert!(engine.on_key_down("N"));
    assert!(!engine.on_key_down("Tab"));
    assert!(!engine.on_key_up("F5"));
}
