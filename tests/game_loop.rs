//! End-to-end behavior of the frame loop, driven through the public API with
//! recording canvas and audio doubles.

use std::rc::Rc;

use droppy_airplane::Tuning;
use droppy_airplane::consts::*;
use droppy_airplane::platform::{
    AudioSink, Canvas, DrawCommand, FrameOutcome, InputEvent, ScorePlacement, SoundEffect,
};
use droppy_airplane::player_spawn_point;
use droppy_airplane::sim::{
    Entity, GameEvent, GamePhase, GameState, Obstacle, Orientation, SpawnClock, SpriteKind, draw,
    tick,
};

#[derive(Default)]
struct RecordingAudio {
    played: Vec<SoundEffect>,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, effect: SoundEffect) {
        self.played.push(effect);
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Sprite(SpriteKind),
    Score(u32, ScorePlacement),
    Menu,
    Present,
}

#[derive(Default)]
struct RecordingCanvas {
    calls: Vec<Call>,
}

impl Canvas for RecordingCanvas {
    fn draw(&mut self, command: &DrawCommand<'_>) {
        self.calls.push(Call::Sprite(command.kind));
    }

    fn draw_score(&mut self, score: u32, placement: ScorePlacement) {
        self.calls.push(Call::Score(score, placement));
    }

    fn draw_menu(&mut self) {
        self.calls.push(Call::Menu);
    }

    fn present(&mut self) {
        self.calls.push(Call::Present);
    }
}

fn hold_mid_air(state: &mut GameState) {
    if let Some(player) = state.player_mut() {
        player.position.y = WINDOW_HEIGHT / 2.0 - 100.0;
        player.velocity_y = 0.0;
    }
}

fn crash(state: &mut GameState, audio: &mut dyn AudioSink) {
    if let Some(player) = state.player_mut() {
        player.position.y = -5.0;
    }
    tick(state, &[], 0.0, audio);
    assert_eq!(state.phase, GamePhase::GameOver);
}

#[test]
fn test_falls_under_gravity_without_jump_sound() {
    let tuning = Tuning {
        gravity: 330.0,
        ..Default::default()
    };
    let mut state = GameState::new(tuning, 3);
    let mut audio = RecordingAudio::default();
    let start_y = player_spawn_point().y;
    let mut max_y = start_y;

    for _ in 0..20 {
        assert_eq!(tick(&mut state, &[], 0.1, &mut audio), FrameOutcome::Continue);
        if let Some(player) = state.player() {
            max_y = max_y.max(player.position.y);
        }
    }

    assert!(max_y > start_y);
    assert!(!audio.played.contains(&SoundEffect::Jump));
}

#[test]
fn test_restart_from_game_over_resets_run() {
    let mut state = GameState::new(Tuning::default(), 5);
    let mut audio = RecordingAudio::default();
    for _ in 0..350 {
        hold_mid_air(&mut state);
        tick(&mut state, &[], 0.01, &mut audio);
        state.world.clear_obstacles();
    }
    assert_eq!(state.score, 3);
    crash(&mut state, &mut audio);
    assert_eq!(state.score, 3);

    tick(&mut state, &[InputEvent::PointerDown], 0.0, &mut audio);

    assert_eq!(state.phase, GamePhase::Active);
    assert_eq!(state.score, 0);
    let player = state.player().expect("player respawned");
    assert_eq!(player.velocity_y, 0.0);
    assert_eq!(player.position, player_spawn_point());
    assert!(state.events.contains(&GameEvent::Restarted));
}

#[test]
fn test_obstacle_on_top_of_player_is_fatal() {
    let mut state = GameState::new(Tuning::default(), 9);
    let mut audio = RecordingAudio::default();
    state.spawn_obstacle();

    let (top_left, mask) = {
        let collider = state.player().expect("player").collider();
        (collider.top_left.as_vec2(), collider.mask.clone())
    };
    let id = state.next_entity_id();
    state.world.insert(Entity::Obstacle(Obstacle::new(
        id,
        top_left,
        Orientation::Bottom,
        1,
        0.0,
        Rc::new(mask),
    )));

    tick(&mut state, &[], 0.0, &mut audio);

    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.obstacle_count(), 0);
    assert!(state.player().is_none());
    assert_eq!(audio.played, vec![SoundEffect::Crash]);
}

#[test]
fn test_game_over_spawns_nothing() {
    let mut state = GameState::new(Tuning::default(), 11);
    let mut audio = RecordingAudio::default();
    crash(&mut state, &mut audio);

    for _ in 0..50 {
        tick(
            &mut state,
            &[InputEvent::TimerFired(SPAWN_TIMER_ID)],
            SPAWN_INTERVAL,
            &mut audio,
        );
        assert_eq!(state.obstacle_count(), 0);
    }
}

#[test]
fn test_host_clock_spawns_once_per_timer_event() {
    let tuning = Tuning {
        spawn_clock: SpawnClock::Host,
        gravity: 1.0,
        ..Default::default()
    };
    let mut state = GameState::new(tuning, 23);
    let mut audio = RecordingAudio::default();
    let (mut fires, mut spawned) = (0, 0);

    // Each frame spans a full interval; only the host event may spawn
    for frame in 0..12 {
        hold_mid_air(&mut state);
        let input = if frame % 3 == 0 {
            fires += 1;
            vec![InputEvent::TimerFired(SPAWN_TIMER_ID)]
        } else {
            vec![]
        };
        tick(&mut state, &input, SPAWN_INTERVAL, &mut audio);
        spawned += state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::ObstacleSpawned { .. }))
            .count();
        state.world.clear_obstacles();
        assert_eq!(state.phase, GamePhase::Active);
    }
    assert_eq!(fires, 4);
    assert_eq!(spawned, fires);
}

#[test]
fn test_obstacles_leave_the_world_once_off_screen() {
    let mut state = GameState::new(Tuning::default(), 13);
    let mut audio = RecordingAudio::default();
    state.spawn_obstacle();
    // Travel time from the spawn point past the left margin at obstacle speed
    let distance = WINDOW_WIDTH + 100.0 + OFFSCREEN_MARGIN + OBSTACLE_WIDTH as f32 * 2.0;
    let frames = (distance / OBSTACLE_SPEED / 0.01) as usize + 2;

    let mut seen_gone = false;
    for _ in 0..frames {
        hold_mid_air(&mut state);
        // Keep the obstacle clear of the player while it scrolls
        for obstacle in state.world.obstacles_mut() {
            obstacle.position.y = -2000.0;
        }
        tick(&mut state, &[], 0.01, &mut audio);
        if state.world.obstacles().all(|o| o.id != 1) {
            seen_gone = true;
            break;
        }
    }
    assert_eq!(state.phase, GamePhase::Active);
    assert!(seen_gone);
}

#[test]
fn test_same_seed_and_inputs_replay_identically() {
    fn replay(seed: u64) -> Vec<(u32, f32, f32)> {
        let mut state = GameState::new(Tuning::default(), seed);
        let mut trace = Vec::new();
        for frame in 0..600 {
            let input = if frame % 45 == 0 {
                vec![InputEvent::PointerDown]
            } else {
                vec![]
            };
            tick(&mut state, &input, 1.0 / 120.0, &mut droppy_airplane::platform::Silent);
            let y = state.player().map_or(f32::NAN, |p| p.position.y);
            let first_x = state.world.obstacles().next().map_or(0.0, |o| o.position.x);
            trace.push((state.score, y, first_x));
        }
        trace
    }

    let (a, b) = (replay(77), replay(77));
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.0, y.0);
        assert!(x.1.to_bits() == y.1.to_bits());
        assert_eq!(x.2, y.2);
    }
}

#[test]
fn test_draw_order_and_overlay() {
    let mut state = GameState::new(Tuning::default(), 17);
    let mut audio = RecordingAudio::default();
    state.spawn_obstacle();

    let mut canvas = RecordingCanvas::default();
    draw(&state, &mut canvas);
    assert_eq!(canvas.calls.len(), 6);
    assert_eq!(
        canvas.calls[..3],
        [
            Call::Sprite(SpriteKind::Hills),
            Call::Sprite(SpriteKind::Ground),
            Call::Sprite(SpriteKind::Player),
        ]
    );
    assert!(matches!(
        canvas.calls[3],
        Call::Sprite(SpriteKind::Obstacle { .. })
    ));
    assert_eq!(
        canvas.calls[4..],
        [Call::Score(0, ScorePlacement::Hud), Call::Present]
    );

    crash(&mut state, &mut audio);
    let mut canvas = RecordingCanvas::default();
    draw(&state, &mut canvas);
    assert_eq!(
        canvas.calls,
        vec![
            Call::Sprite(SpriteKind::Hills),
            Call::Sprite(SpriteKind::Ground),
            Call::Score(0, ScorePlacement::UnderMenu),
            Call::Menu,
            Call::Present,
        ]
    );
}

#[test]
fn test_quit_ends_the_loop() {
    let mut state = GameState::new(Tuning::default(), 19);
    let outcome = tick(
        &mut state,
        &[InputEvent::Quit],
        0.01,
        &mut droppy_airplane::platform::Silent,
    );
    assert_eq!(outcome, FrameOutcome::Quit);
}
