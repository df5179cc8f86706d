//! Per-frame game loop
//!
//! Drives one frame in a fixed order:
//! clock → input → scenery → (player, spawns, obstacles, collision) → score.
//! Rendering is a separate [`draw`] pass over the resulting state.

use super::collision;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::SPAWN_TIMER_ID;
use crate::platform::{AudioSink, Canvas, FrameOutcome, InputEvent, ScorePlacement, SoundEffect};

/// Advance the game by one frame of `dt` seconds
///
/// `events` is the input drained from the host since the previous frame.
/// A `Quit` event ends the frame immediately. A negative or non-finite `dt`
/// counts as a zero-length frame.
pub fn tick(
    state: &mut GameState,
    events: &[InputEvent],
    dt: f32,
    audio: &mut dyn AudioSink,
) -> FrameOutcome {
    let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
    state.events.clear();
    state.clock += dt as f64;

    for event in events {
        match *event {
            InputEvent::Quit => {
                log::info!("Quit requested (score {})", state.score);
                return FrameOutcome::Quit;
            }
            InputEvent::PointerDown => match state.phase {
                GamePhase::Active => {
                    if let Some(player) = state.player_mut() {
                        player.jump();
                        audio.play(SoundEffect::Jump);
                        state.events.push(GameEvent::Jumped);
                    }
                }
                GamePhase::GameOver => restart(state),
            },
            InputEvent::TimerFired(SPAWN_TIMER_ID) => {
                for _ in 0..state.spawner.host_fired(state.phase) {
                    let id = state.spawn_obstacle();
                    state.events.push(GameEvent::ObstacleSpawned { id });
                }
            }
            InputEvent::TimerFired(_) => {}
        }
    }

    // Scenery scrolls in every phase; gameplay entities only while active
    state.world.advance(dt, state.phase);

    let fired = state.spawner.tick(dt, state.phase);
    for _ in 0..fired {
        let id = state.spawn_obstacle();
        state.events.push(GameEvent::ObstacleSpawned { id });
    }

    if state.phase == GamePhase::Active {
        let crashed = state
            .player()
            .is_some_and(|player| collision::check(player, state.world.collidables()));
        if crashed {
            game_over(state, audio);
        }
    }

    if state.phase == GamePhase::Active {
        state.score = (state.clock - state.score_start_time).max(0.0).floor() as u32;
    }

    FrameOutcome::Continue
}

/// End the run: clear gameplay entities and freeze the score
pub fn game_over(state: &mut GameState, audio: &mut dyn AudioSink) {
    state.phase = GamePhase::GameOver;
    state.world.remove_player();
    state.world.clear_obstacles();
    audio.play(SoundEffect::Crash);
    state.events.push(GameEvent::Crashed { score: state.score });
    log::info!("Game over - survived {} s", state.score);
}

/// Start a new run from the game-over screen
pub fn restart(state: &mut GameState) {
    state.phase = GamePhase::Active;
    state.spawn_player();
    state.world.clear_obstacles();
    state.spawner.reset();
    state.score = 0;
    state.score_start_time = state.clock;
    state.events.push(GameEvent::Restarted);
    log::info!("Restarted");
}

/// Emit the frame to the renderer: sprites back to front, then the score,
/// then the menu overlay when the run is over
pub fn draw(state: &GameState, canvas: &mut dyn Canvas) {
    for entity in state.world.entities() {
        canvas.draw(&entity.draw_command());
    }
    match state.phase {
        GamePhase::Active => canvas.draw_score(state.score, ScorePlacement::Hud),
        GamePhase::GameOver => {
            canvas.draw_score(state.score, ScorePlacement::UnderMenu);
            canvas.draw_menu();
        }
    }
    canvas.present();
}
