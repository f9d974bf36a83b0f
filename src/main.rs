//! Headless demo match
//!
//! Runs a scripted player against the AI for one minute of simulated time
//! and prints the final match state as JSON. Rendering, audio and camera
//! work are left to the embedding frontend; this binary exercises the
//! simulation alone.

use std::time::{SystemTime, UNIX_EPOCH};

use padel_arena::sim::{GameEvent, MatchState, TickInput, tick};

const DT: f32 = 1.0 / 60.0;
const DEMO_SECONDS: u64 = 60;

fn main() {
    env_logger::init();

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    log::info!("starting demo match with seed {seed}");

    let mut state = MatchState::new(seed);

    for _ in 0..(DEMO_SECONDS * 60) {
        let input = demo_input(&state);
        for event in tick(&mut state, &input, DT) {
            match event {
                GameEvent::PointScored {
                    side,
                    player_score,
                    ai_score,
                } => {
                    log::info!("{side:?} scores: {player_score}-{ai_score}");
                }
                GameEvent::Serve { side } => log::info!("{side:?} serves"),
                GameEvent::ServeFault => log::warn!("serve fault"),
                _ => log::debug!("{event:?}"),
            }
        }
    }

    match serde_json::to_string_pretty(&state) {
        Ok(json) => println!("{json}"),
        Err(err) => log::error!("failed to serialize match state: {err}"),
    }
}

/// A crude scripted player: track the ball laterally and swing whenever
/// the paddle is ready.
fn demo_input(state: &MatchState) -> TickInput {
    let dx = state.ball.position.x - state.player.position.x;
    TickInput {
        left: dx < -0.3,
        right: dx > 0.3,
        up: !state.ball.serving && state.ball.position.z < state.player.position.z - 1.0,
        down: false,
        sprint: dx.abs() > 2.0,
        swing: state.player.can_hit(),
    }
}
