//! AI opponent: serve positioning and execution, rally interception,
//! swing timing.
//!
//! The controller only steers the AI body's velocity and requests swings;
//! the actual contact is resolved by the paddle collision check like any
//! other hit.

use glam::Vec3;

use super::predict::predict_landing;
use super::serve;
use super::state::{GameEvent, MatchState, ServeSlot, Side};

/// Per-tick acceleration step toward the intercept target
const CHASE_ACCEL: f32 = 0.15;
/// Dead zone around the target inside which an axis decelerates
const TARGET_DEADZONE: f32 = 0.2;
/// Swing range, slightly beyond paddle reach so the swing lands in time
const SWING_RANGE: f32 = 1.8;

/// Drive the AI body for one tick.
pub fn update_ai(state: &mut MatchState, events: &mut Vec<GameEvent>) {
    let court = state.court;

    // Serve sub-mode: walk to the service slot, then serve
    if state.serve.current_server == Side::Ai && state.ball.serving {
        let serve_x = match state.serve.slot {
            ServeSlot::Right => court.half_width() / 2.0,
            ServeSlot::Left => -court.half_width() / 2.0,
        };
        let serve_z = court.ai_service_line_z() + 0.5;

        let ai = &mut state.ai_player;
        ai.velocity.x = (serve_x - ai.position.x) * 0.1;
        ai.velocity.z = (serve_z - ai.position.z) * 0.1;

        if (ai.position.x - serve_x).abs() < 0.5
            && (ai.position.z - serve_z).abs() < 0.5
            && !ai.swinging
        {
            ai.swing();
            serve::execute_ai_serve(state, events);
        }
        return;
    }

    let predicted = predict_landing(&state.ball, &state.physics, &court);

    if state.ball.position.z < 0.0 || predicted.z < 0.0 {
        // Ball is (or will be) on our half: intercept
        let target_x = predicted.x * 0.85;
        let ready_z = -court.half_length() + 2.5;
        let target_z = (predicted.z + 0.5).max(ready_z);

        let ai = &mut state.ai_player;
        let dx = target_x - ai.position.x;
        let dz = target_z - ai.position.z;

        if dx.abs() > TARGET_DEADZONE {
            ai.velocity.x += dx.signum() * CHASE_ACCEL;
        } else {
            ai.velocity.x *= 0.8;
        }
        if dz.abs() > TARGET_DEADZONE {
            ai.velocity.z += dz.signum() * CHASE_ACCEL;
        } else {
            ai.velocity.z *= 0.8;
        }

        // Held a notch below the body's top speed
        let max_speed = ai.speed * 0.8;
        let speed = crate::planar_speed(ai.velocity);
        if speed > max_speed {
            ai.velocity.x = ai.velocity.x / speed * max_speed;
            ai.velocity.z = ai.velocity.z / speed * max_speed;
        }

        let ball = &state.ball;
        let paddle = state.ai_player.paddle_world();
        let ball_distance = ball.position.distance(paddle);
        let reachable_height =
            ball.position.y < state.ai_player.head_y() + 1.0 && ball.position.y > 0.1;
        let on_our_side = ball.position.z < -0.2;
        let not_escaping = ball.velocity.z < 5.0;

        if ball_distance < SWING_RANGE
            && !state.ai_player.swinging
            && state.ai_player.can_hit()
            && reachable_height
            && on_our_side
            && not_escaping
        {
            state.ai_player.swing();
        }
    } else {
        // Ball on the opponent's half: ease back to a neutral ready spot
        let ready = Vec3::new(0.0, 0.0, -court.half_length() + 2.0);
        let ai = &mut state.ai_player;
        ai.velocity.x = (ready.x - ai.position.x) * 0.05;
        ai.velocity.z = (ready.z - ai.position.z) * 0.05;
    }
}
