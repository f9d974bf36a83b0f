//! Serve state machine: rally resets, serve pinning, serve execution and
//! server/slot rotation.

use glam::Vec3;
use rand::Rng;

use super::state::{GameEvent, MatchState, ServeSlot, Side};

/// Height at which the ball is held during serve preparation
const SERVE_HOLD_Y: f32 = 1.5;

/// Zero the rally state and hand the ball back to the server.
pub fn reset_rally(state: &mut MatchState) {
    state.ball.serving = true;
    state.ball.velocity = Vec3::ZERO;
    state.ball.spin = Vec3::ZERO;
    state.ball.bounces = 0;
    state.ball.last_hit_by = None;
}

/// Re-pin the held ball to the serving body. Called every tick while
/// `serving` is true; the ball is never integrated in that phase.
pub fn pin_ball_to_server(state: &mut MatchState) {
    let court = state.court;
    let server = state.server_body();
    let pos = server.position;

    state.ball.position = match state.serve.current_server {
        Side::Player => {
            let serve_z = court.player_service_line_z() - 0.5;
            // Held ahead of the body, capped just past the service line
            Vec3::new(pos.x, SERVE_HOLD_Y, (pos.z - 0.3).min(serve_z + 0.2))
        }
        Side::Ai => {
            let serve_z = court.ai_service_line_z() + 0.5;
            Vec3::new(pos.x, SERVE_HOLD_Y, (pos.z + 0.3).max(serve_z - 0.2))
        }
    };
}

/// Handle the player's swing input during their own serve. The swing always
/// plays out; the serve only executes from behind the service line,
/// otherwise the attempt is consumed and the warning flag raised.
pub fn try_player_serve(state: &mut MatchState, events: &mut Vec<GameEvent>) {
    state.player.swing();

    if state.player.position.z > state.court.player_service_line_z() {
        let dir = match state.serve.slot {
            ServeSlot::Right => 1.0,
            ServeSlot::Left => -1.0,
        };
        let rng = &mut state.rng;
        state.ball.velocity = Vec3::new(
            dir * (2.0 + rng.random_range(0.0..2.0)),
            5.0 + rng.random_range(0.0..2.0),
            -10.0 - rng.random_range(0.0..3.0),
        );
        state.ball.spin = Vec3::new(
            rng.random_range(-7.5..7.5),
            dir * 5.0,
            rng.random_range(-5.0..5.0),
        );
        state.ball.serving = false;
        state.ball.last_hit_by = Some(Side::Player);
        events.push(GameEvent::Serve { side: Side::Player });
    } else {
        state.serve.show_warning = true;
        events.push(GameEvent::ServeFault);
        log::debug!(
            "serve attempt from z={:.2}, line at z={:.2}",
            state.player.position.z,
            state.court.player_service_line_z()
        );
    }
}

/// Execute the AI's serve once its body is in position (cross-court,
/// slightly gentler randomization than the player's).
pub fn execute_ai_serve(state: &mut MatchState, events: &mut Vec<GameEvent>) {
    let dir = match state.serve.slot {
        ServeSlot::Right => -1.0,
        ServeSlot::Left => 1.0,
    };
    let rng = &mut state.rng;
    state.ball.velocity = Vec3::new(
        dir * (2.0 + rng.random_range(0.0..1.0)),
        4.0 + rng.random_range(0.0..1.0),
        8.0 + rng.random_range(0.0..2.0),
    );
    state.ball.spin = Vec3::new(
        rng.random_range(-5.0..5.0),
        dir * 3.0,
        rng.random_range(-2.5..2.5),
    );
    state.ball.serving = false;
    state.ball.last_hit_by = Some(Side::Ai);
    events.push(GameEvent::Serve { side: Side::Ai });
}

/// Rotate serve after a scored point: server changes every second point,
/// the slot flips every point.
pub fn rotate_after_point(state: &mut MatchState) {
    reset_rally(state);

    state.serve.serve_count += 1;
    if state.serve.serve_count >= 2 {
        state.serve.current_server = state.serve.current_server.opponent();
        state.serve.serve_count = 0;
        log::info!("serve passes to {:?}", state.serve.current_server);
    }
    state.serve.slot = state.serve.slot.flip();
    state.trigger_reset = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_zeroes_rally_state() {
        let mut state = MatchState::new(3);
        state.ball.serving = false;
        state.ball.velocity = Vec3::new(1.0, 2.0, 3.0);
        state.ball.spin = Vec3::new(4.0, 5.0, 6.0);
        state.ball.bounces = 2;
        state.ball.last_hit_by = Some(Side::Ai);

        reset_rally(&mut state);
        assert!(state.ball.serving);
        assert_eq!(state.ball.velocity, Vec3::ZERO);
        assert_eq!(state.ball.spin, Vec3::ZERO);
        assert_eq!(state.ball.bounces, 0);
        assert_eq!(state.ball.last_hit_by, None);
    }

    #[test]
    fn test_ball_pinned_behind_player_line() {
        let mut state = MatchState::new(4);
        state.player.position = Vec3::new(1.0, 0.7, 9.0);
        pin_ball_to_server(&mut state);
        assert_eq!(state.ball.position.x, 1.0);
        assert_eq!(state.ball.position.y, SERVE_HOLD_Y);
        // Deep in the court the hold spot caps near the service line
        let cap = state.court.player_service_line_z() - 0.3;
        assert_eq!(state.ball.position.z, cap);
        // Closer to the net it trails the body instead
        state.player.position.z = 5.0;
        pin_ball_to_server(&mut state);
        assert_eq!(state.ball.position.z, 4.7);
    }

    #[test]
    fn test_ball_pinned_behind_ai_line() {
        let mut state = MatchState::new(4);
        state.serve.current_server = Side::Ai;
        state.ai_player.position = Vec3::new(-2.0, 0.7, -1.0);
        pin_ball_to_server(&mut state);
        assert!(state.ball.position.z >= state.court.ai_service_line_z() + 0.3);
    }

    #[test]
    fn test_illegal_player_serve_raises_warning() {
        let mut state = MatchState::new(5);
        state.player.position.z = 5.0; // in front of the line at z=7
        let mut events = Vec::new();
        try_player_serve(&mut state, &mut events);

        assert!(state.ball.serving, "serve must not execute");
        assert!(state.serve.show_warning);
        assert!(state.player.swinging, "the swing itself still plays");
        assert!(events.contains(&GameEvent::ServeFault));
    }

    #[test]
    fn test_legal_player_serve_launches_cross_court() {
        let mut state = MatchState::new(6);
        state.player.position.z = 8.0;
        let mut events = Vec::new();
        try_player_serve(&mut state, &mut events);

        assert!(!state.ball.serving);
        assert!(!state.serve.show_warning);
        assert_eq!(state.ball.last_hit_by, Some(Side::Player));
        // Right slot serves toward negative z with a positive lateral kick
        assert!(state.ball.velocity.z <= -10.0);
        assert!(state.ball.velocity.x >= 2.0);
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::Serve {
                side: Side::Player
            }
        )));
    }

    #[test]
    fn test_server_alternates_every_two_points() {
        let mut state = MatchState::new(8);
        assert_eq!(state.serve.current_server, Side::Player);

        state.trigger_reset = true;
        rotate_after_point(&mut state);
        assert_eq!(state.serve.current_server, Side::Player);
        assert_eq!(state.serve.serve_count, 1);
        assert!(!state.trigger_reset);

        rotate_after_point(&mut state);
        assert_eq!(state.serve.current_server, Side::Ai);
        assert_eq!(state.serve.serve_count, 0);

        rotate_after_point(&mut state);
        rotate_after_point(&mut state);
        assert_eq!(state.serve.current_server, Side::Player);
    }

    #[test]
    fn test_slot_flips_every_point() {
        let mut state = MatchState::new(8);
        assert_eq!(state.serve.slot, ServeSlot::Right);
        rotate_after_point(&mut state);
        assert_eq!(state.serve.slot, ServeSlot::Left);
        rotate_after_point(&mut state);
        assert_eq!(state.serve.slot, ServeSlot::Right);
    }
}
