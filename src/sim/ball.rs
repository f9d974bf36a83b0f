//! Ball flight and multi-surface collision resolution.
//!
//! One call to [`advance`] integrates gravity, drag and the spin deflection,
//! then resolves ground, wall, net and paddle contacts in a fixed order.
//! Simultaneous boundary violations in one tick are all applied; the
//! corrections may compound, which is an accepted simplification.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use super::config::CourtConfig;
use super::state::{Ball, GameEvent, MatchState, PlayerBody, Side};
use crate::{consts, horizontal_distance};

/// Paddle-to-ball reach on both the court plane and the vertical axis
pub const PADDLE_REACH: f32 = 1.5;
/// Outgoing speed of a paddled ball
const HIT_POWER: f32 = 10.0;
/// Window after a hit during which the same paddle cannot connect again
pub const PADDLE_HIT_COOLDOWN: f32 = 0.3;
/// Emissive flash length after a paddle hit
pub const BALL_FLASH_DURATION: f32 = 0.2;
/// Minimum |v.z| for a net contact to count as a strike rather than a roll
const NET_STRIKE_SPEED: f32 = 0.5;

/// Advance the ball by one tick: integration, collisions, scoring.
///
/// While serving the ball is pinned to the serving body and nothing is
/// integrated.
pub fn advance(state: &mut MatchState, dt: f32, events: &mut Vec<GameEvent>) {
    if state.ball.flash_timer > 0.0 {
        state.ball.flash_timer = (state.ball.flash_timer - dt).max(0.0);
    }

    if state.ball.serving {
        super::serve::pin_ball_to_server(state);
        state.ball.clear_trail();
        return;
    }

    let physics = state.physics;
    let court = state.court;
    let MatchState {
        ball,
        player,
        ai_player,
        rng,
        effects,
        score,
        trigger_reset,
        ..
    } = state;

    // Gravity, then frame-rate independent horizontal drag
    ball.velocity.y += physics.gravity * dt;
    let drag = physics.air_resistance.powf(dt * consts::DRAG_REFERENCE_HZ);
    ball.velocity.x *= drag;
    ball.velocity.z *= drag;

    // Simplified Magnus deflection from the spin vector
    ball.velocity.x += ball.spin.y * physics.spin_effect;
    ball.velocity.z -= ball.spin.x * physics.spin_effect;

    ball.position += ball.velocity * dt;
    ball.rotation += ball.spin * dt;
    ball.record_trail();

    let radius = court.ball_radius;

    // Ground bounce
    if ball.position.y <= radius {
        ball.position.y = radius;
        ball.velocity.y = ball.velocity.y.abs() * physics.bounce_damping;
        ball.bounces += 1;
        ball.spin *= 0.8;

        if ball.bounces > 1 {
            // Second bounce ends the rally: point goes to the side whose
            // half the ball is NOT resting on
            let side = if ball.position.z > 0.0 {
                Side::Ai
            } else {
                Side::Player
            };
            score.award(side);
            *trigger_reset = true;
            events.push(GameEvent::PointScored {
                side,
                player_score: score.player,
                ai_score: score.ai,
            });
            log::info!(
                "double bounce, point {:?} ({}-{})",
                side,
                score.player,
                score.ai
            );
        }
    }

    // Back walls (glass): bouncy, the ball stays in play
    let wall_offset = radius + 0.1;
    let back_z = court.half_length() - wall_offset;
    if ball.position.z >= back_z {
        ball.position.z = back_z;
        ball.velocity.z *= -0.8;
        effects.spawn_wall_hit(ball.position, rng);
        events.push(GameEvent::WallHit {
            point: ball.position,
        });
    }
    if ball.position.z <= -back_z {
        ball.position.z = -back_z;
        ball.velocity.z *= -0.8;
        effects.spawn_wall_hit(ball.position, rng);
        events.push(GameEvent::WallHit {
            point: ball.position,
        });
    }

    // Side walls (mesh): slightly less lively
    let side_x = court.half_width() - wall_offset;
    if ball.position.x.abs() >= side_x {
        ball.velocity.x *= -0.7;
        ball.position.x = ball.position.x.signum() * side_x;
        effects.spawn_wall_hit(ball.position, rng);
        events.push(GameEvent::WallHit {
            point: ball.position,
        });
    }

    // Net: a strike absorbs most of the energy, a slow touch rolls over
    let net_reach = radius + 0.1;
    if ball.position.z.abs() < net_reach
        && ball.position.y < court.net_height
        && ball.position.y > 0.0
    {
        if ball.velocity.z.abs() > NET_STRIKE_SPEED {
            ball.velocity.z *= -0.3;
            ball.velocity.y *= 0.5;
            ball.position.z = ball.position.z.signum() * net_reach;
        } else {
            ball.velocity.z *= 0.1;
            // Keep a slow ball from sticking in the cord
            ball.velocity.y = ball.velocity.y.max(-0.5);
        }
        events.push(GameEvent::NetHit {
            point: ball.position,
        });
    }

    // Out of play: over the walls or through a gap. The point goes to the
    // side opposite the last hitter; with no hitter on record the player
    // scores (preserved attribution quirk).
    if ball.position.y < -2.0
        || ball.position.y > court.wall_height + 2.0
        || ball.position.x.abs() > court.half_width() + 2.0
        || ball.position.z.abs() > court.half_length() + 2.0
    {
        let side = match ball.last_hit_by {
            Some(Side::Player) => Side::Ai,
            _ => Side::Player,
        };
        score.award(side);
        *trigger_reset = true;
        events.push(GameEvent::PointScored {
            side,
            player_score: score.player,
            ai_score: score.ai,
        });
        log::info!("ball out, point {:?} ({}-{})", side, score.player, score.ai);
    }

    // Paddles, player first. The order only matters for same-frame ties.
    check_paddle_hit(ball, player, Side::Player, &court, rng, events);
    check_paddle_hit(ball, ai_player, Side::Ai, &court, rng, events);
}

/// Resolve a paddle contact: redirect the ball toward the opponent's deep
/// zone with a cross-body lateral offset, fresh random spin, and start the
/// hitter's cooldown window.
fn check_paddle_hit(
    ball: &mut Ball,
    body: &mut PlayerBody,
    side: Side,
    court: &CourtConfig,
    rng: &mut Pcg32,
    events: &mut Vec<GameEvent>,
) {
    if !body.swinging || !body.can_hit() {
        return;
    }

    let paddle = body.paddle_world();
    if horizontal_distance(ball.position, paddle) >= PADDLE_REACH
        || (ball.position.y - paddle.y).abs() >= PADDLE_REACH
    {
        return;
    }

    // Aim deep into the opponent's half, placed cross-body from the paddle
    let target_z = if body.is_ai {
        court.half_length() - 1.0
    } else {
        -court.half_length() + 1.0
    };
    let target_x = if paddle.x < ball.position.x {
        2.0
    } else if paddle.x > ball.position.x {
        -2.0
    } else {
        0.0
    };

    let direction = Vec3::new(
        target_x - ball.position.x,
        0.5,
        target_z - ball.position.z,
    )
    .normalize_or_zero();
    if direction == Vec3::ZERO {
        return;
    }

    ball.velocity = direction * HIT_POWER;
    ball.velocity.y += 3.0;
    ball.spin = Vec3::new(
        rng.random_range(-2.5..2.5),
        rng.random_range(-1.5..1.5),
        rng.random_range(-2.5..2.5),
    );
    ball.bounces = 0;
    ball.last_hit_by = Some(side);
    ball.flash_timer = BALL_FLASH_DURATION;
    body.hit_cooldown = PADDLE_HIT_COOLDOWN;

    events.push(GameEvent::PaddleHit { side });
}
