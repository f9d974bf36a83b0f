//! Forward trajectory prediction for AI targeting.
//!
//! A coarse, spin-free re-simulation of the ball: gravity plus simplified
//! wall reflections. Pure function of its inputs; it never touches the live
//! ball.

use glam::Vec3;

use super::config::{CourtConfig, PhysicsConstants};
use super::state::{Ball, HEAD_REACH_Y};

/// Prediction step size (seconds)
const PREDICT_STEP: f32 = 0.05;
/// How far into the future to look (seconds)
const PREDICT_HORIZON: f32 = 1.5;
/// Wall margin used by the coarse reflection checks
const WALL_MARGIN: f32 = 0.15;

/// Estimate where the ball will be once it drops to hitting height on the
/// AI half, or its position at the horizon if it never does.
pub fn predict_landing(ball: &Ball, physics: &PhysicsConstants, court: &CourtConfig) -> Vec3 {
    let mut pos = ball.position;
    let mut vel = ball.velocity;

    let mut t = 0.0;
    while t < PREDICT_HORIZON {
        vel.y += physics.gravity * PREDICT_STEP;
        pos += vel * PREDICT_STEP;

        // Coarse wall reflections, no net or ground handling
        if pos.z.abs() >= court.half_length() - WALL_MARGIN {
            vel.z *= -physics.bounce_damping;
        }
        if pos.x.abs() >= court.half_width() - WALL_MARGIN {
            vel.x *= -physics.bounce_damping;
        }

        // Good enough once the ball is at hitting height on the AI half
        if pos.y <= HEAD_REACH_Y + 0.5 && pos.z < 0.0 {
            break;
        }

        t += PREDICT_STEP;
    }

    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn flying_ball(position: Vec3, velocity: Vec3) -> Ball {
        let mut ball = Ball::new();
        ball.serving = false;
        ball.position = position;
        ball.velocity = velocity;
        ball
    }

    #[test]
    fn test_prediction_is_pure() {
        let physics = PhysicsConstants::default();
        let court = CourtConfig::default();
        let ball = flying_ball(Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, 2.0, -8.0));

        let before = (ball.position, ball.velocity, ball.spin);
        let a = predict_landing(&ball, &physics, &court);
        let b = predict_landing(&ball, &physics, &court);
        assert_eq!(a, b);
        assert_eq!(before, (ball.position, ball.velocity, ball.spin));
    }

    #[test]
    fn test_ball_heading_to_ai_half_lands_there() {
        let physics = PhysicsConstants::default();
        let court = CourtConfig::default();
        let ball = flying_ball(Vec3::new(0.0, 1.5, 2.0), Vec3::new(0.0, 1.0, -9.0));

        let landing = predict_landing(&ball, &physics, &court);
        assert!(landing.z < 0.0);
        // Early exit leaves the ball near hitting height, not underground
        assert!(landing.y <= HEAD_REACH_Y + 0.5);
    }

    #[test]
    fn test_back_wall_reflection_keeps_prediction_in_court() {
        let physics = PhysicsConstants::default();
        let court = CourtConfig::default();
        // Fast and flat toward the AI back wall
        let ball = flying_ball(Vec3::new(0.0, 3.0, -2.0), Vec3::new(0.0, 0.0, -20.0));

        let landing = predict_landing(&ball, &physics, &court);
        assert!(landing.z.abs() <= court.half_length() + 1.0);
    }

    proptest! {
        /// Identical inputs always produce identical predictions
        #[test]
        fn prop_prediction_deterministic(
            px in -4.0f32..4.0, py in 0.5f32..3.0, pz in -9.0f32..9.0,
            vx in -10.0f32..10.0, vy in -5.0f32..8.0, vz in -15.0f32..15.0,
        ) {
            let physics = PhysicsConstants::default();
            let court = CourtConfig::default();
            let ball = flying_ball(Vec3::new(px, py, pz), Vec3::new(vx, vy, vz));
            let a = predict_landing(&ball, &physics, &court);
            let b = predict_landing(&ball, &physics, &court);
            prop_assert_eq!(a, b);
            prop_assert_eq!(ball.position, Vec3::new(px, py, pz));
        }
    }
}
