//! Session-immutable configuration: ball physics tuning and court geometry.

use serde::{Deserialize, Serialize};

/// Ball flight tuning constants
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PhysicsConstants {
    /// Vertical acceleration (units/s^2, negative = down)
    pub gravity: f32,
    /// Fraction of vertical speed kept on a ground bounce
    pub bounce_damping: f32,
    /// Horizontal velocity decay per frame at the reference frame rate;
    /// raised to the elapsed frame fraction so drag is frame-rate independent
    pub air_resistance: f32,
    /// Scale of the spin-driven lateral deflection per tick
    pub spin_effect: f32,
    /// Speed ceiling carried for tuning; the flight integrator does not
    /// enforce it
    pub max_ball_speed: f32,
}

impl Default for PhysicsConstants {
    fn default() -> Self {
        Self {
            gravity: -9.81,
            bounce_damping: 0.75,
            air_resistance: 0.99,
            spin_effect: 0.001,
            max_ball_speed: 25.0,
        }
    }
}

/// Court geometry. Centered at the origin: x lateral, y up, z running from
/// the AI baseline (negative) to the player baseline (positive). The net
/// sits in the z = 0 plane.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CourtConfig {
    pub width: f32,
    pub length: f32,
    pub wall_height: f32,
    pub net_height: f32,
    pub wall_thickness: f32,
    /// Distance from the net to each service line
    pub service_line: f32,
    pub ball_radius: f32,
}

impl Default for CourtConfig {
    fn default() -> Self {
        Self {
            width: 10.0,
            length: 20.0,
            wall_height: 4.0,
            net_height: 0.92,
            wall_thickness: 0.15,
            service_line: 3.0,
            ball_radius: 0.1,
        }
    }
}

impl CourtConfig {
    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    #[inline]
    pub fn half_length(&self) -> f32 {
        self.length / 2.0
    }

    /// z of the player-side service line; the server must stand beyond it
    /// (further from the net) for a serve to count
    #[inline]
    pub fn player_service_line_z(&self) -> f32 {
        self.half_length() - self.service_line
    }

    /// z of the AI-side service line
    #[inline]
    pub fn ai_service_line_z(&self) -> f32 {
        -self.half_length() + self.service_line
    }
}
