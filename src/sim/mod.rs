//! Deterministic match simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Clamped per-frame timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod ai;
pub mod ball;
pub mod config;
pub mod effects;
pub mod predict;
pub mod serve;
pub mod state;
pub mod tick;

pub use ball::{BALL_FLASH_DURATION, PADDLE_HIT_COOLDOWN, PADDLE_REACH};
pub use config::{CourtConfig, PhysicsConstants};
pub use effects::{Effects, Particle};
pub use predict::predict_landing;
pub use state::{
    Ball, GameEvent, MatchState, PlayerBody, ScoreState, ServeSlot, ServeState, Side,
    HEAD_REACH_Y,
};
pub use tick::{TickInput, tick};
