//! Match state and core simulation types
//!
//! Everything needed to reproduce a match tick-for-tick lives here.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::config::{CourtConfig, PhysicsConstants};
use super::effects::Effects;

/// Which side of the net a body (or point) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Player,
    Ai,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }
}

/// Serve slot, alternating left/right each point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServeSlot {
    Left,
    Right,
}

impl ServeSlot {
    pub fn flip(self) -> ServeSlot {
        match self {
            ServeSlot::Left => ServeSlot::Right,
            ServeSlot::Right => ServeSlot::Left,
        }
    }
}

/// Trail point for ball rendering
#[derive(Debug, Clone, Copy)]
pub struct TrailPoint {
    pub pos: Vec3,
}

/// Maximum number of trail points to store
pub const TRAIL_LENGTH: usize = 10;

/// Reference height of a body's head above the court surface, used for
/// reach checks by the AI and the trajectory predictor
pub const HEAD_REACH_Y: f32 = 1.9;

/// The ball: position, flight state and rally bookkeeping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub position: Vec3,
    /// Units/second
    pub velocity: Vec3,
    /// Angular rate (rad/s) feeding the simplified lateral deflection;
    /// decays on every ground bounce
    pub spin: Vec3,
    /// Cosmetic orientation advanced by spin each tick; the renderer reads it
    pub rotation: Vec3,
    /// Ground contacts since the last paddle hit or serve
    pub bounces: u32,
    pub last_hit_by: Option<Side>,
    /// While true the ball is pinned to the serving body each tick and
    /// velocity/spin stay zero
    pub serving: bool,
    /// Emissive flash countdown after a paddle hit (seconds)
    pub flash_timer: f32,
    /// Trail history for rendering (newest first)
    #[serde(skip)]
    pub trail: Vec<TrailPoint>,
}

impl Ball {
    pub fn new() -> Self {
        Self {
            position: Vec3::new(0.0, 1.0, 0.0),
            velocity: Vec3::ZERO,
            spin: Vec3::ZERO,
            rotation: Vec3::ZERO,
            bounces: 0,
            last_hit_by: None,
            serving: true,
            flash_timer: 0.0,
            trail: Vec::with_capacity(TRAIL_LENGTH),
        }
    }

    /// Record current position to trail (call each tick in flight)
    pub fn record_trail(&mut self) {
        self.trail.insert(0, TrailPoint { pos: self.position });
        if self.trail.len() > TRAIL_LENGTH {
            self.trail.pop();
        }
    }

    /// Clear trail (hidden while serving)
    pub fn clear_trail(&mut self) {
        self.trail.clear();
    }

    /// Emissive intensity for the renderer (brightens briefly after a hit)
    pub fn emissive_intensity(&self) -> f32 {
        if self.flash_timer > 0.0 { 0.8 } else { 0.3 }
    }
}

impl Default for Ball {
    fn default() -> Self {
        Self::new()
    }
}

/// An animated body on the court. The core reads and writes only the
/// physics-relevant fields; meshes and materials belong to the renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBody {
    /// Body root world position
    pub position: Vec3,
    /// Steering input in body-speed units; x lateral, z along the court
    pub velocity: Vec3,
    /// Base movement speed (units/s)
    pub speed: f32,
    pub sprint_multiplier: f32,
    pub sprinting: bool,
    pub swinging: bool,
    /// Swing animation phase; the swing ends when it passes PI
    pub swing_timer: f32,
    /// Countdown before the paddle may connect again (seconds).
    /// This is the sole anti-multi-hit guard.
    pub hit_cooldown: f32,
    pub is_ai: bool,
}

impl PlayerBody {
    pub fn new(x: f32, z: f32, is_ai: bool) -> Self {
        Self {
            position: Vec3::new(x, 0.7, z),
            velocity: Vec3::ZERO,
            speed: 5.0,
            sprint_multiplier: 1.8,
            sprinting: false,
            swinging: false,
            swing_timer: 0.0,
            hit_cooldown: 0.0,
            is_ai,
        }
    }

    /// Whether the paddle may connect with the ball
    pub fn can_hit(&self) -> bool {
        self.hit_cooldown <= 0.0
    }

    /// Start a swing unless one is already in progress
    pub fn swing(&mut self) {
        if !self.swinging {
            self.swinging = true;
            self.swing_timer = 0.0;
        }
    }

    /// Advance movement, the swing animation and the hit cooldown
    pub fn update(&mut self, dt: f32, court: &CourtConfig) {
        let move_speed = self.speed * if self.sprinting { self.sprint_multiplier } else { 1.0 };

        self.position.x += self.velocity.x * move_speed * dt;
        self.position.z += self.velocity.z * move_speed * dt;

        // Stay inside the court and on own side of the net
        let half_w = court.half_width();
        let (min_z, max_z) = if self.is_ai {
            (-court.half_length() + 0.5, -0.5)
        } else {
            (0.5, court.half_length() - 0.5)
        };
        self.position.x = self.position.x.clamp(-half_w + 0.5, half_w - 0.5);
        self.position.z = self.position.z.clamp(min_z, max_z);

        if self.swinging {
            self.swing_timer += dt * 8.0;
            if self.swing_timer > std::f32::consts::PI {
                self.swinging = false;
                self.swing_timer = 0.0;
            }
        }

        if self.hit_cooldown > 0.0 {
            self.hit_cooldown = (self.hit_cooldown - dt).max(0.0);
        }
    }

    /// Paddle world position, including the swing-arc offset while swinging
    pub fn paddle_world(&self) -> Vec3 {
        let forward = -self.position.z.signum();
        let local = if self.swinging {
            let swing_angle = self.swing_timer.sin() * std::f32::consts::PI / 1.5;
            let lift_angle = (self.swing_timer * 0.5).sin() * std::f32::consts::PI / 6.0;
            Vec3::new(
                0.5 + swing_angle.sin() * 0.5,
                1.2 + lift_angle.sin() * 0.1,
                0.3 * forward,
            )
        } else {
            // Ready stance, paddle held toward the net
            Vec3::new(0.7, 1.2, 0.3 * forward)
        };
        self.position + local
    }

    /// Head reference height for reach checks
    pub fn head_y(&self) -> f32 {
        HEAD_REACH_Y
    }
}

/// Serve rotation state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ServeState {
    pub current_server: Side,
    pub slot: ServeSlot,
    /// Points played since the last server switch (wraps at 2)
    pub serve_count: u32,
    /// UI hint: the player tried to serve from in front of the service line
    pub show_warning: bool,
}

impl Default for ServeState {
    fn default() -> Self {
        Self {
            current_server: Side::Player,
            slot: ServeSlot::Right,
            serve_count: 0,
            show_warning: false,
        }
    }
}

/// Match score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreState {
    pub player: u32,
    pub ai: u32,
}

impl ScoreState {
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Player => self.player += 1,
            Side::Ai => self.ai += 1,
        }
    }
}

/// Events published each tick for the presentation layer (particles, audio,
/// UI). The core does not manage their lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Ball bounced off a wall; contact point for a transient effect
    WallHit { point: Vec3 },
    /// Ball struck or rolled over the net cord
    NetHit { point: Vec3 },
    /// A paddle connected with the ball
    PaddleHit { side: Side },
    /// A serve was executed
    Serve { side: Side },
    /// The player swung a serve from an illegal position
    ServeFault,
    /// A rally ended; scores are post-increment
    PointScored {
        side: Side,
        player_score: u32,
        ai_score: u32,
    },
}

/// Complete match state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchState {
    /// Match seed for reproducibility
    pub seed: u64,
    /// Seeded RNG driving serve and hit randomization
    pub rng: Pcg32,
    pub physics: PhysicsConstants,
    pub court: CourtConfig,
    pub ball: Ball,
    pub player: PlayerBody,
    pub ai_player: PlayerBody,
    pub score: ScoreState,
    pub serve: ServeState,
    /// Set by the scorer when a rally ends; consumed by the serve rotation
    pub trigger_reset: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Cosmetic particle arena (not gameplay-affecting)
    #[serde(skip)]
    pub effects: Effects,
}

impl MatchState {
    /// Create a fresh match: player serves first from the right slot
    pub fn new(seed: u64) -> Self {
        let court = CourtConfig::default();
        let player = PlayerBody::new(0.0, court.half_length() - 2.0, false);
        let ai_player = PlayerBody::new(0.0, -court.half_length() + 2.0, true);

        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            physics: PhysicsConstants::default(),
            court,
            ball: Ball::new(),
            player,
            ai_player,
            score: ScoreState::default(),
            serve: ServeState::default(),
            trigger_reset: false,
            time_ticks: 0,
            effects: Effects::default(),
        }
    }

    /// The body currently holding serve
    pub fn server_body(&self) -> &PlayerBody {
        match self.serve.current_server {
            Side::Player => &self.player,
            Side::Ai => &self.ai_player,
        }
    }
}
