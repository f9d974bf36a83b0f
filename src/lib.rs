//! Padel Arena - a 3D padel court match
//!
//! Core modules:
//! - `sim`: Deterministic match simulation (ball flight, collisions, scoring, AI)
//!
//! Rendering, DOM text, camera follow and raw input devices live in the host
//! application. The core reads a sampled key state once per tick and publishes
//! events for the presentation layer; it never touches meshes or materials.

pub mod sim;

use glam::Vec3;

/// Fixed simulation parameters shared across modules
pub mod consts {
    /// Upper bound on the per-frame delta time (seconds). Long frames from
    /// tab backgrounding are clamped here before any integration.
    pub const MAX_FRAME_DT: f32 = 0.05;
    /// Air drag is expressed as a per-frame decay factor at this frame rate
    pub const DRAG_REFERENCE_HZ: f32 = 60.0;
    /// 1/sqrt(2), for diagonal movement normalization
    pub const DIAGONAL_FACTOR: f32 = std::f32::consts::FRAC_1_SQRT_2;
}

/// Distance between two points in the court plane (x,z), ignoring height
#[inline]
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

/// Speed in the court plane (x,z)
#[inline]
pub fn planar_speed(v: Vec3) -> f32 {
    (v.x * v.x + v.z * v.z).sqrt()
}
