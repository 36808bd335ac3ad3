//! Tank Arena - a tiled-grid tank game simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collision, frame driver)
//! - `assets`: Asset store collaborator (model/texture handles)
//! - `render`: Display-list seam for an external renderer
//! - `input`: Key flags shared between the input edge and the player
//! - `settings`: Data-driven game tuning

pub mod assets;
pub mod input;
pub mod render;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec3;

/// Game configuration constants
pub mod consts {
    /// Map edge length in tiles; walls ring the perimeter
    pub const MAP_SIZE: usize = 15;

    /// Player defaults
    pub const MOVE_SPEED: f32 = 2.0;
    /// Turn rate in radians per second (half a turn per second)
    pub const TURN_RATE: f32 = std::f32::consts::PI;
    /// Collider shrink so the hull can brush walls without snagging
    pub const PLAYER_COLLIDER_SCALE: f32 = 0.75;

    /// Bullet defaults
    pub const BULLET_SPEED: f32 = 9.0;
    pub const BULLET_RADIUS: f32 = 0.085;
    /// Travel budget before a bullet expires without exploding
    pub const BULLET_MAX_RANGE: f32 = 30.0;

    /// Muzzle offset from the hull center along the facing direction
    pub const MUZZLE_FORWARD: f32 = 0.3;
    pub const MUZZLE_HEIGHT: f32 = 0.5;

    /// Effect durations (seconds)
    pub const MUZZLE_FLASH_DURATION: f32 = 1.0;
    pub const EXPLOSION_DURATION: f32 = 1.0;
}

/// Wrap an angle into [0, 2π)
#[inline]
pub fn wrap_angle(angle: f32) -> f32 {
    angle.rem_euclid(std::f32::consts::TAU)
}

/// Unit travel direction for a facing angle
///
/// The arena uses screen-style axes: facing 0 points toward -Y and angles
/// grow counter-clockwise, so forward motion is (sin θ, -cos θ, 0).
#[inline]
pub fn heading(rotation: f32) -> Vec3 {
    Vec3::new(rotation.sin(), -rotation.cos(), 0.0)
}

/// Muzzle position offset for a given facing angle
#[inline]
pub fn muzzle_offset(rotation: f32) -> Vec3 {
    heading(rotation) * consts::MUZZLE_FORWARD + Vec3::new(0.0, 0.0, consts::MUZZLE_HEIGHT)
}
