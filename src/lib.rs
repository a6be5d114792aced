//! Arena Blast - a top-down arena shooter
//!
//! Core modules:
//! - `sim`: the combat simulation (entities, AI, projectiles, collisions, match state)
//! - `render`: display-list scenes built from sim state for a canvas painter
//! - `config`: tunable gameplay parameters

pub mod config;
pub mod render;
pub mod sim;

pub use config::GameConfig;

use glam::Vec2;

/// Game timing and population constants
pub mod consts {
    /// Reference frame duration the `delta` multiplier is relative to (60 Hz)
    pub const BASE_FRAME_MS: f32 = 1000.0 / 60.0;

    /// Cooldown between held-fire shots (ms)
    pub const FIRE_COOLDOWN_MS: f32 = 200.0;
    /// Cooldown loaded into a freshly constructed match (ms)
    pub const INITIAL_FIRE_COOLDOWN_MS: f32 = 500.0;

    /// Time until the bonus mini-game unlocks (ms)
    pub const BONUS_COUNTDOWN_MS: f32 = 3_000.0;

    /// Enemy population cap
    pub const MAX_ENEMIES: usize = 4;
    /// Spawn timer reset range (ms)
    pub const SPAWN_DELAY_MIN_MS: f32 = 500.0;
    pub const SPAWN_DELAY_MAX_MS: f32 = 2_500.0;

    /// Wander re-roll timer range (ms)
    pub const WANDER_DELAY_MIN_MS: f32 = 500.0;
    pub const WANDER_DELAY_MAX_MS: f32 = 1_500.0;
}

/// Normalize a vector to unit length; the zero vector passes through unchanged.
#[inline]
pub fn normalized_or_zero(v: Vec2) -> Vec2 {
    let length = v.length();
    if length > 0.0 { v / length } else { Vec2::ZERO }
}

/// Angle of the ray from `from` to `to` (radians)
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Clamp a point into the rectangle `[min, max]` componentwise
#[inline]
pub fn clamp_point(p: Vec2, min: Vec2, max: Vec2) -> Vec2 {
    Vec2::new(p.x.clamp(min.x, max.x), p.y.clamp(min.y, max.y))
}
