//! Shared combat-actor state
//!
//! Player and enemies share one physical body: a circular torso, two
//! legs, a weapon, and a health pool. The behavior modules (`player`,
//! `enemy`) drive this struct through its methods; the renderer reads
//! the pose fields.

use glam::Vec2;

use crate::angle_to;

/// A physical actor in the arena.
///
/// Invariant: `0 <= health <= max_health`, and the actor is dead
/// exactly when `health == 0`.
#[derive(Debug, Clone)]
pub struct CombatEntity {
    pub pos: Vec2,
    /// Normalized movement direction (zero while stationary)
    pub move_dir: Vec2,
    /// Pixels per frame unit
    pub speed: f32,
    health: u32,
    max_health: u32,
    pub body_radius: f32,
    /// Upper-body rotation, radians; where the weapon points
    pub aim_angle: f32,
    /// Lower-body rotation, radians; where the legs point
    pub walk_angle: f32,
    /// Vertical leg offset of the walk cycle, 0 at rest
    pub leg_swing: f32,
}

impl CombatEntity {
    /// A `max_health` of zero is clamped to 1: the simulation must not
    /// crash mid-frame on a bad config.
    pub fn new(pos: Vec2, speed: f32, max_health: u32, body_radius: f32) -> Self {
        let max_health = max_health.max(1);
        Self {
            pos,
            move_dir: Vec2::ZERO,
            speed,
            health: max_health,
            max_health,
            body_radius,
            aim_angle: 0.0,
            walk_angle: 0.0,
            leg_swing: 0.0,
        }
    }

    /// Override the starting health, clamped into `[0, max_health]`.
    pub fn with_health(mut self, health: u32) -> Self {
        self.health = health.min(self.max_health);
        self
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    /// Fraction of health remaining; the health bar reads this.
    pub fn health_ratio(&self) -> f32 {
        self.health as f32 / self.max_health as f32
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// Point the upper body at a target.
    pub fn aim_at(&mut self, target: Vec2) {
        self.aim_angle = angle_to(self.pos, target);
    }

    /// World position of the muzzle, `reach` pixels along the aim.
    pub fn weapon_tip(&self, reach: f32) -> Vec2 {
        self.pos + Vec2::from_angle(self.aim_angle) * reach
    }

    /// Advance the walk cycle from the simulation clock.
    pub fn swing_legs(&mut self, clock_ms: f64, time_factor: f32, leg_movement: f32) {
        self.leg_swing = ((clock_ms * time_factor as f64).sin() as f32) * leg_movement;
    }

    /// Idle pose.
    pub fn rest_legs(&mut self) {
        self.leg_swing = 0.0;
    }

    /// True when the body circle's bounding box has left the arena.
    pub fn out_of_bounds(&self, width: f32, height: f32) -> bool {
        let r = self.body_radius;
        self.pos.x - r < 0.0
            || self.pos.x + r > width
            || self.pos.y - r < 0.0
            || self.pos.y + r > height
    }
}
