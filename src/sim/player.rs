//! The user-controlled actor
//!
//! Movement comes from the polled key state, aim from the pointer.
//! Firing geometry lives here; the cooldown that gates it belongs to
//! the orchestrator.

use glam::Vec2;

use crate::config::PlayerConfig;
use crate::{angle_to, clamp_point, normalized_or_zero};

use super::entity::CombatEntity;
use super::projectile::{Projectile, ProjectileOwner};
use super::state::Arena;
use super::tick::{FrameTiming, TickInput};

#[derive(Debug, Clone)]
pub struct Player {
    pub entity: CombatEntity,
    pub config: PlayerConfig,
}

impl Player {
    pub fn new(config: PlayerConfig, pos: Vec2) -> Self {
        let entity = CombatEntity::new(pos, config.speed, config.max_health, config.body_radius);
        Self { entity, config }
    }

    /// Advance one frame: aim at the pointer, then walk if any movement
    /// key is held. The body circle is clamped fully inside the arena.
    pub fn update(&mut self, input: &TickInput, frame: FrameTiming, clock_ms: f64, arena: Arena) {
        self.entity.aim_at(input.pointer);

        let moving = input.up || input.down || input.left || input.right;
        if !moving {
            // Direction is kept for the next keypress; only the pose resets.
            self.entity.rest_legs();
            return;
        }

        let direction = Vec2::new(
            (input.right as i32 - input.left as i32) as f32,
            (input.down as i32 - input.up as i32) as f32,
        );
        self.entity.move_dir = normalized_or_zero(direction);
        self.entity.walk_angle = angle_to(Vec2::ZERO, self.entity.move_dir);

        self.entity.pos += self.entity.move_dir * self.entity.speed * frame.delta;
        let r = self.entity.body_radius;
        self.entity.pos = clamp_point(
            self.entity.pos,
            Vec2::splat(r),
            Vec2::new(arena.width - r, arena.height - r),
        );

        self.entity
            .swing_legs(clock_ms, self.config.time_factor, self.config.leg_movement);
    }

    /// Spawn a shot at the muzzle, headed from there toward `target`.
    ///
    /// Cooldown enforcement is the orchestrator's job; this always fires.
    pub fn shoot_projectile(&self, target: Vec2) -> Projectile {
        let tip = self.entity.weapon_tip(self.config.weapon_reach);
        Projectile::new(
            tip,
            angle_to(tip, target),
            self.config.projectile_speed,
            self.config.projectile_width,
            ProjectileOwner::Player,
        )
    }
}
