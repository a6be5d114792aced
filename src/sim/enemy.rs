//! Enemy AI and the manager owning the enemy population
//!
//! Enemies wander on a countdown-driven random heading, bounce off the
//! arena edges, track the player with their upper body, and (when
//! capable) return fire on a per-slot cooldown.

use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

use crate::config::EnemyConfig;
use crate::consts::{
    MAX_ENEMIES, SPAWN_DELAY_MAX_MS, SPAWN_DELAY_MIN_MS, WANDER_DELAY_MAX_MS, WANDER_DELAY_MIN_MS,
};
use crate::{angle_to, normalized_or_zero};

use super::entity::CombatEntity;
use super::projectile::{Projectile, ProjectileManager, ProjectileOwner};
use super::state::Arena;
use super::tick::FrameTiming;

#[derive(Debug, Clone)]
pub struct Enemy {
    pub entity: CombatEntity,
    pub config: EnemyConfig,
    change_direction_timer: f32,
    /// Ranged-attack countdown, driven by the manager
    shoot_cooldown: f32,
}

impl Enemy {
    /// Spawn at a uniformly random angle and radius within the config's
    /// annulus around `center` - never on top of the player, never
    /// arbitrarily far away.
    pub fn spawn_around(config: EnemyConfig, center: Vec2, rng: &mut impl Rng) -> Self {
        let angle = rng.random_range(0.0..TAU);
        let radius = rng.random_range(config.min_spawn_radius..=config.max_spawn_radius);
        let pos = center + Vec2::from_angle(angle) * radius;

        let entity = CombatEntity::new(pos, config.speed, config.max_health, config.body_radius);
        let mut enemy = Self {
            entity,
            config,
            change_direction_timer: 0.0,
            shoot_cooldown: config.shoot_cooldown_ms,
        };
        enemy.roll_direction(rng);
        enemy
    }

    /// Sample a heading uniformly in the unit square around the origin,
    /// then normalize. Not angularly uniform - the slight pull toward
    /// the diagonals is part of the movement feel and is kept.
    fn roll_direction(&mut self, rng: &mut impl Rng) {
        let direction = Vec2::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5);
        self.entity.move_dir = normalized_or_zero(direction);
        self.change_direction_timer = rng.random_range(WANDER_DELAY_MIN_MS..WANDER_DELAY_MAX_MS);
    }

    /// Advance one frame: wander-timer countdown and re-roll, movement
    /// with edge bounce, and upper-body tracking of the player.
    pub fn update(
        &mut self,
        frame: FrameTiming,
        clock_ms: f64,
        player_pos: Vec2,
        arena: Arena,
        rng: &mut impl Rng,
    ) {
        self.change_direction_timer -= frame.elapsed_ms;
        if self.change_direction_timer <= 0.0 {
            self.roll_direction(rng);
        }

        self.entity.pos += self.entity.move_dir * self.entity.speed * frame.delta;
        self.bounce_off_edges(arena);

        self.entity.walk_angle = angle_to(Vec2::ZERO, self.entity.move_dir);
        self.entity.aim_at(player_pos);
        self.entity
            .swing_legs(clock_ms, self.config.time_factor, self.config.leg_movement);
    }

    /// Reflect the offending velocity axis and clamp back into bounds -
    /// a bounce, unlike the player's hard clamp.
    fn bounce_off_edges(&mut self, arena: Arena) {
        let r = self.entity.body_radius;

        if self.entity.pos.x <= r || self.entity.pos.x >= arena.width - r {
            self.entity.move_dir.x *= -1.0;
            self.entity.pos.x = self.entity.pos.x.clamp(r, arena.width - r);
        }

        if self.entity.pos.y <= r || self.entity.pos.y >= arena.height - r {
            self.entity.move_dir.y *= -1.0;
            self.entity.pos.y = self.entity.pos.y.clamp(r, arena.height - r);
        }
    }

    /// Fire at a target, or `None` for wander-only enemies. Mirrors the
    /// player's spawn geometry with the enemy tag and speed.
    pub fn shoot_at(&self, target: Vec2) -> Option<Projectile> {
        if !self.config.can_shoot {
            return None;
        }

        let tip = self.entity.weapon_tip(self.config.weapon_reach);
        Some(Projectile::new(
            tip,
            angle_to(tip, target),
            self.config.projectile_speed,
            self.config.projectile_width,
            ProjectileOwner::Enemy,
        ))
    }
}

/// Owns the enemy population: spawn timing and placement, per-slot
/// shoot cooldowns, and removal of dead or out-of-bounds enemies.
#[derive(Debug)]
pub struct EnemyManager {
    enemies: Vec<Enemy>,
    spawn_timer: f32,
    config: EnemyConfig,
}

impl EnemyManager {
    pub fn new(config: EnemyConfig) -> Self {
        Self { enemies: Vec::new(), spawn_timer: 0.0, config }
    }

    /// Advance one frame: spawn when the timer allows and the population
    /// is under the cap, update every enemy, cull any that left the
    /// arena, and run each capable enemy's ranged-attack cooldown.
    pub fn update(
        &mut self,
        frame: FrameTiming,
        clock_ms: f64,
        player_pos: Vec2,
        arena: Arena,
        rng: &mut impl Rng,
        projectiles: &mut ProjectileManager,
    ) {
        self.spawn_timer -= frame.elapsed_ms;
        if self.spawn_timer <= 0.0 && self.enemies.len() < MAX_ENEMIES {
            self.enemies.push(Enemy::spawn_around(self.config, player_pos, rng));
            self.spawn_timer = rng.random_range(SPAWN_DELAY_MIN_MS..SPAWN_DELAY_MAX_MS);
        }

        // Back-to-front so culling keeps the remaining indices valid.
        for i in (0..self.enemies.len()).rev() {
            let enemy = &mut self.enemies[i];
            enemy.update(frame, clock_ms, player_pos, arena, rng);

            if enemy.entity.out_of_bounds(arena.width, arena.height) {
                self.enemies.remove(i);
                continue;
            }

            if enemy.config.can_shoot {
                enemy.shoot_cooldown -= frame.elapsed_ms;
                if enemy.shoot_cooldown <= 0.0 {
                    if let Some(projectile) = enemy.shoot_at(player_pos) {
                        projectiles.add(projectile);
                    }
                    enemy.shoot_cooldown = enemy.config.shoot_cooldown_ms;
                }
            }
        }
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    /// Remove by index. The caller guarantees validity; any other
    /// removal in the same pass invalidates indices, so passes iterate
    /// back-to-front.
    pub fn remove(&mut self, index: usize) {
        if index < self.enemies.len() {
            self.enemies.remove(index);
        }
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }
}
