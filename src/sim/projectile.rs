//! Projectiles and the manager owning every in-flight shot
//!
//! The manager holds all projectiles regardless of who fired them;
//! the owner tag is what collision resolution filters on.

use glam::Vec2;

use super::state::Arena;

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

/// One in-flight shot. Angle, speed, and owner are fixed at spawn;
/// only the position advances.
#[derive(Debug, Clone)]
pub struct Projectile {
    /// Stable id assigned by the manager; 0 until added
    pub id: u32,
    pub pos: Vec2,
    pub angle: f32,
    pub speed: f32,
    pub width: f32,
    pub owner: ProjectileOwner,
}

impl Projectile {
    pub fn new(pos: Vec2, angle: f32, speed: f32, width: f32, owner: ProjectileOwner) -> Self {
        Self { id: 0, pos, angle, speed, width, owner }
    }

    fn advance(&mut self) {
        self.pos += Vec2::from_angle(self.angle) * self.speed;
    }

    fn out_of_bounds(&self, arena: Arena) -> bool {
        let hw = self.width / 2.0;
        self.pos.x - hw < 0.0
            || self.pos.x + hw > arena.width
            || self.pos.y - hw < 0.0
            || self.pos.y + hw > arena.height
    }
}

/// Owns the projectile collection.
#[derive(Debug)]
pub struct ProjectileManager {
    projectiles: Vec<Projectile>,
    next_id: u32,
}

impl Default for ProjectileManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectileManager {
    pub fn new() -> Self {
        Self { projectiles: Vec::new(), next_id: 1 }
    }

    /// Add a shot, assigning it a stable id. Returns the id.
    pub fn add(&mut self, mut projectile: Projectile) -> u32 {
        self.next_id += 1;
        projectile.id = self.next_id - 1;
        let id = projectile.id;
        self.projectiles.push(projectile);
        id
    }

    /// Advance every projectile one step and cull those whose bounding
    /// box has left the arena.
    pub fn update(&mut self, arena: Arena) {
        for projectile in &mut self.projectiles {
            projectile.advance();
        }
        self.projectiles.retain(|p| !p.out_of_bounds(arena));
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    /// Remove by index. Indices are invalidated by any other removal,
    /// so multi-removal passes must go back-to-front.
    pub fn remove(&mut self, index: usize) {
        if index < self.projectiles.len() {
            self.projectiles.remove(index);
        }
    }

    /// Remove by id. Collision handling works on filtered sub-lists
    /// whose indices don't match the master list, so removal there has
    /// to go through ids. Idempotent.
    pub fn remove_by_id(&mut self, id: u32) {
        self.projectiles.retain(|p| p.id != id);
    }

    pub fn clear(&mut self) {
        self.projectiles.clear();
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }
}
