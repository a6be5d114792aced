//! The combat simulation
//!
//! All gameplay logic lives here, free of platform dependencies:
//! - Driven once per frame by an external render loop
//! - Seeded RNG only
//! - No rendering, no DOM, no I/O

pub mod collision;
pub mod entity;
pub mod enemy;
pub mod player;
pub mod projectile;
pub mod state;
pub mod tick;

pub use collision::{Hit, circles_overlap, sweep_collisions};
pub use entity::CombatEntity;
pub use enemy::{Enemy, EnemyManager};
pub use player::Player;
pub use projectile::{Projectile, ProjectileManager, ProjectileOwner};
pub use state::{Arena, BONUS_GAMES, BonusGameKind, GameEvent, GamePhase, GameState};
pub use tick::{FrameTiming, TickInput, tick};
