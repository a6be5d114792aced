//! Tunable gameplay configuration
//!
//! A static nested record of numeric parameters supplied at match
//! construction. The platform layer may persist an override in
//! LocalStorage; the simulation itself never reads storage.

use serde::{Deserialize, Serialize};

/// Player tuning
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Movement speed in pixels per frame unit
    pub speed: f32,
    pub max_health: u32,
    pub body_radius: f32,
    /// Distance from center to the muzzle where projectiles spawn
    pub weapon_reach: f32,
    /// Pixels a fired projectile travels per update
    pub projectile_speed: f32,
    pub projectile_width: f32,
    /// Contact damage is reflected back to the attacker instead
    pub has_thorns: bool,
    // Pose/cosmetic geometry the renderer reads
    pub leg_offset: f32,
    pub leg_width: f32,
    pub leg_height: f32,
    pub leg_movement: f32,
    pub time_factor: f32,
    pub weapon_offset: f32,
    pub weapon_width: f32,
    pub weapon_height: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed: 7.0,
            max_health: 4,
            body_radius: 25.0,
            weapon_reach: 30.0,
            projectile_speed: 12.0,
            projectile_width: 8.0,
            has_thorns: false,
            leg_offset: 15.0,
            leg_width: 6.0,
            leg_height: 10.0,
            leg_movement: 35.0,
            time_factor: 0.015,
            weapon_offset: 35.0,
            weapon_width: 7.0,
            weapon_height: 18.0,
        }
    }
}

/// Enemy tuning
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    pub speed: f32,
    pub max_health: u32,
    pub body_radius: f32,
    pub weapon_reach: f32,
    pub projectile_speed: f32,
    pub projectile_width: f32,
    /// Ranged attack capability; wander-only enemies leave this off
    pub can_shoot: bool,
    /// Delay between ranged attacks (ms)
    pub shoot_cooldown_ms: f32,
    /// Score awarded to the player on kill
    pub score_value: u32,
    /// Spawn annulus around the player, in pixels
    pub min_spawn_radius: f32,
    pub max_spawn_radius: f32,
    // Pose/cosmetic geometry the renderer reads
    pub leg_offset: f32,
    pub leg_width: f32,
    pub leg_height: f32,
    pub leg_movement: f32,
    pub time_factor: f32,
    pub weapon_offset: f32,
    pub weapon_width: f32,
    pub weapon_height: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            speed: 3.0,
            max_health: 2,
            body_radius: 20.0,
            weapon_reach: 30.0,
            projectile_speed: 6.0,
            projectile_width: 8.0,
            can_shoot: true,
            shoot_cooldown_ms: 1_000.0,
            score_value: 10,
            min_spawn_radius: 200.0,
            max_spawn_radius: 500.0,
            leg_offset: 12.0,
            leg_width: 5.0,
            leg_height: 8.0,
            leg_movement: 25.0,
            time_factor: 0.02,
            weapon_offset: 28.0,
            weapon_width: 6.0,
            weapon_height: 14.0,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerConfig,
    pub enemy: EnemyConfig,
}

impl GameConfig {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "arena_blast_config";

    /// Load a config override from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(config) = serde_json::from_str(&json) {
                    log::info!("Loaded config override from LocalStorage");
                    return config;
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Save the config override to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Config saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
