//! Scene construction from sim state
//!
//! Primitives are emitted back-to-front: entities first, HUD text on
//! top, then any full-screen overlay for the game-over and interlude
//! states.

use glam::Vec2;
use std::f32::consts::FRAC_PI_2;

use crate::config::EnemyConfig;
use crate::sim::{CombatEntity, GamePhase, GameState, ProjectileOwner};

/// 0xRRGGBB
pub type Color = u32;

mod palette {
    use super::Color;

    pub const PLAYER_BODY: Color = 0xff0000;
    pub const PLAYER_WEAPON: Color = 0x00ff00;
    pub const PLAYER_PROJECTILE: Color = 0xffaaff;
    pub const ENEMY_BODY: Color = 0x4488ff;
    pub const ENEMY_WEAPON: Color = 0xffaa00;
    pub const ENEMY_PROJECTILE: Color = 0xffff00;
    pub const LEGS: Color = 0x000000;
    pub const LASER: Color = 0xff0000;
    pub const HEALTH_BACK: Color = 0x000000;
    pub const HEALTH_FILL: Color = 0xffee22;
    pub const HUD_TEXT: Color = 0xffffff;
    pub const OVERLAY: Color = 0x000000;
}

/// Text anchoring relative to its position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// One draw primitive. Rotations are radians; `Bar` fill is `0..=1`.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Ellipse {
        center: Vec2,
        rotation: f32,
        half_width: f32,
        half_height: f32,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
    },
    Bar {
        top_left: Vec2,
        width: f32,
        height: f32,
        fill: f32,
        back: Color,
        color: Color,
    },
    Text {
        pos: Vec2,
        size: f32,
        color: Color,
        align: TextAlign,
        text: String,
    },
    Overlay {
        color: Color,
        alpha: f32,
    },
}

/// An ordered frame's worth of primitives
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub shapes: Vec<Shape>,
}

/// Flatten the match into primitives. `pointer` is the current pointer
/// position, used only for the player's laser sight.
pub fn build_scene(state: &GameState, pointer: Vec2) -> Scene {
    let mut shapes = Vec::new();

    push_player(&mut shapes, state, pointer);
    for enemy in state.enemies.enemies() {
        push_enemy_pose(&mut shapes, &enemy.entity, &enemy.config);
    }
    for projectile in state.projectiles.projectiles() {
        let color = match projectile.owner {
            ProjectileOwner::Player => palette::PLAYER_PROJECTILE,
            ProjectileOwner::Enemy => palette::ENEMY_PROJECTILE,
        };
        shapes.push(Shape::Circle {
            center: projectile.pos,
            radius: projectile.width / 2.0,
            color,
        });
    }

    push_hud(&mut shapes, state);

    match state.phase {
        GamePhase::Playing => {}
        GamePhase::BonusInterlude => {
            shapes.push(Shape::Overlay { color: palette::OVERLAY, alpha: 0.6 });
            if let Some(kind) = state.active_bonus {
                shapes.push(Shape::Text {
                    pos: state.arena.center(),
                    size: 36.0,
                    color: palette::HUD_TEXT,
                    align: TextAlign::Center,
                    text: format!("Bonus game: {}", kind.label()),
                });
            }
        }
        GamePhase::GameOver => {
            shapes.push(Shape::Overlay { color: palette::OVERLAY, alpha: 0.6 });
            shapes.push(Shape::Text {
                pos: state.arena.center(),
                size: 48.0,
                color: palette::HUD_TEXT,
                align: TextAlign::Center,
                text: format!("Game over - score {}. Click to restart", state.score),
            });
        }
    }

    Scene { shapes }
}

fn push_player(shapes: &mut Vec<Shape>, state: &GameState, pointer: Vec2) {
    let entity = &state.player.entity;
    let config = &state.player.config;

    push_legs(shapes, entity, config.leg_offset, config.leg_width, config.leg_height);
    shapes.push(Shape::Circle {
        center: entity.pos,
        radius: entity.body_radius,
        color: palette::PLAYER_BODY,
    });
    push_weapon(
        shapes,
        entity,
        config.weapon_offset,
        config.weapon_width,
        config.weapon_height,
        palette::PLAYER_WEAPON,
    );

    // Laser sight from the muzzle to the pointer
    if state.phase == GamePhase::Playing {
        shapes.push(Shape::Line {
            from: entity.weapon_tip(config.weapon_reach),
            to: pointer,
            width: 2.0,
            color: palette::LASER,
        });
    }

    push_health_bar(shapes, entity);
}

fn push_enemy_pose(shapes: &mut Vec<Shape>, entity: &CombatEntity, config: &EnemyConfig) {
    push_legs(shapes, entity, config.leg_offset, config.leg_width, config.leg_height);
    shapes.push(Shape::Circle {
        center: entity.pos,
        radius: entity.body_radius,
        color: palette::ENEMY_BODY,
    });
    push_weapon(
        shapes,
        entity,
        config.weapon_offset,
        config.weapon_width,
        config.weapon_height,
        palette::ENEMY_WEAPON,
    );
    push_health_bar(shapes, entity);
}

/// Two leg ellipses straddling the walk direction, offset vertically by
/// the walk-cycle swing (one forward, one back).
fn push_legs(shapes: &mut Vec<Shape>, entity: &CombatEntity, offset: f32, width: f32, height: f32) {
    let rotation = entity.walk_angle + FRAC_PI_2;
    let frame = Vec2::from_angle(rotation);
    for (side, swing) in [(-1.0, entity.leg_swing), (1.0, -entity.leg_swing)] {
        let local = Vec2::new(side * offset, swing);
        shapes.push(Shape::Ellipse {
            center: entity.pos + frame.rotate(local),
            rotation,
            half_width: width,
            half_height: height,
            color: palette::LEGS,
        });
    }
}

fn push_weapon(
    shapes: &mut Vec<Shape>,
    entity: &CombatEntity,
    offset: f32,
    width: f32,
    height: f32,
    color: Color,
) {
    shapes.push(Shape::Ellipse {
        center: entity.pos + Vec2::from_angle(entity.aim_angle) * offset,
        rotation: entity.aim_angle,
        half_width: height,
        half_height: width,
        color,
    });
}

fn push_health_bar(shapes: &mut Vec<Shape>, entity: &CombatEntity) {
    shapes.push(Shape::Bar {
        top_left: entity.pos + Vec2::new(-25.0, entity.body_radius + 10.0),
        width: 50.0,
        height: 5.0,
        fill: entity.health_ratio(),
        back: palette::HEALTH_BACK,
        color: palette::HEALTH_FILL,
    });
}

fn push_hud(shapes: &mut Vec<Shape>, state: &GameState) {
    shapes.push(Shape::Text {
        pos: Vec2::new(state.arena.width - 10.0, 10.0),
        size: 24.0,
        color: palette::HUD_TEXT,
        align: TextAlign::Right,
        text: format!("Score: {}", state.score),
    });

    let bonus_text = if state.bonus_ready {
        "Bonus game ready - press B".to_string()
    } else {
        format!("Bonus game in {}s", (state.bonus_countdown / 1000.0).ceil() as u32)
    };
    shapes.push(Shape::Text {
        pos: Vec2::new(10.0, 10.0),
        size: 24.0,
        color: palette::HUD_TEXT,
        align: TextAlign::Left,
        text: bonus_text,
    });
}
