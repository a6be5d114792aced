//! End-to-end combat scenarios driven through the public tick API.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use arena_blast::GameConfig;
use arena_blast::config::EnemyConfig;
use arena_blast::sim::{
    Arena, Enemy, FrameTiming, GameEvent, GamePhase, GameState, Player, Projectile,
    ProjectileManager, ProjectileOwner, TickInput, sweep_collisions, tick,
};

const ARENA: Arena = Arena { width: 800.0, height: 600.0 };

fn frame() -> FrameTiming {
    FrameTiming::from_frame_ms(1000.0 / 60.0)
}

/// Enemies pinned in place at a known distance, no return fire: tests
/// control every source of damage.
fn pinned_config() -> GameConfig {
    let mut config = GameConfig::default();
    config.enemy.speed = 0.0;
    config.enemy.can_shoot = false;
    config.enemy.min_spawn_radius = 200.0;
    config.enemy.max_spawn_radius = 200.0;
    config
}

/// Run ticks until one enemy is on the field, then return its position.
fn spawn_one_enemy(state: &mut GameState) -> Vec2 {
    tick(state, &TickInput::default(), FrameTiming::from_frame_ms(5_000.0));
    assert_eq!(state.enemies.len(), 1);
    state.enemies.enemies()[0].entity.pos
}

// Scenario A: the damage ladder on a max-health-4 player.
#[test]
fn damage_ladder_reaches_death_exactly_at_zero() {
    let mut player = Player::new(GameConfig::default().player, Vec2::new(100.0, 100.0));
    for _ in 0..3 {
        player.entity.take_damage(1);
    }
    assert_eq!(player.entity.health(), 1);
    assert!(!player.entity.is_dead());

    player.entity.take_damage(1);
    assert_eq!(player.entity.health(), 0);
    assert!(player.entity.is_dead());
}

// Scenario B: one spawn per update until the cap, then none.
#[test]
fn spawning_stops_at_the_population_cap() {
    let mut state = GameState::new(pinned_config(), ARENA, 11);
    let big_frame = FrameTiming::from_frame_ms(5_000.0);

    for expected in 1..=4 {
        tick(&mut state, &TickInput::default(), big_frame);
        assert_eq!(state.enemies.len(), expected);
    }
    for _ in 0..20 {
        tick(&mut state, &TickInput::default(), big_frame);
        assert_eq!(state.enemies.len(), 4);
    }
}

// Scenario C: the resolver reports the close pair, and consuming the
// hit leaves every other projectile and enemy untouched.
#[test]
fn hit_consumption_leaves_the_rest_correctly_indexed() {
    let enemy_pos = Vec2::new(300.0, 300.0);
    let projectile_width = 10.0;
    let attackers = [
        (Vec2::new(100.0, 100.0), projectile_width), // far away
        (enemy_pos + Vec2::new(5.0, 0.0), projectile_width), // distance 5
        (Vec2::new(700.0, 500.0), projectile_width), // far away
    ];
    let targets = [
        (Vec2::new(600.0, 100.0), 40.0),
        (enemy_pos, 40.0), // body radius 20 -> width 40
    ];

    let hits = sweep_collisions(&attackers, &targets);
    assert_eq!(hits.len(), 1);
    assert_eq!((hits[0].attacker, hits[0].target), (1, 1));

    // consumption goes through ids, so the master list stays coherent
    let mut manager = ProjectileManager::new();
    let mut ids = Vec::new();
    for &(pos, width) in &attackers {
        ids.push(manager.add(Projectile::new(pos, 0.0, 0.0, width, ProjectileOwner::Player)));
    }
    manager.remove_by_id(ids[hits[0].attacker]);

    let remaining: Vec<u32> = manager.projectiles().iter().map(|p| p.id).collect();
    assert_eq!(remaining, vec![ids[0], ids[2]]);
}

// Scenario D: death and an expiring bonus countdown in the same frame -
// death wins, and the frame never unlocks the bonus game.
#[test]
fn death_beats_a_simultaneously_expiring_bonus_countdown() {
    let mut state = GameState::new(pinned_config(), ARENA, 23);
    state.bonus_countdown = 1.0;
    let max_health = state.player.entity.max_health();
    state.player.entity.take_damage(max_health - 1);

    // a zero-speed enemy bullet parked on the player
    let player_pos = state.player.entity.pos;
    state.projectiles.add(Projectile::new(
        player_pos,
        0.0,
        0.0,
        8.0,
        ProjectileOwner::Enemy,
    ));

    tick(&mut state, &TickInput::default(), frame());

    assert_eq!(state.phase, GamePhase::GameOver);
    let events = state.drain_events();
    assert!(events.contains(&GameEvent::PlayerDied));
    assert!(!events.contains(&GameEvent::BonusReady));
    assert!(!state.bonus_ready);
}

#[test]
fn held_fire_kills_a_pinned_enemy_and_scores() {
    let mut state = GameState::new(pinned_config(), ARENA, 5);
    let enemy_pos = spawn_one_enemy(&mut state);

    let input = TickInput {
        fire_held: true,
        pointer: enemy_pos,
        ..TickInput::default()
    };
    for _ in 0..200 {
        tick(&mut state, &input, frame());
        if state.score > 0 {
            break;
        }
    }

    assert_eq!(state.score, state.config.enemy.score_value);
    assert!(state.enemies.is_empty());
}

#[test]
fn contact_damages_the_player_without_thorns() {
    let mut state = GameState::new(pinned_config(), ARENA, 17);
    let enemy_pos = spawn_one_enemy(&mut state);

    state.player.entity.pos = enemy_pos;
    tick(&mut state, &TickInput::default(), frame());

    let max_health = state.player.entity.max_health();
    assert_eq!(state.player.entity.health(), max_health - 1);
    assert_eq!(state.enemies.enemies()[0].entity.health(), state.config.enemy.max_health);
}

#[test]
fn thorns_reflect_contact_damage_onto_the_enemy() {
    let mut config = pinned_config();
    config.player.has_thorns = true;
    let mut state = GameState::new(config, ARENA, 17);
    let enemy_pos = spawn_one_enemy(&mut state);

    state.player.entity.pos = enemy_pos;
    let max_health = state.player.entity.max_health();
    // two contact frames grind down the enemy's two health points
    for _ in 0..2 {
        tick(&mut state, &TickInput::default(), frame());
        state.player.entity.pos = enemy_pos;
    }

    assert_eq!(state.player.entity.health(), max_health);
    assert!(state.enemies.is_empty());
    assert_eq!(state.score, config.enemy.score_value);
}

#[test]
fn projectiles_leaving_the_arena_are_culled() {
    let mut state = GameState::new(pinned_config(), ARENA, 3);
    state.projectiles.add(Projectile::new(
        Vec2::new(795.0, 300.0),
        0.0,
        12.0,
        8.0,
        ProjectileOwner::Player,
    ));
    let keeper = state.projectiles.add(Projectile::new(
        Vec2::new(400.0, 300.0),
        0.0,
        0.0,
        8.0,
        ProjectileOwner::Player,
    ));

    tick(&mut state, &TickInput::default(), frame());

    let ids: Vec<u32> = state.projectiles.projectiles().iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![keeper]);
}

#[test]
fn spawn_placement_stays_inside_the_annulus() {
    let config = EnemyConfig::default();
    let center = Vec2::new(400.0, 300.0);
    let mut rng = Pcg32::seed_from_u64(99);

    for _ in 0..10_000 {
        let enemy = Enemy::spawn_around(config, center, &mut rng);
        let distance = enemy.entity.pos.distance(center);
        assert!(
            distance >= config.min_spawn_radius - 1e-3
                && distance <= config.max_spawn_radius + 1e-3,
            "spawn distance {distance} outside [{}, {}]",
            config.min_spawn_radius,
            config.max_spawn_radius
        );
    }
}

#[test]
fn restart_rebuilds_the_match_from_scratch() {
    let mut state = GameState::new(pinned_config(), ARENA, 31);
    spawn_one_enemy(&mut state);
    state.score = 70;
    state.player.entity.take_damage(99);
    state.phase = GamePhase::GameOver;

    tick(&mut state, &TickInput { restart: true, ..TickInput::default() }, frame());

    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.score, 0);
    assert!(state.enemies.is_empty());
    assert!(state.projectiles.is_empty());
    assert!(!state.player.entity.is_dead());
    assert_eq!(state.player.entity.pos, ARENA.center());
}
