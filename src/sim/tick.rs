//! Per-frame orchestration
//!
//! An external render loop drives the match by calling [`tick`] once
//! per animation frame with the polled input snapshot and the frame's
//! timing. Everything that mutates game-level state happens here, in a
//! fixed order: advance subsystems, fire, resolve collisions, then the
//! bonus countdown. A death frame short-circuits before the bonus
//! logic, so death always wins a same-frame race with the countdown.

use glam::Vec2;
use rand::Rng;

use crate::consts::{BASE_FRAME_MS, FIRE_COOLDOWN_MS};

use super::collision::{circles_overlap, sweep_collisions};
use super::projectile::ProjectileOwner;
use super::state::{BONUS_GAMES, GameEvent, GamePhase, GameState};

/// Timing for one animation frame, as supplied by the frame driver:
/// a multiplier relative to the 60 Hz reference frame, plus the raw
/// elapsed milliseconds the countdown timers consume.
#[derive(Debug, Clone, Copy)]
pub struct FrameTiming {
    pub delta: f32,
    pub elapsed_ms: f32,
}

impl FrameTiming {
    pub fn from_frame_ms(elapsed_ms: f32) -> Self {
        Self { delta: elapsed_ms / BASE_FRAME_MS, elapsed_ms }
    }
}

/// Input snapshot for one frame, polled by the platform layer.
/// The `*_pressed`/`start_bonus`/`restart` fields are one-shot: the
/// platform clears them after the tick consumes them.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Pointer position in arena coordinates
    pub pointer: Vec2,
    /// Fire key/button currently held (cooldown-gated autofire)
    pub fire_held: bool,
    /// Fire button pressed this frame (immediate shot)
    pub fire_pressed: bool,
    /// The player opted into the unlocked bonus mini-game
    pub start_bonus: bool,
    /// Restart request after game over
    pub restart: bool,
}

/// Advance the match by one frame.
pub fn tick(state: &mut GameState, input: &TickInput, frame: FrameTiming) {
    match state.phase {
        GamePhase::GameOver => {
            if input.restart {
                state.restart();
            }
            return;
        }
        // Fully suspended until the collaborator calls
        // `GameState::end_bonus_interlude`.
        GamePhase::BonusInterlude => return,
        GamePhase::Playing => {}
    }

    state.time_ms += frame.elapsed_ms as f64;

    state.player.update(input, frame, state.time_ms, state.arena);
    let player_pos = state.player.entity.pos;
    state.enemies.update(
        frame,
        state.time_ms,
        player_pos,
        state.arena,
        &mut state.rng,
        &mut state.projectiles,
    );
    state.projectiles.update(state.arena);

    state.fire_cooldown -= frame.elapsed_ms;
    if input.fire_pressed {
        fire(state, input.pointer);
    }
    if input.fire_held && state.fire_cooldown <= 0.0 {
        fire(state, input.pointer);
        state.fire_cooldown = FIRE_COOLDOWN_MS;
    }

    resolve_collisions(state);
    if state.phase == GamePhase::GameOver {
        // Death wins: a death frame never unlocks or starts a bonus game.
        return;
    }

    update_bonus_countdown(state, input, frame);
}

fn fire(state: &mut GameState, target: Vec2) {
    let projectile = state.player.shoot_projectile(target);
    state.projectiles.add(projectile);
}

fn game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    state.push_event(GameEvent::PlayerDied);
    log::info!("Player died with score {}", state.score);
}

/// Resolution order is fixed: player bullets first, then enemy
/// bullets, then body contact. Running the bullet pass before the
/// contact pass is what gives projectile kills score precedence when
/// both would kill the same enemy in one frame.
fn resolve_collisions(state: &mut GameState) {
    resolve_player_bullets(state);
    if resolve_enemy_bullets(state) {
        return;
    }
    resolve_contact(state);
}

fn resolve_player_bullets(state: &mut GameState) {
    let bullets: Vec<(u32, Vec2, f32)> = state
        .projectiles
        .projectiles()
        .iter()
        .filter(|p| p.owner == ProjectileOwner::Player)
        .map(|p| (p.id, p.pos, p.width))
        .collect();
    let attackers: Vec<(Vec2, f32)> = bullets.iter().map(|&(_, pos, width)| (pos, width)).collect();
    let targets: Vec<(Vec2, f32)> = state
        .enemies
        .enemies()
        .iter()
        .map(|e| (e.entity.pos, e.entity.body_radius * 2.0))
        .collect();

    let mut killed: Vec<usize> = Vec::new();
    for hit in sweep_collisions(&attackers, &targets) {
        // The sub-list index doesn't match the master list, so the
        // projectile is consumed through its id.
        state.projectiles.remove_by_id(bullets[hit.attacker].0);

        let (died, score_value) = {
            let enemy = &mut state.enemies.enemies_mut()[hit.target];
            if enemy.entity.is_dead() {
                // already killed by an earlier bullet this pass
                (false, 0)
            } else {
                enemy.entity.take_damage(1);
                (enemy.entity.is_dead(), enemy.config.score_value)
            }
        };
        if died {
            state.score += score_value;
            state.push_event(GameEvent::EnemyKilled { score_value });
            killed.push(hit.target);
        }
    }

    killed.sort_unstable();
    for index in killed.into_iter().rev() {
        state.enemies.remove(index);
    }
}

/// Returns true when the player died.
fn resolve_enemy_bullets(state: &mut GameState) -> bool {
    let bullets: Vec<(u32, Vec2, f32)> = state
        .projectiles
        .projectiles()
        .iter()
        .filter(|p| p.owner == ProjectileOwner::Enemy)
        .map(|p| (p.id, p.pos, p.width))
        .collect();

    for (id, pos, width) in bullets {
        let player = &state.player.entity;
        if circles_overlap(pos, width / 2.0, player.pos, player.body_radius) {
            state.projectiles.remove_by_id(id);
            state.player.entity.take_damage(1);
            if state.player.entity.is_dead() {
                game_over(state);
                return true;
            }
        }
    }
    false
}

fn resolve_contact(state: &mut GameState) {
    // Back-to-front so removals keep the remaining indices valid.
    for index in (0..state.enemies.len()).rev() {
        let player = &state.player.entity;
        let enemy = &state.enemies.enemies()[index].entity;
        if !circles_overlap(player.pos, player.body_radius, enemy.pos, enemy.body_radius) {
            continue;
        }

        if state.player.config.has_thorns {
            let (died, score_value) = {
                let enemy = &mut state.enemies.enemies_mut()[index];
                enemy.entity.take_damage(1);
                (enemy.entity.is_dead(), enemy.config.score_value)
            };
            if died {
                state.score += score_value;
                state.push_event(GameEvent::EnemyKilled { score_value });
                state.enemies.remove(index);
            }
        } else {
            state.player.entity.take_damage(1);
            if state.player.entity.is_dead() {
                game_over(state);
                return;
            }
        }
    }
}

fn update_bonus_countdown(state: &mut GameState, input: &TickInput, frame: FrameTiming) {
    if !state.bonus_ready {
        state.bonus_countdown -= frame.elapsed_ms;
        if state.bonus_countdown <= 0.0 {
            state.bonus_countdown = 0.0;
            state.bonus_ready = true;
            state.push_event(GameEvent::BonusReady);
        }
    } else if input.start_bonus {
        let kind = BONUS_GAMES[state.rng.random_range(0..BONUS_GAMES.len())];
        state.active_bonus = Some(kind);
        state.bonus_ready = false;
        state.phase = GamePhase::BonusInterlude;
        state.push_event(GameEvent::BonusStarted { kind });
        log::info!("Bonus interlude started: {}", kind.label());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::consts::BONUS_COUNTDOWN_MS;
    use crate::sim::state::Arena;

    /// Quiet config: enemies never return fire, so tests control all damage.
    fn quiet_config() -> GameConfig {
        let mut config = GameConfig::default();
        config.enemy.can_shoot = false;
        config
    }

    fn state() -> GameState {
        GameState::new(quiet_config(), Arena::new(800.0, 600.0), 42)
    }

    fn frame() -> FrameTiming {
        FrameTiming::from_frame_ms(16.0)
    }

    #[test]
    fn held_fire_is_cooldown_gated() {
        let mut s = state();
        s.fire_cooldown = 0.0;
        let input = TickInput { fire_held: true, pointer: Vec2::new(500.0, 300.0), ..TickInput::default() };

        tick(&mut s, &input, frame());
        assert_eq!(s.projectiles.len(), 1);
        assert_eq!(s.fire_cooldown, FIRE_COOLDOWN_MS);

        // cooldown is still paying down: no second shot
        tick(&mut s, &input, frame());
        assert_eq!(s.projectiles.len(), 1);
    }

    #[test]
    fn a_discrete_press_fires_immediately() {
        let mut s = state();
        assert!(s.fire_cooldown > 0.0);
        let input = TickInput { fire_pressed: true, pointer: Vec2::new(500.0, 300.0), ..TickInput::default() };
        tick(&mut s, &input, frame());
        assert_eq!(s.projectiles.len(), 1);
    }

    #[test]
    fn countdown_unlocks_the_bonus_game_once() {
        let mut s = state();
        tick(&mut s, &TickInput::default(), FrameTiming::from_frame_ms(BONUS_COUNTDOWN_MS + 1.0));
        assert!(s.bonus_ready);
        assert!(s.drain_events().contains(&GameEvent::BonusReady));

        // stays ready without repeating the event
        tick(&mut s, &TickInput::default(), frame());
        assert!(!s.drain_events().contains(&GameEvent::BonusReady));
    }

    #[test]
    fn opting_in_suspends_the_simulation() {
        let mut s = state();
        tick(&mut s, &TickInput::default(), FrameTiming::from_frame_ms(BONUS_COUNTDOWN_MS + 1.0));
        tick(&mut s, &TickInput { start_bonus: true, ..TickInput::default() }, frame());
        assert_eq!(s.phase, GamePhase::BonusInterlude);
        assert!(s.active_bonus.is_some());

        // combat is fully suspended: nothing advances, nothing fires
        let before_pos = s.player.entity.pos;
        let before_count = s.enemies.len();
        let input = TickInput { right: true, fire_pressed: true, ..TickInput::default() };
        tick(&mut s, &input, FrameTiming::from_frame_ms(5_000.0));
        assert_eq!(s.player.entity.pos, before_pos);
        assert_eq!(s.enemies.len(), before_count);
        assert!(s.projectiles.is_empty());

        // the single completion signal resumes play with a fresh countdown
        s.end_bonus_interlude();
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.bonus_countdown, BONUS_COUNTDOWN_MS);
    }

    #[test]
    fn opting_in_before_the_countdown_does_nothing() {
        let mut s = state();
        tick(&mut s, &TickInput { start_bonus: true, ..TickInput::default() }, frame());
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.active_bonus, None);
    }

    #[test]
    fn game_over_halts_simulation_until_restart() {
        let mut s = state();
        s.phase = GamePhase::GameOver;

        let input = TickInput { right: true, fire_pressed: true, ..TickInput::default() };
        tick(&mut s, &input, frame());
        assert_eq!(s.player.entity.pos, Vec2::new(400.0, 300.0));
        assert!(s.projectiles.is_empty());

        tick(&mut s, &TickInput { restart: true, ..TickInput::default() }, frame());
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.fire_cooldown, FIRE_COOLDOWN_MS);
    }

    #[test]
    fn simulation_clock_only_runs_while_playing() {
        let mut s = state();
        tick(&mut s, &TickInput::default(), frame());
        let clock = s.time_ms;
        s.phase = GamePhase::BonusInterlude;
        tick(&mut s, &TickInput::default(), frame());
        assert_eq!(s.time_ms, clock);
    }
}
