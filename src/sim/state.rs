//! Match-level state
//!
//! The orchestrator owns the player, the managers, and all game-level
//! flags; nothing else mutates score, phase, or the bonus interlude.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::config::GameConfig;
use crate::consts::{BONUS_COUNTDOWN_MS, FIRE_COOLDOWN_MS, INITIAL_FIRE_COOLDOWN_MS};

use super::enemy::EnemyManager;
use super::player::Player;
use super::projectile::ProjectileManager;

/// Current phase of a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active combat
    Playing,
    /// A bonus mini-game is running; the combat simulation is suspended
    BonusInterlude,
    /// The player died; waiting for a restart
    GameOver,
}

/// Bonus mini-game kinds. Opaque to the simulation: the interlude
/// collaborator runs one and reports a single completion signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusGameKind {
    Slots,
    TargetPractice,
    Quiz,
    QuickMaths,
}

pub const BONUS_GAMES: [BonusGameKind; 4] = [
    BonusGameKind::Slots,
    BonusGameKind::TargetPractice,
    BonusGameKind::Quiz,
    BonusGameKind::QuickMaths,
];

impl BonusGameKind {
    pub fn label(&self) -> &'static str {
        match self {
            BonusGameKind::Slots => "Slots",
            BonusGameKind::TargetPractice => "Target Practice",
            BonusGameKind::Quiz => "Quiz",
            BonusGameKind::QuickMaths => "Quick Maths",
        }
    }
}

/// Externally visible happenings, queued during a tick and drained by
/// the platform layer once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PlayerDied,
    EnemyKilled { score_value: u32 },
    BonusReady,
    BonusStarted { kind: BonusGameKind },
    BonusEnded,
    Restarted,
}

/// The playable viewport rectangle, `[0,0]` to `(width, height)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Complete match state
pub struct GameState {
    pub config: GameConfig,
    pub arena: Arena,
    pub phase: GamePhase,
    pub score: u32,
    /// Simulation clock: summed frame milliseconds while Playing
    pub time_ms: f64,
    /// Countdown gating held-fire shots (ms)
    pub fire_cooldown: f32,
    /// Countdown until the bonus mini-game unlocks (ms)
    pub bonus_countdown: f32,
    /// Set once the countdown elapses; cleared when an interlude starts
    pub bonus_ready: bool,
    /// Which mini-game the active interlude is running
    pub active_bonus: Option<BonusGameKind>,
    pub player: Player,
    pub enemies: EnemyManager,
    pub projectiles: ProjectileManager,
    pub rng: Pcg32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// A fresh match: player centered, empty managers, seeded RNG.
    pub fn new(config: GameConfig, arena: Arena, seed: u64) -> Self {
        Self {
            config,
            arena,
            phase: GamePhase::Playing,
            score: 0,
            time_ms: 0.0,
            fire_cooldown: INITIAL_FIRE_COOLDOWN_MS,
            bonus_countdown: BONUS_COUNTDOWN_MS,
            bonus_ready: false,
            active_bonus: None,
            player: Player::new(config.player, arena.center()),
            enemies: EnemyManager::new(config.enemy),
            projectiles: ProjectileManager::new(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Restart after game over: fresh player and enemy population,
    /// projectiles cleared, score and the bonus countdown reset.
    pub fn restart(&mut self) {
        self.player = Player::new(self.config.player, self.arena.center());
        self.enemies = EnemyManager::new(self.config.enemy);
        self.projectiles.clear();
        self.score = 0;
        self.fire_cooldown = FIRE_COOLDOWN_MS;
        self.bonus_countdown = BONUS_COUNTDOWN_MS;
        self.bonus_ready = false;
        self.active_bonus = None;
        self.phase = GamePhase::Playing;
        self.push_event(GameEvent::Restarted);
        log::info!("Match restarted");
    }

    /// The interlude collaborator's single completion signal. Resumes
    /// combat exactly once; further calls are no-ops.
    pub fn end_bonus_interlude(&mut self) {
        if self.phase != GamePhase::BonusInterlude {
            return;
        }
        self.phase = GamePhase::Playing;
        self.active_bonus = None;
        self.bonus_countdown = BONUS_COUNTDOWN_MS;
        self.push_event(GameEvent::BonusEnded);
        log::info!("Bonus interlude finished, combat resumed");
    }

    /// The platform resize collaborator reports new viewport dimensions.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.arena = Arena::new(width, height);
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take this frame's outbound events.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> GameState {
        GameState::new(GameConfig::default(), Arena::new(800.0, 600.0), 42)
    }

    #[test]
    fn fresh_match_starts_centered_and_playing() {
        let s = state();
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.score, 0);
        assert_eq!(s.player.entity.pos, Vec2::new(400.0, 300.0));
        assert!(s.enemies.is_empty());
        assert!(s.projectiles.is_empty());
    }

    #[test]
    fn restart_resets_match_level_state() {
        let mut s = state();
        s.score = 120;
        s.player.entity.take_damage(99);
        s.phase = GamePhase::GameOver;
        s.bonus_ready = true;

        s.restart();

        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.score, 0);
        assert!(!s.bonus_ready);
        assert!(!s.player.entity.is_dead());
        assert!(s.enemies.is_empty());
        assert_eq!(s.drain_events(), vec![GameEvent::Restarted]);
    }

    #[test]
    fn ending_the_interlude_resumes_exactly_once() {
        let mut s = state();
        s.phase = GamePhase::BonusInterlude;
        s.active_bonus = Some(BonusGameKind::Slots);

        s.end_bonus_interlude();
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.active_bonus, None);
        assert_eq!(s.drain_events(), vec![GameEvent::BonusEnded]);

        // second completion signal is ignored
        s.end_bonus_interlude();
        assert!(s.drain_events().is_empty());
    }

    #[test]
    fn drained_events_do_not_repeat() {
        let mut s = state();
        s.push_event(GameEvent::BonusReady);
        assert_eq!(s.drain_events(), vec![GameEvent::BonusReady]);
        assert!(s.drain_events().is_empty());
    }
}
