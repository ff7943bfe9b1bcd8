//! Game state
//!
//! Everything a renderer needs lives in the public fields and serializes as
//! one snapshot. The RNG and the id allocator are private to the simulation.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::boss::Boss;
use super::enemy::Enemy;
use super::entity::{
    EnemyBullet, EntityId, EntityIds, EntityRef, Particle, Pickup, PickupKind, PlayerBullet,
};
use super::pattern::BulletSpec;
use super::player::Player;
use crate::consts::*;
use crate::settings::{Difficulty, Settings};

/// Lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameStatus {
    /// Title screen; ticks do nothing
    Menu,
    Playing,
    Paused,
    GameOver,
    Victory,
}

impl GameStatus {
    /// The run is over and its score is final
    pub fn is_finished(&self) -> bool {
        matches!(self, GameStatus::GameOver | GameStatus::Victory)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub player: Player,
    /// Oldest first; the cap drops from the front
    pub enemy_bullets: Vec<EnemyBullet>,
    pub player_bullets: Vec<PlayerBullet>,
    pub enemies: Vec<Enemy>,
    pub boss: Option<Boss>,
    pub pickups: Vec<Pickup>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub status: GameStatus,
    /// 1-based stage number
    pub stage: u32,
    /// Ticks since the current stage began
    pub stage_ticks: u64,
    pub high_score: u64,
    /// Ticks since the run began
    pub time_ticks: u64,
    pub difficulty: Difficulty,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    #[serde(skip)]
    pub(crate) ids: EntityIds,
    #[serde(skip)]
    pub(crate) bullet_cap: usize,
}

impl GameState {
    /// Fresh state on the title screen, Normal difficulty
    pub fn new(seed: u64, high_score: u64) -> Self {
        Self::with_difficulty(seed, high_score, Difficulty::default(), ENEMY_BULLET_CAP)
    }

    /// State configured from run settings. An unset seed draws one from
    /// the OS so casual runs differ; set it to replay a run.
    pub fn from_settings(settings: &Settings, high_score: u64) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        Self::with_difficulty(seed, high_score, settings.difficulty, settings.bullet_cap)
    }

    fn with_difficulty(seed: u64, high_score: u64, difficulty: Difficulty, bullet_cap: usize) -> Self {
        let mut ids = EntityIds::new();
        let player = Player::new(
            ids.allocate(),
            difficulty.starting_lives(),
            difficulty.starting_bombs(),
        );
        Self {
            seed,
            player,
            enemy_bullets: Vec::new(),
            player_bullets: Vec::new(),
            enemies: Vec::new(),
            boss: None,
            pickups: Vec::new(),
            particles: Vec::new(),
            status: GameStatus::Menu,
            stage: 1,
            stage_ticks: 0,
            high_score,
            time_ticks: 0,
            difficulty,
            rng: Pcg32::seed_from_u64(seed),
            ids,
            bullet_cap: bullet_cap.max(1),
        }
    }

    /// Start a new run. The RNG keeps its stream, so consecutive runs
    /// from one seed differ but the whole session stays reproducible.
    pub fn reset_game(&mut self, high_score: u64) {
        self.player = Player::new(
            self.ids.allocate(),
            self.difficulty.starting_lives(),
            self.difficulty.starting_bombs(),
        );
        self.enemy_bullets.clear();
        self.player_bullets.clear();
        self.enemies.clear();
        self.boss = None;
        self.pickups.clear();
        self.particles.clear();
        self.stage = 1;
        self.stage_ticks = 0;
        self.time_ticks = 0;
        self.high_score = high_score.max(self.high_score);
        self.status = GameStatus::Playing;
        log::info!(
            "New run (seed {}, difficulty {})",
            self.seed,
            self.difficulty.as_str()
        );
    }

    /// Playing <-> Paused; any other status is left alone
    pub fn toggle_pause(&mut self) {
        self.status = match self.status {
            GameStatus::Playing => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Playing,
            other => other,
        };
        log::debug!("Status now {:?}", self.status);
    }

    pub fn bullet_cap(&self) -> usize {
        self.bullet_cap
    }

    pub fn next_entity_id(&mut self) -> EntityId {
        self.ids.allocate()
    }

    /// Turn a batch of specs into live enemy bullets
    pub fn spawn_enemy_bullets(&mut self, specs: impl IntoIterator<Item = BulletSpec>) {
        for spec in specs {
            let id = self.ids.allocate();
            self.enemy_bullets.push(EnemyBullet::from_spec(id, &spec));
        }
    }

    pub fn spawn_pickup(&mut self, pos: Vec2, kind: PickupKind) {
        let id = self.ids.allocate();
        self.pickups.push(Pickup::new(id, pos, kind));
    }

    /// Every live entity: player, enemies, boss, bullets, pickups, particles
    pub fn entities(&self) -> impl Iterator<Item = EntityRef<'_>> {
        std::iter::once(EntityRef::Player(&self.player))
            .chain(self.enemies.iter().map(EntityRef::Enemy))
            .chain(self.boss.iter().map(EntityRef::Boss))
            .chain(self.enemy_bullets.iter().map(EntityRef::EnemyBullet))
            .chain(self.player_bullets.iter().map(EntityRef::PlayerBullet))
            .chain(self.pickups.iter().map(EntityRef::Pickup))
            .chain(self.particles.iter().map(EntityRef::Particle))
    }
}
