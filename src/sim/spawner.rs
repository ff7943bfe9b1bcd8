//! Wave director
//!
//! Runs once per tick before enemies move. While no boss is on the field it
//! feeds single enemies and formations; at the boss tick it swaps the stage
//! over to the boss fight.

use glam::Vec2;
use rand::Rng;

use super::boss::{Boss, archetype_for_stage};
use super::enemy::{Enemy, EnemyKind, MovePattern};
use super::pattern::PatternName;
use super::state::GameState;
use crate::consts::*;

/// Patterns a regular enemy may be given
const ENEMY_PATTERNS: [PatternName; 5] = [
    PatternName::Aimed,
    PatternName::Radial,
    PatternName::Spiral,
    PatternName::Random,
    PatternName::Wave,
];

const SPAWN_Y: f32 = -30.0;
const SPAWN_EDGE: f32 = 50.0;
const FORMATION_Y: f32 = -50.0;
const FORMATION_EDGE: f32 = 80.0;

/// What the director did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spawned {
    Nothing,
    Boss,
    Single,
    Formation(usize),
}

pub fn run(state: &mut GameState) -> Spawned {
    if state.boss.is_some() {
        return Spawned::Nothing;
    }
    if state.stage_ticks == BOSS_SPAWN_TICK {
        spawn_boss(state);
        return Spawned::Boss;
    }
    if state.enemies.len() >= MAX_LIVE_ENEMIES {
        return Spawned::Nothing;
    }

    if state.stage_ticks % SINGLE_SPAWN_EVERY == 0 {
        spawn_single(state);
        Spawned::Single
    } else if state.stage_ticks % FORMATION_EVERY == FORMATION_OFFSET {
        Spawned::Formation(spawn_formation(state))
    } else {
        Spawned::Nothing
    }
}

fn spawn_boss(state: &mut GameState) {
    let id = state.next_entity_id();
    let archetype = archetype_for_stage(state.stage);
    log::info!("Stage {} boss {} appears", state.stage, archetype.name);
    state.boss = Some(Boss::new(id, state.stage, archetype));
    state.enemy_bullets.clear();
}

fn spawn_single(state: &mut GameState) {
    let unlocked = (state.stage as usize).clamp(1, EnemyKind::ALL.len());
    let rng = &mut state.rng;
    let x = rng.random_range(SPAWN_EDGE..FIELD_WIDTH - SPAWN_EDGE);
    let kind = EnemyKind::ALL[rng.random_range(0..unlocked)];
    let pattern = ENEMY_PATTERNS[rng.random_range(0..ENEMY_PATTERNS.len())];
    let movement = MovePattern::ALL[rng.random_range(0..MovePattern::ALL.len())];
    let first_fire = rng.random_range(1..=kind.stats().fire_interval);

    let id = state.next_entity_id();
    state.enemies.push(Enemy::new(
        id,
        Vec2::new(x, SPAWN_Y),
        kind,
        pattern,
        movement,
        first_fire,
    ));
    log::trace!("Spawned {kind:?} ({}) at x={x:.0}", pattern.as_str());
}

fn spawn_formation(state: &mut GameState) -> usize {
    let count = 3 + state.stage as usize;
    let span = FIELD_WIDTH - 2.0 * FORMATION_EDGE;
    let gap = span / (count.max(2) - 1) as f32;
    let interval = EnemyKind::Fairy.stats().fire_interval;
    for i in 0..count {
        let first_fire = state.rng.random_range(1..=interval);
        let id = state.next_entity_id();
        state.enemies.push(Enemy::new(
            id,
            Vec2::new(FORMATION_EDGE + i as f32 * gap, FORMATION_Y),
            EnemyKind::Fairy,
            PatternName::Aimed,
            MovePattern::Straight,
            first_fire,
        ));
    }
    log::debug!("Formation of {count} at stage tick {}", state.stage_ticks);
    count
}
