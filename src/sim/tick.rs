//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use glam::Vec2;

use super::boss::BossStep;
use super::collision::resolve_collisions;
use super::enemy::Enemy;
use super::entity::PickupKind;
use super::pattern::{generate, generate_boss};
use super::spawner;
use super::state::{GameState, GameStatus};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire on the shot cadence while held
    pub shoot: bool,
    /// Slow movement
    pub focus: bool,
    pub bomb: bool,
}

/// Advance the game state by one fixed timestep.
///
/// `elapsed_ms_hint` is the host's frame time. It is logged and otherwise
/// ignored: every timer counts ticks.
pub fn tick(state: &mut GameState, input: &InputIntent, elapsed_ms_hint: f32) {
    if state.status != GameStatus::Playing {
        return;
    }
    state.stage_ticks += 1;
    state.time_ticks += 1;
    log::trace!(
        "tick {} (stage {} tick {}, host {elapsed_ms_hint:.2} ms)",
        state.time_ticks,
        state.stage,
        state.stage_ticks
    );

    // Player
    state.player.move_by(input);
    if input.shoot {
        let shots = state.player.fire_shots(&mut state.ids, state.stage_ticks);
        state.player_bullets.extend(shots);
    }
    if input.bomb && state.player.use_bomb() {
        detonate_bomb(state);
    }
    state.player.tick_timers();

    spawner::run(state);

    // Adversaries move and fire
    let target = state.player.pos;
    let pattern_tick = state.stage_ticks;
    let mut volley = Vec::new();
    for enemy in &mut state.enemies {
        if enemy.update() {
            volley.extend(generate(enemy.pattern, enemy.pos, target, pattern_tick, &mut state.rng));
        }
    }
    state.spawn_enemy_bullets(volley);
    update_boss(state, target);

    if state.status != GameStatus::Playing {
        return;
    }

    integrate(state);
    resolve_collisions(state);

    // Bookkeeping
    if state.player.score > state.high_score {
        state.high_score = state.player.score;
    }
    if state.player.lives == 0 {
        log::info!("Game over at stage {} with {} points", state.stage, state.player.score);
        state.status = GameStatus::GameOver;
    }
    enforce_caps(state);
}

/// Clear the screen and damage everything on it
fn detonate_bomb(state: &mut GameState) {
    log::debug!("Bomb ({} left)", state.player.bombs);
    state.enemy_bullets.clear();
    for enemy in &mut state.enemies {
        enemy.take_damage(BOMB_ENEMY_DAMAGE);
    }
    state.enemies.retain(Enemy::is_alive);
    if let Some(boss) = state.boss.as_mut() {
        boss.take_damage(BOMB_BOSS_DAMAGE);
    }
}

fn update_boss(state: &mut GameState, target: Vec2) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    match boss.update(&mut state.rng) {
        BossStep::Idle => {}
        BossStep::Fire => {
            let specs = generate_boss(boss, target, state.stage_ticks, &mut state.rng);
            boss.volleys += 1;
            state.spawn_enemy_bullets(specs);
        }
        BossStep::Died => {
            let pos = boss.pos;
            boss_defeated(state, pos);
        }
    }
}

fn boss_defeated(state: &mut GameState, pos: Vec2) {
    state.player.add_score(BOSS_KILL_SCORE);
    state.spawn_pickup(pos - Vec2::new(20.0, 0.0), PickupKind::Power);
    state.spawn_pickup(pos, PickupKind::Life);
    state.spawn_pickup(pos + Vec2::new(20.0, 0.0), PickupKind::Bomb);
    state.enemy_bullets.clear();
    state.boss = None;

    if state.stage >= FINAL_STAGE {
        log::info!("Final boss down, victory with {} points", state.player.score);
        state.status = GameStatus::Victory;
        if state.player.score > state.high_score {
            state.high_score = state.player.score;
        }
    } else {
        state.stage += 1;
        state.stage_ticks = 0;
        log::info!("Stage {} begins", state.stage);
    }
}

/// Move everything by its velocity and drop what left the field
fn integrate(state: &mut GameState) {
    for bullet in &mut state.enemy_bullets {
        bullet.update();
    }
    state.enemy_bullets.retain(|b| b.in_bounds());

    for shot in &mut state.player_bullets {
        shot.update();
    }
    state.player_bullets.retain(|b| b.in_bounds());

    for item in &mut state.pickups {
        item.update();
    }
    state.pickups.retain(|p| p.in_bounds());

    state.enemies.retain(|e| !e.has_left_field());

    for particle in &mut state.particles {
        particle.update();
    }
    state.particles.retain(|p| p.life > 0);
}

/// Oldest enemy bullets and particles go first
fn enforce_caps(state: &mut GameState) {
    let cap = state.bullet_cap;
    if state.enemy_bullets.len() > cap {
        let excess = state.enemy_bullets.len() - cap;
        log::trace!("Dropping {excess} oldest enemy bullets");
        state.enemy_bullets.drain(..excess);
    }
    if state.particles.len() > MAX_PARTICLES {
        let excess = state.particles.len() - MAX_PARTICLES;
        state.particles.drain(..excess);
    }
}
