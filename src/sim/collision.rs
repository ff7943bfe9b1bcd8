//! Collision resolution
//!
//! Runs after integration, as a fixed sequence of passes. Within a pass the
//! storage order decides which contact wins, so outcomes never depend on
//! anything but the state itself.
//!
//! 1. player shots vs enemies
//! 2. surviving player shots vs boss
//! 3. dead enemies removed
//! 4. enemy bullets vs player
//! 5. pickups vs player
//! 6. graze

use rand::Rng;

use super::entity::{BulletColor, Particle, Pickup, PickupKind};
use super::geometry::{in_band, within};
use super::state::GameState;
use crate::consts::*;

const KILL_SPARKS: u32 = 8;
const HIT_SPARKS: u32 = 2;

/// Tally of what happened during one resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionOutcome {
    pub enemies_killed: u32,
    pub boss_hits: u32,
    pub player_hit: bool,
    pub pickups_collected: u32,
    pub grazes: u32,
}

pub fn resolve_collisions(state: &mut GameState) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();
    let mut drops = Vec::new();

    shots_vs_enemies(state, &mut outcome, &mut drops);
    shots_vs_boss(state, &mut outcome);
    state.enemies.retain(|e| e.is_alive());

    bullets_vs_player(state, &mut outcome);

    state.pickups.extend(drops);
    collect_pickups(state, &mut outcome);

    graze(state, &mut outcome);
    outcome
}

fn shots_vs_enemies(state: &mut GameState, outcome: &mut CollisionOutcome, drops: &mut Vec<Pickup>) {
    let seed_base = state.time_ticks as u32;
    let mut shots = std::mem::take(&mut state.player_bullets);
    shots.retain(|shot| {
        let body = shot.body();
        let Some(enemy) = state
            .enemies
            .iter_mut()
            .find(|e| e.is_alive() && body.overlaps(&e.body()))
        else {
            return true;
        };

        enemy.take_damage(shot.damage);
        if !enemy.is_alive() {
            outcome.enemies_killed += 1;
            state.player.add_score(enemy.points);
            state
                .particles
                .extend(Particle::burst(enemy.pos, BulletColor::Pink, KILL_SPARKS, seed_base ^ enemy.id.0));

            if state.rng.random_bool(DROP_CHANCE) {
                let kind = PickupKind::DROP_TABLE[state.rng.random_range(0..PickupKind::DROP_TABLE.len())];
                drops.push(Pickup::new(state.ids.allocate(), enemy.pos, kind));
            }
        }
        false
    });
    state.player_bullets = shots;
}

fn shots_vs_boss(state: &mut GameState, outcome: &mut CollisionOutcome) {
    let Some(boss) = state.boss.as_mut() else {
        return;
    };
    let boss_body = boss.body();
    let seed_base = state.time_ticks as u32;
    let player = &mut state.player;
    let particles = &mut state.particles;
    state.player_bullets.retain(|shot| {
        if !shot.body().overlaps(&boss_body) {
            return true;
        }
        boss.take_damage(shot.damage);
        player.add_score(BOSS_HIT_SCORE);
        outcome.boss_hits += 1;
        particles.extend(Particle::burst(shot.pos, BulletColor::White, HIT_SPARKS, seed_base ^ shot.id.0));
        false
    });
}

fn bullets_vs_player(state: &mut GameState, outcome: &mut CollisionOutcome) {
    if state.player.is_invincible() {
        return;
    }
    let player = &state.player;
    let hit = state
        .enemy_bullets
        .iter()
        .any(|b| within(b.pos, player.pos, b.radius + player.hitbox_radius));
    if !hit {
        return;
    }

    state.player.take_damage();
    state.enemy_bullets.clear();
    outcome.player_hit = true;
    log::debug!("Player hit, {} lives left", state.player.lives);
}

fn collect_pickups(state: &mut GameState, outcome: &mut CollisionOutcome) {
    let player = &mut state.player;
    state.pickups.retain(|item| {
        if !within(item.pos, player.pos, PICKUP_RADIUS) {
            return true;
        }
        match item.kind {
            PickupKind::Power => {
                player.add_power(1);
                player.add_score(POWER_ITEM_SCORE);
            }
            PickupKind::Point => player.add_point_item(),
            PickupKind::Bomb => player.add_bomb(),
            PickupKind::Life => player.add_life(),
        }
        outcome.pickups_collected += 1;
        false
    });
}

fn graze(state: &mut GameState, outcome: &mut CollisionOutcome) {
    if state.player.is_invincible() {
        return;
    }
    let player = &mut state.player;
    for bullet in state.enemy_bullets.iter_mut().filter(|b| !b.grazed) {
        if in_band(bullet.pos, player.pos, player.hitbox_radius + bullet.radius, GRAZE_RADIUS) {
            bullet.grazed = true;
            player.add_graze();
            outcome.grazes += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::boss::{Boss, BossMode, archetype_for_stage};
    use crate::sim::enemy::{Enemy, EnemyKind, MovePattern};
    use crate::sim::entity::{BulletShape, EnemyBullet, PlayerBullet};
    use crate::sim::pattern::{BulletSpec, PatternName};
    use glam::Vec2;

    fn state() -> GameState {
        let mut s = GameState::new(8, 0);
        s.reset_game(0);
        s
    }

    fn bullet_at(state: &mut GameState, pos: Vec2, radius: f32) {
        let id = state.next_entity_id();
        state.enemy_bullets.push(EnemyBullet::from_spec(
            id,
            &BulletSpec {
                pos,
                angle: 0.0,
                speed: 0.0,
                radius,
                color: BulletColor::Red,
                shape: BulletShape::Rice,
            },
        ));
    }

    fn shot_at(state: &mut GameState, pos: Vec2) {
        let id = state.next_entity_id();
        state.player_bullets.push(PlayerBullet {
            id,
            pos,
            vel_y: -12.0,
            size: Vec2::new(8.0, 16.0),
            damage: 1,
        });
    }

    fn fairy_at(state: &mut GameState, pos: Vec2) {
        let id = state.next_entity_id();
        state.enemies.push(Enemy::new(id, pos, EnemyKind::Fairy, PatternName::Aimed, MovePattern::Straight, 60));
    }

    #[test]
    fn first_enemy_in_storage_order_takes_the_shot() {
        let mut s = state();
        fairy_at(&mut s, Vec2::new(100.0, 100.0));
        fairy_at(&mut s, Vec2::new(100.0, 100.0));
        shot_at(&mut s, Vec2::new(98.0, 95.0));

        resolve_collisions(&mut s);
        assert!(s.player_bullets.is_empty());
        assert_eq!(s.enemies[0].health, 2);
        assert_eq!(s.enemies[1].health, 3);
    }

    #[test]
    fn kill_scores_and_removes_enemy() {
        let mut s = state();
        fairy_at(&mut s, Vec2::new(100.0, 100.0));
        s.enemies[0].health = 1;
        shot_at(&mut s, Vec2::new(98.0, 95.0));

        let outcome = resolve_collisions(&mut s);
        assert_eq!(outcome.enemies_killed, 1);
        assert!(s.enemies.is_empty());
        assert_eq!(s.player.score, 100);
        assert!(!s.particles.is_empty());
    }

    #[test]
    fn shot_past_the_enemies_hits_the_boss() {
        let mut s = state();
        let id = s.next_entity_id();
        let mut boss = Boss::new(id, 1, archetype_for_stage(1));
        boss.pos = Vec2::new(192.0, 80.0);
        boss.mode = BossMode::Steady;
        s.boss = Some(boss);
        shot_at(&mut s, Vec2::new(190.0, 80.0));

        let outcome = resolve_collisions(&mut s);
        assert_eq!(outcome.boss_hits, 1);
        assert_eq!(s.player.score, BOSS_HIT_SCORE);
        let boss = s.boss.as_ref().unwrap();
        assert_eq!(boss.health, boss.max_health - 1);
    }

    #[test]
    fn transitioning_boss_absorbs_shots_without_damage() {
        let mut s = state();
        let id = s.next_entity_id();
        let mut boss = Boss::new(id, 1, archetype_for_stage(1));
        boss.pos = Vec2::new(192.0, 80.0);
        boss.mode = BossMode::Transitioning { remaining: 10, next_phase: 1 };
        s.boss = Some(boss);
        shot_at(&mut s, Vec2::new(190.0, 80.0));

        resolve_collisions(&mut s);
        let boss = s.boss.as_ref().unwrap();
        assert_eq!(boss.health, boss.max_health);
        assert!(s.player_bullets.is_empty());
    }

    #[test]
    fn bullet_hit_costs_a_life_and_clears_the_screen() {
        let mut s = state();
        let p = s.player.pos;
        bullet_at(&mut s, p + Vec2::new(3.0, 0.0), 4.0);
        bullet_at(&mut s, Vec2::new(10.0, 10.0), 4.0);

        let outcome = resolve_collisions(&mut s);
        assert!(outcome.player_hit);
        assert_eq!(s.player.lives, 2);
        assert!(s.enemy_bullets.is_empty());
        assert!(s.player.is_invincible());
        assert_eq!(s.player.pos, Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT - PLAYER_RESPAWN_Y_OFFSET));
    }

    #[test]
    fn invincible_player_ignores_overlap() {
        let mut s = state();
        s.player.invincible_ticks = 30;
        let p = s.player.pos;
        bullet_at(&mut s, p, 6.0);

        let outcome = resolve_collisions(&mut s);
        assert!(!outcome.player_hit);
        assert_eq!(s.player.lives, 3);
        assert_eq!(s.enemy_bullets.len(), 1);
    }

    #[test]
    fn pickups_apply_their_effect() {
        let mut s = state();
        let p = s.player.pos;
        for kind in [PickupKind::Power, PickupKind::Point, PickupKind::Bomb, PickupKind::Life] {
            s.spawn_pickup(p + Vec2::new(10.0, 0.0), kind);
        }
        s.spawn_pickup(p + Vec2::new(40.0, 0.0), PickupKind::Life);

        let outcome = resolve_collisions(&mut s);
        assert_eq!(outcome.pickups_collected, 4);
        assert_eq!(s.pickups.len(), 1);
        assert_eq!(s.player.power, 1);
        assert_eq!(s.player.score, POWER_ITEM_SCORE + POINT_ITEM_SCORE);
        assert_eq!(s.player.bombs, 4);
        assert_eq!(s.player.lives, 4);
    }

    #[test]
    fn graze_counts_each_bullet_once() {
        let mut s = state();
        let p = s.player.pos;
        bullet_at(&mut s, p + Vec2::new(15.0, 0.0), 4.0);

        assert_eq!(resolve_collisions(&mut s).grazes, 1);
        assert_eq!(resolve_collisions(&mut s).grazes, 0);
        assert_eq!(s.player.graze, 1);
        assert_eq!(s.player.score, GRAZE_SCORE);
        assert!(s.enemy_bullets[0].grazed);
    }

    #[test]
    fn no_graze_outside_band() {
        let mut s = state();
        let p = s.player.pos;
        bullet_at(&mut s, p + Vec2::new(30.0, 0.0), 4.0);
        assert_eq!(resolve_collisions(&mut s).grazes, 0);
    }

    #[test]
    fn kill_drops_come_from_the_table() {
        let mut s = state();
        let mut dropped = 0;
        let pos = Vec2::new(100.0, 100.0);
        for _ in 0..60 {
            fairy_at(&mut s, pos);
            s.enemies[0].health = 1;
            shot_at(&mut s, pos - Vec2::new(2.0, 5.0));
            resolve_collisions(&mut s);
            dropped += s.pickups.len();
            assert!(s.pickups.iter().all(|p| p.kind != PickupKind::Life));
            s.pickups.clear();
        }
        assert!(dropped > 0 && dropped < 60);
    }
}
