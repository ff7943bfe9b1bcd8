//! Demo/idle mode: a simple bot that produces inputs from the current state
//!
//! Pure function of the snapshot, so a bot-driven run is exactly as
//! reproducible as a recorded one.

use glam::Vec2;

use super::state::GameState;
use super::tick::InputIntent;
use crate::consts::*;

/// How far ahead bullet positions are projected (ticks)
const LOOKAHEAD: f32 = 6.0;
/// Bullets closer than this (after projection) are dodged
const DANGER_RADIUS: f32 = 48.0;
/// Below this distance the bot switches to focus speed
const FOCUS_RADIUS: f32 = 20.0;
/// Bomb when a bullet is about to touch the hitbox
const PANIC_MARGIN: f32 = 3.0;
/// Preferred height above the bottom edge
const CRUISE_Y_OFFSET: f32 = 70.0;
/// Dead zone for steering, avoids jitter around the target
const STEER_DEADZONE: f32 = 4.0;

/// Choose this tick's input
pub fn autopilot(state: &GameState) -> InputIntent {
    let player = &state.player;
    let mut input = InputIntent {
        shoot: true,
        ..Default::default()
    };

    // Nearest threat, judged by where it will be shortly
    let threat = state
        .enemy_bullets
        .iter()
        .map(|b| {
            let future = b.pos + b.vel * LOOKAHEAD;
            let dist = future.distance(player.pos).min(b.pos.distance(player.pos));
            (b, future, dist)
        })
        .filter(|(_, _, dist)| *dist < DANGER_RADIUS)
        .min_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal));

    if let Some((bullet, future, dist)) = threat {
        let next = bullet.pos + bullet.vel;
        let about_to_hit = next.distance(player.pos) < bullet.radius + player.hitbox_radius + PANIC_MARGIN;
        if about_to_hit && player.bombs > 0 && !player.is_invincible() {
            input.bomb = true;
        }

        // Step away from the projected position; sideways beats backwards
        let away = (player.pos - future).normalize_or_zero();
        let sideways = if away.x.abs() < 0.2 {
            // Head-on: dodge toward the roomier side
            if player.pos.x < FIELD_WIDTH / 2.0 { 1.0 } else { -1.0 }
        } else {
            away.x.signum()
        };
        input.left = sideways < 0.0;
        input.right = sideways > 0.0;
        input.down = away.y > 0.5 && player.pos.y < FIELD_HEIGHT - PLAYER_MARGIN - 1.0;
        input.up = away.y < -0.5;
        input.focus = dist < FOCUS_RADIUS;
        return input;
    }

    // No threat: collect items, otherwise line up under a target
    let goal = nearest(player.pos, state.pickups.iter().map(|p| p.pos))
        .or_else(|| state.boss.as_ref().map(|b| b.pos))
        .or_else(|| nearest(player.pos, state.enemies.iter().map(|e| e.pos)))
        .map(|p| Vec2::new(p.x, p.y.max(FIELD_HEIGHT - CRUISE_Y_OFFSET - 60.0)))
        .unwrap_or(Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT - CRUISE_Y_OFFSET));
    let goal = Vec2::new(goal.x, goal.y.min(FIELD_HEIGHT - CRUISE_Y_OFFSET));
    steer(&mut input, player.pos, goal);
    input
}

fn nearest(from: Vec2, points: impl Iterator<Item = Vec2>) -> Option<Vec2> {
    points.min_by(|a, b| {
        a.distance_squared(from)
            .partial_cmp(&b.distance_squared(from))
            .unwrap_or(std::cmp::Ordering::Equal)
    })
}

fn steer(input: &mut InputIntent, from: Vec2, to: Vec2) {
    let d = to - from;
    input.left = d.x < -STEER_DEADZONE;
    input.right = d.x > STEER_DEADZONE;
    input.up = d.y < -STEER_DEADZONE;
    input.down = d.y > STEER_DEADZONE;
}
