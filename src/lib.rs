//! Danmaku - simulation core for a vertical-scrolling bullet-hell shooter
//!
//! Core modules:
//! - `sim`: Deterministic fixed-tick simulation (entities, patterns, AI, collisions)
//! - `highscores`: High-score persistence boundary
//! - `settings`: Difficulty presets and run configuration

pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::{HighScoreStore, JsonFileStore, MemoryStore};
pub use settings::{Difficulty, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Play field dimensions (origin top-left, +y down)
    pub const FIELD_WIDTH: f32 = 384.0;
    pub const FIELD_HEIGHT: f32 = 448.0;
    /// Player may not get closer than this to any field edge
    pub const PLAYER_MARGIN: f32 = 16.0;

    /// Player movement (units per tick)
    pub const PLAYER_SPEED: f32 = 4.5;
    pub const PLAYER_FOCUS_SPEED: f32 = 1.8;
    pub const PLAYER_HITBOX_RADIUS: f32 = 2.5;
    pub const PLAYER_WIDTH: f32 = 32.0;
    pub const PLAYER_HEIGHT: f32 = 48.0;
    pub const PLAYER_START_Y_OFFSET: f32 = 60.0;
    pub const PLAYER_RESPAWN_Y_OFFSET: f32 = 80.0;

    /// Resource caps
    pub const MAX_POWER: u8 = 4;
    pub const MAX_BOMBS: u8 = 5;
    pub const MAX_LIVES: u8 = 5;
    pub const POINT_MAX: u32 = 250;

    /// Invincibility window after a hit or a bomb (ticks)
    pub const INVINCIBLE_TICKS: u32 = 180;
    /// Cosmetic bomb flash duration (ticks)
    pub const BOMB_EFFECT_TICKS: u32 = 60;
    pub const BOMB_ENEMY_DAMAGE: i32 = 10;
    pub const BOMB_BOSS_DAMAGE: i32 = 20;

    /// Player fires every N stage ticks while shoot is held
    pub const SHOT_INTERVAL: u64 = 5;

    /// Proximity bands
    pub const GRAZE_RADIUS: f32 = 24.0;
    pub const PICKUP_RADIUS: f32 = 30.0;

    /// Off-field margins for the per-tick bounds filter
    pub const BULLET_MARGIN: f32 = 20.0;
    pub const ENEMY_EXIT_MARGIN: f32 = 50.0;

    /// Scoring
    pub const GRAZE_SCORE: u64 = 10;
    pub const BOSS_HIT_SCORE: u64 = 10;
    pub const BOSS_KILL_SCORE: u64 = 10_000;
    pub const POWER_ITEM_SCORE: u64 = 10;
    pub const POINT_ITEM_SCORE: u64 = 100;

    /// Kill drop chance
    pub const DROP_CHANCE: f64 = 0.3;

    /// Wave director
    pub const MAX_LIVE_ENEMIES: usize = 8;
    pub const SINGLE_SPAWN_EVERY: u64 = 90;
    pub const FORMATION_EVERY: u64 = 300;
    pub const FORMATION_OFFSET: u64 = 150;
    pub const BOSS_SPAWN_TICK: u64 = 1800;
    pub const FINAL_STAGE: u32 = 3;

    /// Boss choreography
    pub const BOSS_HOME_Y: f32 = 80.0;
    pub const BOSS_TRANSITION_TICKS: u32 = 300;

    /// Nominal tick rate; the simulation itself only counts ticks
    pub const TICKS_PER_SECOND: u32 = 60;
    pub const TICK_MS: f32 = 1000.0 / TICKS_PER_SECOND as f32;

    /// Working-set caps
    pub const ENEMY_BULLET_CAP: usize = 2000;
    pub const MAX_PARTICLES: usize = 256;
}

/// Velocity vector for a heading (radians, 0 = +x, clockwise on screen) and speed
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Heading from `from` toward `to`; a zero-length offset yields 0
#[inline]
pub fn aim_angle(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    if d == Vec2::ZERO {
        return 0.0;
    }
    d.y.atan2(d.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aim_angle_handles_coincident_points() {
        let p = Vec2::new(10.0, 10.0);
        assert_eq!(aim_angle(p, p), 0.0);
    }

    #[test]
    fn aim_angle_points_down_the_screen() {
        let a = aim_angle(Vec2::ZERO, Vec2::new(0.0, 5.0));
        assert!((a - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
