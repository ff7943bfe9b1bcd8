//! The player ship: movement, shots, invulnerability and the resource economy

use glam::Vec2;
use serde::Serialize;

use super::entity::{EntityId, EntityIds, PlayerBullet};
use super::geometry::{Body, FieldRect};
use super::tick::InputIntent;
use crate::consts::*;

/// One entry of the power-dependent shot volley
struct ShotSlot {
    min_power: u8,
    offset: Vec2,
    vel_y: f32,
    size: Vec2,
}

const SHOT_SLOTS: [ShotSlot; 5] = [
    ShotSlot { min_power: 0, offset: Vec2::new(0.0, -20.0), vel_y: -12.0, size: Vec2::new(8.0, 16.0) },
    ShotSlot { min_power: 1, offset: Vec2::new(-15.0, -15.0), vel_y: -11.0, size: Vec2::new(6.0, 12.0) },
    ShotSlot { min_power: 1, offset: Vec2::new(15.0, -15.0), vel_y: -11.0, size: Vec2::new(6.0, 12.0) },
    ShotSlot { min_power: 3, offset: Vec2::new(-25.0, -10.0), vel_y: -10.0, size: Vec2::new(5.0, 10.0) },
    ShotSlot { min_power: 3, offset: Vec2::new(25.0, -10.0), vel_y: -10.0, size: Vec2::new(5.0, 10.0) },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Player {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
    pub speed: f32,
    pub focus_speed: f32,
    pub lives: u8,
    pub bombs: u8,
    /// 0..=MAX_POWER
    pub power: u8,
    pub score: u64,
    /// Ticks of invulnerability left; invincible while > 0
    pub invincible_ticks: u32,
    pub hitbox_radius: f32,
    pub graze: u32,
    pub point: u32,
    pub point_max: u32,
    /// Cosmetic bomb flash countdown
    pub bomb_effect_ticks: u32,
}

impl Player {
    pub fn new(id: EntityId, lives: u8, bombs: u8) -> Self {
        Self {
            id,
            pos: Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT - PLAYER_START_Y_OFFSET),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            speed: PLAYER_SPEED,
            focus_speed: PLAYER_FOCUS_SPEED,
            lives: lives.min(MAX_LIVES),
            bombs: bombs.min(MAX_BOMBS),
            power: 0,
            score: 0,
            invincible_ticks: 0,
            hitbox_radius: PLAYER_HITBOX_RADIUS,
            graze: 0,
            point: 0,
            point_max: POINT_MAX,
            bomb_effect_ticks: 0,
        }
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.invincible_ticks > 0
    }

    pub fn body(&self) -> Body {
        Body::new(self.pos, self.size)
    }

    /// Apply one tick of directional input. Each flag moves the full speed on
    /// its axis (diagonals are not normalized), then the ship is clamped into
    /// the play area.
    pub fn move_by(&mut self, input: &InputIntent) {
        let speed = if input.focus { self.focus_speed } else { self.speed };
        let mut delta = Vec2::ZERO;
        if input.up {
            delta.y -= speed;
        }
        if input.down {
            delta.y += speed;
        }
        if input.left {
            delta.x -= speed;
        }
        if input.right {
            delta.x += speed;
        }
        self.pos = FieldRect::PLAY_AREA.clamp(self.pos + delta);
    }

    /// Shots for the current power level
    pub fn shot_volley(&self, ids: &mut EntityIds) -> Vec<PlayerBullet> {
        let power = self.power.min(MAX_POWER);
        SHOT_SLOTS
            .iter()
            .filter(|slot| power >= slot.min_power)
            .map(|slot| PlayerBullet {
                id: ids.allocate(),
                pos: self.pos + slot.offset,
                vel_y: slot.vel_y,
                size: slot.size,
                damage: 1,
            })
            .collect()
    }

    /// Volley for this tick while shoot is held; empty off the shot cadence
    pub fn fire_shots(&self, ids: &mut EntityIds, stage_ticks: u64) -> Vec<PlayerBullet> {
        if stage_ticks % SHOT_INTERVAL != 0 {
            return Vec::new();
        }
        self.shot_volley(ids)
    }

    /// Count down invulnerability and the bomb flash
    pub fn tick_timers(&mut self) {
        self.invincible_ticks = self.invincible_ticks.saturating_sub(1);
        self.bomb_effect_ticks = self.bomb_effect_ticks.saturating_sub(1);
    }

    /// Lose a life and respawn. Returns false (and changes nothing) while
    /// invincible.
    pub fn take_damage(&mut self) -> bool {
        if self.is_invincible() {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        self.power = self.power.saturating_sub(1);
        self.invincible_ticks = INVINCIBLE_TICKS;
        self.respawn();
        true
    }

    /// Move back to the respawn point near the bottom of the field
    pub fn respawn(&mut self) {
        self.pos = Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT - PLAYER_RESPAWN_Y_OFFSET);
    }

    /// Spend a bomb. Returns whether it fired; the caller applies the
    /// field-wide effects.
    pub fn use_bomb(&mut self) -> bool {
        if self.bombs == 0 || self.is_invincible() {
            return false;
        }
        self.bombs -= 1;
        self.invincible_ticks = INVINCIBLE_TICKS;
        self.bomb_effect_ticks = BOMB_EFFECT_TICKS;
        true
    }

    pub fn add_graze(&mut self) {
        self.graze = self.graze.saturating_add(1);
        self.add_score(GRAZE_SCORE);
    }

    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    pub fn add_power(&mut self, amount: u8) {
        self.power = self.power.saturating_add(amount).min(MAX_POWER);
    }

    pub fn add_bomb(&mut self) {
        self.bombs = self.bombs.saturating_add(1).min(MAX_BOMBS);
    }

    pub fn add_life(&mut self) {
        self.lives = self.lives.saturating_add(1).min(MAX_LIVES);
    }

    /// Point items also fill the point gauge
    pub fn add_point_item(&mut self) {
        self.point = (self.point + 1).min(self.point_max);
        self.add_score(POINT_ITEM_SCORE);
    }
}
