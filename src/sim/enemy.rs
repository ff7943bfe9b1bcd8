//! Regular enemies and their movement scripts

use glam::Vec2;
use serde::Serialize;

use super::entity::EntityId;
use super::geometry::Body;
use super::pattern::PatternName;
use crate::consts::*;

/// Enemy kinds, in the order stages unlock them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnemyKind {
    Fairy,
    Ghost,
    Spirit,
}

/// Per-kind stats
#[derive(Debug, Clone, Copy)]
pub struct EnemyStats {
    pub size: f32,
    pub health: i32,
    pub points: u64,
    pub fire_interval: u32,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Fairy, EnemyKind::Ghost, EnemyKind::Spirit];

    pub fn stats(&self) -> EnemyStats {
        match self {
            EnemyKind::Fairy => EnemyStats { size: 24.0, health: 3, points: 100, fire_interval: 60 },
            EnemyKind::Ghost => EnemyStats { size: 28.0, health: 5, points: 200, fire_interval: 45 },
            EnemyKind::Spirit => EnemyStats { size: 32.0, health: 8, points: 300, fire_interval: 30 },
        }
    }
}

/// Movement script, driven by a per-enemy accumulator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MovePattern {
    Straight,
    Sine,
    Circle,
    /// Descend to y = 100 and stay there
    Hold,
}

impl MovePattern {
    pub const ALL: [MovePattern; 4] = [
        MovePattern::Straight,
        MovePattern::Sine,
        MovePattern::Circle,
        MovePattern::Hold,
    ];

    const HOLD_Y: f32 = 100.0;

    /// Displacement for one tick at accumulator `a`
    pub fn step(&self, pos: Vec2, a: f32) -> Vec2 {
        match self {
            MovePattern::Straight => Vec2::new(0.0, 1.5),
            MovePattern::Sine => Vec2::new((a * 2.0).sin() * 2.0, 1.2),
            MovePattern::Circle => Vec2::new(a.cos() * 1.5, 0.8 + a.sin() * 0.5),
            MovePattern::Hold => {
                if pos.y < Self::HOLD_Y {
                    Vec2::new(0.0, 1.0)
                } else {
                    Vec2::ZERO
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enemy {
    pub id: EntityId,
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: EnemyKind,
    pub health: i32,
    pub max_health: i32,
    pub pattern: PatternName,
    pub movement: MovePattern,
    /// Ticks until the next volley
    pub fire_countdown: u32,
    pub fire_interval: u32,
    pub move_phase: f32,
    pub points: u64,
}

impl Enemy {
    const MOVE_RATE: f32 = 0.05;

    pub fn new(
        id: EntityId,
        pos: Vec2,
        kind: EnemyKind,
        pattern: PatternName,
        movement: MovePattern,
        first_fire: u32,
    ) -> Self {
        let stats = kind.stats();
        Self {
            id,
            pos,
            size: Vec2::splat(stats.size),
            kind,
            health: stats.health,
            max_health: stats.health,
            pattern,
            movement,
            fire_countdown: first_fire.clamp(1, stats.fire_interval),
            fire_interval: stats.fire_interval,
            move_phase: 0.0,
            points: stats.points,
        }
    }

    /// Advance one tick. Returns true when the enemy fires this tick.
    pub fn update(&mut self) -> bool {
        self.fire_countdown = self.fire_countdown.saturating_sub(1);
        let fire = self.fire_countdown == 0;
        if fire {
            self.fire_countdown = self.fire_interval;
        }

        self.move_phase += Self::MOVE_RATE;
        self.pos += self.movement.step(self.pos, self.move_phase);
        fire
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health -= amount;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn has_left_field(&self) -> bool {
        self.pos.y >= FIELD_HEIGHT + ENEMY_EXIT_MARGIN
    }

    pub fn body(&self) -> Body {
        Body::new(self.pos, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fairy(movement: MovePattern, first_fire: u32) -> Enemy {
        Enemy::new(
            EntityId(1),
            Vec2::new(100.0, 0.0),
            EnemyKind::Fairy,
            PatternName::Aimed,
            movement,
            first_fire,
        )
    }

    #[test]
    fn stats_follow_kind() {
        let spirit = Enemy::new(
            EntityId(2),
            Vec2::ZERO,
            EnemyKind::Spirit,
            PatternName::Radial,
            MovePattern::Straight,
            5,
        );
        assert_eq!(spirit.health, 8);
        assert_eq!(spirit.points, 300);
        assert_eq!(spirit.size, Vec2::splat(32.0));
        assert_eq!(spirit.fire_interval, 30);
    }

    #[test]
    fn fires_on_countdown_then_rearms() {
        let mut e = fairy(MovePattern::Straight, 3);
        assert!(!e.update());
        assert!(!e.update());
        assert!(e.update());
        assert_eq!(e.fire_countdown, 60);

        let fired = (0..120).filter(|_| e.update()).count();
        assert_eq!(fired, 2);
    }

    #[test]
    fn straight_descends_steadily() {
        let mut e = fairy(MovePattern::Straight, 60);
        e.update();
        e.update();
        assert_eq!(e.pos, Vec2::new(100.0, 3.0));
    }

    #[test]
    fn hold_stops_at_hold_line() {
        let mut e = fairy(MovePattern::Hold, 60);
        for _ in 0..300 {
            e.update();
        }
        assert_eq!(e.pos.y, 100.0);
    }

    #[test]
    fn sine_sways_sideways() {
        let mut e = fairy(MovePattern::Sine, 60);
        e.update();
        assert!(e.pos.x > 100.0);
        assert!((e.pos.y - 1.2).abs() < 1e-6);
    }

    #[test]
    fn leaves_field_below_exit_margin() {
        let mut e = fairy(MovePattern::Straight, 60);
        e.pos.y = FIELD_HEIGHT + ENEMY_EXIT_MARGIN - 1.0;
        assert!(!e.has_left_field());
        e.update();
        assert!(e.has_left_field());
    }

    #[test]
    fn damage_kills_at_zero() {
        let mut e = fairy(MovePattern::Straight, 60);
        e.take_damage(2);
        assert!(e.is_alive());
        e.take_damage(1);
        assert!(!e.is_alive());
    }
}
