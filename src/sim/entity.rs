//! Entity identities and the small entity kinds
//!
//! Player, enemies and the boss have their own modules; projectiles, pickups
//! and particles are plain data and live here. [`EntityRef`] is the one sum
//! type over every kind, used when a consumer wants to walk the whole field.

use glam::Vec2;
use serde::Serialize;

use super::boss::Boss;
use super::enemy::Enemy;
use super::geometry::{Body, FieldRect};
use super::pattern::BulletSpec;
use super::player::Player;
use crate::consts::*;

/// Unique identifier for an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EntityId(pub u32);

/// Hands out entity ids. Owned by the game state; there is no global counter.
#[derive(Debug, Clone)]
pub struct EntityIds {
    next_id: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next_id: 1 }
    }
}

impl EntityIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }
}

/// Bullet tint, consumed by the renderer only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BulletColor {
    Pink,
    Cyan,
    Yellow,
    Green,
    Red,
    White,
}

/// Bullet sprite shape, consumed by the renderer only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BulletShape {
    Circle,
    Rice,
    Kunai,
    Star,
    Orb,
}

/// A projectile fired by an enemy or the boss
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnemyBullet {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: BulletColor,
    pub shape: BulletShape,
    /// Heading at spawn (radians)
    pub angle: f32,
    /// Speed at spawn (units per tick)
    pub speed: f32,
    /// Set once the player has grazed this bullet
    pub grazed: bool,
}

impl EnemyBullet {
    pub fn from_spec(id: EntityId, spec: &BulletSpec) -> Self {
        Self {
            id,
            pos: spec.pos,
            vel: spec.velocity(),
            radius: spec.radius,
            color: spec.color,
            shape: spec.shape,
            angle: spec.angle,
            speed: spec.speed,
            grazed: false,
        }
    }

    #[inline]
    pub fn update(&mut self) {
        self.pos += self.vel;
    }

    pub fn in_bounds(&self) -> bool {
        FieldRect::BULLET_BOUNDS.contains(self.pos)
    }

    pub fn body(&self) -> Body {
        Body::new(self.pos, Vec2::splat(self.radius * 2.0))
    }
}

/// A shot fired by the player (travels straight up)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerBullet {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel_y: f32,
    pub size: Vec2,
    pub damage: i32,
}

impl PlayerBullet {
    #[inline]
    pub fn update(&mut self) {
        self.pos.y += self.vel_y;
    }

    pub fn in_bounds(&self) -> bool {
        self.pos.y > -BULLET_MARGIN
    }

    pub fn body(&self) -> Body {
        Body::new(self.pos, self.size)
    }
}

/// Pickup effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PickupKind {
    Power,
    Point,
    Bomb,
    Life,
}

impl PickupKind {
    /// Kill drops are drawn uniformly from this table, so repeats act as weights
    pub const DROP_TABLE: [PickupKind; 5] = [
        PickupKind::Power,
        PickupKind::Power,
        PickupKind::Point,
        PickupKind::Point,
        PickupKind::Bomb,
    ];
}

/// A falling item
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pickup {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel_y: f32,
    pub kind: PickupKind,
}

impl Pickup {
    pub const FALL_SPEED: f32 = 2.0;
    pub const SIZE: f32 = 16.0;

    pub fn new(id: EntityId, pos: Vec2, kind: PickupKind) -> Self {
        Self {
            id,
            pos,
            vel_y: Self::FALL_SPEED,
            kind,
        }
    }

    #[inline]
    pub fn update(&mut self) {
        self.pos.y += self.vel_y;
    }

    pub fn in_bounds(&self) -> bool {
        self.pos.y < FIELD_HEIGHT + BULLET_MARGIN
    }

    pub fn body(&self) -> Body {
        Body::new(self.pos, Vec2::splat(Self::SIZE))
    }
}

/// A particle for visual effects (never affects gameplay)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: BulletColor,
    /// Remaining ticks
    pub life: u32,
    pub size: f32,
}

impl Particle {
    pub const LIFE_TICKS: u32 = 30;

    #[inline]
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel *= 0.94;
        self.life = self.life.saturating_sub(1);
    }

    pub fn body(&self) -> Body {
        Body::new(self.pos, Vec2::splat(self.size))
    }

    /// Radial spark burst. Jitter comes from a hash of `seed` so cosmetics
    /// never draw from the gameplay RNG.
    pub fn burst(pos: Vec2, color: BulletColor, count: u32, seed: u32) -> impl Iterator<Item = Particle> {
        (0..count).map(move |j| {
            let hash = seed.wrapping_mul(2654435761).wrapping_add(j.wrapping_mul(7919));
            let rand1 = (hash % 1000) as f32 / 1000.0;
            let rand2 = ((hash >> 10) % 1000) as f32 / 1000.0;
            let angle = (j as f32 / count as f32 + rand1 * 0.1) * std::f32::consts::TAU;
            let speed = 1.0 + rand2 * 2.5;
            Particle {
                pos,
                vel: crate::polar_to_cartesian(speed, angle),
                color,
                life: Self::LIFE_TICKS,
                size: 2.0 + rand2 * 2.0,
            }
        })
    }
}

/// Borrowed view over any entity kind
#[derive(Debug, Clone, Copy)]
pub enum EntityRef<'a> {
    Player(&'a Player),
    Enemy(&'a Enemy),
    Boss(&'a Boss),
    EnemyBullet(&'a EnemyBullet),
    PlayerBullet(&'a PlayerBullet),
    Pickup(&'a Pickup),
    Particle(&'a Particle),
}

impl EntityRef<'_> {
    /// Particles are anonymous
    pub fn id(&self) -> Option<EntityId> {
        match self {
            EntityRef::Player(p) => Some(p.id),
            EntityRef::Enemy(e) => Some(e.id),
            EntityRef::Boss(b) => Some(b.id),
            EntityRef::EnemyBullet(b) => Some(b.id),
            EntityRef::PlayerBullet(b) => Some(b.id),
            EntityRef::Pickup(p) => Some(p.id),
            EntityRef::Particle(_) => None,
        }
    }

    pub fn body(&self) -> Body {
        match self {
            EntityRef::Player(p) => p.body(),
            EntityRef::Enemy(e) => e.body(),
            EntityRef::Boss(b) => b.body(),
            EntityRef::EnemyBullet(b) => b.body(),
            EntityRef::PlayerBullet(b) => b.body(),
            EntityRef::Pickup(p) => p.body(),
            EntityRef::Particle(p) => p.body(),
        }
    }

    pub fn pos(&self) -> Vec2 {
        self.body().pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::pattern::BulletSpec;

    #[test]
    fn ids_are_unique_and_increasing() {
        let mut ids = EntityIds::new();
        let a = ids.allocate();
        let b = ids.allocate();
        assert!(b > a);
    }

    #[test]
    fn bullet_integration_adds_velocity() {
        let spec = BulletSpec {
            pos: Vec2::new(50.0, 60.0),
            angle: 0.3,
            speed: 2.5,
            radius: 6.0,
            color: BulletColor::Red,
            shape: BulletShape::Rice,
        };
        let mut bullet = EnemyBullet::from_spec(EntityId(1), &spec);
        let before = bullet.pos;
        bullet.update();
        assert_eq!(bullet.pos, before + bullet.vel);
        assert!(!bullet.grazed);
    }

    #[test]
    fn player_bullet_leaves_through_the_top() {
        let mut shot = PlayerBullet {
            id: EntityId(1),
            pos: Vec2::new(100.0, -8.0),
            vel_y: -12.0,
            size: Vec2::new(8.0, 16.0),
            damage: 1,
        };
        assert!(shot.in_bounds());
        shot.update();
        assert_eq!(shot.pos.y, -20.0);
        assert!(!shot.in_bounds());
    }

    #[test]
    fn pickup_falls_out_of_the_field() {
        let mut item = Pickup::new(EntityId(3), Vec2::new(10.0, FIELD_HEIGHT + 19.0), PickupKind::Life);
        assert!(item.in_bounds());
        item.update();
        assert!(!item.in_bounds());
    }

    #[test]
    fn burst_is_reproducible() {
        let a: Vec<_> = Particle::burst(Vec2::ZERO, BulletColor::Pink, 6, 42).collect();
        let b: Vec<_> = Particle::burst(Vec2::ZERO, BulletColor::Pink, 6, 42).collect();
        assert_eq!(a, b);
        assert_eq!(a.len(), 6);
    }
}
