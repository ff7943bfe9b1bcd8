//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and tick-driven:
//! - Fixed tick only (timers count ticks, never wall-clock time)
//! - Seeded RNG only
//! - Stable iteration order (storage order decides which hit wins)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod boss;
pub mod collision;
pub mod enemy;
pub mod entity;
pub mod geometry;
pub mod pattern;
pub mod player;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use boss::{Archetype, Boss, BossMode, BossStep, archetype_for_stage};
pub use collision::{CollisionOutcome, resolve_collisions};
pub use enemy::{Enemy, EnemyKind, MovePattern};
pub use entity::{
    BulletColor, BulletShape, EnemyBullet, EntityId, EntityIds, EntityRef, Particle, Pickup,
    PickupKind, PlayerBullet,
};
pub use geometry::{Body, FieldRect};
pub use pattern::{BulletSpec, PatternName, generate, generate_boss, generate_named};
pub use player::Player;
pub use state::{GameState, GameStatus};
pub use tick::{InputIntent, tick};
