//! Stage bosses
//!
//! A boss is data ([`Archetype`]) plus a small state machine ([`BossMode`]):
//!
//! ```text
//! Entrance -> Steady(phase 0) -> Transitioning -> Steady(phase 1) -> ... -> Dead
//! ```
//!
//! Phases only move forward, one at a time, and each is entered at most once.
//! The boss cannot be damaged while a transition is running.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::entity::EntityId;
use super::geometry::Body;
use super::pattern::PatternName;
use crate::consts::*;

/// Attack/rest alternation while steady
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RestCycle {
    pub attack_ticks: u32,
    pub rest_ticks: u32,
    /// Rests only in phases up to this one; `None` rests in every phase
    pub until_phase: Option<u8>,
}

impl RestCycle {
    pub fn applies(&self, phase: u8) -> bool {
        self.until_phase.is_none_or(|last| phase <= last)
    }
}

/// Point-to-point movement inside a region, replacing the sway
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaypointRule {
    pub from_phase: u8,
    pub min: Vec2,
    pub max: Vec2,
    pub speed: f32,
    pub pause_ticks: u32,
}

/// An extra pattern layered onto every `every`-th volley
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubBurst {
    pub pattern: PatternName,
    pub every: u32,
    pub from_phase: u8,
}

/// Per-stage boss configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Archetype {
    pub name: &'static str,
    pub patterns: &'static [PatternName],
    pub rest: Option<RestCycle>,
    pub sub_burst: Option<SubBurst>,
    pub waypoints: Option<WaypointRule>,
}

pub const ARCHETYPES: [Archetype; 3] = [
    Archetype {
        name: "Cirno",
        patterns: &[PatternName::Spiral, PatternName::Radial, PatternName::Aimed],
        rest: Some(RestCycle { attack_ticks: 180, rest_ticks: 90, until_phase: None }),
        sub_burst: None,
        waypoints: None,
    },
    Archetype {
        name: "Marisa",
        patterns: &[PatternName::Flower, PatternName::Spiral, PatternName::Radial],
        rest: Some(RestCycle { attack_ticks: 150, rest_ticks: 60, until_phase: Some(0) }),
        sub_burst: None,
        waypoints: None,
    },
    Archetype {
        name: "Reimu",
        patterns: &[
            PatternName::Flower,
            PatternName::Spiral,
            PatternName::Radial,
            PatternName::Wave,
        ],
        rest: None,
        sub_burst: Some(SubBurst { pattern: PatternName::Crossfire, every: 3, from_phase: 1 }),
        waypoints: Some(WaypointRule {
            from_phase: 2,
            min: Vec2::new(60.0, 50.0),
            max: Vec2::new(FIELD_WIDTH - 60.0, 160.0),
            speed: 1.5,
            pause_ticks: 60,
        }),
    },
];

/// Archetype for a 1-based stage; later stages reuse the last entry
pub fn archetype_for_stage(stage: u32) -> &'static Archetype {
    let idx = (stage.max(1) as usize - 1).min(ARCHETYPES.len() - 1);
    &ARCHETYPES[idx]
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum BossMode {
    /// Descending into the field; never fires
    Entrance,
    Steady,
    /// Invulnerable, drifting home, not firing
    Transitioning { remaining: u32, next_phase: u8 },
    Dead,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Cycle {
    Attacking { remaining: u32 },
    Resting { remaining: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Drift {
    Sway,
    Seeking { target: Vec2 },
    Paused { remaining: u32 },
}

/// What the orchestrator should do after [`Boss::update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossStep {
    Idle,
    Fire,
    Died,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Boss {
    pub id: EntityId,
    #[serde(skip)]
    pub archetype: &'static Archetype,
    pub name: &'static str,
    pub pos: Vec2,
    pub size: Vec2,
    pub health: i32,
    pub max_health: i32,
    /// 0..=MAX_PHASE
    pub phase: u8,
    pub current_pattern: usize,
    pub fire_countdown: u32,
    pub move_phase: f32,
    pub mode: BossMode,
    pub cycle: Cycle,
    /// Volleys fired so far, drives the sub-burst cadence
    pub volleys: u32,
    pub drift: Drift,
}

impl Boss {
    pub const SIZE: f32 = 64.0;
    pub const MAX_PHASE: u8 = 2;
    /// Health fraction below which phase `i` ends
    pub const PHASE_THRESHOLDS: [f32; 2] = [0.6, 0.3];

    const ENTRY_Y: f32 = -60.0;
    const ENTRY_SPEED: f32 = 1.0;
    const SWAY_RATE: f32 = 0.02;
    const SWAY_X: f32 = 150.0;
    const SWAY_Y: f32 = 12.0;
    const HOME_SPEED: f32 = 2.0;
    const TRANSITION_REARM: u32 = 60;

    pub fn new(id: EntityId, stage: u32, archetype: &'static Archetype) -> Self {
        let health = 100 + 50 * stage as i32;
        Self {
            id,
            archetype,
            name: archetype.name,
            pos: Vec2::new(FIELD_WIDTH / 2.0, Self::ENTRY_Y),
            size: Vec2::splat(Self::SIZE),
            health,
            max_health: health,
            phase: 0,
            current_pattern: 0,
            fire_countdown: Self::TRANSITION_REARM,
            move_phase: 0.0,
            mode: BossMode::Entrance,
            cycle: Self::fresh_cycle(archetype),
            volleys: 0,
            drift: Drift::Sway,
        }
    }

    fn fresh_cycle(archetype: &Archetype) -> Cycle {
        let remaining = archetype.rest.map_or(0, |r| r.attack_ticks);
        Cycle::Attacking { remaining }
    }

    fn home() -> Vec2 {
        Vec2::new(FIELD_WIDTH / 2.0, BOSS_HOME_Y)
    }

    /// Active pattern; an empty pattern list falls back to a plain ring
    pub fn pattern(&self) -> PatternName {
        let patterns = self.archetype.patterns;
        if patterns.is_empty() {
            return PatternName::Radial;
        }
        patterns[self.current_pattern % patterns.len()]
    }

    pub fn is_invulnerable(&self) -> bool {
        self.transition_countdown() > 0
    }

    /// Ticks left in the running phase transition, 0 otherwise
    pub fn transition_countdown(&self) -> u32 {
        match self.mode {
            BossMode::Transitioning { remaining, .. } => remaining,
            _ => 0,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.mode == BossMode::Dead
    }

    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32
    }

    /// Apply damage. Ignored while invulnerable or dead; health floors at 0.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if self.is_invulnerable() || self.is_dead() {
            return false;
        }
        self.health = (self.health - amount).max(0);
        true
    }

    pub fn body(&self) -> Body {
        Body::new(self.pos, self.size)
    }

    fn waypoints_active(&self) -> Option<WaypointRule> {
        self.archetype.waypoints.filter(|w| self.phase >= w.from_phase)
    }

    /// Advance the state machine by one tick
    pub fn update(&mut self, rng: &mut impl Rng) -> BossStep {
        if self.is_dead() {
            return BossStep::Idle;
        }

        let step = match self.mode {
            BossMode::Entrance => {
                self.pos.y = (self.pos.y + Self::ENTRY_SPEED).min(BOSS_HOME_Y);
                if self.pos.y >= BOSS_HOME_Y {
                    log::debug!("Boss {} in position", self.name);
                    self.mode = BossMode::Steady;
                }
                BossStep::Idle
            }
            BossMode::Transitioning { remaining, next_phase } => {
                self.pos = move_toward(self.pos, Self::home(), Self::HOME_SPEED);
                let remaining = remaining.saturating_sub(1);
                if remaining == 0 {
                    self.enter_phase(next_phase);
                } else {
                    self.mode = BossMode::Transitioning { remaining, next_phase };
                }
                BossStep::Idle
            }
            BossMode::Steady => self.steady(rng),
            BossMode::Dead => BossStep::Idle,
        };

        // Checked after the move; drops spawn at the final position
        if self.health <= 0 {
            log::info!("Boss {} defeated", self.name);
            self.mode = BossMode::Dead;
            return BossStep::Died;
        }
        step
    }

    fn steady(&mut self, rng: &mut impl Rng) -> BossStep {
        let threshold = Self::PHASE_THRESHOLDS.get(self.phase as usize).copied();
        let below = threshold.is_some_and(|t| self.health_fraction() < t);
        if self.health > 0 && self.phase < Self::MAX_PHASE && below {
            let next_phase = self.phase + 1;
            log::debug!("Boss {} transitioning to phase {next_phase}", self.name);
            self.mode = BossMode::Transitioning {
                remaining: BOSS_TRANSITION_TICKS,
                next_phase,
            };
            return BossStep::Idle;
        }

        self.steer(rng);

        let resting = self.advance_cycle();
        if resting {
            return BossStep::Idle;
        }

        self.fire_countdown = self.fire_countdown.saturating_sub(1);
        if self.fire_countdown == 0 {
            self.fire_countdown = 20u32.saturating_sub(3 * self.phase as u32).max(1);
            BossStep::Fire
        } else {
            BossStep::Idle
        }
    }

    fn enter_phase(&mut self, phase: u8) {
        self.phase = phase.min(Self::MAX_PHASE);
        let len = self.archetype.patterns.len().max(1);
        self.current_pattern = (self.current_pattern + 1) % len;
        self.fire_countdown = Self::TRANSITION_REARM;
        self.move_phase = 0.0;
        self.cycle = Self::fresh_cycle(self.archetype);
        self.drift = if self.waypoints_active().is_some() {
            Drift::Paused { remaining: 0 }
        } else {
            Drift::Sway
        };
        self.mode = BossMode::Steady;
        log::info!(
            "Boss {} entered phase {} with {}",
            self.name,
            self.phase,
            self.pattern().as_str()
        );
    }

    /// Returns true while resting
    fn advance_cycle(&mut self) -> bool {
        let Some(rest) = self.archetype.rest.filter(|r| r.applies(self.phase)) else {
            return false;
        };
        self.cycle = match self.cycle {
            Cycle::Attacking { remaining } if remaining <= 1 => Cycle::Resting { remaining: rest.rest_ticks },
            Cycle::Attacking { remaining } => Cycle::Attacking { remaining: remaining - 1 },
            Cycle::Resting { remaining } if remaining <= 1 => Cycle::Attacking { remaining: rest.attack_ticks },
            Cycle::Resting { remaining } => Cycle::Resting { remaining: remaining - 1 },
        };
        matches!(self.cycle, Cycle::Resting { .. })
    }

    fn steer(&mut self, rng: &mut impl Rng) {
        let Some(rule) = self.waypoints_active() else {
            self.move_phase += Self::SWAY_RATE;
            let a = self.move_phase;
            self.pos = Vec2::new(
                FIELD_WIDTH / 2.0 + a.sin() * Self::SWAY_X,
                BOSS_HOME_Y + (2.0 * a).sin() * Self::SWAY_Y,
            );
            return;
        };

        self.drift = match self.drift {
            Drift::Sway | Drift::Paused { remaining: 0 } => {
                let target = Vec2::new(
                    rng.random_range(rule.min.x..=rule.max.x),
                    rng.random_range(rule.min.y..=rule.max.y),
                );
                Drift::Seeking { target }
            }
            Drift::Paused { remaining } => Drift::Paused { remaining: remaining - 1 },
            Drift::Seeking { target } => {
                self.pos = move_toward(self.pos, target, rule.speed);
                if self.pos == target {
                    Drift::Paused { remaining: rule.pause_ticks }
                } else {
                    Drift::Seeking { target }
                }
            }
        };
    }
}

/// Step `from` toward `to` by at most `speed`, landing exactly on arrival
fn move_toward(from: Vec2, to: Vec2, speed: f32) -> Vec2 {
    let delta = to - from;
    if delta.length() <= speed {
        to
    } else {
        from + delta.normalize_or_zero() * speed
    }
}
