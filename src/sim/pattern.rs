//! Bullet pattern generation
//!
//! Every named pattern is a small table of [`Emission`] rows. One generic
//! evaluator turns a row into bullets, so a new pattern is a new table, not a
//! new code path.
//!
//! Deterministic rows are a pure function of `(origin, target, tick, phase)`.
//! Rows that draw from the RNG (scatter angles, random speeds, spawn chance,
//! top-edge origins) take it as an argument, so tests can seed it.

use std::f32::consts::{FRAC_PI_2, TAU};

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::boss::Boss;
use super::entity::{BulletColor, BulletShape};
use crate::consts::*;
use crate::{aim_angle, polar_to_cartesian};

/// Named bullet patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PatternName {
    Spiral,
    Radial,
    Aimed,
    Random,
    Wave,
    Flower,
    Rain,
    Crossfire,
}

impl PatternName {
    pub const ALL: [PatternName; 8] = [
        PatternName::Spiral,
        PatternName::Radial,
        PatternName::Aimed,
        PatternName::Random,
        PatternName::Wave,
        PatternName::Flower,
        PatternName::Rain,
        PatternName::Crossfire,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PatternName::Spiral => "spiral",
            PatternName::Radial => "radial",
            PatternName::Aimed => "aimed",
            PatternName::Random => "random",
            PatternName::Wave => "wave",
            PatternName::Flower => "flower",
            PatternName::Rain => "rain",
            PatternName::Crossfire => "crossfire",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.to_lowercase();
        Self::ALL.into_iter().find(|p| p.as_str() == s)
    }

    /// True when the enemy table for this pattern never touches the RNG
    pub fn is_deterministic(&self) -> bool {
        enemy_table(*self).iter().all(Emission::is_deterministic)
    }
}

/// A bullet to be spawned; the caller assigns the id
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulletSpec {
    pub pos: Vec2,
    pub angle: f32,
    pub speed: f32,
    pub radius: f32,
    pub color: BulletColor,
    pub shape: BulletShape,
}

impl BulletSpec {
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        polar_to_cartesian(self.speed, self.angle)
    }
}

/// A count that grows with the boss phase (`base + per_phase * phase`)
#[derive(Debug, Clone, Copy)]
pub struct Scaled {
    pub base: u32,
    pub per_phase: u32,
}

impl Scaled {
    pub const fn fixed(base: u32) -> Self {
        Self { base, per_phase: 0 }
    }

    pub const fn scaled(base: u32, per_phase: u32) -> Self {
        Self { base, per_phase }
    }

    #[inline]
    pub fn at(&self, phase: u8) -> u32 {
        self.base + self.per_phase * phase as u32
    }
}

/// Where bullets leave from
#[derive(Debug, Clone, Copy)]
pub enum Origin {
    /// The firing entity's position
    Firer,
    /// Both top corners of the field
    TopCorners,
    /// A fresh random point on the top edge for every bullet
    TopEdge,
}

/// Centre heading of a fan
#[derive(Debug, Clone, Copy)]
pub enum Aim {
    Target,
    Down,
    /// `center + sin(tick * frequency) * amplitude`
    Sweep {
        center: f32,
        amplitude: f32,
        frequency: f32,
    },
}

/// Angular layout of one layer
#[derive(Debug, Clone, Copy)]
pub enum Spread {
    /// Evenly spaced on a full circle, base angle `tick * spin`
    Ring { spin: f32 },
    /// Centred on the aim heading, `step` radians apart
    Fan { aim: Aim, step: f32 },
    /// Fixed arc starting at `start + tick * spin`, `step` radians apart
    Arc { start: f32, step: f32, spin: f32 },
    /// Uniformly random headings
    Scatter,
}

#[derive(Debug, Clone, Copy)]
pub enum Speed {
    Constant(f32),
    /// Uniform in `[min, max)`
    Range(f32, f32),
    /// Fans only: bullets further from the centre line fly faster
    FanOffset { base: f32, per_step: f32 },
}

#[derive(Debug, Clone, Copy)]
pub enum Palette {
    Fixed(BulletColor),
    ByIndex(BulletColor, BulletColor),
    ByLayer(BulletColor, BulletColor),
    ByIndexAndLayer(BulletColor, BulletColor),
    Random(BulletColor, BulletColor),
}

/// How repeated layers differ from the first one
#[derive(Debug, Clone, Copy)]
pub struct Layering {
    pub count: Scaled,
    /// Added to the bullet count for each successive layer
    pub extra_per_layer: u32,
    /// Heading offset of layer 0
    pub angle_offset: f32,
    /// Heading offset added per layer
    pub angle_step: f32,
    /// Speed added per layer
    pub speed_step: f32,
    /// Odd layers spin the other way
    pub alternate_spin: bool,
}

impl Layering {
    pub const SINGLE: Layering = Layering {
        count: Scaled::fixed(1),
        extra_per_layer: 0,
        angle_offset: 0.0,
        angle_step: 0.0,
        speed_step: 0.0,
        alternate_spin: false,
    };
}

/// One row of a pattern table
#[derive(Debug, Clone, Copy)]
pub struct Emission {
    pub origin: Origin,
    pub count: Scaled,
    pub layers: Layering,
    pub spread: Spread,
    pub speed: Speed,
    pub palette: Palette,
    pub shape: BulletShape,
    pub radius: f32,
    /// Probability that the row fires at all on a given call
    pub chance: f64,
}

impl Emission {
    const BASE: Emission = Emission {
        origin: Origin::Firer,
        count: Scaled::fixed(1),
        layers: Layering::SINGLE,
        spread: Spread::Ring { spin: 0.0 },
        speed: Speed::Constant(3.0),
        palette: Palette::Fixed(BulletColor::Red),
        shape: BulletShape::Rice,
        radius: 6.0,
        chance: 1.0,
    };

    pub fn is_deterministic(&self) -> bool {
        self.chance >= 1.0
            && !matches!(self.origin, Origin::TopEdge)
            && !matches!(self.spread, Spread::Scatter)
            && !matches!(self.speed, Speed::Range(..))
            && !matches!(self.palette, Palette::Random(..))
    }
}

// Enemy patterns

const SPIRAL: &[Emission] = &[Emission {
    count: Scaled::fixed(6),
    spread: Spread::Ring { spin: 0.08 },
    speed: Speed::Constant(2.5),
    palette: Palette::ByIndex(BulletColor::Red, BulletColor::White),
    radius: 7.0,
    ..Emission::BASE
}];

const RADIAL: &[Emission] = &[Emission {
    count: Scaled::fixed(12),
    spread: Spread::Ring { spin: 0.0 },
    speed: Speed::Constant(3.0),
    ..Emission::BASE
}];

const AIMED: &[Emission] = &[Emission {
    count: Scaled::fixed(5),
    spread: Spread::Fan { aim: Aim::Target, step: 0.12 },
    speed: Speed::Constant(4.0),
    palette: Palette::Fixed(BulletColor::White),
    radius: 5.0,
    ..Emission::BASE
}];

const RANDOM: &[Emission] = &[Emission {
    count: Scaled::fixed(5),
    spread: Spread::Scatter,
    speed: Speed::Range(2.0, 4.0),
    palette: Palette::Random(BulletColor::Red, BulletColor::White),
    radius: 5.0,
    ..Emission::BASE
}];

const WAVE: &[Emission] = &[Emission {
    count: Scaled::fixed(7),
    spread: Spread::Fan {
        aim: Aim::Sweep { center: FRAC_PI_2, amplitude: 0.6, frequency: 0.05 },
        step: 0.15,
    },
    speed: Speed::Constant(3.5),
    shape: BulletShape::Kunai,
    radius: 7.0,
    ..Emission::BASE
}];

const FLOWER: &[Emission] = &[Emission {
    count: Scaled::fixed(5),
    layers: Layering {
        count: Scaled::fixed(2),
        angle_offset: -0.075,
        angle_step: 0.15,
        speed_step: 0.5,
        ..Layering::SINGLE
    },
    spread: Spread::Arc { start: TAU / 5.0, step: 0.2, spin: 0.04 },
    speed: Speed::Constant(2.0),
    palette: Palette::ByIndex(BulletColor::Red, BulletColor::White),
    shape: BulletShape::Orb,
    ..Emission::BASE
}];

const RAIN: &[Emission] = &[Emission {
    origin: Origin::TopEdge,
    count: Scaled::fixed(3),
    spread: Spread::Fan { aim: Aim::Down, step: 0.0 },
    speed: Speed::Range(1.5, 3.0),
    palette: Palette::Fixed(BulletColor::Cyan),
    shape: BulletShape::Star,
    radius: 5.0,
    chance: 0.5,
    ..Emission::BASE
}];

const CROSSFIRE: &[Emission] = &[Emission {
    origin: Origin::TopCorners,
    count: Scaled::fixed(3),
    spread: Spread::Fan { aim: Aim::Target, step: 0.1 },
    speed: Speed::Constant(3.0),
    palette: Palette::Fixed(BulletColor::Yellow),
    shape: BulletShape::Kunai,
    ..Emission::BASE
}];

// Boss patterns, scaled by phase

const BOSS_SPIRAL: &[Emission] = &[
    Emission {
        count: Scaled::scaled(6, 2),
        spread: Spread::Ring { spin: 0.06 },
        speed: Speed::Constant(2.5),
        palette: Palette::ByIndex(BulletColor::Red, BulletColor::White),
        radius: 7.0,
        ..Emission::BASE
    },
    Emission {
        count: Scaled::scaled(6, 2),
        layers: Layering { angle_offset: 0.3, ..Layering::SINGLE },
        spread: Spread::Ring { spin: -0.06 },
        speed: Speed::Constant(2.0),
        ..Emission::BASE
    },
];

const BOSS_RADIAL: &[Emission] = &[Emission {
    count: Scaled::fixed(16),
    layers: Layering {
        count: Scaled::scaled(2, 1),
        extra_per_layer: 4,
        angle_step: 0.08,
        speed_step: 0.4,
        ..Layering::SINGLE
    },
    spread: Spread::Ring { spin: 0.02 },
    speed: Speed::Constant(2.0),
    palette: Palette::ByIndexAndLayer(BulletColor::Red, BulletColor::White),
    radius: 5.0,
    ..Emission::BASE
}];

const BOSS_FLOWER: &[Emission] = &[Emission {
    count: Scaled::scaled(8, 2),
    layers: Layering {
        count: Scaled::fixed(2),
        speed_step: 0.6,
        alternate_spin: true,
        ..Layering::SINGLE
    },
    spread: Spread::Ring { spin: 0.03 },
    speed: Speed::Constant(1.8),
    palette: Palette::ByLayer(BulletColor::Red, BulletColor::White),
    shape: BulletShape::Orb,
    radius: 7.0,
    ..Emission::BASE
}];

const BOSS_CROSSFIRE: &[Emission] = &[Emission {
    origin: Origin::TopCorners,
    count: Scaled::scaled(5, 2),
    spread: Spread::Fan { aim: Aim::Target, step: 0.08 },
    speed: Speed::Constant(3.2),
    palette: Palette::Fixed(BulletColor::Yellow),
    shape: BulletShape::Kunai,
    ..Emission::BASE
}];

const BOSS_BARRAGE: &[Emission] = &[Emission {
    count: Scaled::scaled(13, 4),
    spread: Spread::Fan { aim: Aim::Target, step: 0.06 },
    speed: Speed::FanOffset { base: 3.5, per_step: 0.08 },
    shape: BulletShape::Kunai,
    ..Emission::BASE
}];

fn enemy_table(name: PatternName) -> &'static [Emission] {
    match name {
        PatternName::Spiral => SPIRAL,
        PatternName::Radial => RADIAL,
        PatternName::Aimed => AIMED,
        PatternName::Random => RANDOM,
        PatternName::Wave => WAVE,
        PatternName::Flower => FLOWER,
        PatternName::Rain => RAIN,
        PatternName::Crossfire => CROSSFIRE,
    }
}

fn boss_table(name: PatternName) -> &'static [Emission] {
    match name {
        PatternName::Spiral => BOSS_SPIRAL,
        PatternName::Radial => BOSS_RADIAL,
        PatternName::Flower => BOSS_FLOWER,
        PatternName::Crossfire => BOSS_CROSSFIRE,
        PatternName::Aimed | PatternName::Wave | PatternName::Random | PatternName::Rain => {
            BOSS_BARRAGE
        }
    }
}

/// Bullets for an enemy firing `name` from `origin` at `target`
pub fn generate(
    name: PatternName,
    origin: Vec2,
    target: Vec2,
    tick: u64,
    rng: &mut impl Rng,
) -> Vec<BulletSpec> {
    let mut out = Vec::new();
    for emission in enemy_table(name) {
        evaluate(emission, origin, target, tick, 0, rng, &mut out);
    }
    out
}

/// String-keyed entry point; unknown names produce an empty batch
pub fn generate_named(
    name: &str,
    origin: Vec2,
    target: Vec2,
    tick: u64,
    rng: &mut impl Rng,
) -> Vec<BulletSpec> {
    match PatternName::from_str(name) {
        Some(pattern) => generate(pattern, origin, target, tick, rng),
        None => {
            log::debug!("Unknown pattern {name:?}, nothing fired");
            Vec::new()
        }
    }
}

/// Bullets for one boss volley.
///
/// The boss supplies the phase (arm/ring counts), its active pattern, and the
/// volley counter that drives its archetype's sub-burst.
pub fn generate_boss(boss: &Boss, target: Vec2, tick: u64, rng: &mut impl Rng) -> Vec<BulletSpec> {
    let mut out = Vec::new();
    for emission in boss_table(boss.pattern()) {
        evaluate(emission, boss.pos, target, tick, boss.phase, rng, &mut out);
    }
    if let Some(burst) = boss.archetype.sub_burst {
        let due = boss.phase >= burst.from_phase && (boss.volleys + 1) % burst.every.max(1) == 0;
        if due {
            for emission in boss_table(burst.pattern) {
                evaluate(emission, boss.pos, target, tick, boss.phase, rng, &mut out);
            }
        }
    }
    out
}

#[allow(clippy::too_many_arguments)]
fn evaluate(
    e: &Emission,
    firer: Vec2,
    target: Vec2,
    tick: u64,
    phase: u8,
    rng: &mut impl Rng,
    out: &mut Vec<BulletSpec>,
) {
    if e.chance < 1.0 && !rng.random_bool(e.chance.clamp(0.0, 1.0)) {
        return;
    }
    match e.origin {
        Origin::Firer | Origin::TopEdge => emit_from(e, firer, target, tick, phase, rng, out),
        Origin::TopCorners => {
            for corner in [Vec2::ZERO, Vec2::new(FIELD_WIDTH, 0.0)] {
                emit_from(e, corner, target, tick, phase, rng, out);
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn emit_from(
    e: &Emission,
    anchor: Vec2,
    target: Vec2,
    tick: u64,
    phase: u8,
    rng: &mut impl Rng,
    out: &mut Vec<BulletSpec>,
) {
    let t = tick as f32;
    let layers = e.layers.count.at(phase);
    for layer in 0..layers {
        let count = e.count.at(phase) + layer * e.layers.extra_per_layer;
        if count == 0 {
            continue;
        }
        let layer_offset = e.layers.angle_offset + layer as f32 * e.layers.angle_step;
        let layer_speed = layer as f32 * e.layers.speed_step;
        let spin_dir = if e.layers.alternate_spin && layer % 2 == 1 { -1.0 } else { 1.0 };

        for i in 0..count {
            let pos = match e.origin {
                Origin::TopEdge => Vec2::new(rng.random_range(0.0..FIELD_WIDTH), 0.0),
                _ => anchor,
            };

            // Signed distance from the fan's centre line, 0 for rings
            let mut fan_step = 0.0;
            let angle = match e.spread {
                Spread::Ring { spin } => t * spin * spin_dir + i as f32 * TAU / count as f32,
                Spread::Arc { start, step, spin } => t * spin * spin_dir + start + i as f32 * step,
                Spread::Fan { aim, step } => {
                    fan_step = i as f32 - (count - 1) as f32 / 2.0;
                    let centre = match aim {
                        Aim::Target => aim_angle(pos, target),
                        Aim::Down => FRAC_PI_2,
                        Aim::Sweep { center, amplitude, frequency } => {
                            center + (t * frequency).sin() * amplitude
                        }
                    };
                    centre + fan_step * step
                }
                Spread::Scatter => rng.random_range(0.0..TAU),
            } + layer_offset;

            let speed = match e.speed {
                Speed::Constant(v) => v,
                Speed::Range(min, max) => rng.random_range(min..max),
                Speed::FanOffset { base, per_step } => base + fan_step.abs() * per_step,
            } + layer_speed;

            let color = match e.palette {
                Palette::Fixed(c) => c,
                Palette::ByIndex(a, b) => pick(i, a, b),
                Palette::ByLayer(a, b) => pick(layer, a, b),
                Palette::ByIndexAndLayer(a, b) => pick(i + layer, a, b),
                Palette::Random(a, b) => {
                    if rng.random_bool(0.5) {
                        a
                    } else {
                        b
                    }
                }
            };

            out.push(BulletSpec {
                pos,
                angle,
                speed,
                radius: e.radius,
                color,
                shape: e.shape,
            });
        }
    }
}

#[inline]
fn pick(n: u32, even: BulletColor, odd: BulletColor) -> BulletColor {
    if n % 2 == 0 { even } else { odd }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::boss::{Boss, archetype_for_stage};
    use crate::sim::entity::EntityId;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn radial_ring_is_evenly_spaced() {
        let origin = Vec2::new(100.0, 100.0);
        let batch = generate(PatternName::Radial, origin, Vec2::new(192.0, 400.0), 0, &mut rng());
        assert_eq!(batch.len(), 12);
        for (i, spec) in batch.iter().enumerate() {
            let expected = (i as f32 * 30.0).to_radians();
            assert!((spec.angle - expected).abs() < 1e-5, "bullet {i} at {}", spec.angle);
            assert_eq!(spec.speed, 3.0);
            assert_eq!(spec.pos, origin);
        }
        for pair in batch.windows(2) {
            let gap = (pair[1].angle - pair[0].angle).to_degrees();
            assert!((gap - 30.0).abs() < 1e-3);
        }
    }

    #[test]
    fn deterministic_patterns_repeat_exactly() {
        let origin = Vec2::new(120.0, 60.0);
        let target = Vec2::new(200.0, 380.0);
        for name in PatternName::ALL.into_iter().filter(PatternName::is_deterministic) {
            // Different RNG states must not matter
            let a = generate(name, origin, target, 321, &mut Pcg32::seed_from_u64(1));
            let b = generate(name, origin, target, 321, &mut Pcg32::seed_from_u64(2));
            assert_eq!(a, b, "{} drifted", name.as_str());
            assert!(!a.is_empty());
        }
    }

    #[test]
    fn probabilistic_patterns_are_flagged() {
        assert!(!PatternName::Random.is_deterministic());
        assert!(!PatternName::Rain.is_deterministic());
        assert!(PatternName::Spiral.is_deterministic());
        assert!(PatternName::Crossfire.is_deterministic());
    }

    #[test]
    fn spiral_base_angle_follows_tick() {
        let a = generate(PatternName::Spiral, Vec2::ZERO, Vec2::ONE, 10, &mut rng());
        assert_eq!(a.len(), 6);
        assert!((a[0].angle - 0.8).abs() < 1e-6);
        assert_eq!(a[0].color, BulletColor::Red);
        assert_eq!(a[1].color, BulletColor::White);
    }

    #[test]
    fn aimed_fan_is_centred_on_target() {
        let origin = Vec2::new(100.0, 100.0);
        let target = Vec2::new(100.0, 300.0);
        let batch = generate(PatternName::Aimed, origin, target, 0, &mut rng());
        assert_eq!(batch.len(), 5);
        assert!((batch[2].angle - FRAC_PI_2).abs() < 1e-6);
        assert!((batch[0].angle - (FRAC_PI_2 - 0.24)).abs() < 1e-6);
    }

    #[test]
    fn aimed_at_own_position_does_not_produce_nan() {
        let p = Vec2::new(50.0, 50.0);
        let batch = generate(PatternName::Aimed, p, p, 0, &mut rng());
        assert!(batch.iter().all(|b| b.angle.is_finite() && b.velocity().is_finite()));
    }

    #[test]
    fn flower_layers_fly_at_different_speeds() {
        let batch = generate(PatternName::Flower, Vec2::ZERO, Vec2::ONE, 0, &mut rng());
        assert_eq!(batch.len(), 10);
        assert!(batch[..5].iter().all(|b| b.speed == 2.0));
        assert!(batch[5..].iter().all(|b| b.speed == 2.5));
    }

    #[test]
    fn flower_petals_form_a_narrow_arc() {
        let batch = generate(PatternName::Flower, Vec2::ZERO, Vec2::ONE, 0, &mut rng());
        let expected = [
            1.1816, 1.3816, 1.5816, 1.7816, 1.9816, // inner layer
            1.3316, 1.5316, 1.7316, 1.9316, 2.1316, // outer layer
        ];
        for (spec, want) in batch.iter().zip(expected) {
            assert!((spec.angle - want).abs() < 1e-3, "got {} want {want}", spec.angle);
        }
        assert_eq!(batch[0].color, BulletColor::Red);
        assert_eq!(batch[1].color, BulletColor::White);

        // The whole arc turns with the tick
        let later = generate(PatternName::Flower, Vec2::ZERO, Vec2::ONE, 10, &mut rng());
        for (a, b) in batch.iter().zip(&later) {
            assert!((b.angle - a.angle - 0.4).abs() < 1e-5);
        }
    }

    #[test]
    fn boss_fires_a_barrage_for_patterns_without_a_boss_form() {
        for name in [PatternName::Aimed, PatternName::Wave, PatternName::Random, PatternName::Rain] {
            let table = boss_table(name);
            assert_eq!(table.len(), 1, "{}", name.as_str());
            assert!(matches!(table[0].speed, Speed::FanOffset { base, .. } if base == 3.5));
            assert!(table[0].is_deterministic());
        }
    }

    #[test]
    fn crossfire_leaves_from_both_corners() {
        let batch = generate(PatternName::Crossfire, Vec2::new(192.0, 80.0), Vec2::new(192.0, 400.0), 0, &mut rng());
        assert_eq!(batch.len(), 6);
        assert!(batch[..3].iter().all(|b| b.pos == Vec2::ZERO));
        assert!(batch[3..].iter().all(|b| b.pos == Vec2::new(FIELD_WIDTH, 0.0)));
    }

    #[test]
    fn random_pattern_is_reproducible_with_same_seed() {
        let a = generate(PatternName::Random, Vec2::ZERO, Vec2::ONE, 5, &mut Pcg32::seed_from_u64(99));
        let b = generate(PatternName::Random, Vec2::ZERO, Vec2::ONE, 5, &mut Pcg32::seed_from_u64(99));
        assert_eq!(a, b);
        assert!(a.iter().all(|s| (2.0..4.0).contains(&s.speed)));
    }

    #[test]
    fn rain_drops_start_on_top_edge() {
        let mut r = rng();
        let mut fired = 0;
        for tick in 0..40 {
            for spec in generate(PatternName::Rain, Vec2::new(10.0, 10.0), Vec2::ONE, tick, &mut r) {
                fired += 1;
                assert_eq!(spec.pos.y, 0.0);
                assert!((0.0..FIELD_WIDTH).contains(&spec.pos.x));
                assert!((spec.angle - FRAC_PI_2).abs() < 1e-6);
            }
        }
        assert!(fired > 0);
    }

    #[test]
    fn unknown_name_yields_nothing() {
        assert!(generate_named("laser-grid", Vec2::ZERO, Vec2::ONE, 0, &mut rng()).is_empty());
        assert_eq!(generate_named("RADIAL", Vec2::ZERO, Vec2::ONE, 0, &mut rng()).len(), 12);
    }

    #[test]
    fn boss_counts_scale_with_phase() {
        let mut boss = Boss::new(EntityId(1), 1, archetype_for_stage(1));
        // Cirno opens with the spiral: two rings of 6 + 2 * phase arms
        assert_eq!(generate_boss(&boss, Vec2::ONE, 0, &mut rng()).len(), 12);
        boss.phase = 2;
        assert_eq!(generate_boss(&boss, Vec2::ONE, 0, &mut rng()).len(), 20);

        boss.current_pattern = 1; // radial: (2 + phase) rings of 16 + 4r
        boss.phase = 0;
        assert_eq!(generate_boss(&boss, Vec2::ONE, 0, &mut rng()).len(), 16 + 20);

        boss.current_pattern = 2; // aimed barrage: 13 + 4 * phase
        boss.phase = 1;
        let batch = generate_boss(&boss, Vec2::new(192.0, 400.0), 0, &mut rng());
        assert_eq!(batch.len(), 17);
        let centre = batch[8];
        assert!(batch[0].speed > centre.speed);
        assert_eq!(centre.speed, 3.5);
    }

    #[test]
    fn sub_burst_rides_on_every_third_volley() {
        let mut boss = Boss::new(EntityId(1), 3, archetype_for_stage(3));
        boss.phase = 1;
        boss.current_pattern = 0;
        let plain = generate_boss(&boss, Vec2::ONE, 0, &mut rng()).len();
        boss.volleys = 2;
        let with_burst = generate_boss(&boss, Vec2::ONE, 0, &mut rng()).len();
        assert_eq!(with_burst, plain + 2 * (5 + 2));
    }
}
