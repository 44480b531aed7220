//! Particle field rules.
//!
//! Rules define how food particles move each frame. They run on the CPU in a
//! fixed order: velocity rules first, then one integration step
//! (`displacement += velocity * delta`), then position rules.
//!
//! | Stage    | Rules |
//! |----------|-------|
//! | Velocity | [`Rule::PointerPush`], [`Rule::SpeedLimit`], [`Rule::Friction`], [`Rule::Home`] |
//! | Position | [`Rule::Separate`], [`Rule::Bounds`] |
//!
//! Idle floating is not a rule. It is a bounded offset evaluated whenever a
//! position is read (see [`FoodParticle::position`]), so no accumulation of
//! rule output can make an idle particle drift.
//!
//! # Neighbour reads
//!
//! [`Rule::Separate`] reads every other particle's position from a snapshot
//! taken before the pass and writes only to the particle being processed.
//! Both particles of an overlapping pair therefore see the same distance and
//! move apart symmetrically.

use glam::Vec2;

use crate::clock::FrameTime;
use crate::field::FoodParticle;

/// Below this, two positions are treated as coincident.
const EPSILON: f32 = 1e-5;

/// Distance falloff for the pointer push.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Falloff {
    /// Same force anywhere inside the radius.
    Constant,
    /// Force decreases linearly to zero at the radius.
    #[default]
    Linear,
    /// Smoothstep falloff, gentler near the edge.
    Smooth,
}

impl Falloff {
    /// Falloff factor in 0..=1 for a point `dist` away. Zero outside `radius`.
    pub fn factor(&self, dist: f32, radius: f32) -> f32 {
        if radius <= 0.0 || dist >= radius {
            return 0.0;
        }
        let t = (dist / radius).clamp(0.0, 1.0);
        match self {
            Falloff::Constant => 1.0,
            Falloff::Linear => 1.0 - t,
            Falloff::Smooth => 1.0 - t * t * (3.0 - 2.0 * t),
        }
    }
}

/// When a rule runs relative to velocity integration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Velocity,
    Position,
}

/// Pointer state converted to world units for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerWorld {
    pub position: Vec2,
    pub drag: Vec2,
}

/// Read-only inputs shared by every rule during one frame.
pub struct RuleContext<'a> {
    pub frame: FrameTime,
    /// `None` while the pointer is up.
    pub pointer: Option<PointerWorld>,
    /// Idle float amplitude, needed to read rendered positions.
    pub idle_amplitude: f32,
    /// Rendered xy of every particle at the start of the position stage,
    /// indexed like the particle slice.
    pub snapshot: &'a [Vec2],
}

/// Behaviour applied to every particle each frame.
#[derive(Clone, Debug, PartialEq)]
pub enum Rule {
    /// Accelerate particles near a held pointer along the drag direction.
    ///
    /// With no drag yet (pointer just went down) the push points away from
    /// the pointer instead.
    PointerPush {
        radius: f32,
        strength: f32,
        falloff: Falloff,
    },

    /// Clamp velocity magnitude.
    SpeedLimit(f32),

    /// Multiply velocity by a constant factor every frame (0..1).
    Friction(f32),

    /// Spring pulling the displacement back to the base position.
    Home(f32),

    /// Mutual outward nudge for pairs closer than `min_distance`.
    ///
    /// Each particle of a pair moves half of `overlap * strength`, capped at
    /// the overlap, so one pass always widens the gap and never pushes the
    /// pair further apart than `min_distance`.
    Separate { min_distance: f32, strength: f32 },

    /// Keep base + displacement inside `-half_extents..half_extents`.
    ///
    /// The idle offset is added on top, so the default chain passes
    /// [`FieldConfig::travel_extents`](crate::field::FieldConfig::travel_extents)
    /// to keep rendered positions inside the field.
    Bounds { half_extents: Vec2 },
}

impl Rule {
    pub fn stage(&self) -> Stage {
        match self {
            Rule::PointerPush { .. } | Rule::SpeedLimit(_) | Rule::Friction(_) | Rule::Home(_) => {
                Stage::Velocity
            }
            Rule::Separate { .. } | Rule::Bounds { .. } => Stage::Position,
        }
    }

    /// Whether this rule reads other particles' positions.
    pub fn needs_neighbors(&self) -> bool {
        matches!(self, Rule::Separate { .. })
    }

    /// Apply this rule to every particle.
    pub fn apply(&self, particles: &mut [FoodParticle], ctx: &RuleContext<'_>) {
        match self {
            Rule::PointerPush { radius, strength, falloff } => {
                let Some(pointer) = ctx.pointer else {
                    return;
                };
                let drag_dir = pointer.drag.try_normalize();
                for p in particles.iter_mut() {
                    let pos = p.position(ctx.frame.elapsed, ctx.idle_amplitude).truncate();
                    let away = pos - pointer.position;
                    let dist = away.length();
                    let factor = falloff.factor(dist, *radius);
                    if factor <= 0.0 {
                        continue;
                    }
                    let dir = drag_dir
                        .or_else(|| away.try_normalize())
                        .unwrap_or(Vec2::Y);
                    p.velocity += dir * *strength * factor * ctx.frame.delta;
                }
            }

            Rule::SpeedLimit(max) => {
                for p in particles.iter_mut() {
                    p.velocity = p.velocity.clamp_length_max(*max);
                }
            }

            Rule::Friction(factor) => {
                let factor = factor.clamp(0.0, 1.0);
                for p in particles.iter_mut() {
                    p.velocity *= factor;
                }
            }

            Rule::Home(stiffness) => {
                for p in particles.iter_mut() {
                    p.velocity -= p.displacement * *stiffness * ctx.frame.delta;
                }
            }

            Rule::Separate { min_distance, strength } => {
                for (i, p) in particles.iter_mut().enumerate() {
                    p.displacement += separation_nudge(i, ctx.snapshot, *min_distance, *strength);
                }
            }

            Rule::Bounds { half_extents } => {
                for p in particles.iter_mut() {
                    let home = p.base.truncate();
                    let current = home + p.displacement;
                    let clamped = current.clamp(-*half_extents, *half_extents);
                    if clamped.x != current.x {
                        p.velocity.x = 0.0;
                    }
                    if clamped.y != current.y {
                        p.velocity.y = 0.0;
                    }
                    p.displacement = clamped - home;
                }
            }
        }
    }
}

/// Nudge for particle `index` away from every neighbour closer than `min_distance`.
///
/// `snapshot` holds positions in arena order.
pub fn separation_nudge(index: usize, snapshot: &[Vec2], min_distance: f32, strength: f32) -> Vec2 {
    let Some(&me) = snapshot.get(index) else {
        return Vec2::ZERO;
    };
    let mut nudge = Vec2::ZERO;
    for (j, &other) in snapshot.iter().enumerate() {
        if j == index {
            continue;
        }
        let away = me - other;
        let dist = away.length();
        if dist >= min_distance {
            continue;
        }
        let overlap = min_distance - dist;
        let correction = (overlap * strength.max(0.0)).min(overlap);
        let dir = if dist > EPSILON {
            away / dist
        } else {
            tie_break_axis(index, j)
        };
        nudge += dir * correction * 0.5;
    }
    nudge
}

/// Opposite unit vectors for the two members of a coincident pair.
fn tie_break_axis(index: usize, other: usize) -> Vec2 {
    let (lo, hi) = if index < other { (index, other) } else { (other, index) };
    // Golden-angle spread so different pairs split along different axes.
    let angle = lo as f32 * 2.399_963 + hi as f32 * 0.618_034;
    let axis = Vec2::from_angle(angle);
    if index == lo {
        axis
    } else {
        -axis
    }
}

/// The default rule chain for a field with these constants.
pub fn default_rules(config: &crate::field::FieldConfig) -> Vec<Rule> {
    vec![
        Rule::PointerPush {
            radius: config.interaction_radius,
            strength: config.pointer_force,
            falloff: Falloff::Linear,
        },
        Rule::SpeedLimit(config.max_speed),
        Rule::Friction(config.friction),
        Rule::Home(config.home_spring),
        Rule::Separate {
            min_distance: config.min_separation,
            strength: config.push_strength,
        },
        Rule::Bounds {
            half_extents: config.travel_extents(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FoodParticle, ParticleId};
    use glam::Vec3;

    fn particle(id: u32, x: f32, y: f32) -> FoodParticle {
        FoodParticle {
            id: ParticleId(id),
            base: Vec3::new(x, y, 0.0),
            displacement: Vec2::ZERO,
            velocity: Vec2::ZERO,
            speed: 1.0,
            phase: 0.0,
            texture: 0,
        }
    }

    fn ctx<'a>(pointer: Option<PointerWorld>, snapshot: &'a [Vec2]) -> RuleContext<'a> {
        RuleContext {
            frame: FrameTime::new(0.0, 1.0 / 60.0),
            pointer,
            idle_amplitude: 0.0,
            snapshot,
        }
    }

    #[test]
    fn test_linear_falloff() {
        assert_eq!(Falloff::Linear.factor(0.0, 1.0), 1.0);
        assert!((Falloff::Linear.factor(0.25, 1.0) - 0.75).abs() < 1e-6);
        assert_eq!(Falloff::Linear.factor(1.0, 1.0), 0.0);
        assert_eq!(Falloff::Linear.factor(2.0, 1.0), 0.0);
        assert_eq!(Falloff::Constant.factor(0.5, 0.0), 0.0);
    }

    #[test]
    fn test_smooth_falloff_is_monotonic() {
        let mut last = f32::MAX;
        for i in 0..10 {
            let f = Falloff::Smooth.factor(i as f32 * 0.1, 1.0);
            assert!(f <= last);
            last = f;
        }
    }

    #[test]
    fn test_stages() {
        assert_eq!(Rule::Friction(0.9).stage(), Stage::Velocity);
        assert_eq!(Rule::Bounds { half_extents: Vec2::ONE }.stage(), Stage::Position);
        assert!(Rule::Separate { min_distance: 1.0, strength: 0.5 }.needs_neighbors());
        assert!(!Rule::SpeedLimit(1.0).needs_neighbors());
    }

    #[test]
    fn test_pointer_push_follows_drag() {
        let mut particles = vec![particle(0, 0.1, 0.0)];
        let pointer = PointerWorld {
            position: Vec2::ZERO,
            drag: Vec2::new(0.0, 2.0),
        };
        let rule = Rule::PointerPush { radius: 0.8, strength: 9.0, falloff: Falloff::Linear };
        rule.apply(&mut particles, &ctx(Some(pointer), &[]));

        let v = particles[0].velocity;
        assert!(v.y > 0.0);
        assert!(v.x.abs() < 1e-6);
    }

    #[test]
    fn test_pointer_push_without_drag_repels() {
        let mut particles = vec![particle(0, -0.3, 0.0)];
        let pointer = PointerWorld { position: Vec2::ZERO, drag: Vec2::ZERO };
        let rule = Rule::PointerPush { radius: 0.8, strength: 9.0, falloff: Falloff::Linear };
        rule.apply(&mut particles, &ctx(Some(pointer), &[]));
        assert!(particles[0].velocity.x < 0.0);
    }

    #[test]
    fn test_pointer_push_ignores_far_and_idle() {
        let rule = Rule::PointerPush { radius: 0.8, strength: 9.0, falloff: Falloff::Linear };
        let mut particles = vec![particle(0, 3.0, 0.0)];
        let pointer = PointerWorld { position: Vec2::ZERO, drag: Vec2::X };
        rule.apply(&mut particles, &ctx(Some(pointer), &[]));
        assert_eq!(particles[0].velocity, Vec2::ZERO);

        let mut near = vec![particle(0, 0.1, 0.0)];
        rule.apply(&mut near, &ctx(None, &[]));
        assert_eq!(near[0].velocity, Vec2::ZERO);
    }

    #[test]
    fn test_speed_limit_and_friction() {
        let mut particles = vec![particle(0, 0.0, 0.0)];
        particles[0].velocity = Vec2::new(30.0, 40.0);

        Rule::SpeedLimit(5.0).apply(&mut particles, &ctx(None, &[]));
        assert!((particles[0].velocity.length() - 5.0).abs() < 1e-4);

        Rule::Friction(0.5).apply(&mut particles, &ctx(None, &[]));
        assert!((particles[0].velocity.length() - 2.5).abs() < 1e-4);
    }

    #[test]
    fn test_home_pulls_back() {
        let mut particles = vec![particle(0, 0.0, 0.0)];
        particles[0].displacement = Vec2::new(1.0, 0.0);
        Rule::Home(0.6).apply(&mut particles, &ctx(None, &[]));
        assert!(particles[0].velocity.x < 0.0);
    }

    #[test]
    fn test_bounds_clamp_and_stop() {
        let mut particles = vec![particle(0, 3.5, 0.0)];
        particles[0].displacement = Vec2::new(2.0, 0.0);
        particles[0].velocity = Vec2::new(1.0, 1.0);

        Rule::Bounds { half_extents: Vec2::new(4.0, 3.0) }.apply(&mut particles, &ctx(None, &[]));

        assert!((particles[0].base.x + particles[0].displacement.x - 4.0).abs() < 1e-6);
        assert_eq!(particles[0].velocity.x, 0.0);
        assert_eq!(particles[0].velocity.y, 1.0);
    }

    #[test]
    fn test_separation_nudges_are_opposite() {
        let snapshot = [Vec2::new(0.0, 0.0), Vec2::new(0.5, 0.0)];
        let a = separation_nudge(0, &snapshot, 0.9, 0.5);
        let b = separation_nudge(1, &snapshot, 0.9, 0.5);

        assert!(a.x < 0.0 && b.x > 0.0);
        assert!((a + b).length() < 1e-6);
        // overlap 0.4 * strength 0.5, split in half
        assert!((a.length() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_separation_splits_coincident_pair() {
        let snapshot = [Vec2::ZERO, Vec2::ZERO];
        let a = separation_nudge(0, &snapshot, 0.9, 0.5);
        let b = separation_nudge(1, &snapshot, 0.9, 0.5);
        assert!(a.length() > 0.0);
        assert!((a + b).length() < 1e-6);
    }

    #[test]
    fn test_separation_ignores_distant() {
        let snapshot = [Vec2::ZERO, Vec2::new(2.0, 0.0)];
        assert_eq!(separation_nudge(0, &snapshot, 0.9, 0.5), Vec2::ZERO);
    }
}
