//! The floating food particle field.
//!
//! A small arena of [`FoodParticle`]s (at most [`MAX_PARTICLES`]) updated once
//! per frame by an ordered list of [`Rule`]s. Every particle owns its own
//! displacement and velocity; neighbour positions are read from a snapshot
//! rebuilt each frame.
//!
//! # Example
//!
//! ```
//! use treebites::prelude::*;
//!
//! let mut field = ParticleField::new(FieldConfig::default(), 3, 7);
//! let pointer = PointerState::new();
//! let mut frame = FrameTime::default();
//!
//! for _ in 0..60 {
//!     frame = frame.advance(1.0 / 60.0);
//!     field.update(&pointer, frame);
//! }
//! ```

use glam::{Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::clock::FrameTime;
use crate::input::PointerState;
use crate::rules::{default_rules, PointerWorld, Rule, RuleContext, Stage};
use crate::spawn::Spawner;

/// Upper bound on mounted particles. Separation is O(n^2).
pub const MAX_PARTICLES: usize = 30;

/// Stable handle to a mounted particle. Never reused within a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(pub u32);

/// One floating food icon.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodParticle {
    pub id: ParticleId,
    /// Home position. z only orders the quads.
    pub base: Vec3,
    /// Offset from `base` built up by pointer pushes and separation.
    pub displacement: Vec2,
    pub velocity: Vec2,
    /// Idle float angular speed, radians per second.
    pub speed: f32,
    /// Idle float phase, radians.
    pub phase: f32,
    /// Index into the field's texture list.
    pub texture: usize,
}

impl FoodParticle {
    /// Bounded idle offset: a circle of radius `amplitude` around the base.
    #[inline]
    pub fn idle_offset(&self, elapsed: f32, amplitude: f32) -> Vec2 {
        let angle = elapsed * self.speed + self.phase;
        Vec2::new(angle.cos(), angle.sin()) * amplitude
    }

    /// Rendered position at time `elapsed`.
    #[inline]
    pub fn position(&self, elapsed: f32, amplitude: f32) -> Vec3 {
        let xy = self.base.truncate() + self.displacement + self.idle_offset(elapsed, amplitude);
        xy.extend(self.base.z)
    }

    /// Gentle z-rotation wobble, bounded by `max_wobble`.
    #[inline]
    pub fn rotation(&self, elapsed: f32, max_wobble: f32) -> f32 {
        (elapsed * self.speed).sin() * max_wobble
    }
}

/// Tunable constants for the field. World units and seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub count: usize,
    pub half_width: f32,
    pub half_height: f32,
    pub depth: f32,
    pub quad_size: f32,
    pub idle_amplitude: f32,
    pub float_speed_min: f32,
    pub float_speed_max: f32,
    pub max_wobble: f32,
    pub interaction_radius: f32,
    pub pointer_force: f32,
    pub max_speed: f32,
    pub min_separation: f32,
    pub push_strength: f32,
    pub friction: f32,
    pub home_spring: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            count: 9,
            half_width: 4.0,
            half_height: 3.0,
            depth: 0.2,
            quad_size: 0.8,
            idle_amplitude: 0.12,
            float_speed_min: 1.0,
            float_speed_max: 3.0,
            max_wobble: 0.15,
            interaction_radius: 0.8,
            pointer_force: 9.0,
            max_speed: 2.5,
            min_separation: 0.9,
            push_strength: 0.5,
            friction: 0.92,
            home_spring: 0.6,
        }
    }
}

impl FieldConfig {
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.half_width, self.half_height)
    }

    /// Box for base + displacement. Leaves room for the idle float so the
    /// rendered position stays inside [`half_extents`](Self::half_extents).
    pub fn travel_extents(&self) -> Vec2 {
        (self.half_extents() - Vec2::splat(self.idle_amplitude)).max(Vec2::ZERO)
    }

    /// Copy with every value forced into a usable range.
    pub fn sanitized(&self) -> Self {
        let mut c = self.clone();
        c.count = c.count.clamp(1, MAX_PARTICLES);
        c.half_width = c.half_width.max(0.1);
        c.half_height = c.half_height.max(0.1);
        c.depth = c.depth.max(0.0);
        c.quad_size = c.quad_size.max(0.01);
        c.idle_amplitude = c.idle_amplitude.max(0.0);
        c.float_speed_min = c.float_speed_min.max(0.0);
        c.float_speed_max = c.float_speed_max.max(c.float_speed_min);
        c.interaction_radius = c.interaction_radius.max(0.0);
        c.max_speed = c.max_speed.max(0.0);
        c.min_separation = c.min_separation.max(0.0);
        c.push_strength = c.push_strength.clamp(0.0, 1.0);
        c.friction = c.friction.clamp(0.0, 1.0);
        c.home_spring = c.home_spring.max(0.0);
        c
    }
}

/// Item handed to the renderer for one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderItem {
    pub position: Vec3,
    pub rotation: f32,
    pub size: f32,
    pub texture: usize,
}

/// Arena of food particles plus the rules that move them.
pub struct ParticleField {
    config: FieldConfig,
    rules: Vec<Rule>,
    particles: Vec<FoodParticle>,
    snapshot: Vec<Vec2>,
    spawner: Spawner,
    next_id: u32,
    elapsed: f32,
    /// Inverse of the renderer's view-projection: NDC to world.
    screen_to_world: Mat4,
}

impl ParticleField {
    /// Spawn `config.count` particles cycling through `texture_count` textures.
    pub fn new(config: FieldConfig, texture_count: usize, seed: u64) -> Self {
        let config = config.sanitized();
        let rules = default_rules(&config);
        let screen_to_world = Mat4::from_scale(config.half_extents().extend(1.0));
        let mut field = Self {
            spawner: Spawner::new(seed, texture_count),
            config,
            rules,
            particles: Vec::with_capacity(MAX_PARTICLES),
            snapshot: Vec::with_capacity(MAX_PARTICLES),
            next_id: 0,
            elapsed: 0.0,
            screen_to_world,
        };
        for _ in 0..field.config.count {
            field.spawn();
        }
        tracing::debug!(count = field.particles.len(), seed, "particle field spawned");
        field
    }

    /// Build a field from explicit particles (ids are reassigned).
    pub fn from_particles(config: FieldConfig, particles: impl IntoIterator<Item = FoodParticle>) -> Self {
        let config = config.sanitized();
        let rules = default_rules(&config);
        let screen_to_world = Mat4::from_scale(config.half_extents().extend(1.0));
        let mut field = Self {
            spawner: Spawner::new(0, 1),
            config,
            rules,
            particles: Vec::with_capacity(MAX_PARTICLES),
            snapshot: Vec::with_capacity(MAX_PARTICLES),
            next_id: 0,
            elapsed: 0.0,
            screen_to_world,
        };
        for p in particles {
            field.mount(p);
        }
        field
    }

    /// Replace the rule chain.
    pub fn with_rules(mut self, rules: Vec<Rule>) -> Self {
        self.rules = rules;
        self
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn particles(&self) -> &[FoodParticle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Time of the last update.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn get(&self, id: ParticleId) -> Option<&FoodParticle> {
        self.particles.iter().find(|p| p.id == id)
    }

    /// Rendered position of a particle at the last update.
    pub fn position(&self, id: ParticleId) -> Option<Vec3> {
        self.get(id)
            .map(|p| p.position(self.elapsed, self.config.idle_amplitude))
    }

    /// Spawn one more particle at a random home. `None` when full.
    pub fn spawn(&mut self) -> Option<ParticleId> {
        if self.particles.len() >= MAX_PARTICLES {
            return None;
        }
        let index = self.next_id as usize;
        let particle = self.spawner.spawn(index, &self.config);
        Some(self.mount(particle))
    }

    /// Add a particle to the arena. `None` when full.
    pub fn spawn_particle(&mut self, particle: FoodParticle) -> Option<ParticleId> {
        if self.particles.len() >= MAX_PARTICLES {
            return None;
        }
        Some(self.mount(particle))
    }

    fn mount(&mut self, mut particle: FoodParticle) -> ParticleId {
        let id = ParticleId(self.next_id);
        self.next_id += 1;
        particle.id = id;
        self.particles.push(particle);
        id
    }

    /// Unmount a particle. It no longer takes part in separation.
    pub fn remove(&mut self, id: ParticleId) -> Option<FoodParticle> {
        let index = self.particles.iter().position(|p| p.id == id)?;
        Some(self.particles.remove(index))
    }

    /// Match pointer mapping to the projection the field is drawn with.
    ///
    /// Call again whenever the surface is resized. Until then NDC is scaled
    /// straight onto the bounds.
    pub fn set_view_projection(&mut self, view_proj: Mat4) {
        self.screen_to_world = view_proj.inverse();
    }

    /// Pointer position and drag in world units, if the pointer is down.
    pub fn pointer_world(&self, pointer: &PointerState) -> Option<PointerWorld> {
        if !pointer.is_down() {
            return None;
        }
        let position = self.screen_to_world.transform_point3(pointer.position().extend(0.0));
        let drag = self.screen_to_world.transform_vector3(pointer.drag().extend(0.0));
        Some(PointerWorld {
            position: position.truncate(),
            drag: drag.truncate(),
        })
    }

    /// Advance one frame.
    pub fn update(&mut self, pointer: &PointerState, frame: FrameTime) {
        self.elapsed = frame.elapsed;
        let pointer = self.pointer_world(pointer);

        for rule in self.rules.iter().filter(|r| r.stage() == Stage::Velocity) {
            let ctx = RuleContext {
                frame,
                pointer,
                idle_amplitude: self.config.idle_amplitude,
                snapshot: &[],
            };
            rule.apply(&mut self.particles, &ctx);
        }

        for p in self.particles.iter_mut() {
            p.displacement += p.velocity * frame.delta;
        }

        for rule in self.rules.iter().filter(|r| r.stage() == Stage::Position) {
            if rule.needs_neighbors() {
                take_snapshot(&self.particles, self.elapsed, self.config.idle_amplitude, &mut self.snapshot);
            }
            let ctx = RuleContext {
                frame,
                pointer,
                idle_amplitude: self.config.idle_amplitude,
                snapshot: &self.snapshot,
            };
            rule.apply(&mut self.particles, &ctx);
        }
    }

    /// Run only the separation rules once, at the time of the last update.
    pub fn resolve_overlaps(&mut self) {
        take_snapshot(&self.particles, self.elapsed, self.config.idle_amplitude, &mut self.snapshot);
        let ctx = RuleContext {
            frame: FrameTime::new(self.elapsed, 0.0),
            pointer: None,
            idle_amplitude: self.config.idle_amplitude,
            snapshot: &self.snapshot,
        };
        for rule in self.rules.iter().filter(|r| r.needs_neighbors()) {
            rule.apply(&mut self.particles, &ctx);
        }
    }

    /// What to draw this frame, back to front.
    pub fn render_items(&self) -> Vec<RenderItem> {
        let mut items: Vec<RenderItem> = self
            .particles
            .iter()
            .map(|p| RenderItem {
                position: p.position(self.elapsed, self.config.idle_amplitude),
                rotation: p.rotation(self.elapsed, self.config.max_wobble),
                size: self.config.quad_size,
                texture: p.texture,
            })
            .collect();
        items.sort_by(|a, b| a.position.z.total_cmp(&b.position.z));
        items
    }
}

fn take_snapshot(particles: &[FoodParticle], elapsed: f32, amplitude: f32, out: &mut Vec<Vec2>) {
    out.clear();
    out.extend(particles.iter().map(|p| p.position(elapsed, amplitude).truncate()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn still(x: f32, y: f32) -> FoodParticle {
        FoodParticle {
            id: ParticleId(0),
            base: Vec3::new(x, y, 0.0),
            displacement: Vec2::ZERO,
            velocity: Vec2::ZERO,
            speed: 1.0,
            phase: 0.0,
            texture: 0,
        }
    }

    #[test]
    fn test_new_spawns_configured_count() {
        let field = ParticleField::new(FieldConfig::default(), 3, 1);
        assert_eq!(field.len(), 9);
        assert!(field.particles().iter().all(|p| p.texture < 3));
    }

    #[test]
    fn test_count_is_clamped() {
        let config = FieldConfig { count: 500, ..Default::default() };
        let field = ParticleField::new(config, 3, 1);
        assert_eq!(field.len(), MAX_PARTICLES);

        let config = FieldConfig { count: 0, ..Default::default() };
        assert_eq!(ParticleField::new(config, 3, 1).len(), 1);
    }

    #[test]
    fn test_spawn_stops_at_capacity() {
        let config = FieldConfig { count: MAX_PARTICLES, ..Default::default() };
        let mut field = ParticleField::new(config, 3, 1);
        assert!(field.spawn().is_none());
        assert!(field.spawn_particle(still(0.0, 0.0)).is_none());
    }

    #[test]
    fn test_ids_are_unique_and_not_reused() {
        let mut field = ParticleField::from_particles(FieldConfig::default(), vec![still(0.0, 0.0), still(2.0, 0.0)]);
        let first = field.particles()[0].id;
        assert!(field.remove(first).is_some());
        let new_id = field.spawn_particle(still(-2.0, 0.0)).unwrap();
        assert_ne!(new_id, first);
        assert!(field.remove(first).is_none());
    }

    #[test]
    fn test_removed_particle_no_longer_repels() {
        let mut field = ParticleField::from_particles(FieldConfig::default(), vec![still(0.0, 0.0), still(0.3, 0.0)]);
        let ids: Vec<_> = field.particles().iter().map(|p| p.id).collect();
        field.remove(ids[1]);

        field.resolve_overlaps();
        assert_eq!(field.particles()[0].displacement, Vec2::ZERO);
    }

    #[test]
    fn test_pointer_world_scales_by_bounds() {
        let field = ParticleField::new(FieldConfig::default(), 1, 1);
        let mut pointer = PointerState::new();
        assert!(field.pointer_world(&pointer).is_none());

        pointer.press(Vec2::new(0.5, 0.5));
        pointer.move_to(Vec2::new(1.0, 0.5));
        let world = field.pointer_world(&pointer).unwrap();
        assert_eq!(world.position, Vec2::new(4.0, 1.5));
        assert_eq!(world.drag, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn test_pointer_world_follows_view_projection() {
        let config = FieldConfig::default();
        let view_proj = crate::gpu::view_projection(config.half_extents(), 0.4, 1280, 720);
        let mut field = ParticleField::new(config, 1, 1);
        field.set_view_projection(view_proj);

        let to_ndc = |p: Vec2| view_proj.project_point3(p.extend(0.0)).truncate();
        let start = Vec2::new(5.44, 1.7);
        let end = Vec2::new(4.0, -1.0);

        let mut pointer = PointerState::new();
        pointer.press(to_ndc(start));
        pointer.move_to(to_ndc(end));
        let world = field.pointer_world(&pointer).unwrap();
        assert!((world.position - end).length() < 1e-4, "{:?}", world.position);
        assert!((world.drag - (end - start)).length() < 1e-4, "{:?}", world.drag);
    }

    #[test]
    fn test_drag_moves_nearby_particle_then_settles() {
        let mut field = ParticleField::from_particles(FieldConfig::default(), vec![still(0.0, 0.0)]);
        let id = field.particles()[0].id;
        let mut pointer = PointerState::new();
        pointer.press(Vec2::ZERO);
        pointer.move_to(Vec2::new(0.05, 0.0));

        let mut frame = FrameTime::default();
        for _ in 0..10 {
            frame = frame.advance(1.0 / 60.0);
            field.update(&pointer, frame);
        }
        let pushed = field.get(id).unwrap().displacement;
        assert!(pushed.x > 0.0);
        assert!(field.get(id).unwrap().velocity.length() <= field.config().max_speed + 1e-4);

        pointer.release();
        for _ in 0..600 {
            frame = frame.advance(1.0 / 60.0);
            field.update(&pointer, frame);
        }
        assert!(field.get(id).unwrap().velocity.length() < 0.05);
    }

    #[test]
    fn test_render_items_sorted_by_depth() {
        let mut a = still(0.0, 0.0);
        a.base.z = 0.1;
        let mut b = still(2.0, 0.0);
        b.base.z = -0.1;
        let field = ParticleField::from_particles(FieldConfig::default(), vec![a, b]);
        let items = field.render_items();
        assert!(items[0].position.z <= items[1].position.z);
    }

    #[test]
    fn test_rotation_is_bounded() {
        let p = still(0.0, 0.0);
        for i in 0..100 {
            assert!(p.rotation(i as f32 * 0.37, 0.15).abs() <= 0.15 + 1e-6);
        }
    }

    #[test]
    fn test_sanitized_ranges() {
        let config = FieldConfig {
            friction: 3.0,
            push_strength: -1.0,
            float_speed_min: 2.0,
            float_speed_max: 1.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(config.friction, 1.0);
        assert_eq!(config.push_strength, 0.0);
        assert_eq!(config.float_speed_max, 2.0);
    }
}
