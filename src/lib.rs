//! # Tree Bites
//!
//! Campus leftover-food sharing: a floating food particle field, a static
//! catalog of food events and the club join form.
//!
//! ## Particle field
//!
//! A handful of food icons float around their home positions. Pressing and
//! dragging pushes nearby icons along the drag, friction settles them, a soft
//! spring brings them home and a pairwise separation pass keeps them from
//! overlapping.
//!
//! ```
//! use treebites::prelude::*;
//!
//! let mut field = ParticleField::new(FieldConfig::default(), 3, 7);
//! let mut pointer = PointerState::new();
//! pointer.press(Vec2::new(0.0, 0.0));
//! pointer.move_to(Vec2::new(0.2, 0.0));
//!
//! let mut frame = FrameTime::default();
//! for _ in 0..60 {
//!     frame = frame.advance(1.0 / 60.0);
//!     field.update(&pointer, frame);
//! }
//! assert_eq!(field.render_items().len(), 9);
//! ```
//!
//! Rules run in two stages each frame: velocity rules, integration, then
//! position rules. See [`Rule`] for the full list.
//!
//! ## Catalog
//!
//! [`catalog::filter_events`] selects events by search text and category.
//! [`catalog::map`] places them on a tiled or static map.
//!
//! ## Join form
//!
//! [`form::JoinForm::submit`] validates, posts to a [`form::FormEndpoint`] and
//! reports through a [`form::Notifier`].

pub mod catalog;
pub mod clock;
pub mod config;
pub mod error;
pub mod field;
pub mod form;
mod gpu;
pub mod input;
pub mod logging;
pub mod rules;
pub mod spawn;
pub mod textures;
pub mod window;

pub use clock::{FrameClock, FrameTime};
pub use config::Config;
pub use error::{AppError, ConfigError, FormError, GpuError, SubmitError, TextureError, ValidationError};
pub use field::{FieldConfig, FoodParticle, ParticleField, ParticleId, RenderItem, MAX_PARTICLES};
pub use glam::{Vec2, Vec3};
pub use gpu::{draw_runs, view_projection};
pub use input::PointerState;
pub use rules::{Falloff, Rule};
pub use textures::{FilterMode, FoodTexture};

/// Convenient imports.
pub mod prelude {
    pub use crate::catalog::{filter_events, sample_events, EventQuery, FoodEvent};
    pub use crate::clock::{FrameClock, FrameTime};
    pub use crate::config::Config;
    pub use crate::field::{FieldConfig, ParticleField};
    pub use crate::form::{FormEndpoint, JoinForm, Notifier};
    pub use crate::input::PointerState;
    pub use crate::rules::{Falloff, Rule};
    pub use glam::{Vec2, Vec3};
}
