//! Pointer input for the particle field.
//!
//! [`PointerState`] is the single record every particle reads during a frame.
//! Input events are the only writer, and they are applied between frames, so
//! the field borrows it immutably for the whole update.
//!
//! Positions are normalized device coordinates: origin at the window centre,
//! x to the right, y up, both in -1..1. The field maps them to world units
//! through the inverse of the view-projection the quads are drawn with.
//!
//! # Usage
//!
//! ```ignore
//! // in the window event handler
//! pointer.handle_event(&event);
//!
//! // once per frame
//! field.update(&pointer, frame);
//! pointer.begin_frame();
//! ```

use glam::Vec2;
use winit::event::{ElementState, MouseButton, Touch, TouchPhase, WindowEvent};

/// Pointer drag state shared by all particles for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerState {
    down: bool,
    position: Vec2,
    origin: Vec2,
    pressed_this_frame: bool,
    released_this_frame: bool,
    // Finger driving the drag, so a second touch doesn't hijack it.
    active_touch: Option<u64>,
    window_size: (u32, u32),
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerState {
    pub fn new() -> Self {
        Self {
            down: false,
            position: Vec2::ZERO,
            origin: Vec2::ZERO,
            pressed_this_frame: false,
            released_this_frame: false,
            active_touch: None,
            window_size: (800, 600),
        }
    }

    // ========== Queries ==========

    /// Whether the pointer is currently held down.
    pub fn is_down(&self) -> bool {
        self.down
    }

    /// Last known pointer position in NDC.
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Where the current drag started. Meaningless while idle.
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Offset from the press point to the current point, zero while idle.
    pub fn drag(&self) -> Vec2 {
        if self.down {
            self.position - self.origin
        } else {
            Vec2::ZERO
        }
    }

    pub fn pressed_this_frame(&self) -> bool {
        self.pressed_this_frame
    }

    pub fn released_this_frame(&self) -> bool {
        self.released_this_frame
    }

    // ========== Writers ==========

    /// Pointer went down at `position`. Starts a new drag.
    pub fn press(&mut self, position: Vec2) {
        self.position = position;
        self.origin = position;
        self.down = true;
        self.pressed_this_frame = true;
    }

    /// Pointer moved. Extends the drag when held.
    pub fn move_to(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Pointer went up. The drag vector resets to zero.
    pub fn release(&mut self) {
        if self.down {
            self.released_this_frame = true;
        }
        self.down = false;
        self.active_touch = None;
    }

    /// Pointer left the window or the touch was interrupted.
    pub fn cancel(&mut self) {
        self.down = false;
        self.active_touch = None;
        self.origin = self.position;
    }

    /// Clear per-frame flags. Call after the field has read this frame's state.
    pub fn begin_frame(&mut self) {
        self.pressed_this_frame = false;
        self.released_this_frame = false;
    }

    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
    }

    /// Convert a physical pixel position to NDC. Y is flipped.
    pub fn to_ndc(&self, x: f64, y: f64) -> Vec2 {
        let (w, h) = self.window_size;
        if w == 0 || h == 0 {
            return Vec2::ZERO;
        }
        Vec2::new(
            (x as f32 / w as f32) * 2.0 - 1.0,
            1.0 - (y as f32 / h as f32) * 2.0,
        )
    }

    /// Apply a winit window event. Returns `true` if the event touched the pointer.
    pub fn handle_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let ndc = self.to_ndc(position.x, position.y);
                self.move_to(ndc);
                true
            }

            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                match state {
                    ElementState::Pressed => self.press(self.position),
                    ElementState::Released => self.release(),
                }
                true
            }

            WindowEvent::CursorLeft { .. } => {
                self.cancel();
                true
            }

            WindowEvent::Touch(touch) => self.handle_touch(touch),

            WindowEvent::Resized(size) => {
                self.set_window_size(size.width, size.height);
                false
            }

            _ => false,
        }
    }

    fn handle_touch(&mut self, touch: &Touch) -> bool {
        let ndc = self.to_ndc(touch.location.x, touch.location.y);
        match touch.phase {
            TouchPhase::Started => {
                if self.active_touch.is_some() {
                    return false;
                }
                self.active_touch = Some(touch.id);
                self.press(ndc);
            }
            _ if self.active_touch != Some(touch.id) => return false,
            TouchPhase::Moved => self.move_to(ndc),
            TouchPhase::Ended => {
                self.move_to(ndc);
                self.release();
            }
            TouchPhase::Cancelled => self.cancel(),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_has_no_drag() {
        let mut pointer = PointerState::new();
        pointer.move_to(Vec2::new(0.5, 0.5));
        assert!(!pointer.is_down());
        assert_eq!(pointer.drag(), Vec2::ZERO);
    }

    #[test]
    fn test_drag_vector_tracks_offset_from_press() {
        let mut pointer = PointerState::new();
        pointer.press(Vec2::new(0.1, 0.2));
        pointer.move_to(Vec2::new(0.4, -0.1));

        let drag = pointer.drag();
        assert!((drag.x - 0.3).abs() < 1e-6);
        assert!((drag.y + 0.3).abs() < 1e-6);
        assert!(pointer.pressed_this_frame());

        pointer.begin_frame();
        assert!(!pointer.pressed_this_frame());
        assert!(pointer.is_down());
    }

    #[test]
    fn test_release_and_cancel_end_the_drag() {
        let mut pointer = PointerState::new();
        pointer.press(Vec2::ZERO);
        pointer.move_to(Vec2::ONE);
        pointer.release();
        assert!(pointer.released_this_frame());
        assert_eq!(pointer.drag(), Vec2::ZERO);

        pointer.press(Vec2::ZERO);
        pointer.begin_frame();
        pointer.cancel();
        assert!(!pointer.is_down());
        assert!(!pointer.released_this_frame());
    }

    #[test]
    fn test_to_ndc() {
        let mut pointer = PointerState::new();
        pointer.set_window_size(800, 600);

        let centre = pointer.to_ndc(400.0, 300.0);
        assert!(centre.x.abs() < 1e-6 && centre.y.abs() < 1e-6);

        let top_left = pointer.to_ndc(0.0, 0.0);
        assert_eq!(top_left, Vec2::new(-1.0, 1.0));
    }

    #[test]
    fn test_zero_sized_window_maps_to_origin() {
        let mut pointer = PointerState::new();
        pointer.set_window_size(0, 0);
        assert_eq!(pointer.to_ndc(10.0, 10.0), Vec2::ZERO);
    }
}
