//! Pointer tracking for the repulsion field.
//!
//! Translates raw window events into the state the simulation consults each
//! tick: the last-known cursor position (if the cursor is over the surface)
//! and the interaction radius, which scales with surface area and grows
//! while a button is held.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, WindowEvent};

use crate::field::Bounds;

/// Factor applied to the interaction radius while a button is held.
pub const PRESS_SCALE: f32 = 1.25;

/// Last-known pointer position and interaction radius.
///
/// Position is `Some` only while the cursor is over the surface; both
/// coordinates always appear or vanish together.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerState {
    position: Option<Vec2>,
    radius: f32,
    pressed: bool,
}

impl PointerState {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            position: None,
            radius: Self::interaction_radius(bounds),
            pressed: false,
        }
    }

    /// Interaction radius for a surface: `(width/100) * (height/100)`.
    pub fn interaction_radius(bounds: Bounds) -> f32 {
        (bounds.width / 100.0) * (bounds.height / 100.0)
    }

    /// Engaged pointer position, if the cursor is over the surface.
    pub fn position(&self) -> Option<Vec2> {
        self.position
    }

    /// Current interaction radius in pixels.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Record a pointer move in surface-local pixels.
    pub fn on_move(&mut self, x: f32, y: f32) {
        self.position = Some(Vec2::new(x, y));
    }

    /// The cursor left the surface: interaction is disabled until the next
    /// move.
    pub fn on_leave(&mut self) {
        self.position = None;
    }

    /// A button went down: widen the repulsion zone. Repeat press events
    /// without a release in between do not stack.
    pub fn on_press(&mut self) {
        if !self.pressed {
            self.pressed = true;
            self.radius *= PRESS_SCALE;
        }
    }

    /// The button came back up: restore the radius from current bounds.
    pub fn on_release(&mut self, bounds: Bounds) {
        self.pressed = false;
        self.radius = Self::interaction_radius(bounds);
    }

    /// The surface changed size: recompute the radius. Matches the source
    /// behavior of dropping any in-flight press scaling.
    pub fn on_resize(&mut self, bounds: Bounds) {
        self.pressed = false;
        self.radius = Self::interaction_radius(bounds);
    }

    /// Route a winit window event into the pointer state.
    pub(crate) fn handle_event(&mut self, event: &WindowEvent, bounds: Bounds) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.on_move(position.x as f32, position.y as f32);
            }
            WindowEvent::CursorLeft { .. } => {
                self.on_leave();
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if *button == MouseButton::Left {
                    match state {
                        ElementState::Pressed => self.on_press(),
                        ElementState::Released => self.on_release(bounds),
                    }
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Bounds = Bounds {
        width: 1000.0,
        height: 500.0,
    };

    #[test]
    fn test_radius_from_bounds() {
        assert_eq!(PointerState::interaction_radius(BOUNDS), 50.0);
        assert_eq!(
            PointerState::interaction_radius(Bounds::new(0.0, 500.0)),
            0.0
        );
    }

    #[test]
    fn test_move_and_leave() {
        let mut pointer = PointerState::new(BOUNDS);
        assert!(pointer.position().is_none());

        pointer.on_move(10.0, 20.0);
        assert_eq!(pointer.position(), Some(Vec2::new(10.0, 20.0)));

        pointer.on_leave();
        assert!(pointer.position().is_none());
    }

    #[test]
    fn test_press_scales_once() {
        let mut pointer = PointerState::new(BOUNDS);
        pointer.on_press();
        assert!((pointer.radius() - 62.5).abs() < 0.001);

        // A repeated press without a release does not stack.
        pointer.on_press();
        assert!((pointer.radius() - 62.5).abs() < 0.001);

        pointer.on_release(BOUNDS);
        assert_eq!(pointer.radius(), 50.0);
    }

    #[test]
    fn test_resize_recomputes_radius() {
        let mut pointer = PointerState::new(BOUNDS);
        pointer.on_press();
        pointer.on_resize(Bounds::new(2000.0, 500.0));
        assert_eq!(pointer.radius(), 100.0);

        // A fresh press after the resize scales again.
        pointer.on_press();
        assert!((pointer.radius() - 125.0).abs() < 0.001);
    }
}
