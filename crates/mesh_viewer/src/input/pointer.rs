//! Pointer state and events
//!
//! Screen positions are in pixels with the origin at the bottom-left of the
//! viewport (x right, y up). Window systems usually report top-left origin
//! coordinates; use [`PointerState::from_top_left`] to convert them.

use serde::{Serialize, Deserialize};

use crate::foundation::math::Vec2;

/// Pointer buttons that can start a grab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerButton {
    /// Primary button
    Left,
    /// Secondary button
    Right,
    /// Wheel button
    Middle,
}

/// Pointer events delivered by the input layer, in arrival order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Button pressed over the viewport
    Down {
        /// Screen position in pixels
        position: Vec2,
        /// Button, when the input layer reports one
        button: Option<PointerButton>,
    },
    /// Pointer moved while a button is held
    Drag {
        /// Screen position in pixels
        position: Vec2,
    },
}

impl PointerEvent {
    /// Screen position carried by the event
    pub fn position(&self) -> Vec2 {
        match self {
            Self::Down { position, .. } | Self::Drag { position } => *position,
        }
    }
}

/// Pointer state for a viewport
#[derive(Debug, Clone)]
pub struct PointerState {
    /// Current screen position (pixels, bottom-left origin)
    pub position: Vec2,
    /// Viewport width in pixels
    pub viewport_width: u32,
    /// Viewport height in pixels
    pub viewport_height: u32,
    /// Button currently held, if any
    pub held: Option<PointerButton>,
}

impl PointerState {
    /// Create a new pointer state for a viewport
    pub fn new(viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            position: Vec2::zeros(),
            viewport_width,
            viewport_height,
            held: None,
        }
    }

    /// Convert a top-left origin window position to viewport coordinates
    pub fn from_top_left(&self, x: f64, y: f64) -> Vec2 {
        Vec2::new(x as f32, self.viewport_height as f32 - y as f32)
    }

    /// Record a button press at a top-left origin window position
    pub fn press(&mut self, x: f64, y: f64, button: PointerButton) -> PointerEvent {
        self.position = self.from_top_left(x, y);
        self.held = Some(button);
        PointerEvent::Down {
            position: self.position,
            button: Some(button),
        }
    }

    /// Record pointer motion; only produces a drag while a button is held
    pub fn motion(&mut self, x: f64, y: f64) -> Option<PointerEvent> {
        self.position = self.from_top_left(x, y);
        self.held.map(|_| PointerEvent::Drag {
            position: self.position,
        })
    }

    /// Record a button release
    pub fn release(&mut self) {
        self.held = None;
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new(1280, 720)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_left_conversion_flips_y() {
        let pointer = PointerState::new(800, 600);
        assert_eq!(pointer.from_top_left(0.0, 0.0), Vec2::new(0.0, 600.0));
        assert_eq!(pointer.from_top_left(100.0, 600.0), Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_motion_only_drags_while_held() {
        let mut pointer = PointerState::new(800, 600);
        assert!(pointer.motion(10.0, 10.0).is_none());

        let down = pointer.press(10.0, 10.0, PointerButton::Left);
        assert_eq!(down.position(), Vec2::new(10.0, 590.0));
        assert!(matches!(pointer.motion(20.0, 10.0), Some(PointerEvent::Drag { .. })));

        pointer.release();
        assert!(pointer.motion(30.0, 10.0).is_none());
    }
}
