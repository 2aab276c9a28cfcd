//! Pointer-driven transform manipulation
//!
//! Maps 2D pointer movement to rotation, translation and scale of one
//! target. See [`TransformManipulator`].

pub mod manipulator;

pub use manipulator::{GrabState, ManipulationOutcome, TransformManipulator};

use serde::{Serialize, Deserialize};

/// What a drag does to the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ManipulationMode {
    /// Spin about an axis in the view plane perpendicular to the drag
    #[default]
    Rotate,
    /// Move in the plane through the target parallel to the view plane
    Translate,
    /// Grow or shrink uniformly with vertical drag
    Scale,
}
