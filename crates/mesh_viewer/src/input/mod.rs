//! Pointer input types consumed by the manipulator
//!
//! The windowing layer owns the event loop; it only needs to translate its
//! own mouse events into [`PointerEvent`]s.

pub mod pointer;

pub use pointer::{PointerButton, PointerEvent, PointerState};
