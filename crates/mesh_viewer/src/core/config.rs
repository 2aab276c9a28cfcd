//! # Viewer Configuration
//!
//! Consolidates the tunable settings of the viewer: manipulation rates and
//! bounds, the default camera, the viewport and logging verbosity.
//!
//! ## Configuration Categories
//!
//! - **Manipulator**: rotation/scale rates, scale bounds, how modes are chosen
//! - **Camera**: default perspective camera
//! - **Viewport**: pixel size of the view the pointer moves over
//! - **Logging**: default log filter

use serde::{Serialize, Deserialize};

use crate::foundation::math::Vec3;
use crate::input::PointerButton;
use crate::manipulation::ManipulationMode;
use crate::render::Camera;

pub use crate::config::{Config, ConfigError, ConfigFormat};

/// How the active manipulation mode is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeSelection {
    /// Mode is set explicitly through `set_mode` (toolbar buttons)
    Explicit,
    /// Mode follows the pointer button that started the grab
    PointerButton,
}

/// # Manipulator Settings
///
/// Rates are per screen pixel of pointer travel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManipulatorSettings {
    /// Degrees of rotation per pixel of drag
    pub rotation_rate: f32,
    /// Scale change per pixel of vertical drag
    pub scale_rate: f32,
    /// Smallest allowed scale on any axis
    pub min_scale: f32,
    /// Largest allowed scale on any axis
    pub max_scale: f32,
    /// How the mode is picked on grab
    pub mode_selection: ModeSelection,
}

impl ManipulatorSettings {
    /// Create settings with the default rates and bounds
    pub fn new() -> Self {
        Self {
            rotation_rate: 0.1,
            scale_rate: 0.01,
            min_scale: 0.3,
            max_scale: 2.0,
            mode_selection: ModeSelection::Explicit,
        }
    }

    /// Set the rotation rate (degrees per pixel)
    pub fn with_rotation_rate(mut self, rate: f32) -> Self {
        self.rotation_rate = rate;
        self
    }

    /// Set the scale rate (per pixel)
    pub fn with_scale_rate(mut self, rate: f32) -> Self {
        self.scale_rate = rate;
        self
    }

    /// Set the per-axis scale bounds
    pub fn with_scale_bounds(mut self, min: f32, max: f32) -> Self {
        self.min_scale = min;
        self.max_scale = max;
        self
    }

    /// Set how modes are chosen
    pub fn with_mode_selection(mut self, selection: ModeSelection) -> Self {
        self.mode_selection = selection;
        self
    }

    /// Map a pointer button to the mode it selects
    ///
    /// Left rotates, right scales, middle translates.
    pub fn mode_for_button(button: PointerButton) -> ManipulationMode {
        match button {
            PointerButton::Left => ManipulationMode::Rotate,
            PointerButton::Right => ManipulationMode::Scale,
            PointerButton::Middle => ManipulationMode::Translate,
        }
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.rotation_rate.is_finite() && self.rotation_rate > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "rotation_rate must be positive, got {}",
                self.rotation_rate
            )));
        }
        if !(self.scale_rate.is_finite() && self.scale_rate > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "scale_rate must be positive, got {}",
                self.scale_rate
            )));
        }
        if !(self.min_scale > 0.0 && self.min_scale < self.max_scale) {
            return Err(ConfigError::Invalid(format!(
                "scale bounds must satisfy 0 < min < max, got [{}, {}]",
                self.min_scale, self.max_scale
            )));
        }
        Ok(())
    }
}

impl Default for ManipulatorSettings {
    fn default() -> Self {
        Self::new()
    }
}

/// # Camera Configuration
///
/// Default perspective camera used to project the pointer into the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Camera position in world space
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// Up vector
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clipping distance
    pub near: f32,
    /// Far clipping distance
    pub far: f32,
}

impl CameraConfig {
    /// Build the camera for a viewport
    pub fn build(&self, viewport: &ViewportConfig) -> Camera {
        let mut camera = Camera::perspective(
            self.position,
            self.fov_degrees,
            viewport.width as f32,
            viewport.height as f32,
            self.near,
            self.far,
        );
        camera.look_at(self.target, self.up);
        camera
    }

    /// Validate the camera settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(ConfigError::Invalid(format!(
                "fov_degrees must be in (0, 180), got {}",
                self.fov_degrees
            )));
        }
        if !(self.near > 0.0 && self.near < self.far) {
            return Err(ConfigError::Invalid(format!(
                "clip planes must satisfy 0 < near < far, got near={} far={}",
                self.near, self.far
            )));
        }
        if (self.target - self.position).norm() <= f32::EPSILON {
            return Err(ConfigError::Invalid("camera target coincides with its position".to_string()));
        }
        Ok(())
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 10.0),
            target: Vec3::zeros(),
            up: Vec3::new(0.0, 1.0, 0.0),
            fov_degrees: 60.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

/// # Viewport Configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

/// # Complete Viewer Configuration
///
/// Top-level configuration applications load from `viewer.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Default log filter (overridden by `RUST_LOG`)
    pub log_level: String,
    /// Manipulation settings
    pub manipulator: ManipulatorSettings,
    /// Camera settings
    pub camera: CameraConfig,
    /// Viewport settings
    pub viewport: ViewportConfig,
}

impl ViewerConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self {
            log_level: "info".to_string(),
            manipulator: ManipulatorSettings::default(),
            camera: CameraConfig::default(),
            viewport: ViewportConfig::default(),
        }
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.manipulator.validate()?;
        self.camera.validate()?;
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "viewport must be non-empty, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        Ok(())
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for ViewerConfig {}
