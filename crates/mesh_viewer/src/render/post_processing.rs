//! Post-processing profiles
//!
//! A profile is the whole post-processing configuration of a scene: an
//! ordered list of effect components, each individually switchable. The
//! scene renders with exactly one active profile at a time.

use serde::{Serialize, Deserialize};

/// One effect inside a profile (bloom, vignette, color grading, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectComponent {
    /// Type name of the effect, e.g. `"Bloom"` or `"ChromaticAberration"`
    pub type_name: String,
    /// Whether the effect runs
    #[serde(default = "default_active")]
    pub active: bool,
    /// Effect strength
    #[serde(default = "default_intensity")]
    pub intensity: f32,
}

fn default_active() -> bool {
    true
}

fn default_intensity() -> f32 {
    1.0
}

impl EffectComponent {
    /// Create an active component with unit intensity
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            active: true,
            intensity: 1.0,
        }
    }

    /// Builder pattern: set whether the component runs
    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }
}

/// A complete post-processing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostProcessProfile {
    /// Profile name for debugging
    pub name: String,
    /// Effects in evaluation order
    pub components: Vec<EffectComponent>,
}

impl PostProcessProfile {
    /// Create an empty profile
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            components: Vec::new(),
        }
    }

    /// Builder pattern: append a component
    pub fn with_component(mut self, component: EffectComponent) -> Self {
        self.components.push(component);
        self
    }

    /// Indices of components whose type name contains `fragment`
    ///
    /// An empty fragment matches nothing.
    pub fn components_matching(&self, fragment: &str) -> Vec<usize> {
        if fragment.is_empty() {
            return Vec::new();
        }
        self.components
            .iter()
            .enumerate()
            .filter(|(_, c)| c.type_name.contains(fragment))
            .map(|(index, _)| index)
            .collect()
    }

    /// Type names of the components that are currently active
    pub fn active_component_names(&self) -> Vec<&str> {
        self.components
            .iter()
            .filter(|c| c.active)
            .map(|c| c.type_name.as_str())
            .collect()
    }
}
