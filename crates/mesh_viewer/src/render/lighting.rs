//! Lighting system

use serde::{Serialize, Deserialize};

use crate::foundation::math::Vec3;

slotmap::new_key_type! {
    /// Key of a light resident in the scene
    pub struct LightKey;
}

/// Light types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LightType {
    /// Directional light (like sunlight)
    Directional,
    /// Point light (like a lightbulb)
    Point,
}

/// Light source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Light {
    /// Light type
    pub light_type: LightType,
    /// Light position (point lights)
    pub position: Vec3,
    /// Light direction (directional lights)
    pub direction: Vec3,
    /// Light color
    pub color: Vec3,
    /// Light intensity
    pub intensity: f32,
}

impl Light {
    /// Create a directional light
    pub fn directional(direction: Vec3, color: Vec3, intensity: f32) -> Self {
        Self {
            light_type: LightType::Directional,
            position: Vec3::zeros(),
            direction: direction.normalize(),
            color,
            intensity,
        }
    }

    /// Create a point light
    pub fn point(position: Vec3, color: Vec3, intensity: f32) -> Self {
        Self {
            light_type: LightType::Point,
            position,
            direction: Vec3::zeros(),
            color,
            intensity,
        }
    }
}

/// A light placed in the scene together with its on-scene visibility
#[derive(Debug, Clone, PartialEq)]
pub struct SceneLight {
    /// Light parameters
    pub light: Light,
    /// Whether the light currently contributes to the scene
    pub visible: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_directional_light_normalizes_direction() {
        let light = Light::directional(Vec3::new(0.0, -4.0, 0.0), Vec3::new(1.0, 1.0, 1.0), 2.0);
        assert_eq!(light.light_type, LightType::Directional);
        assert_relative_eq!(light.direction, Vec3::new(0.0, -1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_point_light_has_no_direction() {
        let light = Light::point(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 0.5, 0.2), 1.0);
        assert_eq!(light.direction, Vec3::zeros());
        assert_eq!(light.position, Vec3::new(1.0, 2.0, 3.0));
    }
}
