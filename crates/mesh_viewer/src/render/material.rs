//! Material definitions
//!
//! Materials carry a base color, texture slots and the shading feature
//! flags derived from which slots are filled. Texture and mesh data live in
//! the renderer; the viewer only deals in handles.

use serde::{Serialize, Deserialize};

use crate::foundation::math::Vec3;

/// Handle for a GPU texture resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextureHandle(pub u32);

/// Handle for a resident mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MeshHandle(pub u32);

bitflags::bitflags! {
    /// Shader feature switches of a material
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ShadingFeatures: u32 {
        /// Sample the base color map
        const BASE_COLOR_MAP = 1;
        /// Sample the normal map
        const NORMAL_MAP = 1 << 1;
    }
}

impl Default for ShadingFeatures {
    fn default() -> Self {
        Self::empty()
    }
}

/// A primary map with an optional normal map, applied together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextureMaps {
    /// Base color (albedo) map
    pub base_map: TextureHandle,
    /// Normal map, when the texture set has one
    #[serde(default)]
    pub normal_map: Option<TextureHandle>,
}

impl TextureMaps {
    /// Base map only
    pub fn base(base_map: TextureHandle) -> Self {
        Self {
            base_map,
            normal_map: None,
        }
    }

    /// Base map plus normal map
    pub fn with_normal(base_map: TextureHandle, normal_map: TextureHandle) -> Self {
        Self {
            base_map,
            normal_map: Some(normal_map),
        }
    }
}

/// Material resource
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Name for debugging
    pub name: String,
    /// Base color (albedo) - RGB values
    pub base_color: Vec3,
    /// Base color texture slot
    pub base_map: Option<TextureHandle>,
    /// Normal texture slot
    pub normal_map: Option<TextureHandle>,
    /// Enabled shader features
    pub features: ShadingFeatures,
}

impl Material {
    /// Create an untextured material
    pub fn new(name: impl Into<String>, base_color: Vec3) -> Self {
        Self {
            name: name.into(),
            base_color,
            base_map: None,
            normal_map: None,
            features: ShadingFeatures::empty(),
        }
    }

    /// Builder pattern: attach a base color texture
    pub fn with_base_map(mut self, texture: TextureHandle) -> Self {
        self.base_map = Some(texture);
        self.features.insert(ShadingFeatures::BASE_COLOR_MAP);
        self
    }

    /// Builder pattern: attach a normal map texture
    pub fn with_normal_map(mut self, texture: TextureHandle) -> Self {
        self.normal_map = Some(texture);
        self.features.insert(ShadingFeatures::NORMAL_MAP);
        self
    }

    /// Replace both texture slots with `maps`
    ///
    /// The normal map feature follows the slot: a texture set without a
    /// normal map clears both the slot and the flag.
    pub fn apply_texture(&mut self, maps: &TextureMaps) {
        self.base_map = Some(maps.base_map);
        self.features.insert(ShadingFeatures::BASE_COLOR_MAP);

        self.normal_map = maps.normal_map;
        self.features.set(ShadingFeatures::NORMAL_MAP, maps.normal_map.is_some());
    }

    /// Whether normal mapping is enabled
    pub fn normal_mapping_enabled(&self) -> bool {
        self.features.contains(ShadingFeatures::NORMAL_MAP)
    }
}
