//! Catalog manifest
//!
//! Describes the resident resources of a viewer scene and the catalogs that
//! expose them, in RON or TOML:
//!
//! ```ron
//! (
//!     meshes: [(name: "Teapot", mesh: 1)],
//!     materials: [(name: "Wood", base_color: (0.6, 0.4, 0.2))],
//!     textures: [(name: "Oak", base_map: 10, normal_map: Some(11))],
//!     initial: (material: Some("Wood")),
//! )
//! ```

use serde::{Serialize, Deserialize};

use crate::config::Config;
use crate::controllers::{EffectCatalogs, ModelCatalogs};
use crate::error::ViewerResult;
use crate::foundation::math::Vec3;
use crate::render::{
    Light, Material, MaterialStore, MeshHandle, PostProcessProfile, TextureHandle, TextureMaps,
};
use crate::scene::{EffectsScene, ModelRenderState, SceneEffects, SceneNode, ViewerScene};

/// A selectable mesh
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshEntry {
    /// Display name
    pub name: String,
    /// Resident mesh
    pub mesh: MeshHandle,
}

/// A selectable shared material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialEntry {
    /// Display name, also used as the material name
    pub name: String,
    /// Base color
    #[serde(default = "default_base_color")]
    pub base_color: Vec3,
    /// The material's own base color map
    #[serde(default)]
    pub base_map: Option<TextureHandle>,
    /// The material's own normal map
    #[serde(default)]
    pub normal_map: Option<TextureHandle>,
}

fn default_base_color() -> Vec3 {
    Vec3::new(1.0, 1.0, 1.0)
}

impl MaterialEntry {
    fn to_material(&self) -> Material {
        let mut material = Material::new(self.name.clone(), self.base_color);
        if let Some(map) = self.base_map {
            material = material.with_base_map(map);
        }
        if let Some(map) = self.normal_map {
            material = material.with_normal_map(map);
        }
        material
    }
}

/// A selectable texture set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureEntry {
    /// Display name
    pub name: String,
    /// Base color map
    pub base_map: TextureHandle,
    /// Normal map, if the set has one
    #[serde(default)]
    pub normal_map: Option<TextureHandle>,
}

/// A toggleable light
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightEntry {
    /// Display name
    pub name: String,
    /// Light parameters
    pub light: Light,
    /// Whether the light starts out visible
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_visible() -> bool {
    true
}

/// A named toggle for one effect component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectToggleEntry {
    /// Display name
    pub name: String,
    /// Component type name, or a fragment of one
    pub component: String,
}

/// What the scene shows before any selection is made
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialSelection {
    /// Mesh entry (defaults to the first mesh)
    pub mesh: Option<String>,
    /// Material entry (defaults to the first material)
    pub material: Option<String>,
    /// Profile entry (defaults to none)
    pub profile: Option<String>,
}

/// Resources and catalogs of a viewer scene
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogManifest {
    /// Mesh catalog, in display order
    pub meshes: Vec<MeshEntry>,
    /// Material catalog, in display order
    pub materials: Vec<MaterialEntry>,
    /// Texture catalog, in display order
    pub textures: Vec<TextureEntry>,
    /// Light catalog, in display order
    pub lights: Vec<LightEntry>,
    /// Post-processing profiles; the profile name is the display name
    pub profiles: Vec<PostProcessProfile>,
    /// Legacy effect toggles, in display order
    pub effect_toggles: Vec<EffectToggleEntry>,
    /// Starting selection
    pub initial: InitialSelection,
}

impl Config for CatalogManifest {}

impl ViewerScene {
    /// Build the in-memory scene and its catalogs from a manifest
    ///
    /// Fails with `DuplicateName` when a display name repeats within one
    /// catalog and with `NotFound` when the initial selection names an
    /// unknown entry.
    pub fn from_manifest(manifest: &CatalogManifest) -> ViewerResult<Self> {
        let mut materials = MaterialStore::new();
        let mut model_catalogs = ModelCatalogs::new();

        for entry in &manifest.meshes {
            model_catalogs.meshes.push(entry.name.clone(), entry.mesh)?;
        }
        for entry in &manifest.materials {
            model_catalogs.materials.push(entry.name.clone(), materials.insert_shared(entry.to_material()))?;
        }
        for entry in &manifest.textures {
            let maps = TextureMaps {
                base_map: entry.base_map,
                normal_map: entry.normal_map,
            };
            model_catalogs.textures.push(entry.name.clone(), maps)?;
        }

        let initial_material = match &manifest.initial.material {
            Some(name) => *model_catalogs.materials.payload(name)?,
            None => match model_catalogs.materials.iter().next() {
                Some(entry) => *entry.payload(),
                None => {
                    log::warn!("Manifest has no materials; using an untextured default");
                    materials.insert_shared(Material::new("Default", default_base_color()))
                }
            },
        };
        let initial_mesh = match &manifest.initial.mesh {
            Some(name) => Some(*model_catalogs.meshes.payload(name)?),
            None => model_catalogs.meshes.iter().next().map(|entry| *entry.payload()),
        };

        let mut model = ModelRenderState::new(materials, initial_material);
        if let Some(mesh) = initial_mesh {
            model = model.with_mesh(mesh);
        }

        let mut effects = EffectsScene::new();
        let mut effect_catalogs = EffectCatalogs::new();
        for entry in &manifest.lights {
            let key = effects.add_light(entry.light.clone(), entry.visible);
            effect_catalogs.lights.push(entry.name.clone(), key)?;
        }
        for profile in &manifest.profiles {
            effect_catalogs.profiles.push(profile.name.clone(), profile.clone())?;
        }
        for entry in &manifest.effect_toggles {
            effect_catalogs.effect_toggles.push(entry.name.clone(), entry.component.clone())?;
        }
        if let Some(name) = &manifest.initial.profile {
            effects.set_active_profile(effect_catalogs.profiles.payload(name)?.clone());
        }

        log::info!(
            "Scene built from manifest: {} meshes, {} materials, {} textures, {} lights, {} profiles",
            model_catalogs.meshes.len(),
            model_catalogs.materials.len(),
            model_catalogs.textures.len(),
            effect_catalogs.lights.len(),
            effect_catalogs.profiles.len(),
        );

        Ok(Self {
            node: SceneNode::new("Model"),
            model,
            effects,
            model_catalogs,
            effect_catalogs,
        })
    }
}
