//! Scene-side collaborators of the controllers
//!
//! The controllers never own scene objects. They talk to them through the
//! traits in this module, so the same controller code drives a real engine
//! object or the in-memory implementations shipped here.
//!
//! - [`ManipulationTarget`]: the transform a manipulator moves
//! - [`ModelRenderer`]: mesh and material slots of the displayed model
//! - [`SceneEffects`]: post-processing profile and light visibility

pub mod effects;
pub mod model;
pub mod node;

pub use effects::{EffectsScene, SceneEffects};
pub use model::{ModelRenderState, ModelRenderer};
pub use node::{ManipulationTarget, SceneNode};

use crate::controllers::{EffectCatalogs, ModelCatalogs};

/// A fully assembled in-memory scene plus the catalogs that point into it
///
/// Produced by [`ViewerScene::from_manifest`] and split apart by the caller:
/// the node goes to a manipulator, the model and its catalogs to an asset
/// catalog controller, the effects and theirs to an effects controller.
#[derive(Debug)]
pub struct ViewerScene {
    /// The displayed model's transform
    pub node: SceneNode,
    /// The displayed model's mesh and material slots
    pub model: ModelRenderState,
    /// Lights and the active post-processing profile
    pub effects: EffectsScene,
    /// Mesh, material and texture catalogs
    pub model_catalogs: ModelCatalogs,
    /// Light, profile and effect toggle catalogs
    pub effect_catalogs: EffectCatalogs,
}
