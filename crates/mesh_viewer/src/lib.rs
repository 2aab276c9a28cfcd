//! # Mesh Viewer
//!
//! Interaction core of an interactive 3D model viewer.
//!
//! ## Features
//!
//! - **Transform Manipulation**: rotate, translate and scale a model from
//!   pointer drags without the model snapping to the pointer on grab
//! - **Asset Catalogs**: swap mesh, material and texture by name, keeping the
//!   chosen texture across material changes
//! - **Material Instancing**: per-object texture edits go to an owned copy of
//!   the shared material, released when replaced or torn down
//! - **Scene Effects**: whole post-processing profile swaps and per-light
//!   visibility toggles
//!
//! Drawing, windowing and panel layout live outside this crate. The
//! controllers reach the scene through the traits in [`scene`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mesh_viewer::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ViewerConfig::load_from_file("viewer.toml")?;
//!     let manifest = CatalogManifest::load_from_file("catalog.ron")?;
//!     let ViewerScene { node, model, effects, model_catalogs, effect_catalogs } =
//!         ViewerScene::from_manifest(&manifest)?;
//!
//!     let camera = config.camera.build(&config.viewport);
//!     let mut manipulator = TransformManipulator::with_target(config.manipulator.clone(), node)?;
//!     let mut assets = AssetCatalogController::new(model, model_catalogs);
//!     let mut effects = EffectsController::new(effects, effect_catalogs);
//!
//!     manipulator.on_grab_start(&camera, Vec2::new(640.0, 360.0), Some(PointerButton::Left));
//!     manipulator.on_drag(&camera, Vec2::new(700.0, 360.0));
//!     assets.select_texture("Oak")?;
//!     effects.activate_profile("Warm")?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

pub mod core;

pub mod foundation;
pub mod config;
pub mod input;
pub mod render;
pub mod scene;
pub mod assets;
pub mod manipulation;
pub mod controllers;

mod error;

pub use error::{ViewerError, ViewerResult};

#[cfg(test)]
mod tests;

/// Common imports for viewer users
pub mod prelude {
    pub use crate::{
        ViewerError, ViewerResult,
        assets::{Catalog, CatalogKind, CatalogManifest},
        config::{Config, ConfigError, ConfigFormat},
        controllers::{ActiveSelection, AssetCatalogController, EffectsController},
        core::config::{ManipulatorSettings, ModeSelection, ViewerConfig},
        foundation::math::{Quat, Transform, Vec2, Vec3},
        input::{PointerButton, PointerEvent, PointerState},
        manipulation::{ManipulationMode, ManipulationOutcome, TransformManipulator},
        render::{Camera, ScreenProjector},
        scene::{
            EffectsScene, ManipulationTarget, ModelRenderState, ModelRenderer, SceneEffects, SceneNode,
            ViewerScene,
        },
    };
}
