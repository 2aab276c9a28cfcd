//! Catalog-driven controllers
//!
//! - [`AssetCatalogController`]: mesh, material and texture of one model
//! - [`EffectsController`]: lights and post-processing of the scene
//!
//! Both look entries up by display name and either apply a selection
//! completely or, on a lookup miss, leave everything as it was.

pub mod asset_catalog;
pub mod effects;

pub use asset_catalog::{ActiveSelection, AssetCatalogController, ModelCatalogs};
pub use effects::{EffectCatalogs, EffectsController};
