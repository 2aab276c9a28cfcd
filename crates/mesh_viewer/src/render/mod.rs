//! Rendering-side resources the viewer selects between
//!
//! Drawing itself belongs to the renderer; this module holds the camera math
//! and the resident resource descriptions (materials, lights, post-processing
//! profiles) that catalogs point at.

pub mod camera;
pub mod lighting;
pub mod material;
pub mod material_store;
pub mod post_processing;

pub use camera::{Camera, ScreenProjector, ViewBasis};
pub use lighting::{Light, LightKey, LightType, SceneLight};
pub use material::{Material, MeshHandle, ShadingFeatures, TextureHandle, TextureMaps};
pub use material_store::{MaterialBinding, MaterialError, MaterialKey, MaterialOrigin, MaterialStore};
pub use post_processing::{EffectComponent, PostProcessProfile};
