//! Selectable asset catalogs
//!
//! Catalogs are populated from a [`manifest::CatalogManifest`] (or directly in
//! code) and looked up by display name.

pub mod catalog;
pub mod manifest;

pub use catalog::{Catalog, CatalogEntry, CatalogKind};
pub use manifest::CatalogManifest;
