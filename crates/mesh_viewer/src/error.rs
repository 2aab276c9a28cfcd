//! Viewer error types

use thiserror::Error;

use crate::assets::CatalogKind;
use crate::render::MaterialError;

/// Errors raised by viewer operations
///
/// Every operation that returns one of these has left its state exactly as
/// it was before the call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewerError {
    /// Catalog lookup miss
    #[error("{kind} '{name}' not found")]
    NotFound {
        /// Which catalog was searched
        kind: CatalogKind,
        /// The name that was asked for
        name: String,
    },

    /// A display name was registered twice in one catalog
    #[error("duplicate {kind} name '{name}'")]
    DuplicateName {
        /// Catalog the duplicate was added to
        kind: CatalogKind,
        /// The repeated name
        name: String,
    },

    /// Component toggle requested while the scene has no profile
    #[error("no post-processing profile is active")]
    NoActiveProfile,

    /// Component name fragment matched more than one component
    #[error("effect '{name}' matches several components: {matches:?}")]
    AmbiguousEffect {
        /// The fragment that was searched for
        name: String,
        /// Type names of all matching components
        matches: Vec<String>,
    },

    /// Catalog entry points at a resource the scene no longer holds
    #[error("{kind} '{name}' is not resident in the scene")]
    NotResident {
        /// Catalog of the entry
        kind: CatalogKind,
        /// Display name of the entry
        name: String,
    },

    /// Material store rejected an operation
    #[error(transparent)]
    Material(#[from] MaterialError),
}

impl ViewerError {
    /// Shorthand for a lookup miss
    pub fn not_found(kind: CatalogKind, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Whether this is a lookup miss
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result alias for viewer operations
pub type ViewerResult<T> = Result<T, ViewerError>;
