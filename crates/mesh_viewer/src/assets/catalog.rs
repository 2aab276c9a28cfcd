//! Ordered, name-keyed catalogs of selectable entries
//!
//! Insertion order is display order. Display names are unique within a
//! catalog; the name index is built as entries are added, so lookups do not
//! scan.

use std::collections::HashMap;
use std::fmt;

use serde::{Serialize, Deserialize};

use crate::error::{ViewerError, ViewerResult};

/// Which catalog (or lookup domain) a name belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CatalogKind {
    /// Mesh options
    Mesh,
    /// Material options
    Material,
    /// Texture options
    Texture,
    /// Light toggles
    Light,
    /// Post-processing profiles
    PostProcessProfile,
    /// Named effect toggles inside the active profile
    EffectToggle,
    /// Effect components of the active profile
    EffectComponent,
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Mesh => "mesh",
            Self::Material => "material",
            Self::Texture => "texture",
            Self::Light => "light",
            Self::PostProcessProfile => "post-processing profile",
            Self::EffectToggle => "effect toggle",
            Self::EffectComponent => "effect component",
        };
        f.write_str(label)
    }
}

/// A named, selectable entry
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry<T> {
    display_name: String,
    payload: T,
}

impl<T> CatalogEntry<T> {
    /// Name shown to the user (unique within its catalog)
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// The selectable resource
    pub fn payload(&self) -> &T {
        &self.payload
    }
}

/// Ordered collection of named entries
#[derive(Debug, Clone)]
pub struct Catalog<T> {
    kind: CatalogKind,
    entries: Vec<CatalogEntry<T>>,
    index: HashMap<String, usize>,
}

impl<T> Catalog<T> {
    /// Create an empty catalog
    pub fn new(kind: CatalogKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a catalog from `(display_name, payload)` pairs in display order
    pub fn from_entries<N, I>(kind: CatalogKind, entries: I) -> ViewerResult<Self>
    where
        N: Into<String>,
        I: IntoIterator<Item = (N, T)>,
    {
        let mut catalog = Self::new(kind);
        for (name, payload) in entries {
            catalog.push(name, payload)?;
        }
        Ok(catalog)
    }

    /// Append an entry; the name must not already be present
    pub fn push(&mut self, display_name: impl Into<String>, payload: T) -> ViewerResult<()> {
        let display_name = display_name.into();
        if self.index.contains_key(&display_name) {
            return Err(ViewerError::DuplicateName {
                kind: self.kind,
                name: display_name,
            });
        }
        self.index.insert(display_name.clone(), self.entries.len());
        self.entries.push(CatalogEntry {
            display_name,
            payload,
        });
        Ok(())
    }

    /// What this catalog holds
    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    /// Look up an entry by display name
    pub fn get(&self, name: &str) -> ViewerResult<&CatalogEntry<T>> {
        self.index
            .get(name)
            .map(|&position| &self.entries[position])
            .ok_or_else(|| ViewerError::not_found(self.kind, name))
    }

    /// Look up a payload by display name
    pub fn payload(&self, name: &str) -> ViewerResult<&T> {
        self.get(name).map(CatalogEntry::payload)
    }

    /// First entry, in display order, whose payload satisfies `predicate`
    pub fn find(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<&CatalogEntry<T>> {
        self.entries.iter().find(|entry| predicate(&entry.payload))
    }

    /// Whether a display name is present
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Display names in display order
    pub fn display_names(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.display_name.as_str()).collect()
    }

    /// Entries in display order
    pub fn iter(&self) -> impl Iterator<Item = &CatalogEntry<T>> {
        self.entries.iter()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
