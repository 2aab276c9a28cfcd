//! Material store with explicit shared/instanced ownership
//!
//! Base materials are shared: any number of objects may render with the
//! same one, so nobody may edit them. An object that needs per-object edits
//! takes an *instance*, an exclusively owned copy of a shared base, and is
//! responsible for releasing it.
//!
//! ## Transition rule
//!
//! A [`MaterialBinding`] starts out `Shared`. The first per-object mutation
//! copies the base into an instance (`Shared(base)` becomes
//! `Instanced { instance, base }`); further mutations edit the instance in
//! place. Rebinding to a new base or tearing down releases the instance.

use slotmap::SlotMap;

use super::material::Material;

slotmap::new_key_type! {
    /// Key of a material in a [`MaterialStore`]
    pub struct MaterialKey;
}

/// Whether a stored material is a shared base or an owned copy of one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialOrigin {
    /// Shared base material, never edited per object
    Shared,
    /// Exclusive copy of the given base
    InstanceOf(MaterialKey),
}

/// How a renderer references its material
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialBinding {
    /// Rendering directly with a shared base
    Shared(MaterialKey),
    /// Rendering with an owned copy of `base`
    Instanced {
        /// The owned copy
        instance: MaterialKey,
        /// The shared base it was copied from
        base: MaterialKey,
    },
}

impl MaterialBinding {
    /// The shared base material behind this binding
    pub fn base(&self) -> MaterialKey {
        match *self {
            Self::Shared(base) | Self::Instanced { base, .. } => base,
        }
    }

    /// The owned instance, if any
    pub fn instance(&self) -> Option<MaterialKey> {
        match *self {
            Self::Shared(_) => None,
            Self::Instanced { instance, .. } => Some(instance),
        }
    }

    /// The material actually used for rendering
    pub fn active(&self) -> MaterialKey {
        match *self {
            Self::Shared(key) | Self::Instanced { instance: key, .. } => key,
        }
    }
}

/// Material store errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MaterialError {
    /// Key does not name a live material (never existed or already released)
    #[error("material {0:?} is not resident")]
    UnknownMaterial(MaterialKey),

    /// Attempted to release a shared base material
    #[error("material {0:?} is shared and cannot be released as an instance")]
    NotAnInstance(MaterialKey),

    /// Attempted to instance something other than a shared base
    #[error("material {0:?} is an instance; only shared materials can be instanced")]
    NotShared(MaterialKey),
}

#[derive(Debug, Clone)]
struct MaterialSlot {
    material: Material,
    origin: MaterialOrigin,
}

/// Central store for shared materials and their instances
///
/// Counts instance creation and release so leaks and double releases show
/// up in tests.
#[derive(Debug, Default)]
pub struct MaterialStore {
    slots: SlotMap<MaterialKey, MaterialSlot>,
    instances_created: usize,
    instances_released: usize,
}

impl MaterialStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shared base material
    pub fn insert_shared(&mut self, material: Material) -> MaterialKey {
        log::debug!("Registering shared material '{}'", material.name);
        self.slots.insert(MaterialSlot {
            material,
            origin: MaterialOrigin::Shared,
        })
    }

    /// Copy a shared base into a new exclusively owned instance
    pub fn instantiate(&mut self, base: MaterialKey) -> Result<MaterialKey, MaterialError> {
        let slot = self.slots.get(base).ok_or(MaterialError::UnknownMaterial(base))?;
        if slot.origin != MaterialOrigin::Shared {
            return Err(MaterialError::NotShared(base));
        }

        let mut material = slot.material.clone();
        material.name = format!("{} (Instance)", material.name);
        let instance = self.slots.insert(MaterialSlot {
            material,
            origin: MaterialOrigin::InstanceOf(base),
        });
        self.instances_created += 1;
        log::debug!("Instanced material {:?} from base {:?}", instance, base);
        Ok(instance)
    }

    /// Release an instance, returning its final state
    ///
    /// Fails for shared materials and for keys that were already released.
    pub fn release(&mut self, instance: MaterialKey) -> Result<Material, MaterialError> {
        match self.slots.get(instance).map(|slot| slot.origin) {
            None => Err(MaterialError::UnknownMaterial(instance)),
            Some(MaterialOrigin::Shared) => Err(MaterialError::NotAnInstance(instance)),
            Some(MaterialOrigin::InstanceOf(_)) => {
                let slot = self
                    .slots
                    .remove(instance)
                    .ok_or(MaterialError::UnknownMaterial(instance))?;
                self.instances_released += 1;
                log::debug!("Released material instance {:?} ('{}')", instance, slot.material.name);
                Ok(slot.material)
            }
        }
    }

    /// Get a material by key
    pub fn get(&self, key: MaterialKey) -> Option<&Material> {
        self.slots.get(key).map(|slot| &slot.material)
    }

    /// Get an instance for editing
    ///
    /// Shared materials are never handed out mutably.
    pub fn instance_mut(&mut self, instance: MaterialKey) -> Result<&mut Material, MaterialError> {
        match self.slots.get_mut(instance) {
            None => Err(MaterialError::UnknownMaterial(instance)),
            Some(slot) if slot.origin == MaterialOrigin::Shared => Err(MaterialError::NotAnInstance(instance)),
            Some(slot) => Ok(&mut slot.material),
        }
    }

    /// Origin of a material
    pub fn origin(&self, key: MaterialKey) -> Option<MaterialOrigin> {
        self.slots.get(key).map(|slot| slot.origin)
    }

    /// Whether the key names a live material
    pub fn contains(&self, key: MaterialKey) -> bool {
        self.slots.contains_key(key)
    }

    /// Number of instances currently alive
    pub fn live_instances(&self) -> usize {
        self.slots
            .values()
            .filter(|slot| matches!(slot.origin, MaterialOrigin::InstanceOf(_)))
            .count()
    }

    /// Total instances ever created
    pub fn instances_created(&self) -> usize {
        self.instances_created
    }

    /// Total instances released
    pub fn instances_released(&self) -> usize {
        self.instances_released
    }

    /// Number of materials of any origin
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::render::material::TextureHandle;

    fn store_with_base() -> (MaterialStore, MaterialKey) {
        let mut store = MaterialStore::new();
        let base = store.insert_shared(Material::new("Wood", Vec3::new(0.6, 0.4, 0.2)));
        (store, base)
    }

    #[test]
    fn test_instance_edits_leave_base_untouched() {
        let (mut store, base) = store_with_base();
        let instance = store.instantiate(base).unwrap();

        store.instance_mut(instance).unwrap().base_map = Some(TextureHandle(9));

        assert_eq!(store.get(base).unwrap().base_map, None);
        assert_eq!(store.get(instance).unwrap().base_map, Some(TextureHandle(9)));
        assert_eq!(store.get(instance).unwrap().name, "Wood (Instance)");
        assert_eq!(store.origin(instance), Some(MaterialOrigin::InstanceOf(base)));
    }

    #[test]
    fn test_double_release_is_an_error() {
        let (mut store, base) = store_with_base();
        let instance = store.instantiate(base).unwrap();

        assert!(store.release(instance).is_ok());
        assert_eq!(store.release(instance), Err(MaterialError::UnknownMaterial(instance)));
        assert_eq!(store.instances_created(), 1);
        assert_eq!(store.instances_released(), 1);
        assert_eq!(store.live_instances(), 0);
    }

    #[test]
    fn test_shared_materials_are_protected() {
        let (mut store, base) = store_with_base();

        assert_eq!(store.release(base), Err(MaterialError::NotAnInstance(base)));
        assert!(matches!(store.instance_mut(base), Err(MaterialError::NotAnInstance(_))));
        assert!(store.contains(base));
    }

    #[test]
    fn test_instances_cannot_be_instanced() {
        let (mut store, base) = store_with_base();
        let instance = store.instantiate(base).unwrap();
        assert_eq!(store.instantiate(instance), Err(MaterialError::NotShared(instance)));
    }

    #[test]
    fn test_binding_accessors() {
        let (mut store, base) = store_with_base();
        let instance = store.instantiate(base).unwrap();

        let shared = MaterialBinding::Shared(base);
        assert_eq!(shared.base(), base);
        assert_eq!(shared.instance(), None);
        assert_eq!(shared.active(), base);

        let instanced = MaterialBinding::Instanced { instance, base };
        assert_eq!(instanced.base(), base);
        assert_eq!(instanced.instance(), Some(instance));
        assert_eq!(instanced.active(), instance);
    }
}
