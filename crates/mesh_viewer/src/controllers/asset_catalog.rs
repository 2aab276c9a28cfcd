//! # Asset Catalog Controller
//!
//! Swaps the mesh, material and texture of one model from named catalogs.
//!
//! ## Material instancing
//!
//! The model starts out rendering with a shared base material. The first
//! texture override copies that base into an instance owned by this
//! controller; later overrides edit the same instance. Selecting another
//! material releases the instance and rebinds to the new shared base, and
//! dropping the controller releases whatever instance is still live. At no
//! point does the controller hold more than one instance.
//!
//! ## Texture carry-forward
//!
//! A texture the user picked survives a material change: before switching,
//! the controller finds which texture entry the outgoing material shows and
//! applies that entry to the incoming material.

use crate::assets::{Catalog, CatalogKind};
use crate::error::{ViewerError, ViewerResult};
use crate::render::{MaterialBinding, MaterialError, MaterialKey, MaterialOrigin, MeshHandle, TextureMaps};
use crate::scene::ModelRenderer;

/// Mesh, material and texture catalogs of one model
#[derive(Debug, Clone)]
pub struct ModelCatalogs {
    /// Selectable meshes
    pub meshes: Catalog<MeshHandle>,
    /// Selectable shared base materials
    pub materials: Catalog<MaterialKey>,
    /// Selectable texture sets
    pub textures: Catalog<TextureMaps>,
}

impl ModelCatalogs {
    /// Empty catalogs
    pub fn new() -> Self {
        Self {
            meshes: Catalog::new(CatalogKind::Mesh),
            materials: Catalog::new(CatalogKind::Material),
            textures: Catalog::new(CatalogKind::Texture),
        }
    }
}

impl Default for ModelCatalogs {
    fn default() -> Self {
        Self::new()
    }
}

/// Display names of what the model currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveSelection {
    /// Current mesh entry
    pub mesh: Option<String>,
    /// Current base material entry
    pub material: Option<String>,
    /// Current texture entry
    pub texture: Option<String>,
}

/// Applies catalog selections to a [`ModelRenderer`]
#[derive(Debug)]
pub struct AssetCatalogController<R: ModelRenderer> {
    renderer: R,
    catalogs: ModelCatalogs,
    selection: ActiveSelection,
}

impl<R: ModelRenderer> AssetCatalogController<R> {
    /// Take control of `renderer`
    ///
    /// The initial selection is read back from the renderer's current state.
    pub fn new(renderer: R, catalogs: ModelCatalogs) -> Self {
        let mut controller = Self {
            renderer,
            catalogs,
            selection: ActiveSelection::default(),
        };

        let mesh = controller.renderer.render_mesh();
        controller.selection.mesh = controller
            .catalogs
            .meshes
            .find(|&handle| Some(handle) == mesh)
            .map(|entry| entry.display_name().to_string());

        let base = controller.renderer.material_binding().base();
        controller.selection.material = controller
            .catalogs
            .materials
            .find(|&key| key == base)
            .map(|entry| entry.display_name().to_string());

        controller.selection.texture = controller.applied_texture().map(|(name, _)| name);

        log::info!(
            "Asset catalog controller ready: {} meshes, {} materials, {} textures",
            controller.catalogs.meshes.len(),
            controller.catalogs.materials.len(),
            controller.catalogs.textures.len()
        );
        controller
    }

    /// Show mesh `name` in both the render and collision slots
    pub fn select_mesh(&mut self, name: &str) -> ViewerResult<()> {
        let mesh = *self.catalogs.meshes.payload(name)?;

        self.renderer.set_render_mesh(mesh);
        self.renderer.set_collision_mesh(mesh);
        self.selection.mesh = Some(name.to_string());

        log::debug!("Selected mesh '{}'", name);
        Ok(())
    }

    /// Switch to base material `name`, keeping the applied texture
    pub fn select_material(&mut self, name: &str) -> ViewerResult<()> {
        let base = *self.catalogs.materials.payload(name)?;
        match self.renderer.materials().origin(base) {
            Some(MaterialOrigin::Shared) => {}
            Some(MaterialOrigin::InstanceOf(_)) => return Err(MaterialError::NotShared(base).into()),
            None => {
                return Err(ViewerError::NotResident {
                    kind: CatalogKind::Material,
                    name: name.to_string(),
                })
            }
        }

        let carried = self.applied_texture();

        self.release_instance();
        self.renderer.set_material_binding(MaterialBinding::Shared(base));
        self.selection.material = Some(name.to_string());

        match carried {
            Some((texture, maps)) => {
                self.apply_texture(&maps)?;
                log::debug!("Selected material '{}' carrying texture '{}'", name, texture);
                self.selection.texture = Some(texture);
            }
            None => {
                self.selection.texture = self.applied_texture().map(|(texture, _)| texture);
                log::debug!("Selected material '{}'", name);
            }
        }
        Ok(())
    }

    /// Apply texture set `name` to this model only
    ///
    /// Instances the material if it is still shared. A texture set without a
    /// normal map turns normal mapping off.
    pub fn select_texture(&mut self, name: &str) -> ViewerResult<()> {
        let maps = *self.catalogs.textures.payload(name)?;

        self.apply_texture(&maps)?;
        self.selection.texture = Some(name.to_string());

        log::debug!(
            "Selected texture '{}' (normal map: {})",
            name,
            if maps.normal_map.is_some() { "on" } else { "off" }
        );
        Ok(())
    }

    /// Release the owned material instance, if any, and go back to the shared base
    ///
    /// Returns whether an instance was released. Calling again is a no-op.
    pub fn release_instance(&mut self) -> bool {
        let binding = self.renderer.material_binding();
        let Some(instance) = binding.instance() else {
            return false;
        };

        if let Err(err) = self.renderer.materials_mut().release(instance) {
            log::warn!("Material instance was already gone: {}", err);
        }
        self.renderer.set_material_binding(MaterialBinding::Shared(binding.base()));
        true
    }

    /// Release everything this controller owns
    ///
    /// Also runs on drop; running it twice releases nothing the second time.
    pub fn teardown(&mut self) {
        if self.release_instance() {
            log::debug!("Asset catalog controller released its material instance");
        }
    }

    /// Names of the current mesh, material and texture
    pub fn selection(&self) -> &ActiveSelection {
        &self.selection
    }

    /// Mesh names in display order
    pub fn mesh_names(&self) -> Vec<&str> {
        self.catalogs.meshes.display_names()
    }

    /// Material names in display order
    pub fn material_names(&self) -> Vec<&str> {
        self.catalogs.materials.display_names()
    }

    /// Texture names in display order
    pub fn texture_names(&self) -> Vec<&str> {
        self.catalogs.textures.display_names()
    }

    /// The catalogs selections are made from
    pub fn catalogs(&self) -> &ModelCatalogs {
        &self.catalogs
    }

    /// The controlled renderer
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Texture entry the active material currently shows, found by its base map
    fn applied_texture(&self) -> Option<(String, TextureMaps)> {
        let base_map = self.renderer.active_material()?.base_map?;
        self.catalogs
            .textures
            .find(|maps| maps.base_map == base_map)
            .map(|entry| (entry.display_name().to_string(), *entry.payload()))
    }

    fn apply_texture(&mut self, maps: &TextureMaps) -> ViewerResult<()> {
        let instance = self.ensure_instance()?;
        self.renderer.materials_mut().instance_mut(instance)?.apply_texture(maps);
        Ok(())
    }

    /// Copy the shared base on first per-object mutation
    fn ensure_instance(&mut self) -> ViewerResult<MaterialKey> {
        match self.renderer.material_binding() {
            MaterialBinding::Instanced { instance, .. } => Ok(instance),
            MaterialBinding::Shared(base) => {
                let instance = self.renderer.materials_mut().instantiate(base)?;
                self.renderer.set_material_binding(MaterialBinding::Instanced { instance, base });
                Ok(instance)
            }
        }
    }
}

impl<R: ModelRenderer> Drop for AssetCatalogController<R> {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::render::{Material, MaterialStore, TextureHandle};
    use crate::scene::ModelRenderState;

    struct Fixture {
        model: ModelRenderState,
        catalogs: ModelCatalogs,
    }

    fn fixture() -> Fixture {
        let mut store = MaterialStore::new();
        let plastic = store.insert_shared(Material::new("Plastic", Vec3::new(0.9, 0.1, 0.1)));
        let stone = store.insert_shared(
            Material::new("Stone", Vec3::new(0.5, 0.5, 0.5)).with_base_map(TextureHandle(20)),
        );

        let mut catalogs = ModelCatalogs::new();
        catalogs.meshes.push("Teapot", MeshHandle(1)).unwrap();
        catalogs.meshes.push("Bunny", MeshHandle(2)).unwrap();
        catalogs.materials.push("Plastic", plastic).unwrap();
        catalogs.materials.push("Stone", stone).unwrap();
        catalogs
            .textures
            .push("Bricks", TextureMaps::with_normal(TextureHandle(10), TextureHandle(11)))
            .unwrap();
        catalogs.textures.push("Paper", TextureMaps::base(TextureHandle(12))).unwrap();
        catalogs.textures.push("Granite", TextureMaps::base(TextureHandle(20))).unwrap();

        Fixture {
            model: ModelRenderState::new(store, plastic).with_mesh(MeshHandle(1)),
            catalogs,
        }
    }

    #[test]
    fn test_initial_selection_read_from_renderer() {
        let Fixture { mut model, catalogs } = fixture();
        let controller = AssetCatalogController::new(&mut model, catalogs);

        assert_eq!(controller.selection().mesh.as_deref(), Some("Teapot"));
        assert_eq!(controller.selection().material.as_deref(), Some("Plastic"));
        assert_eq!(controller.selection().texture, None);
    }

    #[test]
    fn test_select_mesh_updates_both_slots() {
        let Fixture { mut model, catalogs } = fixture();
        let mut controller = AssetCatalogController::new(&mut model, catalogs);

        controller.select_mesh("Bunny").unwrap();
        drop(controller);

        assert_eq!(model.render_mesh(), Some(MeshHandle(2)));
        assert_eq!(model.collision_mesh(), Some(MeshHandle(2)));
    }

    #[test]
    fn test_material_change_without_texture_stays_shared() {
        let Fixture { mut model, catalogs } = fixture();
        let mut controller = AssetCatalogController::new(&mut model, catalogs);

        controller.select_material("Stone").unwrap();
        assert!(matches!(controller.renderer().material_binding(), MaterialBinding::Shared(_)));
        assert_eq!(controller.renderer().materials().instances_created(), 0);
        // The material's own map is reported when it matches an entry
        assert_eq!(controller.selection().texture.as_deref(), Some("Granite"));
    }

    #[test]
    fn test_instance_entry_rejected_before_any_change() {
        let mut store = MaterialStore::new();
        let plastic = store.insert_shared(Material::new("Plastic", Vec3::new(0.9, 0.1, 0.1)));
        let copy = store.instantiate(plastic).unwrap();
        let mut catalogs = ModelCatalogs::new();
        catalogs.materials.push("Plastic", plastic).unwrap();
        catalogs.materials.push("Copy", copy).unwrap();
        catalogs.textures.push("Paper", TextureMaps::base(TextureHandle(12))).unwrap();
        let mut model = ModelRenderState::new(store, plastic);
        let mut controller = AssetCatalogController::new(&mut model, catalogs);
        controller.select_texture("Paper").unwrap();
        let binding = controller.renderer().material_binding();

        let err = controller.select_material("Copy").unwrap_err();
        assert_eq!(err, ViewerError::Material(MaterialError::NotShared(copy)));
        assert_eq!(controller.renderer().material_binding(), binding);
        assert_eq!(controller.selection().material.as_deref(), Some("Plastic"));
        assert_eq!(controller.selection().texture.as_deref(), Some("Paper"));
        assert_eq!(controller.renderer().materials().instances_released(), 0);
        assert_eq!(controller.renderer().materials().live_instances(), 2);
    }

    #[test]
    fn test_texture_edits_do_not_touch_shared_base() {
        let Fixture { mut model, catalogs } = fixture();
        let plastic = *catalogs.materials.payload("Plastic").unwrap();
        let mut controller = AssetCatalogController::new(&mut model, catalogs);

        controller.select_texture("Paper").unwrap();
        drop(controller);

        assert_eq!(model.materials().get(plastic).unwrap().base_map, None);
    }

    #[test]
    fn test_repeated_textures_reuse_one_instance() {
        let Fixture { mut model, catalogs } = fixture();
        let mut controller = AssetCatalogController::new(&mut model, catalogs);

        controller.select_texture("Bricks").unwrap();
        controller.select_texture("Paper").unwrap();
        controller.select_texture("Bricks").unwrap();

        assert_eq!(controller.renderer().materials().instances_created(), 1);
        assert_eq!(controller.renderer().materials().live_instances(), 1);
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let Fixture { mut model, catalogs } = fixture();
        let mut controller = AssetCatalogController::new(&mut model, catalogs);
        controller.select_texture("Paper").unwrap();

        controller.teardown();
        controller.teardown();
        assert!(!controller.release_instance());
        drop(controller);

        assert_eq!(model.materials().instances_released(), 1);
        assert_eq!(model.materials().live_instances(), 0);
    }

    #[test]
    fn test_unknown_texture_leaves_binding_shared() {
        let Fixture { mut model, catalogs } = fixture();
        let mut controller = AssetCatalogController::new(&mut model, catalogs);

        let err = controller.select_texture("Velvet").unwrap_err();
        assert_eq!(err, ViewerError::not_found(CatalogKind::Texture, "Velvet"));
        assert!(matches!(controller.renderer().material_binding(), MaterialBinding::Shared(_)));
        assert_eq!(controller.selection().texture, None);
    }
}
