//! Mesh and material slots of the displayed model

use crate::render::{Material, MaterialBinding, MaterialKey, MaterialStore, MeshHandle};

/// Render and collision slots of a model, plus the material store it draws from
pub trait ModelRenderer {
    /// Mesh currently drawn
    fn render_mesh(&self) -> Option<MeshHandle>;

    /// Replace the drawn mesh
    fn set_render_mesh(&mut self, mesh: MeshHandle);

    /// Mesh currently used for picking and collision
    fn collision_mesh(&self) -> Option<MeshHandle>;

    /// Replace the collision mesh
    fn set_collision_mesh(&mut self, mesh: MeshHandle);

    /// How the model references its material
    fn material_binding(&self) -> MaterialBinding;

    /// Rebind the model's material
    fn set_material_binding(&mut self, binding: MaterialBinding);

    /// Store the binding's keys refer to
    fn materials(&self) -> &MaterialStore;

    /// Mutable access to the store, for instancing and release
    fn materials_mut(&mut self) -> &mut MaterialStore;

    /// The material actually used for rendering
    fn active_material(&self) -> Option<&Material> {
        self.materials().get(self.material_binding().active())
    }
}

impl<T: ModelRenderer + ?Sized> ModelRenderer for &mut T {
    fn render_mesh(&self) -> Option<MeshHandle> {
        (**self).render_mesh()
    }

    fn set_render_mesh(&mut self, mesh: MeshHandle) {
        (**self).set_render_mesh(mesh)
    }

    fn collision_mesh(&self) -> Option<MeshHandle> {
        (**self).collision_mesh()
    }

    fn set_collision_mesh(&mut self, mesh: MeshHandle) {
        (**self).set_collision_mesh(mesh)
    }

    fn material_binding(&self) -> MaterialBinding {
        (**self).material_binding()
    }

    fn set_material_binding(&mut self, binding: MaterialBinding) {
        (**self).set_material_binding(binding)
    }

    fn materials(&self) -> &MaterialStore {
        (**self).materials()
    }

    fn materials_mut(&mut self) -> &mut MaterialStore {
        (**self).materials_mut()
    }
}

/// In-memory model: two mesh slots and a material binding
#[derive(Debug)]
pub struct ModelRenderState {
    render_mesh: Option<MeshHandle>,
    collision_mesh: Option<MeshHandle>,
    binding: MaterialBinding,
    materials: MaterialStore,
}

impl ModelRenderState {
    /// Create a model rendering with the shared material `initial`
    pub fn new(materials: MaterialStore, initial: MaterialKey) -> Self {
        Self {
            render_mesh: None,
            collision_mesh: None,
            binding: MaterialBinding::Shared(initial),
            materials,
        }
    }

    /// Builder pattern: show `mesh` in both slots
    pub fn with_mesh(mut self, mesh: MeshHandle) -> Self {
        self.render_mesh = Some(mesh);
        self.collision_mesh = Some(mesh);
        self
    }
}

impl ModelRenderer for ModelRenderState {
    fn render_mesh(&self) -> Option<MeshHandle> {
        self.render_mesh
    }

    fn set_render_mesh(&mut self, mesh: MeshHandle) {
        self.render_mesh = Some(mesh);
    }

    fn collision_mesh(&self) -> Option<MeshHandle> {
        self.collision_mesh
    }

    fn set_collision_mesh(&mut self, mesh: MeshHandle) {
        self.collision_mesh = Some(mesh);
    }

    fn material_binding(&self) -> MaterialBinding {
        self.binding
    }

    fn set_material_binding(&mut self, binding: MaterialBinding) {
        self.binding = binding;
    }

    fn materials(&self) -> &MaterialStore {
        &self.materials
    }

    fn materials_mut(&mut self) -> &mut MaterialStore {
        &mut self.materials
    }
}
