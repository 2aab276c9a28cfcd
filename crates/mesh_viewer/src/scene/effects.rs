//! Lights and post-processing of the scene

use slotmap::SlotMap;

use crate::render::{Light, LightKey, PostProcessProfile, SceneLight};

/// Scene state the effects controller switches
pub trait SceneEffects {
    /// Profile the scene renders with
    fn active_profile(&self) -> Option<&PostProcessProfile>;

    /// Mutable access to the active profile's components
    fn active_profile_mut(&mut self) -> Option<&mut PostProcessProfile>;

    /// Replace the active profile as a whole
    fn set_active_profile(&mut self, profile: PostProcessProfile);

    /// Visibility of a light, `None` if the light is not in the scene
    fn light_visible(&self, light: LightKey) -> Option<bool>;

    /// Show or hide a light; returns `false` if the light is not in the scene
    fn set_light_visible(&mut self, light: LightKey, visible: bool) -> bool;
}

impl<T: SceneEffects + ?Sized> SceneEffects for &mut T {
    fn active_profile(&self) -> Option<&PostProcessProfile> {
        (**self).active_profile()
    }

    fn active_profile_mut(&mut self) -> Option<&mut PostProcessProfile> {
        (**self).active_profile_mut()
    }

    fn set_active_profile(&mut self, profile: PostProcessProfile) {
        (**self).set_active_profile(profile)
    }

    fn light_visible(&self, light: LightKey) -> Option<bool> {
        (**self).light_visible(light)
    }

    fn set_light_visible(&mut self, light: LightKey, visible: bool) -> bool {
        (**self).set_light_visible(light, visible)
    }
}

/// In-memory light set and profile slot
#[derive(Debug, Default)]
pub struct EffectsScene {
    lights: SlotMap<LightKey, SceneLight>,
    active_profile: Option<PostProcessProfile>,
}

impl EffectsScene {
    /// Create a scene with no lights and no profile
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a light in the scene
    pub fn add_light(&mut self, light: Light, visible: bool) -> LightKey {
        self.lights.insert(SceneLight { light, visible })
    }

    /// Take a light out of the scene
    pub fn remove_light(&mut self, key: LightKey) -> Option<SceneLight> {
        self.lights.remove(key)
    }

    /// A resident light
    pub fn light(&self, key: LightKey) -> Option<&SceneLight> {
        self.lights.get(key)
    }

    /// Lights that currently contribute to the scene
    pub fn visible_lights(&self) -> impl Iterator<Item = &SceneLight> {
        self.lights.values().filter(|light| light.visible)
    }
}

impl SceneEffects for EffectsScene {
    fn active_profile(&self) -> Option<&PostProcessProfile> {
        self.active_profile.as_ref()
    }

    fn active_profile_mut(&mut self) -> Option<&mut PostProcessProfile> {
        self.active_profile.as_mut()
    }

    fn set_active_profile(&mut self, profile: PostProcessProfile) {
        self.active_profile = Some(profile);
    }

    fn light_visible(&self, light: LightKey) -> Option<bool> {
        self.lights.get(light).map(|light| light.visible)
    }

    fn set_light_visible(&mut self, light: LightKey, visible: bool) -> bool {
        match self.lights.get_mut(light) {
            Some(light) => {
                light.visible = visible;
                true
            }
            None => false,
        }
    }
}
