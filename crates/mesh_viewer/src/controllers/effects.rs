//! # Effects Controller
//!
//! Scene-wide look: which post-processing profile is active and which
//! lights are visible.
//!
//! Profiles are swapped whole; the scene never renders a mix of two. The
//! older per-component toggles ([`EffectsController::set_component_enabled`])
//! edit the active profile in place and are kept for effect lists that
//! predate profile swapping.

use crate::assets::{Catalog, CatalogKind};
use crate::error::{ViewerError, ViewerResult};
use crate::render::{LightKey, PostProcessProfile};
use crate::scene::SceneEffects;

/// Light, profile and effect toggle catalogs of a scene
#[derive(Debug, Clone)]
pub struct EffectCatalogs {
    /// Toggleable lights
    pub lights: Catalog<LightKey>,
    /// Selectable post-processing profiles
    pub profiles: Catalog<PostProcessProfile>,
    /// Effect display name to component type name
    pub effect_toggles: Catalog<String>,
}

impl EffectCatalogs {
    /// Empty catalogs
    pub fn new() -> Self {
        Self {
            lights: Catalog::new(CatalogKind::Light),
            profiles: Catalog::new(CatalogKind::PostProcessProfile),
            effect_toggles: Catalog::new(CatalogKind::EffectToggle),
        }
    }
}

impl Default for EffectCatalogs {
    fn default() -> Self {
        Self::new()
    }
}

/// Applies profile and light selections to a [`SceneEffects`]
#[derive(Debug)]
pub struct EffectsController<S> {
    scene: S,
    catalogs: EffectCatalogs,
    active_profile: Option<String>,
}

impl<S: SceneEffects> EffectsController<S> {
    /// Take control of `scene`'s lights and post-processing
    pub fn new(scene: S, catalogs: EffectCatalogs) -> Self {
        let active_profile = scene.active_profile().and_then(|active| {
            catalogs
                .profiles
                .find(|profile| profile == active)
                .map(|entry| entry.display_name().to_string())
        });

        log::info!(
            "Effects controller ready: {} lights, {} profiles",
            catalogs.lights.len(),
            catalogs.profiles.len()
        );
        Self {
            scene,
            catalogs,
            active_profile,
        }
    }

    /// Replace the scene's post-processing with profile `name`
    pub fn activate_profile(&mut self, name: &str) -> ViewerResult<()> {
        let profile = self.catalogs.profiles.payload(name)?.clone();

        self.scene.set_active_profile(profile);
        self.active_profile = Some(name.to_string());

        log::debug!("Activated post-processing profile '{}'", name);
        Ok(())
    }

    /// Show or hide light `name`
    pub fn set_light_visible(&mut self, name: &str, visible: bool) -> ViewerResult<()> {
        let key = *self.catalogs.lights.payload(name)?;
        if !self.scene.set_light_visible(key, visible) {
            return Err(ViewerError::NotResident {
                kind: CatalogKind::Light,
                name: name.to_string(),
            });
        }

        log::debug!("Light '{}' {}", name, if visible { "shown" } else { "hidden" });
        Ok(())
    }

    /// Whether light `name` is visible
    pub fn is_light_visible(&self, name: &str) -> ViewerResult<bool> {
        let key = *self.catalogs.lights.payload(name)?;
        self.scene.light_visible(key).ok_or_else(|| ViewerError::NotResident {
            kind: CatalogKind::Light,
            name: name.to_string(),
        })
    }

    /// `(name, visible)` for every resident light, in display order
    pub fn light_states(&self) -> Vec<(&str, bool)> {
        self.catalogs
            .lights
            .iter()
            .filter_map(|entry| {
                self.scene
                    .light_visible(*entry.payload())
                    .map(|visible| (entry.display_name(), visible))
            })
            .collect()
    }

    /// Catalog name of the active profile
    pub fn active_profile_name(&self) -> Option<&str> {
        self.active_profile.as_deref()
    }

    /// Switch one component of the active profile on or off
    ///
    /// `name` is matched against component type names: an exact match
    /// wins, otherwise it must be contained in exactly one type name.
    pub fn set_component_enabled(&mut self, name: &str, enabled: bool) -> ViewerResult<()> {
        let profile = self.scene.active_profile_mut().ok_or(ViewerError::NoActiveProfile)?;
        let index = resolve_component(profile, name)?;

        let component = &mut profile.components[index];
        component.active = enabled;
        log::debug!(
            "Effect component '{}' {}",
            component.type_name,
            if enabled { "enabled" } else { "disabled" }
        );
        Ok(())
    }

    /// Whether the component `name` resolves to is active
    pub fn is_component_enabled(&self, name: &str) -> ViewerResult<bool> {
        let profile = self.scene.active_profile().ok_or(ViewerError::NoActiveProfile)?;
        let index = resolve_component(profile, name)?;
        Ok(profile.components[index].active)
    }

    /// Toggle the component behind effect entry `display_name`
    pub fn set_effect_enabled(&mut self, display_name: &str, enabled: bool) -> ViewerResult<()> {
        let component = self.catalogs.effect_toggles.payload(display_name)?.clone();
        self.set_component_enabled(&component, enabled)
    }

    /// Whether the component behind effect entry `display_name` is active
    pub fn is_effect_enabled(&self, display_name: &str) -> ViewerResult<bool> {
        let component = self.catalogs.effect_toggles.payload(display_name)?;
        self.is_component_enabled(component)
    }

    /// Light names in display order
    pub fn light_names(&self) -> Vec<&str> {
        self.catalogs.lights.display_names()
    }

    /// Profile names in display order
    pub fn profile_names(&self) -> Vec<&str> {
        self.catalogs.profiles.display_names()
    }

    /// Effect toggle names in display order
    pub fn effect_names(&self) -> Vec<&str> {
        self.catalogs.effect_toggles.display_names()
    }

    /// The controlled scene
    pub fn scene(&self) -> &S {
        &self.scene
    }
}

fn resolve_component(profile: &PostProcessProfile, name: &str) -> ViewerResult<usize> {
    if name.is_empty() {
        return Err(ViewerError::not_found(CatalogKind::EffectComponent, name));
    }
    if let Some(index) = profile.components.iter().position(|c| c.type_name == name) {
        return Ok(index);
    }

    match profile.components_matching(name).as_slice() {
        [index] => Ok(*index),
        [] => Err(ViewerError::not_found(CatalogKind::EffectComponent, name)),
        several => Err(ViewerError::AmbiguousEffect {
            name: name.to_string(),
            matches: several
                .iter()
                .map(|&index| profile.components[index].type_name.clone())
                .collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::render::{EffectComponent, Light};
    use crate::scene::EffectsScene;

    fn cinematic() -> PostProcessProfile {
        PostProcessProfile::new("Cinematic")
            .with_component(EffectComponent::new("Bloom"))
            .with_component(EffectComponent::new("ColorAdjustments"))
            .with_component(EffectComponent::new("ColorCurves"))
            .with_component(EffectComponent::new("Vignette").with_active(false))
    }

    fn setup() -> (EffectsScene, EffectCatalogs) {
        let mut scene = EffectsScene::new();
        let key = scene.add_light(Light::point(Vec3::new(0.0, 3.0, 0.0), Vec3::new(1.0, 1.0, 1.0), 1.0), true);
        let hidden = scene.add_light(Light::point(Vec3::new(3.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0), 1.0), false);

        let mut catalogs = EffectCatalogs::new();
        catalogs.lights.push("Lamp", key).unwrap();
        catalogs.lights.push("Rim", hidden).unwrap();
        catalogs.profiles.push("Cinematic", cinematic()).unwrap();
        catalogs.profiles.push("Plain", PostProcessProfile::new("Plain")).unwrap();
        catalogs.effect_toggles.push("Glow", "Bloom".to_string()).unwrap();
        catalogs.effect_toggles.push("Grading", "Color".to_string()).unwrap();
        (scene, catalogs)
    }

    #[test]
    fn test_activate_profile_replaces_whole_profile() {
        let (mut scene, catalogs) = setup();
        let mut controller = EffectsController::new(&mut scene, catalogs);
        assert_eq!(controller.active_profile_name(), None);

        controller.activate_profile("Cinematic").unwrap();
        controller.activate_profile("Plain").unwrap();
        assert_eq!(controller.active_profile_name(), Some("Plain"));
        drop(controller);

        assert_eq!(scene.active_profile(), Some(&PostProcessProfile::new("Plain")));
    }

    #[test]
    fn test_initial_profile_name_read_from_scene() {
        let (mut scene, catalogs) = setup();
        scene.set_active_profile(cinematic());
        let controller = EffectsController::new(&mut scene, catalogs);
        assert_eq!(controller.active_profile_name(), Some("Cinematic"));
    }

    #[test]
    fn test_initial_profile_matched_by_contents() {
        let (mut scene, mut catalogs) = setup();
        let soft = PostProcessProfile::new("Cinematic").with_component(EffectComponent::new("Bloom"));
        catalogs.profiles.push("Film Look", soft.clone()).unwrap();
        scene.set_active_profile(soft);

        let controller = EffectsController::new(&mut scene, catalogs);
        assert_eq!(controller.active_profile_name(), Some("Film Look"));
    }

    #[test]
    fn test_light_visibility_defaults_to_scene_state() {
        let (mut scene, catalogs) = setup();
        let mut controller = EffectsController::new(&mut scene, catalogs);

        assert_eq!(controller.light_states(), vec![("Lamp", true), ("Rim", false)]);
        controller.set_light_visible("Rim", true).unwrap();
        assert!(controller.is_light_visible("Rim").unwrap());
    }

    #[test]
    fn test_removed_light_is_not_resident() {
        let (mut scene, catalogs) = setup();
        let rim = *catalogs.lights.payload("Rim").unwrap();
        scene.remove_light(rim);
        let mut controller = EffectsController::new(&mut scene, catalogs);

        assert!(matches!(
            controller.set_light_visible("Rim", true),
            Err(ViewerError::NotResident { kind: CatalogKind::Light, .. })
        ));
        assert_eq!(controller.light_states(), vec![("Lamp", true)]);
    }

    #[test]
    fn test_component_toggle_needs_active_profile() {
        let (mut scene, catalogs) = setup();
        let mut controller = EffectsController::new(&mut scene, catalogs);
        assert_eq!(controller.set_component_enabled("Bloom", false), Err(ViewerError::NoActiveProfile));
    }

    #[test]
    fn test_component_toggle_by_fragment() {
        let (mut scene, catalogs) = setup();
        let mut controller = EffectsController::new(&mut scene, catalogs);
        controller.activate_profile("Cinematic").unwrap();

        controller.set_component_enabled("Vign", true).unwrap();
        controller.set_effect_enabled("Glow", false).unwrap();

        assert!(controller.is_component_enabled("Vignette").unwrap());
        assert!(!controller.is_effect_enabled("Glow").unwrap());
    }

    #[test]
    fn test_ambiguous_fragment_changes_nothing() {
        let (mut scene, catalogs) = setup();
        let mut controller = EffectsController::new(&mut scene, catalogs);
        controller.activate_profile("Cinematic").unwrap();

        let err = controller.set_effect_enabled("Grading", false).unwrap_err();
        assert_eq!(
            err,
            ViewerError::AmbiguousEffect {
                name: "Color".to_string(),
                matches: vec!["ColorAdjustments".to_string(), "ColorCurves".to_string()],
            }
        );
        assert_eq!(
            controller.scene().active_profile().map(|p| p.active_component_names()),
            Some(vec!["Bloom", "ColorAdjustments", "ColorCurves"])
        );
    }

    #[test]
    fn test_unmatched_component_is_not_found() {
        let (mut scene, catalogs) = setup();
        let mut controller = EffectsController::new(&mut scene, catalogs);
        controller.activate_profile("Cinematic").unwrap();

        let err = controller.set_component_enabled("DepthOfField", true).unwrap_err();
        assert_eq!(err, ViewerError::not_found(CatalogKind::EffectComponent, "DepthOfField"));
    }

    #[test]
    fn test_empty_component_name_is_not_found() {
        let (mut scene, mut catalogs) = setup();
        catalogs
            .profiles
            .push("Bloom Only", PostProcessProfile::new("Bloom Only").with_component(EffectComponent::new("Bloom")))
            .unwrap();
        catalogs.effect_toggles.push("Nothing", String::new()).unwrap();
        let mut controller = EffectsController::new(&mut scene, catalogs);
        controller.activate_profile("Bloom Only").unwrap();

        let err = controller.set_component_enabled("", false).unwrap_err();
        assert_eq!(err, ViewerError::not_found(CatalogKind::EffectComponent, ""));
        let err = controller.set_effect_enabled("Nothing", false).unwrap_err();
        assert_eq!(err, ViewerError::not_found(CatalogKind::EffectComponent, ""));
        assert!(controller.is_component_enabled("Bloom").unwrap());
    }

    #[test]
    fn test_reactivating_restores_catalog_defaults() {
        let (mut scene, catalogs) = setup();
        let mut controller = EffectsController::new(&mut scene, catalogs);
        controller.activate_profile("Cinematic").unwrap();
        controller.set_component_enabled("Bloom", false).unwrap();

        controller.activate_profile("Cinematic").unwrap();
        assert!(controller.is_component_enabled("Bloom").unwrap());
    }
}
