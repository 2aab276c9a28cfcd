//! Scripted viewer sessions
//!
//! A session script is a RON list of [`SessionEvent`]s standing in for the
//! window and panel layer: pointer events in window coordinates (top-left
//! origin) and the button/toggle clicks a panel would send.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use mesh_viewer::prelude::*;

/// One input or panel event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Button pressed over the viewport
    PointerDown {
        /// Window x in pixels
        x: f64,
        /// Window y in pixels, from the top
        y: f64,
        /// Pressed button
        #[serde(default = "default_button")]
        button: PointerButton,
    },
    /// Pointer moved
    PointerDrag {
        /// Window x in pixels
        x: f64,
        /// Window y in pixels, from the top
        y: f64,
    },
    /// Button released
    PointerUp,
    /// Toolbar mode button
    SetMode(ManipulationMode),
    /// Reset button
    ResetTransform,
    /// Mesh list click
    SelectMesh(String),
    /// Material list click
    SelectMaterial(String),
    /// Texture list click
    SelectTexture(String),
    /// Profile list click
    ActivateProfile(String),
    /// Light toggle
    SetLightVisible {
        /// Light display name
        name: String,
        /// New state
        visible: bool,
    },
    /// Legacy effect toggle
    SetEffectEnabled {
        /// Effect display name
        name: String,
        /// New state
        enabled: bool,
    },
}

fn default_button() -> PointerButton {
    PointerButton::Left
}

/// Errors reading a session script
#[derive(Debug, Error)]
pub enum SessionError {
    /// Script could not be read
    #[error("cannot read session script {path}: {source}")]
    Io {
        /// Script path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Script is not a valid event list
    #[error("invalid session script {path}: {message}")]
    Parse {
        /// Script path
        path: PathBuf,
        /// Parser message
        message: String,
    },
}

/// Load a RON event list
pub fn load_script(path: impl AsRef<Path>) -> Result<Vec<SessionEvent>, SessionError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| SessionError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&contents).map_err(|e| SessionError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Counts of how the events of a run were handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Events that changed viewer state
    pub applied: usize,
    /// Pointer events the manipulator ignored
    pub ignored: usize,
    /// Events rejected with an error
    pub rejected: usize,
}

/// The three controllers wired to one in-memory scene
pub struct Session {
    camera: Camera,
    pointer: PointerState,
    manipulator: TransformManipulator<SceneNode>,
    assets: AssetCatalogController<ModelRenderState>,
    effects: EffectsController<EffectsScene>,
}

impl Session {
    /// Wire controllers to `scene` using `config`
    pub fn new(config: &ViewerConfig, scene: ViewerScene) -> Result<Self, ConfigError> {
        let ViewerScene {
            node,
            model,
            effects,
            model_catalogs,
            effect_catalogs,
        } = scene;

        Ok(Self {
            camera: config.camera.build(&config.viewport),
            pointer: PointerState::new(config.viewport.width, config.viewport.height),
            manipulator: TransformManipulator::with_target(config.manipulator.clone(), node)?,
            assets: AssetCatalogController::new(model, model_catalogs),
            effects: EffectsController::new(effects, effect_catalogs),
        })
    }

    /// Dispatch events in order, logging and skipping rejected ones
    pub fn run(&mut self, events: &[SessionEvent]) -> SessionSummary {
        let mut summary = SessionSummary::default();
        for (index, event) in events.iter().enumerate() {
            match self.dispatch(event) {
                Ok(true) => summary.applied += 1,
                Ok(false) => summary.ignored += 1,
                Err(err) => {
                    if err.is_not_found() {
                        log::warn!("Event {} ({:?}) skipped: {}", index, event, err);
                    } else {
                        log::warn!("Event {} ({:?}) rejected: {}", index, event, err);
                    }
                    summary.rejected += 1;
                }
            }
        }
        summary
    }

    /// Handle one event; `Ok(false)` means it was a no-op
    pub fn dispatch(&mut self, event: &SessionEvent) -> ViewerResult<bool> {
        match event {
            SessionEvent::PointerDown { x, y, button } => {
                let down = self.pointer.press(*x, *y, *button);
                Ok(self.manipulator.handle_event(&self.camera, down).is_applied())
            }
            SessionEvent::PointerDrag { x, y } => Ok(match self.pointer.motion(*x, *y) {
                Some(drag) => self.manipulator.handle_event(&self.camera, drag).is_applied(),
                None => false,
            }),
            SessionEvent::PointerUp => {
                self.pointer.release();
                Ok(true)
            }
            SessionEvent::SetMode(mode) => {
                self.manipulator.set_mode(*mode);
                Ok(true)
            }
            SessionEvent::ResetTransform => Ok(self.manipulator.reset_transform().is_applied()),
            SessionEvent::SelectMesh(name) => self.assets.select_mesh(name).map(|()| true),
            SessionEvent::SelectMaterial(name) => self.assets.select_material(name).map(|()| true),
            SessionEvent::SelectTexture(name) => self.assets.select_texture(name).map(|()| true),
            SessionEvent::ActivateProfile(name) => self.effects.activate_profile(name).map(|()| true),
            SessionEvent::SetLightVisible { name, visible } => {
                self.effects.set_light_visible(name, *visible).map(|()| true)
            }
            SessionEvent::SetEffectEnabled { name, enabled } => {
                self.effects.set_effect_enabled(name, *enabled).map(|()| true)
            }
        }
    }

    /// Log what the viewer currently shows
    pub fn log_state(&self) {
        if let Some(node) = self.manipulator.target() {
            let world = node.world_transform();
            log::info!(
                "Model '{}': position {:?}, rotation {:.1} deg, scale {:?}",
                node.name,
                world.position.as_slice(),
                world.rotation.angle().to_degrees(),
                world.scale.as_slice()
            );
        }

        let selection = self.assets.selection();
        log::info!(
            "Selection: mesh {:?}, material {:?}, texture {:?}",
            selection.mesh,
            selection.material,
            selection.texture
        );
        if let Some(material) = self.assets.renderer().active_material() {
            log::info!(
                "Active material '{}' (normal mapping {})",
                material.name,
                if material.normal_mapping_enabled() { "on" } else { "off" }
            );
        }

        log::info!("Profile: {:?}", self.effects.active_profile_name());
        for (name, visible) in self.effects.light_states() {
            log::info!("Light '{}': {}", name, if visible { "visible" } else { "hidden" });
        }
    }

    /// Release controller-owned resources
    pub fn finish(mut self) {
        self.assets.teardown();
        let store = self.assets.renderer().materials();
        log::info!(
            "Material instances: {} created, {} released",
            store.instances_created(),
            store.instances_released()
        );
    }
}
