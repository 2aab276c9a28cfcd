//! # Transform Manipulator
//!
//! Interactive rotate/translate/scale of a single bound target.
//!
//! ## Screen-to-world mapping
//!
//! A pointer position alone names a ray, not a point. The manipulator picks
//! the point on that ray at the target's own view depth, i.e. on the plane
//! through the target parallel to the view plane. The pointer therefore
//! tracks a point at the object's distance from the viewer regardless of
//! the object's size.
//!
//! ## Grab lifecycle
//!
//! Every pointer-down replaces the [`GrabState`] as a whole: mode, pointer
//! position and grab offset are recorded together. Drags read and advance
//! that record. A drag without a grab on the current target does nothing.
//!
//! ## Per-mode update
//!
//! With `delta` the pointer travel since the previous event:
//! - **Translate**: `position = unproject(pointer) + grab_offset`
//! - **Rotate**: axis is `delta` turned -90 degrees about view-forward,
//!   angle is `|delta| * rotation_rate` degrees, applied in world space
//! - **Scale**: `scale += delta.y * scale_rate` per axis, clamped to the
//!   configured bounds

use crate::config::ConfigError;
use crate::core::config::{ManipulatorSettings, ModeSelection};
use crate::foundation::math::{constants, utils, Quat, Unit, Vec2, Vec3};
use crate::input::{PointerButton, PointerEvent};
use crate::render::{ScreenProjector, ViewBasis};
use crate::scene::ManipulationTarget;

use super::ManipulationMode;

/// Data recorded at pointer-down and consumed by the drags that follow
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrabState {
    /// Mode in effect for this grab
    pub mode: ManipulationMode,
    /// Pointer position seen by the last grab or drag
    pub previous_pointer: Vec2,
    /// Target position minus the world point under the pointer at grab time
    pub grab_offset: Vec3,
}

/// Result of a manipulator entry point
///
/// None of these are errors: a missing target or grab is routine while
/// panels are shown without a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManipulationOutcome {
    /// The target was updated (or the grab recorded)
    Applied,
    /// Nothing is bound; the call was ignored
    NoActiveTarget,
    /// A drag arrived without a preceding grab; the call was ignored
    NoActiveGrab,
}

impl ManipulationOutcome {
    /// Whether the call had an effect
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

/// Rotates, translates and scales one target from pointer input
///
/// The target is borrowed or owned through `T`: bind `&mut SceneNode` for a
/// node that lives elsewhere, or a `SceneNode` to hand ownership over.
#[derive(Debug)]
pub struct TransformManipulator<T> {
    settings: ManipulatorSettings,
    mode: ManipulationMode,
    target: Option<T>,
    grab: Option<GrabState>,
}

impl<T: ManipulationTarget> TransformManipulator<T> {
    /// Create a manipulator with nothing bound
    ///
    /// Fails when `settings` carry non-positive rates or scale bounds that
    /// do not form a range.
    pub fn new(settings: ManipulatorSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        Ok(Self {
            settings,
            mode: ManipulationMode::default(),
            target: None,
            grab: None,
        })
    }

    /// Create a manipulator bound to `target`
    pub fn with_target(settings: ManipulatorSettings, target: T) -> Result<Self, ConfigError> {
        let mut manipulator = Self::new(settings)?;
        manipulator.target = Some(target);
        Ok(manipulator)
    }

    /// Bind a new target, returning the previous one
    ///
    /// Any grab in progress belonged to the old target and is dropped.
    pub fn bind(&mut self, target: T) -> Option<T> {
        self.grab = None;
        log::debug!("Manipulator bound to new target");
        self.target.replace(target)
    }

    /// Unbind the current target
    pub fn unbind(&mut self) -> Option<T> {
        self.grab = None;
        self.target.take()
    }

    /// The bound target
    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    /// Mutable access to the bound target
    pub fn target_mut(&mut self) -> Option<&mut T> {
        self.target.as_mut()
    }

    /// Current settings
    pub fn settings(&self) -> &ManipulatorSettings {
        &self.settings
    }

    /// Mode the next grab will use (unless a button overrides it)
    pub fn mode(&self) -> ManipulationMode {
        self.mode
    }

    /// Select the mode for subsequent grabs
    ///
    /// A grab already in progress keeps the mode it started with.
    pub fn set_mode(&mut self, mode: ManipulationMode) {
        self.mode = mode;
    }

    /// The current grab record, if a grab is in progress
    pub fn grab(&self) -> Option<&GrabState> {
        self.grab.as_ref()
    }

    /// Start a grab at `pointer`
    ///
    /// With button-driven mode selection a reported button picks the mode;
    /// otherwise the explicitly set mode is used. The grab offset and
    /// previous pointer position are always recomputed.
    pub fn on_grab_start<P>(
        &mut self,
        projector: &P,
        pointer: Vec2,
        button: Option<PointerButton>,
    ) -> ManipulationOutcome
    where
        P: ScreenProjector + ?Sized,
    {
        let Some(target) = self.target.as_ref() else {
            log::trace!("Grab at {:?} ignored: no target bound", pointer);
            return ManipulationOutcome::NoActiveTarget;
        };

        if let (ModeSelection::PointerButton, Some(button)) = (self.settings.mode_selection, button) {
            self.mode = ManipulatorSettings::mode_for_button(button);
        }

        let position = target.position();
        let grab_point = pointer_to_world(projector, position, pointer);
        self.grab = Some(GrabState {
            mode: self.mode,
            previous_pointer: pointer,
            grab_offset: position - grab_point,
        });

        log::trace!("Grab started in {:?} mode at {:?}", self.mode, pointer);
        ManipulationOutcome::Applied
    }

    /// Continue the current grab with the pointer at `pointer`
    pub fn on_drag<P>(&mut self, projector: &P, pointer: Vec2) -> ManipulationOutcome
    where
        P: ScreenProjector + ?Sized,
    {
        let Some(target) = self.target.as_mut() else {
            return ManipulationOutcome::NoActiveTarget;
        };
        let Some(grab) = self.grab.as_mut() else {
            log::trace!("Drag to {:?} ignored: no grab in progress", pointer);
            return ManipulationOutcome::NoActiveGrab;
        };

        let delta = pointer - grab.previous_pointer;
        match grab.mode {
            ManipulationMode::Translate => {
                let world = pointer_to_world(projector, target.position(), pointer);
                target.set_position(world + grab.grab_offset);
            }
            ManipulationMode::Rotate => {
                if let Some(step) = rotation_step(&projector.view_basis(), delta, self.settings.rotation_rate) {
                    target.set_rotation(step * target.rotation());
                }
            }
            ManipulationMode::Scale => {
                if delta.y != 0.0 {
                    let grown = target.local_scale() + Vec3::repeat(delta.y * self.settings.scale_rate);
                    target.set_local_scale(utils::clamp_components(
                        grown,
                        self.settings.min_scale,
                        self.settings.max_scale,
                    ));
                }
            }
        }
        grab.previous_pointer = pointer;

        log::trace!("{:?} drag by {:?}", grab.mode, delta);
        ManipulationOutcome::Applied
    }

    /// Route a pointer event to [`Self::on_grab_start`] or [`Self::on_drag`]
    pub fn handle_event<P>(&mut self, projector: &P, event: PointerEvent) -> ManipulationOutcome
    where
        P: ScreenProjector + ?Sized,
    {
        match event {
            PointerEvent::Down { position, button } => self.on_grab_start(projector, position, button),
            PointerEvent::Drag { position } => self.on_drag(projector, position),
        }
    }

    /// Unit scale, zero local position, identity rotation
    pub fn reset_transform(&mut self) -> ManipulationOutcome {
        let Some(target) = self.target.as_mut() else {
            return ManipulationOutcome::NoActiveTarget;
        };

        target.set_local_scale(Vec3::new(1.0, 1.0, 1.0));
        target.set_local_position(Vec3::zeros());
        target.set_rotation(Quat::identity());

        log::debug!("Target transform reset");
        ManipulationOutcome::Applied
    }
}

/// World point under `pointer` at the view depth of `anchor`
pub fn pointer_to_world<P>(projector: &P, anchor: Vec3, pointer: Vec2) -> Vec3
where
    P: ScreenProjector + ?Sized,
{
    let depth = projector.world_to_screen(anchor).z;
    projector.screen_to_world(Vec3::new(pointer.x, pointer.y, depth))
}

/// World-space axis a drag of `delta` rotates about
///
/// The drag direction expressed in the view plane, turned a quarter turn
/// clockwise about view-forward. `None` for a zero-length drag.
pub fn rotation_axis(basis: &ViewBasis, delta: Vec2) -> Option<Unit<Vec3>> {
    if delta.norm() <= f32::EPSILON {
        return None;
    }

    let drag = basis.right * delta.x + basis.up * delta.y;
    let quarter_turn = Quat::from_axis_angle(&Unit::new_normalize(basis.forward), -constants::HALF_PI);
    Some(Unit::new_normalize(quarter_turn * drag))
}

fn rotation_step(basis: &ViewBasis, delta: Vec2, rotation_rate: f32) -> Option<Quat> {
    let axis = rotation_axis(basis, delta)?;
    let angle = utils::deg_to_rad(delta.norm() * rotation_rate);
    Some(Quat::from_axis_angle(&axis, angle))
}
