//! Transformable scene nodes

use crate::foundation::math::{Quat, Transform, Vec3};

/// Something a [`TransformManipulator`](crate::manipulation::TransformManipulator) can move
///
/// Positions and rotations are in world space unless the method name says
/// otherwise. Scale is always local.
pub trait ManipulationTarget {
    /// World-space position
    fn position(&self) -> Vec3;

    /// Move to a world-space position
    fn set_position(&mut self, position: Vec3);

    /// Set the position relative to the parent
    fn set_local_position(&mut self, position: Vec3);

    /// World-space rotation
    fn rotation(&self) -> Quat;

    /// Set the world-space rotation
    fn set_rotation(&mut self, rotation: Quat);

    /// Scale relative to the parent
    fn local_scale(&self) -> Vec3;

    /// Set the scale relative to the parent
    fn set_local_scale(&mut self, scale: Vec3);
}

impl<T: ManipulationTarget + ?Sized> ManipulationTarget for &mut T {
    fn position(&self) -> Vec3 {
        (**self).position()
    }

    fn set_position(&mut self, position: Vec3) {
        (**self).set_position(position)
    }

    fn set_local_position(&mut self, position: Vec3) {
        (**self).set_local_position(position)
    }

    fn rotation(&self) -> Quat {
        (**self).rotation()
    }

    fn set_rotation(&mut self, rotation: Quat) {
        (**self).set_rotation(rotation)
    }

    fn local_scale(&self) -> Vec3 {
        (**self).local_scale()
    }

    fn set_local_scale(&mut self, scale: Vec3) {
        (**self).set_local_scale(scale)
    }
}

/// A named node with a local transform under an optional fixed parent
///
/// The parent scale must be non-zero on every axis for world positions to
/// map back to local ones.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    /// Name for debugging
    pub name: String,
    /// Parent transform, `None` for a root node
    pub parent: Option<Transform>,
    /// Transform relative to the parent
    pub local: Transform,
}

impl SceneNode {
    /// Create a root node at the origin
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            local: Transform::identity(),
        }
    }

    /// Builder pattern: attach under a parent transform
    pub fn with_parent(mut self, parent: Transform) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Builder pattern: set the local transform
    pub fn with_local(mut self, local: Transform) -> Self {
        self.local = local;
        self
    }

    /// Composite parent * local transform
    pub fn world_transform(&self) -> Transform {
        match &self.parent {
            Some(parent) => parent.combine(&self.local),
            None => self.local,
        }
    }
}

impl ManipulationTarget for SceneNode {
    fn position(&self) -> Vec3 {
        match &self.parent {
            Some(parent) => parent.transform_point(self.local.position),
            None => self.local.position,
        }
    }

    fn set_position(&mut self, position: Vec3) {
        self.local.position = match &self.parent {
            Some(parent) => parent.inverse_transform_point(position),
            None => position,
        };
    }

    fn set_local_position(&mut self, position: Vec3) {
        self.local.position = position;
    }

    fn rotation(&self) -> Quat {
        match &self.parent {
            Some(parent) => parent.rotation * self.local.rotation,
            None => self.local.rotation,
        }
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.local.rotation = match &self.parent {
            Some(parent) => parent.rotation.inverse() * rotation,
            None => rotation,
        };
    }

    fn local_scale(&self) -> Vec3 {
        self.local.scale
    }

    fn set_local_scale(&mut self, scale: Vec3) {
        self.local.scale = scale;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::constants;
    use approx::assert_relative_eq;

    fn parented_node() -> SceneNode {
        SceneNode::new("Model").with_parent(Transform::from_parts(
            Vec3::new(2.0, 0.0, -1.0),
            Quat::from_axis_angle(&Vec3::y_axis(), constants::HALF_PI),
            Vec3::new(2.0, 2.0, 2.0),
        ))
    }

    #[test]
    fn test_world_position_round_trips_through_parent() {
        let mut node = parented_node();
        let target = Vec3::new(-3.0, 1.5, 4.0);

        node.set_position(target);
        assert_relative_eq!(node.position(), target, epsilon = 1e-4);
        assert_relative_eq!(node.world_transform().position, target, epsilon = 1e-4);
    }

    #[test]
    fn test_world_rotation_accounts_for_parent() {
        let mut node = parented_node();
        node.set_rotation(Quat::identity());

        assert_relative_eq!(node.rotation(), Quat::identity(), epsilon = 1e-5);
        assert!(node.local.rotation.angle() > 1.0);
    }

    #[test]
    fn test_mutable_reference_forwards() {
        fn nudge<T: ManipulationTarget>(mut target: T) {
            target.set_local_scale(Vec3::new(1.5, 1.5, 1.5));
            target.set_local_position(Vec3::new(0.0, 1.0, 0.0));
        }

        let mut node = SceneNode::new("Model");
        nudge(&mut node);
        assert_eq!(node.local.scale, Vec3::new(1.5, 1.5, 1.5));
        assert_eq!(node.position(), Vec3::new(0.0, 1.0, 0.0));
    }
}
