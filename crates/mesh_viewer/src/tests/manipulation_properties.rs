//! Properties of pointer-driven manipulation over a range of inputs
//!
//! Every test runs against a tilted, off-axis camera and a parented node so
//! the projection and parent transforms are both exercised.

use crate::core::config::ManipulatorSettings;
use crate::foundation::math::{Quat, Transform, Vec2, Vec3};
use crate::manipulation::manipulator::{pointer_to_world, rotation_axis};
use crate::manipulation::{ManipulationMode, TransformManipulator};
use crate::render::{Camera, ScreenProjector};
use crate::scene::{ManipulationTarget, SceneNode};
use approx::assert_relative_eq;

const MODES: [ManipulationMode; 3] = [
    ManipulationMode::Rotate,
    ManipulationMode::Translate,
    ManipulationMode::Scale,
];

fn camera() -> Camera {
    let mut camera = Camera::perspective(Vec3::new(4.0, 3.0, 9.0), 50.0, 1024.0, 768.0, 0.1, 200.0);
    camera.look_at(Vec3::new(0.5, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
    camera
}

fn node() -> SceneNode {
    SceneNode::new("Model")
        .with_parent(Transform::from_parts(
            Vec3::new(0.0, 0.5, -1.0),
            Quat::from_euler_angles(0.0, 0.4, 0.0),
            Vec3::new(1.0, 1.0, 1.0),
        ))
        .with_local(Transform::from_parts(
            Vec3::new(0.3, -0.2, 0.6),
            Quat::from_euler_angles(0.2, -0.5, 0.1),
            Vec3::new(1.2, 1.2, 1.2),
        ))
}

fn pointer_samples() -> Vec<Vec2> {
    vec![
        Vec2::new(512.0, 384.0),
        Vec2::new(100.0, 700.0),
        Vec2::new(980.0, 20.0),
        Vec2::new(333.3, 412.5),
        Vec2::new(-50.0, 900.0),
    ]
}

#[test]
fn test_zero_delta_drag_changes_nothing_in_any_mode() {
    let camera = camera();
    for mode in MODES {
        for pointer in pointer_samples() {
            let mut node = node();
            let before = node.clone();

            let mut manipulator = TransformManipulator::with_target(ManipulatorSettings::default(), &mut node).unwrap();
            manipulator.set_mode(mode);
            manipulator.on_grab_start(&camera, pointer, None);
            manipulator.on_drag(&camera, pointer);
            drop(manipulator);

            assert_relative_eq!(node.local.position, before.local.position, epsilon = 1e-4);
            assert_relative_eq!(node.local.rotation, before.local.rotation, epsilon = 1e-6);
            assert_eq!(node.local.scale, before.local.scale, "{mode:?} at {pointer:?}");
        }
    }
}

#[test]
fn test_translate_preserves_grab_offset() {
    let camera = camera();
    let samples = pointer_samples();
    for &p0 in &samples {
        for &p1 in &samples {
            let mut node = node();
            let original = node.position();

            let mut manipulator = TransformManipulator::with_target(ManipulatorSettings::default(), &mut node).unwrap();
            manipulator.set_mode(ManipulationMode::Translate);
            manipulator.on_grab_start(&camera, p0, None);
            manipulator.on_drag(&camera, p1);
            drop(manipulator);

            let expected =
                pointer_to_world(&camera, original, p1) + (original - pointer_to_world(&camera, original, p0));
            assert_relative_eq!(node.position(), expected, epsilon = 1e-3);
        }
    }
}

#[test]
fn test_translate_keeps_view_depth_across_drags() {
    let camera = camera();
    let mut node = node();
    let depth = camera.world_to_screen(node.position()).z;

    let mut manipulator = TransformManipulator::with_target(ManipulatorSettings::default(), &mut node).unwrap();
    manipulator.set_mode(ManipulationMode::Translate);
    manipulator.on_grab_start(&camera, Vec2::new(400.0, 400.0), None);
    for pointer in pointer_samples() {
        manipulator.on_drag(&camera, pointer);
    }
    drop(manipulator);

    assert_relative_eq!(camera.world_to_screen(node.position()).z, depth, epsilon = 1e-3);
}

#[test]
fn test_scale_stays_within_bounds() {
    let camera = camera();
    let mut node = node();
    let mut manipulator = TransformManipulator::with_target(ManipulatorSettings::default(), &mut node).unwrap();
    manipulator.set_mode(ManipulationMode::Scale);
    manipulator.on_grab_start(&camera, Vec2::new(0.0, 0.0), None);

    let heights = [35.0, 260.0, -15.0, -900.0, 40.0, 1200.0, 1190.0, -3.0];
    for y in heights {
        manipulator.on_drag(&camera, Vec2::new(10.0, y));
        let scale = manipulator.target().map(|t| t.local_scale()).unwrap();
        for axis in scale.iter() {
            assert!((0.3..=2.0).contains(axis), "scale {axis} out of bounds after drag to {y}");
        }
    }
}

#[test]
fn test_scale_overshoot_clamps_to_boundary() {
    let camera = camera();
    let mut node = node();
    let mut manipulator = TransformManipulator::with_target(ManipulatorSettings::default(), &mut node).unwrap();
    manipulator.set_mode(ManipulationMode::Scale);
    manipulator.on_grab_start(&camera, Vec2::new(0.0, 0.0), None);

    // 1.2 + 0.9 would be 2.1
    manipulator.on_drag(&camera, Vec2::new(0.0, 90.0));
    assert_eq!(manipulator.target().map(|t| t.local_scale()), Some(Vec3::new(2.0, 2.0, 2.0)));

    // Back down from the boundary, not from the unclamped value
    manipulator.on_drag(&camera, Vec2::new(0.0, 40.0));
    let scale = manipulator.target().map(|t| t.local_scale()).unwrap();
    assert_relative_eq!(scale, Vec3::new(1.5, 1.5, 1.5), epsilon = 1e-5);
}

#[test]
fn test_rotation_axis_is_perpendicular_to_drag_in_view_plane() {
    let basis = camera().view_basis();
    let drags = [
        Vec2::new(1.0, 0.0),
        Vec2::new(-3.0, 7.0),
        Vec2::new(12.5, -40.0),
        Vec2::new(-0.2, -0.1),
    ];
    for delta in drags {
        let axis = rotation_axis(&basis, delta).unwrap().into_inner();
        let drag_world = (basis.right * delta.x + basis.up * delta.y).normalize();

        assert_relative_eq!(axis.dot(&drag_world), 0.0, epsilon = 1e-5);
        assert_relative_eq!(axis.dot(&basis.forward), 0.0, epsilon = 1e-5);
    }
    assert!(rotation_axis(&basis, Vec2::zeros()).is_none());
}

#[test]
fn test_rotation_accumulates_in_world_space() {
    let camera = camera();
    let mut node = node();
    let start = node.rotation();

    let mut manipulator = TransformManipulator::with_target(ManipulatorSettings::default(), &mut node).unwrap();
    manipulator.on_grab_start(&camera, Vec2::new(500.0, 380.0), None);
    manipulator.on_drag(&camera, Vec2::new(560.0, 300.0));
    drop(manipulator);

    let delta = Vec2::new(60.0, -80.0);
    let axis = rotation_axis(&camera.view_basis(), delta).unwrap();
    let step = Quat::from_axis_angle(&axis, (delta.norm() * 0.1).to_radians());
    assert_relative_eq!(node.rotation(), step * start, epsilon = 1e-5);
}

#[test]
fn test_reset_after_manipulation_yields_identity() {
    let camera = camera();
    let mut node = node();
    let mut manipulator = TransformManipulator::with_target(ManipulatorSettings::default(), &mut node).unwrap();

    for mode in MODES {
        manipulator.set_mode(mode);
        manipulator.on_grab_start(&camera, Vec2::new(300.0, 300.0), None);
        manipulator.on_drag(&camera, Vec2::new(420.0, 150.0));
    }
    manipulator.reset_transform();
    manipulator.reset_transform();
    drop(manipulator);

    assert_eq!(node.local.scale, Vec3::new(1.0, 1.0, 1.0));
    assert_eq!(node.local.position, Vec3::zeros());
    assert_relative_eq!(node.rotation(), Quat::identity(), epsilon = 1e-6);
}
