//! Bone transform resolution tests
//!
//! Tests for:
//! - Parent-before-child world transform propagation
//! - Idempotent resolution
//! - Bone endpoint from world rotation and length
//! - Root flip composition
//! - Setup pose round-trip

use std::sync::Arc;

use glam::{Mat2, Vec2};
use marrow::assets::{BoneDefinition, SkeletonDefinition, SlotDefinition};
use marrow::scene::transform_system::{RootFrame, resolve_bone, resolve_world_transforms};
use marrow::scene::{BoneState, SkeletonPose};

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec2_approx(a: Vec2, b: Vec2) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

/// root → arm → hand, arm rotated a quarter turn.
fn arm_definition() -> Arc<SkeletonDefinition> {
    let definition = SkeletonDefinition::new(
        "arm",
        vec![
            BoneDefinition::root("root").with_length(5.0),
            BoneDefinition::child("arm", 0).at(10.0, 0.0).rotated(90.0).with_length(20.0),
            BoneDefinition::child("hand", 1).at(20.0, 0.0).with_length(4.0),
        ],
        vec![SlotDefinition::new("hand", 2)],
        Vec::new(),
        Vec::new(),
    )
    .expect("valid definition");
    Arc::new(definition)
}

fn bones_of(definitions: &[BoneDefinition]) -> Vec<BoneState> {
    definitions.iter().map(BoneState::from_definition).collect()
}

// ============================================================================
// Propagation
// ============================================================================

#[test]
fn child_inherits_parent_rotation() {
    let pose = SkeletonPose::new(arm_definition());

    let arm = pose.find_bone("arm").expect("arm bone");
    let hand = pose.find_bone("hand").expect("hand bone");

    assert!(vec2_approx(arm.world_position(), Vec2::new(10.0, 0.0)));
    assert!(vec2_approx(hand.world_position(), Vec2::new(10.0, 20.0)));
    assert!(approx_eq(hand.world_rotation(), 90.0));
}

#[test]
fn parent_scale_moves_child() {
    let mut bones = bones_of(&[
        BoneDefinition::root("root").scaled(2.0, 3.0),
        BoneDefinition::child("child", 0).at(1.0, 1.0),
    ]);

    resolve_world_transforms(&mut bones, RootFrame::default());

    assert!(vec2_approx(bones[1].world_position(), Vec2::new(2.0, 3.0)));
    assert!(vec2_approx(bones[1].world_scale(), Vec2::new(2.0, 3.0)));
}

#[test]
fn resolve_bone_composes_with_given_parent() {
    let mut bone = BoneState::from_definition(&BoneDefinition::child("child", 0).at(1.0, 0.0));
    let parent = Mat2::from_angle(std::f32::consts::FRAC_PI_2);

    resolve_bone(&mut bone, parent, Vec2::new(5.0, 5.0));

    assert!(vec2_approx(bone.world_position(), Vec2::new(5.0, 6.0)));
    assert!(approx_eq(bone.world_rotation(), 90.0));
}

#[test]
fn resolution_is_idempotent() {
    let mut pose = SkeletonPose::new(arm_definition());
    pose.bones_mut()[1].rotation = 33.3;
    pose.bones_mut()[2].scale_x = 1.7;

    pose.update_world_transform();
    let first: Vec<_> = pose.bones().to_vec();
    pose.update_world_transform();

    for (a, b) in first.iter().zip(pose.bones()) {
        assert_eq!(a.world_matrix(), b.world_matrix());
        assert_eq!(a.world_position(), b.world_position());
    }
}

// ============================================================================
// Endpoint
// ============================================================================

#[test]
fn root_endpoint_follows_world_rotation() {
    let length = 10.0;
    let mut bones = bones_of(&[BoneDefinition::root("root").at(3.0, 4.0).rotated(30.0).with_length(length)]);

    resolve_world_transforms(&mut bones, RootFrame::default());

    let root = &bones[0];
    let theta = root.world_rotation().to_radians();
    let expected = Vec2::new(3.0 + length * theta.cos(), 4.0 + length * theta.sin());
    assert!(vec2_approx(root.tip(length), expected));
    assert!(vec2_approx(root.tip(length), Vec2::new(3.0 + 10.0 * 0.866_025_4, 9.0)));
}

// ============================================================================
// Flip
// ============================================================================

#[test]
fn flip_y_mirrors_the_whole_hierarchy() {
    let mut pose = SkeletonPose::new(arm_definition());
    pose.flip_y = true;
    pose.update_world_transform();

    let hand = pose.find_bone("hand").expect("hand bone");
    assert!(vec2_approx(hand.world_position(), Vec2::new(10.0, -20.0)));
    assert!(approx_eq(hand.world_rotation(), -90.0));
}

#[test]
fn flip_on_both_axes_is_a_half_turn() {
    let mut bones = bones_of(&[BoneDefinition::root("root").at(2.0, 1.0)]);

    resolve_world_transforms(
        &mut bones,
        RootFrame {
            flip_x: true,
            flip_y: true,
        },
    );

    assert!(vec2_approx(bones[0].world_position(), Vec2::new(-2.0, -1.0)));
    assert!(vec2_approx(bones[0].world_scale(), Vec2::ONE));
    assert!(approx_eq(bones[0].world_rotation().abs(), 180.0));
}

// ============================================================================
// Setup pose
// ============================================================================

#[test]
fn setup_pose_round_trip() {
    let definition = arm_definition();
    let fresh = SkeletonPose::new(Arc::clone(&definition));
    let mut pose = SkeletonPose::new(definition);

    for bone in pose.bones_mut() {
        bone.x += 7.0;
        bone.rotation -= 45.0;
        bone.scale_y = 0.25;
    }
    pose.update_world_transform();
    assert!(!vec2_approx(pose.bones()[2].world_position(), fresh.bones()[2].world_position()));

    pose.set_to_setup_pose();
    pose.update_world_transform();

    for (a, b) in pose.bones().iter().zip(fresh.bones()) {
        assert_eq!(a, b);
    }
}

#[test]
fn bones_setup_pass_leaves_world_cache_until_resolved() {
    let mut pose = SkeletonPose::new(arm_definition());
    pose.bones_mut()[0].x = 50.0;
    pose.update_world_transform();

    pose.set_bones_to_setup_pose();
    assert!(approx_eq(pose.bones()[0].world_position().x, 50.0));

    pose.update_world_transform();
    assert!(approx_eq(pose.bones()[0].world_position().x, 0.0));
}
