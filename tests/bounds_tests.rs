//! Bounds calculator tests
//!
//! Tests for:
//! - Empty bounds at the node position
//! - Min/max over drawable region corners only
//! - Host scale and position
//! - Re-resolution of stale world transforms

use std::sync::Arc;

use glam::Vec2;
use marrow::assets::{
    AtlasPage, AtlasRegion, Attachment, BoneDefinition, BoundingBoxAttachment, PageId, RegionAttachment,
    RegionGeometry, SkeletonDefinition, Skin, SlotDefinition,
};
use marrow::instance::{Rect, compute_bounds};
use marrow::scene::SkeletonPose;

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-4;

fn rect_approx(a: Rect, b: Rect) -> bool {
    (a.origin - b.origin).abs().max_element() < EPSILON && (a.size - b.size).abs().max_element() < EPSILON
}

/// A 10×20 box centred on the root and a large bounding polygon on `tail`.
fn boxed() -> SkeletonPose {
    let skin = Skin::new("default")
        .with_attachment(
            0,
            "box",
            Attachment::Region(RegionAttachment {
                name: "box".into(),
                geometry: RegionGeometry::sized(10.0, 20.0),
                region: AtlasRegion::new(PageId(0), Vec2::splat(32.0), 0.0, 0.0, 10.0, 20.0, false),
            }),
        )
        .with_attachment(
            1,
            "reach",
            Attachment::BoundingBox(BoundingBoxAttachment {
                name: "reach".into(),
                vertices: vec![Vec2::splat(-500.0), Vec2::splat(500.0)],
            }),
        );

    let definition = SkeletonDefinition::new(
        "boxed",
        vec![BoneDefinition::root("root"), BoneDefinition::child("tail", 0).at(30.0, 0.0)],
        vec![
            SlotDefinition::new("box", 0).with_attachment("box"),
            SlotDefinition::new("reach", 1).with_attachment("reach"),
        ],
        vec![skin],
        vec![AtlasPage::new("boxed.png", 32, 32)],
    )
    .expect("valid definition");
    SkeletonPose::new(Arc::new(definition))
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn empty_pose_has_empty_bounds_at_position() {
    let mut pose = boxed();
    assert!(pose.set_attachment("box", None));

    let bounds = compute_bounds(&mut pose, Vec2::new(7.0, -3.0), Vec2::ONE);

    assert_eq!(bounds, Rect::new(Vec2::new(7.0, -3.0), Vec2::ZERO));
}

#[test]
fn bounding_boxes_do_not_count() {
    let mut pose = boxed();

    let bounds = compute_bounds(&mut pose, Vec2::ZERO, Vec2::ONE);

    assert!(rect_approx(bounds, Rect::new(Vec2::new(-5.0, -10.0), Vec2::new(10.0, 20.0))));
}

#[test]
fn host_scale_and_position_apply() {
    let mut pose = boxed();

    let bounds = compute_bounds(&mut pose, Vec2::new(100.0, 50.0), Vec2::new(2.0, 0.5));

    assert!(rect_approx(bounds, Rect::new(Vec2::new(90.0, 45.0), Vec2::new(20.0, 10.0))));
    assert!(bounds.contains(Vec2::new(100.0, 50.0)));
    assert!(!bounds.contains(Vec2::new(111.0, 50.0)));
}

#[test]
fn negative_scale_keeps_positive_size() {
    let mut pose = boxed();
    pose.bones_mut()[0].x = 5.0;

    let bounds = compute_bounds(&mut pose, Vec2::ZERO, Vec2::new(-1.0, 1.0));

    assert!(rect_approx(bounds, Rect::new(Vec2::new(-10.0, -10.0), Vec2::new(10.0, 20.0))));
}

#[test]
fn stale_transforms_are_re_resolved() {
    let mut pose = boxed();
    pose.bones_mut()[0].rotation = 90.0;
    pose.bones_mut()[0].x = 3.0;

    let bounds = compute_bounds(&mut pose, Vec2::ZERO, Vec2::ONE);

    assert!(rect_approx(bounds, Rect::new(Vec2::new(-7.0, -5.0), Vec2::new(20.0, 10.0))));
    assert!((pose.bones()[0].world_position().x - 3.0).abs() < EPSILON);
}

#[test]
fn skeleton_origin_shifts_bounds() {
    let mut pose = boxed();
    pose.origin = Vec2::new(0.0, 10.0);

    let bounds = compute_bounds(&mut pose, Vec2::ZERO, Vec2::ONE);

    assert!(rect_approx(bounds, Rect::new(Vec2::new(-5.0, 0.0), Vec2::new(10.0, 20.0))));
}
