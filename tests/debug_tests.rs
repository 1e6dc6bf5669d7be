//! Debug overlay tests
//!
//! Tests for:
//! - Slot outlines (color, width, closed quads in draw order)
//! - Bone lines and origin points
//! - Overlay toggles

use std::sync::Arc;

use glam::{Vec2, Vec4};
use marrow::assets::{
    AtlasPage, AtlasRegion, Attachment, BoneDefinition, PageId, RegionAttachment, RegionGeometry, SkeletonDefinition,
    Skin, SlotDefinition,
};
use marrow::render::DebugDraw;
use marrow::render::debug::{
    BONE_COLOR, BONE_POINT_COLOR, DebugOverlay, ROOT_POINT_COLOR, SLOT_COLOR, draw_bones, draw_slots,
};
use marrow::scene::SkeletonPose;

// ============================================================================
// Helper
// ============================================================================

const EPSILON: f32 = 1e-4;

fn vec2_approx(a: Vec2, b: Vec2) -> bool {
    (a - b).abs().max_element() < EPSILON
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Color(Vec4),
    LineWidth(f32),
    PointSize(f32),
    Polygon(Vec<Vec2>, bool),
    Line(Vec2, Vec2),
    Point(Vec2),
}

#[derive(Debug, Default)]
struct Recorder {
    commands: Vec<Command>,
}

impl Recorder {
    fn polygons(&self) -> Vec<&[Vec2]> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                Command::Polygon(points, true) => Some(points.as_slice()),
                _ => None,
            })
            .collect()
    }

    fn lines(&self) -> Vec<(Vec2, Vec2)> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                Command::Line(from, to) => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }
}

impl DebugDraw for Recorder {
    fn set_color(&mut self, color: Vec4) {
        self.commands.push(Command::Color(color));
    }

    fn set_line_width(&mut self, width: f32) {
        self.commands.push(Command::LineWidth(width));
    }

    fn set_point_size(&mut self, size: f32) {
        self.commands.push(Command::PointSize(size));
    }

    fn draw_polygon(&mut self, points: &[Vec2], closed: bool) {
        self.commands.push(Command::Polygon(points.to_vec(), closed));
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2) {
        self.commands.push(Command::Line(from, to));
    }

    fn draw_point(&mut self, point: Vec2) {
        self.commands.push(Command::Point(point));
    }
}

/// Root of length 10 and a child rotated up, with one 4×4 region each.
fn rig() -> SkeletonPose {
    let square = |name: &str| {
        Attachment::Region(RegionAttachment {
            name: name.into(),
            geometry: RegionGeometry::sized(4.0, 4.0),
            region: AtlasRegion::new(PageId(0), Vec2::splat(16.0), 0.0, 0.0, 4.0, 4.0, false),
        })
    };
    let skin = Skin::new("default")
        .with_attachment(0, "a", square("a"))
        .with_attachment(1, "b", square("b"));

    let definition = SkeletonDefinition::new(
        "rig",
        vec![
            BoneDefinition::root("root").with_length(10.0),
            BoneDefinition::child("up", 0).at(10.0, 0.0).rotated(90.0).with_length(5.0),
        ],
        vec![
            SlotDefinition::new("a", 0).with_attachment("a"),
            SlotDefinition::new("b", 1).with_attachment("b"),
        ],
        vec![skin],
        vec![AtlasPage::new("rig.png", 16, 16)],
    )
    .expect("valid definition");
    SkeletonPose::new(Arc::new(definition))
}

// ============================================================================
// Slots
// ============================================================================

#[test]
fn slots_are_blue_closed_outlines() {
    let pose = rig();
    let mut recorder = Recorder::default();

    draw_slots(&pose, &mut recorder);

    assert_eq!(recorder.commands[0], Command::Color(SLOT_COLOR));
    assert_eq!(recorder.commands[1], Command::LineWidth(1.0));
    assert_eq!(SLOT_COLOR, Vec4::new(0.0, 0.0, 1.0, 1.0));

    let polygons = recorder.polygons();
    assert_eq!(polygons.len(), 2);
    assert!(vec2_approx(polygons[0][0], Vec2::new(-2.0, -2.0)));
    assert!(vec2_approx(polygons[1][0], Vec2::new(12.0, -2.0)));
}

#[test]
fn empty_slots_have_no_outline() {
    let mut pose = rig();
    assert!(pose.set_attachment("a", None));
    let mut recorder = Recorder::default();

    draw_slots(&pose, &mut recorder);

    assert_eq!(recorder.polygons().len(), 1);
}

// ============================================================================
// Bones
// ============================================================================

#[test]
fn bones_are_red_lines_with_colored_origins() {
    let mut pose = rig();
    pose.origin = Vec2::new(1.0, 1.0);
    let mut recorder = Recorder::default();

    draw_bones(&pose, &mut recorder);

    assert_eq!(recorder.commands[0], Command::Color(BONE_COLOR));
    assert_eq!(recorder.commands[1], Command::LineWidth(2.0));

    let lines = recorder.lines();
    assert_eq!(lines.len(), 2);
    assert!(vec2_approx(lines[0].0, Vec2::new(1.0, 1.0)));
    assert!(vec2_approx(lines[0].1, Vec2::new(11.0, 1.0)));
    assert!(vec2_approx(lines[1].1, Vec2::new(11.0, 6.0)));

    let tail = &recorder.commands[recorder.commands.len() - 5..];
    assert_eq!(tail[0], Command::PointSize(4.0));
    assert_eq!(tail[1], Command::Color(ROOT_POINT_COLOR));
    assert!(matches!(tail[2], Command::Point(p) if vec2_approx(p, Vec2::new(1.0, 1.0))));
    assert_eq!(tail[3], Command::Color(BONE_POINT_COLOR));
    assert!(matches!(tail[4], Command::Point(p) if vec2_approx(p, Vec2::new(11.0, 1.0))));
}

// ============================================================================
// Toggles
// ============================================================================

#[test]
fn overlay_toggles_select_layers() {
    let pose = rig();

    let mut nothing = Recorder::default();
    DebugOverlay::default().draw(&pose, &mut nothing);
    assert!(nothing.commands.is_empty());

    let mut bones_only = Recorder::default();
    DebugOverlay {
        slots: false,
        bones: true,
    }
    .draw(&pose, &mut bones_only);
    assert!(bones_only.polygons().is_empty());
    assert_eq!(bones_only.lines().len(), 2);

    let mut both = Recorder::default();
    DebugOverlay { slots: true, bones: true }.draw(&pose, &mut both);
    assert_eq!(both.polygons().len(), 2);
    assert_eq!(both.lines().len(), 2);
}
