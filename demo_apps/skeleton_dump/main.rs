//! Loads a skeleton snapshot (the path given as first argument, or a small
//! built-in lantern), animates a bone for a few frames and logs what each
//! frame would submit to the GPU.
//!
//! ```text
//! RUST_LOG=debug cargo run -p skeleton_dump -- path/to/skeleton.json
//! ```

use std::sync::Arc;

use glam::{Vec2, Vec4};
use log::info;
use marrow::assets::SkeletonDefinition;
use marrow::instance::{Drawable, InstanceSettings, NodeTransform, SkeletonInstance, SkeletonNode};
use marrow::render::{BatchEmitter, CpuQuadBatch, DebugDraw};

const LANTERN: &str = r#"{
    "name": "lantern",
    "pages": [{ "name": "lantern.png", "width": 64, "height": 64 }],
    "bones": [
        { "name": "root", "length": 4 },
        { "name": "handle", "parent": "root", "y": 12, "rotation": 90, "length": 6 }
    ],
    "slots": [
        { "name": "body", "bone": "root", "attachment": "body" },
        { "name": "flame", "bone": "handle", "attachment": "flame", "additive": true },
        { "name": "hit", "bone": "root", "attachment": "hit" }
    ],
    "skins": [{
        "name": "default",
        "attachments": {
            "body": {
                "body": {
                    "type": "region", "width": 16, "height": 24,
                    "region": { "page": 0, "x": 0, "y": 0, "width": 16, "height": 24 }
                }
            },
            "flame": {
                "flame": {
                    "type": "regionSequence", "width": 8, "height": 8, "frameTime": 0.1, "mode": "pingPong",
                    "frames": [
                        { "page": 0, "x": 16, "y": 0, "width": 8, "height": 8 },
                        { "page": 0, "x": 24, "y": 0, "width": 8, "height": 8 },
                        { "page": 0, "x": 32, "y": 0, "width": 8, "height": 8 }
                    ]
                }
            },
            "hit": {
                "hit": { "type": "boundingBox", "vertices": [[-8, -12], [8, -12], [8, 12], [-8, 12]] }
            }
        }
    }]
}"#;

/// Counts overlay primitives instead of drawing them.
#[derive(Default)]
struct OverlayCounter {
    polygons: usize,
    lines: usize,
    points: usize,
}

impl DebugDraw for OverlayCounter {
    fn set_color(&mut self, _color: Vec4) {}
    fn set_line_width(&mut self, _width: f32) {}
    fn set_point_size(&mut self, _size: f32) {}

    fn draw_polygon(&mut self, _points: &[Vec2], _closed: bool) {
        self.polygons += 1;
    }

    fn draw_line(&mut self, _from: Vec2, _to: Vec2) {
        self.lines += 1;
    }

    fn draw_point(&mut self, _point: Vec2) {
        self.points += 1;
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let definition = match std::env::args().nth(1) {
        Some(path) => {
            info!("Loading skeleton from: {path}");
            SkeletonDefinition::from_json_file(&path, 1.0)?
        }
        None => SkeletonDefinition::from_json(LANTERN, 1.0)?,
    };

    let settings = InstanceSettings {
        debug_slots: true,
        debug_bones: true,
        ..Default::default()
    };
    let root_name = definition.bones().first().map(|bone| bone.name.clone());
    let instance = SkeletonInstance::new(
        Arc::new(definition),
        true,
        BatchEmitter::new(CpuQuadBatch::new(4)),
        settings,
    );

    let definition = instance.pose().definition();
    info!(
        "Skeleton '{}': {} bones, {} slots, {} skins, {} pages",
        definition.name,
        definition.bones().len(),
        definition.slots().len(),
        definition.skins().len(),
        definition.pages().len()
    );

    let mut node = SkeletonNode::new(instance);
    node.transform = NodeTransform::at(Vec2::new(160.0, 120.0));

    for frame in 0..5 {
        if let Some(name) = &root_name
            && let Some(root) = node.instance_mut().pose_mut().find_bone_mut(name)
        {
            root.rotation = frame as f32 * 15.0;
        }
        node.update(1.0 / 30.0);

        let mut overlay = OverlayCounter::default();
        let stats = node.draw(Some(&mut overlay));
        let bounds = node.bounding_box();

        info!(
            "frame {frame}: {} draw call(s), {} quad(s), {} skipped, {} truncated, {} growth(s); \
             bounds {:?}+{:?}; overlay {} polygon(s) {} line(s) {} point(s)",
            stats.draw_calls,
            stats.quads,
            stats.skipped_slots,
            stats.truncated_slots,
            stats.growths,
            bounds.origin,
            bounds.size,
            overlay.polygons,
            overlay.lines,
            overlay.points
        );

        for call in node.instance_mut().renderer_mut().batch_mut().take_draw_calls() {
            info!(
                "    page {} blend {:?}/{:?}: {} quad(s)",
                call.state.page.0,
                call.state.blend.src,
                call.state.blend.dst,
                call.quads.len()
            );
        }
    }

    for polygon in node.instance().pose().bounding_polygons() {
        info!("hit polygon '{}' on slot {}: {:?}", polygon.name, polygon.slot, polygon.vertices);
    }

    Ok(())
}
