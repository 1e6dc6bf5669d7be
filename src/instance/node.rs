//! Host Scene Adapter
//!
//! A skeleton does not inherit from any host node type. The host passes its
//! transform and color in as a [`NodeTransform`] each frame, or wraps the
//! instance in a [`SkeletonNode`] and drives it through [`Drawable`].

use glam::{Vec2, Vec3};

use super::SkeletonInstance;
use super::bounds::Rect;
use crate::render::{DebugDraw, FrameStats, SkeletonRenderer};

/// Host-side transform and color of the node displaying a skeleton.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTransform {
    pub position: Vec2,
    pub scale: Vec2,
    /// Display color, multiplied into every vertex.
    pub color: Vec3,
    /// Display opacity in `[0, 1]`, folded into vertex alpha.
    pub opacity: f32,
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            scale: Vec2::ONE,
            color: Vec3::ONE,
            opacity: 1.0,
        }
    }
}

impl NodeTransform {
    #[must_use]
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }
}

/// Per-frame hooks a host scene calls on its drawables.
pub trait Drawable {
    fn update(&mut self, delta: f32);

    /// Draws the node, then the debug overlay when a surface is supplied.
    fn draw(&mut self, debug: Option<&mut dyn DebugDraw>) -> FrameStats;

    fn bounding_box(&mut self) -> Rect;
}

/// A [`SkeletonInstance`] together with the host transform it is drawn with.
#[derive(Debug)]
pub struct SkeletonNode<R> {
    pub transform: NodeTransform,
    pub visible: bool,
    instance: SkeletonInstance<R>,
}

impl<R: SkeletonRenderer> SkeletonNode<R> {
    #[must_use]
    pub fn new(instance: SkeletonInstance<R>) -> Self {
        Self {
            transform: NodeTransform::default(),
            visible: true,
            instance,
        }
    }

    #[inline]
    #[must_use]
    pub fn instance(&self) -> &SkeletonInstance<R> {
        &self.instance
    }

    #[inline]
    pub fn instance_mut(&mut self) -> &mut SkeletonInstance<R> {
        &mut self.instance
    }
}

impl<R: SkeletonRenderer> Drawable for SkeletonNode<R> {
    fn update(&mut self, delta: f32) {
        self.instance.update(delta);
    }

    fn draw(&mut self, debug: Option<&mut dyn DebugDraw>) -> FrameStats {
        if !self.visible {
            return FrameStats::default();
        }
        let stats = self.instance.render(&self.transform);
        if let Some(debug) = debug {
            self.instance.draw_debug(debug);
        }
        stats
    }

    fn bounding_box(&mut self) -> Rect {
        self.instance.bounds(&self.transform)
    }
}
