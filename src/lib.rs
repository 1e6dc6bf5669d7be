#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

//! Per-frame 2D skeletal rendering.
//!
//! A shared [`SkeletonDefinition`] describes bones, slots, skins and atlas
//! regions. Each [`SkeletonInstance`] owns a [`SkeletonPose`] built from it,
//! and every frame:
//!
//! 1. resolves bone world transforms ([`scene::transform_system`]),
//! 2. turns each slot's attachment into a tinted quad ([`render::vertex`]),
//! 3. streams the quads into a host batch, one draw call per page/blend run
//!    ([`render::emitter`]), or places one host sprite per slot
//!    ([`render::sprite`]),
//! 4. optionally draws a slot/bone overlay ([`render::debug`]).
//!
//! Bounds are computed on demand ([`instance::bounds`]).

pub mod assets;
pub mod errors;
pub mod instance;
pub mod render;
pub mod scene;

pub use assets::{Attachment, SkeletonDefinition, Skin};
pub use errors::{Result, SkeletonError};
pub use instance::{Drawable, InstanceSettings, NodeTransform, Rect, SkeletonInstance, SkeletonNode};
pub use render::{
    BatchEmitter, BlendFactor, BlendFunc, CpuQuadBatch, DebugDraw, FrameParams, FrameStats, QuadBatch, SkeletonRenderer,
    SpriteHost, SpriteRenderer,
};
pub use scene::{BoneState, SkeletonPose, SlotState};
