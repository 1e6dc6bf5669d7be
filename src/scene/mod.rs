//! Skeleton Pose Module
//!
//! Mutable per-instance state and the systems that update it:
//! - [`SkeletonPose`]: bones, slots, draw order, active skin
//! - [`BoneState`]: local pose + resolved world transform
//! - [`SlotState`]: current attachment + tint
//! - [`DrawOrder`]: back-to-front slot permutation
//! - [`transform_system`]: parent-before-child world transform resolution

pub mod bone;
pub mod draw_order;
pub mod pose;
pub mod slot;
pub mod transform_system;

pub use bone::BoneState;
pub use draw_order::DrawOrder;
pub use pose::{BoundingPolygon, SkeletonPose};
pub use slot::SlotState;
pub use transform_system::{RootFrame, resolve_world_transforms};
