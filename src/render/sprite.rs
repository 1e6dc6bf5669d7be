//! Sprite Renderer
//!
//! Alternate render path for hosts that draw through their own sprite
//! objects instead of a quad batch. Each slot owns at most one host sprite,
//! created the first time the slot becomes drawable and hidden (never
//! destroyed) while it is not.
//!
//! A sprite is placed at the bone's world origin with the bone's full world
//! linear map, and carries the region corners in bone space.
//! [`SpritePlacement::world_corners`] equals the batched quad.

use glam::{Mat2, Vec2, Vec4};

use crate::assets::PageId;
use crate::render::blend::BlendFunc;
use crate::render::vertex::vertex_color;
use crate::render::{FrameParams, FrameStats, SkeletonRenderer};
use crate::scene::SkeletonPose;

/// Everything a host needs to place one slot's sprite for the current frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SpritePlacement {
    pub slot: usize,
    /// Position in the draw order; higher draws on top.
    pub z: usize,
    pub page: PageId,
    /// Texture coordinates, winding BL, BR, TR, TL.
    pub uvs: [Vec2; 4],
    /// Region corners in bone space, same winding.
    pub corners: [Vec2; 4],
    /// Bone origin plus skeleton origin.
    pub position: Vec2,
    /// Bone world linear map, shear included.
    pub transform: Mat2,
    pub color: Vec4,
    pub blend: BlendFunc,
}

impl SpritePlacement {
    /// Corners after applying the transform and position.
    #[must_use]
    pub fn world_corners(&self) -> [Vec2; 4] {
        self.corners.map(|corner| self.position + self.transform * corner)
    }
}

/// Sprite objects owned by the host scene.
pub trait SpriteHost {
    type Sprite;

    /// Creates the sprite for `slot`. Called once per slot, lazily.
    fn create_sprite(&mut self, slot: usize) -> Self::Sprite;

    /// Places, textures and shows the sprite.
    fn update_sprite(&mut self, sprite: &mut Self::Sprite, placement: &SpritePlacement);

    fn hide_sprite(&mut self, sprite: &mut Self::Sprite);
}

#[derive(Debug)]
pub struct SpriteRenderer<H: SpriteHost> {
    host: H,
    sprites: Vec<Option<H::Sprite>>,
}

impl<H: SpriteHost> SpriteRenderer<H> {
    #[must_use]
    pub fn new(host: H) -> Self {
        Self {
            host,
            sprites: Vec::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[inline]
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The sprite created for `slot`, if it has been drawable at least once.
    #[must_use]
    pub fn sprite(&self, slot: usize) -> Option<&H::Sprite> {
        self.sprites.get(slot)?.as_ref()
    }

    /// Updates one sprite per slot, in draw order.
    pub fn update_sprites(&mut self, pose: &SkeletonPose, params: &FrameParams) -> FrameStats {
        let mut stats = FrameStats::default();
        let definition = pose.definition();
        let time = pose.time();

        if self.sprites.len() < pose.slots().len() {
            self.sprites.resize_with(pose.slots().len(), || None);
        }

        for (z, slot_index) in pose.draw_order().iter().enumerate() {
            let slot = &pose.slots()[slot_index];
            let drawable = slot.attachment().map(|attachment| {
                attachment.drawable_region(slot.frame_at(time))
            });

            let Some(Some((geometry, region))) = drawable else {
                if matches!(drawable, Some(None)) {
                    stats.skipped_slots += 1;
                }
                if let Some(sprite) = self.sprites[slot_index].as_mut() {
                    self.host.hide_sprite(sprite);
                }
                continue;
            };

            let bone = &pose.bones()[slot.bone()];
            let blend = if definition.slots()[slot_index].additive_blending {
                params.blend.additive()
            } else {
                params.blend
            };
            let placement = SpritePlacement {
                slot: slot_index,
                z,
                page: region.page,
                uvs: region.quad_uvs(),
                corners: geometry.local_corners(region),
                position: pose.origin + bone.world_position(),
                transform: bone.world_matrix(),
                color: vertex_color(params.skeleton_tint, slot.color, params.premultiplied_alpha),
                blend,
            };

            let host = &mut self.host;
            let sprite = self.sprites[slot_index].get_or_insert_with(|| host.create_sprite(slot_index));
            self.host.update_sprite(sprite, &placement);

            stats.quads += 1;
            stats.draw_calls += 1;
        }

        stats
    }
}

impl<H: SpriteHost> SkeletonRenderer for SpriteRenderer<H> {
    fn render(&mut self, pose: &SkeletonPose, params: &FrameParams) -> FrameStats {
        self.update_sprites(pose, params)
    }
}
