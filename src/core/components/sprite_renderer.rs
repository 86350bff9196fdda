//=========================================================================
// Sprite Renderer
//=========================================================================
//
// Draws a texture region at the owner's world transform, inside the batch
// of the component's render camera.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::math::Color;
use crate::core::object::{Capability, Component, ComponentContext};
use crate::core::render::TextureRegion;

//=== SpriteRenderer ======================================================

/// Renders a single texture region.
///
/// # Example
///
/// ```rust
/// # use tessera_engine::prelude::*;
/// let region = TextureRegion::whole(TextureId(1), 64, 32);
/// let sprite = SpriteRenderer::new(region)
///     .with_color(Color::RED)
///     .sized_from_region(true);
///
/// assert_eq!(sprite.color(), Color::RED);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteRenderer {
    region: TextureRegion,
    color: Color,
    flip_x: bool,
    flip_y: bool,
    size_from_region: bool,
}

impl SpriteRenderer {
    pub fn new(region: TextureRegion) -> Self {
        Self {
            region,
            color: Color::WHITE,
            flip_x: false,
            flip_y: false,
            size_from_region: false,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// On attach, sets the owner's size to the region size in world units.
    pub fn sized_from_region(mut self, enabled: bool) -> Self {
        self.size_from_region = enabled;
        self
    }

    pub fn region(&self) -> &TextureRegion {
        &self.region
    }

    pub fn set_region(&mut self, region: TextureRegion) {
        self.region = region;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn flip(&self) -> (bool, bool) {
        (self.flip_x, self.flip_y)
    }

    pub fn set_flip(&mut self, flip_x: bool, flip_y: bool) {
        self.flip_x = flip_x;
        self.flip_y = flip_y;
    }
}

impl Component for SpriteRenderer {
    fn capabilities(&self) -> &'static [Capability] {
        &[Capability::Renderer]
    }

    fn attach(&mut self, ctx: &mut ComponentContext<'_>) {
        if !self.size_from_region {
            return;
        }
        let units = *ctx.scene.world_units();
        let width = units.to_world_units(self.region.width as f32);
        let height = units.to_world_units(self.region.height as f32);
        if let Some(transform) = ctx.transform_mut() {
            let depth = transform.size.z;
            transform.set_size(width, height, depth);
        }
    }

    fn render(&mut self, ctx: &mut ComponentContext<'_>) {
        let Some(world) = ctx.world_transform() else {
            return;
        };
        ctx.renderer()
            .draw_region(&self.region, &world, self.color, self.flip_x, self.flip_y);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
