//=========================================================================
// Debug Renderer
//=========================================================================
//
// Outlines game objects with debug primitives during the scene's debug
// shape passes.
//
// The scene runs three passes per frame (filled, line, point). A debug
// renderer draws only in the pass matching its shape kind.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::error::{SceneError, SceneResult};
use crate::core::math::{Color, Transform};
use crate::core::object::{Capability, Component, ComponentContext};
use crate::core::render::{Shape, ShapeKind};

//=== DebugShape ==========================================================

/// Primitive drawn by a [`DebugRenderer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DebugShape {
    /// The owner's bounds: size, origin, scale and rotation applied.
    Box,
    /// An X mark at the owner's position. Line kind only.
    Cross { size: f32 },
    Circle { radius: f32 },
}

impl DebugShape {
    fn name(&self) -> &'static str {
        match self {
            Self::Box => "box",
            Self::Cross { .. } => "cross",
            Self::Circle { .. } => "circle",
        }
    }

    fn locked_kind(&self) -> Option<ShapeKind> {
        match self {
            Self::Cross { .. } => Some(ShapeKind::Line),
            _ => None,
        }
    }

    fn primitive(&self, world: &Transform) -> Shape {
        let position = world.position;
        match *self {
            Self::Box => Shape::Rect {
                x: position.x,
                y: position.y,
                origin_x: world.origin.x,
                origin_y: world.origin.y,
                width: world.size.x,
                height: world.size.y,
                scale_x: world.scale.x,
                scale_y: world.scale.y,
                rotation: world.rotation(),
            },
            Self::Cross { size } => Shape::Cross {
                x: position.x,
                y: position.y,
                size,
            },
            Self::Circle { radius } => Shape::Circle {
                x: position.x,
                y: position.y,
                radius,
            },
        }
    }
}

//=== DebugRenderer =======================================================

/// Draws a debug primitive for its owner.
///
/// # Example
///
/// ```rust
/// # use tessera_engine::prelude::*;
/// let mut outline = DebugRenderer::outline(ShapeKind::Line, Color::GREEN);
/// assert!(outline.set_kind(ShapeKind::Filled).is_ok());
///
/// let mut cross = DebugRenderer::cross();
/// assert!(cross.set_kind(ShapeKind::Filled).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugRenderer {
    shape: DebugShape,
    kind: ShapeKind,
    color: Color,
}

impl DebugRenderer {
    //--- Construction -----------------------------------------------------

    /// Box outline of the owner's bounds.
    pub fn outline(kind: ShapeKind, color: Color) -> Self {
        Self {
            shape: DebugShape::Box,
            kind,
            color,
        }
    }

    /// Red X mark of size 0.1 at the owner's position.
    pub fn cross() -> Self {
        Self {
            shape: DebugShape::Cross { size: 0.1 },
            kind: ShapeKind::Line,
            color: Color::RED,
        }
    }

    pub fn circle(kind: ShapeKind, color: Color, radius: f32) -> Self {
        Self {
            shape: DebugShape::Circle { radius },
            kind,
            color,
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn shape(&self) -> DebugShape {
        self.shape
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Changes the pass this renderer draws in.
    ///
    /// # Errors
    ///
    /// [`SceneError::UnsupportedShapeKind`] if the shape only supports
    /// another kind, as the cross does.
    pub fn set_kind(&mut self, kind: ShapeKind) -> SceneResult<()> {
        match self.shape.locked_kind() {
            Some(supported) if supported != kind => Err(SceneError::UnsupportedShapeKind {
                shape: self.shape.name(),
                supported,
            }),
            _ => {
                self.kind = kind;
                Ok(())
            }
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    //--- Drawing ----------------------------------------------------------

    fn draw(&self, ctx: &mut ComponentContext<'_>, pass: ShapeKind) {
        if pass != self.kind {
            return;
        }
        if let Some(world) = ctx.world_transform() {
            let primitive = self.shape.primitive(&world);
            ctx.renderer().draw_shape(primitive, self.color);
        }
    }
}

impl Component for DebugRenderer {
    fn capabilities(&self) -> &'static [Capability] {
        &[Capability::DebugRenderer]
    }

    fn render_shape_filled(&mut self, ctx: &mut ComponentContext<'_>) {
        self.draw(ctx, ShapeKind::Filled);
    }

    fn render_shape_line(&mut self, ctx: &mut ComponentContext<'_>) {
        self.draw(ctx, ShapeKind::Line);
    }

    fn render_shape_point(&mut self, ctx: &mut ComponentContext<'_>) {
        self.draw(ctx, ShapeKind::Point);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
