//=========================================================================
// Widget Mapper
//=========================================================================
//
// Keeps a UI widget's pixel bounds and a game object's transform in sync.
//
// Widgets live in screen pixels, game objects in world units. After every
// update the mapper copies one onto the other through the scene's
// `GameWorldUnits` (or its own converter, when given one).
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::math::{GameWorldUnits, Transform};
use crate::core::object::{Capability, Component, ComponentContext};

//=== WidgetBounds ========================================================

/// Placement of a UI widget, in pixels and degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetBounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub origin_x: f32,
    pub origin_y: f32,
    pub rotation: f32,
}

impl WidgetBounds {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            ..Self::default()
        }
    }
}

impl Default for WidgetBounds {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            origin_x: 0.0,
            origin_y: 0.0,
            rotation: 0.0,
        }
    }
}

//=== MappingDirection ====================================================

/// Which side is the source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MappingDirection {
    /// The widget drives the game object.
    #[default]
    FromWidget,
    /// The game object drives the widget.
    FromGameObject,
}

//=== WidgetMapper ========================================================

/// Synchronises a widget with its owner in `post_update`.
///
/// # Example
///
/// ```rust
/// # use tessera_engine::prelude::*;
/// let mapper = WidgetMapper::new(WidgetBounds::new(100.0, 50.0, 200.0, 40.0))
///     .with_direction(MappingDirection::FromGameObject);
///
/// assert_eq!(mapper.direction(), MappingDirection::FromGameObject);
/// assert_eq!(mapper.widget().width, 200.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetMapper {
    widget: WidgetBounds,
    direction: MappingDirection,
    units: Option<GameWorldUnits>,
}

impl WidgetMapper {
    pub fn new(widget: WidgetBounds) -> Self {
        Self {
            widget,
            direction: MappingDirection::default(),
            units: None,
        }
    }

    pub fn with_direction(mut self, direction: MappingDirection) -> Self {
        self.direction = direction;
        self
    }

    /// Converts with `units` instead of the scene's world units.
    pub fn with_units(mut self, units: GameWorldUnits) -> Self {
        self.units = Some(units);
        self
    }

    pub fn widget(&self) -> &WidgetBounds {
        &self.widget
    }

    pub fn widget_mut(&mut self) -> &mut WidgetBounds {
        &mut self.widget
    }

    pub fn direction(&self) -> MappingDirection {
        self.direction
    }

    pub fn set_direction(&mut self, direction: MappingDirection) {
        self.direction = direction;
    }

    //--- Mapping ----------------------------------------------------------

    fn widget_to_transform(widget: &WidgetBounds, units: &GameWorldUnits, transform: &mut Transform) {
        let z = transform.position.z;
        transform.set_position(units.to_world_units(widget.x), units.to_world_units(widget.y), z);
        let depth = transform.size.z;
        transform.set_size(
            units.to_world_units(widget.width),
            units.to_world_units(widget.height),
            depth,
        );
        let scale_z = transform.scale.z;
        transform.set_scale(widget.scale_x, widget.scale_y, scale_z);
        let origin_z = transform.origin.z;
        transform.set_origin(
            units.to_world_units(widget.origin_x),
            units.to_world_units(widget.origin_y),
            origin_z,
        );
        transform.set_rotation(widget.rotation);
    }

    fn transform_to_widget(transform: &Transform, units: &GameWorldUnits, widget: &mut WidgetBounds) {
        widget.x = units.to_pixels(transform.position.x);
        widget.y = units.to_pixels(transform.position.y);
        widget.width = units.to_pixels(transform.size.x);
        widget.height = units.to_pixels(transform.size.y);
        widget.scale_x = transform.scale.x;
        widget.scale_y = transform.scale.y;
        widget.origin_x = units.to_pixels(transform.origin.x);
        widget.origin_y = units.to_pixels(transform.origin.y);
        widget.rotation = transform.rotation();
    }
}

impl Component for WidgetMapper {
    fn capabilities(&self) -> &'static [Capability] {
        &[Capability::TransformMapper]
    }

    fn post_update(&mut self, ctx: &mut ComponentContext<'_>, _delta: f32) {
        let units = self.units.unwrap_or(*ctx.scene.world_units());
        match self.direction {
            MappingDirection::FromWidget => {
                if let Some(transform) = ctx.transform_mut() {
                    Self::widget_to_transform(&self.widget, &units, transform);
                }
            }
            MappingDirection::FromGameObject => {
                if let Some(transform) = ctx.transform() {
                    Self::transform_to_widget(transform, &units, &mut self.widget);
                }
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::EngineSettings;
    use crate::core::globals::EngineContext;
    use crate::core::scene::Scene;

    fn setup() -> (EngineContext, Scene) {
        // 100 pixels per unit.
        let mut engine = EngineContext::headless(EngineSettings::default());
        let scene = Scene::empty(&mut engine).unwrap();
        (engine, scene)
    }

    #[test]
    fn widget_drives_transform() {
        let (mut engine, mut scene) = setup();
        let button = scene.spawn("Button");
        let mut bounds = WidgetBounds::new(150.0, 50.0, 200.0, 100.0);
        bounds.rotation = 90.0;
        scene
            .add_component(&mut engine, button, WidgetMapper::new(bounds))
            .unwrap();
        scene.add_game_object(&mut engine, button).unwrap();

        scene.update(&mut engine, 0.016);

        let transform = scene.world().transform(button).unwrap();
        assert_eq!((transform.position.x, transform.position.y), (1.5, 0.5));
        assert_eq!((transform.size.x, transform.size.y), (2.0, 1.0));
        assert_eq!(transform.rotation(), 90.0);
    }

    #[test]
    fn game_object_drives_widget_with_own_units() {
        let (mut engine, mut scene) = setup();
        let label = scene.spawn("Label");
        scene.world_mut().transform_mut(label).unwrap().set_xy(2.0, 3.0);
        let mapper = WidgetMapper::new(WidgetBounds::default())
            .with_direction(MappingDirection::FromGameObject)
            .with_units(GameWorldUnits::new(640.0, 480.0, 10.0));
        let id = scene.add_component(&mut engine, label, mapper).unwrap();
        scene.add_game_object(&mut engine, label).unwrap();

        scene.update(&mut engine, 0.016);

        let widget = scene.world().component::<WidgetMapper>(id).unwrap().widget();
        assert_eq!((widget.x, widget.y), (20.0, 30.0));
    }
}
