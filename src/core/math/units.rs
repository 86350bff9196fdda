//=========================================================================
// Game World Units
//=========================================================================
//
// Converts between screen pixels and world units.
//
// A scene is laid out in world units; the camera viewport spans
// `screen / pixels_per_unit` units in each direction.
//
//=========================================================================

/// Pixel/world-unit conversion for a reference screen size.
///
/// # Example
///
/// ```rust
/// # use tessera_engine::prelude::*;
/// let units = GameWorldUnits::new(100.0, 100.0, 64.0);
/// assert_eq!(units.to_world_units(64.0), 1.0);
/// assert_eq!(units.to_pixels(1.0), 64.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameWorldUnits {
    screen_width: f32,
    screen_height: f32,
    pixels_per_unit: f32,
}

impl GameWorldUnits {
    /// # Panics
    ///
    /// Panics if `pixels_per_unit <= 0.0`.
    pub fn new(screen_width: f32, screen_height: f32, pixels_per_unit: f32) -> Self {
        assert!(
            pixels_per_unit > 0.0,
            "Pixels per unit must be positive, got {}",
            pixels_per_unit
        );
        Self {
            screen_width,
            screen_height,
            pixels_per_unit,
        }
    }

    pub fn screen_width(&self) -> f32 {
        self.screen_width
    }

    pub fn screen_height(&self) -> f32 {
        self.screen_height
    }

    pub fn pixels_per_unit(&self) -> f32 {
        self.pixels_per_unit
    }

    /// Viewport width in world units.
    pub fn world_width(&self) -> f32 {
        self.to_world_units(self.screen_width)
    }

    /// Viewport height in world units.
    pub fn world_height(&self) -> f32 {
        self.to_world_units(self.screen_height)
    }

    pub fn to_world_units(&self, pixels: f32) -> f32 {
        pixels / self.pixels_per_unit
    }

    pub fn to_pixels(&self, units: f32) -> f32 {
        units * self.pixels_per_unit
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_both_ways() {
        let units = GameWorldUnits::new(100.0, 100.0, 64.0);
        assert_eq!(units.to_world_units(64.0), 1.0);
        assert_eq!(units.to_pixels(1.0), 64.0);
        assert_eq!(units.to_pixels(units.to_world_units(37.0)), 37.0);
    }

    #[test]
    fn world_size_follows_screen() {
        let units = GameWorldUnits::new(1280.0, 720.0, 100.0);
        assert_eq!(units.world_width(), 12.8);
        assert_eq!(units.world_height(), 7.2);
    }

    #[test]
    #[should_panic(expected = "Pixels per unit must be positive")]
    fn zero_ppu_panics() {
        let _ = GameWorldUnits::new(10.0, 10.0, 0.0);
    }
}
