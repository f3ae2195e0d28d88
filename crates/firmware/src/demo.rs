//! Power-on test pattern.
//!
//! Draws a 2 × 3 grid of 50 × 20 tiles covering every fill/text colour
//! combination, each labelled "Test", so all three inks can be checked on
//! one refresh.

use embedded_graphics::mono_font::ascii::FONT_9X18;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use crate::graphics::TriColor;

/// Label drawn in every tile.
pub const LABEL: &str = "Test";

/// Tile size.
pub const TILE_SIZE: Size = Size::new(50, 20);

/// One tile: top-left corner, fill colour, text colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// Top-left corner.
    pub origin: Point,
    /// Rectangle fill.
    pub fill: TriColor,
    /// Label colour.
    pub text: TriColor,
}

impl Tile {
    const fn new(x: i32, y: i32, fill: TriColor, text: TriColor) -> Self {
        Self {
            origin: Point::new(x, y),
            fill,
            text,
        }
    }

    /// The tile's rectangle.
    pub const fn area(&self) -> Rectangle {
        Rectangle::new(self.origin, TILE_SIZE)
    }
}

/// Tiles in draw order.
pub const TILES: [Tile; 6] = [
    Tile::new(0, 0, TriColor::Red, TriColor::White),
    Tile::new(50, 0, TriColor::Black, TriColor::White),
    Tile::new(0, 20, TriColor::White, TriColor::Red),
    Tile::new(50, 20, TriColor::Black, TriColor::Red),
    Tile::new(0, 40, TriColor::White, TriColor::Black),
    Tile::new(50, 40, TriColor::Red, TriColor::Black),
];

/// Single-pixel markers drawn before the tiles.
pub const MARKERS: [Pixel<TriColor>; 2] = [
    Pixel(Point::new(5, 5), TriColor::Red),
    Pixel(Point::new(5, 10), TriColor::Black),
];

/// Draw the test pattern onto `target`.
pub fn render<D>(target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = TriColor>,
{
    target.clear(TriColor::White)?;
    for marker in MARKERS {
        marker.draw(target)?;
    }
    for tile in &TILES {
        tile.area()
            .into_styled(PrimitiveStyle::with_fill(tile.fill))
            .draw(target)?;
        let style = MonoTextStyle::new(&FONT_9X18, tile.text);
        #[allow(clippy::arithmetic_side_effects)] // origins are small constants
        let label_origin = tile.origin + Point::new(1, 1);
        Text::with_baseline(LABEL, label_origin, style, Baseline::Top).draw(target)?;
    }
    Ok(())
}
