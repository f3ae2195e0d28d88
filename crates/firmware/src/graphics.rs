//! Tri-colour e-paper framebuffer.
//!
//! The badge panel is 152 × 152 pixels with three inks (white, red, black).
//! Pixels are stored at 2 bits each, four to a byte, MSB-first, row-major;
//! the buffer is handed to [`EpaperPanel::write_frame`] unchanged.
//!
//! [`EpaperPanel::write_frame`]: platform::EpaperPanel::write_frame

use embedded_graphics::pixelcolor::raw::RawU2;
use embedded_graphics::pixelcolor::PixelColor;
use embedded_graphics::prelude::*;
use platform::board_config::{EPAPER_HEIGHT, EPAPER_WIDTH};

/// Bits per pixel.
pub const BITS_PER_PIXEL: usize = 2;

/// Framebuffer size in bytes.
#[allow(clippy::arithmetic_side_effects)] // const: 152 * 152 * 2 / 8 = 5776
pub const FRAME_BYTES: usize = EPAPER_WIDTH as usize * EPAPER_HEIGHT as usize * BITS_PER_PIXEL / 8;

/// One of the three panel inks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TriColor {
    /// Palette index 0.
    White,
    /// Palette index 1.
    Red,
    /// Palette index 2.
    Black,
}

impl TriColor {
    /// 2-bit palette index.
    pub const fn index(self) -> u8 {
        match self {
            Self::White => 0,
            Self::Red => 1,
            Self::Black => 2,
        }
    }

    /// Inverse of [`index`](Self::index); index 3 is unused.
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Self::White),
            1 => Some(Self::Red),
            2 => Some(Self::Black),
            _ => None,
        }
    }
}

impl PixelColor for TriColor {
    type Raw = RawU2;
}

impl From<TriColor> for RawU2 {
    fn from(color: TriColor) -> Self {
        RawU2::new(color.index())
    }
}

/// 152 × 152, 2 bpp drawing surface.
#[derive(Clone, PartialEq, Eq)]
pub struct GraphicsSurface {
    buf: [u8; FRAME_BYTES],
}

impl GraphicsSurface {
    /// An all-white surface.
    pub const fn new() -> Self {
        Self {
            buf: [0; FRAME_BYTES],
        }
    }

    /// Packed frame bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Colour at `point`, or `None` off-surface.
    pub fn pixel(&self, point: Point) -> Option<TriColor> {
        let (byte_index, shift) = Self::locate(point)?;
        let byte = self.buf.get(byte_index)?;
        #[allow(clippy::arithmetic_side_effects)] // shift <= 6
        let bits = (byte >> shift) & 0b11;
        TriColor::from_index(bits)
    }

    /// Number of pixels currently set to `color`.
    pub fn count(&self, color: TriColor) -> usize {
        self.bounding_box()
            .points()
            .filter(|p| self.pixel(*p) == Some(color))
            .count()
    }

    /// Byte index and bit shift of `point`; `None` when outside the panel.
    fn locate(point: Point) -> Option<(usize, u32)> {
        let x = usize::try_from(point.x).ok()?;
        let y = usize::try_from(point.y).ok()?;
        if x >= EPAPER_WIDTH as usize || y >= EPAPER_HEIGHT as usize {
            return None;
        }
        // x < 152, y < 152: max index 152 * 152 - 1 = 23103.
        #[allow(clippy::arithmetic_side_effects)]
        let pixel_index = y * EPAPER_WIDTH as usize + x;
        // MSB-first: pixel 0 of a byte is in bits 7..6.
        #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
        let shift = (6 - 2 * (pixel_index % 4)) as u32;
        Some((pixel_index / 4, shift))
    }
}

impl Default for GraphicsSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for GraphicsSurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GraphicsSurface")
            .field("width", &EPAPER_WIDTH)
            .field("height", &EPAPER_HEIGHT)
            .finish_non_exhaustive()
    }
}

impl DrawTarget for GraphicsSurface {
    type Color = TriColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let Some((byte_index, shift)) = Self::locate(point) else {
                continue;
            };
            if let Some(byte) = self.buf.get_mut(byte_index) {
                #[allow(clippy::arithmetic_side_effects)] // shift <= 6
                let updated = (*byte & !(0b11 << shift)) | (color.index() << shift);
                *byte = updated;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let i = color.index();
        #[allow(clippy::arithmetic_side_effects)] // i <= 2, shifts <= 6
        let packed = (i << 6) | (i << 4) | (i << 2) | i;
        self.buf.fill(packed);
        Ok(())
    }
}

impl OriginDimensions for GraphicsSurface {
    fn size(&self) -> Size {
        Size::new(EPAPER_WIDTH, EPAPER_HEIGHT)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

    use super::*;

    #[test]
    fn frame_is_5776_bytes() {
        assert_eq!(FRAME_BYTES, 5776);
        assert_eq!(GraphicsSurface::new().as_bytes().len(), FRAME_BYTES);
    }

    #[test]
    fn new_surface_is_white() {
        let surface = GraphicsSurface::new();
        assert_eq!(surface.pixel(Point::new(0, 0)), Some(TriColor::White));
        assert_eq!(surface.pixel(Point::new(151, 151)), Some(TriColor::White));
        assert_eq!(surface.pixel(Point::new(152, 0)), None);
        assert_eq!(surface.pixel(Point::new(-1, 0)), None);
    }

    #[test]
    fn pixels_pack_msb_first() {
        let mut surface = GraphicsSurface::new();
        Pixel(Point::new(0, 0), TriColor::Black).draw(&mut surface).unwrap();
        Pixel(Point::new(3, 0), TriColor::Red).draw(&mut surface).unwrap();
        assert_eq!(surface.as_bytes()[0], 0b10_00_00_01);
        assert_eq!(surface.pixel(Point::new(0, 0)), Some(TriColor::Black));
        assert_eq!(surface.pixel(Point::new(3, 0)), Some(TriColor::Red));
    }

    #[test]
    fn overdraw_replaces_previous_colour() {
        let mut surface = GraphicsSurface::new();
        let p = Point::new(10, 10);
        Pixel(p, TriColor::Black).draw(&mut surface).unwrap();
        Pixel(p, TriColor::Red).draw(&mut surface).unwrap();
        assert_eq!(surface.pixel(p), Some(TriColor::Red));
    }

    #[test]
    fn off_surface_pixels_are_ignored() {
        let mut surface = GraphicsSurface::new();
        Pixel(Point::new(500, 2), TriColor::Black).draw(&mut surface).unwrap();
        assert_eq!(surface, GraphicsSurface::new());
    }

    #[test]
    fn clear_fills_every_pixel() {
        let mut surface = GraphicsSurface::new();
        surface.clear(TriColor::Red).unwrap();
        assert!(surface.as_bytes().iter().all(|b| *b == 0b01_01_01_01));
        assert_eq!(surface.count(TriColor::Red), 152 * 152);
    }

    #[test]
    fn rectangle_fill_covers_its_area() {
        let mut surface = GraphicsSurface::new();
        Rectangle::new(Point::new(50, 0), Size::new(50, 20))
            .into_styled(PrimitiveStyle::with_fill(TriColor::Black))
            .draw(&mut surface)
            .unwrap();
        assert_eq!(surface.count(TriColor::Black), 50 * 20);
        assert_eq!(surface.pixel(Point::new(49, 0)), Some(TriColor::White));
        assert_eq!(surface.pixel(Point::new(99, 19)), Some(TriColor::Black));
        assert_eq!(surface.pixel(Point::new(100, 19)), Some(TriColor::White));
    }

    #[test]
    fn palette_matches_indices() {
        for color in [TriColor::White, TriColor::Red, TriColor::Black] {
            assert_eq!(TriColor::from_index(color.index()), Some(color));
        }
        assert_eq!(TriColor::from_index(3), None);
    }
}
