//! Test drawing surface

use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::PixelColor,
    prelude::*,
    primitives::{PointsIter, Rectangle},
};

/// In-memory display that remembers which pixels were written
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer<C> {
    size: Size,
    pixels: Vec<Option<C>>,
}

impl<C: PixelColor> Framebuffer<C> {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: Size::new(width, height),
            pixels: vec![None; (width * height) as usize],
        }
    }

    fn index(&self, point: Point) -> Option<usize> {
        let (x, y) = (point.x, point.y);
        if x < 0 || y < 0 || x >= self.size.width as i32 || y >= self.size.height as i32 {
            return None;
        }
        Some(y as usize * self.size.width as usize + x as usize)
    }

    /// Colour last written at `point`, `None` if never drawn
    pub fn pixel(&self, point: Point) -> Option<C> {
        self.index(point).and_then(|i| self.pixels[i])
    }

    /// Points currently holding `color`
    pub fn points(&self, color: C) -> impl Iterator<Item = Point> + '_ {
        let width = self.size.width as usize;
        self.pixels
            .iter()
            .enumerate()
            .filter(move |(_, c)| **c == Some(color))
            .map(move |(i, _)| Point::new((i % width) as i32, (i / width) as i32))
    }

    pub fn count(&self, color: C) -> usize {
        self.points(color).count()
    }

    /// Whether any pixel inside `area` holds `color`
    pub fn any_in(&self, area: &Rectangle, color: C) -> bool {
        area.points().any(|p| self.pixel(p) == Some(color))
    }
}

impl<C: PixelColor> OriginDimensions for Framebuffer<C> {
    fn size(&self) -> Size {
        self.size
    }
}

impl<C: PixelColor> DrawTarget for Framebuffer<C> {
    type Color = C;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if let Some(i) = self.index(point) {
                self.pixels[i] = Some(color);
            }
        }
        Ok(())
    }
}
