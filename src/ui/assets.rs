//! Built-in fonts and bitmaps
//!
//! Bitmaps are raw 1 bit per pixel images (rows padded to whole bytes, most
//! significant bit first). Set bits are drawn in the requested colour, clear
//! bits are left untouched.

use embedded_graphics::{
    image::{Image, ImageRaw},
    mono_font::MonoFont,
    pixelcolor::{BinaryColor, PixelColor},
    prelude::*,
    primitives::Rectangle,
};
use profont::{PROFONT_18_POINT, PROFONT_24_POINT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontId {
    /// Large face for the time
    Time,
    /// Small face for the date
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitmapId {
    /// Character sprite in the lower left corner
    Sprite,
    /// Shown while the phone is disconnected
    BluetoothDisconnected,
}

const SPRITE_WIDTH: u32 = 64;
const SPRITE_DATA: &[u8] = include_bytes!("../../assets/shard_sprite.raw");

const BT_ICON_WIDTH: u32 = 30;
const BT_ICON_DATA: &[u8] = include_bytes!("../../assets/bt_disconnected.raw");

/// Loaded font handle
#[derive(Debug)]
pub struct Font {
    id: FontId,
    face: &'static MonoFont<'static>,
}

impl Font {
    /// Font compiled into the firmware
    pub fn builtin(id: FontId) -> Self {
        let face = match id {
            FontId::Time => &PROFONT_24_POINT,
            FontId::Date => &PROFONT_18_POINT,
        };
        Self { id, face }
    }

    pub fn id(&self) -> FontId {
        self.id
    }

    pub fn face(&self) -> &'static MonoFont<'static> {
        self.face
    }
}

/// Loaded 1bpp bitmap handle
#[derive(Debug)]
pub struct Bitmap {
    id: BitmapId,
    raw: ImageRaw<'static, BinaryColor>,
}

impl Bitmap {
    /// Bitmap compiled into the firmware
    pub fn builtin(id: BitmapId) -> Self {
        let (width, data) = match id {
            BitmapId::Sprite => (SPRITE_WIDTH, SPRITE_DATA),
            BitmapId::BluetoothDisconnected => (BT_ICON_WIDTH, BT_ICON_DATA),
        };
        Self {
            id,
            raw: ImageRaw::new(data, width),
        }
    }

    pub fn id(&self) -> BitmapId {
        self.id
    }

    pub fn size(&self) -> Size {
        self.raw.size()
    }

    /// Draw the bitmap centred in `frame`, clipped to it
    pub fn draw_in<D, C>(&self, target: &mut D, frame: Rectangle, color: C) -> Result<(), D::Error>
    where
        C: PixelColor,
        D: DrawTarget<Color = C>,
    {
        let size = self.size();
        let origin = frame.top_left
            + Point::new(
                (frame.size.width as i32 - size.width as i32) / 2,
                (frame.size.height as i32 - size.height as i32) / 2,
            );

        let mut clipped = target.clipped(&frame);
        let mut tinted = Tinted {
            target: &mut clipped,
            color,
        };
        Image::new(&self.raw, origin).draw(&mut tinted)
    }
}

/// Draws set pixels of a monochrome image in one colour and skips the rest
struct Tinted<'a, D, C> {
    target: &'a mut D,
    color: C,
}

impl<D, C> Dimensions for Tinted<'_, D, C>
where
    D: DrawTarget<Color = C>,
{
    fn bounding_box(&self) -> Rectangle {
        self.target.bounding_box()
    }
}

impl<D, C> DrawTarget for Tinted<'_, D, C>
where
    C: PixelColor,
    D: DrawTarget<Color = C>,
{
    type Color = BinaryColor;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let color = self.color;
        self.target.draw_iter(
            pixels
                .into_iter()
                .filter(|Pixel(_, on)| on.is_on())
                .map(move |Pixel(point, _)| Pixel(point, color)),
        )
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::{pixelcolor::Rgb565, primitives::ContainsPoint};

    use super::*;
    use crate::ui::testing::Framebuffer;

    #[test]
    fn builtin_bitmaps_have_expected_size() {
        assert_eq!(Bitmap::builtin(BitmapId::Sprite).size(), Size::new(64, 64));
        assert_eq!(
            Bitmap::builtin(BitmapId::BluetoothDisconnected).size(),
            Size::new(30, 30)
        );
    }

    #[test]
    fn set_bits_take_the_tint_and_clear_bits_stay_untouched() {
        let tint = Rgb565::new(3, 7, 11);
        let bitmap = Bitmap::builtin(BitmapId::BluetoothDisconnected);
        let frame = Rectangle::new(Point::new(5, 5), Size::new(30, 30));
        let mut fb = Framebuffer::new(40, 40);
        bitmap.draw_in(&mut fb, frame, tint).unwrap();

        let drawn = fb.count(tint);
        assert!(drawn > 0);
        assert!(drawn < 30 * 30);
        // Nothing else was written
        let untouched = (0..40)
            .flat_map(|y| (0..40).map(move |x| Point::new(x, y)))
            .filter(|p| fb.pixel(*p).is_none())
            .count();
        assert_eq!(untouched + drawn, 40 * 40);
    }

    #[test]
    fn bitmap_is_centred_and_clipped() {
        let bitmap = Bitmap::builtin(BitmapId::Sprite);
        let frame = Rectangle::new(Point::new(10, 10), Size::new(72, 20));
        let mut fb = Framebuffer::new(100, 100);
        bitmap.draw_in(&mut fb, frame, BinaryColor::On).unwrap();

        assert!(fb.count(BinaryColor::On) > 0);
        assert!(fb.points(BinaryColor::On).all(|p| frame.contains(p)));
    }

    #[test]
    fn fonts_differ_in_size() {
        let time = Font::builtin(FontId::Time);
        let date = Font::builtin(FontId::Date);
        assert!(time.face().character_size.height > date.face().character_size.height);
    }
}
