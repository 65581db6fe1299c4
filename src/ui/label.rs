//! Text labels

use core::fmt;

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyleBuilder},
    pixelcolor::PixelColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};

use crate::error::Error;

/// Fixed-capacity text storage for a label
#[derive(Clone)]
pub struct TextBuffer<const N: usize> {
    str_buf: [u8; N],
    len: usize,
}

impl<const N: usize> TextBuffer<N> {
    pub const fn new() -> Self {
        Self {
            str_buf: [0; N],
            len: 0,
        }
    }

    /// Replace the contents with formatted text.
    ///
    /// On overflow the previous text is kept.
    pub fn set(&mut self, args: fmt::Arguments) -> Result<(), Error> {
        let mut buf = [0u8; N];
        let len = format_no_std::show(&mut buf, args)?.len();
        self.str_buf = buf;
        self.len = len;
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.str_buf[..self.len]).unwrap_or_default()
    }
}

impl<const N: usize> Default for TextBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> fmt::Debug for TextBuffer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

/// Single line of text centred at the top of its frame, on a solid background
pub struct Label<'a, C> {
    frame: Rectangle,
    text: &'a str,
    font: &'a MonoFont<'a>,
    color: C,
    background: C,
}

impl<'a, C: PixelColor> Label<'a, C> {
    pub fn new(frame: Rectangle, text: &'a str, font: &'a MonoFont<'a>, color: C, background: C) -> Self {
        Self {
            frame,
            text,
            font,
            color,
            background,
        }
    }
}

impl<C: PixelColor> Drawable for Label<'_, C> {
    type Color = C;
    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        self.frame
            .into_styled(PrimitiveStyle::with_fill(self.background))
            .draw(target)?;

        let character_style = MonoTextStyleBuilder::new()
            .font(self.font)
            .text_color(self.color)
            .build();
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Top)
            .build();
        let position = Point::new(self.frame.center().x, self.frame.top_left.y);

        Text::with_text_style(self.text, position, character_style, text_style)
            .draw(&mut target.clipped(&self.frame))?;
        Ok(())
    }
}
