//! Battery indicator
//!
//! A 64 px bar coloured by charge tier inside a one pixel border. An empty
//! battery shows a cross instead of the bar, and while charging six short
//! strokes above the bar form a lightning zigzag.

use core::ops::Range;

use embedded_graphics::{
    geometry::{Point, Size},
    prelude::*,
    primitives::{Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment},
};

use super::palette::Palette;
use crate::system::host::BatteryState;

/// Width of a full bar
pub const BAR_WIDTH: u32 = 64;
pub const BAR_HEIGHT: u32 = 6;

/// Horizontal position of each charging stroke, relative to the bar start
pub const CHARGE_STROKE_X: [i32; 6] = [3, 14, 23, 35, 46, 58];
/// First end of each stroke, relative to the bar top
pub const CHARGE_STROKE_TOP: [i32; 6] = [-4, -5, -4, -4, -5, -4];
/// Second end of each stroke, relative to the bar top
pub const CHARGE_STROKE_BOTTOM: [i32; 6] = [-7, -8, -6, -7, -8, -7];
/// Each stroke is repeated at these x offsets to make it thicker
const CHARGE_STROKE_SPREAD: Range<i32> = -2..2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChargeTier {
    Full,
    Warn,
    Low,
}

impl ChargeTier {
    pub const fn from_percent(percent: u8) -> Self {
        match percent {
            66.. => Self::Full,
            36..=65 => Self::Warn,
            _ => Self::Low,
        }
    }
}

/// Width of the filled part of the bar, percentages above 100 count as 100
pub const fn bar_width(percent: u8) -> u32 {
    let percent = if percent > 100 { 100 } else { percent };
    percent as u32 * BAR_WIDTH / 100
}

/// The charging strokes for a bar anchored at `anchor`, before thickening
pub fn charge_strokes(anchor: Point) -> impl Iterator<Item = Line> {
    CHARGE_STROKE_X
        .into_iter()
        .zip(CHARGE_STROKE_TOP)
        .zip(CHARGE_STROKE_BOTTOM)
        .map(move |((x, top), bottom)| {
            Line::new(
                Point::new(anchor.x + x, anchor.y + top),
                Point::new(anchor.x + x, anchor.y + bottom),
            )
        })
}

/// Battery bar anchored at the top left corner of its fill area
pub struct BatteryBar<'a, C> {
    anchor: Point,
    state: BatteryState,
    palette: &'a Palette<C>,
}

impl<'a, C: PixelColor> BatteryBar<'a, C> {
    pub fn new(anchor: Point, state: BatteryState, palette: &'a Palette<C>) -> Self {
        Self {
            anchor,
            state,
            palette,
        }
    }

    /// Frame drawn around the bar
    pub fn border(&self) -> Rectangle {
        Rectangle::new(
            self.anchor - Point::new(1, 1),
            Size::new(BAR_WIDTH + 2, BAR_HEIGHT + 2),
        )
    }

    fn draw_cross<D>(&self, target: &mut D, color: C) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>,
    {
        let style = PrimitiveStyle::with_stroke(color, 1);
        let left = self.anchor.x;
        let right = left + BAR_WIDTH as i32 - 1;
        let top = self.anchor.y;
        let bottom = top + BAR_HEIGHT as i32 - 1;

        Line::new(Point::new(left, top), Point::new(right, bottom))
            .into_styled(style)
            .draw(target)?;
        Line::new(Point::new(left, bottom), Point::new(right, top))
            .into_styled(style)
            .draw(target)
    }
}

impl<C: PixelColor> Drawable for BatteryBar<'_, C> {
    type Color = C;
    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let percent = self.state.charge_percent;
        let color = self.palette.tier_color(ChargeTier::from_percent(percent));

        if percent == 0 {
            self.draw_cross(target, color)?;
        } else {
            Rectangle::new(self.anchor, Size::new(bar_width(percent), BAR_HEIGHT))
                .into_styled(PrimitiveStyle::with_fill(color))
                .draw(target)?;
        }

        let border_style = PrimitiveStyleBuilder::new()
            .stroke_color(self.palette.border)
            .stroke_width(1)
            .stroke_alignment(StrokeAlignment::Inside)
            .build();
        self.border().into_styled(border_style).draw(target)?;

        if self.state.is_charging {
            let style = PrimitiveStyle::with_stroke(self.palette.charging, 1);
            for stroke in charge_strokes(self.anchor) {
                for dx in CHARGE_STROKE_SPREAD {
                    stroke
                        .translate(Point::new(dx, 0))
                        .into_styled(style)
                        .draw(target)?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::pixelcolor::Rgb565;

    use super::*;
    use crate::ui::{palette::WatchColor, testing::Framebuffer};

    const ANCHOR: Point = Point::new(75, 113);

    fn render(charge_percent: u8, is_charging: bool) -> Framebuffer<Rgb565> {
        let mut fb = Framebuffer::new(144, 168);
        let state = BatteryState {
            charge_percent,
            is_charging,
        };
        BatteryBar::new(ANCHOR, state, &Rgb565::PALETTE)
            .draw(&mut fb)
            .unwrap();
        fb
    }

    /// Filled pixels on the first row of the bar
    fn filled_width(fb: &Framebuffer<Rgb565>, color: Rgb565) -> u32 {
        (0..BAR_WIDTH as i32)
            .filter(|dx| fb.pixel(ANCHOR + Point::new(*dx, 0)) == Some(color))
            .count() as u32
    }

    #[test]
    fn bar_width_is_proportional() {
        for percent in 1..=100u8 {
            assert_eq!(bar_width(percent), percent as u32 * 64 / 100);
        }
        assert_eq!(bar_width(1), 0);
        assert_eq!(bar_width(2), 1);
        assert_eq!(bar_width(50), 32);
        assert_eq!(bar_width(100), 64);
        assert_eq!(bar_width(250), 64);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(ChargeTier::from_percent(100), ChargeTier::Full);
        assert_eq!(ChargeTier::from_percent(66), ChargeTier::Full);
        assert_eq!(ChargeTier::from_percent(65), ChargeTier::Warn);
        assert_eq!(ChargeTier::from_percent(36), ChargeTier::Warn);
        assert_eq!(ChargeTier::from_percent(35), ChargeTier::Low);
        assert_eq!(ChargeTier::from_percent(0), ChargeTier::Low);
    }

    #[test]
    fn drawn_bar_matches_width_and_tier() {
        let palette = Rgb565::PALETTE;
        for (percent, color) in [
            (100, palette.full),
            (66, palette.full),
            (65, palette.warn),
            (36, palette.warn),
            (35, palette.low),
            (5, palette.low),
        ] {
            let fb = render(percent, false);
            assert_eq!(filled_width(&fb, color), bar_width(percent), "{percent}%");
        }
    }

    #[test]
    fn empty_battery_draws_a_cross() {
        let palette = Rgb565::PALETTE;
        let fb = render(0, false);
        let low = Some(palette.low);

        // Both diagonals reach all four corners of the bar area
        assert_eq!(fb.pixel(ANCHOR), low);
        assert_eq!(fb.pixel(ANCHOR + Point::new(63, 5)), low);
        assert_eq!(fb.pixel(ANCHOR + Point::new(0, 5)), low);
        assert_eq!(fb.pixel(ANCHOR + Point::new(63, 0)), low);
        // ... and the middle of the top row stays empty, unlike a bar
        assert_eq!(fb.pixel(ANCHOR + Point::new(32, 0)), None);
    }

    #[test]
    fn border_surrounds_the_bar() {
        let border = Some(Rgb565::PALETTE.border);
        let fb = render(50, false);
        assert_eq!(fb.pixel(ANCHOR - Point::new(1, 1)), border);
        assert_eq!(fb.pixel(ANCHOR + Point::new(64, 6)), border);
        assert_eq!(fb.pixel(ANCHOR + Point::new(64, 0)), border);
        assert_eq!(fb.count(Rgb565::PALETTE.border), 2 * 66 + 2 * 6);
    }

    #[test]
    fn charging_draws_six_strokes() {
        let charging = Rgb565::PALETTE.charging;
        for percent in [0, 1, 35, 50, 100] {
            let fb = render(percent, true);

            // Stroke lengths are 4, 4, 3, 4, 4, 4 pixels, each drawn four wide
            assert_eq!(fb.count(charging), 23 * 4, "{percent}%");

            let mut columns: Vec<i32> = fb
                .points(charging)
                .map(|p| p.x)
                .collect();
            columns.sort_unstable();
            columns.dedup();
            let groups = 1 + columns.windows(2).filter(|w| w[1] - w[0] > 1).count();
            assert_eq!(groups, 6, "{percent}%");
        }
        assert_eq!(charge_strokes(ANCHOR).count(), 6);
    }

    #[test]
    fn not_charging_draws_no_strokes() {
        let fb = render(80, false);
        assert_eq!(fb.count(Rgb565::PALETTE.charging), 0);
    }

    #[test]
    fn rendering_is_idempotent() {
        let state = BatteryState {
            charge_percent: 42,
            is_charging: true,
        };
        let mut fb = Framebuffer::new(144, 168);
        let bar = BatteryBar::new(ANCHOR, state, &Rgb565::PALETTE);
        bar.draw(&mut fb).unwrap();
        let first = fb.clone();
        bar.draw(&mut fb).unwrap();
        assert_eq!(fb, first);
    }
}
