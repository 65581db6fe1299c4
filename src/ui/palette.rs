//! Colours
//!
//! Colour screens get the full scheme; on monochrome screens everything is
//! drawn in the foreground colour over the background.

use embedded_graphics::pixelcolor::{BinaryColor, PixelColor, Rgb565};

use super::battery_bar::ChargeTier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette<C> {
    pub background: C,
    pub text: C,
    /// Battery bar above 65%
    pub full: C,
    /// Battery bar from 36% to 65%
    pub warn: C,
    /// Battery bar at 35% and below
    pub low: C,
    pub border: C,
    pub charging: C,
}

impl<C: PixelColor> Palette<C> {
    pub fn tier_color(&self, tier: ChargeTier) -> C {
        match tier {
            ChargeTier::Full => self.full,
            ChargeTier::Warn => self.warn,
            ChargeTier::Low => self.low,
        }
    }
}

/// Pixel colours the watchface can be drawn in
pub trait WatchColor: PixelColor {
    const PALETTE: Palette<Self>;
}

/// 24 bit `0xRRGGBB` to RGB565
const fn hex(rgb: u32) -> Rgb565 {
    Rgb565::new(
        ((rgb >> 16) & 0xff) as u8 >> 3,
        ((rgb >> 8) & 0xff) as u8 >> 2,
        (rgb & 0xff) as u8 >> 3,
    )
}

impl WatchColor for Rgb565 {
    const PALETTE: Palette<Self> = Palette {
        background: hex(0x5555aa),
        text: hex(0xffffff),
        full: hex(0x00de00),
        warn: hex(0xffb700),
        low: hex(0xef0000),
        border: hex(0x2b2523),
        charging: hex(0x005500),
    };
}

impl WatchColor for BinaryColor {
    const PALETTE: Palette<Self> = Palette {
        background: BinaryColor::Off,
        text: BinaryColor::On,
        full: BinaryColor::On,
        warn: BinaryColor::On,
        low: BinaryColor::On,
        border: BinaryColor::On,
        charging: BinaryColor::On,
    };
}

#[cfg(test)]
mod tests {
    use embedded_graphics::pixelcolor::RgbColor;

    use super::*;

    #[test]
    fn hex_conversion_keeps_extremes() {
        assert_eq!(hex(0xffffff), Rgb565::WHITE);
        assert_eq!(hex(0x000000), Rgb565::BLACK);
        assert_eq!(hex(0xff0000), Rgb565::RED);
    }

    #[test]
    fn colour_tiers_are_distinct() {
        let palette = Rgb565::PALETTE;
        assert_ne!(palette.tier_color(ChargeTier::Full), palette.tier_color(ChargeTier::Warn));
        assert_ne!(palette.tier_color(ChargeTier::Warn), palette.tier_color(ChargeTier::Low));
        assert_ne!(palette.charging, palette.full);
    }

    #[test]
    fn monochrome_collapses_tiers() {
        let palette = BinaryColor::PALETTE;
        assert_eq!(palette.tier_color(ChargeTier::Full), palette.tier_color(ChargeTier::Warn));
        assert_eq!(palette.tier_color(ChargeTier::Warn), palette.tier_color(ChargeTier::Low));
        assert_ne!(palette.background, palette.text);
    }
}
