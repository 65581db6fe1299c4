//! UI definitions module
//! Based on: https://github.com/lupyuen/pinetime-watchface/blob/master/src/lib.rs

use embedded_graphics::{pixelcolor::PixelColor, prelude::DrawTarget};

use crate::system::host::BatteryState;
use clock::ClockText;

pub mod assets;
pub mod battery_bar;
pub mod clock;
pub mod connection_indicator;
pub mod label;
pub mod layout;
pub mod palette;
pub mod shards_watchface;

#[cfg(test)]
pub(crate) mod testing;

pub use palette::{Palette, WatchColor};

pub trait WatchFace<C: PixelColor> {
    /// Draw watchface with state
    fn draw<D>(&mut self, target: &mut D, state: &WatchFaceState<'_>) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = C>;
}

/// State for the watch face
pub struct WatchFaceState<'a> {
    pub clock: &'a ClockText,
    pub battery: BatteryState,
}
