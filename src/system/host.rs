//! Host platform boundary
//!
//! Everything the watchface needs from the device it runs on: a display
//! surface, a clock, battery and connection state, a vibration motor and an
//! asset store. The firmware binary implements these on top of the PineTime
//! peripherals; tests use [`mock::MockHost`].

use chrono::NaiveDateTime;
use embedded_graphics::primitives::Rectangle;

use crate::ui::assets::{Bitmap, BitmapId, Font, FontId};

/// Battery charge as reported by the power source
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryState {
    /// Remaining charge in percent (0–100)
    pub charge_percent: u8,
    /// Whether the watch is on the charger
    pub is_charging: bool,
}

/// Connection to the companion phone
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnectivityState {
    pub connected: bool,
}

/// Vibration patterns understood by the haptic actuator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VibePattern {
    /// Two short pulses
    DoublePulse,
}

pub trait Display {
    /// Bounds of the whole window
    fn bounds(&self) -> Rectangle;

    /// Bounds not covered by system overlays
    fn unobstructed_bounds(&self) -> Rectangle {
        self.bounds()
    }
}

pub trait Clock {
    /// Current local wall-clock time
    fn now(&self) -> NaiveDateTime;

    /// User preference for 24 hour time
    fn is_24h_style(&self) -> bool;
}

pub trait PowerSource {
    /// Synchronous read of the current battery state
    fn peek_battery(&self) -> BatteryState;
}

pub trait ConnectionSource {
    /// Synchronous read of the current connection state
    fn peek_connection(&self) -> ConnectivityState;
}

pub trait Haptics {
    fn vibrate(&mut self, pattern: VibePattern);

    /// Whether alerts are currently suppressed
    fn quiet_time_is_active(&self) -> bool;
}

/// Loads fonts and bitmaps by identifier.
///
/// Handles are moved back into the store on release, so each one can only be
/// released once.
pub trait AssetStore {
    fn load_font(&mut self, id: FontId) -> Font;
    fn release_font(&mut self, font: Font);
    fn load_bitmap(&mut self, id: BitmapId) -> Bitmap;
    fn release_bitmap(&mut self, bitmap: Bitmap);
}

/// Everything the watchface needs from the platform
pub trait Host: Display + Clock + PowerSource + ConnectionSource + Haptics + AssetStore {}

impl<T> Host for T where T: Display + Clock + PowerSource + ConnectionSource + Haptics + AssetStore {}

#[cfg(test)]
pub(crate) mod mock {
    use chrono::{NaiveDate, NaiveDateTime};
    use embedded_graphics::{
        geometry::{Point, Size},
        primitives::Rectangle,
    };

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum AssetId {
        Font(FontId),
        Bitmap(BitmapId),
    }

    /// Host double recording every side effect
    pub struct MockHost {
        pub bounds: Rectangle,
        pub now: NaiveDateTime,
        pub clock_24h: bool,
        pub battery: BatteryState,
        pub connection: ConnectivityState,
        pub quiet_time: bool,
        pub pulses: Vec<VibePattern>,
        pub loaded: Vec<AssetId>,
        pub released: Vec<AssetId>,
    }

    impl MockHost {
        /// A 144x168 rectangular screen, connected, at 75% charge
        pub fn new() -> Self {
            Self {
                bounds: Rectangle::new(Point::zero(), Size::new(144, 168)),
                now: NaiveDate::from_ymd_opt(2024, 3, 4)
                    .unwrap()
                    .and_hms_opt(21, 7, 30)
                    .unwrap(),
                clock_24h: true,
                battery: BatteryState {
                    charge_percent: 75,
                    is_charging: false,
                },
                connection: ConnectivityState { connected: true },
                quiet_time: false,
                pulses: Vec::new(),
                loaded: Vec::new(),
                released: Vec::new(),
            }
        }

        pub fn with_size(mut self, width: u32, height: u32) -> Self {
            self.bounds = Rectangle::new(Point::zero(), Size::new(width, height));
            self
        }
    }

    impl Display for MockHost {
        fn bounds(&self) -> Rectangle {
            self.bounds
        }
    }

    impl Clock for MockHost {
        fn now(&self) -> NaiveDateTime {
            self.now
        }

        fn is_24h_style(&self) -> bool {
            self.clock_24h
        }
    }

    impl PowerSource for MockHost {
        fn peek_battery(&self) -> BatteryState {
            self.battery
        }
    }

    impl ConnectionSource for MockHost {
        fn peek_connection(&self) -> ConnectivityState {
            self.connection
        }
    }

    impl Haptics for MockHost {
        fn vibrate(&mut self, pattern: VibePattern) {
            self.pulses.push(pattern);
        }

        fn quiet_time_is_active(&self) -> bool {
            self.quiet_time
        }
    }

    impl AssetStore for MockHost {
        fn load_font(&mut self, id: FontId) -> Font {
            self.loaded.push(AssetId::Font(id));
            Font::builtin(id)
        }

        fn release_font(&mut self, font: Font) {
            self.released.push(AssetId::Font(font.id()));
        }

        fn load_bitmap(&mut self, id: BitmapId) -> Bitmap {
            self.loaded.push(AssetId::Bitmap(id));
            Bitmap::builtin(id)
        }

        fn release_bitmap(&mut self, bitmap: Bitmap) {
            self.released.push(AssetId::Bitmap(bitmap.id()));
        }
    }
}
