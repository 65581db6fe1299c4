//! PineTime implementation of the watchface host

use chrono::NaiveDateTime;
use embassy_time::Instant;
use embedded_graphics::primitives::Rectangle;
use shards_watchface::{
    system::{
        config::WatchConfig,
        host::{
            AssetStore, BatteryState, Clock, ConnectionSource, ConnectivityState, Display,
            Haptics, PowerSource, VibePattern,
        },
        time::TimeManager,
    },
    ui::assets::{Bitmap, BitmapId, Font, FontId},
};

use super::display;
use crate::NOTIFY;

/// Latest hardware state as seen by the UI task
pub struct PineTime {
    time: TimeManager,
    config: WatchConfig,
    battery: BatteryState,
    connection: ConnectivityState,
}

impl PineTime {
    pub fn new(time: TimeManager, config: WatchConfig, battery: BatteryState) -> Self {
        Self {
            time,
            config,
            battery,
            connection: ConnectivityState::default(),
        }
    }

    pub fn set_battery(&mut self, state: BatteryState) {
        self.battery = state;
    }

    pub fn set_connection(&mut self, state: ConnectivityState) {
        self.connection = state;
    }
}

impl Display for PineTime {
    fn bounds(&self) -> Rectangle {
        display::Display::bounds()
    }
}

impl Clock for PineTime {
    fn now(&self) -> NaiveDateTime {
        self.time.local_time(Instant::now().as_micros())
    }

    fn is_24h_style(&self) -> bool {
        self.config.clock_24h
    }
}

impl PowerSource for PineTime {
    fn peek_battery(&self) -> BatteryState {
        self.battery
    }
}

impl ConnectionSource for PineTime {
    fn peek_connection(&self) -> ConnectivityState {
        self.connection
    }
}

impl Haptics for PineTime {
    fn vibrate(&mut self, pattern: VibePattern) {
        NOTIFY.signal(pattern);
    }

    fn quiet_time_is_active(&self) -> bool {
        self.config.quiet_time_is_active(self.now().time())
    }
}

/// Assets are compiled into flash, so loading only hands out references
impl AssetStore for PineTime {
    fn load_font(&mut self, id: FontId) -> Font {
        defmt::debug!("Loading font {}", id);
        Font::builtin(id)
    }

    fn release_font(&mut self, font: Font) {
        defmt::debug!("Releasing font {}", font.id());
    }

    fn load_bitmap(&mut self, id: BitmapId) -> Bitmap {
        defmt::debug!("Loading bitmap {}", id);
        Bitmap::builtin(id)
    }

    fn release_bitmap(&mut self, bitmap: Bitmap) {
        defmt::debug!("Releasing bitmap {}", bitmap.id());
    }
}
