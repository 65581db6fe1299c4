//! Main window and event handling
//!
//! The [`Watchface`] owns all application state and the loaded layers. The
//! event loop feeds it through [`EventHandler`] and asks it to
//! [`render`](Watchface::render) afterwards.

use core::marker::PhantomData;

use chrono::NaiveDateTime;
use embedded_graphics::prelude::DrawTarget;

use crate::{
    system::{
        events::{EventHandler, EventService, Tick, TimeUnits},
        host::{BatteryState, ConnectivityState, Host},
    },
    ui::{
        clock::ClockText,
        connection_indicator::ConnectionIndicator,
        layout::{DeviceModel, DisplayProfile, DisplayShape},
        shards_watchface::ShardsWatchface,
        WatchColor, WatchFace, WatchFaceState,
    },
};

/// Mutable application state, written only by the event handlers
#[derive(Debug, Default)]
pub struct AppState {
    pub battery: BatteryState,
    pub connection: ConnectivityState,
    pub clock: ClockText,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Lifecycle {
    Uninitialized,
    Loaded,
    Unloaded,
}

enum Window {
    Uninitialized,
    Loaded(ShardsWatchface),
    Unloaded,
}

pub struct Watchface<H, C>
where
    H: Host,
    C: WatchColor,
{
    host: H,
    profile: DisplayProfile,
    indicator: ConnectionIndicator,
    state: AppState,
    window: Window,
    _color: PhantomData<C>,
}

impl<H, C> Watchface<H, C>
where
    H: Host,
    C: WatchColor,
{
    /// Create the watchface for a device; nothing is loaded yet
    pub fn new(host: H, shape: DisplayShape, model: DeviceModel) -> Self {
        let profile = DisplayProfile::resolve(shape, model);
        debug!("Display profile for {:?} {:?}", shape, model);
        Self {
            host,
            profile,
            indicator: ConnectionIndicator::new(),
            state: AppState::default(),
            window: Window::Uninitialized,
            _color: PhantomData,
        }
    }

    /// Subscribe to services, load the window and show the current time
    pub fn init(&mut self, events: &mut EventService) {
        if !matches!(self.window, Window::Uninitialized) {
            warn!("Watchface already initialized");
            return;
        }

        events.subscribe_ticks(TimeUnits::MINUTE);
        events.subscribe_battery();
        events.subscribe_connection();

        self.load();

        let now = self.host.now();
        self.update_time(&now);
        // The next minute boundary after the displayed time must still tick
        events.prime(now);
    }

    /// Unsubscribe and release everything acquired by `init`
    pub fn deinit(&mut self, events: &mut EventService) {
        events.unsubscribe_all();
        match core::mem::replace(&mut self.window, Window::Unloaded) {
            Window::Loaded(face) => {
                face.unload(&mut self.host);
                info!("Window unloaded");
            }
            previous => {
                warn!("Watchface is not loaded, nothing to unload");
                self.window = previous;
            }
        }
    }

    fn load(&mut self) {
        let bounds = self.host.bounds();
        let unobstructed = self.host.unobstructed_bounds();
        let face = ShardsWatchface::load(&mut self.host, &self.profile, bounds, unobstructed);
        self.window = Window::Loaded(face);
        info!("Window loaded ({} x {})", bounds.size.width, bounds.size.height);

        // Ensure battery level and connection are displayed from the start
        let battery = self.host.peek_battery();
        self.on_battery(battery);
        let connection = self.host.peek_connection();
        self.on_connection(connection);
    }

    fn update_time(&mut self, now: &NaiveDateTime) {
        if let Err(err) = self.state.clock.update(now, self.host.is_24h_style()) {
            warn!("Failed to format time: {:?}", err);
        }
        if let Window::Loaded(face) = &mut self.window {
            face.mark_clock_dirty();
        }
    }

    /// Repaint the window if anything changed.
    ///
    /// Returns whether anything was drawn.
    pub fn render<D>(&mut self, target: &mut D) -> Result<bool, D::Error>
    where
        D: DrawTarget<Color = C>,
    {
        let Window::Loaded(face) = &mut self.window else {
            return Ok(false);
        };
        if !face.needs_redraw() {
            return Ok(false);
        }

        // A full redraw always re-reads the battery in case an update was missed
        self.state.battery = self.host.peek_battery();
        face.mark_battery_dirty();

        let state = WatchFaceState {
            clock: &self.state.clock,
            battery: self.state.battery,
        };
        WatchFace::<C>::draw(face, target, &state)?;
        trace!("Window redrawn");
        Ok(true)
    }

    pub fn lifecycle(&self) -> Lifecycle {
        match self.window {
            Window::Uninitialized => Lifecycle::Uninitialized,
            Window::Loaded(_) => Lifecycle::Loaded,
            Window::Unloaded => Lifecycle::Unloaded,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn profile(&self) -> &DisplayProfile {
        &self.profile
    }

    /// Loaded layers, if the window is loaded
    pub fn face(&self) -> Option<&ShardsWatchface> {
        match &self.window {
            Window::Loaded(face) => Some(face),
            _ => None,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H, C> EventHandler for Watchface<H, C>
where
    H: Host,
    C: WatchColor,
{
    fn on_tick(&mut self, tick: &Tick) {
        // Make sure the time is displayed every minute
        self.update_time(&tick.time);
    }

    fn on_battery(&mut self, state: BatteryState) {
        debug!(
            "Battery at {}% ({})",
            state.charge_percent,
            if state.is_charging { "charging" } else { "discharging" }
        );
        self.state.battery = state;
        if let Window::Loaded(face) = &mut self.window {
            face.mark_battery_dirty();
        }
    }

    fn on_connection(&mut self, state: ConnectivityState) {
        self.state.connection = state;
        self.indicator.report(state, &mut self.host);
        if let Window::Loaded(face) = &mut self.window {
            face.set_bt_icon_hidden(self.indicator.icon_hidden());
        }
    }
}
