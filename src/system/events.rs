//! Event subscription and delivery
//!
//! The watchface registers for the services it needs on an [`EventService`]
//! and receives typed events through the [`EventHandler`] trait. Delivery is
//! sequential on the caller's thread, one event at a time.

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::system::host::{BatteryState, ConnectivityState};

/// Set of calendar units, ordered from finest to coarsest
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeUnits(u8);

impl TimeUnits {
    pub const NONE: Self = Self(0);
    pub const SECOND: Self = Self(1 << 0);
    pub const MINUTE: Self = Self(1 << 1);
    pub const HOUR: Self = Self(1 << 2);
    pub const DAY: Self = Self(1 << 3);
    pub const MONTH: Self = Self(1 << 4);
    pub const YEAR: Self = Self(1 << 5);

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Units that changed between two clock samples
    pub fn changed_between(prev: &NaiveDateTime, now: &NaiveDateTime) -> Self {
        let mut changed = Self::NONE;
        if prev.second() != now.second() {
            changed = changed.union(Self::SECOND);
        }
        if prev.minute() != now.minute() {
            changed = changed.union(Self::MINUTE);
        }
        if prev.hour() != now.hour() {
            changed = changed.union(Self::HOUR);
        }
        if prev.day() != now.day() {
            changed = changed.union(Self::DAY);
        }
        if prev.month() != now.month() {
            changed = changed.union(Self::MONTH);
        }
        if prev.year() != now.year() {
            changed = changed.union(Self::YEAR);
        }
        changed
    }

    /// Whether a subscription to `unit` should fire for these changes.
    ///
    /// A change of any unit at least as coarse as `unit` counts, so a minute
    /// subscription also fires when only the hour moved (e.g. after a clock
    /// adjustment of exactly one hour).
    pub const fn triggers(self, unit: Self) -> bool {
        if unit.0 == 0 {
            return false;
        }
        let lowest = unit.0 & unit.0.wrapping_neg();
        let coarser_or_equal = !(lowest - 1);
        self.0 & coarser_or_equal != 0
    }
}

/// Clock tick delivered to subscribers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub time: NaiveDateTime,
    pub units_changed: TimeUnits,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Tick(Tick),
    Battery(BatteryState),
    Connection(ConnectivityState),
}

/// Receiver for subscribed events
pub trait EventHandler {
    fn on_tick(&mut self, tick: &Tick);
    fn on_battery(&mut self, state: BatteryState);
    fn on_connection(&mut self, state: ConnectivityState);
}

/// Services currently subscribed to
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Subscriptions {
    /// Tick granularity, if subscribed
    pub tick: Option<TimeUnits>,
    pub battery: bool,
    pub connection: bool,
}

impl Subscriptions {
    pub const fn accepts(&self, event: &Event) -> bool {
        match event {
            Event::Tick(tick) => match self.tick {
                Some(unit) => tick.units_changed.triggers(unit),
                None => false,
            },
            Event::Battery(_) => self.battery,
            Event::Connection(_) => self.connection,
        }
    }
}

/// Subscription registry and event dispatcher
#[derive(Debug, Default)]
pub struct EventService {
    subscriptions: Subscriptions,
    /// Last clock sample seen by `poll_clock`
    last_sample: Option<NaiveDateTime>,
}

impl EventService {
    pub const fn new() -> Self {
        Self {
            subscriptions: Subscriptions {
                tick: None,
                battery: false,
                connection: false,
            },
            last_sample: None,
        }
    }

    pub fn subscriptions(&self) -> &Subscriptions {
        &self.subscriptions
    }

    pub fn subscribe_ticks(&mut self, unit: TimeUnits) {
        debug!("Subscribed to ticks (units {})", unit.bits());
        self.subscriptions.tick = Some(unit);
    }

    pub fn subscribe_battery(&mut self) {
        debug!("Subscribed to battery state");
        self.subscriptions.battery = true;
    }

    pub fn subscribe_connection(&mut self) {
        debug!("Subscribed to connection state");
        self.subscriptions.connection = true;
    }

    pub fn unsubscribe_all(&mut self) {
        debug!("Unsubscribed from all services");
        self.subscriptions = Subscriptions::default();
        self.last_sample = None;
    }

    /// Set the clock sample the next `poll_clock` compares against, e.g. the
    /// time a subscriber just displayed on its own.
    pub fn prime(&mut self, now: NaiveDateTime) {
        self.last_sample = Some(now);
    }

    /// Feed a clock sample, returning a tick event when a subscribed unit
    /// changed since the previous sample.
    ///
    /// The first sample only primes the service.
    pub fn poll_clock(&mut self, now: NaiveDateTime) -> Option<Event> {
        let prev = self.last_sample.replace(now)?;
        let unit = self.subscriptions.tick?;
        let units_changed = TimeUnits::changed_between(&prev, &now);
        if units_changed.triggers(unit) {
            Some(Event::Tick(Tick {
                time: now,
                units_changed,
            }))
        } else {
            None
        }
    }

    /// Deliver an event to the handler if its service is subscribed.
    ///
    /// Returns whether the event was delivered.
    pub fn dispatch<H>(&self, handler: &mut H, event: Event) -> bool
    where
        H: EventHandler,
    {
        if !self.subscriptions.accepts(&event) {
            trace!("Dropped event for unsubscribed service");
            return false;
        }
        match event {
            Event::Tick(tick) => handler.on_tick(&tick),
            Event::Battery(state) => handler.on_battery(state),
            Event::Connection(state) => handler.on_connection(state),
        }
        true
    }
}
