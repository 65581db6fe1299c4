//! Bluetooth disconnect indicator
//!
//! Every report of a lost connection vibrates, including the state read at
//! start-up, unless quiet time is active. There is no edge detection, so
//! repeated "disconnected" reports alert repeatedly.

use crate::system::host::{ConnectivityState, Haptics, VibePattern};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionIndicator {
    icon_hidden: bool,
}

impl ConnectionIndicator {
    pub const fn new() -> Self {
        Self { icon_hidden: true }
    }

    /// Whether the disconnected icon is hidden
    pub fn icon_hidden(&self) -> bool {
        self.icon_hidden
    }

    /// Apply a connection report, returning whether an alert was issued
    pub fn report<H>(&mut self, state: ConnectivityState, haptics: &mut H) -> bool
    where
        H: Haptics,
    {
        // Show icon if disconnected
        self.icon_hidden = state.connected;
        if state.connected {
            return false;
        }

        if haptics.quiet_time_is_active() {
            debug!("Connection lost during quiet time, not vibrating");
            return false;
        }

        info!("Connection lost");
        haptics.vibrate(VibePattern::DoublePulse);
        true
    }
}

impl Default for ConnectionIndicator {
    fn default() -> Self {
        Self::new()
    }
}
