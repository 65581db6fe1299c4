//! Shards of Grandeur watchface
//!
//! Time, date, a character sprite, a battery bar with a charging glyph and a
//! Bluetooth-disconnect alert, written against a small host abstraction
//! (see [`system::host`]) so the same face runs on the watch and in tests.

#![cfg_attr(not(test), no_std)]

// This must go first so the macros are visible to the other modules.
mod fmt;

pub mod app;
pub mod error;
pub mod system;
pub mod ui;

pub use app::{AppState, Watchface};
pub use error::Error;
