pub(super) mod backlight;
pub(super) mod battery;
pub(super) mod bluetooth;
pub(super) mod button;
pub(super) mod config;
pub(super) mod display;
pub(super) mod host;
pub(super) mod vibrator;
