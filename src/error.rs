//! Error types

/// Errors raised by the watchface itself.
///
/// The host contract guarantees valid clock, sensor and asset data, so the
/// only thing that can go wrong on our side is a text buffer that is too
/// small for what was written into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Formatted text did not fit its label buffer
    Format,
}

impl From<core::fmt::Error> for Error {
    fn from(_: core::fmt::Error) -> Self {
        Self::Format
    }
}
