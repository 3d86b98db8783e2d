//! # Error type shared by all driver operations
//!
//! The HAL error types behind the SPI bus and the GPIO lines vary per
//! platform and carry no information this driver can act on, so they are
//! collapsed into the two transport variants here. The remaining
//! variants are raised by the driver itself before any transport I/O
//! happens.

/// Everything that can go wrong while talking to the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A control line (DC, CS or RST) could not be driven.
    Pin,

    /// The SPI write failed. The chip-select line has been released
    /// before this is returned, so the bus is usable for a retry.
    Spi,

    /// Zero width or height in the panel configuration.
    InvalidConfig,

    /// `init()` was called on a driver that already left the
    /// `Uninitialized` state. Use `reset()` for a full re-run.
    AlreadyInitialized,

    /// A requested window does not fit the configured panel.
    OutOfBounds,

    /// A frame buffer handed to `blit()` is not width * height * 2
    /// bytes long.
    BufferSize {
        /// Required length for the configured panel.
        expected: usize,
        /// Length of the buffer that was passed in.
        len: usize,
    },
}

impl Error {
    /// Maps a pin operation onto `Error::Pin`.
    pub(crate) fn pin<T, E>(result: Result<T, E>) -> Result<T, Error> {
        result.map_err(|_| Error::Pin)
    }

    /// Maps an SPI write onto `Error::Spi`.
    pub(crate) fn spi<T, E>(result: Result<T, E>) -> Result<T, Error> {
        result.map_err(|_| Error::Spi)
    }
}
