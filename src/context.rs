//! # Rendering contexts: the two data-transfer strategies
//!
//! A graphics layer can feed this panel in two ways, and the right one
//! depends on how much RAM the host has to spare:
//!
//! - [`BufferedContext`] takes a complete, caller-owned frame and
//!   flushes it in one memory-write burst. One window program and one
//!   transaction per frame, at the cost of width * height * 2 bytes of
//!   frame memory on the host (64.8 KiB for a 240x135 panel, 112.5 KiB
//!   for 240x240).
//! - [`ImmediateContext`] pushes every primitive straight to the
//!   hardware, reprogramming the window per call. No frame memory at
//!   all, but per-primitive command overhead.
//!
//! Both are thin adapters over one exclusively borrowed
//! [`ST7789`](crate::display::ST7789); the choice is made once, at
//! construction, by calling
//! [`buffered_context`](crate::display::ST7789::buffered_context) or
//! [`immediate_context`](crate::display::ST7789::immediate_context).
//! Each context also exposes the width, height and rotation a graphics
//! layer needs to parameterize itself; pixel data is always 16 bit
//! RGB565.

use hal::blocking::spi::Write as SpiWrite;
use hal::digital::v2::OutputPin;

use crate::display::ST7789;
use crate::error::Error;
use crate::geometry::Rotation;

/// Whole-frame rendering context.
///
/// The frame memory stays with the caller (or their graphics library);
/// this context only knows how to flush it.
pub struct BufferedContext<'d, SPI, DC, CS, RST>
where
    SPI: SpiWrite<u8>,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    driver: &'d mut ST7789<SPI, DC, CS, RST>,
}

impl<'d, SPI, DC, CS, RST> BufferedContext<'d, SPI, DC, CS, RST>
where
    SPI: SpiWrite<u8>,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    pub(crate) fn new(driver: &'d mut ST7789<SPI, DC, CS, RST>) -> Self {
        BufferedContext { driver }
    }

    /// Flushes a full frame of big-endian RGB565 pixels to the panel.
    ///
    /// See [`ST7789::blit`] for the exact buffer contract.
    pub fn display(&mut self, buffer: &[u8]) -> Result<(), Error> {
        self.driver.blit(buffer)
    }

    /// Panel width in pixels, unrotated.
    pub fn width(&self) -> u16 {
        self.driver.config().width
    }

    /// Panel height in pixels, unrotated.
    pub fn height(&self) -> u16 {
        self.driver.config().height
    }

    /// Rotation the frame is expected to be rendered in.
    pub fn rotation(&self) -> Rotation {
        self.driver.config().rotation
    }
}

/// Per-primitive rendering context.
///
/// Every call is a synchronous hardware transaction; nothing is
/// buffered. Coordinates are panel-logical (unrotated) — a graphics
/// layer that rotates does so before calling in, which is exactly what
/// the `graphics` feature's draw-target bridge does.
pub struct ImmediateContext<'d, SPI, DC, CS, RST>
where
    SPI: SpiWrite<u8>,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    driver: &'d mut ST7789<SPI, DC, CS, RST>,
}

impl<'d, SPI, DC, CS, RST> ImmediateContext<'d, SPI, DC, CS, RST>
where
    SPI: SpiWrite<u8>,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    pub(crate) fn new(driver: &'d mut ST7789<SPI, DC, CS, RST>) -> Self {
        ImmediateContext { driver }
    }

    /// Writes one pixel.
    pub fn set_pixel(&mut self, x: u16, y: u16, color: u16) -> Result<(), Error> {
        self.driver.set_pixel(x, y, color)
    }

    /// Fills a rectangle with one color in a single repeat-write
    /// transaction.
    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: u16) -> Result<(), Error> {
        self.driver.fill_rect(x, y, w, h, color)
    }

    /// Panel width in pixels, unrotated.
    pub fn width(&self) -> u16 {
        self.driver.config().width
    }

    /// Panel height in pixels, unrotated.
    pub fn height(&self) -> u16 {
        self.driver.config().height
    }

    /// Rotation the draw-target bridge applies.
    pub fn rotation(&self) -> Rotation {
        self.driver.config().rotation
    }
}
