//! # ST7789 SPI TFT LCD driver
//!
//! Driver for the Sitronix ST7789 family of serial TFT controllers, as
//! found on many 1.14"/1.3"/1.54"/2.0" IPS panels (Pico Display, Pico
//! System, TTGO T-Display and friends). It brings the panel out of reset
//! into an addressed state and exposes pixel-write entry points that a
//! generic 2D graphics layer can target.
//!
//! The controller carries a fixed 240x320 RAM array; smaller glass is
//! wired somewhere inside that array, so each known panel size maps to a
//! set of addressing offsets and memory-access-order bits. That mapping
//! lives in [`geometry::resolve`] and is programmed once during
//! [`display::ST7789::init`].
//!
//! ## Architecture
//!
//! - [`display::ST7789`] owns the transport (SPI bus plus DC/CS/RST
//!   lines) and implements the command framing and the init sequence.
//! - [`context::BufferedContext`] flushes a caller-owned full frame in a
//!   single memory-write burst. Use it when you can afford
//!   width*height*2 bytes of frame memory.
//! - [`context::ImmediateContext`] reprograms the address window per
//!   primitive and writes pixels synchronously. Use it when you cannot.
//! - With the `graphics` feature, [`ImmediateContext`] is an
//!   [embedded-graphics](https://docs.rs/embedded-graphics) draw target
//!   with `Rgb565` color.
//!
//! ## Usage
//!
//! ```rust, ignore
//! use st7789::{Config, Rotation, ST7789};
//!
//! let config = Config {
//!     width: 240,
//!     height: 135,
//!     rotation: Rotation::Rotate0,
//! };
//! let mut lcd = ST7789::new(spi, dc, cs, Some(rst), config)?;
//! lcd.init(&mut delay)?;
//!
//! let mut ctx = lcd.immediate_context();
//! ctx.fill_rect(0, 0, 240, 135, 0x0000)?;
//! ctx.set_pixel(10, 10, 0xf800)?;
//! ```
//!
//! Panels with DC or CS tied permanently take a
//! [`dummypins::DummyOutputPin`] for that line; a missing reset line is
//! `None`, which skips the hardware reset phase entirely.
//!
//! The SPI clock rate and pin muxing are the HAL's business: pass in an
//! already configured bus (20 MHz is a common choice for these panels).

#![no_std]

extern crate embedded_hal as hal;

#[cfg(test)]
extern crate std;

pub mod context;
pub mod display;
pub mod dummypins;
pub mod error;
pub mod geometry;
#[cfg(feature = "graphics")]
pub mod graphics;
pub mod instructions;
#[cfg(test)]
mod testing;

pub use crate::context::{BufferedContext, ImmediateContext};
pub use crate::display::{Config, State, ST7789};
pub use crate::error::Error;
pub use crate::geometry::{AddressWindow, Profile, Rotation};

/// Native column count of the controller RAM array.
pub const RAM_WIDTH: u16 = 240;

/// Native row count of the controller RAM array.
pub const RAM_HEIGHT: u16 = 320;
