//! # Module defining the instruction subset of the ST7789
//!
//! All instructions used by this driver are implemented as an enum and
//! written to resemble the command table of the data sheet:
//! <https://www.rhydolabz.com/documents/33/ST7789.pdf>
//!
//! The ST7789 speaks the common MIPI DCS command set of the Sitronix /
//! Ilitek controller families, so most of these opcodes also drive an
//! ST7735 or ILI9341. What differs per chip is the native RAM geometry
//! (240x320 here) and the pixel polarity: the IPS glass usually paired
//! with this controller wants inversion switched ON for correct colors,
//! which is why `InvertOn` is part of the regular init sequence and not
//! a special effect.
//!
//! ## Memory access control (MADCTL)
//!
//! A single register reorders the scan direction of the RAM-to-glass
//! mapping. Panels smaller than the native array are glued to an
//! arbitrary corner of it and sometimes rotated by 90 degrees, so the
//! right combination of these bits (plus the addressing offsets from
//! [`crate::geometry`]) is what makes a given piece of glass show an
//! upright, un-mirrored picture. The bits below follow the data sheet
//! names; [`crate::geometry::resolve`] picks the combination for the
//! known panel sizes.
//!
//! ## Address windows
//!
//! `ColumnAddressSet`/`RowAddressSet` take four payload bytes each, the
//! big-endian start and end of the active write window. Every
//! `MemoryWrite` that follows fills that window left-to-right,
//! top-to-bottom with 16 bit big-endian RGB565 words.

/// MADCTL bit: bottom-to-top row address order.
pub const MADCTL_ROW_ORDER: u8 = 0b1000_0000;

/// MADCTL bit: right-to-left column address order.
pub const MADCTL_COL_ORDER: u8 = 0b0100_0000;

/// MADCTL bit: exchange rows and columns (90 degree rotation).
pub const MADCTL_SWAP_XY: u8 = 0b0010_0000;

/// MADCTL bit: reversed vertical refresh direction.
pub const MADCTL_SCAN_ORDER: u8 = 0b0001_0000;

/// MADCTL bit: BGR subpixel order instead of RGB.
pub const MADCTL_RGB: u8 = 0b0000_1000;

/// MADCTL bit: reversed horizontal refresh direction.
pub const MADCTL_HORIZ_ORDER: u8 = 0b0000_0100;

/// ST7789 instruction subset used by this driver.
///
/// The power/gamma tuning block (GCTRL, VCOMS, LCMCTRL, the gamma
/// curves) is deliberately absent: the power-on defaults are fine for
/// the supported panels and those registers only affect contrast, never
/// addressing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// No operation, do nothing.
    // translates to: 0x00
    Nop,

    /// Software reset. The controller needs 120+ ms before it accepts
    /// the next command, more when it was asleep.
    // translates to: 0x01
    SoftwareReset,

    /// Enter the minimum-power sleep mode.
    // translates to: 0x10
    SleepIn,

    /// Leave sleep mode, power the panel circuits back up.
    // translates to: 0x11
    SleepOut,

    /// Normal pixel polarity.
    // translates to: 0x20
    InvertOff,

    /// Inverted pixel polarity. Required on the usual IPS glass.
    // translates to: 0x21
    InvertOn,

    /// Blank the screen without touching RAM.
    // translates to: 0x28
    DisplayOff,

    /// Show RAM contents on the glass.
    // translates to: 0x29
    DisplayOn,

    /// Set the column range of the active write window;
    /// payload XS15..XS0, XE15..XE0 big-endian.
    // translates to: 0x2A
    ColumnAddressSet,

    /// Set the row range of the active write window;
    /// payload YS15..YS0, YE15..YE0 big-endian.
    // translates to: 0x2B
    RowAddressSet,

    /// Memory write: following data bytes are pixel data for the
    /// active window, wrapping per the MADCTL scan order.
    // translates to: 0x2C
    MemoryWrite,

    /// Disable the tearing effect output line.
    // translates to: 0x34
    TearingEffectOff,

    /// Enable the tearing effect output line; payload selects v-blank
    /// only (0x00) or v-blank plus h-blank (0x01) pulses.
    // translates to: 0x35
    TearingEffectOn,

    /// Memory access control, one payload byte built from the
    /// `MADCTL_*` bits.
    // translates to: 0x36
    MemoryAccessControl,

    /// Interface pixel format; payload 0x05 selects 16 bit/pixel.
    // translates to: 0x3A
    ColorMode,
}

use Instruction::*;

impl Instruction {
    /// Returns the instruction opcode as a byte which can be sent over
    /// the wire in the command phase.
    pub fn opcode(self) -> u8 {
        match self {
            Nop => 0x00,
            SoftwareReset => 0x01,
            SleepIn => 0x10,
            SleepOut => 0x11,
            InvertOff => 0x20,
            InvertOn => 0x21,
            DisplayOff => 0x28,
            DisplayOn => 0x29,
            ColumnAddressSet => 0x2A,
            RowAddressSet => 0x2B,
            MemoryWrite => 0x2C,
            TearingEffectOff => 0x34,
            TearingEffectOn => 0x35,
            MemoryAccessControl => 0x36,
            ColorMode => 0x3A,
        }
    }
}

/// A prelude pulling the instruction enum and the MADCTL bits into
/// scope, for convenience.
pub mod prelude {
    pub use super::{
        Instruction, Instruction::*, MADCTL_COL_ORDER, MADCTL_HORIZ_ORDER, MADCTL_RGB,
        MADCTL_ROW_ORDER, MADCTL_SCAN_ORDER, MADCTL_SWAP_XY,
    };
}
