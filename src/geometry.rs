//! # Panel geometry: profiles, rotation and address windows
//!
//! The controller RAM is always 240x320; the glass in front of it very
//! often is not. Every supported panel size therefore comes with a
//! [`Profile`]: the MADCTL byte that reorders the scan direction to
//! match the glass wiring, and the column/row offsets of the glass
//! inside the RAM array. [`resolve`] is a pure lookup over the known
//! sizes; an unknown size falls back to the zero-offset, no-reorder
//! profile and the driver proceeds, so unlisted panels still work when
//! their glass happens to start at the RAM origin.

use crate::error::Error;
use crate::instructions::prelude::*;

/// Rotation of the picture the graphics layer draws, in 90 degree
/// steps clockwise.
///
/// The driver itself addresses the panel in its native orientation;
/// rotation is applied by the rendering side (see [`crate::graphics`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    /// No rotation.
    #[default]
    Rotate0,
    /// Rotate by 90 degrees clockwise.
    Rotate90,
    /// Rotate by 180 degrees clockwise.
    Rotate180,
    /// Rotate by 270 degrees clockwise.
    Rotate270,
}

impl Rotation {
    /// Whether this rotation exchanges the two axes.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Rotate90 | Rotation::Rotate270)
    }
}

/// Addressing profile of a panel: how the glass sits inside the
/// controller RAM.
///
/// Resolved once during init and kept for the lifetime of the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    /// Memory access control byte, a combination of the `MADCTL_*`
    /// bits from [`crate::instructions`].
    pub madctl: u8,
    /// First RAM column covered by the glass.
    pub x_offset: u16,
    /// First RAM row covered by the glass.
    pub y_offset: u16,
}

/// Resolves the addressing profile for a requested panel size.
///
/// Pure lookup, no side effects. Sizes not in the table fall back to
/// `(0, 0, 0)`; that is a deliberate soft degradation, not an error —
/// the caller is responsible for checking visual correctness on glass
/// the table does not know.
pub fn resolve(width: u16, height: u16) -> Profile {
    match (width, height) {
        (240, 240) => Profile {
            madctl: MADCTL_HORIZ_ORDER,
            x_offset: 0,
            y_offset: 0,
        },
        (240, 135) => Profile {
            madctl: MADCTL_COL_ORDER | MADCTL_SWAP_XY | MADCTL_SCAN_ORDER,
            x_offset: 40,
            y_offset: 53,
        },
        (135, 240) => Profile {
            madctl: 0,
            x_offset: 52,
            y_offset: 40,
        },
        (320, 240) => Profile {
            madctl: MADCTL_COL_ORDER | MADCTL_SWAP_XY | MADCTL_SCAN_ORDER,
            x_offset: 0,
            y_offset: 40,
        },
        _ => Profile {
            madctl: 0,
            x_offset: 0,
            y_offset: 0,
        },
    }
}

/// The active write window in RAM coordinates, ready to be encoded
/// into the CASET/RASET payloads.
///
/// Recomputed per write, never stored. Constructing one checks the
/// start <= end invariant; the panel-bounds check happens in the driver
/// where the configured dimensions are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressWindow {
    col_start: u16,
    col_end: u16,
    row_start: u16,
    row_end: u16,
}

impl AddressWindow {
    /// Creates a window spanning the given inclusive column and row
    /// ranges.
    pub fn new(col_start: u16, col_end: u16, row_start: u16, row_end: u16) -> Result<Self, Error> {
        if col_start > col_end || row_start > row_end {
            return Err(Error::OutOfBounds);
        }
        Ok(AddressWindow {
            col_start,
            col_end,
            row_start,
            row_end,
        })
    }

    /// The four CASET payload bytes: big-endian start and end column.
    pub fn column_bytes(&self) -> [u8; 4] {
        let [s_hi, s_lo] = self.col_start.to_be_bytes();
        let [e_hi, e_lo] = self.col_end.to_be_bytes();
        [s_hi, s_lo, e_hi, e_lo]
    }

    /// The four RASET payload bytes: big-endian start and end row.
    pub fn row_bytes(&self) -> [u8; 4] {
        let [s_hi, s_lo] = self.row_start.to_be_bytes();
        let [e_hi, e_lo] = self.row_end.to_be_bytes();
        [s_hi, s_lo, e_hi, e_lo]
    }
}
