//! # Graphics bridge for the ST7789
//!
//! This module is behind a feature flag. Enable it in your Cargo.toml
//! with feature flag "graphics".
//!
//! It implements the embedded-graphics `DrawTarget` for
//! [`ImmediateContext`], so all circle/rectangle/text/bitmap drawables
//! of that library render straight to the panel with `Rgb565` color —
//! no frame buffer on the host. Solid fills and `clear` lower onto the
//! driver's repeat-write path, so they stay single transactions instead
//! of degenerating into per-pixel writes.
//!
//! The configured [`Rotation`] is applied here: embedded-graphics draws
//! in the rotated frame, this bridge maps every coordinate onto the
//! panel's native orientation and swaps the advertised dimensions for
//! the 90/270 degree cases.
//!
//! The buffered strategy needs no bridge: render into whatever frame
//! memory your graphics stack owns and hand the finished RGB565 frame
//! to [`BufferedContext::display`](crate::context::BufferedContext::display).

use hal::blocking::spi::Write as SpiWrite;
use hal::digital::v2::OutputPin;

use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{Dimensions, OriginDimensions, Size},
    pixelcolor::{
        raw::{RawData, RawU16},
        Rgb565,
    },
    primitives::Rectangle,
    Pixel,
};

use crate::context::ImmediateContext;
use crate::error::Error;
use crate::geometry::Rotation;

// Maps a point from the rotated frame the graphics layer draws in onto
// panel coordinates. Width and height are the unrotated panel size.
fn transform(rotation: Rotation, width: u16, height: u16, x: u16, y: u16) -> (u16, u16) {
    match rotation {
        Rotation::Rotate0 => (x, y),
        Rotation::Rotate90 => (width - 1 - y, x),
        Rotation::Rotate180 => (width - 1 - x, height - 1 - y),
        Rotation::Rotate270 => (y, height - 1 - x),
    }
}

impl<'d, SPI, DC, CS, RST> ImmediateContext<'d, SPI, DC, CS, RST>
where
    SPI: SpiWrite<u8>,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    fn map(&self, x: u16, y: u16) -> (u16, u16) {
        transform(self.rotation(), self.width(), self.height(), x, y)
    }
}

impl<'d, SPI, DC, CS, RST> DrawTarget for ImmediateContext<'d, SPI, DC, CS, RST>
where
    SPI: SpiWrite<u8>,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    type Color = Rgb565;
    type Error = Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bb = self.bounding_box();
        for Pixel(point, color) in pixels {
            if !bb.contains(point) {
                continue;
            }
            let (x, y) = self.map(point.x as u16, point.y as u16);
            self.set_pixel(x, y, RawU16::from(color).into_inner())?;
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Rgb565) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        if area.size.width == 0 || area.size.height == 0 {
            return Ok(());
        }

        // transform both corners, then re-normalize: a rotated
        // axis-aligned rectangle is still axis-aligned
        let x0 = area.top_left.x as u16;
        let y0 = area.top_left.y as u16;
        let x1 = x0 + area.size.width as u16 - 1;
        let y1 = y0 + area.size.height as u16 - 1;
        let (ax, ay) = self.map(x0, y0);
        let (bx, by) = self.map(x1, y1);
        let (sx, ex) = if ax <= bx { (ax, bx) } else { (bx, ax) };
        let (sy, ey) = if ay <= by { (ay, by) } else { (by, ay) };

        self.fill_rect(
            sx,
            sy,
            ex - sx + 1,
            ey - sy + 1,
            RawU16::from(color).into_inner(),
        )
    }

    fn clear(&mut self, color: Rgb565) -> Result<(), Self::Error> {
        let (w, h) = (self.width(), self.height());
        self.fill_rect(0, 0, w, h, RawU16::from(color).into_inner())
    }
}

impl<'d, SPI, DC, CS, RST> OriginDimensions for ImmediateContext<'d, SPI, DC, CS, RST>
where
    SPI: SpiWrite<u8>,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    // advertise the rotated size, so embedded-graphics lays out for
    // what the viewer actually sees
    fn size(&self) -> Size {
        let (w, h) = (self.width(), self.height());
        if self.rotation().swaps_axes() {
            Size::new(h.into(), w.into())
        } else {
            Size::new(w.into(), h.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{data_phase, opcodes, ready_panel};
    use embedded_graphics_core::{geometry::Point, pixelcolor::RgbColor};
    use std::vec;

    #[test]
    fn advertised_size_follows_rotation() {
        let (mut lcd, _, _) = ready_panel(240, 135, Rotation::Rotate90);
        assert_eq!(lcd.immediate_context().size(), Size::new(135, 240));

        let (mut lcd, _, _) = ready_panel(240, 135, Rotation::Rotate180);
        assert_eq!(lcd.immediate_context().size(), Size::new(240, 135));
    }

    #[test]
    fn pixels_are_mapped_through_the_rotation() {
        let (mut lcd, log, _) = ready_panel(240, 135, Rotation::Rotate90);
        let mut ctx = lcd.immediate_context();

        // logical origin under 90 degrees lands on the panel's last
        // column: 239, plus the 40 pixel RAM offset -> 279
        ctx.draw_iter([Pixel(Point::zero(), Rgb565::RED)]).unwrap();
        assert_eq!(data_phase(&log, 0x2A).0, vec![1, 23, 1, 23]);
        assert_eq!(data_phase(&log, 0x2B).0, vec![0, 53, 0, 53]);
        assert_eq!(data_phase(&log, 0x2C).0, vec![0xF8, 0x00]);
    }

    #[test]
    fn out_of_bounds_pixels_are_ignored() {
        let (mut lcd, log, _) = ready_panel(240, 135, Rotation::Rotate0);
        let mut ctx = lcd.immediate_context();
        ctx.draw_iter([
            Pixel(Point::new(-1, -1), Rgb565::RED),
            Pixel(Point::new(999, 0), Rgb565::RED),
        ])
        .unwrap();
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn fill_solid_is_one_repeat_transaction() {
        let (mut lcd, log, _) = ready_panel(240, 135, Rotation::Rotate0);
        let mut ctx = lcd.immediate_context();
        ctx.fill_solid(
            &Rectangle::new(Point::new(1, 2), Size::new(3, 4)),
            Rgb565::WHITE,
        )
        .unwrap();

        assert_eq!(opcodes(&log), vec![0x2A, 0x2B, 0x2C]);
        assert_eq!(data_phase(&log, 0x2A).0, vec![0, 41, 0, 43]);
        assert_eq!(data_phase(&log, 0x2B).0, vec![0, 55, 0, 58]);
        assert_eq!(data_phase(&log, 0x2C).1, 12);
    }

    #[test]
    fn fill_solid_re_normalizes_rotated_corners() {
        let (mut lcd, log, _) = ready_panel(240, 135, Rotation::Rotate90);
        let mut ctx = lcd.immediate_context();
        ctx.fill_solid(
            &Rectangle::new(Point::zero(), Size::new(2, 3)),
            Rgb565::WHITE,
        )
        .unwrap();

        // logical 2x3 at the origin becomes panel columns 237..=239,
        // rows 0..=1; offsets 40/53 shift it into RAM coordinates
        assert_eq!(data_phase(&log, 0x2A).0, vec![1, 21, 1, 23]);
        assert_eq!(data_phase(&log, 0x2B).0, vec![0, 53, 0, 54]);
        assert_eq!(data_phase(&log, 0x2C).1, 6);
    }

    #[test]
    fn clear_fills_the_whole_panel() {
        let (mut lcd, log, _) = ready_panel(240, 135, Rotation::Rotate270);
        let mut ctx = lcd.immediate_context();
        ctx.clear(Rgb565::BLACK).unwrap();

        assert_eq!(data_phase(&log, 0x2A).0, vec![0, 40, 1, 23]);
        assert_eq!(data_phase(&log, 0x2B).0, vec![0, 53, 0, 187]);
        assert_eq!(data_phase(&log, 0x2C).1, 240 * 135);
    }
}
