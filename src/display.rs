//! # Main driver for the ST7789
//!
//! This holds the driver struct itself: the command framing over the
//! SPI transport, the power-up sequence, and the raw pixel-write
//! operations that the rendering contexts in [`crate::context`] build
//! on.
//!
//! All transport work is blocking and exclusive: the driver owns the
//! bus and its control lines, and every command is one atomic
//! chip-select transaction. Two drivers sharing one physical bus have
//! to be serialized by the caller.
//!
//! Typically you want to look at the following functions:
//!  - [`ST7789::new`] to create a driver instance
//!  - [`ST7789::init`] to bring the panel out of reset
//!  - [`ST7789::buffered_context`] / [`ST7789::immediate_context`] to
//!    pick a rendering strategy

use hal::blocking::delay::DelayMs;
use hal::blocking::spi::Write as SpiWrite;
use hal::digital::v2::OutputPin;

use log::debug;

use crate::{
    context::{BufferedContext, ImmediateContext},
    error::Error,
    geometry::{self, AddressWindow, Profile, Rotation},
    instructions::prelude::*,
};

/// Static description of the attached panel.
///
/// Width and height are the visible glass in pixels, in the panel's
/// native (unrotated) orientation. Pin identity and SPI clock rate are
/// carried by the HAL objects passed to [`ST7789::new`], not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Visible width in pixels.
    pub width: u16,
    /// Visible height in pixels.
    pub height: u16,
    /// Rotation applied by the rendering side.
    pub rotation: Rotation,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            width: 240,
            height: 240,
            rotation: Rotation::Rotate0,
        }
    }
}

/// Lifecycle state of the driver.
///
/// Transitions run forward only; the single backward edge is
/// `Ready -> Resetting` when [`ST7789::reset`] re-runs the power-up
/// sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Constructed, no transport I/O has happened yet.
    Uninitialized,
    /// Hardware reset pulse in progress.
    Resetting,
    /// Command sequence between reset and the addressed state.
    Initializing,
    /// Panel is displaying and addressable.
    Ready,
}

/// ST7789 driver instance, exclusive owner of its transport.
///
/// `DC` and `CS` take a [`crate::dummypins::DummyOutputPin`] when the
/// corresponding line is tied in hardware; `rst` is `None` when the
/// panel has no reset line, which skips the reset phase including its
/// settle delay.
#[derive(Debug)]
pub struct ST7789<SPI, DC, CS, RST>
where
    SPI: SpiWrite<u8>,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    spi: SPI,
    dc: DC,
    cs: CS,
    rst: Option<RST>,
    config: Config,
    profile: Profile,
    state: State,
}

impl<SPI, DC, CS, RST> ST7789<SPI, DC, CS, RST>
where
    SPI: SpiWrite<u8>,
    DC: OutputPin,
    CS: OutputPin,
    RST: OutputPin,
{
    /// Creates a new driver instance for the given panel.
    ///
    /// No transport I/O happens here; call [`ST7789::init`] next. Fails
    /// with [`Error::InvalidConfig`] when width or height is zero.
    pub fn new(spi: SPI, dc: DC, cs: CS, rst: Option<RST>, config: Config) -> Result<Self, Error> {
        if config.width == 0 || config.height == 0 {
            return Err(Error::InvalidConfig);
        }
        debug!(
            "creating st7789 driver for {}x{} panel",
            config.width, config.height
        );
        let profile = geometry::resolve(config.width, config.height);
        // the all-zero profile only comes out of the unlisted-size
        // fallback; every table entry has a reorder bit or an offset
        let fallback = Profile {
            madctl: 0,
            x_offset: 0,
            y_offset: 0,
        };
        if profile == fallback {
            debug!(
                "no geometry profile for {}x{}, using zero offsets",
                config.width, config.height
            );
        }
        Ok(ST7789 {
            spi,
            dc,
            cs,
            rst,
            profile,
            config,
            state: State::Uninitialized,
        })
    }

    /// The configuration this driver was created with.
    pub fn config(&self) -> Config {
        self.config
    }

    /// The addressing profile resolved for the configured panel size.
    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Current lifecycle state.
    pub fn state(&self) -> State {
        self.state
    }

    /// Runs the power-up sequence and leaves the panel displaying and
    /// addressed.
    ///
    /// The sequence blocks for roughly 350 ms of mandatory settle time;
    /// the delays are part of the controller's protocol contract, not
    /// tunables. Calling this on a driver that already left
    /// `Uninitialized` is rejected with [`Error::AlreadyInitialized`];
    /// use [`ST7789::reset`] for a deliberate full re-run.
    pub fn init(&mut self, delay: &mut impl DelayMs<u16>) -> Result<(), Error> {
        if self.state != State::Uninitialized {
            return Err(Error::AlreadyInitialized);
        }
        self.run_init(delay)
    }

    /// Re-runs the complete power-up sequence from any state.
    ///
    /// There is no partial re-init: the panel goes through reset, the
    /// full command sequence and re-addressing, exactly as in
    /// [`ST7789::init`].
    pub fn reset(&mut self, delay: &mut impl DelayMs<u16>) -> Result<(), Error> {
        self.run_init(delay)
    }

    /// Pulses the reset line, when one is wired.
    ///
    /// The controller wants the line held low briefly and then 100+ ms
    /// of settle before it accepts commands. Without a reset line this
    /// is a no-op; the software reset in the init sequence covers it.
    pub fn hard_reset(&mut self, delay: &mut impl DelayMs<u16>) -> Result<(), Error> {
        if let Some(rst) = self.rst.as_mut() {
            Error::pin(rst.set_low())?;
            delay.delay_ms(100);
            Error::pin(rst.set_high())?;
        }
        Ok(())
    }

    fn run_init(&mut self, delay: &mut impl DelayMs<u16>) -> Result<(), Error> {
        self.state = State::Resetting;
        self.hard_reset(delay)?;

        self.state = State::Initializing;
        debug!("initializing panel");
        self.command(SoftwareReset, &[])?;
        // not ready for further commands before this elapses
        delay.delay_ms(150);
        self.command(TearingEffectOn, &[0x00])?;
        self.command(ColorMode, &[0x05])?; // 16 bit/pixel
        self.command(InvertOn, &[])?;
        self.command(SleepOut, &[])?;
        self.command(DisplayOn, &[])?;
        delay.delay_ms(100);

        debug!(
            "addressing: madctl {:#04x}, offset ({}, {})",
            self.profile.madctl, self.profile.x_offset, self.profile.y_offset
        );
        let window = self.full_window()?;
        self.set_address_window(&window)?;
        let madctl = self.profile.madctl;
        self.command(MemoryAccessControl, &[madctl])?;

        self.state = State::Ready;
        Ok(())
    }

    /// Sends one instruction with its payload as a single chip-select
    /// transaction.
    pub fn command(&mut self, instruction: Instruction, params: &[u8]) -> Result<(), Error> {
        self.command_repeated(instruction, params, 1)
    }

    /// Sends one instruction, then streams the payload `repeat` times
    /// without re-sending the opcode and without releasing chip-select.
    ///
    /// This is how a rectangular region gets filled with one color: the
    /// window is programmed once and the two color bytes are repeated
    /// per pixel. Chip-select is restored high on every exit path, a
    /// failed payload write included, so the bus is left consistent for
    /// a retry.
    pub fn command_repeated(
        &mut self,
        instruction: Instruction,
        params: &[u8],
        repeat: u32,
    ) -> Result<(), Error> {
        Error::pin(self.cs.set_low())?;
        let sent = self.send(instruction, params, repeat);
        let deselected = Error::pin(self.cs.set_high());
        sent.and(deselected)
    }

    // Command phase (DC low, one opcode byte), then data phase (DC
    // high, payload). Runs inside an asserted chip-select.
    fn send(&mut self, instruction: Instruction, params: &[u8], repeat: u32) -> Result<(), Error> {
        Error::pin(self.dc.set_low())?;
        Error::spi(self.spi.write(&[instruction.opcode()]))?;
        Error::pin(self.dc.set_high())?;
        if !params.is_empty() {
            for _ in 0..repeat {
                Error::spi(self.spi.write(params))?;
            }
        }
        Ok(())
    }

    // Window for a panel-logical rectangle, offsets applied. Rejects
    // empty and out-of-panel rectangles before any transport I/O.
    fn window(&self, x: u16, y: u16, w: u16, h: u16) -> Result<AddressWindow, Error> {
        if w == 0 || h == 0 {
            return Err(Error::OutOfBounds);
        }
        let fits_x = x.checked_add(w).map_or(false, |end| end <= self.config.width);
        let fits_y = y.checked_add(h).map_or(false, |end| end <= self.config.height);
        if !fits_x || !fits_y {
            return Err(Error::OutOfBounds);
        }
        AddressWindow::new(
            self.profile.x_offset + x,
            self.profile.x_offset + x + w - 1,
            self.profile.y_offset + y,
            self.profile.y_offset + y + h - 1,
        )
    }

    fn full_window(&self) -> Result<AddressWindow, Error> {
        self.window(0, 0, self.config.width, self.config.height)
    }

    fn set_address_window(&mut self, window: &AddressWindow) -> Result<(), Error> {
        self.command(ColumnAddressSet, &window.column_bytes())?;
        self.command(RowAddressSet, &window.row_bytes())
    }

    /// Streams a full frame to the panel in one memory-write burst.
    ///
    /// `buffer` holds width * height pixels as big-endian RGB565, two
    /// bytes each, in row-major panel order. The address window is
    /// programmed once per call and the whole buffer goes out in a
    /// single chip-select transaction.
    pub fn blit(&mut self, buffer: &[u8]) -> Result<(), Error> {
        let expected = self.config.width as usize * self.config.height as usize * 2;
        if buffer.len() != expected {
            return Err(Error::BufferSize {
                expected,
                len: buffer.len(),
            });
        }
        debug!("blitting {} byte frame", buffer.len());
        let window = self.full_window()?;
        self.set_address_window(&window)?;
        self.command(MemoryWrite, buffer)
    }

    /// Writes a single pixel at panel-logical coordinates.
    ///
    /// Equivalent to `fill_rect(x, y, 1, 1, color)`.
    pub fn set_pixel(&mut self, x: u16, y: u16, color: u16) -> Result<(), Error> {
        self.fill_rect(x, y, 1, 1, color)
    }

    /// Fills a rectangle with one color.
    ///
    /// Programs the window once, then repeats the two color bytes
    /// w * h times inside a single memory-write transaction.
    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: u16) -> Result<(), Error> {
        let window = self.window(x, y, w, h)?;
        self.set_address_window(&window)?;
        self.command_repeated(
            MemoryWrite,
            &color.to_be_bytes(),
            u32::from(w) * u32::from(h),
        )
    }

    /// A rendering context that flushes caller-owned full frames, for
    /// hosts that can afford the frame memory.
    pub fn buffered_context(&mut self) -> BufferedContext<'_, SPI, DC, CS, RST> {
        BufferedContext::new(self)
    }

    /// A rendering context that writes every primitive through
    /// immediately, for hosts that cannot hold a frame buffer.
    pub fn immediate_context(&mut self) -> ImmediateContext<'_, SPI, DC, CS, RST> {
        ImmediateContext::new(self)
    }
}
