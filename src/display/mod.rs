//! The main API to the display driver. A `Display` owns the interface and reset pin, runs the
//! power-on sequence, and draws by programming address windows and streaming pixel words into
//! them. Drawing operations live in `primitives` and `text`; `window` is the pixel stream handle.


pub mod primitives;
pub mod text;
pub mod window;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use log::{debug, trace};

use crate::color::Rgb565;
use crate::command::{Command, CommandError};
use crate::config::Config;
use crate::interface::DisplayInterface;

pub use self::text::Mode;
pub use self::window::Window;

/// Hold time on either side of the reset pulse.
const RESET_DELAY_MS: u32 = 100;
/// Settling time after reset before the controller accepts commands.
const POWER_ON_DELAY_MS: u32 = 500;
/// Time the controller needs after leaving sleep mode.
const SLEEP_OUT_DELAY_MS: u32 = 100;

/// Errors raised by display operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<IE, PinE> {
    /// The interface failed to transmit.
    Interface(IE),
    /// The reset pin failed to change state.
    ResetPin(PinE),
    /// An address window was given with its start after its end, or ran past the coordinate
    /// range. Nothing was sent for it.
    InvalidArgument,
    /// A raster image buffer held fewer bytes than its dimensions require. Nothing was sent.
    BufferSize,
}

impl<IE, PinE> From<CommandError<IE>> for Error<IE, PinE> {
    fn from(e: CommandError<IE>) -> Self {
        match e {
            CommandError::InvalidArgument => Error::InvalidArgument,
            CommandError::Interface(e) => Error::Interface(e),
        }
    }
}

type DisplayError<DI, RST> =
    Error<<DI as DisplayInterface>::Error, <RST as ErrorType>::Error>;

/// A driver for an ST7789 panel.
pub struct Display<DI, RST> {
    iface: DI,
    rst: RST,
    config: Config,
}

impl<DI, RST> Display<DI, RST>
where
    DI: DisplayInterface,
    RST: OutputPin,
{
    /// Construct a new display driver for a panel connected to the interface `iface` with its
    /// reset line on `rst`. Nothing is sent until `init`.
    pub fn new(iface: DI, rst: RST, config: Config) -> Self {
        Display { iface, rst, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Bring the interface lines to idle, pulse reset, and run the power-on register sequence.
    /// Blocks for about 800 ms in `delay`.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), DisplayError<DI, RST>> {
        debug!("st7789: reset");
        self.iface.reset_lines().map_err(Error::Interface)?;
        self.rst.set_high().map_err(Error::ResetPin)?;
        self.rst.set_low().map_err(Error::ResetPin)?;
        delay.delay_ms(RESET_DELAY_MS);
        self.rst.set_high().map_err(Error::ResetPin)?;
        delay.delay_ms(RESET_DELAY_MS);
        delay.delay_ms(POWER_ON_DELAY_MS);

        Command::SleepOut.send(&mut self.iface)?;
        delay.delay_ms(SLEEP_OUT_DELAY_MS);
        self.config.send(&mut self.iface)?;
        Command::SetDisplayOn(true).send(&mut self.iface)?;
        debug!(
            "st7789: ready, {}x{} {:?}",
            self.config.width,
            self.config.height,
            self.config.orientation
        );
        Ok(())
    }

    /// Consume the driver and give back the interface and reset pin.
    pub fn release(self) -> (DI, RST) {
        (self.iface, self.rst)
    }

    /// Control sleep mode.
    pub fn sleep(&mut self, enabled: bool) -> Result<(), DisplayError<DI, RST>> {
        let cmd = if enabled {
            Command::SleepIn
        } else {
            Command::SleepOut
        };
        Ok(cmd.send(&mut self.iface)?)
    }

    /// Control whether the frame memory is shown.
    pub fn display_on(&mut self, on: bool) -> Result<(), DisplayError<DI, RST>> {
        Ok(Command::SetDisplayOn(on).send(&mut self.iface)?)
    }

    /// Control color inversion.
    pub fn invert(&mut self, inverted: bool) -> Result<(), DisplayError<DI, RST>> {
        Ok(Command::SetInversion(inverted).send(&mut self.iface)?)
    }

    /// Program the inclusive address window `x1..=x2`, `y1..=y2` and put the controller in memory
    /// write mode. The caller owes the controller exactly one pixel word per window pixel before
    /// the next command; `window` returns a handle that keeps that count.
    pub fn set_window(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
    ) -> Result<(), DisplayError<DI, RST>> {
        if x1 > x2 || y1 > y2 {
            return Err(Error::InvalidArgument);
        }
        trace!("st7789: window ({}, {})..=({}, {})", x1, y1, x2, y2);
        Command::ColumnAddressSet(x1, x2).send(&mut self.iface)?;
        Command::RowAddressSet(y1, y2).send(&mut self.iface)?;
        Command::MemoryWrite.send(&mut self.iface)?;
        Ok(())
    }

    /// Program an address window and return a handle that streams exactly its pixel count.
    ///
    /// Windows are intended to be short-lived, and mutably borrow the display so clashing writes
    /// are prevented.
    pub fn window(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
    ) -> Result<Window<'_, DI>, DisplayError<DI, RST>> {
        self.set_window(x1, y1, x2, y2)?;
        let pixels = (u64::from(x2 - x1) + 1) * (u64::from(y2 - y1) + 1);
        Ok(Window::new(&mut self.iface, pixels))
    }

    /// Fill `xsta..xend`, `ysta..yend` with `color`. End coordinates are exclusive; an empty
    /// rectangle sends nothing.
    pub fn fill(
        &mut self,
        xsta: u16,
        ysta: u16,
        xend: u16,
        yend: u16,
        color: Rgb565,
    ) -> Result<(), DisplayError<DI, RST>> {
        if xend <= xsta || yend <= ysta {
            debug!("st7789: empty fill ({}, {})..({}, {})", xsta, ysta, xend, yend);
            return Ok(());
        }
        self.window(xsta, ysta, xend - 1, yend - 1)?
            .fill(color)
            .map_err(Error::Interface)
    }

    /// Fill the whole configured panel area.
    pub fn clear(&mut self, color: Rgb565) -> Result<(), DisplayError<DI, RST>> {
        let (width, height) = (self.config.width, self.config.height);
        self.fill(0, 0, width, height, color)
    }

    /// Copy a pre-encoded image of `length` columns by `width` rows to `x`, `y`. `pic` holds two
    /// bytes per pixel, high byte first, row-major, and is sent verbatim.
    pub fn show_picture(
        &mut self,
        x: u16,
        y: u16,
        length: u16,
        width: u16,
        pic: &[u8],
    ) -> Result<(), DisplayError<DI, RST>> {
        if length == 0 || width == 0 {
            return Ok(());
        }
        let bytes = 2 * usize::from(length) * usize::from(width);
        if pic.len() < bytes {
            return Err(Error::BufferSize);
        }
        let x2 = x.checked_add(length - 1).ok_or(Error::InvalidArgument)?;
        let y2 = y.checked_add(width - 1).ok_or(Error::InvalidArgument)?;
        self.window(x, y, x2, y2)?
            .draw_raw(&pic[..bytes])
            .map_err(Error::Interface)
    }
}
