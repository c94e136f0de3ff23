//! Transports for the "4-wire" serial interface of the ST7789: a clock, a data line, a chip
//! select and a D/C (data/command) line. Every byte on the bus is 8 bits; the D/C line is held low
//! while a command byte is shifted out and is high for everything else.
//!
//! Two interchangeable transports are provided. `spi::SpiInterface` hands each byte to a hardware
//! SPI peripheral, and `bitbang::BitBangInterface` shifts each byte out by hand over three GPIO
//! outputs. There is no buffering in either: every call is one synchronous bus transaction per
//! byte.

pub trait DisplayInterface {
    /// The error raised by the underlying bus or pins.
    type Error: core::fmt::Debug;

    /// Send one command byte, framed by pulling D/C low for its duration and raising it after.
    fn send_command(&mut self, cmd: u8) -> Result<(), Self::Error>;

    /// Send payload bytes. D/C is expected to already be high from the preceding command and is
    /// not touched.
    fn send_data(&mut self, buf: &[u8]) -> Result<(), Self::Error>;

    /// Send a 16-bit payload word, high byte first.
    fn send_word(&mut self, word: u16) -> Result<(), Self::Error> {
        self.send_data(&word.to_be_bytes())
    }

    /// Drive every line owned by the interface to its idle level.
    fn reset_lines(&mut self) -> Result<(), Self::Error>;
}

impl<DI: DisplayInterface + ?Sized> DisplayInterface for &mut DI {
    type Error = DI::Error;

    fn send_command(&mut self, cmd: u8) -> Result<(), Self::Error> {
        DI::send_command(self, cmd)
    }

    fn send_data(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
        DI::send_data(self, buf)
    }

    fn send_word(&mut self, word: u16) -> Result<(), Self::Error> {
        DI::send_word(self, word)
    }

    fn reset_lines(&mut self) -> Result<(), Self::Error> {
        DI::reset_lines(self)
    }
}

pub mod spi {
    //! Hardware SPI transport. The SPI device is expected to be configured for 8-bit words, MSB
    //! first, mode 3, and to manage the chip select line itself.

    use core::slice;

    use embedded_hal::digital::OutputPin;
    use embedded_hal::spi::SpiDevice;

    use super::DisplayInterface;

    /// An error from either half of the SPI interface.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub enum SpiError<BusE, PinE> {
        /// The SPI device failed to write.
        Bus(BusE),
        /// The D/C output pin failed to change state.
        DataCommandPin(PinE),
    }

    pub struct SpiInterface<SPI, DC> {
        /// The SPI device connected to the ST7789.
        spi: SPI,
        /// A GPIO output pin connected to the D/C (data/command) pin of the ST7789 (the fourth
        /// "wire" of "4-wire" mode).
        dc: DC,
    }

    impl<SPI, DC> SpiInterface<SPI, DC>
    where
        SPI: SpiDevice<u8>,
        DC: OutputPin,
    {
        /// Create a new SPI interface to communicate with the display driver. `spi` is the SPI
        /// device, and `dc` is the GPIO output pin connected to the D/C pin of the ST7789.
        pub fn new(spi: SPI, dc: DC) -> Self {
            Self { spi, dc }
        }

        /// Give back the SPI device and D/C pin.
        pub fn release(self) -> (SPI, DC) {
            (self.spi, self.dc)
        }

        fn write_byte(&mut self, byte: u8) -> Result<(), SpiError<SPI::Error, DC::Error>> {
            self.spi
                .write(slice::from_ref(&byte))
                .map_err(SpiError::Bus)
        }
    }

    impl<SPI, DC> DisplayInterface for SpiInterface<SPI, DC>
    where
        SPI: SpiDevice<u8>,
        DC: OutputPin,
    {
        type Error = SpiError<SPI::Error, DC::Error>;

        fn send_command(&mut self, cmd: u8) -> Result<(), Self::Error> {
            self.dc.set_low().map_err(SpiError::DataCommandPin)?;
            self.write_byte(cmd)?;
            self.dc.set_high().map_err(SpiError::DataCommandPin)
        }

        fn send_data(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
            buf.iter().try_for_each(|&b| self.write_byte(b))
        }

        fn reset_lines(&mut self) -> Result<(), Self::Error> {
            self.dc.set_low().map_err(SpiError::DataCommandPin)
        }
    }

}

pub mod bitbang {
    //! Software SPI transport over discrete GPIO outputs, for boards where the display is not
    //! wired to a hardware SPI peripheral. Data is shifted MSB first and sampled by the panel on
    //! the rising clock edge; chip select is asserted around every byte.

    use embedded_hal::digital::{OutputPin, PinState};

    use super::DisplayInterface;

    pub struct BitBangInterface<CS, SCK, MOSI, DC> {
        cs: CS,
        sck: SCK,
        mosi: MOSI,
        dc: DC,
    }

    impl<CS, SCK, MOSI, DC> BitBangInterface<CS, SCK, MOSI, DC>
    where
        CS: OutputPin,
        SCK: OutputPin<Error = CS::Error>,
        MOSI: OutputPin<Error = CS::Error>,
        DC: OutputPin<Error = CS::Error>,
    {
        /// Claim the four output lines. Nothing is driven until `reset_lines` or the first
        /// transfer.
        pub fn new(cs: CS, sck: SCK, mosi: MOSI, dc: DC) -> Self {
            Self { cs, sck, mosi, dc }
        }

        /// Give back the chip select, clock, data and D/C pins, in that order.
        pub fn release(self) -> (CS, SCK, MOSI, DC) {
            (self.cs, self.sck, self.mosi, self.dc)
        }

        fn write_byte(&mut self, mut byte: u8) -> Result<(), CS::Error> {
            self.cs.set_low()?;
            for _ in 0..8 {
                self.sck.set_low()?;
                self.mosi.set_state(PinState::from(byte & 0x80 != 0))?;
                self.sck.set_high()?;
                byte <<= 1;
            }
            self.cs.set_high()
        }
    }

    impl<CS, SCK, MOSI, DC> DisplayInterface for BitBangInterface<CS, SCK, MOSI, DC>
    where
        CS: OutputPin,
        SCK: OutputPin<Error = CS::Error>,
        MOSI: OutputPin<Error = CS::Error>,
        DC: OutputPin<Error = CS::Error>,
    {
        type Error = CS::Error;

        fn send_command(&mut self, cmd: u8) -> Result<(), Self::Error> {
            self.dc.set_low()?;
            self.write_byte(cmd)?;
            self.dc.set_high()
        }

        fn send_data(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
            buf.iter().try_for_each(|&b| self.write_byte(b))
        }

        fn reset_lines(&mut self) -> Result<(), Self::Error> {
            self.cs.set_high()?;
            self.sck.set_low()?;
            self.mosi.set_low()?;
            self.dc.set_low()
        }
    }

}
