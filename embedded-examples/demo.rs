//! Board-independent bring-up and drawing demo. Wire `run_spi` or `run_bitbang` to the HAL of
//! your board: any `SpiDevice` (mode 3, MSB first) or four push-pull outputs for the bus, one
//! output for D/C, one for RES, and a `DelayNs`.

#![no_std]

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;
use st7789_lcd::{
    BitBangInterface, Config, Display, DisplayInterface, Error, Mode, Orientation, Rgb565,
    SpiInterface,
};

/// A 4x2 image, two bytes per pixel.
const LOGO: [u8; 16] = [
    0xF8, 0x00, 0x07, 0xE0, 0x00, 0x1F, 0xFF, 0xFF, 0x00, 0x1F, 0xFF, 0xFF, 0xF8, 0x00, 0x07,
    0xE0,
];

pub fn run_spi<SPI, DC, RST, D>(
    spi: SPI,
    dc: DC,
    rst: RST,
    delay: &mut D,
) -> Result<(SPI, DC, RST), Error<st7789_lcd::SpiError<SPI::Error, DC::Error>, RST::Error>>
where
    SPI: SpiDevice<u8>,
    DC: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    let mut disp = Display::new(
        SpiInterface::new(spi, dc),
        rst,
        Config::new(Orientation::Portrait),
    );
    draw(&mut disp, delay)?;
    let (iface, rst) = disp.release();
    let (spi, dc) = iface.release();
    Ok((spi, dc, rst))
}

pub fn run_bitbang<CS, SCK, MOSI, DC, RST, D>(
    cs: CS,
    sck: SCK,
    mosi: MOSI,
    dc: DC,
    rst: RST,
    delay: &mut D,
) -> Result<(), Error<CS::Error, RST::Error>>
where
    CS: OutputPin,
    SCK: OutputPin<Error = CS::Error>,
    MOSI: OutputPin<Error = CS::Error>,
    DC: OutputPin<Error = CS::Error>,
    RST: OutputPin,
    D: DelayNs,
{
    let mut disp = Display::new(
        BitBangInterface::new(cs, sck, mosi, dc),
        rst,
        Config::new(Orientation::Landscape),
    );
    draw(&mut disp, delay)
}

fn draw<DI, RST, D>(
    disp: &mut Display<DI, RST>,
    delay: &mut D,
) -> Result<(), Error<DI::Error, RST::Error>>
where
    DI: DisplayInterface,
    RST: OutputPin,
    D: DelayNs,
{
    disp.init(delay)?;
    disp.clear(Rgb565::WHITE)?;

    disp.show_string(8, 8, b"ST7789 ready", Rgb565::BLUE, Rgb565::WHITE, 16, Mode::Opaque)?;
    disp.show_chinese(8, 32, "中日".as_bytes(), Rgb565::RED, Rgb565::WHITE, 24, Mode::Overlay)?;
    disp.show_int_num(8, 64, 2024, 6, Rgb565::BLACK, Rgb565::WHITE, 16)?;
    disp.show_float_num1(8, 88, 36.5, 4, Rgb565::BLACK, Rgb565::WHITE, 16)?;

    disp.draw_rectangle(4, 120, 120, 200, Rgb565::MAGENTA)?;
    disp.draw_line(4, 120, 120, 200, Rgb565::GREEN)?;
    disp.draw_circle(180, 160, 40, Rgb565::BROWN)?;
    disp.fill(150, 10, 230, 40, Rgb565::LIGHT_BLUE)?;
    disp.show_picture(200, 210, 4, 2, &LOGO)?;

    delay.delay_ms(2000);
    disp.invert(true)?;
    Ok(())
}
