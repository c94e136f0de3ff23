//! Panel configuration chosen before `Display::init`: scan orientation, visible size, the font
//! tables for text, and the transcoder used by the CJK text path.

use crate::command::*;
use crate::font::{self, gb2312, AsciiFont, CjkFont, FontSize};
use crate::interface::DisplayInterface;

/// Converts UTF-8 text into the two-byte keys of the CJK font tables. Writes at most
/// `out.len()` bytes and returns how many were written.
pub type Transcoder = fn(utf8: &[u8], out: &mut [u8]) -> usize;

/// Which way up the panel is mounted. Selects the memory access control (MADCTL) value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Orientation {
    Portrait,
    PortraitFlipped,
    Landscape,
    LandscapeFlipped,
}

impl Orientation {
    pub fn madctl(self) -> u8 {
        match self {
            Orientation::Portrait => 0x00,
            Orientation::PortraitFlipped => 0xC0,
            Orientation::Landscape => 0x70,
            Orientation::LandscapeFlipped => 0xA0,
        }
    }
}

const POSITIVE_GAMMA: [u8; consts::GAMMA_TABLE_LEN] = [
    0xD0, 0x00, 0x06, 0x09, 0x0B, 0x2A, 0x3C, 0x55, 0x4B, 0x08, 0x16, 0x14, 0x19, 0x20,
];
const NEGATIVE_GAMMA: [u8; consts::GAMMA_TABLE_LEN] = [
    0xD0, 0x00, 0x06, 0x09, 0x0B, 0x29, 0x36, 0x54, 0x4B, 0x0D, 0x16, 0x14, 0x21, 0x20,
];

/// A configuration for the display. The orientation is mandatory; panel size defaults to
/// 240x240, fonts to the built-in tables and text transcoding to the built-in GB2312 subset.
#[derive(Clone, Copy)]
pub struct Config {
    pub(crate) orientation: Orientation,
    pub(crate) width: u16,
    pub(crate) height: u16,
    pub(crate) transcoder: Transcoder,
    pub(crate) ascii_fonts: [&'static AsciiFont; 4],
    pub(crate) cjk_fonts: [&'static CjkFont; 4],
}

impl Config {
    pub fn new(orientation: Orientation) -> Self {
        Config {
            orientation,
            width: 240,
            height: 240,
            transcoder: gb2312::transcode,
            ascii_fonts: font::ASCII_FONTS,
            cjk_fonts: font::CJK_FONTS,
        }
    }

    /// Extend this `Config` with the visible panel size in pixels, in the chosen orientation.
    /// Only `Display::clear` uses it; drawing is not clipped.
    pub fn size(self, width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..self
        }
    }

    /// Extend this `Config` to use a different transcoder for `Display::show_chinese`. It must
    /// produce the keys of the configured CJK tables.
    pub fn transcoder(self, transcoder: Transcoder) -> Self {
        Self { transcoder, ..self }
    }

    /// Extend this `Config` to draw ASCII text of the given size from `font`.
    pub fn ascii_font(mut self, size: FontSize, font: &'static AsciiFont) -> Self {
        self.ascii_fonts[size.index()] = font;
        self
    }

    /// Extend this `Config` to draw CJK text of the given size from `font`.
    pub fn cjk_font(mut self, size: FontSize, font: &'static CjkFont) -> Self {
        self.cjk_fonts[size.index()] = font;
        self
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Transmit the register sequence that follows sleep-out during bring-up.
    pub(crate) fn send<DI>(&self, iface: &mut DI) -> Result<(), CommandError<DI::Error>>
    where
        DI: DisplayInterface,
    {
        Command::MemoryAccessControl(self.orientation.madctl()).send(iface)?;
        Command::SetPixelFormat(PixelFormat::Rgb565).send(iface)?;
        Command::PorchSetting(0x0C, 0x0C, 0x33, 0x33).send(iface)?;
        Command::GateControl(0x35).send(iface)?;
        Command::VcomSetting(0x35).send(iface)?;
        Command::LcmControl(0x2C).send(iface)?;
        Command::VdvVrhEnable(true).send(iface)?;
        Command::VrhSet(0x13).send(iface)?;
        Command::VdvSet(0x20).send(iface)?;
        Command::FrameRateControl(0x0F).send(iface)?;
        Command::VendorRegister(0xCA, 0x0F).send(iface)?;
        Command::VendorRegister(0xC8, 0x08).send(iface)?;
        Command::ContentAdaptiveBrightness(0x90).send(iface)?;
        Command::PowerControl1(0xA1).send(iface)?;
        BufCommand::PositiveGamma(&POSITIVE_GAMMA).send(iface)?;
        BufCommand::NegativeGamma(&NEGATIVE_GAMMA).send(iface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::test_spy::{Sent, TestSpyInterface};

    #[test]
    fn madctl_per_orientation() {
        assert_eq!(Orientation::Portrait.madctl(), 0x00);
        assert_eq!(Orientation::PortraitFlipped.madctl(), 0xC0);
        assert_eq!(Orientation::Landscape.madctl(), 0x70);
        assert_eq!(Orientation::LandscapeFlipped.madctl(), 0xA0);
    }

    #[test]
    fn builder_defaults() {
        let cfg = Config::new(Orientation::Landscape);
        assert_eq!(cfg.orientation(), Orientation::Landscape);
        assert_eq!((cfg.width(), cfg.height()), (240, 240));
        let cfg = cfg.size(320, 170);
        assert_eq!((cfg.width(), cfg.height()), (320, 170));
        assert_eq!(cfg.orientation(), Orientation::Landscape);
    }

    #[test]
    fn custom_transcoder() {
        fn always_key(_: &[u8], out: &mut [u8]) -> usize {
            out[..2].copy_from_slice(&[0x12, 0x34]);
            2
        }
        let cfg = Config::new(Orientation::Portrait).transcoder(always_key);
        let mut out = [0u8; 4];
        assert_eq!((cfg.transcoder)(b"x", &mut out), 2);
        assert_eq!(&out[..2], &[0x12, 0x34]);
    }

    #[test]
    fn register_sequence() {
        let mut di = TestSpyInterface::new();
        Config::new(Orientation::PortraitFlipped)
            .send(&mut di)
            .unwrap();
        #[rustfmt::skip]
        di.check_multi(&[
            Sent::Cmd(0x36), Sent::Data(vec![0xC0]),
            Sent::Cmd(0x3A), Sent::Data(vec![0x05]),
            Sent::Cmd(0xB2), Sent::Data(vec![0x0C, 0x0C, 0x00, 0x33, 0x33]),
            Sent::Cmd(0xB7), Sent::Data(vec![0x35]),
            Sent::Cmd(0xBB), Sent::Data(vec![0x35]),
            Sent::Cmd(0xC0), Sent::Data(vec![0x2C]),
            Sent::Cmd(0xC2), Sent::Data(vec![0x01]),
            Sent::Cmd(0xC3), Sent::Data(vec![0x13]),
            Sent::Cmd(0xC4), Sent::Data(vec![0x20]),
            Sent::Cmd(0xC6), Sent::Data(vec![0x0F]),
            Sent::Cmd(0xCA), Sent::Data(vec![0x0F]),
            Sent::Cmd(0xC8), Sent::Data(vec![0x08]),
            Sent::Cmd(0x55), Sent::Data(vec![0x90]),
            Sent::Cmd(0xD0), Sent::Data(vec![0xA4, 0xA1]),
            Sent::Cmd(0xE0), Sent::Data(POSITIVE_GAMMA.to_vec()),
            Sent::Cmd(0xE1), Sent::Data(NEGATIVE_GAMMA.to_vec()),
        ]);
    }
}
