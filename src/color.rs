//! 16-bit RGB565 colors as the panel consumes them: 5 bits red, 6 bits green, 5 bits blue, sent
//! high byte first. There is no alpha channel.

/// A packed RGB565 color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const WHITE: Rgb565 = Rgb565(0xFFFF);
    pub const BLACK: Rgb565 = Rgb565(0x0000);
    pub const BLUE: Rgb565 = Rgb565(0x001F);
    pub const RED: Rgb565 = Rgb565(0xF800);
    pub const GREEN: Rgb565 = Rgb565(0x07E0);
    pub const MAGENTA: Rgb565 = Rgb565(0xF81F);
    pub const CYAN: Rgb565 = Rgb565(0x7FFF);
    pub const YELLOW: Rgb565 = Rgb565(0xFFE0);
    pub const BROWN: Rgb565 = Rgb565(0xBC40);
    pub const GRAY: Rgb565 = Rgb565(0x8430);
    pub const DARK_BLUE: Rgb565 = Rgb565(0x01CF);
    pub const LIGHT_BLUE: Rgb565 = Rgb565(0x7D7C);
    pub const LIGHT_GREEN: Rgb565 = Rgb565(0x841F);

    /// Pack 8-bit red, green and blue components, dropping their low bits.
    pub const fn from_rgb888(r: u8, g: u8, b: u8) -> Self {
        Rgb565(((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | (b as u16 >> 3))
    }

    /// The packed value, as sent on the wire.
    pub const fn into_raw(self) -> u16 {
        self.0
    }
}

impl From<u16> for Rgb565 {
    fn from(raw: u16) -> Self {
        Rgb565(raw)
    }
}

impl From<Rgb565> for u16 {
    fn from(color: Rgb565) -> Self {
        color.0
    }
}
