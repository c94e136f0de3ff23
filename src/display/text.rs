//! Bitmap text: ASCII characters and strings, CJK glyphs, and fixed-width numbers.
//!
//! Sizes are given as glyph heights in pixels. Glyphs come from the tables in the display's
//! `Config`. Heights outside `FontSize`, and characters without a glyph, draw nothing and are not
//! errors.

use embedded_hal::digital::OutputPin;
use log::debug;

use super::{Display, DisplayError, Error};
use crate::color::Rgb565;
use crate::font::{FontSize, Glyph};
use crate::interface::DisplayInterface;

/// Transcoded CJK keys per `show_chinese` call, in bytes.
const CJK_BUFFER_LEN: usize = 128;

/// How glyph pixels are written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Stream the whole glyph cell through one window, background pixels included.
    Opaque,
    /// Plot only the set pixels, one point at a time, leaving the background untouched.
    Overlay,
}

fn font_size(size: u8) -> Option<FontSize> {
    match FontSize::try_from(size) {
        Ok(size) => Some(size),
        Err(e) => {
            debug!("st7789: no font of size {}", e.0);
            None
        }
    }
}

/// Decimal digit of `value` at `place` (0 is the units digit).
fn digit(value: u32, place: u32) -> u8 {
    10u32
        .checked_pow(place)
        .map_or(0, |p| (value / p % 10) as u8)
}

impl<DI, RST> Display<DI, RST>
where
    DI: DisplayInterface,
    RST: OutputPin,
{
    fn draw_glyph(
        &mut self,
        x: u16,
        y: u16,
        glyph: Glyph<'_>,
        fc: Rgb565,
        bc: Rgb565,
        mode: Mode,
    ) -> Result<(), DisplayError<DI, RST>> {
        let x2 = x.wrapping_add(glyph.width() - 1);
        let y2 = y.wrapping_add(glyph.height() - 1);
        match mode {
            Mode::Opaque => self
                .window(x, y, x2, y2)?
                .draw_pixels(glyph.pixels().map(|(_, _, set)| if set { fc } else { bc }))
                .map_err(Error::Interface),
            Mode::Overlay => {
                // The glyph cell is programmed even though every lit pixel gets its own window.
                self.set_window(x, y, x2, y2)?;
                glyph
                    .pixels()
                    .filter(|&(_, _, set)| set)
                    .try_for_each(|(col, row, _)| {
                        self.draw_point(x.wrapping_add(col), y.wrapping_add(row), fc)
                    })
            }
        }
    }

    /// Draw one printable ASCII character in a `size / 2` by `size` cell at `x`, `y`.
    pub fn show_char(
        &mut self,
        x: u16,
        y: u16,
        code: u8,
        fc: Rgb565,
        bc: Rgb565,
        size: u8,
        mode: Mode,
    ) -> Result<(), DisplayError<DI, RST>> {
        let size = match font_size(size) {
            Some(size) => size,
            None => return Ok(()),
        };
        match self.config.ascii_fonts[size.index()].glyph(code) {
            Some(glyph) => self.draw_glyph(x, y, glyph, fc, bc, mode),
            None => {
                debug!("st7789: no glyph for {:#04x}", code);
                Ok(())
            }
        }
    }

    /// Draw ASCII text left to right, one `size / 2` cell per byte, up to the first NUL. There is
    /// no wrapping.
    pub fn show_string(
        &mut self,
        x: u16,
        y: u16,
        text: &[u8],
        fc: Rgb565,
        bc: Rgb565,
        size: u8,
        mode: Mode,
    ) -> Result<(), DisplayError<DI, RST>> {
        if font_size(size).is_none() {
            return Ok(());
        }
        let advance = u16::from(size / 2);
        let mut x = x;
        for &code in text.iter().take_while(|&&b| b != 0) {
            self.show_char(x, y, code, fc, bc, size, mode)?;
            x = x.wrapping_add(advance);
        }
        Ok(())
    }

    /// Draw UTF-8 text as square CJK glyphs, `size` pixels apart.
    ///
    /// The text is converted with the configured transcoder into at most 128 bytes of two-byte
    /// keys. A key without a glyph leaves its cell untouched but still advances.
    pub fn show_chinese(
        &mut self,
        x: u16,
        y: u16,
        utf8: &[u8],
        fc: Rgb565,
        bc: Rgb565,
        size: u8,
        mode: Mode,
    ) -> Result<(), DisplayError<DI, RST>> {
        let size = match font_size(size) {
            Some(size) => size,
            None => return Ok(()),
        };
        let mut keys = [0u8; CJK_BUFFER_LEN];
        let len = (self.config.transcoder)(utf8, &mut keys).min(CJK_BUFFER_LEN);
        let cjk = self.config.cjk_fonts[size.index()];
        let mut x = x;
        for key in keys[..len].chunks_exact(2) {
            match cjk.find([key[0], key[1]]) {
                Some(glyph) => self.draw_glyph(x, y, glyph, fc, bc, mode)?,
                None => debug!("st7789: no glyph for {:02X}{:02X}", key[0], key[1]),
            }
            x = x.wrapping_add(size.pixels());
        }
        Ok(())
    }

    /// Draw the low `len` decimal digits of `num`, opaque. Leading zeros are drawn as spaces,
    /// except the last digit.
    pub fn show_int_num(
        &mut self,
        x: u16,
        y: u16,
        num: u16,
        len: u8,
        fc: Rgb565,
        bc: Rgb565,
        size: u8,
    ) -> Result<(), DisplayError<DI, RST>> {
        if font_size(size).is_none() {
            return Ok(());
        }
        let advance = u16::from(size / 2);
        let mut leading = true;
        for t in 0..len {
            let d = digit(u32::from(num), u32::from(len - t - 1));
            let cx = x.wrapping_add(u16::from(t) * advance);
            if leading && t < len - 1 {
                if d == 0 {
                    self.show_char(cx, y, b' ', fc, bc, size, Mode::Opaque)?;
                    continue;
                }
                leading = false;
            }
            self.show_char(cx, y, b'0' + d, fc, bc, size, Mode::Opaque)?;
        }
        Ok(())
    }

    /// Draw `num` with two decimals, opaque, as `len` digits with a `.` before the last two.
    /// `num` is scaled by 100 and truncated to an unsigned 16-bit value first, so only
    /// `0.00..=655.35` draws faithfully. `len + 1` cells are used when `len >= 2`.
    pub fn show_float_num1(
        &mut self,
        x: u16,
        y: u16,
        num: f32,
        len: u8,
        fc: Rgb565,
        bc: Rgb565,
        size: u8,
    ) -> Result<(), DisplayError<DI, RST>> {
        if font_size(size).is_none() {
            return Ok(());
        }
        let advance = u16::from(size / 2);
        let cell = |slot: i32| x.wrapping_add((slot as u16).wrapping_mul(advance));
        let scaled = u32::from((num * 100.0) as u16);
        let mut len = i32::from(len);
        let mut t = 0;
        while t < len {
            let d = digit(scaled, (len - t - 1) as u32);
            if t == len - 2 {
                self.show_char(cell(len - 2), y, b'.', fc, bc, size, Mode::Opaque)?;
                t += 1;
                len += 1;
            }
            self.show_char(cell(t), y, b'0' + d, fc, bc, size, Mode::Opaque)?;
            t += 1;
        }
        Ok(())
    }
}
