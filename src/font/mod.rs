//! Compiled-in bitmap fonts.
//!
//! Every glyph bitmap uses the same packing: rows top to bottom, `ceil(width / 8)` bytes per
//! row, and within a row byte `k` bit `j` (least significant first) holds pixel `8 * k + j`.
//! Bits past the glyph width are padding.
//!
//! ASCII fonts hold the 95 printable characters `' '..='~'` contiguously and are indexed by
//! `code - b' '`. Their cells are half as wide as they are tall. CJK fonts are square and sparse:
//! each record carries the two-byte code it renders, and lookup is a linear scan.

use itertools::iproduct;

pub mod ascii;
pub mod cjk;
pub mod gb2312;

/// The font heights the renderer supports. Any other size is refused by `TryFrom<u8>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FontSize {
    Size12,
    Size16,
    Size24,
    Size32,
}

/// A font size outside `{12, 16, 24, 32}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnsupportedFontSize(pub u8);

impl FontSize {
    pub const ALL: [FontSize; 4] = [
        FontSize::Size12,
        FontSize::Size16,
        FontSize::Size24,
        FontSize::Size32,
    ];

    /// Glyph height in pixels. CJK glyphs are this wide too; ASCII glyphs are half as wide.
    pub const fn pixels(self) -> u16 {
        match self {
            FontSize::Size12 => 12,
            FontSize::Size16 => 16,
            FontSize::Size24 => 24,
            FontSize::Size32 => 32,
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for FontSize {
    type Error = UnsupportedFontSize;

    fn try_from(size: u8) -> Result<Self, Self::Error> {
        FontSize::ALL
            .iter()
            .copied()
            .find(|s| s.pixels() == size as u16)
            .ok_or(UnsupportedFontSize(size))
    }
}

/// A borrowed glyph bitmap with its dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Glyph<'a> {
    width: u16,
    height: u16,
    bitmap: &'a [u8],
}

impl<'a> Glyph<'a> {
    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn bitmap(&self) -> &'a [u8] {
        self.bitmap
    }

    /// Whether the pixel at `col`, `row` is part of the glyph. Pixels outside the bitmap are
    /// clear.
    pub fn is_set(&self, col: u16, row: u16) -> bool {
        if col >= self.width {
            return false;
        }
        self.bitmap
            .get(row as usize * row_bytes(self.width as usize) + col as usize / 8)
            .map_or(false, |byte| byte & (1 << (col % 8)) != 0)
    }

    /// Every pixel as `(col, row, set)`, left to right then top to bottom.
    pub fn pixels(&self) -> impl Iterator<Item = (u16, u16, bool)> + 'a {
        let glyph = *self;
        iproduct!(0..self.height, 0..self.width).map(move |(row, col)| {
            (col, row, glyph.is_set(col, row))
        })
    }
}

/// A fixed-width table of the printable ASCII characters.
///
/// `bitmaps` holds one glyph per code from `' '`, each `ceil(width / 8) * height` bytes. Codes
/// past the end of a shorter table have no glyph.
pub struct AsciiFont {
    width: u16,
    height: u16,
    bitmaps: &'static [u8],
}

impl AsciiFont {
    pub const fn new(width: u16, height: u16, bitmaps: &'static [u8]) -> Self {
        Self {
            width,
            height,
            bitmaps,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// The glyph for `code`, or `None` outside `' '..='~'`.
    pub fn glyph(&self, code: u8) -> Option<Glyph<'static>> {
        let index = code.checked_sub(b' ')? as usize;
        let len = glyph_bytes(self.width as usize, self.height as usize);
        self.bitmaps
            .get(index * len..(index + 1) * len)
            .map(|bitmap| Glyph {
                width: self.width,
                height: self.height,
                bitmap,
            })
    }
}

/// One record of a CJK font: the two-byte code it renders and its square bitmap.
pub struct CjkGlyph {
    pub index: [u8; 2],
    pub bitmap: &'static [u8],
}

/// A sparse table of square CJK glyphs keyed by two-byte code. Records whose bitmap is shorter
/// than `ceil(size / 8) * size` bytes are never matched.
pub struct CjkFont {
    size: u16,
    glyphs: &'static [CjkGlyph],
}

impl CjkFont {
    pub const fn new(size: u16, glyphs: &'static [CjkGlyph]) -> Self {
        Self { size, glyphs }
    }

    pub fn size(&self) -> u16 {
        self.size
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Scan the table for the first record whose code matches both bytes of `key`.
    pub fn find(&self, key: [u8; 2]) -> Option<Glyph<'static>> {
        let len = glyph_bytes(self.size as usize, self.size as usize);
        self.glyphs
            .iter()
            .find(|g| g.index[0] == key[0] && g.index[1] == key[1])
            .filter(|g| g.bitmap.len() >= len)
            .map(|g| Glyph {
                width: self.size,
                height: self.size,
                bitmap: &g.bitmap[..len],
            })
    }
}

/// The built-in ASCII fonts, indexed by `FontSize`.
pub(crate) static ASCII_FONTS: [&AsciiFont; 4] = [
    &ascii::ASCII_1206,
    &ascii::ASCII_1608,
    &ascii::ASCII_2412,
    &ascii::ASCII_3216,
];

/// The built-in CJK fonts, indexed by `FontSize`.
pub(crate) static CJK_FONTS: [&CjkFont; 4] = [&cjk::CJK_12, &cjk::CJK_16, &cjk::CJK_24, &cjk::CJK_32];

/// The built-in ASCII font of the given height.
pub fn ascii_font(size: FontSize) -> &'static AsciiFont {
    ASCII_FONTS[size.index()]
}

/// The built-in CJK font of the given size.
pub fn cjk_font(size: FontSize) -> &'static CjkFont {
    CJK_FONTS[size.index()]
}

pub(crate) const fn row_bytes(width: usize) -> usize {
    (width + 7) / 8
}

pub(crate) const fn glyph_bytes(width: usize, height: usize) -> usize {
    row_bytes(width) * height
}

/// The half-open range of source pixels that destination pixel `dst` samples when a line of
/// `src_len` pixels is resampled to `dst_len`. Enlarging picks a single source pixel, shrinking
/// covers every source pixel under the destination one.
pub(crate) const fn source_span(dst: usize, dst_len: usize, src_len: usize) -> (usize, usize) {
    let start = dst * src_len / dst_len;
    if src_len <= dst_len {
        return (start, start + 1);
    }
    let end = ((dst + 1) * src_len + dst_len - 1) / dst_len;
    (start, end)
}
