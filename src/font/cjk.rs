//! A small built-in set of CJK glyphs at 12, 16, 24 and 32 pixels square, keyed by GB2312 code.
//!
//! The tables are rendered at compile time from 16x16 masters. Applications that need wider
//! coverage build their own [`CjkFont`](super::CjkFont) tables and install them with
//! `Config::cjk_font`.

use super::{glyph_bytes, row_bytes, source_span, CjkFont, CjkGlyph};

const MASTER_SIZE: usize = 16;

/// Row-major, bit 15 is the leftmost column.
#[rustfmt::skip]
const MASTERS: [([u8; 2], [u16; MASTER_SIZE]); 11] = [
    // 中
    ([0xD6, 0xD0], [
        0x0100, 0x0100, 0x0100, 0x3FF8, 0x2108, 0x2108, 0x2108, 0x2108,
        0x2108, 0x3FF8, 0x0100, 0x0100, 0x0100, 0x0100, 0x0100, 0x0100,
    ]),
    // 一
    ([0xD2, 0xBB], [
        0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x7FFC,
        0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
    ]),
    // 二
    ([0xB6, 0xFE], [
        0x0000, 0x0000, 0x0000, 0x3FF8, 0x0000, 0x0000, 0x0000, 0x0000,
        0x0000, 0x0000, 0x0000, 0x0000, 0x7FFC, 0x0000, 0x0000, 0x0000,
    ]),
    // 三
    ([0xC8, 0xFD], [
        0x0000, 0x0000, 0x3FF8, 0x0000, 0x0000, 0x0000, 0x0000, 0x1FF0,
        0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x7FFC, 0x0000, 0x0000,
    ]),
    // 十
    ([0xCA, 0xAE], [
        0x0100, 0x0100, 0x0100, 0x0100, 0x0100, 0x0100, 0x7FFC, 0x0100,
        0x0100, 0x0100, 0x0100, 0x0100, 0x0100, 0x0100, 0x0100, 0x0100,
    ]),
    // 王
    ([0xCD, 0xF5], [
        0x0000, 0x3FF8, 0x0100, 0x0100, 0x0100, 0x0100, 0x0100, 0x1FF0,
        0x0100, 0x0100, 0x0100, 0x0100, 0x0100, 0x7FFC, 0x0000, 0x0000,
    ]),
    // 口
    ([0xBF, 0xDA], [
        0x0000, 0x0000, 0x3FF8, 0x2008, 0x2008, 0x2008, 0x2008, 0x2008,
        0x2008, 0x2008, 0x2008, 0x2008, 0x2008, 0x3FF8, 0x0000, 0x0000,
    ]),
    // 日
    ([0xC8, 0xD5], [
        0x0000, 0x1FF0, 0x1010, 0x1010, 0x1010, 0x1010, 0x1010, 0x1FF0,
        0x1010, 0x1010, 0x1010, 0x1010, 0x1010, 0x1010, 0x1FF0, 0x0000,
    ]),
    // 田
    ([0xCC, 0xEF], [
        0x0000, 0x3FF8, 0x2108, 0x2108, 0x2108, 0x2108, 0x2108, 0x3FF8,
        0x2108, 0x2108, 0x2108, 0x2108, 0x2108, 0x2108, 0x3FF8, 0x0000,
    ]),
    // 上
    ([0xC9, 0xCF], [
        0x0000, 0x0100, 0x0100, 0x0100, 0x0100, 0x0100, 0x01F8, 0x0100,
        0x0100, 0x0100, 0x0100, 0x0100, 0x0100, 0x0100, 0x7FFC, 0x0000,
    ]),
    // 下
    ([0xCF, 0xC2], [
        0x0000, 0x7FFC, 0x0100, 0x0100, 0x0100, 0x0140, 0x0120, 0x0100,
        0x0100, 0x0100, 0x0100, 0x0100, 0x0100, 0x0100, 0x0100, 0x0000,
    ]),
];

const fn master_pixel(rows: &[u16; MASTER_SIZE], col: usize, row: usize) -> bool {
    (rows[row] >> (MASTER_SIZE - 1 - col)) & 1 != 0
}

const fn render<const N: usize>(rows: &[u16; MASTER_SIZE], size: usize) -> [u8; N] {
    let stride = row_bytes(size);
    assert!(N == glyph_bytes(size, size));

    let mut out = [0u8; N];
    let mut row = 0;
    while row < size {
        let (row_lo, row_hi) = source_span(row, size, MASTER_SIZE);
        let mut col = 0;
        while col < size {
            let (col_lo, col_hi) = source_span(col, size, MASTER_SIZE);
            let mut set = false;
            let mut r = row_lo;
            while r < row_hi && !set {
                let mut c = col_lo;
                while c < col_hi && !set {
                    set = master_pixel(rows, c, r);
                    c += 1;
                }
                r += 1;
            }
            if set {
                out[row * stride + col / 8] |= 1 << (col % 8);
            }
            col += 1;
        }
        row += 1;
    }
    out
}

macro_rules! cjk_glyphs {
    ($size:expr; $($i:expr),+) => {
        [$(
            CjkGlyph {
                index: MASTERS[$i].0,
                bitmap: &render::<{ glyph_bytes($size, $size) }>(&MASTERS[$i].1, $size),
            },
        )+]
    };
}

static GLYPHS_12: [CjkGlyph; 11] = cjk_glyphs!(12; 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10);
static GLYPHS_16: [CjkGlyph; 11] = cjk_glyphs!(16; 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10);
static GLYPHS_24: [CjkGlyph; 11] = cjk_glyphs!(24; 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10);
static GLYPHS_32: [CjkGlyph; 11] = cjk_glyphs!(32; 0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10);

pub static CJK_12: CjkFont = CjkFont::new(12, &GLYPHS_12);
pub static CJK_16: CjkFont = CjkFont::new(16, &GLYPHS_16);
pub static CJK_24: CjkFont = CjkFont::new(24, &GLYPHS_24);
pub static CJK_32: CjkFont = CjkFont::new(32, &GLYPHS_32);
