//! UTF-8 to two-byte GB2312 codes for the characters the built-in CJK tables carry.
//!
//! Anything else becomes the full-width space `A1 A1`, which has no glyph and is skipped when
//! drawing.

/// Code emitted for characters outside the mapping.
pub const UNMAPPED: [u8; 2] = [0xA1, 0xA1];

const CODES: [(char, [u8; 2]); 11] = [
    ('中', [0xD6, 0xD0]),
    ('一', [0xD2, 0xBB]),
    ('二', [0xB6, 0xFE]),
    ('三', [0xC8, 0xFD]),
    ('十', [0xCA, 0xAE]),
    ('王', [0xCD, 0xF5]),
    ('口', [0xBF, 0xDA]),
    ('日', [0xC8, 0xD5]),
    ('田', [0xCC, 0xEF]),
    ('上', [0xC9, 0xCF]),
    ('下', [0xCF, 0xC2]),
];

/// The two-byte code of `c`.
pub fn encode(c: char) -> [u8; 2] {
    CODES
        .iter()
        .find(|(k, _)| *k == c)
        .map_or(UNMAPPED, |&(_, code)| code)
}

/// Transcode `utf8` into `out`, two bytes per character, and return the number of bytes written.
///
/// Decoding stops at the first invalid sequence, and encoding stops once `out` has no room for
/// another full code.
pub fn transcode(utf8: &[u8], out: &mut [u8]) -> usize {
    let text = match core::str::from_utf8(utf8) {
        Ok(text) => text,
        Err(e) => core::str::from_utf8(&utf8[..e.valid_up_to()]).unwrap_or_default(),
    };
    let mut written = 0;
    for (c, slot) in text.chars().zip(out.chunks_exact_mut(2)) {
        slot.copy_from_slice(&encode(c));
        written += 2;
    }
    written
}
