//! Driver library for ST7789 color LCD panels on a 4-wire serial bus, driven either by a hardware
//! SPI peripheral or by bit-banged GPIO, with software drawing primitives and bitmap text.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod color;
pub mod command;
pub mod config;
pub mod display;
pub mod font;
pub mod interface;

// Re-exports for primary API.
pub use color::Rgb565;
pub use command::consts;
pub use config::{Config, Orientation, Transcoder};
pub use display::primitives::{CirclePoints, LinePoints};
pub use display::{Display, Error, Mode, Window};
pub use font::{AsciiFont, CjkFont, CjkGlyph, FontSize};
pub use interface::bitbang::BitBangInterface;
pub use interface::spi::{SpiError, SpiInterface};
pub use interface::DisplayInterface;
