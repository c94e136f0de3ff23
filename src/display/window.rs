//! Window abstraction for streaming pixels into a programmed address window.

use core::iter;

use crate::color::Rgb565;
use crate::interface::DisplayInterface;

/// A handle to an address window which has been programmed and is in memory write mode. It
/// accepts at most as many pixels as the window holds and silently drops the rest.
pub struct Window<'di, DI>
where
    DI: 'di + DisplayInterface,
{
    iface: &'di mut DI,
    remaining: u64,
}

impl<'di, DI> Window<'di, DI>
where
    DI: 'di + DisplayInterface,
{
    /// Construct a new window. This is only called by the factory method `Display::window`, right
    /// after it has programmed the window for `pixels` pixels.
    pub(super) fn new(iface: &'di mut DI, pixels: u64) -> Self {
        Self {
            iface,
            remaining: pixels,
        }
    }

    /// Pixels the controller still expects before the window is complete.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Stream colors into the window left-to-right and top-to-bottom. Stops when the window is
    /// full or the iterator runs out, whichever comes first.
    pub fn draw_pixels<I>(&mut self, pixels: I) -> Result<(), DI::Error>
    where
        I: IntoIterator<Item = Rgb565>,
    {
        let mut iter = pixels.into_iter();

        // Paint using constant memory by alternately filling a chunk buffer from the iterator and
        // writing it out.
        let mut buf = [0u8; 32];
        loop {
            let mut chunk_len = 0;
            for slot in buf.chunks_exact_mut(2) {
                if self.remaining == 0 {
                    break;
                }
                match iter.next() {
                    Some(color) => {
                        slot.copy_from_slice(&color.into_raw().to_be_bytes());
                        chunk_len += 2;
                        self.remaining -= 1;
                    }
                    None => break,
                }
            }

            if chunk_len > 0 {
                self.iface.send_data(&buf[..chunk_len])?;
            }

            // A short chunk means the window is full or the iterator is exhausted.
            if chunk_len != buf.len() {
                return Ok(());
            }
        }
    }

    /// Fill the rest of the window with one color.
    pub fn fill(&mut self, color: Rgb565) -> Result<(), DI::Error> {
        self.draw_pixels(iter::repeat(color))
    }

    /// Stream pre-encoded pixels, two bytes each with the high byte first. A trailing odd byte is
    /// ignored.
    pub fn draw_raw(&mut self, bytes: &[u8]) -> Result<(), DI::Error> {
        self.draw_pixels(
            bytes
                .chunks_exact(2)
                .map(|pair| Rgb565(u16::from_be_bytes([pair[0], pair[1]]))),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::color::Rgb565;
    use crate::config::{Config, Orientation};
    use crate::display::Display;
    use crate::interface::test_spy::{PinLog, Sent, SpyPin, TestSpyInterface};

    fn display(di: &TestSpyInterface) -> Display<TestSpyInterface, SpyPin> {
        Display::new(
            di.split(),
            PinLog::new().pin("rst"),
            Config::new(Orientation::Portrait),
        )
    }

    #[test]
    fn draw_pixels() {
        let di = TestSpyInterface::new();
        let mut disp = display(&di);
        {
            let mut window = disp.window(12, 10, 13, 10).unwrap();
            assert_eq!(window.remaining(), 2);
            window
                .draw_pixels([Rgb565(0xDEAD), Rgb565(0xBEEF)].iter().cloned())
                .unwrap();
            assert_eq!(window.remaining(), 0);
        }
        #[cfg_attr(rustfmt, rustfmt_skip)]
        di.check_multi(sends!(
            0x2A, [0, 12, 0, 13],
            0x2B, [0, 10, 0, 10],
            0x2C,
            [0xDE, 0xAD, 0xBE, 0xEF]
        ));
    }

    #[test]
    fn draw_pixels_end_at_window_filled() {
        let di = TestSpyInterface::new();
        let mut disp = display(&di);
        {
            let mut window = disp.window(0, 0, 0, 1).unwrap();
            window
                .draw_pixels([Rgb565(1), Rgb565(2), Rgb565(3)].iter().cloned())
                .unwrap();
            // Further pixels are dropped.
            window.fill(Rgb565::WHITE).unwrap();
        }
        assert_eq!(di.frames()[0].pixels, vec![1, 2]);
        assert_eq!(di.transactions(), 6);
    }

    #[test]
    fn draw_pixels_end_at_iterator_exhausted() {
        let di = TestSpyInterface::new();
        let mut disp = display(&di);
        {
            let mut window = disp.window(0, 0, 3, 0).unwrap();
            window.draw_pixels([Rgb565(7)].iter().cloned()).unwrap();
            assert_eq!(window.remaining(), 3);
        }
        assert_eq!(di.frames()[0].pixels, vec![7]);
    }

    #[test]
    fn draw_pixels_multiple_chunks() {
        let di = TestSpyInterface::new();
        let mut disp = display(&di);
        disp.window(0, 0, 16, 0).unwrap().fill(Rgb565::RED).unwrap();
        let sent = di.sent();
        let mut chunk = Vec::new();
        for _ in 0..16 {
            chunk.extend_from_slice(&[0xF8, 0x00]);
        }
        assert_eq!(sent[5], Sent::Data(chunk));
        assert_eq!(sent[6], Sent::Data(vec![0xF8, 0x00]));
        assert_eq!(sent.len(), 7);
    }

    #[test]
    fn exact_window_fills_one_chunk() {
        let di = TestSpyInterface::new();
        let mut disp = display(&di);
        disp.window(0, 0, 15, 0).unwrap().fill(Rgb565::RED).unwrap();
        // No empty trailing write once the window is complete.
        assert_eq!(di.transactions(), 6);
    }

    #[test]
    fn draw_raw_pairs() {
        let di = TestSpyInterface::new();
        let mut disp = display(&di);
        disp.window(0, 0, 1, 0)
            .unwrap()
            .draw_raw(&[0x12, 0x34, 0x56, 0x78, 0x9A])
            .unwrap();
        assert_eq!(di.frames()[0].pixels, vec![0x1234, 0x5678]);
    }
}
