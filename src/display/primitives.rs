//! Points, lines, rectangles and circles. Each plotted point is its own 1x1 window.

use embedded_hal::digital::OutputPin;

use super::{Display, DisplayError};
use crate::color::Rgb565;
use crate::interface::DisplayInterface;

/// The points of a straight line from `(x1, y1)` to `(x2, y2)`, both ends included.
///
/// The longer axis steps every point. The shorter axis accumulates its delta in an error term and
/// steps whenever that term exceeds the longer delta. A line always yields
/// `max(|x2 - x1|, |y2 - y1|) + 1` points.
#[derive(Clone, Debug)]
pub struct LinePoints {
    x: i32,
    y: i32,
    step_x: i32,
    step_y: i32,
    delta_x: i32,
    delta_y: i32,
    distance: i32,
    xerr: i32,
    yerr: i32,
    remaining: u32,
}

impl LinePoints {
    pub fn new(x1: u16, y1: u16, x2: u16, y2: u16) -> Self {
        let (dx, dy) = (i32::from(x2) - i32::from(x1), i32::from(y2) - i32::from(y1));
        let (delta_x, delta_y) = (dx.abs(), dy.abs());
        let distance = delta_x.max(delta_y);
        // Seeding the error terms halfway lands the last point on (x2, y2).
        let seed = (distance + 1) / 2;
        LinePoints {
            x: i32::from(x1),
            y: i32::from(y1),
            step_x: dx.signum(),
            step_y: dy.signum(),
            delta_x,
            delta_y,
            distance,
            xerr: seed,
            yerr: seed,
            remaining: distance as u32 + 1,
        }
    }
}

impl Iterator for LinePoints {
    type Item = (u16, u16);

    fn next(&mut self) -> Option<(u16, u16)> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let point = (self.x as u16, self.y as u16);
        self.xerr += self.delta_x;
        self.yerr += self.delta_y;
        if self.xerr > self.distance {
            self.xerr -= self.distance;
            self.x += self.step_x;
        }
        if self.yerr > self.distance {
            self.yerr -= self.distance;
            self.y += self.step_y;
        }
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining as usize, Some(self.remaining as usize))
    }
}

impl ExactSizeIterator for LinePoints {}

/// The points of a circle outline of radius `r` around `(x0, y0)`.
///
/// Walks one octant from the top of the circle, `a` counting up from 0 and `b` down from `r`,
/// and yields the eight reflections of each step. `b` shrinks by one whenever `a² + b²` passes
/// `r²` after `a` advances, and the walk ends once `a` overtakes `b`. Reflections that fall left of
/// or above the origin wrap around the 16-bit coordinate range.
#[derive(Clone, Debug)]
pub struct CirclePoints {
    x0: i32,
    y0: i32,
    r: i32,
    a: i32,
    b: i32,
    octant: u8,
}

impl CirclePoints {
    pub fn new(x0: u16, y0: u16, r: u8) -> Self {
        CirclePoints {
            x0: i32::from(x0),
            y0: i32::from(y0),
            r: i32::from(r),
            a: 0,
            b: i32::from(r),
            octant: 0,
        }
    }
}

impl Iterator for CirclePoints {
    type Item = (u16, u16);

    fn next(&mut self) -> Option<(u16, u16)> {
        if self.a > self.b {
            return None;
        }
        let (a, b) = (self.a, self.b);
        let (dx, dy) = match self.octant {
            0 => (-b, -a),
            1 => (b, -a),
            2 => (-a, b),
            3 => (-a, -b),
            4 => (b, a),
            5 => (a, -b),
            6 => (a, b),
            _ => (-b, a),
        };
        self.octant += 1;
        if self.octant == 8 {
            self.octant = 0;
            self.a += 1;
            if self.a * self.a + self.b * self.b > self.r * self.r {
                self.b -= 1;
            }
        }
        Some(((self.x0 + dx) as u16, (self.y0 + dy) as u16))
    }
}

impl<DI, RST> Display<DI, RST>
where
    DI: DisplayInterface,
    RST: OutputPin,
{
    /// Plot one pixel.
    pub fn draw_point(&mut self, x: u16, y: u16, color: Rgb565) -> Result<(), DisplayError<DI, RST>> {
        self.window(x, y, x, y)?
            .fill(color)
            .map_err(super::Error::Interface)
    }

    /// Draw a one pixel wide line between two points, both included.
    pub fn draw_line(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        color: Rgb565,
    ) -> Result<(), DisplayError<DI, RST>> {
        LinePoints::new(x1, y1, x2, y2).try_for_each(|(x, y)| self.draw_point(x, y, color))
    }

    /// Draw the outline of the rectangle with corners `(x1, y1)` and `(x2, y2)`: top, left,
    /// bottom then right edge.
    pub fn draw_rectangle(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        color: Rgb565,
    ) -> Result<(), DisplayError<DI, RST>> {
        self.draw_line(x1, y1, x2, y1, color)?;
        self.draw_line(x1, y1, x1, y2, color)?;
        self.draw_line(x1, y2, x2, y2, color)?;
        self.draw_line(x2, y1, x2, y2, color)
    }

    /// Draw a circle outline. See `CirclePoints` for the plotting order.
    pub fn draw_circle(
        &mut self,
        x0: u16,
        y0: u16,
        r: u8,
        color: Rgb565,
    ) -> Result<(), DisplayError<DI, RST>> {
        CirclePoints::new(x0, y0, r).try_for_each(|(x, y)| self.draw_point(x, y, color))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;
    use crate::config::{Config, Orientation};
    use crate::interface::test_spy::{Frame, PinLog, Sent, SpyPin, TestSpyInterface};

    fn display(di: &TestSpyInterface) -> Display<TestSpyInterface, SpyPin> {
        Display::new(
            di.split(),
            PinLog::new().pin("rst"),
            Config::new(Orientation::Portrait),
        )
    }

    fn points(frames: &[Frame]) -> Vec<(u16, u16)> {
        frames
            .iter()
            .map(|f| {
                assert_eq!((f.window.0, f.window.1), (f.window.2, f.window.3));
                assert_eq!(f.pixels.len(), 1);
                (f.window.0, f.window.1)
            })
            .collect()
    }

    #[test]
    fn point_is_one_pixel_window() {
        let di = TestSpyInterface::new();
        let mut disp = display(&di);
        disp.draw_point(7, 300, Rgb565::GREEN).unwrap();
        #[cfg_attr(rustfmt, rustfmt_skip)]
        di.check_multi(sends!(
            0x2A, [0, 7, 0, 7],
            0x2B, [0x01, 0x2C, 0x01, 0x2C],
            0x2C,
            [0x07, 0xE0]
        ));
    }

    #[test]
    fn horizontal_and_vertical_lines() {
        assert_eq!(
            LinePoints::new(3, 5, 6, 5).collect::<Vec<_>>(),
            vec![(3, 5), (4, 5), (5, 5), (6, 5)]
        );
        assert_eq!(
            LinePoints::new(2, 4, 2, 1).collect::<Vec<_>>(),
            vec![(2, 4), (2, 3), (2, 2), (2, 1)]
        );
        assert_eq!(LinePoints::new(9, 9, 9, 9).collect::<Vec<_>>(), vec![(9, 9)]);
    }

    #[test]
    fn diagonal_line() {
        assert_eq!(
            LinePoints::new(0, 0, 3, 3).collect::<Vec<_>>(),
            vec![(0, 0), (1, 1), (2, 2), (3, 3)]
        );
        assert_eq!(
            LinePoints::new(3, 0, 0, 3).collect::<Vec<_>>(),
            vec![(3, 0), (2, 1), (1, 2), (0, 3)]
        );
    }

    #[test]
    fn shallow_line() {
        assert_eq!(
            LinePoints::new(0, 0, 3, 1).collect::<Vec<_>>(),
            vec![(0, 0), (1, 0), (2, 1), (3, 1)]
        );
    }

    #[test]
    fn line_draws_each_point() {
        let di = TestSpyInterface::new();
        let mut disp = display(&di);
        disp.draw_line(10, 10, 14, 12, Rgb565::WHITE).unwrap();
        let frames = di.frames();
        assert!(frames.iter().all(|f| f.pixels == vec![0xFFFF]));
        assert_eq!(
            points(&frames),
            LinePoints::new(10, 10, 14, 12).collect::<Vec<_>>()
        );
    }

    #[test]
    #[rustfmt::skip]
    fn rectangle_edge_order() {
        let di = TestSpyInterface::new();
        let mut disp = display(&di);
        disp.draw_rectangle(1, 1, 3, 2, Rgb565::RED).unwrap();
        assert_eq!(
            points(&di.frames()),
            vec![
                // top
                (1, 1), (2, 1), (3, 1),
                // left
                (1, 1), (1, 2),
                // bottom
                (1, 2), (2, 2), (3, 2),
                // right
                (3, 1), (3, 2),
            ]
        );
    }

    #[test]
    #[rustfmt::skip]
    fn circle_point_order() {
        let expected: Vec<(u16, u16)> = vec![
            // a = 0, b = 2
            (98, 100), (102, 100), (100, 102), (100, 98),
            (102, 100), (100, 98), (100, 102), (98, 100),
            // a = 1: 1 + 4 > 4, so b drops to 1
            (99, 99), (101, 99), (99, 101), (99, 99),
            (101, 101), (101, 99), (101, 101), (99, 101),
            // a = 2: b drops to 0 and the walk ends
        ];
        assert_eq!(CirclePoints::new(100, 100, 2).collect::<Vec<_>>(), expected);
    }

    #[test]
    fn zero_radius_circle() {
        assert_eq!(CirclePoints::new(5, 5, 0).count(), 8);
        assert!(CirclePoints::new(5, 5, 0).all(|p| p == (5, 5)));
    }

    #[test]
    fn circle_wraps_left_of_origin() {
        assert!(CirclePoints::new(0, 0, 1).any(|p| p == (u16::MAX, 0)));
    }

    #[test]
    fn circle_draws_each_point() {
        let di = TestSpyInterface::new();
        let mut disp = display(&di);
        disp.draw_circle(50, 60, 5, Rgb565::BLUE).unwrap();
        assert_eq!(
            points(&di.frames()),
            CirclePoints::new(50, 60, 5).collect::<Vec<_>>()
        );
    }

    proptest! {
        #[test]
        fn line_hits_both_endpoints(x1 in 0u16..400, y1 in 0u16..400, x2 in 0u16..400, y2 in 0u16..400) {
            let pts: Vec<_> = LinePoints::new(x1, y1, x2, y2).collect();
            let dx = (i32::from(x2) - i32::from(x1)).abs();
            let dy = (i32::from(y2) - i32::from(y1)).abs();
            prop_assert_eq!(pts.len() as i32, dx.max(dy) + 1);
            prop_assert_eq!(pts[0], (x1, y1));
            prop_assert_eq!(pts[pts.len() - 1], (x2, y2));
        }

        #[test]
        fn line_is_connected(x1 in 0u16..400, y1 in 0u16..400, x2 in 0u16..400, y2 in 0u16..400) {
            let pts: Vec<_> = LinePoints::new(x1, y1, x2, y2).collect();
            for pair in pts.windows(2) {
                let step_x = (i32::from(pair[1].0) - i32::from(pair[0].0)).abs();
                let step_y = (i32::from(pair[1].1) - i32::from(pair[0].1)).abs();
                prop_assert!(step_x <= 1 && step_y <= 1);
            }
        }

        #[test]
        fn circle_stays_within_late_decrement_bound(x0 in 300u16..1000, y0 in 300u16..1000, r in 0u8..=255) {
            let r2 = i32::from(r) * i32::from(r);
            for (x, y) in CirclePoints::new(x0, y0, r) {
                let dx = i32::from(x) - i32::from(x0);
                let dy = i32::from(y) - i32::from(y0);
                prop_assert!(dx * dx + dy * dy <= r2 + i32::from(r));
            }
        }

        #[test]
        fn circle_is_quarter_turn_symmetric(r in 0u8..=255) {
            let offsets: HashSet<(i32, i32)> = CirclePoints::new(1000, 1000, r)
                .map(|(x, y)| (i32::from(x) - 1000, i32::from(y) - 1000))
                .collect();
            for &(dx, dy) in offsets.iter() {
                prop_assert!(offsets.contains(&(-dy, dx)));
            }
        }
    }
}
