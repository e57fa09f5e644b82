//! Line Rasterizer: integer Bresenham.
//!
//! The walk always advances along the dominant axis, one pixel per step.
//! Steep lines are walked transposed and plotted back in screen space, and
//! endpoints are ordered before walking so that `a -> b` and `b -> a` yield
//! the same pixels.

use crate::color::Color;
use crate::pixel::PixelSink;
use crate::Point;

/// Pixels of a line segment in walk order.
#[derive(Debug, Clone)]
pub struct LinePoints {
    steep: bool,
    x: i32,
    x_end: i32,
    y: i32,
    y_step: i32,
    delta_x: i32,
    delta_y: i32,
    error: i32,
    done: bool,
}

impl LinePoints {
    pub fn new(p0: Point, p1: Point) -> Self {
        let (mut x0, mut y0, mut x1, mut y1) = (p0.x, p0.y, p1.x, p1.y);

        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        if steep {
            core::mem::swap(&mut x0, &mut y0);
            core::mem::swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            core::mem::swap(&mut x0, &mut x1);
            core::mem::swap(&mut y0, &mut y1);
        }

        let delta_x = x1 - x0;
        let delta_y = (y1 - y0).abs();

        Self {
            steep,
            x: x0,
            x_end: x1,
            y: y0,
            y_step: if y0 < y1 { 1 } else { -1 },
            delta_x,
            delta_y,
            error: -(delta_x / 2),
            done: false,
        }
    }
}

impl Iterator for LinePoints {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        if self.done {
            return None;
        }

        let point = if self.steep {
            Point::new(self.y, self.x)
        } else {
            Point::new(self.x, self.y)
        };

        self.error += self.delta_y;
        if self.error >= 0 {
            self.y += self.y_step;
            self.error -= self.delta_x;
        }

        if self.x == self.x_end {
            self.done = true;
        } else {
            self.x += 1;
        }
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = if self.done { 0 } else { (self.x_end - self.x) as usize + 1 };
        (left, Some(left))
    }
}

impl ExactSizeIterator for LinePoints {}

/// Plot the segment `p0`..=`p1`.
pub fn draw_line<S: PixelSink + ?Sized>(sink: &mut S, p0: Point, p1: Point, color: Color) {
    for p in LinePoints::new(p0, p1) {
        sink.set_pixel(p.x, p.y, color);
    }
}
