//! Shape Renderer: rectangles as stacked lines, plus connectors.

use crate::color::Color;
use crate::pixel::PixelSink;
use crate::raster::draw_line;
use crate::scene::Shape;
use crate::Point;

/// Fill `width` x `height` pixels from `top_left`, one line per row.
pub fn draw_filled_rect<S: PixelSink + ?Sized>(
    sink: &mut S,
    top_left: Point,
    width: u32,
    height: u32,
    color: Color,
) {
    if width == 0 {
        return;
    }
    let right = top_left.x + width as i32 - 1;
    for y in top_left.y..top_left.y + height as i32 {
        draw_line(sink, Point::new(top_left.x, y), Point::new(right, y), color);
    }
}

/// Each shape's rectangle, then its connector to the next shape's centre.
pub fn draw_scene<S: PixelSink + ?Sized>(sink: &mut S, shapes: &[Shape], connector: Color) {
    let count = shapes.len();
    for (i, shape) in shapes.iter().enumerate() {
        draw_filled_rect(sink, shape.position, shape.size.width, shape.size.height, shape.color);

        let next = &shapes[(i + 1) % count];
        draw_line(sink, shape.center(), next.center(), connector);
    }
}
