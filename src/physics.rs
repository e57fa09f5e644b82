//! Position update and wall reflection for shapes.

use crate::config::DisplayConfig;
use crate::scene::Shape;

/// Inclusive range of valid top-left positions for a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub max_x: i32,
    pub max_y: i32,
}

impl Bounds {
    pub fn for_shape(display: &DisplayConfig, shape: &Shape) -> Self {
        Self {
            max_x: display.width as i32 - shape.size.width as i32,
            max_y: display.height as i32 - shape.size.height as i32,
        }
    }
}

/// position += velocity
pub fn advance(shape: &mut Shape) {
    shape.position += shape.velocity;
}

/// Bounce off the display edges: an axis that left `0..=max` has its
/// velocity negated and its position clamped back onto the edge.
pub fn reflect(shape: &mut Shape, bounds: Bounds) {
    let (x, vx) = reflect_axis(shape.position.x, shape.velocity.x, bounds.max_x);
    let (y, vy) = reflect_axis(shape.position.y, shape.velocity.y, bounds.max_y);
    shape.position.x = x;
    shape.position.y = y;
    shape.velocity.x = vx;
    shape.velocity.y = vy;
}

fn reflect_axis(position: i32, velocity: i32, max: i32) -> (i32, i32) {
    if position < 0 {
        (0, -velocity)
    } else if position > max {
        (max, -velocity)
    } else {
        (position, velocity)
    }
}

/// Advance then reflect every shape.
pub fn step_all(shapes: &mut [Shape], display: &DisplayConfig) {
    for shape in shapes.iter_mut() {
        advance(shape);
    }
    for shape in shapes.iter_mut() {
        let bounds = Bounds::for_shape(display, shape);
        reflect(shape, bounds);
    }
}
