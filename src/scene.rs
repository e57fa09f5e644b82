//! Shapes and their cyclic connector topology.

use crate::color::{self, Color, PALETTE};
use crate::config::DisplayConfig;
use crate::rng::XorShift32;
use crate::{Point, Size};

/// Every shape is a 12x8 rectangle.
pub const SHAPE_SIZE: Size = Size::new(12, 8);

/// Number of shapes the kernel animates.
pub const SHAPE_COUNT: usize = 8;

/// Velocities are drawn from `-MAX_SPEED..MAX_SPEED`.
pub const MAX_SPEED: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    /// Top-left corner.
    pub position: Point,
    /// Pixels per frame on each axis.
    pub velocity: Point,
    pub size: Size,
    pub color: Color,
}

impl Shape {
    pub const fn new(position: Point, velocity: Point, color: Color) -> Self {
        Self {
            position,
            velocity,
            size: SHAPE_SIZE,
            color,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.position.x + (self.size.width / 2) as i32,
            self.position.y + (self.size.height / 2) as i32,
        )
    }
}

/// Ordered shapes. Shape `i` connects to shape `(i + 1) % N`; the order
/// never changes after construction.
#[derive(Debug, Clone)]
pub struct Scene<const N: usize> {
    shapes: [Shape; N],
}

impl<const N: usize> Scene<N> {
    pub const fn new(shapes: [Shape; N]) -> Self {
        Self { shapes }
    }

    /// Random positions inside the drawable area, velocities in
    /// `-MAX_SPEED..MAX_SPEED` and colours from the palette.
    pub fn random(rng: &mut XorShift32, display: &DisplayConfig) -> Self {
        let max_x = display.width.saturating_sub(SHAPE_SIZE.width).max(1);
        let max_y = display.height.saturating_sub(SHAPE_SIZE.height).max(1);

        let shapes = core::array::from_fn(|_| {
            let position = Point::new(rng.below(max_x) as i32, rng.below(max_y) as i32);
            let velocity = Point::new(
                rng.range(-MAX_SPEED, MAX_SPEED),
                rng.range(-MAX_SPEED, MAX_SPEED),
            );
            let color = PALETTE[rng.below(color::SELECTABLE as u32) as usize];
            Shape::new(position, velocity, color)
        });
        Self { shapes }
    }

    pub fn shapes(&self) -> &[Shape; N] {
        &self.shapes
    }

    pub fn shapes_mut(&mut self) -> &mut [Shape; N] {
        &mut self.shapes
    }

    pub const fn len(&self) -> usize {
        N
    }

    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Index of the shape that `index` draws its connector to.
    pub const fn connector_target(index: usize) -> usize {
        (index + 1) % N
    }

    /// `(from, to)` index pairs in drawing order.
    pub fn connectors(&self) -> impl Iterator<Item = (usize, usize)> {
        (0..N).map(|i| (i, Self::connector_target(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_shape_wraps_to_first() {
        let scene = Scene::<SHAPE_COUNT>::random(&mut XorShift32::new(1), &DisplayConfig::VGA_320X240);
        let pairs: Vec<(usize, usize)> = scene.connectors().collect();
        assert_eq!(pairs.len(), 8);
        assert_eq!(pairs[7], (7, 0));
        for &(from, to) in &pairs[..7] {
            assert_eq!(to, from + 1);
        }
    }

    #[test]
    fn single_shape_connects_to_itself() {
        assert_eq!(Scene::<1>::connector_target(0), 0);
    }

    #[test]
    fn center_uses_integer_half_size() {
        let shape = Shape::new(Point::new(10, 20), Point::zero(), color::BLUE);
        assert_eq!(shape.center(), Point::new(16, 24));
    }

    #[test]
    fn random_scene_fits_display() {
        let display = DisplayConfig::VGA_320X240;
        for seed in [1u32, 7, 99, 12345, 0xFFFF_FFFF] {
            let scene = Scene::<SHAPE_COUNT>::random(&mut XorShift32::new(seed), &display);
            for shape in scene.shapes() {
                assert!((0..(320 - 12)).contains(&shape.position.x));
                assert!((0..(240 - 8)).contains(&shape.position.y));
                assert!((-3..3).contains(&shape.velocity.x));
                assert!((-3..3).contains(&shape.velocity.y));
                assert!(PALETTE[..color::SELECTABLE].contains(&shape.color));
                assert_eq!(shape.size, SHAPE_SIZE);
            }
        }
    }

    #[test]
    fn random_scene_is_reproducible() {
        let display = DisplayConfig::VGA_320X240;
        let a = Scene::<SHAPE_COUNT>::random(&mut XorShift32::new(2024), &display);
        let b = Scene::<SHAPE_COUNT>::random(&mut XorShift32::new(2024), &display);
        assert_eq!(a.shapes(), b.shapes());
    }
}
