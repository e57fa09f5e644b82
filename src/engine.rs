//! Scene loop.
//!
//! One frame is always, in this order: clear the back buffer, advance the
//! shapes, reflect them off the walls, draw shapes and connectors, present.
//! `present` is the only place the loop waits.

use log::{debug, info};

use crate::color::{self, Color};
use crate::controller::FrameBufferController;
use crate::physics;
use crate::registers::PixelBufferRegisters;
use crate::scene::Scene;
use crate::shapes::draw_scene;

/// Frames between periodic progress logs.
const LOG_EVERY: u64 = 600;

pub struct Engine<R, const N: usize> {
    controller: FrameBufferController<R>,
    scene: Scene<N>,
    background: Color,
    connector: Color,
    frames: u64,
}

impl<R: PixelBufferRegisters, const N: usize> Engine<R, N> {
    pub fn new(controller: FrameBufferController<R>, scene: Scene<N>) -> Self {
        Self {
            controller,
            scene,
            background: color::BACKGROUND,
            connector: color::CONNECTOR,
            frames: 0,
        }
    }

    pub fn scene(&self) -> &Scene<N> {
        &self.scene
    }

    pub fn controller(&self) -> &FrameBufferController<R> {
        &self.controller
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Render and present one frame.
    pub fn step(&mut self) {
        self.controller.clear(self.background);

        let display = *self.controller.display();
        physics::step_all(self.scene.shapes_mut(), &display);

        {
            let mut sink = self.controller.back_buffer();
            draw_scene(&mut sink, self.scene.shapes(), self.connector);
        }

        self.controller.present();
        self.frames += 1;

        if self.frames % LOG_EVERY == 0 {
            debug!("frame {}", self.frames);
        }
    }

    /// Run frames while `keep_running(frames_so_far)` holds. Returns the
    /// number of frames rendered by this call.
    pub fn run<F>(&mut self, mut keep_running: F) -> u64
    where
        F: FnMut(u64) -> bool,
    {
        info!("scene loop starting with {} shapes", N);
        let start = self.frames;
        while keep_running(self.frames) {
            self.step();
        }
        let ran = self.frames - start;
        info!("scene loop stopped after {} frames", ran);
        ran
    }

    /// Run for `count` frames.
    pub fn run_frames(&mut self, count: u64) -> u64 {
        let end = self.frames + count;
        self.run(|frames| frames < end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{from_raw, to_raw};
    use crate::config::{BoardConfig, DisplayConfig};
    use crate::scene::Shape;
    use crate::sim::SimulatedRegisters;
    use crate::Point;

    const DISPLAY: DisplayConfig = DisplayConfig::VGA_320X240;

    fn buffers() -> (Vec<u16>, Vec<u16>) {
        (vec![0xAAAA; DISPLAY.buffer_words()], vec![0xAAAA; DISPLAY.buffer_words()])
    }

    fn engine<const N: usize>(
        front: &mut [u16],
        back: &mut [u16],
        scene: Scene<N>,
    ) -> Engine<SimulatedRegisters, N> {
        let board = BoardConfig {
            control_base: 0,
            back_buffer_base: back.as_mut_ptr() as usize,
            display: DISPLAY,
        };
        let regs = SimulatedRegisters::new(front.as_mut_ptr() as usize);
        let controller = unsafe { FrameBufferController::init(regs, &board, color::BACKGROUND) }.unwrap();
        Engine::new(controller, scene)
    }

    fn pixel(buf: &[u16], x: usize, y: usize) -> u16 {
        buf[y * 512 + x]
    }

    #[test]
    fn bounded_run_renders_requested_frames() {
        let (mut front, mut back) = buffers();
        let scene = Scene::new([Shape::new(Point::new(10, 10), Point::new(1, 1), from_raw(0x00F0)); 3]);
        let mut eng = engine(&mut front, &mut back, scene);

        assert_eq!(eng.run_frames(5), 5);
        assert_eq!(eng.frames(), 5);
        assert_eq!(eng.controller().frames_presented(), 5);
        assert_eq!(eng.controller().registers().swaps(), 5);

        assert_eq!(eng.run(|frames| frames < 7), 2);
    }

    #[test]
    fn predicate_false_renders_nothing() {
        let (mut front, mut back) = buffers();
        let scene = Scene::new([Shape::new(Point::new(0, 0), Point::zero(), from_raw(0x1)); 2]);
        let mut eng = engine(&mut front, &mut back, scene);
        assert_eq!(eng.run(|_| false), 0);
        assert_eq!(eng.controller().registers().swaps(), 0);
    }

    #[test]
    fn presented_frame_holds_moved_shapes_and_connector() {
        let (mut front, mut back) = buffers();
        let red = from_raw(0xF800);
        let green = from_raw(0x07E0);
        let scene = Scene::new([
            Shape::new(Point::new(20, 30), Point::new(2, 0), red),
            Shape::new(Point::new(100, 30), Point::new(-1, 0), green),
        ]);
        let mut eng = engine(&mut front, &mut back, scene);
        eng.step();

        // Frame 1 was drawn into `back`, which the display now scans.
        assert_eq!(eng.controller().front_buffer_address(), back.as_ptr() as usize);
        assert_eq!(eng.scene().shapes()[0].position, Point::new(22, 30));
        assert_eq!(eng.scene().shapes()[1].position, Point::new(99, 30));

        assert_eq!(pixel(&back, 22, 30), to_raw(red));
        assert_eq!(pixel(&back, 33, 37), to_raw(red));
        assert_eq!(pixel(&back, 99, 30), to_raw(green));
        assert_eq!(pixel(&back, 110, 37), to_raw(green));
        // Connector between the centres (28,34) and (105,34), outside both rects.
        assert_eq!(pixel(&back, 60, 34), to_raw(color::CONNECTOR));
        assert_eq!(pixel(&back, 60, 35), to_raw(color::BACKGROUND));
        assert_eq!(pixel(&back, 21, 30), to_raw(color::BACKGROUND));
    }

    #[test]
    fn each_frame_starts_from_a_clear_buffer() {
        let (mut front, mut back) = buffers();
        let blue = from_raw(0x001F);
        let scene = Scene::new([Shape::new(Point::new(50, 50), Point::new(3, 0), blue)]);
        let mut eng = engine(&mut front, &mut back, scene);

        eng.run_frames(3);
        // Frame 3 went into `back` (frames alternate back, front, back).
        assert_eq!(eng.scene().shapes()[0].position, Point::new(59, 50));
        assert_eq!(pixel(&back, 59, 50), to_raw(blue));
        // Frame 1 left the shape at x = 53..65; the clear erased its left edge.
        assert_eq!(pixel(&back, 53, 50), to_raw(color::BACKGROUND));
        // Frame 2, in `front`, has the shape at x = 56.
        assert_eq!(pixel(&front, 56, 50), to_raw(blue));
        assert_eq!(pixel(&front, 55, 50), to_raw(color::BACKGROUND));
    }
}
