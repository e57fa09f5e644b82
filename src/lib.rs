//! # Screensaver Engine
//!
//! Double-buffered rendering of bouncing rectangles joined by connector
//! lines, synchronised with a display controller's vertical sync.
//!
//! ## Layers
//!
//! | Module       | Role                                                  |
//! |--------------|-------------------------------------------------------|
//! | `pixel`      | Pixel Sink: one 16-bit write into the back buffer     |
//! | `raster`     | Integer Bresenham line rasterizer                     |
//! | `shapes`     | Filled rectangles and centre-to-centre connectors     |
//! | `controller` | Front/back buffer ownership and the swap handshake    |
//! | `engine`     | Per-frame loop: clear, update, render, present        |
//!
//! Supporting modules: `registers` (control block access), `config`,
//! `color`, `physics`, `scene`, `rng` and `sim` (a register block that
//! does not need hardware).
//!
//! ## Frame Lifecycle
//!
//! ```text
//! ┌──────────┐ request_swap ┌────────────┐
//! │ Drawing  │─────────────▶│ Presenting │
//! │          │◀─────────────│            │
//! └──────────┘ status bit 0 └────────────┘
//!                cleared
//! ```

#![cfg_attr(not(test), no_std)]

pub mod color;
pub mod config;
pub mod controller;
pub mod engine;
pub mod physics;
pub mod pixel;
pub mod raster;
pub mod registers;
pub mod rng;
pub mod scene;
pub mod shapes;
pub mod sim;

pub use color::Color;
pub use config::{BoardConfig, ConfigError, DisplayConfig};
pub use controller::{FrameBufferController, PresentError, SwapState};
pub use engine::Engine;
pub use pixel::{BackBuffer, PixelSink};
pub use registers::{MmioRegisters, PixelBufferRegisters, Register};
pub use scene::{Scene, Shape};

pub use embedded_graphics_core::geometry::{Point, Size};
