//! # Framebuffer Output
//!
//! The bootloader's linear framebuffer is where the emulated display
//! controller scans its front buffer out to.
//!
//! ## Scaling
//!
//! The 320x240 front buffer is drawn with the largest integer scale that
//! fits the screen, centred. Each 16-bit RGB565 source pixel is widened
//! to RGB888 and written in the framebuffer's native byte order (RGB, BGR
//! or 8-bit grey).

pub mod writer;

pub use writer::{init_framebuffer, FRAMEBUFFER};
