//! # Emulated Pixel Buffer Controller
//!
//! The PC this kernel boots on has no pixel buffer controller, so one is
//! built in RAM:
//!
//! - Two 320x240 buffers with a 1024 byte pitch, standing in for the
//!   board's on-chip memory and SDRAM.
//! - A register block (`EmulatedRegisters`) that the engine drives through
//!   the same trait as real hardware.
//! - `on_vertical_sync`, called from the PIT interrupt, which completes a
//!   pending swap and scans the new front buffer out to the bootloader's
//!   linear framebuffer.
//!
//! ## Timeline
//!
//! ```text
//! main loop:  clear ─ update ─ draw ─ request ┐ poll... ┌ re-read back ─ clear ...
//! PIT IRQ0:   ──────────── tick ──────────────┴─ swap ──┘ scan out ─── tick ───
//! ```

pub mod emulated;

pub use emulated::{board_config, on_vertical_sync, registers};
