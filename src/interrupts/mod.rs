//! # Interrupt Handling Module
//!
//! - **GDT**: Global Descriptor Table with a TSS for the double fault stack
//! - **IDT**: exception handlers and the timer handler
//! - **PIC**: 8259 remapping, masking and end-of-interrupt
//! - **PIT**: channel 0 programmed as the vertical sync source
//!
//! ## Interrupt Vector Layout
//!
//! | Vector | Type           | Handler                                  |
//! |--------|----------------|------------------------------------------|
//! | 0-31   | CPU Exceptions | divide, page fault, double fault, ...    |
//! | 32     | Timer (IRQ0)   | vertical sync for the emulated display   |
//!
//! Every other IRQ line stays masked.

use crate::interrupts::{interrupts::init_idt, pic::PICS};

pub mod gdt;
pub mod interrupts;
pub mod pic;
pub mod pit;

pub fn init() {
    gdt::init();
    init_idt();
    unsafe { PICS.lock().initialize() };
}
