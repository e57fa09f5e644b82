//! # Programmable Interrupt Controller (8259 PIC)
//!
//! IRQ 0-15 are remapped past the CPU exception vectors:
//! - PIC 1: vectors 32-39 (IRQ 0-7)
//! - PIC 2: vectors 40-47 (IRQ 8-15)
//!
//! Only IRQ0 (the PIT) is unmasked; it paces the emulated display.

use pic8259::ChainedPics;
use spin::Mutex;

pub const PIC_1_OFFSET: u8 = 32;
pub const PIC_2_OFFSET: u8 = 40;

pub static PICS: Mutex<ChainedPics> =
    Mutex::new(unsafe { ChainedPics::new(PIC_1_OFFSET, PIC_2_OFFSET) });

#[derive(Debug, Clone, Copy)]
#[repr(u8)]
pub enum InterruptIndex {
    Timer = PIC_1_OFFSET, // 32 - IRQ0
}

impl InterruptIndex {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Mask every line except the timer.
pub fn unmask_timer_only() {
    unsafe {
        PICS.lock().write_masks(0b1111_1110, 0b1111_1111);
    }
}
