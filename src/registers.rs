//! Pixel buffer controller register block.
//!
//! ```text
//! word  read                      write
//! ────  ────────────────────────  ─────────────────────────────
//!  0    front buffer address      1 = swap at next vertical sync
//!  1    back buffer address       set back buffer address
//!  3    status, bit 0 = pending   -
//! ```
//!
//! Words are 32 bits wide, so register `n` sits at byte `4 * n` from the
//! base. Only implementations of [`PixelBufferRegisters`] know about word
//! offsets; everything above them uses named registers.

use core::ptr::{read_volatile, write_volatile};

/// Status register bit that stays set while a swap is pending.
pub const STATUS_SWAP_PENDING: usize = 0x01;

/// Value written to [`Register::Buffer`] to request a swap.
pub const SWAP_REQUEST: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum Register {
    Buffer = 0,
    BackBuffer = 1,
    Status = 3,
}

impl Register {
    pub fn word_offset(self) -> usize {
        self as usize
    }
}

/// Word access to a pixel buffer controller.
///
/// Hardware, the simulated block in [`crate::sim`] and the kernel's
/// interrupt-driven emulation all sit behind this trait, which makes it the
/// seam between the engine and whatever consumes the front buffer.
/// Values are addresses, so they travel as `usize`; each implementation
/// narrows them to its own word width.
pub trait PixelBufferRegisters {
    fn read(&self, reg: Register) -> usize;
    fn write(&mut self, reg: Register, value: usize);
}

/// Memory-mapped register block of 32-bit words.
pub struct MmioRegisters {
    base: *mut u32,
}

impl MmioRegisters {
    /// # Safety
    /// `base` must be the address of a pixel buffer controller register
    /// block that stays mapped for the lifetime of the returned value, and
    /// nothing else may drive that block concurrently.
    pub const unsafe fn new(base: usize) -> Self {
        Self { base: base as *mut u32 }
    }

    pub fn base(&self) -> usize {
        self.base as usize
    }
}

impl PixelBufferRegisters for MmioRegisters {
    #[inline(always)]
    fn read(&self, reg: Register) -> usize {
        unsafe { read_volatile(self.base.add(reg.word_offset())) as usize }
    }

    #[inline(always)]
    fn write(&mut self, reg: Register, value: usize) {
        debug_assert!(u32::try_from(value).is_ok(), "{:#x} does not fit a register word", value);
        unsafe { write_volatile(self.base.add(reg.word_offset()), value as u32) }
    }
}

unsafe impl Send for MmioRegisters {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_offsets_match_controller_layout() {
        assert_eq!(Register::Buffer.word_offset(), 0);
        assert_eq!(Register::BackBuffer.word_offset(), 1);
        assert_eq!(Register::Status.word_offset(), 3);
    }

    #[test]
    fn mmio_accesses_land_on_word_offsets() {
        let mut block = [0u32; 4];
        block[0] = 0xC800_0000;
        block[3] = STATUS_SWAP_PENDING as u32;
        let mut regs = unsafe { MmioRegisters::new(block.as_mut_ptr() as usize) };

        assert_eq!(regs.read(Register::Buffer), 0xC800_0000);
        assert_eq!(regs.read(Register::Status) & STATUS_SWAP_PENDING, 1);

        regs.write(Register::BackBuffer, 0xC000_0000);
        regs.write(Register::Buffer, SWAP_REQUEST);
        assert_eq!(block, [1, 0xC000_0000, 0, 1]);
    }

    #[test]
    fn registers_are_four_bytes_apart() {
        let mut block = [0u32; 4];
        let mut regs = unsafe { MmioRegisters::new(block.as_mut_ptr() as usize) };

        regs.write(Register::BackBuffer, 0xC000_0000);
        assert_eq!(block, [0, 0xC000_0000, 0, 0]);

        block[3] = 0xFFFF_FFFF;
        let regs = unsafe { MmioRegisters::new(block.as_mut_ptr() as usize) };
        assert_eq!(regs.read(Register::Status), 0xFFFF_FFFF);
        assert_eq!(regs.read(Register::BackBuffer), 0xC000_0000);
    }
}
