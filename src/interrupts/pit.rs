//! Programmable Interval Timer (8253/8254), channel 0.
//!
//! The PIT counts down from a 16-bit divisor at 1.193182 MHz and raises
//! IRQ0 on every wrap. Programmed at 60 Hz it stands in for the display's
//! vertical sync.

use x86_64::instructions::port::Port;

/// Input clock of every PC-compatible PIT.
pub const PIT_FREQUENCY: u32 = 1_193_182;

mod port {
    pub const CHANNEL_0: u16 = 0x40;
    pub const COMMAND: u16 = 0x43;
}

/// Channel 0, lobyte/hibyte access, mode 3 (square wave), binary.
const CMD_CHANNEL_0_SQUARE_WAVE: u8 = 0b00_11_011_0;

pub fn divisor_for(hz: u32) -> u16 {
    (PIT_FREQUENCY / hz.max(1)).clamp(1, u16::MAX as u32) as u16
}

pub fn set_frequency(hz: u32) {
    let divisor = divisor_for(hz);
    unsafe {
        let mut command = Port::<u8>::new(port::COMMAND);
        let mut channel_0 = Port::<u8>::new(port::CHANNEL_0);
        command.write(CMD_CHANNEL_0_SQUARE_WAVE);
        channel_0.write((divisor & 0xFF) as u8);
        channel_0.write((divisor >> 8) as u8);
    }
}
