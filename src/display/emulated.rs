use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use screensaver::registers::{PixelBufferRegisters, Register, STATUS_SWAP_PENDING, SWAP_REQUEST};
use screensaver::{BoardConfig, DisplayConfig};

use crate::framebuffer::FRAMEBUFFER;

const DISPLAY: DisplayConfig = DisplayConfig::VGA_320X240;
const BUFFER_WORDS: usize = DISPLAY.buffer_words();

#[repr(C, align(4096))]
struct PixelMemory(UnsafeCell<[u16; BUFFER_WORDS]>);

// Only ever accessed through raw addresses handed to the controller.
unsafe impl Sync for PixelMemory {}

impl PixelMemory {
    const fn new() -> Self {
        Self(UnsafeCell::new([0; BUFFER_WORDS]))
    }

    fn address(&self) -> usize {
        self.0.get() as usize
    }
}

static ON_CHIP: PixelMemory = PixelMemory::new();
static SDRAM: PixelMemory = PixelMemory::new();

/// Controller state shared between the scene loop and the timer interrupt.
pub struct ControllerState {
    front: AtomicUsize,
    back: AtomicUsize,
    swap_pending: AtomicBool,
}

impl ControllerState {
    const fn new() -> Self {
        Self {
            front: AtomicUsize::new(0),
            back: AtomicUsize::new(0),
            swap_pending: AtomicBool::new(false),
        }
    }
}

static CONTROLLER: ControllerState = ControllerState::new();

/// Handle the engine owns. Reads and writes behave like the board's
/// register block.
pub struct EmulatedRegisters {
    state: &'static ControllerState,
}

impl PixelBufferRegisters for EmulatedRegisters {
    fn read(&self, reg: Register) -> usize {
        match reg {
            Register::Buffer => self.state.front.load(Ordering::Acquire),
            Register::BackBuffer => self.state.back.load(Ordering::Acquire),
            Register::Status => {
                if self.state.swap_pending.load(Ordering::Acquire) {
                    STATUS_SWAP_PENDING
                } else {
                    0
                }
            }
        }
    }

    fn write(&mut self, reg: Register, value: usize) {
        match reg {
            Register::Buffer if value == SWAP_REQUEST => {
                self.state.swap_pending.store(true, Ordering::Release)
            }
            Register::BackBuffer => self.state.back.store(value, Ordering::Release),
            Register::Buffer | Register::Status => {}
        }
    }
}

/// Reset the controller so both registers point at on-chip memory, the
/// state the board comes out of reset in.
pub fn registers() -> EmulatedRegisters {
    let on_chip = ON_CHIP.address();
    CONTROLLER.front.store(on_chip, Ordering::Release);
    CONTROLLER.back.store(on_chip, Ordering::Release);
    CONTROLLER.swap_pending.store(false, Ordering::Release);
    EmulatedRegisters { state: &CONTROLLER }
}

/// Board description for the emulated controller: SDRAM is the buffer
/// programmed as back buffer at startup.
pub fn board_config() -> BoardConfig {
    BoardConfig {
        control_base: &CONTROLLER as *const ControllerState as usize,
        back_buffer_base: SDRAM.address(),
        display: DISPLAY,
    }
}

/// Vertical sync. Runs in interrupt context.
pub fn on_vertical_sync() {
    if !CONTROLLER.swap_pending.load(Ordering::Acquire) {
        // Front buffer contents only change at a swap.
        return;
    }

    let front = CONTROLLER.front.load(Ordering::Acquire);
    let back = CONTROLLER.back.load(Ordering::Acquire);
    CONTROLLER.front.store(back, Ordering::Release);
    CONTROLLER.back.store(front, Ordering::Release);
    CONTROLLER.swap_pending.store(false, Ordering::Release);

    // The scene loop is suspended until this handler returns and only ever
    // writes the other buffer.
    let pixels = unsafe { core::slice::from_raw_parts(back as *const u16, BUFFER_WORDS) };
    if let Some(mut guard) = FRAMEBUFFER.try_lock() {
        if let Some(fb) = guard.as_mut() {
            fb.scan_out(pixels, &DISPLAY);
        }
    }
}
