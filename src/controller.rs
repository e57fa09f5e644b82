//! # Frame Buffer Controller
//!
//! Owns the front/back buffer pair and the swap handshake with the display
//! hardware.
//!
//! ## States
//!
//! | State      | CPU                        | Display hardware          |
//! |------------|----------------------------|---------------------------|
//! | Drawing    | writes the back buffer     | scans the front buffer    |
//! | Presenting | waits on the status bit    | swaps at vertical sync    |
//!
//! ## Swap
//!
//! 1. `request_swap` writes 1 to the buffer register.
//! 2. `wait_for_swap_complete` polls status bit 0 until it clears.
//! 3. The back-buffer register is read again: the buffer just drawn is now
//!    the front buffer and the old front buffer is handed back for drawing.
//!
//! There is no timeout on real hardware; a controller that never clears
//! the status bit blocks `present` forever. `present_with_timeout` bounds
//! the wait for environments that can afford to give up.

use core::fmt;

use log::{debug, info, warn};

use crate::color::Color;
use crate::config::{BoardConfig, ConfigError, DisplayConfig};
use crate::pixel::{BackBuffer, PixelSink};
use crate::registers::{PixelBufferRegisters, Register, STATUS_SWAP_PENDING, SWAP_REQUEST};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapState {
    Drawing,
    Presenting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentError {
    Timeout { polls: u32 },
}

impl fmt::Display for PresentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresentError::Timeout { polls } => {
                write!(f, "display did not acknowledge swap after {} polls", polls)
            }
        }
    }
}

pub struct FrameBufferController<R> {
    registers: R,
    display: DisplayConfig,
    back_buffer: usize,
    state: SwapState,
    frames_presented: u64,
}

impl<R: PixelBufferRegisters> FrameBufferController<R> {
    /// Establish the buffer pair.
    ///
    /// The buffer the controller currently displays is cleared to
    /// `background`, then `board.back_buffer_base` is programmed as the back
    /// buffer and becomes the drawing target.
    ///
    /// # Safety
    /// The address in the buffer register and `board.back_buffer_base` must
    /// each point to `board.display.buffer_len()` bytes of writable memory,
    /// 2-byte aligned, that stay valid for the controller's lifetime and that
    /// only the controller and the display hardware touch.
    pub unsafe fn init(registers: R, board: &BoardConfig, background: Color) -> Result<Self, ConfigError> {
        board.validate()?;

        let mut controller = Self {
            back_buffer: registers.read(Register::Buffer),
            registers,
            display: board.display,
            state: SwapState::Drawing,
            frames_presented: 0,
        };

        // Nothing has been presented yet, so the displayed buffer is fair
        // game exactly once.
        controller.clear(background);

        controller.registers.write(Register::BackBuffer, board.back_buffer_base);
        controller.back_buffer = controller.registers.read(Register::BackBuffer);

        info!(
            "frame buffers: front {:#x}, back {:#x}, {}x{} pitch {}",
            controller.front_buffer_address(),
            controller.back_buffer,
            controller.display.width,
            controller.display.height,
            controller.display.row_stride_bytes
        );
        Ok(controller)
    }

    pub fn state(&self) -> SwapState {
        self.state
    }

    pub fn display(&self) -> &DisplayConfig {
        &self.display
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn registers(&self) -> &R {
        &self.registers
    }

    /// Address the next frame is drawn into.
    pub fn current_back_buffer_address(&self) -> usize {
        self.back_buffer
    }

    /// Address the display is scanning.
    pub fn front_buffer_address(&self) -> usize {
        self.registers.read(Register::Buffer)
    }

    /// Pixel Sink for the current back buffer.
    ///
    /// Only valid in [`SwapState::Drawing`]. While a swap is pending the
    /// address held here may already be on screen, so callers finish the
    /// swap first.
    pub fn back_buffer(&mut self) -> BackBuffer<'_> {
        debug_assert_eq!(self.state, SwapState::Drawing, "drawing while a swap is pending");
        // SAFETY: `init` established that `back_buffer` addresses a whole
        // buffer, and the borrow on `self` ends before the next swap.
        unsafe { BackBuffer::new(self.back_buffer, self.display) }
    }

    /// Overwrite every visible pixel of the back buffer. Does nothing while
    /// a swap is pending.
    pub fn clear(&mut self, color: Color) {
        if self.state != SwapState::Drawing {
            warn!("clear skipped, swap still pending");
            return;
        }
        let (width, height) = (self.display.width as i32, self.display.height as i32);
        let mut sink = self.back_buffer();
        for x in 0..width {
            for y in 0..height {
                sink.set_pixel(x, y, color);
            }
        }
    }

    pub fn request_swap(&mut self) {
        debug_assert_eq!(self.state, SwapState::Drawing);
        self.registers.write(Register::Buffer, SWAP_REQUEST);
        self.state = SwapState::Presenting;
    }

    pub fn swap_pending(&self) -> bool {
        self.registers.read(Register::Status) & STATUS_SWAP_PENDING != 0
    }

    /// Spin until the display acknowledges the pending swap.
    pub fn wait_for_swap_complete(&mut self) {
        if self.state == SwapState::Drawing {
            return;
        }
        while self.swap_pending() {
            core::hint::spin_loop();
        }
        self.finish_swap();
    }

    /// Hand the back buffer to the display and block until the swap lands.
    /// A request left outstanding by a timed-out
    /// [`present_with_timeout`](Self::present_with_timeout) is waited on,
    /// not repeated.
    pub fn present(&mut self) {
        if self.state == SwapState::Drawing {
            self.request_swap();
        }
        self.wait_for_swap_complete();
    }

    /// Like [`present`](Self::present) but gives up after `max_polls`
    /// status reads. On timeout the request stays outstanding; calling this
    /// again keeps waiting on it instead of issuing a second request.
    pub fn present_with_timeout(&mut self, max_polls: u32) -> Result<(), PresentError> {
        if self.state == SwapState::Drawing {
            self.request_swap();
        }
        for _ in 0..max_polls {
            if !self.swap_pending() {
                self.finish_swap();
                return Ok(());
            }
            core::hint::spin_loop();
        }
        warn!("swap still pending after {} polls", max_polls);
        Err(PresentError::Timeout { polls: max_polls })
    }

    fn finish_swap(&mut self) {
        self.back_buffer = self.registers.read(Register::BackBuffer);
        self.state = SwapState::Drawing;
        self.frames_presented += 1;
        debug!("swap {} done, drawing into {:#x}", self.frames_presented, self.back_buffer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{from_raw, BACKGROUND};
    use crate::sim::SimulatedRegisters;

    const DISPLAY: DisplayConfig = DisplayConfig::VGA_320X240;

    struct Buffers {
        front: Vec<u16>,
        back: Vec<u16>,
    }

    impl Buffers {
        fn new() -> Self {
            Self {
                front: vec![0xAAAA; DISPLAY.buffer_words()],
                back: vec![0xAAAA; DISPLAY.buffer_words()],
            }
        }

        fn front_addr(&mut self) -> usize {
            self.front.as_mut_ptr() as usize
        }

        fn back_addr(&mut self) -> usize {
            self.back.as_mut_ptr() as usize
        }

        fn board(&mut self) -> BoardConfig {
            BoardConfig {
                control_base: 0,
                back_buffer_base: self.back_addr(),
                display: DISPLAY,
            }
        }
    }

    fn visible(buf: &[u16]) -> impl Iterator<Item = u16> + '_ {
        buf.chunks(512).flat_map(|row| row[..320].iter().copied())
    }

    fn controller(bufs: &mut Buffers, regs: SimulatedRegisters) -> FrameBufferController<SimulatedRegisters> {
        let board = bufs.board();
        unsafe { FrameBufferController::init(regs, &board, BACKGROUND) }.expect("valid board")
    }

    #[test]
    fn init_clears_front_and_targets_configured_back() {
        let mut bufs = Buffers::new();
        let front = bufs.front_addr();
        let back = bufs.back_addr();
        let fbc = controller(&mut bufs, SimulatedRegisters::new(front));

        assert_eq!(fbc.current_back_buffer_address(), back);
        assert_eq!(fbc.front_buffer_address(), front);
        assert_eq!(fbc.state(), SwapState::Drawing);
        assert!(visible(&bufs.front).all(|w| w == 0));
        assert!(bufs.back.iter().all(|&w| w == 0xAAAA));
    }

    #[test]
    fn init_rejects_bad_geometry() {
        let mut bufs = Buffers::new();
        let front = bufs.front_addr();
        let mut board = bufs.board();
        board.display.bytes_per_pixel = 3;
        let res = unsafe { FrameBufferController::init(SimulatedRegisters::new(front), &board, BACKGROUND) };
        assert_eq!(res.err(), Some(ConfigError::UnsupportedPixelDepth(3)));
    }

    #[test]
    fn clear_fills_visible_back_buffer_only() {
        let mut bufs = Buffers::new();
        let front = bufs.front_addr();
        let mut fbc = controller(&mut bufs, SimulatedRegisters::new(front));

        fbc.clear(from_raw(0x1234));

        assert_eq!(visible(&bufs.back).filter(|&w| w == 0x1234).count(), 320 * 240);
        // Pitch padding past x = 319 is never touched.
        assert!(bufs.back.chunks(512).all(|row| row[320..].iter().all(|&w| w == 0xAAAA)));
        assert!(visible(&bufs.front).all(|w| w == 0));
    }

    #[test]
    fn present_twice_alternates_buffers() {
        let mut bufs = Buffers::new();
        let front = bufs.front_addr();
        let back = bufs.back_addr();
        let mut fbc = controller(&mut bufs, SimulatedRegisters::new(front));

        fbc.present();
        assert_eq!(fbc.state(), SwapState::Drawing);
        let first = fbc.current_back_buffer_address();
        assert_eq!(first, front);
        assert_eq!(fbc.front_buffer_address(), back);

        fbc.present();
        assert_eq!(fbc.state(), SwapState::Drawing);
        let second = fbc.current_back_buffer_address();
        assert_eq!(second, back);
        assert_ne!(first, second);
        assert_eq!(fbc.frames_presented(), 2);
    }

    #[test]
    fn drawn_frame_becomes_front() {
        let mut bufs = Buffers::new();
        let front = bufs.front_addr();
        let mut fbc = controller(&mut bufs, SimulatedRegisters::new(front));

        fbc.back_buffer().set_pixel(1, 1, from_raw(0x7777));
        fbc.present();
        fbc.clear(from_raw(0x0001));

        assert_eq!(bufs.back[512 + 1], 0x7777);
        assert_eq!(bufs.front[512 + 1], 0x0001);
    }

    #[test]
    fn waits_for_delayed_acknowledge() {
        let mut bufs = Buffers::new();
        let front = bufs.front_addr();
        let mut fbc = controller(&mut bufs, SimulatedRegisters::new(front).acknowledge_after(5));

        fbc.request_swap();
        assert_eq!(fbc.state(), SwapState::Presenting);
        fbc.wait_for_swap_complete();
        assert_eq!(fbc.state(), SwapState::Drawing);
        assert_eq!(fbc.registers().status_reads(), 6);
        assert_eq!(fbc.registers().swaps(), 1);
    }

    #[test]
    fn timeout_keeps_request_outstanding() {
        let mut bufs = Buffers::new();
        let front = bufs.front_addr();
        let back = bufs.back_addr();
        let mut fbc = controller(&mut bufs, SimulatedRegisters::new(front).acknowledge_after(2));

        assert_eq!(fbc.present_with_timeout(2), Err(PresentError::Timeout { polls: 2 }));
        assert_eq!(fbc.state(), SwapState::Presenting);
        assert_eq!(fbc.current_back_buffer_address(), back);

        assert_eq!(fbc.present_with_timeout(2), Ok(()));
        assert_eq!(fbc.state(), SwapState::Drawing);
        assert_eq!(fbc.current_back_buffer_address(), front);
        assert_eq!(fbc.registers().swaps(), 1);
    }

    #[test]
    fn present_finishes_a_timed_out_request() {
        let mut bufs = Buffers::new();
        let front = bufs.front_addr();
        let back = bufs.back_addr();
        let mut fbc = controller(&mut bufs, SimulatedRegisters::new(front).acknowledge_after(3));

        assert!(fbc.present_with_timeout(1).is_err());
        fbc.present();

        assert_eq!(fbc.state(), SwapState::Drawing);
        assert_eq!(fbc.registers().swaps(), 1);
        assert_eq!(fbc.front_buffer_address(), back);
        assert_eq!(fbc.current_back_buffer_address(), front);
        assert_eq!(fbc.frames_presented(), 1);
    }

    #[test]
    fn clear_leaves_buffer_alone_while_presenting() {
        let mut bufs = Buffers::new();
        let front = bufs.front_addr();
        let mut fbc = controller(&mut bufs, SimulatedRegisters::new(front).never_acknowledge());

        assert!(fbc.present_with_timeout(4).is_err());
        fbc.clear(from_raw(0x1234));

        assert_eq!(fbc.state(), SwapState::Presenting);
        assert!(bufs.back.iter().all(|&w| w == 0xAAAA));
    }

    #[test]
    fn unresponsive_display_times_out() {
        let mut bufs = Buffers::new();
        let front = bufs.front_addr();
        let mut fbc = controller(&mut bufs, SimulatedRegisters::new(front).never_acknowledge());

        let err = fbc.present_with_timeout(1000).unwrap_err();
        assert_eq!(err, PresentError::Timeout { polls: 1000 });
        assert_eq!(fbc.frames_presented(), 0);
    }
}
