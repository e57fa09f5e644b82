//! Register block for running the engine without display hardware.
//!
//! Swap requests are acknowledged either immediately or after a fixed
//! number of status polls, and the two buffer addresses trade places on
//! acknowledgement just as the controller does at vertical sync. With
//! `never_acknowledge` the block models hardware that has stopped
//! responding.

use crate::registers::{PixelBufferRegisters, Register, STATUS_SWAP_PENDING, SWAP_REQUEST};
use core::cell::Cell;

#[derive(Debug)]
pub struct SimulatedRegisters {
    front: Cell<usize>,
    back: Cell<usize>,
    pending: Cell<bool>,
    /// Status polls answered "pending" before a request completes.
    ack_after: Option<u32>,
    polls_left: Cell<u32>,
    status_reads: Cell<u64>,
    swaps: Cell<u64>,
}

impl SimulatedRegisters {
    /// Both registers start on `front`, as a controller does after reset.
    pub fn new(front: usize) -> Self {
        Self::with_buffers(front, front)
    }

    pub fn with_buffers(front: usize, back: usize) -> Self {
        Self {
            front: Cell::new(front),
            back: Cell::new(back),
            pending: Cell::new(false),
            ack_after: Some(0),
            polls_left: Cell::new(0),
            status_reads: Cell::new(0),
            swaps: Cell::new(0),
        }
    }

    pub fn acknowledge_after(mut self, polls: u32) -> Self {
        self.ack_after = Some(polls);
        self
    }

    pub fn never_acknowledge(mut self) -> Self {
        self.ack_after = None;
        self
    }

    pub fn swap_pending(&self) -> bool {
        self.pending.get()
    }

    pub fn status_reads(&self) -> u64 {
        self.status_reads.get()
    }

    pub fn swaps(&self) -> u64 {
        self.swaps.get()
    }

    pub fn front(&self) -> usize {
        self.front.get()
    }

    fn complete_swap(&self) {
        let front = self.front.get();
        self.front.set(self.back.get());
        self.back.set(front);
        self.pending.set(false);
        self.swaps.set(self.swaps.get() + 1);
    }
}

impl PixelBufferRegisters for SimulatedRegisters {
    fn read(&self, reg: Register) -> usize {
        match reg {
            Register::Buffer => self.front.get(),
            Register::BackBuffer => self.back.get(),
            Register::Status => {
                self.status_reads.set(self.status_reads.get() + 1);
                if self.pending.get() {
                    match self.ack_after {
                        Some(_) if self.polls_left.get() == 0 => self.complete_swap(),
                        Some(_) => self.polls_left.set(self.polls_left.get() - 1),
                        None => {}
                    }
                }
                if self.pending.get() { STATUS_SWAP_PENDING } else { 0 }
            }
        }
    }

    fn write(&mut self, reg: Register, value: usize) {
        match reg {
            Register::Buffer if value == SWAP_REQUEST => {
                self.pending.set(true);
                self.polls_left.set(self.ack_after.unwrap_or(0));
            }
            Register::Buffer => {}
            Register::BackBuffer => self.back.set(value),
            Register::Status => {}
        }
    }
}
