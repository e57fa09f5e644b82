//! Pixel Sink: every pixel the engine draws goes through here.

use core::marker::PhantomData;
use core::ptr::write_volatile;

use crate::color::{self, Color};
use crate::config::DisplayConfig;

pub trait PixelSink {
    /// Write one pixel. Callers keep `0 <= x < width` and `0 <= y < height`;
    /// nothing is clipped.
    fn set_pixel(&mut self, x: i32, y: i32, color: Color);
}

impl<S: PixelSink + ?Sized> PixelSink for &mut S {
    #[inline]
    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        (**self).set_pixel(x, y, color)
    }
}

/// Byte offset of (x, y) from a buffer's base address.
#[inline(always)]
pub fn pixel_offset(config: &DisplayConfig, x: i32, y: i32) -> usize {
    y as usize * config.row_stride_bytes + x as usize * config.bytes_per_pixel
}

/// The buffer currently being drawn, as resolved by the frame buffer
/// controller. The borrow ties it to the controller, so a `BackBuffer`
/// cannot survive a swap.
pub struct BackBuffer<'a> {
    base: usize,
    config: DisplayConfig,
    _owner: PhantomData<&'a mut ()>,
}

impl<'a> BackBuffer<'a> {
    /// # Safety
    /// `base` must point to at least `config.buffer_len()` writable bytes,
    /// 2-byte aligned, that nobody reads or writes for `'a`.
    pub(crate) unsafe fn new(base: usize, config: DisplayConfig) -> Self {
        Self {
            base,
            config,
            _owner: PhantomData,
        }
    }

    pub fn base(&self) -> usize {
        self.base
    }

    pub fn width(&self) -> u32 {
        self.config.width
    }

    pub fn height(&self) -> u32 {
        self.config.height
    }
}

impl PixelSink for BackBuffer<'_> {
    #[inline(always)]
    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        debug_assert!(
            x >= 0 && y >= 0 && (x as u32) < self.config.width && (y as u32) < self.config.height,
            "pixel ({}, {}) outside {}x{}",
            x,
            y,
            self.config.width,
            self.config.height
        );
        let addr = self.base + pixel_offset(&self.config, x, y);
        unsafe { write_volatile(addr as *mut u16, color::to_raw(color)) }
    }
}
