//! Display geometry and board addresses.

use core::fmt;

use crate::scene::SHAPE_SIZE;

/// Geometry of one pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    /// Bytes between the start of two rows. This is the hardware pitch,
    /// not `width * bytes_per_pixel`.
    pub row_stride_bytes: usize,
    pub bytes_per_pixel: usize,
}

impl DisplayConfig {
    /// 320x240 visible pixels inside a 512-pixel (1024 byte) pitch.
    pub const VGA_320X240: DisplayConfig = DisplayConfig {
        width: 320,
        height: 240,
        row_stride_bytes: 1024,
        bytes_per_pixel: 2,
    };

    /// Bytes a single buffer spans, from its base to the end of the last
    /// visible row's pitch.
    pub const fn buffer_len(&self) -> usize {
        self.row_stride_bytes * self.height as usize
    }

    /// Pixel capacity of one buffer when addressed as 16-bit words.
    pub const fn buffer_words(&self) -> usize {
        self.buffer_len() / 2
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyDisplay);
        }
        if self.bytes_per_pixel != 2 {
            return Err(ConfigError::UnsupportedPixelDepth(self.bytes_per_pixel));
        }
        let needed = self.width as usize * self.bytes_per_pixel;
        if self.row_stride_bytes < needed {
            return Err(ConfigError::StrideTooSmall {
                stride: self.row_stride_bytes,
                needed,
            });
        }
        if SHAPE_SIZE.width > self.width || SHAPE_SIZE.height > self.height {
            return Err(ConfigError::ShapeLargerThanDisplay);
        }
        Ok(())
    }
}

/// Everything the engine needs to know about the board it runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    /// Base of the pixel buffer controller's register block.
    pub control_base: usize,
    /// Buffer programmed into the back-buffer register at startup.
    pub back_buffer_base: usize,
    pub display: DisplayConfig,
}

impl BoardConfig {
    /// DE1-SoC: controller at 0xFF20_3020, back buffer in SDRAM.
    pub const DE1_SOC: BoardConfig = BoardConfig {
        control_base: 0xFF20_3020,
        back_buffer_base: 0xC000_0000,
        display: DisplayConfig::VGA_320X240,
    };

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.display.validate()?;
        let word = core::mem::size_of::<u32>();
        if self.control_base % word != 0 {
            return Err(ConfigError::MisalignedAddress(self.control_base));
        }
        if self.back_buffer_base % self.display.bytes_per_pixel != 0 {
            return Err(ConfigError::MisalignedAddress(self.back_buffer_base));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    EmptyDisplay,
    UnsupportedPixelDepth(usize),
    StrideTooSmall { stride: usize, needed: usize },
    ShapeLargerThanDisplay,
    MisalignedAddress(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyDisplay => write!(f, "display has no pixels"),
            ConfigError::UnsupportedPixelDepth(bpp) => {
                write!(f, "unsupported pixel depth: {} bytes per pixel", bpp)
            }
            ConfigError::StrideTooSmall { stride, needed } => {
                write!(f, "row stride {} is smaller than a visible row ({} bytes)", stride, needed)
            }
            ConfigError::ShapeLargerThanDisplay => write!(f, "shape does not fit on the display"),
            ConfigError::MisalignedAddress(addr) => write!(f, "misaligned address {:#x}", addr),
        }
    }
}
