//! 16-bit colours and the fixed shape palette.
//!
//! Colours are opaque bit patterns to the rasterizer: they are compared for
//! identity and written to memory, never blended.

use embedded_graphics_core::pixelcolor::{IntoStorage, Rgb565};

pub type Color = Rgb565;

/// Build a colour from a raw value, keeping only the low 16 bits.
///
/// Palette literals wider than the display depth are accepted and
/// truncated, exactly as a 16-bit store would.
pub const fn from_raw(raw: u32) -> Color {
    let raw = raw & 0xFFFF;
    Rgb565::new(
        ((raw >> 11) & 0x1F) as u8,
        ((raw >> 5) & 0x3F) as u8,
        (raw & 0x1F) as u8,
    )
}

/// Raw 16-bit pattern that ends up in the framebuffer.
#[inline]
pub fn to_raw(color: Color) -> u16 {
    color.into_storage()
}

pub const BACKGROUND: Color = from_raw(0x0000);
pub const CONNECTOR: Color = from_raw(0xFF_FFFF);
pub const BLUE: Color = from_raw(0x001F);

/// Shape colours. Only the first [`SELECTABLE`] entries are handed out.
pub const PALETTE: [Color; 10] = [
    from_raw(0x0000FB),
    from_raw(0x00C938),
    from_raw(0x00C9CAB),
    from_raw(0xFBC9CA),
    from_raw(0xD006CA),
    from_raw(0xD00609),
    from_raw(0x5CAFFF),
    from_raw(0x5CE444),
    from_raw(0xFFE444),
    from_raw(0xFFFFFF),
];

pub const SELECTABLE: usize = 9;
