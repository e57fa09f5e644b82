//! Bootloader framebuffer writer using embedded-graphics
use bootloader_api::info::{FrameBuffer, PixelFormat};
use bootloader_api::BootInfo;
use embedded_graphics::{
    pixelcolor::{raw::RawU16, Rgb565, Rgb888},
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
};
use screensaver::DisplayConfig;
use spin::Mutex;

pub struct FramebufferWriter {
    framebuffer: &'static mut [u8],
    pub width: usize,
    pub height: usize,
    pub stride: usize,
    pub bytes_per_pixel: usize,
    pixel_format: PixelFormat,
    origin: Point,
    scale: u32,
}

impl FramebufferWriter {
    pub fn new(fb: &'static mut FrameBuffer) -> Self {
        let info = fb.info();

        Self {
            framebuffer: fb.buffer_mut(),
            width: info.width,
            height: info.height,
            stride: info.stride,
            bytes_per_pixel: info.bytes_per_pixel,
            pixel_format: info.pixel_format,
            origin: Point::zero(),
            scale: 1,
        }
    }

    /// Fill entire screen with a color
    pub fn clear(&mut self, color: Rgb888) {
        let rect = Rectangle::new(Point::zero(), self.size());
        rect.into_styled(PrimitiveStyle::with_fill(color))
            .draw(self)
            .ok();
    }

    /// Centre a `source`-sized picture at the largest integer scale.
    pub fn fit(&mut self, source: Size) {
        let scale = (self.width as u32 / source.width)
            .min(self.height as u32 / source.height)
            .max(1);
        let used = source * scale;
        self.scale = scale;
        self.origin = Point::new(
            (self.width as i32 - used.width as i32).max(0) / 2,
            (self.height as i32 - used.height as i32).max(0) / 2,
        );
    }

    /// Copy a pitched RGB565 buffer to the screen.
    pub fn scan_out(&mut self, pixels: &[u16], source: &DisplayConfig) {
        let pitch = source.row_stride_bytes / source.bytes_per_pixel;
        let block = Size::new_equal(self.scale);

        for y in 0..source.height as usize {
            let row = &pixels[y * pitch..y * pitch + source.width as usize];
            for (x, &raw) in row.iter().enumerate() {
                let color: Rgb888 = Rgb565::from(RawU16::new(raw)).into();
                let top_left = self.origin + Point::new(x as i32, y as i32) * self.scale as i32;
                self.fill_solid(&Rectangle::new(top_left, block), color).ok();
            }
        }
    }

    fn write_pixel(&mut self, offset: usize, color: Rgb888) {
        let bytes = &mut self.framebuffer[offset..offset + self.bytes_per_pixel];
        match self.pixel_format {
            PixelFormat::Rgb => {
                bytes[0] = color.r();
                bytes[1] = color.g();
                bytes[2] = color.b();
            }
            PixelFormat::Bgr => {
                bytes[0] = color.b();
                bytes[1] = color.g();
                bytes[2] = color.r();
            }
            PixelFormat::U8 => {
                let grey = (color.r() as u16 * 77 + color.g() as u16 * 150 + color.b() as u16 * 29) >> 8;
                bytes[0] = grey as u8;
            }
            _ => {
                bytes[0] = color.b();
                bytes[1] = color.g();
                bytes[2] = color.r();
            }
        }
        if self.bytes_per_pixel == 4 {
            bytes[3] = 255;
        }
    }
}

// Implement DrawTarget for embedded-graphics
impl DrawTarget for FramebufferWriter {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>
    {
        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
                continue;
            }

            let offset = (y as usize * self.stride + x as usize) * self.bytes_per_pixel;
            if offset + self.bytes_per_pixel <= self.framebuffer.len() {
                self.write_pixel(offset, color);
            }
        }
        Ok(())
    }
}

impl OriginDimensions for FramebufferWriter {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

pub static FRAMEBUFFER: Mutex<Option<FramebufferWriter>> = Mutex::new(None);

pub fn init_framebuffer(info: &'static mut BootInfo, source: &DisplayConfig) -> Result<(), &'static str> {
    let fb = info.framebuffer.as_mut().ok_or("bootloader provided no framebuffer")?;
    let mut writer = FramebufferWriter::new(fb);
    writer.clear(Rgb888::BLACK);
    writer.fit(Size::new(source.width, source.height));

    x86_64::instructions::interrupts::without_interrupts(|| {
        *FRAMEBUFFER.lock() = Some(writer);
    });
    Ok(())
}
