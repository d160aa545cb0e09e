use crate::color::to_rgba8;
use crate::display::DisplaySurface;
use crate::error::RenderError;
use crate::vec3::Color;

const CHANNELS: usize = 4;

/// Row-major RGBA8 pixel storage.
///
/// The buffer knows its own dimensions and never looks at the surface it is
/// presented to; `pixels.len()` is always `width * height * 4`.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl FrameBuffer {
    /// Creates an opaque black buffer.
    pub fn new(width: u32, height: u32) -> Result<FrameBuffer, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimension(format!(
                "framebuffer must be at least 1x1, got {width}x{height}"
            )));
        }

        let too_large = || {
            RenderError::InvalidDimension(format!("framebuffer of {width}x{height} is too large"))
        };

        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|count| count.checked_mul(CHANNELS))
            .ok_or_else(too_large)?;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|_| too_large())?;
        pixels.resize(len, 0);
        for pixel in pixels.chunks_exact_mut(CHANNELS) {
            pixel[3] = 255;
        }

        Ok(FrameBuffer {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    fn offset(&self, x: u32, y: u32) -> Result<usize, RenderError> {
        if x >= self.width || y >= self.height {
            return Err(RenderError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }

        Ok((y as usize * self.width as usize + x as usize) * CHANNELS)
    }

    /// Writes an opaque pixel.
    pub fn write(&mut self, x: u32, y: u32, color: Color) -> Result<(), RenderError> {
        self.write_with_alpha(x, y, color, 255)
    }

    pub fn write_with_alpha(
        &mut self,
        x: u32,
        y: u32,
        color: Color,
        alpha: u8,
    ) -> Result<(), RenderError> {
        let offset = self.offset(x, y)?;
        self.pixels[offset..offset + CHANNELS].copy_from_slice(&to_rgba8(color, alpha));

        Ok(())
    }

    pub fn read(&self, x: u32, y: u32) -> Result<[u8; 4], RenderError> {
        let offset = self.offset(x, y)?;

        let mut rgba = [0; CHANNELS];
        rgba.copy_from_slice(&self.pixels[offset..offset + CHANNELS]);
        Ok(rgba)
    }

    /// Hands the whole buffer to `surface`, which must match it in size.
    ///
    /// Presenting twice shows the same image twice.
    pub fn present<S: DisplaySurface + ?Sized>(&self, surface: &mut S) -> Result<(), RenderError> {
        let (surface_width, surface_height) = surface.dimensions();
        if (surface_width, surface_height) != (self.width, self.height) {
            return Err(RenderError::InvalidDimension(format!(
                "surface is {surface_width}x{surface_height}, framebuffer is {}x{}",
                self.width, self.height
            )));
        }

        surface.present(self.width, self.height, &self.pixels)
    }
}
