//! RGB output buffer for the virtual camera.

use std::path::Path;

use crate::error::ScreenError;

/// One packed output pixel.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl From<[u8; 3]> for Rgb8 {
    fn from(c: [u8; 3]) -> Self {
        Self {
            r: c[0],
            g: c[1],
            b: c[2],
        }
    }
}

/// Row-major width x height x RGB pixel buffer.
///
/// This is the whole interface the host rasterizer consumes: it uploads
/// [`Framebuffer::as_bytes`] as the screen quad's texture.
#[derive(Debug, Clone, Default)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb8>,
}

impl Framebuffer {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb8::default(); (width * height) as usize],
        }
    }

    /// Reallocate when the output resolution changed; otherwise keep the
    /// existing storage.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.width != width || self.height != height {
            *self = Self::new(width, height);
        }
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    pub fn put(&mut self, x: u32, y: u32, pixel: Rgb8) {
        let index = (y * self.width + x) as usize;
        self.pixels[index] = pixel;
    }

    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Rgb8 {
        self.pixels[(y * self.width + x) as usize]
    }

    pub fn fill(&mut self, pixel: Rgb8) {
        self.pixels.fill(pixel);
    }

    /// Raw bytes in row-major RGB order.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Encode the buffer as a PNG file.
    ///
    /// # Errors
    /// Returns [`ScreenError`] when the file cannot be written or encoded.
    pub fn save_png(&self, path: &Path) -> Result<(), ScreenError> {
        let img = image::RgbImage::from_raw(self.width, self.height, self.as_bytes().to_vec())
            .expect("pixel storage always matches dimensions");
        img.save(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_layout_is_packed_rgb() {
        let mut fb = Framebuffer::new(2, 1);
        fb.put(0, 0, Rgb8::from([10, 20, 30]));
        fb.put(1, 0, Rgb8::from([40, 50, 60]));
        assert_eq!(fb.as_bytes(), &[10, 20, 30, 40, 50, 60]);
    }

    #[test]
    fn resize_only_reallocates_on_change() {
        let mut fb = Framebuffer::new(4, 4);
        fb.put(0, 0, Rgb8::from([1, 2, 3]));
        fb.resize(4, 4);
        assert_eq!(fb.get(0, 0), Rgb8::from([1, 2, 3]));
        fb.resize(2, 2);
        assert_eq!(fb.get(0, 0), Rgb8::default());
        assert_eq!(fb.as_bytes().len(), 2 * 2 * 3);
    }
}
