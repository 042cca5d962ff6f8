// The offscreen buffer we paint into every frame.
//
// Layout: 4 bytes per pixel, little-endian 0x00RRGGBB (byte 0 = blue,
// byte 1 = green, byte 2 = red, byte 3 = padding). Rows are stored
// top-down: row 0 is the top of the image in memory *and* on screen.

use crate::error::Error;
use crate::pattern::Pattern;

pub const BYTES_PER_PIXEL: usize = 4;

#[derive(Debug, Default)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    stride: usize,   // bytes per row = width * BYTES_PER_PIXEL (no padding)
    memory: Vec<u8>, // empty until the first resize, else exactly stride * height
}

impl FrameBuffer {
    /// An empty buffer. Nothing is allocated until `resize`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the old pixels and commit a fresh zeroed region for `width x height`.
    /// On error the buffer is left exactly as it was.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let (stride, size) = width
            .checked_mul(BYTES_PER_PIXEL)
            .and_then(|stride| stride.checked_mul(height).map(|size| (stride, size)))
            .ok_or(Error::InvalidDimension { width, height })?;

        // Release first so the old and new regions never coexist.
        self.memory = Vec::new();
        self.memory = vec![0u8; size];
        self.width = width;
        self.height = height;
        self.stride = stride;
        Ok(())
    }

    /// Write one pixel per (x,y), row by row, top to bottom.
    /// Visual: the whole buffer is replaced by the pattern at these offsets.
    pub fn paint(&mut self, pattern: &impl Pattern, offset_x: u32, offset_y: u32) {
        if self.stride == 0 {
            return;
        }
        for (y, row) in self.memory.chunks_exact_mut(self.stride).enumerate() {
            for (x, px) in row.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
                let value = pattern.shade(x as u32, y as u32, offset_x, offset_y);
                px.copy_from_slice(&value.to_le_bytes());
            }
        }
    }

    /// Give the memory back; the buffer is empty again afterwards.
    pub fn release(&mut self) {
        *self = Self::default();
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn bytes(&self) -> &[u8] {
        &self.memory
    }

    pub fn is_allocated(&self) -> bool {
        !self.memory.is_empty()
    }

    /// Read back one pixel as 0x00RRGGBB, or None if (x,y) is outside the buffer.
    #[cfg(test)]
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let at = y * self.stride + x * BYTES_PER_PIXEL;
        let b = self.memory.get(at..at + BYTES_PER_PIXEL)?;
        Some(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }
}
