// Copies the offscreen buffer onto the window, stretched to whatever size the window is now.
// Visual: the gradient always fills the whole client area, even mid-resize.

use crate::error::Error;
use crate::framebuffer::{BYTES_PER_PIXEL, FrameBuffer};
use crate::window::WindowSystem;

pub struct Presenter {
    surface: Vec<u32>, // target-sized scratch, reused every frame
}

impl Presenter {
    pub fn new() -> Self {
        Self { surface: Vec::new() }
    }

    /// Nearest-neighbour stretch `fb` to `target_width x target_height`, then blit.
    /// Errors are per-frame: the caller skips this frame and carries on.
    pub fn present(
        &mut self,
        target: &mut impl WindowSystem,
        target_width: usize,
        target_height: usize,
        fb: &FrameBuffer,
    ) -> Result<(), Error> {
        if target_width == 0 || target_height == 0 {
            return Err(Error::InvalidDimension { width: target_width, height: target_height });
        }
        if !fb.is_allocated() {
            return Err(Error::InvalidDimension { width: fb.width(), height: fb.height() });
        }

        stretch(fb, &mut self.surface, target_width, target_height);
        target.blit(&self.surface, target_width, target_height)
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Fill `out` with `dst_w * dst_h` pixels sampled from `fb`.
/// Destination (dx,dy) reads source (dx * src_w / dst_w, dy * src_h / dst_h).
fn stretch(fb: &FrameBuffer, out: &mut Vec<u32>, dst_w: usize, dst_h: usize) {
    let (src_w, src_h) = (fb.width(), fb.height());
    let bytes = fb.bytes();

    // Only reallocates when the window size changed.
    out.resize(dst_w * dst_h, 0);

    for (dy, dst_row) in out.chunks_exact_mut(dst_w).enumerate() {
        let sy = dy * src_h / dst_h;
        let src_row = &bytes[sy * fb.stride()..][..src_w * BYTES_PER_PIXEL];

        if src_w == dst_w {
            // Same width: straight row copy.
            for (px, b) in dst_row.iter_mut().zip(src_row.chunks_exact(BYTES_PER_PIXEL)) {
                *px = u32::from_le_bytes([b[0], b[1], b[2], b[3]]);
            }
            continue;
        }

        for (dx, px) in dst_row.iter_mut().enumerate() {
            let at = (dx * src_w / dst_w) * BYTES_PER_PIXEL;
            let b = &src_row[at..at + BYTES_PER_PIXEL];
            *px = u32::from_le_bytes([b[0], b[1], b[2], b[3]]);
        }
    }
}
