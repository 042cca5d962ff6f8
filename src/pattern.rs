// Pixel generators the frame buffer can be painted with.
// Visual: whatever `shade` returns for (x,y) is the color you see at that pixel.

/// Anything that can produce one 0x00RRGGBB pixel from its coordinate and
/// the current scroll offsets.
pub trait Pattern {
    fn shade(&self, x: u32, y: u32, offset_x: u32, offset_y: u32) -> u32;
}

// Plain closures work as patterns, so a future renderer can be plugged in as-is.
impl<F> Pattern for F
where
    F: Fn(u32, u32, u32, u32) -> u32,
{
    #[inline]
    fn shade(&self, x: u32, y: u32, offset_x: u32, offset_y: u32) -> u32 {
        self(x, y, offset_x, offset_y)
    }
}

/// Blue ramps left→right, green ramps top→bottom, red stays 0.
/// Visual: a diagonally scrolling blue/green gradient as the offsets grow.
#[derive(Clone, Copy, Debug, Default)]
pub struct Gradient;

impl Pattern for Gradient {
    #[inline]
    fn shade(&self, x: u32, y: u32, offset_x: u32, offset_y: u32) -> u32 {
        let blue = x.wrapping_add(offset_x) as u8 as u32;
        let green = y.wrapping_add(offset_y) as u8 as u32;
        (green << 8) | blue
    }
}
