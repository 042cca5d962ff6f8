// The OS window and the seam the main loop talks to.
// Visual effects provided here:
// 1) A resizable window that shows whatever surface we blit into it.
// 2) Close / resize / re-activation reported as plain events, drained once per frame.

use crate::error::Error;
use log::debug;
use minifb::{ScaleMode, WindowOptions};

/// Something the window system tells the loop about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Close,
    Resized { width: usize, height: usize },
    RepaintRequested,
}

/// Everything the loop needs from the windowing layer. The real one is
/// [`Window`]; tests script a fake.
pub trait WindowSystem {
    /// Append every pending event to `out` without blocking.
    fn drain_events(&mut self, out: &mut Vec<WindowEvent>);

    /// Current drawable area in pixels.
    fn client_size(&self) -> (usize, usize);

    /// Show `pixels` (0x00RRGGBB, `width * height` of them) in the window.
    fn blit(&mut self, pixels: &[u32], width: usize, height: usize) -> Result<(), Error>;
}

pub struct Window {
    window: minifb::Window, // the on-screen window you see
    last_size: (usize, usize),
    was_active: bool,
    close_reported: bool,
    pump: QueuePump,
}

/// Tracks whether the OS queue was already pumped since the last drain.
/// minifb pumps inside `update_with_buffer`, and `update` must not be mixed
/// with it on frames that blit.
#[derive(Debug, Default)]
struct QueuePump {
    blitted: bool,
}

impl QueuePump {
    /// True when the drain has to call `update` itself.
    fn needs_update(&mut self) -> bool {
        !std::mem::take(&mut self.blitted)
    }

    fn mark_blitted(&mut self) {
        self.blitted = true;
    }
}

impl Window {
    /// Create a resizable window.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let options = WindowOptions {
            resize: true,
            scale_mode: ScaleMode::Stretch,
            ..WindowOptions::default()
        };
        let mut window = minifb::Window::new(title, width, height, options)
            .map_err(|e| Error::WindowCreate(e.to_string()))?;
        // 0 = no waiting inside update/update_with_buffer; the loop is unpaced.
        window.set_target_fps(0);
        let last_size = window.get_size();
        Ok(Self {
            window,
            last_size,
            was_active: true,
            close_reported: false,
            pump: QueuePump::default(),
        })
    }
}

impl WindowSystem for Window {
    fn drain_events(&mut self, out: &mut Vec<WindowEvent>) {
        // Last frame's blit already pumped the OS queue; only pump here if it didn't.
        if self.pump.needs_update() {
            self.window.update();
        }

        if !self.window.is_open() {
            if !self.close_reported {
                self.close_reported = true;
                debug!("window closed");
                out.push(WindowEvent::Close);
            }
            return;
        }

        let size = self.window.get_size();
        if size != self.last_size {
            debug!("window resized {}x{} -> {}x{}", self.last_size.0, self.last_size.1, size.0, size.1);
            self.last_size = size;
            out.push(WindowEvent::Resized { width: size.0, height: size.1 });
        }

        let active = self.window.is_active();
        if active != self.was_active {
            debug!("window {}", if active { "activated" } else { "deactivated" });
            self.was_active = active;
            if active {
                out.push(WindowEvent::RepaintRequested);
            }
        }
    }

    fn client_size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    /// Push the pixels for this frame to the screen.
    /// Visual: the window immediately displays the new image.
    fn blit(&mut self, pixels: &[u32], width: usize, height: usize) -> Result<(), Error> {
        self.window
            .update_with_buffer(pixels, width, height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        self.pump.mark_blitted();
        Ok(())
    }
}
