// Application state + the main loop.
// All mutation happens here, on one thread: drain events, paint, present, repeat.

use crate::config::Config;
use crate::error::Error;
use crate::framebuffer::FrameBuffer;
use crate::pattern::Gradient;
use crate::present::Presenter;
use crate::window::{WindowEvent, WindowSystem};
use log::{Level, debug, info, log, warn};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Stopped,
}

pub struct App {
    config: Config,
    framebuffer: FrameBuffer,
    presenter: Presenter,
    offset_x: u32, // scrolls the blue ramp
    offset_y: u32, // scrolls the green ramp
    state: LoopState,
    events: Vec<WindowEvent>, // drained into every frame, reused

    /* --- FPS readout --- */
    last_fps_time: Instant,
    frames_this_second: u32,
}

impl App {
    /// Allocate the buffer at the initial size and start in `Running`.
    pub fn new(config: Config) -> Self {
        let mut framebuffer = FrameBuffer::new();
        if let Err(e) = framebuffer.resize(config.width, config.height) {
            warn!("initial buffer: {e}");
        }
        Self {
            config,
            framebuffer,
            presenter: Presenter::new(),
            offset_x: 0,
            offset_y: 0,
            state: LoopState::Running,
            events: Vec::new(),
            last_fps_time: Instant::now(),
            frames_this_second: 0,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[cfg(test)]
    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    /// Keep stepping until the window is closed.
    pub fn run(&mut self, window: &mut impl WindowSystem) {
        info!("running at {}x{}", self.framebuffer.width(), self.framebuffer.height());
        while self.step(window) == LoopState::Running {}
        info!("stopped");
    }

    /// One frame. Does nothing once `Stopped`.
    pub fn step(&mut self, window: &mut impl WindowSystem) -> LoopState {
        if self.state == LoopState::Stopped {
            return self.state;
        }

        /* 1) Drain everything the window system has for us. */
        let mut events = std::mem::take(&mut self.events);
        events.clear();
        window.drain_events(&mut events);
        for event in events.drain(..) {
            match event {
                WindowEvent::Close => {
                    self.state = LoopState::Stopped;
                    self.framebuffer.release();
                    break;
                }
                WindowEvent::Resized { width, height } => {
                    match self.framebuffer.resize(width, height) {
                        Ok(()) => debug!("buffer resized to {width}x{height}"),
                        // e.g. minimised to 0x0: keep drawing into the old buffer
                        Err(e) => debug!("buffer resize skipped: {e}"),
                    }
                }
                WindowEvent::RepaintRequested => self.present(window),
            }
        }
        self.events = events;
        if self.state == LoopState::Stopped {
            return self.state;
        }

        /* 2) Paint the next frame, then scroll. */
        self.framebuffer.paint(&Gradient, self.offset_x, self.offset_y);
        self.offset_x = self.offset_x.wrapping_add(self.config.scroll_step_x);
        self.offset_y = self.offset_y.wrapping_add(self.config.scroll_step_y);

        /* 3) Present at whatever size the window is right now. */
        self.present(window);
        self.tick_fps();

        self.state
    }

    fn present(&mut self, window: &mut impl WindowSystem) {
        let (width, height) = window.client_size();
        if let Err(e) = self.presenter.present(window, width, height, &self.framebuffer) {
            log!(skip_level(&e), "frame skipped: {e}");
        }
    }

    fn tick_fps(&mut self) {
        self.frames_this_second += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_time);
        if elapsed >= Duration::from_secs(1) {
            let fps = self.frames_this_second as f32 / elapsed.as_secs_f32();
            info!("FPS: {fps:.1}");
            self.frames_this_second = 0;
            self.last_fps_time = now;
        }
    }
}

/// A 0x0 target (minimised window) repeats every frame, so it stays quiet.
fn skip_level(e: &Error) -> Level {
    match e {
        Error::InvalidDimension { .. } => Level::Debug,
        _ => Level::Warn,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Scripted window: one batch of events per drain, records every blit.
    struct FakeWindow {
        size: (usize, usize),
        script: VecDeque<Vec<WindowEvent>>,
        blits: Vec<(usize, usize, u32)>, // (width, height, first pixel)
        fail_blits: bool,
    }

    impl FakeWindow {
        fn new(width: usize, height: usize) -> Self {
            Self { size: (width, height), script: VecDeque::new(), blits: Vec::new(), fail_blits: false }
        }

        fn then(mut self, events: Vec<WindowEvent>) -> Self {
            self.script.push_back(events);
            self
        }
    }

    impl WindowSystem for FakeWindow {
        fn drain_events(&mut self, out: &mut Vec<WindowEvent>) {
            let batch = self.script.pop_front().unwrap_or_default();
            for event in &batch {
                if let WindowEvent::Resized { width, height } = *event {
                    self.size = (width, height);
                }
            }
            out.extend(batch);
        }

        fn client_size(&self) -> (usize, usize) {
            self.size
        }

        fn blit(&mut self, pixels: &[u32], width: usize, height: usize) -> Result<(), Error> {
            if self.fail_blits {
                return Err(Error::WindowUpdate("device lost".into()));
            }
            assert_eq!(pixels.len(), width * height);
            self.blits.push((width, height, pixels[0]));
            Ok(())
        }
    }

    #[test]
    fn starts_running_at_default_size() {
        let app = App::new(Config::default());
        assert_eq!(app.state(), LoopState::Running);
        assert_eq!((app.framebuffer().width(), app.framebuffer().height()), (1280, 720));
        assert_eq!(app.framebuffer().bytes().len(), 1280 * 720 * 4);
    }

    #[test]
    fn each_step_paints_presents_and_scrolls() {
        let mut app = App::new(Config::default());
        let mut window = FakeWindow::new(1280, 720);

        assert_eq!(app.step(&mut window), LoopState::Running);
        assert_eq!(app.step(&mut window), LoopState::Running);

        // frame 0 at offsets (0,0), frame 1 at (1,2)
        assert_eq!(window.blits, vec![(1280, 720, 0x0000), (1280, 720, 0x0201)]);
    }

    #[test]
    fn close_stops_without_further_frames() {
        let mut app = App::new(Config::default());
        let mut window = FakeWindow::new(1280, 720)
            .then(vec![])
            .then(vec![WindowEvent::Close]);

        assert_eq!(app.step(&mut window), LoopState::Running);
        assert_eq!(app.step(&mut window), LoopState::Stopped);
        assert_eq!(app.step(&mut window), LoopState::Stopped);

        assert_eq!(window.blits.len(), 1);
        assert!(!app.framebuffer().is_allocated());
    }

    #[test]
    fn events_after_close_in_same_batch_are_ignored() {
        let mut app = App::new(Config::default());
        let mut window = FakeWindow::new(1280, 720)
            .then(vec![WindowEvent::Close, WindowEvent::RepaintRequested]);

        assert_eq!(app.step(&mut window), LoopState::Stopped);
        assert!(window.blits.is_empty());
    }

    #[test]
    fn resize_mid_loop_targets_new_size() {
        let mut app = App::new(Config::default());
        let mut window = FakeWindow::new(1280, 720)
            .then(vec![])
            .then(vec![WindowEvent::Resized { width: 640, height: 480 }]);

        app.step(&mut window);
        app.step(&mut window);

        assert_eq!((app.framebuffer().width(), app.framebuffer().height()), (640, 480));
        assert_eq!(app.framebuffer().bytes().len(), 640 * 480 * 4);
        assert_eq!((window.blits[0].0, window.blits[0].1), (1280, 720));
        assert_eq!((window.blits[1].0, window.blits[1].1), (640, 480));
    }

    #[test]
    fn minimised_window_keeps_old_buffer_and_skips_frame() {
        let mut app = App::new(Config::default());
        let mut window = FakeWindow::new(1280, 720)
            .then(vec![WindowEvent::Resized { width: 0, height: 0 }]);

        assert_eq!(app.step(&mut window), LoopState::Running);
        assert_eq!(app.framebuffer().width(), 1280);
        assert!(window.blits.is_empty());
    }

    #[test]
    fn minimised_frames_log_quietly_but_blit_failures_warn() {
        assert_eq!(skip_level(&Error::InvalidDimension { width: 0, height: 0 }), Level::Debug);
        assert_eq!(skip_level(&Error::WindowUpdate("device lost".into())), Level::Warn);
    }

    #[test]
    fn repaint_request_presents_current_contents() {
        let mut app = App::new(Config::default());
        let mut window = FakeWindow::new(1280, 720)
            .then(vec![])
            .then(vec![WindowEvent::RepaintRequested]);

        app.step(&mut window);
        app.step(&mut window);

        // repaint shows frame 0 again, then frame 1 is drawn
        let firsts: Vec<u32> = window.blits.iter().map(|b| b.2).collect();
        assert_eq!(firsts, vec![0x0000, 0x0000, 0x0201]);
    }

    #[test]
    fn blit_failure_does_not_stop_the_loop() {
        let mut app = App::new(Config::default());
        let mut window = FakeWindow::new(1280, 720);
        window.fail_blits = true;

        assert_eq!(app.step(&mut window), LoopState::Running);
        assert_eq!(app.step(&mut window), LoopState::Running);
    }

    #[test]
    fn run_returns_once_closed() {
        let mut app = App::new(Config::default());
        let mut window = FakeWindow::new(64, 64)
            .then(vec![])
            .then(vec![])
            .then(vec![WindowEvent::Close]);

        app.run(&mut window);
        assert_eq!(app.state(), LoopState::Stopped);
        assert_eq!(window.blits.len(), 2);
    }
}
