// What you SEE:
// • A 1280x720 window filled with a blue/green gradient that scrolls diagonally.
// • Resize the window: the buffer is reallocated to match and keeps scrolling.
// • Close the window to quit.

mod app;
mod config;
mod error;
mod framebuffer;
mod pattern;
mod present;
mod window;

use app::App;
use config::Config;
use log::error;
use window::Window;

fn main() {
    /* --- Logging ---
       RUST_LOG=debug shows resize/close/activation messages. */
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::default();

    /* --- Window setup ---
       Visual: window opens; if it can't, we just log and exit normally. */
    let mut window = match Window::new(config.title, config.width, config.height) {
        Ok(window) => window,
        Err(e) => {
            error!("{e}");
            return;
        }
    };

    /* ------------------------------ Main loop ------------------------------ */
    let mut app = App::new(config);
    app.run(&mut window);
}
