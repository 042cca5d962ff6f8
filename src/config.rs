// Fixed startup values. There is no config file and no CLI; change these and rebuild.

pub struct Config {
    pub title: &'static str,
    pub width: usize,      // initial window + buffer width (pixels)
    pub height: usize,     // initial window + buffer height (pixels)
    pub scroll_step_x: u32, // added to the blue offset after every frame
    pub scroll_step_y: u32, // added to the green offset after every frame
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "backbuffer",
            width: 1280,
            height: 720,
            scroll_step_x: 1,
            scroll_step_y: 2,
        }
    }
}
