// A tiny error type so we don't rely on anyhow/thiserror.
// Every variant states *where* things went wrong.
use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    WindowCreate(String), // Registering/creating the OS window failed
    WindowUpdate(String), // Blitting the surface to the window failed
    InvalidDimension { width: usize, height: usize }, // Zero-sized or too-large buffer/target
}

impl Display for Error {
    // This decides how the error is printed to your console.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowCreate(s) => write!(f, "Window create error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::InvalidDimension { width, height } => {
                write!(f, "Invalid dimension: {width}x{height}")
            }
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failing_step() {
        let e = Error::InvalidDimension { width: 0, height: 720 };
        assert_eq!(e.to_string(), "Invalid dimension: 0x720");
        let e = Error::WindowCreate("no display".into());
        assert_eq!(e.to_string(), "Window create error: no display");
    }
}
