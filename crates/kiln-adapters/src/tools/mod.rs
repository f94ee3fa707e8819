//! External tool adapters.
//!
//! Each adapter shells out synchronously and waits for the process to exit.
//! No timeout is applied.

pub mod command;
mod imagemagick;
mod inkscape;
mod sass;

pub use command::ToolCommand;
pub use imagemagick::{DEFAULT_CONVERT, ImageMagickPacker};
pub use inkscape::{DEFAULT_INKSCAPE, InkscapeRasterizer};
pub use sass::{DEFAULT_SASS, SassCli};
