mod format;
mod io;
pub mod matrix;

pub use format::format_duration;
pub use matrix::Matrix2;

pub use io::{Args, enumerate_input_files};
pub use clap::Parser;
