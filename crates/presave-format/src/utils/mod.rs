mod logging;
mod stdin_reader;

pub use logging::*;
pub use stdin_reader::*;
