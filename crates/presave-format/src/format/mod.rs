mod command;
mod execute;
mod filters;
mod pipeline;
mod stderr;

pub use command::*;
pub use execute::*;
pub use filters::*;
pub use pipeline::*;
pub use stderr::*;
