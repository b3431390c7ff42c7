mod deserialize_config;
mod load_config;
mod resolve_config_path;
mod resolve_steps;
mod types;

pub use deserialize_config::*;
pub use load_config::*;
pub use resolve_config_path::*;
pub use resolve_steps::*;
pub use types::*;
