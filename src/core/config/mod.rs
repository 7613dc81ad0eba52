pub mod data;
pub mod io;

pub use data::{Config, ConfigField, DEFAULT_API_VERSION};
pub use io::{ConfigError, ConfigStore};
