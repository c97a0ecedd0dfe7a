pub mod config_io;

pub use config_io::{ConfigError, load_config, load_config_or_default, parse_config};
