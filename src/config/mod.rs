//! Configuration: TOML file plus command line

pub mod cli;
pub mod settings;

pub use cli::{Args, Command};
pub use settings::AppConfig;
