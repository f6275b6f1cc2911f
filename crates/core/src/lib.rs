//! Surf's Up Core Library
//!
//! Shared utilities for the climate API:
//! - Configuration loading (XDG-compliant)
//! - File system checks
//! - Common constants

mod config;
pub mod fs;

pub use config::{find_config_file, load_config, ConfigSource};
pub use fs::is_file;

/// Application name used for XDG paths
pub const APP_NAME: &str = "surfs-up";

/// Default API port
pub const DEFAULT_API_PORT: u16 = 5000;

/// Default location of the climate database, relative to the working directory
pub const DEFAULT_DATABASE_PATH: &str = "./Resources/hawaii.sqlite";
