//! Configuration module for the coub-downloader.
//!
//! This module handles:
//! - Loading configuration from TOML files
//! - Folder name sanitize modes
//! - Configuration validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{AccountConfig, Config, OptionsConfig};
pub use modes::SanitizeMode;
pub use validation::validate_config;
