//! Filesystem module.
//!
//! Provides:
//! - Title sanitizing and folder naming
//! - Collision-free item folder creation

pub mod naming;
pub mod paths;

pub use naming::{fallback_dir_name, primary_dir_name, sanitize_title, validate_path_component};
pub use paths::{ensure_dir, reserve_item_dir};
