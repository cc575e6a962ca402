//! Coub API module.
//!
//! This module provides:
//! - HTTP client for the liked coubs timeline
//! - Session cookie handling
//! - API response types

pub mod auth;
pub mod client;
pub mod source;
pub mod types;

pub use client::{CoubApi, API_BASE};
pub use source::LikesSource;
pub use types::*;
