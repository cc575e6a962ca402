//! Coub Downloader - export every coub you liked on coub.com
//!
//! This library walks the liked coubs timeline page by page, picks the best
//! audio and video file for each coub and writes them to a folder per coub.
//!
//! # Features
//!
//! - Paginated traversal of the likes timeline
//! - Quality fallback for video (`higher` -> `high`) and audio (`high` -> `med`)
//! - Filesystem-safe folder names with collision avoidance
//! - Per-item failure isolation
//! - Optional parallel page fetching and item saving
//!
//! # Example
//!
//! ```no_run
//! use coub_downloader::{export_liked, CoubApi, ExportOptions};
//! use coub_downloader::config::Config;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::default();
//!     config.account.remember_token = "my-token".into();
//!
//!     let api = CoubApi::new(&config.account.remember_token, config.request_timeout())?;
//!     let report = export_liked(
//!         &api,
//!         &ExportOptions::from_config(&config),
//!         &CancellationToken::new(),
//!     )
//!     .await?;
//!     println!("saved {} coubs", report.stats.items_exported);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;

#[cfg(test)]
mod testing;

// Re-exports for convenience
pub use api::{CoubApi, LikesSource};
pub use config::{Config, SanitizeMode};
pub use download::{export_liked, ExportOptions, ExportPhase, ExportReport, ExportStats};
pub use error::{Error, Result};
pub use media::{Coub, AUDIO_FILENAME, VIDEO_FILENAME};
