//! Media module for coub representation and resolution.

pub mod item;
pub mod resolver;

pub use item::{AssetKind, Coub, AUDIO_FILENAME, VIDEO_FILENAME, VIEW_URL_PREFIX};
pub use resolver::{resolve, resolve_record};
