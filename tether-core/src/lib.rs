//! Tether core library: config model and discovery, glob matching,
//! conditional writes, errors.
//!
//! Public API surface:
//! - [`types`]: config entries and sync result types
//! - [`error`]: [`CoreError`]
//! - [`config`]: `tether.config.json` discovery and loading
//! - [`pattern`]: glob compilation and file-tree matching
//! - [`write`]: compare-then-write with atomic rename

pub mod config;
pub mod error;
pub mod pattern;
pub mod types;
pub mod write;

pub use config::{find_config_path, load, load_at, LoadedConfig, CONFIG_FILE_NAME};
pub use error::CoreError;
pub use pattern::{matching_files, PatternSet};
pub use types::{Config, MirrorEntry, PortalEntry, SyncOptions, SyncRecord, SyncStatus};
pub use write::{file_equals, write_if_changed, WriteStatus};
