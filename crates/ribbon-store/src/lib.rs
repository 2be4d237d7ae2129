//! SQLite persistence for the memory ribbon: a snapshot store for the
//! date-sorted entry set, implementing `ribbon_core::Persistence`.

pub mod error;
pub mod schema;
pub mod store;

use std::env;
use std::path::PathBuf;

pub use error::{Result, StoreError};
pub use store::Store;

/// Default base directory for ribbon storage.
pub fn default_base_dir() -> PathBuf {
    env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(".memory-ribbon")
}
