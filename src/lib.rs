pub mod changelog;
pub mod config;
pub mod diff;
pub mod error;
pub mod forge;
pub mod git;
pub mod notes;
pub mod release;
pub mod ui;
pub mod version;

pub use error::{ReleaseError, Result};
