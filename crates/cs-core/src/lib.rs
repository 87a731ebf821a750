//! Core types shared across the CondStat workspace.

pub mod error;
pub mod tokens;

pub use error::{Error, Result};
pub use tokens::Tokens;

/// Workspace version reported by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
