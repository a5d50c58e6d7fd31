//! saycmd - Command-line speech reader
//!
//! A command-line text-to-speech reader for *nix systems (macOS, Linux,
//! FreeBSD). Compiles an instruction list into structured speech prompts
//! and reads them aloud.

pub mod cli;
pub mod compile;
pub mod config;
pub mod content;
pub mod error;
pub mod instruction;
pub mod prompt;
pub mod speech;
pub mod template;

pub use error::{Result, SaycmdError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "saycmd";
