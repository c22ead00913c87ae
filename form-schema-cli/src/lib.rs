//! # form-schema-cli
//!
//! CLI library for compiling TypeScript declarations into JSON form schemas.
//!
//! ## Architecture
//!
//! - [`config`] - Configuration management and TOML parsing
//! - [`compiler`] - Schema compilation and up-to-date checks
//! - [`writer`] - File output and dry-run support
//! - [`watcher`] - File system watching for watch mode
//! - [`error`] - Error types and handling

pub mod compiler;
pub mod config;
pub mod error;
pub mod watcher;
pub mod writer;

pub use compiler::{CompiledOutput, SchemaCompiler};
pub use config::{CliArgs, Config, ConfigManager};
pub use error::{CliError, CliResult};
pub use watcher::FileWatcher;
pub use writer::FileWriter;
