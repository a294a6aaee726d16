// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing configuration source implementations.
//!
//! Each adapter implements the [`ConfigSource`](crate::ports::ConfigSource)
//! port and exposes its values as `:`-delimited key paths.

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "env")]
pub mod env_var;
pub mod file;
pub mod json;
pub mod memory;
#[cfg(feature = "yaml")]
pub mod yaml;

// Re-export adapters based on feature flags
#[cfg(feature = "cli")]
pub use cli::CommandLineAdapter;
#[cfg(feature = "env")]
pub use env_var::EnvVarAdapter;
pub use file::FileConfigAdapter;
pub use json::{JsonFileAdapter, JsonParser};
pub use memory::MemoryConfigSource;
#[cfg(feature = "yaml")]
pub use yaml::{YamlFileAdapter, YamlParser};
