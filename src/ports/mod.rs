// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! These traits are the seams of the crate: configuration sources and
//! parsers are implemented by adapters, the hierarchical reader by the
//! configuration root, and the settings cache by [`crate::cache`].

pub mod cache;
pub mod configuration;
pub mod parser;
pub mod source;

// Re-export commonly used types
pub use cache::ConfigurationCache;
pub use configuration::Configuration;
pub use parser::ConfigParser;
pub use source::ConfigSource;
