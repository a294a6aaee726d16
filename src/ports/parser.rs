// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration file parser trait definition.

use crate::domain::Result;
use std::collections::BTreeMap;

/// Parses the content of a configuration file into flat key paths.
///
/// # Key Format
///
/// Nested structures are flattened with the `:` delimiter and sequence
/// elements are addressed by index:
///
/// ```yaml
/// Serilog:
///   Enrich:
///     - FromLogContext
///   MinimumLevel:
///     Default: Information
/// ```
///
/// becomes `Serilog:Enrich:0 -> FromLogContext` and
/// `Serilog:MinimumLevel:Default -> Information`.
///
/// An empty mapping or sequence is emitted as a single key with an empty
/// value, so that the section still exists and binds to defaults.
pub trait ConfigParser: Send + Sync {
    /// Parses configuration content into a flat key-value map.
    fn parse(&self, content: &str) -> Result<BTreeMap<String, String>>;

    /// Returns the file extensions this parser handles.
    fn supported_extensions(&self) -> &[&str];

    /// The source name reported by file adapters using this parser.
    fn source_name(&self) -> &str;
}
