// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process caching for resolved settings.

pub mod config_cache;

pub use config_cache::{CacheStats, ConfigCache, DEFAULT_TTL};
