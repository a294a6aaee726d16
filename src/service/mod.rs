// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the aggregated configuration root.

pub mod configuration_root;

pub use configuration_root::{ConfigurationRoot, ConfigurationRootBuilder};
