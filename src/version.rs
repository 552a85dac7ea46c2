// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the cats-vs-dogs node

/// Semantic version number
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name
pub const PACKAGE_NAME: &str = env!("CARGO_PKG_NAME");

/// Get formatted version string
pub fn get_version_string() -> String {
    format!("{} v{}", PACKAGE_NAME, VERSION)
}
