// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tool configuration loaded from environment variables.

use ifc_facet_extract::IndexPolicy;

/// Extraction tool configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Minimum seconds between progress messages.
    pub progress_interval_secs: u64,
    /// Policy for elements with out-of-range face indices.
    pub index_policy: IndexPolicy,
    /// Optional path to write the filtered scene copy to.
    pub filtered_out: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            progress_interval_secs: std::env::var("PROGRESS_INTERVAL_SECS")
                .unwrap_or_else(|_| "3".into())
                .parse()
                .unwrap_or(3),
            index_policy: match std::env::var("INDEX_POLICY").as_deref() {
                Ok("skip") => IndexPolicy::SkipElement,
                _ => IndexPolicy::Abort,
            },
            filtered_out: std::env::var("FILTERED_OUT").ok(),
        }
    }
}
