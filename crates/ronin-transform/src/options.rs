//! Pipeline configuration.

use serde::{Deserialize, Serialize};

/// Options for [`ResourceFamily`](crate::ResourceFamily) pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Select the profile again after localization and validate with that one.
    ///
    /// When disabled the profile chosen before transformation also validates
    /// the localized result.
    pub reresolve_after_localization: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            reresolve_after_localization: true,
        }
    }
}

impl PipelineOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reresolve_after_localization(mut self, enabled: bool) -> Self {
        self.reresolve_after_localization = enabled;
        self
    }
}
