//! Per-instance grid configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default container background.
pub const DEFAULT_BACKGROUND_COLOR: &str = "#fff";

/// Maximum default width for a column, in pixels.
pub const DEFAULT_MAX_COLUMN_WIDTH: f64 = 300.0;

/// Class of the dashboard element whose size the grid adopts on resize.
pub const DEFAULT_HOST_CONTAINER_CLASS: &str = "OG-gadget-container";

/// Options fixed when a binding is constructed.
///
/// Decodes from a camelCase object; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    /// CSS color applied to the container background on load
    pub background_color: String,
    /// Cap on the computed default column width
    pub max_column_width: f64,
    /// Parent class that enables `resize`
    pub host_container_class: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            background_color: DEFAULT_BACKGROUND_COLOR.to_string(),
            max_column_width: DEFAULT_MAX_COLUMN_WIDTH,
            host_container_class: DEFAULT_HOST_CONTAINER_CLASS.to_string(),
        }
    }
}

impl GridConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode options from JSON.
    ///
    /// # Errors
    /// Returns an error if the text is not a JSON options object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    #[must_use]
    pub fn with_max_column_width(mut self, width: f64) -> Self {
        self.max_column_width = width;
        self
    }

    #[must_use]
    pub fn with_host_container_class(mut self, class: impl Into<String>) -> Self {
        self.host_container_class = class.into();
        self
    }
}
