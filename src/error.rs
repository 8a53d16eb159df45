//! Structured error types for gridbind.
//!
//! Binding operations themselves never fail; these cover decoding input and
//! options, and reaching the grid widget from the browser glue.

/// All errors that can occur while decoding input or wiring up the grid.
#[derive(Debug, thiserror::Error)]
pub enum GridbindError {
    /// Malformed JSON payload.
    #[error("JSON decoding: {0}")]
    Json(#[from] serde_json::Error),

    /// Payload that is not an input or options object.
    #[error("Invalid input: {0}")]
    Input(String),

    /// The grid widget could not be reached or constructed.
    #[error("Grid widget error: {0}")]
    Widget(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridbindError>;

#[cfg(target_arch = "wasm32")]
impl From<serde_wasm_bindgen::Error> for GridbindError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        Self::Input(e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<GridbindError> for wasm_bindgen::JsValue {
    fn from(e: GridbindError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}
