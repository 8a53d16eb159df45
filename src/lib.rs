//! gridbind - data-binding adapter for grid widgets
//!
//! Feeds list or matrix data into a SlickGrid-style grid and keeps it in
//! sync with a data feed:
//! - Normalizes `{labels, data}` and `{data: {matrix, xLabels, yLabels}}`
//!   payloads into one row/column model
//! - Computes default column widths under the container's width budget
//! - Pushes only what changed on each update, keeping user-dragged widths
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { DataGrid } from 'gridbind';
//! await init();
//! const grid = new DataGrid(element, payload, { maxColumnWidth: 200 });
//! grid.update(nextPayload);
//! grid.die();
//! ```

pub mod binding;
pub mod config;
pub mod error;
pub mod normalize;
pub mod types;
pub mod widget;

// Browser glue (SlickGrid + DOM)
#[cfg(target_arch = "wasm32")]
pub mod web;

use wasm_bindgen::prelude::*;

pub use binding::{GridBinding, UpdateOutcome};
pub use config::GridConfig;
pub use error::GridbindError;
pub use normalize::{column_width, normalize};
pub use widget::{ColumnResize, Container, GridWidget};

pub use types::*;

#[cfg(target_arch = "wasm32")]
pub use web::DataGrid;

/// Normalize a JSON payload and return the canonical model as JSON
///
/// # Arguments
/// * `input` - A `{labels, data}` or `{data: {matrix, xLabels, yLabels}}` payload
/// * `available_width` - Container width in pixels
/// * `max_column_width` - Cap on the default column width
///
/// # Errors
/// Returns an error if the payload is not an input object.
#[wasm_bindgen]
pub fn normalize_json(
    input: &str,
    available_width: f64,
    max_column_width: f64,
) -> std::result::Result<String, JsValue> {
    let input = DataInput::from_json(input).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let model = normalize(&input, available_width, max_column_width);

    serde_json::to_string(&model)
        .map_err(|e| JsValue::from_str(&format!("JSON serialization error: {e}")))
}

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
