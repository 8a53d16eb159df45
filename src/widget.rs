//! Contract between the binding and its external collaborators.
//!
//! The grid widget does all rendering, scrolling and cell layout; the
//! container is the element it is mounted in. Both are traits so the
//! binding can drive a browser grid or a test double alike.

use crate::types::{Column, Row};

/// The element a grid is mounted in.
pub trait Container {
    /// Current width in pixels.
    fn width(&self) -> f64;

    /// Current height in pixels.
    fn height(&self) -> f64;

    /// Set an inline style property.
    fn set_style(&self, property: &str, value: &str);

    /// Add or remove a class.
    fn set_class(&self, class: &str, enabled: bool);

    /// Size of the direct parent, if it carries `host_class`.
    fn parent_size(&self, host_class: &str) -> Option<(f64, f64)>;
}

/// A third-party grid-rendering widget.
pub trait GridWidget<C: Container>: Sized {
    /// Construct the widget inside `container` with its initial data.
    fn create(container: &C, rows: &[Row], columns: &[Column]) -> Self;

    /// Replace the row set.
    fn set_data(&mut self, rows: &[Row]);

    /// Replace the column set.
    fn set_columns(&mut self, columns: &[Column]);

    /// Force a re-layout.
    fn invalidate(&mut self);

    /// Release widget resources. The widget is not used afterwards.
    fn destroy(&mut self);

    /// Recompute pixel geometry after the container changed size.
    fn resize_canvas(&mut self);

    /// The live column list, including user-dragged widths.
    fn columns(&self) -> Vec<Column>;
}

/// Payload of the widget's column-resize notification.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColumnResize {
    /// Live columns read from the widget after the drag
    pub columns: Vec<Column>,
}
