//! Common test utilities: a recording grid widget and a fake container.
//!
//! The container is a cheap handle over shared state, so a test can keep
//! one clone while the binding owns another and inspect everything the
//! binding did through it.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use gridbind::{
    CellValue, Column, ColumnResize, Container, DataInput, GridBinding, GridConfig, GridWidget,
    Row,
};

// ============================================================================
// Widget calls
// ============================================================================

/// One call the binding made on the widget.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create { rows: Vec<Row>, columns: Vec<Column> },
    SetData(Vec<Row>),
    SetColumns(Vec<Column>),
    Invalidate,
    Destroy,
    ResizeCanvas,
}

// ============================================================================
// Fake container
// ============================================================================

#[derive(Default)]
struct ContainerState {
    width: Cell<f64>,
    height: Cell<f64>,
    styles: RefCell<BTreeMap<String, String>>,
    classes: RefCell<BTreeSet<String>>,
    /// (class, width, height) of the parent element
    parent: RefCell<Option<(String, f64, f64)>>,
    calls: RefCell<Vec<Call>>,
    /// Columns as the widget currently shows them
    live_columns: RefCell<Vec<Column>>,
}

/// A measured element that records styling and widget activity.
#[derive(Clone, Default)]
pub struct FakeContainer(Rc<ContainerState>);

impl FakeContainer {
    pub fn new(width: f64, height: f64) -> Self {
        let container = Self::default();
        container.0.width.set(width);
        container.0.height.set(height);
        container
    }

    /// Place the container inside a parent with `class`.
    pub fn with_parent(self, class: &str, width: f64, height: f64) -> Self {
        *self.0.parent.borrow_mut() = Some((class.to_string(), width, height));
        self
    }

    /// Simulate the element being resized by layout.
    pub fn set_size(&self, width: f64, height: f64) {
        self.0.width.set(width);
        self.0.height.set(height);
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0.styles.borrow().get(property).cloned()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.0.classes.borrow().contains(class)
    }

    /// Every widget call so far.
    pub fn calls(&self) -> Vec<Call> {
        self.0.calls.borrow().clone()
    }

    /// Forget recorded widget calls.
    pub fn clear_calls(&self) {
        self.0.calls.borrow_mut().clear();
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.0.calls.borrow().iter().filter(|c| matches(c)).count()
    }

    /// Simulate the user dragging column `index` to `width` and return the
    /// notification the widget would emit.
    pub fn drag_column(&self, index: usize, width: f64) -> ColumnResize {
        let mut live = self.0.live_columns.borrow_mut();
        live[index].width = width;
        ColumnResize {
            columns: live.clone(),
        }
    }

    fn record(&self, call: Call) {
        self.0.calls.borrow_mut().push(call);
    }
}

impl Container for FakeContainer {
    fn width(&self) -> f64 {
        self.0.width.get()
    }

    fn height(&self) -> f64 {
        self.0.height.get()
    }

    fn set_style(&self, property: &str, value: &str) {
        self.0
            .styles
            .borrow_mut()
            .insert(property.to_string(), value.to_string());
    }

    fn set_class(&self, class: &str, enabled: bool) {
        let mut classes = self.0.classes.borrow_mut();
        if enabled {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
    }

    fn parent_size(&self, host_class: &str) -> Option<(f64, f64)> {
        match &*self.0.parent.borrow() {
            Some((class, w, h)) if class == host_class => Some((*w, *h)),
            _ => None,
        }
    }
}

// ============================================================================
// Recording widget
// ============================================================================

/// Grid widget that records every call on its container.
pub struct RecordingWidget {
    container: FakeContainer,
}

impl GridWidget<FakeContainer> for RecordingWidget {
    fn create(container: &FakeContainer, rows: &[Row], columns: &[Column]) -> Self {
        container.record(Call::Create {
            rows: rows.to_vec(),
            columns: columns.to_vec(),
        });
        *container.0.live_columns.borrow_mut() = columns.to_vec();
        Self {
            container: container.clone(),
        }
    }

    fn set_data(&mut self, rows: &[Row]) {
        self.container.record(Call::SetData(rows.to_vec()));
    }

    fn set_columns(&mut self, columns: &[Column]) {
        self.container.record(Call::SetColumns(columns.to_vec()));
        *self.container.0.live_columns.borrow_mut() = columns.to_vec();
    }

    fn invalidate(&mut self) {
        self.container.record(Call::Invalidate);
    }

    fn destroy(&mut self) {
        self.container.record(Call::Destroy);
    }

    fn resize_canvas(&mut self) {
        self.container.record(Call::ResizeCanvas);
    }

    fn columns(&self) -> Vec<Column> {
        self.container.0.live_columns.borrow().clone()
    }
}

pub type TestBinding = GridBinding<FakeContainer, RecordingWidget>;

// ============================================================================
// Input builders
// ============================================================================

pub fn text(s: &str) -> CellValue {
    CellValue::from(s)
}

pub fn num(n: f64) -> CellValue {
    CellValue::Number(n)
}

/// List input with labels `L`/`V` and one `[key, value]` row per pair.
pub fn list_input(pairs: &[(&str, f64)]) -> DataInput {
    DataInput::list(
        Some(vec!["L".to_string(), "V".to_string()]),
        pairs.iter().map(|(k, v)| vec![text(k), num(*v)]).collect(),
    )
}

/// Matrix input with the given column labels and `rN` row labels.
pub fn matrix_input(x_labels: &[&str], matrix: &[&[f64]]) -> DataInput {
    DataInput::matrix(
        matrix
            .iter()
            .map(|row| row.iter().map(|v| num(*v)).collect())
            .collect(),
        x_labels.iter().map(|l| (*l).to_string()).collect(),
        (0..matrix.len()).map(|i| text(&format!("r{i}"))).collect(),
    )
}

/// A 600x400 container and a binding loaded with `input`, calls cleared.
pub fn loaded(input: &DataInput) -> (FakeContainer, TestBinding) {
    let container = FakeContainer::new(600.0, 400.0);
    let binding = TestBinding::mount(container.clone(), GridConfig::default(), input);
    container.clear_calls();
    (container, binding)
}
