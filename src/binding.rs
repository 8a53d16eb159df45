//! Binding between incoming data and a mounted grid widget.
//!
//! `GridBinding` owns the last rows and columns pushed into the widget and
//! compares every update against them, so that:
//! - identical updates cause no widget calls at all
//! - a values-only change replaces rows but leaves columns (and any widths
//!   the user dragged) alone
//! - a label change replaces columns and resets widths to the default
//!
//! None of the operations fail. Calls before `load` or after `die` are
//! no-ops wherever they would touch the widget.

use std::collections::HashSet;

use log::{debug, trace};

use crate::config::GridConfig;
use crate::normalize::normalize;
use crate::types::{same_column_ids, Column, DataInput, Row};
use crate::widget::{ColumnResize, Container, GridWidget};

/// Class set on the container while it shows matrix data.
pub const MATRIX_CLASS: &str = "matrix";

/// What an `update` pushed into the widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub rows_changed: bool,
    pub columns_changed: bool,
}

impl UpdateOutcome {
    /// True when the widget was left untouched.
    pub fn is_noop(&self) -> bool {
        !self.rows_changed && !self.columns_changed
    }
}

/// Keeps one grid widget in sync with a data feed.
pub struct GridBinding<C: Container, W: GridWidget<C>> {
    container: C,
    /// Container width measured at construction
    width: f64,
    config: GridConfig,
    rows: Vec<Row>,
    columns: Vec<Column>,
    /// Ids of columns whose width came from a user drag
    user_sized: HashSet<String>,
    widget: Option<W>,
}

impl<C: Container, W: GridWidget<C>> GridBinding<C, W> {
    /// Bind to `container` without creating a widget yet.
    pub fn new(container: C, config: GridConfig) -> Self {
        let width = container.width();
        Self {
            container,
            width,
            config,
            rows: Vec::new(),
            columns: Vec::new(),
            user_sized: HashSet::new(),
            widget: None,
        }
    }

    /// Bind to `container` and load `input` straight away.
    pub fn mount(container: C, config: GridConfig, input: &DataInput) -> Self {
        let mut binding = Self::new(container, config);
        binding.load(input);
        binding
    }

    /// Style the container and create the widget with `input`.
    ///
    /// Loading again replaces the existing widget.
    pub fn load(&mut self, input: &DataInput) {
        if let Some(mut previous) = self.widget.take() {
            previous.destroy();
        }

        let container = &self.container;
        container.set_style("width", &format!("{}px", self.width));
        container.set_style("float", "left");
        container.set_style("height", &format!("{}px", container.height()));
        container.set_style("background-color", &self.config.background_color);

        let model = normalize(input, self.width, self.config.max_column_width);
        container.set_class(MATRIX_CLASS, model.is_matrix());
        debug!(
            "loading grid: {} rows, {} columns",
            model.rows.len(),
            model.columns.len()
        );

        let widget = W::create(container, &model.rows, &model.columns);
        self.rows = model.rows;
        self.columns = model.columns;
        self.user_sized.clear();
        self.widget = Some(widget);
    }

    /// Push whatever changed in `input` into the widget.
    ///
    /// Rows and columns are compared and pushed independently. Columns keep
    /// user-dragged widths as long as their ids and order are unchanged.
    pub fn update(&mut self, input: &DataInput) -> UpdateOutcome {
        let mut outcome = UpdateOutcome::default();
        let Some(widget) = self.widget.as_mut() else {
            debug!("update ignored: no grid loaded");
            return outcome;
        };

        let mut model = normalize(
            input,
            self.container.width(),
            self.config.max_column_width,
        );
        self.container.set_class(MATRIX_CLASS, model.is_matrix());

        if same_column_ids(&model.columns, &self.columns) {
            for (column, cached) in model.columns.iter_mut().zip(&self.columns) {
                if self.user_sized.contains(&column.id) {
                    column.width = cached.width;
                }
            }
        } else {
            self.user_sized.clear();
        }

        if model.rows != self.rows {
            debug!("pushing {} rows", model.rows.len());
            self.rows = model.rows;
            widget.set_data(&self.rows);
            widget.invalidate();
            outcome.rows_changed = true;
        }

        if model.columns != self.columns {
            debug!("pushing {} columns", model.columns.len());
            self.columns = model.columns;
            widget.set_columns(&self.columns);
            widget.invalidate();
            outcome.columns_changed = true;
        }

        outcome
    }

    /// Record widths the user dragged in the widget.
    ///
    /// Only the cached columns are patched; nothing is pushed back. The last
    /// live column is never synced.
    #[allow(clippy::float_cmp)]
    pub fn on_column_resize(&mut self, args: &ColumnResize) {
        let synced = args.columns.len().saturating_sub(1);
        for (live, cached) in args.columns.iter().zip(self.columns.iter_mut()).take(synced) {
            if live.width != cached.width {
                trace!(
                    "column {} resized: {} -> {}",
                    cached.id,
                    cached.width,
                    live.width
                );
                cached.width = live.width;
                self.user_sized.insert(cached.id.clone());
            }
        }
    }

    /// Read the widget's live columns and record any dragged widths.
    ///
    /// Same as `on_column_resize` with the columns the widget reports.
    pub fn sync_column_widths(&mut self) {
        let Some(widget) = self.widget.as_ref() else {
            return;
        };
        let args = ColumnResize {
            columns: widget.columns(),
        };
        self.on_column_resize(&args);
    }

    /// Fit the container to its host parent and let the widget re-measure.
    ///
    /// Does nothing without a widget or outside a host container.
    pub fn resize(&mut self) {
        let Some(widget) = self.widget.as_mut() else {
            return;
        };
        let Some((width, height)) = self
            .container
            .parent_size(&self.config.host_container_class)
        else {
            return;
        };

        self.container.set_style("width", &format!("{width}px"));
        self.container.set_style("height", &format!("{height}px"));
        widget.resize_canvas();
    }

    /// Tear down the widget. Safe to call repeatedly.
    pub fn die(&mut self) {
        if let Some(mut widget) = self.widget.take() {
            debug!("destroying grid");
            widget.invalidate();
            widget.destroy();
        }
    }

    /// The bound container.
    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Rows last pushed into the widget.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Columns last pushed into the widget, with user-dragged widths patched in.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// True between `load` and `die`.
    pub fn is_loaded(&self) -> bool {
        self.widget.is_some()
    }

    pub fn widget(&self) -> Option<&W> {
        self.widget.as_ref()
    }
}
