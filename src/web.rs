//! Browser glue: binds the grid contract to SlickGrid and the DOM.
//!
//! Exports the `DataGrid` class to JavaScript. The page is expected to load
//! SlickGrid (`Slick.Grid`) before constructing one.
//!
//! ```javascript
//! import init, { DataGrid } from 'gridbind';
//! await init();
//! const grid = new DataGrid(element, { labels: ['Tenor', 'Rate'], data: rows });
//! grid.update(nextPayload);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Reflect};
use log::warn;
use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

use crate::binding::GridBinding;
use crate::config::GridConfig;
use crate::error::GridbindError;
use crate::types::{Column, DataInput, Row};
use crate::widget::{Container, GridWidget};

#[wasm_bindgen]
extern "C" {
    /// `Slick.Grid`
    #[wasm_bindgen(js_namespace = Slick, js_name = Grid)]
    pub type SlickGrid;

    #[wasm_bindgen(constructor, js_namespace = Slick, js_class = "Grid")]
    fn new(container: &HtmlElement, data: &JsValue, columns: &JsValue) -> SlickGrid;

    #[wasm_bindgen(method, js_name = setData)]
    fn set_data(this: &SlickGrid, data: &JsValue);

    #[wasm_bindgen(method, js_name = setColumns)]
    fn set_columns(this: &SlickGrid, columns: &JsValue);

    #[wasm_bindgen(method)]
    fn invalidate(this: &SlickGrid);

    #[wasm_bindgen(method)]
    fn destroy(this: &SlickGrid);

    #[wasm_bindgen(method, js_name = resizeCanvas)]
    fn resize_canvas(this: &SlickGrid);

    #[wasm_bindgen(method, js_name = getColumns)]
    fn get_columns(this: &SlickGrid) -> JsValue;

    /// `Slick.Event`
    type SlickEvent;

    #[wasm_bindgen(method)]
    fn subscribe(this: &SlickEvent, handler: &Function);

    #[wasm_bindgen(method)]
    fn unsubscribe(this: &SlickEvent, handler: &Function);
}

/// Name of the grid event fired after a user drags a column border.
const COLUMNS_RESIZED_EVENT: &str = "onColumnsResized";

impl Container for HtmlElement {
    fn width(&self) -> f64 {
        f64::from(self.client_width())
    }

    fn height(&self) -> f64 {
        f64::from(self.client_height())
    }

    fn set_style(&self, property: &str, value: &str) {
        let _ = self.style().set_property(property, value);
    }

    fn set_class(&self, class: &str, enabled: bool) {
        let classes = self.class_list();
        let _ = if enabled {
            classes.add_1(class)
        } else {
            classes.remove_1(class)
        };
    }

    fn parent_size(&self, host_class: &str) -> Option<(f64, f64)> {
        let parent = self.parent_element()?;
        if !parent.class_list().contains(host_class) {
            return None;
        }
        Some((
            f64::from(parent.client_width()),
            f64::from(parent.client_height()),
        ))
    }
}

/// Serialize into a plain JS value (objects, not `Map`s).
fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).unwrap_or_else(|e| {
        warn!("failed to convert grid data: {e}");
        js_sys::Array::new().into()
    })
}

fn columns_from_js(value: JsValue) -> Vec<Column> {
    serde_wasm_bindgen::from_value(value).unwrap_or_else(|e| {
        warn!("failed to read grid columns: {e}");
        Vec::new()
    })
}

/// A `Slick.Grid` instance driven by a binding.
pub struct SlickGridWidget {
    grid: SlickGrid,
}

impl SlickGridWidget {
    fn columns_resized_event(&self) -> Option<SlickEvent> {
        let event = Reflect::get(&self.grid, &JsValue::from_str(COLUMNS_RESIZED_EVENT)).ok()?;
        event.is_object().then(|| event.unchecked_into())
    }
}

impl GridWidget<HtmlElement> for SlickGridWidget {
    fn create(container: &HtmlElement, rows: &[Row], columns: &[Column]) -> Self {
        Self {
            grid: SlickGrid::new(container, &to_js(rows), &to_js(columns)),
        }
    }

    fn set_data(&mut self, rows: &[Row]) {
        self.grid.set_data(&to_js(rows));
    }

    fn set_columns(&mut self, columns: &[Column]) {
        self.grid.set_columns(&to_js(columns));
    }

    fn invalidate(&mut self) {
        self.grid.invalidate();
    }

    fn destroy(&mut self) {
        self.grid.destroy();
    }

    fn resize_canvas(&mut self) {
        self.grid.resize_canvas();
    }

    fn columns(&self) -> Vec<Column> {
        columns_from_js(self.grid.get_columns())
    }
}

type SharedBinding = Rc<RefCell<GridBinding<HtmlElement, SlickGridWidget>>>;

fn decode_input(input: JsValue) -> Result<DataInput, GridbindError> {
    Ok(serde_wasm_bindgen::from_value(input)?)
}

fn decode_options(options: JsValue) -> Result<GridConfig, GridbindError> {
    if options.is_undefined() || options.is_null() {
        return Ok(GridConfig::default());
    }
    Ok(serde_wasm_bindgen::from_value(options)?)
}

fn ensure_slick_loaded() -> Result<(), GridbindError> {
    let loaded = Reflect::get(&js_sys::global(), &JsValue::from_str("Slick"))
        .map(|slick| slick.is_object())
        .unwrap_or(false);
    if loaded {
        Ok(())
    } else {
        Err(GridbindError::Widget("Slick.Grid is not loaded".to_string()))
    }
}

/// Grid adapter exported to JavaScript.
#[wasm_bindgen]
pub struct DataGrid {
    binding: SharedBinding,
    resize_handler: Option<Closure<dyn FnMut(JsValue, JsValue)>>,
}

#[wasm_bindgen]
impl DataGrid {
    /// Mount a grid in `container` and load `input`.
    ///
    /// `options` accepts `{backgroundColor, maxColumnWidth, hostContainerClass}`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        container: HtmlElement,
        input: JsValue,
        options: JsValue,
    ) -> Result<DataGrid, JsValue> {
        console_error_panic_hook::set_once();

        let config = decode_options(options)?;
        let input = decode_input(input)?;
        ensure_slick_loaded()?;

        let binding = Rc::new(RefCell::new(GridBinding::mount(container, config, &input)));
        let mut grid = DataGrid {
            binding,
            resize_handler: None,
        };
        grid.subscribe_column_resize();
        Ok(grid)
    }

    /// Replace the widget with one showing `input`.
    pub fn load(&mut self, input: JsValue) -> Result<(), JsValue> {
        let input = decode_input(input)?;
        self.unsubscribe_column_resize();
        self.binding.borrow_mut().load(&input);
        self.subscribe_column_resize();
        Ok(())
    }

    /// Push changed rows and/or columns. Returns true if anything changed.
    pub fn update(&mut self, input: JsValue) -> Result<bool, JsValue> {
        let input = decode_input(input)?;
        let outcome = self.binding.borrow_mut().update(&input);
        Ok(!outcome.is_noop())
    }

    pub fn resize(&mut self) {
        self.binding.borrow_mut().resize();
    }

    pub fn die(&mut self) {
        self.unsubscribe_column_resize();
        self.binding.borrow_mut().die();
    }

    #[wasm_bindgen(js_name = "getContainer")]
    pub fn container(&self) -> HtmlElement {
        self.binding.borrow().container().clone()
    }
}

impl DataGrid {
    fn subscribe_column_resize(&mut self) {
        let binding = Rc::clone(&self.binding);
        let handler = Closure::wrap(Box::new(move |_event: JsValue, _args: JsValue| {
            match binding.try_borrow_mut() {
                Ok(mut binding) => binding.sync_column_widths(),
                Err(_) => warn!("column resize during a grid update was dropped"),
            }
        }) as Box<dyn FnMut(JsValue, JsValue)>);

        let event = self
            .binding
            .borrow()
            .widget()
            .and_then(SlickGridWidget::columns_resized_event);
        match event {
            Some(event) => {
                event.subscribe(handler.as_ref().unchecked_ref());
                self.resize_handler = Some(handler);
            }
            None => warn!(
                "grid has no {COLUMNS_RESIZED_EVENT} event; column widths will not be kept"
            ),
        }
    }

    fn unsubscribe_column_resize(&mut self) {
        let Some(handler) = self.resize_handler.take() else {
            return;
        };
        if let Some(event) = self
            .binding
            .borrow()
            .widget()
            .and_then(SlickGridWidget::columns_resized_event)
        {
            event.unsubscribe(handler.as_ref().unchecked_ref());
        }
    }
}

// `free()` from JS without `die()` must not leave the handler subscribed.
impl Drop for DataGrid {
    fn drop(&mut self) {
        self.unsubscribe_column_resize();
        match self.binding.try_borrow_mut() {
            Ok(mut binding) => binding.die(),
            Err(_) => warn!("grid dropped while busy; widget not destroyed"),
        }
    }
}
