use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::CellValue;

/// Field key of the row-label column that matrix input prepends.
pub const ROW_LABEL_FIELD: &str = "ylabelscol";

/// Which input shape a model was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Shape {
    List,
    Matrix,
}

/// A grid column as the widget consumes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    /// Header text
    #[serde(default)]
    pub name: String,
    /// Row key the column reads its cells from
    #[serde(default)]
    pub field: String,
    /// Width in CSS pixels, possibly fractional
    pub width: f64,
}

impl Column {
    /// A data column whose id, name and field are all the label.
    pub fn labelled(label: &str, width: f64) -> Self {
        Self {
            id: label.to_string(),
            name: label.to_string(),
            field: label.to_string(),
            width,
        }
    }

    /// The unnamed row-label column of a matrix grid.
    pub fn row_labels(width: f64) -> Self {
        Self {
            id: ROW_LABEL_FIELD.to_string(),
            name: String::new(),
            field: ROW_LABEL_FIELD.to_string(),
            width,
        }
    }
}

/// One grid row: cell values keyed by column field.
///
/// Equality ignores insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(BTreeMap<String, CellValue>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell. A repeated field overwrites the earlier value.
    pub fn insert(&mut self, field: impl Into<String>, value: CellValue) {
        self.0.insert(field.into(), value);
    }

    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.0.get(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (k, v) in iter {
            row.insert(k, v.into());
        }
        row
    }
}

/// The canonical grid model produced by normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridModel {
    pub shape: Shape,
    pub rows: Vec<Row>,
    pub columns: Vec<Column>,
}

impl GridModel {
    pub fn is_matrix(&self) -> bool {
        self.shape == Shape::Matrix
    }
}

/// Compare two column sets by id and order, ignoring widths.
pub fn same_column_ids(a: &[Column], b: &[Column]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.id == y.id)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_row_last_write_wins() {
        let mut row = Row::new();
        row.insert("a", CellValue::from(1));
        row.insert("a", CellValue::from(2));
        assert_eq!(row.len(), 1);
        assert_eq!(row.get("a"), Some(&CellValue::Number(2.0)));
    }

    #[test]
    fn test_row_equality_ignores_order() {
        let a: Row = [("x", 1), ("y", 2)].into_iter().collect();
        let b: Row = [("y", 2), ("x", 1)].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_row_serializes_as_object() {
        let row: Row = [("L", CellValue::from("a")), ("V", CellValue::from(1))]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json, serde_json::json!({"L": "a", "V": 1.0}));
    }

    #[test]
    fn test_column_ignores_widget_extras() {
        let col: Column = serde_json::from_str(
            r#"{"id": "c0", "name": "c0", "field": "c0", "width": 120, "minWidth": 30, "resizable": true}"#,
        )
        .unwrap();
        assert_eq!(col, Column::labelled("c0", 120.0));
    }

    #[test]
    fn test_same_column_ids() {
        let a = vec![Column::row_labels(10.0), Column::labelled("c0", 10.0)];
        let b = vec![Column::row_labels(99.0), Column::labelled("c0", 42.0)];
        let c = vec![Column::labelled("c0", 10.0), Column::row_labels(10.0)];
        assert!(same_column_ids(&a, &b));
        assert!(!same_column_ids(&a, &c));
        assert!(!same_column_ids(&a, &a[..1]));
    }
}
