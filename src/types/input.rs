use serde::Deserialize;

use super::CellValue;
use crate::error::Result;

/// Raw data handed to the adapter by the data feed.
///
/// The two shapes never mix. On the wire the shape is decided by the
/// payload: `{data: {matrix, xLabels, yLabels}}` is a matrix when `matrix`
/// is non-empty, anything else is a list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawInput")]
pub enum DataInput {
    /// Label/value pairs, nominally `[key, value]` per row.
    List {
        /// Column labels; `["Label", "Value"]` when absent.
        labels: Option<Vec<String>>,
        rows: Vec<Vec<CellValue>>,
    },
    /// A 2-D grid with separate column and row labels.
    Matrix {
        matrix: Vec<Vec<CellValue>>,
        x_labels: Vec<String>,
        /// Row labels, paired with `matrix` by index.
        y_labels: Vec<CellValue>,
    },
}

impl DataInput {
    /// Build list-form input.
    pub fn list(labels: Option<Vec<String>>, rows: Vec<Vec<CellValue>>) -> Self {
        Self::List { labels, rows }
    }

    /// Build matrix-form input.
    pub fn matrix(
        matrix: Vec<Vec<CellValue>>,
        x_labels: Vec<String>,
        y_labels: Vec<CellValue>,
    ) -> Self {
        Self::Matrix {
            matrix,
            x_labels,
            y_labels,
        }
    }

    /// Decode a raw JSON payload.
    ///
    /// # Errors
    /// Returns an error if the text is not JSON or not an input object.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode an already-parsed JSON value.
    ///
    /// # Errors
    /// Returns an error if the value is not an input object.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// True for matrix-form input.
    pub fn is_matrix(&self) -> bool {
        matches!(self, Self::Matrix { .. })
    }
}

#[derive(Deserialize)]
struct RawInput {
    #[serde(default)]
    labels: Option<Vec<CellValue>>,
    #[serde(default)]
    data: RawData,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawData {
    Rows(Vec<Vec<CellValue>>),
    Grid(RawMatrix),
}

impl Default for RawData {
    fn default() -> Self {
        Self::Rows(Vec::new())
    }
}

#[derive(Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
struct RawMatrix {
    matrix: Vec<Vec<CellValue>>,
    x_labels: Vec<CellValue>,
    y_labels: Vec<CellValue>,
}

/// Labels become field names, so they take the text a JS property key
/// would: `1` is `"1"`, `null` is `"null"`.
fn label_text(label: CellValue) -> String {
    match label {
        CellValue::Null => "null".to_string(),
        CellValue::Text(s) => s,
        other => other.to_string(),
    }
}

fn label_texts(labels: Vec<CellValue>) -> Vec<String> {
    labels.into_iter().map(label_text).collect()
}

impl From<RawInput> for DataInput {
    fn from(raw: RawInput) -> Self {
        let labels = raw.labels.map(label_texts);
        match raw.data {
            RawData::Grid(grid) if !grid.matrix.is_empty() => Self::Matrix {
                matrix: grid.matrix,
                x_labels: label_texts(grid.x_labels),
                y_labels: grid.y_labels,
            },
            // A data object without a usable matrix has no list rows either.
            RawData::Grid(_) => Self::List {
                labels,
                rows: Vec::new(),
            },
            RawData::Rows(rows) => Self::List { labels, rows },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_payload() {
        let input = DataInput::from_value(json!({
            "labels": ["Tenor", "Rate"],
            "data": [["1Y", 0.5], ["2Y", 0.75]]
        }))
        .unwrap();

        assert_eq!(
            input,
            DataInput::list(
                Some(vec!["Tenor".into(), "Rate".into()]),
                vec![
                    vec!["1Y".into(), 0.5.into()],
                    vec!["2Y".into(), 0.75.into()],
                ],
            )
        );
    }

    #[test]
    fn test_list_without_labels() {
        let input = DataInput::from_json(r#"{"data": [["a", 1]]}"#).unwrap();
        match input {
            DataInput::List { labels, rows } => {
                assert!(labels.is_none());
                assert_eq!(rows.len(), 1);
            }
            DataInput::Matrix { .. } => panic!("expected list input"),
        }
    }

    #[test]
    fn test_matrix_payload() {
        let input = DataInput::from_value(json!({
            "data": {
                "matrix": [[1, 2], [3, 4]],
                "xLabels": ["c0", "c1"],
                "yLabels": ["r0", "r1"]
            }
        }))
        .unwrap();

        assert!(input.is_matrix());
        if let DataInput::Matrix {
            matrix,
            x_labels,
            y_labels,
        } = input
        {
            assert_eq!(matrix.len(), 2);
            assert_eq!(x_labels, vec!["c0", "c1"]);
            assert_eq!(y_labels, vec![CellValue::from("r0"), CellValue::from("r1")]);
        }
    }

    #[test]
    fn test_empty_matrix_is_list() {
        let input = DataInput::from_value(json!({
            "labels": ["A", "B"],
            "data": {"matrix": [], "xLabels": ["x"], "yLabels": []}
        }))
        .unwrap();

        assert_eq!(
            input,
            DataInput::list(Some(vec!["A".into(), "B".into()]), Vec::new())
        );
    }

    #[test]
    fn test_null_cells() {
        let input = DataInput::from_json(r#"{"data": [["a", null]]}"#).unwrap();
        let DataInput::List { rows, .. } = input else {
            panic!("expected list input");
        };
        assert_eq!(rows, vec![vec![CellValue::from("a"), CellValue::Null]]);
    }

    #[test]
    fn test_label_text_matches_js_keys() {
        assert_eq!(label_text(CellValue::from(2024)), "2024");
        assert_eq!(label_text(CellValue::Number(0.5)), "0.5");
        assert_eq!(label_text(CellValue::from(true)), "true");
        assert_eq!(label_text(CellValue::Null), "null");
        assert_eq!(label_text(CellValue::from("1Y")), "1Y");
    }

    #[test]
    fn test_not_an_object() {
        assert!(DataInput::from_json("[1, 2, 3]").is_err());
        assert!(DataInput::from_json("not json").is_err());
    }
}
