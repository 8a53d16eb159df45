//! Normalization of raw list/matrix input into the canonical grid model.
//!
//! Both input shapes end up as the same `{rows, columns}` model:
//! - Columns are keyed by label; matrix input gets an extra unnamed
//!   row-label column in front
//! - Rows are emitted in reverse input order, so the first input row is
//!   displayed last
//! - Every column gets the same default width, derived from the available
//!   width and capped by the configured maximum
//!
//! Malformed input (ragged rows, label/row count mismatches) is handled
//! best-effort and never rejected.

use crate::types::{CellValue, Column, DataInput, GridModel, Row, Shape, ROW_LABEL_FIELD};

/// Space reserved for the vertical scrollbar, in pixels.
pub const SCROLLBAR_WIDTH: f64 = 18.0;

/// Labels used for list input that carries none.
pub const DEFAULT_LABELS: [&str; 2] = ["Label", "Value"];

/// Compute the uniform default column width.
///
/// # Arguments
/// * `label_count` - Number of data column labels
/// * `max` - Maximum width to return
/// * `is_matrix` - Whether a row-label column is added in front
/// * `available_width` - Container width in pixels
///
/// The width is split evenly across all columns. When that exceeds `max`
/// the cap is returned, otherwise each column gives up an equal share of
/// the scrollbar. No rounding is applied.
pub fn column_width(label_count: usize, max: f64, is_matrix: bool, available_width: f64) -> f64 {
    let count = label_count + usize::from(is_matrix);
    if count == 0 {
        return max;
    }
    #[allow(clippy::cast_precision_loss)]
    let count = count as f64;
    let potential = available_width / count;
    if potential > max {
        max
    } else {
        potential - SCROLLBAR_WIDTH / count
    }
}

/// Normalize raw input into the canonical model.
pub fn normalize(input: &DataInput, available_width: f64, max_column_width: f64) -> GridModel {
    match input {
        DataInput::List { labels, rows } => {
            let labels: Vec<String> = match labels {
                Some(labels) => labels.clone(),
                None => DEFAULT_LABELS.iter().map(|l| (*l).to_string()).collect(),
            };
            let width = column_width(labels.len(), max_column_width, false, available_width);
            GridModel {
                shape: Shape::List,
                columns: labels.iter().map(|l| Column::labelled(l, width)).collect(),
                rows: rows
                    .iter()
                    .rev()
                    .map(|cells| build_row(None, &labels, cells))
                    .collect(),
            }
        }
        DataInput::Matrix {
            matrix,
            x_labels,
            y_labels,
        } => {
            let width = column_width(x_labels.len(), max_column_width, true, available_width);
            let mut columns = Vec::with_capacity(x_labels.len() + 1);
            columns.push(Column::row_labels(width));
            columns.extend(x_labels.iter().map(|l| Column::labelled(l, width)));

            // Pair each row with its label before reversing so they move together.
            let rows = matrix
                .iter()
                .enumerate()
                .rev()
                .map(|(i, cells)| {
                    let label = y_labels.get(i).cloned().unwrap_or_default();
                    build_row(Some(label), x_labels, cells)
                })
                .collect();

            GridModel {
                shape: Shape::Matrix,
                rows,
                columns,
            }
        }
    }
}

fn build_row(row_label: Option<CellValue>, labels: &[String], cells: &[CellValue]) -> Row {
    let mut row = Row::new();
    if let Some(label) = row_label {
        row.insert(ROW_LABEL_FIELD, label);
    }
    // Cells without a label have no column to land in.
    for (label, value) in labels.iter().zip(cells) {
        row.insert(label.as_str(), value.clone());
    }
    row
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::from(s)
    }

    #[test]
    fn test_width_capped() {
        assert_eq!(column_width(2, 300.0, false, 1000.0), 300.0);
    }

    #[test]
    fn test_width_at_cap_reserves_scrollbar() {
        // 600 / 2 = 300 is not greater than the cap.
        assert_eq!(column_width(2, 300.0, false, 600.0), 291.0);
    }

    #[test]
    fn test_width_counts_row_label_column() {
        // 3 columns: 300 / 3 - 18 / 3
        assert_eq!(column_width(2, 300.0, true, 300.0), 94.0);
    }

    #[test]
    fn test_width_is_fractional() {
        let w = column_width(3, 300.0, false, 100.0);
        assert!((w - (100.0 / 3.0 - 6.0)).abs() < 1e-9);
    }

    #[test]
    fn test_width_no_columns() {
        assert_eq!(column_width(0, 250.0, false, 800.0), 250.0);
    }

    #[test]
    fn test_list_default_labels() {
        let input = DataInput::list(None, vec![vec![text("a"), CellValue::from(1)]]);
        let model = normalize(&input, 600.0, 300.0);

        assert_eq!(model.shape, Shape::List);
        let ids: Vec<&str> = model.columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["Label", "Value"]);
        assert_eq!(model.rows[0].get("Label"), Some(&text("a")));
        assert_eq!(model.rows[0].get("Value"), Some(&CellValue::Number(1.0)));
    }

    #[test]
    fn test_list_rows_reversed() {
        let input = DataInput::list(
            Some(vec!["L".into(), "V".into()]),
            vec![
                vec![text("a"), CellValue::from(1)],
                vec![text("b"), CellValue::from(2)],
            ],
        );
        let model = normalize(&input, 600.0, 300.0);

        let expected: Vec<Row> = vec![
            [("L", text("b")), ("V", CellValue::from(2))].into_iter().collect(),
            [("L", text("a")), ("V", CellValue::from(1))].into_iter().collect(),
        ];
        assert_eq!(model.rows, expected);
        assert!(model.columns.iter().all(|c| c.width == 291.0));
    }

    #[test]
    fn test_matrix_pairs_labels_before_reversal() {
        let input = DataInput::matrix(
            vec![
                vec![CellValue::from(1), CellValue::from(2)],
                vec![CellValue::from(3), CellValue::from(4)],
            ],
            vec!["c0".into(), "c1".into()],
            vec![text("r0"), text("r1")],
        );
        let model = normalize(&input, 600.0, 300.0);

        assert!(model.is_matrix());
        let ids: Vec<&str> = model.columns.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec![ROW_LABEL_FIELD, "c0", "c1"]);
        assert_eq!(model.columns[0].name, "");
        assert_eq!(model.columns[0].field, ROW_LABEL_FIELD);

        let expected: Vec<Row> = vec![
            [
                (ROW_LABEL_FIELD, text("r1")),
                ("c0", CellValue::from(3)),
                ("c1", CellValue::from(4)),
            ]
            .into_iter()
            .collect(),
            [
                (ROW_LABEL_FIELD, text("r0")),
                ("c0", CellValue::from(1)),
                ("c1", CellValue::from(2)),
            ]
            .into_iter()
            .collect(),
        ];
        assert_eq!(model.rows, expected);
    }

    #[test]
    fn test_matrix_missing_row_labels() {
        let input = DataInput::matrix(
            vec![vec![CellValue::from(1)], vec![CellValue::from(2)]],
            vec!["c0".into()],
            vec![text("r0")],
        );
        let model = normalize(&input, 400.0, 300.0);

        // Second input row has no label; it is displayed first.
        assert_eq!(model.rows[0].get(ROW_LABEL_FIELD), Some(&CellValue::Null));
        assert_eq!(model.rows[1].get(ROW_LABEL_FIELD), Some(&text("r0")));
    }

    #[test]
    fn test_ragged_rows() {
        let input = DataInput::list(
            Some(vec!["L".into(), "V".into()]),
            vec![vec![text("short")], vec![text("a"), text("b"), text("extra")]],
        );
        let model = normalize(&input, 600.0, 300.0);

        assert_eq!(model.rows[0].len(), 2);
        assert_eq!(model.rows[1].len(), 1);
        assert!(model.rows[1].get("V").is_none());
    }

    #[test]
    fn test_duplicate_labels_last_write_wins() {
        let input = DataInput::list(
            Some(vec!["K".into(), "K".into()]),
            vec![vec![text("first"), text("second")]],
        );
        let model = normalize(&input, 600.0, 300.0);

        assert_eq!(model.columns.len(), 2);
        assert_eq!(model.rows[0].get("K"), Some(&text("second")));
    }
}
