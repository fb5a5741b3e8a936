//! Per-record predicates.
//!
//! Every predicate is a pure function returning `true` iff the tested
//! property holds. None of them panic or fail on well-typed input; `false` is
//! the failure signal.
//!
//! Two flavors exist. Record predicates read a fixed field of a [`Record`].
//! Row predicates read a named column of a [`Row`] and treat a column the row
//! does not have as a pass. Within a present column:
//!
//! - a null label fails, while null offsets, weights and features pass (the
//!   same defaults a record applies when they are omitted);
//! - a non-numeric scalar fails;
//! - a feature column may hold a vector, in which case every stored
//!   component is tested, or a single numeric scalar.

use crate::core::constants::{NEGATIVE_CLASS_LABEL, POSITIVE_CLASS_LABEL};
use crate::dataset::record::Record;
use crate::dataset::tabular::{Row, Value};

fn is_finite(value: f64) -> bool {
    !(value.is_nan() || value.is_infinite())
}

fn is_binary(value: f64) -> bool {
    value == POSITIVE_CLASS_LABEL || value == NEGATIVE_CLASS_LABEL
}

fn is_non_negative(value: f64) -> bool {
    value >= 0.0
}

/// Label is neither NaN nor infinite.
pub fn finite_label(record: &Record) -> bool {
    is_finite(record.label())
}

/// Label is the positive or the negative class label.
pub fn binary_label(record: &Record) -> bool {
    is_binary(record.label())
}

/// Label is at least zero. NaN labels fail.
pub fn non_negative_label(record: &Record) -> bool {
    is_non_negative(record.label())
}

/// Every stored feature value is finite; no features trivially passes.
pub fn finite_features(record: &Record) -> bool {
    record.features().values().iter().all(|&value| is_finite(value))
}

/// Offset is finite, or absent.
pub fn finite_offset(record: &Record) -> bool {
    record.offset().map_or(true, is_finite)
}

/// Weight is finite.
pub fn finite_weight(record: &Record) -> bool {
    is_finite(record.weight())
}

// Cell-level tests. `None` means the row has no such column.

fn scalar_cell<F>(cell: Option<&Value>, null_passes: bool, test: F) -> bool
where
    F: Fn(f64) -> bool,
{
    match cell {
        None => true,
        Some(Value::Null) => null_passes,
        Some(value) => value.as_f64().map_or(false, test),
    }
}

pub(crate) fn finite_label_cell(cell: Option<&Value>) -> bool {
    scalar_cell(cell, false, is_finite)
}

pub(crate) fn binary_label_cell(cell: Option<&Value>) -> bool {
    scalar_cell(cell, false, is_binary)
}

pub(crate) fn non_negative_label_cell(cell: Option<&Value>) -> bool {
    scalar_cell(cell, false, is_non_negative)
}

pub(crate) fn finite_offset_cell(cell: Option<&Value>) -> bool {
    scalar_cell(cell, true, is_finite)
}

pub(crate) fn finite_weight_cell(cell: Option<&Value>) -> bool {
    scalar_cell(cell, true, is_finite)
}

pub(crate) fn finite_features_cell(cell: Option<&Value>) -> bool {
    match cell {
        None | Some(Value::Null) => true,
        Some(Value::Vector(vector)) => vector.all_components(|&value| is_finite(value)),
        Some(value) => value.as_f64().map_or(false, is_finite),
    }
}

/// Label column value is neither NaN nor infinite.
pub fn finite_label_in(row: &Row, column: &str) -> bool {
    finite_label_cell(row.get(column))
}

/// Label column value is the positive or the negative class label.
pub fn binary_label_in(row: &Row, column: &str) -> bool {
    binary_label_cell(row.get(column))
}

/// Label column value is at least zero.
pub fn non_negative_label_in(row: &Row, column: &str) -> bool {
    non_negative_label_cell(row.get(column))
}

/// Every component of the feature column is finite.
pub fn finite_features_in(row: &Row, column: &str) -> bool {
    finite_features_cell(row.get(column))
}

/// Offset column value is finite.
pub fn finite_offset_in(row: &Row, column: &str) -> bool {
    finite_offset_cell(row.get(column))
}

/// Weight column value is finite.
pub fn finite_weight_in(row: &Row, column: &str) -> bool {
    finite_weight_cell(row.get(column))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tabular::Schema;
    use crate::dataset::vector::{FeatureVector, SparseVector};
    use std::sync::Arc;

    fn record(label: f64) -> Record {
        Record::new(label, SparseVector::zeros(4))
    }

    fn row(values: Vec<Value>) -> Row {
        let schema = Arc::new(Schema::new(["response", "features", "offset", "weight"]).unwrap());
        Row::new(schema, values).unwrap()
    }

    #[test]
    fn test_finite_label() {
        assert!(finite_label(&record(3.5)));
        assert!(!finite_label(&record(f64::NAN)));
        assert!(!finite_label(&record(f64::INFINITY)));
        assert!(!finite_label(&record(f64::NEG_INFINITY)));
    }

    #[test]
    fn test_binary_label() {
        assert!(binary_label(&record(POSITIVE_CLASS_LABEL)));
        assert!(binary_label(&record(NEGATIVE_CLASS_LABEL)));
        assert!(!binary_label(&record(2.0)));
        assert!(!binary_label(&record(0.5)));
        assert!(!binary_label(&record(f64::NAN)));
    }

    #[test]
    fn test_non_negative_label() {
        assert!(non_negative_label(&record(0.0)));
        assert!(non_negative_label(&record(7.0)));
        assert!(!non_negative_label(&record(-0.1)));
        assert!(!non_negative_label(&record(f64::NAN)));
    }

    #[test]
    fn test_finite_features() {
        let good = Record::new(1.0, SparseVector::new(3, vec![0, 2], vec![1.0, -4.0]).unwrap());
        let bad = Record::new(1.0, SparseVector::new(3, vec![1], vec![f64::NAN]).unwrap());
        assert!(finite_features(&good));
        assert!(!finite_features(&bad));
        assert!(finite_features(&record(1.0)));
    }

    #[test]
    fn test_finite_offset_and_weight() {
        assert!(finite_offset(&record(1.0)));
        assert!(finite_offset(&record(1.0).with_offset(-2.0)));
        assert!(!finite_offset(&record(1.0).with_offset(f64::INFINITY)));
        assert!(finite_weight(&record(1.0)));
        assert!(!finite_weight(&record(1.0).with_weight(f64::NAN)));
    }

    #[test]
    fn test_row_scalar_predicates() {
        let row = row(vec![
            Value::from(-1.0),
            Value::Null,
            Value::from(f64::NAN),
            Value::from(2_i64),
        ]);
        assert!(finite_label_in(&row, "response"));
        assert!(binary_label_in(&row, "response"));
        assert!(!non_negative_label_in(&row, "response"));
        assert!(!finite_offset_in(&row, "offset"));
        assert!(finite_weight_in(&row, "weight"));
    }

    #[test]
    fn test_row_missing_column_passes() {
        let row = row(vec![Value::from(1.0), Value::Null, Value::Null, Value::Null]);
        assert!(finite_weight_in(&row, "sample_weight"));
        assert!(finite_label_in(&row, "label"));
    }

    #[test]
    fn test_row_null_and_text_cells() {
        let row = row(vec![Value::Null, Value::from("abc"), Value::Null, Value::from("1.0")]);
        assert!(!finite_label_in(&row, "response"));
        assert!(!finite_features_in(&row, "features"));
        assert!(finite_offset_in(&row, "offset"));
        assert!(!finite_weight_in(&row, "weight"));
    }

    #[test]
    fn test_row_feature_vectors() {
        let dense = row(vec![
            Value::from(1.0),
            Value::from(FeatureVector::from(vec![1.0, f64::INFINITY])),
            Value::Null,
            Value::Null,
        ]);
        assert!(!finite_features_in(&dense, "features"));

        let sparse = row(vec![
            Value::from(1.0),
            Value::from(SparseVector::new(10, vec![3], vec![0.5]).unwrap()),
            Value::Null,
            Value::Null,
        ]);
        assert!(finite_features_in(&sparse, "features"));
    }
}
