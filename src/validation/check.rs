//! Checks: predicates paired with fixed diagnostic messages.
//!
//! [`Check`] enumerates every predicate the engine knows. For record input a
//! check is evaluated directly. For tabular input a [`TabularCheck`] names the
//! logical column role it reads, and is bound to a concrete dataset schema as
//! a [`BoundCheck`] before evaluation starts.

use crate::config::ColumnMapping;
use crate::core::constants::*;
use crate::core::traits::Predicate;
use crate::core::types::{ColumnRole, FeatureShardId};
use crate::dataset::record::Record;
use crate::dataset::tabular::{Row, Schema, Value};
use crate::validation::predicates;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One testable property of a training example.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Check {
    /// Label is neither NaN nor infinite
    FiniteLabel,
    /// Label is the positive or negative class label
    BinaryLabel,
    /// Label is at least zero
    NonNegativeLabel,
    /// Every feature value is finite
    FiniteFeatures,
    /// Offset is finite
    FiniteOffset,
    /// Weight is finite
    FiniteWeight,
}

impl Check {
    /// Every check variant.
    pub const ALL: [Check; 6] = [
        Check::FiniteLabel,
        Check::BinaryLabel,
        Check::NonNegativeLabel,
        Check::FiniteFeatures,
        Check::FiniteOffset,
        Check::FiniteWeight,
    ];

    /// Diagnostic message reported when this check fails.
    pub fn message(&self) -> &'static str {
        match self {
            Check::FiniteLabel => NON_FINITE_LABEL_MESSAGE,
            Check::BinaryLabel => NON_BINARY_LABEL_MESSAGE,
            Check::NonNegativeLabel => NEGATIVE_LABEL_MESSAGE,
            Check::FiniteFeatures => NON_FINITE_FEATURE_MESSAGE,
            Check::FiniteOffset => NON_FINITE_OFFSET_MESSAGE,
            Check::FiniteWeight => NON_FINITE_WEIGHT_MESSAGE,
        }
    }

    /// Logical column role read by this check.
    pub fn role(&self) -> ColumnRole {
        match self {
            Check::FiniteLabel | Check::BinaryLabel | Check::NonNegativeLabel => {
                ColumnRole::Label
            }
            Check::FiniteFeatures => ColumnRole::Features,
            Check::FiniteOffset => ColumnRole::Offset,
            Check::FiniteWeight => ColumnRole::Weight,
        }
    }

    /// Evaluate against a record.
    pub fn holds_for_record(&self, record: &Record) -> bool {
        match self {
            Check::FiniteLabel => predicates::finite_label(record),
            Check::BinaryLabel => predicates::binary_label(record),
            Check::NonNegativeLabel => predicates::non_negative_label(record),
            Check::FiniteFeatures => predicates::finite_features(record),
            Check::FiniteOffset => predicates::finite_offset(record),
            Check::FiniteWeight => predicates::finite_weight(record),
        }
    }

    /// Evaluate against a single cell; `None` means the column is absent.
    pub fn holds_for_cell(&self, cell: Option<&Value>) -> bool {
        match self {
            Check::FiniteLabel => predicates::finite_label_cell(cell),
            Check::BinaryLabel => predicates::binary_label_cell(cell),
            Check::NonNegativeLabel => predicates::non_negative_label_cell(cell),
            Check::FiniteFeatures => predicates::finite_features_cell(cell),
            Check::FiniteOffset => predicates::finite_offset_cell(cell),
            Check::FiniteWeight => predicates::finite_weight_cell(cell),
        }
    }

    /// Evaluate against a named column of a row.
    pub fn holds_for_row(&self, row: &Row, column: &str) -> bool {
        self.holds_for_cell(row.get(column))
    }
}

impl Predicate<Record> for Check {
    fn holds(&self, record: &Record) -> bool {
        self.holds_for_record(record)
    }

    fn message(&self) -> &str {
        Check::message(self)
    }
}

/// A check applied to tabular rows through a logical column role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabularCheck {
    /// Predicate to evaluate
    pub check: Check,
    /// Logical column the predicate reads
    pub role: ColumnRole,
}

impl TabularCheck {
    /// Pair a check with the role it naturally reads.
    pub fn new(check: Check) -> Self {
        TabularCheck {
            check,
            role: check.role(),
        }
    }

    /// Diagnostic message reported when this check fails.
    pub fn message(&self) -> &'static str {
        self.check.message()
    }

    /// Resolve physical column positions against a dataset schema.
    ///
    /// The features role fans out to one column per feature shard; when no
    /// shards are configured the mapped features column is used instead.
    /// Columns missing from the schema are dropped, and a check left with no
    /// column passes vacuously.
    pub fn bind(
        &self,
        schema: &Schema,
        mapping: &ColumnMapping,
        feature_shards: &BTreeSet<FeatureShardId>,
    ) -> BoundCheck {
        let candidates: Vec<&str> = match self.role {
            ColumnRole::Features if !feature_shards.is_empty() => {
                feature_shards.iter().map(String::as_str).collect()
            }
            role => mapping.physical(role).into_iter().collect(),
        };

        let mut columns = Vec::with_capacity(candidates.len());
        for name in candidates {
            match schema.index_of(name) {
                Some(position) => columns.push(position),
                None => log::warn!(
                    "Column '{}' for {} check is absent; treating it as passing",
                    name,
                    self.role
                ),
            }
        }
        if columns.is_empty() {
            log::debug!("{:?} check bound to no columns", self.check);
        }

        BoundCheck {
            check: self.check,
            columns,
        }
    }
}

/// A tabular check resolved to column positions of one schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundCheck {
    check: Check,
    columns: Vec<usize>,
}

impl BoundCheck {
    /// Underlying check.
    pub fn check(&self) -> Check {
        self.check
    }

    /// Resolved column positions; more than one for fanned-out feature shards.
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    /// Whether the check passes without reading any data.
    pub fn is_vacuous(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Predicate<Row> for BoundCheck {
    fn holds(&self, row: &Row) -> bool {
        self.columns
            .iter()
            .all(|&position| self.check.holds_for_cell(row.value_at(position)))
    }

    fn message(&self) -> &str {
        self.check.message()
    }
}

static_assertions::assert_impl_all!(Check: Send, Sync);
static_assertions::assert_impl_all!(BoundCheck: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::vector::FeatureVector;
    use std::sync::Arc;

    fn schema() -> Schema {
        Schema::new(["response", "global", "per_user", "weight"]).unwrap()
    }

    #[test]
    fn test_messages_are_distinct() {
        let messages: BTreeSet<&str> = Check::ALL.iter().map(Check::message).collect();
        assert_eq!(messages.len(), Check::ALL.len());
    }

    #[test]
    fn test_roles() {
        assert_eq!(Check::NonNegativeLabel.role(), ColumnRole::Label);
        assert_eq!(Check::FiniteFeatures.role(), ColumnRole::Features);
        assert_eq!(TabularCheck::new(Check::FiniteWeight).role, ColumnRole::Weight);
    }

    #[test]
    fn test_bind_scalar_column() {
        let bound = TabularCheck::new(Check::FiniteWeight).bind(
            &schema(),
            &ColumnMapping::default(),
            &BTreeSet::new(),
        );
        assert_eq!(bound.columns(), &[3]);
        assert!(!bound.is_vacuous());
    }

    #[test]
    fn test_bind_missing_column_is_vacuous() {
        let bound = TabularCheck::new(Check::FiniteOffset).bind(
            &schema(),
            &ColumnMapping::default(),
            &BTreeSet::new(),
        );
        assert!(bound.is_vacuous());

        let unmapped = ColumnMapping::default().without(ColumnRole::Weight);
        let bound = TabularCheck::new(Check::FiniteWeight).bind(&schema(), &unmapped, &BTreeSet::new());
        assert!(bound.is_vacuous());
    }

    #[test]
    fn test_bind_fans_out_feature_shards() {
        let shards: BTreeSet<String> = ["global", "per_user", "per_item"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let bound = TabularCheck::new(Check::FiniteFeatures).bind(
            &schema(),
            &ColumnMapping::default(),
            &shards,
        );
        assert_eq!(bound.columns(), &[1, 2]);

        let schema = Arc::new(schema());
        let good = Row::new(
            Arc::clone(&schema),
            vec![
                Value::from(1.0),
                Value::from(FeatureVector::from(vec![1.0])),
                Value::from(FeatureVector::from(vec![2.0])),
                Value::from(1.0),
            ],
        )
        .unwrap();
        let bad = Row::new(
            schema,
            vec![
                Value::from(1.0),
                Value::from(FeatureVector::from(vec![1.0])),
                Value::from(FeatureVector::from(vec![f64::NAN])),
                Value::from(1.0),
            ],
        )
        .unwrap();

        assert!(bound.holds(&good));
        assert!(!bound.holds(&bad));
        assert_eq!(Predicate::message(&bound), NON_FINITE_FEATURE_MESSAGE);
    }
}
