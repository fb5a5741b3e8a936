//! Logical-to-physical column name mapping for tabular input.

use crate::core::constants::*;
use crate::core::types::ColumnRole;
use serde::{Deserialize, Serialize};

/// Physical column name for each logical role.
///
/// A role mapped to `None` is unmapped; checks reading it pass vacuously.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    /// Column holding the label
    pub label: Option<String>,
    /// Column holding the feature vector when no shards are configured
    pub features: Option<String>,
    /// Column holding the offset
    pub offset: Option<String>,
    /// Column holding the weight
    pub weight: Option<String>,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        ColumnMapping {
            label: Some(DEFAULT_LABEL_COLUMN.to_string()),
            features: Some(DEFAULT_FEATURES_COLUMN.to_string()),
            offset: Some(DEFAULT_OFFSET_COLUMN.to_string()),
            weight: Some(DEFAULT_WEIGHT_COLUMN.to_string()),
        }
    }
}

impl ColumnMapping {
    /// Mapping with every role unmapped.
    pub fn unmapped() -> Self {
        ColumnMapping {
            label: None,
            features: None,
            offset: None,
            weight: None,
        }
    }

    /// Physical column name for `role`, if mapped.
    pub fn physical(&self, role: ColumnRole) -> Option<&str> {
        self.slot(role).as_deref()
    }

    /// Map `role` to `name`.
    pub fn with<S: Into<String>>(mut self, role: ColumnRole, name: S) -> Self {
        *self.slot_mut(role) = Some(name.into());
        self
    }

    /// Leave `role` unmapped.
    pub fn without(mut self, role: ColumnRole) -> Self {
        *self.slot_mut(role) = None;
        self
    }

    /// Mapped roles and their physical names.
    pub fn iter(&self) -> impl Iterator<Item = (ColumnRole, &str)> + '_ {
        ColumnRole::ALL
            .into_iter()
            .filter_map(move |role| self.physical(role).map(|name| (role, name)))
    }

    /// Roles left unmapped.
    pub fn unmapped_roles(&self) -> impl Iterator<Item = ColumnRole> + '_ {
        ColumnRole::ALL
            .into_iter()
            .filter(move |&role| self.physical(role).is_none())
    }

    fn slot(&self, role: ColumnRole) -> &Option<String> {
        match role {
            ColumnRole::Label => &self.label,
            ColumnRole::Features => &self.features,
            ColumnRole::Offset => &self.offset,
            ColumnRole::Weight => &self.weight,
        }
    }

    fn slot_mut(&mut self, role: ColumnRole) -> &mut Option<String> {
        match role {
            ColumnRole::Label => &mut self.label,
            ColumnRole::Features => &mut self.features,
            ColumnRole::Offset => &mut self.offset,
            ColumnRole::Weight => &mut self.weight,
        }
    }
}
