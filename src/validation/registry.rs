//! Validator sets per training task.
//!
//! Each task type maps to a static, ordered list of checks: its label
//! constraints first, followed by the checks every task shares. This is the
//! only place task-type exhaustiveness is enforced.

use crate::core::error::{Result, SanityError};
use crate::core::types::TaskType;
use crate::validation::check::{Check, TabularCheck};

/// Checks applied regardless of task.
const BASE_CHECKS: &[Check] = &[Check::FiniteFeatures, Check::FiniteOffset, Check::FiniteWeight];

const FINITE_LABEL_CHECKS: &[Check] = &[Check::FiniteLabel];
const BINARY_LABEL_CHECKS: &[Check] = &[Check::BinaryLabel];
const COUNT_LABEL_CHECKS: &[Check] = &[Check::FiniteLabel, Check::NonNegativeLabel];

fn label_checks(task_type: TaskType) -> Result<&'static [Check]> {
    match task_type {
        TaskType::LinearRegression => Ok(FINITE_LABEL_CHECKS),
        TaskType::LogisticRegression | TaskType::SmoothedHingeSvm => Ok(BINARY_LABEL_CHECKS),
        TaskType::PoissonRegression => Ok(COUNT_LABEL_CHECKS),
        TaskType::None => Err(SanityError::unsupported_task_type(task_type.as_str())),
    }
}

/// Ordered checks for record input.
pub fn checks_for(task_type: TaskType) -> Result<Vec<Check>> {
    let label = label_checks(task_type)?;
    Ok(label.iter().chain(BASE_CHECKS).copied().collect())
}

/// Ordered checks for tabular input, each bound to a logical column role.
pub fn checks_for_tabular(task_type: TaskType) -> Result<Vec<TabularCheck>> {
    Ok(checks_for(task_type)?
        .into_iter()
        .map(TabularCheck::new)
        .collect())
}
