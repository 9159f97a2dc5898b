//! Condition deduplication: grouping raw run indices into equivalence
//! classes by (temperature, field) value.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use spinpost_core::{Condition, ConditionKey, ErrorInfo, SpinpostError};

use crate::config::GroupingStrategy;

/// A non-empty set of raw run indices sharing one condition.
///
/// Members are sorted ascending; classes partition the run index range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquivalenceClass {
    /// Representative condition (the smallest member's).
    pub condition: Condition,
    /// Ascending member run indices.
    pub members: Vec<usize>,
}

/// Groups the per-run conditions into equivalence classes.
///
/// Classes are ordered by their smallest member index. The result is
/// verified: every class is internally condition-consistent and the classes
/// partition `[0, num_runs)` exactly.
pub fn group_conditions(
    conditions: &[Condition],
    strategy: GroupingStrategy,
) -> Result<Vec<EquivalenceClass>, SpinpostError> {
    let member_sets = match strategy {
        GroupingStrategy::ContiguousRuns => contiguous_runs(conditions),
        GroupingStrategy::ByValue => by_value(conditions),
    };
    let classes: Vec<EquivalenceClass> = member_sets
        .into_iter()
        .map(|members| EquivalenceClass {
            condition: conditions[members[0]],
            members,
        })
        .collect();
    verify_classes(&classes, conditions)?;
    Ok(classes)
}

/// Maximal contiguous equal-condition runs, taken in both scan directions
/// and unioned per index.
///
/// This reproduces the historical analyzer behavior: repeated conditions
/// are assumed to occur as contiguous blocks (a hysteresis loop revisiting
/// a field value produces a new block, never an interleaving). Two
/// non-adjacent blocks with the same condition are NOT merged; use
/// [`GroupingStrategy::ByValue`] when that merge is wanted.
fn contiguous_runs(conditions: &[Condition]) -> Vec<Vec<usize>> {
    let n = conditions.len();
    let mut forward: Vec<BTreeSet<usize>> = (0..n).map(|i| BTreeSet::from([i])).collect();
    for i in 0..n {
        for j in i + 1..n {
            if conditions[j] != conditions[i] {
                break;
            }
            forward[i].insert(j);
        }
    }
    let mut backward: Vec<BTreeSet<usize>> = (0..n).map(|i| BTreeSet::from([i])).collect();
    for i in 0..n {
        for j in (0..i).rev() {
            if conditions[j] != conditions[i] {
                break;
            }
            backward[i].insert(j);
        }
    }

    // Canonicalize each per-index union, then deduplicate across indices.
    let mut distinct: BTreeSet<Vec<usize>> = BTreeSet::new();
    for i in 0..n {
        let members: Vec<usize> = forward[i].union(&backward[i]).copied().collect();
        distinct.insert(members);
    }
    let mut classes: Vec<Vec<usize>> = distinct.into_iter().collect();
    classes.sort_by_key(|members| members[0]);
    classes
}

/// Groups equal conditions wherever they occur, in first-occurrence order.
fn by_value(conditions: &[Condition]) -> Vec<Vec<usize>> {
    let mut groups: IndexMap<ConditionKey, Vec<usize>> = IndexMap::new();
    for (index, condition) in conditions.iter().enumerate() {
        groups.entry(condition.key()).or_default().push(index);
    }
    groups.into_values().collect()
}

/// Verifies class integrity and the partition property.
///
/// Integrity: every member of a class carries a condition bit-identical to
/// the class representative. Partition: every run index appears in exactly
/// one class. Both violations are fatal data-integrity errors.
pub fn verify_classes(
    classes: &[EquivalenceClass],
    conditions: &[Condition],
) -> Result<(), SpinpostError> {
    let mut seen = vec![false; conditions.len()];
    for (class_index, class) in classes.iter().enumerate() {
        if class.members.is_empty() {
            return Err(SpinpostError::Integrity(
                ErrorInfo::new("empty-class", "equivalence class has no members")
                    .with_context("class", class_index.to_string()),
            ));
        }
        for &member in &class.members {
            let condition = conditions.get(member).copied().ok_or_else(|| {
                SpinpostError::Integrity(
                    ErrorInfo::new("member-out-of-range", "class member exceeds run count")
                        .with_context("class", class_index.to_string())
                        .with_context("member", member.to_string())
                        .with_context("num_runs", conditions.len().to_string()),
                )
            })?;
            if condition != class.condition {
                return Err(SpinpostError::Integrity(
                    ErrorInfo::new(
                        "condition-mismatch",
                        "class members carry differing (temperature, field) values",
                    )
                    .with_context("class", class_index.to_string())
                    .with_context("member", member.to_string())
                    .with_context(
                        "expected",
                        format!("({}, {})", class.condition.temperature, class.condition.field),
                    )
                    .with_context(
                        "got",
                        format!("({}, {})", condition.temperature, condition.field),
                    ),
                ));
            }
            if seen[member] {
                return Err(SpinpostError::Integrity(
                    ErrorInfo::new("partition-violation", "run index appears in two classes")
                        .with_context("member", member.to_string()),
                ));
            }
            seen[member] = true;
        }
    }
    if let Some(missing) = seen.iter().position(|covered| !covered) {
        return Err(SpinpostError::Integrity(
            ErrorInfo::new("partition-violation", "run index is not covered by any class")
                .with_context("member", missing.to_string()),
        ));
    }
    Ok(())
}
