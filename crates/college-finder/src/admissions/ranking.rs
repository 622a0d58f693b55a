use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;

use super::domain::Offering;
use super::eligibility::AdmissionChance;

/// An offering annotated with the cutoff that matters for the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedResult {
    #[serde(flatten)]
    pub offering: Offering,
    pub selected_cutoff: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chance: Option<AdmissionChance>,
}

impl RankedResult {
    pub fn new(offering: Offering, selected_cutoff: Option<u32>) -> Self {
        Self {
            offering,
            selected_cutoff,
            chance: None,
        }
    }
}

/// Keeps the first record for every `(institution, branch)` pair, preserving input order.
pub fn dedupe(results: Vec<RankedResult>) -> Vec<RankedResult> {
    let mut seen = HashSet::with_capacity(results.len());
    results
        .into_iter()
        .filter(|result| {
            seen.insert((
                result.offering.institution_code.clone(),
                result.offering.branch_code.clone(),
            ))
        })
        .collect()
}

/// Ascending by cutoff; a missing cutoff sorts after any present one and two missing
/// cutoffs compare equal.
pub fn compare_cutoffs(a: Option<u32>, b: Option<u32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable sort by [`compare_cutoffs`]; ties keep their incoming order.
pub fn order(results: &mut [RankedResult]) {
    results.sort_by(|a, b| compare_cutoffs(a.selected_cutoff, b.selected_cutoff));
}
