use serde::{Deserialize, Serialize};

use crate::admissions::domain::Rank;

/// Width added to the candidate's rank to form the upper end of the window.
pub const DEFAULT_CUTOFF_MARGIN: u32 = 15_000;

/// Where the lower end of the eligibility window comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LowerBound {
    /// Cutoffs better than the candidate's own rank are out of reach.
    QueryRank,
    /// A constant floor, independent of the rank.
    Fixed(u32),
}

/// Inclusive `[lower, rank + margin]` window a cutoff has to fall into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityWindow {
    pub margin: u32,
    pub lower_bound: LowerBound,
}

impl Default for EligibilityWindow {
    fn default() -> Self {
        Self {
            margin: DEFAULT_CUTOFF_MARGIN,
            lower_bound: LowerBound::QueryRank,
        }
    }
}

impl EligibilityWindow {
    pub fn with_margin(margin: u32) -> Self {
        Self {
            margin,
            ..Self::default()
        }
    }

    pub fn lower(&self, rank: Rank) -> u32 {
        match self.lower_bound {
            LowerBound::QueryRank => rank.get(),
            LowerBound::Fixed(floor) => floor,
        }
    }

    pub fn upper(&self, rank: Rank) -> u32 {
        rank.get().saturating_add(self.margin)
    }

    pub fn contains(&self, rank: Rank, cutoff: u32) -> bool {
        (self.lower(rank)..=self.upper(rank)).contains(&cutoff)
    }
}
