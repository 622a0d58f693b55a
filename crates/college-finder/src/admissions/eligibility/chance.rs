use serde::Serialize;

use crate::admissions::domain::Rank;

/// Rough likelihood of admission given how far the rank sits below the cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmissionChance {
    Safe,
    Moderate,
    Risky,
}

impl AdmissionChance {
    /// `rank <= cutoff / 2` is safe, `rank <= 0.8 * cutoff` is moderate, anything else risky.
    pub fn classify(rank: Rank, cutoff: u32) -> Self {
        let rank = u64::from(rank.get());
        let cutoff = u64::from(cutoff);

        if 2 * rank <= cutoff {
            AdmissionChance::Safe
        } else if 5 * rank <= 4 * cutoff {
            AdmissionChance::Moderate
        } else {
            AdmissionChance::Risky
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AdmissionChance::Safe => "safe",
            AdmissionChance::Moderate => "moderate",
            AdmissionChance::Risky => "risky",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rank(value: u32) -> Rank {
        Rank::new(value).expect("non-zero rank")
    }

    #[test]
    fn thresholds_are_inclusive() {
        let cases = [
            (5_000, AdmissionChance::Safe),
            (5_001, AdmissionChance::Moderate),
            (8_000, AdmissionChance::Moderate),
            (8_001, AdmissionChance::Risky),
        ];
        for (candidate, expected) in cases {
            assert_eq!(AdmissionChance::classify(rank(candidate), 10_000), expected);
        }
    }

    #[test]
    fn zero_cutoff_is_always_risky() {
        assert_eq!(AdmissionChance::classify(rank(1), 0), AdmissionChance::Risky);
    }
}
