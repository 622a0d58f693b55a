use super::domain::{CollegeQuery, Offering};
use super::eligibility::{self, AdmissionChance, EligibilityWindow};
use super::ranking::{self, RankedResult};

/// Stateless ranker that turns a record set and a query into an ordered result list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankingEngine {
    window: EligibilityWindow,
}

impl RankingEngine {
    pub fn new(window: EligibilityWindow) -> Self {
        Self { window }
    }

    pub fn window(&self) -> &EligibilityWindow {
        &self.window
    }

    /// Runs the full pipeline: hard filters, cutoff selection, eligibility, dedup, ordering.
    ///
    /// The input order matters: when two raw records describe the same offering the first one
    /// survives deduplication.
    pub fn query<I>(&self, offerings: I, query: &CollegeQuery) -> Vec<RankedResult>
    where
        I: IntoIterator<Item = Offering>,
    {
        let annotated = offerings
            .into_iter()
            .filter(|offering| query.filter.matches(offering))
            .map(|offering| {
                let cutoff = eligibility::selected_cutoff(&offering, query.category);
                (offering, cutoff)
            })
            .filter(|(_, cutoff)| eligibility::admits_cutoff(*cutoff, query, &self.window))
            .map(|(offering, cutoff)| RankedResult::new(offering, cutoff))
            .collect();

        let mut results = ranking::dedupe(annotated);
        ranking::order(&mut results);

        for result in &mut results {
            result.chance = result
                .selected_cutoff
                .map(|cutoff| AdmissionChance::classify(query.rank, cutoff));
        }

        results
    }
}
