use std::sync::Arc;

use tracing::debug;

use super::domain::{CollegeQuery, OfferingFilter};
use super::engine::RankingEngine;
use super::query::{QueryError, QueryParams};
use super::ranking::RankedResult;
use super::repository::{OfferingStore, StoreError};
use super::stats::CatalogStats;

/// Service composing query validation, the record store, and the ranking engine.
pub struct CollegeFinderService<S> {
    store: Arc<S>,
    engine: RankingEngine,
}

impl<S> CollegeFinderService<S>
where
    S: OfferingStore + 'static,
{
    pub fn new(store: Arc<S>, engine: RankingEngine) -> Self {
        Self { store, engine }
    }

    pub fn engine(&self) -> &RankingEngine {
        &self.engine
    }

    /// Validate raw parameters, then run the query. Nothing reaches the store on bad input.
    pub fn find(&self, params: &QueryParams) -> Result<Vec<RankedResult>, FinderServiceError> {
        let query = params.parse()?;
        self.run(&query)
    }

    /// Query the store with the hard filters and rank whatever comes back.
    pub fn run(&self, query: &CollegeQuery) -> Result<Vec<RankedResult>, FinderServiceError> {
        let candidates = self.store.find_matching(&query.filter)?;
        let fetched = candidates.len();
        let results = self.engine.query(candidates, query);

        debug!(
            rank = query.rank.get(),
            category = ?query.category,
            fetched,
            returned = results.len(),
            "college query ranked"
        );

        Ok(results)
    }

    /// Headline statistics over the whole catalog.
    pub fn stats(&self) -> Result<CatalogStats, FinderServiceError> {
        let offerings = self.store.find_matching(&OfferingFilter::default())?;
        Ok(CatalogStats::from_offerings(&offerings))
    }
}

/// Error raised by the finder service.
#[derive(Debug, thiserror::Error)]
pub enum FinderServiceError {
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Store(#[from] StoreError),
}
