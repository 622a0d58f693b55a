//! College-branch eligibility search: query validation, cutoff windows, deduplication, and
//! competitiveness ordering, plus the record-store seam and HTTP routes around them.

pub mod catalog;
pub mod domain;
pub mod eligibility;
pub mod engine;
pub mod query;
pub mod ranking;
pub mod repository;
pub mod router;
pub mod service;
pub mod stats;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogError, CatalogFormat, CatalogImporter};
pub use domain::{
    BranchCode, CategoryFilter, CategoryKey, CollegeDetails, CollegeQuery, CutoffTable,
    InstitutionCode, Location, Offering, OfferingFilter, Rank,
};
pub use eligibility::{AdmissionChance, EligibilityWindow, LowerBound, DEFAULT_CUTOFF_MARGIN};
pub use engine::RankingEngine;
pub use query::{QueryError, QueryParams};
pub use ranking::RankedResult;
pub use repository::{OfferingStore, StoreError};
pub use router::finder_router;
pub use service::{CollegeFinderService, FinderServiceError};
pub use stats::{CatalogStats, TopCollege};
