use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::admissions::domain::{
    CategoryFilter, CategoryKey, CollegeQuery, Offering, OfferingFilter, Rank,
};
use crate::admissions::engine::RankingEngine;
use crate::admissions::repository::{OfferingStore, StoreError};
use crate::admissions::{finder_router, CollegeFinderService, EligibilityWindow};

pub(super) fn offering(inst: &str, branch: &str, oc_boys: Option<u32>) -> Offering {
    let offering = Offering::new(inst, branch, "GTR", "AU");
    match oc_boys {
        Some(cutoff) => offering.with_cutoff(CategoryKey::OcBoys, cutoff),
        None => offering,
    }
}

/// Mixed catalog across two regions with a duplicate raw record for VVIT/CSE.
pub(super) fn catalog() -> Vec<Offering> {
    vec![
        Offering::new("VVIT", "CSE", "GTR", "AU")
            .with_name("Vasireddy Venkatadri Institute")
            .with_cutoff(CategoryKey::OcBoys, 14_500)
            .with_cutoff(CategoryKey::BcaGirls, 21_000),
        Offering::new("KITS", "CSE", "GTR", "AU").with_cutoff(CategoryKey::OcBoys, 11_200),
        Offering::new("VVIT", "CSE", "GTR", "AU")
            .with_name("stale duplicate")
            .with_cutoff(CategoryKey::OcBoys, 13_900),
        Offering::new("KITS", "ECE", "GTR", "AU").with_cutoff(CategoryKey::OcBoys, 24_800),
        Offering::new("SVEC", "CSE", "CTR", "SVU").with_cutoff(CategoryKey::OcBoys, 19_000),
        Offering::new("ANUC", "CSE", "GTR", "AU"),
        Offering::new("RVRJ", "CSE", "GTR", "AU").with_cutoff(CategoryKey::OcBoys, 9_800),
    ]
}

pub(super) fn query(rank: u32, category: CategoryFilter) -> CollegeQuery {
    CollegeQuery::new(Rank::new(rank).expect("non-zero rank"), category)
}

pub(super) fn oc_boys(rank: u32) -> CollegeQuery {
    query(rank, CategoryFilter::Only(CategoryKey::OcBoys))
}

pub(super) fn build_service(
    offerings: Vec<Offering>,
) -> (CollegeFinderService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new(offerings));
    let service = CollegeFinderService::new(store.clone(), RankingEngine::default());
    (service, store)
}

pub(super) fn router_with(offerings: Vec<Offering>) -> axum::Router {
    let (service, _) = build_service(offerings);
    finder_router(Arc::new(service))
}

pub(super) fn engine_with_margin(margin: u32) -> RankingEngine {
    RankingEngine::new(EligibilityWindow::with_margin(margin))
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&bytes).expect("json body")
}

pub(super) fn assert_status(response: &Response, status: StatusCode) {
    assert_eq!(response.status(), status);
}

/// Store double that filters like the real store and records every filter it was asked for.
#[derive(Default)]
pub(super) struct MemoryStore {
    offerings: Vec<Offering>,
    pub(super) requests: Mutex<Vec<OfferingFilter>>,
}

impl MemoryStore {
    pub(super) fn new(offerings: Vec<Offering>) -> Self {
        Self {
            offerings,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn request_count(&self) -> usize {
        self.requests.lock().expect("store mutex poisoned").len()
    }
}

impl OfferingStore for MemoryStore {
    fn find_matching(&self, filter: &OfferingFilter) -> Result<Vec<Offering>, StoreError> {
        self.requests
            .lock()
            .expect("store mutex poisoned")
            .push(filter.clone());
        Ok(self
            .offerings
            .iter()
            .filter(|offering| filter.matches(offering))
            .cloned()
            .collect())
    }
}

/// Store double whose backing database is offline.
pub(super) struct UnavailableStore;

impl OfferingStore for UnavailableStore {
    fn find_matching(&self, _filter: &OfferingFilter) -> Result<Vec<Offering>, StoreError> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }
}
