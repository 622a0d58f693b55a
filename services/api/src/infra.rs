use college_finder::admissions::{
    CatalogImporter, Offering, OfferingFilter, OfferingStore, StoreError,
};
use college_finder::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Read-only catalog held in memory; every query sees the same snapshot.
#[derive(Default, Clone)]
pub(crate) struct InMemoryOfferingStore {
    offerings: Arc<Vec<Offering>>,
}

impl InMemoryOfferingStore {
    pub(crate) fn new(offerings: Vec<Offering>) -> Self {
        Self {
            offerings: Arc::new(offerings),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.offerings.len()
    }
}

impl OfferingStore for InMemoryOfferingStore {
    fn find_matching(&self, filter: &OfferingFilter) -> Result<Vec<Offering>, StoreError> {
        Ok(self
            .offerings
            .iter()
            .filter(|offering| filter.matches(offering))
            .cloned()
            .collect())
    }
}

pub(crate) fn load_store(path: Option<&Path>) -> Result<InMemoryOfferingStore, AppError> {
    match path {
        Some(path) => Ok(InMemoryOfferingStore::new(CatalogImporter::from_path(path)?)),
        None => {
            warn!("no catalog configured; serving an empty college list");
            Ok(InMemoryOfferingStore::default())
        }
    }
}
