use super::domain::{Offering, OfferingFilter};

/// Record store holding the raw offering documents.
///
/// Implementations return every record matching the filter, duplicates included, in their own
/// natural order; the ranking engine relies on that order when collapsing duplicates.
pub trait OfferingStore: Send + Sync {
    fn find_matching(&self, filter: &OfferingFilter) -> Result<Vec<Offering>, StoreError>;
}

/// Error enumeration for record store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("record store unavailable: {0}")]
    Unavailable(String),
}
