use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for an institution (`INSTCODE` in the source data).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstitutionCode(pub String);

/// Identifier wrapper for a degree program offered by an institution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BranchCode(pub String);

impl fmt::Display for InstitutionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl fmt::Display for BranchCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Reservation category crossed with gender, the closed set of cutoff columns.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryKey {
    OcBoys,
    OcGirls,
    ScBoys,
    ScGirls,
    StBoys,
    StGirls,
    BcaBoys,
    BcaGirls,
    BcbBoys,
    BcbGirls,
    BccBoys,
    BccGirls,
    BcdBoys,
    BcdGirls,
    BceBoys,
    BceGirls,
    OcEwsBoys,
    OcEwsGirls,
}

impl CategoryKey {
    pub const ALL: [CategoryKey; 18] = [
        CategoryKey::OcBoys,
        CategoryKey::OcGirls,
        CategoryKey::ScBoys,
        CategoryKey::ScGirls,
        CategoryKey::StBoys,
        CategoryKey::StGirls,
        CategoryKey::BcaBoys,
        CategoryKey::BcaGirls,
        CategoryKey::BcbBoys,
        CategoryKey::BcbGirls,
        CategoryKey::BccBoys,
        CategoryKey::BccGirls,
        CategoryKey::BcdBoys,
        CategoryKey::BcdGirls,
        CategoryKey::BceBoys,
        CategoryKey::BceGirls,
        CategoryKey::OcEwsBoys,
        CategoryKey::OcEwsGirls,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKey::OcBoys => "OC_BOYS",
            CategoryKey::OcGirls => "OC_GIRLS",
            CategoryKey::ScBoys => "SC_BOYS",
            CategoryKey::ScGirls => "SC_GIRLS",
            CategoryKey::StBoys => "ST_BOYS",
            CategoryKey::StGirls => "ST_GIRLS",
            CategoryKey::BcaBoys => "BCA_BOYS",
            CategoryKey::BcaGirls => "BCA_GIRLS",
            CategoryKey::BcbBoys => "BCB_BOYS",
            CategoryKey::BcbGirls => "BCB_GIRLS",
            CategoryKey::BccBoys => "BCC_BOYS",
            CategoryKey::BccGirls => "BCC_GIRLS",
            CategoryKey::BcdBoys => "BCD_BOYS",
            CategoryKey::BcdGirls => "BCD_GIRLS",
            CategoryKey::BceBoys => "BCE_BOYS",
            CategoryKey::BceGirls => "BCE_GIRLS",
            CategoryKey::OcEwsBoys => "OC_EWS_BOYS",
            CategoryKey::OcEwsGirls => "OC_EWS_GIRLS",
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Returned when a string does not name one of the eighteen category keys.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category '{0}'")]
pub struct UnknownCategoryKey(pub String);

impl FromStr for CategoryKey {
    type Err = UnknownCategoryKey;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_uppercase();
        CategoryKey::ALL
            .into_iter()
            .find(|key| key.as_str() == normalized)
            .ok_or_else(|| UnknownCategoryKey(raw.to_string()))
    }
}

/// Historical cutoff ranks keyed by category; a missing key means no cutoff was published.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CutoffTable(BTreeMap<CategoryKey, u32>);

impl CutoffTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: CategoryKey) -> Option<u32> {
        self.0.get(&category).copied()
    }

    pub fn insert(&mut self, category: CategoryKey, cutoff: u32) -> Option<u32> {
        self.0.insert(category, cutoff)
    }

    pub fn with(mut self, category: CategoryKey, cutoff: u32) -> Self {
        self.insert(category, cutoff);
        self
    }

    /// Lowest cutoff across every category, i.e. the most competitive seat.
    pub fn best(&self) -> Option<u32> {
        self.0.values().copied().min()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CategoryKey, u32)> + '_ {
        self.0.iter().map(|(key, cutoff)| (*key, *cutoff))
    }
}

impl FromIterator<(CategoryKey, u32)> for CutoffTable {
    fn from_iter<T: IntoIterator<Item = (CategoryKey, u32)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Where an institution sits: district code (`DIST`) and university region (`REG`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    #[serde(rename = "DIST")]
    pub district: String,
    #[serde(rename = "REG")]
    pub region: String,
}

/// Descriptive attributes passed through to results untouched, under the catalog's column names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CollegeDetails {
    #[serde(rename = "COLLEGE", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "TYPE", skip_serializing_if = "Option::is_none")]
    pub institution_type: Option<String>,
    #[serde(rename = "PLACE", skip_serializing_if = "Option::is_none")]
    pub place: Option<String>,
    #[serde(rename = "COED", skip_serializing_if = "Option::is_none")]
    pub coed: Option<String>,
    #[serde(rename = "AFF", skip_serializing_if = "Option::is_none")]
    pub affiliation: Option<String>,
    #[serde(rename = "ESTD", skip_serializing_if = "Option::is_none")]
    pub established: Option<u16>,
    #[serde(rename = "COLLFEE", skip_serializing_if = "Option::is_none")]
    pub annual_fee: Option<u32>,
}

/// One college-branch admission option.
///
/// Serializes to the same document shape the catalog is imported from, so browser clients
/// read `INSTCODE`, `DIST`, `REG` and friends off every result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Offering {
    #[serde(rename = "INSTCODE")]
    pub institution_code: InstitutionCode,
    pub branch_code: BranchCode,
    #[serde(flatten)]
    pub location: Location,
    #[serde(flatten)]
    pub details: CollegeDetails,
    pub cutoffs: CutoffTable,
}

impl Offering {
    pub fn new(
        institution_code: impl Into<String>,
        branch_code: impl Into<String>,
        district: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            institution_code: InstitutionCode(institution_code.into()),
            branch_code: BranchCode(branch_code.into()),
            location: Location {
                district: district.into(),
                region: region.into(),
            },
            details: CollegeDetails::default(),
            cutoffs: CutoffTable::new(),
        }
    }

    pub fn with_cutoff(mut self, category: CategoryKey, cutoff: u32) -> Self {
        self.cutoffs.insert(category, cutoff);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.details.name = Some(name.into());
        self
    }

    /// Identity used for deduplication within a result set.
    pub fn key(&self) -> (&InstitutionCode, &BranchCode) {
        (&self.institution_code, &self.branch_code)
    }
}

/// Candidate rank in the admission exam; always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rank(NonZeroU32);

impl Rank {
    /// Rank assumed when the caller does not supply one.
    pub const DEFAULT: Rank = match NonZeroU32::new(10_000) {
        Some(value) => Rank(value),
        None => panic!("default rank must be non-zero"),
    };

    pub fn new(value: u32) -> Option<Self> {
        NonZeroU32::new(value).map(Self)
    }

    pub fn get(&self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category selection: either a single key or no cutoff-based filtering at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(CategoryKey),
}

impl Serialize for CategoryFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CategoryFilter::All => serializer.serialize_str("ALL"),
            CategoryFilter::Only(key) => serializer.serialize_str(key.as_str()),
        }
    }
}

impl CategoryFilter {
    pub fn category(&self) -> Option<CategoryKey> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(key) => Some(*key),
        }
    }
}

/// Conjunctive exact-match predicate over branch, district, and region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OfferingFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<BranchCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl OfferingFilter {
    pub fn matches(&self, offering: &Offering) -> bool {
        self.branch
            .as_ref()
            .map_or(true, |branch| *branch == offering.branch_code)
            && self
                .district
                .as_deref()
                .map_or(true, |district| district == offering.location.district)
            && self
                .region
                .as_deref()
                .map_or(true, |region| region == offering.location.region)
    }
}

/// Validated per-request query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollegeQuery {
    pub rank: Rank,
    pub category: CategoryFilter,
    pub filter: OfferingFilter,
}

impl CollegeQuery {
    pub fn new(rank: Rank, category: CategoryFilter) -> Self {
        Self {
            rank,
            category,
            filter: OfferingFilter::default(),
        }
    }

    pub fn with_filter(mut self, filter: OfferingFilter) -> Self {
        self.filter = filter;
        self
    }
}
