use std::collections::{BTreeSet, HashSet};

use serde::{Serialize, Serializer};

use super::domain::{InstitutionCode, Offering};

/// Headline numbers for the landing page.
///
/// Serialized in the camelCase shape the browser client reads, with `topCollege` rendered as
/// the institution's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogStats {
    pub total_colleges: usize,
    pub total_offerings: usize,
    pub districts: Vec<String>,
    pub regions: Vec<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_top_college"
    )]
    pub top_college: Option<TopCollege>,
}

/// Institution holding the lowest published cutoff in any category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopCollege {
    pub institution_code: InstitutionCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub best_cutoff: u32,
}

impl TopCollege {
    /// Name shown to users, falling back to the institution code when the catalog has none.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.institution_code.0)
    }
}

fn serialize_top_college<S: Serializer>(
    top: &Option<TopCollege>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match top {
        Some(top) => serializer.serialize_str(top.display_name()),
        None => serializer.serialize_none(),
    }
}

impl CatalogStats {
    pub fn from_offerings<'a, I>(offerings: I) -> Self
    where
        I: IntoIterator<Item = &'a Offering>,
    {
        let mut institutions = HashSet::new();
        let mut offering_keys = HashSet::new();
        let mut districts = BTreeSet::new();
        let mut regions = BTreeSet::new();
        let mut top_college: Option<TopCollege> = None;

        for offering in offerings {
            institutions.insert(&offering.institution_code);
            offering_keys.insert(offering.key());
            districts.insert(offering.location.district.clone());
            regions.insert(offering.location.region.clone());

            let Some(best) = offering.cutoffs.best() else {
                continue;
            };
            let improves = top_college
                .as_ref()
                .map_or(true, |current| best < current.best_cutoff);
            if improves {
                top_college = Some(TopCollege {
                    institution_code: offering.institution_code.clone(),
                    name: offering.details.name.clone(),
                    best_cutoff: best,
                });
            }
        }

        Self {
            total_colleges: institutions.len(),
            total_offerings: offering_keys.len(),
            districts: districts.into_iter().collect(),
            regions: regions.into_iter().collect(),
            top_college,
        }
    }
}
