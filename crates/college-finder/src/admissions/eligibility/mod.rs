mod chance;
mod window;

pub use chance::AdmissionChance;
pub use window::{EligibilityWindow, LowerBound, DEFAULT_CUTOFF_MARGIN};

use super::domain::{CategoryFilter, CollegeQuery, Offering};

/// Cutoff relevant to the query: the category's entry, or `None` when every category is wanted.
pub fn selected_cutoff(offering: &Offering, category: CategoryFilter) -> Option<u32> {
    category
        .category()
        .and_then(|key| offering.cutoffs.get(key))
}

/// Whether `offering` survives the cutoff window for `query`.
///
/// With `CategoryFilter::All` nothing is excluded. With a category selected the offering needs a
/// published cutoff for that category and the cutoff has to fall inside the window.
pub fn is_eligible(offering: &Offering, query: &CollegeQuery, window: &EligibilityWindow) -> bool {
    admits_cutoff(selected_cutoff(offering, query.category), query, window)
}

/// Eligibility decision for a cutoff already selected with [`selected_cutoff`].
pub fn admits_cutoff(
    selected: Option<u32>,
    query: &CollegeQuery,
    window: &EligibilityWindow,
) -> bool {
    match query.category {
        CategoryFilter::All => true,
        CategoryFilter::Only(_) => {
            selected.map_or(false, |cutoff| window.contains(query.rank, cutoff))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admissions::domain::{CategoryKey, Rank};

    fn query(rank: u32, category: CategoryFilter) -> CollegeQuery {
        CollegeQuery::new(Rank::new(rank).expect("non-zero rank"), category)
    }

    #[test]
    fn all_categories_never_excludes() {
        let offering = crate::admissions::domain::Offering::new("KITS", "ECE", "GTR", "AU");
        let window = EligibilityWindow::default();
        assert!(is_eligible(&offering, &query(1, CategoryFilter::All), &window));
        assert_eq!(selected_cutoff(&offering, CategoryFilter::All), None);
    }

    #[test]
    fn missing_cutoff_excludes_when_category_selected() {
        let offering = crate::admissions::domain::Offering::new("KITS", "ECE", "GTR", "AU")
            .with_cutoff(CategoryKey::OcGirls, 12_000);
        let window = EligibilityWindow::default();
        let q = query(10_000, CategoryFilter::Only(CategoryKey::OcBoys));
        assert!(!is_eligible(&offering, &q, &window));

        let q = query(10_000, CategoryFilter::Only(CategoryKey::OcGirls));
        assert!(is_eligible(&offering, &q, &window));
    }

    #[test]
    fn admits_cutoff_agrees_with_offering_lookup() {
        let offering = crate::admissions::domain::Offering::new("KITS", "ECE", "GTR", "AU")
            .with_cutoff(CategoryKey::OcBoys, 24_000)
            .with_cutoff(CategoryKey::ScGirls, 40_000);
        let window = EligibilityWindow::default();

        for category in [
            CategoryFilter::All,
            CategoryFilter::Only(CategoryKey::OcBoys),
            CategoryFilter::Only(CategoryKey::ScGirls),
            CategoryFilter::Only(CategoryKey::StBoys),
        ] {
            let q = query(10_000, category);
            let selected = selected_cutoff(&offering, category);
            assert_eq!(
                admits_cutoff(selected, &q, &window),
                is_eligible(&offering, &q, &window),
                "{category:?}"
            );
        }

        let q = query(10_000, CategoryFilter::Only(CategoryKey::OcBoys));
        assert!(admits_cutoff(Some(25_000), &q, &window));
        assert!(!admits_cutoff(Some(25_001), &q, &window));
        assert!(!admits_cutoff(None, &q, &window));
        assert!(admits_cutoff(None, &query(10_000, CategoryFilter::All), &window));
    }

    #[test]
    fn selected_cutoff_reads_the_requested_column() {
        let offering = crate::admissions::domain::Offering::new("KITS", "ECE", "GTR", "AU")
            .with_cutoff(CategoryKey::BcdBoys, 0);
        assert_eq!(
            selected_cutoff(&offering, CategoryFilter::Only(CategoryKey::BcdBoys)),
            Some(0)
        );
    }
}
