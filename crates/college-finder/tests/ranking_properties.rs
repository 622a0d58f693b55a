use std::collections::HashSet;

use college_finder::admissions::{
    CategoryFilter, CategoryKey, CollegeQuery, EligibilityWindow, Offering, Rank, RankingEngine,
};
use proptest::prelude::*;

fn arb_category() -> impl Strategy<Value = CategoryKey> {
    prop::sample::select(CategoryKey::ALL.to_vec())
}

fn arb_offering() -> impl Strategy<Value = Offering> {
    (
        0u8..6,
        prop::sample::select(vec!["CSE", "ECE", "MECH"]),
        prop::sample::select(vec!["AU", "SVU"]),
        prop::collection::vec((arb_category(), 0u32..60_000), 0..4),
    )
        .prop_map(|(inst, branch, region, cutoffs)| {
            let mut offering = Offering::new(format!("I{inst}"), branch, "GTR", region);
            for (category, cutoff) in cutoffs {
                offering.cutoffs.insert(category, cutoff);
            }
            offering
        })
}

fn arb_filter() -> impl Strategy<Value = CategoryFilter> {
    prop_oneof![
        Just(CategoryFilter::All),
        arb_category().prop_map(CategoryFilter::Only),
    ]
}

proptest! {
    #[test]
    fn output_has_no_duplicate_offerings(
        offerings in prop::collection::vec(arb_offering(), 0..40),
        rank in 1u32..40_000,
        category in arb_filter(),
    ) {
        let query = CollegeQuery::new(Rank::new(rank).unwrap(), category);
        let results = RankingEngine::default().query(offerings, &query);

        let mut seen = HashSet::new();
        for result in &results {
            prop_assert!(seen.insert((
                result.offering.institution_code.clone(),
                result.offering.branch_code.clone(),
            )));
        }
    }

    #[test]
    fn selected_cutoffs_stay_inside_the_window(
        offerings in prop::collection::vec(arb_offering(), 0..40),
        rank in 1u32..40_000,
        category in arb_category(),
        margin in 0u32..20_000,
    ) {
        let query = CollegeQuery::new(Rank::new(rank).unwrap(), CategoryFilter::Only(category));
        let results = RankingEngine::new(EligibilityWindow::with_margin(margin))
            .query(offerings, &query);

        for result in &results {
            let cutoff = result.selected_cutoff;
            prop_assert!(cutoff.is_some());
            let cutoff = cutoff.unwrap();
            prop_assert!(rank <= cutoff && cutoff <= rank + margin);
        }
    }

    #[test]
    fn output_is_ordered_with_missing_cutoffs_last(
        offerings in prop::collection::vec(arb_offering(), 0..40),
        rank in 1u32..40_000,
        category in arb_filter(),
    ) {
        let query = CollegeQuery::new(Rank::new(rank).unwrap(), category);
        let results = RankingEngine::default().query(offerings, &query);

        let mut seen_missing = false;
        let mut previous = None;
        for result in &results {
            match result.selected_cutoff {
                Some(cutoff) => {
                    prop_assert!(!seen_missing);
                    if let Some(previous) = previous {
                        prop_assert!(previous <= cutoff);
                    }
                    previous = Some(cutoff);
                }
                None => seen_missing = true,
            }
        }
    }

    #[test]
    fn all_categories_preserve_first_seen_order(
        offerings in prop::collection::vec(arb_offering(), 0..40),
        rank in 1u32..40_000,
    ) {
        let query = CollegeQuery::new(Rank::new(rank).unwrap(), CategoryFilter::All);
        let results = RankingEngine::default().query(offerings.clone(), &query);

        let mut seen = HashSet::new();
        let expected: Vec<_> = offerings
            .into_iter()
            .filter(|offering| {
                seen.insert((offering.institution_code.clone(), offering.branch_code.clone()))
            })
            .collect();
        let actual: Vec<_> = results.into_iter().map(|result| result.offering).collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn queries_are_deterministic(
        offerings in prop::collection::vec(arb_offering(), 0..40),
        rank in 1u32..40_000,
        category in arb_filter(),
    ) {
        let query = CollegeQuery::new(Rank::new(rank).unwrap(), category);
        let engine = RankingEngine::default();
        prop_assert_eq!(
            engine.query(offerings.clone(), &query),
            engine.query(offerings, &query)
        );
    }
}
