use proptest::prelude::*;

use skillmatrix::core::proficiency::{
    DEFAULT_BANDS, ProficiencyLevel, ProficiencyScale, classify_proficiency,
};
use skillmatrix::core::skill::{CategoryStats, Skill, compute_category_stats};

fn skills_with(values: &[u8]) -> Vec<Skill> {
    values
        .iter()
        .enumerate()
        .map(|(i, &p)| Skill::new(format!("s{i}"), format!("Skill {i}"), "t", p))
        .collect()
}

proptest! {
    #[test]
    fn every_value_lands_in_exactly_one_band(p in 0i32..=100) {
        let scale = ProficiencyScale::default();
        let containing = scale.bands().iter().filter(|b| b.contains(p)).count();
        if scale.is_fallback(p) {
            prop_assert_eq!(containing, 0);
            prop_assert_eq!(scale.classify(p).level, ProficiencyLevel::Familiar);
        } else {
            prop_assert_eq!(containing, 1);
            prop_assert!(scale.classify(p).contains(p));
        }
    }

    #[test]
    fn raw_classifier_uses_explicit_default(p in -1000i32..1000) {
        let default_band = DEFAULT_BANDS[2];
        let band = classify_proficiency(p, &DEFAULT_BANDS, &default_band);
        if DEFAULT_BANDS.iter().any(|b| b.contains(p)) {
            prop_assert!(band.contains(p));
        } else {
            prop_assert_eq!(*band, default_band);
        }
    }

    #[test]
    fn out_of_range_values_clamp(p in 101i32..10_000) {
        let scale = ProficiencyScale::default();
        prop_assert_eq!(scale.classify(p).level, ProficiencyLevel::Expert);
        prop_assert_eq!(scale.classify(-p).level, ProficiencyLevel::Familiar);
    }

    #[test]
    fn average_stays_within_bounds(values in prop::collection::vec(0u8..=100, 1..40)) {
        let skills = skills_with(&values);
        let stats = compute_category_stats(&skills);
        let min = values.iter().copied().min().unwrap_or(0);
        let max = values.iter().copied().max().unwrap_or(0);
        prop_assert_eq!(stats.skill_count, values.len());
        prop_assert!(stats.average_proficiency >= min);
        prop_assert!(stats.average_proficiency <= max);
    }
}

#[test]
fn stats_of_known_values() {
    let empty: Vec<Skill> = Vec::new();
    assert_eq!(compute_category_stats(&empty), CategoryStats::default());

    let stats = compute_category_stats(&skills_with(&[80, 90, 100]));
    assert_eq!(stats.skill_count, 3);
    assert_eq!(stats.average_proficiency, 90);
}
