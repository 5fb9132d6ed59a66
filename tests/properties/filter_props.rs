use proptest::prelude::*;

use skillmatrix::core::skill::{Skill, SkillCategory};
use skillmatrix::search::{CategorySelector, FilterState, filter_catalog, visible_skill_count};
use skillmatrix::test_utils::fixtures::two_category_catalog;

const TAGS: [&str; 3] = ["network-security", "cloud-security", "development"];

fn arb_tag() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(TAGS[0]), Just(TAGS[1]), Just(TAGS[2])]
}

fn arb_category(index: usize) -> impl Strategy<Value = SkillCategory> {
    prop::collection::vec(
        ("[A-Za-z ]{1,12}", arb_tag(), 0u8..=100, "[A-Za-z ]{0,24}"),
        0..6,
    )
    .prop_map(move |rows| {
        let skills = rows
            .into_iter()
            .enumerate()
            .map(|(i, (name, tag, proficiency, description))| {
                Skill::new(format!("s{index}-{i}"), name, tag, proficiency)
                    .with_description(description)
            })
            .collect();
        SkillCategory::new(format!("c{index}"), format!("Category {index}"), "", skills)
    })
}

fn arb_catalog() -> impl Strategy<Value = Vec<SkillCategory>> {
    (0usize..5).prop_flat_map(|n| (0..n).map(arb_category).collect::<Vec<_>>())
}

fn arb_term() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[A-Za-z ]{1,3}"]
}

fn matches_term(skill: &Skill, term: &str) -> bool {
    let needle = term.to_lowercase();
    skill.name.to_lowercase().contains(&needle) || skill.description.to_lowercase().contains(&needle)
}

proptest! {
    #[test]
    fn empty_term_and_all_keeps_everything(catalog in arb_catalog()) {
        let filtered = filter_catalog(&catalog, Some(""), &CategorySelector::All, true);
        prop_assert_eq!(filtered.len(), catalog.len());
        for (filtered, source) in filtered.iter().zip(&catalog) {
            let kept: Vec<&str> = filtered.skills.iter().map(|s| s.id.as_str()).collect();
            let all: Vec<&str> = source.skills().iter().map(|s| s.id.as_str()).collect();
            prop_assert_eq!(kept, all);
        }
    }

    #[test]
    fn retained_skills_match_and_dropped_do_not(catalog in arb_catalog(), term in arb_term()) {
        let filtered = filter_catalog(&catalog, Some(&term), &CategorySelector::All, true);
        for (filtered, source) in filtered.iter().zip(&catalog) {
            for skill in source.skills() {
                let kept = filtered.skills.iter().any(|s| s.id == skill.id);
                prop_assert_eq!(kept, matches_term(skill, &term));
            }
        }
    }

    #[test]
    fn selector_keeps_only_its_tag(catalog in arb_catalog(), tag in arb_tag()) {
        let selector = CategorySelector::Tag(tag.to_string());
        let filtered = filter_catalog(&catalog, None, &selector, false);

        let expected = catalog
            .iter()
            .flat_map(|c| c.skills())
            .filter(|s| s.category == tag)
            .count();
        prop_assert_eq!(visible_skill_count(&filtered), expected);
        for category in &filtered {
            prop_assert!(!category.skills.is_empty());
            prop_assert!(category.skills.iter().all(|s| s.category == tag));
        }
    }

    #[test]
    fn unknown_tag_yields_nothing(catalog in arb_catalog(), term in arb_term()) {
        let selector = CategorySelector::Tag("no-such-tag".to_string());
        prop_assert!(filter_catalog(&catalog, Some(&term), &selector, false).is_empty());
    }

    #[test]
    fn filtering_is_idempotent_and_pure(catalog in arb_catalog(), term in arb_term()) {
        let before = catalog.clone();
        let state = FilterState::new().with_search(term);
        let first = state.apply(&catalog);
        let second = state.apply(&catalog);
        prop_assert_eq!(&first, &second);
        drop(first);
        drop(second);
        prop_assert_eq!(catalog, before);
    }

    #[test]
    fn order_is_preserved(catalog in arb_catalog(), term in arb_term()) {
        let filtered = filter_catalog(&catalog, Some(&term), &CategorySelector::All, false);
        let source_ids: Vec<&str> = catalog.iter().map(SkillCategory::id).collect();
        let mut cursor = 0;
        for category in &filtered {
            let position = source_ids[cursor..]
                .iter()
                .position(|id| *id == category.id)
                .map(|p| p + cursor);
            prop_assert!(position.is_some());
            cursor = position.unwrap_or(cursor) + 1;
        }
    }
}

#[test]
fn nmap_scenario() {
    let catalog = two_category_catalog();
    let filtered = filter_catalog(catalog.categories(), Some("nmap"), &CategorySelector::All, false);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, "vulnerability");
    assert_eq!(filtered[0].skills.len(), 1);
    assert_eq!(filtered[0].skills[0].name, "Nmap");
}
