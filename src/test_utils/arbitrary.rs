use proptest::prelude::*;

use crate::config::{CatalogConfig, Config, DisplayConfig, FilterConfig, RobotConfig};
use crate::core::skill::{Skill, SkillCategory};
use crate::search::{CategorySelector, FilterState};

/// Tags skills are drawn from.
pub const TAGS: [&str; 4] = ["network-security", "cloud", "dev", "compliance"];

fn arb_tag() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(TAGS[0].to_string()),
        Just(TAGS[1].to_string()),
        Just(TAGS[2].to_string()),
        Just(TAGS[3].to_string()),
    ]
}

fn arb_years() -> impl Strategy<Value = Option<f32>> {
    prop::option::of((0u8..30).prop_map(f32::from))
}

/// Skill with a unique id built from `prefix`.
pub fn arb_skill(prefix: String) -> impl Strategy<Value = Skill> {
    (
        "[A-Za-z][A-Za-z0-9 ]{0,16}",
        arb_tag(),
        0u8..=100,
        arb_years(),
        "[A-Za-z0-9 ]{0,40}",
    )
        .prop_map(move |(name, tag, proficiency, years, description)| {
            let mut skill = Skill::new(prefix.clone(), name, tag, proficiency)
                .with_description(description);
            if let Some(years) = years {
                skill = skill.with_years(years);
            }
            skill
        })
}

fn arb_category(index: usize) -> impl Strategy<Value = SkillCategory> {
    (0usize..6, "[A-Z][a-z]{2,12}").prop_flat_map(move |(count, title)| {
        let skills: Vec<_> = (0..count)
            .map(|i| arb_skill(format!("skill-{index}-{i}")))
            .collect();
        skills.prop_map(move |skills| {
            SkillCategory::new(format!("cat-{index}"), title.clone(), "", skills)
        })
    })
}

/// Categories with unique category and skill ids.
pub fn arb_categories() -> impl Strategy<Value = Vec<SkillCategory>> {
    (0usize..6).prop_flat_map(|count| (0..count).map(arb_category).collect::<Vec<_>>())
}

pub fn arb_selector() -> impl Strategy<Value = CategorySelector> {
    prop_oneof![
        Just(CategorySelector::All),
        arb_tag().prop_map(CategorySelector::Tag),
        Just(CategorySelector::Tag("unknown-tag".to_string())),
    ]
}

/// Generate arbitrary search term (often empty).
pub fn arb_search_term() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), "[A-Za-z0-9 ]{1,6}"]
}

pub fn arb_filter_state() -> impl Strategy<Value = FilterState> {
    (arb_search_term(), arb_selector(), any::<bool>()).prop_map(|(term, selector, show_empty)| {
        FilterState::new()
            .with_search(term)
            .with_category(selector)
            .show_empty(show_empty)
    })
}

/// Generate arbitrary Config.
pub fn arb_config() -> impl Strategy<Value = Config> {
    let format = prop_oneof![Just("json".to_string()), Just("jsonl".to_string())];
    (
        prop::option::of("[a-z]{1,12}\\.toml"),
        prop::collection::vec("[a-z]{1,12}\\.(toml|json|yaml)", 0..3),
        prop_oneof![Just("all".to_string()), arb_tag()],
        any::<bool>(),
        (any::<bool>(), any::<bool>()),
        (any::<bool>(), format, any::<bool>()),
    )
        .prop_map(
            |(path, extra_paths, default_category, show_empty, display, robot)| Config {
                catalog: CatalogConfig { path, extra_paths },
                filter: FilterConfig {
                    default_category,
                    show_empty_categories: show_empty,
                },
                display: DisplayConfig {
                    show_levels: display.0,
                    show_years: display.1,
                },
                robot: RobotConfig {
                    enabled: robot.0,
                    format: robot.1,
                    include_metadata: robot.2,
                },
            },
        )
}
