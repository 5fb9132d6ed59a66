//! Derived matrix views: filtered categories with every visible skill
//! labelled by proficiency level.

use serde::Serialize;

use crate::core::catalog::Catalog;
use crate::core::proficiency::{ProficiencyLevel, ProficiencyScale};
use crate::core::skill::{CategoryStats, Skill, compute_category_stats};
use crate::search::filters::{FilterState, FilteredCategory};

/// A visible skill with its level
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelledSkill<'a> {
    #[serde(flatten)]
    pub skill: &'a Skill,
    pub level: ProficiencyLevel,
}

/// One category of the view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewCategory<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<&'a str>,
    pub skills: Vec<LabelledSkill<'a>>,
    /// Stats over the visible skills only
    pub visible: CategoryStats,
    pub total_skills: usize,
}

/// Filter result ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixView<'a> {
    pub filter: FilterState,
    pub categories: Vec<ViewCategory<'a>>,
    pub visible_skills: usize,
    pub total_skills: usize,
}

impl<'a> MatrixView<'a> {
    /// Filter `catalog` with `state`, then label each visible skill.
    pub fn build(catalog: &'a Catalog, state: &FilterState) -> Self {
        let scale = catalog.scale();
        let categories: Vec<ViewCategory<'a>> = state
            .apply(catalog.categories())
            .into_iter()
            .map(|filtered| label_category(filtered, scale))
            .collect();
        let visible_skills = categories.iter().map(|c| c.skills.len()).sum();

        tracing::debug!(
            search = %state.search_term,
            category = %state.selected_category,
            categories = categories.len(),
            visible_skills,
            "built matrix view"
        );

        Self {
            filter: state.clone(),
            categories,
            visible_skills,
            total_skills: catalog.skill_count(),
        }
    }

    /// No skill survived the filter
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.visible_skills == 0
    }

    /// Visible skills in display order
    pub fn skills(&self) -> impl Iterator<Item = &LabelledSkill<'a>> {
        self.categories.iter().flat_map(|c| c.skills.iter())
    }
}

fn label_category<'a>(filtered: FilteredCategory<'a>, scale: &ProficiencyScale) -> ViewCategory<'a> {
    let visible = compute_category_stats(filtered.skills.iter().copied());
    let skills = filtered
        .skills
        .into_iter()
        .map(|skill| LabelledSkill {
            skill,
            level: scale.classify(i32::from(skill.proficiency)).level,
        })
        .collect();

    ViewCategory {
        id: filtered.id,
        title: filtered.title,
        description: filtered.description,
        icon: filtered.icon,
        skills,
        visible,
        total_skills: filtered.total_skills,
    }
}

/// Skill count for one level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelCount {
    pub level: ProficiencyLevel,
    pub count: usize,
}

/// How many skills fall in each level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelDistribution {
    /// Every level, highest first, zero counts included
    pub levels: Vec<LevelCount>,
    /// Skills under the lowest band's minimum
    pub below_lowest_band: usize,
}

impl LevelDistribution {
    #[must_use]
    pub fn count(&self, level: ProficiencyLevel) -> usize {
        self.levels
            .iter()
            .find(|l| l.level == level)
            .map_or(0, |l| l.count)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.levels.iter().map(|l| l.count).sum::<usize>() + self.below_lowest_band
    }
}

/// Count skills per level using the scale's bands without fallback.
pub fn level_distribution<'a, I>(skills: I, scale: &ProficiencyScale) -> LevelDistribution
where
    I: IntoIterator<Item = &'a Skill>,
{
    let mut levels: Vec<LevelCount> = ProficiencyLevel::ALL
        .iter()
        .map(|level| LevelCount {
            level: *level,
            count: 0,
        })
        .collect();
    let mut below_lowest_band = 0;

    for skill in skills {
        match scale.band_for(i32::from(skill.proficiency)) {
            Some(band) => {
                if let Some(entry) = levels.iter_mut().find(|l| l.level == band.level) {
                    entry.count += 1;
                }
            }
            None => below_lowest_band += 1,
        }
    }

    LevelDistribution {
        levels,
        below_lowest_band,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::proficiency::{ProficiencyBand, ProficiencyScale};
    use crate::core::skill::SkillCategory;
    use crate::search::filters::CategorySelector;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap()
    }

    #[test]
    fn test_unfiltered_view_labels_everything() {
        let catalog = catalog();
        let view = MatrixView::build(&catalog, &FilterState::new());
        assert_eq!(view.visible_skills, 18);
        assert_eq!(view.total_skills, 18);
        assert_eq!(view.categories.len(), 5);

        let nmap = view.skills().find(|s| s.skill.id == "nmap").unwrap();
        assert_eq!(nmap.level, ProficiencyLevel::Expert);
        let rust = view.skills().find(|s| s.skill.id == "rust").unwrap();
        assert_eq!(rust.level, ProficiencyLevel::Beginner);
    }

    #[test]
    fn test_view_stats_cover_visible_subset() {
        let catalog = catalog();
        let state = FilterState::new().with_search("security");
        let view = MatrixView::build(&catalog, &state);

        let cloud = view.categories.iter().find(|c| c.id == "cloud-security").unwrap();
        // every cloud skill name contains the term
        assert_eq!(cloud.visible.skill_count, 3);
        assert_eq!(cloud.total_skills, 3);
        assert!(view.categories.iter().all(|c| c.visible.skill_count == c.skills.len()));
    }

    #[test]
    fn test_empty_view() {
        let catalog = catalog();
        let view = MatrixView::build(&catalog, &FilterState::new().with_search("cobol"));
        assert!(view.is_empty());
        assert!(view.categories.is_empty());
        assert_eq!(view.total_skills, 18);
    }

    #[test]
    fn test_view_by_tag() {
        let catalog = catalog();
        let state =
            FilterState::new().with_category(CategorySelector::Tag("compliance".into()));
        let view = MatrixView::build(&catalog, &state);
        assert_eq!(view.categories.len(), 1);
        assert_eq!(view.visible_skills, 3);
        assert_eq!(view.categories[0].visible.average_proficiency, 77);
    }

    #[test]
    fn test_builtin_distribution() {
        let catalog = catalog();
        let dist = level_distribution(catalog.skills(), catalog.scale());
        assert_eq!(dist.count(ProficiencyLevel::Expert), 5);
        assert_eq!(dist.count(ProficiencyLevel::Advanced), 11);
        assert_eq!(dist.count(ProficiencyLevel::Intermediate), 1);
        assert_eq!(dist.count(ProficiencyLevel::Beginner), 1);
        assert_eq!(dist.count(ProficiencyLevel::Familiar), 0);
        assert_eq!(dist.below_lowest_band, 0);
        assert_eq!(dist.total(), 18);
        assert_eq!(dist.levels.len(), 5);
        assert_eq!(dist.levels[0].level, ProficiencyLevel::Expert);
    }

    #[test]
    fn test_distribution_counts_fallback_range() {
        let skills = vec![
            Skill::new("a", "A", "t", 5),
            Skill::new("b", "B", "t", 15),
        ];
        let dist = level_distribution(&skills, &ProficiencyScale::default());
        assert_eq!(dist.below_lowest_band, 1);
        assert_eq!(dist.count(ProficiencyLevel::Familiar), 1);
    }

    #[test]
    fn test_distribution_with_custom_scale() {
        let scale = ProficiencyScale::new(vec![
            ProficiencyBand::new(ProficiencyLevel::Expert, 50, 100),
            ProficiencyBand::new(ProficiencyLevel::Beginner, 0, 49),
        ])
        .unwrap();
        let skills = vec![Skill::new("a", "A", "t", 70), Skill::new("b", "B", "t", 0)];
        let dist = level_distribution(&skills, &scale);
        assert_eq!(dist.count(ProficiencyLevel::Expert), 1);
        assert_eq!(dist.count(ProficiencyLevel::Beginner), 1);
        assert_eq!(dist.count(ProficiencyLevel::Advanced), 0);
        assert_eq!(dist.below_lowest_band, 0);
    }

    #[test]
    fn test_labelled_skill_serializes_flat() {
        let skill = Skill::new("nmap", "Nmap", "vuln", 95);
        let labelled = LabelledSkill {
            skill: &skill,
            level: ProficiencyLevel::Expert,
        };
        let json = serde_json::to_value(&labelled).unwrap();
        assert_eq!(json["id"], "nmap");
        assert_eq!(json["level"], "expert");
    }
}
