//! Skill and skill category data structures

use serde::{Deserialize, Serialize};

/// A single competency in the matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    /// Unique skill ID
    pub id: String,
    /// Human-readable name
    pub name: String,
    /// Filter tag (e.g. "network-security")
    pub category: String,
    /// Percentage, 0-100
    pub proficiency: u8,
    /// Years of hands-on use
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<f32>,
    /// Free text description
    #[serde(default)]
    pub description: String,
}

impl Skill {
    /// Create a new skill with the given ID, name, category tag and proficiency
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        proficiency: u8,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            proficiency,
            years_of_experience: None,
            description: String::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub const fn with_years(mut self, years: f32) -> Self {
        self.years_of_experience = Some(years);
        self
    }
}

/// Aggregates over a list of skills
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub skill_count: usize,
    pub average_proficiency: u8,
}

/// Count and rounded mean proficiency. Empty input yields zeros.
#[must_use]
pub fn compute_category_stats<'a, I>(skills: I) -> CategoryStats
where
    I: IntoIterator<Item = &'a Skill>,
{
    let (count, total) = skills
        .into_iter()
        .fold((0usize, 0u64), |(count, total), skill| {
            (count + 1, total + u64::from(skill.proficiency))
        });

    if count == 0 {
        return CategoryStats::default();
    }

    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let average = (total as f64 / count as f64).round() as u8;

    CategoryStats {
        skill_count: count,
        average_proficiency: average,
    }
}

/// A named group of skills with cached aggregates.
///
/// Fields are private so the cached stats always describe `skills`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillCategory {
    id: String,
    title: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon: Option<String>,
    skills: Vec<Skill>,
    #[serde(flatten)]
    stats: CategoryStats,
}

impl SkillCategory {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        skills: Vec<Skill>,
    ) -> Self {
        let stats = compute_category_stats(&skills);
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            icon: None,
            skills,
            stats,
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    #[must_use]
    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    #[must_use]
    pub const fn stats(&self) -> CategoryStats {
        self.stats
    }

    #[must_use]
    pub const fn skill_count(&self) -> usize {
        self.stats.skill_count
    }

    #[must_use]
    pub const fn average_proficiency(&self) -> u8 {
        self.stats.average_proficiency
    }
}
