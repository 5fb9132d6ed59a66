//! Skill catalog loading and validation.
//!
//! The catalog is read once at startup, validated as a whole, and then only
//! ever borrowed. Every derived view (filters, stats, labels) is computed from
//! a `&Catalog`.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::proficiency::{ProficiencyBand, ProficiencyScale};
use crate::core::skill::{Skill, SkillCategory};
use crate::error::{MatrixError, Result};

/// Catalog embedded in the binary.
pub const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.toml");

/// Origin label used in errors for in-memory catalogs.
const IN_MEMORY: &str = "in-memory catalog";

/// Catalog file format, chosen by extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Toml,
    Json,
    Yaml,
}

impl CatalogFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(MatrixError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Raw catalog as written in a file, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogDefinition {
    #[serde(default)]
    pub bands: Option<Vec<ProficiencyBand>>,
    #[serde(default)]
    pub categories: Vec<CategoryDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryDefinition {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub skills: Vec<SkillDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SkillDefinition {
    pub id: String,
    pub name: String,
    /// Defaults to the enclosing category id
    #[serde(default)]
    pub category: Option<String>,
    /// Wide integer so out-of-range values surface as validation problems
    pub proficiency: i64,
    #[serde(default, alias = "yearsOfExperience")]
    pub years_of_experience: Option<f64>,
    #[serde(default)]
    pub description: String,
}

/// Immutable, validated skill catalog
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    scale: ProficiencyScale,
    categories: Vec<SkillCategory>,
}

impl Catalog {
    /// Build from already-constructed categories, checking ID uniqueness.
    pub fn new(scale: ProficiencyScale, categories: Vec<SkillCategory>) -> Result<Self> {
        let problems = duplicate_id_problems(&categories);
        if !problems.is_empty() {
            return Err(MatrixError::ValidationFailed {
                origin: IN_MEMORY.to_string(),
                errors: problems,
            });
        }
        Ok(Self { scale, categories })
    }

    /// The catalog shipped with the binary.
    pub fn builtin() -> Result<Self> {
        Self::parse(BUILTIN_CATALOG, CatalogFormat::Toml, "builtin catalog")
    }

    /// Read and validate a catalog file.
    pub fn load(path: &Path) -> Result<Self> {
        let format = CatalogFormat::from_path(path)?;
        let origin = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|err| MatrixError::CatalogParse {
            path: origin.clone(),
            reason: err.to_string(),
        })?;
        let catalog = Self::parse(&raw, format, &origin)?;
        debug!(
            path = %path.display(),
            categories = catalog.categories.len(),
            skills = catalog.skill_count(),
            "loaded catalog"
        );
        Ok(catalog)
    }

    /// Parse catalog text in the given format.
    pub fn parse(raw: &str, format: CatalogFormat, origin: &str) -> Result<Self> {
        let parse_err = |reason: String| MatrixError::CatalogParse {
            path: origin.to_string(),
            reason,
        };
        let definition: CatalogDefinition = match format {
            CatalogFormat::Toml => toml::from_str(raw).map_err(|e| parse_err(e.to_string()))?,
            CatalogFormat::Json => {
                serde_json::from_str(raw).map_err(|e| parse_err(e.to_string()))?
            }
            CatalogFormat::Yaml => {
                serde_yaml::from_str(raw).map_err(|e| parse_err(e.to_string()))?
            }
        };
        Self::from_definition(definition, origin)
    }

    /// Validate a raw definition, reporting every problem at once.
    pub fn from_definition(definition: CatalogDefinition, origin: &str) -> Result<Self> {
        let mut problems = Vec::new();

        let scale = match definition.bands {
            None => ProficiencyScale::default(),
            Some(bands) => match ProficiencyScale::new(bands) {
                Ok(scale) => scale,
                Err(err) => {
                    problems.push(err.to_string());
                    ProficiencyScale::default()
                }
            },
        };

        let mut categories = Vec::with_capacity(definition.categories.len());
        for category in definition.categories {
            let mut skills = Vec::with_capacity(category.skills.len());
            for skill in category.skills {
                if let Some(skill) = validate_skill(skill, &category.id, &mut problems) {
                    skills.push(skill);
                }
            }
            if category.id.trim().is_empty() {
                problems.push(format!("category '{}' has an empty id", category.title));
            }
            let mut built =
                SkillCategory::new(category.id, category.title, category.description, skills);
            if let Some(icon) = category.icon {
                built = built.with_icon(icon);
            }
            categories.push(built);
        }

        problems.extend(duplicate_id_problems(&categories));

        if !problems.is_empty() {
            return Err(MatrixError::ValidationFailed {
                origin: origin.to_string(),
                errors: problems,
            });
        }

        Ok(Self { scale, categories })
    }

    /// Append the categories of `other`, keeping this catalog's bands.
    pub fn extend(mut self, other: Self) -> Result<Self> {
        self.categories.extend(other.categories);
        let problems = duplicate_id_problems(&self.categories);
        if !problems.is_empty() {
            return Err(MatrixError::ValidationFailed {
                origin: IN_MEMORY.to_string(),
                errors: problems,
            });
        }
        Ok(self)
    }

    #[must_use]
    pub const fn scale(&self) -> &ProficiencyScale {
        &self.scale
    }

    #[must_use]
    pub fn categories(&self) -> &[SkillCategory] {
        &self.categories
    }

    #[must_use]
    pub fn category(&self, id: &str) -> Option<&SkillCategory> {
        self.categories.iter().find(|c| c.id() == id)
    }

    /// Look up a category or fail with `CategoryNotFound`.
    pub fn require_category(&self, id: &str) -> Result<&SkillCategory> {
        self.category(id)
            .ok_or_else(|| MatrixError::CategoryNotFound(id.to_string()))
    }

    /// Every skill, category by category, in declaration order.
    pub fn skills(&self) -> impl Iterator<Item = &Skill> {
        self.categories.iter().flat_map(|c| c.skills().iter())
    }

    #[must_use]
    pub fn skill(&self, id: &str) -> Option<&Skill> {
        self.skills().find(|s| s.id == id)
    }

    #[must_use]
    pub fn skill_count(&self) -> usize {
        self.categories.iter().map(SkillCategory::skill_count).sum()
    }

    /// Distinct skill tags in first-seen order.
    #[must_use]
    pub fn category_tags(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.skills()
            .map(|s| s.category.as_str())
            .filter(|tag| seen.insert(*tag))
            .collect()
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.skills().any(|s| s.category == tag)
    }
}

fn validate_skill(
    skill: SkillDefinition,
    category_id: &str,
    problems: &mut Vec<String>,
) -> Option<Skill> {
    let before = problems.len();

    if skill.id.trim().is_empty() {
        problems.push(format!("skill '{}' in {category_id} has an empty id", skill.name));
    }
    if skill.name.trim().is_empty() {
        problems.push(format!("skill '{}' has an empty name", skill.id));
    }
    if !(0..=100).contains(&skill.proficiency) {
        problems.push(format!(
            "skill '{}' proficiency {} is outside 0-100",
            skill.id, skill.proficiency
        ));
    }
    if let Some(years) = skill.years_of_experience {
        #[allow(clippy::cast_possible_truncation)]
        let stored = years as f32;
        if !years.is_finite() || years < 0.0 {
            problems.push(format!(
                "skill '{}' years_of_experience {years} must be a non-negative number",
                skill.id
            ));
        } else if !stored.is_finite() {
            problems.push(format!(
                "skill '{}' years_of_experience {years} is too large",
                skill.id
            ));
        }
    }

    if problems.len() > before {
        return None;
    }

    let category = skill
        .category
        .filter(|tag| !tag.trim().is_empty())
        .unwrap_or_else(|| category_id.to_string());
    let proficiency = u8::try_from(skill.proficiency).ok()?;

    #[allow(clippy::cast_possible_truncation)]
    let years = skill.years_of_experience.map(|y| y as f32);

    let mut built = Skill::new(skill.id, skill.name, category, proficiency)
        .with_description(skill.description);
    if let Some(years) = years {
        built = built.with_years(years);
    }
    Some(built)
}

fn duplicate_id_problems(categories: &[SkillCategory]) -> Vec<String> {
    let mut problems = Vec::new();
    let mut category_ids = HashSet::new();
    let mut skill_ids = HashSet::new();

    for category in categories {
        if !category_ids.insert(category.id()) {
            problems.push(format!("duplicate category id '{}'", category.id()));
        }
        for skill in category.skills() {
            if !skill_ids.insert(skill.id.as_str()) {
                problems.push(format!(
                    "duplicate skill id '{}' (in {})",
                    skill.id,
                    category.id()
                ));
            }
        }
    }

    problems
}
