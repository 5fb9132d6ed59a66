//! Core skill types and logic

pub mod catalog;
pub mod proficiency;
pub mod skill;

pub use catalog::{Catalog, CatalogFormat};
pub use proficiency::{
    DEFAULT_BANDS, ProficiencyBand, ProficiencyLevel, ProficiencyScale, classify_proficiency,
};
pub use skill::{CategoryStats, Skill, SkillCategory, compute_category_stats};
