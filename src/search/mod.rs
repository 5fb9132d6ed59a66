//! Skill search and filtering
//!
//! ```text
//! FilterState ──► filter_catalog ──► FilteredCategory ──► MatrixView
//!  (term, tag,     (stable, pure)     (borrowed skills)    (levels, stats)
//!   show-empty)
//! ```

pub mod filters;
pub mod view;

pub use filters::{
    ALL_CATEGORIES, CategorySelector, FilterState, FilteredCategory, SkillMatcher, filter_catalog,
    visible_skill_count,
};
pub use view::{
    LabelledSkill, LevelCount, LevelDistribution, MatrixView, ViewCategory,
    level_distribution,
};
