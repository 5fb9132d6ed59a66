//! Catalog filters
//!
//! A skill stays visible when:
//! - the search term is empty, or occurs (case-insensitively) in its name or
//!   description
//! - the category selector is `all`, or equals the skill's own tag
//!
//! Categories keep their metadata and order; emptied categories are dropped
//! unless explicitly requested.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::skill::{Skill, SkillCategory};

/// Sentinel spelling for "every category".
pub const ALL_CATEGORIES: &str = "all";

/// Which skill tag to show
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategorySelector {
    #[default]
    All,
    Tag(String),
}

impl CategorySelector {
    /// Parse a selector, treating `all` (any case) and blank input as `All`.
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_CATEGORIES) {
            Self::All
        } else {
            Self::Tag(trimmed.to_string())
        }
    }

    #[must_use]
    pub fn matches(&self, tag: &str) -> bool {
        match self {
            Self::All => true,
            Self::Tag(selected) => selected == tag,
        }
    }

    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl FromStr for CategorySelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for CategorySelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_CATEGORIES),
            Self::Tag(tag) => f.write_str(tag),
        }
    }
}

impl Serialize for CategorySelector {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CategorySelector {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Current filter inputs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    /// Free text, matched case-insensitively against name and description
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub selected_category: CategorySelector,
    /// Keep categories with no visible skills
    #[serde(default)]
    pub show_empty_categories: bool,
}

impl FilterState {
    /// Create new state that shows everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the search term
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    /// Set the category selector
    pub fn with_category(mut self, selector: CategorySelector) -> Self {
        self.selected_category = selector;
        self
    }

    /// Keep emptied categories
    pub fn show_empty(mut self, show: bool) -> Self {
        self.show_empty_categories = show;
        self
    }

    /// Whether this state hides nothing
    pub fn is_unfiltered(&self) -> bool {
        self.search_term.is_empty() && self.selected_category.is_all()
    }

    /// Run the filter over `categories`
    pub fn apply<'a>(&self, categories: &'a [SkillCategory]) -> Vec<FilteredCategory<'a>> {
        filter_catalog(
            categories,
            Some(&self.search_term),
            &self.selected_category,
            self.show_empty_categories,
        )
    }
}

/// A category wrapper holding only its visible skills.
///
/// Metadata is borrowed unchanged from the source category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredCategory<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<&'a str>,
    pub skills: Vec<&'a Skill>,
    /// Size of the unfiltered category
    pub total_skills: usize,
}

impl FilteredCategory<'_> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }
}

/// Compiled search predicate; the term is lowercased once.
#[derive(Debug, Clone)]
pub struct SkillMatcher<'s> {
    needle: Option<String>,
    selector: &'s CategorySelector,
}

impl<'s> SkillMatcher<'s> {
    pub fn new(search_term: Option<&str>, selector: &'s CategorySelector) -> Self {
        let needle = search_term
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase);
        Self { needle, selector }
    }

    /// Check if a skill passes both the text and category filters
    pub fn matches(&self, skill: &Skill) -> bool {
        if !self.selector.matches(&skill.category) {
            return false;
        }

        match &self.needle {
            None => true,
            Some(needle) => {
                skill.name.to_lowercase().contains(needle.as_str())
                    || skill.description.to_lowercase().contains(needle.as_str())
            }
        }
    }
}

/// Filter every category, keeping category and skill order.
///
/// `search_term` of `None` behaves like an empty term. The input is only
/// borrowed; the result points into it.
pub fn filter_catalog<'a>(
    categories: &'a [SkillCategory],
    search_term: Option<&str>,
    selected_category: &CategorySelector,
    show_empty_categories: bool,
) -> Vec<FilteredCategory<'a>> {
    let matcher = SkillMatcher::new(search_term, selected_category);

    categories
        .iter()
        .map(|category| FilteredCategory {
            id: category.id(),
            title: category.title(),
            description: category.description(),
            icon: category.icon(),
            skills: category
                .skills()
                .iter()
                .filter(|skill| matcher.matches(skill))
                .collect(),
            total_skills: category.skill_count(),
        })
        .filter(|filtered| show_empty_categories || !filtered.is_empty())
        .collect()
}

/// Total visible skills across a filter result
pub fn visible_skill_count(filtered: &[FilteredCategory<'_>]) -> usize {
    filtered.iter().map(|c| c.skills.len()).sum()
}
