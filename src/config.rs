use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{MatrixError, Result};
use crate::search::CategorySelector;

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "skillmatrix.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub robot: RobotConfig,
}

impl Config {
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("SKILLMATRIX_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            match Self::load_patch(&path)? {
                Some(patch) => config.merge_patch(patch),
                None => return Err(MatrixError::ConfigNotFound(path.display().to_string())),
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_project(root)? {
                config.merge_patch(project);
            }
        }

        config.robot.format = parse_robot_format("robot.format", &config.robot.format)?;
        config.apply_env_overrides()?;

        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            debug!("no config directory, skipping global config");
            return Ok(None);
        };
        Self::load_patch(&dir.join("skillmatrix/config.toml"))
    }

    fn load_project(root: &Path) -> Result<Option<ConfigPatch>> {
        let path = root.join(PROJECT_CONFIG_FILE);
        let patch = Self::load_patch(&path)?;
        // Relative catalog paths in a project config are relative to the root
        Ok(patch.map(|mut patch| {
            if let Some(catalog) = patch.catalog.as_mut() {
                catalog.resolve_against(root);
            }
            patch
        }))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| MatrixError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| MatrixError::Config(format!("parse config {}: {err}", path.display())))?;
        debug!(path = %path.display(), "loaded config");
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.catalog {
            self.catalog.merge(patch);
        }
        if let Some(patch) = patch.filter {
            self.filter.merge(patch);
        }
        if let Some(patch) = patch.display {
            self.display.merge(patch);
        }
        if let Some(patch) = patch.robot {
            self.robot.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `SKILLMATRIX_*` overrides read through `lookup`.
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(value) = lookup("SKILLMATRIX_CATALOG") {
            self.catalog.path = Some(value);
        }
        if let Some(values) = env_list(&lookup, "SKILLMATRIX_CATALOG_EXTRA") {
            self.catalog.extra_paths = merge_unique(values, &self.catalog.extra_paths);
        }

        if let Some(value) = lookup("SKILLMATRIX_DEFAULT_CATEGORY") {
            self.filter.default_category = value;
        }
        if let Some(value) = env_bool(&lookup, "SKILLMATRIX_SHOW_EMPTY")? {
            self.filter.show_empty_categories = value;
        }

        if let Some(value) = env_bool(&lookup, "SKILLMATRIX_SHOW_LEVELS")? {
            self.display.show_levels = value;
        }
        if let Some(value) = env_bool(&lookup, "SKILLMATRIX_SHOW_YEARS")? {
            self.display.show_years = value;
        }

        if let Some(value) = env_bool(&lookup, "SKILLMATRIX_ROBOT")? {
            self.robot.enabled = value;
        }
        if let Some(value) = lookup("SKILLMATRIX_ROBOT_FORMAT") {
            self.robot.format = parse_robot_format("SKILLMATRIX_ROBOT_FORMAT", &value)?;
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog file replacing the builtin one
    #[serde(default)]
    pub path: Option<String>,
    /// Catalog files appended after the primary one
    #[serde(default)]
    pub extra_paths: Vec<String>,
}

impl CatalogConfig {
    fn merge(&mut self, patch: CatalogPatch) {
        if let Some(value) = patch.path {
            self.path = Some(value);
        }
        if let Some(values) = patch.extra_paths {
            self.extra_paths = merge_unique(values, &self.extra_paths);
        }
    }

    /// Primary catalog path, with `~` expanded.
    #[must_use]
    pub fn primary_path(&self) -> Option<PathBuf> {
        self.path.as_deref().map(expand_path)
    }

    /// Extra catalog paths, with `~` expanded.
    #[must_use]
    pub fn extra_paths(&self) -> Vec<PathBuf> {
        self.extra_paths.iter().map(|p| expand_path(p)).collect()
    }
}

impl CatalogPatch {
    fn resolve_against(&mut self, root: &Path) {
        let resolve = |value: &str| -> String {
            if value.starts_with('~') || Path::new(value).is_absolute() {
                value.to_string()
            } else {
                root.join(value).display().to_string()
            }
        };
        if let Some(path) = self.path.as_mut() {
            *path = resolve(path);
        }
        if let Some(paths) = self.extra_paths.as_mut() {
            for path in paths.iter_mut() {
                *path = resolve(path);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    pub default_category: String,
    pub show_empty_categories: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            default_category: crate::search::ALL_CATEGORIES.to_string(),
            show_empty_categories: false,
        }
    }
}

impl FilterConfig {
    fn merge(&mut self, patch: FilterPatch) {
        if let Some(value) = patch.default_category {
            self.default_category = value;
        }
        if let Some(value) = patch.show_empty_categories {
            self.show_empty_categories = value;
        }
    }

    #[must_use]
    pub fn default_selector(&self) -> CategorySelector {
        CategorySelector::parse(&self.default_category)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub show_levels: bool,
    pub show_years: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_levels: true,
            show_years: true,
        }
    }
}

impl DisplayConfig {
    fn merge(&mut self, patch: DisplayPatch) {
        if let Some(value) = patch.show_levels {
            self.show_levels = value;
        }
        if let Some(value) = patch.show_years {
            self.show_years = value;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotConfig {
    /// Machine output without passing --machine
    pub enabled: bool,
    /// "json" or "jsonl"
    pub format: String,
    /// Wrap machine output in the status/timestamp/version envelope
    pub include_metadata: bool,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            format: "json".to_string(),
            include_metadata: true,
        }
    }
}

impl RobotConfig {
    fn merge(&mut self, patch: RobotPatch) {
        if let Some(value) = patch.enabled {
            self.enabled = value;
        }
        if let Some(value) = patch.format {
            self.format = value;
        }
        if let Some(value) = patch.include_metadata {
            self.include_metadata = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub catalog: Option<CatalogPatch>,
    pub filter: Option<FilterPatch>,
    pub display: Option<DisplayPatch>,
    pub robot: Option<RobotPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct CatalogPatch {
    pub path: Option<String>,
    pub extra_paths: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct FilterPatch {
    pub default_category: Option<String>,
    pub show_empty_categories: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DisplayPatch {
    pub show_levels: Option<bool>,
    pub show_years: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RobotPatch {
    pub enabled: Option<bool>,
    pub format: Option<String>,
    pub include_metadata: Option<bool>,
}

fn merge_unique(values: Vec<String>, existing: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for value in values.into_iter().chain(existing.iter().cloned()) {
        if seen.insert(value.clone()) {
            out.push(value);
        }
    }
    out
}

fn expand_path(value: &str) -> PathBuf {
    if let Some(rest) = value.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(value)
}

fn parse_robot_format(key: &str, value: &str) -> Result<String> {
    match value.trim().to_lowercase().as_str() {
        "json" => Ok("json".to_string()),
        "jsonl" => Ok("jsonl".to_string()),
        _ => Err(MatrixError::Config(format!(
            "invalid {key} value {value}: expected json or jsonl"
        ))),
    }
}

fn env_bool(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<bool>> {
    match lookup(key) {
        Some(value) => match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Some(true)),
            "0" | "false" | "no" | "off" | "" => Ok(Some(false)),
            _ => Err(MatrixError::Config(format!("invalid {key} value {value}"))),
        },
        None => Ok(None),
    }
}

fn env_list(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<Vec<String>> {
    lookup(key).map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(ToString::to_string)
            .collect()
    })
}
