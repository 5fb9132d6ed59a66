//! Sample catalogs and an isolated project directory for tests.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::PROJECT_CONFIG_FILE;
use crate::core::catalog::{Catalog, CatalogFormat};
use crate::core::proficiency::ProficiencyScale;
use crate::core::skill::{Skill, SkillCategory};

/// Two categories, one skill each: nmap (tag `vuln`) and react (tag `dev`).
pub const TWO_CATEGORY_TOML: &str = r#"
[[categories]]
id = "vulnerability"
title = "Vulnerability Assessment"
description = "Finding weaknesses before attackers do"
icon = "radar"

[[categories.skills]]
id = "nmap"
name = "Nmap"
category = "vuln"
proficiency = 95
years_of_experience = 10
description = "Network port scanner"

[[categories]]
id = "development"
title = "Development"
description = "Front end work"

[[categories.skills]]
id = "react"
name = "React"
category = "dev"
proficiency = 85
years_of_experience = 4
description = "UI library"
"#;

/// Same catalog as JSON with camelCase keys.
pub const TWO_CATEGORY_JSON: &str = r#"{
  "categories": [
    {
      "id": "vulnerability",
      "title": "Vulnerability Assessment",
      "skills": [
        { "id": "nmap", "name": "Nmap", "category": "vuln", "proficiency": 95, "yearsOfExperience": 10 }
      ]
    },
    {
      "id": "development",
      "title": "Development",
      "skills": [
        { "id": "react", "name": "React", "category": "dev", "proficiency": 85 }
      ]
    }
  ]
}"#;

/// Catalog with three problems: proficiency 120, empty name, duplicate skill id.
pub const BROKEN_TOML: &str = r#"
[[categories]]
id = "ops"
title = "Operations"

[[categories.skills]]
id = "bash"
name = "Bash"
proficiency = 120

[[categories.skills]]
id = "git"
name = ""
proficiency = 50

[[categories.skills]]
id = "vim"
name = "Vim"
proficiency = 60

[[categories.skills]]
id = "vim"
name = "Neovim"
proficiency = 70
"#;

/// Custom two-band scale.
pub const CUSTOM_BANDS_TOML: &str = r#"
[[bands]]
level = "expert"
min_percentage = 80
max_percentage = 100

[[bands]]
level = "beginner"
min_percentage = 0
max_percentage = 79

[[categories]]
id = "ops"
title = "Operations"

[[categories.skills]]
id = "bash"
name = "Bash"
proficiency = 79
"#;

/// The two-category catalog, built in memory.
pub fn two_category_catalog() -> Catalog {
    Catalog::parse(TWO_CATEGORY_TOML, CatalogFormat::Toml, "fixture")
        .expect("fixture catalog is valid")
}

/// Categories of one skill each, with the given proficiencies.
pub fn catalog_with_proficiencies(values: &[u8]) -> Catalog {
    let categories = values
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            SkillCategory::new(
                format!("cat-{i}"),
                format!("Category {i}"),
                "",
                vec![Skill::new(format!("skill-{i}"), format!("Skill {i}"), "t", p)],
            )
        })
        .collect();
    Catalog::new(ProficiencyScale::default(), categories).expect("unique fixture ids")
}

/// Isolated project root holding catalog and config files.
pub struct ProjectFixture {
    pub temp_dir: TempDir,
}

impl Default for ProjectFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        println!("[FIXTURE] Created project root: {}", temp_dir.path().display());
        Self { temp_dir }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file relative to the root.
    pub fn write(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.root().join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        full_path
    }

    /// Write `skillmatrix.toml` in the root.
    pub fn write_config(&self, content: &str) -> PathBuf {
        self.write(PROJECT_CONFIG_FILE, content)
    }
}
