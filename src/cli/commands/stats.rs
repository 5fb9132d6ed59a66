//! skillmatrix stats - Category statistics and level distribution

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::commands::emit_robot;
use crate::cli::output::{HumanLayout, OutputFormat, emit_jsonl, emit_tsv};
use crate::core::catalog::Catalog;
use crate::core::skill::{CategoryStats, SkillCategory, compute_category_stats};
use crate::error::Result;
use crate::search::{LevelDistribution, level_distribution};

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Only this category (by id)
    #[arg(long, short)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStatsRow<'a> {
    pub id: &'a str,
    pub title: &'a str,
    #[serde(flatten)]
    pub stats: CategoryStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsReport<'a> {
    pub categories: Vec<CategoryStatsRow<'a>>,
    /// Totals over the selected categories
    #[serde(flatten)]
    pub totals: CategoryStats,
    pub distribution: LevelDistribution,
}

/// Stats for the whole catalog, or one category when `category` is set.
pub fn build_report<'a>(catalog: &'a Catalog, category: Option<&str>) -> Result<StatsReport<'a>> {
    let selected: Vec<&SkillCategory> = match category {
        Some(id) => vec![catalog.require_category(id)?],
        None => catalog.categories().iter().collect(),
    };

    let skills = || selected.iter().flat_map(|c| c.skills().iter());
    Ok(StatsReport {
        categories: selected
            .iter()
            .map(|c| CategoryStatsRow {
                id: c.id(),
                title: c.title(),
                stats: c.stats(),
            })
            .collect(),
        totals: compute_category_stats(skills()),
        distribution: level_distribution(skills(), catalog.scale()),
    })
}

pub fn run(ctx: &AppContext, args: &StatsArgs) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let report = build_report(&catalog, args.category.as_deref())?;

    match ctx.output_format {
        OutputFormat::Json => emit_robot(ctx, &report),
        OutputFormat::Jsonl => emit_jsonl(&report.categories),
        OutputFormat::Tsv => {
            emit_tsv(
                &["id", "title", "skill_count", "average_proficiency"],
                &report.categories,
                |row| {
                    vec![
                        row.id.to_string(),
                        row.title.to_string(),
                        row.stats.skill_count.to_string(),
                        row.stats.average_proficiency.to_string(),
                    ]
                },
            );
            Ok(())
        }
        OutputFormat::Human | OutputFormat::Plain => {
            println!("{}", render_report(&report, ctx.output_format));
            Ok(())
        }
    }
}

pub fn render_report(report: &StatsReport<'_>, format: OutputFormat) -> String {
    let mut layout = HumanLayout::for_format(format);
    layout
        .title("Skills matrix statistics")
        .kv("Categories", &report.categories.len().to_string())
        .kv("Skills", &report.totals.skill_count.to_string())
        .kv("Average", &format!("{}%", report.totals.average_proficiency))
        .blank()
        .section("By category");

    for row in &report.categories {
        layout.push_line(format!(
            "  {:<28} {:>3} skills  avg {:>3}%",
            row.title, row.stats.skill_count, row.stats.average_proficiency
        ));
    }

    layout.blank().section("Levels");
    for entry in &report.distribution.levels {
        layout.push_line(format!("  {:<14} {:>3}", entry.level.label(), entry.count));
    }
    if report.distribution.below_lowest_band > 0 {
        layout.push_line(format!(
            "  {:<14} {:>3}",
            "Below bands", report.distribution.below_lowest_band
        ));
    }

    layout.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::proficiency::ProficiencyLevel;
    use crate::error::MatrixError;

    #[test]
    fn test_whole_catalog_report() {
        let catalog = Catalog::builtin().unwrap();
        let report = build_report(&catalog, None).unwrap();
        assert_eq!(report.categories.len(), 5);
        assert_eq!(report.totals.skill_count, 18);
        assert_eq!(report.totals.average_proficiency, 82);
        let averages: Vec<u8> = report
            .categories
            .iter()
            .map(|c| c.stats.average_proficiency)
            .collect();
        assert_eq!(averages, vec![89, 91, 78, 77, 72]);
    }

    #[test]
    fn test_single_category_report() {
        let catalog = Catalog::builtin().unwrap();
        let report = build_report(&catalog, Some("development")).unwrap();
        assert_eq!(report.categories.len(), 1);
        assert_eq!(report.totals.skill_count, 4);
        assert_eq!(report.totals.average_proficiency, 72);
        assert_eq!(report.distribution.count(ProficiencyLevel::Beginner), 1);
        assert_eq!(report.distribution.count(ProficiencyLevel::Intermediate), 0);
    }

    #[test]
    fn test_unknown_category_is_error() {
        let catalog = Catalog::builtin().unwrap();
        let err = build_report(&catalog, Some("marketing")).unwrap_err();
        assert!(matches!(err, MatrixError::CategoryNotFound(id) if id == "marketing"));
    }

    #[test]
    fn test_report_json_shape() {
        let catalog = Catalog::builtin().unwrap();
        let report = build_report(&catalog, Some("compliance")).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["skill_count"], 3);
        assert_eq!(json["average_proficiency"], 77);
        assert_eq!(json["categories"][0]["id"], "compliance");
        assert_eq!(json["distribution"]["levels"][0]["level"], "expert");
    }
}
