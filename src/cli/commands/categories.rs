//! skillmatrix categories - Category ids and filter tags

use clap::Args;
use itertools::Itertools;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::commands::emit_robot;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_jsonl, emit_tsv};
use crate::core::catalog::Catalog;
use crate::error::Result;
use crate::search::ALL_CATEGORIES;

#[derive(Args, Debug)]
pub struct CategoriesArgs {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryEntry<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<&'a str>,
    pub skill_count: usize,
    /// Distinct skill tags inside this category
    pub tags: Vec<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoriesReport<'a> {
    pub categories: Vec<CategoryEntry<'a>>,
    /// Values accepted by `search --category`, `all` first
    pub filter_tags: Vec<&'a str>,
}

pub fn build_report(catalog: &Catalog) -> CategoriesReport<'_> {
    let categories = catalog
        .categories()
        .iter()
        .map(|c| CategoryEntry {
            id: c.id(),
            title: c.title(),
            description: c.description(),
            icon: c.icon(),
            skill_count: c.skill_count(),
            tags: c.skills().iter().map(|s| s.category.as_str()).unique().collect(),
        })
        .collect();

    let mut filter_tags = vec![ALL_CATEGORIES];
    filter_tags.extend(catalog.category_tags());

    CategoriesReport {
        categories,
        filter_tags,
    }
}

pub fn run(ctx: &AppContext, _args: &CategoriesArgs) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let report = build_report(&catalog);

    match ctx.output_format {
        OutputFormat::Json => emit_robot(ctx, &report),
        OutputFormat::Jsonl => emit_jsonl(&report.categories),
        OutputFormat::Tsv => {
            emit_tsv(
                &["id", "title", "skill_count", "tags"],
                &report.categories,
                |c| {
                    vec![
                        c.id.to_string(),
                        c.title.to_string(),
                        c.skill_count.to_string(),
                        c.tags.iter().join(","),
                    ]
                },
            );
            Ok(())
        }
        OutputFormat::Human | OutputFormat::Plain => {
            let mut layout = HumanLayout::for_format(ctx.output_format);
            layout.title("Categories");
            for c in &report.categories {
                layout.kv(c.id, &format!("{} ({} skills)", c.title, c.skill_count));
            }
            layout
                .blank()
                .push_line(format!("Filter tags: {}", report.filter_tags.iter().join(", ")));
            emit_human(layout);
            Ok(())
        }
    }
}
