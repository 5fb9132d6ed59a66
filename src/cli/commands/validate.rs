//! skillmatrix validate - Validate a catalog file

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::app::{AppContext, resolve_path};
use crate::cli::commands::emit_robot;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_json_line, emit_tsv};
use crate::core::catalog::Catalog;
use crate::error::{MatrixError, Result};

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Catalog file to check; defaults to the configured catalog
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub source: String,
    pub valid: bool,
    pub categories: usize,
    pub skills: usize,
    pub bands: usize,
    pub tags: Vec<String>,
}

impl ValidationReport {
    #[must_use]
    pub fn of(source: impl Into<String>, catalog: &Catalog) -> Self {
        Self {
            source: source.into(),
            valid: true,
            categories: catalog.categories().len(),
            skills: catalog.skill_count(),
            bands: catalog.scale().bands().len(),
            tags: catalog
                .category_tags()
                .into_iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

pub fn run(ctx: &AppContext, args: &ValidateArgs) -> Result<()> {
    let (source, loaded) = match &args.path {
        Some(path) => {
            let path = resolve_path(&ctx.root, path);
            (path.display().to_string(), Catalog::load(&path))
        }
        None => (ctx.catalog_label(), ctx.load_catalog()),
    };

    let catalog = match loaded {
        Ok(catalog) => catalog,
        Err(err) => {
            if !ctx.robot_mode {
                report_problems(&err);
            }
            return Err(err);
        }
    };

    let report = ValidationReport::of(source, &catalog);
    match ctx.output_format {
        OutputFormat::Json => emit_robot(ctx, &report),
        OutputFormat::Jsonl => emit_json_line(&report),
        OutputFormat::Tsv => {
            emit_tsv(
                &["source", "valid", "categories", "skills", "bands"],
                std::slice::from_ref(&report),
                |r| {
                    vec![
                        r.source.clone(),
                        r.valid.to_string(),
                        r.categories.to_string(),
                        r.skills.to_string(),
                        r.bands.to_string(),
                    ]
                },
            );
            Ok(())
        }
        OutputFormat::Human | OutputFormat::Plain => {
            let mut layout = HumanLayout::for_format(ctx.output_format);
            let headline = format!("✓ {} is valid", report.source);
            if ctx.output_format.use_colors() {
                layout.push_line(headline.green().to_string());
            } else {
                layout.push_line(format!("{} is valid", report.source));
            }
            layout
                .kv("Categories", &report.categories.to_string())
                .kv("Skills", &report.skills.to_string())
                .kv("Bands", &report.bands.to_string());
            emit_human(layout);
            Ok(())
        }
    }
}

/// List every validation problem on stderr before the summary error.
fn report_problems(err: &MatrixError) {
    if let MatrixError::ValidationFailed { errors, .. } = err {
        for problem in errors {
            eprintln!("  - {problem}");
        }
    }
}
