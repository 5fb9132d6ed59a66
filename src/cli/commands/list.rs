//! skillmatrix list - Show every skill

use clap::{Args, ValueEnum};
use colored::Colorize;
use itertools::Itertools;

use crate::app::AppContext;
use crate::cli::commands::emit_robot;
use crate::cli::commands::search::{emit_view, level_color};
use crate::cli::output::{OutputFormat, emit_jsonl, emit_tsv};
use crate::error::Result;
use crate::search::{FilterState, LabelledSkill, MatrixView};

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Sort order; `catalog` keeps the category grouping
    #[arg(long, value_enum, default_value = "catalog")]
    pub sort: ListSort,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListSort {
    /// Grouped by category, in catalog order
    Catalog,
    /// Flat, by skill name
    Name,
    /// Flat, highest proficiency first
    Proficiency,
}

pub fn run(ctx: &AppContext, args: &ListArgs) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let state = FilterState::new().show_empty(ctx.config.filter.show_empty_categories);
    let view = MatrixView::build(&catalog, &state);

    match args.sort {
        ListSort::Catalog => emit_view(ctx, &view),
        sort => {
            let skills = sorted_skills(&view, sort);
            if ctx.robot_mode {
                list_robot(ctx, &skills)
            } else {
                list_flat(ctx, &skills);
                Ok(())
            }
        }
    }
}

fn sorted_skills<'a>(view: &'a MatrixView<'a>, sort: ListSort) -> Vec<&'a LabelledSkill<'a>> {
    let skills = view.skills();
    match sort {
        ListSort::Catalog => skills.collect(),
        ListSort::Name => skills
            .sorted_by(|a, b| {
                a.skill
                    .name
                    .to_lowercase()
                    .cmp(&b.skill.name.to_lowercase())
            })
            .collect(),
        // stable: ties keep catalog order
        ListSort::Proficiency => skills
            .sorted_by(|a, b| b.skill.proficiency.cmp(&a.skill.proficiency))
            .collect(),
    }
}

fn list_robot(ctx: &AppContext, skills: &[&LabelledSkill<'_>]) -> Result<()> {
    if ctx.output_format == OutputFormat::Jsonl {
        emit_jsonl(skills)
    } else {
        emit_robot(ctx, skills)
    }
}

fn list_flat(ctx: &AppContext, skills: &[&LabelledSkill<'_>]) {
    if ctx.output_format == OutputFormat::Tsv {
        emit_tsv(
            &["id", "name", "category", "proficiency", "level"],
            skills,
            |s| {
                vec![
                    s.skill.id.clone(),
                    s.skill.name.clone(),
                    s.skill.category.clone(),
                    s.skill.proficiency.to_string(),
                    s.level.to_string(),
                ]
            },
        );
        return;
    }

    if skills.is_empty() {
        println!("{}", "No skills found".dimmed());
        return;
    }

    let colors = ctx.output_format.use_colors();
    let header = format!("{:<24} {:<20} {:>4}  {}", "NAME", "CATEGORY", "PCT", "LEVEL");
    if colors {
        println!("{}", header.bold());
        println!("{}", "─".repeat(header.len()).dimmed());
    } else {
        println!("{header}");
    }
    for s in skills {
        let level = if colors {
            level_color(s.level.label(), s.level).to_string()
        } else {
            s.level.label().to_string()
        };
        println!(
            "{:<24} {:<20} {:>3}%  {}",
            s.skill.name, s.skill.category, s.skill.proficiency, level
        );
    }
}
