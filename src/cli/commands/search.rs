//! skillmatrix search - Filter the matrix by term and category tag

use clap::Args;
use colored::{ColoredString, Colorize};
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::commands::emit_robot_with_warnings;
use crate::cli::output::{HumanLayout, OutputFormat, emit_jsonl, emit_tsv};
use crate::config::DisplayConfig;
use crate::core::catalog::Catalog;
use crate::core::proficiency::ProficiencyLevel;
use crate::error::{MatrixError, Result};
use crate::search::{CategorySelector, FilterState, LabelledSkill, MatrixView};

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text matched against skill names and descriptions (case-insensitive)
    pub term: Option<String>,

    /// Skill tag to keep, or `all`
    #[arg(long, short)]
    pub category: Option<String>,

    /// Keep categories with no matching skills
    #[arg(long)]
    pub show_empty: bool,
}

pub fn run(ctx: &AppContext, args: &SearchArgs) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let state = filter_state(ctx, args);
    check_selector(&catalog, &state.selected_category)?;

    let view = MatrixView::build(&catalog, &state);
    emit_view(ctx, &view)
}

/// Filter inputs from config defaults, overridden by flags.
pub(crate) fn filter_state(ctx: &AppContext, args: &SearchArgs) -> FilterState {
    let selector = args
        .category
        .as_deref()
        .map_or_else(|| ctx.config.filter.default_selector(), CategorySelector::parse);

    FilterState::new()
        .with_search(args.term.clone().unwrap_or_default())
        .with_category(selector)
        .show_empty(args.show_empty || ctx.config.filter.show_empty_categories)
}

/// Reject tags that no skill carries.
pub(crate) fn check_selector(catalog: &Catalog, selector: &CategorySelector) -> Result<()> {
    match selector {
        CategorySelector::All => Ok(()),
        CategorySelector::Tag(tag) if catalog.has_tag(tag) => Ok(()),
        CategorySelector::Tag(tag) => Err(MatrixError::UnknownCategory {
            tag: tag.clone(),
            known: catalog
                .category_tags()
                .into_iter()
                .map(ToString::to_string)
                .collect(),
        }),
    }
}

/// One JSONL / TSV row
#[derive(Serialize)]
struct SkillRow<'a> {
    category_id: &'a str,
    #[serde(flatten)]
    skill: &'a LabelledSkill<'a>,
}

pub(crate) fn emit_view(ctx: &AppContext, view: &MatrixView<'_>) -> Result<()> {
    match ctx.output_format {
        OutputFormat::Json => emit_robot_with_warnings(ctx, view, view_warnings(view)),
        OutputFormat::Jsonl => emit_jsonl(&rows(view)),
        OutputFormat::Tsv => {
            emit_tsv(
                &["category_id", "id", "name", "category", "proficiency", "level", "years"],
                &rows(view),
                |row| {
                    vec![
                        row.category_id.to_string(),
                        row.skill.skill.id.clone(),
                        row.skill.skill.name.clone(),
                        row.skill.skill.category.clone(),
                        row.skill.skill.proficiency.to_string(),
                        row.skill.level.to_string(),
                        row.skill
                            .skill
                            .years_of_experience
                            .map(|y| y.to_string())
                            .unwrap_or_default(),
                    ]
                },
            );
            Ok(())
        }
        OutputFormat::Human | OutputFormat::Plain => {
            println!("{}", render_view(view, &ctx.config.display, ctx.output_format));
            Ok(())
        }
    }
}

fn view_warnings(view: &MatrixView<'_>) -> Vec<String> {
    if view.visible_skills > 0 {
        Vec::new()
    } else {
        vec![empty_message(&view.filter)]
    }
}

fn rows<'a>(view: &'a MatrixView<'a>) -> Vec<SkillRow<'a>> {
    view.categories
        .iter()
        .flat_map(|category| {
            category.skills.iter().map(|skill| SkillRow {
                category_id: category.id,
                skill,
            })
        })
        .collect()
}

/// Human/plain rendering of a view
pub fn render_view(view: &MatrixView<'_>, display: &DisplayConfig, format: OutputFormat) -> String {
    let mut layout = HumanLayout::for_format(format);

    if view.is_empty() && view.categories.is_empty() {
        layout.push_line(empty_message(&view.filter));
        layout.push_line("Try a shorter search term, or --category all");
        return layout.build();
    }

    layout.title(&format!(
        "Skills matrix: {} of {} skills",
        view.visible_skills, view.total_skills
    ));

    for (index, category) in view.categories.iter().enumerate() {
        if index > 0 {
            layout.blank();
        }
        layout.section(&format!(
            "{} ({}/{}, avg {}%)",
            category.title,
            category.visible.skill_count,
            category.total_skills,
            category.visible.average_proficiency
        ));
        if category.skills.is_empty() {
            layout.push_line("  (no matching skills)");
        }
        for skill in &category.skills {
            layout.push_line(skill_line(skill, display, format));
        }
    }

    layout.build()
}

fn empty_message(state: &FilterState) -> String {
    match (state.search_term.is_empty(), &state.selected_category) {
        (true, CategorySelector::All) => "The catalog has no skills".to_string(),
        (false, CategorySelector::All) => format!("No skills match \"{}\"", state.search_term),
        (true, CategorySelector::Tag(tag)) => format!("No skills tagged {tag}"),
        (false, CategorySelector::Tag(tag)) => {
            format!("No skills tagged {tag} match \"{}\"", state.search_term)
        }
    }
}

fn skill_line(skill: &LabelledSkill<'_>, display: &DisplayConfig, format: OutputFormat) -> String {
    let mut line = format!("  {:<24} {:>3}%", skill.skill.name, skill.skill.proficiency);
    let years = skill
        .skill
        .years_of_experience
        .filter(|_| display.show_years);

    if display.show_levels {
        let label = if years.is_some() {
            format!("{:<12}", skill.level.label())
        } else {
            skill.level.label().to_string()
        };
        line.push_str("  ");
        if format.use_colors() {
            line.push_str(&level_color(&label, skill.level).to_string());
        } else {
            line.push_str(&label);
        }
    }
    if let Some(years) = years {
        line.push_str(&format!("  {years}y"));
    }
    line
}

pub(crate) fn level_color(text: &str, level: ProficiencyLevel) -> ColoredString {
    match level {
        ProficiencyLevel::Expert => text.green().bold(),
        ProficiencyLevel::Advanced => text.cyan(),
        ProficiencyLevel::Intermediate => text.yellow(),
        ProficiencyLevel::Beginner => text.magenta(),
        ProficiencyLevel::Familiar => text.dimmed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::skill::Skill;

    fn plain_view(catalog: &Catalog, state: &FilterState) -> String {
        let view = MatrixView::build(catalog, state);
        render_view(&view, &DisplayConfig::default(), OutputFormat::Plain)
    }

    #[test]
    fn test_check_selector() {
        let catalog = Catalog::builtin().unwrap();
        assert!(check_selector(&catalog, &CategorySelector::All).is_ok());
        assert!(check_selector(&catalog, &CategorySelector::Tag("compliance".into())).is_ok());

        let err = check_selector(&catalog, &CategorySelector::Tag("complaince".into())).unwrap_err();
        match err {
            MatrixError::UnknownCategory { tag, known } => {
                assert_eq!(tag, "complaince");
                assert_eq!(known.len(), 5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_render_nmap_search() {
        let catalog = Catalog::builtin().unwrap();
        let text = plain_view(&catalog, &FilterState::new().with_search("nmap"));
        assert_eq!(
            text,
            "Skills matrix: 1 of 18 skills\n\
             \n\
             Offensive Security (1/4, avg 95%)\n\
             ---------------------------------\n  \
             Nmap                      95%  Expert        10y"
        );
    }

    #[test]
    fn test_render_empty_state() {
        let catalog = Catalog::builtin().unwrap();
        let text = plain_view(&catalog, &FilterState::new().with_search("cobol"));
        assert!(text.starts_with("No skills match \"cobol\""));
    }

    #[test]
    fn test_render_show_empty_marks_categories() {
        let catalog = Catalog::builtin().unwrap();
        let text = plain_view(&catalog, &FilterState::new().with_search("cobol").show_empty(true));
        assert!(text.contains("Skills matrix: 0 of 18 skills"));
        assert_eq!(text.matches("(no matching skills)").count(), 5);
    }

    #[test]
    fn test_skill_line_respects_display_toggles() {
        let skill = Skill::new("gdpr", "GDPR", "compliance", 65).with_years(3.0);
        let labelled = LabelledSkill {
            skill: &skill,
            level: ProficiencyLevel::Intermediate,
        };
        let display = DisplayConfig {
            show_levels: false,
            show_years: false,
        };
        assert_eq!(
            skill_line(&labelled, &display, OutputFormat::Plain),
            "  GDPR                      65%"
        );

        let display = DisplayConfig {
            show_levels: true,
            show_years: false,
        };
        assert_eq!(
            skill_line(&labelled, &display, OutputFormat::Plain),
            "  GDPR                      65%  Intermediate"
        );
    }

    #[test]
    fn test_empty_messages() {
        let state = FilterState::new().with_category(CategorySelector::Tag("dev".into()));
        assert_eq!(empty_message(&state), "No skills tagged dev");
        let state = state.with_search("go");
        assert_eq!(empty_message(&state), "No skills tagged dev match \"go\"");
    }
}
