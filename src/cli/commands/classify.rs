//! skillmatrix classify - Label percentages with proficiency levels

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::commands::emit_robot;
use crate::cli::commands::search::level_color;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_jsonl, emit_tsv};
use crate::core::proficiency::{ProficiencyLevel, ProficiencyScale};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Proficiency percentages; values outside 0-100 are clamped
    #[arg(required = true, allow_negative_numbers = true, value_name = "PCT")]
    pub values: Vec<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub input: i32,
    pub level: ProficiencyLevel,
    pub min_percentage: u8,
    pub max_percentage: u8,
    /// Value sat under the lowest band and took its label
    pub fallback: bool,
}

pub fn classify_all(values: &[i32], scale: &ProficiencyScale) -> Vec<Classification> {
    values
        .iter()
        .map(|&input| {
            let band = scale.classify(input);
            Classification {
                input,
                level: band.level,
                min_percentage: band.min_percentage,
                max_percentage: band.max_percentage,
                fallback: scale.is_fallback(input),
            }
        })
        .collect()
}

pub fn run(ctx: &AppContext, args: &ClassifyArgs) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let results = classify_all(&args.values, catalog.scale());

    match ctx.output_format {
        OutputFormat::Json => emit_robot(ctx, &results),
        OutputFormat::Jsonl => emit_jsonl(&results),
        OutputFormat::Tsv => {
            emit_tsv(
                &["input", "level", "min", "max", "fallback"],
                &results,
                |c| {
                    vec![
                        c.input.to_string(),
                        c.level.to_string(),
                        c.min_percentage.to_string(),
                        c.max_percentage.to_string(),
                        c.fallback.to_string(),
                    ]
                },
            );
            Ok(())
        }
        OutputFormat::Human | OutputFormat::Plain => {
            let mut layout = HumanLayout::for_format(ctx.output_format);
            for c in &results {
                let label = if ctx.output_format.use_colors() {
                    level_color(c.level.label(), c.level).to_string()
                } else {
                    c.level.label().to_string()
                };
                let mut line = format!(
                    "{:>4}%  {label} ({}-{})",
                    c.input, c.min_percentage, c.max_percentage
                );
                if c.fallback {
                    line.push_str("  [below lowest band]");
                }
                layout.push_line(line);
            }
            emit_human(layout);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_all_default_scale() {
        let results = classify_all(&[95, 89, 50, 5, 150, -3], &ProficiencyScale::default());
        let levels: Vec<_> = results.iter().map(|c| c.level).collect();
        assert_eq!(
            levels,
            vec![
                ProficiencyLevel::Expert,
                ProficiencyLevel::Advanced,
                ProficiencyLevel::Intermediate,
                ProficiencyLevel::Familiar,
                ProficiencyLevel::Expert,
                ProficiencyLevel::Familiar,
            ]
        );
        assert!(!results[0].fallback);
        assert!(results[3].fallback);
        assert_eq!(results[1].min_percentage, 70);
        assert_eq!(results[1].max_percentage, 89);
    }

    #[test]
    fn test_classification_serializes_lowercase_level() {
        let results = classify_all(&[30], &ProficiencyScale::default());
        let json = serde_json::to_value(&results[0]).unwrap();
        assert_eq!(json["level"], "beginner");
        assert_eq!(json["input"], 30);
        assert_eq!(json["fallback"], false);
    }
}
