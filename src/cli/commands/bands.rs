//! skillmatrix bands - Show the active proficiency scale

use clap::Args;

use crate::app::AppContext;
use crate::cli::commands::emit_robot;
use crate::cli::commands::search::level_color;
use crate::cli::output::{HumanLayout, OutputFormat, emit_human, emit_jsonl, emit_tsv};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct BandsArgs {}

pub fn run(ctx: &AppContext, _args: &BandsArgs) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let bands = catalog.scale().bands();

    match ctx.output_format {
        OutputFormat::Json => emit_robot(ctx, bands),
        OutputFormat::Jsonl => emit_jsonl(bands),
        OutputFormat::Tsv => {
            emit_tsv(&["level", "min", "max"], bands, |band| {
                vec![
                    band.level.to_string(),
                    band.min_percentage.to_string(),
                    band.max_percentage.to_string(),
                ]
            });
            Ok(())
        }
        OutputFormat::Human | OutputFormat::Plain => {
            let mut layout = HumanLayout::for_format(ctx.output_format);
            layout.title("Proficiency bands");
            for band in bands {
                let padded = format!("{:<14}", band.level.label());
                let label = if ctx.output_format.use_colors() {
                    level_color(&padded, band.level).to_string()
                } else {
                    padded
                };
                layout.push_line(format!(
                    "  {label}{:>3}-{}%",
                    band.min_percentage, band.max_percentage
                ));
            }
            let lowest = catalog.scale().lowest();
            layout.blank().push_line(format!(
                "Values under {}% are labelled {}",
                lowest.min_percentage,
                lowest.level.label()
            ));
            emit_human(layout);
            Ok(())
        }
    }
}
