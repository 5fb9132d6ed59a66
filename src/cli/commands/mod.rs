//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - `run()` function to execute the command

use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{OutputFormat, RobotResponse, emit_json, emit_json_line, robot_ok};
use crate::cli::Commands;
use crate::error::Result;

pub mod bands;
pub mod categories;
pub mod classify;
pub mod list;
pub mod search;
pub mod stats;
pub mod validate;

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Search(args) => search::run(ctx, args),
        Commands::List(args) => list::run(ctx, args),
        Commands::Classify(args) => classify::run(ctx, args),
        Commands::Stats(args) => stats::run(ctx, args),
        Commands::Categories(args) => categories::run(ctx, args),
        Commands::Bands(args) => bands::run(ctx, args),
        Commands::Validate(args) => validate::run(ctx, args),
    }
}

/// Emit a JSON payload, wrapped in the robot envelope unless disabled.
pub(crate) fn emit_robot<T: Serialize>(ctx: &AppContext, data: T) -> Result<()> {
    emit_robot_with_warnings(ctx, data, Vec::new())
}

/// Like [`emit_robot`], attaching warnings to the envelope.
///
/// Warnings are dropped along with the envelope when metadata is disabled.
pub(crate) fn emit_robot_with_warnings<T: Serialize>(
    ctx: &AppContext,
    data: T,
    warnings: Vec<String>,
) -> Result<()> {
    let single_line = ctx.output_format == OutputFormat::Jsonl;
    if !ctx.include_metadata() {
        return if single_line {
            emit_json_line(&data)
        } else {
            emit_json(&data)
        };
    }

    let response = warnings
        .into_iter()
        .fold(robot_ok(data), RobotResponse::with_warning);
    if single_line {
        emit_json_line(&response)
    } else {
        emit_json(&response)
    }
}
