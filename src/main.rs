//! skillmatrix - Browse, filter and classify a skills matrix.

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use skillmatrix::Result;
use skillmatrix::app::AppContext;
use skillmatrix::cli::Cli;
use skillmatrix::cli::output::robot_error_structured;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // The context decides the output format, so it is built before logging
    // is set up; a context error falls back to what the flags say.
    let ctx = AppContext::from_cli(&cli);
    let machine = match &ctx {
        Ok(ctx) => ctx.robot_mode,
        Err(_) => machine_errors(&cli),
    };
    init_tracing(&cli, machine);

    match ctx.and_then(|ctx| run(&ctx, &cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if machine {
                // Machine mode: structured error on stdout
                let response = robot_error_structured(&e);
                println!(
                    "{}",
                    serde_json::to_string_pretty(&response).unwrap_or_default()
                );
            } else {
                eprintln!("Error: {e}");
                let structured = e.to_structured();
                eprintln!("Hint: {}", structured.suggestion);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(ctx: &AppContext, cli: &Cli) -> Result<()> {
    debug!(
        root = %ctx.root.display(),
        format = ?ctx.output_format,
        sources = ctx.catalog_sources.len(),
        "app context ready"
    );
    skillmatrix::cli::commands::run(ctx, &cli.command)
}

/// Format flags decide; without any, `SKILLMATRIX_ROBOT` does.
fn machine_errors(cli: &Cli) -> bool {
    if cli.plain || cli.output_format.is_some() || cli.machine || cli.robot {
        return cli.json_logs();
    }
    std::env::var("SKILLMATRIX_ROBOT")
        .is_ok_and(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

fn init_tracing(cli: &Cli, json: bool) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,skillmatrix=info",
        1 => "info,skillmatrix=debug",
        2 => "debug,skillmatrix=trace",
        _ => "trace",
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        // JSON logging for machine mode
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
