use anyhow::Context;
use clap::Parser;
use image_extractor::{
    Cli, ExtractorError, ImageExtractor, OutputFormatter, OutputMode, ProjectLayout,
    UserFriendlyError,
};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    match try_run(&cli) {
        Ok(code) => code,
        Err(e) => {
            startup_formatter(&cli).print_unexpected_error(&format!("{:#}", e));
            1
        }
    }
}

fn try_run(cli: &Cli) -> anyhow::Result<i32> {
    let layout =
        ProjectLayout::from_executable().context("Failed to locate the program directory")?;

    if cli.generate_config {
        return Ok(handle_generate_config(cli, &layout));
    }

    let config = match cli.load_config(&layout.project_root) {
        Ok(config) => config,
        Err(e) => {
            startup_formatter(cli).print_user_friendly_error(&e);
            return Ok(1);
        }
    };

    let extractor =
        ImageExtractor::new(layout, config).context("Failed to initialize the extractor")?;
    let formatter = extractor.output_formatter();

    formatter.print_banner();

    let exit_code = match extractor.run() {
        Ok(_) if !extractor.is_running() => {
            formatter.print_interrupted();
            1
        }
        Ok(true) => {
            formatter.print_completed();
            0
        }
        Ok(false) => {
            formatter.print_failed();
            1
        }
        Err(ExtractorError::Cancelled) => {
            formatter.print_interrupted();
            1
        }
        Err(e) => {
            formatter.print_unexpected_error(&e.user_message());
            1
        }
    };

    Ok(exit_code)
}

fn handle_generate_config(cli: &Cli, layout: &ProjectLayout) -> i32 {
    let config_path = cli.config_output_path(&layout.project_root);

    match ImageExtractor::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path.display());
            println!("\nSettings in this file only change how progress is displayed.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn startup_formatter(cli: &Cli) -> OutputFormatter {
    let mode = cli
        .output_format
        .map(|f| OutputMode::from_string(f.as_str()))
        .unwrap_or(OutputMode::Human);
    OutputFormatter::new(mode, 1, cli.quiet)
}
