use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "image-extractor")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Collect images from nested folders into one flat output directory")]
#[command(
    long_about = "Image Extractor scans every folder below the 'input' directory next to the \
                  program's folder and copies each image into the sibling 'output' directory, \
                  named {folder}_{file} with a numeric suffix when that name is taken."
)]
#[command(before_help = "🖼️  Image Extractor")]
#[command(after_help = "LAYOUT:\n  \
    project/\n    \
      bin/image-extractor\n    \
      input/<folders with images>\n    \
      output/                      (created if missing)\n\n\
    No arguments are required; flags only change how progress is shown.")]
pub struct Cli {
    /// Output format for progress and the final report
    #[arg(long, value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Verbose output level (-v shows skipped files and paths)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only errors and the final summary)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable the progress spinner
    #[arg(long)]
    pub no_progress: bool,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Human => "human",
            OutputFormat::Json => "json",
            OutputFormat::Plain => "plain",
        }
    }
}

impl Cli {
    /// Loads the config file (explicit or found in `search_dir`) and applies
    /// flag overrides on top.
    pub fn load_config(&self, search_dir: &Path) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref(), search_dir)?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        // Level 1 is the default; each -v adds one
        let verbose = (self.verbose > 0).then(|| self.verbose.saturating_add(1));

        CliOverrides::new()
            .with_mode(self.output_format.map(|f| f.as_str().to_string()))
            .with_verbose(verbose)
            .with_quiet(self.quiet)
            .with_no_progress(self.no_progress)
    }

    pub fn config_output_path(&self, project_root: &Path) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(|| project_root.join(crate::config::CONFIG_FILE_NAMES[0]))
    }
}
