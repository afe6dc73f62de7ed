//! `oneshot` command-line entry point.
//!
//! # Responsibility
//! - Parse arguments, bootstrap logging and build the pipeline config.
//! - Turn stage failures into their distinct process exit codes.

use clap::{Parser, Subcommand};
use oneshot_core::extract::extract_to_file;
use oneshot_core::pipeline::{EXIT_EXTRACTION_UNAVAILABLE, EXIT_OK};
use oneshot_core::{
    default_log_level, init_logging, init_stderr_logging, package_tree, probe_extractor,
    run_pipeline, ExtractorProbe, PipelineConfig, PipelineError,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const STDERR_DEFAULT_LEVEL: &str = "warn";

#[derive(Parser)]
#[command(name = "oneshot")]
#[command(about = "Convert a document into validated, LLM-friendly atomic Markdown docs")]
#[command(version)]
struct Cli {
    /// Log level: trace, debug, info, warn or error
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Write rotating log files to this directory instead of stderr
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract, chunk, write the docs tree and package it
    Run {
        /// Input document (.pdf, .txt or .md)
        input: PathBuf,

        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory receiving the docs tree and archive
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Minimum words per chunk before merging backwards
        #[arg(long)]
        min_words: Option<usize>,

        /// Word count at which a chunk is sealed
        #[arg(long)]
        target_words: Option<usize>,

        /// Maximum slug length
        #[arg(long)]
        slug_max: Option<usize>,

        /// Skip validation and archiving
        #[arg(long)]
        no_package: bool,

        /// Do not write the intermediate extracted text
        #[arg(long)]
        no_intermediate: bool,
    },

    /// Extract normalized text from a document into a file
    Extract {
        /// Input document (.pdf, .txt or .md)
        input: PathBuf,
        /// Destination text file
        output: PathBuf,
    },

    /// Validate an existing docs directory and archive it
    Package {
        /// Docs directory produced by `run`
        dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(message) = setup_logging(cli.log_level.as_deref(), cli.log_dir.as_deref()) {
        eprintln!("warning: logging disabled: {message}");
    }

    let code = match cli.command {
        Commands::Run {
            input,
            config,
            out,
            min_words,
            target_words,
            slug_max,
            no_package,
            no_intermediate,
        } => {
            let overrides = Overrides {
                out,
                min_words,
                target_words,
                slug_max,
                no_package,
                no_intermediate,
            };
            run_command(&input, config.as_deref(), overrides)
        }
        Commands::Extract { input, output } => extract_command(&input, &output),
        Commands::Package { dir } => package_command(&dir),
    };

    ExitCode::from(u8::try_from(code).unwrap_or(1))
}

fn setup_logging(level: Option<&str>, log_dir: Option<&Path>) -> Result<(), String> {
    match log_dir {
        Some(dir) => {
            let absolute = if dir.is_absolute() {
                dir.to_path_buf()
            } else {
                std::env::current_dir()
                    .map_err(|err| format!("cannot resolve current directory: {err}"))?
                    .join(dir)
            };
            init_logging(
                level.unwrap_or_else(|| default_log_level()),
                &absolute.to_string_lossy(),
            )
        }
        None => init_stderr_logging(level.unwrap_or(STDERR_DEFAULT_LEVEL)),
    }
}

struct Overrides {
    out: Option<PathBuf>,
    min_words: Option<usize>,
    target_words: Option<usize>,
    slug_max: Option<usize>,
    no_package: bool,
    no_intermediate: bool,
}

fn build_config(
    config_path: Option<&Path>,
    overrides: Overrides,
) -> Result<PipelineConfig, PipelineError> {
    let mut config = match config_path {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(out) = overrides.out {
        config.output.root = out;
    }
    if let Some(min_words) = overrides.min_words {
        config.chunking.min_words = min_words;
    }
    if let Some(target_words) = overrides.target_words {
        config.chunking.target_words = target_words;
    }
    if let Some(slug_max) = overrides.slug_max {
        config.slug.max_len = slug_max;
    }
    if overrides.no_package {
        config.output.package = false;
    }
    if overrides.no_intermediate {
        config.output.keep_intermediate = false;
    }
    config.validate()?;
    Ok(config)
}

fn run_command(input: &Path, config_path: Option<&Path>, overrides: Overrides) -> i32 {
    if !input.is_file() {
        return report_error(&PipelineError::InputNotFound(input.to_path_buf()));
    }
    let config = match build_config(config_path, overrides) {
        Ok(config) => config,
        Err(err) => return report_error(&err),
    };

    match run_pipeline(input, &config) {
        Ok(report) => {
            println!(
                "Wrote {} atomic documents to {}",
                report.files.len(),
                report.docs_dir.display()
            );
            match report.archive {
                Some(archive) => println!("Created {}", archive.display()),
                None => println!("Packaging skipped; docs are in {}", report.docs_dir.display()),
            }
            EXIT_OK
        }
        Err(err) => report_error(&err),
    }
}

fn extract_command(input: &Path, output: &Path) -> i32 {
    if !input.is_file() {
        return report_error(&PipelineError::InputNotFound(input.to_path_buf()));
    }
    let extractor = match probe_extractor(input) {
        ExtractorProbe::Available(extractor) => extractor,
        ExtractorProbe::Unavailable(reason) => {
            eprintln!("error: {reason}");
            return EXIT_EXTRACTION_UNAVAILABLE;
        }
    };
    match extract_to_file(extractor.as_ref(), input, output) {
        Ok(_) => {
            println!("Wrote {}", output.display());
            EXIT_OK
        }
        Err(err) => report_error(&PipelineError::from(err)),
    }
}

fn package_command(dir: &Path) -> i32 {
    match package_tree(dir) {
        Ok(archive) => {
            println!("Created {}", archive.display());
            EXIT_OK
        }
        Err(err) => report_error(&PipelineError::from(err)),
    }
}

fn report_error(err: &PipelineError) -> i32 {
    eprintln!("error: {err}");
    err.exit_code()
}
