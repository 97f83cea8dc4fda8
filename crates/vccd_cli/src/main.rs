//! VCCD caption compiler CLI
//!
//! Compiles a UTF-16LE caption source file into a binary VCCD archive:
//!
//! ```text
//! vccdc closecaption_english.txt
//! ```
//!
//! The output path is the source path with its `.txt` extension
//! replaced by `.dat`.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Compiles caption source files into VCCD archives.
#[derive(Parser)]
#[command(name = "vccdc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Caption source file (.txt, UTF-16LE)
    source: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let Some(output) = output_path(&cli.source) else {
        eprintln!("Only .txt files are accepted.");
        return ExitCode::FAILURE;
    };

    match vccd_core::compile_file(&cli.source, &output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!(
                "An error occured while compiling '{}': {}",
                cli.source.display(),
                err
            );
            ExitCode::FAILURE
        }
    }
}

/// Derives the archive path: the source's `.txt` extension replaced by
/// `.dat`. Returns `None` for any other extension.
fn output_path(source: &Path) -> Option<PathBuf> {
    if source.extension()? != "txt" {
        return None;
    }
    Some(source.with_extension("dat"))
}
