use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;

use cobertify::cli;
use cobertify::convert::{ConvertOptions, DEFAULT_SOURCE_EXTENSION};

/// Convert a JaCoCo XML coverage report into Cobertura XML.
#[derive(Parser)]
#[command(name = "cobertify", version, about)]
struct Args {
    /// Path to the JaCoCo XML report, or `-` to read standard input.
    input: String,

    /// Tool version written to the `version` attribute. Also adds the
    /// covered/valid totals; pass an empty string to omit both.
    #[arg(value_name = "VERSION")]
    tool_version: String,

    /// Source roots listed in the `<sources>` element.
    #[arg(value_name = "SOURCE_ROOTS", default_value = ".", allow_hyphen_values = true)]
    source_roots: Vec<String>,

    /// Extension appended to source file names guessed from class names.
    #[arg(long, default_value = DEFAULT_SOURCE_EXTENSION)]
    source_ext: String,

    /// Write the Cobertura report to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            // Usage errors exit with 1 rather than clap's 2.
            let _ = e.print();
            std::process::exit(1);
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let options = ConvertOptions {
        source_roots: args.source_roots,
        version: Some(args.tool_version).filter(|v| !v.is_empty()),
        source_extension: args.source_ext,
    };

    let xml = cli::cmd_convert(&args.input, &options)?;

    match &args.output {
        Some(path) => std::fs::write(path, &xml)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(xml.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
