//! Command handler for the cobertify CLI.
//!
//! `cmd_convert` returns the rendered document as a `String`, so it can be
//! tested without capturing stdout and nothing is printed before the whole
//! conversion has succeeded.

use std::io::Read;

use anyhow::{Context, Result};

use crate::convert::{self, ConvertOptions};
use crate::parsers::jacoco::JacocoParser;
use crate::parsers::Parser;
use crate::writer;

/// Input path that selects standard input.
pub const STDIN_PATH: &str = "-";

/// Read the whole input, either the named file or standard input.
pub fn read_input(input: &str) -> Result<Vec<u8>> {
    if input == STDIN_PATH {
        let mut content = Vec::new();
        std::io::stdin()
            .lock()
            .read_to_end(&mut content)
            .context("Failed to read report from stdin")?;
        Ok(content)
    } else {
        std::fs::read(input).with_context(|| format!("Failed to read {}", input))
    }
}

/// Parse a JaCoCo report and render it as a Cobertura document.
pub fn convert_bytes(content: &[u8], options: &ConvertOptions) -> Result<String> {
    let report = JacocoParser.parse(content)?;
    let coverage = convert::convert_report(&report, options);
    log::info!(
        "converted report '{}': {} packages",
        report.name.as_deref().unwrap_or("unnamed"),
        coverage.packages.len()
    );
    Ok(writer::render(&coverage)?)
}

pub fn cmd_convert(input: &str, options: &ConvertOptions) -> Result<String> {
    let source = if input == STDIN_PATH { "<stdin>" } else { input };
    log::info!("reading JaCoCo report from {}", source);

    let content = read_input(input)?;
    convert_bytes(&content, options).with_context(|| format!("Failed to convert {}", source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_bytes_scenario() {
        let input = include_bytes!("../tests/fixtures/scenario_jacoco.xml");
        let xml = convert_bytes(input, &ConvertOptions::default()).unwrap();

        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains(r#"<coverage timestamp="1500000000""#));
        assert!(xml.contains(r#"condition-coverage="50% (1/2)""#));
    }

    #[test]
    fn test_cmd_convert_missing_file() {
        let err = cmd_convert("/nonexistent/jacoco.xml", &ConvertOptions::default()).unwrap_err();
        assert!(err.to_string().contains("Failed to read /nonexistent/jacoco.xml"));
    }

    #[test]
    fn test_cmd_convert_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jacoco.xml");
        std::fs::write(&path, include_bytes!("../tests/fixtures/minimal_jacoco.xml")).unwrap();

        let xml = cmd_convert(path.to_str().unwrap(), &ConvertOptions::default()).unwrap();
        assert!(xml.contains("<packages/>"));
    }

    #[test]
    fn test_cmd_convert_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.xml");
        std::fs::write(&path, include_bytes!("../tests/fixtures/malformed_jacoco.xml")).unwrap();

        let err = cmd_convert(path.to_str().unwrap(), &ConvertOptions::default()).unwrap_err();
        assert!(format!("{err:#}").contains("XML parse error"), "{err:#}");
    }
}
