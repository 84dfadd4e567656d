//! File I/O helpers for domain lists and findings reports.

use crate::error::TypoCheckError;
use crate::types::Finding;
use std::fs;
use std::path::Path;

/// Read source domains from a file: one per line, trimmed, blank lines
/// ignored. No further validation happens here.
pub fn read_domains_file(path: &Path) -> Result<Vec<String>, TypoCheckError> {
    let content = fs::read_to_string(path).map_err(|e| {
        TypoCheckError::file_error(
            path.to_string_lossy(),
            format!("Failed to read input file: {}", e),
        )
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Write findings to the output file, one line each, in run order.
///
/// The file is created or truncated in a single write at the end of a run.
/// `detailed` selects the tab-separated WHOIS cross-reference format over
/// the bare typo-per-line format.
pub fn write_findings(
    path: &Path,
    findings: &[Finding],
    detailed: bool,
) -> Result<(), TypoCheckError> {
    let mut content = String::new();
    for finding in findings {
        let line = if detailed {
            finding.detailed_line()
        } else {
            finding.basic_line()
        };
        content.push_str(&line);
        content.push('\n');
    }

    fs::write(path, content).map_err(|e| {
        TypoCheckError::file_error(
            path.to_string_lossy(),
            format!("Failed to write output file: {}", e),
        )
    })
}
