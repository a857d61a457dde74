//! Implementation of `accval kinds`: lists every kind `validate` accepts.
use std::io::Write;

use accval_core::SubmissionKind;

use crate::OutputFormat;
use crate::error::CliError;

/// Writes the kind list to stdout: one `family  kind` line per kind in
/// human mode, or a JSON array of `{"family", "kind"}` objects.
///
/// # Errors
///
/// Returns [`CliError::IoError`] if stdout cannot be written.
pub fn run(format: OutputFormat) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_kinds(&mut out, format).map_err(|e| CliError::IoError {
        source: "stdout".to_owned(),
        detail: e.to_string(),
    })
}

fn family(kind: SubmissionKind) -> &'static str {
    match kind {
        SubmissionKind::Note(_) => "note",
        SubmissionKind::Resource(_) => "resource",
    }
}

fn write_kinds<W: Write>(out: &mut W, format: OutputFormat) -> std::io::Result<()> {
    match format {
        OutputFormat::Human => {
            for kind in SubmissionKind::all() {
                writeln!(out, "{:<9}{kind}", family(kind))?;
            }
            Ok(())
        }
        OutputFormat::Json => {
            let kinds: Vec<serde_json::Value> = SubmissionKind::all()
                .map(|kind| serde_json::json!({ "family": family(kind), "kind": kind.as_str() }))
                .collect();
            serde_json::to_writer(&mut *out, &kinds)?;
            writeln!(out)
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    #[test]
    fn human_listing_has_one_line_per_kind() {
        let mut buf = Vec::new();
        write_kinds(&mut buf, OutputFormat::Human).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert_eq!(text.lines().count(), SubmissionKind::all().count());
        assert!(text.contains("note     creditors-within-one-year"));
        assert!(text.contains("resource current-period-profit-and-loss"));
    }

    #[test]
    fn json_listing_round_trips_through_from_str() {
        let mut buf = Vec::new();
        write_kinds(&mut buf, OutputFormat::Json).expect("write");
        let value: Vec<serde_json::Value> = serde_json::from_slice(&buf).expect("json");
        assert_eq!(value.len(), SubmissionKind::all().count());
        for entry in value {
            let name = entry["kind"].as_str().expect("kind string");
            let kind: SubmissionKind = name.parse().expect("listed kinds parse");
            assert_eq!(entry["family"], family(kind));
        }
    }
}
