//! Validation command handler

use super::{display_name, read_document};
use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::{FileReport, OutputWriter};
use blockdef_schemas::{validate_report, ValidationContext, ValidationMode};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Handle the validate command
#[instrument(skip_all, fields(files = args.files.len()))]
pub fn handle_validate(
    args: ValidateArgs,
    config: &Config,
    output: &mut OutputWriter,
) -> Result<()> {
    let _timer = Timer::with_details("validate_command", &format!("files: {}", args.files.len()));

    let validation = config
        .validation
        .to_validation_config(args.mode.map(ValidationMode::from));
    let fail_fast = args.fail_fast || validation.fail_fast;
    let context = validation.context();
    info!(mode = %context.mode, fail_fast, "Starting validation");

    let progress = if args.files.len() > 1 {
        output.progress_bar(args.files.len() as u64, "Validating")
    } else {
        None
    };

    let mut reports = Vec::with_capacity(args.files.len());
    for path in &args.files {
        if let Some(pb) = &progress {
            pb.set_message(display_name(path));
        }

        let report = validate_file(path, &context, fail_fast)?;
        let failed = !report.is_valid();
        reports.push(report);

        if let Some(pb) = &progress {
            pb.inc(1);
        }
        if failed && fail_fast {
            warn!(file = %display_name(path), "Stopping at first failing file");
            break;
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    output.file_reports(&reports)?;

    let total: usize = reports.iter().map(|r| r.documents).sum();
    let failed: usize = reports.iter().map(FileReport::failed).sum();
    info!(total, failed, "Validation finished");

    if failed > 0 {
        return Err(Error::ValidationFailed { failed, total });
    }
    if reports.len() > 1 {
        output.success(&format!(
            "All {} definition(s) in {} file(s) are valid",
            total,
            reports.len()
        ))?;
    }
    Ok(())
}

/// Validate every definition in one file
///
/// A top-level array holds one definition per element; violation paths are
/// prefixed with the element's position.
fn validate_file(path: &Path, context: &ValidationContext, fail_fast: bool) -> Result<FileReport> {
    let name = display_name(path);
    let _timer = Timer::with_details("validate_file", &name);
    let document = read_document(path)?;

    let mut report = FileReport::new(name, context.mode);
    match &document {
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                let accepted = record(&mut report, item, &context.child_index(i));
                if !accepted && fail_fast {
                    break;
                }
            }
        }
        single => {
            record(&mut report, single, context);
        }
    }

    debug!(
        file = %report.path,
        documents = report.documents,
        accepted = report.accepted,
        violations = report.violations.len(),
        "Validated file"
    );
    Ok(report)
}

fn record(report: &mut FileReport, document: &Value, context: &ValidationContext) -> bool {
    let result = validate_report(document, context);
    let accepted = result.is_valid();
    report.documents += 1;
    if accepted {
        report.accepted += 1;
    }
    report.violations.extend(result.violations);
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{ModeArg, OutputFormat};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;
    use tempfile::{tempdir, TempDir};

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn sink() -> OutputWriter {
        OutputWriter::with_writer(OutputFormat::Json, false, true, Box::new(std::io::sink()))
    }

    fn args(files: Vec<PathBuf>, mode: Option<ModeArg>) -> ValidateArgs {
        ValidateArgs {
            files,
            mode,
            fail_fast: false,
        }
    }

    const VALID: &str = r#"{"type": "a", "message0": "%1", "args0": [{"type": "input_value", "name": "X"}], "output": null}"#;

    #[test]
    fn test_validate_file_array_paths() {
        let dir = tempdir().unwrap();
        let path = write(
            &dir,
            "blocks.json",
            &format!(r#"[{}, {{"type": "b", "message0": "%1"}}]"#, VALID),
        );

        let context = ValidationContext::new(ValidationMode::Strict);
        let report = validate_file(&path, &context, false).unwrap();
        assert_eq!(report.documents, 2);
        assert_eq!(report.accepted, 1);
        assert_eq!(report.violations[0].path, "$[1].message0");
    }

    #[test]
    fn test_validate_file_fail_fast_within_array() {
        let dir = tempdir().unwrap();
        let path = write(&dir, "blocks.json", "[1, 2, 3]");
        let context = ValidationContext::new(ValidationMode::Strict);

        assert_eq!(validate_file(&path, &context, false).unwrap().documents, 3);
        assert_eq!(validate_file(&path, &context, true).unwrap().documents, 1);
    }

    #[test]
    fn test_handle_validate_success() {
        let dir = tempdir().unwrap();
        let path = write(&dir, "block.json", VALID);
        let result = handle_validate(args(vec![path], None), &Config::default(), &mut sink());
        assert!(result.is_ok());
    }

    #[test]
    fn test_handle_validate_reports_failures() {
        let dir = tempdir().unwrap();
        let good = write(&dir, "good.json", VALID);
        let bad = write(&dir, "bad.yaml", "type: b\nmessage0: \"%2\"\n");

        let error =
            handle_validate(args(vec![good, bad], None), &Config::default(), &mut sink()).unwrap_err();
        assert!(matches!(error, Error::ValidationFailed { failed: 1, total: 2 }));
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn test_mode_argument_overrides_config() {
        let dir = tempdir().unwrap();
        let path = write(&dir, "block.json", r#"{"type": "a", "unexpected": true}"#);

        let strict = handle_validate(args(vec![path.clone()], None), &Config::default(), &mut sink());
        assert!(strict.is_err());

        let partial = handle_validate(
            args(vec![path], Some(ModeArg::Partial)),
            &Config::default(),
            &mut sink(),
        );
        assert!(partial.is_ok());
    }

    #[test]
    fn test_missing_file() {
        let error = handle_validate(
            args(vec![PathBuf::from("/nonexistent/block.json")], None),
            &Config::default(),
            &mut sink(),
        )
        .unwrap_err();
        assert!(matches!(error, Error::FileNotFound { .. }));
    }
}
