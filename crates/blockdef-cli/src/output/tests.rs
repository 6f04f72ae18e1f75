// Tests for report and summary formatting
//
// Violations are produced by the real validator so the rendered paths and
// kinds match what the CLI prints.

use super::*;
use blockdef_schemas::{validate, validate_report, ValidationContext};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

fn capture(format: OutputFormat, quiet: bool) -> (OutputWriter, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let writer = OutputWriter::with_writer(format, false, quiet, Box::new(buffer.clone()));
    (writer, buffer)
}

fn broken_report() -> FileReport {
    let report = validate_report(
        &json!({"type": "broken", "message0": "%2", "extra": 1}),
        &ValidationContext::new(ValidationMode::Strict),
    );
    FileReport {
        path: "blocks/broken.json".into(),
        mode: ValidationMode::Strict,
        documents: 1,
        accepted: 0,
        violations: report.violations.violations,
    }
}

fn clean_report() -> FileReport {
    FileReport {
        path: "blocks/clean.json".into(),
        mode: ValidationMode::Partial,
        documents: 3,
        accepted: 3,
        violations: Vec::new(),
    }
}

fn add_block_summary() -> BlockSummary {
    let definition = validate(&json!({
        "type": "math_add",
        "message0": "%2 plus %1 %%",
        "args0": [
            {"type": "input_value", "name": "B", "check": "Number"},
            {"type": "input_value", "name": "A", "check": "Number"}
        ],
        "lastDummyAlign0": "RIGHT",
        "output": "Number"
    }))
    .unwrap();
    BlockSummary::new(&definition, Vec::new())
}

#[test]
fn test_file_report_counts() {
    let report = broken_report();
    assert!(!report.is_valid());
    assert_eq!(report.failed(), 1);
    assert_eq!(report.error_count(), 2);
    assert_eq!(report.warning_count(), 0);

    let clean = clean_report();
    assert!(clean.is_valid());
    assert_eq!(clean.failed(), 0);
}

#[test]
fn test_file_reports_formatting_human() {
    let formatted = OutputFormat::Human
        .format_file_reports(&[broken_report(), clean_report()])
        .unwrap();

    assert!(formatted.contains("blocks/broken.json: 0/1 definition(s) valid (strict mode), 2 error(s)"));
    assert!(formatted.contains("[placeholder_out_of_range(2)]"));
    assert!(formatted.contains("[unknown_field]"));
    assert!(formatted.contains("blocks/clean.json: 3/3 definition(s) valid (partial mode)\n"));
}

#[test]
fn test_file_reports_formatting_json() {
    let formatted = OutputFormat::Json
        .format_file_reports(&[broken_report()])
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&formatted).unwrap();

    assert_eq!(value[0]["path"], "blocks/broken.json");
    assert_eq!(value[0]["mode"], "strict");
    assert_eq!(value[0]["accepted"], 0);
    let violations = value[0]["violations"].as_array().unwrap();
    let first = violations
        .iter()
        .find(|v| v["kind"] == "placeholder_out_of_range")
        .unwrap();
    assert_eq!(first["path"], "$.message0");
    assert_eq!(first["index"], 2);
    assert_eq!(first["severity"], "error");
}

#[test]
fn test_block_summary_fields() {
    let summary = add_block_summary();
    assert_eq!(summary.block_type, "math_add");
    assert_eq!(summary.kind, "value");
    assert!(summary.previous_statement.is_none());

    let slot = &summary.slots[0];
    assert_eq!(slot.tokens, vec!["%2", "\" plus \"", "%1", "\" \"", "%%"]);
    let names: Vec<_> = slot.arguments.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B"]);
    assert_eq!(slot.arguments[0].kind, "input_value");
    assert!(slot.implicit_dummy);
    assert_eq!(slot.last_dummy_align.as_deref(), Some("RIGHT"));
}

#[test]
fn test_block_summary_formatting_human() {
    let formatted = OutputFormat::Human
        .format_block_summary(&add_block_summary())
        .unwrap();

    assert!(formatted.starts_with("Block: math_add (value block)\n"));
    assert!(formatted.contains("Generator returns: (code, precedence)"));
    assert!(formatted.contains("1. A (input_value)"));
    assert!(formatted.contains("Trailing dummy input, aligned RIGHT"));
    assert!(!formatted.contains("Warnings:"));
}

#[test]
fn test_block_summary_formatting_yaml() {
    let formatted = OutputFormat::Yaml
        .format_block_summary(&add_block_summary())
        .unwrap();
    let value: serde_yaml::Value = serde_yaml::from_str(&formatted).unwrap();
    assert_eq!(value["type"].as_str(), Some("math_add"));
    assert!(value.get("mutator").is_none());
}

#[test]
fn test_writer_human_report() {
    let (mut writer, buffer) = capture(OutputFormat::Human, false);
    writer.file_reports(&[broken_report()]).unwrap();

    let text = buffer.contents();
    assert!(text.starts_with("ERROR: blocks/broken.json"));
    assert!(text.contains("  error   $.message0 [placeholder_out_of_range(2)]"));
}

#[test]
fn test_writer_quiet_hides_valid_files() {
    let (mut writer, buffer) = capture(OutputFormat::Human, true);
    writer.file_reports(&[clean_report()]).unwrap();
    writer.info("checking").unwrap();
    assert_eq!(buffer.contents(), "");

    writer.file_reports(&[broken_report()]).unwrap();
    assert!(buffer.contents().contains("placeholder_out_of_range"));
}

#[test]
fn test_writer_machine_formats_skip_messages() {
    let (mut writer, buffer) = capture(OutputFormat::Json, false);
    writer.info("checking").unwrap();
    writer.success("done").unwrap();
    writer.section("Results").unwrap();
    writer.data(&json!({"ok": true})).unwrap();
    assert_eq!(buffer.contents(), "{\"ok\":true}\n");
}

#[test]
fn test_writer_without_terminal_has_no_progress() {
    let (writer, _) = capture(OutputFormat::Human, false);
    assert!(writer.progress_bar(3, "validating").is_none());
    assert!(writer.is_human());
    assert!(!capture(OutputFormat::Json, false).0.is_human());
}
