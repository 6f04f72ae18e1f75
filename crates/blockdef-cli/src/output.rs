//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable), including validation
//! reports, block summaries and progress indicators.

use crate::cli::OutputFormat;
use crate::error::Result;
use blockdef_schemas::model::{BlockDefinition, MessageSlot, Token};
use blockdef_schemas::{Severity, ValidationMode, Violation};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use is_terminal::IsTerminal;
use std::io::{self, Write};
use tracing::debug;

/// Validation outcome for one input file
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub path: String,
    pub mode: ValidationMode,
    /// Number of definitions in the file
    pub documents: usize,
    /// Number of definitions accepted under `mode`
    pub accepted: usize,
    pub violations: Vec<Violation>,
}

impl FileReport {
    pub fn new(path: impl Into<String>, mode: ValidationMode) -> Self {
        Self {
            path: path.into(),
            mode,
            documents: 0,
            accepted: 0,
            violations: Vec::new(),
        }
    }

    pub fn failed(&self) -> usize {
        self.documents - self.accepted
    }

    pub fn is_valid(&self) -> bool {
        self.failed() == 0
    }

    pub fn error_count(&self) -> usize {
        self.violations.iter().filter(|v| v.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.violations.len() - self.error_count()
    }
}

/// Structure of an accepted definition, as shown by `inspect`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockSummary {
    #[serde(rename = "type")]
    pub block_type: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_statement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_statement: Option<String>,
    /// Shape of the code generator the block needs
    pub generator: String,
    pub slots: Vec<SlotSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extensions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mutator: Option<String>,
    /// Warnings tolerated by the validation mode
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Violation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotSummary {
    pub index: u8,
    pub message: String,
    pub tokens: Vec<String>,
    /// Arguments in the order the message references them
    pub arguments: Vec<ArgumentSummary>,
    pub implicit_dummy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_dummy_align: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArgumentSummary {
    pub name: String,
    pub kind: String,
}

impl BlockSummary {
    pub fn new(definition: &BlockDefinition, warnings: Vec<Violation>) -> Self {
        Self {
            block_type: definition.block_type().to_string(),
            kind: definition.kind().to_string(),
            output: definition.output().map(ToString::to_string),
            previous_statement: definition.previous_statement().map(ToString::to_string),
            next_statement: definition.next_statement().map(ToString::to_string),
            generator: definition.generator_signature().to_string(),
            slots: definition.slots().iter().map(SlotSummary::new).collect(),
            extensions: definition.extensions().to_vec(),
            mutator: definition.mutator().map(str::to_string),
            warnings,
        }
    }
}

impl SlotSummary {
    fn new(slot: &MessageSlot) -> Self {
        Self {
            index: slot.index,
            message: slot.message.clone(),
            tokens: slot.tokens().iter().map(describe_token).collect(),
            arguments: slot
                .arguments_in_message_order()
                .into_iter()
                .map(|argument| ArgumentSummary {
                    name: argument.name().to_string(),
                    kind: argument.kind().to_string(),
                })
                .collect(),
            implicit_dummy: slot.has_implicit_dummy(),
            last_dummy_align: slot.last_dummy_align.map(|align| align.as_str().to_string()),
        }
    }
}

fn describe_token(token: &Token) -> String {
    match token {
        Token::Text(text) => format!("{:?}", text),
        Token::Escape => "%%".to_string(),
        Token::Placeholder(index) => format!("%{}", index),
        Token::OversizedPlaceholder(digits) => format!("%{}", digits),
    }
}

/// Trait for formatting output with specialized support for report types
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format validation reports for a set of files
    fn format_file_reports(&self, reports: &[FileReport]) -> Result<String>;

    /// Format the structure of one definition
    fn format_block_summary(&self, summary: &BlockSummary) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            // Human output falls back to pretty JSON for plain data
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_file_reports(&self, reports: &[FileReport]) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_file_reports_human(reports)),
            _ => self.format(&reports),
        }
    }

    fn format_block_summary(&self, summary: &BlockSummary) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_block_summary_human(summary)),
            _ => self.format(summary),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer on stdout
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool, progress: bool) -> Self {
        Self {
            format,
            use_color,
            show_progress: progress && !quiet && io::stderr().is_terminal(),
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    #[cfg(test)]
    pub fn with_writer(
        format: OutputFormat,
        use_color: bool,
        quiet: bool,
        writer: Box<dyn Write>,
    ) -> Self {
        Self {
            format,
            use_color,
            show_progress: false, // No progress bars with custom writers
            quiet,
            writer,
        }
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Write raw output
    pub fn write(&mut self, content: &str) -> Result<()> {
        write!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "✓".green(), message.green()))
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write an error message
    pub fn error(&mut self, message: &str) -> Result<()> {
        if !self.is_human() {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.red().to_string())
        } else {
            self.writeln(&format!("ERROR: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || !self.is_human() {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let formatted = self.format.format(value)?;
        self.finish_document(&formatted)
    }

    /// Write the per-file validation reports
    pub fn file_reports(&mut self, reports: &[FileReport]) -> Result<()> {
        if self.is_human() {
            for report in reports {
                self.file_report_human(report)?;
            }
            return Ok(());
        }
        let formatted = self.format.format_file_reports(reports)?;
        self.finish_document(&formatted)
    }

    /// Write the structure of one definition
    pub fn block_summary(&mut self, summary: &BlockSummary) -> Result<()> {
        let formatted = self.format.format_block_summary(summary)?;
        self.finish_document(&formatted)
    }

    fn file_report_human(&mut self, report: &FileReport) -> Result<()> {
        let headline = file_headline(report);
        match (report.is_valid(), report.violations.is_empty()) {
            (true, true) => self.success(&headline)?,
            (true, false) => self.warning(&headline)?,
            (false, _) => self.error(&headline)?,
        }
        if self.quiet && report.is_valid() {
            return Ok(());
        }
        for violation in &report.violations {
            let line = format!("  {}", format_violation_human(violation));
            let line = match (self.use_color, violation.severity) {
                (true, Severity::Error) => line.red().to_string(),
                (true, Severity::Warning) => line.yellow().to_string(),
                (false, _) => line,
            };
            self.writeln(&line)?;
        }
        Ok(())
    }

    fn finish_document(&mut self, formatted: &str) -> Result<()> {
        if formatted.ends_with('\n') {
            self.write(formatted)
        } else {
            self.writeln(formatted)
        }
    }

    /// Create a progress bar for long operations
    pub fn progress_bar(&self, length: u64, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new(length);
        pb.set_style(default_progress_style());
        pb.set_message(message.to_string());
        Some(pb)
    }
}

/// Helper function to create a progress bar style
pub fn default_progress_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
}

fn file_headline(report: &FileReport) -> String {
    let mut headline = format!(
        "{}: {}/{} definition(s) valid ({} mode)",
        report.path, report.accepted, report.documents, report.mode
    );
    match (report.error_count(), report.warning_count()) {
        (0, 0) => {}
        (errors, 0) => headline.push_str(&format!(", {} error(s)", errors)),
        (0, warnings) => headline.push_str(&format!(", {} warning(s)", warnings)),
        (errors, warnings) => {
            headline.push_str(&format!(", {} error(s), {} warning(s)", errors, warnings))
        }
    }
    headline
}

/// One violation on one line
pub fn format_violation_human(violation: &Violation) -> String {
    format!(
        "{:<7} {} [{}] {}",
        violation.severity.to_string(),
        violation.path, violation.kind, violation.detail
    )
}

/// Format validation reports for human reading
fn format_file_reports_human(reports: &[FileReport]) -> String {
    let mut output = String::new();
    for report in reports {
        output.push_str(&file_headline(report));
        output.push('\n');
        for violation in &report.violations {
            output.push_str("  ");
            output.push_str(&format_violation_human(violation));
            output.push('\n');
        }
    }
    output
}

/// Format a block summary for human reading
fn format_block_summary_human(summary: &BlockSummary) -> String {
    let mut output = String::new();

    output.push_str(&format!("Block: {} ({} block)\n", summary.block_type, summary.kind));
    if let Some(output_check) = &summary.output {
        output.push_str(&format!("  Output: {}\n", output_check));
    }
    if let Some(previous) = &summary.previous_statement {
        output.push_str(&format!("  Previous statement: {}\n", previous));
    }
    if let Some(next) = &summary.next_statement {
        output.push_str(&format!("  Next statement: {}\n", next));
    }
    output.push_str(&format!("  Generator returns: {}\n", summary.generator));
    if let Some(mutator) = &summary.mutator {
        output.push_str(&format!("  Mutator: {}\n", mutator));
    }
    if !summary.extensions.is_empty() {
        output.push_str(&format!("  Extensions: {}\n", summary.extensions.join(", ")));
    }

    for slot in &summary.slots {
        output.push_str(&format!("\n  message{}: {:?}\n", slot.index, slot.message));
        output.push_str(&format!("    Tokens: {}\n", slot.tokens.join(" ")));
        for (position, argument) in slot.arguments.iter().enumerate() {
            output.push_str(&format!(
                "    {}. {} ({})\n",
                position + 1,
                argument.name,
                argument.kind
            ));
        }
        if slot.implicit_dummy {
            let align = slot.last_dummy_align.as_deref().unwrap_or("LEFT");
            output.push_str(&format!("    Trailing dummy input, aligned {}\n", align));
        }
    }

    if !summary.warnings.is_empty() {
        output.push_str("\n  Warnings:\n");
        for warning in &summary.warnings {
            output.push_str(&format!("    {}\n", format_violation_human(warning)));
        }
    }

    output
}
