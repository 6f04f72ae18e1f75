//! Inspect command handler

use super::{display_name, read_document};
use crate::cli::InspectArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::{BlockSummary, FileReport, OutputWriter};
use blockdef_schemas::{validate_report, ValidationContext, ValidationMode};
use serde_json::Value;
use tracing::{debug, instrument};

/// Handle the inspect command
#[instrument(skip_all, fields(file = %args.file.display(), index = ?args.index))]
pub fn handle_inspect(args: InspectArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let validation = config
        .validation
        .to_validation_config(args.mode.map(ValidationMode::from));
    let root = validation.context();

    let document = read_document(&args.file)?;
    let (document, context) = select_document(document, args.index, &root)?;
    debug!(path = %context.path, "Inspecting definition");

    let report = validate_report(&document, &context);
    match report.definition {
        Some(definition) => {
            let summary = BlockSummary::new(&definition, report.violations.violations);
            output.block_summary(&summary)
        }
        None => {
            let mut file_report = FileReport::new(display_name(&args.file), report.mode);
            file_report.documents = 1;
            file_report.violations = report.violations.violations;
            output.file_reports(&[file_report])?;
            Err(Error::ValidationFailed {
                failed: 1,
                total: 1,
            })
        }
    }
}

/// Pick the definition to inspect
///
/// An array needs `--index` unless it has exactly one element.
fn select_document(
    document: Value,
    index: Option<usize>,
    root: &ValidationContext,
) -> Result<(Value, ValidationContext)> {
    match document {
        Value::Array(mut items) => {
            let index = match (index, items.len()) {
                (Some(index), len) if index < len => index,
                (Some(index), len) => {
                    return Err(Error::invalid_args(format!(
                        "--index {} is out of range for {} definition(s)",
                        index, len
                    )))
                }
                (None, 1) => 0,
                (None, len) => {
                    return Err(Error::invalid_args(format!(
                        "file holds {} definitions; pick one with --index",
                        len
                    )))
                }
            };
            Ok((items.swap_remove(index), root.child_index(index)))
        }
        single => match index {
            None | Some(0) => Ok((single, root.clone())),
            Some(index) => Err(Error::invalid_args(format!(
                "--index {} given but the file holds a single definition",
                index
            ))),
        },
    }
}
