//! Schema export command handler

use crate::cli::SchemaArgs;
use crate::error::Result;
use crate::output::OutputWriter;
use blockdef_schemas::schema::json_schema;
use tracing::info;

/// Handle the schema command
pub fn handle_schema(args: SchemaArgs, output: &mut OutputWriter) -> Result<()> {
    let schema = json_schema::export();

    match args.save_to {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, serde_json::to_string_pretty(&schema)?)?;
            info!(path = %path.display(), "Wrote JSON Schema");
            output.success(&format!("Schema written to {}", path.display()))
        }
        None => output.data(&schema),
    }
}
