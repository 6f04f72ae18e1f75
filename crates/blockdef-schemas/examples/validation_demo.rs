//! Validation demonstration example
//!
//! Copyright (c) 2025 Blockdef Team
//! Licensed under the Apache-2.0 license

use blockdef_schemas::contract::{BoundGenerator, CodeGenerator};
use blockdef_schemas::{validate, validate_report, ValidationContext, ValidationMode};
use serde_json::json;

struct Repeat {
    times: u32,
    body: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Blockdef Validation Demo ===\n");

    let definition = validate(&json!({
        "type": "controls_repeat",
        "message0": "repeat %1 times",
        "args0": [{"type": "field_number", "name": "TIMES", "value": 10, "min": 0, "precision": 1}],
        "message1": "do %1",
        "args1": [{"type": "input_statement", "name": "DO"}],
        "previousStatement": null,
        "nextStatement": null,
        "colour": 120
    }))?;

    println!("Accepted '{}' ({} block)", definition.block_type(), definition.kind());
    for slot in definition.slots() {
        println!("  message{}: {:?}", slot.index, slot.message);
        for argument in &slot.args {
            println!("    {} ({})", argument.name(), argument.kind());
        }
    }

    let generator = BoundGenerator::bind(
        &definition,
        CodeGenerator::statement(|block: &Repeat| {
            format!("for _ in range({}):\n{}", block.times, block.body)
        }),
    )?;
    let code = generator.generate(&Repeat {
        times: 3,
        body: "  pass\n".into(),
    });
    println!("\nGenerated ({}):\n{}", generator.signature(), code.code());

    println!("--- Partial mode ---");
    let report = validate_report(
        &json!({
            "type": "text_label",
            "message0": "%1 %3",
            "args0": [{"type": "field_label", "name": "L", "text": "hi"}],
            "output": null,
            "draft": true
        }),
        &ValidationContext::new(ValidationMode::Partial),
    );
    for violation in &report.violations {
        println!("  {}", violation);
    }
    println!("accepted: {}", report.is_valid());

    Ok(())
}
