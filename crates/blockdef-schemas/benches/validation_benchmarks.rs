//! Benchmarks for block definition validation throughput
//!
//! Copyright (c) 2025 Blockdef Team
//! Licensed under the Apache-2.0 license

use blockdef_schemas::{validate, validate_blocks_batch, ValidationConfig};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};

fn create_small_block() -> Value {
    json!({
        "type": "math_add",
        "message0": "%1 + %2",
        "args0": [
            {"type": "input_value", "name": "A", "check": "Number"},
            {"type": "input_value", "name": "B", "check": "Number"}
        ],
        "inputsInline": true,
        "output": "Number",
        "colour": 230
    })
}

fn create_wide_block() -> Value {
    let mut block = serde_json::Map::new();
    block.insert("type".into(), json!("wide_block"));
    for slot in 0..10 {
        let args: Vec<Value> = (0..8)
            .map(|j| match j % 4 {
                0 => json!({"type": "field_number", "name": format!("N{}", j), "value": 1, "min": 0, "max": 9}),
                1 => json!({"type": "field_dropdown", "name": format!("D{}", j), "options": [["a", "A"], ["b", "B"], ["c", "C"]]}),
                2 => json!({"type": "input_value", "name": format!("V{}", j), "check": ["Number", "String"]}),
                _ => json!({"type": "field_input", "name": format!("T{}", j), "text": "x"}),
            })
            .collect();
        let message: Vec<String> = (1..=args.len()).map(|k| format!("%{}", k)).collect();
        block.insert(format!("message{}", slot), json!(message.join(" ")));
        block.insert(format!("args{}", slot), Value::Array(args));
    }
    block.insert("previousStatement".into(), Value::Null);
    block.insert("nextStatement".into(), Value::Null);
    Value::Object(block)
}

fn create_broken_block() -> Value {
    json!({
        "type": "broken",
        "message0": "%1 %1 %4",
        "args0": [
            {"type": "field_number", "name": "N", "min": 10, "max": 0},
            {"type": "field_dropdown", "name": "N", "options": []}
        ],
        "output": null,
        "previousStatement": null,
        "lastDummyAlign0": "MIDDLE"
    })
}

fn bench_single_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_block");
    let cases = [
        ("small", create_small_block()),
        ("wide", create_wide_block()),
        ("broken", create_broken_block()),
    ];
    for (name, block) in &cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), block, |b, block| {
            b.iter(|| validate(black_box(block)))
        });
    }
    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    for size in [10usize, 100, 1000] {
        let blocks: Vec<Value> = (0..size)
            .map(|i| {
                let mut block = create_small_block();
                block["type"] = json!(format!("math_add_{}", i));
                block
            })
            .collect();
        let config = ValidationConfig::strict();
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &blocks, |b, blocks| {
            b.iter(|| validate_blocks_batch(black_box(blocks), &config))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single_block, bench_batch);
criterion_main!(benches);
