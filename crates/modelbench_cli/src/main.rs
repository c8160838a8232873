//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `modelbench_core` linkage.
//! - Drive one scripted session and print its outline and snapshot.
//! - Save the snapshot to `MODELBENCH_SNAPSHOT_PATH` when it is set.

use modelbench_core::{ElementKind, JsonFileSink, Workbench};
use std::process::ExitCode;
use std::sync::Arc;

fn main() -> ExitCode {
    println!("modelbench_core ping={}", modelbench_core::ping());
    println!("modelbench_core version={}", modelbench_core::core_version());

    let mut workbench = Workbench::new();
    let system = workbench.create_element(ElementKind::Block).id.clone();
    let requirement = workbench.create_element(ElementKind::Requirement).id.clone();
    let port = workbench.create_element(ElementKind::Port).id.clone();

    workbench.select(&requirement);
    workbench.edit_label("Stop within 40 m");
    if let Err(err) = workbench.commit_properties() {
        eprintln!("commit failed: {err}");
        return ExitCode::FAILURE;
    }
    for (source, target) in [(&requirement, &system), (&system, &port)] {
        if let Err(err) = workbench.connect(source, target) {
            eprintln!("connect failed: {err}");
            return ExitCode::FAILURE;
        }
    }

    for group in workbench.outline().groups() {
        println!("{}", group.label());
        for entry in &group.entries {
            println!("  {} ({})", entry.label, entry.id);
        }
    }

    match workbench.snapshot().to_json_pretty() {
        Ok(json) => println!("{json}"),
        Err(err) => {
            eprintln!("snapshot encode failed: {err}");
            return ExitCode::FAILURE;
        }
    }

    if let Some(path) = std::env::var_os("MODELBENCH_SNAPSHOT_PATH") {
        workbench.attach_sink(Arc::new(JsonFileSink::new(path)));
        match workbench.save() {
            Ok(receipt) if receipt.delivered => {
                println!("snapshot saved via {}", receipt.sink_id)
            }
            Ok(receipt) => {
                eprintln!("snapshot not saved via {}", receipt.sink_id);
                return ExitCode::FAILURE;
            }
            Err(err) => {
                eprintln!("save failed: {err}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
