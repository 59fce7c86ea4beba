use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use table_grid::config::load_config;
use table_grid::diagnostics::StructureReport;
use table_grid::structurer::{TableInput, TableStructurer};

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let program = env::args()
        .next()
        .unwrap_or_else(|| "structure_demo".to_string());
    let config_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .ok_or_else(|| format!("Usage: {program} <config.json>"))?;
    let config = load_config(&config_path)?;

    let input_raw = fs::read_to_string(&config.input_path)
        .map_err(|e| format!("Failed to read input {}: {e}", config.input_path.display()))?;
    let input: TableInput = serde_json::from_str(&input_raw)
        .map_err(|e| format!("Failed to parse input {}: {e}", config.input_path.display()))?;

    let structurer = TableStructurer::new(config.structure_params.clone());
    let report = structurer
        .process_report(&input)
        .map_err(|e| format!("Processing failed: {e}"))?;

    if config.output.text_summary {
        print_text_summary(&report);
    }

    if let Some(path) = &config.output.json_out {
        write_json_file(path, &report)?;
        println!("JSON report written to {}", path.display());
    } else if !config.output.text_summary {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
        println!("{json}");
    }

    Ok(())
}

fn print_text_summary(report: &StructureReport) {
    println!("found: {}", report.found);
    println!("outcome: {:?}", report.outcome);
    if let Some(table) = &report.table {
        println!(
            "table: {} cells, {} rows x {} cols",
            table.cells.len(),
            table.row_count(),
            table.column_count()
        );
    }
    if let Some(cluster) = &report.cluster {
        println!(
            "cluster: {}+{} raw -> {}+{} canonical (h+v)",
            cluster.raw_horizontal,
            cluster.raw_vertical,
            cluster.canonical_horizontal,
            cluster.canonical_vertical
        );
    }
    if let Some(assembly) = &report.assembly {
        println!(
            "assembly: {} lattice points, {} opened, {} emitted, {} dangling",
            assembly.lattice_points,
            assembly.opened_cells,
            assembly.emitted_cells,
            assembly.dangling_dropped
        );
    }
    if let Some(borderless) = &report.borderless {
        println!(
            "borderless: {}/{} fragments in region, {} bands, {} columns, {} tightened",
            borderless.fragments_in_region,
            borderless.fragments_total,
            borderless.bands,
            borderless.columns,
            borderless.tightened_cells
        );
    }
    println!("total: {:.3} ms", report.timing.total_ms);
    for stage in &report.timing.stages {
        println!("  {}: {:.3} ms", stage.label, stage.elapsed_ms);
    }
}

fn write_json_file<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON: {e}"))?;
    fs::write(path, json).map_err(|e| format!("Failed to write {}: {e}", path.display()))
}
