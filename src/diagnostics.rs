//! Serializable diagnostics emitted by the structurer.
//!
//! [`StructureReport`] is the main entry point returned by the
//! `*_with_report` methods, bundling the reconstructed table (when found)
//! with per-stage statistics and a timing trace. Stage statistics are
//! produced by the stage modules themselves and aggregated here.

use crate::types::TableStructure;
use serde::Serialize;
use std::time::Instant;

/// Why a run produced (or did not produce) a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StructureOutcome {
    /// A non-empty cell set was assembled and resolved.
    Assembled,
    /// One orientation had zero canonical lines; nothing to assemble.
    MissingOrientation,
    /// Borderless inference was invoked with no usable text fragments.
    EmptyFragmentSet,
    /// Lines existed but no cell ever closed (e.g. a single ruling).
    NoCells,
}

/// Raw/canonical line counts for the bordered path.
#[derive(Clone, Copy, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterStats {
    pub raw_horizontal: usize,
    pub raw_vertical: usize,
    pub canonical_horizontal: usize,
    pub canonical_vertical: usize,
}

/// Lattice and cell counters from the streaming assembly sweep.
///
/// `dangling_dropped` counts pending cells that could have completed but
/// never found both right corners: the expected lossy outcome of noisy
/// detection, exposed here for quality monitoring.
#[derive(Clone, Copy, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblyStats {
    pub lattice_points: usize,
    pub opened_cells: usize,
    pub emitted_cells: usize,
    pub dangling_dropped: usize,
}

/// Counters from borderless grid inference.
#[derive(Clone, Copy, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderlessStats {
    pub fragments_total: usize,
    pub fragments_in_region: usize,
    pub bands: usize,
    pub columns: usize,
    pub merged_text_boxes: usize,
    pub tightened_cells: usize,
}

/// Timing entry for a single pipeline stage.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

/// Aggregated timing trace for one table's processing.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    /// Record a stage that started at `start`.
    pub fn record(&mut self, label: impl Into<String>, start: Instant) {
        self.stages.push(StageTiming {
            label: label.into(),
            elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
        });
    }

    pub fn finish(&mut self, start: Instant) {
        self.total_ms = start.elapsed().as_secs_f64() * 1000.0;
    }
}

/// Full diagnostics for one table.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureReport {
    pub found: bool,
    pub outcome: StructureOutcome,
    pub table: Option<TableStructure>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<ClusterStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assembly: Option<AssemblyStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borderless: Option<BorderlessStats>,
    pub timing: TimingBreakdown,
}

impl StructureReport {
    /// Report for a run that stopped before assembling anything.
    pub fn not_found(outcome: StructureOutcome) -> Self {
        Self {
            found: false,
            outcome,
            table: None,
            cluster: None,
            assembly: None,
            borderless: None,
            timing: TimingBreakdown::default(),
        }
    }
}
