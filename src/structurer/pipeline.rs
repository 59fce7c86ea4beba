//! Pipeline orchestrating table structure reconstruction.
//!
//! The [`TableStructurer`] exposes one entry point per evidence kind: raw
//! ruling segments for bordered tables, text fragments for borderless ones.
//! Both paths converge on the streaming cell assembly and exact span
//! resolution, and both have a `*_with_report` variant capturing per-stage
//! statistics and timings.
//!
//! Recoverable "no evidence" conditions surface as `Ok(None)`; the only
//! `Err` is an internal invariant violation during span resolution, which
//! aborts the affected table and leaves sibling tables untouched.

use crate::assemble::assemble;
use crate::axes::{resolve_span, GridAxis};
use crate::borderless;
use crate::cluster::cluster;
use crate::diagnostics::{
    ClusterStats, StructureOutcome, StructureReport, TimingBreakdown,
};
use crate::error::StructureError;
use crate::types::{
    CellBox, Orientation, RawSegment, Region, Span, TableStructure, TextFragmentBox,
};

use super::params::StructureParams;
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// One unit of work for the batch interface.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum TableInput {
    Bordered {
        #[serde(default)]
        region: Option<Region>,
        horizontal: Vec<RawSegment>,
        vertical: Vec<RawSegment>,
    },
    Borderless {
        region: Region,
        fragments: Vec<TextFragmentBox>,
    },
}

/// Table structure reconstructor.
pub struct TableStructurer {
    params: StructureParams,
}

impl TableStructurer {
    /// Create a structurer with the supplied parameters.
    pub fn new(params: StructureParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &StructureParams {
        &self.params
    }

    /// Reconstruct a bordered table from raw ruling detections.
    pub fn process_bordered(
        &self,
        horizontal: &[RawSegment],
        vertical: &[RawSegment],
    ) -> Result<Option<TableStructure>, StructureError> {
        self.bordered_report(None, horizontal, vertical)
            .map(|r| r.table)
    }

    /// Same as [`process_bordered`](Self::process_bordered) but keeps only
    /// cells inside `region` (with the configured slack).
    pub fn process_bordered_in_region(
        &self,
        region: Region,
        horizontal: &[RawSegment],
        vertical: &[RawSegment],
    ) -> Result<Option<TableStructure>, StructureError> {
        self.bordered_report(Some(region), horizontal, vertical)
            .map(|r| r.table)
    }

    /// Bordered reconstruction with per-stage diagnostics.
    pub fn process_bordered_with_report(
        &self,
        region: Option<Region>,
        horizontal: &[RawSegment],
        vertical: &[RawSegment],
    ) -> Result<StructureReport, StructureError> {
        self.bordered_report(region, horizontal, vertical)
    }

    /// Infer a borderless table's structure from text fragments.
    pub fn process_borderless(
        &self,
        region: Region,
        fragments: &[TextFragmentBox],
    ) -> Result<Option<TableStructure>, StructureError> {
        self.borderless_report(region, fragments).map(|r| r.table)
    }

    /// Borderless inference with per-stage diagnostics.
    pub fn process_borderless_with_report(
        &self,
        region: Region,
        fragments: &[TextFragmentBox],
    ) -> Result<StructureReport, StructureError> {
        self.borderless_report(region, fragments)
    }

    /// Dispatch one batch work item.
    pub fn process_input(
        &self,
        input: &TableInput,
    ) -> Result<Option<TableStructure>, StructureError> {
        match input {
            TableInput::Bordered {
                region,
                horizontal,
                vertical,
            } => self
                .bordered_report(*region, horizontal, vertical)
                .map(|r| r.table),
            TableInput::Borderless { region, fragments } => {
                self.borderless_report(*region, fragments).map(|r| r.table)
            }
        }
    }

    /// Dispatch one batch work item, keeping diagnostics.
    pub fn process_report(&self, input: &TableInput) -> Result<StructureReport, StructureError> {
        match input {
            TableInput::Bordered {
                region,
                horizontal,
                vertical,
            } => self.bordered_report(*region, horizontal, vertical),
            TableInput::Borderless { region, fragments } => {
                self.borderless_report(*region, fragments)
            }
        }
    }

    /// Process independent tables in parallel. Tables share no mutable
    /// state, so the only joint resource is the output vector, aggregated
    /// after the join.
    pub fn process_batch(
        &self,
        inputs: &[TableInput],
    ) -> Vec<Result<Option<TableStructure>, StructureError>> {
        inputs
            .par_iter()
            .map(|input| self.process_input(input))
            .collect()
    }

    fn bordered_report(
        &self,
        region: Option<Region>,
        horizontal: &[RawSegment],
        vertical: &[RawSegment],
    ) -> Result<StructureReport, StructureError> {
        let total = Instant::now();
        let mut timing = TimingBreakdown::default();

        let stage = Instant::now();
        let offset = self.params.cluster.calibration_offset_px;
        let horizontal_cal = calibrated(horizontal, offset);
        let vertical_cal = calibrated(vertical, offset);
        let canonical_h = cluster(&horizontal_cal, Orientation::Horizontal, &self.params.cluster);
        let canonical_v = cluster(&vertical_cal, Orientation::Vertical, &self.params.cluster);
        timing.record("cluster", stage);

        let cluster_stats = ClusterStats {
            raw_horizontal: horizontal.len(),
            raw_vertical: vertical.len(),
            canonical_horizontal: canonical_h.len(),
            canonical_vertical: canonical_v.len(),
        };

        let stage = Instant::now();
        let Some(assembly) = assemble(&canonical_h, &canonical_v, &self.params.assemble) else {
            debug!("structurer: missing orientation, no table assembled");
            timing.finish(total);
            return Ok(StructureReport {
                cluster: Some(cluster_stats),
                timing,
                ..StructureReport::not_found(StructureOutcome::MissingOrientation)
            });
        };
        timing.record("assemble", stage);

        let stage = Instant::now();
        // Axes come from the full assembly; the region filter only trims the
        // reported cell list, so filtered cells still resolve exactly.
        let x_axis = GridAxis::x_from_cells(&assembly.cells);
        let y_axis = GridAxis::y_from_cells(&assembly.cells);
        let cells = match region {
            Some(region) => region_filtered(
                &assembly.cells,
                &region,
                self.params.region_filter_slack_px,
            ),
            None => assembly.cells.clone(),
        };
        if cells.is_empty() {
            timing.finish(total);
            return Ok(StructureReport {
                cluster: Some(cluster_stats),
                assembly: Some(assembly.stats),
                timing,
                ..StructureReport::not_found(StructureOutcome::NoCells)
            });
        }
        let spans = resolve_all(&cells, &x_axis, &y_axis)?;
        timing.record("resolve", stage);
        timing.finish(total);

        Ok(StructureReport {
            found: true,
            outcome: StructureOutcome::Assembled,
            table: Some(TableStructure {
                cells,
                spans,
                x_axis,
                y_axis,
            }),
            cluster: Some(cluster_stats),
            assembly: Some(assembly.stats),
            borderless: None,
            timing,
        })
    }

    fn borderless_report(
        &self,
        region: Region,
        fragments: &[TextFragmentBox],
    ) -> Result<StructureReport, StructureError> {
        let total = Instant::now();
        let mut timing = TimingBreakdown::default();

        let stage = Instant::now();
        let Some(inferred) = borderless::infer(
            region,
            fragments,
            &self.params.borderless,
            &self.params.assemble,
        ) else {
            timing.finish(total);
            return Ok(StructureReport {
                timing,
                ..StructureReport::not_found(StructureOutcome::EmptyFragmentSet)
            });
        };
        timing.record("infer", stage);

        let stage = Instant::now();
        // Spans come from the structural geometry; reported cells may be
        // text-tightened.
        let x_axis = GridAxis::x_from_cells(&inferred.grid_cells);
        let y_axis = GridAxis::y_from_cells(&inferred.grid_cells);
        let spans = resolve_all(&inferred.grid_cells, &x_axis, &y_axis)?;
        timing.record("resolve", stage);
        timing.finish(total);

        Ok(StructureReport {
            found: true,
            outcome: StructureOutcome::Assembled,
            table: Some(TableStructure {
                cells: inferred.cells,
                spans,
                x_axis,
                y_axis,
            }),
            cluster: None,
            assembly: Some(inferred.assembly),
            borderless: Some(inferred.stats),
            timing,
        })
    }
}

/// Compensate the systematic y bias of the upstream line detector before
/// clustering. Applying it here (rather than inside `cluster`) keeps
/// clustering idempotent on its own output.
fn calibrated(segments: &[RawSegment], offset: i32) -> Vec<RawSegment> {
    segments
        .iter()
        .map(|s| RawSegment::new(s.x1, s.y1 + offset, s.x2, s.y2 + offset))
        .collect()
}

fn region_filtered(cells: &[CellBox], region: &Region, slack: i32) -> Vec<CellBox> {
    let widened = region.expanded(slack);
    cells
        .iter()
        .filter(|c| widened.contains_strict(c.left_x(), c.top_y(), c.right_x(), c.bottom_y()))
        .copied()
        .collect()
}

fn resolve_all(
    cells: &[CellBox],
    x_axis: &GridAxis,
    y_axis: &GridAxis,
) -> Result<Vec<Span>, StructureError> {
    cells
        .iter()
        .map(|cell| resolve_span(cell, x_axis, y_axis))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structurer::StructureParams;

    fn uncalibrated_params() -> StructureParams {
        let mut params = StructureParams::default();
        params.cluster.calibration_offset_px = 0;
        params
    }

    fn hseg(x1: i32, y: i32, x2: i32) -> RawSegment {
        RawSegment::new(x1, y, x2, y)
    }

    fn vseg(x: i32, y1: i32, y2: i32) -> RawSegment {
        RawSegment::new(x, y1, x, y2)
    }

    fn lattice_segments(xs: &[i32], ys: &[i32]) -> (Vec<RawSegment>, Vec<RawSegment>) {
        let (x_lo, x_hi) = (xs[0], xs[xs.len() - 1]);
        let (y_lo, y_hi) = (ys[0], ys[ys.len() - 1]);
        let horizontal = ys.iter().map(|&y| hseg(x_lo, y, x_hi)).collect();
        let vertical = xs.iter().map(|&x| vseg(x, y_lo, y_hi)).collect();
        (horizontal, vertical)
    }

    #[test]
    fn missing_vertical_evidence_is_not_an_error() {
        let structurer = TableStructurer::new(StructureParams::default());
        let (horizontal, _) = lattice_segments(&[0, 100], &[0, 100]);
        let result = structurer.process_bordered(&horizontal, &[]).unwrap();
        assert!(result.is_none());

        let report = structurer
            .process_bordered_with_report(None, &horizontal, &[])
            .unwrap();
        assert!(!report.found);
        assert_eq!(report.outcome, StructureOutcome::MissingOrientation);
    }

    #[test]
    fn calibration_shifts_canonical_lines_down() {
        let structurer = TableStructurer::new(StructureParams::default());
        let (horizontal, vertical) = lattice_segments(&[100, 200], &[100, 200]);
        let table = structurer
            .process_bordered(&horizontal, &vertical)
            .unwrap()
            .unwrap();
        // Default calibration is -5 px along y.
        assert_eq!(table.y_axis.coords(), &[95, 195]);
        assert_eq!(table.x_axis.coords(), &[100, 200]);
    }

    #[test]
    fn region_filter_drops_cells_outside_the_table() {
        let structurer = TableStructurer::new(uncalibrated_params());
        let (horizontal, vertical) = lattice_segments(&[0, 100, 500], &[0, 100]);
        let region = Region::new(-10, -10, 150, 150);
        let table = structurer
            .process_bordered_in_region(region, &horizontal, &vertical)
            .unwrap()
            .unwrap();
        assert_eq!(table.cells.len(), 1);
        // Axes keep the full lattice so the kept cell still resolves.
        assert_eq!(table.x_axis.coords(), &[0, 100, 500]);
        assert_eq!(table.spans[0].start_col, 0);
        assert_eq!(table.spans[0].end_col, 0);
    }

    #[test]
    fn batch_processing_matches_single_runs() {
        let structurer = TableStructurer::new(uncalibrated_params());
        let (horizontal, vertical) = lattice_segments(&[0, 100, 200], &[0, 100, 200]);
        let inputs = vec![
            TableInput::Bordered {
                region: None,
                horizontal: horizontal.clone(),
                vertical: vertical.clone(),
            },
            TableInput::Bordered {
                region: None,
                horizontal,
                vertical: Vec::new(),
            },
        ];
        let results = structurer.process_batch(&inputs);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].as_ref().unwrap().as_ref().unwrap().cells.len(), 4);
        assert!(results[1].as_ref().unwrap().is_none());
    }
}
