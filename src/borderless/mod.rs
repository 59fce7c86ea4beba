//! Grid inference for tables without ruling lines.
//!
//! When the detector reports a table region with no border, structure must
//! be inferred from text layout alone. The inference produces synthetic row
//! and column separator lines and then degrades to the same streaming
//! assembly used for bordered tables:
//!
//! - `bands`: cluster fragments into row bands, emit row separators.
//! - `columns`: reconcile column bounds across bands, emit column
//!   separators.
//! - `textmerge`: union split text fragments and pick each cell's reported
//!   geometry (tight text box vs. structural grid box).
//!
//! Spans are always resolved from the structural geometry against the
//! synthetic axes, so the exact-match span lookup cannot fail on cells whose
//! reported geometry was tightened to the text.

mod bands;
mod columns;
mod textmerge;

use crate::assemble::{assemble, AssembleParams};
use crate::diagnostics::{AssemblyStats, BorderlessStats};
use crate::types::{CanonicalLine, CellBox, Region, TextFragmentBox};
use log::debug;
use serde::{Deserialize, Serialize};

/// Tolerances for borderless grid inference, in pixels.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BorderlessParams {
    /// Region growth to tolerate text overhanging detected edges.
    pub region_margin_px: i32,
    /// Extra slack for the fragment inclusion filter.
    pub fragment_slack_px: i32,
    /// Top/bottom proximity for two fragments to share a row band.
    pub band_join_tol_px: i32,
    /// Separators closer than this coalesce into one.
    pub boundary_coalesce_px: i32,
    /// Left/right proximity marking two fragments as duplicates.
    pub duplicate_tol_px: i32,
    /// Top-y proximity grouping fragments into merge rows.
    pub merge_row_tol_px: i32,
    /// Maximum horizontal gap unioned by the fragment merge pass.
    pub merge_gap_px: i32,
    /// Per-side agreement required to prefer the text-derived cell box.
    pub reconcile_tol_px: i32,
}

impl Default for BorderlessParams {
    fn default() -> Self {
        Self {
            region_margin_px: 15,
            fragment_slack_px: 50,
            band_join_tol_px: 15,
            boundary_coalesce_px: 10,
            duplicate_tol_px: 5,
            merge_row_tol_px: 8,
            merge_gap_px: 10,
            reconcile_tol_px: 20,
        }
    }
}

/// Result of borderless inference.
///
/// `cells` carry the reported (possibly text-tightened) geometry;
/// `grid_cells` carry the structural geometry lying exactly on the synthetic
/// axes, in the same order, and are what spans must be resolved from.
#[derive(Clone, Debug)]
pub struct BorderlessTable {
    pub cells: Vec<CellBox>,
    pub grid_cells: Vec<CellBox>,
    pub stats: BorderlessStats,
    pub assembly: AssemblyStats,
}

/// Infer a cell grid from scattered text fragments.
///
/// Returns `None` when no usable fragments exist or when banding collapses
/// to fewer than one row or column; the caller treats this as "structure
/// cannot be determined" rather than fabricating a 1x1 grid.
pub fn infer(
    region: Region,
    fragments: &[TextFragmentBox],
    params: &BorderlessParams,
    assemble_params: &AssembleParams,
) -> Option<BorderlessTable> {
    if fragments.is_empty() {
        debug!("borderless: empty fragment set");
        return None;
    }

    let expanded = region.expanded(params.region_margin_px);
    let inclusion = expanded.expanded(params.fragment_slack_px);
    let mut kept: Vec<TextFragmentBox> = fragments
        .iter()
        .filter(|f| inclusion.contains_strict(f.left(), f.top(), f.right(), f.bottom()))
        .copied()
        .collect();
    if kept.is_empty() {
        debug!("borderless: no fragments inside the expanded region");
        return None;
    }
    kept.sort_by_key(TextFragmentBox::bottom);

    let mut stats = BorderlessStats {
        fragments_total: fragments.len(),
        fragments_in_region: kept.len(),
        ..BorderlessStats::default()
    };

    let bands = bands::cluster_bands(&kept, params.band_join_tol_px);
    stats.bands = bands.len();
    let row_separators = bands::row_separators(&expanded, &bands, params.boundary_coalesce_px);

    let mut rows: Vec<Vec<TextFragmentBox>> = bands
        .iter()
        .map(|band| {
            let mut row = band.members.clone();
            row.sort_by_key(TextFragmentBox::left);
            columns::dedup_row(&mut row, params.duplicate_tol_px);
            row
        })
        .collect();

    let mut bounds = columns::reference_bounds(&rows)?;
    for row in &mut rows {
        columns::widen_with_row(&mut bounds, row);
    }
    stats.columns = bounds.len();
    let column_separators = columns::column_separators(&expanded, &bounds);

    let horizontals = synthetic_horizontals(&expanded, &row_separators);
    let verticals = synthetic_verticals(&expanded, &column_separators);
    debug!(
        "borderless: {} bands, {} columns -> {} synthetic horizontals, {} verticals",
        stats.bands,
        stats.columns,
        horizontals.len(),
        verticals.len()
    );

    let assembly = assemble(&horizontals, &verticals, assemble_params)?;

    let merged = textmerge::merge_fragments(&kept, params.merge_row_tol_px, params.merge_gap_px);
    stats.merged_text_boxes = merged.len();
    let (cells, tightened) =
        textmerge::reconcile_cells(&assembly.cells, &merged, params.reconcile_tol_px);
    stats.tightened_cells = tightened;

    Some(BorderlessTable {
        cells,
        grid_cells: assembly.cells,
        stats,
        assembly: assembly.stats,
    })
}

fn synthetic_horizontals(region: &Region, separators: &[i32]) -> Vec<CanonicalLine> {
    let mut ys = separators.to_vec();
    ys.sort_unstable();
    ys.dedup();
    ys.into_iter()
        .map(|y| CanonicalLine::horizontal(region.x1, y, region.x2))
        .collect()
}

fn synthetic_verticals(region: &Region, separators: &[i32]) -> Vec<CanonicalLine> {
    let mut xs = separators.to_vec();
    xs.sort_unstable();
    xs.dedup();
    xs.into_iter()
        .map(|x| CanonicalLine::vertical(x, region.y1, region.y2))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(x: i32, y: i32, w: i32, h: i32) -> TextFragmentBox {
        TextFragmentBox::new(x, y, w, h)
    }

    fn two_by_three_fragments() -> Vec<TextFragmentBox> {
        vec![
            frag(20, 20, 60, 20),
            frag(120, 20, 60, 20),
            frag(220, 20, 60, 20),
            frag(20, 120, 60, 20),
            frag(120, 120, 60, 20),
            frag(220, 120, 60, 20),
        ]
    }

    #[test]
    fn regular_fragment_grid_yields_full_cell_set() {
        let region = Region::new(0, 0, 300, 200);
        let table = infer(
            region,
            &two_by_three_fragments(),
            &BorderlessParams::default(),
            &AssembleParams::default(),
        )
        .unwrap();
        assert_eq!(table.grid_cells.len(), 6);
        assert_eq!(table.stats.bands, 2);
        assert_eq!(table.stats.columns, 3);
        assert_eq!(table.assembly.dangling_dropped, 0);
    }

    #[test]
    fn empty_fragment_set_returns_none() {
        let region = Region::new(0, 0, 300, 200);
        assert!(infer(
            region,
            &[],
            &BorderlessParams::default(),
            &AssembleParams::default()
        )
        .is_none());
    }

    #[test]
    fn fragments_far_outside_the_region_are_ignored() {
        let region = Region::new(0, 0, 300, 200);
        let far = vec![frag(2000, 2000, 60, 20)];
        assert!(infer(
            region,
            &far,
            &BorderlessParams::default(),
            &AssembleParams::default()
        )
        .is_none());
    }
}
