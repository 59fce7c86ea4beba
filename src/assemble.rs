//! Streaming assembly of grid cells from canonical rulings.
//!
//! Stage 1 intersects every vertical with every horizontal line, producing a
//! point lattice ordered by vertical-line index and, within each, by
//! horizontal-line index. Stage 2 sweeps the lattice one vertical ruling at
//! a time: adjacent point pairs on a ruling open pending cells whose left
//! corners are known, and each later ruling closes the right corners of any
//! carried cell whose top/bottom y it reproduces. A cell is emitted exactly
//! once, the moment both right corners are known.
//!
//! The deferred-close cache is what makes merged cells work: a cell spanning
//! several columns simply waits in the cache until a ruling finally carries
//! both of its boundary heights. The cache is consumed by value on every
//! ruling; a cell is either emitted or moves into the next ruling's cache,
//! so there is no in-place removal while iterating.
//!
//! A pending cell that never completes (a dangling ruling in the detection)
//! is silently dropped and counted in [`AssemblyStats::dangling_dropped`].

use crate::diagnostics::AssemblyStats;
use crate::types::{CanonicalLine, CellBox, GridPoint};
use log::debug;
use serde::{Deserialize, Serialize};

/// Intersection tolerances in pixels.
///
/// The y band is asymmetric: detectors systematically cut vertical rulings
/// short at the top, so a horizontal line slightly above a vertical's upper
/// end still intersects it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssembleParams {
    /// Tolerance around the horizontal line's x extent.
    pub intersect_x_tol_px: i32,
    /// How far above the vertical's upper end a horizontal may sit.
    pub intersect_y_tol_above_px: i32,
    /// How far below the vertical's lower end a horizontal may sit.
    pub intersect_y_tol_below_px: i32,
}

impl Default for AssembleParams {
    fn default() -> Self {
        Self {
            intersect_x_tol_px: 5,
            intersect_y_tol_above_px: 8,
            intersect_y_tol_below_px: 5,
        }
    }
}

/// Assembled cells plus sweep counters.
#[derive(Clone, Debug)]
pub struct Assembly {
    pub cells: Vec<CellBox>,
    pub stats: AssemblyStats,
}

/// A cell whose left corners are known and whose right corners are still
/// being sought in later rulings.
#[derive(Clone, Copy, Debug)]
struct PendingCell {
    top_left: GridPoint,
    bottom_left: GridPoint,
    top_right: Option<GridPoint>,
    bottom_right: Option<GridPoint>,
}

impl PendingCell {
    fn open(top_left: GridPoint, bottom_left: GridPoint) -> Self {
        Self {
            top_left,
            bottom_left,
            top_right: None,
            bottom_right: None,
        }
    }

    /// Take any corner this lattice point provides.
    fn absorb(&mut self, point: GridPoint) {
        if self.top_right.is_none() && point.y == self.top_left.y {
            self.top_right = Some(point);
        }
        if self.bottom_right.is_none() && point.y == self.bottom_left.y {
            self.bottom_right = Some(point);
        }
    }

    /// Emit the closed cell, or hand the still-pending cell back.
    fn close(self) -> Result<CellBox, PendingCell> {
        match (self.top_right, self.bottom_right) {
            (Some(top_right), Some(bottom_right)) => Ok(CellBox {
                top_left: self.top_left,
                bottom_left: self.bottom_left,
                top_right,
                bottom_right,
            }),
            _ => Err(self),
        }
    }
}

fn intersect(
    vertical: &CanonicalLine,
    horizontal: &CanonicalLine,
    params: &AssembleParams,
) -> Option<GridPoint> {
    let x = vertical.x1;
    let y = horizontal.y1;
    let x_ok = x >= horizontal.x1 - params.intersect_x_tol_px
        && x <= horizontal.x2 + params.intersect_x_tol_px;
    let y_ok = y >= vertical.y1 - params.intersect_y_tol_above_px
        && y <= vertical.y2 + params.intersect_y_tol_below_px;
    if x_ok && y_ok {
        Some(GridPoint::new(x, y))
    } else {
        None
    }
}

/// Assemble closed cells from canonical rulings.
///
/// Returns `None` when either orientation is empty: a table cannot be
/// assembled without both. An empty cell list (e.g. a single ruling per
/// orientation) is still `Some`; the caller decides what an empty table
/// means.
pub fn assemble(
    horizontals: &[CanonicalLine],
    verticals: &[CanonicalLine],
    params: &AssembleParams,
) -> Option<Assembly> {
    if horizontals.is_empty() || verticals.is_empty() {
        debug!(
            "assemble: missing orientation (horizontal={}, vertical={})",
            horizontals.len(),
            verticals.len()
        );
        return None;
    }

    let lattice: Vec<Vec<GridPoint>> = verticals
        .iter()
        .map(|v| {
            horizontals
                .iter()
                .filter_map(|h| intersect(v, h, params))
                .collect()
        })
        .collect();

    let mut stats = AssemblyStats {
        lattice_points: lattice.iter().map(Vec::len).sum(),
        ..AssemblyStats::default()
    };

    let mut cells = Vec::new();
    let mut cache: Vec<PendingCell> = Vec::new();
    let last = lattice.len() - 1;

    for (index, ruling) in lattice.iter().enumerate() {
        let carried = std::mem::take(&mut cache);
        for mut cell in carried {
            for point in ruling {
                cell.absorb(*point);
            }
            match cell.close() {
                Ok(closed) => {
                    cells.push(closed);
                    stats.emitted_cells += 1;
                }
                Err(pending) => cache.push(pending),
            }
        }
        // The final ruling cannot open anything that would ever complete.
        if index != last {
            for pair in ruling.windows(2) {
                cache.push(PendingCell::open(pair[0], pair[1]));
                stats.opened_cells += 1;
            }
        }
    }

    stats.dangling_dropped = cache.len();
    if stats.dangling_dropped > 0 {
        debug!(
            "assemble: dropped {} dangling cells without both right corners",
            stats.dangling_dropped
        );
    }
    debug!(
        "assemble: {} lattice points -> {} cells",
        stats.lattice_points,
        cells.len()
    );

    Some(Assembly { cells, stats })
}
