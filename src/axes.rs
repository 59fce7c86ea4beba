//! Grid axes and span resolution.
//!
//! A [`GridAxis`] is the sorted, duplicate-free sequence of boundary
//! coordinates (all-X or all-Y) derived from an assembled cell set. Span
//! lookup is exact-match by design: the assembler and the axis builder draw
//! from the same coordinates, so a miss means they disagree and is surfaced
//! as a hard error rather than being swallowed.

use crate::error::StructureError;
use crate::types::{CellBox, Span};
use serde::Serialize;
use std::fmt;

/// Which coordinate family an axis indexes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisKind {
    X,
    Y,
}

impl fmt::Display for AxisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisKind::X => f.write_str("x"),
            AxisKind::Y => f.write_str("y"),
        }
    }
}

/// Sorted, duplicate-free boundary coordinates of one axis.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GridAxis {
    coords: Vec<i32>,
}

impl GridAxis {
    /// X axis from the cells' left/right boundary coordinates.
    pub fn x_from_cells(cells: &[CellBox]) -> Self {
        Self::from_coords(
            cells
                .iter()
                .flat_map(|c| [c.left_x(), c.right_x()])
                .collect(),
        )
    }

    /// Y axis from the cells' top/bottom boundary coordinates.
    pub fn y_from_cells(cells: &[CellBox]) -> Self {
        Self::from_coords(
            cells
                .iter()
                .flat_map(|c| [c.top_y(), c.bottom_y()])
                .collect(),
        )
    }

    fn from_coords(mut coords: Vec<i32>) -> Self {
        coords.sort_unstable();
        coords.dedup();
        Self { coords }
    }

    pub fn coords(&self) -> &[i32] {
        &self.coords
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Exact-match position of `coord` on the axis.
    pub fn index_of(&self, coord: i32) -> Option<usize> {
        self.coords.binary_search(&coord).ok()
    }
}

fn lookup(axis: &GridAxis, coord: i32, kind: AxisKind) -> Result<usize, StructureError> {
    axis.index_of(coord)
        .ok_or(StructureError::AxisLookup { coord, axis: kind })
}

/// Map a cell's pixel boundaries to grid indices.
///
/// The right/bottom boundary coordinates denote the boundary *after* the
/// span, so the end indices are the located position minus one. A right or
/// bottom coordinate resolving to position zero would make the cell extend
/// before the axis origin; that is the same assembler/axis disagreement as a
/// missing coordinate and reported identically.
pub fn resolve_span(
    cell: &CellBox,
    x_axis: &GridAxis,
    y_axis: &GridAxis,
) -> Result<Span, StructureError> {
    let start_col = lookup(x_axis, cell.left_x(), AxisKind::X)?;
    let end_col = lookup(x_axis, cell.right_x(), AxisKind::X)?
        .checked_sub(1)
        .ok_or(StructureError::AxisLookup {
            coord: cell.right_x(),
            axis: AxisKind::X,
        })?;
    let start_row = lookup(y_axis, cell.top_y(), AxisKind::Y)?;
    let end_row = lookup(y_axis, cell.bottom_y(), AxisKind::Y)?
        .checked_sub(1)
        .ok_or(StructureError::AxisLookup {
            coord: cell.bottom_y(),
            axis: AxisKind::Y,
        })?;
    Ok(Span {
        start_col,
        end_col,
        start_row,
        end_row,
    })
}
