//! Geometric data model shared by the reconstruction stages.
//!
//! All coordinates are integer pixels in the source-image frame. Inputs
//! (`RawSegment`, `TextFragmentBox`, `Region`) arrive from an external
//! detector and are never mutated; `CanonicalLine` and the point lattice are
//! transient; `CellBox`, `Span` and [`TableStructure`] are the caller-owned
//! outputs.

use serde::{Deserialize, Serialize};

/// Axis orientation of a ruling line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// One raw line detection, axis-aligned (`y1 == y2` horizontal, `x1 == x2`
/// vertical). May be duplicated, fragmented, or slightly offset; the
/// clusterer is responsible for merging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSegment {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl RawSegment {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }
}

/// A deduplicated, merged ruling. Horizontal lines hold
/// `(x_min, y, x_max, y)`, vertical lines `(x, y_min, x, y_max)`; the
/// constructors normalize endpoint order so `x1 <= x2` and `y1 <= y2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalLine {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl CanonicalLine {
    /// Horizontal ruling at height `y` spanning `[x_min, x_max]`.
    pub fn horizontal(x_min: i32, y: i32, x_max: i32) -> Self {
        Self {
            x1: x_min.min(x_max),
            y1: y,
            x2: x_min.max(x_max),
            y2: y,
        }
    }

    /// Vertical ruling at `x` spanning `[y_min, y_max]`.
    pub fn vertical(x: i32, y_min: i32, y_max: i32) -> Self {
        Self {
            x1: x,
            y1: y_min.min(y_max),
            x2: x,
            y2: y_min.max(y_max),
        }
    }

    pub fn orientation(&self) -> Orientation {
        if self.y1 == self.y2 {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    /// View of the canonical line as a raw segment, e.g. to re-feed a
    /// clustering pass with its own output.
    pub fn to_raw(&self) -> RawSegment {
        RawSegment::new(self.x1, self.y1, self.x2, self.y2)
    }
}

/// Meeting point of one horizontal and one vertical canonical line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// One closed grid cell: four corner points (eight coordinates).
///
/// The left corners come from the ruling that opened the cell, the right
/// corners from the rulings that closed it; with merged cells the two right
/// corners may lie on different rulings, so the quadrilateral is not
/// necessarily a rectangle. Span resolution only consults
/// [`left_x`](Self::left_x) / [`right_x`](Self::right_x) /
/// [`top_y`](Self::top_y) / [`bottom_y`](Self::bottom_y).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellBox {
    pub top_left: GridPoint,
    pub bottom_left: GridPoint,
    pub top_right: GridPoint,
    pub bottom_right: GridPoint,
}

impl CellBox {
    /// Axis-aligned rectangle, e.g. a text-tightened cell boundary.
    pub fn rect(x_min: i32, y_min: i32, x_max: i32, y_max: i32) -> Self {
        Self {
            top_left: GridPoint::new(x_min, y_min),
            bottom_left: GridPoint::new(x_min, y_max),
            top_right: GridPoint::new(x_max, y_min),
            bottom_right: GridPoint::new(x_max, y_max),
        }
    }

    pub fn left_x(&self) -> i32 {
        self.top_left.x
    }

    pub fn right_x(&self) -> i32 {
        self.top_right.x
    }

    pub fn top_y(&self) -> i32 {
        self.top_left.y
    }

    pub fn bottom_y(&self) -> i32 {
        self.bottom_left.y
    }
}

/// One text-fragment bounding box from OCR/contour analysis, used only by
/// borderless inference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFragmentBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl TextFragmentBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn top(&self) -> i32 {
        self.y
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn area(&self) -> i64 {
        self.width as i64 * self.height as i64
    }
}

/// Region of interest in source-image pixel space, `x1 < x2`, `y1 < y2`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Region {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Region grown by `margin` pixels on every side.
    pub fn expanded(&self, margin: i32) -> Self {
        Self {
            x1: self.x1 - margin,
            y1: self.y1 - margin,
            x2: self.x2 + margin,
            y2: self.y2 + margin,
        }
    }

    /// Strict containment test used for fragment/cell inclusion filters.
    pub fn contains_strict(&self, left: i32, top: i32, right: i32, bottom: i32) -> bool {
        left > self.x1 && top > self.y1 && right < self.x2 && bottom < self.y2
    }
}

/// A cell's position in the logical row/column grid, independent of its
/// pixel geometry. `end_*` is inclusive, so a plain cell has
/// `end_col == start_col`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Span {
    pub start_col: usize,
    pub end_col: usize,
    pub start_row: usize,
    pub end_row: usize,
}

/// Reconstructed table: cells, spans (same order as `cells`), and the two
/// boundary axes so the caller can independently re-derive spans.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableStructure {
    pub cells: Vec<CellBox>,
    pub spans: Vec<Span>,
    pub x_axis: crate::axes::GridAxis,
    pub y_axis: crate::axes::GridAxis,
}

impl TableStructure {
    /// Number of logical columns (boundary count minus one).
    pub fn column_count(&self) -> usize {
        self.x_axis.len().saturating_sub(1)
    }

    /// Number of logical rows (boundary count minus one).
    pub fn row_count(&self) -> usize {
        self.y_axis.len().saturating_sub(1)
    }
}
