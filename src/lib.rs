#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod axes;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod structurer;
pub mod types;

// Stage modules – public for tools and advanced users, but the structurer is
// the intended entry point.
pub mod assemble;
pub mod borderless;
pub mod cluster;

// --- High-level re-exports -------------------------------------------------

// Main entry points: structurer + results.
pub use crate::structurer::{StructureParams, TableInput, TableStructurer};
pub use crate::types::TableStructure;

// High-level diagnostics returned by the structurer.
pub use crate::diagnostics::{StructureOutcome, StructureReport};

// Hard-failure type.
pub use crate::error::StructureError;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```
/// use table_grid::prelude::*;
///
/// let horizontal = vec![
///     RawSegment::new(0, 0, 200, 0),
///     RawSegment::new(0, 100, 200, 100),
/// ];
/// let vertical = vec![
///     RawSegment::new(0, 0, 0, 100),
///     RawSegment::new(200, 0, 200, 100),
/// ];
///
/// let structurer = TableStructurer::new(StructureParams::default());
/// let table = structurer
///     .process_bordered(&horizontal, &vertical)
///     .expect("no invariant violations")
///     .expect("a 1x1 table");
/// assert_eq!(table.cells.len(), 1);
/// ```
pub mod prelude {
    pub use crate::types::{
        CellBox, RawSegment, Region, Span, TableStructure, TextFragmentBox,
    };
    pub use crate::{StructureParams, TableInput, TableStructurer};
}
