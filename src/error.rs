//! Hard-failure taxonomy.
//!
//! Recoverable "no evidence" conditions (missing orientation, empty fragment
//! set) are absent results, not errors; every pipeline stage returns `Option`
//! for those, mirroring the outcome enum in [`crate::diagnostics`]. An
//! [`StructureError`] aborts processing of one table only and indicates a
//! logic bug rather than noisy input.

use crate::axes::AxisKind;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum StructureError {
    /// A cell coordinate was absent from the grid axis during span
    /// resolution: the assembler and the axis builder disagree.
    #[error("cell coordinate {coord} not found on the {axis} axis")]
    AxisLookup { coord: i32, axis: AxisKind },
}
