//! Structurer orchestrating the reconstruction pipeline.
//!
//! Overview
//! - Calibrates raw ruling detections for the upstream detector's
//!   systematic y bias.
//! - Clusters raw lines per orientation into canonical grid lines
//!   ([`crate::cluster`]).
//! - Assembles closed cells from the intersection lattice with a streaming
//!   pending-cell cache ([`crate::assemble`]).
//! - Falls back to borderless inference from text fragments when no ruling
//!   evidence exists ([`crate::borderless`]).
//! - Resolves each cell's logical span against the grid axes
//!   ([`crate::axes`]).
//!
//! Modules
//! - [`params`] – configuration types used by the structurer and CLI.
//! - `pipeline` – the main [`TableStructurer`] implementation.

pub mod params;
mod pipeline;

pub use params::StructureParams;
pub use pipeline::{TableInput, TableStructurer};
