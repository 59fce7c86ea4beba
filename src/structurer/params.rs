//! Parameter types configuring the reconstruction stages.
//!
//! Every tolerance used by the pipeline is a named, overridable field;
//! defaults reproduce the calibrated constants of the reference detector
//! setup. All parameter structs deserialize from the runtime config with
//! per-field defaults, so a config may override a single knob.

use crate::assemble::AssembleParams;
use crate::borderless::BorderlessParams;
use crate::cluster::ClusterParams;
use serde::{Deserialize, Serialize};

/// Structurer-wide parameters controlling the full pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StructureParams {
    /// Line clustering windows and calibration.
    pub cluster: ClusterParams,
    /// Intersection tolerances for cell assembly.
    pub assemble: AssembleParams,
    /// Borderless inference tolerances.
    pub borderless: BorderlessParams,
    /// Slack for the optional region containment filter on bordered cells.
    pub region_filter_slack_px: i32,
}

impl Default for StructureParams {
    fn default() -> Self {
        Self {
            cluster: ClusterParams::default(),
            assemble: AssembleParams::default(),
            borderless: BorderlessParams::default(),
            region_filter_slack_px: 5,
        }
    }
}
