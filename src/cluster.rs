//! 1-D clustering of raw line detections into canonical grid lines.
//!
//! Detectors report the same physical ruling several times with small
//! perpendicular offsets and varying extents. The clusterer sorts the raw
//! segments by their perpendicular coordinate and walks the sorted sequence,
//! merging every segment that falls within a fixed window of the current
//! cluster's anchor. Closing a cluster emits one [`CanonicalLine`] spanning
//! the min/max of its members along the line axis.
//!
//! Vertical clustering carries a secondary guard: a segment only joins when
//! its extent along the line overlaps the cluster's running extent. Two
//! vertically stacked rulings at the same x therefore stay separate lines
//! instead of fusing into one spurious full-height ruling.
//!
//! Clustering is idempotent on its own output: consecutive canonical lines
//! are always separated by more than the window, so a second pass reproduces
//! the first. The systematic detector bias compensation lives in the
//! orchestrator (`structurer::pipeline`), which shifts raw segments before
//! clustering; applying it here would break idempotence.

use crate::types::{CanonicalLine, Orientation, RawSegment};
use log::debug;
use serde::{Deserialize, Serialize};

/// Proximity windows controlling how aggressively raw lines merge.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClusterParams {
    /// Perpendicular window for horizontal lines (pixels).
    pub horizontal_window_px: i32,
    /// Perpendicular window for vertical lines (pixels).
    pub vertical_window_px: i32,
    /// Slack applied to the extent-overlap guard for vertical lines.
    pub extent_overlap_slack_px: i32,
    /// Systematic detector bias along y, applied to raw segments by the
    /// orchestrator before clustering.
    pub calibration_offset_px: i32,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            horizontal_window_px: 10,
            vertical_window_px: 15,
            extent_overlap_slack_px: 20,
            calibration_offset_px: -5,
        }
    }
}

impl ClusterParams {
    fn window(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Horizontal => self.horizontal_window_px,
            Orientation::Vertical => self.vertical_window_px,
        }
    }
}

/// Running state of the cluster currently being built. `lo`/`hi` track the
/// extent along the line axis; `anchor` is the perpendicular coordinate of
/// the first member.
struct Cluster {
    anchor: i32,
    lo: i32,
    hi: i32,
}

impl Cluster {
    fn open(anchor: i32, lo: i32, hi: i32) -> Self {
        Self { anchor, lo, hi }
    }

    fn absorb(&mut self, lo: i32, hi: i32) {
        self.lo = self.lo.min(lo);
        self.hi = self.hi.max(hi);
    }

    fn emit(&self, orientation: Orientation) -> CanonicalLine {
        match orientation {
            Orientation::Horizontal => CanonicalLine::horizontal(self.lo, self.anchor, self.hi),
            Orientation::Vertical => CanonicalLine::vertical(self.anchor, self.lo, self.hi),
        }
    }
}

/// Decompose a segment into (perpendicular coordinate, extent lo, extent hi)
/// for the given orientation.
fn decompose(seg: &RawSegment, orientation: Orientation) -> (i32, i32, i32) {
    match orientation {
        Orientation::Horizontal => (seg.y1, seg.x1.min(seg.x2), seg.x1.max(seg.x2)),
        Orientation::Vertical => (seg.x1, seg.y1.min(seg.y2), seg.y1.max(seg.y2)),
    }
}

/// Merge near-duplicate raw detections into canonical grid lines.
///
/// Output order follows the perpendicular coordinate; ties within the
/// proximity window are broken by input order (the sort is stable). An empty
/// input yields an empty output, which the caller treats as "structure cannot
/// be determined" for this orientation.
pub fn cluster(
    raw: &[RawSegment],
    orientation: Orientation,
    params: &ClusterParams,
) -> Vec<CanonicalLine> {
    if raw.is_empty() {
        return Vec::new();
    }

    let mut segments: Vec<(i32, i32, i32)> =
        raw.iter().map(|s| decompose(s, orientation)).collect();
    segments.sort_by_key(|&(perp, _, _)| perp);

    let window = params.window(orientation);
    let mut lines = Vec::new();
    let mut current: Option<Cluster> = None;

    for (perp, lo, hi) in segments {
        current = Some(match current.take() {
            Some(mut cluster) if joins(&cluster, perp, lo, hi, window, orientation, params) => {
                cluster.absorb(lo, hi);
                cluster
            }
            Some(cluster) => {
                lines.push(cluster.emit(orientation));
                Cluster::open(perp, lo, hi)
            }
            None => Cluster::open(perp, lo, hi),
        });
    }
    if let Some(cluster) = current {
        lines.push(cluster.emit(orientation));
    }

    debug!(
        "cluster: {} raw {:?} segments -> {} canonical lines",
        raw.len(),
        orientation,
        lines.len()
    );
    lines
}

fn joins(
    cluster: &Cluster,
    perp: i32,
    lo: i32,
    hi: i32,
    window: i32,
    orientation: Orientation,
    params: &ClusterParams,
) -> bool {
    if perp < cluster.anchor || perp > cluster.anchor + window {
        return false;
    }
    if orientation == Orientation::Vertical {
        // Stacked rulings at the same x must not fuse: extents have to
        // overlap (within slack) for the segment to belong to this ruling.
        let slack = params.extent_overlap_slack_px;
        if lo > cluster.hi + slack || hi < cluster.lo - slack {
            return false;
        }
    }
    true
}
