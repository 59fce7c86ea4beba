//! Synthetic detector outputs for integration tests.

use table_grid::prelude::*;

/// Raw ruling segments for a full lattice: one horizontal per y spanning the
/// x range, one vertical per x spanning the y range.
pub fn lattice_segments(xs: &[i32], ys: &[i32]) -> (Vec<RawSegment>, Vec<RawSegment>) {
    let (x_lo, x_hi) = (xs[0], xs[xs.len() - 1]);
    let (y_lo, y_hi) = (ys[0], ys[ys.len() - 1]);
    let horizontal = ys
        .iter()
        .map(|&y| RawSegment::new(x_lo, y, x_hi, y))
        .collect();
    let vertical = xs
        .iter()
        .map(|&x| RawSegment::new(x, y_lo, x, y_hi))
        .collect();
    (horizontal, vertical)
}

/// Text fragments laid out in a regular rows x cols grid.
pub fn fragment_grid(
    origin: (i32, i32),
    rows: usize,
    cols: usize,
    size: (i32, i32),
    pitch: (i32, i32),
) -> Vec<TextFragmentBox> {
    let mut fragments = Vec::with_capacity(rows * cols);
    for row in 0..rows {
        for col in 0..cols {
            fragments.push(TextFragmentBox::new(
                origin.0 + col as i32 * pitch.0,
                origin.1 + row as i32 * pitch.1,
                size.0,
                size.1,
            ));
        }
    }
    fragments
}

/// Structure parameters with detector bias calibration disabled, so test
/// coordinates survive the pipeline unchanged.
pub fn uncalibrated_params() -> StructureParams {
    let mut params = StructureParams::default();
    params.cluster.calibration_offset_px = 0;
    params
}
