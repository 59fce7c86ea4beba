mod common;

use common::synthetic::{lattice_segments, uncalibrated_params};
use std::collections::BTreeSet;
use table_grid::axes::resolve_span;
use table_grid::prelude::*;
use table_grid::StructureOutcome;

#[test]
fn duplicate_detections_collapse_to_one_canonical_line_each() {
    // Near-duplicate horizontals at y=100/104 and a lone one at y=200.
    let horizontal = vec![
        RawSegment::new(0, 100, 300, 100),
        RawSegment::new(10, 104, 290, 104),
        RawSegment::new(0, 200, 300, 200),
    ];
    let vertical = vec![
        RawSegment::new(0, 100, 0, 200),
        RawSegment::new(300, 100, 300, 200),
    ];
    let structurer = TableStructurer::new(uncalibrated_params());
    let report = structurer
        .process_bordered_with_report(None, &horizontal, &vertical)
        .unwrap();
    let cluster = report.cluster.unwrap();
    assert_eq!(cluster.raw_horizontal, 3);
    assert_eq!(cluster.canonical_horizontal, 2);
    assert_eq!(cluster.canonical_vertical, 2);

    let table = report.table.unwrap();
    assert_eq!(table.cells.len(), 1);
    // The merged line keeps the anchor height and the union extent.
    assert_eq!(table.y_axis.coords(), &[100, 200]);
}

#[test]
fn two_by_two_grid_covers_every_span_once() {
    let (horizontal, vertical) = lattice_segments(&[100, 200, 300], &[100, 200, 300]);
    let structurer = TableStructurer::new(uncalibrated_params());
    let table = structurer
        .process_bordered(&horizontal, &vertical)
        .unwrap()
        .unwrap();

    assert_eq!(table.cells.len(), 4);
    assert_eq!(table.row_count(), 2);
    assert_eq!(table.column_count(), 2);

    let positions: BTreeSet<(usize, usize)> = table
        .spans
        .iter()
        .map(|s| (s.start_row, s.start_col))
        .collect();
    let expected: BTreeSet<(usize, usize)> =
        [(0, 0), (0, 1), (1, 0), (1, 1)].into_iter().collect();
    assert_eq!(positions, expected);
    for span in &table.spans {
        assert_eq!(span.end_row, span.start_row);
        assert_eq!(span.end_col, span.start_col);
    }
}

#[test]
fn short_middle_vertical_yields_one_column_spanning_cell() {
    // The middle vertical only exists in the lower half of the table, so
    // the upper row is one merged cell across both columns.
    let horizontal = vec![
        RawSegment::new(0, 0, 200, 0),
        RawSegment::new(0, 100, 200, 100),
        RawSegment::new(0, 200, 200, 200),
    ];
    let vertical = vec![
        RawSegment::new(0, 0, 0, 200),
        RawSegment::new(100, 100, 100, 200),
        RawSegment::new(200, 0, 200, 200),
    ];
    let structurer = TableStructurer::new(uncalibrated_params());
    let table = structurer
        .process_bordered(&horizontal, &vertical)
        .unwrap()
        .unwrap();

    assert_eq!(table.cells.len(), 3);
    let merged: Vec<&Span> = table
        .spans
        .iter()
        .filter(|s| s.end_col - s.start_col == 1)
        .collect();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].start_col, 0);
    assert_eq!(merged[0].start_row, 0);
    assert_eq!(merged[0].end_row, 0);
}

#[test]
fn zero_vertical_segments_is_an_explicit_no_result() {
    let (horizontal, _) = lattice_segments(&[0, 100], &[0, 100]);
    let structurer = TableStructurer::new(StructureParams::default());

    let result = structurer.process_bordered(&horizontal, &[]).unwrap();
    assert!(result.is_none());

    let report = structurer
        .process_bordered_with_report(None, &horizontal, &[])
        .unwrap();
    assert!(!report.found);
    assert_eq!(report.outcome, StructureOutcome::MissingOrientation);
    assert!(report.table.is_none());
}

#[test]
fn spans_are_monotonic_and_axes_round_trip() {
    let (horizontal, vertical) =
        lattice_segments(&[50, 150, 250, 400], &[10, 60, 200, 260]);
    let structurer = TableStructurer::new(uncalibrated_params());
    let table = structurer
        .process_bordered(&horizontal, &vertical)
        .unwrap()
        .unwrap();

    assert_eq!(table.cells.len(), 9);
    for span in &table.spans {
        assert!(span.end_col >= span.start_col);
        assert!(span.end_row >= span.start_row);
    }

    // Every boundary coordinate of every cell is on the exposed axes, so
    // re-resolving each cell reproduces the reported span.
    for (cell, span) in table.cells.iter().zip(&table.spans) {
        let resolved = resolve_span(cell, &table.x_axis, &table.y_axis).unwrap();
        assert_eq!(resolved, *span);
    }
}

#[test]
fn batch_runs_tables_independently() {
    let (horizontal, vertical) = lattice_segments(&[0, 100, 200], &[0, 100, 200]);
    let inputs = vec![
        TableInput::Bordered {
            region: None,
            horizontal: horizontal.clone(),
            vertical: vertical.clone(),
        },
        TableInput::Bordered {
            region: None,
            horizontal: Vec::new(),
            vertical,
        },
        TableInput::Bordered {
            region: Some(Region::new(-10, -10, 120, 220)),
            horizontal,
            vertical: vec![
                RawSegment::new(0, 0, 0, 200),
                RawSegment::new(100, 0, 100, 200),
            ],
        },
    ];
    let structurer = TableStructurer::new(uncalibrated_params());
    let results = structurer.process_batch(&inputs);

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].as_ref().unwrap().as_ref().unwrap().cells.len(), 4);
    assert!(results[1].as_ref().unwrap().is_none());
    assert_eq!(results[2].as_ref().unwrap().as_ref().unwrap().cells.len(), 2);
}
