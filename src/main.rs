use table_grid::prelude::*;

fn main() {
    // Demo stub: builds a small synthetic bordered table and runs the
    // structurer on it.
    let horizontal = vec![
        RawSegment::new(100, 100, 300, 100),
        RawSegment::new(100, 200, 300, 200),
        RawSegment::new(100, 300, 300, 300),
    ];
    let vertical = vec![
        RawSegment::new(100, 100, 100, 300),
        RawSegment::new(200, 100, 200, 300),
        RawSegment::new(300, 100, 300, 300),
    ];

    let structurer = TableStructurer::new(StructureParams::default());
    match structurer.process_bordered(&horizontal, &vertical) {
        Ok(Some(table)) => println!(
            "cells={} rows={} cols={}",
            table.cells.len(),
            table.row_count(),
            table.column_count()
        ),
        Ok(None) => println!("no structure found"),
        Err(err) => eprintln!("invariant violation: {err}"),
    }
}
