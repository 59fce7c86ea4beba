//! Text-fragment merging and text/structural cell reconciliation.
//!
//! OCR splits one logical cell's text into several fragments. Before cell
//! boundaries are finalized, fragments are grouped into rows by top-y
//! proximity and adjacent same-row fragments with a small horizontal gap are
//! unioned into one box. Each structural cell is then compared against the
//! union of merged boxes it contains: when the two agree on every side
//! within a tolerance, the tight text-derived box becomes the reported cell
//! geometry; otherwise the structural box wins, since the grid is derived
//! from consistent boundaries rather than potentially-split text.

use crate::types::{CellBox, TextFragmentBox};

/// Merged text box in absolute (x1, y1, x2, y2) coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct MergedText {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl MergedText {
    fn of(fragment: &TextFragmentBox) -> Self {
        Self {
            x1: fragment.left(),
            y1: fragment.top(),
            x2: fragment.right(),
            y2: fragment.bottom(),
        }
    }

    fn union(&self, other: &MergedText) -> Self {
        Self {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }

    fn inside(&self, cell: &CellBox) -> bool {
        self.x1 >= cell.left_x()
            && self.y1 >= cell.top_y()
            && self.x2 <= cell.right_x()
            && self.y2 <= cell.bottom_y()
    }

    fn agrees(&self, cell: &CellBox, tol: i32) -> bool {
        (self.x1 - cell.left_x()).abs() <= tol
            && (self.y1 - cell.top_y()).abs() <= tol
            && (self.x2 - cell.right_x()).abs() <= tol
            && (self.y2 - cell.bottom_y()).abs() <= tol
    }
}

/// Union adjacent same-row fragments separated by less than `gap_tol`.
/// Rows are formed by top-y proximity (`row_tol`).
pub(super) fn merge_fragments(
    fragments: &[TextFragmentBox],
    row_tol: i32,
    gap_tol: i32,
) -> Vec<MergedText> {
    let mut sorted = fragments.to_vec();
    sorted.sort_by_key(TextFragmentBox::top);

    let mut rows: Vec<Vec<TextFragmentBox>> = Vec::new();
    let mut last_top: Option<i32> = None;
    for fragment in sorted {
        match last_top {
            Some(top) if (fragment.top() - top).abs() < row_tol => {
                rows.last_mut().expect("non-empty").push(fragment);
            }
            _ => {
                last_top = Some(fragment.top());
                rows.push(vec![fragment]);
            }
        }
    }

    let mut merged = Vec::new();
    for mut row in rows {
        row.sort_by_key(TextFragmentBox::left);
        let mut current: Option<MergedText> = None;
        for fragment in &row {
            let next = MergedText::of(fragment);
            current = Some(match current.take() {
                Some(cur) if (cur.x2 - next.x1).abs() < gap_tol => cur.union(&next),
                Some(cur) => {
                    merged.push(cur);
                    next
                }
                None => next,
            });
        }
        if let Some(cur) = current {
            merged.push(cur);
        }
    }
    merged
}

/// Pick each cell's reported geometry: the tight text-derived box when it
/// agrees with the structural cell on every side, the structural box
/// otherwise. Returns the chosen boxes plus the count of tightened cells.
pub(super) fn reconcile_cells(
    cells: &[CellBox],
    merged: &[MergedText],
    tol: i32,
) -> (Vec<CellBox>, usize) {
    let mut tightened = 0;
    let chosen = cells
        .iter()
        .map(|cell| {
            let text_union = merged
                .iter()
                .filter(|m| m.inside(cell))
                .fold(None::<MergedText>, |acc, m| {
                    Some(acc.map_or(*m, |a| a.union(m)))
                });
            match text_union {
                Some(text) if text.agrees(cell, tol) => {
                    tightened += 1;
                    CellBox::rect(text.x1, text.y1, text.x2, text.y2)
                }
                _ => *cell,
            }
        })
        .collect();
    (chosen, tightened)
}
