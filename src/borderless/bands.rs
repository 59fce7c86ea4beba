//! Row-band clustering of text fragments.
//!
//! Fragments are sorted by their bottom edge and grouped into horizontal
//! bands: a fragment joins the current band when its top is close to the
//! band's anchor top or its bottom is close to the band's running maximum
//! bottom. Row separators fall at the midpoints between consecutive bands.

use crate::types::{Region, TextFragmentBox};

#[derive(Clone, Debug)]
pub(super) struct Band {
    anchor_top: i32,
    pub min_top: i32,
    pub max_bottom: i32,
    pub members: Vec<TextFragmentBox>,
}

impl Band {
    fn open(fragment: TextFragmentBox) -> Self {
        Self {
            anchor_top: fragment.top(),
            min_top: fragment.top(),
            max_bottom: fragment.bottom(),
            members: vec![fragment],
        }
    }

    fn absorb(&mut self, fragment: TextFragmentBox) {
        self.min_top = self.min_top.min(fragment.top());
        self.max_bottom = self.max_bottom.max(fragment.bottom());
        self.members.push(fragment);
    }

    fn accepts(&self, fragment: &TextFragmentBox, join_tol: i32) -> bool {
        (fragment.top() - self.anchor_top).abs() <= join_tol
            || (fragment.bottom() - self.max_bottom).abs() <= join_tol
    }
}

/// Group fragments (sorted by bottom y) into bands.
pub(super) fn cluster_bands(fragments: &[TextFragmentBox], join_tol: i32) -> Vec<Band> {
    let mut bands: Vec<Band> = Vec::new();
    for fragment in fragments {
        let joins = bands
            .last()
            .is_some_and(|band| band.accepts(fragment, join_tol));
        if joins {
            bands.last_mut().expect("non-empty").absorb(*fragment);
        } else {
            bands.push(Band::open(*fragment));
        }
    }
    bands
}

/// Row separator y coordinates: the expanded region's top, one midpoint per
/// band gap, and the expanded region's bottom. A midpoint landing within
/// `coalesce_tol` of the previous separator replaces it, guarding against
/// spurious thin bands.
pub(super) fn row_separators(region: &Region, bands: &[Band], coalesce_tol: i32) -> Vec<i32> {
    let mut separators = vec![region.y1];
    for pair in bands.windows(2) {
        let mid = (pair[0].max_bottom + pair[1].min_top) / 2;
        let coalesce = separators.len() > 1
            && separators
                .last()
                .is_some_and(|&prev| (mid - prev).abs() <= coalesce_tol);
        if coalesce {
            *separators.last_mut().expect("non-empty") = mid;
        } else {
            separators.push(mid);
        }
    }
    separators.push(region.y2);
    separators
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(x: i32, y: i32, w: i32, h: i32) -> TextFragmentBox {
        TextFragmentBox::new(x, y, w, h)
    }

    #[test]
    fn fragments_with_close_tops_share_a_band() {
        let mut frags = vec![frag(0, 20, 50, 20), frag(60, 24, 50, 18), frag(0, 120, 50, 20)];
        frags.sort_by_key(|f| f.bottom());
        let bands = cluster_bands(&frags, 15);
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0].members.len(), 2);
        assert_eq!(bands[0].min_top, 20);
        assert_eq!(bands[0].max_bottom, 42);
    }

    #[test]
    fn separators_are_band_gap_midpoints() {
        let mut frags = vec![frag(0, 20, 50, 20), frag(0, 120, 50, 20)];
        frags.sort_by_key(|f| f.bottom());
        let bands = cluster_bands(&frags, 15);
        let region = Region::new(-15, -15, 315, 215);
        let seps = row_separators(&region, &bands, 10);
        assert_eq!(seps, vec![-15, 80, 215]);
    }

    #[test]
    fn distant_separators_stay_apart() {
        let mut frags = vec![frag(0, 0, 50, 40), frag(0, 60, 50, 2), frag(0, 80, 50, 40)];
        frags.sort_by_key(|f| f.bottom());
        let bands = cluster_bands(&frags, 15);
        assert_eq!(bands.len(), 3);
        let region = Region::new(0, 0, 100, 200);
        let seps = row_separators(&region, &bands, 10);
        assert_eq!(seps, vec![0, 50, 71, 200]);
    }

    #[test]
    fn close_separators_coalesce() {
        // A thin noise band between two overlapping text bands produces two
        // midpoints within 10 px; the newer one replaces the older.
        let mut frags = vec![frag(0, 0, 50, 40), frag(0, 60, 50, 2), frag(0, 44, 50, 60)];
        frags.sort_by_key(|f| f.bottom());
        let bands = cluster_bands(&frags, 15);
        assert_eq!(bands.len(), 3);
        let region = Region::new(0, 0, 100, 200);
        let seps = row_separators(&region, &bands, 10);
        assert_eq!(seps, vec![0, 53, 200]);
    }
}
