use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Single grid axis used for board width and height.
pub type Coord = u16;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u32;

/// Row-major cell position, `row * cols + col`.
pub type CellIndex = usize;

/// Neighbors of one cell; never more than eight.
pub type Neighbors = SmallVec<[CellIndex; 8]>;

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Orthogonal steps first, then diagonals. Breadth-first search inherits this
/// order as its tie-break between equally short paths.
const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
    (1, 1),
];

/// Applies `(dx, dy)` to `index`, returning a value only when it stays inside
/// a `cols` by `rows` grid.
pub(crate) fn offset(
    index: CellIndex,
    (dx, dy): (isize, isize),
    cols: Coord,
    rows: Coord,
) -> Option<CellIndex> {
    let cols = usize::from(cols);
    let rows = usize::from(rows);
    if cols == 0 || index >= cols * rows {
        return None;
    }

    let col = (index % cols).checked_add_signed(dx)?;
    let row = (index / cols).checked_add_signed(dy)?;
    if col >= cols || row >= rows {
        return None;
    }

    Some(row * cols + col)
}

/// King-move neighbors of `index`, skipping any step that would cross the
/// grid boundary.
pub fn neighbors(index: CellIndex, cols: Coord, rows: Coord) -> Neighbors {
    NeighborIter::new(index, cols, rows).collect()
}

#[derive(Debug)]
pub struct NeighborIter {
    center: CellIndex,
    cols: Coord,
    rows: Coord,
    index: u8,
}

impl NeighborIter {
    pub fn new(center: CellIndex, cols: Coord, rows: Coord) -> Self {
        Self {
            center,
            cols,
            rows,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = CellIndex;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item = offset(
                self.center,
                DISPLACEMENTS[self.index as usize],
                self.cols,
                self.rows,
            );
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

/// Fixed-capacity set of cell indices backed by a bitset.
///
/// Membership is all that matters; iteration yields ascending indices but
/// callers should not rely on any particular order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CellSet {
    words: Vec<u64>,
    len: usize,
}

impl CellSet {
    const WORD_BITS: usize = u64::BITS as usize;

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, index: CellIndex) -> bool {
        self.words
            .get(index / Self::WORD_BITS)
            .is_some_and(|word| word & Self::bit(index) != 0)
    }

    /// Inserts `index`, growing the backing storage when needed. Returns
    /// whether the index was newly added.
    pub fn insert(&mut self, index: CellIndex) -> bool {
        let word = index / Self::WORD_BITS;
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }

        let was_present = self.words[word] & Self::bit(index) != 0;
        if !was_present {
            self.words[word] |= Self::bit(index);
            self.len += 1;
        }
        !was_present
    }

    pub fn iter(&self) -> impl Iterator<Item = CellIndex> + '_ {
        self.words.iter().enumerate().flat_map(|(i, &word)| {
            (0..Self::WORD_BITS)
                .filter(move |bit| word & (1u64 << bit) != 0)
                .map(move |bit| i * Self::WORD_BITS + bit)
        })
    }

    const fn bit(index: CellIndex) -> u64 {
        1 << (index % Self::WORD_BITS)
    }
}

impl PartialEq for CellSet {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for CellSet {}

impl FromIterator<CellIndex> for CellSet {
    fn from_iter<I: IntoIterator<Item = CellIndex>>(iter: I) -> Self {
        let mut set = Self::default();
        for index in iter {
            set.insert(index);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_has_three_neighbors() {
        let mut found = neighbors(0, 6, 5).to_vec();
        found.sort_unstable();
        assert_eq!(found, [1, 6, 7]);
    }

    #[test]
    fn interior_cell_has_eight_neighbors_orthogonal_first() {
        let found = neighbors(7, 6, 5);
        assert_eq!(found.as_slice(), &[6, 8, 1, 13, 0, 2, 12, 14]);
    }

    #[test]
    fn neighbors_do_not_wrap_across_rows() {
        // right edge of the first row must not reach the left edge of the second
        let found = neighbors(5, 6, 5);
        assert!(!found.contains(&6));
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn single_row_and_single_cell_grids() {
        assert!(neighbors(0, 1, 1).is_empty());
        assert_eq!(neighbors(1, 3, 1).as_slice(), &[0, 2]);
        assert_eq!(neighbors(0, 1, 3).as_slice(), &[1]);
    }

    #[test]
    fn out_of_grid_index_has_no_neighbors() {
        assert!(neighbors(30, 6, 5).is_empty());
    }

    #[test]
    fn adjacency_is_symmetric() {
        for (cols, rows) in [(1, 1), (1, 4), (4, 1), (3, 3), (6, 5), (7, 2)] {
            let total = usize::from(cols) * usize::from(rows);
            for a in 0..total {
                for b in 0..total {
                    assert_eq!(
                        neighbors(a, cols, rows).contains(&b),
                        neighbors(b, cols, rows).contains(&a),
                        "{a} <-> {b} on {cols}x{rows}",
                    );
                }
            }
        }
    }

    #[test]
    fn cell_set_tracks_membership_without_duplicates() {
        let mut set = CellSet::default();
        assert!(set.insert(3));
        assert!(!set.insert(3));
        assert!(set.insert(130));
        assert_eq!(set.len(), 2);
        assert!(set.contains(130));
        assert!(!set.contains(4));
        assert!(!set.contains(10_000));
        assert_eq!(set.iter().collect::<Vec<_>>(), [3, 130]);
    }

    #[test]
    fn cell_set_equality_ignores_insertion_order() {
        let a: CellSet = [5, 1, 9].into_iter().collect();
        let b: CellSet = [9, 5, 1, 1].into_iter().collect();
        assert_eq!(a, b);
    }
}
