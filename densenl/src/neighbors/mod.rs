//! Dense neighbor search, finding all pairs of atoms within a spherical
//! cutoff with the minimum image convention.
use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

mod kernel;
pub use self::kernel::search;

mod options;
pub use self::options::{NeighborSearch, check_geometry};

/// A full neighbor list, using the same conventions as ASE's
/// `primitive_neighbor_list` with `quantities="ijS"`.
///
/// Each pair appears twice, once as `i-j` and once as `j-i` with the opposite
/// shift. The vector between the two atoms in a pair is given by
/// `positions[j] - positions[i] + shift · cell`.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborList {
    /// atoms indexes in the pairs, with shape `[2, n_pairs]`. The first row
    /// contains `i` and the second row `j`.
    pub pairs: Array2<usize>,
    /// number of cell boundaries crossed by each pair, with shape
    /// `[n_pairs, 3]`. This only contains integer values.
    pub shifts: Array2<f64>,
}

impl NeighborList {
    /// Get the number of pairs in this neighbor list
    pub fn len(&self) -> usize {
        self.pairs.ncols()
    }

    /// Check if this neighbor list contains no pairs
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the index of the first atom in all pairs
    pub fn first(&self) -> ArrayView1<'_, usize> {
        self.pairs.row(0)
    }

    /// Get the index of the second atom in all pairs
    pub fn second(&self) -> ArrayView1<'_, usize> {
        self.pairs.row(1)
    }

    /// Iterate over the pairs, as `(i, j, shift)`
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, [f64; 3])> + '_ {
        self.first().into_iter()
            .zip(self.second())
            .zip(self.shifts.rows())
            .map(|((&i, &j), shift)| (i, j, [shift[0], shift[1], shift[2]]))
    }

    /// Get the vectors between the two atoms of each pair, with shape
    /// `[n_pairs, 3]`, computed as `positions[j] - positions[i] + shift ·
    /// cell`.
    ///
    /// `positions` and `cell` should be the same as the ones used to create
    /// this neighbor list.
    pub fn vectors(&self, positions: ArrayView2<'_, f64>, cell: ArrayView2<'_, f64>) -> Array2<f64> {
        let first = self.first().to_vec();
        let second = self.second().to_vec();

        let mut vectors = &positions.select(Axis(0), &second) - &positions.select(Axis(0), &first);
        vectors += &self.shifts.dot(&cell);
        return vectors;
    }

    /// Get the distances between the two atoms of each pair, see
    /// [`NeighborList::vectors`].
    pub fn distances(&self, positions: ArrayView2<'_, f64>, cell: ArrayView2<'_, f64>) -> Array1<f64> {
        self.vectors(positions, cell)
            .map_axis(Axis(1), |vector| vector.dot(&vector).sqrt())
    }
}
