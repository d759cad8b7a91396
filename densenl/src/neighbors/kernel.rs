use log::{debug, warn};
use ndarray::{Array1, Array2, ArrayView2, Axis, concatenate, s, stack};

use crate::Error;
use crate::math::{inverse, stable_argsort, triu_indices};

use super::NeighborList;

/// Pairs closer than this distance most likely come from overlapping atoms
const SUSPICIOUSLY_CLOSE: f64 = 1e-3;

/// Find all pairs of atoms closer than `cutoff`, using the minimum image
/// convention when `periodic` is `true`.
///
/// `positions` must have a shape of `[N, 3]` and `cell` a shape of `[3, 3]`,
/// with the lattice vectors as rows. `cell` is ignored when `periodic` is
/// `false`.
///
/// All `N (N - 1) / 2` candidate pairs are generated and processed at once
/// with whole-array operations. The output is a full neighbor list: if
/// `(i, j)` is a pair with shift `S`, `(j, i)` is also a pair with shift `-S`.
/// Pairs with a distance exactly equal to the cutoff are included. The vector
/// between the atoms of a pair is `positions[j] - positions[i] + S · cell`.
///
/// Without `sort_by_first_index`, the `(i, j)` pairs with `i < j` come first
/// (in row-major order) and are followed by the mirrored `(j, i)` pairs. With
/// `sort_by_first_index`, the pairs are stably sorted by their first index.
///
/// # Limitations
///
/// The cell must be in canonical triclinic form (`cell[0][1]`, `cell[0][2]`
/// and `cell[1][2]` are zero) and the cutoff must be smaller than half of the
/// smallest diagonal entry of the cell. These conditions are NOT checked
/// here, and violating them gives wrong pairs without any error. Use
/// [`check_geometry`](super::check_geometry) or
/// [`NeighborSearch`](super::NeighborSearch) to validate them.
///
/// # Errors
///
/// This function fails if the arrays do not have the right shape, or if the
/// cell matrix can not be inverted when `periodic` is `true`.
#[time_graph::instrument(name = "neighbors::search")]
pub fn search(
    positions: ArrayView2<'_, f64>,
    cell: ArrayView2<'_, f64>,
    periodic: bool,
    cutoff: f64,
    sort_by_first_index: bool,
) -> Result<NeighborList, Error> {
    if positions.ncols() != 3 {
        return Err(Error::InvalidParameter(format!(
            "expected positions with shape [N, 3], got {:?}", positions.shape()
        )));
    }

    if cell.shape() != [3, 3] {
        return Err(Error::InvalidParameter(format!(
            "expected a cell with shape [3, 3], got {:?}", cell.shape()
        )));
    }

    let n_atoms = positions.nrows();
    let (first, second) = triu_indices(n_atoms);
    let n_candidates = first.len();

    // all displacements at once, `positions[i] - positions[j]` for i < j
    let deltas = &positions.select(Axis(0), &first) - &positions.select(Axis(0), &second);

    let (wrapped, shifts) = if periodic {
        let inverse = inverse(cell).ok_or_else(|| Error::InvalidGeometry(
            "the cell matrix is not invertible".into()
        ))?;

        // minimum image, one axis at a time starting with z. The cell is
        // lower triangular, so removing multiples of the k-th lattice vector
        // does not change the components after k, which are already wrapped.
        let mut wrapped = deltas.clone();
        for axis in [2, 1, 0] {
            let length = cell[[axis, axis]];
            let images = wrapped.column(axis).mapv(|delta| (delta / length).round());
            wrapped -= &images.view()
                .insert_axis(Axis(1))
                .dot(&cell.slice(s![axis..=axis, ..]));
        }

        // wrapped = deltas - shifts · cell, the shifts are integers
        let mut shifts = (&deltas - &wrapped).dot(&inverse);
        shifts.mapv_inplace(f64::round);

        (wrapped, shifts)
    } else {
        (deltas, Array2::zeros((n_candidates, 3)))
    };

    let distances = wrapped.map_axis(Axis(1), |delta| delta.dot(&delta).sqrt());

    // compute the mask for all candidates, then select the corresponding
    // entries in a separate step
    let mask = distances.mapv(|distance| distance <= cutoff);
    let selected = mask.iter()
        .enumerate()
        .filter_map(|(candidate, &keep)| keep.then_some(candidate))
        .collect::<Vec<_>>();

    debug!(
        "kept {} pairs out of {} candidates for {} atoms with cutoff {}",
        selected.len(), n_candidates, n_atoms, cutoff
    );

    let too_close = selected.iter()
        .filter(|&&candidate| distances[candidate] < SUSPICIOUSLY_CLOSE)
        .count();
    if too_close != 0 {
        warn!(
            "{} pairs of atoms are very close to one another (less than {} apart)",
            too_close, SUSPICIOUSLY_CLOSE
        );
    }

    let first = Array1::from(first).select(Axis(0), &selected);
    let second = Array1::from(second).select(Axis(0), &selected);
    let shifts = shifts.select(Axis(0), &selected);

    // mirror the half list to get (j, i) pairs with opposite shifts
    let mirrored_shifts = -&shifts;
    let mut pairs = concatenate![
        Axis(1),
        stack![Axis(0), first, second],
        stack![Axis(0), second, first]
    ];
    let mut shifts = concatenate![Axis(0), shifts, mirrored_shifts];

    if sort_by_first_index {
        let order = stable_argsort(&pairs.row(0).to_vec());
        // selecting columns gives a column-major array
        pairs = pairs.select(Axis(1), &order).as_standard_layout().into_owned();
        shifts = shifts.select(Axis(0), &order);
    }

    return Ok(NeighborList {
        pairs: pairs,
        shifts: shifts,
    });
}
