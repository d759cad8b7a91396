use std::os::raw::c_char;
use std::ffi::CStr;

use ndarray::ArrayView2;

use densenl::{NeighborSearch, UnitCell};
use densenl::neighbors::{check_geometry, search};

use super::{catch_unwind, densenl_status_t};

/// Full neighbor list, following the conventions of ASE's
/// `primitive_neighbor_list`. The vector between the atoms of a pair is given
/// by `positions[j] - positions[i] + shift · cell`.
///
/// The memory in this struct is owned by the library, and must be released
/// with `densenl_neighbors_free`.
#[repr(C)]
#[allow(non_camel_case_types)]
pub struct densenl_neighbors_t {
    /// Atomic indexes of the pairs, with `2 x count` entries. The first `count`
    /// entries contains the first atom (`i`) of each pair, and the next
    /// `count` entries the second atom (`j`).
    pub pairs: *mut usize,
    /// Number of cell boundaries crossed by each pair, with `count x 3`
    /// entries, stored in row major order.
    pub shifts: *mut f64,
    /// Number of pairs in this neighbor list
    pub count: usize,
}

/// Find all pairs of atoms within the cutoff in a system.
///
/// @param positions cartesian positions of the atoms, as a row major array
///                  with `n_atoms x 3` entries
/// @param n_atoms number of atoms in the system
/// @param cell unit cell matrix, with the lattice vectors as rows, stored in
///             row major order (`ax ay az bx by bz cx cy cz`). This is only
///             used when `periodic` is true. The matrix must be lower
///             triangular.
/// @param periodic should we use periodic boundary conditions?
/// @param options JSON formatted search options, for example
///                `{"cutoff": 3.5, "sort_by_first_index": true}`
/// @param neighbors output neighbor list. The memory must be released with
///                  `densenl_neighbors_free`.
///
/// @returns The status code of this operation. If the status is not
///          `DENSENL_SUCCESS`, you can use `densenl_last_error()` to get the
///          full error message.
#[no_mangle]
pub unsafe extern "C" fn densenl_neighbors_compute(
    positions: *const f64,
    n_atoms: usize,
    cell: *const f64,
    periodic: bool,
    options: *const c_char,
    neighbors: *mut densenl_neighbors_t,
) -> densenl_status_t {
    catch_unwind(|| {
        check_pointers!(options, neighbors);
        if n_atoms != 0 {
            check_pointers!(positions);
        }

        let options = NeighborSearch::from_json(CStr::from_ptr(options).to_str()?)?;

        let positions = if n_atoms == 0 {
            ArrayView2::from_shape((0, 3), &[]).expect("empty array should have a valid shape")
        } else {
            ArrayView2::from_shape_ptr((n_atoms, 3), positions)
        };

        let zeros = [0.0; 9];
        let cell = if periodic {
            check_pointers!(cell);
            ArrayView2::from_shape_ptr((3, 3), cell)
        } else {
            ArrayView2::from_shape((3, 3), &zeros).expect("3x3 array should have a valid shape")
        };

        if options.check_geometry {
            let unit_cell = if periodic {
                UnitCell::new(cell)?
            } else {
                UnitCell::infinite()
            };
            check_geometry(&unit_cell, options.cutoff)?;
        }

        let list = search(positions, cell, periodic, options.cutoff, options.sort_by_first_index)?;

        let count = list.len();
        let (pairs, shifts) = if count == 0 {
            (std::ptr::null_mut(), std::ptr::null_mut())
        } else {
            let pairs = list.pairs.iter().copied().collect::<Vec<usize>>();
            let shifts = list.shifts.iter().copied().collect::<Vec<f64>>();
            (
                Box::into_raw(pairs.into_boxed_slice()).cast::<usize>(),
                Box::into_raw(shifts.into_boxed_slice()).cast::<f64>(),
            )
        };

        *neighbors = densenl_neighbors_t {
            pairs: pairs,
            shifts: shifts,
            count: count,
        };

        Ok(())
    })
}

/// Release the memory associated with a `densenl_neighbors_t` created by
/// `densenl_neighbors_compute`. After this call, all pointers in `neighbors`
/// are set to NULL and the count to 0.
///
/// @param neighbors neighbor list to release
///
/// @returns The status code of this operation. If the status is not
///          `DENSENL_SUCCESS`, you can use `densenl_last_error()` to get the
///          full error message.
#[no_mangle]
pub unsafe extern "C" fn densenl_neighbors_free(neighbors: *mut densenl_neighbors_t) -> densenl_status_t {
    catch_unwind(|| {
        if neighbors.is_null() {
            return Ok(());
        }

        let neighbors = &mut *neighbors;
        if !neighbors.pairs.is_null() {
            let slice = std::ptr::slice_from_raw_parts_mut(neighbors.pairs, 2 * neighbors.count);
            drop(Box::from_raw(slice));
        }

        if !neighbors.shifts.is_null() {
            let slice = std::ptr::slice_from_raw_parts_mut(neighbors.shifts, 3 * neighbors.count);
            drop(Box::from_raw(slice));
        }

        neighbors.pairs = std::ptr::null_mut();
        neighbors.shifts = std::ptr::null_mut();
        neighbors.count = 0;

        Ok(())
    })
}
