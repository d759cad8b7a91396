use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

use crate::Error;

use super::UnitCell;

/// A simple container for atomic types, positions and unit cell.
#[derive(Clone, Debug)]
pub struct SimpleSystem {
    cell: UnitCell,
    types: Vec<i32>,
    /// positions with shape `[N, 3]`
    positions: Array2<f64>,
}

impl SimpleSystem {
    /// Create a new empty system with the given unit cell
    pub fn new(cell: UnitCell) -> SimpleSystem {
        SimpleSystem {
            cell: cell,
            types: Vec::new(),
            positions: Array2::zeros((0, 3)),
        }
    }

    /// Create a system from existing `types` and `positions` arrays.
    /// `positions` must have a shape of `[types.len(), 3]`.
    pub fn from_arrays(cell: UnitCell, types: Vec<i32>, positions: Array2<f64>) -> Result<SimpleSystem, Error> {
        if positions.shape() != [types.len(), 3] {
            return Err(Error::InvalidParameter(format!(
                "expected positions with shape [{}, 3], got {:?}",
                types.len(), positions.shape()
            )));
        }

        return Ok(SimpleSystem {
            cell: cell,
            types: types,
            positions: positions,
        });
    }

    /// Add an atom with the given atomic type and position to this system
    pub fn add_atom(&mut self, atomic_type: i32, position: [f64; 3]) {
        self.types.push(atomic_type);
        self.positions.push_row(ArrayView1::from(&position))
            .expect("positions should always have 3 columns");
    }

    /// Get the number of atoms in this system
    pub fn size(&self) -> usize {
        self.types.len()
    }

    /// Get the atomic types of all atoms in this system
    pub fn types(&self) -> &[i32] {
        &self.types
    }

    /// Get the positions of all atoms, as an array with shape `[N, 3]`
    pub fn positions(&self) -> ArrayView2<'_, f64> {
        self.positions.view()
    }

    /// Get the unit cell of this system
    pub fn cell(&self) -> &UnitCell {
        &self.cell
    }

    /// Express this system in the canonical form of its unit cell, rotating
    /// all the positions such that the fractional coordinates of the atoms are
    /// unchanged.
    pub fn to_canonical_cell(&self) -> Result<SimpleSystem, Error> {
        if self.cell.is_canonical() {
            return Ok(self.clone());
        }

        let canonical = self.cell.canonical()?;
        let fractional = self.cell.fractional(self.positions.view());
        let positions = canonical.cartesian(fractional.view());

        log::debug!(
            "rotated {} atoms to express the unit cell in canonical form",
            self.positions.len_of(Axis(0))
        );

        return Ok(SimpleSystem {
            cell: canonical,
            types: self.types.clone(),
            positions: positions,
        });
    }
}
