//! The `UnitCell` type represents the enclosing box of a simulated system,
//! with or without periodic boundary conditions.
use ndarray::{Array2, ArrayView2, array};

use crate::Error;

/// Tolerance used when checking for zero entries in the cell matrix, relative
/// to the largest entry of the matrix.
const ZERO_TOLERANCE: f64 = 1e-6;

/// An `UnitCell` defines the system physical boundaries.
///
/// The cell matrix is stored with the lattice vectors as rows. The minimum
/// image search requires the matrix to be in canonical triclinic form, with
/// all entries above the diagonal set to zero:
///
/// ```text
/// | ax  0   0  |
/// | bx  by  0  |
/// | cx  cy  cz |
/// ```
///
/// Use [`UnitCell::is_canonical`] to check this, and [`UnitCell::canonical`]
/// to get the same lattice expressed in this form.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitCell {
    /// Unit cell matrix, lattice vectors are rows
    matrix: Array2<f64>,
    /// Inverse of the matrix, cached. All zeros for infinite cells.
    inverse: Array2<f64>,
    /// Do we have periodic boundary conditions?
    periodic: bool,
}

impl UnitCell {
    /// Create a periodic unit cell from the given 3x3 `matrix`, where each
    /// row is one of the lattice vectors.
    ///
    /// The matrix must be finite and invertible, but does not need to be in
    /// canonical form.
    pub fn new(matrix: ArrayView2<'_, f64>) -> Result<UnitCell, Error> {
        if matrix.shape() != [3, 3] {
            return Err(Error::InvalidParameter(format!(
                "the cell matrix must have a shape of [3, 3], got {:?}", matrix.shape()
            )));
        }

        if matrix.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidParameter(
                "the cell matrix contains non finite values".into()
            ));
        }

        let inverse = crate::math::inverse(matrix).ok_or_else(|| Error::InvalidGeometry(
            "the cell matrix is not invertible".into()
        ))?;

        return Ok(UnitCell {
            matrix: matrix.to_owned(),
            inverse: inverse,
            periodic: true,
        });
    }

    /// Create an infinite unit cell, without periodic boundary conditions
    pub fn infinite() -> UnitCell {
        UnitCell {
            matrix: Array2::zeros((3, 3)),
            inverse: Array2::zeros((3, 3)),
            periodic: false,
        }
    }

    /// Create an orthorhombic unit cell, with side lengths `a, b, c`.
    pub fn orthorhombic(a: f64, b: f64, c: f64) -> Result<UnitCell, Error> {
        if !(a > 0.0 && b > 0.0 && c > 0.0) {
            return Err(Error::InvalidParameter("cell lengths must be positive".into()));
        }

        return UnitCell::new(array![
            [a, 0.0, 0.0],
            [0.0, b, 0.0],
            [0.0, 0.0, c],
        ].view());
    }

    /// Create a cubic unit cell, with side lengths `length, length, length`.
    pub fn cubic(length: f64) -> Result<UnitCell, Error> {
        UnitCell::orthorhombic(length, length, length)
    }

    /// Create a triclinic unit cell, with side lengths `a, b, c` and angles
    /// `alpha, beta, gamma` (in degrees). The resulting matrix is in
    /// canonical form.
    pub fn triclinic(a: f64, b: f64, c: f64, alpha: f64, beta: f64, gamma: f64) -> Result<UnitCell, Error> {
        if !(a > 0.0 && b > 0.0 && c > 0.0) {
            return Err(Error::InvalidParameter("cell lengths must be positive".into()));
        }

        let cos_alpha = alpha.to_radians().cos();
        let cos_beta = beta.to_radians().cos();
        let (sin_gamma, cos_gamma) = gamma.to_radians().sin_cos();

        let b_x = b * cos_gamma;
        let b_y = b * sin_gamma;

        let c_x = c * cos_beta;
        let c_y = c * (cos_alpha - cos_beta * cos_gamma) / sin_gamma;
        let c_z2 = c * c - c_y * c_y - c_x * c_x;
        if !(c_z2 > 0.0) {
            return Err(Error::InvalidGeometry(format!(
                "angles ({}, {}, {}) do not describe a valid cell", alpha, beta, gamma
            )));
        }

        return UnitCell::new(array![
            [a,   0.0, 0.0],
            [b_x, b_y, 0.0],
            [c_x, c_y, c_z2.sqrt()],
        ].view());
    }

    /// Check if this unit cell has periodic boundary conditions
    pub fn is_periodic(&self) -> bool {
        self.periodic
    }

    /// Get the matricial representation of the unit cell, lattice vectors are
    /// rows. Infinite cells use a matrix full of zeros.
    pub fn matrix(&self) -> ArrayView2<'_, f64> {
        self.matrix.view()
    }

    /// Get the inverse of the cell matrix
    pub fn inverse(&self) -> ArrayView2<'_, f64> {
        self.inverse.view()
    }

    /// Check if the cell matrix is in canonical triclinic form, i.e. if all
    /// entries above the diagonal are zero and the diagonal is positive.
    /// Infinite cells are always canonical.
    pub fn is_canonical(&self) -> bool {
        if !self.periodic {
            return true;
        }

        let scale = self.matrix.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let is_close_0 = |value: f64| value.abs() <= ZERO_TOLERANCE * scale;

        let m = &self.matrix;
        return is_close_0(m[[0, 1]]) && is_close_0(m[[0, 2]]) && is_close_0(m[[1, 2]])
            && m[[0, 0]] > 0.0 && m[[1, 1]] > 0.0 && m[[2, 2]] > 0.0;
    }

    /// Get the lengths of the three lattice vectors
    pub fn lengths(&self) -> [f64; 3] {
        let norm = |i: usize| {
            let row = self.matrix.row(i);
            row.dot(&row).sqrt()
        };
        [norm(0), norm(1), norm(2)]
    }

    /// Get the angles (alpha, beta, gamma) between the lattice vectors, in
    /// degrees. Infinite cells report 90° angles.
    pub fn angles(&self) -> [f64; 3] {
        if !self.periodic {
            return [90.0, 90.0, 90.0];
        }

        let angle = |i: usize, j: usize| {
            let u = self.matrix.row(i);
            let v = self.matrix.row(j);
            let cos = u.dot(&v) / (u.dot(&u).sqrt() * v.dot(&v).sqrt());
            f64::acos(cos.clamp(-1.0, 1.0)).to_degrees()
        };

        [angle(1, 2), angle(0, 2), angle(0, 1)]
    }

    /// Get the volume of the cell
    pub fn volume(&self) -> f64 {
        if !self.periodic {
            return 0.0;
        }
        // the volume is the mixed product of the three cell vectors
        crate::math::determinant(self.matrix.view()).abs()
    }

    /// Get the same lattice (same lengths and angles) expressed in canonical
    /// triclinic form. Infinite cells are returned unchanged.
    pub fn canonical(&self) -> Result<UnitCell, Error> {
        if !self.periodic {
            return Ok(self.clone());
        }

        let [a, b, c] = self.lengths();
        let [alpha, beta, gamma] = self.angles();
        return UnitCell::triclinic(a, b, c, alpha, beta, gamma);
    }

    /// Get the fractional representation of the cartesian `positions`, with
    /// shape `[N, 3]`
    pub fn fractional(&self, positions: ArrayView2<'_, f64>) -> Array2<f64> {
        if !self.periodic {
            return positions.to_owned();
        }
        positions.dot(&self.inverse)
    }

    /// Get the cartesian representation of the `fractional` positions, with
    /// shape `[N, 3]`
    pub fn cartesian(&self, fractional: ArrayView2<'_, f64>) -> Array2<f64> {
        if !self.periodic {
            return fractional.to_owned();
        }
        fractional.dot(&self.matrix)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use ndarray::array;

    use super::*;

    #[test]
    fn negative_lengths() {
        assert!(matches!(UnitCell::cubic(-4.0), Err(Error::InvalidParameter(_))));
        assert!(matches!(UnitCell::orthorhombic(3.0, 0.0, -5.0), Err(Error::InvalidParameter(_))));
        assert!(matches!(
            UnitCell::triclinic(3.0, 0.0, -5.0, 90.0, 90.0, 90.0),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn invalid_matrix() {
        let result = UnitCell::new(Array2::zeros((3, 3)).view());
        assert!(matches!(result, Err(Error::InvalidGeometry(_))));

        let result = UnitCell::new(Array2::zeros((2, 3)).view());
        assert!(matches!(result, Err(Error::InvalidParameter(_))));

        let result = UnitCell::new(array![
            [f64::NAN, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
        ].view());
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    #[test]
    fn infinite() {
        let cell = UnitCell::infinite();
        assert!(!cell.is_periodic());
        assert!(cell.is_canonical());
        assert_eq!(cell.matrix(), Array2::<f64>::zeros((3, 3)));
        assert_eq!(cell.lengths(), [0.0, 0.0, 0.0]);
        assert_eq!(cell.angles(), [90.0, 90.0, 90.0]);
        assert_eq!(cell.volume(), 0.0);
    }

    #[test]
    fn orthorhombic() {
        let cell = UnitCell::orthorhombic(3.0, 4.0, 5.0).unwrap();
        assert!(cell.is_periodic());
        assert!(cell.is_canonical());

        assert_eq!(cell.lengths(), [3.0, 4.0, 5.0]);
        for angle in cell.angles() {
            assert_relative_eq!(angle, 90.0, max_relative = 1e-12);
        }
        assert_eq!(cell.volume(), 3.0 * 4.0 * 5.0);
    }

    #[test]
    fn triclinic() {
        let cell = UnitCell::triclinic(3.0, 4.0, 5.0, 80.0, 90.0, 110.0).unwrap();
        assert!(cell.is_canonical());

        let matrix = cell.matrix();
        assert_eq!(matrix.row(0), array![3.0, 0.0, 0.0]);
        assert_eq!(matrix[[1, 2]], 0.0);

        let [a, b, c] = cell.lengths();
        assert_relative_eq!(a, 3.0, max_relative = 1e-12);
        assert_relative_eq!(b, 4.0, max_relative = 1e-12);
        assert_relative_eq!(c, 5.0, max_relative = 1e-12);

        let [alpha, beta, gamma] = cell.angles();
        assert_relative_eq!(alpha, 80.0, max_relative = 1e-10);
        assert_relative_eq!(beta, 90.0, max_relative = 1e-10);
        assert_relative_eq!(gamma, 110.0, max_relative = 1e-10);

        assert_relative_eq!(cell.volume(), 55.410529, epsilon = 1e-6);
    }

    #[test]
    fn impossible_angles() {
        let result = UnitCell::triclinic(3.0, 3.0, 3.0, 10.0, 10.0, 120.0);
        assert!(matches!(result, Err(Error::InvalidGeometry(_))));
    }

    #[test]
    fn canonical() {
        // FCC primitive cell, not in canonical form
        let cell = UnitCell::new(array![
            [0.0, 1.5, 1.5],
            [1.5, 0.0, 1.5],
            [1.5, 1.5, 0.0],
        ].view()).unwrap();
        assert!(!cell.is_canonical());

        let canonical = cell.canonical().unwrap();
        assert!(canonical.is_canonical());
        assert_relative_eq!(canonical.volume(), cell.volume(), max_relative = 1e-10);

        let lengths = canonical.lengths();
        let expected = cell.lengths();
        for i in 0..3 {
            assert_relative_eq!(lengths[i], expected[i], max_relative = 1e-12);
        }

        let angles = canonical.angles();
        for angle in angles {
            assert_relative_eq!(angle, 60.0, max_relative = 1e-10);
        }
    }

    #[test]
    fn fractional_cartesian() {
        let cell = UnitCell::cubic(5.0).unwrap();
        let positions = array![[0.0, 10.0, 4.0]];
        assert_relative_eq!(cell.fractional(positions.view()), array![[0.0, 2.0, 0.8]], epsilon = 1e-12);
        assert_relative_eq!(cell.cartesian(array![[0.0, 2.0, 0.8]].view()), positions, epsilon = 1e-12);

        let cell = UnitCell::triclinic(5.0, 6.0, 3.6, 90.0, 53.0, 77.0).unwrap();
        let positions = array![
            [0.0, 10.0, 4.0],
            [-5.0, 12.0, 4.9],
        ];
        let transformed = cell.cartesian(cell.fractional(positions.view()).view());
        assert_relative_eq!(transformed, positions, epsilon = 1e-12);
    }
}
