use std::path::Path;

use super::SimpleSystem;
use crate::Error;

#[cfg(feature = "chemfiles")]
impl From<chemfiles::Error> for Error {
    fn from(error: chemfiles::Error) -> Error {
        Error::Chemfiles(error.message)
    }
}

/// Read all structures in the file at the given `path` using
/// [chemfiles](https://chemfiles.org/), and convert them to `SimpleSystem`s.
///
/// Periodic cells which are not in canonical triclinic form are rotated to
/// this form (see [`SimpleSystem::to_canonical_cell`]).
///
/// This function can read all [formats supported by
/// chemfiles](https://chemfiles.org/chemfiles/latest/formats.html).
#[cfg(feature = "chemfiles")]
#[allow(clippy::needless_range_loop)]
pub fn read_from_file(path: impl AsRef<Path>) -> Result<Vec<SimpleSystem>, Error> {
    use std::collections::HashMap;
    use ndarray::{Array2, array};
    use crate::systems::UnitCell;

    let mut systems = Vec::new();

    let mut trajectory = chemfiles::Trajectory::open(path, 'r')?;
    let mut frame = chemfiles::Frame::new();

    let mut assigned_types = HashMap::new();
    let mut get_type = |atom: chemfiles::AtomRef| {
        let atomic_number = atom.atomic_number();
        if atomic_number == 0 {
            // use number assigned from the the atomic type, starting at 120
            // since that's larger than the number of elements in the periodic
            // table
            let new_type = 120 + assigned_types.len() as i32;
            *assigned_types.entry(atom.atomic_type()).or_insert(new_type)
        } else {
            atomic_number as i32
        }
    };

    for _ in 0..trajectory.nsteps() {
        trajectory.read(&mut frame)?;

        let cell = if frame.cell().shape() == chemfiles::CellShape::Infinite {
            UnitCell::infinite()
        } else {
            // transpose since chemfiles is using columns for the cell vectors and
            // we want rows as cell vectors
            let m = frame.cell().matrix();
            UnitCell::new(array![
                [m[0][0], m[1][0], m[2][0]],
                [m[0][1], m[1][1], m[2][1]],
                [m[0][2], m[1][2], m[2][2]],
            ].view())?
        };

        let mut types = Vec::with_capacity(frame.size());
        let mut positions = Array2::zeros((frame.size(), 3));
        for (i, position) in frame.positions().iter().enumerate() {
            types.push(get_type(frame.atom(i)));
            positions[[i, 0]] = position[0];
            positions[[i, 1]] = position[1];
            positions[[i, 2]] = position[2];
        }

        let system = SimpleSystem::from_arrays(cell, types, positions)?;
        systems.push(system.to_canonical_cell()?);
    }

    return Ok(systems);
}

/// Read all structures in the file at the given `path` using
/// [chemfiles](https://chemfiles.org/), and convert them to `SimpleSystem`s.
///
/// This function can read all [formats supported by
/// chemfiles](https://chemfiles.org/chemfiles/latest/formats.html).
#[cfg(not(feature = "chemfiles"))]
pub fn read_from_file(_: impl AsRef<Path>) -> Result<Vec<SimpleSystem>, Error> {
    Err(Error::Chemfiles(
        "read_from_file is only available with the chemfiles feature enabled".into()
    ))
}
