use rayon::prelude::*;

use crate::{Error, SimpleSystem, UnitCell};

use super::{NeighborList, search};

/// Check that the `cell` and `cutoff` can be used together with the minimum
/// image convention.
///
/// The cutoff must be positive and finite. For periodic cells, the cell must
/// be in canonical triclinic form, and the cutoff must be smaller than half
/// of the smallest diagonal entry of the cell matrix; otherwise some of the
/// periodic images within the cutoff would be missed.
pub fn check_geometry(cell: &UnitCell, cutoff: f64) -> Result<(), Error> {
    if !(cutoff > 0.0 && cutoff.is_finite()) {
        return Err(Error::InvalidParameter(format!(
            "cutoff must be a positive finite number, got {}", cutoff
        )));
    }

    if !cell.is_periodic() {
        return Ok(());
    }

    if !cell.is_canonical() {
        return Err(Error::InvalidGeometry(format!(
            "the cell matrix must be lower triangular with a positive diagonal, got {}",
            cell.matrix()
        )));
    }

    let matrix = cell.matrix();
    let shortest = f64::min(matrix[[0, 0]], f64::min(matrix[[1, 1]], matrix[[2, 2]]));
    if cutoff >= 0.5 * shortest {
        return Err(Error::InvalidGeometry(format!(
            "cutoff ({}) must be smaller than half of the smallest box length ({})",
            cutoff, shortest
        )));
    }

    return Ok(());
}

/// Parameters for the dense neighbor search.
///
/// This can be created directly, or from JSON:
///
/// ```
/// # use densenl::NeighborSearch;
/// let search = NeighborSearch::from_json(r#"{"cutoff": 3.5}"#).unwrap();
/// assert_eq!(search.cutoff, 3.5);
/// assert!(!search.sort_by_first_index);
/// assert!(search.check_geometry);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Deserialize, serde::Serialize, schemars::JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct NeighborSearch {
    /// Spherical cutoff to use to determine if two atoms are neighbors. Pairs
    /// exactly at the cutoff distance are included.
    pub cutoff: f64,
    /// Should the pairs be sorted by the index of their first atom? When
    /// `false`, the order of the pairs is unspecified.
    #[serde(default)]
    pub sort_by_first_index: bool,
    /// Should we check that the cell is in canonical triclinic form and that
    /// the cutoff is smaller than half of the box? Disabling these checks
    /// gives wrong results for invalid geometries instead of an error.
    #[serde(default = "default_check_geometry")]
    pub check_geometry: bool,
}

fn default_check_geometry() -> bool {
    true
}

impl NeighborSearch {
    /// Create search parameters with the given `cutoff` and default values
    /// for everything else.
    pub fn new(cutoff: f64) -> NeighborSearch {
        NeighborSearch {
            cutoff: cutoff,
            sort_by_first_index: false,
            check_geometry: true,
        }
    }

    /// Parse search parameters from a JSON string
    pub fn from_json(parameters: &str) -> Result<NeighborSearch, Error> {
        let search = serde_json::from_str::<NeighborSearch>(parameters)?;
        return Ok(search);
    }

    /// Get these parameters as a JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).expect("failed to serialize to JSON")
    }

    /// Compute the neighbor list for a single `system`
    #[time_graph::instrument(name = "NeighborSearch::compute")]
    pub fn compute(&self, system: &SimpleSystem) -> Result<NeighborList, Error> {
        let cell = system.cell();
        if self.check_geometry {
            check_geometry(cell, self.cutoff)?;
        }

        return search(
            system.positions(),
            cell.matrix(),
            cell.is_periodic(),
            self.cutoff,
            self.sort_by_first_index,
        );
    }

    /// Compute the neighbor lists for multiple independent `systems` in
    /// parallel. The neighbor lists are returned in the same order as the
    /// systems.
    pub fn compute_all(&self, systems: &[SimpleSystem]) -> Result<Vec<NeighborList>, Error> {
        systems.par_iter()
            .map(|system| self.compute(system))
            .collect()
    }
}
