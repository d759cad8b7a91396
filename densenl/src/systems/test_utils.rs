use ndarray::array;

use super::{UnitCell, SimpleSystem};

pub fn test_system(name: &str) -> SimpleSystem {
    match name {
        "water" => get_water(),
        "methane" => get_methane(),
        "CsCl" => get_cscl(),
        "wurtzite" => get_wurtzite(),
        _ => panic!("unknown test system {}", name)
    }
}

fn get_water() -> SimpleSystem {
    let mut system = SimpleSystem::new(UnitCell::infinite());
    // types do not have to be atomic number
    system.add_atom(-42, [0.0, 0.0, 0.0]);
    system.add_atom(1, [0.0, 0.75545, -0.58895]);
    system.add_atom(1, [0.0, -0.75545, -0.58895]);
    return system;
}

fn get_methane() -> SimpleSystem {
    let mut system = SimpleSystem::new(UnitCell::cubic(5.0).expect("valid cell"));
    system.add_atom(6, [5.0000, 5.0000, 5.0000]);
    system.add_atom(1, [5.5288, 5.1610, 5.9359]);
    system.add_atom(1, [5.2051, 5.8240, 4.3214]);
    system.add_atom(1, [5.3345, 4.0686, 4.5504]);
    system.add_atom(1, [3.9315, 4.9463, 5.1921]);
    return system;
}

/// CsCl structure, in a 2x2x2 supercell of the cubic primitive cell with side
/// length set to one.
fn get_cscl() -> SimpleSystem {
    let mut system = SimpleSystem::new(UnitCell::cubic(2.0).expect("valid cell"));
    for x in [0.0, 1.0] {
        for y in [0.0, 1.0] {
            for z in [0.0, 1.0] {
                system.add_atom(17, [x, y, z]);
                system.add_atom(55, [x + 0.5, y + 0.5, z + 0.5]);
            }
        }
    }
    return system;
}

/// ZnS in wurtzite structure (hexagonal cell), in a 3x3x2 supercell so the
/// cell is large enough for the minimum image convention.
fn get_wurtzite() -> SimpleSystem {
    let u = 3. / 8.;
    let c = f64::sqrt(8.0 / 3.0);
    let a = array![1.0, 0.0, 0.0];
    let b = array![-0.5, 0.5 * f64::sqrt(3.0), 0.0];
    let c_vector = array![0.0, 0.0, c];

    let cell = UnitCell::new(array![
        [3.0, 0.0, 0.0],
        [-1.5, 1.5 * f64::sqrt(3.0), 0.0],
        [0.0, 0.0, 2.0 * c],
    ].view()).expect("valid cell");

    let basis = [
        (16, [1.0 / 3.0, 2.0 / 3.0, 0.0]),
        (30, [1.0 / 3.0, 2.0 / 3.0, u]),
        (16, [2.0 / 3.0, 1.0 / 3.0, 0.5]),
        (30, [2.0 / 3.0, 1.0 / 3.0, 0.5 + u]),
    ];

    let mut system = SimpleSystem::new(cell);
    for i in 0..3 {
        for j in 0..3 {
            for k in 0..2 {
                for (atomic_type, fractional) in basis {
                    let position = (fractional[0] + i as f64) * &a
                        + (fractional[1] + j as f64) * &b
                        + (fractional[2] + k as f64) * &c_vector;
                    system.add_atom(atomic_type, [position[0], position[1], position[2]]);
                }
            }
        }
    }
    return system;
}
