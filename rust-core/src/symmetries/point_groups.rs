use nalgebra::{Matrix3, Vector3};

use crate::symmetries::symmetry_operations::SymmetryOperation;

const PERMUTATIONS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [0, 2, 1],
    [1, 0, 2],
    [1, 2, 0],
    [2, 0, 1],
    [2, 1, 0],
];

/// Generate the 48 operations of the cubic holohedry O_h about the origin.
///
/// Every operation is a signed permutation matrix. The identity comes first.
pub fn generate_cubic_operations() -> Vec<SymmetryOperation> {
    let mut ops = Vec::with_capacity(48);
    for perm in PERMUTATIONS.iter() {
        for signs in 0..8u8 {
            let mut rotation = Matrix3::zeros();
            for (row, &col) in perm.iter().enumerate() {
                let sign = if signs & (1 << row) == 0 { 1.0 } else { -1.0 };
                rotation[(row, col)] = sign;
            }
            ops.push(SymmetryOperation::new(rotation, Vector3::zeros()));
        }
    }
    ops
}
