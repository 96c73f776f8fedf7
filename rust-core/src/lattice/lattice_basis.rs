use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

use crate::config::{BASE_VECTOR_TOLERANCE, GEOMETRY_TOLERANCE};
use crate::error::CvmError;
use crate::Result;

/// Primitive translation vectors of a lattice, stored as the columns of a 3×3 matrix.
///
/// The constructor rejects (near-)singular bases, so the inverse always exists and is
/// cached for coordinate conversions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Matrix3<f64>", into = "Matrix3<f64>")]
pub struct LatticeBasis {
    base_matrix: Matrix3<f64>,
    inverse: Matrix3<f64>,
}

impl LatticeBasis {
    pub fn from_base_vectors(
        base_1: Vector3<f64>,
        base_2: Vector3<f64>,
        base_3: Vector3<f64>,
    ) -> Result<Self> {
        Self::from_matrix(Matrix3::from_columns(&[base_1, base_2, base_3]))
    }

    pub fn from_matrix(matrix: Matrix3<f64>) -> Result<Self> {
        // Linearly non-dependent
        if matrix.determinant().abs() < BASE_VECTOR_TOLERANCE {
            return Err(CvmError::invalid(
                "Determinant too small. Lattice vectors are either too small or linearly dependent.",
            ));
        }
        let inverse = matrix
            .try_inverse()
            .ok_or_else(|| CvmError::invalid("lattice basis is not invertible"))?;

        Ok(LatticeBasis {
            base_matrix: matrix,
            inverse,
        })
    }

    pub fn base_matrix(&self) -> &Matrix3<f64> {
        &self.base_matrix
    }

    pub fn determinant(&self) -> f64 {
        self.base_matrix.determinant()
    }

    pub fn metric(&self) -> Matrix3<f64> {
        self.base_matrix.transpose() * self.base_matrix
    }

    pub fn base_vectors(&self) -> [Vector3<f64>; 3] {
        [
            self.base_matrix.column(0).into(),
            self.base_matrix.column(1).into(),
            self.base_matrix.column(2).into(),
        ]
    }

    /// Convert cartesian coords → fractional (u,v,w).
    pub fn cart_to_frac(&self, v_cart: &Vector3<f64>) -> Vector3<f64> {
        self.inverse * v_cart
    }

    /// Convert fractional (u,v,w) coords → cartesian.
    pub fn frac_to_cart(&self, v_frac: &Vector3<f64>) -> Vector3<f64> {
        self.base_matrix * v_frac
    }

    /// True if `v` is an integer combination of the basis vectors.
    pub fn is_lattice_vector(&self, v: &Vector3<f64>) -> bool {
        self.cart_to_frac(v)
            .iter()
            .all(|c| (c - c.round()).abs() < GEOMETRY_TOLERANCE)
    }

    /// Lattice translation that carries `v` into the home cell [0, 1)³.
    ///
    /// Fractional coordinates within tolerance below an integer are treated as that integer,
    /// so points on cell faces always land on the lower face.
    pub fn home_cell_translation(&self, v: &Vector3<f64>) -> Vector3<f64> {
        let cell = self
            .cart_to_frac(v)
            .map(|c| (c + GEOMETRY_TOLERANCE).floor());
        self.frac_to_cart(&cell)
    }
}

impl TryFrom<Matrix3<f64>> for LatticeBasis {
    type Error = CvmError;

    fn try_from(matrix: Matrix3<f64>) -> Result<Self> {
        Self::from_matrix(matrix)
    }
}

impl From<LatticeBasis> for Matrix3<f64> {
    fn from(basis: LatticeBasis) -> Self {
        basis.base_matrix
    }
}
