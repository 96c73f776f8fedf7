// C-matrix module: site basis, substitution rules and the affine map from correlation
// functions to cluster variables

// ======================== MODULE DECLARATIONS ========================
pub mod basis;
pub mod cluster_variables;
pub mod cmatrix_builder;
pub mod substitution;

mod _tests_cmatrix_builder;

// ======================== SITE BASIS ========================
pub use basis::{
    r_matrix,   // fn(basis: &[f64]) -> Result<DMatrix<f64>> - species × power inverse of the power matrix
    site_basis, // fn(components: usize) -> Result<Vec<f64>> - symmetric integer basis
};

// ======================== SUBSTITUTION RULES ========================
pub use substitution::{
    build_substitution_table, // fn(cluster, group, cfs) -> Result<SubstitutionTable>
    SiteOperatorProduct,      // struct - sorted (site index, power) pairs
    SubstitutionTable,        // struct - product → correlation-function column
};

// ======================== C-MATRIX ========================
pub use cmatrix_builder::{
    build_cmatrix, // fn(identification: &Identification) -> Result<CMatrix>
    CMatrix,       // struct - one block per cluster group, plus CF basis powers
    CMatrixBlock,  // struct - coefficients, constants and merge weights of one group
};

// ======================== CLUSTER VARIABLES ========================
pub use cluster_variables::{
    cluster_variables,         // fn(cmatrix, u_full) -> Result<Vec<DVector<f64>>>
    full_correlations,         // fn(cmatrix, independent, mole_fractions) -> Result<DVector<f64>>
    point_correlations,        // fn(mole_fractions, basis) -> Result<Vec<f64>>
    random_state_correlations, // fn(cmatrix, mole_fractions) -> Result<DVector<f64>>
    validate_composition,      // fn(mole_fractions, components) -> Result<()>
};
