//! Cluster Variation Method library
//!
//! This library identifies the symmetry-distinct clusters and correlation functions of a
//! crystal structure, builds the linear map from correlation functions to cluster
//! probabilities, and minimises the CVM free energy of multicomponent alloys.
//!
//! Pipeline: [`identification::identify`] (Stages 1 and 2) →
//! [`cmatrix::build_cmatrix`] (Stage 3) → [`thermo::solve`] (equilibrium).

pub mod clusters;
pub mod cmatrix;
pub mod config;
pub mod error;
pub mod identification;
pub mod interfaces;
pub mod lattice;
pub mod symmetries;
pub mod thermo;

pub use error::CvmError;

/// Common result type used throughout the library
pub type Result<T> = std::result::Result<T, CvmError>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
