// Identification module: the two symmetry stages that precede the C-matrix
// Stage 1 works on bare clusters, Stage 2 on decorated clusters (correlation functions)

// ======================== MODULE DECLARATIONS ========================
pub mod cf_identification;
pub mod cluster_identification;
pub mod pipeline;

mod _tests_cluster_identification;

// ======================== STAGE 1: CLUSTERS ========================
pub use cluster_identification::ClusterIdentification; // struct - cluster types, Nij, KB coefficients, classification
// ClusterIdentification impl methods:
//   identify(config: &CvmConfig) -> Result<Self>         - enumerate, classify and weight the bare clusters
//   kb(&self) -> &[f64]                                  - Kikuchi-Baker coefficients per reference type
//   lc(&self) -> Vec<usize>                              - ordered groups per reference type
//   mh(&self, index: GroupIndex) -> f64                  - normalised ordered multiplicity

// ======================== STAGE 2: CORRELATION FUNCTIONS ========================
pub use cf_identification::{
    CfIdentification,    // struct - decorated clusters grouped under Stage 1 groups
    CfIndex,             // struct - (type, group, index) of a correlation function
    CorrelationFunction, // struct - representative, multiplicity and column of one CF
};
// CfIdentification impl methods:
//   identify(config, clusters: &ClusterIdentification) -> Result<Self>
//   tcf / ncf / nxcf(&self) -> usize                     - total, independent and point CF counts
//   columns_of(&self, group: GroupIndex) -> Range<usize> - CF columns of one cluster group

// ======================== PIPELINE ========================
pub use pipeline::{
    identify,       // fn(config: &CvmConfig) -> Result<Identification>
    Identification, // struct - both stages plus the configuration they came from
};
