use log::info;

use crate::config::CvmConfig;
use crate::identification::cf_identification::CfIdentification;
use crate::identification::cluster_identification::ClusterIdentification;
use crate::Result;

/// Both identification stages for one configuration. Read-only once built, so it can be
/// shared between threads running the solver.
#[derive(Debug, Clone)]
pub struct Identification {
    config: CvmConfig,
    clusters: ClusterIdentification,
    cfs: CfIdentification,
}

impl Identification {
    pub fn config(&self) -> &CvmConfig {
        &self.config
    }

    pub fn clusters(&self) -> &ClusterIdentification {
        &self.clusters
    }

    pub fn cfs(&self) -> &CfIdentification {
        &self.cfs
    }
}

/// Run Stage 1 then Stage 2.
pub fn identify(config: &CvmConfig) -> Result<Identification> {
    let clusters = ClusterIdentification::identify(config)?;
    let cfs = CfIdentification::identify(config, &clusters)?;
    info!(
        "identified '{}': {} cluster groups, {} correlation functions ({} independent)",
        config.ordered().name,
        clusters.tc(),
        cfs.tcf(),
        cfs.ncf()
    );
    Ok(Identification {
        config: config.clone(),
        clusters,
        cfs,
    })
}
