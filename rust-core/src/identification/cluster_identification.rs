use log::debug;

use crate::clusters::{
    classify_clusters, containment_table, enumerate_cluster_types, kikuchi_baker_coefficients,
    ClassifiedClusters, ClusterTypeSet, GroupIndex,
};
use crate::config::CvmConfig;
use crate::error::CvmError;
use crate::interfaces::DecorationBasis;
use crate::Result;

/// Stage 1: bare cluster types of the reference and ordered phases, their containment
/// table, Kikuchi-Baker coefficients and classification.
///
/// Reference types `0..tcdis` exclude the empty cluster; type `tcdis - 1` is the point.
#[derive(Debug, Clone)]
pub struct ClusterIdentification {
    reference: ClusterTypeSet,
    ordered: ClusterTypeSet,
    classified: ClassifiedClusters,
    tcdis: usize,
    nij: Vec<Vec<usize>>,
    kb: Vec<f64>,
    mhdis: Vec<f64>,
}

impl ClusterIdentification {
    pub fn identify(config: &CvmConfig) -> Result<Self> {
        let reference_phase = config.reference();
        let ordered_phase = config.ordered();
        let topology = DecorationBasis::Topology;

        let reference = enumerate_cluster_types(
            &reference_phase.maximal_clusters,
            &reference_phase.space_group,
            &topology,
        )?;
        let ordered = enumerate_cluster_types(
            &ordered_phase.maximal_clusters,
            &ordered_phase.space_group,
            &topology,
        )?;

        let tcdis = reference.non_empty_len();
        if tcdis == 0 {
            return Err(CvmError::invalid(format!(
                "phase '{}' has no non-empty cluster types",
                reference_phase.name
            )));
        }
        let point = &reference.types()[tcdis - 1];
        if point.num_sites() != 1 {
            return Err(CvmError::inconsistent(format!(
                "smallest non-empty reference type has {} sites, expected a point",
                point.num_sites()
            )));
        }

        let nij = containment_table(&reference, &reference_phase.space_group, tcdis)?;
        let mhdis: Vec<f64> = reference.multiplicities()[..tcdis].to_vec();
        let kb = kikuchi_baker_coefficients(&mhdis, &nij)?;

        let classified = classify_clusters(
            &ordered,
            config.transform(),
            &reference,
            &reference_phase.space_group,
        )?;

        debug!(
            "stage 1 '{}' on '{}': tcdis = {}, lc = {:?}, kb = {:?}",
            ordered_phase.name,
            reference_phase.name,
            tcdis,
            classified.group_counts(),
            kb
        );

        Ok(Self {
            reference,
            ordered,
            classified,
            tcdis,
            nij,
            kb,
            mhdis,
        })
    }

    /// Bare reference-phase types, empty cluster included.
    pub fn reference(&self) -> &ClusterTypeSet {
        &self.reference
    }

    /// Bare ordered-phase types, empty cluster included.
    pub fn ordered(&self) -> &ClusterTypeSet {
        &self.ordered
    }

    pub fn classified(&self) -> &ClassifiedClusters {
        &self.classified
    }

    /// Number of non-empty reference types.
    pub fn tcdis(&self) -> usize {
        self.tcdis
    }

    pub fn point_type(&self) -> usize {
        self.tcdis - 1
    }

    pub fn nij(&self) -> &[Vec<usize>] {
        &self.nij
    }

    pub fn kb(&self) -> &[f64] {
        &self.kb
    }

    /// Reference multiplicities per lattice site.
    pub fn mhdis(&self) -> &[f64] {
        &self.mhdis
    }

    pub fn num_sites(&self, t: usize) -> usize {
        self.reference.types()[t].num_sites()
    }

    /// Ordered groups per non-empty reference type.
    pub fn lc(&self) -> Vec<usize> {
        self.classified.group_counts()[..self.tcdis].to_vec()
    }

    /// Total number of ordered-phase cluster groups.
    pub fn tc(&self) -> usize {
        self.lc().iter().sum()
    }

    /// Ordered multiplicity of a group normalised by its reference multiplicity.
    pub fn mh(&self, index: GroupIndex) -> f64 {
        self.classified.group(index).multiplicity / self.mhdis[index.cluster_type]
    }

    pub fn mh_table(&self) -> Vec<Vec<f64>> {
        (0..self.tcdis)
            .map(|t| {
                (0..self.classified.groups_of(t).len())
                    .map(|j| {
                        self.mh(GroupIndex {
                            cluster_type: t,
                            group: j,
                        })
                    })
                    .collect()
            })
            .collect()
    }

    /// Non-empty group indices in flat order.
    pub fn group_indices(&self) -> impl Iterator<Item = GroupIndex> + '_ {
        let tcdis = self.tcdis;
        self.classified
            .indices()
            .filter(move |index| index.cluster_type < tcdis)
    }

    /// `Σ_t kb[t]·mhdis[t]·nSites[t]`; equals one for a single-sublattice reference.
    pub fn entropy_sum_rule(&self) -> f64 {
        (0..self.tcdis)
            .map(|t| self.kb[t] * self.mhdis[t] * self.num_sites(t) as f64)
            .sum()
    }
}
