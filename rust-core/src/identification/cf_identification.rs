use std::ops::Range;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::clusters::{
    classify_clusters, enumerate_cluster_types, ClassifiedClusters, Cluster, ClusterKey,
    ClusterTypeSet, GroupIndex,
};
use crate::config::CvmConfig;
use crate::error::CvmError;
use crate::identification::cluster_identification::ClusterIdentification;
use crate::interfaces::DecorationBasis;
use crate::Result;

/// Position of a correlation function: reference type, ordered group, and index within
/// the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CfIndex {
    pub cluster_type: usize,
    pub group: usize,
    pub index: usize,
}

impl CfIndex {
    pub fn group_index(&self) -> GroupIndex {
        GroupIndex {
            cluster_type: self.cluster_type,
            group: self.group,
        }
    }
}

/// One symmetry-distinct decorated cluster of the ordered phase.
#[derive(Debug, Clone)]
pub struct CorrelationFunction {
    pub index: CfIndex,
    /// Column in the C-matrix and in the correlation vector
    pub column: usize,
    /// Index into the ordered decorated [`ClusterTypeSet`]
    pub ordered_type: usize,
    /// Parent in the reference decorated [`ClusterTypeSet`]
    pub reference_type: usize,
    /// Decorated representative in the ordered frame
    pub representative: Cluster,
    pub multiplicity: f64,
    pub site_counts: Vec<usize>,
}

impl CorrelationFunction {
    /// Site-variable powers carried by the representative, sorted.
    pub fn basis_powers(&self) -> Vec<usize> {
        let mut powers: Vec<usize> = self
            .representative
            .decorations()
            .into_iter()
            .flatten()
            .collect();
        powers.sort_unstable();
        powers
    }

    pub fn num_sites(&self) -> usize {
        self.site_counts.iter().sum()
    }
}

/// Stage 2: decorated clusters (correlation functions) of the ordered phase, grouped
/// under the Stage 1 cluster groups.
///
/// Columns run group by group in Stage 1 flat order; the point correlation functions
/// (`nxcf` of them) come last, so columns `0..ncf` are the independent unknowns.
#[derive(Debug, Clone)]
pub struct CfIdentification {
    reference_cfs: ClusterTypeSet,
    ordered_cfs: ClusterTypeSet,
    classified: ClassifiedClusters,
    functions: Vec<CorrelationFunction>,
    group_ranges: Vec<Vec<Range<usize>>>,
    column_of_ordered: Vec<Option<usize>>,
    nxcf: usize,
    components: usize,
}

impl CfIdentification {
    pub fn identify(config: &CvmConfig, clusters: &ClusterIdentification) -> Result<Self> {
        let components = config.components();
        let basis = DecorationBasis::components(components)?;
        let reference_phase = config.reference();
        let ordered_phase = config.ordered();

        let reference_cfs = enumerate_cluster_types(
            &reference_phase.maximal_clusters,
            &reference_phase.space_group,
            &basis,
        )?;
        let ordered_cfs = enumerate_cluster_types(
            &ordered_phase.maximal_clusters,
            &ordered_phase.space_group,
            &basis,
        )?;
        let classified = classify_clusters(
            &ordered_cfs,
            config.transform(),
            &reference_cfs,
            &reference_phase.space_group,
        )?;

        // Decorated ordered types bucketed by the Stage 1 group of their bare geometry
        let tcdis = clusters.tcdis();
        let lc = clusters.lc();
        let mut buckets: Vec<Vec<Vec<usize>>> = lc.iter().map(|&n| vec![Vec::new(); n]).collect();
        for (o, cf_type) in ordered_cfs.types().iter().enumerate() {
            if cf_type.num_sites() == 0 {
                continue;
            }
            let key = ordered_phase
                .space_group
                .canonical_key(&cf_type.representative.stripped());
            let topology = clusters.ordered().type_of(&key).ok_or_else(|| {
                CvmError::inconsistent(format!(
                    "correlation function type {} has no bare ordered cluster type",
                    o
                ))
            })?;
            let group = clusters.classified().index_of(topology);
            if group.cluster_type >= tcdis {
                return Err(CvmError::inconsistent(format!(
                    "non-empty correlation function type {} is filed under the empty cluster",
                    o
                )));
            }
            check_reference_parent(clusters, config, &reference_cfs, &classified, o, group)?;
            buckets[group.cluster_type][group.group].push(o);
        }

        let mut functions = Vec::with_capacity(ordered_cfs.non_empty_len());
        let mut group_ranges = Vec::with_capacity(tcdis);
        let mut column_of_ordered = vec![None; ordered_cfs.len()];
        for (t, groups) in buckets.into_iter().enumerate() {
            let mut ranges = Vec::with_capacity(groups.len());
            for (j, members) in groups.into_iter().enumerate() {
                if members.is_empty() {
                    return Err(CvmError::inconsistent(format!(
                        "cluster group ({}, {}) has no correlation functions",
                        t, j
                    )));
                }
                let start = functions.len();
                for (k, o) in members.into_iter().enumerate() {
                    let cf_type = &ordered_cfs.types()[o];
                    let column = functions.len();
                    column_of_ordered[o] = Some(column);
                    functions.push(CorrelationFunction {
                        index: CfIndex {
                            cluster_type: t,
                            group: j,
                            index: k,
                        },
                        column,
                        ordered_type: o,
                        reference_type: classified.index_of(o).cluster_type,
                        representative: cf_type.representative.clone(),
                        multiplicity: cf_type.multiplicity,
                        site_counts: cf_type.site_counts.clone(),
                    });
                }
                ranges.push(start..functions.len());
            }
            group_ranges.push(ranges);
        }

        if functions.len() != ordered_cfs.non_empty_len() {
            return Err(CvmError::dimension(
                "correlation functions",
                ordered_cfs.non_empty_len(),
                functions.len(),
            ));
        }

        let nxcf: usize = group_ranges[clusters.point_type()]
            .iter()
            .map(|r| r.len())
            .sum();

        let identification = Self {
            reference_cfs,
            ordered_cfs,
            classified,
            functions,
            group_ranges,
            column_of_ordered,
            nxcf,
            components,
        };
        debug!(
            "stage 2: K = {}, tcf = {}, ncf = {}, nxcf = {}, lcf = {:?}",
            components,
            identification.tcf(),
            identification.ncf(),
            nxcf,
            identification.lcf_table()
        );
        Ok(identification)
    }

    pub fn components(&self) -> usize {
        self.components
    }

    pub fn functions(&self) -> &[CorrelationFunction] {
        &self.functions
    }

    pub fn function(&self, column: usize) -> Option<&CorrelationFunction> {
        self.functions.get(column)
    }

    /// Total number of correlation functions.
    pub fn tcf(&self) -> usize {
        self.functions.len()
    }

    /// Point correlation functions, fixed by composition.
    pub fn nxcf(&self) -> usize {
        self.nxcf
    }

    /// Independent correlation functions.
    pub fn ncf(&self) -> usize {
        self.tcf() - self.nxcf
    }

    /// Non-empty decorated types of the reference phase.
    pub fn tcfdis(&self) -> usize {
        self.reference_cfs.non_empty_len()
    }

    pub fn reference_cfs(&self) -> &ClusterTypeSet {
        &self.reference_cfs
    }

    pub fn ordered_cfs(&self) -> &ClusterTypeSet {
        &self.ordered_cfs
    }

    /// Decorated ordered types filed under decorated reference types.
    pub fn classified(&self) -> &ClassifiedClusters {
        &self.classified
    }

    /// Columns of the correlation functions belonging to one cluster group.
    pub fn columns_of(&self, group: GroupIndex) -> Range<usize> {
        self.group_ranges[group.cluster_type][group.group].clone()
    }

    pub fn lcf(&self, group: GroupIndex) -> usize {
        self.columns_of(group).len()
    }

    pub fn lcf_table(&self) -> Vec<Vec<usize>> {
        self.group_ranges
            .iter()
            .map(|ranges| ranges.iter().map(|r| r.len()).collect())
            .collect()
    }

    /// Column of the ordered decorated type with this canonical key, if it is non-empty.
    pub fn column_of_key(&self, key: &ClusterKey) -> Option<usize> {
        self.ordered_cfs
            .type_of(key)
            .and_then(|o| self.column_of_ordered[o])
    }

    /// Orbit of a correlation function in the ordered frame.
    pub fn orbit(&self, column: usize) -> &[Cluster] {
        &self.ordered_cfs.types()[self.functions[column].ordered_type].orbit
    }
}

// The decorated parent of an ordered type must have the bare parent of its geometry
fn check_reference_parent(
    clusters: &ClusterIdentification,
    config: &CvmConfig,
    reference_cfs: &ClusterTypeSet,
    classified: &ClassifiedClusters,
    ordered_type: usize,
    group: GroupIndex,
) -> Result<()> {
    let parent = &reference_cfs.types()[classified.index_of(ordered_type).cluster_type];
    let key = config
        .reference()
        .space_group
        .canonical_key(&parent.representative.stripped());
    match clusters.reference().type_of(&key) {
        Some(t) if t == group.cluster_type => Ok(()),
        found => Err(CvmError::inconsistent(format!(
            "correlation function type {} has decorated parent of bare type {:?}, expected {}",
            ordered_type, found, group.cluster_type
        ))),
    }
}
