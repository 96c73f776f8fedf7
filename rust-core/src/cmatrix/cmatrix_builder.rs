use std::collections::HashMap;

use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::clusters::cluster_enumeration::cartesian_power;
use crate::clusters::GroupIndex;
use crate::cmatrix::basis::{r_matrix, site_basis};
use crate::cmatrix::substitution::{build_substitution_table, SiteOperatorProduct};
use crate::config::ROW_MERGE_SCALE;
use crate::error::CvmError;
use crate::identification::Identification;
use crate::Result;

/// Cluster variables of one ordered cluster group as affine functions of the full
/// correlation vector: `CV = constants + coefficients·uFull`.
#[derive(Debug, Clone)]
pub struct CMatrixBlock {
    pub group: GroupIndex,
    /// `lcv × tcf`
    pub coefficients: DMatrix<f64>,
    pub constants: DVector<f64>,
    /// Configurations merged into each row
    pub weights: Vec<usize>,
}

impl CMatrixBlock {
    /// Number of merged cluster variables.
    pub fn lcv(&self) -> usize {
        self.weights.len()
    }

    pub fn evaluate(&self, u_full: &DVector<f64>) -> DVector<f64> {
        &self.constants + &self.coefficients * u_full
    }
}

/// C-matrix of an ordered phase: one block per cluster group, in flat group order.
#[derive(Debug, Clone)]
pub struct CMatrix {
    blocks: Vec<CMatrixBlock>,
    type_offsets: Vec<usize>,
    cf_basis_indices: Vec<Vec<usize>>,
    basis: Vec<f64>,
    tcf: usize,
    ncf: usize,
}

impl CMatrix {
    pub fn blocks(&self) -> &[CMatrixBlock] {
        &self.blocks
    }

    pub fn block(&self, group: GroupIndex) -> &CMatrixBlock {
        &self.blocks[self.type_offsets[group.cluster_type] + group.group]
    }

    pub fn lcv(&self, group: GroupIndex) -> usize {
        self.block(group).lcv()
    }

    pub fn wcv(&self, group: GroupIndex) -> &[usize] {
        &self.block(group).weights
    }

    /// `lcv[t][j]` over all non-empty reference types.
    pub fn lcv_table(&self) -> Vec<Vec<usize>> {
        self.type_offsets
            .windows(2)
            .map(|w| self.blocks[w[0]..w[1]].iter().map(CMatrixBlock::lcv).collect())
            .collect()
    }

    /// Sorted basis powers decorating each correlation-function column.
    pub fn cf_basis_indices(&self) -> &[Vec<usize>] {
        &self.cf_basis_indices
    }

    pub fn basis(&self) -> &[f64] {
        &self.basis
    }

    pub fn components(&self) -> usize {
        self.basis.len()
    }

    pub fn tcf(&self) -> usize {
        self.tcf
    }

    pub fn ncf(&self) -> usize {
        self.ncf
    }
}

/// Stage 3: expand every species configuration of every ordered cluster group into
/// correlation functions and merge identical rows.
pub fn build_cmatrix(identification: &Identification) -> Result<CMatrix> {
    let clusters = identification.clusters();
    let cfs = identification.cfs();
    let group = &identification.config().ordered().space_group;
    let components = cfs.components();
    let basis = site_basis(components)?;
    let r = r_matrix(&basis)?;
    let tcf = cfs.tcf();

    let mut blocks = Vec::with_capacity(clusters.tc());
    let mut type_offsets = vec![0];
    for t in 0..clusters.tcdis() {
        for j in 0..clusters.classified().groups_of(t).len() {
            let index = GroupIndex {
                cluster_type: t,
                group: j,
            };
            let ordered_type = clusters.classified().group(index).ordered_type;
            let representative = &clusters.ordered().types()[ordered_type].representative;
            let table = build_substitution_table(representative, group, cfs)?;
            blocks.push(build_block(
                index,
                representative.num_sites(),
                &r,
                tcf,
                |product| {
                    table.get(product).ok_or_else(|| {
                        CvmError::inconsistent(format!(
                            "no correlation function for product {:?} in group ({}, {})",
                            product.factors(),
                            t,
                            j
                        ))
                    })
                },
            )?);
        }
        type_offsets.push(blocks.len());
    }

    let cf_basis_indices: Vec<Vec<usize>> =
        cfs.functions().iter().map(|cf| cf.basis_powers()).collect();

    let cmatrix = CMatrix {
        blocks,
        type_offsets,
        cf_basis_indices,
        basis,
        tcf,
        ncf: cfs.ncf(),
    };
    debug!(
        "C-matrix for '{}': lcv = {:?}",
        identification.config().ordered().name,
        cmatrix.lcv_table()
    );
    Ok(cmatrix)
}

fn build_block(
    group: GroupIndex,
    num_sites: usize,
    r: &DMatrix<f64>,
    tcf: usize,
    column_of: impl Fn(&SiteOperatorProduct) -> Result<usize>,
) -> Result<CMatrixBlock> {
    let components = r.nrows();
    let assignments = cartesian_power(num_sites, components);

    let mut rows: Vec<(f64, Vec<f64>)> = Vec::new();
    let mut weights: Vec<usize> = Vec::new();
    let mut row_of_key: HashMap<Vec<i64>, usize> = HashMap::new();

    for species in &assignments {
        let mut constant = 0.0;
        let mut coefficients = vec![0.0; tcf];
        for powers in &assignments {
            let coefficient: f64 = species
                .iter()
                .zip(powers)
                .map(|(&c, &s)| r[(c, s)])
                .product();
            if coefficient == 0.0 {
                continue;
            }
            let product = SiteOperatorProduct::from_powers(powers);
            if product.is_constant() {
                constant += coefficient;
            } else {
                coefficients[column_of(&product)?] += coefficient;
            }
        }

        let key: Vec<i64> = std::iter::once(constant)
            .chain(coefficients.iter().copied())
            .map(|v| (v * ROW_MERGE_SCALE).round() as i64)
            .collect();
        match row_of_key.get(&key) {
            Some(&row) => weights[row] += 1,
            None => {
                row_of_key.insert(key, rows.len());
                rows.push((constant, coefficients));
                weights.push(1);
            }
        }
    }

    let lcv = rows.len();
    let constants = DVector::from_iterator(lcv, rows.iter().map(|(c, _)| *c));
    let coefficients = DMatrix::from_fn(lcv, tcf, |v, k| rows[v].1[k]);
    Ok(CMatrixBlock {
        group,
        coefficients,
        constants,
        weights,
    })
}
