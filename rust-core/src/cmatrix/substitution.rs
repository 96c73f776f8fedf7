use std::collections::HashMap;

use crate::clusters::cluster_enumeration::{cartesian_power, combinations};
use crate::clusters::Cluster;
use crate::error::CvmError;
use crate::identification::CfIdentification;
use crate::symmetries::SpaceGroup;
use crate::Result;

/// Product of site operators over the sites of one cluster, keyed by
/// `(site index, power)` pairs. Zero powers are dropped and the pairs are sorted, so
/// equal products compare equal regardless of construction order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SiteOperatorProduct(Vec<(usize, usize)>);

impl SiteOperatorProduct {
    pub fn new(factors: impl IntoIterator<Item = (usize, usize)>) -> Self {
        let mut factors: Vec<(usize, usize)> =
            factors.into_iter().filter(|&(_, power)| power > 0).collect();
        factors.sort_unstable();
        SiteOperatorProduct(factors)
    }

    /// Product from one power per site, in site-index order.
    pub fn from_powers(powers: &[usize]) -> Self {
        Self::new(powers.iter().copied().enumerate())
    }

    pub fn factors(&self) -> &[(usize, usize)] {
        &self.0
    }

    /// True when every power is zero, i.e. the product is the constant 1.
    pub fn is_constant(&self) -> bool {
        self.0.is_empty()
    }
}

/// Maps site-operator products on a cluster to correlation-function columns.
#[derive(Debug, Clone, Default)]
pub struct SubstitutionTable {
    entries: HashMap<SiteOperatorProduct, usize>,
}

impl SubstitutionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `product -> column`. Re-inserting the same mapping is a no-op; a
    /// different column for an existing product is an inconsistency.
    pub fn insert(&mut self, product: SiteOperatorProduct, column: usize) -> Result<()> {
        match self.entries.get(&product) {
            Some(&existing) if existing != column => Err(CvmError::inconsistent(format!(
                "site-operator product {:?} maps to columns {} and {}",
                product.factors(),
                existing,
                column
            ))),
            Some(_) => Ok(()),
            None => {
                self.entries.insert(product, column);
                Ok(())
            }
        }
    }

    pub fn get(&self, product: &SiteOperatorProduct) -> Option<usize> {
        self.entries.get(product).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Substitution table for every non-constant product on the sites of `cluster`.
///
/// Each product is the decorated sub-cluster carrying those powers; its column is the
/// correlation function whose orbit (under `group`) contains it.
pub fn build_substitution_table(
    cluster: &Cluster,
    group: &SpaceGroup,
    cfs: &CfIdentification,
) -> Result<SubstitutionTable> {
    let n = cluster.num_sites();
    let powers = cfs.components();
    let mut table = SubstitutionTable::new();

    for size in 1..=n {
        for subset in combinations(n, size) {
            for assignment in cartesian_power(size, powers - 1) {
                let decorations: Vec<Option<usize>> =
                    assignment.iter().map(|&d| Some(d + 1)).collect();
                let sub = cluster.decorated_subcluster(&subset, &decorations);
                let column = cfs
                    .column_of_key(&group.canonical_key(&sub))
                    .ok_or_else(|| {
                        CvmError::inconsistent(format!(
                            "decorated sub-cluster on sites {:?} with powers {:?} is not a correlation function",
                            subset,
                            decorations
                        ))
                    })?;
                let product = SiteOperatorProduct::new(
                    subset.iter().zip(&assignment).map(|(&site, &d)| (site, d + 1)),
                );
                table.insert(product, column)?;
            }
        }
    }
    Ok(table)
}
