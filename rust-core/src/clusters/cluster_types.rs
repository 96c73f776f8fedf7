use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::config::POSITION_KEY_SCALE;

/// Quantised coordinates used wherever positions are compared or hashed.
///
/// Two positions closer than `1 / POSITION_KEY_SCALE` in every component share a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PositionKey([i64; 3]);

impl PositionKey {
    pub fn from_position(position: &Vector3<f64>) -> Self {
        PositionKey([
            (position.x * POSITION_KEY_SCALE).round() as i64,
            (position.y * POSITION_KEY_SCALE).round() as i64,
            (position.z * POSITION_KEY_SCALE).round() as i64,
        ])
    }
}

/// A lattice site, optionally decorated with a site-operator symbol.
///
/// The symbol is the power of the site variable carried by the site in a correlation
/// function; `None` marks a bare (topology-only) site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub position: Vector3<f64>,
    pub decoration: Option<usize>,
}

impl Site {
    pub fn new(position: Vector3<f64>) -> Self {
        Self {
            position,
            decoration: None,
        }
    }

    pub fn decorated(position: Vector3<f64>, symbol: usize) -> Self {
        Self {
            position,
            decoration: Some(symbol),
        }
    }

    pub fn key(&self) -> PositionKey {
        PositionKey::from_position(&self.position)
    }
}

/// The sites of a cluster that belong to one crystallographic sublattice.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Sublattice {
    pub sites: Vec<Site>,
}

/// A finite set of sites grouped by sublattice; the unit of enumeration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cluster {
    pub sublattices: Vec<Sublattice>,
}

impl Cluster {
    pub fn new(sublattices: Vec<Sublattice>) -> Self {
        Self { sublattices }
    }

    /// Bare cluster from per-sublattice position lists.
    pub fn from_positions(positions: Vec<Vec<Vector3<f64>>>) -> Self {
        Self::new(
            positions
                .into_iter()
                .map(|sites| Sublattice {
                    sites: sites.into_iter().map(Site::new).collect(),
                })
                .collect(),
        )
    }

    /// Build a cluster from `(sublattice, site)` pairs.
    pub fn from_sites(num_sublattices: usize, sites: impl IntoIterator<Item = (usize, Site)>) -> Self {
        let mut sublattices = vec![Sublattice::default(); num_sublattices];
        for (s, site) in sites {
            sublattices[s].sites.push(site);
        }
        Self::new(sublattices)
    }

    pub fn empty(num_sublattices: usize) -> Self {
        Self::new(vec![Sublattice::default(); num_sublattices])
    }

    pub fn num_sublattices(&self) -> usize {
        self.sublattices.len()
    }

    pub fn num_sites(&self) -> usize {
        self.sublattices.iter().map(|s| s.sites.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.num_sites() == 0
    }

    /// Number of sites on each sublattice.
    pub fn site_counts(&self) -> Vec<usize> {
        self.sublattices.iter().map(|s| s.sites.len()).collect()
    }

    /// Sites in sublattice order, each paired with its sublattice index.
    ///
    /// The position of a site in this sequence is its site index.
    pub fn sites(&self) -> impl Iterator<Item = (usize, &Site)> {
        self.sublattices
            .iter()
            .enumerate()
            .flat_map(|(s, sub)| sub.sites.iter().map(move |site| (s, site)))
    }

    /// Decoration symbols in site-index order.
    pub fn decorations(&self) -> Vec<Option<usize>> {
        self.sites().map(|(_, site)| site.decoration).collect()
    }

    /// Same geometry with every decoration removed.
    pub fn stripped(&self) -> Cluster {
        Cluster::from_sites(
            self.num_sublattices(),
            self.sites()
                .map(|(s, site)| (s, Site::new(site.position))),
        )
    }

    /// Sub-cluster on the given site indices, with the given decorations.
    pub fn decorated_subcluster(&self, indices: &[usize], decorations: &[Option<usize>]) -> Cluster {
        let sites: Vec<(usize, &Site)> = self.sites().collect();
        Cluster::from_sites(
            self.num_sublattices(),
            indices.iter().zip(decorations).map(|(&i, &decoration)| {
                let (s, site) = sites[i];
                (
                    s,
                    Site {
                        position: site.position,
                        decoration,
                    },
                )
            }),
        )
    }

    pub fn translated(&self, shift: &Vector3<f64>) -> Cluster {
        Cluster::from_sites(
            self.num_sublattices(),
            self.sites().map(|(s, site)| {
                (
                    s,
                    Site {
                        position: site.position + shift,
                        decoration: site.decoration,
                    },
                )
            }),
        )
    }

    /// Sort the sites of each sublattice by position key, then decoration.
    pub fn sort_sites(&mut self) {
        for sublattice in &mut self.sublattices {
            sublattice
                .sites
                .sort_by(|a, b| (a.key(), a.decoration).cmp(&(b.key(), b.decoration)));
        }
    }
}

/// Order-independent, hashable identity of a decorated cluster.
///
/// Built from a cluster whose sites are already sorted, see
/// [`crate::symmetries::SpaceGroup::canonical_key`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterKey(Vec<Vec<(PositionKey, Option<usize>)>>);

impl ClusterKey {
    pub fn of(cluster: &Cluster) -> Self {
        ClusterKey(
            cluster
                .sublattices
                .iter()
                .map(|sub| {
                    let mut sites: Vec<_> =
                        sub.sites.iter().map(|site| (site.key(), site.decoration)).collect();
                    sites.sort();
                    sites
                })
                .collect(),
        )
    }
}
