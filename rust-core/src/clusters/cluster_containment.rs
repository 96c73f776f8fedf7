use crate::clusters::cluster_enumeration::{combinations, ClusterTypeSet};
use crate::error::CvmError;
use crate::symmetries::SpaceGroup;
use crate::Result;

/// Containment table `nij[i][j]`: number of sub-clusters of the representative of type
/// `i` that belong to the orbit of type `j`, for the first `count` types.
///
/// Entries with `j < i` are zero, as is every entry where type `j` has more sites than
/// type `i`. Decorations take part in the orbit test, so this is meant for a
/// topology-only type set.
pub fn containment_table(
    types: &ClusterTypeSet,
    group: &SpaceGroup,
    count: usize,
) -> Result<Vec<Vec<usize>>> {
    if count > types.len() {
        return Err(CvmError::dimension(
            "cluster types in containment table",
            types.len(),
            count,
        ));
    }

    let mut nij = vec![vec![0usize; count]; count];
    for (i, row) in nij.iter_mut().enumerate() {
        let representative = &types.types()[i].representative;
        let decorations = representative.decorations();
        let n = representative.num_sites();
        for size in 0..=n {
            for subset in combinations(n, size) {
                let labels: Vec<Option<usize>> = subset.iter().map(|&k| decorations[k]).collect();
                let sub = representative.decorated_subcluster(&subset, &labels);
                match types.type_of(&group.canonical_key(&sub)) {
                    Some(j) if j >= i && j < count => row[j] += 1,
                    _ => {}
                }
            }
        }
    }
    Ok(nij)
}

/// Kikuchi-Baker entropy coefficients by forward recurrence over types sorted largest
/// to smallest:
///
/// `kb[j] = (m[j] - Σ_{i<j} m[i]·nij[i][j]·kb[i]) / m[j]`, so `kb[0] = 1`.
pub fn kikuchi_baker_coefficients(multiplicities: &[f64], nij: &[Vec<usize>]) -> Result<Vec<f64>> {
    let n = multiplicities.len();
    if nij.len() != n {
        return Err(CvmError::dimension("containment table rows", n, nij.len()));
    }
    if let Some(row) = nij.iter().find(|row| row.len() != n) {
        return Err(CvmError::dimension("containment table columns", n, row.len()));
    }

    let mut kb = Vec::with_capacity(n);
    for j in 0..n {
        let m_j = multiplicities[j];
        if m_j == 0.0 {
            return Err(CvmError::inconsistent(format!(
                "cluster type {} has zero multiplicity",
                j
            )));
        }
        let overlap: f64 = (0..j)
            .map(|i| multiplicities[i] * nij[i][j] as f64 * kb[i])
            .sum();
        kb.push((m_j - overlap) / m_j);
    }
    Ok(kb)
}
