// Definitions that are used throughout all modules

use serde::{Deserialize, Serialize};

use crate::error::CvmError;
use crate::Result;

/// Set of site-operator symbols used to decorate clusters during enumeration.
///
/// `Topology` decorates nothing (every site carries `None`), which enumerates bare
/// cluster geometries. `Components(k)` uses the `k - 1` powers `1..k` of the site
/// variable, which enumerates the correlation functions of a `k`-component system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecorationBasis {
    Topology,
    Components(usize),
}

impl DecorationBasis {
    pub fn components(k: usize) -> Result<Self> {
        if k < 2 {
            return Err(CvmError::invalid(format!(
                "a decoration basis needs at least 2 components, got {}",
                k
            )));
        }
        Ok(DecorationBasis::Components(k))
    }

    /// Symbols a single site may carry.
    pub fn symbols(&self) -> Vec<Option<usize>> {
        match self {
            DecorationBasis::Topology => vec![None],
            DecorationBasis::Components(k) => (1..*k).map(Some).collect(),
        }
    }
}
