use nalgebra::{DMatrix, DVector};

use crate::cmatrix::{full_correlations, validate_composition, CMatrix};
use crate::config::ENTROPY_SMOOTHING_THRESHOLD;
use crate::error::CvmError;
use crate::identification::{CfIdentification, ClusterIdentification};
use crate::Result;

/// `p·ln p` with its first and second derivatives.
///
/// Below [`ENTROPY_SMOOTHING_THRESHOLD`] the function is replaced by its second-order
/// expansion around the threshold, so it stays finite (and convex) for zero and
/// negative probabilities.
pub fn smoothed_entropy_term(p: f64) -> (f64, f64, f64) {
    let eps = ENTROPY_SMOOTHING_THRESHOLD;
    if p > eps {
        (p * p.ln(), 1.0 + p.ln(), 1.0 / p)
    } else {
        let d = p - eps;
        let slope = 1.0 + eps.ln();
        (
            eps * eps.ln() + slope * d + d * d / (2.0 * eps),
            slope + d / eps,
            1.0 / eps,
        )
    }
}

/// Free energy and its derivatives with respect to the independent correlation
/// functions at one point.
#[derive(Debug, Clone)]
pub struct FreeEnergyEvaluation {
    pub gibbs_energy: f64,
    pub enthalpy: f64,
    pub entropy: f64,
    pub gradient: DVector<f64>,
    pub hessian: DMatrix<f64>,
    /// Cluster variables per C-matrix block
    pub cluster_variables: Vec<DVector<f64>>,
}

/// `G(u) = H(u) − T·S(u)` for fixed temperature, composition and interactions.
#[derive(Debug, Clone)]
pub struct FreeEnergyFunctional<'a> {
    cmatrix: &'a CMatrix,
    mole_fractions: Vec<f64>,
    temperature: f64,
    /// `mhdis[t]·mh[t][j]·ECI[l]` per independent CF
    enthalpy_gradient: DVector<f64>,
    /// `kb[t]·mhdis[t]·mh[t][j]` per block
    entropy_weights: Vec<f64>,
}

impl<'a> FreeEnergyFunctional<'a> {
    pub fn new(
        clusters: &ClusterIdentification,
        cfs: &CfIdentification,
        cmatrix: &'a CMatrix,
        eci: &[f64],
        temperature: f64,
        mole_fractions: &[f64],
    ) -> Result<Self> {
        if !(temperature.is_finite() && temperature > 0.0) {
            return Err(CvmError::invalid(format!(
                "temperature must be positive, got {}",
                temperature
            )));
        }
        if eci.len() != cfs.ncf() {
            return Err(CvmError::dimension("ECI values", cfs.ncf(), eci.len()));
        }
        if cmatrix.tcf() != cfs.tcf() || cmatrix.ncf() != cfs.ncf() {
            return Err(CvmError::dimension(
                "C-matrix columns",
                cfs.tcf(),
                cmatrix.tcf(),
            ));
        }
        validate_composition(mole_fractions, cmatrix.components())?;
        // A vanished component leaves the random state as the only state with
        // non-negative cluster variables; it has to be dropped from the system instead
        if let Some(i) = mole_fractions.iter().position(|&x| x <= 0.0) {
            return Err(CvmError::invalid(format!(
                "component {} has zero mole fraction; solve the reduced {}-component system",
                i,
                cmatrix.components() - 1
            )));
        }

        let enthalpy_gradient = DVector::from_iterator(
            cfs.ncf(),
            cfs.functions()[..cfs.ncf()].iter().zip(eci).map(|(cf, e)| {
                let group = cf.index.group_index();
                clusters.mhdis()[group.cluster_type] * clusters.mh(group) * e
            }),
        );
        let entropy_weights = cmatrix
            .blocks()
            .iter()
            .map(|block| {
                let t = block.group.cluster_type;
                clusters.kb()[t] * clusters.mhdis()[t] * clusters.mh(block.group)
            })
            .collect();

        Ok(Self {
            cmatrix,
            mole_fractions: mole_fractions.to_vec(),
            temperature,
            enthalpy_gradient,
            entropy_weights,
        })
    }

    pub fn cmatrix(&self) -> &'a CMatrix {
        self.cmatrix
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn mole_fractions(&self) -> &[f64] {
        &self.mole_fractions
    }

    pub fn ncf(&self) -> usize {
        self.cmatrix.ncf()
    }

    pub fn evaluate(&self, u: &DVector<f64>) -> Result<FreeEnergyEvaluation> {
        let ncf = self.ncf();
        let u_full = full_correlations(self.cmatrix, u, &self.mole_fractions)?;

        let enthalpy = self.enthalpy_gradient.dot(u);

        let mut entropy = 0.0;
        let mut s_grad = DVector::zeros(ncf);
        let mut s_hess = DMatrix::zeros(ncf, ncf);
        let mut cluster_variables = Vec::with_capacity(self.cmatrix.blocks().len());
        for (block, &weight) in self.cmatrix.blocks().iter().zip(&self.entropy_weights) {
            let cv = block.evaluate(&u_full);
            for v in 0..block.lcv() {
                let (f, df, d2f) = smoothed_entropy_term(cv[v]);
                let w = weight * block.weights[v] as f64;
                entropy -= w * f;
                let row = block.coefficients.row(v).columns(0, ncf).transpose();
                s_grad.axpy(-w * df, &row, 1.0);
                s_hess.ger(-w * d2f, &row, &row, 1.0);
            }
            cluster_variables.push(cv);
        }

        let t = self.temperature;
        Ok(FreeEnergyEvaluation {
            gibbs_energy: enthalpy - t * entropy,
            enthalpy,
            entropy,
            gradient: &self.enthalpy_gradient - s_grad * t,
            hessian: s_hess * -t,
            cluster_variables,
        })
    }
}
