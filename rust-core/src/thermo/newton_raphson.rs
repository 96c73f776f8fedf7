use log::{debug, trace, warn};
use nalgebra::DVector;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::cmatrix::{random_state_correlations, CMatrix};
use crate::error::CvmError;
use crate::identification::{CfIdentification, ClusterIdentification, Identification};
use crate::thermo::free_energy::{FreeEnergyEvaluation, FreeEnergyFunctional};
use crate::thermo::linear_solve::solve_linear_system;
use crate::Result;

/// Damped Newton-Raphson settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverOptions {
    /// Convergence threshold on the gradient norm, relative to `max(1, T)`, and on
    /// the Newton step norm
    pub tolerance: f64,
    pub max_iterations: usize,
    /// Initial step fraction, in `(0, 1]`
    pub damping: f64,
    /// Step halvings allowed per iteration before giving up
    pub max_backtracks: usize,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 200,
            damping: 1.0,
            max_backtracks: 40,
        }
    }
}

impl SolverOptions {
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(CvmError::invalid(format!(
                "solver tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(CvmError::invalid(format!(
                "damping must lie in (0, 1], got {}",
                self.damping
            )));
        }
        Ok(())
    }
}

/// Equilibrium state found by the solver. `converged == false` is a reported outcome,
/// not an error.
#[derive(Debug, Clone)]
pub struct EquilibriumResult {
    pub temperature: f64,
    /// Independent correlation functions (length `ncf`)
    pub correlations: DVector<f64>,
    pub gibbs_energy: f64,
    pub enthalpy: f64,
    pub entropy: f64,
    pub iterations: usize,
    pub gradient_norm: f64,
    pub converged: bool,
    /// Cluster variables per C-matrix block at the final iterate
    pub cluster_variables: Vec<DVector<f64>>,
}

impl EquilibriumResult {
    /// Smallest cluster probability over all blocks.
    pub fn min_cluster_variable(&self) -> f64 {
        self.cluster_variables
            .iter()
            .flat_map(|cv| cv.iter().copied())
            .fold(f64::INFINITY, f64::min)
    }
}

/// Minimise the free energy at one temperature and composition, starting from the
/// random state, with default options apart from `tolerance`.
pub fn solve(
    mole_fractions: &[f64],
    temperature: f64,
    eci: &[f64],
    clusters: &ClusterIdentification,
    cfs: &CfIdentification,
    cmatrix: &CMatrix,
    tolerance: f64,
) -> Result<EquilibriumResult> {
    let functional =
        FreeEnergyFunctional::new(clusters, cfs, cmatrix, eci, temperature, mole_fractions)?;
    minimize(&functional, &SolverOptions::with_tolerance(tolerance))
}

pub fn solve_with_options(
    mole_fractions: &[f64],
    temperature: f64,
    eci: &[f64],
    identification: &Identification,
    cmatrix: &CMatrix,
    options: &SolverOptions,
) -> Result<EquilibriumResult> {
    let functional = FreeEnergyFunctional::new(
        identification.clusters(),
        identification.cfs(),
        cmatrix,
        eci,
        temperature,
        mole_fractions,
    )?;
    minimize(&functional, options)
}

/// Solve every temperature independently against one shared identification and
/// C-matrix. Runs in parallel with the `parallel` feature.
pub fn sweep_temperatures(
    mole_fractions: &[f64],
    temperatures: &[f64],
    eci: &[f64],
    identification: &Identification,
    cmatrix: &CMatrix,
    options: &SolverOptions,
) -> Result<Vec<EquilibriumResult>> {
    let run = |&t: &f64| solve_with_options(mole_fractions, t, eci, identification, cmatrix, options);

    #[cfg(feature = "parallel")]
    let results: Result<Vec<EquilibriumResult>> = temperatures.par_iter().map(run).collect();
    #[cfg(not(feature = "parallel"))]
    let results: Result<Vec<EquilibriumResult>> = temperatures.iter().map(run).collect();

    let results = results?;
    let failed = results.iter().filter(|r| !r.converged).count();
    if failed > 0 {
        warn!(
            "{} of {} temperatures did not converge",
            failed,
            temperatures.len()
        );
    }
    Ok(results)
}

fn minimize(functional: &FreeEnergyFunctional<'_>, options: &SolverOptions) -> Result<EquilibriumResult> {
    options.validate()?;

    let mut u = random_state_correlations(functional.cmatrix(), functional.mole_fractions())?;
    let mut current = functional.evaluate(&u)?;
    let mut iterations = 0;
    let mut converged = false;
    // The gradient carries a factor T from the entropy term
    let gradient_tolerance = options.tolerance * functional.temperature().max(1.0);

    loop {
        let norm = current.gradient.norm();
        trace!(
            "iteration {}: G = {:.12e}, |Gcu| = {:.3e}",
            iterations,
            current.gibbs_energy,
            norm
        );
        if norm < gradient_tolerance {
            converged = true;
            break;
        }
        if iterations >= options.max_iterations {
            break;
        }

        let rhs = -&current.gradient;
        let step = solve_linear_system(&current.hessian, &rhs)?;
        if step.norm() < options.tolerance {
            trace!("Newton step {:.3e} below tolerance", step.norm());
            converged = true;
            break;
        }
        iterations += 1;

        match line_search(functional, &u, &step, &current, options)? {
            Some((next_u, next)) => {
                u = next_u;
                current = next;
            }
            None => {
                debug!("line search stalled at iteration {}", iterations);
                break;
            }
        }
    }

    let gradient_norm = current.gradient.norm();
    if !converged {
        warn!(
            "Newton-Raphson stopped after {} iterations at T = {} with |Gcu| = {:.3e}",
            iterations,
            functional.temperature(),
            gradient_norm
        );
    }

    Ok(EquilibriumResult {
        temperature: functional.temperature(),
        correlations: u,
        gibbs_energy: current.gibbs_energy,
        enthalpy: current.enthalpy,
        entropy: current.entropy,
        iterations,
        gradient_norm,
        converged,
        cluster_variables: current.cluster_variables,
    })
}

// Halve the step until every cluster variable stays positive and the free energy no
// longer increases
fn line_search(
    functional: &FreeEnergyFunctional<'_>,
    u: &DVector<f64>,
    step: &DVector<f64>,
    current: &FreeEnergyEvaluation,
    options: &SolverOptions,
) -> Result<Option<(DVector<f64>, FreeEnergyEvaluation)>> {
    let slack = 1e-12 * current.gibbs_energy.abs().max(1.0);
    let mut alpha = options.damping;
    for _ in 0..=options.max_backtracks {
        let trial = u + step * alpha;
        let evaluation = functional.evaluate(&trial)?;
        let feasible = evaluation
            .cluster_variables
            .iter()
            .all(|cv| cv.iter().all(|&p| p > 0.0));
        if feasible && evaluation.gibbs_energy <= current.gibbs_energy + slack {
            return Ok(Some((trial, evaluation)));
        }
        alpha *= 0.5;
    }
    Ok(None)
}
