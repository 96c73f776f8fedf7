// Thermo module: free-energy functional and its minimisation

// ======================== MODULE DECLARATIONS ========================
pub mod free_energy;
pub mod linear_solve;
pub mod newton_raphson;

// Test modules
mod _tests_free_energy;

// ======================== FREE ENERGY ========================
pub use free_energy::{
    smoothed_entropy_term, // fn(p: f64) -> (f64, f64, f64) - p ln p with derivatives, Taylor-smoothed near zero
    FreeEnergyEvaluation,  // struct - G, H, S, gradient, Hessian and cluster variables at one point
    FreeEnergyFunctional,  // struct - G(u) for fixed T, composition and ECIs
};

// ======================== LINEAR ALGEBRA ========================
pub use linear_solve::solve_linear_system; // fn(a: &DMatrix<f64>, b: &DVector<f64>) -> Result<DVector<f64>>

// ======================== SOLVER ========================
pub use newton_raphson::{
    solve,              // fn(mole_fractions, temperature, eci, clusters, cfs, cmatrix, tolerance) -> Result<EquilibriumResult>
    solve_with_options, // fn(mole_fractions, temperature, eci, identification, cmatrix, options) -> Result<EquilibriumResult>
    sweep_temperatures, // fn(mole_fractions, temperatures, eci, identification, cmatrix, options) -> Result<Vec<EquilibriumResult>>
    EquilibriumResult,  // struct - equilibrium CFs, energies, iteration count, convergence flag
    SolverOptions,      // struct - tolerance, iteration cap, damping, backtracking limit
};
