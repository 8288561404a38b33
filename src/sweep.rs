//! Parallel sweeps over independent simulations.
//!
//! Every simulation of a sweep owns its own model, built at rest from the shared parameters, so
//! the runs can be distributed over threads without sharing any mutable state.
use rayon::prelude::*;

use crate::error::HHError;
use crate::model::{HHModel, MembraneParameters};
use crate::simulation::{num_steps, Simulation, SimulationResult};

/// Run one simulation per constant current (µA/cm²) for the given duration (ms) and step size
/// (ms). The results are returned in the order of the currents.
pub fn constant_current_sweep(
    parameters: &MembraneParameters,
    currents: &[f64],
    duration_ms: f64,
    step_size_ms: f64,
) -> Result<Vec<SimulationResult>, HHError> {
    parameters.validate()?;
    num_steps(duration_ms, step_size_ms)?;

    currents
        .par_iter()
        .map(|&current| -> Result<SimulationResult, HHError> {
            let mut simulation = Simulation::new(HHModel::at_rest(*parameters)?);
            simulation.run_constant(current, duration_ms, step_size_ms)?;
            Ok(simulation.into_result())
        })
        .collect()
}

/// Run one simulation per step size (ms) with the same constant current (µA/cm²) and duration
/// (ms). The results are returned in the order of the step sizes.
pub fn step_size_sweep(
    parameters: &MembraneParameters,
    current: f64,
    duration_ms: f64,
    step_sizes_ms: &[f64],
) -> Result<Vec<SimulationResult>, HHError> {
    parameters.validate()?;
    for &step_size_ms in step_sizes_ms {
        num_steps(duration_ms, step_size_ms)?;
    }

    step_sizes_ms
        .par_iter()
        .map(|&step_size_ms| -> Result<SimulationResult, HHError> {
            let mut simulation = Simulation::new(HHModel::at_rest(*parameters)?);
            simulation.run_constant(current, duration_ms, step_size_ms)?;
            Ok(simulation.into_result())
        })
        .collect()
}
