//! Simulation driver stepping a membrane against a stimulus and recording its trajectory.
//!
//! # Example
//! ```rust
//! use rusty_hh::model::HHModel;
//! use rusty_hh::simulation::Simulation;
//!
//! let mut simulation = Simulation::new(HHModel::default());
//!
//! // 100 ms of constant 10 µA/cm² stimulus, integrated with 0.05 ms steps
//! let result = simulation.run_constant(10.0, 100.0, 0.05).unwrap();
//! assert_eq!(result.len(), 2000);
//! assert!(result.peak_voltage().unwrap() > 80.0);
//! ```
use itertools::{izip, Itertools};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::HHError;
use crate::model::{HHModel, MembraneParameters};
use crate::{MAX_NUM_STEPS, MAX_STABLE_STEP_SIZE, PROGRESS_INTERVAL};

/// The recorded trajectory of a simulation run.
///
/// All sequences have the same length and are index-aligned: sample `i` holds the state of the
/// membrane after step `i`, at time `times[i] = i * step_size`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SimulationResult {
    step_size: f64,
    /// Sample times (ms).
    pub times: Vec<f64>,
    /// Membrane voltage (mV).
    pub vm: Vec<f64>,
    /// Sodium current (µA/cm²).
    pub i_na: Vec<f64>,
    /// Potassium current (µA/cm²).
    pub i_k: Vec<f64>,
    /// Leak current (µA/cm²).
    pub i_leak: Vec<f64>,
    /// Potassium activation open probability.
    pub state_n: Vec<f64>,
    /// Sodium activation open probability.
    pub state_m: Vec<f64>,
    /// Sodium inactivation open probability.
    pub state_h: Vec<f64>,
}

impl SimulationResult {
    /// Create an empty result with room for exactly `count` samples.
    fn with_capacity(count: usize, step_size: f64) -> Self {
        SimulationResult {
            step_size,
            times: (0..count).map(|i| i as f64 * step_size).collect(),
            vm: Vec::with_capacity(count),
            i_na: Vec::with_capacity(count),
            i_k: Vec::with_capacity(count),
            i_leak: Vec::with_capacity(count),
            state_n: Vec::with_capacity(count),
            state_m: Vec::with_capacity(count),
            state_h: Vec::with_capacity(count),
        }
    }

    fn record(&mut self, model: &HHModel) {
        let currents = model.currents();
        self.vm.push(model.vm());
        self.i_na.push(currents.na);
        self.i_k.push(currents.k);
        self.i_leak.push(currents.leak);
        self.state_n.push(model.n().state());
        self.state_m.push(model.m().state());
        self.state_h.push(model.h().state());
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns true if the run had no steps.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Returns the integration step size (ms) of the run.
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Returns the highest recorded voltage, ignoring NaN samples, or None for an empty run.
    pub fn peak_voltage(&self) -> Option<f64> {
        self.vm
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .reduce(f64::max)
    }

    /// Returns the times at which the voltage crosses the threshold upwards.
    pub fn spike_times(&self, threshold: f64) -> Vec<f64> {
        self.times
            .iter()
            .zip(&self.vm)
            .tuple_windows()
            .filter(|&((_, &v0), (_, &v1))| v0 < threshold && v1 >= threshold)
            .map(|(_, (&t1, _))| t1)
            .collect()
    }

    /// Returns the voltage trace shifted by the given offset, e.g., -70 mV to display a
    /// squid-axon trace around a physiological resting potential.
    pub fn shifted_voltage(&self, offset: f64) -> Vec<f64> {
        self.vm.iter().map(|v| v + offset).collect()
    }

    /// Returns the sodium conductance trace `g_na m³ h` (mS/cm²).
    pub fn sodium_conductance(&self, parameters: &MembraneParameters) -> Vec<f64> {
        izip!(&self.state_m, &self.state_h)
            .map(|(m, h)| parameters.g_na * m.powi(3) * h)
            .collect()
    }

    /// Returns the potassium conductance trace `g_k n⁴` (mS/cm²).
    pub fn potassium_conductance(&self, parameters: &MembraneParameters) -> Vec<f64> {
        self.state_n
            .iter()
            .map(|n| parameters.g_k * n.powi(4))
            .collect()
    }

    /// Save the result to a JSON file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), HHError> {
        let file = File::create(path).map_err(|e| HHError::IOError(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|e| HHError::IOError(e.to_string()))?;
        writer.flush().map_err(|e| HHError::IOError(e.to_string()))
    }

    /// Load a result from a JSON file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, HHError> {
        let file = File::open(path).map_err(|e| HHError::IOError(e.to_string()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| HHError::IOError(e.to_string()))
    }
}

/// Check the integration step size (ms).
/// The function returns an error for non-positive or non-finite step sizes, and warns about
/// step sizes too large for the explicit Euler scheme to remain stable.
pub fn check_step_size(step_size_ms: f64) -> Result<(), HHError> {
    if !(step_size_ms > 0.0 && step_size_ms.is_finite()) {
        return Err(HHError::InvalidStepSize(step_size_ms));
    }
    if step_size_ms > MAX_STABLE_STEP_SIZE {
        warn!(
            "Step size of {} ms exceeds {} ms: the integration may become unstable",
            step_size_ms, MAX_STABLE_STEP_SIZE
        );
    }
    Ok(())
}

/// Returns the number of steps `round(duration / step_size)` covering the given duration (ms).
/// The function returns an error for negative or non-finite durations, invalid step sizes, and
/// step counts above `MAX_NUM_STEPS`.
pub fn num_steps(duration_ms: f64, step_size_ms: f64) -> Result<usize, HHError> {
    if !(duration_ms >= 0.0 && duration_ms.is_finite()) {
        return Err(HHError::InvalidDuration(duration_ms));
    }
    check_step_size(step_size_ms)?;

    let count = (duration_ms / step_size_ms).round();
    if !(count <= MAX_NUM_STEPS as f64) {
        return Err(HHError::TooManySteps {
            duration: duration_ms,
            step_size: step_size_ms,
        });
    }
    Ok(count as usize)
}

/// Drives a membrane model through a stimulus and records its trajectory.
///
/// The model is owned by the simulation and keeps its state between runs: a second run starts
/// where the previous one ended.
#[derive(Debug, Clone)]
pub struct Simulation {
    model: HHModel,
    result: SimulationResult,
}

impl Simulation {
    /// Create a new simulation driving the given model.
    pub fn new(model: HHModel) -> Self {
        Simulation {
            model,
            result: SimulationResult::default(),
        }
    }

    /// Returns the driven model.
    pub fn model(&self) -> &HHModel {
        &self.model
    }

    /// Returns a mutable reference to the driven model, e.g., to change parameters between runs.
    pub fn model_mut(&mut self) -> &mut HHModel {
        &mut self.model
    }

    /// Consume the simulation and return the driven model.
    pub fn into_model(self) -> HHModel {
        self.model
    }

    /// Returns the result of the last run.
    pub fn result(&self) -> &SimulationResult {
        &self.result
    }

    /// Consume the simulation and return the result of the last run.
    pub fn into_result(self) -> SimulationResult {
        self.result
    }

    /// Run one step per stimulus sample (µA/cm²), with the given step size (ms).
    /// The function returns an error for invalid step sizes, before any step is taken.
    pub fn run_waveform(
        &mut self,
        stimulus: &[f64],
        step_size_ms: f64,
    ) -> Result<&SimulationResult, HHError> {
        check_step_size(step_size_ms)?;
        self.run_with(stimulus.len(), step_size_ms, |i| stimulus[i]);
        Ok(&self.result)
    }

    /// Run with a constant stimulus current (µA/cm²) for the given duration (ms), with the given
    /// step size (ms). The number of steps is `round(duration / step_size)`.
    /// The function returns an error for invalid durations or step sizes, before any step is
    /// taken.
    pub fn run_constant(
        &mut self,
        current: f64,
        duration_ms: f64,
        step_size_ms: f64,
    ) -> Result<&SimulationResult, HHError> {
        let count = num_steps(duration_ms, step_size_ms)?;
        self.run_with(count, step_size_ms, |_| current);
        Ok(&self.result)
    }

    fn run_with<F>(&mut self, count: usize, step_size_ms: f64, stimulus: F)
    where
        F: Fn(usize) -> f64,
    {
        debug!("Simulating {} steps of {} ms", count, step_size_ms);
        self.result = SimulationResult::with_capacity(count, step_size_ms);
        for i in 0..count {
            if i > 1 && i % PROGRESS_INTERVAL == 0 {
                debug!("Simulating... {}%", 100 * (i + 1) / count);
            }
            self.model.iterate(stimulus(i), step_size_ms);
            self.result.record(&self.model);
        }
        info!("Simulation of {} steps complete", count);
    }
}
