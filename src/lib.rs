//! This crate provides tools for simulating the membrane of a single neuron with the
//! Hodgkin-Huxley model in Rust.
//!
//! # Creating Models
//!
//! ## With the Classic Parameters
//!
//! ```rust
//! use rusty_hh::model::HHModel;
//!
//! // A squid-axon membrane at rest (0 mV), with all gates at their steady state
//! let model = HHModel::default();
//! assert_eq!(model.vm(), 0.0);
//! ```
//!
//! ## With Custom Parameters
//!
//! ```rust
//! use rusty_hh::model::{HHModel, MembraneParameters};
//!
//! // A physiological membrane (resting near -65 mV) with a reduced potassium conductance
//! let mut parameters = MembraneParameters::physiological();
//! parameters.g_k = 30.0;
//! let model = HHModel::at_rest(parameters).unwrap();
//! assert_eq!(model.vm(), -65.0);
//! ```
//!
//! # Simulating Models
//!
//! ```rust
//! use rusty_hh::model::HHModel;
//! use rusty_hh::simulation::Simulation;
//! use rusty_hh::stimulus::Stimulus;
//!
//! // A 20 µA/cm² square pulse from 60 ms to 190 ms, sampled every 0.05 ms
//! let mut stimulus = Stimulus::build(250.0, 0.05).unwrap();
//! stimulus.pulse(60.0, 190.0, 20.0).unwrap();
//!
//! // Run the model against the stimulus
//! let mut simulation = Simulation::new(HHModel::default());
//! let result = simulation.run_waveform(stimulus.values(), 0.05).unwrap();
//!
//! // The neuron fires repeatedly during the pulse only
//! let spikes = result.spike_times(50.0);
//! assert!(spikes.len() > 1);
//! assert!(spikes.iter().all(|&t| t > 60.0 && t < 200.0));
//! ```

pub mod error;
pub mod gate;
pub mod kinetics;
pub mod model;
pub mod simulation;
pub mod stimulus;
pub mod sweep;

/// The largest step size (ms) for which the explicit Euler integration is considered stable.
/// Larger step sizes are accepted with a warning.
pub const MAX_STABLE_STEP_SIZE: f64 = 0.05;
/// The largest number of steps (and recorded samples) of a single simulation run.
pub const MAX_NUM_STEPS: usize = 100_000_000;
/// The number of steps between two progress messages of a simulation run.
pub const PROGRESS_INTERVAL: usize = 1000;
