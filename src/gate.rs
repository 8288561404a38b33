//! Module implementing the voltage-gated channel kinetics.
use serde::{Deserialize, Serialize};

/// Represents the open-probability kinetics of one voltage-gated channel.
///
/// The rate constants are set from the outside (see [`crate::model::HHModel`]); the gate only
/// knows how to relax its state towards them.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Gate {
    // Opening rate (1/ms).
    alpha: f64,
    // Closing rate (1/ms).
    beta: f64,
    // Open probability, expected to remain in [0, 1].
    state: f64,
}

impl Gate {
    /// Create a gate with the given open probability and zero rate constants.
    pub fn new(state: f64) -> Self {
        Gate {
            alpha: 0.0,
            beta: 0.0,
            state,
        }
    }

    /// Returns the opening rate constant (1/ms).
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Returns the closing rate constant (1/ms).
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Returns the open probability of the gate.
    pub fn state(&self) -> f64 {
        self.state
    }

    /// Set both rate constants of the gate.
    pub fn set_rates(&mut self, alpha: f64, beta: f64) {
        self.alpha = alpha;
        self.beta = beta;
    }

    /// Set the open probability of the gate. No range check is performed.
    pub fn set_state(&mut self, state: f64) {
        self.state = state;
    }

    /// Advance the state by one explicit Euler step of `ds/dt = alpha (1 - s) - beta s`.
    pub fn update(&mut self, delta_t_ms: f64) {
        let alpha_state = self.alpha * (1.0 - self.state);
        let beta_state = self.beta * self.state;
        self.state += delta_t_ms * (alpha_state - beta_state);
    }

    /// Returns the steady-state open probability for the current rate constants.
    /// The result is not finite if both rates vanish.
    pub fn steady_state(&self) -> f64 {
        self.alpha / (self.alpha + self.beta)
    }

    /// Move the gate to its steady-state open probability.
    pub fn set_steady_state(&mut self) {
        self.state = self.steady_state();
    }
}
