//! This module provides the `HHModel` structure, a single-compartment Hodgkin-Huxley membrane.
use serde::{Deserialize, Serialize};

use super::error::HHError;
use super::gate::Gate;
use super::kinetics::Convention;

/// The channel parameters of a membrane.
///
/// The reversal potentials must match the [`Convention`] used to evaluate the rate functions,
/// which is why the convention is part of the parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MembraneParameters {
    /// The voltage baseline of the rate functions and reversal potentials.
    pub convention: Convention,
    /// Maximal sodium conductance (mS/cm²).
    pub g_na: f64,
    /// Maximal potassium conductance (mS/cm²).
    pub g_k: f64,
    /// Leak conductance (mS/cm²).
    pub g_leak: f64,
    /// Sodium reversal potential (mV).
    pub e_na: f64,
    /// Potassium reversal potential (mV).
    pub e_k: f64,
    /// Leak reversal potential (mV).
    pub e_leak: f64,
    /// Membrane capacitance (µF/cm²).
    pub c_m: f64,
}

impl MembraneParameters {
    /// The squid-axon parameter set, with the resting potential at 0 mV.
    pub fn squid_axon() -> Self {
        MembraneParameters {
            convention: Convention::SquidAxon,
            g_na: 120.0,
            g_k: 36.0,
            g_leak: 0.3,
            e_na: 115.0,
            e_k: -12.0,
            e_leak: 10.6,
            c_m: 1.0,
        }
    }

    /// The physiological parameter set, with the resting potential near -65 mV.
    pub fn physiological() -> Self {
        MembraneParameters {
            convention: Convention::Physiological,
            e_na: 50.0,
            e_k: -77.0,
            e_leak: -54.387,
            ..Self::squid_axon()
        }
    }

    /// Check that the parameters describe a physical membrane.
    /// The function returns an error for non-finite values, negative conductances or a
    /// non-positive capacitance.
    pub fn validate(&self) -> Result<(), HHError> {
        let values = [
            self.g_na,
            self.g_k,
            self.g_leak,
            self.e_na,
            self.e_k,
            self.e_leak,
            self.c_m,
        ];
        if values.iter().any(|value| !value.is_finite()) {
            return Err(HHError::InvalidParameter(
                "Membrane parameters must be finite".to_string(),
            ));
        }
        if self.g_na < 0.0 || self.g_k < 0.0 || self.g_leak < 0.0 {
            return Err(HHError::InvalidParameter(
                "Conductances must be non-negative".to_string(),
            ));
        }
        if self.c_m <= 0.0 {
            return Err(HHError::InvalidParameter(
                "Membrane capacitance must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for MembraneParameters {
    fn default() -> Self {
        Self::squid_axon()
    }
}

/// The channel currents (µA/cm²) computed during a step.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Currents {
    pub na: f64,
    pub k: f64,
    pub leak: f64,
}

impl Currents {
    /// Returns the total ionic current.
    pub fn total(&self) -> f64 {
        self.na + self.k + self.leak
    }
}

/// A Hodgkin-Huxley membrane tracking the conductances of three channels to compute the
/// membrane voltage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HHModel {
    parameters: MembraneParameters,
    // Membrane voltage (mV).
    vm: f64,
    // Sodium activation.
    m: Gate,
    // Sodium inactivation.
    h: Gate,
    // Potassium activation.
    n: Gate,
    // Currents of the last step.
    currents: Currents,
}

impl HHModel {
    /// Create a model at the given voltage (in mV), with all gates at their steady state.
    /// The function returns an error if the parameters are invalid or the voltage is not finite.
    pub fn build(parameters: MembraneParameters, starting_voltage: f64) -> Result<Self, HHError> {
        parameters.validate()?;
        if !starting_voltage.is_finite() {
            return Err(HHError::InvalidParameter(
                "Starting voltage must be finite".to_string(),
            ));
        }

        Ok(Self::new_unchecked(parameters, starting_voltage))
    }

    fn new_unchecked(parameters: MembraneParameters, starting_voltage: f64) -> Self {
        let mut model = HHModel {
            parameters,
            vm: starting_voltage,
            m: Gate::default(),
            h: Gate::default(),
            n: Gate::default(),
            currents: Currents::default(),
        };
        model.set_steady_state();
        model
    }

    /// Create a model at the resting potential of its convention, with all gates at their
    /// steady state.
    pub fn at_rest(parameters: MembraneParameters) -> Result<Self, HHError> {
        Self::build(parameters, parameters.convention.resting_potential())
    }

    /// Returns the membrane parameters.
    pub fn parameters(&self) -> &MembraneParameters {
        &self.parameters
    }

    /// Returns a mutable reference to the membrane parameters.
    /// Changes take effect from the next step on.
    pub fn parameters_mut(&mut self) -> &mut MembraneParameters {
        &mut self.parameters
    }

    /// Returns the membrane voltage (in mV).
    pub fn vm(&self) -> f64 {
        self.vm
    }

    /// Set the membrane voltage (in mV). The gates are left untouched.
    pub fn set_vm(&mut self, vm: f64) {
        self.vm = vm;
    }

    /// Returns the potassium activation gate.
    pub fn n(&self) -> &Gate {
        &self.n
    }

    /// Returns the sodium activation gate.
    pub fn m(&self) -> &Gate {
        &self.m
    }

    /// Returns the sodium inactivation gate.
    pub fn h(&self) -> &Gate {
        &self.h
    }

    /// Set the open probabilities of the n, m and h gates.
    pub fn set_gate_states(&mut self, n: f64, m: f64, h: f64) {
        self.n.set_state(n);
        self.m.set_state(m);
        self.h.set_state(h);
    }

    /// Move every gate to its steady state at the current membrane voltage.
    pub fn set_steady_state(&mut self) {
        self.update_gate_rates();
        self.n.set_steady_state();
        self.m.set_steady_state();
        self.h.set_steady_state();
    }

    /// Returns the channel currents computed during the last step.
    pub fn currents(&self) -> Currents {
        self.currents
    }

    /// Returns the sodium current of the last step (µA/cm²).
    pub fn i_na(&self) -> f64 {
        self.currents.na
    }

    /// Returns the potassium current of the last step (µA/cm²).
    pub fn i_k(&self) -> f64 {
        self.currents.k
    }

    /// Returns the leak current of the last step (µA/cm²).
    pub fn i_leak(&self) -> f64 {
        self.currents.leak
    }

    /// Advance the membrane by one explicit Euler step and return the new voltage.
    ///
    /// Everything is computed from the state at the beginning of the step before anything is
    /// committed: the voltage integrates the currents of the pre-step gate states, and the gates
    /// relax with the rate constants of the pre-step voltage.
    pub fn iterate(&mut self, stimulus_current: f64, delta_t_ms: f64) -> f64 {
        self.update_gate_rates();
        self.currents = self.channel_currents();

        let i_sum = stimulus_current - self.currents.na - self.currents.k - self.currents.leak;
        self.vm += delta_t_ms * i_sum / self.parameters.c_m;

        self.n.update(delta_t_ms);
        self.m.update(delta_t_ms);
        self.h.update(delta_t_ms);

        self.vm
    }

    /// Set the rate constants of all gates from the current membrane voltage.
    fn update_gate_rates(&mut self) {
        let rates = self.parameters.convention.rates(self.vm);
        self.n.set_rates(rates.alpha_n, rates.beta_n);
        self.m.set_rates(rates.alpha_m, rates.beta_m);
        self.h.set_rates(rates.alpha_h, rates.beta_h);
    }

    /// Compute the channel currents from the current gate states and membrane voltage.
    fn channel_currents(&self) -> Currents {
        let p = &self.parameters;
        Currents {
            na: self.m.state().powi(3) * p.g_na * self.h.state() * (self.vm - p.e_na),
            k: self.n.state().powi(4) * p.g_k * (self.vm - p.e_k),
            leak: p.g_leak * (self.vm - p.e_leak),
        }
    }
}

impl Default for HHModel {
    fn default() -> Self {
        let parameters = MembraneParameters::default();
        Self::new_unchecked(parameters, parameters.convention.resting_potential())
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::kinetics::RateConstants;

    #[test]
    fn test_default_parameters() {
        let parameters = MembraneParameters::default();
        assert_eq!(parameters.convention, Convention::SquidAxon);
        assert_eq!(parameters.g_na, 120.0);
        assert_eq!(parameters.g_k, 36.0);
        assert_eq!(parameters.g_leak, 0.3);
        assert_eq!(parameters.e_na, 115.0);
        assert_eq!(parameters.e_k, -12.0);
        assert_eq!(parameters.e_leak, 10.6);
        assert_eq!(parameters.c_m, 1.0);
    }

    #[test]
    fn test_invalid_parameters() {
        let mut parameters = MembraneParameters::default();
        parameters.c_m = 0.0;
        assert_eq!(
            HHModel::build(parameters, 0.0),
            Err(HHError::InvalidParameter(
                "Membrane capacitance must be positive".to_string()
            ))
        );

        let mut parameters = MembraneParameters::default();
        parameters.g_k = -1.0;
        assert!(HHModel::build(parameters, 0.0).is_err());

        let mut parameters = MembraneParameters::default();
        parameters.e_na = f64::NAN;
        assert!(HHModel::build(parameters, 0.0).is_err());

        assert!(HHModel::build(MembraneParameters::default(), f64::INFINITY).is_err());
    }

    #[test]
    fn test_all_gates_start_at_steady_state() {
        let model = HHModel::default();
        let rates = RateConstants::at(0.0);
        assert_eq!(model.vm(), 0.0);
        assert_relative_eq!(model.n().state(), rates.alpha_n / (rates.alpha_n + rates.beta_n));
        assert_relative_eq!(model.m().state(), rates.alpha_m / (rates.alpha_m + rates.beta_m));
        assert_relative_eq!(model.h().state(), rates.alpha_h / (rates.alpha_h + rates.beta_h));
        assert_eq!(model, HHModel::at_rest(MembraneParameters::default()).unwrap());
    }

    #[test]
    fn test_independent_instances() {
        let mut first = HHModel::default();
        let second = HHModel::default();
        first.set_gate_states(1.0, 1.0, 1.0);
        first.iterate(50.0, 0.01);
        assert_ne!(first.n(), second.n());
        assert_eq!(second, HHModel::default());
    }

    #[test]
    fn test_iterate_uses_pre_step_state() {
        let mut model = HHModel::build(MembraneParameters::default(), 5.0).unwrap();
        model.set_gate_states(0.4, 0.2, 0.6);

        let p = MembraneParameters::default();
        let rates = RateConstants::at(5.0);
        let i_na = 0.2_f64.powi(3) * p.g_na * 0.6 * (5.0 - p.e_na);
        let i_k = 0.4_f64.powi(4) * p.g_k * (5.0 - p.e_k);
        let i_leak = p.g_leak * (5.0 - p.e_leak);
        let vm = 5.0 + 0.05 * (3.0 - i_na - i_k - i_leak) / p.c_m;
        let n = 0.4 + 0.05 * (rates.alpha_n * 0.6 - rates.beta_n * 0.4);
        let m = 0.2 + 0.05 * (rates.alpha_m * 0.8 - rates.beta_m * 0.2);
        let h = 0.6 + 0.05 * (rates.alpha_h * 0.4 - rates.beta_h * 0.6);

        assert_relative_eq!(model.iterate(3.0, 0.05), vm, max_relative = 1e-12);
        assert_relative_eq!(model.vm(), vm, max_relative = 1e-12);
        assert_relative_eq!(model.i_na(), i_na, max_relative = 1e-12);
        assert_relative_eq!(model.i_k(), i_k, max_relative = 1e-12);
        assert_relative_eq!(model.i_leak(), i_leak, max_relative = 1e-12);
        assert_relative_eq!(model.n().state(), n, max_relative = 1e-12);
        assert_relative_eq!(model.m().state(), m, max_relative = 1e-12);
        assert_relative_eq!(model.h().state(), h, max_relative = 1e-12);
        assert_relative_eq!(model.n().alpha(), rates.alpha_n);
    }

    #[test]
    fn test_steady_state_step() {
        let mut model = HHModel::default();
        let vm = model.iterate(0.0, 0.05);
        assert!(vm.abs() < 1e-4);
        assert!(model.currents().total().abs() < 1e-3);
    }

    #[test]
    fn test_capacitance_scales_voltage_change() {
        let mut fast = HHModel::default();
        let mut parameters = MembraneParameters::default();
        parameters.c_m = 2.0;
        let mut slow = HHModel::at_rest(parameters).unwrap();

        let dv_fast = fast.iterate(10.0, 0.01);
        let dv_slow = slow.iterate(10.0, 0.01);
        assert_relative_eq!(dv_fast, 2.0 * dv_slow, max_relative = 1e-12);
    }

    #[test]
    fn test_degenerate_voltage_propagates_nan() {
        let mut model = HHModel::default();
        model.set_vm(10.0);
        model.iterate(0.0, 0.01);
        assert!(model.n().state().is_nan());
        model.iterate(0.0, 0.01);
        assert!(model.vm().is_nan());
    }

    #[test]
    fn test_physiological_rest() {
        let mut model = HHModel::at_rest(MembraneParameters::physiological()).unwrap();
        assert_eq!(model.vm(), -65.0);
        for _ in 0..8000 {
            model.iterate(0.0, 0.05);
        }
        assert_relative_eq!(model.vm(), -65.0, epsilon = 0.05);
    }
}
