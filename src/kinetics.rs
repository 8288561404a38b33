//! Voltage-dependent rate functions of the Hodgkin-Huxley gates.
//!
//! The rate functions are written in the classic squid-axon convention, where the resting
//! potential is 0 mV and depolarization is positive. The [`Convention`] decides which
//! voltage baseline the membrane voltage is measured against before the functions are
//! evaluated.
//!
//! The expressions for `alpha_n` and `alpha_m` have removable singularities at 10 mV and 25 mV
//! (relative to rest). They are evaluated as written: at exactly these voltages the result is
//! NaN, which then propagates through the simulation.
use serde::{Deserialize, Serialize};

/// The voltage baseline of a parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Convention {
    /// Resting potential at 0 mV (Hodgkin and Huxley's original squid-axon measurements).
    #[default]
    SquidAxon,
    /// Resting potential at -65 mV.
    Physiological,
}

impl Convention {
    /// Returns the resting potential (in mV) of the convention.
    pub fn resting_potential(&self) -> f64 {
        match self {
            Convention::SquidAxon => 0.0,
            Convention::Physiological => -65.0,
        }
    }

    /// Evaluate the six rate constants at the given membrane voltage (in mV).
    pub fn rates(&self, vm: f64) -> RateConstants {
        RateConstants::at(vm - self.resting_potential())
    }
}

/// The rate constants (1/ms) of the n, m and h gates at a given voltage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateConstants {
    pub alpha_n: f64,
    pub beta_n: f64,
    pub alpha_m: f64,
    pub beta_m: f64,
    pub alpha_h: f64,
    pub beta_h: f64,
}

impl RateConstants {
    /// Evaluate all rate functions at the voltage `v` relative to rest.
    pub fn at(v: f64) -> Self {
        RateConstants {
            alpha_n: alpha_n(v),
            beta_n: beta_n(v),
            alpha_m: alpha_m(v),
            beta_m: beta_m(v),
            alpha_h: alpha_h(v),
            beta_h: beta_h(v),
        }
    }
}

/// Potassium activation opening rate.
pub fn alpha_n(v: f64) -> f64 {
    0.01 * ((10.0 - v) / (((10.0 - v) / 10.0).exp() - 1.0))
}

/// Potassium activation closing rate.
pub fn beta_n(v: f64) -> f64 {
    0.125 * (-v / 80.0).exp()
}

/// Sodium activation opening rate.
pub fn alpha_m(v: f64) -> f64 {
    0.1 * ((25.0 - v) / (((25.0 - v) / 10.0).exp() - 1.0))
}

/// Sodium activation closing rate.
pub fn beta_m(v: f64) -> f64 {
    4.0 * (-v / 18.0).exp()
}

/// Sodium inactivation opening rate.
pub fn alpha_h(v: f64) -> f64 {
    0.07 * (-v / 20.0).exp()
}

/// Sodium inactivation closing rate.
pub fn beta_h(v: f64) -> f64 {
    1.0 / (((30.0 - v) / 10.0).exp() + 1.0)
}
