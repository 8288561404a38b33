//! Stimulus waveforms sampled on the simulation time grid.
//!
//! # Example
//! ```rust
//! use rusty_hh::stimulus::Stimulus;
//!
//! // 250 ms of stimulus with a 20 µA/cm² square pulse between 60 ms and 190 ms
//! let mut stimulus = Stimulus::build(250.0, 0.05).unwrap();
//! stimulus.pulse(60.0, 190.0, 20.0).unwrap();
//!
//! assert_eq!(stimulus.len(), 5000);
//! assert_eq!(stimulus.values()[1199], 0.0);
//! assert_eq!(stimulus.values()[1200], 20.0);
//! assert_eq!(stimulus.values()[3800], 0.0);
//! ```
use crate::error::HHError;
use crate::simulation::num_steps;

/// A stimulus current waveform (µA/cm²), one sample per integration step.
#[derive(Debug, Clone, PartialEq)]
pub struct Stimulus {
    step_size: f64,
    values: Vec<f64>,
}

impl Stimulus {
    /// Create a zero stimulus covering the given duration (ms), sampled every `step_size_ms`.
    /// The number of samples is `round(duration / step_size)`.
    pub fn build(duration_ms: f64, step_size_ms: f64) -> Result<Self, HHError> {
        let count = num_steps(duration_ms, step_size_ms)?;
        Ok(Stimulus {
            step_size: step_size_ms,
            values: vec![0.0; count],
        })
    }

    /// Set the stimulus to `amplitude` on the samples from `start_ms` (included) to `end_ms`
    /// (excluded). Bounds are rounded to the nearest sample and the pulse is clipped to the
    /// waveform.
    /// The function returns an error for non-finite bounds, a negative start or a pulse ending
    /// before it starts.
    pub fn pulse(
        &mut self,
        start_ms: f64,
        end_ms: f64,
        amplitude: f64,
    ) -> Result<&mut Self, HHError> {
        if !(start_ms.is_finite() && end_ms.is_finite()) {
            return Err(HHError::InvalidStimulus(
                "Pulse bounds must be finite".to_string(),
            ));
        }
        if start_ms < 0.0 || end_ms < start_ms {
            return Err(HHError::InvalidStimulus(format!(
                "Invalid pulse from {} ms to {} ms",
                start_ms, end_ms
            )));
        }

        let start = self.index_of(start_ms);
        let end = self.index_of(end_ms);
        if start < end {
            self.values[start..end].fill(amplitude);
        }
        Ok(self)
    }

    /// Add `amplitude` to every sample strictly after `onset_ms`.
    pub fn step(&mut self, onset_ms: f64, amplitude: f64) -> &mut Self {
        let step_size = self.step_size;
        self.values
            .iter_mut()
            .enumerate()
            .filter(|(i, _)| *i as f64 * step_size > onset_ms)
            .for_each(|(_, value)| *value += amplitude);
        self
    }

    fn index_of(&self, time_ms: f64) -> usize {
        ((time_ms / self.step_size).round() as usize).min(self.values.len())
    }

    /// Returns the samples of the waveform.
    pub fn values(&self) -> &[f64] {
        &self.values[..]
    }

    /// Consume the stimulus and return its samples.
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the waveform has no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the sampling step (ms).
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Returns the sample times (ms).
    pub fn times(&self) -> Vec<f64> {
        (0..self.values.len())
            .map(|i| i as f64 * self.step_size)
            .collect()
    }
}
