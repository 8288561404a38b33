//! Error module for the Rusty HH library.
use std::error::Error;
use std::fmt;

use crate::{MAX_NUM_STEPS, MAX_STABLE_STEP_SIZE};

/// Error types for the library.
#[derive(Debug, PartialEq)]
pub enum HHError {
    /// Error for a non-positive or non-finite integration step size (in ms).
    InvalidStepSize(f64),
    /// Error for a negative or non-finite simulation duration (in ms).
    InvalidDuration(f64),
    /// Error for a duration (in ms) requiring more than `MAX_NUM_STEPS` steps of the given size.
    TooManySteps { duration: f64, step_size: f64 },
    /// Error for invalid membrane parameters, e.g., a non-positive capacitance.
    InvalidParameter(String),
    /// Error for an ill-formed stimulus waveform, e.g., a pulse ending before it starts.
    InvalidStimulus(String),
    /// Error for I/O operations.
    IOError(String),
}

impl fmt::Display for HHError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HHError::InvalidStepSize(dt) => write!(
                f,
                "Invalid step size: {} ms (must be positive and finite, at most {} ms recommended)",
                dt, MAX_STABLE_STEP_SIZE
            ),
            HHError::InvalidDuration(duration) => write!(
                f,
                "Invalid duration: {} ms (must be non-negative and finite)",
                duration
            ),
            HHError::TooManySteps {
                duration,
                step_size,
            } => write!(
                f,
                "Too many steps: {} ms with steps of {} ms exceeds {} steps",
                duration, step_size, MAX_NUM_STEPS
            ),
            HHError::InvalidParameter(e) => write!(f, "Invalid parameters: {}", e),
            HHError::InvalidStimulus(e) => write!(f, "Invalid stimulus: {}", e),
            HHError::IOError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl Error for HHError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            HHError::InvalidDuration(-1.0).to_string(),
            "Invalid duration: -1 ms (must be non-negative and finite)"
        );
        assert_eq!(
            HHError::InvalidParameter("capacitance must be positive".to_string()).to_string(),
            "Invalid parameters: capacitance must be positive"
        );
        assert!(HHError::InvalidStepSize(0.0).to_string().starts_with("Invalid step size: 0 ms"));
        assert_eq!(
            HHError::TooManySteps {
                duration: 1.0,
                step_size: 1e-9
            }
            .to_string(),
            "Too many steps: 1 ms with steps of 0.000000001 ms exceeds 100000000 steps"
        );
    }
}
