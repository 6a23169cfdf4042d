//! Frame timing.

use std::fmt;
use std::ops::Mul;

/// Elapsed time for one simulation step, in seconds.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct Timestep(f32);

impl Timestep {
    /// Creates a timestep from seconds.
    #[must_use]
    pub const fn from_seconds(seconds: f32) -> Self {
        Self(seconds)
    }

    /// Creates a timestep from milliseconds.
    #[must_use]
    pub fn from_millis(millis: f32) -> Self {
        Self(millis / 1000.0)
    }

    /// Returns the step in seconds.
    #[must_use]
    pub const fn seconds(self) -> f32 {
        self.0
    }

    /// Returns the step in milliseconds.
    #[must_use]
    pub fn milliseconds(self) -> f32 {
        self.0 * 1000.0
    }
}

impl From<f32> for Timestep {
    fn from(seconds: f32) -> Self {
        Self(seconds)
    }
}

impl Mul<f32> for Timestep {
    type Output = f32;

    fn mul(self, rhs: f32) -> f32 {
        self.0 * rhs
    }
}

impl fmt::Display for Timestep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}ms", self.milliseconds())
    }
}
