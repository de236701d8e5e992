#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options to use when sampling an equation.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SamplerOptions {
    /// The `(min, max)` range, in graph units, sampled on both axes.
    ///
    /// The default value is `(-10.0, 10.0)`.
    pub range: (f64, f64),

    /// The distance between samples of an explicit equation, such as `y=2x`.
    ///
    /// The default value is `0.1`, which samples 201 points over the default range.
    pub step: f64,

    /// The distance between samples of an implicit relation, such as `x^2+y^2=25`, on both axes.
    ///
    /// The default value is `0.5`.
    pub implicit_step: f64,

    /// The relative tolerance within which both sides of an implicit relation are considered
    /// equal.
    ///
    /// The default value is `0.03`.
    pub tolerance: f64,
}

/// The default options for sampling. Returns a [`SamplerOptions`] with the following values:
///
/// - [`range`](SamplerOptions::range): `(-10.0, 10.0)`
/// - [`step`](SamplerOptions::step): `0.1`
/// - [`implicit_step`](SamplerOptions::implicit_step): `0.5`
/// - [`tolerance`](SamplerOptions::tolerance): `0.03`
impl Default for SamplerOptions {
    fn default() -> SamplerOptions {
        SamplerOptions {
            range: (-10.0, 10.0),
            step: 0.1,
            implicit_step: 0.5,
            tolerance: 0.03,
        }
    }
}

impl SamplerOptions {
    /// Set the sampled range. Returns an updated [`SamplerOptions`] for chaining.
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    /// Set the step of explicit equations. Returns an updated [`SamplerOptions`] for chaining.
    pub fn step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Set the step of implicit relations. Returns an updated [`SamplerOptions`] for chaining.
    pub fn implicit_step(mut self, implicit_step: f64) -> Self {
        self.implicit_step = implicit_step;
        self
    }

    /// Set the relative tolerance of implicit relations. Returns an updated [`SamplerOptions`] for
    /// chaining.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }
}
