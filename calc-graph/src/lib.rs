//! Curve sampling for calculator equations.
//!
//! When the display shows an equation in `x` and `y`, such as `y=2x` or `x^2+y^2=25`, the
//! [`Sampler`] turns it into a [`CurveSeries`] of `(x, y)` points on a background thread and hands
//! the series to a [`GraphSink`]. Drawing the series is up to the sink.

pub mod graph;

pub use graph::{
    analyzed::{AnalyzedEquation, Relation, Variable},
    opts::SamplerOptions,
    point::{CurveSeries, GraphPoint},
    sampler::{sample, Dispatch, GraphSink, Sampler},
};
