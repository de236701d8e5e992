//! Sampling of equations into point series.
//!
//! An equation is first analyzed (see [`analyzed`]) to find out how to sample it:
//!
//! - `y=f(x)` or `f(x)=y`: `x` is stepped across the sampling range and one point is emitted per
//!   step.
//! - `x=f(y)` or `f(y)=x`: same, with the roles of `x` and `y` swapped.
//! - anything else, such as `x^2+y^2=25`, is an implicit relation: for every `x` column, `y` is
//!   scanned from the top of the range down, and the first `y` at which both sides agree within a
//!   relative tolerance is emitted. This is a coarse heuristic, not a root finder; it finds at most
//!   one point per column.
//!
//! Sampling is done by the [`Sampler`](sampler::Sampler), which runs every request on the `rayon`
//! thread pool and cancels the previous request when a new one arrives.

pub mod analyzed;
mod eval;
pub mod opts;
pub mod point;
pub mod sampler;
