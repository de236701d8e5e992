use calc_compute::Scope;
use super::{
    analyzed::{AnalyzedEquation, Relation, Variable},
    opts::SamplerOptions,
    point::GraphPoint,
};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Returns `from`, `from ± step`, ... up to and including `to` (within rounding error), moving
/// towards `to`.
///
/// Positions are computed by multiplication rather than repeated addition, so the number of
/// positions does not depend on accumulated rounding error.
pub(crate) fn steps(from: f64, to: f64, step: f64) -> impl Iterator<Item = f64> {
    let step = step.abs();
    let count = if step > 0.0 && from.is_finite() && to.is_finite() {
        ((to - from).abs() / step + 1e-9).floor() as usize
    } else {
        0
    };
    let direction = if to < from { -1.0 } else { 1.0 };
    (0..=count).map(move |i| from + direction * i as f64 * step)
}

/// Returns true if both sides of an implicit relation are within the relative `tolerance` of each
/// other.
///
/// When both sides are negative, multiplying by `1 - tolerance` moves the left side *up*, so the
/// comparison is flipped to keep the window around the left side.
pub fn within_tolerance(lhs: f64, rhs: f64, tolerance: f64) -> bool {
    let low = lhs * (1.0 - tolerance);
    let high = lhs * (1.0 + tolerance);
    if lhs < 0.0 && rhs < 0.0 {
        low >= rhs && high <= rhs
    } else {
        low <= rhs && high >= rhs
    }
}

/// Evaluate the given equation and returns the points to draw.
///
/// Returns [`None`] if the token was cancelled before sampling finished. The token is checked
/// before every sample. Samples that fail to evaluate are logged and skipped.
pub(crate) fn evaluate_equation(
    analyzed: &AnalyzedEquation,
    options: &SamplerOptions,
    token: &CancellationToken,
) -> Option<Vec<GraphPoint<f64>>> {
    match &analyzed.relation {
        Relation::Explicit { independent, body } => evaluate_explicit(*independent, body, options, token),
        Relation::Implicit { lhs, rhs } => evaluate_implicit(lhs, rhs, options, token),
    }
}

/// Samples an equation with a variable by itself on one side.
fn evaluate_explicit(
    independent: Variable,
    body: &str,
    options: &SamplerOptions,
    token: &CancellationToken,
) -> Option<Vec<GraphPoint<f64>>> {
    let mut scope = Scope::new();
    let mut points = Vec::new();

    let compiled = match scope.compile(body) {
        Ok(compiled) => compiled,
        Err(err) => {
            debug!(body, error = %err, "equation body does not compile");
            return Some(points);
        },
    };

    for trace in steps(options.range.0, options.range.1, options.step) {
        if token.is_cancelled() {
            return None;
        }

        match scope.call(&compiled, independent.as_str(), trace) {
            Ok(value) => points.push(match independent {
                Variable::X => (trace, value).into(),
                Variable::Y => (value, trace).into(),
            }),
            Err(err) => debug!(trace, error = %err, "skipping sample"),
        }
    }

    Some(points)
}

/// Samples an implicit relation, finding at most one point per `x` column.
fn evaluate_implicit(
    lhs: &str,
    rhs: &str,
    options: &SamplerOptions,
    token: &CancellationToken,
) -> Option<Vec<GraphPoint<f64>>> {
    let mut scope = Scope::new();
    let mut points = Vec::new();

    let (lhs, rhs) = match (scope.compile(lhs), scope.compile(rhs)) {
        (Ok(lhs), Ok(rhs)) => (lhs, rhs),
        (Err(err), _) | (_, Err(err)) => {
            debug!(error = %err, "relation does not compile");
            return Some(points);
        },
    };

    let (min, max) = options.range;
    for x in steps(min, max, options.implicit_step) {
        for y in steps(max, min, options.implicit_step) {
            if token.is_cancelled() {
                return None;
            }

            scope.define("x", x).define("y", y);
            let sides = scope.eval_compiled(&lhs)
                .and_then(|left| scope.eval_compiled(&rhs).map(|right| (left, right)));
            match sides {
                Ok((left, right)) => {
                    if within_tolerance(left, right, options.tolerance) {
                        points.push(GraphPoint(x, y));
                        break;
                    }
                },
                Err(err) => debug!(x, y, error = %err, "skipping sample"),
            }
        }
    }

    Some(points)
}
