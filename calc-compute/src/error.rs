//! The kinds of errors that can occur while evaluating a calculator expression.
//!
//! Every kind collapses to the same error token on the display; the distinction only matters for
//! diagnostics.

use ariadne::{Fmt, Report};
use calc_error::{simple_report, ErrorKind, EXPR};
use std::{any::Any, ops::Range};

/// The expression engine could not make sense of the expression.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxError {
    /// The message reported by the engine.
    pub message: String,
}

impl ErrorKind for SyntaxError {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn message(&self) -> String {
        format!("syntax error: {}", self.message)
    }

    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<'static, (&'a str, Range<usize>)> {
        simple_report(
            src_id,
            spans,
            "syntax error",
            format!("I could not evaluate this {}", "expression".fg(EXPR)),
            Some(self.message.clone()),
        )
    }
}

/// The expression evaluated to NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct NotANumber;

impl ErrorKind for NotANumber {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn message(&self) -> String {
        "result is not a number".to_string()
    }

    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<'static, (&'a str, Range<usize>)> {
        simple_report(
            src_id,
            spans,
            self.message(),
            "this evaluates to NaN",
            Some("check for operations such as 0/0 or the square root of a negative number".to_string()),
        )
    }
}

/// The expression evaluated to positive or negative infinity, and infinite results are treated as
/// errors.
#[derive(Debug, Clone, PartialEq)]
pub struct InfiniteResult;

impl ErrorKind for InfiniteResult {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn message(&self) -> String {
        "result is infinite".to_string()
    }

    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<'static, (&'a str, Range<usize>)> {
        simple_report(
            src_id,
            spans,
            self.message(),
            "this overflows or divides by zero",
            None,
        )
    }
}

/// A graphing variable was used in an expression that does not assign it.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeVariable {
    /// The localized name of the variable.
    pub name: String,
}

impl ErrorKind for FreeVariable {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn message(&self) -> String {
        format!("`{}` has no value", self.name)
    }

    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<'static, (&'a str, Range<usize>)> {
        simple_report(
            src_id,
            spans,
            self.message(),
            format!("`{}` is only meaningful in an equation", self.name.as_str().fg(EXPR)),
            Some(format!("write an equation such as `{} = ...` to plot it", self.name)),
        )
    }
}
