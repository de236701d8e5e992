//! A thin wrapper around the [`meval`] expression engine.
//!
//! The engine is a black box to the rest of the calculator: text goes in, a double or a syntax
//! error comes out. Variable bindings live in a [`Scope`], and every caller that binds variables
//! owns its own scope, so concurrent evaluations never observe each other's bindings.

use calc_error::Error;
use crate::error::SyntaxError;
use meval::{Context, Expr};
use std::ops::Range;

/// An expression that has been compiled by the engine, ready to be evaluated repeatedly.
#[derive(Debug, Clone)]
pub struct Compiled {
    expr: Expr,
    span: Range<usize>,
}

/// A set of variable bindings and functions to evaluate expressions with.
pub struct Scope {
    ctxt: Context<'static>,
}

impl Default for Scope {
    fn default() -> Self {
        let mut ctxt = Context::new();
        ctxt.func("log", f64::log10)
            .func2("mod", |a, b| a % b);
        Self { ctxt }
    }
}

impl std::fmt::Debug for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope").finish_non_exhaustive()
    }
}

/// Wraps an engine failure into an [`Error`] spanning the offending text.
fn syntax_error(err: meval::Error, span: Range<usize>) -> Error {
    Error::new(vec![span], SyntaxError { message: err.to_string() })
}

impl Scope {
    /// Creates a scope containing the engine's builtin functions and constants, along with `log`
    /// (base 10) and `mod`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `name` to `value` for every subsequent evaluation in this scope.
    pub fn define(&mut self, name: &str, value: f64) -> &mut Self {
        self.ctxt.var(name, value);
        self
    }

    /// Compiles the given expression.
    pub fn compile(&self, text: &str) -> Result<Compiled, Error> {
        let span = 0..text.len();
        if text.trim().is_empty() {
            return Err(Error::new(vec![span], SyntaxError { message: "empty expression".to_string() }));
        }

        text.parse::<Expr>()
            .map(|expr| Compiled { expr, span: span.clone() })
            .map_err(|err| syntax_error(err, span))
    }

    /// Compiles and evaluates the given expression.
    pub fn eval(&self, text: &str) -> Result<f64, Error> {
        let compiled = self.compile(text)?;
        self.eval_compiled(&compiled)
    }

    /// Evaluates a compiled expression with the bindings of this scope.
    pub fn eval_compiled(&self, compiled: &Compiled) -> Result<f64, Error> {
        compiled.expr
            .eval_with_context(&self.ctxt)
            .map_err(|err| syntax_error(err, compiled.span.clone()))
    }

    /// Applies a compiled expression as a one-argument function, binding its argument `var` to
    /// `value`.
    ///
    /// The binding stays in this scope after the call.
    pub fn call(&mut self, compiled: &Compiled, var: &str, value: f64) -> Result<f64, Error> {
        self.define(var, value);
        self.eval_compiled(compiled)
    }
}
