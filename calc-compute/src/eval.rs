//! Evaluates display text into the text to show as its result.

use calc_error::Error;
use calc_lexer::tokenize_complete;
use crate::{
    engine::Scope,
    error::{FreeVariable, InfiniteResult},
    fmt::format_result,
    locale::Locale,
    preprocess::{delocalize, mentions, mentions_variable, strip_trailing_operators, Equation},
};
use tracing::debug;

/// Options controlling how expressions are evaluated and formatted.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EvalOptions {
    /// The number of characters the display can show. Results are formatted to fit this width
    /// where possible.
    ///
    /// The default value is `10`.
    pub width: usize,

    /// Whether an infinite result (for example, from `1/0`) is an error. When `false`, infinite
    /// results are shown with the locale's infinity glyph.
    ///
    /// The default value is `true`.
    pub infinity_is_error: bool,
}

/// The default options for evaluation. Returns an [`EvalOptions`] with the following values:
///
/// - [`width`](EvalOptions::width): `10`
/// - [`infinity_is_error`](EvalOptions::infinity_is_error): `true`
impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            width: 10,
            infinity_is_error: true,
        }
    }
}

impl EvalOptions {
    /// Set the display width. Returns an updated [`EvalOptions`] for chaining.
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Set whether infinite results are errors. Returns an updated [`EvalOptions`] for chaining.
    pub fn infinity_is_error(mut self, infinity_is_error: bool) -> Self {
        self.infinity_is_error = infinity_is_error;
        self
    }
}

/// The outcome of evaluating display text.
#[derive(Clone, Debug, PartialEq)]
pub enum Evaluation {
    /// The input was blank.
    Empty,

    /// The input evaluated to a number, formatted for the display.
    Value(String),

    /// The input is an equation whose right-hand side depends on a graphing variable. It has no
    /// single value, but can be plotted.
    Curve(Equation),
}

impl Evaluation {
    /// Returns the text to show on the display, if the evaluation produced one.
    pub fn display_text(&self) -> Option<&str> {
        match self {
            Self::Empty => Some(""),
            Self::Value(value) => Some(value),
            Self::Curve(_) => None,
        }
    }
}

/// Evaluates display text with a fixed locale and options.
#[derive(Clone, Debug, Default)]
pub struct Evaluator {
    locale: Locale,
    options: EvalOptions,
}

/// The raw outcome of evaluation, before formatting.
enum Raw {
    Number(f64),
    Curve(Equation),
}

impl Evaluator {
    /// Creates a new evaluator.
    pub fn new(locale: Locale, options: EvalOptions) -> Self {
        Self { locale, options }
    }

    /// Returns the locale used by this evaluator.
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Returns the options used by this evaluator.
    pub fn options(&self) -> EvalOptions {
        self.options
    }

    /// Sets the display width results are formatted to.
    pub fn set_width(&mut self, width: usize) {
        self.options.width = width;
    }

    /// Evaluates the given display text.
    ///
    /// Trailing operators are ignored, localized names are translated, and the value is formatted
    /// to the configured width. Text that mentions a graphing variable must be an equation: the
    /// left side is compiled as a function of the variable it mentions and applied to the value of
    /// the right side, so `2x=3` evaluates to `6`. If the right side itself mentions a graphing
    /// variable, the equation is returned as [`Evaluation::Curve`].
    pub fn evaluate(&self, input: &str) -> Result<Evaluation, Error> {
        if input.trim().is_empty() {
            return Ok(Evaluation::Empty);
        }

        let whole_input = 0..input.len();
        let raw = self.evaluate_raw(input).map_err(|mut err| {
            if err.spans.is_empty() || !err.is::<FreeVariable>() {
                err.spans = vec![whole_input.clone()];
            }
            debug!(input, error = %err, "evaluation failed");
            err
        })?;

        let value = match raw {
            Raw::Number(value) => value,
            Raw::Curve(equation) => return Ok(Evaluation::Curve(equation)),
        };

        if value.is_infinite() && self.options.infinity_is_error {
            debug!(input, "evaluation overflowed");
            return Err(Error::new(vec![whole_input], InfiniteResult));
        }

        format_result(value, self.options.width, &self.locale)
            .map(Evaluation::Value)
            .map_err(|mut err| {
                err.spans = vec![whole_input];
                err
            })
    }

    /// Evaluates the input to a number, without formatting it.
    fn evaluate_raw(&self, input: &str) -> Result<Raw, Error> {
        let stripped = strip_trailing_operators(input);
        let canonical = delocalize(stripped, &self.locale);
        let mut scope = Scope::new();

        if !mentions_variable(&canonical) {
            return scope.eval(&canonical).map(Raw::Number);
        }

        let Some(equation) = Equation::split(&canonical) else {
            return Err(self.free_variable(input));
        };

        // the left side is a function of the variable it mentions, applied to the right side
        let lhs = equation.lhs.to_lowercase();
        let function = scope.compile(&lhs)?;

        if mentions_variable(&equation.rhs) {
            return Ok(Raw::Curve(equation));
        }

        let argument = scope.eval(&equation.rhs)?;
        let value = match ["x", "y"].into_iter().find(|var| mentions(&lhs, var)) {
            Some(var) => scope.call(&function, var, argument)?,
            None => scope.eval_compiled(&function)?,
        };
        Ok(Raw::Number(value))
    }

    /// Builds a [`FreeVariable`] error pointing at the first graphing variable in the input.
    fn free_variable(&self, input: &str) -> Error {
        let token = tokenize_complete(input)
            .iter()
            .find(|token| token.is_name(&self.locale.x) || token.is_name(&self.locale.y))
            .map(|token| (token.span.clone(), token.lexeme.to_string()));

        match token {
            Some((span, name)) => Error::new(vec![span], FreeVariable { name }),
            None => Error::new(Vec::new(), FreeVariable { name: self.locale.x.clone() }),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{NotANumber, SyntaxError};
    use pretty_assertions::assert_eq;
    use super::*;

    fn evaluate(input: &str) -> Result<Evaluation, Error> {
        Evaluator::default().evaluate(input)
    }

    fn value(input: &str) -> String {
        match evaluate(input).unwrap() {
            Evaluation::Value(value) => value,
            other => panic!("expected a value, got {:?}", other),
        }
    }

    #[test]
    fn simple_arithmetic() {
        assert_eq!(value("2+2"), "4");
        assert_eq!(value("1\u{00f7}3"), "0.33333333");
        assert_eq!(value("2\u{00d7}3\u{2212}10"), "\u{2212}4");
    }

    #[test]
    fn blank_input() {
        assert_eq!(evaluate("  ").unwrap(), Evaluation::Empty);
        assert_eq!(evaluate("").unwrap(), Evaluation::Empty);
        assert_eq!(evaluate(" \t").unwrap().display_text(), Some(""));
    }

    #[test]
    fn trailing_operators() {
        assert_eq!(value("3+"), value("3"));
        assert_eq!(value("3+"), "3");
        assert_eq!(value("2\u{00d7}4\u{00f7}\u{2212}"), value("2\u{00d7}4"));
    }

    #[test]
    fn division_by_zero() {
        let err = evaluate("1/0").unwrap_err();
        assert!(err.is::<InfiniteResult>());
        assert_eq!(err.spans, vec![0..3]);
    }

    #[test]
    fn infinity_glyph() {
        let evaluator = Evaluator::new(Locale::default(), EvalOptions::default().infinity_is_error(false));
        assert_eq!(evaluator.evaluate("1/0").unwrap(), Evaluation::Value("\u{221e}".to_string()));
        assert_eq!(evaluator.evaluate("-1/0").unwrap(), Evaluation::Value("\u{2212}\u{221e}".to_string()));
    }

    #[test]
    fn not_a_number() {
        assert!(evaluate("0/0").unwrap_err().is::<NotANumber>());
        assert!(evaluate("sqrt(-1)").unwrap_err().is::<NotANumber>());
    }

    #[test]
    fn syntax_errors() {
        assert!(evaluate("2+*3").unwrap_err().is::<SyntaxError>());
        assert!(evaluate("(2").unwrap_err().is::<SyntaxError>());
        assert!(evaluate("foo(2)").unwrap_err().is::<SyntaxError>());
    }

    #[test]
    fn small_negative_width() {
        let evaluator = Evaluator::new(Locale::default(), EvalOptions::default().width(8));
        assert_eq!(evaluator.evaluate("0\u{2212}0.00001").unwrap(), Evaluation::Value("\u{2212}1e-5".to_string()));
    }

    #[test]
    fn localized_functions() {
        let locale = Locale::default().function_names(["sen", "cos", "tg", "lg", "ln", "mod"]);
        let evaluator = Evaluator::new(locale, EvalOptions::default());
        assert_eq!(evaluator.evaluate("sen(0)+lg(100)").unwrap(), Evaluation::Value("2".to_string()));
        assert_eq!(evaluator.evaluate("mod(7,4)").unwrap(), Evaluation::Value("3".to_string()));
    }

    #[test]
    fn free_variable() {
        let err = evaluate("2+x").unwrap_err();
        let kind = err.downcast_ref::<FreeVariable>().unwrap();
        assert_eq!(kind.name, "x");
        assert_eq!(err.spans, vec![2..3]);
    }

    #[test]
    fn left_side_is_function() {
        assert_eq!(value("y=5"), "5");
        assert_eq!(value("2x=3"), "6");
        assert_eq!(value("x^2=1+2"), "9");
    }

    #[test]
    fn equation_with_free_right_side_is_curve() {
        assert_eq!(
            evaluate("y=2*x").unwrap(),
            Evaluation::Curve(Equation { lhs: "y".to_string(), rhs: "2*x".to_string() }),
        );
        assert_eq!(evaluate("y=2*x").unwrap().display_text(), None);
    }

    #[test]
    fn malformed_equations_are_errors() {
        assert!(evaluate("y+=2*x").unwrap_err().is::<SyntaxError>());
        assert!(evaluate("y=").unwrap_err().is::<SyntaxError>());
        // without a graphing variable, `=` is not an equation
        assert!(evaluate("2=7").unwrap_err().is::<SyntaxError>());
    }

    #[test]
    fn width_follows_options() {
        let mut evaluator = Evaluator::default();
        assert_eq!(evaluator.evaluate("2/3").unwrap(), Evaluation::Value("0.66666667".to_string()));
        evaluator.set_width(14);
        assert_eq!(evaluator.evaluate("2/3").unwrap(), Evaluation::Value("0.666666666667".to_string()));
    }
}
