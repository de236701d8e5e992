use calc_compute::{preprocess::delocalize, Equation, Locale};
use calc_lexer::{tokenize_complete, TokenKind};

/// Special variable names that are used in equations to be graphed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Variable {
    X,
    Y,
}

impl Variable {
    /// Returns the canonical name of the variable.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
        }
    }
}

/// How an equation is sampled.
#[derive(Clone, Debug, PartialEq)]
pub enum Relation {
    /// One side of the equation is a variable by itself; the other side, `body`, is a function of
    /// the `independent` variable.
    Explicit {
        /// The variable to step across the sampling range.
        independent: Variable,

        /// The expression giving the dependent variable.
        body: String,
    },

    /// Both sides of the equation may mention both variables.
    Implicit {
        /// The expression left of the `=`.
        lhs: String,

        /// The expression right of the `=`.
        rhs: String,
    },
}

/// Predicts the independent variable of the given equation.
pub fn predict_independent(equation: Equation) -> Relation {
    // variable by itself on left-hand-side: y=..., x=...
    match equation.lhs.as_str() {
        "y" => return Relation::Explicit { independent: Variable::X, body: equation.rhs },
        "x" => return Relation::Explicit { independent: Variable::Y, body: equation.rhs },
        _ => {},
    }

    // or on the right-hand-side: ...=y, ...=x
    match equation.rhs.as_str() {
        "y" => Relation::Explicit { independent: Variable::X, body: equation.lhs },
        "x" => Relation::Explicit { independent: Variable::Y, body: equation.lhs },
        _ => Relation::Implicit { lhs: equation.lhs, rhs: equation.rhs },
    }
}

/// Returns true if the display text is still being typed, i.e. it ends with something that expects
/// an operand after it, such as an operator, a decimal separator, or an opening parenthesis.
pub fn is_incomplete(text: &str) -> bool {
    let tokens = tokenize_complete(text);
    match tokens.iter().rev().find(|token| !token.is_whitespace()) {
        Some(token) => token.kind.expects_operand()
            || (token.kind == TokenKind::Number && token.lexeme.ends_with('.')),
        None => false,
    }
}

/// An equation that has been analyzed and is ready to be sampled.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalyzedEquation {
    /// The display text the equation was read from.
    pub text: String,

    /// How to sample the equation.
    pub relation: Relation,
}

impl AnalyzedEquation {
    /// Analyzes the given display text.
    ///
    /// Returns [`None`] if the text is not a complete equation: it must contain exactly one `=`
    /// with an expression on both sides, and must not end in an incomplete suffix (see
    /// [`is_incomplete`]).
    pub fn analyze(text: &str, locale: &Locale) -> Option<Self> {
        if !text.contains('=') || is_incomplete(text) {
            return None;
        }

        let canonical = delocalize(text, locale);
        let equation = Equation::split_exact(&canonical)?;
        Some(Self {
            text: text.to_string(),
            relation: predict_independent(equation),
        })
    }
}
