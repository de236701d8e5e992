//! Rewrites display text into text the expression engine accepts.

use calc_lexer::{tokenize_complete, Token, TokenKind};
use crate::locale::Locale;

/// Returns true if the character is one of the infix operators found on the keypad.
pub fn is_operator(c: char) -> bool {
    "+-\u{2212}\u{00d7}\u{00f7}/*".contains(c)
}

/// Returns true if the text consists of exactly one infix operator character.
pub fn is_operator_str(text: &str) -> bool {
    let mut chars = text.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if is_operator(c))
}

/// Drops trailing infix operators (and whitespace around them), since they can only result in a
/// syntax error.
pub fn strip_trailing_operators(input: &str) -> &str {
    input.trim_end_matches(|c: char| is_operator(c) || c.is_whitespace())
}

/// Returns true if the tokens on either side of an adjacency imply a multiplication, such as in
/// `2x`, `2(x+1)`, `(x+1)(x-1)` or `x(x+1)`.
fn implies_multiplication(prev: &Token, next: &Token, canonical_prev: &str) -> bool {
    let is_variable = |name: &str| name == "x" || name == "y";
    match (prev.kind, next.kind) {
        (TokenKind::Number, TokenKind::Name | TokenKind::OpenParen | TokenKind::Root) => true,
        (TokenKind::CloseParen, TokenKind::Number | TokenKind::Name | TokenKind::OpenParen | TokenKind::Root) => true,
        (TokenKind::Name, TokenKind::OpenParen | TokenKind::Number) => is_variable(canonical_prev),
        _ => false,
    }
}

/// Translates localized text into the canonical spelling the expression engine expects.
///
/// - Names equal to a localized function name become the canonical name (e.g. Spanish `sen` becomes
///   `sin`), and the localized variable names become `x` and `y`. Only whole names are replaced, so
///   a localized name that happens to appear inside a longer name is left alone.
/// - Keypad operator glyphs become their ASCII spelling (`−` to `-`, `×` to `*`, `÷` to `/`).
/// - Implicit multiplication is made explicit.
///
/// Whitespace is dropped; the engine does not need it.
pub fn delocalize(input: &str, locale: &Locale) -> String {
    let tokens = tokenize_complete(input);
    let mut output = String::with_capacity(input.len());
    let mut previous: Option<(&Token, &str)> = None;

    for token in tokens.iter().filter(|token| !token.is_whitespace()) {
        let canonical = match token.kind {
            TokenKind::Name => locale.canonical_name(token.lexeme).unwrap_or(token.lexeme),
            TokenKind::Root => "sqrt",
            kind => kind.canonical().unwrap_or(token.lexeme),
        };

        if let Some((prev, canonical_prev)) = previous {
            if implies_multiplication(prev, token, canonical_prev) {
                output.push('*');
            }
        }

        output.push_str(canonical);
        previous = Some((token, canonical));
    }

    output
}

/// Returns true if canonical text (see [`delocalize`]) mentions the variable `name`.
pub fn mentions(canonical: &str, name: &str) -> bool {
    tokenize_complete(canonical).iter().any(|token| token.is_name(name))
}

/// Returns true if canonical text mentions either graphing variable.
pub fn mentions_variable(canonical: &str) -> bool {
    tokenize_complete(canonical)
        .iter()
        .any(|token| token.is_name("x") || token.is_name("y"))
}

/// An equation written as two expressions separated by `=`.
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    /// The expression left of the `=`.
    pub lhs: String,

    /// The expression right of the `=`.
    pub rhs: String,
}

impl Equation {
    /// Splits the text on its first `=`. Returns [`None`] if there is no `=`.
    pub fn split(text: &str) -> Option<Self> {
        text.split_once('=').map(|(lhs, rhs)| Self {
            lhs: lhs.trim().to_string(),
            rhs: rhs.trim().to_string(),
        })
    }

    /// Splits the text on its only `=`. Returns [`None`] if there is not exactly one `=`, or if
    /// either side is empty.
    pub fn split_exact(text: &str) -> Option<Self> {
        let equation = Self::split(text)?;
        if equation.rhs.contains('=') || equation.lhs.is_empty() || equation.rhs.is_empty() {
            return None;
        }
        Some(equation)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn strips_trailing_operators() {
        assert_eq!(strip_trailing_operators("3+"), "3");
        assert_eq!(strip_trailing_operators("3\u{00d7}\u{2212}"), "3");
        assert_eq!(strip_trailing_operators("3 + "), "3");
        assert_eq!(strip_trailing_operators("3+4"), "3+4");
        assert_eq!(strip_trailing_operators("+"), "");
    }

    #[test]
    fn operator_detection() {
        assert!(is_operator('\u{00f7}'));
        assert!(is_operator('*'));
        assert!(!is_operator('^'));
        assert!(is_operator_str("\u{2212}"));
        assert!(!is_operator_str("+3"));
        assert!(!is_operator_str(""));
    }

    #[test]
    fn canonical_glyphs() {
        let locale = Locale::default();
        assert_eq!(delocalize("3\u{00d7}4\u{2212}6\u{00f7}2", &locale), "3*4-6/2");
    }

    #[test]
    fn localized_functions() {
        let locale = Locale::default().function_names(["sen", "cos", "tg", "log", "ln", "mod"]);
        assert_eq!(delocalize("sen(0)+tg(1)", &locale), "sin(0)+tan(1)");
    }

    #[test]
    fn whole_names_only() {
        // `ln` is a localized name, but `lnx` is not
        let locale = Locale::default().function_names(["sin", "cos", "tan", "lg", "ln", "mod"]);
        assert_eq!(delocalize("lg(10)", &locale), "log(10)");
        assert_eq!(delocalize("lnx", &locale), "lnx");
        assert_eq!(delocalize("log(10)", &locale), "log(10)");
    }

    #[test]
    fn implicit_multiplication() {
        let locale = Locale::default();
        assert_eq!(delocalize("2x", &locale), "2*x");
        assert_eq!(delocalize("2(1+1)", &locale), "2*(1+1)");
        assert_eq!(delocalize("(1+1)(2)", &locale), "(1+1)*(2)");
        assert_eq!(delocalize("x(2)", &locale), "x*(2)");
        assert_eq!(delocalize("sin(2)", &locale), "sin(2)");
        assert_eq!(delocalize("2\u{221a}(4)", &locale), "2*sqrt(4)");
    }

    #[test]
    fn localized_variables() {
        let locale = Locale::default().variables("X", "Y");
        let canonical = delocalize("Y = 2X", &locale);
        assert_eq!(canonical, "y=2*x");
        assert!(mentions(&canonical, "x"));
        assert!(mentions_variable(&canonical));
        assert!(!mentions_variable("2*max(1,2)"));
    }

    #[test]
    fn split_equations() {
        assert_eq!(
            Equation::split("y = 2*x"),
            Some(Equation { lhs: "y".to_string(), rhs: "2*x".to_string() }),
        );
        assert_eq!(Equation::split("2*x"), None);
        assert_eq!(Equation::split_exact("y=x=2"), None);
        assert_eq!(Equation::split_exact("y="), None);
        assert!(Equation::split_exact("x^2+y^2=4").is_some());
    }
}
