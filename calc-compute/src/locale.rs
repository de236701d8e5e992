//! Localized tokens used by the calculator.
//!
//! The calculator never looks up string resources itself; a front-end builds a [`Locale`] (or
//! deserializes one, with the `serde` feature) and hands it to the evaluator.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The canonical names of the functions the expression engine understands, in the order
/// [`Locale::functions`] pairs them with their localized names.
pub const CANONICAL_FUNCTIONS: [&str; 6] = ["sin", "cos", "tan", "log", "ln", "mod"];

/// The localized spelling of every token the calculator reads or writes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Locale {
    /// The token shown on the display when an expression cannot be evaluated.
    ///
    /// The default value is `"Error"`.
    pub error: String,

    /// The localized name of the sine function.
    pub sin: String,

    /// The localized name of the cosine function.
    pub cos: String,

    /// The localized name of the tangent function.
    pub tan: String,

    /// The localized name of the base-10 logarithm.
    pub log: String,

    /// The localized name of the natural logarithm.
    pub ln: String,

    /// The localized name of the remainder function.
    #[cfg_attr(feature = "serde", serde(rename = "mod"))]
    pub modulo: String,

    /// The localized name of the horizontal variable.
    pub x: String,

    /// The localized name of the vertical variable.
    pub y: String,

    /// The glyph written in place of an ASCII minus sign in results.
    ///
    /// The default value is `'−'` (U+2212 MINUS SIGN).
    pub minus: char,

    /// The glyph written for an infinite result.
    ///
    /// The default value is `"∞"`.
    pub infinity: String,

    /// The prefix of the title of every plotted series.
    ///
    /// The default value is `"Graph: "`.
    pub graph_title: String,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            error: "Error".to_string(),
            sin: "sin".to_string(),
            cos: "cos".to_string(),
            tan: "tan".to_string(),
            log: "log".to_string(),
            ln: "ln".to_string(),
            modulo: "mod".to_string(),
            x: "x".to_string(),
            y: "y".to_string(),
            minus: '\u{2212}',
            infinity: "\u{221e}".to_string(),
            graph_title: "Graph: ".to_string(),
        }
    }
}

impl Locale {
    /// Set the error token. Returns an updated [`Locale`] for chaining.
    pub fn error(mut self, error: impl Into<String>) -> Self {
        self.error = error.into();
        self
    }

    /// Set the localized function names, in the order sin, cos, tan, log, ln, mod. Returns an
    /// updated [`Locale`] for chaining.
    pub fn function_names(mut self, names: [&str; 6]) -> Self {
        let [sin, cos, tan, log, ln, modulo] = names.map(str::to_string);
        self.sin = sin;
        self.cos = cos;
        self.tan = tan;
        self.log = log;
        self.ln = ln;
        self.modulo = modulo;
        self
    }

    /// Set the localized variable names. Returns an updated [`Locale`] for chaining.
    pub fn variables(mut self, x: impl Into<String>, y: impl Into<String>) -> Self {
        self.x = x.into();
        self.y = y.into();
        self
    }

    /// Set the minus and infinity glyphs. Returns an updated [`Locale`] for chaining.
    pub fn glyphs(mut self, minus: char, infinity: impl Into<String>) -> Self {
        self.minus = minus;
        self.infinity = infinity.into();
        self
    }

    /// Returns `(localized, canonical)` pairs for every function the engine understands.
    pub fn functions(&self) -> [(&str, &'static str); 6] {
        let [sin, cos, tan, log, ln, modulo] = CANONICAL_FUNCTIONS;
        [
            (self.sin.as_str(), sin),
            (self.cos.as_str(), cos),
            (self.tan.as_str(), tan),
            (self.log.as_str(), log),
            (self.ln.as_str(), ln),
            (self.modulo.as_str(), modulo),
        ]
    }

    /// Returns the canonical spelling of a localized name, if the name is a function or one of the
    /// two variables.
    pub fn canonical_name(&self, name: &str) -> Option<&'static str> {
        if name == self.x {
            return Some("x");
        } else if name == self.y {
            return Some("y");
        }

        self.functions()
            .into_iter()
            .find(|(localized, _)| *localized == name)
            .map(|(_, canonical)| canonical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanish_names() {
        let locale = Locale::default().function_names(["sen", "cos", "tg", "log", "ln", "mod"]);
        assert_eq!(locale.canonical_name("sen"), Some("sin"));
        assert_eq!(locale.canonical_name("tg"), Some("tan"));
        assert_eq!(locale.canonical_name("sin"), None);
        assert_eq!(locale.canonical_name("x"), Some("x"));
    }

    #[test]
    fn localized_variables() {
        let locale = Locale::default().variables("X", "Y");
        assert_eq!(locale.canonical_name("X"), Some("x"));
        assert_eq!(locale.canonical_name("Y"), Some("y"));
        assert_eq!(locale.canonical_name("x"), None);
    }
}
