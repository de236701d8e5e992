//! Evaluation and fixed-width formatting of calculator expressions.
//!
//! The pipeline is: [`preprocess`] rewrites the display text (dropping trailing operators,
//! translating localized names, canonicalizing operator glyphs), the [`engine`] evaluates it to a
//! double, and [`fmt`] renders the double into the width of the display. [`eval::Evaluator`] ties
//! the three together.
//!
//! ```
//! use calc_compute::{Evaluation, Evaluator};
//!
//! let evaluator = Evaluator::default();
//! assert_eq!(evaluator.evaluate("2+2").unwrap(), Evaluation::Value("4".to_string()));
//! assert_eq!(evaluator.evaluate("1\u{00f7}3").unwrap(), Evaluation::Value("0.33333333".to_string()));
//! ```

pub mod engine;
pub mod error;
pub mod eval;
pub mod fmt;
pub mod locale;
pub mod preprocess;

pub use engine::Scope;
pub use eval::{EvalOptions, Evaluation, Evaluator};
pub use locale::Locale;
pub use preprocess::Equation;
