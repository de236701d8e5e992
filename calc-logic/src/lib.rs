//! The logic layer of a calculator.
//!
//! [`Logic`] sits between a text-entry surface ([`CalculatorDisplay`]), an input [`History`], the
//! evaluator of [`calc_compute`], and optionally a [`calc_graph::Sampler`]. It decides what each
//! key press does: whether text is appended or replaces a result, whether delete clears everything
//! or one character, and what is committed to the history.
//!
//! ```
//! use calc_compute::{EvalOptions, Locale};
//! use calc_logic::{Logic, MemoryHistory, TextDisplay};
//!
//! let mut logic = Logic::new(TextDisplay::new(), MemoryHistory::new(), Locale::default(), EvalOptions::default());
//! logic.insert("12\u{00f7}5");
//! logic.on_enter();
//! assert_eq!(logic.text(), "2.4");
//! ```

pub mod display;
pub mod history;
pub mod logic;

pub use display::{CalculatorDisplay, Scroll, TextDisplay};
pub use history::{History, MemoryHistory, MARKER_EVALUATE_ON_RESUME};
pub use logic::{DeleteMode, DeleteModeListener, Logic};
