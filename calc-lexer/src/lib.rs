//! Tokenizer for the text shown on a calculator display.
//!
//! The display accepts both the typographic operator glyphs found on calculator keypads (`−`, `×`,
//! `÷`) and their ASCII spellings. Every token keeps its span into the input text, so that
//! rewriting passes can rebuild the text token by token instead of using raw substring
//! replacement.

pub mod tokenizer;

pub use tokenizer::{tokenize, tokenize_complete, Token, TokenKind};
