use logos::Logos;
use std::ops::Range;

/// The different kinds of tokens that can be produced by the tokenizer.
#[derive(Logos, Clone, Copy, Debug, PartialEq)]
pub enum TokenKind {
    #[regex(r"[ \t\n\r]+")]
    Whitespace,

    #[token("+")]
    Add,

    #[token("-")]
    #[token("\u{2212}")]
    Sub,

    #[token("*")]
    #[token("\u{00d7}")]
    Mul,

    #[token("/")]
    #[token("\u{00f7}")]
    Div,

    #[token("%")]
    Mod,

    #[token("^")]
    Exp,

    #[token("!")]
    Factorial,

    #[token("=")]
    Assign,

    #[token("\u{221a}")]
    Root,

    #[token("\u{222b}")]
    Integral,

    #[regex(r"[\p{L}_]+")]
    Name,

    #[token(",")]
    Comma,

    #[token("(")]
    OpenParen,

    #[token(")")]
    CloseParen,

    #[regex(r"[0-9]+(\.[0-9]*)?")]
    #[regex(r"\.[0-9]+")]
    Number,

    #[token(".")]
    Dot,

    #[regex(r".", priority = 0)]
    Symbol,
}

impl TokenKind {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(self) -> bool {
        matches!(self, TokenKind::Whitespace)
    }

    /// Returns true if the token is one of the four infix keypad operators.
    pub fn is_infix_operator(self) -> bool {
        matches!(self, TokenKind::Add | TokenKind::Sub | TokenKind::Mul | TokenKind::Div)
    }

    /// Returns true if an expression ending with this token is incomplete, i.e. it still expects
    /// an operand after it.
    pub fn expects_operand(self) -> bool {
        self.is_infix_operator()
            || matches!(
                self,
                TokenKind::Exp
                    | TokenKind::Mod
                    | TokenKind::Dot
                    | TokenKind::Comma
                    | TokenKind::Root
                    | TokenKind::Integral
                    | TokenKind::Assign
                    | TokenKind::OpenParen
            )
    }

    /// Returns the ASCII spelling of this token, if the token is an operator whose glyph may differ
    /// from the spelling expected by an expression engine.
    pub fn canonical(self) -> Option<&'static str> {
        match self {
            TokenKind::Add => Some("+"),
            TokenKind::Sub => Some("-"),
            TokenKind::Mul => Some("*"),
            TokenKind::Div => Some("/"),
            _ => None,
        }
    }
}

/// A token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'source> {
    /// The region of the source code that this token originated from.
    pub span: Range<usize>,

    /// The kind of token.
    pub kind: TokenKind,

    /// The raw lexeme that was parsed into this token.
    pub lexeme: &'source str,
}

impl Token<'_> {
    /// Returns true if the token represents whitespace.
    pub fn is_whitespace(&self) -> bool {
        self.kind.is_whitespace()
    }

    /// Returns true if the token is a name spelled exactly as `name`.
    pub fn is_name(&self, name: &str) -> bool {
        self.kind == TokenKind::Name && self.lexeme == name
    }
}
