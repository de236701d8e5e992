pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer.
///
/// Every character of the input belongs to exactly one token; characters the tokenizer does not
/// recognize become [`TokenKind::Symbol`] tokens, so concatenating the lexemes always rebuilds the
/// input.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(kind) = lexer.next() {
        tokens.push(Token {
            span: lexer.span(),
            kind: kind.unwrap_or(TokenKind::Symbol),
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}
