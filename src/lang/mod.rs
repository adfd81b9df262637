/*!
# Rust Language Module

This Rust module provides lexical analysis of the Lox language.

*/

#[macro_use]
mod error;
mod lex;
mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::lex;
pub use lex::Lexer;
pub use token::Token;
pub use token::TokenKind;

/// Source line attribution for diagnostics. `None` when an error
/// has no associated source line.
pub type LineNumber = Option<usize>;
