//! Tokenizer for the interpreter's JavaScript subset.

mod cook_escape;
mod lex_error;
mod lexer;
mod token;

pub use lex_error::{LexError, LexErrorKind};
pub use lexer::Lexer;
pub use token::{Keyword, Token, TokenKind};
