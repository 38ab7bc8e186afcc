//! The Compiler module is in charge of taking a slang
//! source file and producing accumulator assembly.
//!
//! It does this with a regex-driven tokenizer followed by
//! a translator that matches a few fixed statement shapes
//! against the flat token list.

pub mod asm;
pub mod error;
pub mod labels;
pub mod lexer;
pub mod statement;
pub mod translator;

pub use error::{Error, Result, Warning};
pub use translator::Translation;

/// Tokenizes and translates `source` in one go.
pub fn compile(source: &str) -> Result<Translation> {
    let tokens = lexer::tokenize(source)?;
    translator::translate(&tokens)
}
