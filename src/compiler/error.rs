//! Errors and warnings shared by the lexer and translator.
use std::fmt;

use snafu::Snafu;

use super::lexer::Kind;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Fatal conditions. Any of these aborts the compilation run.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("unexpected character {ch:?} at offset {offset} (line {line})"))]
    Lex { ch: char, offset: usize, line: usize },

    #[snafu(display("invalid lexer rule `{pattern}`: {source}"))]
    Rule {
        pattern: &'static str,
        source: regex::Error,
    },

    #[snafu(display("{shape} starting at token {start} ends early: expected {expected}, got end of input"))]
    StructuralUnderrun {
        shape: &'static str,
        start: usize,
        expected: String,
    },

    #[snafu(display("line {line}: {shape} expected {expected}, found `{found}`"))]
    Parse {
        shape: &'static str,
        line: usize,
        expected: String,
        found: String,
    },
}

/// Non-fatal conditions collected while translating.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Warning {
    UnhandledToken {
        index: usize,
        line: usize,
        kind: Kind,
        text: String,
    },
    LabelCollision {
        label: String,
        first: String,
        second: String,
        line: usize,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Warning::UnhandledToken { index, line, kind, text } => write!(
                f,
                "line {}: skipped {:?} `{}` (token {}) outside of any statement",
                line, kind, text, index
            ),
            Warning::LabelCollision { label, first, second, line } => write!(
                f,
                "line {}: `{}` and `{}` both map to label {}",
                line, first, second, label
            ),
        }
    }
}
