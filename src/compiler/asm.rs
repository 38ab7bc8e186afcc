//! The accumulator assembly emitted by the translator.
//!
//! Every instruction works through the single accumulator `A`, and variables
//! live in byte cells declared with `DB`. Memory operands are bracketed.
//!
//! ```nasm
//! COUNT DB 0          ; declare a zero-initialized cell
//! LD A, 10            ; A <= 10
//! LD A, [COUNT]       ; A <= COUNT
//! ST [COUNT], A       ; COUNT <= A
//! SUB A, [OTHER]      ; A <= A - OTHER
//! ADD A, 1            ; A <= A + 1
//! JNZ END_IF          ; jump to END_IF if A is not zero
//! END_IF:             ; label
//! ```
//!
//! Literals are copied verbatim from the source text.

use std::fmt;

use super::labels::Label;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Instruction {
    Db  (Label),
    LdI (String),
    Ld  (Label),
    St  (Label),
    Sub (Label),
    AddI(String),
    Jnz (Label),
    Mark(Label),
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Instruction::*;
        match self {
            Db  (cell)  => write!(f, "{} DB 0", cell),
            LdI (value) => write!(f, "LD A, {}", value),
            Ld  (cell)  => write!(f, "LD A, [{}]", cell),
            St  (cell)  => write!(f, "ST [{}], A", cell),
            Sub (cell)  => write!(f, "SUB A, [{}]", cell),
            AddI(value) => write!(f, "ADD A, {}", value),
            Jnz (label) => write!(f, "JNZ {}", label),
            Mark(label) => write!(f, "{}:", label),
        }
    }
}
