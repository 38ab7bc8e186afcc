//! The statement forms slang supports, and how each lowers to assembly.
//!
//! ```c
//! int a;                    // Declaration
//! a = 10;                   // Assignment from a literal
//! a = b;                    // Assignment from another variable
//! if (a == b) { a = a + 1; } // Conditional increment
//! ```
//!
//! The parentheses and braces of a conditional are optional.
use std::fmt;

use super::asm::Instruction;
use super::labels::Label;

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Operand {
    Literal(String),
    Variable(Label),
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Shape {
    Declaration {
        name: Label,
    },
    Assignment {
        target: Label,
        value: Operand,
    },
    ConditionalIncrement {
        left: Label,
        right: Label,
        target: Label,
        source: Label,
        amount: String,
    },
}

/// A recognized statement and the line of its first token.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Statement {
    pub shape: Shape,
    pub line: usize,
}

impl Statement {
    pub fn lower(&self) -> Vec<Instruction> {
        use Instruction::*;
        match &self.shape {
            Shape::Declaration { name } => vec![Db(name.clone())],

            Shape::Assignment { target, value } => {
                let load = match value {
                    Operand::Literal(v)  => LdI(v.clone()),
                    Operand::Variable(v) => Ld(v.clone()),
                };
                vec![load, St(target.clone())]
            },

            // Compare by subtraction: a nonzero difference skips the body.
            Shape::ConditionalIncrement { left, right, target, source, amount } => vec![
                Ld(left.clone()),
                Sub(right.clone()),
                Jnz(Label::end_if()),
                Ld(source.clone()),
                AddI(amount.clone()),
                St(target.clone()),
                Mark(Label::end_if()),
            ],
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.shape {
            Shape::Declaration { name } => write!(f, "int {}", name),
            Shape::Assignment { target, value: Operand::Literal(v) } => write!(f, "{} = {}", target, v),
            Shape::Assignment { target, value: Operand::Variable(v) } => write!(f, "{} = {}", target, v),
            Shape::ConditionalIncrement { left, right, target, source, amount } => write!(
                f, "if {} == {}: {} = {} + {}", left, right, target, source, amount
            ),
        }
    }
}
