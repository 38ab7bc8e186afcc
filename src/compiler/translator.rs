//! The Translator takes the token list from the Lexer, recognizes
//! statements in it and lowers them to assembly.
//!
//! There is no grammar beyond the statement shapes themselves: the token at
//! the cursor picks a shape, and the shape then consumes exactly the tokens
//! it expects. Tokens that start no shape are skipped one at a time and
//! reported as warnings.
use super::asm::Instruction;
use super::error::{ParseSnafu, Result, StructuralUnderrunSnafu, Warning};
use super::labels::{Label, LabelTable};
use super::lexer::{Kind, Token};
use super::statement::{Operand, Shape, Statement};

#[derive(Default, PartialEq, Eq, Debug)]
pub struct Translation {
    pub statements: Vec<Statement>,
    pub warnings:   Vec<Warning>,
}

impl Translation {
    /// All emitted instructions, in statement order.
    pub fn instructions(&self) -> Vec<Instruction> {
        self.statements.iter().flat_map(|s| s.lower()).collect()
    }

    pub fn lines(&self) -> Vec<String> {
        self.instructions().iter().map(|i| i.to_string()).collect()
    }
}

pub struct Translator<'t> {
    tokens: &'t [Token],
    pos:    usize,
    // The shape being matched and the index of its first token.
    shape:  &'static str,
    start:  usize,
    labels: LabelTable,
    out:    Translation,
}

impl<'t> Translator<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Translator{
            tokens,
            pos: 0,
            shape: "statement",
            start: 0,
            labels: LabelTable::new(),
            out: Translation::default(),
        }
    }

    /// Run the translator, consuming itself and returning the recognized
    /// statements along with any warnings.
    pub fn run(mut self) -> Result<Translation> {
        while let Some(tok) = self.peek() {
            self.start = self.pos;

            let statement = match tok.kind {
                Kind::IntKeyword => self.declaration()?,
                Kind::Identifier if self.peek_kind(1) == Some(Kind::Assign) => self.assignment()?,
                Kind::IfKeyword => self.conditional()?,
                _ => {
                    self.skip();
                    continue;
                },
            };

            debug!("line {}: {}", statement.line, statement);
            self.out.statements.push(statement);
        }

        info!("Translated {} statement(s) using {} label(s), {} warning(s).",
            self.out.statements.len(), self.labels.len(), self.out.warnings.len());
        Ok(self.out)
    }

    /// `int NAME <terminator>`, where the terminator may be any token.
    fn declaration(&mut self) -> Result<Statement> {
        self.shape = "declaration";
        let line = self.expect(Kind::IntKeyword)?.line;
        let name = self.variable()?;
        self.expect_any()?;

        Ok(Statement{shape: Shape::Declaration { name }, line})
    }

    /// `NAME = (NUMBER | NAME) <terminator>`
    fn assignment(&mut self) -> Result<Statement> {
        self.shape = "assignment";
        let line = self.peek().map_or(0, |t| t.line);
        let target = self.variable()?;
        self.expect(Kind::Assign)?;

        let tok = self.expect_one_of(&[Kind::Number, Kind::Identifier])?;
        let value = match tok.kind {
            Kind::Number => Operand::Literal(tok.text.clone()),
            _ => Operand::Variable(self.intern(tok)),
        };
        self.expect_any()?;

        Ok(Statement{shape: Shape::Assignment { target, value }, line})
    }

    /// `if (? NAME == NAME )? {? NAME = NAME + NUMBER ;? }?`
    ///
    /// Each parenthesis, brace and the semicolon is optional on its own.
    fn conditional(&mut self) -> Result<Statement> {
        self.shape = "conditional increment";
        let line = self.expect(Kind::IfKeyword)?.line;

        self.optional(Kind::LParen);
        let left = self.variable()?;
        self.expect(Kind::Equals)?;
        let right = self.variable()?;
        self.optional(Kind::RParen);

        self.optional(Kind::LBrace);
        let target = self.variable()?;
        self.expect(Kind::Assign)?;
        let source = self.variable()?;
        self.expect(Kind::Plus)?;
        let amount = self.expect(Kind::Number)?.text.clone();
        self.optional(Kind::Semicolon);
        self.optional(Kind::RBrace);

        Ok(Statement{
            shape: Shape::ConditionalIncrement { left, right, target, source, amount },
            line,
        })
    }

    /// Consumes an identifier and returns its label.
    fn variable(&mut self) -> Result<Label> {
        let tok = self.expect(Kind::Identifier)?;
        Ok(self.intern(tok))
    }

    fn intern(&mut self, tok: &Token) -> Label {
        let (label, collision) = self.labels.intern(&tok.text);
        if let Some(first) = collision {
            self.out.warnings.push(Warning::LabelCollision {
                label: label.to_string(),
                first,
                second: tok.text.clone(),
                line: tok.line,
            });
        }
        label
    }

    /// Drops the token at the cursor, recording it as unhandled.
    fn skip(&mut self) {
        let index = self.pos;
        if let Some(tok) = self.consume() {
            self.out.warnings.push(Warning::UnhandledToken {
                index,
                line: tok.line,
                kind: tok.kind,
                text: tok.text.clone(),
            });
        }
    }

    /// Consumes the token at the cursor whatever its kind.
    fn expect_any(&mut self) -> Result<&'t Token> {
        match self.consume() {
            Some(tok) => Ok(tok),
            None => StructuralUnderrunSnafu {
                shape: self.shape,
                start: self.start,
                expected: "a terminator",
            }.fail(),
        }
    }

    fn expect(&mut self, kind: Kind) -> Result<&'t Token> {
        self.expect_one_of(&[kind])
    }

    /// Consumes the token at the cursor if it has one of `kinds`.
    fn expect_one_of(&mut self, kinds: &[Kind]) -> Result<&'t Token> {
        let expected = || kinds.iter().map(|k| k.to_string()).collect::<Vec<_>>().join(" or ");

        match self.peek() {
            Some(tok) if kinds.contains(&tok.kind) => {
                self.pos += 1;
                Ok(tok)
            },
            Some(tok) => ParseSnafu {
                shape: self.shape,
                line: tok.line,
                expected: expected(),
                found: tok.text.clone(),
            }.fail(),
            None => StructuralUnderrunSnafu {
                shape: self.shape,
                start: self.start,
                expected: expected(),
            }.fail(),
        }
    }

    /// Consumes the token at the cursor only if it has `kind`.
    fn optional(&mut self, kind: Kind) -> bool {
        match self.peek() {
            Some(tok) if tok.kind == kind => {
                self.pos += 1;
                true
            },
            _ => false,
        }
    }

    #[inline]
    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    #[inline]
    fn peek_kind(&self, ahead: usize) -> Option<Kind> {
        self.tokens.get(self.pos + ahead).map(|t| t.kind)
    }

    /// Returns the token at the cursor and moves past it.
    #[inline]
    fn consume(&mut self) -> Option<&'t Token> {
        let tok = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(tok)
    }
}

pub fn translate(tokens: &[Token]) -> Result<Translation> {
    Translator::new(tokens).run()
}
