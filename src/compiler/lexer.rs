//! This lexer tokenizes slang.
use std::fmt;

use regex::Regex;
use snafu::ResultExt;

use super::error::{LexSnafu, Result, RuleSnafu};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Kind {
    IntKeyword,
    IfKeyword,
    Number,
    Identifier,
    Plus,
    Minus,
    Equals,
    Assign,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Semicolon,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Kind::*;
        let s = match self {
            IntKeyword => "`int`",
            IfKeyword  => "`if`",
            Number     => "a number",
            Identifier => "an identifier",
            Plus       => "`+`",
            Minus      => "`-`",
            Equals     => "`==`",
            Assign     => "`=`",
            LParen     => "`(`",
            RParen     => "`)`",
            LBrace     => "`{`",
            RBrace     => "`}`",
            Semicolon  => "`;`",
        };
        f.write_str(s)
    }
}

// Tokens carry the line they start on, for diagnostics only.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Token {
    pub kind: Kind,
    pub text: String,
    pub line: usize,
}

impl Token {
    pub fn new(kind: Kind, text: &str, line: usize) -> Self {
        Token{kind, text: text.to_owned(), line}
    }
}

/// Rules are tried top to bottom and the first match wins, so the order here
/// decides overlapping prefixes: `==` must come before `=`, and the keywords
/// before identifiers. Untagged rules are consumed without producing a token.
const RULES: &[(&str, Option<Kind>)] = &[
    (r"//.*",         None),
    (r"int",          Some(Kind::IntKeyword)),
    (r"if",           Some(Kind::IfKeyword)),
    (r"\d+",          Some(Kind::Number)),
    (r"[a-zA-Z_]\w*", Some(Kind::Identifier)),
    (r"\+",           Some(Kind::Plus)),
    (r"-",            Some(Kind::Minus)),
    (r"==",           Some(Kind::Equals)),
    (r"=",            Some(Kind::Assign)),
    (r"\(",           Some(Kind::LParen)),
    (r"\)",           Some(Kind::RParen)),
    (r"\{",           Some(Kind::LBrace)),
    (r"\}",           Some(Kind::RBrace)),
    (r";",            Some(Kind::Semicolon)),
    (r"\s+",          None),
];

struct Rule {
    pattern: Regex,
    kind: Option<Kind>,
}

/// A lazy scan over a source string. Each call to `next` yields the next
/// token, or the lex error that stopped the scan. After an error the
/// iterator is exhausted.
pub struct Lexer<'a> {
    source: &'a str,
    rules: Vec<Rule>,
    pos: usize,
    line: usize,
    failed: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Result<Self> {
        let mut rules = Vec::with_capacity(RULES.len());
        for &(pattern, kind) in RULES {
            // Anchor every rule at the scan cursor.
            let anchored = Regex::new(&format!("^(?:{})", pattern)).context(RuleSnafu { pattern })?;
            rules.push(Rule{pattern: anchored, kind});
        }

        Ok(Lexer{source, rules, pos: 0, line: 1, failed: false})
    }

    /// Returns the first matching rule's kind and the length of its match.
    fn match_at(&self, rest: &str) -> Option<(Option<Kind>, usize)> {
        self.rules.iter()
            .find_map(|rule| rule.pattern.find(rest).map(|m| (rule.kind, m.end())))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.failed && self.pos < self.source.len() {
            let rest = &self.source[self.pos..];

            match self.match_at(rest) {
                Some((kind, len)) => {
                    let text = &rest[..len];
                    let line = self.line;
                    self.line += text.matches('\n').count();
                    self.pos += len;

                    if let Some(kind) = kind {
                        return Some(Ok(Token::new(kind, text, line)));
                    }
                },
                None => {
                    self.failed = true;
                    let ch = rest.chars().next()?;
                    let offset = self.source[..self.pos].chars().count();
                    return Some(LexSnafu { ch, offset, line: self.line }.fail());
                },
            }
        }
        None
    }
}

/// Scans the whole source, stopping at the first lex error.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    let tokens = Lexer::new(source)?.collect::<Result<Vec<Token>>>()?;
    debug!("Lexed {} token(s) from {} byte(s) of source.", tokens.len(), source.len());
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::super::error::Error;

    fn kinds(source: &str) -> Vec<Kind> {
        tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_tokenize_declaration() {
        assert_eq!(tokenize("int a;").unwrap(), vec![
            Token::new(Kind::IntKeyword, "int", 1),
            Token::new(Kind::Identifier, "a", 1),
            Token::new(Kind::Semicolon, ";", 1),
        ]);
    }

    #[test]
    fn test_tokenize_skips_whitespace_and_comments() {
        assert!(tokenize("").unwrap().is_empty());
        assert!(tokenize("   \t\r\n  ").unwrap().is_empty());
        assert!(tokenize("// nothing to see here").unwrap().is_empty());
        assert!(tokenize("// one\n   // two\n\n").unwrap().is_empty());

        // A comment runs to the end of its line only.
        assert_eq!(tokenize("// int a;\nb").unwrap(), vec![
            Token::new(Kind::Identifier, "b", 2),
        ]);
    }

    #[test]
    fn test_tokenize_equals_before_assign() {
        assert_eq!(kinds("=="), vec![Kind::Equals]);
        assert_eq!(kinds("a==b"), vec![Kind::Identifier, Kind::Equals, Kind::Identifier]);
        assert_eq!(kinds("==="), vec![Kind::Equals, Kind::Assign]);
        assert_eq!(kinds("= ="), vec![Kind::Assign, Kind::Assign]);
    }

    #[test]
    fn test_tokenize_punctuation() {
        assert_eq!(kinds("+-(){};"), vec![
            Kind::Plus,
            Kind::Minus,
            Kind::LParen,
            Kind::RParen,
            Kind::LBrace,
            Kind::RBrace,
            Kind::Semicolon,
        ]);
    }

    #[test]
    fn test_tokenize_keyword_prefixes() {
        // Keywords are tried before identifiers and match as prefixes.
        assert_eq!(tokenize("integer").unwrap(), vec![
            Token::new(Kind::IntKeyword, "int", 1),
            Token::new(Kind::Identifier, "eger", 1),
        ]);
        assert_eq!(kinds("iffy"), vec![Kind::IfKeyword, Kind::Identifier]);
        assert_eq!(kinds("in"), vec![Kind::Identifier]);
        assert_eq!(kinds("_if"), vec![Kind::Identifier]);
    }

    #[test]
    fn test_tokenize_numbers_and_identifiers() {
        assert_eq!(tokenize("x1 = 042").unwrap(), vec![
            Token::new(Kind::Identifier, "x1", 1),
            Token::new(Kind::Assign, "=", 1),
            Token::new(Kind::Number, "042", 1),
        ]);
        // Digits never start an identifier.
        assert_eq!(tokenize("9lives").unwrap(), vec![
            Token::new(Kind::Number, "9", 1),
            Token::new(Kind::Identifier, "lives", 1),
        ]);
    }

    #[test]
    fn test_tokenize_tracks_lines() {
        let tokens = tokenize("int a;\n\na = 1; // set\nb").unwrap();
        let lines: Vec<usize> = tokens.iter().map(|t| t.line).collect();
        assert_eq!(lines, vec![1, 1, 1, 3, 3, 3, 3, 4]);
    }

    #[test]
    fn test_tokenize_invalid_character() {
        match tokenize("a % b;") {
            Err(Error::Lex { ch, offset, line }) => {
                assert_eq!(ch, '%');
                assert_eq!(offset, 2);
                assert_eq!(line, 1);
            },
            other => panic!("expected a lex error, got {:?}", other),
        }

        // Offsets count characters, not bytes.
        match tokenize("// é\né = 1;") {
            Err(Error::Lex { ch, offset, line }) => {
                assert_eq!(ch, 'é');
                assert_eq!(offset, 5);
                assert_eq!(line, 2);
            },
            other => panic!("expected a lex error, got {:?}", other),
        }
    }

    #[test]
    fn test_lexer_is_lazy_and_stops_after_error() {
        let mut lexer = Lexer::new("a = 1 # 2").unwrap();
        assert_eq!(lexer.next().unwrap().unwrap(), Token::new(Kind::Identifier, "a", 1));
        assert_eq!(lexer.next().unwrap().unwrap(), Token::new(Kind::Assign, "=", 1));
        assert_eq!(lexer.next().unwrap().unwrap(), Token::new(Kind::Number, "1", 1));
        assert!(lexer.next().unwrap().is_err());
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_lexer_restarts_from_scratch() {
        let source = "if (a == b) { a = a + 1; }";
        let first: Vec<Token> = Lexer::new(source).unwrap().map(|t| t.unwrap()).collect();
        let second: Vec<Token> = Lexer::new(source).unwrap().map(|t| t.unwrap()).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 14);
    }
}
