use serde::Serialize;
use std::fmt;
use strum::{Display, EnumString};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub pos: Pos,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, pos: Pos) -> Self {
        Token {
            kind,
            text: text.into(),
            pos,
        }
    }

    /// Kind and literal text both match
    pub fn is(&self, kind: TokenKind, text: &str) -> bool {
        self.kind == kind && self.text == text
    }

    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword => self.text.parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}` at {}", self.kind, self.text, self.pos)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display)]
pub enum TokenKind {
    Keyword,    // if else while function return input output
    Identifier, // [A-Za-z_][A-Za-z0-9_]*
    Number,     // [0-9]+
    Operator,   // + - * / = < > !
    Delimiter,  // ; ( ) , { }
}

/// Reserved words. Only `if`, `else`, `function` and `return` have a place in
/// the grammar; the rest are reserved so they can never be identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Keyword {
    If,
    Else,
    While,
    Function,
    Return,
    Input,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Pos {
    pub line: usize,
    pub col: usize,
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

pub fn is_operator(ch: char) -> bool {
    matches!(ch, '+' | '-' | '*' | '/' | '=' | '<' | '>' | '!')
}

pub fn is_delimiter(ch: char) -> bool {
    matches!(ch, ';' | '(' | ')' | ',' | '{' | '}')
}
