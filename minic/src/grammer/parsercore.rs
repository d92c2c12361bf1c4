use super::token::Token;
use crate::error::{Expected, SyntaxError};
use std::iter::Peekable;

pub struct Parser<I: Iterator<Item = Token>> {
    tokens: Peekable<I>,
    pub(super) require_else: bool,
}

impl<I: Iterator<Item = Token>> Parser<I> {
    pub fn new(tokens: I) -> Self {
        Parser {
            tokens: tokens.peekable(),
            require_else: false,
        }
    }

    /// Reject `if` statements without an `else` branch
    pub fn require_else(mut self, require: bool) -> Self {
        self.require_else = require;
        self
    }
}

impl<I: Iterator<Item = Token>> Parser<I> {
    /// Peek : Watch next token without consuming it
    pub fn peek(&mut self) -> Option<&Token> {
        self.tokens.peek()
    }

    /// Next : Consume next token and return it
    pub fn next(&mut self) -> Option<Token> {
        self.tokens.next()
    }

    /// Peek and check next token is match with condition
    pub fn check_if<F: Fn(&Token) -> bool>(&mut self, cond: F) -> bool {
        self.tokens.peek().is_some_and(|token| cond(token))
    }

    /// Consume if next token is match with condition
    pub fn consume_if<F: Fn(&Token) -> bool>(&mut self, cond: F) -> Option<Token> {
        self.tokens.next_if(|token| cond(token))
    }

    /// Next token must be match with condition
    pub fn expect_tobe<F: Fn(&Token) -> bool>(
        &mut self,
        expected: Expected,
        cond: F,
    ) -> Result<Token, SyntaxError> {
        if let Some(token) = self.tokens.next_if(|token| cond(token)) {
            return Ok(token);
        }
        match self.tokens.peek() {
            Some(token) => Err(SyntaxError::UnexpectedToken {
                expected,
                found: token.clone(),
            }),
            None => Err(SyntaxError::UnexpectedEof { expected }),
        }
    }
}

/// `check!(parser, Kind)` or `check!(parser, Kind, "text")`
#[macro_export]
macro_rules! check {
    ($parser:expr, $kind:ident) => {
        $parser.check_if(|token| token.kind == $crate::grammer::token::TokenKind::$kind)
    };
    ($parser:expr, $kind:ident, $text:expr) => {
        $parser.check_if(|token| token.is($crate::grammer::token::TokenKind::$kind, $text))
    };
}

#[macro_export]
macro_rules! expect {
    ($parser:expr, $kind:ident) => {
        $parser.expect_tobe(
            $crate::error::Expected::Kind($crate::grammer::token::TokenKind::$kind),
            |token| token.kind == $crate::grammer::token::TokenKind::$kind,
        )
    };
    ($parser:expr, $kind:ident, $text:expr) => {
        $parser.expect_tobe(
            $crate::error::Expected::Token($crate::grammer::token::TokenKind::$kind, $text),
            |token| token.is($crate::grammer::token::TokenKind::$kind, $text),
        )
    };
}

#[macro_export]
macro_rules! optional {
    ($parser:expr, $kind:ident, $text:expr, $following:expr) => {
        if $crate::check!($parser, $kind, $text) {
            $crate::expect!($parser, $kind, $text)?;
            Some($following)
        } else {
            None
        }
    };
    ($parser:expr, $kind:ident) => {
        $parser.consume_if(|token| token.kind == $crate::grammer::token::TokenKind::$kind)
    };
}

/// Parse `{ element } terminal`, leaving the terminal unconsumed
#[macro_export]
macro_rules! repeat {
    ($parser:expr, $elem:expr, $kind:ident, $text:expr) => {{
        let mut items = Vec::new();
        while !$crate::check!($parser, $kind, $text) {
            items.push($elem?);
        }
        items
    }};
}
