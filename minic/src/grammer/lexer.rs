use super::token::{is_delimiter, is_operator, Keyword, Pos, Token, TokenKind};
use crate::error::{ScanDiagnostic, ScanDiagnosticKind};
use serde::Serialize;
use std::iter::Peekable;
use std::str::Chars;

/// Result of scanning: the token stream plus every non-fatal diagnostic.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Scanned {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<ScanDiagnostic>,
}

pub fn scan(code: &str) -> Scanned {
    Lexer::new(code).parse()
}

pub struct Lexer<'a> {
    iter: Peekable<Chars<'a>>,
    line: usize,
    col: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(code: &'a str) -> Self {
        Self {
            iter: code.chars().peekable(),
            line: 1,
            col: 1,
        }
    }
}

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

impl<'a> Lexer<'a> {
    fn peek_nth(&self, n: usize) -> Option<char> {
        self.iter.clone().nth(n)
    }

    fn pos(&self) -> Pos {
        Pos {
            line: self.line,
            col: self.col,
        }
    }

    fn consume(&mut self) -> Option<char> {
        let ch = self.iter.next()?;
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn consume_while<F: Fn(char) -> bool>(&mut self, cond: F) -> String {
        let mut lexeme = String::new();
        while let Some(&ch) = self.iter.peek() {
            if !cond(ch) {
                break;
            }
            lexeme.push(ch);
            self.consume();
        }
        lexeme
    }
}

// ----------------------------------------------------------------------------
// Scanner
// ----------------------------------------------------------------------------

impl<'a> Lexer<'a> {
    pub fn parse(mut self) -> Scanned {
        let mut scanned = Scanned::default();
        while let Some(ch0) = self.peek_nth(0) {
            let pos = self.pos();

            // 1. Keyword or identifier
            if ch0.is_ascii_alphabetic() || ch0 == '_' {
                let lexeme = self.consume_while(|c| c.is_ascii_alphanumeric() || c == '_');
                let kind = match lexeme.parse::<Keyword>() {
                    Ok(_) => TokenKind::Keyword,
                    Err(_) => TokenKind::Identifier,
                };
                scanned.tokens.push(Token::new(kind, lexeme, pos));
                continue;
            }

            // 2. Number literal
            if ch0.is_ascii_digit() {
                let lexeme = self.consume_while(|c| c.is_ascii_digit());
                scanned.tokens.push(Token::new(TokenKind::Number, lexeme, pos));
                continue;
            }

            // 3. Comment, checked ahead of '/' so it never becomes an operator
            if ch0 == '/' {
                match self.peek_nth(1) {
                    Some('/') => {
                        self.consume_while(|c| c != '\n');
                        continue;
                    }
                    Some('*') => {
                        if !self.skip_block_comment() {
                            scanned.diagnostics.push(ScanDiagnostic::new(
                                ScanDiagnosticKind::UnterminatedComment,
                                pos,
                            ));
                        }
                        continue;
                    }
                    _ => {}
                }
            }

            // 4. Operator
            if is_operator(ch0) {
                self.consume();
                scanned
                    .tokens
                    .push(Token::new(TokenKind::Operator, ch0.to_string(), pos));
                continue;
            }

            // 5. Delimiter
            if is_delimiter(ch0) {
                self.consume();
                scanned
                    .tokens
                    .push(Token::new(TokenKind::Delimiter, ch0.to_string(), pos));
                continue;
            }

            // 6. Whitespace
            if ch0.is_whitespace() {
                self.consume();
                continue;
            }

            // Mismatch
            self.consume();
            scanned.diagnostics.push(ScanDiagnostic::new(
                ScanDiagnosticKind::UnrecognizedSymbol(ch0),
                pos,
            ));
        }
        scanned
    }

    /// Consumes `/* ... */`. Returns false when the input ends first, in which
    /// case everything after the opener has been consumed.
    fn skip_block_comment(&mut self) -> bool {
        self.consume(); // consume '/'
        self.consume(); // consume '*'
        while let Some(ch) = self.consume() {
            if ch == '*' && self.iter.peek() == Some(&'/') {
                self.consume();
                return true;
            }
        }
        false
    }
}
