use super::ast::{BinOp, Expr, Program, Stmt};
use super::parsercore::Parser;
use super::token::{Keyword, Token, TokenKind};
use crate::error::{Expected, SyntaxError};
use crate::{check, expect, optional, repeat};

/// Parse a whole token stream into one `Program`.
pub fn parse(tokens: Vec<Token>, require_else: bool) -> Result<Program, SyntaxError> {
    Parser::new(tokens.into_iter())
        .require_else(require_else)
        .parse()
}

impl<I: Iterator<Item = Token>> Parser<I> {
    pub fn parse(mut self) -> Result<Program, SyntaxError> {
        let program = self.parse_program()?;
        match self.next() {
            None => Ok(program),
            Some(found) => Err(SyntaxError::UnexpectedToken {
                expected: Expected::EndOfInput,
                found,
            }),
        }
    }
}

impl<I: Iterator<Item = Token>> Parser<I> {
    /// program = "function" ident "(" ")" block
    fn parse_program(&mut self) -> Result<Program, SyntaxError> {
        expect!(self, Keyword, "function")?;
        let name = expect!(self, Identifier)?.text;
        expect!(self, Delimiter, "(")?;
        expect!(self, Delimiter, ")")?;
        let statements = self.parse_block()?;
        Ok(Program { name, statements })
    }

    /// block = "{" { stmt } "}"
    fn parse_block(&mut self) -> Result<Vec<Stmt>, SyntaxError> {
        expect!(self, Delimiter, "{")?;
        let stmts = repeat!(self, self.parse_stmt(), Delimiter, "}");
        expect!(self, Delimiter, "}")?;
        Ok(stmts)
    }

    /// stmt = declaration | if-stmt | return-stmt | assignment
    fn parse_stmt(&mut self) -> Result<Stmt, SyntaxError> {
        let token = match self.peek() {
            Some(token) => token.clone(),
            None => {
                return Err(SyntaxError::UnexpectedEof {
                    expected: Expected::Statement,
                })
            }
        };

        match (token.kind, token.keyword()) {
            // if-stmt = "if" "(" expr ")" block [ "else" block ]
            (TokenKind::Keyword, Some(Keyword::If)) => {
                expect!(self, Keyword, "if")?;
                expect!(self, Delimiter, "(")?;
                let condition = self.parse_expr()?;
                expect!(self, Delimiter, ")")?;
                let then = self.parse_block()?;
                let otherwise = if self.require_else {
                    expect!(self, Keyword, "else")?;
                    self.parse_block()?
                } else {
                    optional!(self, Keyword, "else", self.parse_block()?).unwrap_or_default()
                };
                Ok(Stmt::If {
                    condition,
                    then,
                    otherwise,
                })
            }

            // return-stmt = "return" expr ";"
            (TokenKind::Keyword, Some(Keyword::Return)) => {
                expect!(self, Keyword, "return")?;
                let expression = self.parse_expr()?;
                expect!(self, Delimiter, ";")?;
                Ok(Stmt::Return { expression })
            }

            (TokenKind::Identifier, _) => {
                let first = expect!(self, Identifier)?.text;

                // declaration = ident ident "=" expr ";"
                if check!(self, Identifier) {
                    let variable = expect!(self, Identifier)?.text;
                    expect!(self, Operator, "=")?;
                    let value = self.parse_expr()?;
                    expect!(self, Delimiter, ";")?;
                    return Ok(Stmt::Declaration {
                        var_type: first,
                        variable,
                        value,
                    });
                }

                // assignment = ident "=" expr ";"
                expect!(self, Operator, "=")?;
                let value = self.parse_expr()?;
                expect!(self, Delimiter, ";")?;
                Ok(Stmt::Assignment {
                    variable: first,
                    value,
                })
            }

            _ => Err(SyntaxError::UnexpectedToken {
                expected: Expected::Statement,
                found: token,
            }),
        }
    }

    /// expr = term { operator term }
    fn parse_expr(&mut self) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_term()?;
        while let Some(token) = optional!(self, Operator) {
            let operator = match token.text.parse::<BinOp>() {
                Ok(op) => op,
                Err(_) => {
                    return Err(SyntaxError::UnexpectedToken {
                        expected: Expected::Kind(TokenKind::Operator),
                        found: token,
                    })
                }
            };
            let right = self.parse_term()?;
            left = Expr::binary(operator, left, right);
        }
        Ok(left)
    }

    /// term = ident | number
    fn parse_term(&mut self) -> Result<Expr, SyntaxError> {
        match self.next() {
            Some(token) => match token.kind {
                TokenKind::Identifier => Ok(Expr::ident(token.text)),
                TokenKind::Number => Ok(Expr::number(token.text)),
                _ => Err(SyntaxError::UnexpectedToken {
                    expected: Expected::Term,
                    found: token,
                }),
            },
            None => Err(SyntaxError::UnexpectedEof {
                expected: Expected::Term,
            }),
        }
    }
}
