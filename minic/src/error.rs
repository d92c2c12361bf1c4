use crate::grammer::ast::BinOp;
use crate::grammer::token::{Pos, Token, TokenKind};
use crate::ir::Place;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

// ----------------------------------------------------------------------------
// Scan diagnostics (non-fatal)
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{kind} at line {}, column {}", .pos.line, .pos.col)]
pub struct ScanDiagnostic {
    pub kind: ScanDiagnosticKind,
    pub pos: Pos,
}

impl ScanDiagnostic {
    pub fn new(kind: ScanDiagnosticKind, pos: Pos) -> Self {
        Self { kind, pos }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub enum ScanDiagnosticKind {
    #[error("Unrecognized symbol '{0}'")]
    UnrecognizedSymbol(char),

    #[error("Unterminated block comment")]
    UnterminatedComment,
}

// ----------------------------------------------------------------------------
// Syntax errors (fatal to parsing)
// ----------------------------------------------------------------------------

/// What the parser was looking for when it gave up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Expected {
    Kind(TokenKind),
    Token(TokenKind, &'static str),
    Statement,
    Term,
    EndOfInput,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Kind(kind) => write!(f, "{}", kind),
            Expected::Token(kind, text) => write!(f, "{} `{}`", kind, text),
            Expected::Statement => write!(f, "statement"),
            Expected::Term => write!(f, "identifier or number"),
            Expected::EndOfInput => write!(f, "end of input"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub enum SyntaxError {
    #[error("Unexpected token: {found}, expected {expected}")]
    UnexpectedToken { expected: Expected, found: Token },

    #[error("Unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: Expected },
}

impl SyntaxError {
    pub fn expected(&self) -> &Expected {
        match self {
            SyntaxError::UnexpectedToken { expected, .. } => expected,
            SyntaxError::UnexpectedEof { expected } => expected,
        }
    }

    pub fn pos(&self) -> Option<Pos> {
        match self {
            SyntaxError::UnexpectedToken { found, .. } => Some(found.pos),
            SyntaxError::UnexpectedEof { .. } => None,
        }
    }
}

// ----------------------------------------------------------------------------
// Semantic errors (non-fatal, collected)
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub enum SemanticError {
    #[error("Type mismatch in declaration of '{variable}': declared '{declared}', found '{found}'")]
    TypeMismatch {
        variable: String,
        declared: String,
        found: String,
    },

    #[error("Type mismatch in operation '{operator}' between '{left}' and '{right}'")]
    OperandMismatch {
        operator: BinOp,
        left: String,
        right: String,
    },

    #[error("Variable '{name}' used before declaration")]
    UndeclaredVariable { name: String },
}

// ----------------------------------------------------------------------------
// Codegen errors (fatal to code generation)
// ----------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
pub enum CodegenError {
    #[error("Unsupported operator '{op}' in assignment to {dest}")]
    UnsupportedOperator { op: BinOp, dest: Place },

    #[error("Unsupported branch condition '{operand}': only `>` and `<` comparisons can be branched on")]
    UnsupportedCondition { operand: String },
}

// ----------------------------------------------------------------------------
// Pipeline
// ----------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    #[error("Semantic check failed with {} error(s)", .0.len())]
    Semantic(Vec<SemanticError>),

    #[error("Codegen error: {0}")]
    Codegen(#[from] CodegenError),
}
