pub mod symbols;

use crate::error::SemanticError;
use crate::grammer::ast::{Expr, Program, Stmt};
use serde::Serialize;
use std::fmt;
use symbols::SymbolTable;

/// Static type of an expression. `Unknown` stands in for anything built from
/// an undeclared name and compares like any other type, so it mismatches
/// every named type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ty {
    Named(String),
    Unknown,
}

impl Ty {
    pub const INT: &'static str = "int";
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Named(name) => write!(f, "{}", name),
            Ty::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Checked {
    pub errors: Vec<SemanticError>,
    pub symbols: SymbolTable,
}

impl Checked {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Type-check every statement, including both branches of every `if`.
/// Never stops early; an empty error list means the program is valid.
pub fn check(program: &Program) -> Checked {
    let mut checker = Checker::default();
    for stmt in &program.statements {
        checker.check_stmt(stmt);
    }
    checker.finish()
}

#[derive(Default)]
struct Checker {
    symbols: SymbolTable,
    errors: Vec<SemanticError>,
}

impl Checker {
    fn finish(self) -> Checked {
        Checked {
            errors: self.errors,
            symbols: self.symbols,
        }
    }

    fn check_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Declaration {
                var_type,
                variable,
                value,
            } => {
                // Registered before the initializer is typed
                self.symbols.declare(variable, var_type);
                let found = self.type_of(value);
                let declared = Ty::Named(var_type.clone());
                if declared != found {
                    self.errors.push(SemanticError::TypeMismatch {
                        variable: variable.clone(),
                        declared: var_type.clone(),
                        found: found.to_string(),
                    });
                }
            }

            Stmt::Assignment { variable, value } => {
                if !self.symbols.contains(variable) {
                    self.errors.push(SemanticError::UndeclaredVariable {
                        name: variable.clone(),
                    });
                }
                self.type_of(value);
            }

            Stmt::If {
                condition,
                then,
                otherwise,
            } => {
                self.type_of(condition);
                for s in then {
                    self.check_stmt(s);
                }
                for s in otherwise {
                    self.check_stmt(s);
                }
            }

            Stmt::Return { expression } => {
                self.type_of(expression);
            }
        }
    }

    fn type_of(&mut self, expr: &Expr) -> Ty {
        match expr {
            Expr::Identifier { name } => match self.symbols.lookup(name) {
                Some(ty) => Ty::Named(ty.to_string()),
                None => {
                    self.errors.push(SemanticError::UndeclaredVariable { name: name.clone() });
                    Ty::Unknown
                }
            },

            Expr::Number { .. } => Ty::Named(Ty::INT.to_string()),

            // Relational operators yield the left type too; there is no bool
            Expr::Binary {
                operator,
                left,
                right,
            } => {
                let left_ty = self.type_of(left);
                let right_ty = self.type_of(right);
                if left_ty != right_ty {
                    self.errors.push(SemanticError::OperandMismatch {
                        operator: *operator,
                        left: left_ty.to_string(),
                        right: right_ty.to_string(),
                    });
                }
                left_ty
            }
        }
    }
}
