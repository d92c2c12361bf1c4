use serde::Serialize;
use strum::{Display, EnumString};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename = "program")]
pub struct Program {
    pub name: String,         // "function" ident "(" ")"
    pub statements: Vec<Stmt>, // "{" { stmt } "}"
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Stmt {
    // ident ident "=" expr ";"
    Declaration {
        var_type: String,
        variable: String,
        value: Expr,
    },
    // ident "=" expr ";"
    Assignment { variable: String, value: Expr },
    // "if" "(" expr ")" "{" { stmt } "}" [ "else" "{" { stmt } "}" ]
    If {
        condition: Expr,
        then: Vec<Stmt>,
        #[serde(rename = "else")]
        otherwise: Vec<Stmt>,
    },
    // "return" expr ";"
    Return { expression: Expr },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expr {
    Identifier {
        name: String,
    },
    Number {
        value: String,
    },
    #[serde(rename = "operator")]
    Binary {
        operator: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Identifier { name: name.into() }
    }

    pub fn number(value: impl Into<String>) -> Self {
        Expr::Number {
            value: value.into(),
        }
    }

    pub fn binary(operator: BinOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// Every operator shares one precedence level and folds to the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumString, Display)]
pub enum BinOp {
    #[strum(serialize = "+")]
    #[serde(rename = "+")]
    Add,
    #[strum(serialize = "-")]
    #[serde(rename = "-")]
    Sub,
    #[strum(serialize = "*")]
    #[serde(rename = "*")]
    Mul,
    #[strum(serialize = "/")]
    #[serde(rename = "/")]
    Div,
    #[strum(serialize = "=")]
    #[serde(rename = "=")]
    Eq,
    #[strum(serialize = "<")]
    #[serde(rename = "<")]
    Lt,
    #[strum(serialize = ">")]
    #[serde(rename = ">")]
    Gt,
    #[strum(serialize = "!")]
    #[serde(rename = "!")]
    Not,
}
