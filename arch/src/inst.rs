use crate::{op::Mnemonic, reg::Reg};

use color_print::cformat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operand of a pseudo-assembly instruction: a virtual register, a named
/// storage location (program variable or IR temporary) or a numeric literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operand {
    Reg(Reg),
    Sym(String),
    Imm(String),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Reg(reg) => write!(f, "{}", reg),
            Operand::Sym(name) => write!(f, "{}", name),
            Operand::Imm(text) => write!(f, "{}", text),
        }
    }
}

impl Operand {
    /// Register names win over symbols, so a variable spelled `R3` reads back
    /// as a register.
    pub fn parse(s: &str) -> Result<Self, String> {
        if s.is_empty() {
            return Err("Empty operand".to_string());
        }
        if s.bytes().all(|b| b.is_ascii_digit()) {
            return Ok(Operand::Imm(s.to_string()));
        }
        if let Ok(reg) = Reg::parse(s) {
            return Ok(Operand::Reg(reg));
        }
        if is_symbol(s) {
            return Ok(Operand::Sym(s.to_string()));
        }
        Err(format!("Invalid operand: {s}"))
    }
}

fn is_symbol(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Inst {
    Declare { ty: String, name: String },
    Load { src: Operand, dst: Operand },
    Store { src: Reg, dst: Operand },
    Add { reg: Reg, operand: Operand },
    Sub { reg: Reg, operand: Operand },
    Compare { operand: Operand, against: Operand },
    JumpIfGreater { label: String },
    Jump { label: String },
    Return { operand: Operand },
    LabelMarker { name: String },
}

impl Inst {
    /// Registers read or written by this instruction
    pub fn regs(&self) -> Vec<Reg> {
        let operand = |op: &Operand| match op {
            Operand::Reg(reg) => Some(*reg),
            _ => None,
        };
        match self {
            Inst::Load { src, dst } => [operand(src), operand(dst)].into_iter().flatten().collect(),
            Inst::Store { src, dst } => [Some(*src), operand(dst)].into_iter().flatten().collect(),
            Inst::Add { reg, operand: op } | Inst::Sub { reg, operand: op } => {
                [Some(*reg), operand(op)].into_iter().flatten().collect()
            }
            Inst::Compare { operand: a, against: b } => {
                [operand(a), operand(b)].into_iter().flatten().collect()
            }
            Inst::Return { operand: op } => operand(op).into_iter().collect(),
            Inst::Declare { .. }
            | Inst::JumpIfGreater { .. }
            | Inst::Jump { .. }
            | Inst::LabelMarker { .. } => vec![],
        }
    }
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inst::Declare { ty, name } => write!(f, "{} {} {}", Mnemonic::DECLARE, ty, name),
            Inst::Load { src, dst } => write!(f, "{} {}, {}", Mnemonic::LOAD, src, dst),
            Inst::Store { src, dst } => write!(f, "{} {}, {}", Mnemonic::STORE, src, dst),
            Inst::Add { reg, operand } => write!(f, "{} {}, {}", Mnemonic::ADD, reg, operand),
            Inst::Sub { reg, operand } => write!(f, "{} {}, {}", Mnemonic::SUB, reg, operand),
            Inst::Compare { operand, against } => {
                write!(f, "{} {}, {}", Mnemonic::CMP, operand, against)
            }
            Inst::JumpIfGreater { label } => write!(f, "{} {}", Mnemonic::IFGT, label),
            Inst::Jump { label } => write!(f, "{} {}", Mnemonic::GOTO, label),
            Inst::Return { operand } => write!(f, "{} {}", Mnemonic::RETURN, operand),
            Inst::LabelMarker { name } => write!(f, "{}:", name),
        }
    }
}

impl Inst {
    pub fn cformat(&self) -> String {
        macro_rules! two {
            ($name:expr, $a:expr, $b:expr) => {
                cformat!("    <r>{:<8}</><b>{}, {}</>", $name, $a, $b)
            };
        }

        macro_rules! one {
            ($name:expr, $a:expr) => {
                cformat!("    <r>{:<8}</><b>{}</>", $name, $a)
            };
        }

        match self {
            Inst::Declare { ty, name } => {
                cformat!("    <g>{:<8}</><y>{}</> <b>{}</>", Mnemonic::DECLARE, ty, name)
            }
            Inst::Load { src, dst } => two!(Mnemonic::LOAD, src, dst),
            Inst::Store { src, dst } => two!(Mnemonic::STORE, src, dst),
            Inst::Add { reg, operand } => two!(Mnemonic::ADD, reg, operand),
            Inst::Sub { reg, operand } => two!(Mnemonic::SUB, reg, operand),
            Inst::Compare { operand, against } => two!(Mnemonic::CMP, operand, against),
            Inst::JumpIfGreater { label } => one!(Mnemonic::IFGT, label),
            Inst::Jump { label } => one!(Mnemonic::GOTO, label),
            Inst::Return { operand } => one!(Mnemonic::RETURN, operand),
            Inst::LabelMarker { name } => cformat!("<m>{}</>:", name),
        }
    }

    /// Parse one line of a listing as produced by `Display`.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        if let Some(name) = line.strip_suffix(':') {
            if is_symbol(name) {
                return Ok(Inst::LabelMarker {
                    name: name.to_string(),
                });
            }
            return Err(format!("Invalid label: {line}"));
        }

        let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let op = Mnemonic::parse(head)?;

        // `declare` takes a type and a name, everything else is comma separated
        let args: Vec<&str> = match op {
            Mnemonic::DECLARE => rest.split_whitespace().collect(),
            _ => rest.split(',').map(str::trim).collect(),
        };
        if args.len() != op.arity() {
            return Err(format!(
                "Invalid operand count for {op}: expected {}, got {}",
                op.arity(),
                args.len()
            ));
        }

        let reg = |s: &str| Reg::parse(s);
        let operand = |s: &str| Operand::parse(s);
        let label = |s: &str| {
            if is_symbol(s) {
                Ok(s.to_string())
            } else {
                Err(format!("Invalid label: {s}"))
            }
        };

        Ok(match op {
            Mnemonic::DECLARE => Inst::Declare {
                ty: args[0].to_string(),
                name: args[1].to_string(),
            },
            Mnemonic::LOAD => Inst::Load {
                src: operand(args[0])?,
                dst: operand(args[1])?,
            },
            Mnemonic::STORE => Inst::Store {
                src: reg(args[0])?,
                dst: operand(args[1])?,
            },
            Mnemonic::ADD => Inst::Add {
                reg: reg(args[0])?,
                operand: operand(args[1])?,
            },
            Mnemonic::SUB => Inst::Sub {
                reg: reg(args[0])?,
                operand: operand(args[1])?,
            },
            Mnemonic::CMP => Inst::Compare {
                operand: operand(args[0])?,
                against: operand(args[1])?,
            },
            Mnemonic::IFGT => Inst::JumpIfGreater {
                label: label(args[0])?,
            },
            Mnemonic::GOTO => Inst::Jump {
                label: label(args[0])?,
            },
            Mnemonic::RETURN => Inst::Return {
                operand: operand(args[0])?,
            },
        })
    }
}
