use crate::error::CodegenError;
use crate::grammer::ast::BinOp;
use crate::ir::{self, Place, Temp};
use arch::{Inst, Operand, RegFile};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// How a conditional jump becomes `CMP` + `IFGT`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum CompareLowering {
    /// Compare the two operands of the `>` / `<` that produced the condition.
    Operands,
    /// Compare one value against a fixed constant and branch when greater.
    /// The value is the left operand of the comparison feeding the branch, or
    /// the condition itself when it is not a comparison; the comparison's
    /// right operand and direction are ignored.
    Threshold {
        #[serde(default = "default_threshold")]
        threshold: u64,
    },
}

fn default_threshold() -> u64 {
    10
}

impl Default for CompareLowering {
    fn default() -> Self {
        CompareLowering::Operands
    }
}

pub fn generate(code: &[ir::Inst], compare: &CompareLowering) -> Result<Vec<Inst>, CodegenError> {
    CodeGen::new(code, compare).run(code)
}

#[derive(Debug)]
struct CodeGen<'a> {
    regs: RegFile,
    compare: &'a CompareLowering,
    // Temps that only ever feed a conditional jump
    branch_only: HashSet<Temp>,
    // Comparisons folded into the branch that reads them
    folded: HashMap<Temp, (ir::Operand, BinOp, ir::Operand)>,
    output: Vec<Inst>,
}

impl<'a> CodeGen<'a> {
    fn new(code: &[ir::Inst], compare: &'a CompareLowering) -> Self {
        let mut cond_uses = HashSet::new();
        let mut other_uses = HashSet::new();
        for inst in code {
            match inst {
                ir::Inst::CondJump { cond, .. } => cond_uses.extend(cond.as_temp()),
                _ => other_uses.extend(inst.reads().into_iter().filter_map(|op| op.as_temp())),
            }
        }

        CodeGen {
            regs: RegFile::new(),
            compare,
            branch_only: cond_uses.difference(&other_uses).copied().collect(),
            folded: HashMap::new(),
            output: Vec::new(),
        }
    }

    fn run(mut self, code: &[ir::Inst]) -> Result<Vec<Inst>, CodegenError> {
        for inst in code {
            self.gen_inst(inst)?;
        }
        Ok(self.output)
    }

    fn emit(&mut self, inst: Inst) {
        self.output.push(inst);
    }

    fn gen_inst(&mut self, inst: &ir::Inst) -> Result<(), CodegenError> {
        match inst {
            ir::Inst::Declare { ty, name } => self.emit(Inst::Declare {
                ty: ty.clone(),
                name: name.clone(),
            }),

            ir::Inst::Assign { dest, src } => self.emit(Inst::Load {
                src: operand(src),
                dst: place(dest),
            }),

            ir::Inst::BinaryAssign { dest, lhs, op, rhs } => match op {
                BinOp::Add | BinOp::Sub => {
                    let reg = self.regs.fresh();
                    self.emit(Inst::Load {
                        src: operand(lhs),
                        dst: Operand::Reg(reg),
                    });
                    self.emit(match op {
                        BinOp::Add => Inst::Add {
                            reg,
                            operand: operand(rhs),
                        },
                        _ => Inst::Sub {
                            reg,
                            operand: operand(rhs),
                        },
                    });
                    self.emit(Inst::Store {
                        src: reg,
                        dst: place(dest),
                    });
                }

                // Only a branch can consume a comparison result
                BinOp::Gt | BinOp::Lt => match dest {
                    Place::Temp(temp) if self.branch_only.contains(temp) => {
                        self.folded.insert(*temp, (lhs.clone(), *op, rhs.clone()));
                    }
                    _ => {
                        return Err(CodegenError::UnsupportedOperator {
                            op: *op,
                            dest: dest.clone(),
                        })
                    }
                },

                BinOp::Mul | BinOp::Div | BinOp::Eq | BinOp::Not => {
                    return Err(CodegenError::UnsupportedOperator {
                        op: *op,
                        dest: dest.clone(),
                    })
                }
            },

            ir::Inst::CondJump { cond, label } => {
                let comparison = cond.as_temp().and_then(|temp| self.folded.get(&temp));
                let (lhs, rhs) = match (self.compare, comparison) {
                    (CompareLowering::Operands, Some((lhs, BinOp::Lt, rhs))) => {
                        (operand(rhs), operand(lhs))
                    }
                    (CompareLowering::Operands, Some((lhs, _, rhs))) => {
                        (operand(lhs), operand(rhs))
                    }
                    (CompareLowering::Operands, None) => {
                        return Err(CodegenError::UnsupportedCondition {
                            operand: cond.to_string(),
                        })
                    }
                    (CompareLowering::Threshold { threshold }, Some((lhs, _, _))) => {
                        (operand(lhs), Operand::Imm(threshold.to_string()))
                    }
                    (CompareLowering::Threshold { threshold }, None) => {
                        (operand(cond), Operand::Imm(threshold.to_string()))
                    }
                };
                self.emit(Inst::Compare {
                    operand: lhs,
                    against: rhs,
                });
                self.emit(Inst::JumpIfGreater {
                    label: label.to_string(),
                });
            }

            ir::Inst::Jump(label) => self.emit(Inst::Jump {
                label: label.to_string(),
            }),

            ir::Inst::Label(label) => self.emit(Inst::LabelMarker {
                name: label.to_string(),
            }),

            ir::Inst::Return(src) => self.emit(Inst::Return {
                operand: operand(src),
            }),
        }
        Ok(())
    }
}

fn operand(op: &ir::Operand) -> Operand {
    match op {
        ir::Operand::Var(name) => Operand::Sym(name.clone()),
        ir::Operand::Temp(temp) => Operand::Sym(temp.to_string()),
        ir::Operand::Const(text) => Operand::Imm(text.clone()),
    }
}

fn place(dest: &Place) -> Operand {
    match dest {
        Place::Var(name) => Operand::Sym(name.clone()),
        Place::Temp(temp) => Operand::Sym(temp.to_string()),
    }
}
