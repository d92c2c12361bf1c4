//! Local peephole cleanup over a linear IR sequence.
//!
//! Two rewrites run once each, in order:
//!
//! 1. the assignment pass keeps literal loads and drops self-assignments;
//! 2. the jump pass drops an unconditional `goto L` that falls straight into
//!    `L:`.
//!
//! There is no data-flow analysis and nothing is iterated to a fixpoint.

use crate::ir::{Inst, Operand};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// How the assignment pass decides that `dest = src` is a self-assignment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SelfAssignPolicy {
    /// `dest` and `src` are the same operand. Binary assignments never match.
    #[default]
    Exact,
    /// The destination's text occurs anywhere in the rendered source text,
    /// so look-alikes such as `x = x1` are dropped too.
    Substring,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Optimized {
    pub code: Vec<Inst>,
    pub removed: Vec<Inst>,
}

pub fn optimize(code: &[Inst], policy: SelfAssignPolicy) -> Optimized {
    let mut removed = Vec::new();
    let code = assignment_pass(code, policy, &mut removed);
    let code = jump_pass(code, &mut removed);
    Optimized { code, removed }
}

pub fn optimize_ir(code: &[Inst], policy: SelfAssignPolicy) -> Vec<Inst> {
    optimize(code, policy).code
}

fn assignment_pass(code: &[Inst], policy: SelfAssignPolicy, removed: &mut Vec<Inst>) -> Vec<Inst> {
    let mut out = Vec::with_capacity(code.len());
    for inst in code {
        if is_self_assign(inst, policy) {
            removed.push(inst.clone());
        } else {
            out.push(inst.clone());
        }
    }
    out
}

fn is_self_assign(inst: &Inst, policy: SelfAssignPolicy) -> bool {
    match (inst, policy) {
        // Literal sources are already canonical
        (Inst::Assign { src, .. }, _) if src.is_const() => false,

        (Inst::Assign { dest, src }, SelfAssignPolicy::Exact) => {
            Operand::from(dest.clone()) == *src
        }
        (Inst::Assign { dest, src }, SelfAssignPolicy::Substring) => {
            src.to_string().contains(&dest.to_string())
        }

        (Inst::BinaryAssign { .. }, SelfAssignPolicy::Exact) => false,
        (Inst::BinaryAssign { dest, lhs, op, rhs }, SelfAssignPolicy::Substring) => {
            format!("{} {} {}", lhs, op, rhs).contains(&dest.to_string())
        }

        _ => false,
    }
}

/// A jump is dropped when the next instruction that survives is its own
/// target label. Checking against the rewritten output instead of the input
/// keeps a second run from finding anything new.
fn jump_pass(code: Vec<Inst>, removed: &mut Vec<Inst>) -> Vec<Inst> {
    let mut out: Vec<Inst> = Vec::with_capacity(code.len());
    for inst in code {
        if let Inst::Label(label) = &inst {
            while matches!(out.last(), Some(Inst::Jump(target)) if target == label) {
                removed.extend(out.pop());
            }
        }
        out.push(inst);
    }
    out
}
