use crate::grammer::token::Token;
use crate::ir;
use crate::ir::optimize::Optimized;
use crate::semantic::symbols::SymbolTable;
use itertools::{chain, Itertools};

pub fn format_tokens(tokens: &[Token]) -> String {
    let rows = tokens
        .iter()
        .map(|tok| format!("| {:>7} | {:<10} | {}", tok.pos.to_string(), tok.kind.to_string(), tok.text));
    chain!(
        ["+-[Tokens]+------------+-------------------------".to_string()],
        rows,
        ["+---------+------------+-------------------------".to_string()],
    )
    .join("\n")
}

pub fn format_symbols(symbols: &SymbolTable) -> String {
    let rows = symbols
        .iter()
        .map(|(name, ty)| format!("| {:<16} | {}", name, ty));
    chain!(
        ["+-[Symbols]--------+-----------------------------".to_string()],
        rows,
        ["+------------------+-----------------------------".to_string()],
    )
    .join("\n")
}

/// IR listing, one instruction per line. Labels sit flush left.
pub fn format_ir(code: &[ir::Inst]) -> String {
    code.iter()
        .map(|inst| match inst {
            ir::Inst::Label(_) => inst.to_string(),
            _ => format!("    {}", inst),
        })
        .join("\n")
}

pub fn format_removed(optimized: &Optimized) -> String {
    match optimized.removed.is_empty() {
        true => "(nothing removed)".to_string(),
        false => optimized
            .removed
            .iter()
            .map(|inst| format!("  - {}", inst))
            .join("\n"),
    }
}

/// Assembly listing, optionally coloured for a terminal.
pub fn format_asm(asm: &[arch::Inst], color: bool) -> String {
    asm.iter()
        .map(|inst| match (inst, color) {
            // `cformat` already indents everything but labels
            (_, true) => inst.cformat(),
            (arch::Inst::LabelMarker { .. }, false) => inst.to_string(),
            (_, false) => format!("    {}", inst),
        })
        .join("\n")
}
