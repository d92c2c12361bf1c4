use minic::grammer::ast::BinOp;
use minic::grammer::lexer::scan;
use minic::grammer::parser::parse;
use minic::ir::lower::lower;
use minic::ir::{Inst, Label, Operand, Place, Temp};
use std::collections::HashSet;

fn run(code: &str) -> Vec<Inst> {
    let program = parse(scan(code).tokens, false).unwrap();
    let ir = lower(&program);
    for inst in &ir {
        println!("{}", inst);
    }
    ir
}

fn assert(code: &str, listing: &[&str]) {
    let found: Vec<String> = run(code).iter().map(|inst| inst.to_string()).collect();
    assert_eq!(found, listing);
}

macro_rules! case {
    ($name:ident, $code:expr, [$($line:expr),* $(,)?]) => {
        #[test]
        fn $name() {
            assert($code, &[$($line),*]);
        }
    };
}

case!(
    literal_declaration,
    "function f() { int x = 5; }",
    ["declare int x", "t0 = 5", "x = t0"]
);
case!(
    copy_declaration,
    "function f() { int y = x; }",
    ["declare int y", "y = x"]
);
case!(
    expression_declaration,
    "function f() { int y = x + 1; }",
    ["declare int y", "t0 = x + 1", "y = t0"]
);
case!(
    literal_assignment,
    "function f() { int x = 0; x = 5; }",
    ["declare int x", "t0 = 0", "x = t0", "x = 5"]
);
case!(
    left_fold,
    "function f() { return a + b - c; }",
    ["t0 = a + b", "t1 = t0 - c", "return t1"]
);
case!(
    sample,
    "function main() { int x = 5; if (x > 10) { return x + 1; } else { return x - 1; } }",
    [
        "declare int x",
        "t0 = 5",
        "x = t0",
        "t1 = x > 10",
        "if t1 goto L0",
        "goto L1",
        "L0:",
        "t2 = x + 1",
        "return t2",
        "goto L1",
        "L1:",
        "t3 = x - 1",
        "return t3",
    ]
);
case!(
    if_without_else,
    "function f() { if (a) { b = 1; } }",
    ["if a goto L0", "goto L1", "L0:", "b = 1", "goto L1", "L1:"]
);

#[test]
fn literal_assignment_uses_no_temp() {
    let ir = run("function f() { x = 5; }");
    assert_eq!(
        ir,
        vec![Inst::Assign {
            dest: Place::Var("x".to_string()),
            src: Operand::Const("5".to_string()),
        }]
    );
}

#[test]
fn return_binary() {
    let ir = run("function f() { return x + 1; }");
    assert_eq!(
        ir,
        vec![
            Inst::BinaryAssign {
                dest: Place::Temp(Temp(0)),
                lhs: Operand::Var("x".to_string()),
                op: BinOp::Add,
                rhs: Operand::Const("1".to_string()),
            },
            Inst::Return(Operand::Temp(Temp(0))),
        ]
    );
}

#[test]
fn names_are_unique() {
    let ir = run(
        "function f() { if (a > 1) { if (b < 2) { x = a + b; } else { x = a - b; } } else { x = 0; } return x + 1; }",
    );
    let mut temps = HashSet::new();
    let mut labels = HashSet::new();
    for inst in &ir {
        match inst {
            Inst::BinaryAssign { dest: Place::Temp(temp), .. } => assert!(temps.insert(*temp)),
            Inst::Label(label) => assert!(labels.insert(*label)),
            _ => {}
        }
    }
    assert_eq!(temps.len(), 5);
    assert_eq!(labels, (0..4).map(Label).collect());
}

#[test]
fn counters_restart_per_run() {
    let code = "function f() { if (a > 1) { return a + 1; } }";
    let first = run(code);
    run("function g() { return 1 + 2 + 3 + 4; }");
    assert_eq!(run(code), first);
}
