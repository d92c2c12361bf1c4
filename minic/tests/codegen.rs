use minic::codegen::{generate, CompareLowering};
use minic::error::CodegenError;
use minic::grammer::ast::BinOp;
use minic::ir::{Inst, Label, Operand, Place, Temp};

fn var(name: &str) -> Operand {
    Operand::Var(name.to_string())
}

fn num(text: &str) -> Operand {
    Operand::Const(text.to_string())
}

fn binary(dest: usize, lhs: Operand, op: BinOp, rhs: Operand) -> Inst {
    Inst::BinaryAssign {
        dest: Place::Temp(Temp(dest)),
        lhs,
        op,
        rhs,
    }
}

fn branch(cond: Operand, label: usize) -> Inst {
    Inst::CondJump {
        cond,
        label: Label(label),
    }
}

fn assert(code: &[Inst], compare: &CompareLowering, listing: &[&str]) {
    let asm = generate(code, compare).unwrap();
    for inst in &asm {
        println!("{}", inst);
    }
    let found: Vec<String> = asm.iter().map(|inst| inst.to_string()).collect();
    assert_eq!(found, listing);
}

#[test]
fn copies() {
    let code = vec![
        Inst::Declare {
            ty: "int".to_string(),
            name: "x".to_string(),
        },
        Inst::Assign {
            dest: Place::Temp(Temp(0)),
            src: num("5"),
        },
        Inst::Assign {
            dest: Place::Var("x".to_string()),
            src: Operand::Temp(Temp(0)),
        },
    ];
    assert(
        &code,
        &CompareLowering::Operands,
        &["declare int x", "LOAD 5, t0", "LOAD t0, x"],
    );
}

#[test]
fn add_uses_one_register() {
    let code = vec![binary(0, var("x"), BinOp::Add, num("1"))];
    let asm = generate(&code, &CompareLowering::Operands).unwrap();
    assert_eq!(asm.len(), 3);
    assert!(matches!(asm[0], arch::Inst::Load { .. }));
    assert!(matches!(asm[1], arch::Inst::Add { .. }));
    assert!(matches!(asm[2], arch::Inst::Store { .. }));
    let regs: Vec<arch::Reg> = asm.iter().flat_map(|inst| inst.regs()).collect();
    assert_eq!(regs, vec![arch::Reg(0); 3]);
    assert(
        &code,
        &CompareLowering::Operands,
        &["LOAD x, R0", "ADD R0, 1", "STORE R0, t0"],
    );
}

#[test]
fn fresh_register_per_operation() {
    let code = vec![
        binary(0, var("a"), BinOp::Add, var("b")),
        binary(1, Operand::Temp(Temp(0)), BinOp::Sub, num("2")),
    ];
    assert(
        &code,
        &CompareLowering::Operands,
        &[
            "LOAD a, R0",
            "ADD R0, b",
            "STORE R0, t0",
            "LOAD t0, R1",
            "SUB R1, 2",
            "STORE R1, t1",
        ],
    );
}

#[test]
fn unsupported_operators() {
    for op in [BinOp::Mul, BinOp::Div, BinOp::Eq, BinOp::Not] {
        let code = vec![binary(0, var("x"), op, num("2"))];
        assert_eq!(
            generate(&code, &CompareLowering::Operands),
            Err(CodegenError::UnsupportedOperator {
                op,
                dest: Place::Temp(Temp(0)),
            })
        );
    }
}

#[test]
fn comparison_outside_branch() {
    let code = vec![
        binary(0, var("x"), BinOp::Gt, num("1")),
        Inst::Return(Operand::Temp(Temp(0))),
    ];
    assert_eq!(
        generate(&code, &CompareLowering::Operands),
        Err(CodegenError::UnsupportedOperator {
            op: BinOp::Gt,
            dest: Place::Temp(Temp(0)),
        })
    );
}

#[test]
fn compare_operands() {
    let code = vec![binary(0, var("x"), BinOp::Gt, num("10")), branch(Operand::Temp(Temp(0)), 0)];
    assert(&code, &CompareLowering::Operands, &["CMP x, 10", "IFGT L0"]);

    // a < b branches as b > a
    let code = vec![binary(0, var("x"), BinOp::Lt, var("y")), branch(Operand::Temp(Temp(0)), 3)];
    assert(&code, &CompareLowering::Operands, &["CMP y, x", "IFGT L3"]);
}

#[test]
fn unsupported_condition() {
    let code = vec![branch(var("x"), 0)];
    assert_eq!(
        generate(&code, &CompareLowering::Operands),
        Err(CodegenError::UnsupportedCondition {
            operand: "x".to_string()
        })
    );
}

#[test]
fn compare_threshold() {
    let compare = CompareLowering::Threshold { threshold: 10 };
    assert(&[branch(var("x"), 0)], &compare, &["CMP x, 10", "IFGT L0"]);

    let code = vec![binary(0, var("y"), BinOp::Lt, num("3")), branch(Operand::Temp(Temp(0)), 1)];
    assert(&code, &compare, &["CMP y, 10", "IFGT L1"]);

    let compare = CompareLowering::Threshold { threshold: 0 };
    assert(&[branch(num("1"), 0)], &compare, &["CMP 1, 0", "IFGT L0"]);
}

#[test]
fn control_flow() {
    let code = vec![
        Inst::Jump(Label(1)),
        Inst::Label(Label(1)),
        Inst::Return(var("x")),
    ];
    assert(&code, &CompareLowering::Operands, &["GOTO L1", "L1:", "RETURN x"]);
}
