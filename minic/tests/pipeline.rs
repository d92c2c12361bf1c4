use minic::codegen::CompareLowering;
use minic::error::{CodegenError, Error};
use minic::ir::optimize::SelfAssignPolicy;
use minic::{compile, Compilation, Options};

const SAMPLE: &str =
    "function main(){ int x = 5; if (x > 10) { return x + 1; } else { return x - 1; } }";

fn listing(compilation: &Compilation) -> Vec<String> {
    compilation.asm.iter().map(|inst| inst.to_string()).collect()
}

fn assert(code: &str, options: &Options, expected: &[&str]) {
    let compilation = compile(code, options).unwrap();
    for line in listing(&compilation) {
        println!("{}", line);
    }
    assert!(compilation.is_valid());
    assert_eq!(listing(&compilation), expected);
}

#[test]
fn sample() {
    assert(
        SAMPLE,
        &Options::default(),
        &[
            "declare int x",
            "LOAD 5, t0",
            "LOAD t0, x",
            "CMP x, 10",
            "IFGT L0",
            "GOTO L1",
            "L0:",
            "LOAD x, R0",
            "ADD R0, 1",
            "STORE R0, t2",
            "RETURN t2",
            "L1:",
            "LOAD x, R1",
            "SUB R1, 1",
            "STORE R1, t3",
            "RETURN t3",
        ],
    );

    let compilation = compile(SAMPLE, &Options::default()).unwrap();
    assert!(compilation.semantic_errors.is_empty());
    assert!(compilation
        .asm
        .iter()
        .any(|inst| matches!(inst, arch::Inst::JumpIfGreater { .. })));
    assert!(compilation
        .asm
        .iter()
        .any(|inst| matches!(inst, arch::Inst::Return { .. })));
    assert_eq!(compilation.symbols.lookup("x"), Some("int"));
    assert_eq!(compilation.ir.len(), compilation.optimized.code.len() + 1);
}

#[test]
fn threshold_lowering() {
    let options = Options {
        compare: CompareLowering::Threshold { threshold: 10 },
        ..Options::default()
    };
    let compilation = compile("function f() { if (y < 3) { return y; } }", &options).unwrap();
    assert_eq!(listing(&compilation)[0], "CMP y, 10");
}

#[test]
fn without_optimizer() {
    let options = Options {
        optimize: false,
        ..Options::default()
    };
    let compilation = compile(SAMPLE, &options).unwrap();
    assert_eq!(compilation.optimized.code, compilation.ir);
    assert!(compilation.optimized.removed.is_empty());
    assert_eq!(
        listing(&compilation)
            .iter()
            .filter(|line| *line == "GOTO L1")
            .count(),
        2
    );
}

#[test]
fn lenient_semantic_errors() {
    let compilation = compile("function f() { y = 1; return y; }", &Options::default()).unwrap();
    assert_eq!(compilation.semantic_errors.len(), 2);
    assert!(!compilation.is_valid());
    assert!(!compilation.asm.is_empty());
}

#[test]
fn strict_semantic_errors() {
    let options = Options {
        strict: true,
        ..Options::default()
    };
    match compile("function f() { y = 1; }", &options) {
        Err(Error::Semantic(errors)) => assert_eq!(errors.len(), 1),
        other => panic!("Unexpected result: {:?}", other),
    }
    assert!(compile(SAMPLE, &options).is_ok());
}

#[test]
fn scan_diagnostics_invalidate() {
    let compilation = compile("function f() { return 1 @; }", &Options::default()).unwrap();
    assert_eq!(compilation.scan_diagnostics.len(), 1);
    assert!(compilation.semantic_errors.is_empty());
    assert!(!compilation.is_valid());
}

#[test]
fn syntax_error() {
    let options = Options {
        require_else: true,
        ..Options::default()
    };
    assert!(matches!(
        compile("function f() { if (a > 1) { } }", &options),
        Err(Error::Syntax(_))
    ));
    assert!(compile("function f() { if (a > 1) { } }", &Options::default()).is_ok());
}

#[test]
fn codegen_error() {
    let result = compile("function f() { int x = 2; return x * 2; }", &Options::default());
    assert!(matches!(
        result,
        Err(Error::Codegen(CodegenError::UnsupportedOperator { .. }))
    ));
}

#[test]
fn self_assign_policy() {
    let code = "function f() { int x = 1; int x1 = 2; x = x1; return x; }";
    let exact = compile(code, &Options::default()).unwrap();
    let substring = compile(
        code,
        &Options {
            self_assign: SelfAssignPolicy::Substring,
            ..Options::default()
        },
    )
    .unwrap();
    assert!(listing(&exact).contains(&"LOAD x1, x".to_string()));
    assert!(!listing(&substring).contains(&"LOAD x1, x".to_string()));
}

#[test]
fn reentrant() {
    let first = compile(SAMPLE, &Options::default()).unwrap();
    let other = compile("function g() { int a = 1; return a + a; }", &Options::default()).unwrap();
    let again = compile(SAMPLE, &Options::default()).unwrap();
    assert_eq!(listing(&first), listing(&again));
    assert_eq!(first.symbols, again.symbols);
    assert!(!other.symbols.contains("x"));
    assert_eq!(listing(&other)[1], "LOAD 1, t0");
}

#[test]
fn options_from_yaml() {
    let options: Options = serde_yaml::from_str(
        "require_else: true\nself_assign: substring\ncompare:\n  mode: threshold\n  threshold: 3\n",
    )
    .unwrap();
    assert!(options.require_else);
    assert!(!options.strict);
    assert!(options.optimize);
    assert_eq!(options.self_assign, SelfAssignPolicy::Substring);
    assert_eq!(options.compare, CompareLowering::Threshold { threshold: 3 });

    let options: Options = serde_yaml::from_str("compare:\n  mode: threshold\n").unwrap();
    assert_eq!(options.compare, CompareLowering::Threshold { threshold: 10 });

    let options: Options = serde_yaml::from_str("{}").unwrap();
    assert_eq!(options, Options::default());
}

#[test]
fn artifacts_serialize() {
    let compilation = compile(SAMPLE, &Options::default()).unwrap();
    let yaml = serde_yaml::to_string(&compilation.ast).unwrap();
    assert!(yaml.contains("type: program"));
    assert!(yaml.contains("name: main"));
    assert!(serde_yaml::to_string(&compilation).is_ok());
}

#[test]
fn ir_serializes() {
    let compilation = compile(SAMPLE, &Options::default()).unwrap();
    let yaml = serde_yaml::to_string(&compilation.optimized.code).unwrap();
    println!("{}", yaml);
    assert!(yaml.contains("return"));
    assert!(yaml.contains("t3"));
    assert!(yaml.contains("cond_jump"));
    assert!(serde_yaml::to_string(&compilation.optimized.removed).is_ok());

    // Codegen failures carry their destination as listing text
    let err = compile("function f() { int x = 2; return x * 2; }", &Options::default()).unwrap_err();
    match err {
        Error::Codegen(e) => {
            let yaml = serde_yaml::to_string(&e).unwrap();
            assert!(yaml.contains("t1"));
        }
        e => panic!("Unexpected error: {}", e),
    }
}
