mod msg;

use clap::{Parser, ValueEnum};
use color_print::ceprintln;
use minic::error::Error;
use minic::util::display::{format_asm, format_ir, format_removed, format_symbols, format_tokens};
use minic::{compile, Compilation, CompareLowering, Options, SelfAssignPolicy};
use msg::{Msg, Source};
use std::fs;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
    Tokens,
    Ast,
    Symbols,
    Ir,
    Asm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Yaml,
}

#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Source file
    input: String,

    /// Artifact to write
    #[arg(long, value_enum, default_value = "asm")]
    emit: Emit,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: Format,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    output: Option<String>,

    /// YAML file with compile options
    #[arg(long)]
    config: Option<String>,

    /// Stop before code generation on semantic errors
    #[arg(long)]
    strict: bool,

    /// Reject `if` without `else`
    #[arg(long)]
    require_else: bool,

    /// Skip the IR optimizer
    #[arg(long)]
    no_opt: bool,

    /// Self-assignment policy of the optimizer (exact, substring)
    #[arg(long)]
    self_assign: Option<SelfAssignPolicy>,

    /// Lower branches as `CMP x, <n>` instead of comparing operands
    #[arg(long)]
    threshold: Option<u64>,

    /// Print every stage
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn options(&self) -> Result<Options, Error> {
        let mut options = match &self.config {
            Some(path) => Options::load(path)?,
            None => Options::default(),
        };
        options.require_else |= self.require_else;
        options.strict |= self.strict;
        if self.no_opt {
            options.optimize = false;
        }
        if let Some(policy) = self.self_assign {
            options.self_assign = policy;
        }
        if let Some(threshold) = self.threshold {
            options.compare = CompareLowering::Threshold { threshold };
        }
        Ok(options)
    }
}

fn main() {
    let args = Args::parse();

    let options = match args.options() {
        Ok(options) => options,
        Err(e) => fail(&e, None),
    };
    let text = match fs::read_to_string(&args.input) {
        Ok(text) => text,
        Err(e) => fail(&Error::from(e), None),
    };
    let src = Source {
        name: &args.input,
        text: &text,
    };

    let compilation = match compile(&text, &options) {
        Ok(compilation) => compilation,
        Err(e) => fail(&e, Some(&src)),
    };

    // Diagnostics that do not stop the pipeline
    for diag in &compilation.scan_diagnostics {
        Msg::Warn(diag.kind.to_string()).print(Some((&src, diag.pos)));
    }
    for err in &compilation.semantic_errors {
        Msg::Warn(err.to_string()).print(None);
    }
    if !compilation.is_valid() {
        Msg::Note("listing was produced from a program with errors".to_string()).print(None);
    }

    if args.verbose {
        dump(&compilation);
    }

    let to_terminal = args.output.is_none() && std::io::stdout().is_terminal();
    let rendered = match render(&compilation, args.emit, args.format, to_terminal) {
        Ok(rendered) => rendered,
        Err(e) => fail(&Error::from(e), None),
    };
    match &args.output {
        Some(path) => {
            if let Err(e) = fs::write(path, rendered + "\n") {
                fail(&Error::from(e), None);
            }
        }
        None => println!("{}", rendered),
    }
}

fn render(
    compilation: &Compilation,
    emit: Emit,
    format: Format,
    color: bool,
) -> Result<String, serde_yaml::Error> {
    Ok(match (emit, format) {
        (Emit::Tokens, Format::Text) => format_tokens(&compilation.tokens),
        (Emit::Symbols, Format::Text) => format_symbols(&compilation.symbols),
        (Emit::Ir, Format::Text) => format_ir(&compilation.optimized.code),
        (Emit::Asm, Format::Text) => format_asm(&compilation.asm, color),
        // The AST has no listing form of its own
        (Emit::Ast, _) => serde_yaml::to_string(&compilation.ast)?,
        (Emit::Tokens, Format::Yaml) => serde_yaml::to_string(&compilation.tokens)?,
        (Emit::Symbols, Format::Yaml) => serde_yaml::to_string(&compilation.symbols)?,
        (Emit::Ir, Format::Yaml) => serde_yaml::to_string(&compilation.optimized.code)?,
        (Emit::Asm, Format::Yaml) => serde_yaml::to_string(&compilation.asm)?,
    })
}

fn dump(compilation: &Compilation) {
    ceprintln!("<bold>1. Scan</> ({} tokens)", compilation.tokens.len());
    eprintln!("{}", format_tokens(&compilation.tokens));

    ceprintln!("<bold>2. Parse</> ({} statements)", compilation.ast.statements.len());
    eprintln!("{}", serde_yaml::to_string(&compilation.ast).unwrap_or_default());

    ceprintln!(
        "<bold>3. Check</> ({} errors, {} symbols)",
        compilation.semantic_errors.len(),
        compilation.symbols.len()
    );
    eprintln!("{}", format_symbols(&compilation.symbols));

    ceprintln!("<bold>4. Lower</> ({} instructions)", compilation.ir.len());
    eprintln!("{}", format_ir(&compilation.ir));

    ceprintln!("<bold>5. Optimize</> ({} removed)", compilation.optimized.removed.len());
    eprintln!("{}", format_removed(&compilation.optimized));

    ceprintln!("<bold>6. Generate</> ({} instructions)", compilation.asm.len());
    eprintln!("{}", format_asm(&compilation.asm, true));
}

fn fail(err: &Error, src: Option<&Source>) -> ! {
    let at = match (err, src) {
        (Error::Syntax(e), Some(src)) => e.pos().map(|pos| (src, pos)),
        _ => None,
    };
    Msg::Error(err.to_string()).print(at);
    if let Error::Semantic(errors) = err {
        for e in errors {
            Msg::Note(e.to_string()).print(None);
        }
    }
    std::process::exit(1);
}
