use crate::codegen::{self, CompareLowering};
use crate::error::{Error, ScanDiagnostic, SemanticError};
use crate::grammer::{ast::Program, lexer, parser, token::Token};
use crate::ir::{self, lower, optimize::{self, Optimized, SelfAssignPolicy}};
use crate::semantic::{self, symbols::SymbolTable};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Every knob of one compilation. Missing keys in a config file take the
/// defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub require_else: bool,
    pub strict: bool,
    pub optimize: bool,
    pub self_assign: SelfAssignPolicy,
    pub compare: CompareLowering,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            require_else: false,
            strict: false,
            optimize: true,
            self_assign: SelfAssignPolicy::default(),
            compare: CompareLowering::default(),
        }
    }
}

impl Options {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let file = File::open(path)?;
        Ok(serde_yaml::from_reader(BufReader::new(file))?)
    }
}

/// Everything the stages produced for one source text.
#[derive(Debug, Clone, Serialize)]
pub struct Compilation {
    pub tokens: Vec<Token>,
    pub scan_diagnostics: Vec<ScanDiagnostic>,
    pub ast: Program,
    pub semantic_errors: Vec<SemanticError>,
    pub symbols: SymbolTable,
    pub ir: Vec<ir::Inst>,
    pub optimized: Optimized,
    pub asm: Vec<arch::Inst>,
}

impl Compilation {
    /// The listing is only trustworthy when scanning and checking were clean.
    pub fn is_valid(&self) -> bool {
        self.scan_diagnostics.is_empty() && self.semantic_errors.is_empty()
    }
}

pub fn compile(source: &str, options: &Options) -> Result<Compilation, Error> {
    // 1. Scan
    let scanned = lexer::scan(source);

    // 2. Parse
    let ast = parser::parse(scanned.tokens.clone(), options.require_else)?;

    // 3. Check
    let checked = semantic::check(&ast);
    if options.strict && !checked.is_valid() {
        return Err(Error::Semantic(checked.errors));
    }

    // 4. Lower and optimize
    let code = lower::lower(&ast);
    let optimized = match options.optimize {
        true => optimize::optimize(&code, options.self_assign),
        false => Optimized {
            code: code.clone(),
            removed: Vec::new(),
        },
    };

    // 5. Generate
    let asm = codegen::generate(&optimized.code, &options.compare)?;

    Ok(Compilation {
        tokens: scanned.tokens,
        scan_diagnostics: scanned.diagnostics,
        ast,
        semantic_errors: checked.errors,
        symbols: checked.symbols,
        ir: code,
        optimized,
        asm,
    })
}
