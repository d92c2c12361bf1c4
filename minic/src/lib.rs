pub mod codegen;
pub mod compile;
pub mod error;
pub mod grammer;
pub mod ir;
pub mod semantic;
pub mod util;

pub use codegen::{generate, CompareLowering};
pub use compile::{compile, Compilation, Options};
pub use error::Error;
pub use grammer::lexer::{scan, Lexer, Scanned};
pub use grammer::parser::parse;
pub use grammer::parsercore::Parser;
pub use ir::lower::lower;
pub use ir::optimize::{optimize, optimize_ir, Optimized, SelfAssignPolicy};
pub use semantic::{check, Checked};
