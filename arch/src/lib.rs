pub mod inst;
pub mod op;
pub mod reg;

pub use inst::{Inst, Operand};
pub use op::Mnemonic;
pub use reg::{Reg, RegFile};
