pub mod lower;
pub mod optimize;

use crate::grammer::ast::BinOp;
use serde::{Serialize, Serializer};
use std::fmt;

/// Compiler generated temporary, printed `t<n>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Temp(pub usize);

/// Jump target, printed `L<n>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(pub usize);

impl fmt::Display for Temp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

/// Something an instruction can write to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Place {
    Var(String),
    Temp(Temp),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    Var(String),
    Temp(Temp),
    Const(String),
}

impl From<Place> for Operand {
    fn from(place: Place) -> Self {
        match place {
            Place::Var(name) => Operand::Var(name),
            Place::Temp(temp) => Operand::Temp(temp),
        }
    }
}

impl Operand {
    pub fn is_const(&self) -> bool {
        matches!(self, Operand::Const(_))
    }

    pub fn as_temp(&self) -> Option<Temp> {
        match self {
            Operand::Temp(temp) => Some(*temp),
            _ => None,
        }
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Place::Var(name) => write!(f, "{}", name),
            Place::Temp(temp) => write!(f, "{}", temp),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Var(name) => write!(f, "{}", name),
            Operand::Temp(temp) => write!(f, "{}", temp),
            Operand::Const(text) => write!(f, "{}", text),
        }
    }
}

// Operands and labels serialize as their listing text
macro_rules! serialize_as_text {
    ($($ty:ty),*) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                    serializer.collect_str(self)
                }
            }
        )*
    };
}

serialize_as_text!(Label, Place, Operand);

/// Three-address instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Inst {
    Declare {
        ty: String,
        name: String,
    },
    Assign {
        dest: Place,
        src: Operand,
    },
    BinaryAssign {
        dest: Place,
        lhs: Operand,
        op: BinOp,
        rhs: Operand,
    },
    Label(Label),
    Jump(Label),
    CondJump {
        cond: Operand,
        label: Label,
    },
    Return(Operand),
}

impl Inst {
    /// Operands read by this instruction
    pub fn reads(&self) -> Vec<&Operand> {
        match self {
            Inst::Assign { src, .. } => vec![src],
            Inst::BinaryAssign { lhs, rhs, .. } => vec![lhs, rhs],
            Inst::CondJump { cond, .. } => vec![cond],
            Inst::Return(operand) => vec![operand],
            Inst::Declare { .. } | Inst::Label(_) | Inst::Jump(_) => vec![],
        }
    }
}

impl fmt::Display for Inst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inst::Declare { ty, name } => write!(f, "declare {} {}", ty, name),
            Inst::Assign { dest, src } => write!(f, "{} = {}", dest, src),
            Inst::BinaryAssign { dest, lhs, op, rhs } => {
                write!(f, "{} = {} {} {}", dest, lhs, op, rhs)
            }
            Inst::Label(label) => write!(f, "{}:", label),
            Inst::Jump(label) => write!(f, "goto {}", label),
            Inst::CondJump { cond, label } => write!(f, "if {} goto {}", cond, label),
            Inst::Return(operand) => write!(f, "return {}", operand),
        }
    }
}

/// Name supply for one compilation. Temporaries and labels count up from
/// zero and are never handed out twice.
#[derive(Debug, Default)]
pub struct Counters {
    temp: usize,
    label: usize,
}

impl Counters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh_temp(&mut self) -> Temp {
        let temp = Temp(self.temp);
        self.temp += 1;
        temp
    }

    pub fn fresh_label(&mut self) -> Label {
        let label = Label(self.label);
        self.label += 1;
        label
    }
}
