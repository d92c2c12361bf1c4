use serde::{Deserialize, Serialize};
use std::fmt;

/// Virtual register. The register file is unbounded; nothing maps these to
/// hardware registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Reg(pub usize);

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

impl Reg {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.strip_prefix(['R', 'r']) {
            Some(num) if !num.is_empty() && num.bytes().all(|b| b.is_ascii_digit()) => num
                .parse::<usize>()
                .map(Reg)
                .map_err(|_| format!("Unknown reg name: {s}")),
            _ => Err(format!("Unknown reg name: {s}")),
        }
    }
}

/// Hands out R0, R1, ... in order. Registers are never freed or reused, so
/// one `RegFile` belongs to exactly one code generation run.
#[derive(Debug, Default)]
pub struct RegFile {
    next: usize,
}

impl RegFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fresh(&mut self) -> Reg {
        let reg = Reg(self.next);
        self.next += 1;
        reg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse() {
        assert_eq!(Reg::parse("R0"), Ok(Reg(0)));
        assert_eq!(Reg::parse("r12"), Ok(Reg(12)));
        assert!(Reg::parse("R").is_err());
        assert!(Reg::parse("Rx").is_err());
        assert!(Reg::parse("x1").is_err());
    }

    #[test]
    fn fresh_is_monotonic() {
        let mut regs = RegFile::new();
        assert_eq!(regs.fresh(), Reg(0));
        assert_eq!(regs.fresh(), Reg(1));
        assert_eq!(regs.fresh(), Reg(2));
    }
}
