use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumString, Display)]
#[strum(ascii_case_insensitive)]
pub enum Mnemonic {
    #[strum(serialize = "declare")]
    DECLARE,
    LOAD,
    STORE,
    ADD,
    SUB,
    CMP,
    IFGT,
    GOTO,
    RETURN,
}

impl Mnemonic {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.parse::<Self>() {
            Ok(a) => Ok(a),
            Err(_) => Err(format!("Undefined Op: {s}")),
        }
    }

    /// Number of comma separated operands in the listing form
    pub fn arity(&self) -> usize {
        use Mnemonic::*;
        match self {
            DECLARE => 2,
            LOAD | STORE | ADD | SUB | CMP => 2,
            IFGT | GOTO | RETURN => 1,
        }
    }
}

#[test]
fn test() {
    assert_eq!(Mnemonic::parse("load"), Ok(Mnemonic::LOAD));
    assert_eq!(Mnemonic::parse("DECLARE"), Ok(Mnemonic::DECLARE));
    assert_eq!(Mnemonic::DECLARE.to_string(), "declare");
    assert_eq!(Mnemonic::IFGT.to_string(), "IFGT");
    assert!(Mnemonic::parse("hoge").is_err());
}
