use std::convert::TryFrom;

/// ## Virtual machine instruction set
///
/// The machine has no registers. Every operation is performed on the
/// stack. An instruction is one opcode byte; `Constant` carries a
/// one-byte constant pool index and `ConstantLong` a three-byte
/// big-endian index. All other instructions have no operand.
///
/// For example: `1 + 2 * 3` compiles to
/// `[Constant 0, Constant 1, Constant 2, Mul, Add, Return]`

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum Opcode {
    Constant = 0,
    ConstantLong = 1,
    Nil = 2,
    True = 3,
    False = 4,
    Eq = 5,
    NotEq = 6,
    Gt = 7,
    GtEq = 8,
    Lt = 9,
    LtEq = 10,
    Add = 11,
    Sub = 12,
    Mul = 13,
    Div = 14,
    Not = 15,
    Neg = 16,
    Return = 17,
}

impl TryFrom<u8> for Opcode {
    type Error = u8;

    fn try_from(byte: u8) -> Result<Opcode, u8> {
        use Opcode::*;
        Ok(match byte {
            0 => Constant,
            1 => ConstantLong,
            2 => Nil,
            3 => True,
            4 => False,
            5 => Eq,
            6 => NotEq,
            7 => Gt,
            8 => GtEq,
            9 => Lt,
            10 => LtEq,
            11 => Add,
            12 => Sub,
            13 => Mul,
            14 => Div,
            15 => Not,
            16 => Neg,
            17 => Return,
            _ => return Err(byte),
        })
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Opcode::*;
        match self {
            Constant => write!(f, "CONSTANT"),
            ConstantLong => write!(f, "CONSTLONG"),
            Nil => write!(f, "NIL"),
            True => write!(f, "TRUE"),
            False => write!(f, "FALSE"),
            Eq => write!(f, "EQ"),
            NotEq => write!(f, "NOTEQ"),
            Gt => write!(f, "GT"),
            GtEq => write!(f, "GTEQ"),
            Lt => write!(f, "LT"),
            LtEq => write!(f, "LTEQ"),
            Add => write!(f, "ADD"),
            Sub => write!(f, "SUB"),
            Mul => write!(f, "MUL"),
            Div => write!(f, "DIV"),
            Not => write!(f, "NOT"),
            Neg => write!(f, "NEG"),
            Return => write!(f, "RETURN"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for byte in 0..=17u8 {
            let opcode = Opcode::try_from(byte).unwrap();
            assert_eq!(opcode as u8, byte);
        }
        assert_eq!(Opcode::try_from(18), Err(18));
        assert_eq!(Opcode::try_from(255), Err(255));
    }
}
