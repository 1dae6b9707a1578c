use serde::{Deserialize, Serialize};

/// Operand layout family. Decides how the 27 bits after the opcode are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    NoOperand,
    Branch,
    Unary,
    Compare,
    Arith,
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Cmp,
    And,
    Or,
    Not,
    Mov,
    Lsl,
    Lsr,
    Asr,
    Nop,
    Ld,
    St,
    Beq,
    Bgt,
    B,
    Call,
    Ret,
    Hlt,
}

#[derive(Debug, Clone, Copy)]
pub struct InstrDesc {
    pub op: Op,
    pub mnemonic: &'static str,
    pub opcode: u8,
    pub category: Category,
}

const fn row(op: Op, mnemonic: &'static str, opcode: u8, category: Category) -> InstrDesc {
    InstrDesc { op, mnemonic, opcode, category }
}

/// The one opcode table. Encoding and decoding both look things up here.
pub const TABLE: &[InstrDesc] = &[
    row(Op::Add, "add", 0b00000, Category::Arith),
    row(Op::Sub, "sub", 0b00001, Category::Arith),
    row(Op::Mul, "mul", 0b00010, Category::Arith),
    row(Op::Div, "div", 0b00011, Category::Arith),
    row(Op::Mod, "mod", 0b00100, Category::Arith),
    row(Op::Cmp, "cmp", 0b00101, Category::Compare),
    row(Op::And, "and", 0b00110, Category::Arith),
    row(Op::Or, "or", 0b00111, Category::Arith),
    row(Op::Not, "not", 0b01000, Category::Unary),
    row(Op::Mov, "mov", 0b01001, Category::Unary),
    row(Op::Lsl, "lsl", 0b01010, Category::Arith),
    row(Op::Lsr, "lsr", 0b01011, Category::Arith),
    row(Op::Asr, "asr", 0b01100, Category::Arith),
    row(Op::Nop, "nop", 0b01101, Category::NoOperand),
    row(Op::Ld, "ld", 0b01110, Category::Memory),
    row(Op::St, "st", 0b01111, Category::Memory),
    row(Op::Beq, "beq", 0b10000, Category::Branch),
    row(Op::Bgt, "bgt", 0b10001, Category::Branch),
    row(Op::B, "b", 0b10010, Category::Branch),
    row(Op::Call, "call", 0b10011, Category::Branch),
    row(Op::Ret, "ret", 0b10100, Category::NoOperand),
    row(Op::Hlt, "hlt", 0b11111, Category::NoOperand),
];

impl Op {
    pub fn from_mnemonic(mnemonic: &str) -> Option<Op> {
        TABLE.iter().find(|d| d.mnemonic == mnemonic).map(|d| d.op)
    }

    pub fn from_opcode(opcode: u8) -> Option<Op> {
        TABLE.iter().find(|d| d.opcode == opcode).map(|d| d.op)
    }

    pub fn desc(self) -> &'static InstrDesc {
        TABLE
            .iter()
            .find(|d| d.op == self)
            .unwrap_or_else(|| unreachable!("{self:?} missing from TABLE"))
    }

    pub fn mnemonic(self) -> &'static str {
        self.desc().mnemonic
    }

    pub fn opcode(self) -> u8 {
        self.desc().opcode
    }

    pub fn category(self) -> Category {
        self.desc().category
    }

    /// Only the arithmetic/bitwise group takes the `u` and `h` suffixes.
    pub fn accepts_modifier(self) -> bool {
        self.category() == Category::Arith
    }
}

/// Immediate interpretation suffix on arithmetic mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Modifier {
    #[default]
    None,
    Unsigned,
    High,
}

impl Modifier {
    pub fn from_suffix(c: char) -> Option<Modifier> {
        match c {
            'u' => Some(Modifier::Unsigned),
            'h' => Some(Modifier::High),
            _ => None,
        }
    }

    /// The two `mod` bits of an immediate-form arithmetic word.
    pub fn bits(self) -> u32 {
        match self {
            Modifier::None => 0b00,
            Modifier::Unsigned => 0b01,
            Modifier::High => 0b10,
        }
    }

    pub fn from_bits(bits: u32) -> Option<Modifier> {
        match bits {
            0b00 => Some(Modifier::None),
            0b01 => Some(Modifier::Unsigned),
            0b10 => Some(Modifier::High),
            _ => None,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Modifier::None => "",
            Modifier::Unsigned => "u",
            Modifier::High => "h",
        }
    }

    pub fn is_signed(self) -> bool {
        self != Modifier::Unsigned
    }
}
