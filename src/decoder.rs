use serde::{Deserialize, Serialize};

use crate::instructions::{Modifier, Op};

/// Fields pulled out of one instruction word. Which of them are meaningful
/// depends on `op.category()` and the immediate flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decoded {
    pub op: Op,
    pub imm: bool,
    pub rd: u8,
    pub rs1: u8,
    pub rs2: u8,
    pub modifier: Modifier,
    /// Immediate, memory offset or branch offset, already sign-handled.
    pub value: i32,
}

pub trait Decoder {
    /// `None` for words that do not decode to a known instruction.
    fn decode(&self, raw32: u32) -> Option<Decoded>;
}
