use crate::decoder::{Decoded, Decoder};
use crate::fields::{self, sign_ext, IMM16, IMM_BITS, IMM_FLAG, MODE, OFFSET, OFFSET_BITS, OPCODE, RD, RS1, RS2};
use crate::instructions::{Category, Modifier, Op};

/// SimpleRisc word decoder. Field layout is the exact mirror of
/// `encoder::encode_instruction`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRiscDecoder;

impl SimpleRiscDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for SimpleRiscDecoder {
    fn decode(&self, raw32: u32) -> Option<Decoded> {
        let op = Op::from_opcode(fields::get(raw32, OPCODE) as u8)?;
        let imm = fields::flag(raw32, IMM_FLAG);
        let imm16 = fields::get(raw32, IMM16);
        let mut d = Decoded {
            op,
            imm,
            rd: fields::get(raw32, RD) as u8,
            rs1: fields::get(raw32, RS1) as u8,
            rs2: 0,
            modifier: Modifier::None,
            value: 0,
        };

        match op.category() {
            Category::NoOperand => {}
            Category::Branch => {
                d.imm = false;
                d.value = sign_ext(fields::get(raw32, OFFSET), OFFSET_BITS);
            }
            Category::Unary | Category::Compare => {
                if imm {
                    d.value = sign_ext(imm16, IMM_BITS);
                } else {
                    d.rs2 = fields::get(raw32, RS2) as u8;
                }
            }
            Category::Arith => {
                if imm {
                    // 0b11 is never produced by the encoder; read it as no modifier
                    d.modifier = Modifier::from_bits(fields::get(raw32, MODE)).unwrap_or_default();
                    d.value = if d.modifier.is_signed() {
                        sign_ext(imm16, IMM_BITS)
                    } else {
                        imm16 as i32
                    };
                } else {
                    d.rs2 = fields::get(raw32, RS2) as u8;
                }
            }
            // the encoder always sets the flag, but the layout is read either way
            Category::Memory => d.value = sign_ext(imm16, IMM_BITS),
        }
        Some(d)
    }
}
