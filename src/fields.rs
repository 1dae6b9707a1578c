//! Bit positions inside an instruction word, counted MSB first: bit 0 is the
//! top bit of the opcode and bit 31 the last bit of the immediate.

use std::ops::Range;

use bitvec::prelude::*;

pub const OPCODE: Range<usize> = 0..5;
pub const IMM_FLAG: usize = 5;
pub const RD: Range<usize> = 6..10;
pub const RS1: Range<usize> = 10..14;
/// Immediate-form modifier bits. Overlaps the top of `RS2` in register form.
pub const MODE: Range<usize> = 14..16;
pub const RS2: Range<usize> = 14..18;
pub const IMM16: Range<usize> = 16..32;
pub const OFFSET: Range<usize> = 5..32;

pub const OFFSET_BITS: u32 = 27;
pub const IMM_BITS: u32 = 16;

pub fn mask(bits: u32) -> u32 {
    if bits >= 32 { u32::MAX } else { (1u32 << bits) - 1 }
}

pub fn get(raw: u32, field: Range<usize>) -> u32 {
    raw.view_bits::<Msb0>()[field].load_be::<u32>()
}

pub fn put(raw: &mut u32, field: Range<usize>, value: u32) {
    let width = (field.end - field.start) as u32;
    raw.view_bits_mut::<Msb0>()[field].store_be::<u32>(value & mask(width));
}

pub fn flag(raw: u32, bit: usize) -> bool {
    raw.view_bits::<Msb0>()[bit]
}

pub fn set_flag(raw: &mut u32, bit: usize, on: bool) {
    raw.view_bits_mut::<Msb0>().set(bit, on);
}

pub fn sign_ext(v: u32, bits: u32) -> i32 {
    let s = 32 - bits;
    ((v << s) as i32) >> s
}
