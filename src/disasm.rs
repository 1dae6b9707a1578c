use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decoder::{Decoded, Decoder};
use crate::instructions::Category;
use crate::isa::simplerisc::SimpleRiscDecoder;

/// Rendered in place of words whose opcode or fields do not decode.
pub const UNKNOWN: &str = "UNKNOWN";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisasmConfig {
    /// Address of the first word; branch targets are computed from it.
    pub base: u32,
    /// Keep the bit string in front of each rendered line.
    pub include_binary: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisasmLine {
    pub address: u32,
    pub bits: String,
    pub text: String,
}

impl DisasmLine {
    pub fn render(&self, include_binary: bool) -> String {
        if include_binary {
            format!("{}  # {}", self.bits, self.text)
        } else {
            self.text.clone()
        }
    }
}

/// Render a decoded word. `pc` is the word's own address, used to turn branch
/// offsets back into absolute targets.
pub fn fmt_decoded(d: &Decoded, pc: u32) -> String {
    let mn = d.op.mnemonic();
    match d.op.category() {
        Category::NoOperand => mn.to_string(),
        Category::Branch => format!("{mn} 0x{:X}", pc.wrapping_add(d.value as u32)),
        Category::Unary => {
            if d.imm { format!("{mn} r{}, {}", d.rd, d.value) } else { format!("{mn} r{}, r{}", d.rd, d.rs2) }
        }
        // register form repeats rs1, matching the reference disassembler
        Category::Compare => {
            if d.imm { format!("{mn} r{}, {}", d.rs1, d.value) } else { format!("{mn} r{}, r{}", d.rs1, d.rs1) }
        }
        Category::Arith => {
            if d.imm {
                format!("{mn}{} r{}, r{}, {}", d.modifier.suffix(), d.rd, d.rs1, d.value)
            } else {
                format!("{mn} r{}, r{}, r{}", d.rd, d.rs1, d.rs2)
            }
        }
        // the dot grammar takes no sign, so negative offsets use the plain operand list
        Category::Memory if d.value < 0 => format!("{mn} r{}, r{}, {}", d.rd, d.rs1, d.value),
        Category::Memory => format!("{mn} r{}.{}[r{}]", d.rd, d.value, d.rs1),
    }
}

fn decode_line<D: Decoder>(dec: &D, bits: String, word: Option<u32>, pc: u32) -> DisasmLine {
    let text = word
        .and_then(|w| dec.decode(w))
        .map(|d| fmt_decoded(&d, pc))
        .unwrap_or_else(|| UNKNOWN.to_string());
    DisasmLine { address: pc, bits, text }
}

/// Decode newline separated 32-character bit strings. Lines of any other
/// length are skipped and do not advance the address.
pub fn disassemble(text: &str, cfg: &DisasmConfig) -> Vec<DisasmLine> {
    let dec = SimpleRiscDecoder::new();
    let mut pc = cfg.base;
    let mut out = Vec::new();
    for raw in text.lines() {
        let bits = raw.trim();
        if bits.chars().count() != 32 {
            continue;
        }
        let word = if bits.chars().all(|c| c == '0' || c == '1') {
            u32::from_str_radix(bits, 2).ok()
        } else {
            None
        };
        out.push(decode_line(&dec, bits.to_string(), word, pc));
        pc = pc.wrapping_add(4);
    }
    debug!(lines = out.len(), base = cfg.base, "disassembled");
    out
}

/// Decode words that are already in memory form.
pub fn disassemble_words(words: &[u32], cfg: &DisasmConfig) -> Vec<DisasmLine> {
    let dec = SimpleRiscDecoder::new();
    let mut pc = cfg.base;
    let mut out = Vec::with_capacity(words.len());
    for &w in words {
        out.push(decode_line(&dec, format!("{w:032b}"), Some(w), pc));
        pc = pc.wrapping_add(4);
    }
    out
}

/// Render lines as the text listing, honouring `cfg.include_binary`.
pub fn render_all(lines: &[DisasmLine], cfg: &DisasmConfig) -> String {
    lines.iter().map(|l| l.render(cfg.include_binary) + "\n").collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn skips_noise_lines_without_advancing() {
        let text = "\n01101000000000000000000000000000\nnot a word\n\n10010000000000000000000000000100\n";
        let lines = disassemble(text, &DisasmConfig::default());
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "nop");
        assert_eq!(lines[1].address, 4);
        assert_eq!(lines[1].text, "b 0x8");
    }

    #[test]
    fn non_binary_word_is_unknown() {
        let text = "0110100000000000000000000000000x\n";
        let lines = disassemble(text, &DisasmConfig::default());
        assert_eq!(lines[0].text, UNKNOWN);
    }

    #[test]
    fn include_binary_keeps_bits() {
        let text = "11111000000000000000000000000000\n10101000000000000000000000000000\n";
        let cfg = DisasmConfig { base: 0, include_binary: true };
        let lines = disassemble(text, &cfg);
        assert_eq!(
            render_all(&lines, &cfg),
            "11111000000000000000000000000000  # hlt\n10101000000000000000000000000000  # UNKNOWN\n"
        );
        assert_eq!(render_all(&lines, &DisasmConfig::default()), "hlt\nUNKNOWN\n");
    }

    #[test]
    fn base_shifts_branch_targets() {
        let cfg = DisasmConfig { base: 0x100, include_binary: false };
        let lines = disassemble_words(&[0b10011 << 27 | 0x7FF_FFFC], &cfg);
        assert_eq!(lines[0].text, "call 0xFC");
    }

    #[test]
    fn negative_memory_offset_uses_operand_list() {
        // st r3, r4, -4
        let lines = disassemble_words(&[0b01111 << 27 | 1 << 26 | 3 << 22 | 4 << 18 | 0xFFFC], &DisasmConfig::default());
        assert_eq!(lines[0].text, "st r3, r4, -4");
    }
}
