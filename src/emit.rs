//! Word emitters. All of them consume words in the order given, which is the
//! ascending address order produced by the encoder.

use clap::ValueEnum;
use serde::Serialize;

use crate::encoder::EncodedWord;
use crate::source::LabelTable;
use crate::tokenizer::Tokens;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
pub enum EmitFormat {
    /// Raw 4-byte big-endian words
    Bin,
    /// One 32-character bit string per line
    Text,
    /// One 8-digit hex word per line
    Hex,
}

impl EmitFormat {
    pub fn default_path(self) -> &'static str {
        match self {
            EmitFormat::Bin => "output.bin",
            EmitFormat::Text => "output.txt",
            EmitFormat::Hex => "output.hex",
        }
    }

    pub fn render(self, words: &[EncodedWord]) -> Vec<u8> {
        match self {
            EmitFormat::Bin => to_bytes(words),
            EmitFormat::Text => to_bitstrings(words).into_bytes(),
            EmitFormat::Hex => to_hex(words).into_bytes(),
        }
    }
}

pub fn to_bytes(words: &[EncodedWord]) -> Vec<u8> {
    words.iter().flat_map(|w| w.value.to_be_bytes()).collect()
}

pub fn to_bitstrings(words: &[EncodedWord]) -> String {
    words.iter().map(|w| format!("{}\n", w.bits())).collect()
}

pub fn to_hex(words: &[EncodedWord]) -> String {
    words.iter().map(|w| format!("{:08X}\n", w.value)).collect()
}

/// `ADDR: bits` per word, address in upper-case hex.
pub fn listing(words: &[EncodedWord]) -> String {
    words.iter().map(|w| format!("{:X}: {}\n", w.address, w.bits())).collect()
}

/// Token dump: one line per instruction with its modifier bits, then the
/// label table.
pub fn token_dump(tokens: &[Tokens], labels: &LabelTable) -> String {
    let instrs = tokens.iter().map(|t| {
        let operands: String = t.operands.iter().map(|op| format!(", {op}")).collect();
        format!("{:X}: [{}{operands}] {:02b}\n", t.address, t.op.mnemonic(), t.modifier.bits())
    });
    let names = labels.iter().map(|(name, addr)| format!("{name} = {addr:#x}\n"));
    instrs.chain(names).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn words() -> Vec<EncodedWord> {
        vec![
            EncodedWord { address: 0x100, value: 0x6800_0000 },
            EncodedWord { address: 0x104, value: 0xF800_0000 },
        ]
    }

    #[test]
    fn bytes_are_big_endian() {
        assert_eq!(to_bytes(&words()), vec![0x68, 0, 0, 0, 0xF8, 0, 0, 0]);
    }

    #[test]
    fn text_forms() {
        assert_eq!(
            to_bitstrings(&words()),
            "01101000000000000000000000000000\n11111000000000000000000000000000\n"
        );
        assert_eq!(to_hex(&words()), "68000000\nF8000000\n");
        assert_eq!(
            listing(&words()),
            "100: 01101000000000000000000000000000\n104: 11111000000000000000000000000000\n"
        );
    }

    #[test]
    fn token_dump_lists_instructions_then_labels() {
        let asm = crate::assemble(".top:\naddu r1, r2, 5\nb .top\n").unwrap();
        assert_eq!(
            token_dump(&asm.tokens, &asm.program.labels),
            "0: [add, r1, r2, 5] 01\n4: [b, .top] 00\n.top = 0x0\n"
        );
    }
}
