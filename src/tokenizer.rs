use serde::Serialize;
use tracing::debug;

use crate::error::AsmError;
use crate::instructions::{Modifier, Op};
use crate::source::{Program, SourceLine};

/// One instruction split into its parts. Operands are kept as text; the
/// encoder decides per category whether each is a register or an immediate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tokens {
    pub address: u32,
    pub op: Op,
    pub modifier: Modifier,
    pub operands: Vec<String>,
}

impl Tokens {
    /// Mnemonic as written, suffix included.
    pub fn mnemonic(&self) -> String {
        format!("{}{}", self.op.mnemonic(), self.modifier.suffix())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mem {
    Mnemonic,
    Gap,
    Dest,
    Imm,
    Base,
}

fn is_word(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_mem_imm(s: &str) -> bool {
    if let Some(h) = s.strip_prefix("0x") {
        !h.is_empty() && h.chars().all(|c| c.is_ascii_hexdigit())
    } else if let Some(b) = s.strip_prefix("0b") {
        !b.is_empty() && b.chars().all(|c| c == '0' || c == '1')
    } else {
        !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
    }
}

/// Match `MNEMONIC RD.IMM[BASE]` and return `[mnemonic, rd, base, imm]`.
///
/// The immediate is everything between the `.` and the first `[`, and must be
/// decimal, `0x` hex or `0b` binary. Anything after the closing `]` is
/// ignored. `None` means the line does not have this shape; the caller then
/// falls back to [`split_generic`].
pub fn split_memory(line: &str) -> Option<[&str; 4]> {
    let mut state = Mem::Mnemonic;
    let mut start = 0;
    let (mut mnemonic, mut dest, mut imm) = ("", "", "");

    for (i, c) in line.char_indices() {
        state = match state {
            Mem::Mnemonic if is_word(c) => Mem::Mnemonic,
            Mem::Mnemonic if c.is_whitespace() && i > 0 => {
                mnemonic = &line[..i];
                Mem::Gap
            }
            Mem::Gap if c.is_whitespace() => Mem::Gap,
            Mem::Gap if is_word(c) => {
                start = i;
                Mem::Dest
            }
            Mem::Dest if is_word(c) => Mem::Dest,
            Mem::Dest if c == '.' => {
                dest = &line[start..i];
                start = i + 1;
                Mem::Imm
            }
            Mem::Imm if c == '[' => {
                imm = &line[start..i];
                if !is_mem_imm(imm) {
                    return None;
                }
                start = i + 1;
                Mem::Base
            }
            Mem::Imm => Mem::Imm,
            Mem::Base if is_word(c) => Mem::Base,
            Mem::Base if c == ']' && i > start => {
                return Some([mnemonic, dest, &line[start..i], imm]);
            }
            _ => return None,
        };
    }
    None
}

/// Spaces and commas both separate tokens; empty fields are dropped.
pub fn split_generic(line: &str) -> Vec<&str> {
    line.split([' ', ',']).filter(|t| !t.is_empty()).collect()
}

/// Resolve a written mnemonic to its table entry and suffix modifier.
pub fn parse_mnemonic(mnemonic: &str, address: u32) -> Result<(Op, Modifier), AsmError> {
    if let Some(modifier) = mnemonic.chars().last().and_then(Modifier::from_suffix) {
        let base = &mnemonic[..mnemonic.len() - 1];
        return match Op::from_mnemonic(base) {
            Some(op) if op.accepts_modifier() => Ok((op, modifier)),
            _ => Err(AsmError::IllegalModifier { address, mnemonic: mnemonic.to_string() }),
        };
    }
    Op::from_mnemonic(mnemonic)
        .map(|op| (op, Modifier::None))
        .ok_or_else(|| AsmError::UnknownMnemonic { address, mnemonic: mnemonic.to_string() })
}

/// Tokenize one instruction line. `Ok(None)` for a line with no tokens.
pub fn tokenize(line: &SourceLine) -> Result<Option<Tokens>, AsmError> {
    let text = line.text.as_str();
    let memory = if text.starts_with("ld") || text.starts_with("st") {
        let m = split_memory(text);
        if m.is_none() {
            debug!(address = line.address, text, "no RD.IMM[BASE] match, using generic split");
        }
        m
    } else {
        None
    };
    let parts = match memory {
        Some(m) => m.to_vec(),
        None => split_generic(text),
    };
    let Some((&mnemonic, operands)) = parts.split_first() else {
        return Ok(None);
    };
    let (op, modifier) = parse_mnemonic(mnemonic, line.address)?;
    Ok(Some(Tokens {
        address: line.address,
        op,
        modifier,
        operands: operands.iter().map(|s| s.to_string()).collect(),
    }))
}

pub fn tokenize_all(program: &Program) -> Result<Vec<Tokens>, AsmError> {
    let mut out = Vec::with_capacity(program.lines.len());
    for line in &program.lines {
        if let Some(tokens) = tokenize(line)? {
            out.push(tokens);
        }
    }
    debug!(count = out.len(), "tokenized");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str) -> SourceLine {
        SourceLine { address: 0, text: text.to_string() }
    }

    #[test]
    fn memory_dot_syntax() {
        assert_eq!(split_memory("ld r1.24[r2]"), Some(["ld", "r1", "r2", "24"]));
        assert_eq!(split_memory("st  r3.0x1F[r4]"), Some(["st", "r3", "r4", "0x1F"]));
        assert_eq!(split_memory("ld r1.0b101[r2] trailing"), Some(["ld", "r1", "r2", "0b101"]));
    }

    #[test]
    fn memory_shapes_that_do_not_match() {
        assert_eq!(split_memory("ld r1, 24[r2]"), None);
        assert_eq!(split_memory("ld r1.-4[r2]"), None);
        assert_eq!(split_memory("ld r1.0x[r2]"), None);
        assert_eq!(split_memory("ld r1.24[]"), None);
        assert_eq!(split_memory("ld r1.24[r2"), None);
        assert_eq!(split_memory("ld r1, r2, r3"), None);
    }

    #[test]
    fn generic_split_drops_empty_fields() {
        assert_eq!(split_generic("add r1,  r2 ,r3"), vec!["add", "r1", "r2", "r3"]);
        assert_eq!(split_generic("ld r1, 24[r2]"), vec!["ld", "r1", "24[r2]"]);
        assert!(split_generic(", ,").is_empty());
    }

    #[test]
    fn memory_tokens_are_reordered() {
        let t = tokenize(&line("ld r1.24[r2]")).unwrap().unwrap();
        assert_eq!(t.op, Op::Ld);
        assert_eq!(t.operands, vec!["r1", "r2", "24"]);
    }

    #[test]
    fn modifiers() {
        let t = tokenize(&line("addu r1, r2, 5")).unwrap().unwrap();
        assert_eq!((t.op, t.modifier), (Op::Add, Modifier::Unsigned));
        assert_eq!(t.mnemonic(), "addu");
        let t = tokenize(&line("lslh r1, r2, 5")).unwrap().unwrap();
        assert_eq!((t.op, t.modifier), (Op::Lsl, Modifier::High));
    }

    #[test]
    fn bad_mnemonics_are_fatal() {
        assert!(matches!(
            tokenize(&line("movu r1, 2")),
            Err(AsmError::IllegalModifier { .. })
        ));
        assert!(matches!(
            tokenize(&line("jmp .x")),
            Err(AsmError::UnknownMnemonic { .. })
        ));
        assert!(matches!(
            tokenize(&line("ldu r1.4[r2]")),
            Err(AsmError::IllegalModifier { .. })
        ));
    }

    #[test]
    fn separator_only_line_is_skipped() {
        assert_eq!(tokenize(&line(",")).unwrap(), None);
    }
}
