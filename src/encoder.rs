use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{AsmError, Diagnostic, FieldError};
use crate::fields::{self, IMM16, IMM_BITS, IMM_FLAG, MODE, OFFSET, OFFSET_BITS, OPCODE, RD, RS1, RS2};
use crate::instructions::Category;
use crate::source::LabelTable;
use crate::tokenizer::Tokens;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EncodedWord {
    pub address: u32,
    pub value: u32,
}

impl EncodedWord {
    /// The word as 32 `0`/`1` characters, MSB first.
    pub fn bits(&self) -> String {
        format!("{:032b}", self.value)
    }
}

/// What happened to one instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Word(u32),
    Skipped(Diagnostic),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Encoded {
    pub words: Vec<EncodedWord>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Parse an integer literal: decimal with optional sign, `0x` hex or `0b`
/// binary. `Ok(None)` means the text is not a number at all (so it is treated
/// as a register); a number too large for 64 bits is an error.
pub fn parse_int(text: &str) -> Result<Option<i64>, FieldError> {
    let (digits, radix) = if let Some(h) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        (h, 16)
    } else if let Some(b) = text.strip_prefix("0b").or_else(|| text.strip_prefix("0B")) {
        (b, 2)
    } else {
        (text, 10)
    };
    let unsigned = if radix == 10 {
        digits.strip_prefix(['+', '-']).unwrap_or(digits)
    } else {
        digits
    };
    if unsigned.is_empty() || !unsigned.chars().all(|c| c.is_digit(radix)) {
        return Ok(None);
    }
    i64::from_str_radix(digits, radix)
        .map(Some)
        .map_err(|_| FieldError::LiteralOverflow(text.to_string()))
}

/// `r0`..`r15` to its 4-bit register number.
pub fn parse_reg(text: &str) -> Result<u32, FieldError> {
    let digits = text
        .strip_prefix('r')
        .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(|| FieldError::BadRegister(text.to_string()))?;
    match digits.parse::<u32>() {
        Ok(n) if n <= 15 => Ok(n),
        _ => Err(FieldError::RegisterRange(text.to_string())),
    }
}

/// Range-check `value` for a `bits`-wide field and return its two's
/// complement bit pattern.
pub fn fit(value: i64, bits: u32, signed: bool) -> Result<u32, FieldError> {
    let (lo, hi, kind) = if signed {
        (-(1i64 << (bits - 1)), (1i64 << (bits - 1)) - 1, "signed")
    } else {
        (0, (1i64 << bits) - 1, "unsigned")
    };
    if value < lo || value > hi {
        return Err(FieldError::ImmRange { value, bits, kind });
    }
    Ok((value as u32) & fields::mask(bits))
}

fn arity(category: Category) -> usize {
    match category {
        Category::NoOperand => 0,
        Category::Branch => 1,
        Category::Unary | Category::Compare => 2,
        Category::Arith | Category::Memory => 3,
    }
}

struct Ctx<'a> {
    t: &'a Tokens,
}

impl Ctx<'_> {
    fn wrap(&self, source: FieldError) -> AsmError {
        AsmError::Field { address: self.t.address, mnemonic: self.t.mnemonic(), source }
    }

    fn operand(&self, i: usize) -> &str {
        &self.t.operands[i]
    }

    fn reg(&self, i: usize) -> Result<u32, AsmError> {
        parse_reg(self.operand(i)).map_err(|e| self.wrap(e))
    }

    fn int(&self, i: usize) -> Result<Option<i64>, AsmError> {
        parse_int(self.operand(i)).map_err(|e| self.wrap(e))
    }

    fn fit(&self, value: i64, bits: u32, signed: bool) -> Result<u32, AsmError> {
        fit(value, bits, signed).map_err(|e| self.wrap(e))
    }
}

/// Encode one tokenized instruction against a resolved label table.
pub fn encode_instruction(t: &Tokens, labels: &LabelTable) -> Result<Outcome, AsmError> {
    let category = t.op.category();
    let expected = arity(category);
    let found = t.operands.len();
    if found < expected {
        return Err(AsmError::MissingOperand {
            address: t.address,
            mnemonic: t.op.mnemonic(),
            expected,
            found,
        });
    }
    if found > expected {
        warn!(address = t.address, mnemonic = t.op.mnemonic(), extra = ?&t.operands[expected..], "ignoring surplus operands");
    }

    let cx = Ctx { t };
    let mut raw = 0u32;
    fields::put(&mut raw, OPCODE, u32::from(t.op.opcode()));

    match category {
        Category::NoOperand => {}
        Category::Branch => {
            let label = cx.operand(0);
            let Some(target) = labels.get(label) else {
                return Ok(Outcome::Skipped(Diagnostic::UndefinedLabel {
                    address: t.address,
                    label: label.to_string(),
                }));
            };
            let offset = i64::from(target) - i64::from(t.address);
            fields::put(&mut raw, OFFSET, cx.fit(offset, OFFSET_BITS, true)?);
        }
        Category::Unary => {
            fields::put(&mut raw, RD, cx.reg(0)?);
            match cx.int(1)? {
                Some(v) => {
                    fields::set_flag(&mut raw, IMM_FLAG, true);
                    fields::put(&mut raw, IMM16, cx.fit(v, IMM_BITS, true)?);
                }
                None => fields::put(&mut raw, RS2, cx.reg(1)?),
            }
        }
        Category::Compare => {
            // rd stays zero
            fields::put(&mut raw, RS1, cx.reg(0)?);
            match cx.int(1)? {
                Some(v) => {
                    fields::set_flag(&mut raw, IMM_FLAG, true);
                    fields::put(&mut raw, IMM16, cx.fit(v, IMM_BITS, true)?);
                }
                None => fields::put(&mut raw, RS2, cx.reg(1)?),
            }
        }
        Category::Arith => {
            fields::put(&mut raw, RD, cx.reg(0)?);
            fields::put(&mut raw, RS1, cx.reg(1)?);
            match cx.int(2)? {
                Some(v) => {
                    fields::set_flag(&mut raw, IMM_FLAG, true);
                    fields::put(&mut raw, MODE, t.modifier.bits());
                    fields::put(&mut raw, IMM16, cx.fit(v, IMM_BITS, t.modifier.is_signed())?);
                }
                // register form is full precision, the suffix has no field
                None => fields::put(&mut raw, RS2, cx.reg(2)?),
            }
        }
        Category::Memory => {
            let Some(offset) = cx.int(2)? else {
                return Ok(Outcome::Skipped(Diagnostic::MemoryNeedsImmediate {
                    address: t.address,
                    mnemonic: t.op.mnemonic(),
                }));
            };
            fields::set_flag(&mut raw, IMM_FLAG, true);
            fields::put(&mut raw, RD, cx.reg(0)?);
            fields::put(&mut raw, RS1, cx.reg(1)?);
            fields::put(&mut raw, IMM16, cx.fit(offset, IMM_BITS, true)?);
        }
    }
    Ok(Outcome::Word(raw))
}

/// Encode every instruction in order. Skipped instructions leave a hole; the
/// words after them keep their addresses.
pub fn encode(tokens: &[Tokens], labels: &LabelTable) -> Result<Encoded, AsmError> {
    let mut out = Encoded::default();
    for t in tokens {
        match encode_instruction(t, labels)? {
            Outcome::Word(value) => out.words.push(EncodedWord { address: t.address, value }),
            Outcome::Skipped(diag) => {
                warn!("{diag}");
                out.diagnostics.push(diag);
            }
        }
    }
    debug!(words = out.words.len(), skipped = out.diagnostics.len(), "encoded");
    Ok(out)
}
