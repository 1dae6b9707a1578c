pub mod decoder;
pub mod disasm;
pub mod emit;
pub mod encoder;
pub mod error;
pub mod fields;
pub mod instructions;
pub mod source;
pub mod tokenizer;

pub mod isa {
    pub mod simplerisc;
}

pub use decoder::{Decoded, Decoder};
pub use disasm::{disassemble, DisasmConfig, DisasmLine};
pub use encoder::{EncodedWord, Outcome};
pub use error::{AsmError, Diagnostic, FieldError};
pub use instructions::{Category, Modifier, Op};
pub use isa::simplerisc::SimpleRiscDecoder;
pub use source::{LabelTable, Program, SourceLine};
pub use tokenizer::Tokens;

use std::path::Path;

/// Everything one assembler run produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
    pub program: Program,
    pub tokens: Vec<Tokens>,
    pub words: Vec<EncodedWord>,
    pub diagnostics: Vec<Diagnostic>,
}

fn finish(program: Program) -> Result<Assembly, AsmError> {
    let tokens = tokenizer::tokenize_all(&program)?;
    let encoded = encoder::encode(&tokens, &program.labels)?;
    Ok(Assembly {
        program,
        tokens,
        words: encoded.words,
        diagnostics: encoded.diagnostics,
    })
}

/// Run the whole encoder pipeline over source text.
pub fn assemble(text: &str) -> Result<Assembly, AsmError> {
    finish(source::resolve(text)?)
}

pub fn assemble_file(path: &Path) -> Result<Assembly, AsmError> {
    finish(source::load_file(path)?.relocate())
}
