use std::path::PathBuf;

/// Problems with a single operand field. Always fatal once they reach the
/// encoder; wrapped in [`AsmError::Field`] with the offending instruction.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("invalid register format `{0}`, expected r0 to r15")]
    BadRegister(String),
    #[error("register `{0}` out of range (must be r0 to r15)")]
    RegisterRange(String),
    #[error("{value} does not fit in a {kind} {bits}-bit field")]
    ImmRange { value: i64, bits: u32, kind: &'static str },
    #[error("literal `{0}` is too large")]
    LiteralOverflow(String),
}

/// Errors that stop an assembly run.
#[derive(thiserror::Error, Debug)]
pub enum AsmError {
    #[error("cannot read `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("bad origin address in `{line}`")]
    BadOrigin { line: String },
    #[error("invalid instruction `{mnemonic}` at {address:#x}")]
    UnknownMnemonic { address: u32, mnemonic: String },
    #[error("modifier 'u' or 'h' cannot be used with instruction `{mnemonic}` at {address:#x}")]
    IllegalModifier { address: u32, mnemonic: String },
    #[error("`{mnemonic}` at {address:#x} needs {expected} operands, found {found}")]
    MissingOperand { address: u32, mnemonic: &'static str, expected: usize, found: usize },
    #[error("{address:#x}: `{mnemonic}`: {source}")]
    Field {
        address: u32,
        mnemonic: String,
        #[source]
        source: FieldError,
    },
}

/// Per-instruction problems that drop one word but let the run continue.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    #[error("{address:#x}: undefined label `{label}`, instruction skipped")]
    UndefinedLabel { address: u32, label: String },
    #[error("{address:#x}: `{mnemonic}` requires an immediate offset, not two registers; instruction skipped")]
    MemoryNeedsImmediate { address: u32, mnemonic: &'static str },
}
