use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use simplerisc::emit::{self, EmitFormat};
use simplerisc::{EncodedWord, LabelTable, Tokens};

#[derive(Parser, Debug)]
#[command(author, version, about = "SimpleRisc assembler")]
struct Opts {
    /// Assembly file to parse
    #[arg(short, long)]
    file: PathBuf,
    /// Print tokenized instructions and the label table
    #[arg(short, long)]
    tokens: bool,
    /// Print encoded instructions as `ADDR: bits`
    #[arg(short, long)]
    encode: bool,
    /// Write raw big-endian words
    #[arg(short, long, value_name = "FILE", num_args = 0..=1, default_missing_value = EmitFormat::Bin.default_path())]
    bin: Option<PathBuf>,
    /// Write one 32-character bit string per line
    #[arg(short = 'x', long, value_name = "FILE", num_args = 0..=1, default_missing_value = EmitFormat::Text.default_path())]
    txt: Option<PathBuf>,
    /// Write one hex word per line
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = EmitFormat::Hex.default_path())]
    hex: Option<PathBuf>,
    /// Format used by --tokens
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct TokenReport<'a> {
    origin: u32,
    labels: &'a LabelTable,
    tokens: &'a [Tokens],
    words: &'a [EncodedWord],
    diagnostics: Vec<String>,
}

fn write_output(path: &Path, bytes: &[u8]) -> Result<()> {
    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    let size = std::fs::metadata(path)?.len();
    println!("{}: {size} bytes", path.display());
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    let asm = simplerisc::assemble_file(&opts.file)?;

    for diag in &asm.diagnostics {
        eprintln!("error: {diag}");
    }

    if opts.tokens {
        match opts.format {
            OutputFormat::Text => print!("{}", emit::token_dump(&asm.tokens, &asm.program.labels)),
            OutputFormat::Json => {
                let report = TokenReport {
                    origin: asm.program.origin,
                    labels: &asm.program.labels,
                    tokens: &asm.tokens,
                    words: &asm.words,
                    diagnostics: asm.diagnostics.iter().map(|d| d.to_string()).collect(),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            }
        }
    }
    if opts.encode {
        print!("{}", emit::listing(&asm.words));
    }

    let outputs = [
        (EmitFormat::Bin, &opts.bin),
        (EmitFormat::Text, &opts.txt),
        (EmitFormat::Hex, &opts.hex),
    ];
    for (format, path) in outputs {
        if let Some(path) = path {
            write_output(path, &format.render(&asm.words))?;
        }
    }
    Ok(())
}
