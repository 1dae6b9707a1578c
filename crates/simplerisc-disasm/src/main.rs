use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use simplerisc::disasm::render_all;
use simplerisc::DisasmConfig;
use simplerisc_disasm::{disassemble_image, load_raw_words, load_text, parse_u32};

#[derive(Parser, Debug)]
#[command(author, version, about = "SimpleRisc disassembler", long_about = None)]
struct Cli {
    /// Input text file with one 32-character binary instruction per line
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
    /// Output file to save the disassembly (stdout when omitted)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
    /// Include binary instructions in output
    #[arg(short, long)]
    include_binary: bool,
    /// Address of the first word (hex or dec)
    #[arg(long, default_value = "0", value_parser = parse_u32)]
    base: u32,
    /// Input is a raw binary of big-endian words instead of bit strings
    #[arg(long)]
    raw: bool,
    /// Skip N bytes at start of a raw file
    #[arg(long, default_value_t = 0usize)]
    skip: usize,
    /// Limit bytes loaded from a raw file
    #[arg(long)]
    len: Option<usize>,
    /// Output format: text or json
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let img = if cli.raw {
        load_raw_words(&cli.file, cli.skip, cli.len)?
    } else {
        load_text(&cli.file)?
    };
    let cfg = DisasmConfig { base: cli.base, include_binary: cli.include_binary };
    let lines = disassemble_image(&img, &cfg);

    let buf = match cli.format {
        OutputFormat::Text => render_all(&lines, &cfg),
        OutputFormat::Json => serde_json::to_string_pretty(&lines)? + "\n",
    };
    if let Some(path) = cli.output {
        std::fs::write(&path, buf)?;
        println!("Disassembled binary saved to {}", path.display());
    } else {
        print!("{}", buf);
    }
    Ok(())
}
