use anyhow::{Context, Result};
use std::path::Path;

/// Input image for the disassembler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Image {
    /// Newline separated bit strings, decoded line by line.
    Text(String),
    /// Words already in memory form.
    Words(Vec<u32>),
}

pub fn load_text(path: &Path) -> Result<Image> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    Ok(Image::Text(text))
}

/// Load a raw binary of big-endian 32-bit words.
pub fn load_raw_words(path: &Path, skip: usize, len: Option<usize>) -> Result<Image> {
    let file = std::fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
    anyhow::ensure!(skip <= file.len(), "--skip exceeds file size");
    let mut payload = &file[skip..];
    if let Some(lim) = len {
        anyhow::ensure!(lim <= payload.len(), "--len exceeds remaining file size after skip");
        payload = &payload[..lim];
    }
    let chunks = payload.chunks_exact(4);
    if !chunks.remainder().is_empty() {
        tracing::warn!(bytes = chunks.remainder().len(), "ignoring trailing partial word");
    }
    let words = chunks
        .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    Ok(Image::Words(words))
}

pub fn parse_u32(s: &str) -> Result<u32> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Ok(u32::from_str_radix(hex, 16)?)
    } else {
        Ok(s.parse::<u32>()?)
    }
}
