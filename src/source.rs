//! Source loading and the address/label pass.
//!
//! The first pass walks the cleaned lines once, numbering instructions from 0
//! and binding labels to the address of the instruction that follows them.
//! An origin directive (`.start`, `.main`, `.org`) is global: it is only
//! applied after the whole file has been seen, by [`Scan::relocate`].

use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::AsmError;

const ORIGIN_DIRECTIVES: [&str; 3] = [".start", ".main", ".org"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceLine {
    pub address: u32,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LabelTable {
    labels: BTreeMap<String, u32>,
}

impl LabelTable {
    pub fn get(&self, name: &str) -> Option<u32> {
        self.labels.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.labels.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    fn bind(&mut self, name: &str, address: u32) {
        if let Some(old) = self.labels.insert(name.to_string(), address) {
            warn!(label = name, old = old, new = address, "label redefined, last definition wins");
        }
    }

    fn shift(&mut self, offset: u32) {
        for addr in self.labels.values_mut() {
            *addr = addr.wrapping_add(offset);
        }
    }
}

/// Result of the first pass. Addresses are still relative to 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    pub lines: Vec<SourceLine>,
    pub labels: LabelTable,
    pub origin: Option<u32>,
}

/// A scanned program with the origin offset applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Program {
    pub lines: Vec<SourceLine>,
    pub labels: LabelTable,
    pub origin: u32,
}

impl Scan {
    /// Shift every instruction and label by the origin. Consumes the scan so
    /// the shift can only happen once.
    pub fn relocate(self) -> Program {
        let Scan { mut lines, mut labels, origin } = self;
        let origin = origin.unwrap_or(0);
        if origin != 0 {
            for line in &mut lines {
                line.address = line.address.wrapping_add(origin);
            }
            labels.shift(origin);
        }
        debug!(origin, instructions = lines.len(), labels = labels.len(), "relocated");
        Program { lines, labels, origin }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive<'a> {
    Origin(u32),
    Label(&'a str),
}

/// Strip the `;` comment and surrounding whitespace.
pub fn clean_line(line: &str) -> &str {
    line.split(';').next().unwrap_or_default().trim()
}

fn parse_directive(line: &str) -> Result<Option<Directive<'_>>, AsmError> {
    if !line.starts_with('.') {
        return Ok(None);
    }
    let Some(body) = line.strip_suffix(':') else { return Ok(None) };
    let parts: Vec<&str> = body.split_whitespace().collect();
    let Some(&name) = parts.first() else { return Ok(None) };

    if ORIGIN_DIRECTIVES.contains(&name) && parts.len() == 2 {
        if let Some(hex) = parts[1].strip_prefix("0x") {
            let addr = u32::from_str_radix(hex, 16)
                .map_err(|_| AsmError::BadOrigin { line: line.to_string() })?;
            return Ok(Some(Directive::Origin(addr)));
        }
    }
    Ok(Some(Directive::Label(name)))
}

/// First pass over source text.
pub fn scan(text: &str) -> Result<Scan, AsmError> {
    let mut lines = Vec::new();
    let mut labels = LabelTable::default();
    let mut origin = None;
    let mut address = 0u32;

    for raw in text.lines() {
        let line = clean_line(raw);
        if line.is_empty() {
            continue;
        }
        match parse_directive(line)? {
            Some(Directive::Origin(addr)) => {
                if let Some(prev) = origin.replace(addr) {
                    debug!(prev, addr, "origin overridden");
                }
            }
            Some(Directive::Label(name)) => labels.bind(name, address),
            None => {
                lines.push(SourceLine { address, text: line.to_string() });
                address = address.wrapping_add(4);
            }
        }
    }
    Ok(Scan { lines, labels, origin })
}

/// Scan and relocate in one go.
pub fn resolve(text: &str) -> Result<Program, AsmError> {
    Ok(scan(text)?.relocate())
}

pub fn load_file(path: &Path) -> Result<Scan, AsmError> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| AsmError::Io { path: path.to_path_buf(), source })?;
    scan(&text)
}
