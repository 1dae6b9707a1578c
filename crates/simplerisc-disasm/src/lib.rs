pub mod model;

// Re-export commonly used types/functions for consumers
pub use model::{load_raw_words, load_text, parse_u32, Image};

use simplerisc::{disasm, DisasmConfig, DisasmLine};

/// Decode a loaded image with the core disassembler.
pub fn disassemble_image(img: &Image, cfg: &DisasmConfig) -> Vec<DisasmLine> {
    match img {
        Image::Text(text) => disasm::disassemble(text, cfg),
        Image::Words(words) => disasm::disassemble_words(words, cfg),
    }
}
