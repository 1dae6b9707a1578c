use pretty_assertions::assert_eq;
use simplerisc::{assemble, emit, DisasmConfig};
use simplerisc_disasm::{disassemble_image, load_raw_words, load_text, Image};

const PROG: &str = "\
.start 0x100:
    mov r1, 10
.again:
    subu r1, r1, 1
    cmp r1, 0
    bgt .again
    hlt
";

fn rendered(img: &Image, base: u32) -> Vec<String> {
    let cfg = DisasmConfig { base, include_binary: false };
    disassemble_image(img, &cfg).into_iter().map(|l| l.text).collect()
}

#[test]
fn text_output_disassembles_back() {
    let asm = assemble(PROG).unwrap();
    let path = std::env::temp_dir().join("_srdis_pipeline.txt");
    std::fs::write(&path, emit::to_bitstrings(&asm.words)).unwrap();
    let img = load_text(&path).unwrap();
    assert_eq!(
        rendered(&img, 0x100),
        vec!["mov r1, 10", "subu r1, r1, 1", "cmp r1, 0", "bgt 0x104", "hlt"]
    );
    let _ = std::fs::remove_file(&path);
}

#[test]
fn raw_output_disassembles_back() {
    let asm = assemble(PROG).unwrap();
    let path = std::env::temp_dir().join("_srdis_pipeline.bin");
    std::fs::write(&path, emit::to_bytes(&asm.words)).unwrap();
    let img = load_raw_words(&path, 0, None).unwrap();
    // without the origin the branch target is relative to 0
    assert_eq!(rendered(&img, 0)[3], "bgt 0x4");
    assert_eq!(rendered(&img, 0x100)[3], "bgt 0x104");
    let _ = std::fs::remove_file(&path);
}
