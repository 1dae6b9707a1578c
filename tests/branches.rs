use simplerisc::{assemble, Diagnostic, SimpleRiscDecoder};
use simplerisc::decoder::Decoder;
use simplerisc::disasm::fmt_decoded;

#[test]
fn forward_branch_plus_eight() {
    let asm = assemble("b .fwd\nnop\n.fwd:\nhlt").unwrap();
    let w = asm.words[0];
    assert_eq!(w.value, 0x9000_0008);
    assert_eq!(w.value & 0x7FF_FFFF, 8);

    let dec = SimpleRiscDecoder::new();
    let d = dec.decode(w.value).unwrap();
    assert_eq!(fmt_decoded(&d, 0), "b 0x8");
    assert_eq!(fmt_decoded(&d, 0x200), "b 0x208");
}

#[test]
fn backward_branch_is_twos_complement() {
    let asm = assemble(".top:\nnop\nnop\nbeq .top").unwrap();
    assert_eq!(asm.words[2].value, 0x87FF_FFF8);
}

#[test]
fn call_to_earlier_label() {
    let asm = assemble("nop\n.f:\nret\nnop\nnop\ncall .f").unwrap();
    let d = SimpleRiscDecoder::new().decode(asm.words[4].value).unwrap();
    assert_eq!(d.value, -12);
    assert_eq!(fmt_decoded(&d, asm.words[4].address), "call 0x4");
}

#[test]
fn undefined_label_drops_only_that_word() {
    let asm = assemble("b .nowhere\nnop\nbgt .also_missing\nhlt").unwrap();
    let addrs: Vec<u32> = asm.words.iter().map(|w| w.address).collect();
    assert_eq!(addrs, vec![4, 12]);
    assert_eq!(asm.words[1].value, 0xF800_0000);
    assert_eq!(
        asm.diagnostics,
        vec![
            Diagnostic::UndefinedLabel { address: 0, label: ".nowhere".into() },
            Diagnostic::UndefinedLabel { address: 8, label: ".also_missing".into() },
        ]
    );
}

#[test]
fn labels_keep_their_leading_dot() {
    // `loop` and `.loop` are different names
    let asm = assemble(".loop:\nb loop").unwrap();
    assert!(asm.words.is_empty());
    assert_eq!(asm.diagnostics.len(), 1);
}
