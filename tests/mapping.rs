use simplerisc::instructions::TABLE;
use simplerisc::{Category, Op};

#[test]
fn opcodes_match_the_reference_table() {
    let expect = [
        ("add", 0b00000), ("sub", 0b00001), ("mul", 0b00010), ("div", 0b00011),
        ("mod", 0b00100), ("cmp", 0b00101), ("and", 0b00110), ("or", 0b00111),
        ("not", 0b01000), ("mov", 0b01001), ("lsl", 0b01010), ("lsr", 0b01011),
        ("asr", 0b01100), ("nop", 0b01101), ("ld", 0b01110), ("st", 0b01111),
        ("beq", 0b10000), ("bgt", 0b10001), ("b", 0b10010), ("call", 0b10011),
        ("ret", 0b10100), ("hlt", 0b11111),
    ];
    assert_eq!(TABLE.len(), expect.len());
    for (mn, opcode) in expect {
        let op = Op::from_mnemonic(mn).unwrap();
        assert_eq!(op.opcode(), opcode, "{mn}");
    }
}

#[test]
fn categories() {
    let count = |c: Category| TABLE.iter().filter(|d| d.category == c).count();
    assert_eq!(count(Category::NoOperand), 3);
    assert_eq!(count(Category::Branch), 4);
    assert_eq!(count(Category::Unary), 2);
    assert_eq!(count(Category::Compare), 1);
    assert_eq!(count(Category::Arith), 10);
    assert_eq!(count(Category::Memory), 2);
}
