use lox::mach::{compile, list, Chunk, Opcode, Runtime, Val};

#[test]
fn test_simple_listing() {
    let chunk = compile("1 + 2").unwrap();
    let listing = list(&chunk, "test");
    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines[0], "== test ==");
    assert_eq!(lines[1], "0000 0001 CONSTANT  0000 '1'");
    assert_eq!(lines[2], "0002    | CONSTANT  0001 '2'");
    assert_eq!(lines[3], "0004    | ADD");
    assert_eq!(lines[4], "0005    | RETURN");
}

#[test]
fn test_line_column_tracks_source_lines() {
    let chunk = compile("1 +\n2").unwrap();
    let listing = list(&chunk, "lines");
    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines[1], "0000 0001 CONSTANT  0000 '1'");
    assert_eq!(lines[2], "0002 0002 CONSTANT  0001 '2'");
}

#[test]
fn test_long_constant_listing_recovers_index() {
    // 0 + 1 + ... + 299: constant n sits at pool index n, so the
    // long form appears exactly from index 256 on.
    let source = (0..300).map(|i| i.to_string()).collect::<Vec<_>>().join(" + ");
    let chunk = compile(&source).unwrap();
    let listing = list(&chunk, "long");
    assert!(listing.contains("CONSTANT  0255 '255'"));
    assert!(!listing.contains("CONSTANT  0256"));
    assert!(listing.contains("CONSTLONG 0256 '256'"));
    assert!(listing.contains("CONSTLONG 0299 '299'"));
}

#[test]
fn test_listing_is_idempotent() {
    let chunk = compile("!(1.5 + 2 <= 3) == true").unwrap();
    let first = list(&chunk, "twice");
    let second = list(&chunk, "twice");
    assert_eq!(first, second);
}

#[test]
fn test_listing_unchanged_by_execution() {
    let chunk = compile("\"ab\" + \"cd\"").unwrap();
    let before = list(&chunk, "exec");
    let mut runtime = Runtime::default();
    assert_eq!(runtime.execute(&chunk).unwrap(), Val::string("abcd"));
    assert_eq!(list(&chunk, "exec"), before);
}

#[test]
fn test_unknown_byte_is_listed() {
    let mut chunk = Chunk::new();
    chunk.write_opcode(Opcode::Nil, 1);
    chunk.write(0xee, 1);
    chunk.write_opcode(Opcode::Return, 1);
    let listing = list(&chunk, "junk");
    assert!(listing.contains("UNKNOWN 238"));
    assert!(listing.contains("RETURN"));
}
