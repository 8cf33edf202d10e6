use dashdb::{from_str, DashDb, DashOptions, MalformedReason};

#[test]
fn test_value_keeps_later_separators() {
    let db = from_str("equation=a=b+c\n").unwrap();
    assert_eq!(db.key("equation").read_string(), "a=b+c");
}

#[test]
fn test_crlf_input() {
    let db = from_str("a-0=x\r\na-1=y\r\n").unwrap();
    assert_eq!(db.key("a").index(1).read_string(), "y");
    assert_eq!(db.key("a").length(), 2);
}

#[test]
fn test_last_duplicate_wins() {
    let db = from_str("name=first\nname=second\n").unwrap();
    assert_eq!(db.len(), 1);
    assert_eq!(db.key("name").read_string(), "second");
}

#[test]
fn test_sparse_list_length() {
    let db = from_str("a-4-x=1\n").unwrap();
    assert_eq!(db.key("a").length(), 5);
    assert_eq!(db.key("a").index(0).key("x").read_string(), "");
}

#[test]
fn test_leaf_and_prefix_collisions() {
    let db = from_str("list-0=a\nlist-1=b\nlistx-7=c\nlist=scalar\n").unwrap();
    assert_eq!(db.key("list").length(), 2);
    assert_eq!(db.key("listx").length(), 8);
    assert_eq!(db.key("list").read_string(), "scalar");
    assert_eq!(db.key("list").index(0).length(), 0);
}

#[test]
fn test_missing_separator_is_kept_and_reported() {
    let db = from_str("a=1\njust a key\n").unwrap();
    assert_eq!(db.get("just a key"), Some(""));
    let malformed = db.malformed_lines();
    assert_eq!(malformed.len(), 1);
    assert_eq!(malformed[0].line, 2);
    assert_eq!(malformed[0].reason, MalformedReason::MissingSeparator);
}

#[test]
fn test_bad_keys_are_reported_but_stored() {
    let db = from_str("1st=x\na--b=y\nok=z\n").unwrap();
    assert_eq!(db.len(), 3);
    assert_eq!(db.malformed_lines().len(), 2);
    assert!(matches!(
        db.malformed_lines()[0].reason,
        MalformedReason::InvalidKey(_)
    ));
}

#[test]
fn test_blank_lines_are_ignored() {
    let db = from_str("\n\na=1\n\n").unwrap();
    assert_eq!(db.len(), 1);
    assert!(db.malformed_lines().is_empty());
    assert_eq!(db.lines().len(), 4);
}

#[test]
fn test_lenient_top_level_list() {
    let db = DashDb::parse_with_options("0-name=a\n1-name=b\n", DashOptions::lenient()).unwrap();
    assert_eq!(db.root().length(), 2);
    assert_eq!(db.index(1).key("name").read_string(), "b");
}

#[test]
fn test_output_is_byte_sorted() {
    let db = from_str("b=1\nB=2\na-10=3\na-9=4\n").unwrap();
    assert_eq!(db.to_string(), "B=2\na-10=3\na-9=4\nb=1\n");
}

#[test]
fn test_dump_keeps_input_order() {
    let db = from_str("b=1\na=2\nb=3\n").unwrap();
    let mut out = Vec::new();
    db.dump(&mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "b=3\na=2\n");
}
