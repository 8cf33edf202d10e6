use dashdb::{from_path, from_str, to_string, DashDb, DashOptions, Error, MalformedLines};
use serde::Serialize;
use std::fs;

const DB_STR: &str = "kernels-0-name=update_positions\n\
kernels-0-partitioning=x\n\
kernels-0-arguments-0-element size=32\n\
kernels-0-arguments-0-fundamental type=f\n\
kernels-0-arguments-0-isl read params=[size_x, size_y, size_z] -> { Stmt_entry[i0, i1, i2] -> MemRef_pos_x[i0] : 0 <= i0 < size_x and 0 <= i1 < size_y and 0 <= i2 < size_z }\n\
kernels-0-arguments-1-element size=16\n\
kernels-0-arguments-1-fundamental type=d\n\
kernels-0-arguments-1-isl write params=[size_x, size_y, size_z] -> { Stmt_entry[i0, i1, i2] -> MemRef_pos_x[i0] : 0 <= i0 < size_x and 0 <= i1 < size_y and 0 <= i2 < size_z }\n\
kernels-1-name=update_speed\n\
kernels-1-partitioning=x\n\
kernels-1-arguments-0-element size=64\n\
kernels-1-arguments-0-fundamental type=i\n\
meta information-0=None\n";

#[derive(Serialize)]
struct Argument {
    #[serde(rename = "element size")]
    element_size: u32,
    #[serde(rename = "fundamental type")]
    fundamental_type: char,
}

#[derive(Serialize)]
struct Kernel {
    name: String,
    partitioning: String,
    arguments: Vec<Argument>,
}

#[derive(Serialize)]
struct Program {
    kernels: Vec<Kernel>,
}

#[test]
fn test_query_entries() {
    let db = from_str(DB_STR).unwrap();

    assert_eq!(
        db.key("kernels").index(0).key("name").read_string(),
        "update_positions"
    );
    assert_eq!(db.key("kernels").index(0).key("partitioning").read_string(), "x");
    assert_eq!(
        db.key("kernels")
            .index(0)
            .key("arguments")
            .index(0)
            .key("element size")
            .read_int()
            .unwrap(),
        32
    );
    assert_eq!(
        db.key("kernels")
            .index(0)
            .key("arguments")
            .index(1)
            .key("isl write params")
            .read_string(),
        "[size_x, size_y, size_z] -> { Stmt_entry[i0, i1, i2] -> MemRef_pos_x[i0] : 0 <= i0 < size_x and 0 <= i1 < size_y and 0 <= i2 < size_z }"
    );
    assert_eq!(
        db.key("kernels")
            .index(1)
            .key("arguments")
            .index(0)
            .key("element size")
            .read_int()
            .unwrap(),
        64
    );
    assert_eq!(db.key("kernels").index(1).key("name").read_string(), "update_speed");
    assert!(db.malformed_lines().is_empty());
}

#[test]
fn test_list_lengths() {
    let db = from_str(DB_STR).unwrap();

    assert_eq!(db.key("kernels").length(), 2);
    assert_eq!(db.key("kernels").index(0).key("arguments").length(), 2);
    assert_eq!(db.key("kernels").index(1).key("arguments").length(), 1);
    assert_eq!(db.key("meta information").length(), 1);
    assert_eq!(db.key("meta information").length(), 1);
    assert_eq!(db.key("not in database").length(), 0);
    assert_eq!(db.key("not in database").length(), 0);

    db.key("kernels").index(0).key("name").read_string();
    assert_eq!(db.key("kernels").length(), 2);
}

#[test]
fn test_insertions() {
    let mut db = from_str(DB_STR).unwrap();

    db.key_mut("kernels")
        .index(2)
        .key("name")
        .write("foo_kernel")
        .unwrap();
    assert_eq!(db.key("kernels").index(2).key("name").read_string(), "foo_kernel");
    assert_eq!(db.key("kernels").length(), 3);

    db.key_mut("kernels")
        .index(0)
        .key("arguments")
        .index(2)
        .key("element size")
        .write(20)
        .unwrap();
    assert_eq!(
        db.key("kernels")
            .index(0)
            .key("arguments")
            .index(2)
            .key("element size")
            .read_int()
            .unwrap(),
        20
    );
    assert_eq!(db.key("kernels").index(0).key("arguments").length(), 3);

    db.key_mut("kernels")
        .index(1)
        .key("arguments")
        .index(0)
        .key("is read")
        .write(true)
        .unwrap();
    assert!(db
        .key("kernels")
        .index(1)
        .key("arguments")
        .index(0)
        .key("is read")
        .read_bool());
}

#[test]
fn test_scenario_nested_list() {
    let db = from_str("a-0-x=1\na-0-y=2\na-1-x=3\n").unwrap();
    assert_eq!(db.key("a").length(), 2);
    assert_eq!(db.key("a").index(0).key("x").read_int().unwrap(), 1);
    assert_eq!(db.key("a").index(1).key("x").read_int().unwrap(), 3);
}

#[test]
fn test_scenario_empty_input() {
    let db = from_str("").unwrap();
    for key in ["a", "kernels", "meta information"] {
        assert_eq!(db.key(key).length(), 0);
        assert_eq!(db.key(key).read_string(), "");
        assert!(!db.key(key).read_bool());
    }
    assert_eq!(db.root().length(), 0);
}

#[test]
fn test_scenario_sorted_output() {
    let mut db = DashDb::new();
    db.insert("b", "2").unwrap();
    db.insert("a", "1").unwrap();
    assert_eq!(db.to_string(), "a=1\nb=2\n");
}

#[test]
fn test_serialization_is_independent_of_build_order() {
    let mut forward = DashDb::new();
    let mut backward = DashDb::new();
    for i in 0..5 {
        forward.key_mut("list").index(i).write(i).unwrap();
        backward.key_mut("list").index(4 - i).write(4 - i).unwrap();
    }
    assert_eq!(forward.to_string(), backward.to_string());
    assert_eq!(forward.key("list").length(), 5);
    assert_eq!(backward.key("list").length(), 5);
}

#[test]
fn test_save_and_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kernels.dash");

    let mut db = from_str(DB_STR).unwrap();
    db.key_mut("kernels").index(2).key("name").write("foo").unwrap();
    db.save(&path).unwrap();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.starts_with("kernels-0-arguments-0-element size=32\n"));
    assert!(written.ends_with("meta information-0=None\n"));

    let reopened = from_path(&path).unwrap();
    assert_eq!(reopened.len(), db.len());
    assert_eq!(reopened.key("kernels").length(), 3);
    assert_eq!(reopened.key("kernels").index(2).key("name").read_string(), "foo");
}

#[test]
fn test_missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let result = DashDb::open(dir.path().join("absent.dash"));
    assert!(matches!(result, Err(Error::NotFound(_))));

    let mut db = from_str("a=1\n").unwrap();
    assert!(db.read_path(dir.path().join("absent.dash")).is_err());
    assert_eq!(db.get("a"), Some("1"));
}

#[test]
fn test_reread_from_file_replaces_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("db.dash");
    fs::write(&path, "other-0=x\n").unwrap();

    let mut db = from_str(DB_STR).unwrap();
    assert_eq!(db.key("kernels").length(), 2);
    db.read_path(&path).unwrap();
    assert_eq!(db.key("kernels").length(), 0);
    assert_eq!(db.key("other").length(), 1);
}

#[test]
fn test_strict_options_reject_malformed_input() {
    let result = DashDb::parse_with_options("a=1\nno separator here\n", DashOptions::strict());
    match result {
        Err(Error::MalformedLine { line, content, .. }) => {
            assert_eq!(line, 2);
            assert_eq!(content, "no separator here");
        }
        other => panic!("expected malformed line error, got {:?}", other),
    }

    let options = DashOptions::new().with_malformed_lines(MalformedLines::Skip);
    let db = DashDb::parse_with_options("a=1\nno separator here\n", options).unwrap();
    assert_eq!(db.len(), 1);
    assert_eq!(db.malformed_lines().len(), 1);
}

#[test]
fn test_skipped_lines_do_not_extend_lists() {
    let options = DashOptions::new().with_malformed_lines(MalformedLines::Skip);
    let db = DashDb::parse_with_options("a-0=x\na-5\na-9--bad=y\n", options).unwrap();
    assert_eq!(db.entries().keys().collect::<Vec<_>>(), ["a-0"]);
    assert_eq!(db.malformed_lines().len(), 2);
    assert_eq!(db.key("a").length(), 1);

    let db = from_str("a-0=x\na-5\n").unwrap();
    assert_eq!(db.get("a-5"), Some(""));
    assert_eq!(db.key("a").length(), 6);
}

#[test]
fn test_flatten_struct_matches_hand_written_text() {
    let program = Program {
        kernels: vec![
            Kernel {
                name: "update_positions".to_string(),
                partitioning: "x".to_string(),
                arguments: vec![
                    Argument {
                        element_size: 32,
                        fundamental_type: 'f',
                    },
                    Argument {
                        element_size: 16,
                        fundamental_type: 'd',
                    },
                ],
            },
            Kernel {
                name: "update_speed".to_string(),
                partitioning: "x".to_string(),
                arguments: vec![Argument {
                    element_size: 64,
                    fundamental_type: 'i',
                }],
            },
        ],
    };

    let text = to_string(&program).unwrap();
    let expected = from_str(DB_STR).unwrap();
    let parsed = from_str(&text).unwrap();

    for (key, value) in parsed.entries() {
        assert_eq!(expected.get(key), Some(value.as_str()), "{key}");
    }
    assert_eq!(parsed.key("kernels").length(), 2);
    assert_eq!(parsed.key("kernels").index(0).key("arguments").length(), 2);
}

#[test]
fn test_flatten_json_value() {
    let value = serde_json::json!({
        "kernels": [
            { "name": "update_positions", "partitioning": "x" },
            { "name": "update_speed", "partitioning": "x" }
        ],
        "meta information": "None",
        "optional": null
    });

    assert_eq!(
        to_string(&value).unwrap(),
        "kernels-0-name=update_positions\n\
         kernels-0-partitioning=x\n\
         kernels-1-name=update_speed\n\
         kernels-1-partitioning=x\n\
         meta information=None\n"
    );
}

#[test]
fn test_store_to_json() {
    let db = from_str("b=2\na-0=1\n").unwrap();
    let json = serde_json::to_string(&db).unwrap();
    assert_eq!(json, r#"{"a-0":"1","b":"2"}"#);
}
