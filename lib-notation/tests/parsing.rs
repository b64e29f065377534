use glam::DVec2;
use lib_notation::{Color, Map, ParseError, ParseMode, Scalar, Value, parse, parse_with};

#[test]
fn scalars() {
    assert_eq!(parse("42").unwrap(), Value::Scalar(Scalar::Int(42)));
    assert!(matches!(
        parse("4.5").unwrap(),
        Value::Scalar(Scalar::Float(f)) if f == 4.5
    ));
    assert_eq!(parse("\"hi\"").unwrap(), Value::from("hi"));
    assert_eq!(parse("point(3, -4)").unwrap(), Value::point(3.0, -4.0));
    assert_eq!(
        parse("color(255, 0, 51)").unwrap(),
        Value::from(Color::new(1.0, 0.0, 0.2))
    );
}

#[test]
fn constants_ignore_case() {
    assert_eq!(parse("quote").unwrap(), Value::from("\""));
    assert_eq!(parse("Void").unwrap(), Value::void());
    assert_eq!(parse("TRUE").unwrap(), Value::from(1));
    assert_eq!(parse("EMPTY").unwrap(), Value::from(""));
}

#[test]
fn concatenation() {
    assert_eq!(parse("\"a\" & \"b\"").unwrap(), Value::from("ab"));
    assert_eq!(parse("\"a\" && \"b\"").unwrap(), Value::from("a b"));
    assert_eq!(parse("\"n\" & 5").unwrap(), Value::from("n5"));
    assert_eq!(parse("\"p\" & PI").unwrap(), Value::from("p3.1416"));
    assert_eq!(
        parse("\"a\" & RETURN & NEWLINE").unwrap(),
        Value::from("a\r\n")
    );
}

#[test]
fn maps_and_lists() {
    let value = parse("[#nm: \"Test\", #sz: point(1, 1)]").unwrap();
    let map = value.as_map().unwrap();
    assert_eq!(map.get("NM"), Some(&Value::from("Test")));
    assert_eq!(map.get("sz").and_then(Value::as_point), Some(DVec2::ONE));

    let value = parse("[1, #sym, [#k: [:]]]").unwrap();
    let list = value.as_list().unwrap();
    assert_eq!(list[1], Value::from("sym"));
    assert_eq!(
        list[2].as_map().and_then(|m| m.get("k")),
        Some(&Value::Map(Map::new()))
    );
}

#[test]
fn string_keys() {
    let value = parse("[#a: 1, \"b c\": 2]").unwrap();
    assert_eq!(value.as_map().unwrap().get("b c"), Some(&Value::from(2)));
}

#[test]
fn malformed_input() {
    assert!(matches!(
        parse("[1, 2.3.4]"),
        Err(ParseError::InvalidNumber { found, .. }) if found == "2.3.4"
    ));
    assert!(matches!(
        parse("[\"abc"),
        Err(ParseError::UnterminatedString { at: 1, .. })
    ));
    assert!(matches!(parse("[1, 2"), Err(ParseError::UnmatchedBracket { at: 0 })));
    assert!(matches!(parse(""), Err(ParseError::UnexpectedEnd)));
    assert!(matches!(
        parse("point(1)"),
        Err(ParseError::BadArguments { .. })
    ));
}

#[test]
fn strict_mode() {
    assert!(parse_with("[1, 2]", ParseMode::Strict).is_ok());
    assert!(matches!(
        parse_with("[1, mystery]", ParseMode::Strict),
        Err(ParseError::UnknownIdentifier { found, .. }) if found == "mystery"
    ));
    assert!(matches!(
        parse_with("[1, lingo(2)]", ParseMode::Strict),
        Err(ParseError::UnknownIdentifier { .. })
    ));
    assert_eq!(
        parse("[1, mystery, lingo(2)]").unwrap(),
        Value::List(vec![Value::from(1), Value::void(), Value::void()])
    );
}
