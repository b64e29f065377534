mod common;

use common::{TestCase, random_value, run_tests};
use lib_notation::{ParseMode, Value, parse, parse_with, to_string};

const RANDOM_CASES: usize = 200;

struct RoundTrip {
    name: String,
    value: Value,
}

impl TestCase for RoundTrip {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn check(&self) -> bool {
        let text = to_string(&self.value);
        match parse_with(&text, ParseMode::Strict) {
            Ok(back) if back == self.value => true,
            Ok(back) => {
                println!("{text}\n  read back as {back:?}\n  expected {:?}", self.value);
                false
            }
            Err(e) => {
                println!("{text}\n  failed to parse: {e}");
                false
            }
        }
    }
}

#[test]
fn random_values_round_trip() {
    run_tests((0..RANDOM_CASES).map(|idx| RoundTrip {
        name: format!("random #{idx}"),
        value: random_value(0),
    }));
}

#[test]
fn parsed_lines_round_trip() {
    const LINES: &[&str] = &[
        "[#nm: \"Test\", #sz: point(1, 1)]",
        "[[1, 2], [3, [4, 5]], [:], []]",
        "[#a: color(255, 0, 128), #b: rect(0, 0, 20.5, 10)]",
        "[\"x\" & QUOTE & \"y\", TAB, \"\" & PI]",
        "[#lightAngle: 180, #flatness: 1]",
        "[-1, -0.25, 1.5, 3000000000]",
        "[#1abc: 5, #b: 2]",
        "[\"two words\": 1]",
        "[\"x\" & QUOTE: [#0: 1, \"a-b\": [:]]]",
    ];
    run_tests(LINES.iter().map(|line| RoundTrip {
        name: line.to_string(),
        value: parse(line).unwrap(),
    }));
}

#[test]
fn canonical_text_is_stable() {
    let line = "[#nm: \"Test\", #sz: point(1, 1), #specs: [1, -1, 0.5]]";
    assert_eq!(to_string(&parse(line).unwrap()), line);
}
