use glam::DVec2;
use lib_notation::{Color, Map, Rect, Value};

const MAX_DEPTH: u32 = 3;
const STRING_ALPHABET: &[char] = &[
    'a', 'B', 'z', '0', '3', '.', '1', '4', '6', ' ', '_', '-', '#', '[', ']', ':', ',', '&', '"',
    '\t', '\r', '\n', '\u{8}',
];

/// An interface for a round-trip case. The value is written, read back and
/// compared against itself.
pub trait TestCase {
    fn name(&self) -> String;

    fn check(&self) -> bool;
}

#[allow(dead_code)]
pub fn run_tests<T: TestCase>(tests: impl IntoIterator<Item = T>) {
    for case in tests {
        println!("Running {:?}", case.name());
        if !case.check() {
            panic!("Test {:?} failed", case.name());
        }
    }
}

/// Generates a value tree that only uses shapes the parser can produce.
#[allow(dead_code)]
pub fn random_value(depth: u32) -> Value {
    let kinds = if depth >= MAX_DEPTH { 6 } else { 8 };
    match rand::random_range(0..kinds) {
        0 => Value::from(rand::random_range(-100_000..100_000)),
        1 => Value::from(rand::random_range(-4000..4000) as f64 / 8.0),
        2 => Value::from(random_string()),
        3 => Value::from(random_point()),
        4 => Value::from(Color::from_rgb255(
            rand::random_range(0..256) as f64,
            rand::random_range(0..256) as f64,
            rand::random_range(0..256) as f64,
        )),
        5 => Value::from(Rect::new(random_point(), random_point())),
        6 => Value::List(
            (0..rand::random_range(0..5))
                .map(|_| random_value(depth + 1))
                .collect(),
        ),
        _ => Value::Map(random_map(depth + 1)),
    }
}

fn random_map(depth: u32) -> Map {
    (0..rand::random_range(0..5))
        .map(|_| (random_key(), random_value(depth)))
        .collect()
}

/// Plain words, words with a leading digit, and keys that can only be
/// written as strings.
fn random_key() -> String {
    let len = rand::random_range(1..8);
    let word = (0..len)
        .map(|_| (b'a' + rand::random_range(0..26u8)) as char)
        .collect::<String>();
    match rand::random_range(0..3) {
        0 => word,
        1 => format!("{}{word}", rand::random_range(0..10)),
        _ => format!("{word}{}", random_string()),
    }
}

fn random_string() -> String {
    let len = rand::random_range(0..12);
    (0..len)
        .map(|_| STRING_ALPHABET[rand::random_range(0..STRING_ALPHABET.len())])
        .collect()
}

fn random_point() -> DVec2 {
    DVec2::new(
        rand::random_range(-400..400) as f64 / 4.0,
        rand::random_range(-400..400) as f64 / 4.0,
    )
}
