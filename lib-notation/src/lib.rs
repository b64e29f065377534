mod lexer;
mod parser;
mod ser;
mod text;
mod value;

pub mod schema;

pub use parser::{ParseError, ParseMode, parse, parse_with};
pub use schema::{FromValue, Record, SchemaError, ToValue, record_from_value, record_to_value};
pub use ser::{PI_TEXT, format_number, to_string, write_value};
pub use text::{line_ending, split_lines};
pub use value::*;

/// Parses `src` and converts it into `T`.
pub fn from_str<T: FromValue>(src: &str, mode: ParseMode) -> anyhow::Result<T> {
    let value = parse_with(src, mode)?;
    Ok(T::from_value(&value)?)
}

/// Writes `value` as a single line of notation.
pub fn to_notation<T: ToValue>(value: &T) -> String {
    to_string(&value.to_value())
}
