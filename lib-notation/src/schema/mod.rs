//! Declarative mapping between [Value]s and typed records.
//!
//! ## Declaring Records
//! Records are declared with [notation_record!](crate::notation_record). Every
//! field gets a descriptor: `pos` fields are read by their ordinal, `key("nm")`
//! fields by (case-insensitive) key. Two flags can follow:
//! * `skippable` -- the field may be absent; it keeps its `Default` value and
//!   is not written back while it holds an empty value.
//! * `nullable` -- the field may convert to an unset value (`Option::None`).
//!
//! ```ignore
//! notation_record! {
//!     #[derive(Default, Debug, Clone, PartialEq)]
//!     pub struct Named {
//!         pub name: String => key("nm"),
//!         pub size: IVec2 => key("sz"),
//!         pub tags: Vec<String> => key("tags") skippable,
//!     }
//! }
//! ```
//!
//! ## Shapes
//! A record with any keyed field reads from and writes to a [Map]. A record
//! whose fields are all positional uses a list. An empty list is accepted in
//! place of an empty map.

mod conv;

pub use conv::*;

use std::fmt;

use thiserror::Error;

use crate::value::{Map, Value};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("{path}: missing field")]
    Missing { path: String },
    #[error("{path}: expected {expected}, found {found}")]
    Mismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("{path}: value is unset but the field is not nullable")]
    Unset { path: String },
    #[error("{path}: unknown name {found:?}")]
    UnknownName { path: String, found: String },
    #[error("{path}: {reason}")]
    Invalid { path: String, reason: String },
}

impl SchemaError {
    pub fn mismatch(expected: &'static str, found: &Value) -> SchemaError {
        SchemaError::Mismatch {
            path: String::new(),
            expected,
            found: found.kind_name(),
        }
    }

    pub fn invalid(reason: impl fmt::Display) -> SchemaError {
        SchemaError::Invalid {
            path: String::new(),
            reason: reason.to_string(),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            SchemaError::Missing { path }
            | SchemaError::Mismatch { path, .. }
            | SchemaError::Unset { path }
            | SchemaError::UnknownName { path, .. }
            | SchemaError::Invalid { path, .. } => path,
        }
    }

    /// Prefixes the error path with `segment`.
    pub fn nested(mut self, segment: &str) -> SchemaError {
        let path = match &mut self {
            SchemaError::Missing { path }
            | SchemaError::Mismatch { path, .. }
            | SchemaError::Unset { path }
            | SchemaError::UnknownName { path, .. }
            | SchemaError::Invalid { path, .. } => path,
        };
        *path = match (path.is_empty(), path.starts_with('[')) {
            (true, _) => segment.to_string(),
            (false, true) => format!("{segment}{path}"),
            (false, false) => format!("{segment}.{path}"),
        };
        self
    }
}

type ReadFn<R> = fn(&R) -> Value;
type EmptyFn<R> = fn(&R) -> bool;
type WriteFn<R> = fn(&mut R, &Value) -> Result<bool, SchemaError>;

/// The descriptor of one record field.
pub struct Field<R> {
    pub name: &'static str,
    pub ordinal: usize,
    pub key: Option<&'static str>,
    pub nullable: bool,
    pub skippable: bool,
    read: ReadFn<R>,
    is_empty: EmptyFn<R>,
    /// Stores the converted value. Returns `true` when it is unset.
    write: WriteFn<R>,
}

impl<R> Field<R> {
    pub fn new(
        name: &'static str,
        read: ReadFn<R>,
        is_empty: EmptyFn<R>,
        write: WriteFn<R>,
    ) -> Self {
        Field {
            name,
            ordinal: 0,
            key: None,
            nullable: false,
            skippable: false,
            read,
            is_empty,
            write,
        }
    }

    pub fn pos(self) -> Self {
        self
    }

    pub fn key(mut self, key: &'static str) -> Self {
        self.key = Some(key);
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn skippable(mut self) -> Self {
        self.skippable = true;
        self
    }

    /// Assigns ordinals in declaration order.
    pub fn enumerate(mut fields: Vec<Self>) -> Vec<Self> {
        for (idx, field) in fields.iter_mut().enumerate() {
            field.ordinal = idx;
        }
        fields
    }
}

impl<R> fmt::Debug for Field<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("ordinal", &self.ordinal)
            .field("key", &self.key)
            .field("nullable", &self.nullable)
            .field("skippable", &self.skippable)
            .finish()
    }
}

/// A type with a registered field schema.
pub trait Record: Default + Sized + 'static {
    const NAME: &'static str;

    fn fields() -> &'static [Field<Self>];

    fn is_keyed() -> bool {
        Self::fields().iter().any(|f| f.key.is_some())
    }
}

fn locate<'v, R: Record>(
    field: &Field<R>,
    value: &'v Value,
) -> Result<Option<&'v Value>, SchemaError> {
    match (value, field.key) {
        (Value::Map(map), Some(key)) => Ok(map.get(key)),
        // Written under its ordinal. Maps from elsewhere are read by position,
        // skipping entries that belong to a keyed field.
        (Value::Map(map), None) => Ok(map.get(&field.ordinal.to_string()).or_else(|| {
            map.get_index(field.ordinal)
                .filter(|(name, _)| {
                    !R::fields()
                        .iter()
                        .any(|f| f.key.is_some_and(|key| key.eq_ignore_ascii_case(name)))
                })
                .map(|(_, v)| v)
        })),
        (Value::List(items), None) => Ok(items.get(field.ordinal)),
        (Value::List(items), Some(_)) if items.is_empty() => Ok(None),
        (other, Some(_)) => Err(SchemaError::mismatch("map", other)),
        (other, None) => Err(SchemaError::mismatch("list", other)),
    }
}

pub fn record_from_value<R: Record>(value: &Value) -> Result<R, SchemaError> {
    let mut out = R::default();
    for field in R::fields() {
        let Some(source) = locate(field, value)? else {
            if field.skippable {
                continue;
            }
            return Err(SchemaError::Missing {
                path: field.name.to_string(),
            });
        };
        let unset = (field.write)(&mut out, source).map_err(|e| e.nested(field.name))?;
        if unset && !field.nullable {
            return Err(SchemaError::Unset {
                path: field.name.to_string(),
            });
        }
    }
    Ok(out)
}

pub fn record_to_value<R: Record>(record: &R) -> Value {
    let fields = R::fields();
    let omit = |field: &Field<R>| field.skippable && (field.is_empty)(record);

    if R::is_keyed() {
        let map = fields
            .iter()
            .filter(|field| !omit(field))
            .map(|field| {
                let key = field
                    .key
                    .map(str::to_string)
                    .unwrap_or_else(|| field.ordinal.to_string());
                (key, (field.read)(record))
            })
            .collect::<Map>();
        return Value::Map(map);
    }

    // Positional fields can only be dropped from the tail.
    let keep = fields
        .iter()
        .rposition(|field| !omit(field))
        .map_or(0, |idx| idx + 1);
    Value::List(fields[..keep].iter().map(|f| (f.read)(record)).collect())
}

/// Declares a struct together with its [Record] schema. See the
/// [module docs](crate::schema) for the field syntax.
#[macro_export]
macro_rules! notation_record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty => $kind:ident $( ( $($arg:expr),* ) )? $( $flag:ident )*
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $( $(#[$fmeta])* $fvis $field : $ty, )*
        }

        impl $crate::schema::Record for $name {
            const NAME: &'static str = stringify!($name);

            fn fields() -> &'static [$crate::schema::Field<Self>] {
                static FIELDS: ::std::sync::LazyLock<::std::vec::Vec<$crate::schema::Field<$name>>> =
                    ::std::sync::LazyLock::new(|| {
                        $crate::schema::Field::enumerate(vec![
                            $(
                                $crate::schema::Field::new(
                                    stringify!($field),
                                    |r: &$name| $crate::schema::ToValue::to_value(&r.$field),
                                    |r: &$name| $crate::schema::ToValue::is_empty(&r.$field),
                                    |r: &mut $name, v: &$crate::Value| {
                                        let x = <$ty as $crate::schema::FromValue>::from_value(v)?;
                                        let unset = $crate::schema::FromValue::is_unset(&x);
                                        r.$field = x;
                                        Ok(unset)
                                    },
                                )
                                .$kind($( $($arg),* )?)
                                $( .$flag() )*
                            ),*
                        ])
                    });
                &FIELDS
            }
        }

        impl $crate::schema::FromValue for $name {
            fn from_value(value: &$crate::Value) -> Result<Self, $crate::schema::SchemaError> {
                $crate::schema::record_from_value(value)
            }
        }

        impl $crate::schema::ToValue for $name {
            fn to_value(&self) -> $crate::Value {
                $crate::schema::record_to_value(self)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    crate::notation_record! {
        #[derive(Default, Debug, Clone, PartialEq)]
        struct Entry {
            depth: i32 => pos,
            name: String => pos,
            extra: Vec<i32> => pos skippable,
        }
    }

    #[test]
    fn positional_tail_is_skipped() {
        let entry = Entry {
            depth: 3,
            name: "x".to_string(),
            extra: vec![],
        };
        assert_eq!(crate::to_string(&record_to_value(&entry)), "[3, \"x\"]");
        let back: Entry = record_from_value(&parse("[3, \"x\"]").unwrap()).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn error_paths() {
        let err = record_from_value::<Entry>(&parse("[3, 4]").unwrap()).unwrap_err();
        assert_eq!(err.path(), "name");
        assert_eq!(SchemaError::invalid("x").nested("[2]").nested("list").path(), "list[2]");
    }
}
