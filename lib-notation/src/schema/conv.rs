use glam::{DVec2, IVec2, Vec2};

use super::SchemaError;
use crate::value::{Color, Map, Rect, Value};

pub trait FromValue: Sized {
    fn from_value(value: &Value) -> Result<Self, SchemaError>;

    /// Whether the converted value stands for "nothing".
    fn is_unset(&self) -> bool {
        false
    }
}

pub trait ToValue {
    fn to_value(&self) -> Value;

    /// Whether a skippable field holding this value may be left out.
    fn is_empty(&self) -> bool {
        false
    }
}

impl FromValue for i32 {
    fn from_value(value: &Value) -> Result<Self, SchemaError> {
        value
            .as_int()
            .ok_or_else(|| SchemaError::mismatch("int", value))
    }
}

impl ToValue for i32 {
    fn to_value(&self) -> Value {
        Value::from(*self)
    }
}

macro_rules! narrow_int_value {
    ($($ty:ty),*) => {$(
        impl FromValue for $ty {
            fn from_value(value: &Value) -> Result<Self, SchemaError> {
                let i = i32::from_value(value)?;
                <$ty>::try_from(i).map_err(|_| {
                    SchemaError::invalid(format!("{i} is out of range for {}", stringify!($ty)))
                })
            }
        }

        impl ToValue for $ty {
            fn to_value(&self) -> Value {
                Value::from(*self as i32)
            }
        }
    )*};
}

narrow_int_value!(u8, u16, u32, usize);

impl FromValue for f64 {
    fn from_value(value: &Value) -> Result<Self, SchemaError> {
        value
            .as_f64()
            .ok_or_else(|| SchemaError::mismatch("number", value))
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::from(*self)
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> Result<Self, SchemaError> {
        f64::from_value(value).map(|f| f as f32)
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        Value::from(*self as f64)
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Result<Self, SchemaError> {
        i32::from_value(value).map(|i| i != 0)
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::from(*self as i32)
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Result<Self, SchemaError> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| SchemaError::mismatch("string", value))
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::from(self.as_str())
    }

    fn is_empty(&self) -> bool {
        String::is_empty(self)
    }
}

impl FromValue for DVec2 {
    fn from_value(value: &Value) -> Result<Self, SchemaError> {
        value
            .as_point()
            .ok_or_else(|| SchemaError::mismatch("point", value))
    }
}

impl ToValue for DVec2 {
    fn to_value(&self) -> Value {
        Value::from(*self)
    }
}

impl FromValue for Vec2 {
    fn from_value(value: &Value) -> Result<Self, SchemaError> {
        DVec2::from_value(value).map(|p| p.as_vec2())
    }
}

impl ToValue for Vec2 {
    fn to_value(&self) -> Value {
        Value::from(self.as_dvec2())
    }
}

impl FromValue for IVec2 {
    fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let p = DVec2::from_value(value)?;
        if p.x.fract() != 0.0 || p.y.fract() != 0.0 {
            return Err(SchemaError::invalid(format!(
                "point({}, {}) does not have integer coordinates",
                p.x, p.y
            )));
        }
        Ok(p.as_ivec2())
    }
}

impl ToValue for IVec2 {
    fn to_value(&self) -> Value {
        Value::from(self.as_dvec2())
    }
}

impl FromValue for Color {
    fn from_value(value: &Value) -> Result<Self, SchemaError> {
        value
            .as_color()
            .ok_or_else(|| SchemaError::mismatch("color", value))
    }
}

impl ToValue for Color {
    fn to_value(&self) -> Value {
        Value::from(*self)
    }
}

impl FromValue for Rect {
    fn from_value(value: &Value) -> Result<Self, SchemaError> {
        value
            .as_rect()
            .ok_or_else(|| SchemaError::mismatch("rect", value))
    }
}

impl ToValue for Rect {
    fn to_value(&self) -> Value {
        Value::from(*self)
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> Result<Self, SchemaError> {
        match value {
            Value::List(items) => items
                .iter()
                .enumerate()
                .map(|(idx, item)| {
                    T::from_value(item).map_err(|e| e.nested(&format!("[{idx}]")))
                })
                .collect(),
            Value::Map(map) if map.is_empty() => Ok(Vec::new()),
            other => Err(SchemaError::mismatch("list", other)),
        }
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }

    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }
}

/// `0` reads as `None` and `None` is written as `0`.
impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> Result<Self, SchemaError> {
        if matches!(value.as_int(), Some(0)) {
            return Ok(None);
        }
        T::from_value(value).map(Some)
    }

    fn is_unset(&self) -> bool {
        self.is_none()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        self.as_ref().map_or_else(Value::void, ToValue::to_value)
    }

    fn is_empty(&self) -> bool {
        self.is_none()
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Result<Self, SchemaError> {
        Ok(value.clone())
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl FromValue for Map {
    fn from_value(value: &Value) -> Result<Self, SchemaError> {
        match value {
            Value::Map(map) => Ok(map.clone()),
            Value::List(items) if items.is_empty() => Ok(Map::new()),
            other => Err(SchemaError::mismatch("map", other)),
        }
    }
}

impl ToValue for Map {
    fn to_value(&self) -> Value {
        Value::Map(self.clone())
    }

    fn is_empty(&self) -> bool {
        Map::is_empty(self)
    }
}

/// Implements [FromValue] and [ToValue] for a fieldless enum that is written
/// by name. The enum must implement `FromStr` and `Into<&'static str>` (for
/// example through strum's `EnumString` and `IntoStaticStr`).
#[macro_export]
macro_rules! impl_enum_value {
    ($ty:ty) => {
        impl $crate::schema::FromValue for $ty {
            fn from_value(value: &$crate::Value) -> Result<Self, $crate::schema::SchemaError> {
                let name = <String as $crate::schema::FromValue>::from_value(value)?;
                <$ty as ::std::str::FromStr>::from_str(&name).map_err(|_| {
                    $crate::schema::SchemaError::UnknownName {
                        path: String::new(),
                        found: name,
                    }
                })
            }
        }

        impl $crate::schema::ToValue for $ty {
            fn to_value(&self) -> $crate::Value {
                let name: &'static str = self.into();
                $crate::Value::from(name)
            }
        }
    };
}

/// Implements [FromValue] and [ToValue] for a fieldless enum that is written
/// by its integer code. The enum must be `Copy` and provide `from_repr` (for
/// example through strum's `FromRepr`).
#[macro_export]
macro_rules! impl_repr_value {
    ($ty:ty, $repr:ty) => {
        impl $crate::schema::FromValue for $ty {
            fn from_value(value: &$crate::Value) -> Result<Self, $crate::schema::SchemaError> {
                let code = <i32 as $crate::schema::FromValue>::from_value(value)?;
                <$repr>::try_from(code)
                    .ok()
                    .and_then(<$ty>::from_repr)
                    .ok_or_else(|| $crate::schema::SchemaError::UnknownName {
                        path: String::new(),
                        found: code.to_string(),
                    })
            }
        }

        impl $crate::schema::ToValue for $ty {
            fn to_value(&self) -> $crate::Value {
                $crate::Value::from(*self as $repr as i32)
            }
        }
    };
}
