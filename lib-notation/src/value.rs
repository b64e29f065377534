//! The dynamically-typed tree produced by the parser and consumed by the
//! serializer.
//!
//! ## Numbers
//! The notation has a single number kind as far as equality goes: an
//! [Scalar::Int] and a [Scalar::Float] compare equal when they hold the same
//! numeric value. Floats are written with four decimals and lose their point
//! when integral, so `1.0` comes back as `1`.
//!
//! ## Maps
//! A [Map] is an ordered list of key/value pairs. Key lookup ignores ASCII case,
//! and writing an existing key replaces its value in place.

use glam::DVec2;
use serde::Serialize;

/// An RGB colour with channels normalized to `0..=1`.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Color {
    pub const fn new(r: f64, g: f64, b: f64) -> Color {
        Color { r, g, b }
    }

    /// Builds a colour from `0..=255` channels, as written in the notation.
    pub fn from_rgb255(r: f64, g: f64, b: f64) -> Color {
        Color {
            r: r / 255.0,
            g: g / 255.0,
            b: b / 255.0,
        }
    }

    pub fn to_rgb255(self) -> [f64; 3] {
        [self.r * 255.0, self.g * 255.0, self.b * 255.0]
    }
}

/// An axis-aligned rectangle given by two corners.
#[derive(Default, Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub min: DVec2,
    pub max: DVec2,
}

impl Rect {
    pub const fn new(min: DVec2, max: DVec2) -> Rect {
        Rect { min, max }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i32),
    Float(f64),
    Str(String),
    Point(DVec2),
    Color(Color),
    Rect(Rect),
}

impl Scalar {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Scalar::Int(_) => "int",
            Scalar::Float(_) => "float",
            Scalar::Str(_) => "string",
            Scalar::Point(_) => "point",
            Scalar::Color(_) => "color",
            Scalar::Rect(_) => "rect",
        }
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Scalar::Int(a), Scalar::Int(b)) => a == b,
            (Scalar::Float(a), Scalar::Float(b)) => a == b,
            (Scalar::Int(a), Scalar::Float(b)) | (Scalar::Float(b), Scalar::Int(a)) => {
                *a as f64 == *b
            }
            (Scalar::Str(a), Scalar::Str(b)) => a == b,
            (Scalar::Point(a), Scalar::Point(b)) => a == b,
            (Scalar::Color(a), Scalar::Color(b)) => a == b,
            (Scalar::Rect(a), Scalar::Rect(b)) => a == b,
            _ => false,
        }
    }
}

/// A node of the value tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Scalar(Scalar),
    List(Vec<Value>),
    Map(Map),
}

impl Value {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Scalar(s) => s.kind_name(),
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    /// Returns the integer held by this value. Integral floats count.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Scalar(Scalar::Int(i)) => Some(*i),
            Value::Scalar(Scalar::Float(f))
                if f.fract() == 0.0 && *f >= i32::MIN as f64 && *f <= i32::MAX as f64 =>
            {
                Some(*f as i32)
            }
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Scalar(Scalar::Int(i)) => Some(*i as f64),
            Value::Scalar(Scalar::Float(f)) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(Scalar::Str(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_point(&self) -> Option<DVec2> {
        match self {
            Value::Scalar(Scalar::Point(p)) => Some(*p),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            Value::Scalar(Scalar::Color(c)) => Some(*c),
            _ => None,
        }
    }

    pub fn as_rect(&self) -> Option<Rect> {
        match self {
            Value::Scalar(Scalar::Rect(r)) => Some(*r),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// The notation's "nothing" value.
    pub fn void() -> Value {
        Value::Scalar(Scalar::Int(0))
    }

    pub fn point(x: f64, y: f64) -> Value {
        Value::Scalar(Scalar::Point(DVec2::new(x, y)))
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::void()
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Value::Scalar(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Scalar(Scalar::Int(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Scalar(Scalar::Float(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Scalar(Scalar::Str(value.to_string()))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Scalar(Scalar::Str(value))
    }
}

impl From<DVec2> for Value {
    fn from(value: DVec2) -> Self {
        Value::Scalar(Scalar::Point(value))
    }
}

impl From<Color> for Value {
    fn from(value: Color) -> Self {
        Value::Scalar(Scalar::Color(value))
    }
}

impl From<Rect> for Value {
    fn from(value: Rect) -> Self {
        Value::Scalar(Scalar::Rect(value))
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Map(value)
    }
}

/// Insertion-ordered, case-insensitive key/value list.
#[derive(Default, Debug, Clone)]
pub struct Map {
    entries: Vec<(String, Value)>,
}

impl Map {
    pub fn new() -> Self {
        Map {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(k, _)| k.eq_ignore_ascii_case(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.position(key).map(|idx| &self.entries[idx].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.position(key).map(|idx| &mut self.entries[idx].1)
    }

    /// Returns the entry at `idx` in insertion order.
    pub fn get_index(&self, idx: usize) -> Option<(&str, &Value)> {
        self.entries.get(idx).map(|(k, v)| (k.as_str(), v))
    }

    /// Upserts `value`. An existing key keeps its position and spelling.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        match self.position(&key) {
            Some(idx) => self.entries[idx].1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.position(key).map(|idx| self.entries.remove(idx).1)
    }

    /// Returns the value under `key`, inserting the result of `default` first
    /// if the key is absent.
    pub fn get_or_insert_with(
        &mut self,
        key: &str,
        default: impl FnOnce() -> Value,
    ) -> &mut Value {
        let idx = match self.position(key) {
            Some(idx) => idx,
            None => {
                self.entries.push((key.to_string(), default()));
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx].1
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut Value)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(other.entries.iter())
                .all(|((ka, va), (kb, vb))| ka.eq_ignore_ascii_case(kb) && va == vb)
    }
}

impl Serialize for Map {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Map {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Map::new();
        for (k, v) in iter {
            map.set(k, v);
        }
        map
    }
}

impl IntoIterator for Map {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_keys_ignore_case() {
        let mut map = Map::new();
        map.set("tileSeed", 4);
        assert!(map.contains_key("TILESEED"));
        assert_eq!(map.get("tileseed"), Some(&Value::from(4)));
    }

    #[test]
    fn map_set_keeps_first_position() {
        let mut map: Map = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        map.set("A", 10);
        let keys = map.keys().collect::<Vec<_>>();
        assert_eq!(keys, ["a", "b", "c"]);
        assert_eq!(map.get("a"), Some(&Value::from(10)));
    }

    #[test]
    fn map_remove() {
        let mut map: Map = [("a", 1), ("b", 2)].into_iter().collect();
        assert_eq!(map.remove("B"), Some(Value::from(2)));
        assert_eq!(map.len(), 1);
        assert_eq!(map.remove("b"), None);
    }

    #[test]
    fn numbers_share_one_kind() {
        assert_eq!(Value::from(3), Value::from(3.0));
        assert_ne!(Value::from(3), Value::from(3.5));
        assert_ne!(Value::from(3), Value::from("3"));
    }
}
