//! Default insertion for documents written by older editors.
//!
//! Every step names a section and a key. A step applies when its predicate
//! holds for the section map and then writes the key. Steps are idempotent:
//! once the key is written, the predicate no longer holds.

use lib_notation::{Map, Value};
use log::info;

use crate::section;

pub struct Migration {
    pub section: usize,
    pub key: &'static str,
    pub applies: fn(&Map) -> bool,
    pub value: fn(&Map) -> Value,
}

fn missing(key: &'static str) -> impl Fn(&Map) -> bool {
    move |map| !map.contains_key(key)
}

macro_rules! migrations {
    ($( $section:ident . $key:literal => $value:expr $(, if $applies:expr)? ; )*) => {
        &[$(
            Migration {
                section: section::$section,
                key: $key,
                applies: migrations!(@applies $key $(, $applies)?),
                value: $value,
            },
        )*]
    };
    (@applies $key:literal) => {
        |map: &Map| missing($key)(map)
    };
    (@applies $key:literal, $applies:expr) => {
        $applies
    };
}

pub static MIGRATIONS: &[Migration] = migrations! {
    TILES."defaultMaterial" => |_| Value::from("Standard");
    TILES."workLayer" => |_| Value::from(1);
    TILES."toolType" => |_| Value::from("material");
    TILES."toolData" => |_| Value::from("Standard");

    LIGHT."lightAngle" => |_| Value::from(180);
    LIGHT."flatness" => |_| Value::from(1);

    OVERVIEW."tileSeed" => |_| Value::from(0);
    OVERVIEW."light" => |_| Value::from(1);
    OVERVIEW."extraTiles" => |_| Value::List(vec![12.into(), 3.into(), 12.into(), 5.into()]);

    CAMERAS."cameras" => |_| Value::List(vec![Value::point(0.0, 0.0)]);
    CAMERAS."selectedCamera" => |_| Value::from(0);
    CAMERAS."quads" => zero_quads, if quads_out_of_sync;

    WATER."waterLevel" => |_| Value::from(-1);
    WATER."waterInFront" => |_| Value::from(1);
    WATER."waveLength" => |_| Value::from(60);
    WATER."waveAmplitude" => |_| Value::from(5);
    WATER."waveSpeed" => |_| Value::from(10);

    PROPS."props" => |_| Value::List(Vec::new());
    PROPS."color" => |_| Value::from(0);
};

fn camera_count(map: &Map) -> usize {
    map.get("cameras")
        .and_then(Value::as_list)
        .map_or(0, <[Value]>::len)
}

fn quads_out_of_sync(map: &Map) -> bool {
    let quads = map.get("quads").and_then(Value::as_list);
    quads.is_none_or(|quads| quads.len() < camera_count(map))
}

/// Keeps the quads already present and pads them with zero offsets.
fn zero_quads(map: &Map) -> Value {
    let zero = || Value::List(vec![0.into(), 0.into()]);
    let mut quads = map
        .get("quads")
        .and_then(Value::as_list)
        .map(<[Value]>::to_vec)
        .unwrap_or_default();
    while quads.len() < camera_count(map) {
        quads.push(Value::List((0..4).map(|_| zero()).collect()));
    }
    Value::List(quads)
}

/// The default of `key` in `section`, if a step inserts it.
pub fn default_for(section: usize, key: &str) -> Option<Value> {
    MIGRATIONS
        .iter()
        .find(|m| m.section == section && m.key.eq_ignore_ascii_case(key))
        .map(|m| (m.value)(&Map::new()))
}

/// Applies every step for `section` in order. Returns the number of keys
/// written.
pub fn migrate(section: usize, map: &mut Map) -> usize {
    let mut applied = 0;
    for step in MIGRATIONS.iter().filter(|m| m.section == section) {
        if (step.applies)(map) {
            info!("Section {section}: inserting default #{}", step.key);
            let value = (step.value)(map);
            map.set(step.key, value);
            applied += 1;
        }
    }
    applied
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idempotent() {
        let mut map = Map::new();
        assert!(migrate(section::WATER, &mut map) > 0);
        assert_eq!(migrate(section::WATER, &mut map), 0);
        assert_eq!(map.get("waterLevel"), Some(&Value::from(-1)));
    }

    #[test]
    fn quads_follow_cameras() {
        let mut map = Map::new();
        map.set("cameras", Value::List(vec![Value::point(0.0, 0.0); 2]));
        map.set("quads", Value::List(Vec::new()));
        migrate(section::CAMERAS, &mut map);
        assert_eq!(map.get("quads").and_then(Value::as_list).map(<[Value]>::len), Some(2));
        assert_eq!(migrate(section::CAMERAS, &mut map), 0);
    }

    #[test]
    fn defaults_are_listed() {
        assert_eq!(default_for(section::LIGHT, "LIGHTANGLE"), Some(Value::from(180)));
        assert_eq!(default_for(section::LIGHT, "nothing"), None);
    }
}
