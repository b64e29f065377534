use lib_notation::{FromValue, ToValue, Value};
use log::warn;

use crate::{LevelData, migrate, section};

/// Extra tiles around the playable area, in tiles.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BufferTiles {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl LevelData {
    /// Reads a setting, falling back to the migration default when the key
    /// is absent or has the wrong shape.
    fn setting<T: FromValue + Default>(&self, section: usize, key: &str) -> T {
        let stored = self.sections.map(section).and_then(|map| map.get(key));
        if let Some(value) = stored {
            match T::from_value(value) {
                Ok(out) => return out,
                Err(e) => warn!("Section {section}: bad #{key}: {e}"),
            }
        }
        migrate::default_for(section, key)
            .and_then(|value| T::from_value(&value).ok())
            .unwrap_or_default()
    }

    fn set_setting(&mut self, section: usize, key: &str, value: impl ToValue) {
        if let Some(map) = self.sections.map_mut(section) {
            map.set(key, value.to_value());
        }
    }

    /// Light angle in degrees.
    pub fn light_angle(&self) -> f64 {
        self.setting(section::LIGHT, "lightAngle")
    }

    pub fn set_light_angle(&mut self, angle: f64) {
        self.set_setting(section::LIGHT, "lightAngle", angle);
    }

    /// Light distance.
    pub fn flatness(&self) -> i32 {
        self.setting(section::LIGHT, "flatness")
    }

    pub fn set_flatness(&mut self, flatness: i32) {
        self.set_setting(section::LIGHT, "flatness", flatness);
    }

    pub fn sunlight(&self) -> bool {
        self.setting(section::OVERVIEW, "light")
    }

    pub fn set_sunlight(&mut self, on: bool) {
        self.set_setting(section::OVERVIEW, "light", on);
    }

    pub fn tile_seed(&self) -> i32 {
        self.setting(section::OVERVIEW, "tileSeed")
    }

    pub fn set_tile_seed(&mut self, seed: i32) {
        self.set_setting(section::OVERVIEW, "tileSeed", seed);
    }

    /// Water level in tiles from the bottom, `-1` when there is no water.
    pub fn water_level(&self) -> i32 {
        self.setting(section::WATER, "waterLevel")
    }

    pub fn set_water_level(&mut self, level: i32) {
        self.set_setting(section::WATER, "waterLevel", level);
    }

    pub fn water_in_front(&self) -> bool {
        self.setting(section::WATER, "waterInFront")
    }

    pub fn set_water_in_front(&mut self, in_front: bool) {
        self.set_setting(section::WATER, "waterInFront", in_front);
    }

    pub fn buffer_tiles(&self) -> BufferTiles {
        match self.setting::<Vec<i32>>(section::OVERVIEW, "extraTiles")[..] {
            [left, top, right, bottom] => BufferTiles {
                left,
                top,
                right,
                bottom,
            },
            _ => {
                warn!("#extraTiles does not have 4 entries");
                BufferTiles::default()
            }
        }
    }

    pub fn set_buffer_tiles(&mut self, tiles: BufferTiles) {
        let BufferTiles {
            left,
            top,
            right,
            bottom,
        } = tiles;
        self.set_setting(section::OVERVIEW, "extraTiles", vec![left, top, right, bottom]);
    }

    pub fn default_material(&self) -> String {
        self.setting(section::TILES, "defaultMaterial")
    }

    pub fn set_default_material(&mut self, name: &str) {
        self.set_setting(section::TILES, "defaultMaterial", Value::from(name));
    }

    /// The layer being edited, `0`-based. Stored `1`-based.
    pub fn work_layer(&self) -> usize {
        let stored: i32 = self.setting(section::TILES, "workLayer");
        (stored - 1).clamp(0, 2) as usize
    }

    pub fn set_work_layer(&mut self, layer: usize) {
        self.set_setting(section::TILES, "workLayer", layer.min(2) as i32 + 1);
    }
}
