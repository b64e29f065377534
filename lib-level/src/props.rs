use std::sync::Arc;

use glam::{DVec2, IVec2};
use lib_asset::{CatalogPos, PropType};
use lib_notation::{FromValue, Map, SchemaError, ToValue, Value, notation_record};
use log::warn;

use crate::LevelData;

notation_record! {
    /// `[-depth, name, point(category, index), quad, data]`
    #[derive(Default, Debug, Clone, PartialEq)]
    struct PropEntry {
        neg_depth: i32 => pos,
        name: String => pos,
        catalog_pos: IVec2 => pos,
        quad: Vec<DVec2> => pos,
        data: Map => pos,
    }
}

notation_record! {
    #[derive(Default, Debug, Clone, PartialEq)]
    struct PropData {
        settings: Map => key("settings") skippable,
        points: Vec<DVec2> => key("points") skippable,
    }
}

#[derive(Debug, Clone)]
pub struct PropInstance {
    pub ty: Arc<PropType>,
    /// Distance into the level, `0` being the front.
    pub depth: i32,
    /// Corners in clockwise order starting at the top-left one.
    pub quad: [DVec2; 4],
    /// Path of a rope or long prop.
    pub points: Vec<DVec2>,
    settings: Map,
    catalog_pos: CatalogPos,
    /// Keys of the data map besides `#settings` and `#points`.
    data: Map,
}

impl PropInstance {
    pub fn new(ty: Arc<PropType>, depth: i32, quad: [DVec2; 4]) -> Self {
        PropInstance {
            catalog_pos: ty.pos,
            ty,
            depth,
            quad,
            points: Vec::new(),
            settings: Map::new(),
            data: Map::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.ty.name
    }

    /// Looks a setting up. The first lookup of a setting the instance does
    /// not carry yet copies the default from the prop type.
    pub fn setting(&mut self, name: &str) -> Option<&mut Value> {
        if !self.settings.contains_key(name) {
            let default = self.ty.default_setting(name)?;
            self.settings.set(name, default);
        }
        self.settings.get_mut(name)
    }

    pub fn set_setting(&mut self, name: &str, value: impl Into<Value>) -> bool {
        match self.setting(name) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    pub fn settings(&self) -> &Map {
        &self.settings
    }

    pub(crate) fn decode(
        value: &Value,
        resolve: impl FnOnce(&str, CatalogPos) -> Arc<PropType>,
    ) -> Result<Self, SchemaError> {
        let entry = PropEntry::from_value(value)?;
        let quad: [DVec2; 4] = entry.quad.try_into().map_err(|quad: Vec<DVec2>| {
            SchemaError::invalid(format!("expected 4 corners, found {}", quad.len())).nested("quad")
        })?;
        let data = PropData::from_value(&Value::Map(entry.data.clone()))
            .map_err(|e| e.nested("data"))?;

        let depth = entry.neg_depth.checked_neg().ok_or_else(|| {
            SchemaError::invalid(format!("depth {} is out of range", entry.neg_depth)).nested("depth")
        })?;
        let catalog_pos = CatalogPos::from_ivec2(entry.catalog_pos).unwrap_or_default();
        let ty = resolve(&entry.name, catalog_pos);
        let mut rest = entry.data;
        rest.remove("settings");
        rest.remove("points");

        Ok(PropInstance {
            ty,
            depth,
            quad,
            points: data.points,
            settings: data.settings,
            catalog_pos,
            data: rest,
        })
    }

    pub(crate) fn encode(&self) -> Value {
        let pos = if self.ty.placeholder {
            self.catalog_pos
        } else {
            self.ty.pos
        };

        let mut data = Map::new();
        data.set("settings", self.settings.to_value());
        if self.ty.kind.has_points() || !self.points.is_empty() {
            data.set("points", self.points.to_value());
        }
        for (key, value) in self.data.iter() {
            data.set(key, value.clone());
        }

        PropEntry {
            neg_depth: -self.depth,
            name: self.ty.name.clone(),
            catalog_pos: pos.as_ivec2(),
            quad: self.quad.to_vec(),
            data,
        }
        .to_value()
    }
}

impl LevelData {
    pub fn props(&self) -> &[PropInstance] {
        &self.props
    }

    pub fn prop_mut(&mut self, idx: usize) -> Option<&mut PropInstance> {
        self.props.get_mut(idx)
    }

    /// Adds a prop with its default settings and returns its index.
    pub fn add_prop(&mut self, name: &str, depth: i32, quad: [DVec2; 4]) -> usize {
        let ty = self.resolve_prop(name, CatalogPos::default());
        let mut prop = PropInstance::new(ty, depth, quad);
        prop.settings = prop.ty.default_settings();
        self.props.push(prop);
        self.props.len() - 1
    }

    pub fn remove_prop(&mut self, idx: usize) -> Option<PropInstance> {
        (idx < self.props.len()).then(|| self.props.remove(idx))
    }

    pub(crate) fn resolve_prop(&self, name: &str, pos: CatalogPos) -> Arc<PropType> {
        match self.catalogs.props.get(name) {
            Some(ty) => ty.clone(),
            None => {
                warn!("Unknown prop {name:?}, using a placeholder");
                Arc::new(PropType::placeholder(name, pos))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_notation::parse;

    #[test]
    fn entry_round_trip() {
        let value = parse(
            "[-3, \"Lamp\", point(2, 4), [point(0, 0), point(10, 0), point(10, 10), point(0, 10)], \
             [#settings: [#renderorder: 0, #seed: 12], #extra: 1]]",
        )
        .unwrap();
        let mut prop = PropInstance::decode(&value, |name, pos| {
            Arc::new(PropType::placeholder(name, pos))
        })
        .unwrap();
        assert_eq!(prop.depth, 3);
        assert_eq!(prop.setting("seed"), Some(&mut Value::from(12)));
        assert_eq!(prop.encode(), value);
    }

    #[test]
    fn quad_needs_four_corners() {
        let value = parse("[0, \"Lamp\", point(1, 1), [point(0, 0)], [:]]").unwrap();
        let err = PropInstance::decode(&value, |name, pos| {
            Arc::new(PropType::placeholder(name, pos))
        })
        .unwrap_err();
        assert_eq!(err.path(), "quad");
    }

    #[test]
    fn depth_out_of_range() {
        let value = parse(
            "[-2147483648, \"Lamp\", point(1, 1), \
             [point(0, 0), point(1, 0), point(1, 1), point(0, 1)], [:]]",
        )
        .unwrap();
        let err = PropInstance::decode(&value, |name, pos| {
            Arc::new(PropType::placeholder(name, pos))
        })
        .unwrap_err();
        assert_eq!(err.path(), "depth");
    }
}
