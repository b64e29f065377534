//! Section 0: `[column][cell][layer] = [terrain, [features]]`.

use glam::IVec2;
use lib_asset::GeoType;
use lib_notation::{FromValue, ToValue, Value, notation_record};
use log::warn;

use crate::{FeatureFlags, GeoCell, LAYERS, LevelData, LevelError, section};

notation_record! {
    #[derive(Default, Debug, Clone, PartialEq)]
    pub(crate) struct GeoEntry {
        terrain: i32 => pos,
        features: Vec<i32> => pos,
    }
}

impl GeoEntry {
    fn decode(&self, pos: IVec2, layer: usize) -> GeoCell {
        let terrain = GeoType::from_code(self.terrain).unwrap_or_else(|| {
            warn!(
                "Unknown geometry code {} at {pos} on layer {layer}, using air",
                self.terrain
            );
            GeoType::Air
        });
        let features = self.features.iter().fold(FeatureFlags::empty(), |acc, &code| {
            match FeatureFlags::from_code(code) {
                Some(flag) => acc | flag,
                None => {
                    warn!("Dropping feature code {code} at {pos} on layer {layer}");
                    acc
                }
            }
        });
        GeoCell { terrain, features }
    }

    fn encode(cell: GeoCell) -> Self {
        GeoEntry {
            terrain: cell.terrain.code(),
            features: cell.features.codes().collect(),
        }
    }
}

pub(crate) type Columns = Vec<Vec<Vec<GeoEntry>>>;

pub(crate) fn parse_columns(value: &Value) -> Result<Columns, LevelError> {
    let columns = Columns::from_value(value).map_err(LevelError::schema(section::GEOMETRY))?;
    for (x, column) in columns.iter().enumerate() {
        for (y, cell) in column.iter().enumerate() {
            if cell.len() != LAYERS {
                return Err(LevelError::Format(format!(
                    "geometry cell ({x}, {y}) has {} layers",
                    cell.len()
                )));
            }
        }
    }
    Ok(columns)
}

/// Width and height of a column-major matrix. Columns must agree in length.
pub(crate) fn matrix_size<T>(columns: &[Vec<T>], what: &str) -> Result<IVec2, LevelError> {
    let height = columns.first().map_or(0, Vec::len);
    if let Some(x) = columns.iter().position(|column| column.len() != height) {
        return Err(LevelError::Format(format!(
            "{what} column {x} has {} cells, column 0 has {height}",
            columns[x].len()
        )));
    }
    Ok(IVec2::new(columns.len() as i32, height as i32))
}

impl LevelData {
    pub(crate) fn decode_geometry(&mut self, columns: &Columns) {
        for (x, column) in columns.iter().enumerate() {
            for (y, cell) in column.iter().enumerate() {
                let pos = IVec2::new(x as i32, y as i32);
                for (layer, entry) in cell.iter().enumerate() {
                    self.set_geo_cell(pos, layer, entry.decode(pos, layer));
                }
            }
        }
    }

    pub(crate) fn encode_geometry(&self) -> Value {
        let columns: Columns = (0..self.width())
            .map(|x| {
                (0..self.height())
                    .map(|y| {
                        (0..LAYERS)
                            .map(|layer| GeoEntry::encode(self.geo_cell(IVec2::new(x, y), layer)))
                            .collect()
                    })
                    .collect()
            })
            .collect();
        columns.to_value()
    }
}
