//! The `#tlMatrix` of section 1.
//!
//! Every cell is `[#tp: kind, #Data: payload]`:
//!
//! | kind | payload |
//! |---|---|
//! | `default` | `0` |
//! | `material` | material name |
//! | `tileHead` | `[point(category, index), name]` |
//! | `tileBody` | `[point(headX + 1, headY + 1), headLayer + 1]` |

use glam::IVec2;
use lib_asset::CatalogPos;
use lib_notation::{FromValue, SchemaError, ToValue, Value, impl_enum_value, notation_record};
use log::warn;
use strum::{EnumString, IntoStaticStr};

use crate::tiles::TileInstance;
use crate::{LAYERS, LevelData, LevelError, VisualCell, section};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive)]
pub(crate) enum CellKind {
    #[default]
    #[strum(serialize = "default")]
    Default,
    #[strum(serialize = "material")]
    Material,
    #[strum(serialize = "tileHead")]
    TileHead,
    #[strum(serialize = "tileBody")]
    TileBody,
}

impl_enum_value!(CellKind);

notation_record! {
    #[derive(Default, Debug, Clone, PartialEq)]
    pub(crate) struct TileCell {
        kind: CellKind => key("tp"),
        data: Value => key("Data"),
    }
}

notation_record! {
    #[derive(Default, Debug, Clone, PartialEq)]
    struct HeadData {
        catalog_pos: IVec2 => pos,
        name: String => pos,
    }
}

notation_record! {
    #[derive(Default, Debug, Clone, PartialEq)]
    struct BodyData {
        head: IVec2 => pos,
        head_layer: i32 => pos,
    }
}

pub(crate) type TileColumns = Vec<Vec<Vec<TileCell>>>;

pub(crate) fn parse_tile_columns(value: &Value) -> Result<TileColumns, LevelError> {
    let columns = TileColumns::from_value(value)
        .map_err(|e| LevelError::Schema {
            section: section::TILES,
            source: e.nested("tlMatrix"),
        })?;
    for (x, column) in columns.iter().enumerate() {
        for (y, cell) in column.iter().enumerate() {
            if cell.len() != LAYERS {
                return Err(LevelError::Format(format!(
                    "tile cell ({x}, {y}) has {} layers",
                    cell.len()
                )));
            }
        }
    }
    Ok(columns)
}

struct Body {
    pos: IVec2,
    layer: usize,
    head: IVec2,
    head_layer: usize,
}

impl LevelData {
    /// Heads go in first so that bodies can find them. A body pointing at
    /// anything but a head is dropped.
    pub(crate) fn decode_tiles(&mut self, columns: &TileColumns) -> Result<(), LevelError> {
        let mut bodies = Vec::new();
        for (x, column) in columns.iter().enumerate() {
            for (y, cell) in column.iter().enumerate() {
                let pos = IVec2::new(x as i32, y as i32);
                for (layer, entry) in cell.iter().enumerate() {
                    let at = |e: SchemaError| LevelError::Schema {
                        section: section::TILES,
                        source: e.nested(&format!("tlMatrix[{x}][{y}][{layer}]")),
                    };
                    match entry.kind {
                        CellKind::Default => {}
                        CellKind::Material => {
                            let name = String::from_value(&entry.data).map_err(at)?;
                            self.set_visual_cell(pos, layer, VisualCell::Material(name));
                        }
                        CellKind::TileHead => {
                            let head = HeadData::from_value(&entry.data).map_err(at)?;
                            let catalog_pos =
                                CatalogPos::from_ivec2(head.catalog_pos).unwrap_or_default();
                            let ty = self.resolve_tile(&head.name, catalog_pos);
                            let key = self.tiles.insert(TileInstance::new(ty, pos, layer));
                            self.set_visual_cell(pos, layer, VisualCell::Tile { key, under: None });
                        }
                        CellKind::TileBody => {
                            let body = BodyData::from_value(&entry.data).map_err(at)?;
                            bodies.push(Body {
                                pos,
                                layer,
                                head: body.head.saturating_sub(IVec2::ONE),
                                head_layer: body.head_layer.saturating_sub(1).max(0) as usize,
                            });
                        }
                    }
                }
            }
        }

        for body in bodies {
            let key = self
                .tile_at(body.head, body.head_layer)
                .filter(|&key| {
                    self.tile(key)
                        .is_some_and(|t| t.head == body.head && t.layer == body.head_layer)
                });
            match key {
                Some(key) => {
                    self.set_visual_cell(body.pos, body.layer, VisualCell::Tile { key, under: None })
                }
                None => warn!(
                    "Dropping tile body at {} on layer {}: no head at {} on layer {}",
                    body.pos, body.layer, body.head, body.head_layer
                ),
            }
        }
        Ok(())
    }

    fn encode_tile_cell(&self, pos: IVec2, layer: usize) -> TileCell {
        let (kind, data) = match self.visual_cell(pos, layer) {
            VisualCell::Empty => (CellKind::Default, Value::from(0)),
            VisualCell::Material(name) => (CellKind::Material, Value::from(name.as_str())),
            VisualCell::Tile { key, .. } => match self.tile(*key) {
                Some(tile) if tile.head == pos && tile.layer == layer => {
                    let catalog_pos = tile.ty.pos.as_ivec2();
                    let head = HeadData {
                        catalog_pos,
                        name: tile.ty.name.clone(),
                    };
                    (CellKind::TileHead, head.to_value())
                }
                Some(tile) => {
                    let body = BodyData {
                        head: tile.head + IVec2::ONE,
                        head_layer: tile.layer as i32 + 1,
                    };
                    (CellKind::TileBody, body.to_value())
                }
                None => (CellKind::Default, Value::from(0)),
            },
        };
        TileCell { kind, data }
    }

    pub(crate) fn encode_tiles(&self) -> Value {
        let columns: TileColumns = (0..self.width())
            .map(|x| {
                (0..self.height())
                    .map(|y| {
                        (0..LAYERS)
                            .map(|layer| self.encode_tile_cell(IVec2::new(x, y), layer))
                            .collect()
                    })
                    .collect()
            })
            .collect();
        columns.to_value()
    }
}
