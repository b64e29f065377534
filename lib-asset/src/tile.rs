use glam::IVec2;
use lib_notation::{ParseMode, impl_enum_value, notation_record};
use strum::{EnumString, IntoStaticStr};

use crate::{Catalog, CatalogEntry, CatalogError, CatalogPos, GeoType, InitFile};

/// How the renderer draws a tile. Only carried through.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive)]
pub enum TileRenderKind {
    #[default]
    #[strum(serialize = "box")]
    Box,
    #[strum(serialize = "voxelStruct")]
    VoxelStruct,
    #[strum(serialize = "voxelStructRandomDisplaceHorizontal")]
    VoxelStructRandomDisplaceHorizontal,
    #[strum(serialize = "voxelStructRandomDisplaceVertical")]
    VoxelStructRandomDisplaceVertical,
    #[strum(serialize = "voxelStructRockType")]
    VoxelStructRockType,
    #[strum(serialize = "voxelStructSandType")]
    VoxelStructSandType,
}

impl_enum_value!(TileRenderKind);

notation_record! {
    #[derive(Default, Debug, Clone, PartialEq)]
    pub struct TileInit {
        pub name: String => key("nm"),
        pub size: IVec2 => key("sz"),
        pub specs: Vec<i32> => key("specs"),
        pub specs2: Option<Vec<i32>> => key("specs2") skippable nullable,
        pub kind: TileRenderKind => key("tp"),
        pub repeat_layers: Vec<i32> => key("repeatL") skippable,
        pub buffer_tiles: i32 => key("bfTiles") skippable,
        pub variations: i32 => key("rnd") skippable,
        pub preview_pos: i32 => key("ptPos") skippable,
        pub tags: Vec<String> => key("tags") skippable,
    }
}

/// A tile definition. Geometry requirements are stored column-major, one
/// table per layer the tile occupies; `None` means the cell is not checked.
#[derive(Debug, Clone, PartialEq)]
pub struct TileType {
    pub name: String,
    pub size: IVec2,
    pub specs: Vec<Option<GeoType>>,
    pub specs2: Option<Vec<Option<GeoType>>>,
    pub kind: TileRenderKind,
    pub repeat_layers: Vec<i32>,
    pub buffer_tiles: i32,
    pub variations: i32,
    pub tags: Vec<String>,
    pub pos: CatalogPos,
    /// Set for types made up for names missing from the catalog.
    pub placeholder: bool,
}

impl TileType {
    pub fn from_init(init: TileInit, pos: CatalogPos) -> Result<Self, CatalogError> {
        if init.size.x <= 0 || init.size.y <= 0 {
            return Err(CatalogError::Invalid(format!(
                "tile {:?} has non-positive size {}",
                init.name, init.size
            )));
        }

        let cells = init
            .size
            .x
            .checked_mul(init.size.y)
            .ok_or_else(|| {
                CatalogError::Invalid(format!("tile {:?} is too large: {}", init.name, init.size))
            })? as usize;
        let specs = spec_table(&init.name, "specs", &init.specs, cells)?;
        let specs2 = init
            .specs2
            .map(|table| spec_table(&init.name, "specs2", &table, cells))
            .transpose()?;

        Ok(TileType {
            name: init.name,
            size: init.size,
            specs,
            specs2,
            kind: init.kind,
            repeat_layers: init.repeat_layers,
            buffer_tiles: init.buffer_tiles,
            variations: init.variations,
            tags: init.tags,
            pos,
            placeholder: false,
        })
    }

    /// A 1x1 tile without requirements standing in for an unknown name.
    pub fn placeholder(name: &str, pos: CatalogPos) -> Self {
        TileType {
            name: name.to_string(),
            size: IVec2::ONE,
            specs: vec![None],
            specs2: None,
            kind: TileRenderKind::Box,
            repeat_layers: Vec::new(),
            buffer_tiles: 0,
            variations: 1,
            tags: Vec::new(),
            pos,
            placeholder: true,
        }
    }

    pub fn layer_count(&self) -> usize {
        if self.specs2.is_some() { 2 } else { 1 }
    }

    /// Offset of the head cell from the top-left corner of the footprint.
    pub fn head_offset(&self) -> IVec2 {
        (self.size - IVec2::ONE) / 2
    }

    /// The requirement of the cell at `local` (relative to the top-left
    /// corner) on the tile's `layer`-th layer.
    pub fn requirement(&self, local: IVec2, layer: usize) -> Option<GeoType> {
        if local.x < 0 || local.y < 0 || local.x >= self.size.x || local.y >= self.size.y {
            return None;
        }
        let table = match layer {
            0 => &self.specs,
            1 => self.specs2.as_ref()?,
            _ => return None,
        };
        let idx = (local.x * self.size.y + local.y) as usize;
        table.get(idx).copied().flatten()
    }

    /// Every footprint cell relative to the top-left corner.
    pub fn cells(&self) -> impl Iterator<Item = IVec2> + use<> {
        let size = self.size;
        (0..size.x).flat_map(move |x| (0..size.y).map(move |y| IVec2::new(x, y)))
    }

    pub fn has_requirements(&self) -> bool {
        self.specs
            .iter()
            .chain(self.specs2.iter().flatten())
            .any(Option::is_some)
    }
}

impl CatalogEntry for TileType {
    fn name(&self) -> &str {
        &self.name
    }

    fn pos(&self) -> CatalogPos {
        self.pos
    }
}

fn spec_table(
    name: &str,
    key: &str,
    codes: &[i32],
    cells: usize,
) -> Result<Vec<Option<GeoType>>, CatalogError> {
    if codes.len() != cells {
        return Err(CatalogError::Invalid(format!(
            "tile {name:?}: {key} has {} entries, size needs {cells}",
            codes.len()
        )));
    }
    codes
        .iter()
        .map(|&code| match code {
            -1 => Ok(None),
            code => GeoType::from_code(code).map(Some).ok_or_else(|| {
                CatalogError::Invalid(format!("tile {name:?}: unknown geometry code {code}"))
            }),
        })
        .collect()
}

pub type TileCatalog = Catalog<TileType>;

impl TileCatalog {
    pub fn load(src: &str, mode: ParseMode) -> Self {
        Catalog::build(InitFile::<TileInit>::parse(src, mode), TileType::from_init)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(src: &str) -> Result<TileType, CatalogError> {
        let init = lib_notation::from_str::<TileInit>(src, ParseMode::Strict).unwrap();
        TileType::from_init(init, CatalogPos::new(1, 1))
    }

    #[test]
    fn column_major_specs() {
        let tile = tile(
            "[#nm: \"t\", #sz: point(2, 3), #specs: [1, 0, -1, 2, 3, 4], #specs2: 0, #tp: \"box\"]",
        )
        .unwrap();
        assert_eq!(tile.layer_count(), 1);
        assert_eq!(tile.head_offset(), IVec2::new(0, 1));
        assert_eq!(tile.requirement(IVec2::new(0, 0), 0), Some(GeoType::Solid));
        assert_eq!(tile.requirement(IVec2::new(0, 2), 0), None);
        assert_eq!(tile.requirement(IVec2::new(1, 0), 0), Some(GeoType::SlopeRightUp));
        assert_eq!(tile.requirement(IVec2::new(1, 2), 0), Some(GeoType::SlopeRightDown));
        assert_eq!(tile.requirement(IVec2::new(0, 0), 1), None);
    }

    #[test]
    fn bad_spec_length() {
        let err = tile("[#nm: \"t\", #sz: point(2, 2), #specs: [1, 1, 1], #tp: \"box\"]");
        assert!(matches!(err, Err(CatalogError::Invalid(_))));
    }

    #[test]
    fn two_layers() {
        let tile = tile(
            "[#nm: \"t\", #sz: point(1, 1), #specs: [1], #specs2: [-1], #tp: \"voxelStruct\"]",
        )
        .unwrap();
        assert_eq!(tile.layer_count(), 2);
        assert!(tile.has_requirements());
    }
}
