use std::sync::Arc;

use glam::IVec2;
use hashbrown::HashMap;
use lib_asset::{Catalogs, GeoType, TileType};
use log::warn;

use crate::cells::EMPTY_CELL;
use crate::document::Sections;
use crate::tiles::{TileArena, footprint};
use crate::{
    EffectInstance, FeatureFlags, GeoCell, Grid, LAYERS, LevelCamera, LevelError, PropInstance,
    TileInstance, TileKey, VisualCell, geo,
};

/// A level: geometry, visuals, placed tiles, effects, props, cameras and the
/// settings sections of the document it came from.
///
/// Reads outside the grid return defaults and writes outside it are
/// ignored. Only tile placement treats an out-of-bounds head as an error.
pub struct LevelData {
    pub(crate) terrain: Grid<GeoType>,
    pub(crate) features: HashMap<(IVec2, usize), FeatureFlags>,
    pub(crate) visuals: Grid<VisualCell>,
    pub(crate) tiles: TileArena,
    pub(crate) effects: Vec<EffectInstance>,
    pub(crate) effects_dirty: bool,
    pub(crate) props: Vec<PropInstance>,
    pub(crate) cameras: Vec<LevelCamera>,
    pub(crate) catalogs: Catalogs,
    pub(crate) sections: Sections,
    pub(crate) line_ending: &'static str,
}

impl LevelData {
    /// A blank level: all air, nothing drawn, one camera.
    pub fn new(width: i32, height: i32, catalogs: &Catalogs) -> Self {
        let mut level = LevelData::blank(IVec2::new(width, height), catalogs);
        level.sections = Sections::blank(level.size());
        level.cameras = vec![LevelCamera::default()];
        level
    }

    pub(crate) fn blank(size: IVec2, catalogs: &Catalogs) -> Self {
        LevelData {
            terrain: Grid::new(size.x, size.y, GeoType::Air),
            features: HashMap::new(),
            visuals: Grid::new(size.x, size.y, VisualCell::Empty),
            tiles: TileArena::default(),
            effects: Vec::new(),
            effects_dirty: false,
            props: Vec::new(),
            cameras: Vec::new(),
            catalogs: catalogs.clone(),
            sections: Sections::default(),
            line_ending: "\r",
        }
    }

    pub fn width(&self) -> i32 {
        self.terrain.width()
    }

    pub fn height(&self) -> i32 {
        self.terrain.height()
    }

    pub fn size(&self) -> IVec2 {
        IVec2::new(self.width(), self.height())
    }

    pub fn catalogs(&self) -> &Catalogs {
        &self.catalogs
    }

    pub fn in_bounds(&self, pos: IVec2, layer: usize) -> bool {
        self.terrain.contains(pos, layer)
    }

    fn bounds_error(&self, pos: IVec2, layer: usize) -> LevelError {
        LevelError::Bounds {
            pos,
            layer,
            width: self.width(),
            height: self.height(),
        }
    }

    /// Out-of-bounds cells read as air.
    pub fn terrain(&self, pos: IVec2, layer: usize) -> GeoType {
        self.terrain.get(pos, layer).copied().unwrap_or_default()
    }

    pub fn geo_cell(&self, pos: IVec2, layer: usize) -> GeoCell {
        if !self.in_bounds(pos, layer) {
            return GeoCell::AIR;
        }
        GeoCell {
            terrain: self.terrain(pos, layer),
            features: self
                .features
                .get(&(pos, layer))
                .copied()
                .unwrap_or_default(),
        }
    }

    pub fn set_geo_cell(&mut self, pos: IVec2, layer: usize, cell: GeoCell) {
        let Some(terrain) = self.terrain.get_mut(pos, layer) else {
            return;
        };
        *terrain = cell.terrain;
        if cell.features.is_empty() {
            self.features.remove(&(pos, layer));
        } else {
            self.features.insert((pos, layer), cell.features);
        }
    }

    fn set_terrain(&mut self, pos: IVec2, layer: usize, terrain: GeoType) {
        if let Some(slot) = self.terrain.get_mut(pos, layer) {
            *slot = terrain;
        }
    }

    pub fn visual_cell(&self, pos: IVec2, layer: usize) -> &VisualCell {
        self.visuals.get(pos, layer).unwrap_or(&EMPTY_CELL)
    }

    /// Overwrites a cell. A tile cell whose handle is stale is refused.
    pub fn set_visual_cell(&mut self, pos: IVec2, layer: usize, cell: VisualCell) {
        if let Some(key) = cell.tile_key() {
            if !self.tiles.contains(key) {
                warn!("Refusing to write a stale tile handle to {pos} on layer {layer}");
                return;
            }
        }
        if let Some(slot) = self.visuals.get_mut(pos, layer) {
            *slot = cell;
        }
    }

    pub fn tile(&self, key: TileKey) -> Option<&TileInstance> {
        self.tiles.get(key)
    }

    pub fn tiles(&self) -> impl Iterator<Item = (TileKey, &TileInstance)> {
        self.tiles.iter()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn tile_at(&self, pos: IVec2, layer: usize) -> Option<TileKey> {
        self.visual_cell(pos, layer).tile_key()
    }

    /// Every footprint cell must match its requirement and hold no other tile.
    pub fn can_place_tile(&self, head: IVec2, layer: usize, ty: &TileType) -> bool {
        if !self.in_bounds(head, layer) || layer + ty.layer_count() > LAYERS {
            return false;
        }

        footprint(ty, head, layer).into_iter().all(|cell| {
            let required = ty.requirement(cell.local, cell.tile_layer);
            if required.is_some_and(|geo| self.terrain(cell.pos, cell.layer) != geo) {
                return false;
            }
            self.tile_at(cell.pos, cell.layer).is_none()
        })
    }

    /// Places a tile, removing every tile that overlaps it. With `add_geo`
    /// the terrain under the tile is overwritten to match its requirements.
    /// Footprint cells outside the grid are skipped.
    pub fn place_tile(
        &mut self,
        head: IVec2,
        layer: usize,
        ty: Arc<TileType>,
        add_geo: bool,
    ) -> Result<TileKey, LevelError> {
        if !self.in_bounds(head, layer) || layer + ty.layer_count() > LAYERS {
            return Err(self.bounds_error(head, layer));
        }

        let cells = footprint(&ty, head, layer)
            .into_iter()
            .filter(|cell| self.in_bounds(cell.pos, cell.layer))
            .collect::<Vec<_>>();

        for cell in &cells {
            if let Some(key) = self.tile_at(cell.pos, cell.layer) {
                self.remove_tile(key)?;
            }
            if let (true, Some(geo)) = (add_geo, ty.requirement(cell.local, cell.tile_layer)) {
                self.set_terrain(cell.pos, cell.layer, geo);
            }
        }

        let key = self.tiles.insert(TileInstance::new(ty, head, layer));
        for cell in &cells {
            if let Some(slot) = self.visuals.get_mut(cell.pos, cell.layer) {
                let under = slot.without_tile().material().map(str::to_string);
                *slot = VisualCell::Tile { key, under };
            }
        }
        Ok(key)
    }

    /// Removes a tile and clears every cell still pointing at it. Terrain is
    /// left alone.
    pub fn remove_tile(&mut self, key: TileKey) -> Result<TileInstance, LevelError> {
        let tile = self.tiles.remove(key).ok_or(LevelError::StaleTile(key))?;
        for slot in self.visuals.values_mut() {
            if slot.tile_key() == Some(key) {
                *slot = slot.without_tile();
            }
        }
        Ok(tile)
    }

    /// The slope that would fit at `pos`, if any.
    pub fn slope_for(&self, pos: IVec2, layer: usize) -> Option<GeoType> {
        if !self.in_bounds(pos, layer) {
            return None;
        }
        geo::slope_for(|p| self.terrain(p, layer), pos)
    }

    /// Puts the fitting slope at `pos`. Returns `None` and leaves the
    /// terrain alone when no slope fits.
    pub fn place_slope(&mut self, pos: IVec2, layer: usize) -> Option<GeoType> {
        let slope = self.slope_for(pos, layer)?;
        self.set_terrain(pos, layer, slope);
        Some(slope)
    }

    pub(crate) fn resolve_tile(&self, name: &str, pos: lib_asset::CatalogPos) -> Arc<TileType> {
        match self.catalogs.tiles.get(name) {
            Some(ty) => ty.clone(),
            None => {
                warn!("Unknown tile {name:?}, using a placeholder");
                Arc::new(TileType::placeholder(name, pos))
            }
        }
    }
}
