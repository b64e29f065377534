use bitflags::bitflags;
use glam::IVec2;
use lib_asset::GeoType;

/// Number of layers every level has.
pub const LAYERS: usize = 3;

bitflags! {
    /// Features of a geometry cell. Feature code `n` in the document is bit
    /// `n` of the set. Codes without a name below are kept as they are.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct FeatureFlags: u32 {
        const HORIZONTAL_BEAM = 1 << 1;
        const VERTICAL_BEAM = 1 << 2;
        const BAT_HIVE = 1 << 3;
        const SHORTCUT_ENTRANCE = 1 << 4;
        const SHORTCUT_PATH = 1 << 5;
        const ROOM_ENTRANCE = 1 << 6;
        const CREATURE_DEN = 1 << 7;
        const PLACE_ROCK = 1 << 9;
        const PLACE_SPEAR = 1 << 10;
        const CRACKS = 1 << 11;
        const FORBID_FLY_CHAINS = 1 << 12;
        const GARBAGE_WORM_HOLE = 1 << 13;
        const WATERFALL = 1 << 18;
        const WACK_A_MOLE_HOLE = 1 << 19;
        const WORM_GRASS = 1 << 20;
        const SCAVENGER_HOLE = 1 << 21;

        const _ = !0;
    }
}

impl FeatureFlags {
    pub fn from_code(code: i32) -> Option<FeatureFlags> {
        (0..32)
            .contains(&code)
            .then(|| FeatureFlags::from_bits_retain(1 << code))
    }

    /// Feature codes in ascending order.
    pub fn codes(self) -> impl Iterator<Item = i32> {
        let bits = self.bits();
        (0..32).filter(move |code| bits & (1 << code) != 0)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GeoCell {
    pub terrain: GeoType,
    pub features: FeatureFlags,
}

impl GeoCell {
    pub const AIR: GeoCell = GeoCell {
        terrain: GeoType::Air,
        features: FeatureFlags::empty(),
    };

    pub const fn new(terrain: GeoType) -> Self {
        GeoCell {
            terrain,
            features: FeatureFlags::empty(),
        }
    }
}

/// A dense `width x height x LAYERS` array.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    width: i32,
    height: i32,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    pub fn new(width: i32, height: i32, fill: T) -> Self {
        let count = width.max(0) as usize * height.max(0) as usize * LAYERS;
        Grid {
            width: width.max(0),
            height: height.max(0),
            cells: vec![fill; count],
        }
    }
}

impl<T> Grid<T> {
    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, pos: IVec2, layer: usize) -> bool {
        layer < LAYERS && pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    fn index(&self, pos: IVec2, layer: usize) -> Option<usize> {
        self.contains(pos, layer)
            .then(|| (pos.x as usize * self.height as usize + pos.y as usize) * LAYERS + layer)
    }

    pub fn get(&self, pos: IVec2, layer: usize) -> Option<&T> {
        self.index(pos, layer).map(|idx| &self.cells[idx])
    }

    pub fn get_mut(&mut self, pos: IVec2, layer: usize) -> Option<&mut T> {
        self.index(pos, layer).map(|idx| &mut self.cells[idx])
    }

    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.cells.iter_mut()
    }

    /// Every cell with its position, column by column.
    pub fn iter(&self) -> impl Iterator<Item = (IVec2, usize, &T)> {
        let height = self.height as usize;
        self.cells.iter().enumerate().map(move |(idx, cell)| {
            let layer = idx % LAYERS;
            let column = idx / LAYERS;
            let pos = IVec2::new((column / height) as i32, (column % height) as i32);
            (pos, layer, cell)
        })
    }
}

/// Picks the slope that fits at a cell given the terrain around it, trying
/// bottom-left, bottom-right, top-left and top-right in that order. A slope
/// needs two perpendicular solid neighbours, the opposite two non-solid, and
/// no slope among the four.
pub fn slope_for(terrain_at: impl Fn(IVec2) -> GeoType, pos: IVec2) -> Option<GeoType> {
    let left = terrain_at(pos - IVec2::X);
    let right = terrain_at(pos + IVec2::X);
    let up = terrain_at(pos - IVec2::Y);
    let down = terrain_at(pos + IVec2::Y);

    if [left, right, up, down].iter().any(|t| t.is_slope()) {
        return None;
    }

    let [l, r, u, d] = [left, right, up, down].map(GeoType::is_solid);
    let cases = [
        (l && d && !r && !u, GeoType::SlopeLeftUp),
        (r && d && !l && !u, GeoType::SlopeRightUp),
        (l && u && !r && !d, GeoType::SlopeLeftDown),
        (r && u && !l && !d, GeoType::SlopeRightDown),
    ];
    cases
        .into_iter()
        .find_map(|(fits, slope)| fits.then_some(slope))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feature_codes_sorted() {
        let flags = FeatureFlags::from_code(21).unwrap()
            | FeatureFlags::HORIZONTAL_BEAM
            | FeatureFlags::from_code(30).unwrap();
        assert_eq!(flags.codes().collect::<Vec<_>>(), [1, 21, 30]);
        assert!(flags.contains(FeatureFlags::SCAVENGER_HOLE));
        assert_eq!(FeatureFlags::from_code(32), None);
    }

    #[test]
    fn grid_iter_positions() {
        let mut grid = Grid::new(2, 3, 0);
        *grid.get_mut(IVec2::new(1, 2), 2).unwrap() = 7;
        let found = grid.iter().find(|(_, _, v)| **v == 7).unwrap();
        assert_eq!((found.0, found.1), (IVec2::new(1, 2), 2));
        assert!(grid.get(IVec2::new(2, 0), 0).is_none());
        assert!(grid.get(IVec2::new(0, 0), 3).is_none());
    }
}
