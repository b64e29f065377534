//! The level model: a three-layer geometry grid, the visual cells and tiles
//! drawn over it, effects, props, cameras and settings, together with the
//! document format it is loaded from and saved to.

mod camera;
mod cells;
mod document;
mod effects;
mod error;
pub mod geo;
mod level;
pub mod migrate;
mod props;
mod settings;
mod tiles;

/// Line numbers of the document sections.
pub mod section {
    pub const GEOMETRY: usize = 0;
    pub const TILES: usize = 1;
    pub const EFFECTS: usize = 2;
    pub const LIGHT: usize = 3;
    pub const PROPERTIES: usize = 4;
    pub const OVERVIEW: usize = 5;
    pub const CAMERAS: usize = 6;
    pub const WATER: usize = 7;
    pub const PROPS: usize = 8;
}

pub use camera::{CAMERA_SIZE, CORNER_REACH, CornerOffset, LevelCamera, TILE_PX};
pub use cells::VisualCell;
pub use document::{LoadOptions, MANDATORY_LINES, SECTION_COUNT};
pub use effects::{EffectInstance, EffectOption};
pub use error::LevelError;
pub use geo::{FeatureFlags, GeoCell, Grid, LAYERS};
pub use level::LevelData;
pub use props::PropInstance;
pub use settings::BufferTiles;
pub use tiles::{FootprintCell, TileInstance, TileKey, footprint};
