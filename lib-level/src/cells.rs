use crate::TileKey;

/// What is drawn in a cell.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub enum VisualCell {
    #[default]
    Empty,
    Material(String),
    /// A cell covered by a tile. `under` is the material the tile was
    /// stamped over and comes back when the tile is removed.
    Tile { key: TileKey, under: Option<String> },
}

pub(crate) static EMPTY_CELL: VisualCell = VisualCell::Empty;

impl VisualCell {
    pub fn tile_key(&self) -> Option<TileKey> {
        match self {
            VisualCell::Tile { key, .. } => Some(*key),
            _ => None,
        }
    }

    pub fn material(&self) -> Option<&str> {
        match self {
            VisualCell::Material(name) => Some(name),
            _ => None,
        }
    }

    /// The cell as it looks without any tile on it.
    pub fn without_tile(&self) -> VisualCell {
        match self {
            VisualCell::Tile { under, .. } => under
                .clone()
                .map_or(VisualCell::Empty, VisualCell::Material),
            other => other.clone(),
        }
    }
}
