use std::sync::Arc;

use glam::IVec2;
use lib_asset::TileType;

/// A handle to a placed tile. Handles of removed tiles never become valid
/// again, even when their arena slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileKey {
    pub(crate) slot: usize,
    pub(crate) generation: u32,
}

#[derive(Debug, Clone)]
pub struct TileInstance {
    pub ty: Arc<TileType>,
    pub head: IVec2,
    pub layer: usize,
}

/// One cell covered by a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FootprintCell {
    pub pos: IVec2,
    pub layer: usize,
    /// Position relative to the top-left corner of the footprint.
    pub local: IVec2,
    /// Which of the tile's own layers this cell belongs to.
    pub tile_layer: usize,
}

impl TileInstance {
    pub fn new(ty: Arc<TileType>, head: IVec2, layer: usize) -> Self {
        TileInstance { ty, head, layer }
    }

    pub fn origin(&self) -> IVec2 {
        self.head - self.ty.head_offset()
    }

    /// Every cell of the footprint on every layer the tile spans, including
    /// cells outside the grid.
    pub fn footprint(&self) -> Vec<FootprintCell> {
        footprint(&self.ty, self.head, self.layer)
    }
}

/// The cells a tile of type `ty` would cover with its head at `head`.
pub fn footprint(ty: &TileType, head: IVec2, layer: usize) -> Vec<FootprintCell> {
    let origin = head - ty.head_offset();
    (0..ty.layer_count())
        .flat_map(|tile_layer| {
            ty.cells().map(move |local| FootprintCell {
                pos: origin + local,
                layer: layer + tile_layer,
                local,
                tile_layer,
            })
        })
        .collect()
}

pub(crate) struct TileSlot {
    pub(crate) generation: u32,
    pub(crate) tile: TileInstance,
}

/// Slab arena of placed tiles.
#[derive(Default)]
pub(crate) struct TileArena {
    slots: slab::Slab<TileSlot>,
    next_generation: u32,
}

impl TileArena {
    pub(crate) fn insert(&mut self, tile: TileInstance) -> TileKey {
        let generation = self.next_generation;
        self.next_generation = self.next_generation.wrapping_add(1);
        let slot = self.slots.insert(TileSlot { generation, tile });
        TileKey { slot, generation }
    }

    pub(crate) fn get(&self, key: TileKey) -> Option<&TileInstance> {
        self.slots
            .get(key.slot)
            .filter(|s| s.generation == key.generation)
            .map(|s| &s.tile)
    }

    pub(crate) fn contains(&self, key: TileKey) -> bool {
        self.get(key).is_some()
    }

    pub(crate) fn remove(&mut self, key: TileKey) -> Option<TileInstance> {
        if !self.contains(key) {
            return None;
        }
        Some(self.slots.remove(key.slot).tile)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (TileKey, &TileInstance)> {
        self.slots.iter().map(|(slot, s)| {
            let key = TileKey {
                slot,
                generation: s.generation,
            };
            (key, &s.tile)
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }
}
