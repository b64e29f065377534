use std::sync::Arc;

use lib_notation::ParseMode;

use crate::{EffectCatalog, MaterialCatalog, PropCatalog, TileCatalog};

/// Init file sources for [Catalogs::load]. Missing sources give empty
/// catalogs.
#[derive(Debug, Default, Clone, Copy)]
pub struct CatalogSources<'a> {
    pub tiles: Option<&'a str>,
    pub props: Option<&'a str>,
    pub effects: Option<&'a str>,
    pub materials: Option<&'a str>,
}

/// The four catalogs a level resolves its names against. Cloning only
/// bumps reference counts.
#[derive(Debug, Clone, Default)]
pub struct Catalogs {
    pub tiles: Arc<TileCatalog>,
    pub props: Arc<PropCatalog>,
    pub effects: Arc<EffectCatalog>,
    pub materials: Arc<MaterialCatalog>,
}

impl Catalogs {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn load(sources: CatalogSources<'_>, mode: ParseMode) -> Self {
        Catalogs {
            tiles: Arc::new(sources.tiles.map_or_else(TileCatalog::empty, |src| {
                TileCatalog::load(src, mode)
            })),
            props: Arc::new(sources.props.map_or_else(PropCatalog::empty, |src| {
                PropCatalog::load(src, mode)
            })),
            effects: Arc::new(sources.effects.map_or_else(EffectCatalog::empty, |src| {
                EffectCatalog::load(src, mode)
            })),
            materials: Arc::new(sources.materials.map_or_else(MaterialCatalog::empty, |src| {
                MaterialCatalog::load(src, mode)
            })),
        }
    }

    pub fn error_count(&self) -> usize {
        self.tiles.errors().len()
            + self.props.errors().len()
            + self.effects.errors().len()
            + self.materials.errors().len()
    }
}
