use std::sync::Arc;

use glam::IVec2;
use hashbrown::HashMap;
use lib_notation::{Color, Record};
use log::{info, warn};

use crate::{CatalogError, InitError, InitFile};

/// 1-based location of an entry inside its catalog, as written into level
/// documents.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CatalogPos {
    pub category: usize,
    pub index: usize,
}

impl CatalogPos {
    pub const fn new(category: usize, index: usize) -> Self {
        CatalogPos { category, index }
    }

    pub fn as_ivec2(self) -> IVec2 {
        IVec2::new(self.category as i32, self.index as i32)
    }

    /// Reads a position written as a point. Non-positive coordinates are
    /// rejected.
    pub fn from_ivec2(p: IVec2) -> Option<Self> {
        (p.x > 0 && p.y > 0).then(|| CatalogPos::new(p.x as usize, p.y as usize))
    }
}

pub trait CatalogEntry {
    fn name(&self) -> &str;

    fn pos(&self) -> CatalogPos;
}

#[derive(Debug, Clone)]
pub struct Category<T> {
    pub name: String,
    pub color: Color,
    pub entries: Vec<Arc<T>>,
}

/// Immutable set of entry definitions grouped into categories. Lookup by name
/// ignores case. When two entries share a name, the first one wins.
#[derive(Debug, Clone)]
pub struct Catalog<T> {
    categories: Vec<Category<T>>,
    by_name: HashMap<String, Arc<T>>,
    errors: Vec<InitError>,
}

impl<T> Default for Catalog<T> {
    fn default() -> Self {
        Catalog {
            categories: Vec::new(),
            by_name: HashMap::new(),
            errors: Vec::new(),
        }
    }
}

impl<T: CatalogEntry> Catalog<T> {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Converts every record of `init` into an entry. Conversion failures are
    /// recorded the same way as parse failures.
    pub fn build<R: Record>(
        init: InitFile<R>,
        mut convert: impl FnMut(R, CatalogPos) -> Result<T, CatalogError>,
    ) -> Self {
        let mut out = Catalog {
            errors: init.errors,
            ..Catalog::default()
        };

        for category in init.categories {
            let cat_idx = out.categories.len() + 1;
            let mut entries = Vec::with_capacity(category.entries.len());
            for entry in category.entries {
                let pos = CatalogPos::new(cat_idx, entries.len() + 1);
                match convert(entry.record, pos) {
                    Ok(item) => entries.push(Arc::new(item)),
                    Err(error) => {
                        warn!("Skipping {} line {}: {error}", R::NAME, entry.line);
                        out.errors.push(InitError {
                            line: entry.line,
                            error,
                        });
                    }
                }
            }
            out.categories.push(Category {
                name: category.name,
                color: category.color,
                entries,
            });
        }
        out.errors.sort_by_key(|e| e.line);

        for item in out.categories.iter().flat_map(|c| &c.entries) {
            let key = item.name().to_lowercase();
            if out.by_name.contains_key(&key) {
                warn!("Duplicate {} entry {:?}", R::NAME, item.name());
                continue;
            }
            out.by_name.insert(key, item.clone());
        }

        info!(
            "Loaded {} {} entries in {} categories ({} errors)",
            out.len(),
            R::NAME,
            out.categories.len(),
            out.errors.len(),
        );
        out
    }

    pub fn get(&self, name: &str) -> Option<&Arc<T>> {
        self.by_name.get(&name.to_lowercase())
    }

    pub fn at(&self, pos: CatalogPos) -> Option<&Arc<T>> {
        let category = self.categories.get(pos.category.checked_sub(1)?)?;
        category.entries.get(pos.index.checked_sub(1)?)
    }

    pub fn categories(&self) -> &[Category<T>] {
        &self.categories
    }

    pub fn errors(&self) -> &[InitError] {
        &self.errors
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.categories.iter().flat_map(|c| c.entries.iter())
    }

    pub fn len(&self) -> usize {
        self.categories.iter().map(|c| c.entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
