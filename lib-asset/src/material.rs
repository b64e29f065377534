use lib_notation::{Color, ParseMode, notation_record};

use crate::{Catalog, CatalogEntry, CatalogError, CatalogPos, InitFile};

notation_record! {
    #[derive(Default, Debug, Clone, PartialEq)]
    pub struct MaterialInit {
        pub name: String => key("nm"),
        pub color: Color => key("color") skippable,
        pub tags: Vec<String> => key("tags") skippable,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MaterialType {
    pub name: String,
    pub color: Color,
    pub tags: Vec<String>,
    pub pos: CatalogPos,
}

impl MaterialType {
    pub fn from_init(init: MaterialInit, pos: CatalogPos) -> Result<Self, CatalogError> {
        if init.name.is_empty() {
            return Err(CatalogError::Invalid("material without a name".to_string()));
        }
        Ok(MaterialType {
            name: init.name,
            color: init.color,
            tags: init.tags,
            pos,
        })
    }
}

impl CatalogEntry for MaterialType {
    fn name(&self) -> &str {
        &self.name
    }

    fn pos(&self) -> CatalogPos {
        self.pos
    }
}

pub type MaterialCatalog = Catalog<MaterialType>;

impl MaterialCatalog {
    pub fn load(src: &str, mode: ParseMode) -> Self {
        Catalog::build(InitFile::<MaterialInit>::parse(src, mode), MaterialType::from_init)
    }
}
