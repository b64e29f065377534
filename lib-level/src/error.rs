use glam::IVec2;
use lib_notation::{ParseError, SchemaError};
use thiserror::Error;

use crate::TileKey;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("section {section}: {source}")]
    Parse {
        section: usize,
        #[source]
        source: ParseError,
    },
    #[error("section {section}: {source}")]
    Schema {
        section: usize,
        #[source]
        source: SchemaError,
    },
    #[error("malformed document: {0}")]
    Format(String),
    #[error("{pos} on layer {layer} is outside the {width}x{height} grid")]
    Bounds {
        pos: IVec2,
        layer: usize,
        width: i32,
        height: i32,
    },
    #[error("{0:?} does not refer to a placed tile")]
    StaleTile(TileKey),
}

impl LevelError {
    pub(crate) fn schema(section: usize) -> impl FnOnce(SchemaError) -> LevelError {
        move |source| LevelError::Schema { section, source }
    }
}
