//! Loading and saving level documents.
//!
//! A document is one notation value per line:
//!
//! 0. geometry
//! 1. tile matrix and tool state
//! 2. effects
//! 3. light
//! 4. level properties, kept as raw text
//! 5. overview, including `#size`
//! 6. cameras
//! 7. water
//! 8. props
//!
//! Lines after the ninth are kept as they are.

mod geometry;
mod tiles;

use glam::IVec2;
use lib_asset::Catalogs;
use lib_notation::{
    FromValue, Map, ParseMode, SchemaError, ToValue, Value, line_ending, parse_with, split_lines,
    to_string,
};
use log::{info, warn};

use crate::camera::{decode_cameras, encode_cameras};
use crate::{EffectInstance, LevelData, LevelError, PropInstance, migrate, section};

use self::geometry::{matrix_size, parse_columns};
use self::tiles::parse_tile_columns;

/// Lines every document must have. Missing later sections are filled in by
/// the fix-up list.
pub const MANDATORY_LINES: usize = 6;
pub const SECTION_COUNT: usize = 9;

/// Sections the fix-up list knows defaults for.
const MIGRATED: [usize; 6] = [
    section::TILES,
    section::LIGHT,
    section::OVERVIEW,
    section::CAMERAS,
    section::WATER,
    section::PROPS,
];

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub parse_mode: ParseMode,
}

/// The parts of a document kept between load and save.
#[derive(Debug, Default, Clone)]
pub(crate) struct Sections {
    pub(crate) tiles: Map,
    /// Line 2 as it was read. Written back unless the effects changed.
    pub(crate) effects_raw: String,
    pub(crate) effects: Map,
    pub(crate) light: Map,
    pub(crate) properties: String,
    pub(crate) overview: Map,
    pub(crate) cameras: Map,
    pub(crate) water: Map,
    pub(crate) props: Map,
    pub(crate) extra: Vec<String>,
    pub(crate) terminated: bool,
}

impl Sections {
    /// The sections of a new document of the given size.
    pub(crate) fn blank(size: IVec2) -> Self {
        let mut out = Sections {
            properties: to_string(&Value::Map(Map::new())),
            ..Sections::default()
        };
        out.effects.set("effects", Value::List(Vec::new()));
        out.effects_raw = to_string(&Value::Map(out.effects.clone()));
        out.overview.set("size", size.to_value());
        for section in MIGRATED {
            out.migrate(section);
        }
        out
    }

    pub(crate) fn map(&self, section: usize) -> Option<&Map> {
        match section {
            section::TILES => Some(&self.tiles),
            section::EFFECTS => Some(&self.effects),
            section::LIGHT => Some(&self.light),
            section::OVERVIEW => Some(&self.overview),
            section::CAMERAS => Some(&self.cameras),
            section::WATER => Some(&self.water),
            section::PROPS => Some(&self.props),
            _ => None,
        }
    }

    pub(crate) fn map_mut(&mut self, section: usize) -> Option<&mut Map> {
        match section {
            section::TILES => Some(&mut self.tiles),
            section::EFFECTS => Some(&mut self.effects),
            section::LIGHT => Some(&mut self.light),
            section::OVERVIEW => Some(&mut self.overview),
            section::CAMERAS => Some(&mut self.cameras),
            section::WATER => Some(&mut self.water),
            section::PROPS => Some(&mut self.props),
            _ => None,
        }
    }

    fn migrate(&mut self, section: usize) -> usize {
        self.map_mut(section)
            .map_or(0, |map| migrate::migrate(section, map))
    }
}

struct Lines<'a> {
    lines: Vec<&'a str>,
    mode: ParseMode,
}

impl Lines<'_> {
    fn value(&self, section: usize) -> Result<Value, LevelError> {
        let line = self.lines.get(section).copied().unwrap_or_default();
        parse_with(line, self.mode).map_err(|source| LevelError::Parse { section, source })
    }

    /// An absent or blank line reads as an empty map.
    fn map(&self, section: usize) -> Result<Map, LevelError> {
        match self.lines.get(section) {
            Some(line) if !line.trim().is_empty() => {
                Map::from_value(&self.value(section)?).map_err(LevelError::schema(section))
            }
            _ => Ok(Map::new()),
        }
    }

    /// Settings-only sections fall back to their defaults when unreadable.
    fn settings(&self, section: usize) -> Map {
        self.map(section).unwrap_or_else(|e| {
            warn!("Ignoring unreadable section {section}: {e}");
            Map::new()
        })
    }
}

impl LevelData {
    pub fn load(src: &str, catalogs: &Catalogs) -> Result<Self, LevelError> {
        Self::load_with(src, catalogs, LoadOptions::default())
    }

    pub fn load_with(
        src: &str,
        catalogs: &Catalogs,
        options: LoadOptions,
    ) -> Result<Self, LevelError> {
        let lines = Lines {
            lines: split_lines(src),
            mode: options.parse_mode,
        };
        if lines.lines.len() < MANDATORY_LINES {
            return Err(LevelError::Format(format!(
                "expected at least {MANDATORY_LINES} lines, found {}",
                lines.lines.len()
            )));
        }
        if lines.lines.len() < SECTION_COUNT {
            info!(
                "Document has {} lines, filling in the missing sections",
                lines.lines.len()
            );
        }

        let mut sections = Sections {
            tiles: lines.map(section::TILES)?,
            light: lines.settings(section::LIGHT),
            properties: lines.lines[section::PROPERTIES].to_string(),
            overview: lines.map(section::OVERVIEW)?,
            cameras: lines.map(section::CAMERAS)?,
            water: lines.settings(section::WATER),
            props: lines.map(section::PROPS)?,
            extra: lines.lines[SECTION_COUNT.min(lines.lines.len())..]
                .iter()
                .map(|line| line.to_string())
                .collect(),
            terminated: src.ends_with(['\r', '\n']),
            ..Sections::default()
        };
        for section in MIGRATED {
            sections.migrate(section);
        }

        let geometry = parse_columns(&lines.value(section::GEOMETRY)?)?;
        let size = matrix_size(&geometry, "geometry")?;
        let tile_matrix = sections.tiles.get("tlMatrix").ok_or_else(|| LevelError::Schema {
            section: section::TILES,
            source: SchemaError::Missing {
                path: "tlMatrix".into(),
            },
        })?;
        let tile_columns = parse_tile_columns(tile_matrix)?;
        let tile_size = matrix_size(&tile_columns, "tile matrix")?;
        if tile_size != size {
            return Err(LevelError::Format(format!(
                "geometry is {size} but the tile matrix is {tile_size}"
            )));
        }
        match sections.overview.get("size") {
            Some(value) => {
                let declared = IVec2::from_value(value).map_err(|e| LevelError::Schema {
                    section: section::OVERVIEW,
                    source: e.nested("size"),
                })?;
                if declared != size {
                    return Err(LevelError::Format(format!(
                        "#size is {declared} but the geometry is {size}"
                    )));
                }
            }
            None => sections.overview.set("size", size.to_value()),
        }

        let mut level = LevelData::blank(size, catalogs);
        level.line_ending = line_ending(src);
        level.decode_geometry(&geometry);
        level.decode_tiles(&tile_columns)?;
        level.cameras =
            decode_cameras(&sections.cameras).map_err(LevelError::schema(section::CAMERAS))?;
        level.props = sections
            .props
            .get("props")
            .and_then(Value::as_list)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(idx, value)| {
                PropInstance::decode(value, |name, pos| level.resolve_prop(name, pos))
                    .map_err(|e| LevelError::Schema {
                        section: section::PROPS,
                        source: e.nested(&format!("props[{idx}]")),
                    })
            })
            .collect::<Result<_, _>>()?;
        level.sections = sections;
        level.load_effects(lines.lines[section::EFFECTS], lines.mode);

        info!(
            "Loaded a {size} level: {} tiles, {} props, {} effects, {} cameras",
            level.tile_count(),
            level.props.len(),
            level.effects.len(),
            level.cameras.len()
        );
        Ok(level)
    }

    /// Effects never fail a load: an unreadable section or entry is logged and
    /// the raw line is written back on save, unless a matrix had to be resized.
    fn load_effects(&mut self, line: &str, mode: ParseMode) {
        self.sections.effects_raw = line.to_string();
        let map = match parse_with(line, mode).map(|value| Map::from_value(&value)) {
            Ok(Ok(map)) => map,
            Ok(Err(e)) => {
                warn!("Effects section is not a map: {e}");
                return;
            }
            Err(e) => {
                warn!("Effects section does not parse: {e}");
                return;
            }
        };

        let entries = map.get("effects").and_then(Value::as_list).unwrap_or_default();
        let size = self.size();
        let mut effects = Vec::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            match EffectInstance::decode(entry, |name| self.resolve_effect(name)) {
                Ok(mut effect) => {
                    if effect.size() != size {
                        warn!(
                            "Effect {:?} is {}, level is {size}. Resizing",
                            effect.name(),
                            effect.size()
                        );
                        effect.resize(size, IVec2::ZERO);
                        self.effects_dirty = true;
                    }
                    effects.push(effect);
                }
                Err(e) => warn!("Skipping effect {idx}: {e}"),
            }
        }
        self.effects = effects;
        self.sections.effects = map;
    }

    fn save_effects(&self) -> String {
        if !self.effects_dirty {
            return self.sections.effects_raw.clone();
        }
        let mut map = self.sections.effects.clone();
        map.set(
            "effects",
            Value::List(self.effects.iter().map(EffectInstance::encode).collect()),
        );
        to_string(&Value::Map(map))
    }

    /// Writes the level back as a document, using the line terminator of
    /// the source.
    pub fn save(&self) -> String {
        let s = &self.sections;

        let mut tiles = s.tiles.clone();
        tiles.set("tlMatrix", self.encode_tiles());
        let mut overview = s.overview.clone();
        overview.set("size", self.size().to_value());
        let mut cameras = s.cameras.clone();
        encode_cameras(&self.cameras, &mut cameras);
        let mut props = s.props.clone();
        props.set(
            "props",
            Value::List(self.props.iter().map(PropInstance::encode).collect()),
        );

        let map = |map: Map| to_string(&Value::Map(map));
        let mut lines = vec![
            to_string(&self.encode_geometry()),
            map(tiles),
            self.save_effects(),
            map(s.light.clone()),
            s.properties.clone(),
            map(overview),
            map(cameras),
            map(s.water.clone()),
            map(props),
        ];
        lines.extend(s.extra.iter().cloned());

        let mut out = lines.join(self.line_ending);
        if s.terminated {
            out.push_str(self.line_ending);
        }
        out
    }

    /// The parsed value of every section of `src`, for inspection. Unreadable
    /// lines come back as their error.
    pub fn section_values(src: &str, mode: ParseMode) -> Vec<Result<Value, LevelError>> {
        split_lines(src)
            .into_iter()
            .enumerate()
            .map(|(section, line)| {
                parse_with(line, mode).map_err(|source| LevelError::Parse { section, source })
            })
            .collect()
    }
}
