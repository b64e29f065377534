use glam::IVec2;
use lib_notation::{Map, ParseMode, Value, impl_enum_value, notation_record};
use serde::Serialize;
use strum::{EnumString, IntoStaticStr, VariantArray};

use crate::{Catalog, CatalogEntry, CatalogError, CatalogPos, InitFile};

/// The init-file `#tp` names are folded into the six behaviours the level
/// model cares about.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    EnumString,
    IntoStaticStr,
    VariantArray,
)]
#[strum(ascii_case_insensitive)]
pub enum PropKind {
    #[default]
    #[strum(to_string = "standard", serialize = "variedStandard")]
    Standard,
    #[strum(to_string = "simpleDecal", serialize = "variedDecal")]
    Decal,
    #[strum(
        to_string = "soft",
        serialize = "variedSoft",
        serialize = "coloredSoft",
        serialize = "softEffect"
    )]
    Soft,
    #[strum(to_string = "antimatter")]
    Antimatter,
    #[strum(to_string = "rope")]
    Rope,
    #[strum(to_string = "long")]
    Long,
}

impl_enum_value!(PropKind);

impl PropKind {
    /// Whether instances carry a path of points besides their quad.
    pub fn has_points(self) -> bool {
        matches!(self, PropKind::Rope | PropKind::Long)
    }
}

notation_record! {
    #[derive(Default, Debug, Clone, PartialEq)]
    pub struct PropInit {
        pub name: String => key("nm"),
        pub kind: PropKind => key("tp"),
        pub depth: i32 => key("depth") skippable,
        pub size: IVec2 => key("sz") skippable,
        pub variations: i32 => key("vars") skippable,
        pub random: i32 => key("random") skippable,
        pub color_treatment: String => key("colorTreatment") skippable,
        pub tags: Vec<String> => key("tags") skippable,
        pub repeat_layers: Vec<i32> => key("repeatL") skippable,
        pub segment_length: f64 => key("segmentLength") skippable,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropType {
    pub name: String,
    pub kind: PropKind,
    pub depth: i32,
    pub size: IVec2,
    pub variations: i32,
    pub random: bool,
    pub color_treatment: String,
    pub tags: Vec<String>,
    pub repeat_layers: Vec<i32>,
    pub segment_length: f64,
    pub pos: CatalogPos,
    pub placeholder: bool,
}

impl PropType {
    pub fn from_init(init: PropInit, pos: CatalogPos) -> Result<Self, CatalogError> {
        if init.depth < 0 {
            return Err(CatalogError::Invalid(format!(
                "prop {:?} has negative depth {}",
                init.name, init.depth
            )));
        }
        if init.kind == PropKind::Rope && init.segment_length <= 0.0 {
            return Err(CatalogError::Invalid(format!(
                "rope {:?} needs a positive #segmentLength",
                init.name
            )));
        }

        Ok(PropType {
            name: init.name,
            kind: init.kind,
            depth: init.depth,
            size: init.size,
            variations: init.variations.max(1),
            random: init.random != 0,
            color_treatment: init.color_treatment,
            tags: init.tags,
            repeat_layers: init.repeat_layers,
            segment_length: init.segment_length,
            pos,
            placeholder: false,
        })
    }

    pub fn placeholder(name: &str, pos: CatalogPos) -> Self {
        PropType {
            name: name.to_string(),
            kind: PropKind::Standard,
            depth: 0,
            size: IVec2::ZERO,
            variations: 1,
            random: false,
            color_treatment: String::new(),
            tags: Vec::new(),
            repeat_layers: Vec::new(),
            segment_length: 0.0,
            pos,
            placeholder: true,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    /// The settings a fresh instance of this prop starts from.
    pub fn default_settings(&self) -> Map {
        let mut settings = Map::new();
        settings.set("renderorder", 0);
        settings.set("seed", 0);
        settings.set("renderTime", 0);

        match self.kind {
            PropKind::Standard | PropKind::Decal | PropKind::Soft if self.variations > 1 => {
                settings.set("variation", if self.random { 0 } else { 1 });
            }
            _ => (),
        }
        if matches!(
            self.kind,
            PropKind::Decal | PropKind::Soft | PropKind::Antimatter
        ) {
            settings.set("customDepth", self.depth);
        }
        if self.kind == PropKind::Rope {
            settings.set("release", 0);
            settings.set("thickness", 2.0);
            settings.set("applyColor", 0);
        }
        if self.has_tag("customColor") || self.has_tag("customColorRainBow") {
            settings.set("color", 0);
        }
        settings
    }

    pub fn default_setting(&self, name: &str) -> Option<Value> {
        self.default_settings().get(name).cloned()
    }
}

impl CatalogEntry for PropType {
    fn name(&self) -> &str {
        &self.name
    }

    fn pos(&self) -> CatalogPos {
        self.pos
    }
}

pub type PropCatalog = Catalog<PropType>;

impl PropCatalog {
    pub fn load(src: &str, mode: ParseMode) -> Self {
        Catalog::build(InitFile::<PropInit>::parse(src, mode), PropType::from_init)
    }
}
