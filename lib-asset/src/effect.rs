use lib_notation::{ParseMode, Value, notation_record};

use crate::{Catalog, CatalogEntry, CatalogError, CatalogPos, InitFile};

notation_record! {
    #[derive(Default, Debug, Clone, PartialEq)]
    pub struct EffectOptionInit {
        pub name: String => key("nm"),
        pub choices: Vec<String> => key("choices") skippable,
        pub min: i32 => key("min") skippable,
        pub max: i32 => key("max") skippable,
        pub default: Value => key("default"),
    }
}

notation_record! {
    #[derive(Default, Debug, Clone, PartialEq)]
    pub struct EffectInit {
        pub name: String => key("nm"),
        pub kind: String => key("tp") skippable,
        pub cross_screen: i32 => key("crossScreen") skippable,
        pub options: Vec<EffectOptionInit> => key("options") skippable,
    }
}

/// An option every instance of an effect carries.
#[derive(Debug, Clone, PartialEq)]
pub enum EffectOptionDef {
    Choice {
        name: String,
        choices: Vec<String>,
        default: String,
    },
    Integer {
        name: String,
        min: i32,
        max: i32,
        default: i32,
    },
}

impl EffectOptionDef {
    pub fn from_init(init: EffectOptionInit) -> Result<Self, CatalogError> {
        let EffectOptionInit {
            name,
            choices,
            min,
            max,
            default,
        } = init;

        if let Some(default) = default.as_str() {
            if !choices.iter().any(|c| c == default) {
                return Err(CatalogError::Invalid(format!(
                    "option {name:?}: default {default:?} is not one of {choices:?}"
                )));
            }
            return Ok(EffectOptionDef::Choice {
                default: default.to_string(),
                name,
                choices,
            });
        }

        let Some(default) = default.as_int() else {
            return Err(CatalogError::Invalid(format!(
                "option {name:?}: default must be a string or an integer"
            )));
        };
        if min > max {
            return Err(CatalogError::Invalid(format!(
                "option {name:?}: empty range {min}..={max}"
            )));
        }
        Ok(EffectOptionDef::Integer {
            name,
            min,
            max,
            default: default.clamp(min, max),
        })
    }

    pub fn name(&self) -> &str {
        match self {
            EffectOptionDef::Choice { name, .. } | EffectOptionDef::Integer { name, .. } => name,
        }
    }

    pub fn default_value(&self) -> Value {
        match self {
            EffectOptionDef::Choice { default, .. } => Value::from(default.as_str()),
            EffectOptionDef::Integer { default, .. } => Value::from(*default),
        }
    }

    /// Whether `value` is a legal setting for this option.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            EffectOptionDef::Choice { choices, .. } => value
                .as_str()
                .is_some_and(|v| choices.iter().any(|c| c == v)),
            EffectOptionDef::Integer { min, max, .. } => {
                value.as_int().is_some_and(|v| (*min..=*max).contains(&v))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EffectType {
    pub name: String,
    pub kind: String,
    pub cross_screen: bool,
    pub options: Vec<EffectOptionDef>,
    pub pos: CatalogPos,
    pub placeholder: bool,
}

impl EffectType {
    pub fn from_init(init: EffectInit, pos: CatalogPos) -> Result<Self, CatalogError> {
        let options = init
            .options
            .into_iter()
            .map(EffectOptionDef::from_init)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(EffectType {
            name: init.name,
            kind: init.kind,
            cross_screen: init.cross_screen != 0,
            options,
            pos,
            placeholder: false,
        })
    }

    pub fn placeholder(name: &str) -> Self {
        EffectType {
            name: name.to_string(),
            kind: String::new(),
            cross_screen: false,
            options: Vec::new(),
            pos: CatalogPos::default(),
            placeholder: true,
        }
    }

    pub fn option(&self, name: &str) -> Option<&EffectOptionDef> {
        self.options
            .iter()
            .find(|o| o.name().eq_ignore_ascii_case(name))
    }
}

impl CatalogEntry for EffectType {
    fn name(&self) -> &str {
        &self.name
    }

    fn pos(&self) -> CatalogPos {
        self.pos
    }
}

pub type EffectCatalog = Catalog<EffectType>;

impl EffectCatalog {
    pub fn load(src: &str, mode: ParseMode) -> Self {
        Catalog::build(InitFile::<EffectInit>::parse(src, mode), EffectType::from_init)
    }
}
