use std::sync::Arc;

use glam::IVec2;
use lib_asset::{EffectOptionDef, EffectType};
use lib_notation::{FromValue, Map, SchemaError, ToValue, Value, notation_record};
use log::warn;

use crate::LevelData;

notation_record! {
    /// `[name, choices, value]` as stored in an effect's `#Options`.
    #[derive(Default, Debug, Clone, PartialEq)]
    pub struct EffectOption {
        pub name: String => pos,
        pub choices: Vec<String> => pos,
        pub value: Value => pos,
    }
}

notation_record! {
    #[derive(Default, Debug, Clone, PartialEq)]
    struct EffectEntry {
        name: String => key("nm"),
        matrix: Vec<Vec<f64>> => key("mtrx"),
        options: Vec<EffectOption> => key("Options") skippable,
    }
}

/// A painted effect layer. Amounts are kept in `0..=1` and stored column by
/// column.
#[derive(Debug, Clone)]
pub struct EffectInstance {
    pub ty: Arc<EffectType>,
    size: IVec2,
    amounts: Vec<f64>,
    options: Vec<EffectOption>,
    /// The document entry this instance came from. Keys this type does not
    /// model are written back from here.
    source: Map,
}

impl EffectInstance {
    pub fn new(ty: Arc<EffectType>, size: IVec2) -> Self {
        let size = size.max(IVec2::ZERO);
        EffectInstance {
            ty,
            size,
            amounts: vec![0.0; (size.x * size.y) as usize],
            options: Vec::new(),
            source: Map::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.ty.name
    }

    pub fn size(&self) -> IVec2 {
        self.size
    }

    fn index(&self, pos: IVec2) -> Option<usize> {
        let inside = pos.cmpge(IVec2::ZERO).all() && pos.cmplt(self.size).all();
        inside.then(|| (pos.x * self.size.y + pos.y) as usize)
    }

    /// Out-of-bounds positions read as `0`.
    pub fn amount(&self, pos: IVec2) -> f64 {
        self.index(pos).map_or(0.0, |idx| self.amounts[idx])
    }

    /// Writes are clamped to `0..=1`. Out-of-bounds writes are ignored.
    pub fn set_amount(&mut self, pos: IVec2, amount: f64) {
        if let Some(idx) = self.index(pos) {
            self.amounts[idx] = amount.clamp(0.0, 1.0);
        }
    }

    /// Reallocates the matrix. The old cell `p` ends up at `p + offset`,
    /// everything else starts at `0`.
    pub fn resize(&mut self, new_size: IVec2, offset: IVec2) {
        let new_size = new_size.max(IVec2::ZERO);
        let mut amounts = vec![0.0; (new_size.x * new_size.y) as usize];
        for x in 0..self.size.x {
            for y in 0..self.size.y {
                let to = IVec2::new(x, y) + offset;
                if to.cmpge(IVec2::ZERO).all() && to.cmplt(new_size).all() {
                    amounts[(to.x * new_size.y + to.y) as usize] = self.amount(IVec2::new(x, y));
                }
            }
        }
        self.size = new_size;
        self.amounts = amounts;
    }

    fn option_index(&mut self, name: &str) -> Option<usize> {
        if let Some(idx) = self
            .options
            .iter()
            .position(|o| o.name.eq_ignore_ascii_case(name))
        {
            return Some(idx);
        }

        let def = self.ty.option(name)?;
        let choices = match def {
            EffectOptionDef::Choice { choices, .. } => choices.clone(),
            EffectOptionDef::Integer { .. } => Vec::new(),
        };
        self.options.push(EffectOption {
            name: def.name().to_string(),
            choices,
            value: def.default_value(),
        });
        Some(self.options.len() - 1)
    }

    /// Looks an option up. The first lookup of an option the instance does
    /// not carry yet copies the default from the effect type.
    pub fn option(&mut self, name: &str) -> Option<&mut Value> {
        let idx = self.option_index(name)?;
        Some(&mut self.options[idx].value)
    }

    pub fn int_option(&mut self, name: &str) -> Option<i32> {
        self.option(name).and_then(|v| v.as_int())
    }

    /// Sets an option, refusing values the effect type does not allow.
    pub fn set_option(&mut self, name: &str, value: impl Into<Value>) -> bool {
        let value = value.into();
        if let Some(def) = self.ty.option(name) {
            if !def.accepts(&value) {
                return false;
            }
        }
        match self.option(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// The options materialized so far, in insertion order.
    pub fn options(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.options.iter().map(|o| (o.name.as_str(), &o.value))
    }

    pub(crate) fn decode(
        value: &Value,
        resolve: impl FnOnce(&str) -> Arc<EffectType>,
    ) -> Result<Self, SchemaError> {
        let entry = EffectEntry::from_value(value)?;
        let source = Map::from_value(value)?;

        let width = entry.matrix.len() as i32;
        let height = entry.matrix.first().map_or(0, Vec::len) as i32;
        if entry.matrix.iter().any(|column| column.len() as i32 != height) {
            return Err(SchemaError::invalid("matrix columns differ in length").nested("matrix"));
        }

        let mut out = EffectInstance::new(resolve(&entry.name), IVec2::new(width, height));
        out.amounts = entry
            .matrix
            .iter()
            .flatten()
            .map(|amount| (amount / 100.0).clamp(0.0, 1.0))
            .collect();
        out.options = entry.options;
        out.source = source;
        Ok(out)
    }

    pub(crate) fn encode(&self) -> Value {
        let matrix = (0..self.size.x)
            .map(|x| {
                (0..self.size.y)
                    .map(|y| self.amount(IVec2::new(x, y)) * 100.0)
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();

        let mut out = self.source.clone();
        out.set("nm", self.ty.name.as_str());
        out.set("mtrx", matrix.to_value());
        out.set("Options", self.options.to_value());
        Value::Map(out)
    }
}

impl LevelData {
    pub fn effects(&self) -> &[EffectInstance] {
        &self.effects
    }

    pub fn effect_mut(&mut self, idx: usize) -> Option<&mut EffectInstance> {
        let effect = self.effects.get_mut(idx)?;
        self.effects_dirty = true;
        Some(effect)
    }

    /// Appends a blank layer of the named effect and returns its index.
    pub fn add_effect(&mut self, name: &str) -> usize {
        let ty = self.resolve_effect(name);
        self.effects.push(EffectInstance::new(ty, self.size()));
        self.effects_dirty = true;
        self.effects.len() - 1
    }

    pub fn remove_effect(&mut self, idx: usize) -> Option<EffectInstance> {
        if idx >= self.effects.len() {
            return None;
        }
        self.effects_dirty = true;
        Some(self.effects.remove(idx))
    }

    pub(crate) fn resolve_effect(&self, name: &str) -> Arc<EffectType> {
        match self.catalogs.effects.get(name) {
            Some(ty) => ty.clone(),
            None => {
                warn!("Unknown effect {name:?}, using a placeholder");
                Arc::new(EffectType::placeholder(name))
            }
        }
    }
}
