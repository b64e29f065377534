use serde::Serialize;
use strum::{EnumString, FromRepr, IntoStaticStr, VariantArray};

/// Terrain of a single geometry cell. The discriminants are the codes used
/// in level documents and tile geometry specs. Slopes are named after the
/// direction the open side faces, so [GeoType::SlopeRightUp] is solid in its
/// bottom-right half.
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
    FromRepr,
    VariantArray,
)]
#[strum(ascii_case_insensitive)]
#[repr(u8)]
pub enum GeoType {
    #[default]
    Air = 0,
    Solid = 1,
    SlopeRightUp = 2,
    SlopeLeftUp = 3,
    SlopeRightDown = 4,
    SlopeLeftDown = 5,
    Platform = 6,
    ShortcutEntrance = 7,
    Glass = 9,
}

impl GeoType {
    pub fn from_code(code: i32) -> Option<GeoType> {
        u8::try_from(code).ok().and_then(GeoType::from_repr)
    }

    pub fn code(self) -> i32 {
        self as u8 as i32
    }

    pub fn is_slope(self) -> bool {
        matches!(
            self,
            GeoType::SlopeRightUp
                | GeoType::SlopeLeftUp
                | GeoType::SlopeRightDown
                | GeoType::SlopeLeftDown
        )
    }

    pub fn is_solid(self) -> bool {
        self == GeoType::Solid
    }
}

lib_notation::impl_repr_value!(GeoType, u8);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes() {
        for geo in GeoType::VARIANTS {
            assert_eq!(GeoType::from_code(geo.code()), Some(*geo));
        }
        assert_eq!(GeoType::from_code(8), None);
        assert_eq!(GeoType::from_code(-1), None);
    }
}
