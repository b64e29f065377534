use glam::{DVec2, IVec2};
use lib_notation::{
    FromValue, Map, ParseMode, SchemaError, ToValue, Value, from_str, impl_enum_value,
    impl_repr_value, notation_record, parse, to_notation,
};
use strum::{EnumString, FromRepr, IntoStaticStr};

notation_record! {
    #[derive(Default, Debug, Clone, PartialEq)]
    pub struct Named {
        pub name: String => key("nm"),
        pub size: DVec2 => key("sz"),
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive)]
pub enum Kind {
    #[default]
    #[strum(serialize = "box")]
    Box,
    #[strum(serialize = "voxelStruct")]
    VoxelStruct,
}

impl_enum_value!(Kind);

#[derive(Default, Debug, Clone, Copy, PartialEq, FromRepr)]
#[repr(u8)]
pub enum Code {
    #[default]
    Zero = 0,
    Two = 2,
}

impl_repr_value!(Code, u8);

notation_record! {
    #[derive(Default, Debug, Clone, PartialEq)]
    pub struct Complex {
        pub name: String => key("nm"),
        pub kind: Kind => key("tp"),
        pub code: Code => key("code") skippable,
        pub size: IVec2 => key("sz"),
        pub inner: Vec<Named> => key("inner") skippable,
        pub parent: Option<String> => key("parent") nullable,
        pub tags: Vec<String> => key("tags") skippable,
    }
}

notation_record! {
    #[derive(Default, Debug, Clone, PartialEq)]
    pub struct Header {
        pub name: String => pos,
        pub tint: lib_notation::Color => pos,
    }
}

#[test]
fn named_record_from_map() {
    let named: Named = from_str("[#nm: \"Test\", #sz: point(1,1)]", ParseMode::Strict).unwrap();
    assert_eq!(named, Named {
        name: "Test".to_string(),
        size: DVec2::new(1.0, 1.0),
    });

    let written = named.to_value();
    assert_eq!(written, parse("[#nm: \"Test\", #sz: point(1, 1)]").unwrap());
}

#[test]
fn keyed_fields_are_written_in_declaration_order() {
    let named: Named = from_str("[#SZ: point(2, 3), #Nm: \"x\"]", ParseMode::Strict).unwrap();
    assert_eq!(to_notation(&named), "[#nm: \"x\", #sz: point(2, 3)]");
}

#[test]
fn skippable_and_nullable() {
    let src = "[#nm: \"a\", #tp: \"VOXELSTRUCT\", #sz: point(2, 1), #parent: 0]";
    let complex: Complex = from_str(src, ParseMode::Strict).unwrap();
    assert_eq!(complex.kind, Kind::VoxelStruct);
    assert_eq!(complex.code, Code::Zero);
    assert_eq!(complex.parent, None);
    assert!(complex.inner.is_empty());

    assert_eq!(
        to_notation(&complex),
        "[#nm: \"a\", #tp: \"voxelStruct\", #code: 0, #sz: point(2, 1), #parent: 0]"
    );
}

#[test]
fn nested_records() {
    let src = "[#nm: \"a\", #tp: \"box\", #code: 2, #sz: point(1, 1), \
               #inner: [[#nm: \"b\", #sz: point(0, 0)]], #parent: \"root\", #tags: [\"t\"]]";
    let complex: Complex = from_str(src, ParseMode::Strict).unwrap();
    assert_eq!(complex.code, Code::Two);
    assert_eq!(complex.inner[0].name, "b");
    assert_eq!(complex.parent.as_deref(), Some("root"));
    assert_eq!(complex.to_value(), parse(src).unwrap());
}

#[test]
fn missing_field() {
    let err = Complex::from_value(&parse("[#nm: \"a\", #tp: \"box\"]").unwrap()).unwrap_err();
    assert_eq!(err, SchemaError::Missing {
        path: "size".to_string()
    });
}

#[test]
fn mismatch_inside_nested_record() {
    let src = "[#nm: \"a\", #tp: \"box\", #sz: point(1, 1), #inner: [[#nm: 5, #sz: point(0, 0)]], #parent: 0]";
    let err = Complex::from_value(&parse(src).unwrap()).unwrap_err();
    assert_eq!(err.path(), "inner[0].name");
    assert!(matches!(err, SchemaError::Mismatch {
        expected: "string",
        found: "int",
        ..
    }));
}

#[test]
fn unknown_enum_names() {
    let src = "[#nm: \"a\", #tp: \"sphere\", #sz: point(1, 1), #parent: 0]";
    let err = Complex::from_value(&parse(src).unwrap()).unwrap_err();
    assert!(matches!(err, SchemaError::UnknownName { ref found, .. } if found == "sphere"));
    assert_eq!(err.path(), "kind");

    let src = "[#nm: \"a\", #tp: \"box\", #code: 1, #sz: point(1, 1), #parent: 0]";
    let err = Complex::from_value(&parse(src).unwrap()).unwrap_err();
    assert_eq!(err.path(), "code");
}

#[test]
fn unset_non_nullable() {
    notation_record! {
        #[derive(Default, Debug)]
        struct Strict {
            link: Option<String> => key("link"),
        }
    }

    let err = Strict::from_value(&parse("[#link: 0]").unwrap()).unwrap_err();
    assert_eq!(err, SchemaError::Unset {
        path: "link".to_string()
    });
}

#[test]
fn positional_records() {
    let header: Header = from_str("[\"Walls\", color(255, 0, 0)]", ParseMode::Strict).unwrap();
    assert_eq!(header.name, "Walls");
    assert_eq!(to_notation(&header), "[\"Walls\", color(255, 0, 0)]");

    assert!(Header::from_value(&Value::Map(Map::new())).is_err());
}

notation_record! {
    #[derive(Default, Debug, Clone, PartialEq)]
    pub struct Tagged {
        pub tag: String => key("t") skippable,
        pub depth: i32 => pos,
    }
}

notation_record! {
    #[derive(Default, Debug, Clone, PartialEq)]
    pub struct Layered {
        pub depth: i32 => pos,
        pub name: String => key("nm"),
    }
}

#[test]
fn positional_fields_inside_keyed_records() {
    let tagged = Tagged {
        tag: String::new(),
        depth: 5,
    };
    assert_eq!(to_notation(&tagged), "[#1: 5]");
    assert_eq!(Tagged::from_value(&tagged.to_value()).unwrap(), tagged);

    let layered = Layered {
        depth: 5,
        name: "x".to_string(),
    };
    let text = to_notation(&layered);
    assert_eq!(text, "[#0: 5, #nm: \"x\"]");
    assert_eq!(from_str::<Layered>(&text, ParseMode::Strict).unwrap(), layered);

    let foreign: Layered = from_str("[#d: 7, #nm: \"y\"]", ParseMode::Strict).unwrap();
    assert_eq!(foreign.depth, 7);

    let err = from_str::<Layered>("[#nm: \"y\"]", ParseMode::Strict).unwrap_err();
    assert!(err.to_string().contains("depth"), "{err}");
}
