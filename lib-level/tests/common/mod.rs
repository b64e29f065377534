#![allow(dead_code)]

use lib_asset::{CatalogSources, Catalogs};
use lib_notation::ParseMode;

/// A randomized case. The level is built, saved, loaded back and compared.
pub trait TestCase {
    fn name(&self) -> String;

    fn check(&self) -> bool;
}

pub fn run_tests<T: TestCase>(tests: impl IntoIterator<Item = T>) {
    for case in tests {
        println!("Running {:?}", case.name());
        if !case.check() {
            panic!("Test {:?} failed", case.name());
        }
    }
}

pub const TILES: &str = "\
-[\"Walls\", color(120, 120, 120)]\n\
[#nm: \"Block\", #sz: point(1, 1), #specs: [1], #specs2: 0, #tp: \"box\"]\n\
[#nm: \"Big Block\", #sz: point(2, 2), #specs: [1, 1, 1, 1], #specs2: 0, #tp: \"box\"]\n\
-[\"Misc\", color(200, 50, 50)]\n\
[#nm: \"Frame\", #sz: point(3, 3), #specs: [-1, -1, -1, -1, -1, -1, -1, -1, -1], #specs2: 0, #tp: \"voxelStruct\"]\n\
[#nm: \"Pipe Stack\", #sz: point(1, 3), #specs: [-1, -1, -1], #specs2: [1, -1, 1], #tp: \"voxelStruct\"]\n\
";

pub const PROPS: &str = "\
-[\"Misc\", color(0, 255, 0)]\n\
[#nm: \"Rock\", #tp: \"standard\", #depth: 4, #sz: point(2, 2), #vars: 3]\n\
[#nm: \"Wire\", #tp: \"rope\", #depth: 0, #segmentLength: 3]\n\
";

pub const EFFECTS: &str = "\
-[\"Natural\", color(0, 200, 0)]\n\
[#nm: \"Slime\", #tp: \"standardErosion\", #options: [[#nm: \"Layers\", #choices: [\"All\", \"1\", \"2\", \"3\"], #default: \"All\"]]]\n\
[#nm: \"Moss\", #tp: \"grower\", #options: [[#nm: \"Seed\", #min: 0, #max: 500, #default: 20]]]\n\
";

pub const MATERIALS: &str = "\
-[\"Materials\", color(255, 255, 255)]\n\
[#nm: \"Standard\", #color: color(150, 150, 150)]\n\
[#nm: \"Concrete\", #color: color(100, 100, 100)]\n\
";

pub fn catalogs() -> Catalogs {
    let catalogs = Catalogs::load(
        CatalogSources {
            tiles: Some(TILES),
            props: Some(PROPS),
            effects: Some(EFFECTS),
            materials: Some(MATERIALS),
        },
        ParseMode::Strict,
    );
    assert_eq!(catalogs.error_count(), 0);
    catalogs
}

pub const GEOMETRY: &str = "[\
[[[1, []], [0, []], [0, []]], [[1, [1, 5]], [1, []], [0, []]]], \
[[[0, []], [0, []], [0, []]], [[3, []], [0, []], [0, []]]], \
[[[0, [4]], [0, []], [0, []]], [[1, []], [0, []], [0, []]]]\
]";

const DEFAULT_CELL: &str = "[#tp: \"default\", #Data: 0]";

/// The tile matrix of [`document`]: a `Block` head at (0, 0) on layer 0,
/// `Concrete` at (1, 0) on layer 0 and an unknown tile at (2, 1) on layer 1.
pub fn tile_matrix() -> String {
    let head = "[#tp: \"tileHead\", #Data: [point(1, 1), \"Block\"]]";
    let material = "[#tp: \"material\", #Data: \"Concrete\"]";
    let mystery = "[#tp: \"tileHead\", #Data: [point(7, 7), \"Mystery\"]]";
    let cell = |layers: [&str; 3]| format!("[{}]", layers.join(", "));
    let d = DEFAULT_CELL;
    let columns = [
        [cell([head, d, d]), cell([d, d, d])],
        [cell([material, d, d]), cell([d, d, d])],
        [cell([d, d, d]), cell([d, mystery, d])],
    ];
    let columns = columns
        .iter()
        .map(|column| format!("[{}]", column.join(", ")))
        .collect::<Vec<_>>();
    format!("[{}]", columns.join(", "))
}

/// A complete 3x2 document with every section filled in.
pub fn document() -> String {
    let lines = [
        GEOMETRY.to_string(),
        format!(
            "[#lastKeys: [:], #Keys: [:], #workLayer: 2, #lstMsPs: point(0, 0), #tlMatrix: {}, \
             #defaultMaterial: \"Concrete\", #toolType: \"material\", #toolData: \"Concrete\", \
             #tmPos: point(1, 1), #tmSavPosL: [], #specialEdit: 0]",
            tile_matrix()
        ),
        "[#lastKeys: [:], #Keys: [:], #lastChange: 0, #effects: [[#nm: \"Slime\", \
         #tp: \"standardErosion\", #crossScreen: 0, #mtrx: [[0, 50], [100, 0], [25, 0]], \
         #Options: [[\"Layers\", [\"All\", \"1\", \"2\", \"3\"], \"All\"]]]], #emPos: point(1, 1), \
         #editEffect: 0, #selectEditEffect: 0, #mode: \"createNew\", #brushSize: 5]"
            .to_string(),
        "[#pos: point(0, 0), #rot: 0, #sz: point(50, 70), #col: 1, #lastTm: 0, #lightAngle: 90, \
         #flatness: 3, #lightRect: rect(1000, 1000, -1000, -1000), #paintShape: \"pxl\"]"
            .to_string(),
        "[#mouse: 1,  #pals: [[#detCol: color(255, 0, 0)]], #pal: 1, #eCol1: 1]".to_string(),
        "[#timeLimit: 4800, #defaultTerrain: 1, #size: point(3, 2), #extraTiles: [1, 2, 3, 4], \
         #light: 0, #tileSeed: 225]"
            .to_string(),
        "[#cameras: [point(-40, -30)], #selectedCamera: 0, #quads: [[[0, 0], [90, 0.5], [0, 0], \
         [0, 0]]], #Keys: [#n: 0, #d: 0, #e: 0, #p: 0], #lastKeys: [#n: 0, #d: 0, #e: 0, #p: 0]]"
            .to_string(),
        "[#waterLevel: 1, #waterInFront: 0, #waveLength: 60, #waveAmplitude: 5, #waveSpeed: 10]"
            .to_string(),
        "[#props: [[-2, \"Rock\", point(1, 1), [point(0, 0), point(40, 0), point(40, 40), \
         point(0, 40)], [#settings: [#renderorder: 0, #seed: 400, #renderTime: 0, #variation: 2]]]], \
         #lastKeys: [:], #Keys: [:], #workLayer: 1, #pmPos: point(1, 1), #pmSavPosL: [], \
         #propRotation: 0, #depth: 0, #color: 0]"
            .to_string(),
    ];
    let mut out = lines.join("\r");
    out.push('\r');
    out
}

/// A document of `width x height` air cells with no tiles and only the
/// first six sections.
pub fn short_document(width: usize, height: usize) -> String {
    let geo_cell = "[[0, []], [0, []], [0, []]]";
    let tile_cell = format!("[{DEFAULT_CELL}, {DEFAULT_CELL}, {DEFAULT_CELL}]");
    let matrix = |cell: &str| {
        let column = format!("[{}]", vec![cell; height].join(", "));
        format!("[{}]", vec![column.as_str(); width].join(", "))
    };
    [
        matrix(geo_cell),
        format!("[#tlMatrix: {}]", matrix(&tile_cell)),
        "[#effects: []]".to_string(),
        "[:]".to_string(),
        "[:]".to_string(),
        format!("[#size: point({width}, {height})]"),
    ]
    .join("\n")
}
