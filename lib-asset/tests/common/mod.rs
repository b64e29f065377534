#![allow(dead_code)]

pub const TILES: &str = "\
-[\"Walls\", color(120, 120, 120)]\r\
[#nm: \"Block\", #sz: point(1, 1), #specs: [1], #specs2: 0, #tp: \"box\", #bfTiles: 0, #rnd: 1, #tags: []]\r\
[#nm: \"Big Block\", #sz: point(2, 2), #specs: [1, 1, 1, 1], #specs2: void, #tp: \"box\", #bfTiles: 1, #rnd: 1]\r\
-- decoration below\r\
-[\"Pipes\", color(200, 50, 50)]\r\
[#nm: \"Pipe Stack\", #sz: point(1, 3), #specs: [-1, -1, -1], #specs2: [1, -1, 1], #tp: \"voxelStruct\", #repeatL: [1, 9], #rnd: 2]\r\
[#nm: \"Floor Slope\", #sz: point(3, 1), #specs: [3, 1, 2], #tp: \"voxelStructRockType\"]\r\
";

pub const PROPS: &str = "\
-[\"Misc\", color(0, 255, 0)]\n\
[#nm: \"Rock\", #tp: \"standard\", #depth: 4, #sz: point(2, 2), #vars: 3, #random: 1]\n\
[#nm: \"Stain\", #tp: \"variedDecal\", #depth: 1, #vars: 4]\n\
-[\"Ropes\", color(255, 255, 0)]\n\
[#nm: \"Wire\", #tp: \"rope\", #depth: 0, #segmentLength: 3, #tags: []]\n\
[#nm: \"Pole\", #tp: \"long\", #depth: 2]\n\
";

pub const EFFECTS: &str = "\
-[\"Natural\", color(0, 200, 0)]\n\
[#nm: \"Slime\", #tp: \"standardErosion\", #crossScreen: 0, #options: [[#nm: \"Layers\", #choices: [\"All\", \"1\", \"2\", \"3\"], #default: \"All\"]]]\n\
[#nm: \"Moss\", #tp: \"grower\", #options: [[#nm: \"Seed\", #min: 0, #max: 500, #default: 20]]]\n\
";

pub const MATERIALS: &str = "\
-[\"Materials\", color(255, 255, 255)]\n\
[#nm: \"Standard\", #color: color(150, 150, 150)]\n\
[#nm: \"Concrete\", #color: color(100, 100, 100)]\n\
";
