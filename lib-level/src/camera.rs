use glam::DVec2;
use lib_notation::{FromValue, Map, SchemaError, ToValue, Value};

use crate::LevelData;

pub const TILE_PX: f64 = 20.0;
/// Camera size in tiles.
pub const CAMERA_SIZE: DVec2 = DVec2::new(70.0, 40.0);
/// Length of a corner offset with radius `1`, in tiles.
pub const CORNER_REACH: f64 = 4.0;

/// A corner offset in polar form: angle in degrees clockwise from up,
/// radius in `0..=1`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct CornerOffset {
    pub angle: f64,
    pub radius: f64,
}

impl CornerOffset {
    /// The offset in pixels.
    pub fn to_cartesian(self) -> DVec2 {
        let rad = self.angle.to_radians();
        DVec2::new(rad.sin(), -rad.cos()) * self.radius * CORNER_REACH * TILE_PX
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct LevelCamera {
    /// Top-left corner in pixels.
    pub pos: DVec2,
    /// Offsets of the top-left, top-right, bottom-right and bottom-left
    /// corners.
    pub corners: [CornerOffset; 4],
}

impl LevelCamera {
    pub fn new(pos: DVec2) -> Self {
        LevelCamera {
            pos,
            corners: [CornerOffset::default(); 4],
        }
    }

    pub fn size_px() -> DVec2 {
        CAMERA_SIZE * TILE_PX
    }

    /// Corner positions in pixels with the offsets scaled by `depth`, which
    /// is clamped to `0..=1`.
    pub fn corner_positions(&self, depth: f64) -> [DVec2; 4] {
        let size = Self::size_px();
        let base = [
            self.pos,
            self.pos + DVec2::new(size.x, 0.0),
            self.pos + size,
            self.pos + DVec2::new(0.0, size.y),
        ];
        let depth = depth.clamp(0.0, 1.0);
        std::array::from_fn(|idx| base[idx] + self.corners[idx].to_cartesian() * depth)
    }

    fn decode_quad(value: &Value) -> Result<[CornerOffset; 4], SchemaError> {
        let corners = Vec::<Vec<f64>>::from_value(value)?;
        if corners.len() != 4 {
            return Err(SchemaError::invalid(format!(
                "expected 4 corners, found {}",
                corners.len()
            )));
        }

        let mut out = [CornerOffset::default(); 4];
        for (idx, corner) in corners.iter().enumerate() {
            let [angle, radius] = corner[..] else {
                return Err(SchemaError::invalid("a corner is [angle, radius]")
                    .nested(&format!("[{idx}]")));
            };
            out[idx] = CornerOffset { angle, radius };
        }
        Ok(out)
    }

    fn encode_quad(&self) -> Value {
        self.corners
            .iter()
            .map(|c| vec![c.angle, c.radius])
            .collect::<Vec<_>>()
            .to_value()
    }
}

/// Reads the cameras of section 6. `#cameras` and `#quads` are zipped; a
/// camera without a quad gets zero offsets.
pub(crate) fn decode_cameras(section: &Map) -> Result<Vec<LevelCamera>, SchemaError> {
    let positions = section
        .get("cameras")
        .map(Vec::<DVec2>::from_value)
        .transpose()
        .map_err(|e| e.nested("cameras"))?
        .unwrap_or_default();
    let quads = match section.get("quads") {
        Some(Value::List(quads)) => quads.as_slice(),
        Some(other) => return Err(SchemaError::mismatch("list", other).nested("quads")),
        None => &[],
    };

    positions
        .into_iter()
        .enumerate()
        .map(|(idx, pos)| {
            let mut camera = LevelCamera::new(pos);
            if let Some(quad) = quads.get(idx) {
                camera.corners = LevelCamera::decode_quad(quad)
                    .map_err(|e| e.nested(&format!("quads[{idx}]")))?;
            }
            Ok(camera)
        })
        .collect()
}

pub(crate) fn encode_cameras(cameras: &[LevelCamera], section: &mut Map) {
    let positions = cameras.iter().map(|c| c.pos).collect::<Vec<_>>();
    section.set("cameras", positions.to_value());
    section.set(
        "quads",
        Value::List(cameras.iter().map(LevelCamera::encode_quad).collect()),
    );
}

impl LevelData {
    pub fn cameras(&self) -> &[LevelCamera] {
        &self.cameras
    }

    pub fn camera_mut(&mut self, idx: usize) -> Option<&mut LevelCamera> {
        self.cameras.get_mut(idx)
    }

    pub fn add_camera(&mut self, camera: LevelCamera) -> usize {
        self.cameras.push(camera);
        self.cameras.len() - 1
    }

    pub fn remove_camera(&mut self, idx: usize) -> Option<LevelCamera> {
        (idx < self.cameras.len()).then(|| self.cameras.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_notation::parse;

    #[test]
    fn corner_offsets() {
        let mut camera = LevelCamera::new(DVec2::ZERO);
        camera.corners[0] = CornerOffset {
            angle: 90.0,
            radius: 0.5,
        };
        let corners = camera.corner_positions(1.0);
        assert!((corners[0] - DVec2::new(40.0, 0.0)).length() < 1e-9);
        assert_eq!(corners[2], DVec2::new(1400.0, 800.0));
        assert_eq!(camera.corner_positions(0.0)[0], DVec2::ZERO);
    }

    #[test]
    fn section_round_trip() {
        let section = parse(
            "[#cameras: [point(10, 20), point(1400, 0)], #selectedCamera: 0, \
             #quads: [[[0, 0], [90, 0.5], [0, 0], [180, 1]], [[0, 0], [0, 0], [0, 0], [0, 0]]]]",
        )
        .unwrap();
        let mut section = section.as_map().unwrap().clone();
        let cameras = decode_cameras(&section).unwrap();
        assert_eq!(cameras.len(), 2);
        assert_eq!(cameras[0].corners[3].angle, 180.0);

        let before = section.clone();
        encode_cameras(&cameras, &mut section);
        assert_eq!(section, before);
    }
}
