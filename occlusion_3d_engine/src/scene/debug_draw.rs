/// Per-frame debug line drawing.
///
/// Purely diagnostic: nothing drawn here feeds back into culling results.

use glam::{Vec3, Vec4};

/// Frustum edges
pub const COLOR_FRUSTUM: Vec4 = Vec4::new(1.0, 1.0, 0.0, 1.0);
/// Occlusion plane normals
pub const COLOR_OCCLUSION_NORMAL: Vec4 = Vec4::new(0.0, 0.5, 1.0, 1.0);
/// Line of sight confirmed
pub const COLOR_VISIBLE: Vec4 = Vec4::new(0.0, 1.0, 0.0, 1.0);
/// Line of sight blocked or missed
pub const COLOR_BLOCKED: Vec4 = Vec4::new(1.0, 0.0, 0.0, 1.0);

/// Sink for debug lines.
pub trait DebugDraw {
    /// Called once per frame before any line, with the material the host
    /// should use for visualization geometry.
    fn begin_frame(&mut self, _visualization_material: &str) {}

    /// Segment from `a` to `b`.
    fn line(&mut self, a: Vec3, b: Vec3, color: Vec4);

    /// Segment from `origin` to `origin + direction` (direction already scaled).
    fn ray(&mut self, origin: Vec3, direction: Vec3, color: Vec4) {
        self.line(origin, origin + direction, color);
    }
}

/// Discards everything.
pub struct NoOpDebugDraw;

impl DebugDraw for NoOpDebugDraw {
    fn line(&mut self, _a: Vec3, _b: Vec3, _color: Vec4) {}
}

/// Records lines in memory, for tests and offline inspection.
#[derive(Debug, Default)]
pub struct RecordingDebugDraw {
    pub lines: Vec<(Vec3, Vec3, Vec4)>,
    /// Material announced by the last `begin_frame`
    pub material: Option<String>,
    pub frames: u32,
}

impl RecordingDebugDraw {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lines drawn with the given color.
    pub fn count(&self, color: Vec4) -> usize {
        self.lines.iter().filter(|(_, _, c)| *c == color).count()
    }
}

impl DebugDraw for RecordingDebugDraw {
    fn begin_frame(&mut self, visualization_material: &str) {
        self.lines.clear();
        self.material = Some(visualization_material.to_string());
        self.frames += 1;
    }

    fn line(&mut self, a: Vec3, b: Vec3, color: Vec4) {
        self.lines.push((a, b, color));
    }
}
