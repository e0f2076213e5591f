use glam::Vec2;

/// Visible world area, in the same units as the pet's position.
///
/// The origin is the top-left corner; the shell supplies a new viewport
/// whenever the display is resized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Where the pet rests and walks toward.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// The comfort rectangle: the viewport scaled by `fraction` about its centre.
    pub fn comfort_rect(&self, fraction: f32) -> ComfortRect {
        let half = Vec2::new(self.width, self.height) * fraction / 2.0;
        let center = self.center();
        ComfortRect {
            min: center - half,
            max: center + half,
        }
    }
}

/// Axis-aligned rectangle, edges inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComfortRect {
    pub min: Vec2,
    pub max: Vec2,
}

impl ComfortRect {
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.y >= self.min.y
            && point.x <= self.max.x
            && point.y <= self.max.y
    }
}
