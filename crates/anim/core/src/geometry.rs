//! Canvas geometry for miss displacement.

use rand::Rng;

/// Canvas position in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// Offset that moves a ranged miss beside its target.
///
/// The offset is perpendicular to the source → target vector, randomly to the
/// left or right, with a magnitude between half and one full grid cell.
pub fn miss_offset(source: Point, target: Point, grid_size: f64, rng: &mut impl Rng) -> Point {
    let angle = (target.y - source.y).atan2(target.x - source.x);
    let side = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
    let perpendicular = angle + side * std::f64::consts::FRAC_PI_2;
    let distance = grid_size * (0.5 + rng.random::<f64>() * 0.5);

    Point::new(perpendicular.cos() * distance, perpendicular.sin() * distance)
}
