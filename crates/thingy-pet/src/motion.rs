use glam::Vec2;

use thingy_config::MotionTuning;

/// Result of one motion step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub position: Vec2,
    /// False when the pet was already within the arrive epsilon.
    pub moved: bool,
    /// The step's horizontal direction disagrees with the current facing.
    pub flipped: bool,
}

/// Move `position` toward `target` for `delta_ms` milliseconds.
///
/// Stateless: everything it needs is passed in. The step never overshoots the
/// target, so an arriving pet settles instead of flipping back and forth
/// across it. A step with no horizontal component never flips.
pub fn step(
    position: Vec2,
    target: Vec2,
    facing_left: bool,
    delta_ms: f32,
    tuning: &MotionTuning,
) -> Motion {
    let to_target = target - position;
    let distance = to_target.length();
    if !distance.is_finite() || distance < tuning.arrive_epsilon {
        return Motion {
            position,
            moved: false,
            flipped: false,
        };
    }

    let length = (delta_ms * tuning.speed_px_per_ms).min(distance);
    let delta = to_target / distance * length;
    let flipped = (delta.x < 0.0 && !facing_left) || (delta.x > 0.0 && facing_left);

    Motion {
        position: position + delta,
        moved: length > 0.0,
        flipped,
    }
}
