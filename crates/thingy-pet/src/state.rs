use glam::Vec2;

use thingy_config::PetTuning;

use crate::machine::idle_clip_name;
use crate::mood::MoodBand;
use crate::viewport::Viewport;

/// Everything the simulation tracks about the pet.
///
/// Owned and mutated only by the functions in [`crate::machine`]; the shell
/// reads it through [`crate::Thingy`].
#[derive(Debug, Clone, PartialEq)]
pub struct PetState {
    pub position: Vec2,
    pub move_target: Vec2,
    pub facing_left: bool,
    /// Always within `[0, 1]`.
    pub happiness: f32,
    /// Always within `[0, 1]`; 1 is fully fed.
    pub hunger: f32,
    /// Tracked but not yet used by any rule.
    pub health: f32,
    /// A feeding sequence is in progress; motion and flips are suspended.
    pub feeding: bool,
    /// Name of the active clip. Always a key of the pet's atlas.
    pub current_clip: String,
    pub viewport: Viewport,
    /// Bumped on every accepted feed and every interruption, so completion
    /// signals from an older feeding can be recognised as stale.
    pub feed_generation: u64,
}

impl PetState {
    /// A fresh pet at `position`, walking toward the centre of `viewport`.
    pub fn new(position: Vec2, viewport: Viewport, tuning: &PetTuning) -> Self {
        let happiness = 0.5;
        let mood = MoodBand::of(happiness, &tuning.happiness);
        Self {
            position,
            move_target: viewport.center(),
            facing_left: false,
            happiness,
            hunger: 0.5,
            health: 1.0,
            feeding: false,
            current_clip: idle_clip_name(&tuning.clips.idle_prefix, false, mood),
            viewport,
            feed_generation: 0,
        }
    }
}
