//! The pet simulation: per-tick integration and the feeding transition.
//!
//! Every function here takes the [`PetState`] explicitly and touches nothing
//! else, so the shell decides when (and how often) each one runs. None of
//! them fail: attribute updates clamp, and unusable tick lengths count as
//! zero elapsed time.

use thingy_config::PetTuning;

use crate::mood::{crosses_band, MoodBand};
use crate::motion;
use crate::state::PetState;
use crate::viewport::Viewport;

/// What a single [`tick`] did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub moved: bool,
    pub flipped: bool,
    /// Happiness ended the tick in a different mood band.
    pub mood_changed: bool,
    /// The active clip was replaced (or restarted) and playback should reset.
    pub reselected: bool,
}

/// Proof that a feed was accepted; hand it back to [`complete_feeding`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedTicket {
    generation: u64,
}

impl FeedTicket {
    pub fn generation(self) -> u64 {
        self.generation
    }
}

/// Outcome of a feeding completion signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedCompletion {
    /// The hunger bonus was applied and the idle clip re-selected.
    Applied,
    /// The signal belongs to a feeding that already ended; nothing changed.
    Stale,
}

/// Advance the pet by `delta_ms` milliseconds.
pub fn tick(state: &mut PetState, tuning: &PetTuning, delta_ms: f32) -> TickReport {
    let dt = if delta_ms.is_finite() && delta_ms > 0.0 {
        delta_ms
    } else {
        0.0
    };
    let mut report = TickReport::default();

    if !state.feeding {
        let m = motion::step(
            state.position,
            state.move_target,
            state.facing_left,
            dt,
            &tuning.motion,
        );
        state.position = m.position;
        report.moved = m.moved;
        if m.flipped {
            state.facing_left = !state.facing_left;
            report.flipped = true;
        }
    }

    let h = &tuning.happiness;
    let before = state.happiness;
    let comfort = state.viewport.comfort_rect(h.comfort_fraction);
    let mut happiness = if comfort.contains(state.position) {
        before + h.inside_recovery_per_ms * dt
    } else {
        before - h.outside_decay_per_ms * dt
    };
    happiness = clamp_unit(happiness);

    let hunger_decay = if state.hunger < tuning.hunger.starving_below {
        h.starving_decay_per_ms
    } else {
        h.fed_decay_per_ms
    };
    state.happiness = clamp_unit(happiness - hunger_decay * dt);
    state.hunger = clamp_unit(state.hunger - tuning.hunger.decay_per_ms * dt);

    report.mood_changed = crosses_band(before, state.happiness, h);
    if report.mood_changed || report.flipped {
        report.reselected = reselect(state, tuning, report.flipped);
    }
    report
}

/// Start a feeding sequence.
///
/// Returns `None`, leaving the state untouched, if one is already running.
pub fn feed(state: &mut PetState, tuning: &PetTuning) -> Option<FeedTicket> {
    if state.feeding {
        tracing::debug!("feed ignored: already feeding");
        return None;
    }
    state.position = state.move_target;
    state.facing_left = false;
    state.feeding = true;
    state.feed_generation += 1;
    state.current_clip = tuning.clips.eat.clone();
    tracing::info!(
        generation = state.feed_generation,
        hunger = state.hunger,
        "feeding started"
    );
    Some(FeedTicket {
        generation: state.feed_generation,
    })
}

/// Deliver the completion signal of the eat clip.
pub fn complete_feeding(
    state: &mut PetState,
    tuning: &PetTuning,
    ticket: FeedTicket,
) -> FeedCompletion {
    if !state.feeding || ticket.generation != state.feed_generation {
        tracing::debug!(
            ticket = ticket.generation,
            current = state.feed_generation,
            "ignoring stale feeding completion"
        );
        return FeedCompletion::Stale;
    }
    state.feeding = false;
    state.hunger = clamp_unit(state.hunger + tuning.hunger.feed_bonus);
    reselect(state, tuning, true);
    tracing::info!(hunger = state.hunger, "feeding finished");
    FeedCompletion::Applied
}

/// Abandon a feeding sequence without its hunger bonus.
///
/// Any outstanding [`FeedTicket`] becomes stale. Returns false if the pet was
/// not feeding.
pub fn interrupt_feeding(state: &mut PetState, tuning: &PetTuning) -> bool {
    if !state.feeding {
        return false;
    }
    state.feeding = false;
    state.feed_generation += 1;
    reselect(state, tuning, true);
    tracing::info!("feeding interrupted");
    true
}

/// Apply a new viewport: the pet heads for its centre and the comfort
/// rectangle follows. A feeding in progress is interrupted, since its visual
/// no longer matches the scene.
///
/// Returns true if a feeding was interrupted.
pub fn resize(state: &mut PetState, tuning: &PetTuning, viewport: Viewport) -> bool {
    state.viewport = viewport;
    state.move_target = viewport.center();
    interrupt_feeding(state, tuning)
}

/// Idle clip name for the current facing and mood.
pub fn select_clip(state: &PetState, tuning: &PetTuning) -> String {
    idle_clip_name(
        &tuning.clips.idle_prefix,
        state.facing_left,
        MoodBand::of(state.happiness, &tuning.happiness),
    )
}

/// `{prefix}_{left|right}{mood suffix}`.
pub fn idle_clip_name(prefix: &str, facing_left: bool, mood: MoodBand) -> String {
    let side = if facing_left { "_left" } else { "_right" };
    format!("{prefix}{side}{}", mood.suffix())
}

/// Every clip name the pet can ask its atlas for.
pub fn required_clips(tuning: &PetTuning) -> Vec<String> {
    let mut names = Vec::with_capacity(7);
    for facing_left in [false, true] {
        for mood in [MoodBand::Neutral, MoodBand::Happy, MoodBand::Angry] {
            names.push(idle_clip_name(&tuning.clips.idle_prefix, facing_left, mood));
        }
    }
    names.push(tuning.clips.eat.clone());
    names
}

/// Switch to the idle clip if it differs from the active one (or if forced).
/// The eat clip is never replaced mid-feeding.
fn reselect(state: &mut PetState, tuning: &PetTuning, force: bool) -> bool {
    if state.feeding {
        return false;
    }
    let next = select_clip(state, tuning);
    if !force && next == state.current_clip {
        return false;
    }
    tracing::debug!(from = %state.current_clip, to = %next, "clip re-selected");
    state.current_clip = next;
    true
}

fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
