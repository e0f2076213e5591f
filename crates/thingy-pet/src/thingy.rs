use anyhow::Result;
use glam::Vec2;

use thingy_config::PetTuning;
use thingy_sheet::{default_sheet, ClipAtlas, FrameRef, RawSheet, SheetError};

use crate::machine::{self, FeedCompletion, FeedTicket, TickReport};
use crate::mood::MoodBand;
use crate::player::{ClipPlayer, PlaybackEvent};
use crate::state::PetState;
use crate::viewport::Viewport;

/// Discrete actions the shell can forward from user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Feed,
}

/// What the shell needs to draw the pet this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSnapshot<'a> {
    pub clip: &'a str,
    /// Position within the clip's frame sequence.
    pub frame_index: usize,
    /// The sheet frame to draw.
    pub sheet_frame: FrameRef,
    pub position: Vec2,
    pub facing_left: bool,
}

/// The pet: compiled clips, simulation state, and the clip being played.
///
/// Consumers call [`tick`](Self::tick) once per frame with the elapsed time,
/// forward user input through [`on_action`](Self::on_action), and draw from
/// [`render`](Self::render).
pub struct Thingy {
    atlas: ClipAtlas,
    tuning: PetTuning,
    state: PetState,
    player: ClipPlayer,
    pending_feed: Option<FeedTicket>,
}

impl Thingy {
    /// Build a pet from the embedded default sheet.
    pub fn load_default(tuning: PetTuning, viewport: Viewport, sprite_width: f32) -> Result<Self> {
        let sheet = default_sheet()?;
        Ok(Self::from_sheet(&sheet, tuning, viewport, sprite_width)?)
    }

    /// Compile `sheet` and build a pet from it.
    pub fn from_sheet(
        sheet: &RawSheet,
        tuning: PetTuning,
        viewport: Viewport,
        sprite_width: f32,
    ) -> Result<Self, SheetError> {
        let atlas = ClipAtlas::build_with_one_shots(sheet, &[tuning.clips.eat.as_str()])?;
        Self::new(atlas, tuning, viewport, sprite_width)
    }

    /// Create a pet that enters from just off the left edge of `viewport`.
    ///
    /// Fails if the atlas lacks any clip the pet can select, so clip lookups
    /// after construction cannot miss.
    pub fn new(
        atlas: ClipAtlas,
        tuning: PetTuning,
        viewport: Viewport,
        sprite_width: f32,
    ) -> Result<Self, SheetError> {
        let required = machine::required_clips(&tuning);
        atlas.require(required.iter().map(String::as_str))?;

        let start = Vec2::new(-sprite_width, viewport.center().y);
        let state = PetState::new(start, viewport, &tuning);
        let player = ClipPlayer::new(atlas.get(&state.current_clip)?);
        tracing::info!(
            clips = atlas.len(),
            viewport_w = viewport.width,
            viewport_h = viewport.height,
            "thingy ready"
        );

        Ok(Self {
            atlas,
            tuning,
            state,
            player,
            pending_feed: None,
        })
    }

    /// Advance the simulation and the active clip by `delta_ms`.
    pub fn tick(&mut self, delta_ms: f32) -> TickReport {
        let report = machine::tick(&mut self.state, &self.tuning, delta_ms);
        if report.reselected {
            self.restart_clip();
        }

        let event = match self.atlas.get(self.player.clip_name()) {
            Ok(clip) => self.player.advance(clip, delta_ms),
            Err(err) => {
                tracing::error!(error = %err, "active clip missing from atlas");
                None
            }
        };
        if event == Some(PlaybackEvent::Completed) {
            self.on_clip_completed();
        }
        report
    }

    /// Handle a discrete user action. Returns false if it was rejected.
    pub fn on_action(&mut self, action: Action) -> bool {
        match action {
            Action::Feed => match machine::feed(&mut self.state, &self.tuning) {
                Some(ticket) => {
                    self.pending_feed = Some(ticket);
                    self.restart_clip();
                    true
                }
                None => false,
            },
        }
    }

    /// Apply a new viewport. A feeding in progress is abandoned.
    pub fn resize(&mut self, viewport: Viewport) {
        if machine::resize(&mut self.state, &self.tuning, viewport) {
            self.pending_feed = None;
            self.restart_clip();
        }
    }

    pub fn render(&self) -> RenderSnapshot<'_> {
        let frame_index = self.player.frame_index();
        let sheet_frame = self
            .atlas
            .get(self.player.clip_name())
            .ok()
            .and_then(|clip| clip.frames.get(frame_index))
            .map(|timed| timed.frame)
            .unwrap_or(FrameRef(0));
        RenderSnapshot {
            clip: self.player.clip_name(),
            frame_index,
            sheet_frame,
            position: self.state.position,
            facing_left: self.state.facing_left,
        }
    }

    pub fn state(&self) -> &PetState {
        &self.state
    }

    pub fn mood(&self) -> MoodBand {
        MoodBand::of(self.state.happiness, &self.tuning.happiness)
    }

    pub fn atlas(&self) -> &ClipAtlas {
        &self.atlas
    }

    pub fn tuning(&self) -> &PetTuning {
        &self.tuning
    }

    fn on_clip_completed(&mut self) {
        let Some(ticket) = self.pending_feed.take() else {
            // A one-shot that is not a feeding: go back to the idle clip.
            self.restart_clip();
            return;
        };
        if machine::complete_feeding(&mut self.state, &self.tuning, ticket)
            == FeedCompletion::Applied
        {
            self.restart_clip();
        }
    }

    fn restart_clip(&mut self) {
        match self.atlas.get(&self.state.current_clip) {
            Ok(clip) => self.player.play(clip),
            Err(err) => tracing::error!(error = %err, "selected clip missing from atlas"),
        }
    }
}
