use thingy_sheet::Clip;

/// Emitted by [`ClipPlayer::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// A non-looping clip showed its last frame for its full duration.
    Completed,
}

/// Plays one clip in place: tracks the current frame and time spent on it.
///
/// The player stores only the clip's name; the caller passes the clip itself
/// on every [`advance`](Self::advance), so clips stay owned by the atlas.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipPlayer {
    clip: String,
    frame_index: usize,
    elapsed_ms: f32,
    looping: bool,
    playing: bool,
}

impl ClipPlayer {
    /// A player positioned on the first frame of `clip`, already playing.
    pub fn new(clip: &Clip) -> Self {
        Self {
            clip: clip.name.clone(),
            frame_index: 0,
            elapsed_ms: 0.0,
            looping: clip.looping,
            playing: true,
        }
    }

    /// Switch to `clip`, resetting to frame 0 and resuming playback.
    pub fn play(&mut self, clip: &Clip) {
        *self = Self::new(clip);
    }

    /// Advance the play position. Catches up over several frames if
    /// `delta_ms` spans more than one.
    ///
    /// Looping clips wrap to frame 0. A non-looping clip holds its last frame
    /// and reports [`PlaybackEvent::Completed`] exactly once.
    pub fn advance(&mut self, clip: &Clip, delta_ms: f32) -> Option<PlaybackEvent> {
        if !self.playing || clip.is_empty() || !(delta_ms.is_finite() && delta_ms > 0.0) {
            return None;
        }
        if self.frame_index >= clip.len() {
            self.frame_index = 0;
        }

        self.elapsed_ms += delta_ms;
        if self.looping {
            // Skip whole laps so a huge delta doesn't walk every frame.
            let lap = clip.total_duration_ms() as f32;
            if lap > 0.0 && self.elapsed_ms >= lap {
                self.elapsed_ms %= lap;
            }
        }

        loop {
            let duration = (clip.frames[self.frame_index].duration_ms as f32).max(1.0);
            if self.elapsed_ms < duration {
                return None;
            }
            if self.frame_index + 1 < clip.len() {
                self.elapsed_ms -= duration;
                self.frame_index += 1;
            } else if self.looping {
                self.elapsed_ms -= duration;
                self.frame_index = 0;
            } else {
                self.elapsed_ms = duration;
                self.playing = false;
                return Some(PlaybackEvent::Completed);
            }
        }
    }

    pub fn clip_name(&self) -> &str {
        &self.clip
    }

    /// Position within the clip's frame sequence (not the sheet frame index).
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thingy_sheet::{FrameRef, TimedFrame};

    /// A clip whose frame `i` is sheet frame `10 + i`, with the given durations.
    fn test_clip(durations: &[u32], looping: bool) -> Clip {
        Clip {
            name: "test".into(),
            frames: durations
                .iter()
                .enumerate()
                .map(|(i, &duration_ms)| TimedFrame {
                    frame: FrameRef(10 + i),
                    duration_ms,
                })
                .collect(),
            looping,
        }
    }

    #[test]
    fn starts_on_first_frame() {
        let clip = test_clip(&[100, 100, 100], true);
        let player = ClipPlayer::new(&clip);
        assert_eq!(player.frame_index(), 0);
        assert_eq!(player.clip_name(), "test");
        assert!(player.is_playing());
    }

    #[test]
    fn no_advance_before_duration() {
        let clip = test_clip(&[100, 100, 100], true);
        let mut player = ClipPlayer::new(&clip);
        player.advance(&clip, 99.0);
        assert_eq!(player.frame_index(), 0);
        player.advance(&clip, 1.0);
        assert_eq!(player.frame_index(), 1);
    }

    #[test]
    fn uses_per_frame_durations() {
        let clip = test_clip(&[50, 200, 50], true);
        let mut player = ClipPlayer::new(&clip);
        player.advance(&clip, 60.0);
        assert_eq!(player.frame_index(), 1);
        player.advance(&clip, 150.0);
        assert_eq!(player.frame_index(), 1);
        player.advance(&clip, 50.0);
        assert_eq!(player.frame_index(), 2);
    }

    #[test]
    fn looping_clip_wraps() {
        let clip = test_clip(&[100, 100, 100], true);
        let mut player = ClipPlayer::new(&clip);
        for step in [1, 2, 0, 1] {
            assert_eq!(player.advance(&clip, 100.0), None);
            assert_eq!(player.frame_index(), step);
        }
    }

    #[test]
    fn long_gap_catches_up() {
        let clip = test_clip(&[100, 100, 100], true);
        let mut player = ClipPlayer::new(&clip);
        player.advance(&clip, 250.0);
        assert_eq!(player.frame_index(), 2);
        player.advance(&clip, 3_000_000.0 + 50.0);
        assert_eq!(player.frame_index(), 0);
    }

    #[test]
    fn one_shot_completes_once_and_holds_last_frame() {
        let clip = test_clip(&[100, 100], false);
        let mut player = ClipPlayer::new(&clip);
        assert_eq!(player.advance(&clip, 150.0), None);
        assert_eq!(
            player.advance(&clip, 50.0),
            Some(PlaybackEvent::Completed)
        );
        assert_eq!(player.frame_index(), 1);
        assert!(!player.is_playing());
        assert_eq!(player.advance(&clip, 1000.0), None);
        assert_eq!(player.frame_index(), 1);
    }

    #[test]
    fn play_resets_position() {
        let clip = test_clip(&[100, 100, 100], true);
        let eat = Clip {
            name: "eat".into(),
            ..test_clip(&[50], false)
        };
        let mut player = ClipPlayer::new(&clip);
        player.advance(&clip, 150.0);
        player.play(&eat);
        assert_eq!(player.clip_name(), "eat");
        assert_eq!(player.frame_index(), 0);
        assert!(player.is_playing());
        assert_eq!(player.advance(&eat, 50.0), Some(PlaybackEvent::Completed));
    }

    #[test]
    fn bad_delta_is_ignored() {
        let clip = test_clip(&[100], false);
        let mut player = ClipPlayer::new(&clip);
        assert_eq!(player.advance(&clip, f32::NAN), None);
        assert_eq!(player.advance(&clip, -10.0), None);
        assert!(player.is_playing());
    }
}
