use std::fmt;
use std::str::FromStr;

use crate::error::SheetError;

/// Position of one physical frame in a sheet's frame list.
///
/// Indices follow the document order of the sheet's `frames` section, which
/// is also the order Aseprite exported them in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameRef(pub usize);

impl FrameRef {
    /// The positional index into [`RawSheet::frames`].
    pub fn index(self) -> usize {
        self.0
    }
}

/// Playback direction of a tag, as authored in Aseprite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Reverse,
    PingPong,
    PingPongReverse,
}

impl Direction {
    /// Every direction the compiler understands.
    pub const ALL: [Direction; 4] = [
        Direction::Forward,
        Direction::Reverse,
        Direction::PingPong,
        Direction::PingPongReverse,
    ];

    /// The lowercase name used in sheet metadata.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Reverse => "reverse",
            Direction::PingPong => "pingpong",
            Direction::PingPongReverse => "pingpong_reverse",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a direction string is not one of the four known values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDirection(pub String);

impl FromStr for Direction {
    type Err = UnknownDirection;

    /// Case-insensitive; `"PingPong"` and `"pingpong"` are the same direction.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Direction::ALL
            .into_iter()
            .find(|d| d.as_str() == lower)
            .ok_or_else(|| UnknownDirection(s.to_string()))
    }
}

/// A named, directional sub-range of a sheet's frame list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    /// First frame index, inclusive.
    pub from: usize,
    /// Last frame index, inclusive.
    pub to: usize,
    pub direction: Direction,
    /// Aseprite's optional repeat count. A tag with a repeat count plays a
    /// bounded number of times instead of looping forever.
    pub repeat: Option<u32>,
}

impl Tag {
    /// Number of frames covered by `[from, to]`.
    pub fn span(&self) -> usize {
        self.to.saturating_sub(self.from) + 1
    }
}

/// Source rectangle of a frame inside the sheet image, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
pub struct FrameRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// One entry of the sheet's frame table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetFrame {
    /// Frame identifier (the key in Aseprite's hash export, or `filename`).
    pub name: String,
    /// Display duration in milliseconds. `None` when the sheet omitted it.
    pub duration_ms: Option<u32>,
    /// Where the frame lives in the sheet image, if the sheet says so.
    pub rect: Option<FrameRect>,
}

/// A parsed sheet: the frame table in document order plus its tags.
///
/// Read once from the external resource and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSheet {
    /// Path of the sheet image, already resolved against the sheet location.
    pub image: String,
    pub frames: Vec<SheetFrame>,
    pub tags: Vec<Tag>,
}

/// A frame reference paired with how long it stays on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedFrame {
    pub frame: FrameRef,
    pub duration_ms: u32,
}

/// A ready-to-play animation: ordered, timed frames for one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clip {
    pub name: String,
    pub frames: Vec<TimedFrame>,
    pub looping: bool,
}

impl Clip {
    /// Sum of all frame durations.
    pub fn total_duration_ms(&self) -> u64 {
        self.frames.iter().map(|f| u64::from(f.duration_ms)).sum()
    }

    /// Number of frames in playback order (duplicates included).
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Always `false` for clips produced by [`crate::ClipAtlas::build`].
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Parse a direction string, attributing failures to the owning tag.
pub(crate) fn parse_direction(tag: &str, raw: &str) -> Result<Direction, SheetError> {
    raw.parse()
        .map_err(|UnknownDirection(direction)| SheetError::UnsupportedDirection {
            tag: tag.to_string(),
            direction,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_parse_is_case_insensitive() {
        assert_eq!("forward".parse(), Ok(Direction::Forward));
        assert_eq!("Reverse".parse(), Ok(Direction::Reverse));
        assert_eq!("PINGPONG".parse(), Ok(Direction::PingPong));
        assert_eq!("PingPong_Reverse".parse(), Ok(Direction::PingPongReverse));
    }

    #[test]
    fn unknown_direction_is_rejected() {
        let err = "sideways".parse::<Direction>().unwrap_err();
        assert_eq!(err, UnknownDirection("sideways".into()));
    }

    #[test]
    fn parse_direction_names_the_tag() {
        let err = parse_direction("bounce_left", "spiral").unwrap_err();
        assert!(matches!(
            err,
            SheetError::UnsupportedDirection { ref tag, ref direction }
                if tag == "bounce_left" && direction == "spiral"
        ));
    }

    #[test]
    fn direction_display_round_trips_through_from_str() {
        for d in Direction::ALL {
            assert_eq!(d.to_string().parse(), Ok(d));
        }
    }

    #[test]
    fn tag_span_counts_inclusive_range() {
        let tag = Tag {
            name: "t".into(),
            from: 3,
            to: 3,
            direction: Direction::Forward,
            repeat: None,
        };
        assert_eq!(tag.span(), 1);
    }

    #[test]
    fn clip_total_duration_sums_frames() {
        let clip = Clip {
            name: "c".into(),
            frames: vec![
                TimedFrame {
                    frame: FrameRef(0),
                    duration_ms: 100,
                },
                TimedFrame {
                    frame: FrameRef(1),
                    duration_ms: 250,
                },
            ],
            looping: true,
        };
        assert_eq!(clip.total_duration_ms(), 350);
        assert_eq!(clip.len(), 2);
        assert!(!clip.is_empty());
    }
}
