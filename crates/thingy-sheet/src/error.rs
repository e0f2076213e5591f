use std::fmt;

/// Everything that can go wrong turning a sheet resource into clips.
///
/// All variants except [`ClipNotFound`](Self::ClipNotFound) are terminal for
/// the load attempt that produced them; nothing is retried here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetError {
    /// The sheet resource could not be read.
    Io { location: String, message: String },
    /// The sheet JSON is malformed or does not have the expected shape.
    Parse(String),
    /// A tag uses a direction outside forward/reverse/pingpong/pingpong_reverse.
    UnsupportedDirection { tag: String, direction: String },
    /// A tag's `from` is greater than its `to`.
    InvertedRange { tag: String, from: usize, to: usize },
    /// A tag reaches past the last frame of the sheet.
    TagOutOfRange {
        tag: String,
        to: usize,
        frame_count: usize,
    },
    /// Two tags share a name.
    DuplicateTag(String),
    /// A frame referenced by a tag has no (or a zero) duration.
    MissingDuration { tag: String, frame: String },
    /// A clip name was requested that the atlas does not contain.
    ClipNotFound(String),
}

impl SheetError {
    /// True for fetch/decode failures, as opposed to bad sheet metadata.
    pub fn is_load_error(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Parse(_))
    }
}

impl fmt::Display for SheetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { location, message } => {
                write!(f, "failed to read sheet {location}: {message}")
            }
            Self::Parse(msg) => write!(f, "failed to parse sheet JSON: {msg}"),
            Self::UnsupportedDirection { tag, direction } => write!(
                f,
                "unsupported tag direction {direction:?} on tag {tag:?}"
            ),
            Self::InvertedRange { tag, from, to } => {
                write!(f, "tag {tag:?} has from={from} greater than to={to}")
            }
            Self::TagOutOfRange {
                tag,
                to,
                frame_count,
            } => write!(
                f,
                "tag {tag:?} ends at frame {to} but the sheet only has {frame_count} frames"
            ),
            Self::DuplicateTag(name) => write!(f, "duplicate tag name {name:?}"),
            Self::MissingDuration { tag, frame } => {
                write!(f, "frame {frame:?} used by tag {tag:?} has no duration")
            }
            Self::ClipNotFound(name) => write!(f, "clip not found: {name}"),
        }
    }
}

impl std::error::Error for SheetError {}
