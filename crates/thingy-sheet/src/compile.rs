use crate::error::SheetError;
use crate::types::{Direction, FrameRef, SheetFrame, Tag};

/// Turn one tag into its playback-ordered frame sequence.
///
/// Walks `frames` once in document order, keeping every frame whose position
/// lies in `[tag.from, tag.to]` and stopping as soon as the position passes
/// `tag.to`. That forward run is then arranged according to the tag's
/// direction. Ping-pong variants repeat both endpoints, matching how Aseprite
/// authors expect a round trip to look.
pub fn compile_tag(frames: &[SheetFrame], tag: &Tag) -> Result<Vec<FrameRef>, SheetError> {
    if tag.from > tag.to {
        return Err(SheetError::InvertedRange {
            tag: tag.name.clone(),
            from: tag.from,
            to: tag.to,
        });
    }
    if tag.to >= frames.len() {
        return Err(SheetError::TagOutOfRange {
            tag: tag.name.clone(),
            to: tag.to,
            frame_count: frames.len(),
        });
    }

    let mut forward = Vec::with_capacity(tag.span());
    for (index, _) in frames.iter().enumerate() {
        if index > tag.to {
            break;
        }
        if index >= tag.from {
            forward.push(FrameRef(index));
        }
    }

    let reversed = || forward.iter().rev().copied();
    let sequence = match tag.direction {
        Direction::Forward => forward.clone(),
        Direction::Reverse => reversed().collect(),
        Direction::PingPong => forward.iter().copied().chain(reversed()).collect(),
        Direction::PingPongReverse => reversed().chain(forward.iter().copied()).collect(),
    };
    Ok(sequence)
}
