use crate::error::SheetError;
use crate::types::{Clip, FrameRef, SheetFrame, TimedFrame};

/// Attach display durations to a compiled frame sequence.
///
/// Output order is exactly the input order. A referenced frame without a
/// positive duration fails the whole sheet.
pub fn resolve_clip(
    name: &str,
    sequence: &[FrameRef],
    frames: &[SheetFrame],
    looping: bool,
) -> Result<Clip, SheetError> {
    let timed = sequence
        .iter()
        .map(|&frame_ref| {
            let missing = || SheetError::MissingDuration {
                tag: name.to_string(),
                frame: frames
                    .get(frame_ref.index())
                    .map(|f| f.name.clone())
                    .unwrap_or_else(|| format!("#{}", frame_ref.index())),
            };
            let duration_ms = frames
                .get(frame_ref.index())
                .and_then(|f| f.duration_ms)
                .filter(|&ms| ms > 0)
                .ok_or_else(missing)?;
            Ok(TimedFrame {
                frame: frame_ref,
                duration_ms,
            })
        })
        .collect::<Result<Vec<_>, SheetError>>()?;

    Ok(Clip {
        name: name.to_string(),
        frames: timed,
        looping,
    })
}
