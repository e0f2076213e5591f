//! Serde view of Aseprite's JSON sheet export.
//!
//! Only the fields the compiler needs are modelled; Aseprite writes many more
//! (`rotated`, `trimmed`, `layers`, ...) and those are ignored.

use std::fmt;

use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::error::SheetError;
use crate::types::{parse_direction, FrameRect, RawSheet, SheetFrame, Tag};

#[derive(Debug, Deserialize)]
struct SheetJson {
    frames: FramesJson,
    meta: MetaJson,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MetaJson {
    image: String,
    #[serde(default)]
    frame_tags: Vec<TagJson>,
}

#[derive(Debug, Deserialize)]
struct TagJson {
    name: String,
    from: usize,
    to: usize,
    direction: String,
    #[serde(default)]
    repeat: Option<RepeatJson>,
}

/// Aseprite writes `repeat` as a string (`"3"`); accept a number as well.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RepeatJson {
    Count(u32),
    Text(String),
}

impl RepeatJson {
    fn count(&self) -> Result<u32, String> {
        match self {
            RepeatJson::Count(n) => Ok(*n),
            RepeatJson::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| format!("invalid repeat count {s:?}")),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FrameJson {
    #[serde(default)]
    filename: Option<String>,
    #[serde(default)]
    duration: Option<u32>,
    #[serde(default)]
    frame: Option<FrameRect>,
}

/// The `frames` section in document order.
///
/// Aseprite exports either a hash (`{"name": {...}}`) or an array
/// (`[{"filename": "name", ...}]`). The hash form is read entry by entry so the
/// authored order survives; it is never collected into a sorted or hashed map.
#[derive(Debug)]
struct FramesJson(Vec<(String, FrameJson)>);

impl<'de> Deserialize<'de> for FramesJson {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(FramesVisitor)
    }
}

struct FramesVisitor;

impl<'de> Visitor<'de> for FramesVisitor {
    type Value = FramesJson;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a frame hash or a frame array")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut frames = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((name, frame)) = map.next_entry::<String, FrameJson>()? {
            frames.push((name, frame));
        }
        Ok(FramesJson(frames))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut frames = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(frame) = seq.next_element::<FrameJson>()? {
            let name = frame
                .filename
                .clone()
                .ok_or_else(|| <A::Error as de::Error>::missing_field("filename"))?;
            frames.push((name, frame));
        }
        Ok(FramesJson(frames))
    }
}

/// Parse sheet JSON into a [`RawSheet`].
///
/// `meta.image` is returned verbatim; resolving it against the sheet's
/// location is the loader's job. Tag directions are validated here, so a sheet
/// with an unknown direction never produces a `RawSheet`.
pub fn parse_sheet(json: &[u8]) -> Result<RawSheet, SheetError> {
    let sheet: SheetJson =
        serde_json::from_slice(json).map_err(|e| SheetError::Parse(e.to_string()))?;

    let frames = sheet
        .frames
        .0
        .into_iter()
        .map(|(name, frame)| SheetFrame {
            name,
            duration_ms: frame.duration,
            rect: frame.frame,
        })
        .collect();

    let tags = sheet
        .meta
        .frame_tags
        .into_iter()
        .map(|tag| {
            let direction = parse_direction(&tag.name, &tag.direction)?;
            let repeat = match &tag.repeat {
                Some(r) => Some(r.count().map_err(SheetError::Parse)?),
                None => None,
            };
            Ok(Tag {
                name: tag.name,
                from: tag.from,
                to: tag.to,
                direction,
                repeat,
            })
        })
        .collect::<Result<Vec<_>, SheetError>>()?;

    Ok(RawSheet {
        image: sheet.meta.image,
        frames,
        tags,
    })
}
