use std::collections::{HashMap, HashSet};

use crate::compile::compile_tag;
use crate::error::SheetError;
use crate::timing::resolve_clip;
use crate::types::{Clip, RawSheet};

/// Every clip compiled from one sheet, keyed by tag name.
///
/// Built once per load and never patched; a reload builds a new atlas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipAtlas {
    clips: HashMap<String, Clip>,
    frame_count: usize,
}

impl ClipAtlas {
    /// Compile every tag of `sheet`. Every clip loops; a tag's repeat count
    /// is kept on the raw tag but does not affect playback.
    pub fn build(sheet: &RawSheet) -> Result<Self, SheetError> {
        Self::build_with_one_shots(sheet, &[])
    }

    /// Like [`build`](Self::build), additionally forcing the named clips to
    /// play once instead of looping.
    pub fn build_with_one_shots(sheet: &RawSheet, one_shots: &[&str]) -> Result<Self, SheetError> {
        let mut seen = HashSet::new();
        let mut clips = HashMap::with_capacity(sheet.tags.len());

        for tag in &sheet.tags {
            if !seen.insert(tag.name.as_str()) {
                return Err(SheetError::DuplicateTag(tag.name.clone()));
            }
            let sequence = compile_tag(&sheet.frames, tag)?;
            let looping = !one_shots.contains(&tag.name.as_str());
            let clip = resolve_clip(&tag.name, &sequence, &sheet.frames, looping)?;
            tracing::trace!(
                clip = %clip.name,
                direction = %tag.direction,
                frames = clip.len(),
                looping,
                "compiled clip"
            );
            clips.insert(tag.name.clone(), clip);
        }

        Ok(Self {
            clips,
            frame_count: sheet.frames.len(),
        })
    }

    /// Look up a clip by name.
    ///
    /// Callers only ask for names they know the sheet defines, so
    /// [`SheetError::ClipNotFound`] means the caller has a bug.
    pub fn get(&self, name: &str) -> Result<&Clip, SheetError> {
        self.clips
            .get(name)
            .ok_or_else(|| SheetError::ClipNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    /// Fail with the first name in `names` the atlas lacks.
    pub fn require<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Result<(), SheetError> {
        for name in names {
            self.get(name)?;
        }
        Ok(())
    }

    /// Clip names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.clips.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Number of frames in the sheet the atlas was built from.
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }
}
