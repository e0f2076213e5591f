use std::path::Path;

use anyhow::{bail, Context, Result};
use image::GenericImageView;

use crate::types::{FrameRef, RawSheet};

/// Pixels of one sheet frame: raw RGBA, row-major, 4 bytes per pixel.
///
/// Kept as a flat `Vec<u8>` so renderers don't need the `image` crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramePixels {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Decoded pixels for every frame of a sheet, indexed like its frame list.
#[derive(Debug, Clone)]
pub struct SheetPixels {
    frames: Vec<FramePixels>,
}

impl SheetPixels {
    /// Cut every frame of `sheet` out of the PNG image.
    ///
    /// Every frame must carry a source rectangle that fits inside the image.
    pub fn decode(png: &[u8], sheet: &RawSheet) -> Result<Self> {
        let image = image::load_from_memory(png).context("failed to decode sheet image")?;
        let (image_w, image_h) = image.dimensions();

        let mut frames = Vec::with_capacity(sheet.frames.len());
        for frame in &sheet.frames {
            let Some(rect) = frame.rect else {
                bail!("frame {:?} has no source rectangle", frame.name);
            };
            let fits_x = rect.x.checked_add(rect.w).is_some_and(|r| r <= image_w);
            let fits_y = rect.y.checked_add(rect.h).is_some_and(|b| b <= image_h);
            if !fits_x || !fits_y || rect.w == 0 || rect.h == 0 {
                bail!(
                    "frame {:?} rectangle {}x{}+{}+{} does not fit the {image_w}x{image_h} image",
                    frame.name,
                    rect.w,
                    rect.h,
                    rect.x,
                    rect.y,
                );
            }
            let sub = image.crop_imm(rect.x, rect.y, rect.w, rect.h);
            frames.push(FramePixels {
                data: sub.to_rgba8().into_raw(),
                width: rect.w,
                height: rect.h,
            });
        }

        Ok(Self { frames })
    }

    /// Read the sheet image from disk and decode it.
    pub fn from_file(path: &Path, sheet: &RawSheet) -> Result<Self> {
        let png =
            std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
        Self::decode(&png, sheet)
    }

    pub fn frame(&self, frame: FrameRef) -> Option<&FramePixels> {
        self.frames.get(frame.index())
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{default_sheet, default_sheet_png};
    use crate::types::FrameRect;

    #[test]
    fn default_sheet_decodes_every_frame() {
        let sheet = default_sheet().unwrap();
        let pixels = SheetPixels::decode(default_sheet_png(), &sheet).unwrap();
        assert_eq!(pixels.len(), sheet.frames.len());

        let first = pixels.frame(FrameRef(0)).unwrap();
        assert_eq!(first.width, 16);
        assert_eq!(first.height, 16);
        assert_eq!(first.data.len(), 16 * 16 * 4);
        assert!(pixels.frame(FrameRef(sheet.frames.len())).is_none());
    }

    #[test]
    fn bad_png_returns_error() {
        let sheet = default_sheet().unwrap();
        assert!(SheetPixels::decode(b"not a png", &sheet).is_err());
    }

    #[test]
    fn frame_without_rect_is_rejected() {
        let mut sheet = default_sheet().unwrap();
        sheet.frames[3].rect = None;
        let err = SheetPixels::decode(default_sheet_png(), &sheet).unwrap_err();
        assert!(err.to_string().contains("no source rectangle"));
    }

    #[test]
    fn rect_outside_image_is_rejected() {
        let mut sheet = default_sheet().unwrap();
        sheet.frames[0].rect = Some(FrameRect {
            x: 10_000,
            y: 0,
            w: 16,
            h: 16,
        });
        let err = SheetPixels::decode(default_sheet_png(), &sheet).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("rectangle 16x16+10000+0 does not fit"), "{message}");
        assert!(message.is_ascii(), "{message}");
    }
}
