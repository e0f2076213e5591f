//! Sprite-sheet loading and clip compilation for the Thingy pet.
//!
//! This crate reads an Aseprite JSON sheet export, compiles each frame tag
//! into a directional frame sequence, attaches per-frame durations, and
//! collects the results into a [`ClipAtlas`] keyed by tag name.
//!
//! # Quick start
//!
//! ```no_run
//! use thingy_sheet::{load_sheet, ClipAtlas, FileSource};
//!
//! let sheet = load_sheet(&FileSource, "assets/sprites/Thingy.json").unwrap();
//! let atlas = ClipAtlas::build(&sheet).unwrap();
//! let bounce = atlas.get("bounce_right").unwrap();
//! println!("{} frames, {}ms", bounce.len(), bounce.total_duration_ms());
//! ```

mod atlas;
mod compile;
mod error;
mod loader;
mod pixels;
mod raw;
mod timing;
mod types;

pub use atlas::ClipAtlas;
pub use compile::compile_tag;
pub use error::SheetError;
pub use loader::{
    default_sheet, default_sheet_png, load_from_bytes, load_sheet, relative_image_path,
    FileSource, SheetSource, DEFAULT_SHEET_LOCATION,
};
pub use pixels::{FramePixels, SheetPixels};
pub use raw::parse_sheet;
pub use timing::resolve_clip;
pub use types::{
    Clip, Direction, FrameRect, FrameRef, RawSheet, SheetFrame, Tag, TimedFrame, UnknownDirection,
};
