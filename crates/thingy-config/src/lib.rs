//! Configuration types and loaders for the Thingy pet.
//!
//! This crate owns the on-disk tuning schema (`thingy.toml`) so the
//! simulation and the shell share a single source of truth.

pub mod tuning;

pub use tuning::{ClipNames, HappinessTuning, HungerTuning, MotionTuning, PetTuning};
