//! TUI rendering layer for Thingy.
//!
//! Draws the playfield with the pet's current sprite frame in half-block
//! cells, plus a HUD with attribute gauges and recent log lines. Everything
//! here is a pure function of the pet's render snapshot and state; the app
//! owns the terminal.

pub mod hud;
pub mod layout;
pub mod sprite;
