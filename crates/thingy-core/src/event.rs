use std::time::Instant;

/// Everything the shell loop reacts to, in the order it happened.
#[derive(Debug, Clone)]
pub enum Event {
    /// Time to advance the simulation.
    Tick { now: Instant },
    /// A key the shell did not bind itself.
    Key(crossterm::event::KeyEvent),
    /// The terminal changed size (in cells).
    Resize { cols: u16, rows: u16 },
    /// The user asked to feed the pet.
    Feed,
    Quit,
}
