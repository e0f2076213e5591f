//! Shell infrastructure for the Thingy runtime.
//!
//! Provides the pieces the terminal shell wraps around the pet simulation:
//! the event type and FIFO event bus, a frame clock that turns wall time into
//! tick lengths, and the logging subsystem.

pub mod bus;
pub mod clock;
pub mod event;
pub mod logging;
