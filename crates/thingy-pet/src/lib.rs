//! Simulation core for the Thingy virtual pet.
//!
//! The pet walks toward the centre of its viewport, gets unhappy when it
//! strays outside the comfort rectangle or goes hungry, and picks an idle clip
//! from its mood and facing. Feeding plays a one-shot clip and tops up hunger
//! when that clip finishes.
//!
//! # Quick start
//!
//! ```no_run
//! use thingy_config::PetTuning;
//! use thingy_pet::{Action, Thingy, Viewport};
//!
//! let mut pet = Thingy::load_default(PetTuning::default(), Viewport::new(80.0, 24.0), 16.0).unwrap();
//! pet.tick(16.0);
//! pet.on_action(Action::Feed);
//! let frame = pet.render();
//! println!("{} #{} at {:?}", frame.clip, frame.frame_index, frame.position);
//! ```

pub mod machine;
pub mod motion;
mod mood;
mod player;
mod state;
mod thingy;
mod viewport;

pub use machine::{FeedCompletion, FeedTicket, TickReport};
pub use mood::{crosses_band, MoodBand};
pub use player::{ClipPlayer, PlaybackEvent};
pub use state::PetState;
pub use thingy::{Action, RenderSnapshot, Thingy};
pub use viewport::{ComfortRect, Viewport};
