//! Deterministic game core
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - Seeded RNG only
//! - Time only as explicit `now_ms` arguments
//! - Host effects only through the capability traits in [`crate::platform`]

pub mod gesture;
pub mod machine;
pub mod orientation;
pub mod state;

pub use gesture::{CooldownTracker, GestureClassifier, GestureEvent, GestureKind};
pub use machine::{Intent, StateMachine, Transition};
pub use orientation::{Orientation, primary_axis};
pub use state::{GameState, Phase};
