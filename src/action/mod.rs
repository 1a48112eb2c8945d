//! Action decoding and intent resolution.

pub mod decoder;
pub mod intent;

pub use decoder::ActionDecoder;
pub use intent::{ActionSelection, Intent, Movement, NavigationGoal, ProbeRequest, Rotation};
