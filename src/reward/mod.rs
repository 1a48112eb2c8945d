//! Reward computation: frozen-edge tracking, event classification, shaping
//! and per-agent accounting.

pub mod events;
pub mod frozen;
pub mod ledger;
pub mod shaping;

pub use events::{classify, RewardEvent, TickContext, WorldEvent};
pub use frozen::FrozenTracker;
pub use ledger::{RewardBreakdown, RewardLedger};
pub use shaping::RewardShaper;
