//! # chronicle-review
//!
//! Acceptance control for reviewed section drafts: a threshold gate that
//! applies the rubric floor on top of the reviewer's own verdict, and a
//! fix-loop controller that bounds the redraft cycle and force-terminates
//! at the round limit.

pub mod controller;
pub mod gate;

pub use controller::{FixLoopController, SectionState};
pub use gate::ReviewGate;
