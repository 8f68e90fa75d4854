//! # chronicle-core
//!
//! Foundation crate for the chronicle report pipeline.
//! Defines all shared types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod logging;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::ChronicleConfig;
pub use errors::{ChronicleError, ChronicleResult};
pub use models::evidence::{EvidenceItem, Reliability, SourceType};
pub use models::review::{FixAction, FixActionType, FixPlan, ReviewResult, ReviewScore};
pub use models::section::{Bullet, SectionDraft, SectionSpec};
pub use models::window::TimeWindow;
pub use models::budget::CallBudget;
