//! Shared data model for the report pipeline.

pub mod budget;
pub mod evidence;
pub mod review;
pub mod section;
pub mod window;

pub use budget::CallBudget;
pub use evidence::{EvidenceItem, Reliability, SourceType};
pub use review::{FixAction, FixActionType, FixPlan, ReviewResult, ReviewScore};
pub use section::{Bullet, SectionDraft, SectionSpec};
pub use window::TimeWindow;
