//! # chronicle-pipeline
//!
//! The end-to-end report pipeline: concurrent per-section research, the
//! bounded review/fix loop, the editorial pass, and final assembly, all
//! driven through an explicit state machine. The only error that escapes
//! a run is a citation-policy violation; everything else degrades locally.

pub mod merge;
pub mod runner;
pub mod state;

pub use merge::merge_section_outputs;
pub use runner::{Pipeline, PipelineOutput};
pub use state::{PipelineFsm, PipelineState};
