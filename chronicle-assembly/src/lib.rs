//! # chronicle-assembly
//!
//! Turns accepted section drafts into the final markdown report: evidence
//! ids become dense per-section citation numbers, sections render with
//! capped inline markers and a footnote list, and the report stitches the
//! sections together under a fixed header template.

pub mod numbering;
pub mod render;

pub use numbering::CitationNumbers;
pub use render::{assemble_report, render_section};
