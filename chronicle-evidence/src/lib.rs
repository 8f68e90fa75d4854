//! # chronicle-evidence
//!
//! Evidence handling for the report pipeline: the deduplicating
//! [`EvidencePack`], publish-date resolution, and time-window filtering.

pub mod dates;
pub mod normalize;
pub mod pack;
pub mod window;

pub use dates::{ensure_publish_date, resolve_publish_date};
pub use normalize::{normalize_title, normalize_url};
pub use pack::EvidencePack;
pub use window::{is_outside_window, DatePolicy};
