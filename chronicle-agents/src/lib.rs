//! # chronicle-agents
//!
//! The three text collaborators of the pipeline — drafting, review, and
//! editing — behind object-safe async traits. Ships a live implementation
//! speaking a chat-completion JSON contract and deterministic stubs for
//! tests. Malformed collaborator output always degrades locally; it never
//! aborts the pipeline.

pub mod drafter;
pub mod editor;
pub mod reviewer;
pub mod stub;
pub mod traits;
mod wire;

pub use drafter::{postprocess_draft, LlmDrafter, RawDraft};
pub use editor::LlmEditor;
pub use reviewer::LlmReviewer;
pub use stub::{ScriptedVerdict, StubDrafter, StubEditor, StubReviewer};
pub use traits::{DraftConstraints, Drafter, EditOutcome, Editor, Reviewer};
pub use wire::ChatClient;
