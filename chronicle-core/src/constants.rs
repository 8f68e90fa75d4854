/// Chronicle system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Retrieval calls held back from the search phase for article fetching.
pub const FETCH_RESERVE: u32 = 3;

/// Maximum full-article fetches per acquisition run.
pub const MAX_ARTICLE_FETCHES: usize = 3;

/// Maximum results requested from the search provider per query.
pub const MAX_SEARCH_RESULTS: usize = 5;

/// Maximum bullets per section draft.
pub const MAX_BULLETS: usize = 5;

/// Citation markers rendered after the big-picture paragraph.
pub const BIG_PICTURE_MARKER_CAP: usize = 3;

/// Citation markers rendered after each bullet.
pub const BULLET_MARKER_CAP: usize = 2;

/// Evidence ids drawn by fallback assignment for the big-picture paragraph.
pub const BIG_PICTURE_FALLBACK_IDS: usize = 2;

/// Character cap applied to fetched article text.
pub const ARTICLE_TEXT_CAP: usize = 5_000;

/// Character cap applied to evidence text when serialized into prompts.
pub const PROMPT_TEXT_CAP: usize = 1_000;

/// Default per-section retrieval call budget (search + fetch combined).
pub const DEFAULT_EVIDENCE_BUDGET: u32 = 12;

/// Default maximum review rounds before the fix loop force-terminates.
pub const DEFAULT_MAX_REVIEW_ROUNDS: u32 = 2;

/// Minimum grounding score for acceptance.
pub const DEFAULT_GROUNDING_THRESHOLD: u8 = 4;

/// Minimum clarity score for acceptance.
pub const DEFAULT_CLARITY_THRESHOLD: u8 = 4;

/// Default voice profile applied during drafting, review, and editing.
pub const DEFAULT_VOICE_PROFILE: &str = "expert_operator";

/// Risk flag attached when citation ids were assigned automatically.
pub const AUTO_ASSIGN_RISK_FLAG: &str = "Auto-assigned evidence ids due to missing citations.";
