//! In-page search over a rendered documentation page.
//!
//! [`build_index`] captures headings and text blocks once per page load;
//! [`QueryEngine`] scores and ranks them per query; [`render`] turns outcomes into
//! result markup; [`SearchSurface`] ties it together as an event-driven state machine.

// Module declarations
pub(crate) mod index;
pub(crate) mod query;
pub mod render;
pub(crate) mod scoring;
pub(crate) mod surface;
pub(crate) mod tokenize;

// Public re-exports (used via lib.rs)
pub use index::{EntryKind, IndexEntry, SearchIndex, build_index};
pub use query::{QueryEngine, ScoredEntry, SearchOutcome, search};
pub use render::{highlight_terms, render_results, type_label};
pub use scoring::{EXACT_MATCH_BONUS, EntryScore, HEADING_BONUS, score_entry};
pub use surface::{Navigation, ResultRow, ScrollBehavior, ScrollBlock, SearchSurface, SurfaceState};
pub use tokenize::{normalize_query, query_tokens, slugify};

// Internal re-exports
pub(crate) use index::{IdAllocator, heading_id};
