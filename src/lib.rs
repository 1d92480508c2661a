pub mod cli;
pub mod commands;
pub mod config;
pub mod debounce;
pub mod error;
pub mod page;
pub mod search;
pub mod sidebar;
pub mod toc;
pub mod tracing;

pub use config::SiteConfig;
pub use error::{ConfigError, PageError, SelectorError};
pub use page::{NodePath, Page, Selector};
pub use search::{
    EntryKind, IndexEntry, QueryEngine, ScoredEntry, SearchIndex, SearchOutcome, SearchSurface,
    SurfaceState, build_index, search,
};
pub use sidebar::{Sidebar, SidebarController};
pub use toc::TableOfContents;
