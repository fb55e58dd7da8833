//! Static site generator for a CTF write-up portfolio.

mod assets;
pub mod components;
mod config;
mod highlight;
pub mod loader;
pub mod markup;
pub mod pages;
pub mod record;
mod site;
pub mod stats;
mod util;

pub use assets::write_css_assets;
pub use config::Config;
pub use highlight::{Highlighter, theme_css};
pub use loader::{
    ContentLoader, FALLBACK_DOCUMENT, FsLoader, LoadError, LoadOutcome, WriteupSession,
    load_or_fallback,
};
pub use markup::{AssetResolver, Block, Inline, MarkupDocument, MarkupRenderer, transform};
pub use record::{Difficulty, Portfolio, Project, Record};
pub use site::{SiteSummary, generate_site};
