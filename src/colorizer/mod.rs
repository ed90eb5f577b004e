//! Bracket pair colorizer
//!
//! This module finds bracket characters, decides whether each one is live
//! (outside comments and strings) and colors live brackets so that pairs
//! match and unmatched closers stand out. Results are cached per line and
//! only the lines from an edit onwards are rescanned.

mod bracket;
mod builtin;
mod cache;
mod dispatch;
mod indexes;
mod language;
mod line;
mod manager;
mod modifier;
mod session;
mod settings;
mod state;

pub use bracket::BracketPair;
pub use cache::DocumentCache;
pub use dispatch::{collect_color_ranges, dispatch, RenderTarget};
pub use indexes::{ColorIndexes, IndexStack};
pub use language::LanguageDefinition;
pub use line::LineRecord;
pub use manager::ColorizerManager;
pub use modifier::TokenModifier;
pub use session::{DocumentSession, ScanPhase};
pub use settings::{BracketSide, Settings};
pub use state::LineScanState;
