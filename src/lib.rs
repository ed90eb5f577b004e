//! Incremental bracket pair colorizer
//!
//! Colors matching brackets in a text document, skipping brackets inside
//! comments and strings, and rescans only from the first edited line.

pub mod colorizer;
pub mod config;
pub mod document;
pub mod error;
pub mod render;
pub mod scheduler;

pub use colorizer::{ColorizerManager, DocumentSession, RenderTarget, Settings};
pub use config::{ColorMode, Config};
pub use document::{ContentChange, Position, Range, TextDocument, TextSource};
pub use error::{ColorizerError, ConfigError, Result};
pub use scheduler::{ClockScheduler, ManualScheduler, Scheduler, TaskHandle};
