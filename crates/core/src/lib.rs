//! inkboard-core: Core traits and rotation logic for inkboard.
//!
//! This crate contains the collaborator traits (DataSource, DisplayDriver),
//! their error types and the quote Rotator.

mod data_source;
mod display;
mod rotator;

pub use data_source::{BoxedDataSource, DataSource, QuotePool, SourceError, SourceMetadata};
pub use display::{BoxedDisplayDriver, DisplayDriver, DisplayError};
pub use rotator::Rotator;

// Re-export types used in trait signatures for convenience
pub use inkboard_types::{FontOption, QuoteRecord};
