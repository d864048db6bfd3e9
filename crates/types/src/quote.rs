//! Quote record type

use serde::{Deserialize, Serialize};

/// Text shown when no quotes could be loaded
pub const PLACEHOLDER_TEXT: &str = "No quotes available";

/// A single quote as stored in the quote list
///
/// Serialized as `{"quote": "...", "author": "..."}`. The author may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRecord {
    /// Body text of the quote
    #[serde(rename = "quote")]
    pub text: String,
    /// Attribution, empty when unknown
    #[serde(default)]
    pub author: String,
}

impl QuoteRecord {
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
        }
    }

    /// The "no data" sentinel used in place of an empty pool
    pub fn placeholder() -> Self {
        Self::new(PLACEHOLDER_TEXT, "")
    }
}
