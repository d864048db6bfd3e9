//! inkboard-sources: Quote and notification sources for inkboard.
//!
//! The quote source reads the cached quote list and refreshes it from a
//! remote endpoint; the notification builder turns the calendar into
//! countdown lines.

mod cache;
mod notifications;
mod quote_source;
mod remote;

pub use cache::{read_quotes, write_quotes};
pub use notifications::{
    align_columns, days_until, end_of_month, end_of_quarter, next_yearly_date,
    NotificationBuilder,
};
pub use quote_source::QuoteSource;
pub use remote::RemoteFetcher;
